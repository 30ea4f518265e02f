use crate::fetch::parse_catalog;
use crate::model::QuakeCatalog;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CACHE_FILE: &str = "response.json";

/// On-disk copy of the last raw response body.
#[derive(Debug, Clone)]
pub struct CacheFile {
    path: PathBuf,
}

impl CacheFile {
    pub fn new(dest_dir: &Path, file_name: &str) -> Self {
        Self {
            path: dest_dir.join(file_name),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the cache with `text` followed by a newline.
    pub fn write(&self, text: &str) -> Result<()> {
        let mut file = File::create(&self.path)
            .with_context(|| format!("Failed to create cache file: {}", self.path.display()))?;
        writeln!(file, "{}", text)
            .with_context(|| format!("Failed to write cache file: {}", self.path.display()))?;

        debug!("Cached {} bytes to {}", text.len() + 1, self.path.display());
        Ok(())
    }

    pub fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read cache file: {}", self.path.display()))
    }

    /// Parse the cached body without touching the network.
    pub fn load(&self) -> Result<QuakeCatalog> {
        let text = self.read()?;
        parse_catalog(&text)
            .with_context(|| format!("Cache file {} is not a valid catalog", self.path.display()))
    }
}

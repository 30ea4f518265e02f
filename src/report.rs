//! Run summary: strongest event and per-year statistics.

use crate::analysis::{mean_magnitude_per_year, quakes_per_year};
use crate::chart::{frequency_chart, mean_magnitude_chart, BarChart};
use crate::model::{format_float, Location, QuakeCatalog};
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const MEAN_CHART_FILE: &str = "mean_magnitude_per_year.txt";
pub const FREQUENCY_CHART_FILE: &str = "quakes_per_year.txt";

#[derive(Debug, Clone, Serialize)]
pub struct StrongestQuake {
    pub id: String,
    pub magnitude: f64,
    pub location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearStats {
    pub year: i32,
    pub count: usize,
    pub mean_magnitude: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuakeReport {
    pub generated_at: String,
    pub loaded: u64,
    pub strongest: Option<StrongestQuake>,
    pub per_year: Vec<YearStats>,
    #[serde(skip)]
    means: BTreeMap<i32, f64>,
    #[serde(skip)]
    counts: BTreeMap<i32, usize>,
}

impl QuakeReport {
    pub fn build(catalog: &QuakeCatalog) -> Result<Self> {
        let strongest = match catalog.strongest_quake() {
            Some(quake) => Some(StrongestQuake {
                id: quake.id().to_string(),
                magnitude: quake.magnitude(),
                location: catalog.location_by_id(quake.id())?,
                place: quake.place().map(str::to_string),
            }),
            None => None,
        };

        let means = mean_magnitude_per_year(catalog.quakes())?;
        let counts = quakes_per_year(catalog.quakes())?;

        let per_year = counts
            .iter()
            .map(|(&year, &count)| YearStats {
                year,
                count,
                mean_magnitude: means.get(&year).copied().unwrap_or(0.0),
            })
            .collect();

        Ok(Self {
            generated_at: Utc::now().to_rfc3339(),
            loaded: catalog.count_earthquakes(),
            strongest,
            per_year,
            means,
            counts,
        })
    }

    /// The two lines the tool has always printed.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Loaded {}", self.loaded)];
        match &self.strongest {
            Some(s) => lines.push(format!(
                "The strongest earthquake was at {} with magnitude {}",
                s.location,
                format_float(s.magnitude)
            )),
            None => lines.push("No earthquakes matched the query".to_string()),
        }
        lines
    }

    /// Frequency chart first, then mean magnitude.
    pub fn charts(&self) -> Result<Vec<BarChart>> {
        Ok(vec![
            frequency_chart(&self.counts)?,
            mean_magnitude_chart(&self.means)?,
        ])
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize report")
    }

    /// Write each chart to its own text file under `dir`.
    pub fn save_charts(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create charts directory: {}", dir.display()))?;

        let files = [FREQUENCY_CHART_FILE, MEAN_CHART_FILE];
        let mut written = Vec::with_capacity(files.len());
        for (chart, name) in self.charts()?.iter().zip(files) {
            let path = dir.join(name);
            fs::write(&path, format!("{}\n", chart))
                .with_context(|| format!("Failed to write chart: {}", path.display()))?;
            info!("Chart '{}' saved to {}", chart.title(), path.display());
            written.push(path);
        }
        Ok(written)
    }
}

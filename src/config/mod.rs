use crate::args::{Cli, DEFAULT_ENV_FILE};
use crate::cache::CacheFile;
use anyhow::{Context, Result};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::{debug, info};

mod query;

pub use query::{BoundingBox, OrderBy, QueryConfig, QueryConfigBuilder};

/// Where the catalog comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Query the event service and refresh the cache.
    Remote,
    /// Re-read the last cached response.
    Cache,
}

#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub json: bool,
    pub charts_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub query: QueryConfig,
    pub cache: CacheFile,
    pub source: DataSource,
    pub output: OutputConfig,
}

/// The env file named by `--env-file`, then `APP_ENV_FILE`, then `.env`.
///
/// Resolved from raw argv because the file has to be loaded before clap reads
/// its env fallbacks.
pub(crate) fn env_file_from_args(args: &[OsString]) -> PathBuf {
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        let Some(arg) = arg.to_str() else { continue };
        if arg == "--" {
            break;
        }
        if arg == "--env-file" {
            if let Some(path) = iter.next() {
                return PathBuf::from(path);
            }
        } else if let Some(path) = arg.strip_prefix("--env-file=") {
            return PathBuf::from(path);
        }
    }
    std::env::var_os("APP_ENV_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ENV_FILE))
}

/// Load the env file into the process environment. Variables already set win.
pub(crate) fn preload_env(args: &[OsString]) {
    let env_file = env_file_from_args(args);
    match dotenvy::from_filename(&env_file) {
        Ok(_) => debug!("Loaded environment from {}", env_file.display()),
        Err(e) => debug!("No environment loaded from {}: {}", env_file.display(), e),
    }
}

impl AppConfig {
    pub(crate) fn setup(args: Cli) -> Result<AppConfig> {
        debug!("Environment file: {}", args.env_file.display());

        let bbox = BoundingBox::new(
            args.min_latitude,
            args.max_latitude,
            args.min_longitude,
            args.max_longitude,
        )
        .context("Invalid bounding box")?;

        let query = QueryConfig::builder()
            .endpoint(args.endpoint)
            .start_time(args.start_time)
            .end_time(args.end_time)
            .bbox(bbox)
            .min_magnitude(args.min_magnitude)
            .order_by(args.order_by)
            .build()
            .context("Failed to build query configuration")?;

        let source = if args.from_cache {
            DataSource::Cache
        } else {
            DataSource::Remote
        };

        let config = AppConfig {
            query,
            cache: CacheFile::new(&args.dest_dir, &args.cache_file),
            source,
            output: OutputConfig {
                json: args.json,
                charts_dir: args.charts_dir,
            },
        };

        info!(
            "Query window {} to {}, magnitude >= {}, source {:?}",
            config.query.start_time, config.query.end_time, config.query.min_magnitude, config.source
        );

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_env::isolated_env;
    use clap::Parser;
    use std::fs;
    use temp_dir::TempDir;

    fn cli(extra: &[&str]) -> Cli {
        let mut argv = vec!["quake-stats", "--env-file", "/nonexistent/.env"];
        argv.extend_from_slice(extra);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_setup_defaults() {
        let _env = isolated_env();
        let config = AppConfig::setup(cli(&[])).unwrap();
        assert_eq!(config.source, DataSource::Remote);
        assert_eq!(config.cache.path(), PathBuf::from("./response.json"));
        assert!(!config.output.json);
    }

    #[test]
    fn test_setup_from_cache() {
        let _env = isolated_env();
        let config = AppConfig::setup(cli(&["--from-cache", "--dest-dir", "/tmp/quakes"])).unwrap();
        assert_eq!(config.source, DataSource::Cache);
        assert_eq!(config.cache.path(), PathBuf::from("/tmp/quakes/response.json"));
    }

    #[test]
    fn test_setup_rejects_inverted_window() {
        let _env = isolated_env();
        let result = AppConfig::setup(cli(&["--start-time", "2019-01-01"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_setup_rejects_inverted_bbox() {
        let _env = isolated_env();
        let result = AppConfig::setup(cli(&["--min-latitude", "60"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_env_file_from_args() {
        let _env = isolated_env();
        let argv = |a: &[&str]| a.iter().map(OsString::from).collect::<Vec<_>>();

        assert_eq!(
            env_file_from_args(&argv(&["quake-stats", "--env-file", "a.env"])),
            PathBuf::from("a.env")
        );
        assert_eq!(
            env_file_from_args(&argv(&["quake-stats", "--json", "--env-file=b.env"])),
            PathBuf::from("b.env")
        );
        assert_eq!(
            env_file_from_args(&argv(&["quake-stats", "--", "--env-file", "c.env"])),
            PathBuf::from(".env")
        );

        std::env::set_var("APP_ENV_FILE", "d.env");
        assert_eq!(
            env_file_from_args(&argv(&["quake-stats"])),
            PathBuf::from("d.env")
        );
    }

    #[test]
    fn test_env_file_reaches_query_config() {
        let _env = isolated_env();
        let dir = TempDir::new().unwrap();
        let env_file = dir.path().join("quakes.env");
        fs::write(
            &env_file,
            "QUAKE_MIN_MAGNITUDE=3.5\nQUAKE_CACHE_FILE=from_env.json\nQUAKE_ORDER_BY=magnitude\n",
        )
        .unwrap();

        let argv: Vec<OsString> = vec![
            "quake-stats".into(),
            "--env-file".into(),
            env_file.clone().into_os_string(),
        ];
        preload_env(&argv);
        let config = AppConfig::setup(Cli::try_parse_from(argv).unwrap()).unwrap();

        assert_eq!(config.query.min_magnitude, 3.5);
        assert_eq!(config.query.order_by, OrderBy::Magnitude);
        assert_eq!(config.cache.path(), PathBuf::from("./from_env.json"));
    }

    #[test]
    fn test_flags_override_env_file() {
        let _env = isolated_env();
        let dir = TempDir::new().unwrap();
        let env_file = dir.path().join("quakes.env");
        fs::write(&env_file, "QUAKE_MIN_MAGNITUDE=3.5\n").unwrap();

        let argv: Vec<OsString> = vec![
            "quake-stats".into(),
            "--env-file".into(),
            env_file.clone().into_os_string(),
            "--min-magnitude".into(),
            "2".into(),
        ];
        preload_env(&argv);
        let config = AppConfig::setup(Cli::try_parse_from(argv).unwrap()).unwrap();

        assert_eq!(config.query.min_magnitude, 2.0);
    }
}

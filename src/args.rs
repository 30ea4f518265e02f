use crate::cache::DEFAULT_CACHE_FILE;
use crate::config::OrderBy;
use chrono::NaiveDate;
use clap::{Parser, ValueHint};
use std::path::PathBuf;

pub const DEFAULT_ENV_FILE: &str = ".env";
pub const DEFAULT_ENDPOINT: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query.geojson";
pub const DEFAULT_START_TIME: &str = "2000-01-01";
pub const DEFAULT_END_TIME: &str = "2018-10-11";
pub const DEFAULT_MIN_LATITUDE: f64 = 50.008;
pub const DEFAULT_MAX_LATITUDE: f64 = 58.723;
pub const DEFAULT_MIN_LONGITUDE: f64 = -9.756;
pub const DEFAULT_MAX_LONGITUDE: f64 = 1.67;
pub const DEFAULT_MIN_MAGNITUDE: f64 = 1.0;
pub const DEFAULT_ORDER_BY: &str = "time-asc"; // parsed by parser

/// Fetch earthquake events and print per-year statistics.
///
/// With no flags, queries the British Isles region from 2000-01-01 to
/// 2018-10-11 for events of magnitude 1 and above.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to environment file (default: ./.env). Can also use APP_ENV_FILE.
    #[arg(
        long,
        value_hint = ValueHint::FilePath,
        default_value = DEFAULT_ENV_FILE,
        env = "APP_ENV_FILE"
    )]
    pub(crate) env_file: PathBuf,

    /// Event query endpoint
    #[arg(
        long,
        env = "QUAKE_ENDPOINT",
        value_hint = ValueHint::Url,
        default_value = DEFAULT_ENDPOINT
    )]
    pub(crate) endpoint: String,

    /// First day of the query window (YYYY-MM-DD)
    #[arg(
        long,
        env = "QUAKE_START_TIME",
        value_parser = parse_date,
        default_value = DEFAULT_START_TIME
    )]
    pub(crate) start_time: NaiveDate,

    /// Last day of the query window (YYYY-MM-DD)
    #[arg(
        long,
        env = "QUAKE_END_TIME",
        value_parser = parse_date,
        default_value = DEFAULT_END_TIME
    )]
    pub(crate) end_time: NaiveDate,

    #[arg(
        long,
        env = "QUAKE_MIN_LATITUDE",
        allow_negative_numbers = true,
        default_value_t = DEFAULT_MIN_LATITUDE
    )]
    pub(crate) min_latitude: f64,

    #[arg(
        long,
        env = "QUAKE_MAX_LATITUDE",
        allow_negative_numbers = true,
        default_value_t = DEFAULT_MAX_LATITUDE
    )]
    pub(crate) max_latitude: f64,

    #[arg(
        long,
        env = "QUAKE_MIN_LONGITUDE",
        allow_negative_numbers = true,
        default_value_t = DEFAULT_MIN_LONGITUDE
    )]
    pub(crate) min_longitude: f64,

    #[arg(
        long,
        env = "QUAKE_MAX_LONGITUDE",
        allow_negative_numbers = true,
        default_value_t = DEFAULT_MAX_LONGITUDE
    )]
    pub(crate) max_longitude: f64,

    /// Smallest magnitude to include
    #[arg(long, env = "QUAKE_MIN_MAGNITUDE", default_value_t = DEFAULT_MIN_MAGNITUDE)]
    pub(crate) min_magnitude: f64,

    /// Result ordering (time | time-asc | magnitude | magnitude-asc).
    #[arg(
        long,
        env = "QUAKE_ORDER_BY",
        value_parser = parse_order_by,
        default_value = DEFAULT_ORDER_BY
    )]
    pub(crate) order_by: OrderBy,

    /// Directory the raw response is cached in
    #[arg(
        long,
        env = "QUAKE_DEST_DIR",
        value_hint = ValueHint::DirPath,
        default_value = "."
    )]
    pub(crate) dest_dir: PathBuf,

    /// File name of the cached response
    #[arg(long, env = "QUAKE_CACHE_FILE", default_value = DEFAULT_CACHE_FILE)]
    pub(crate) cache_file: String,

    /// Analyse the previously cached response instead of querying the service
    #[arg(long)]
    pub(crate) from_cache: bool,

    /// Print the report as JSON instead of text and charts
    #[arg(long)]
    pub(crate) json: bool,

    /// Also write the rendered charts into this directory
    #[arg(long, env = "QUAKE_CHARTS_DIR", value_hint = ValueHint::DirPath)]
    pub(crate) charts_dir: Option<PathBuf>,
}

pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{}' ({}); expected YYYY-MM-DD", s, e))
}

pub fn parse_order_by(s: &str) -> Result<OrderBy, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "time-asc" | "time_asc" | "oldest" => Ok(OrderBy::TimeAsc),
        "time" | "newest" => Ok(OrderBy::Time),
        "magnitude" | "mag" => Ok(OrderBy::Magnitude),
        "magnitude-asc" | "magnitude_asc" | "mag-asc" => Ok(OrderBy::MagnitudeAsc),
        other => Err(format!(
            "invalid QUAKE_ORDER_BY '{}'; expected one of: time, time-asc, magnitude, magnitude-asc",
            other
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_env::isolated_env;

    #[test]
    fn test_defaults() {
        let _env = isolated_env();
        let cli = Cli::try_parse_from(["quake-stats"]).unwrap();
        assert_eq!(cli.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cli.start_time, NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
        assert_eq!(cli.end_time, NaiveDate::from_ymd_opt(2018, 10, 11).unwrap());
        assert_eq!(cli.min_longitude, -9.756);
        assert_eq!(cli.order_by, OrderBy::TimeAsc);
        assert_eq!(cli.cache_file, "response.json");
        assert!(!cli.from_cache);
        assert!(cli.charts_dir.is_none());
    }

    #[test]
    fn test_negative_longitude_flag() {
        let _env = isolated_env();
        let cli = Cli::try_parse_from(["quake-stats", "--min-longitude", "-12.5", "--from-cache"])
            .unwrap();
        assert_eq!(cli.min_longitude, -12.5);
        assert!(cli.from_cache);
    }

    #[test]
    fn test_parse_order_by() {
        assert_eq!(parse_order_by("TIME-ASC").unwrap(), OrderBy::TimeAsc);
        assert_eq!(parse_order_by("mag").unwrap(), OrderBy::Magnitude);
        assert!(parse_order_by("random").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2018-10-11").is_ok());
        assert!(parse_date("11/10/2018").is_err());
    }

    #[test]
    fn test_defaults_ignore_stale_environment() {
        let _env = isolated_env();
        std::env::set_var("QUAKE_MIN_MAGNITUDE", "4.5");
        let cli = Cli::try_parse_from(["quake-stats"]).unwrap();
        assert_eq!(cli.min_magnitude, 4.5);
        drop(_env);

        let _env = isolated_env();
        let cli = Cli::try_parse_from(["quake-stats"]).unwrap();
        assert_eq!(cli.min_magnitude, DEFAULT_MIN_MAGNITUDE);
    }
}

mod analysis;
mod app;
mod args;
mod cache;
mod catalog;
mod chart;
mod config;
mod fetch;
mod model;
mod report;
pub mod utils;

pub use analysis::{magnitudes_per_year, mean_magnitude_per_year, quakes_per_year, year_of};
pub use app::Application;
pub use args::{parse_date, parse_order_by, Cli};
pub use cache::{CacheFile, DEFAULT_CACHE_FILE};
pub use chart::{frequency_chart, mean_magnitude_chart, BarChart, BarChartBuilder};
pub use config::{
    AppConfig, BoundingBox, DataSource, OrderBy, OutputConfig, QueryConfig, QueryConfigBuilder,
};
pub use fetch::{fetch_catalog, parse_catalog};
pub use model::{format_float, Location, Quake, QuakeCatalog};
pub use report::{QuakeReport, StrongestQuake, YearStats};

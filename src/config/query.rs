use anyhow::{ensure, Context, Result};
use chrono::NaiveDate;
use derive_builder::Builder;
use reqwest::Url;

/// Ordering of events in the response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderBy {
    /// Newest first.
    Time,
    /// Oldest first.
    #[default]
    TimeAsc,
    /// Largest first.
    Magnitude,
    MagnitudeAsc,
}

impl OrderBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderBy::Time => "time",
            OrderBy::TimeAsc => "time-asc",
            OrderBy::Magnitude => "magnitude",
            OrderBy::MagnitudeAsc => "magnitude-asc",
        }
    }
}

/// Rectangular query region in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl BoundingBox {
    pub fn new(
        min_latitude: f64,
        max_latitude: f64,
        min_longitude: f64,
        max_longitude: f64,
    ) -> Result<Self> {
        ensure!(
            (-90.0..=90.0).contains(&min_latitude) && (-90.0..=90.0).contains(&max_latitude),
            "latitudes must lie within [-90, 90], got {} and {}",
            min_latitude,
            max_latitude
        );
        ensure!(
            (-180.0..=180.0).contains(&min_longitude) && (-180.0..=180.0).contains(&max_longitude),
            "longitudes must lie within [-180, 180], got {} and {}",
            min_longitude,
            max_longitude
        );
        ensure!(
            min_latitude <= max_latitude,
            "min latitude {} exceeds max latitude {}",
            min_latitude,
            max_latitude
        );
        ensure!(
            min_longitude <= max_longitude,
            "min longitude {} exceeds max longitude {}",
            min_longitude,
            max_longitude
        );
        Ok(Self {
            min_latitude,
            max_latitude,
            min_longitude,
            max_longitude,
        })
    }
}

#[derive(Builder, Debug, Clone)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct QueryConfig {
    /// Base URL of the `query.geojson` endpoint
    #[builder(setter(into))]
    pub endpoint: String,
    pub start_time: NaiveDate,
    pub end_time: NaiveDate,
    pub bbox: BoundingBox,
    pub min_magnitude: f64,
    #[builder(default)]
    pub order_by: OrderBy,
}

impl QueryConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            if start > end {
                return Err(format!("start time {} is after end time {}", start, end));
            }
        }
        Ok(())
    }
}

impl QueryConfig {
    pub fn builder() -> QueryConfigBuilder {
        QueryConfigBuilder::default()
    }

    /// Full request URL. Parameter order follows the service documentation examples.
    pub fn to_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.endpoint)
            .with_context(|| format!("Invalid endpoint URL: {}", self.endpoint))?;

        url.query_pairs_mut()
            .append_pair("starttime", &self.start_time.format("%Y-%m-%d").to_string())
            .append_pair("maxlatitude", &self.bbox.max_latitude.to_string())
            .append_pair("minlatitude", &self.bbox.min_latitude.to_string())
            .append_pair("maxlongitude", &self.bbox.max_longitude.to_string())
            .append_pair("minlongitude", &self.bbox.min_longitude.to_string())
            .append_pair("minmagnitude", &self.min_magnitude.to_string())
            .append_pair("endtime", &self.end_time.format("%Y-%m-%d").to_string())
            .append_pair("orderby", self.order_by.as_str());

        Ok(url)
    }
}

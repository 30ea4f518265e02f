//! Typed view of the GeoJSON `FeatureCollection` returned by the FDSN event service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A parsed event document. Read-only once fetched.
#[derive(Debug, Clone, Deserialize)]
pub struct QuakeCatalog {
    pub(crate) metadata: Metadata,
    #[serde(default)]
    pub(crate) features: Vec<Quake>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Metadata {
    /// Total supplied by the service, not derived from `features`.
    pub(crate) count: u64,
    pub(crate) generated: Option<i64>,
    pub(crate) url: Option<String>,
    pub(crate) title: Option<String>,
}

/// One earthquake event.
#[derive(Debug, Clone, Deserialize)]
pub struct Quake {
    pub(crate) id: String,
    pub(crate) properties: Properties,
    pub(crate) geometry: Geometry,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Properties {
    pub(crate) mag: f64,
    /// Milliseconds since the Unix epoch.
    pub(crate) time: i64,
    pub(crate) place: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Geometry {
    /// `[longitude, latitude, depth]`
    pub(crate) coordinates: Vec<f64>,
}

/// Longitude/latitude pair; depth is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    pub longitude: f64,
    pub latitude: f64,
}

/// Shortest round-trip form, keeping `.0` on whole values (`4.0`, not `4`).
pub fn format_float(value: f64) -> String {
    format!("{:?}", value)
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {})",
            format_float(self.longitude),
            format_float(self.latitude)
        )
    }
}

impl Quake {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn magnitude(&self) -> f64 {
        self.properties.mag
    }

    pub fn time_ms(&self) -> i64 {
        self.properties.time
    }

    pub fn place(&self) -> Option<&str> {
        self.properties.place.as_deref()
    }

    /// Returns `None` when the geometry carries fewer than two coordinates.
    pub fn location(&self) -> Option<Location> {
        match self.geometry.coordinates.as_slice() {
            [longitude, latitude, ..] => Some(Location {
                longitude: *longitude,
                latitude: *latitude,
            }),
            _ => None,
        }
    }
}

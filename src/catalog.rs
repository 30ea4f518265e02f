//! Lookups over a fetched catalog. Every lookup re-scans the record list.

use crate::model::{Location, Quake, QuakeCatalog};
use anyhow::{Context, Result};

impl QuakeCatalog {
    /// Total number of earthquakes as reported by the service.
    pub fn count_earthquakes(&self) -> u64 {
        self.metadata.count
    }

    pub fn quakes(&self) -> &[Quake] {
        &self.features
    }

    pub fn title(&self) -> Option<&str> {
        self.metadata.title.as_deref()
    }

    pub fn source_url(&self) -> Option<&str> {
        self.metadata.url.as_deref()
    }

    pub fn generated_ms(&self) -> Option<i64> {
        self.metadata.generated
    }

    fn index_of(&self, id: &str) -> Result<usize> {
        self.features
            .iter()
            .position(|q| q.id == id)
            .with_context(|| format!("Earthquake '{}' not found in catalog", id))
    }

    pub fn quake_at(&self, index: usize) -> Result<&Quake> {
        self.features.get(index).with_context(|| {
            format!(
                "Index {} out of range for catalog of {} earthquakes",
                index,
                self.features.len()
            )
        })
    }

    pub fn id_at(&self, index: usize) -> Result<&str> {
        self.quake_at(index).map(Quake::id)
    }

    /// Magnitude of the earthquake with the given id.
    pub fn magnitude_by_id(&self, id: &str) -> Result<f64> {
        let index = self.index_of(id)?;
        Ok(self.quake_at(index)?.magnitude())
    }

    /// `(longitude, latitude)` of the earthquake with the given id.
    pub fn location_by_id(&self, id: &str) -> Result<Location> {
        let index = self.index_of(id)?;
        self.quake_at(index)?
            .location()
            .with_context(|| format!("Earthquake '{}' has no coordinates", id))
    }

    /// The earthquake with the largest magnitude. Ties go to the earliest record.
    pub fn strongest_quake(&self) -> Option<&Quake> {
        let mut best: Option<&Quake> = None;
        for quake in &self.features {
            match best {
                Some(b) if quake.magnitude() <= b.magnitude() => {}
                _ => best = Some(quake),
            }
        }
        best
    }

    /// Magnitude and location of the strongest earthquake.
    pub fn strongest(&self) -> Result<(f64, Location)> {
        let quake = self
            .strongest_quake()
            .context("Catalog contains no earthquakes")?;
        let location = quake
            .location()
            .with_context(|| format!("Earthquake '{}' has no coordinates", quake.id()))?;
        Ok((quake.magnitude(), location))
    }
}

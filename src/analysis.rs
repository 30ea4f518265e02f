//! Per-year aggregation of earthquake magnitudes.

use crate::model::Quake;
use anyhow::{Context, Result};
use chrono::{DateTime, Datelike};
use std::collections::BTreeMap;

/// Calendar year (UTC) in which the earthquake happened.
pub fn year_of(quake: &Quake) -> Result<i32> {
    let secs = quake.time_ms().div_euclid(1000);
    let datetime = DateTime::from_timestamp(secs, 0).with_context(|| {
        format!(
            "Timestamp {} of earthquake '{}' is out of range",
            quake.time_ms(),
            quake.id()
        )
    })?;
    Ok(datetime.year())
}

/// Magnitudes grouped by year.
pub fn magnitudes_per_year(quakes: &[Quake]) -> Result<BTreeMap<i32, Vec<f64>>> {
    let mut per_year: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    for quake in quakes {
        per_year
            .entry(year_of(quake)?)
            .or_default()
            .push(quake.magnitude());
    }
    Ok(per_year)
}

pub fn mean_magnitude_per_year(quakes: &[Quake]) -> Result<BTreeMap<i32, f64>> {
    let means = magnitudes_per_year(quakes)?
        .into_iter()
        .map(|(year, mags)| {
            let mean = mags.iter().sum::<f64>() / mags.len() as f64;
            (year, mean)
        })
        .collect();
    Ok(means)
}

/// Number of earthquakes per year.
pub fn quakes_per_year(quakes: &[Quake]) -> Result<BTreeMap<i32, usize>> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for quake in quakes {
        *counts.entry(year_of(quake)?).or_insert(0) += 1;
    }
    Ok(counts)
}

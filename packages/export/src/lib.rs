#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Renderings of scored zones for downstream consumers.
//!
//! - [`write_csv`]: one flat row per zone, for spreadsheets.
//! - [`to_feature_collection`]: `GeoJSON` points for map layers.
//! - [`render_zone_sheet`]: a plain-text summary of a single zone.

pub mod map;
pub mod sheet;

use std::io::Write;

use serde::Serialize;
use zone_priority_zone_models::ScoredZone;

pub use map::to_feature_collection;
pub use sheet::render_zone_sheet;

/// Errors that can occur while exporting.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// I/O error (file write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Flat CSV row. Nested structs cannot be written by `csv`.
#[derive(Debug, Serialize)]
struct ZoneRow<'a> {
    rank: u32,
    name: &'a str,
    #[serde(rename = "type")]
    zone_type: &'a str,
    population: u64,
    has_education_site: bool,
    education_site_connected: bool,
    average_speed_mbps: f64,
    internet_penetration: f64,
    population_density: f64,
    latitude: f64,
    longitude: f64,
    education_bonus: f64,
    normalized_population: f64,
    normalized_inverse_connectivity: f64,
    education_component: f64,
    population_component: f64,
    connectivity_component: f64,
    priority_score: f64,
    priority_tier: &'a str,
}

impl<'a> From<&'a ScoredZone> for ZoneRow<'a> {
    fn from(scored: &'a ScoredZone) -> Self {
        let zone = &scored.zone;
        Self {
            rank: scored.rank,
            name: &zone.name,
            zone_type: zone.zone_type.as_ref(),
            population: zone.population,
            has_education_site: zone.has_education_site,
            education_site_connected: zone.education_site_connected,
            average_speed_mbps: zone.average_speed_mbps,
            internet_penetration: zone.internet_penetration,
            population_density: zone.population_density,
            latitude: zone.location.latitude,
            longitude: zone.location.longitude,
            education_bonus: scored.education_bonus,
            normalized_population: scored.normalized_population,
            normalized_inverse_connectivity: scored.normalized_inverse_connectivity,
            education_component: scored.components.education,
            population_component: scored.components.population,
            connectivity_component: scored.components.connectivity,
            priority_score: scored.priority_score,
            priority_tier: scored.priority_tier.as_ref(),
        }
    }
}

/// Writes one CSV row per zone, in the order given, with a header row.
///
/// # Errors
///
/// Returns [`ExportError`] if writing to `writer` fails.
pub fn write_csv<'a, W, I>(writer: W, zones: I) -> Result<(), ExportError>
where
    W: Write,
    I: IntoIterator<Item = &'a ScoredZone>,
{
    let mut wtr = csv::Writer::from_writer(writer);
    let mut count = 0_usize;

    for scored in zones {
        wtr.serialize(ZoneRow::from(scored))?;
        count += 1;
    }

    wtr.flush()?;
    log::debug!("Wrote {count} CSV rows");

    Ok(())
}

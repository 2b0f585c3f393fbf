#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Set-relative priority scoring of zones.
//!
//! [`score`] turns a complete zone set into [`ScoredZone`]s:
//!
//! ```text
//! score = 0.5 * education_bonus
//!       + 0.2 * normalized_population
//!       + 0.3 * normalized_inverse_connectivity
//! ```
//!
//! Both normalizations are min-max over the set that was passed in, so a
//! zone's score only has meaning next to the zones it was scored with.
//! Narrowing the visible zones is done afterwards with [`filter::ZoneFilter`],
//! which borrows scored zones and never re-scores them.

pub mod filter;
pub mod normalize;
pub mod rank;
pub mod report;

use std::collections::BTreeSet;

use thiserror::Error;
use zone_priority_zone_models::{PriorityTier, ScoreComponents, ScoredZone, Zone};

use crate::normalize::Extent;
use crate::rank::competition_ranks;

/// Weight of the education bonus.
pub const EDUCATION_WEIGHT: f64 = 0.5;
/// Weight of the normalized population.
pub const POPULATION_WEIGHT: f64 = 0.2;
/// Weight of the normalized inverse connectivity.
pub const CONNECTIVITY_WEIGHT: f64 = 0.3;

/// Errors raised when a zone set cannot be scored.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// No zones were supplied, so there is nothing to normalize against.
    #[error("Cannot score an empty zone set")]
    EmptyZoneSet,

    /// A numeric attribute is non-finite or out of range.
    #[error("Zone '{zone}' has invalid {field}: {value}")]
    InvalidField {
        /// Name of the offending zone.
        zone: String,
        /// Attribute that failed validation.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Two zones share a name.
    #[error("Duplicate zone name: {name}")]
    DuplicateZone {
        /// The repeated name.
        name: String,
    },
}

/// Returns the education bonus for a zone: `1.0` when it has an education
/// site without connectivity, `0.0` otherwise.
#[must_use]
pub const fn education_bonus(zone: &Zone) -> f64 {
    if zone.has_unconnected_education_site() {
        1.0
    } else {
        0.0
    }
}

/// Scores, ranks and tiers every zone in `zones`.
///
/// The output is in input order; the ranking lives in
/// [`ScoredZone::rank`].
///
/// # Errors
///
/// * [`ScoringError::EmptyZoneSet`] if `zones` is empty
/// * [`ScoringError::InvalidField`] if any numeric attribute is non-finite,
///   negative, or (for penetration) outside `[0, 1]`
/// * [`ScoringError::DuplicateZone`] if two zones share a name
#[allow(clippy::cast_precision_loss)]
pub fn score(zones: &[Zone]) -> Result<Vec<ScoredZone>, ScoringError> {
    validate(zones)?;

    // Reduce: global ranges over the whole set.
    let populations: Vec<f64> = zones.iter().map(|z| z.population as f64).collect();
    let max_speed = zones
        .iter()
        .map(|z| z.average_speed_mbps)
        .fold(f64::NEG_INFINITY, f64::max);
    let speed_deficits: Vec<f64> = zones
        .iter()
        .map(|z| max_speed - z.average_speed_mbps)
        .collect();

    let population_extent = Extent::of(&populations).ok_or(ScoringError::EmptyZoneSet)?;
    let deficit_extent = Extent::of(&speed_deficits).ok_or(ScoringError::EmptyZoneSet)?;

    // Map: per-zone components.
    let derived: Vec<Derived> = zones
        .iter()
        .zip(populations.iter().zip(&speed_deficits))
        .map(|(zone, (&population, &deficit))| {
            let bonus = education_bonus(zone);
            let normalized_population = population_extent.normalize(population);
            let normalized_inverse_connectivity = deficit_extent.normalize(deficit);
            Derived {
                bonus,
                normalized_population,
                normalized_inverse_connectivity,
                components: ScoreComponents {
                    education: EDUCATION_WEIGHT * bonus,
                    population: POPULATION_WEIGHT * normalized_population,
                    connectivity: CONNECTIVITY_WEIGHT * normalized_inverse_connectivity,
                },
            }
        })
        .collect();

    let scores: Vec<f64> = derived.iter().map(|d| d.components.total()).collect();
    let ranks = competition_ranks(&scores);

    let scored: Vec<ScoredZone> = zones
        .iter()
        .zip(derived)
        .zip(scores.iter().zip(ranks))
        .map(|((zone, d), (&priority_score, rank))| ScoredZone {
            zone: zone.clone(),
            education_bonus: d.bonus,
            normalized_population: d.normalized_population,
            normalized_inverse_connectivity: d.normalized_inverse_connectivity,
            components: d.components,
            priority_score,
            rank,
            priority_tier: PriorityTier::from_score(priority_score),
        })
        .collect();

    log::debug!(
        "Scored {} zones (population range {}..{}, max speed {max_speed} Mbps)",
        scored.len(),
        population_extent.min,
        population_extent.max,
    );

    Ok(scored)
}

/// Per-zone values computed in the map pass, before ranking.
struct Derived {
    bonus: f64,
    normalized_population: f64,
    normalized_inverse_connectivity: f64,
    components: ScoreComponents,
}

/// Checks that the zone set can be scored.
fn validate(zones: &[Zone]) -> Result<(), ScoringError> {
    if zones.is_empty() {
        return Err(ScoringError::EmptyZoneSet);
    }

    let mut seen = BTreeSet::new();

    for zone in zones {
        if !seen.insert(zone.name.as_str()) {
            return Err(ScoringError::DuplicateZone {
                name: zone.name.clone(),
            });
        }

        let checks: [(&'static str, f64, bool); 5] = [
            (
                "average_speed_mbps",
                zone.average_speed_mbps,
                zone.average_speed_mbps >= 0.0,
            ),
            (
                "internet_penetration",
                zone.internet_penetration,
                (0.0..=1.0).contains(&zone.internet_penetration),
            ),
            (
                "population_density",
                zone.population_density,
                zone.population_density >= 0.0,
            ),
            ("latitude", zone.location.latitude, true),
            ("longitude", zone.location.longitude, true),
        ];

        for (field, value, in_range) in checks {
            if !value.is_finite() || !in_range {
                return Err(ScoringError::InvalidField {
                    zone: zone.name.clone(),
                    field,
                    value,
                });
            }
        }
    }

    Ok(())
}

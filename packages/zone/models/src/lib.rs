#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Zone attribute, score and priority tier types.
//!
//! A [`Zone`] is the raw record for one geographic unit (a corregimiento)
//! as supplied by a data source. A [`ScoredZone`] is the same record after
//! the scoring engine has attached its set-relative normalizations, the
//! weighted score components, the rank and the [`PriorityTier`].

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Urban/rural classification of a zone.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum ZoneType {
    /// Municipal seat or other urban area
    #[serde(alias = "urbana", alias = "Urban", alias = "Urbana")]
    #[strum(to_string = "urban", serialize = "urbana")]
    Urban,
    /// Rural corregimiento
    #[serde(alias = "Rural")]
    #[strum(to_string = "rural")]
    Rural,
}

impl ZoneType {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Urban, Self::Rural]
    }
}

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

/// One geographic unit under evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Zone name. Unique within a dataset.
    pub name: String,
    /// Urban/rural classification.
    pub zone_type: ZoneType,
    /// Resident population.
    pub population: u64,
    /// Whether the zone hosts at least one education site.
    pub has_education_site: bool,
    /// Whether that education site has internet connectivity. Only
    /// meaningful when `has_education_site` is set.
    pub education_site_connected: bool,
    /// Average measured download speed in Mbps.
    pub average_speed_mbps: f64,
    /// Share of households with internet access, in `[0, 1]`.
    pub internet_penetration: f64,
    /// Residents per square kilometre.
    pub population_density: f64,
    /// Representative point of the zone.
    pub location: Location,
}

impl Zone {
    /// Whether the zone has an education site that lacks connectivity.
    #[must_use]
    pub const fn has_unconnected_education_site(&self) -> bool {
        self.has_education_site && !self.education_site_connected
    }
}

/// Coarse priority bucket derived from a priority score.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PriorityTier {
    /// Score in `[0, 0.3)`
    Low,
    /// Score in `[0.3, 0.6)`
    Medium,
    /// Score in `[0.6, 1.0]`
    High,
}

impl PriorityTier {
    /// Lowest score classified as [`PriorityTier::Medium`].
    pub const MEDIUM_MIN_SCORE: f64 = 0.3;

    /// Lowest score classified as [`PriorityTier::High`].
    pub const HIGH_MIN_SCORE: f64 = 0.6;

    /// Classifies a priority score.
    ///
    /// Each bin includes its lower bound, so `0.3` is Medium and `0.6` is
    /// High.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= Self::HIGH_MIN_SCORE {
            Self::High
        } else if score >= Self::MEDIUM_MIN_SCORE {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Hex colour used by map and chart collaborators for this tier.
    #[must_use]
    pub const fn color_hex(self) -> &'static str {
        match self {
            Self::High => "#d62728",
            Self::Medium => "#ff7f0e",
            Self::Low => "#2ca02c",
        }
    }

    /// Returns all variants, most urgent first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::High, Self::Medium, Self::Low]
    }
}

/// The three weighted terms whose sum is the priority score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreComponents {
    /// Education weight times the education bonus.
    pub education: f64,
    /// Population weight times the normalized population.
    pub population: f64,
    /// Connectivity weight times the normalized inverse connectivity.
    pub connectivity: f64,
}

impl ScoreComponents {
    /// Sum of the three components.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.education + self.population + self.connectivity
    }
}

/// A zone together with everything the scoring engine derived for it.
///
/// Every derived value is relative to the set the zone was scored with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredZone {
    /// The raw zone record.
    #[serde(flatten)]
    pub zone: Zone,
    /// `1.0` when the zone has an unconnected education site, else `0.0`.
    pub education_bonus: f64,
    /// Min-max normalized population.
    pub normalized_population: f64,
    /// Min-max normalized speed deficit (slower zones score higher).
    pub normalized_inverse_connectivity: f64,
    /// Weighted components of the score.
    pub components: ScoreComponents,
    /// Sum of the weighted components.
    pub priority_score: f64,
    /// Competition rank by descending score, starting at 1.
    pub rank: u32,
    /// Tier derived from `priority_score`.
    pub priority_tier: PriorityTier,
}

impl ScoredZone {
    /// Zone name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.zone.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries_include_lower_bound() {
        assert_eq!(PriorityTier::from_score(0.0), PriorityTier::Low);
        assert_eq!(PriorityTier::from_score(0.299_999), PriorityTier::Low);
        assert_eq!(PriorityTier::from_score(0.3), PriorityTier::Medium);
        assert_eq!(PriorityTier::from_score(0.599_999), PriorityTier::Medium);
        assert_eq!(PriorityTier::from_score(0.6), PriorityTier::High);
        assert_eq!(PriorityTier::from_score(1.0), PriorityTier::High);
    }

    #[test]
    fn tier_ordering_follows_urgency() {
        assert!(PriorityTier::High > PriorityTier::Medium);
        assert!(PriorityTier::Medium > PriorityTier::Low);
    }

    #[test]
    fn zone_type_parses_aliases() {
        assert_eq!("urban".parse::<ZoneType>().unwrap(), ZoneType::Urban);
        assert_eq!("Urbana".parse::<ZoneType>().unwrap(), ZoneType::Urban);
        assert_eq!("RURAL".parse::<ZoneType>().unwrap(), ZoneType::Rural);
        assert!("suburban".parse::<ZoneType>().is_err());
        assert_eq!(ZoneType::Urban.to_string(), "urban");
    }

    #[test]
    fn tier_parses_from_label() {
        assert_eq!("high".parse::<PriorityTier>().unwrap(), PriorityTier::High);
        assert_eq!(
            "Medium".parse::<PriorityTier>().unwrap(),
            PriorityTier::Medium
        );
        assert_eq!(PriorityTier::Low.to_string(), "low");
    }

    #[test]
    fn parse_errors_are_thread_safe_std_errors() {
        fn assert_std_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}

        assert_std_error(&"lowest".parse::<PriorityTier>().unwrap_err());
        assert_std_error(&"suburban".parse::<ZoneType>().unwrap_err());
    }

    #[test]
    fn unconnected_education_site_requires_a_site() {
        let mut zone = Zone {
            name: "Timba".to_string(),
            zone_type: ZoneType::Rural,
            population: 2900,
            has_education_site: false,
            education_site_connected: false,
            average_speed_mbps: 12.5,
            internet_penetration: 0.32,
            population_density: 110.0,
            location: Location {
                latitude: 3.1266,
                longitude: -76.6352,
            },
        };
        assert!(!zone.has_unconnected_education_site());

        zone.has_education_site = true;
        assert!(zone.has_unconnected_education_site());

        zone.education_site_connected = true;
        assert!(!zone.has_unconnected_education_site());
    }
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Alert kinds, thresholds and summary types.
//!
//! Alerts flag zones that cross a fixed threshold regardless of where they
//! land in the priority ranking. Each [`AlertKind`] carries its own
//! severity rank, which is the only thing alert ordering looks at.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Category of a threshold-triggered alert.
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
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum AlertKind {
    /// High-priority zone whose education site has no connectivity
    Critical,
    /// Average speed below the critical floor
    Urgent,
    /// Internet penetration below the minimum share
    Warning,
    /// Dense zone with slow connectivity
    Attention,
}

impl AlertKind {
    /// Sort key for alert ordering. Lower is more severe.
    #[must_use]
    pub const fn severity_rank(self) -> u8 {
        match self {
            Self::Critical => 1,
            Self::Urgent | Self::Attention => 2,
            Self::Warning => 3,
        }
    }

    /// Hex colour used by alert panels.
    #[must_use]
    pub const fn color_hex(self) -> &'static str {
        match self {
            Self::Critical => "#d62728",
            Self::Urgent | Self::Attention => "#ff7f0e",
            Self::Warning => "#1f77b4",
        }
    }

    /// Returns all variants in evaluation order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Critical, Self::Urgent, Self::Warning, Self::Attention]
    }
}

/// A single alert raised for one zone.
///
/// Borrows the zone name from the scored zone it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert<'a> {
    /// What triggered the alert.
    pub kind: AlertKind,
    /// Name of the zone the alert refers to.
    pub zone_name: &'a str,
    /// Human-readable description including the triggering value.
    pub message: String,
    /// Copied from [`AlertKind::severity_rank`].
    pub severity_rank: u8,
}

impl<'a> Alert<'a> {
    /// Creates an alert, taking the severity rank from `kind`.
    #[must_use]
    pub const fn new(kind: AlertKind, zone_name: &'a str, message: String) -> Self {
        Self {
            kind,
            zone_name,
            message,
            severity_rank: kind.severity_rank(),
        }
    }
}

/// Per-kind alert counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertStats {
    /// Total number of alerts.
    pub total: u64,
    /// Number of [`AlertKind::Critical`] alerts.
    pub critical: u64,
    /// Number of [`AlertKind::Urgent`] alerts.
    pub urgent: u64,
    /// Number of [`AlertKind::Warning`] alerts.
    pub warning: u64,
    /// Number of [`AlertKind::Attention`] alerts.
    pub attention: u64,
}

impl AlertStats {
    /// Count for a single kind.
    #[must_use]
    pub const fn count(&self, kind: AlertKind) -> u64 {
        match kind {
            AlertKind::Critical => self.critical,
            AlertKind::Urgent => self.urgent,
            AlertKind::Warning => self.warning,
            AlertKind::Attention => self.attention,
        }
    }
}

/// Threshold values used when deriving alerts.
///
/// The default matches the built-in rules; a TOML file with any subset of
/// these keys overrides only the keys it names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct AlertThresholds {
    /// Speeds strictly below this raise [`AlertKind::Urgent`].
    pub critical_speed_mbps: f64,
    /// Penetration strictly below this raises [`AlertKind::Warning`].
    pub min_penetration: f64,
    /// Density strictly above this is considered dense.
    pub high_density: f64,
    /// Dense zones with speed strictly below this raise
    /// [`AlertKind::Attention`].
    pub dense_zone_speed_mbps: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            critical_speed_mbps: 3.0,
            min_penetration: 0.20,
            high_density: 1000.0,
            dense_zone_speed_mbps: 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ranks_match_kinds() {
        assert_eq!(AlertKind::Critical.severity_rank(), 1);
        assert_eq!(AlertKind::Urgent.severity_rank(), 2);
        assert_eq!(AlertKind::Attention.severity_rank(), 2);
        assert_eq!(AlertKind::Warning.severity_rank(), 3);
    }

    #[test]
    fn alert_takes_rank_from_kind() {
        let alert = Alert::new(AlertKind::Warning, "Potrerito", "low".to_string());
        assert_eq!(alert.severity_rank, 3);
        assert_eq!(alert.zone_name, "Potrerito");
    }

    #[test]
    fn kind_labels_are_screaming_snake_case() {
        assert_eq!(AlertKind::Attention.to_string(), "ATTENTION");
        assert_eq!("critical".parse::<AlertKind>().unwrap(), AlertKind::Critical);
    }

    #[test]
    fn partial_threshold_file_keeps_defaults() {
        let thresholds: AlertThresholds = toml::from_str("critical_speed_mbps = 5.0").unwrap();
        assert!((thresholds.critical_speed_mbps - 5.0).abs() < f64::EPSILON);
        assert!((thresholds.min_penetration - 0.20).abs() < f64::EPSILON);
        assert!((thresholds.high_density - 1000.0).abs() < f64::EPSILON);
        assert!((thresholds.dense_zone_speed_mbps - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn stats_count_by_kind() {
        let stats = AlertStats {
            total: 6,
            critical: 1,
            urgent: 2,
            warning: 3,
            attention: 0,
        };
        let sum: u64 = AlertKind::all().iter().map(|k| stats.count(*k)).sum();
        assert_eq!(sum, stats.total);
    }
}

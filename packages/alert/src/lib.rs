#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Threshold-triggered alerts for scored zones.
//!
//! Alerts are independent of the ranking: every zone is checked against
//! every rule and may raise any number of alerts. The result is ordered by
//! [`AlertKind::severity_rank`], keeping input order among equals.

use zone_priority_alert_models::{Alert, AlertKind, AlertStats, AlertThresholds};
use zone_priority_zone_models::{PriorityTier, ScoredZone};

/// Derives alerts using the built-in thresholds.
///
/// Accepts a full scored slice or any borrowed selection of it.
#[must_use]
pub fn derive_alerts<'a, I>(zones: I) -> Vec<Alert<'a>>
where
    I: IntoIterator<Item = &'a ScoredZone>,
{
    derive_alerts_with(zones, &AlertThresholds::default())
}

/// Derives alerts using caller-supplied thresholds.
#[must_use]
pub fn derive_alerts_with<'a, I>(zones: I, thresholds: &AlertThresholds) -> Vec<Alert<'a>>
where
    I: IntoIterator<Item = &'a ScoredZone>,
{
    let mut alerts: Vec<Alert<'a>> = zones
        .into_iter()
        .flat_map(|zone| zone_alerts(zone, thresholds))
        .collect();

    // Stable, so equal severities keep zone and rule order.
    alerts.sort_by_key(|a| a.severity_rank);

    log::debug!("Derived {} alerts", alerts.len());

    alerts
}

/// Evaluates every rule for one zone, in [`AlertKind::all`] order.
fn zone_alerts<'a>(scored: &'a ScoredZone, thresholds: &AlertThresholds) -> Vec<Alert<'a>> {
    let zone = &scored.zone;
    let name = zone.name.as_str();
    let mut alerts = Vec::new();

    if scored.priority_tier == PriorityTier::High && zone.has_unconnected_education_site() {
        alerts.push(Alert::new(
            AlertKind::Critical,
            name,
            "Unconnected education site in a high-priority zone".to_string(),
        ));
    }

    if zone.average_speed_mbps < thresholds.critical_speed_mbps {
        alerts.push(Alert::new(
            AlertKind::Urgent,
            name,
            format!(
                "Critical speed: {:.1} Mbps (< {} Mbps)",
                zone.average_speed_mbps, thresholds.critical_speed_mbps
            ),
        ));
    }

    if zone.internet_penetration < thresholds.min_penetration {
        alerts.push(Alert::new(
            AlertKind::Warning,
            name,
            format!(
                "Very low internet penetration: {:.1}%",
                zone.internet_penetration * 100.0
            ),
        ));
    }

    if zone.population_density > thresholds.high_density
        && zone.average_speed_mbps < thresholds.dense_zone_speed_mbps
    {
        alerts.push(Alert::new(
            AlertKind::Attention,
            name,
            format!(
                "High density ({:.0} people/km²) with low speed ({:.1} Mbps)",
                zone.population_density, zone.average_speed_mbps
            ),
        ));
    }

    alerts
}

/// Counts alerts per kind.
#[must_use]
pub fn summarize(alerts: &[Alert<'_>]) -> AlertStats {
    alerts
        .iter()
        .fold(AlertStats::default(), |mut stats, alert| {
            stats.total += 1;
            match alert.kind {
                AlertKind::Critical => stats.critical += 1,
                AlertKind::Urgent => stats.urgent += 1,
                AlertKind::Warning => stats.warning += 1,
                AlertKind::Attention => stats.attention += 1,
            }
            stats
        })
}

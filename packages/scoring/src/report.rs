//! Summaries of a scored zone set: top-N, ranking report and KPIs.

use serde::{Deserialize, Serialize};
use zone_priority_zone_models::{PriorityTier, ScoredZone};

use crate::ScoringError;

/// Aggregate view of one scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingReport {
    /// Number of zones scored.
    pub total_zones: usize,
    /// Zones in [`PriorityTier::High`].
    pub high_priority_zones: usize,
    /// Zones in [`PriorityTier::Medium`].
    pub medium_priority_zones: usize,
    /// Zones in [`PriorityTier::Low`].
    pub low_priority_zones: usize,
    /// Zones whose education bonus is set.
    pub unconnected_education_sites: usize,
    /// Mean priority score.
    pub mean_score: f64,
    /// Highest priority score.
    pub max_score: f64,
    /// Lowest priority score.
    pub min_score: f64,
    /// Name of the highest-scoring zone (first in input order on ties).
    pub top_zone: String,
}

/// Headline indicators for the zones currently in view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneKpis {
    /// Sum of zone populations.
    pub total_population: u64,
    /// Number of zones.
    pub zone_count: usize,
    /// Zones in [`PriorityTier::High`].
    pub high_priority_zones: usize,
    /// Zones with an education site lacking connectivity.
    pub unconnected_education_sites: usize,
    /// Mean of zone average speeds.
    pub mean_speed_mbps: f64,
    /// Mean internet penetration.
    pub mean_penetration: f64,
}

/// The `n` highest-priority zones, ordered by rank.
///
/// Accepts a full scored slice or a filtered selection of it. Zones sharing
/// a rank keep their input order.
#[must_use]
pub fn top_zones<'a, I>(zones: I, n: usize) -> Vec<&'a ScoredZone>
where
    I: IntoIterator<Item = &'a ScoredZone>,
{
    let mut by_rank: Vec<&ScoredZone> = zones.into_iter().collect();
    by_rank.sort_by_key(|z| z.rank);
    by_rank.truncate(n);
    by_rank
}

/// Builds a [`RankingReport`] for a scored set.
///
/// # Errors
///
/// Returns [`ScoringError::EmptyZoneSet`] if `scored` is empty.
#[allow(clippy::cast_precision_loss)]
pub fn ranking_report(scored: &[ScoredZone]) -> Result<RankingReport, ScoringError> {
    let Some(first) = scored.first() else {
        return Err(ScoringError::EmptyZoneSet);
    };

    let count_tier = |tier: PriorityTier| {
        scored
            .iter()
            .filter(|z| z.priority_tier == tier)
            .count()
    };

    let mut top = first;
    let mut min_score = first.priority_score;
    let mut sum = 0.0;

    for zone in scored {
        if zone.priority_score > top.priority_score {
            top = zone;
        }
        min_score = min_score.min(zone.priority_score);
        sum += zone.priority_score;
    }

    Ok(RankingReport {
        total_zones: scored.len(),
        high_priority_zones: count_tier(PriorityTier::High),
        medium_priority_zones: count_tier(PriorityTier::Medium),
        low_priority_zones: count_tier(PriorityTier::Low),
        unconnected_education_sites: scored
            .iter()
            .filter(|z| z.education_bonus > 0.0)
            .count(),
        mean_score: sum / scored.len() as f64,
        max_score: top.priority_score,
        min_score,
        top_zone: top.name().to_string(),
    })
}

/// Computes [`ZoneKpis`] over any selection of scored zones.
///
/// An empty selection yields all-zero indicators.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn zone_kpis<'a, I>(zones: I) -> ZoneKpis
where
    I: IntoIterator<Item = &'a ScoredZone>,
{
    let mut kpis = ZoneKpis::default();
    let mut speed_sum = 0.0;
    let mut penetration_sum = 0.0;

    for scored in zones {
        kpis.zone_count += 1;
        kpis.total_population = kpis.total_population.saturating_add(scored.zone.population);
        if scored.priority_tier == PriorityTier::High {
            kpis.high_priority_zones += 1;
        }
        if scored.zone.has_unconnected_education_site() {
            kpis.unconnected_education_sites += 1;
        }
        speed_sum += scored.zone.average_speed_mbps;
        penetration_sum += scored.zone.internet_penetration;
    }

    if kpis.zone_count > 0 {
        kpis.mean_speed_mbps = speed_sum / kpis.zone_count as f64;
        kpis.mean_penetration = penetration_sum / kpis.zone_count as f64;
    }

    kpis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::ZoneFilter;
    use crate::score;
    use crate::test_zones::{with_education, zone};

    const TOLERANCE: f64 = 1e-9;

    fn scored() -> Vec<ScoredZone> {
        score(&[
            zone("Connected Town", 9000, 40.0),
            with_education(zone("Potrerito", 4800, 1.5), false),
            with_education(zone("Robles", 3200, 15.2), true),
            with_education(zone("Ampudia", 2700, 3.5), false),
        ])
        .unwrap()
    }

    #[test]
    fn top_zones_orders_by_rank() {
        let scored = scored();
        let top: Vec<&str> = top_zones(&scored, 2)
            .into_iter()
            .map(ScoredZone::name)
            .collect();
        assert_eq!(top, vec!["Potrerito", "Ampudia"]);
    }

    #[test]
    fn top_zones_with_large_n_returns_all() {
        let scored = scored();
        assert_eq!(top_zones(&scored, 50).len(), scored.len());
    }

    #[test]
    fn top_zones_over_filtered_selection_keeps_global_rank() {
        let scored = scored();
        let visible = ZoneFilter::new()
            .with_names(["Robles", "Connected Town"])
            .apply(&scored);
        let top = top_zones(visible, 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].name(), "Robles");
        assert!(top[0].rank > 1);
    }

    #[test]
    fn report_counts_tiers_and_sites() {
        let scored = scored();
        let report = ranking_report(&scored).unwrap();

        assert_eq!(report.total_zones, 4);
        assert_eq!(
            report.high_priority_zones + report.medium_priority_zones + report.low_priority_zones,
            4
        );
        assert_eq!(report.unconnected_education_sites, 2);
        assert_eq!(report.top_zone, "Potrerito");
        assert!(report.min_score <= report.mean_score);
        assert!(report.mean_score <= report.max_score);

        let max = scored
            .iter()
            .map(|z| z.priority_score)
            .fold(f64::NEG_INFINITY, f64::max);
        assert!((report.max_score - max).abs() < TOLERANCE);
    }

    #[test]
    fn report_on_tie_names_first_zone() {
        let scored = score(&[zone("First", 100, 2.0), zone("Second", 100, 2.0)]).unwrap();
        let report = ranking_report(&scored).unwrap();
        assert_eq!(report.top_zone, "First");
    }

    #[test]
    fn report_rejects_empty_set() {
        assert!(matches!(
            ranking_report(&[]),
            Err(ScoringError::EmptyZoneSet)
        ));
    }

    #[test]
    fn kpis_over_full_set() {
        let scored = scored();
        let kpis = zone_kpis(&scored);

        assert_eq!(kpis.zone_count, 4);
        assert_eq!(kpis.total_population, 9000 + 4800 + 3200 + 2700);
        assert_eq!(kpis.unconnected_education_sites, 2);
        assert!((kpis.mean_speed_mbps - (40.0 + 1.5 + 15.2 + 3.5) / 4.0).abs() < TOLERANCE);
        assert!((kpis.mean_penetration - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn kpis_over_filtered_selection() {
        let scored = scored();
        let visible = ZoneFilter::new().with_names(["Robles"]).apply(&scored);
        let kpis = zone_kpis(visible);

        assert_eq!(kpis.zone_count, 1);
        assert_eq!(kpis.total_population, 3200);
        assert_eq!(kpis.unconnected_education_sites, 0);
    }

    #[test]
    fn kpis_population_saturates() {
        let huge = score(&[zone("Huge", u64::MAX, 1.0), zone("Big", u64::MAX - 1, 2.0)]).unwrap();
        assert_eq!(zone_kpis(&huge).total_population, u64::MAX);
    }

    #[test]
    fn kpis_over_nothing_are_zero() {
        assert_eq!(zone_kpis(&[]), ZoneKpis::default());
    }
}

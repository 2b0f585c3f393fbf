//! Fixed-width text tables for terminal output.

use zone_priority_alert_models::{Alert, AlertStats};
use zone_priority_scoring::report::{RankingReport, ZoneKpis};
use zone_priority_source::DatasetDefinition;
use zone_priority_zone_models::ScoredZone;

/// Ranking table, one line per zone.
pub fn ranking_table(zones: &[&ScoredZone]) -> String {
    let mut lines = vec![
        format!(
            "{:>4}  {:<24} {:<6} {:>10} {:>11} {:>7}  TIER",
            "RANK", "ZONE", "TYPE", "POPULATION", "SPEED", "SCORE"
        ),
        "-".repeat(78),
    ];

    lines.extend(zones.iter().map(|z| {
        format!(
            "{:>4}  {:<24} {:<6} {:>10} {:>6.1} Mbps {:>7.3}  {}",
            z.rank,
            z.name(),
            z.zone.zone_type.as_ref(),
            z.zone.population,
            z.zone.average_speed_mbps,
            z.priority_score,
            z.priority_tier,
        )
    }));

    lines.join("\n")
}

/// Ranking report followed by the KPIs of the zones in view.
pub fn report_text(report: &RankingReport, kpis: &ZoneKpis) -> String {
    [
        format!("Zones scored:                {}", report.total_zones),
        format!("  High priority:             {}", report.high_priority_zones),
        format!("  Medium priority:           {}", report.medium_priority_zones),
        format!("  Low priority:              {}", report.low_priority_zones),
        format!(
            "Unconnected education sites: {}",
            report.unconnected_education_sites
        ),
        format!(
            "Score (min / mean / max):    {:.3} / {:.3} / {:.3}",
            report.min_score, report.mean_score, report.max_score
        ),
        format!("Top zone:                    {}", report.top_zone),
        String::new(),
        format!("Total population:            {}", kpis.total_population),
        format!("Mean speed:                  {:.1} Mbps", kpis.mean_speed_mbps),
        format!(
            "Mean penetration:            {:.1}%",
            kpis.mean_penetration * 100.0
        ),
    ]
    .join("\n")
}

/// Alert list followed by per-kind counts.
pub fn alerts_text(alerts: &[Alert<'_>], stats: &AlertStats) -> String {
    let mut lines: Vec<String> = alerts
        .iter()
        .map(|a| format!("[{:<9}] {:<24} {}", a.kind.as_ref(), a.zone_name, a.message))
        .collect();

    if alerts.is_empty() {
        lines.push("No alerts.".to_string());
    }

    lines.push(String::new());
    lines.push(format!(
        "{} alerts: {} critical, {} urgent, {} warning, {} attention",
        stats.total, stats.critical, stats.urgent, stats.warning, stats.attention
    ));

    lines.join("\n")
}

/// Built-in dataset listing.
pub fn datasets_table(datasets: &[DatasetDefinition]) -> String {
    let mut lines = vec![
        format!("{:<12} {:>5}  NAME", "ID", "ZONES"),
        "-".repeat(50),
    ];
    lines.extend(
        datasets
            .iter()
            .map(|d| format!("{:<12} {:>5}  {} ({})", d.id, d.zones.len(), d.name, d.municipality)),
    );
    lines.join("\n")
}

//! Plain-text zone sheet.

use chrono::{DateTime, Utc};
use zone_priority_zone_models::ScoredZone;

/// Renders a one-page text summary of a scored zone.
#[must_use]
pub fn render_zone_sheet(scored: &ScoredZone, generated_at: DateTime<Utc>) -> String {
    let zone = &scored.zone;
    let site = match (zone.has_education_site, zone.education_site_connected) {
        (false, _) => "none",
        (true, true) => "connected",
        (true, false) => "NOT connected",
    };

    let lines = [
        zone.name.clone(),
        "=".repeat(zone.name.chars().count()),
        format!(
            "Priority: {} (rank {}, score {:.3})",
            scored.priority_tier.as_ref().to_uppercase(),
            scored.rank,
            scored.priority_score
        ),
        String::new(),
        "Zone".to_string(),
        format!("  Type:                 {}", zone.zone_type),
        format!("  Population:           {}", zone.population),
        format!(
            "  Density:              {:.1} people/km²",
            zone.population_density
        ),
        format!(
            "  Location:             {:.4}, {:.4}",
            zone.location.latitude, zone.location.longitude
        ),
        String::new(),
        "Connectivity".to_string(),
        format!(
            "  Average speed:        {:.1} Mbps",
            zone.average_speed_mbps
        ),
        format!(
            "  Internet penetration: {:.1}%",
            zone.internet_penetration * 100.0
        ),
        String::new(),
        "Education".to_string(),
        format!("  Education site:       {site}"),
        String::new(),
        "Score components".to_string(),
        format!("  Education:            {:.3}", scored.components.education),
        format!("  Population:           {:.3}", scored.components.population),
        format!("  Connectivity:         {:.3}", scored.components.connectivity),
        String::new(),
        format!("Generated {}", generated_at.format("%Y-%m-%d %H:%M UTC")),
    ];

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

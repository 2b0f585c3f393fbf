//! `GeoJSON` point layer for map collaborators.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue};
use zone_priority_zone_models::ScoredZone;

/// Builds one Point feature per zone at `[longitude, latitude]`.
///
/// Properties carry the raw attributes, the derived fields and the tier
/// colour so a map layer can style points without recomputing anything.
#[must_use]
pub fn to_feature_collection<'a, I>(zones: I) -> FeatureCollection
where
    I: IntoIterator<Item = &'a ScoredZone>,
{
    let features: Vec<Feature> = zones.into_iter().map(zone_feature).collect();

    log::debug!("Built {} map features", features.len());

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn zone_feature(scored: &ScoredZone) -> Feature {
    let zone = &scored.zone;
    let point = geojson::Value::Point(vec![zone.location.longitude, zone.location.latitude]);

    let mut properties = JsonObject::new();
    let mut set = |key: &str, value: JsonValue| {
        properties.insert(key.to_string(), value);
    };
    set("name", zone.name.clone().into());
    set("type", zone.zone_type.as_ref().into());
    set("population", zone.population.into());
    set("hasEducationSite", zone.has_education_site.into());
    set("educationSiteConnected", zone.education_site_connected.into());
    set("averageSpeedMbps", zone.average_speed_mbps.into());
    set("internetPenetration", zone.internet_penetration.into());
    set("populationDensity", zone.population_density.into());
    set("educationBonus", scored.education_bonus.into());
    set("normalizedPopulation", scored.normalized_population.into());
    set(
        "normalizedInverseConnectivity",
        scored.normalized_inverse_connectivity.into(),
    );
    set("priorityScore", scored.priority_score.into());
    set("rank", scored.rank.into());
    set("priorityTier", scored.priority_tier.as_ref().into());
    set("color", scored.priority_tier.color_hex().into());

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(point)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

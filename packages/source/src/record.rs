//! Flat on-disk zone record and its validation into a [`Zone`].
//!
//! The same record shape is used by TOML `[[zones]]` tables and CSV rows.
//! Every field is optional at parse time so a missing column surfaces as a
//! named validation failure instead of a silent default.

use serde::{Deserialize, Deserializer, Serialize};
use zone_priority_zone_models::{Location, Zone, ZoneType};

use crate::SourceError;

/// One zone as it appears in a dataset file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneRecord {
    /// Zone name.
    pub name: Option<String>,
    /// `urban` or `rural` (Spanish `urbana` accepted).
    #[serde(rename = "type", alias = "zone_type")]
    pub zone_type: Option<String>,
    /// Resident population.
    pub population: Option<u64>,
    /// Whether the zone hosts an education site.
    #[serde(default, deserialize_with = "flag")]
    pub has_education_site: Option<bool>,
    /// Whether that site is connected. May be omitted when there is no site.
    #[serde(default, deserialize_with = "flag")]
    pub education_site_connected: Option<bool>,
    /// Average download speed in Mbps.
    #[serde(default, deserialize_with = "decimal")]
    pub average_speed_mbps: Option<f64>,
    /// Internet penetration in `[0, 1]`.
    #[serde(default, deserialize_with = "decimal")]
    pub internet_penetration: Option<f64>,
    /// Residents per square kilometre.
    #[serde(default, deserialize_with = "decimal")]
    pub population_density: Option<f64>,
    /// Latitude in decimal degrees.
    #[serde(default, deserialize_with = "decimal")]
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees.
    #[serde(default, deserialize_with = "decimal")]
    pub longitude: Option<f64>,
}

/// A decimal that may arrive as a number or as text with a comma separator.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDecimal {
    Number(f64),
    Text(String),
}

/// Parses `"2,5"`, `"2.5"` and `2.5` alike.
fn decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawDecimal>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawDecimal::Number(n)) => Ok(Some(n)),
        Some(RawDecimal::Text(s)) => parse_decimal(&s).map_err(serde::de::Error::custom),
    }
}

/// A boolean that may arrive as a native bool or as text.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Bool(bool),
    Number(i64),
    Text(String),
}

/// Parses `true`, `"True"`, `"FALSE"`, `"sí"` and the like.
fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawFlag>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawFlag::Bool(b)) => Ok(Some(b)),
        Some(RawFlag::Number(n)) => parse_flag(&n.to_string()).map_err(serde::de::Error::custom),
        Some(RawFlag::Text(s)) => parse_flag(&s).map_err(serde::de::Error::custom),
    }
}

/// Parses a yes/no flag, ignoring case. Accepts `true`/`false`, `yes`/`no`,
/// `sí`/`si`/`no` and `1`/`0`.
///
/// Blank strings parse as `None`.
///
/// # Errors
///
/// Returns a message if the text is not a recognized flag.
pub fn parse_flag(text: &str) -> Result<Option<bool>, String> {
    let trimmed = text.trim();
    match trimmed.to_lowercase().as_str() {
        "" => Ok(None),
        "true" | "yes" | "sí" | "si" | "1" => Ok(Some(true)),
        "false" | "no" | "0" => Ok(Some(false)),
        _ => Err(format!("invalid flag '{trimmed}'")),
    }
}

/// Parses a decimal string, treating `,` as the decimal separator.
///
/// Blank strings parse as `None`.
///
/// # Errors
///
/// Returns a message if the text is not a number.
pub fn parse_decimal(text: &str) -> Result<Option<f64>, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .map(Some)
        .map_err(|e| format!("invalid number '{trimmed}': {e}"))
}

impl ZoneRecord {
    /// Validates the record and converts it into a [`Zone`].
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidRecord`] naming the first missing or
    /// out-of-range field.
    pub fn into_zone(self) -> Result<Zone, SourceError> {
        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| invalid("<unnamed>", "missing name"))?;

        let zone_type = self
            .zone_type
            .as_deref()
            .ok_or_else(|| invalid(&name, "missing type"))?
            .trim()
            .parse::<ZoneType>()
            .map_err(|_| {
                invalid(
                    &name,
                    &format!("unknown type '{}'", self.zone_type.as_deref().unwrap_or("")),
                )
            })?;

        let population = self
            .population
            .ok_or_else(|| invalid(&name, "missing population"))?;

        let has_education_site = self
            .has_education_site
            .ok_or_else(|| invalid(&name, "missing has_education_site"))?;

        let education_site_connected = match (has_education_site, self.education_site_connected) {
            (_, Some(connected)) => connected,
            (false, None) => false,
            (true, None) => return Err(invalid(&name, "missing education_site_connected")),
        };

        let average_speed_mbps = require(&name, "average_speed_mbps", self.average_speed_mbps)?;
        check(&name, "average_speed_mbps", average_speed_mbps, 0.0, f64::MAX)?;

        let internet_penetration =
            require(&name, "internet_penetration", self.internet_penetration)?;
        check(&name, "internet_penetration", internet_penetration, 0.0, 1.0)?;

        let population_density = require(&name, "population_density", self.population_density)?;
        check(&name, "population_density", population_density, 0.0, f64::MAX)?;

        let latitude = require(&name, "latitude", self.latitude)?;
        check(&name, "latitude", latitude, -90.0, 90.0)?;

        let longitude = require(&name, "longitude", self.longitude)?;
        check(&name, "longitude", longitude, -180.0, 180.0)?;

        Ok(Zone {
            name,
            zone_type,
            population,
            has_education_site,
            education_site_connected,
            average_speed_mbps,
            internet_penetration,
            population_density,
            location: Location {
                latitude,
                longitude,
            },
        })
    }
}

fn invalid(record: &str, message: &str) -> SourceError {
    SourceError::InvalidRecord {
        record: record.to_string(),
        message: message.to_string(),
    }
}

fn require(name: &str, field: &str, value: Option<f64>) -> Result<f64, SourceError> {
    value.ok_or_else(|| invalid(name, &format!("missing {field}")))
}

fn check(name: &str, field: &str, value: f64, min: f64, max: f64) -> Result<(), SourceError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(invalid(
            name,
            &format!("{field} {value} outside [{min}, {max}]"),
        ))
    }
}

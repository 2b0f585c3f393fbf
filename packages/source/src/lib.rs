#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Zone dataset loading.
//!
//! Datasets come from three places: the embedded [`registry`], a TOML file
//! with `[[zones]]` tables, or a CSV file with one zone per row. All three
//! go through [`ZoneRecord::into_zone`], so the same validation applies
//! everywhere. Records that fail validation are logged and skipped; a
//! dataset with no surviving zone is an error.

pub mod record;
pub mod registry;

use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use zone_priority_zone_models::Zone;

pub use record::ZoneRecord;
pub use registry::{DatasetDefinition, all_datasets, dataset};

/// Errors that can occur while loading zones.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing failed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// CSV reading failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A record is missing a field or has an out-of-range value.
    #[error("Invalid zone record '{record}': {message}")]
    InvalidRecord {
        /// Zone name, or a placeholder when the name is missing.
        record: String,
        /// Description of what went wrong.
        message: String,
    },

    /// No built-in dataset has the requested id.
    #[error("Unknown dataset '{id}'")]
    UnknownDataset {
        /// The requested id.
        id: String,
    },

    /// The file extension is neither `.toml` nor `.csv`.
    #[error("Unsupported zone file '{path}' (expected .toml or .csv)")]
    UnsupportedFormat {
        /// The offending path.
        path: String,
    },

    /// Every record was rejected.
    #[error("No valid zones in {origin}")]
    NoValidZones {
        /// Where the records came from.
        origin: String,
    },
}

/// Top-level shape of a TOML zone file.
#[derive(Debug, Deserialize)]
struct ZoneFile {
    #[serde(default)]
    zones: Vec<ZoneRecord>,
}

/// Validates records, dropping invalid ones and repeated names.
///
/// The first occurrence of a name wins.
///
/// # Errors
///
/// Returns [`SourceError::NoValidZones`] if nothing survives.
pub fn zones_from_records<I>(origin: &str, records: I) -> Result<Vec<Zone>, SourceError>
where
    I: IntoIterator<Item = ZoneRecord>,
{
    let mut seen = BTreeSet::new();
    let mut skipped = 0_usize;
    let mut zones = Vec::new();

    for record in records {
        match record.into_zone() {
            Ok(zone) if seen.insert(zone.name.clone()) => zones.push(zone),
            Ok(zone) => {
                skipped += 1;
                log::warn!("Skipping duplicate zone '{}' in {origin}", zone.name);
            }
            Err(e) => {
                skipped += 1;
                log::warn!("Skipping record in {origin}: {e}");
            }
        }
    }

    if zones.is_empty() {
        return Err(SourceError::NoValidZones {
            origin: origin.to_string(),
        });
    }

    log::info!("Loaded {} zones from {origin} ({skipped} skipped)", zones.len());

    Ok(zones)
}

/// Loads zones from TOML text containing `[[zones]]` tables.
///
/// # Errors
///
/// Returns an error if the text is not valid TOML or has no valid zone.
pub fn load_toml_str(origin: &str, text: &str) -> Result<Vec<Zone>, SourceError> {
    let file: ZoneFile = toml::from_str(text)?;
    zones_from_records(origin, file.zones)
}

/// Loads zones from CSV with a header row.
///
/// Rows that cannot be deserialized are logged and skipped like invalid
/// records.
///
/// # Errors
///
/// Returns an error if the header cannot be read or no row is valid.
pub fn load_csv_reader<R: Read>(origin: &str, reader: R) -> Result<Vec<Zone>, SourceError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    rdr.headers()?;

    let records: Vec<ZoneRecord> = rdr
        .deserialize::<ZoneRecord>()
        .enumerate()
        .filter_map(|(i, row)| match row {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Skipping malformed row {} in {origin}: {e}", i + 2);
                None
            }
        })
        .collect();

    zones_from_records(origin, records)
}

/// Loads zones from a `.toml` or `.csv` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, has an unsupported
/// extension, or contains no valid zone.
pub fn load_path(path: &Path) -> Result<Vec<Zone>, SourceError> {
    let origin = path.display().to_string();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    log::debug!("Loading zones from {origin}");

    match extension.as_deref() {
        Some("toml") => load_toml_str(&origin, &std::fs::read_to_string(path)?),
        Some("csv") => load_csv_reader(&origin, std::fs::File::open(path)?),
        _ => Err(SourceError::UnsupportedFormat { path: origin }),
    }
}

#[cfg(test)]
mod tests {
    use zone_priority_zone_models::ZoneType;

    use super::*;

    const HEADER: &str = "name,type,population,has_education_site,education_site_connected,\
                          average_speed_mbps,internet_penetration,population_density,latitude,longitude";

    #[test]
    fn csv_accepts_comma_decimals() {
        let csv = format!(
            "{HEADER}\n\
             Timba,rural,3800,true,true,\"8,5\",\"0,32\",95.0,3.1522,-76.4889\n"
        );
        let zones = load_csv_reader("test", csv.as_bytes()).unwrap();
        assert_eq!(zones.len(), 1);
        assert!((zones[0].average_speed_mbps - 8.5).abs() < f64::EPSILON);
        assert!((zones[0].internet_penetration - 0.32).abs() < f64::EPSILON);
    }

    #[test]
    fn csv_accepts_capitalized_flags() {
        let csv = format!(
            "{HEADER}\n\
             Timba,Rural,2900,True,True,12.5,0.32,95.0,3.1266,-76.6352\n\
             Robles,RURAL,3200,TRUE,FALSE,15.2,0.35,80.0,3.1780,-76.5400\n\
             Yumbillo,rural,1500,False,,7.0,0.28,30.0,3.1983,-76.6231\n\
             Chagres,rural,1800,1,0,4.0,0.22,45.0,3.1100,-76.6500\n"
        );
        let zones = load_csv_reader("test", csv.as_bytes()).unwrap();
        assert_eq!(zones.len(), 4);
        assert!(zones[0].has_education_site && zones[0].education_site_connected);
        assert!(zones[1].has_unconnected_education_site());
        assert!(!zones[2].has_education_site);
        assert!(zones[3].has_unconnected_education_site());
    }

    #[test]
    fn csv_skips_malformed_and_invalid_rows() {
        let csv = format!(
            "{HEADER}\n\
             Timba,rural,3800,true,true,8.5,0.32,95.0,3.1522,-76.4889\n\
             Broken,rural,lots,true,true,8.5,0.32,95.0,3.1522,-76.4889\n\
             Missing Speed,rural,1200,false,,,0.3,40.0,3.2,-76.5\n\
             Cabecera Municipal,Urbana,142808,true,true,45.5,0.65,1449.8,3.2611,-76.5383\n"
        );
        let zones = load_csv_reader("test", csv.as_bytes()).unwrap();
        let names: Vec<&str> = zones.iter().map(|z| z.name.as_str()).collect();
        assert_eq!(names, vec!["Timba", "Cabecera Municipal"]);
        assert_eq!(zones[1].zone_type, ZoneType::Urban);
    }

    #[test]
    fn csv_with_no_valid_rows_is_an_error() {
        let csv = format!("{HEADER}\nBroken,rural,lots,true,true,1,0.1,1,0,0\n");
        assert!(matches!(
            load_csv_reader("test", csv.as_bytes()),
            Err(SourceError::NoValidZones { .. })
        ));
    }

    #[test]
    fn toml_loads_zones_and_defaults_connected_flag() {
        let text = r#"
            [[zones]]
            name = "Yumbillo"
            type = "rural"
            population = 1500
            has_education_site = false
            average_speed_mbps = 7
            internet_penetration = 0.28
            population_density = 30.0
            latitude = 3.1983
            longitude = -76.6231
        "#;
        let zones = load_toml_str("test", text).unwrap();
        assert_eq!(zones.len(), 1);
        assert!(!zones[0].education_site_connected);
        assert!((zones[0].average_speed_mbps - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn toml_without_zones_is_an_error() {
        assert!(matches!(
            load_toml_str("empty", "title = \"nothing\""),
            Err(SourceError::NoValidZones { origin }) if origin == "empty"
        ));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        assert!(matches!(
            load_toml_str("bad", "[[zones]\nname ="),
            Err(SourceError::Toml(_))
        ));
    }

    #[test]
    fn duplicate_names_keep_first() {
        let record = |speed: f64| ZoneRecord {
            name: Some("Robles".to_string()),
            zone_type: Some("rural".to_string()),
            population: Some(3200),
            has_education_site: Some(false),
            education_site_connected: None,
            average_speed_mbps: Some(speed),
            internet_penetration: Some(0.35),
            population_density: Some(80.0),
            latitude: Some(3.2),
            longitude: Some(-76.5),
        };
        let zones = zones_from_records("test", [record(15.2), record(1.0)]).unwrap();
        assert_eq!(zones.len(), 1);
        assert!((zones[0].average_speed_mbps - 15.2).abs() < f64::EPSILON);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        assert!(matches!(
            load_path(Path::new("zones.xlsx")),
            Err(SourceError::UnsupportedFormat { .. })
        ));
    }
}

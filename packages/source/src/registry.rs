//! Compile-time registry of built-in zone datasets.
//!
//! Each entry is an `(id, toml_content)` pair embedded via `include_str!`.
//! Adding a municipality requires creating a TOML file in `datasets/` and
//! adding a corresponding entry here.

use serde::{Deserialize, Serialize};
use zone_priority_zone_models::Zone;

use crate::{SourceError, ZoneRecord, zones_from_records};

/// Number of registered datasets. Enforced by a test.
#[cfg(test)]
const EXPECTED_DATASET_COUNT: usize = 1;

/// Embedded TOML dataset definitions.
const DATASET_TOMLS: &[(&str, &str)] = &[("jamundi", include_str!("../datasets/jamundi.toml"))];

/// A built-in dataset: metadata plus its raw zone records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetDefinition {
    /// Short identifier used on the command line.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Municipality the zones belong to.
    pub municipality: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Zone records, validated lazily by [`Self::into_zones`].
    #[serde(default)]
    pub zones: Vec<ZoneRecord>,
}

impl DatasetDefinition {
    /// Validates the records into zones.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::NoValidZones`] if no record survives validation.
    pub fn into_zones(self) -> Result<Vec<Zone>, SourceError> {
        zones_from_records(&format!("dataset '{}'", self.id), self.zones)
    }
}

/// Returns all registered datasets.
///
/// # Panics
///
/// Panics if any embedded TOML file fails to parse. Since these are
/// compile-time constants, parse failures indicate a development error
/// and are caught by the tests below.
#[must_use]
pub fn all_datasets() -> Vec<DatasetDefinition> {
    DATASET_TOMLS
        .iter()
        .map(|(id, toml_str)| {
            toml::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse dataset '{id}': {e}"))
        })
        .collect()
}

/// Looks up a dataset by id, ignoring case.
///
/// # Errors
///
/// Returns [`SourceError::UnknownDataset`] if no dataset has that id.
pub fn dataset(id: &str) -> Result<DatasetDefinition, SourceError> {
    all_datasets()
        .into_iter()
        .find(|d| d.id.eq_ignore_ascii_case(id.trim()))
        .ok_or_else(|| SourceError::UnknownDataset { id: id.to_string() })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use zone_priority_zone_models::ZoneType;

    use super::*;

    #[test]
    fn loads_all_datasets() {
        let datasets = all_datasets();
        assert_eq!(
            datasets.len(),
            EXPECTED_DATASET_COUNT,
            "Expected {EXPECTED_DATASET_COUNT} datasets, found {}. \
             Update EXPECTED_DATASET_COUNT after adding/removing datasets.",
            datasets.len()
        );
    }

    #[test]
    fn dataset_ids_are_unique_and_match_keys() {
        let mut seen = BTreeSet::new();
        for ((key, _), dataset) in DATASET_TOMLS.iter().zip(all_datasets()) {
            assert_eq!(*key, dataset.id, "Registry key does not match TOML id");
            assert!(seen.insert(dataset.id.clone()), "Duplicate dataset ID: {key}");
        }
    }

    #[test]
    fn every_builtin_zone_is_valid() {
        for dataset in all_datasets() {
            let expected = dataset.zones.len();
            let id = dataset.id.clone();
            let zones = dataset.into_zones().unwrap();
            assert_eq!(zones.len(), expected, "Dataset '{id}' has invalid zones");
        }
    }

    #[test]
    fn jamundi_has_one_urban_seat() {
        let zones = dataset("jamundi").unwrap().into_zones().unwrap();
        assert_eq!(zones.len(), 14);
        let urban: Vec<&str> = zones
            .iter()
            .filter(|z| z.zone_type == ZoneType::Urban)
            .map(|z| z.name.as_str())
            .collect();
        assert_eq!(urban, vec!["Cabecera Municipal"]);
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(dataset("JAMUNDI").unwrap().id, "jamundi");
    }

    #[test]
    fn unknown_dataset_is_an_error() {
        assert!(matches!(
            dataset("cali"),
            Err(SourceError::UnknownDataset { id }) if id == "cali"
        ));
    }
}

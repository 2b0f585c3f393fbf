//! Zone and threshold loading for the command line.

use std::path::Path;

use zone_priority_alert_models::AlertThresholds;
use zone_priority_source::SourceError;
use zone_priority_zone_models::Zone;

/// Loads zones from `file` when given, otherwise from the embedded dataset.
///
/// # Errors
///
/// Returns [`SourceError`] if the file or dataset cannot be loaded.
pub fn load_zones(dataset: &str, file: Option<&Path>) -> Result<Vec<Zone>, SourceError> {
    if let Some(path) = file {
        return zone_priority_source::load_path(path);
    }

    let definition = zone_priority_source::dataset(dataset)?;
    log::info!("Using built-in dataset '{}' ({})", definition.id, definition.name);
    definition.into_zones()
}

/// Reads alert thresholds from a TOML file, or the defaults when `path` is
/// `None`. Keys missing from the file keep their default values.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_thresholds(path: Option<&Path>) -> Result<AlertThresholds, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(AlertThresholds::default());
    };

    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read thresholds '{}': {e}", path.display()))?;
    let thresholds = parse_thresholds(&text)
        .map_err(|e| format!("Invalid thresholds '{}': {e}", path.display()))?;

    log::debug!("Loaded alert thresholds: {thresholds:?}");

    Ok(thresholds)
}

fn parse_thresholds(text: &str) -> Result<AlertThresholds, toml::de::Error> {
    toml::from_str(text)
}

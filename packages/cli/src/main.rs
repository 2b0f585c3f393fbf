#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for zone prioritization.
//!
//! Every subcommand scores the whole dataset first and only then narrows
//! what is shown, so ranks and scores never depend on the filters used.

mod input;
mod render;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use zone_priority_alert_models::{Alert, AlertStats};
use zone_priority_scoring::filter::{DEFAULT_MAX_SUGGESTIONS, ZoneFilter, suggestions};
use zone_priority_scoring::report::{RankingReport, ZoneKpis, ranking_report, top_zones, zone_kpis};
use zone_priority_zone_models::{PriorityTier, ScoredZone, ZoneType};

#[derive(Parser)]
#[command(
    name = "zone_priority",
    about = "Rank zones for connectivity investment and flag urgent cases"
)]
struct Cli {
    /// Built-in dataset to score (see `datasets`)
    #[arg(long, global = true, default_value = "jamundi")]
    dataset: String,
    /// Score zones from a `.toml` or `.csv` file instead of a built-in dataset
    #[arg(long, global = true)]
    file: Option<PathBuf>,
    /// TOML file overriding alert thresholds
    #[arg(long, global = true)]
    thresholds: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List built-in datasets
    Datasets,
    /// Print the priority ranking
    Rank {
        /// Only show the N highest-ranked zones
        #[arg(long)]
        top: Option<usize>,
        /// Only show zones in this tier (repeatable)
        #[arg(long = "tier")]
        tiers: Vec<PriorityTier>,
        /// Only show zones of this type
        #[arg(long)]
        zone_type: Option<ZoneType>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the ranking report and KPIs
    Report {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print alerts for zones that cross a threshold
    Alerts {
        /// Only alert on zones in this tier (repeatable)
        #[arg(long = "tier")]
        tiers: Vec<PriorityTier>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Suggest zone names matching a query, highest priority first
    Search {
        /// Part of a zone name
        query: String,
        /// Maximum number of suggestions
        #[arg(long, default_value_t = DEFAULT_MAX_SUGGESTIONS)]
        max: usize,
    },
    /// Export every scored zone
    Export {
        /// Output format
        #[arg(long, value_enum)]
        format: ExportFormat,
        /// Output file (defaults to stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print a summary sheet for one zone
    Sheet {
        /// Zone name (case-insensitive)
        zone: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    Csv,
    Geojson,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportOutput<'a> {
    report: &'a RankingReport,
    kpis: &'a ZoneKpis,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AlertsOutput<'a> {
    stats: AlertStats,
    alerts: &'a [Alert<'a>],
}

/// Builds the visibility filter for `--tier` / `--zone-type`.
fn visibility(tiers: Vec<PriorityTier>, zone_type: Option<ZoneType>) -> ZoneFilter {
    let mut filter = ZoneFilter::new();
    if !tiers.is_empty() {
        filter = filter.with_tiers(tiers);
    }
    if let Some(zone_type) = zone_type {
        filter = filter.with_zone_type(zone_type);
    }
    filter
}

/// Opens `path` for writing, or stdout when `None`.
fn output_writer(path: Option<&Path>) -> std::io::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(std::io::stdout().lock()),
    })
}

/// Finds a zone by name, ignoring case and surrounding whitespace.
fn find_zone<'a>(scored: &'a [ScoredZone], name: &str) -> Option<&'a ScoredZone> {
    let name = name.trim().to_lowercase();
    scored.iter().find(|z| z.name().to_lowercase() == name)
}

/// Loads the selected input and scores all of it.
fn load_and_score(
    dataset: &str,
    file: Option<&Path>,
) -> Result<Vec<ScoredZone>, Box<dyn std::error::Error>> {
    let zones = input::load_zones(dataset, file)?;
    let scored = zone_priority_scoring::score(&zones)?;
    log::info!("Scored {} zones", scored.len());
    Ok(scored)
}

#[allow(clippy::too_many_lines)]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let Cli {
        dataset,
        file,
        thresholds,
        command,
    } = Cli::parse();

    match command {
        Commands::Datasets => {
            println!(
                "{}",
                render::datasets_table(&zone_priority_source::all_datasets())
            );
        }
        Commands::Rank {
            top,
            tiers,
            zone_type,
            json,
        } => {
            let scored = load_and_score(&dataset, file.as_deref())?;
            let visible = visibility(tiers, zone_type).apply(&scored);
            let rows = top_zones(visible, top.unwrap_or(usize::MAX));

            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!("{}", render::ranking_table(&rows));
            }
        }
        Commands::Report { json } => {
            let scored = load_and_score(&dataset, file.as_deref())?;
            let report = ranking_report(&scored)?;
            let kpis = zone_kpis(&scored);

            if json {
                let output = ReportOutput {
                    report: &report,
                    kpis: &kpis,
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{}", render::report_text(&report, &kpis));
            }
        }
        Commands::Alerts { tiers, json } => {
            let thresholds = input::load_thresholds(thresholds.as_deref())?;
            let scored = load_and_score(&dataset, file.as_deref())?;
            let visible = visibility(tiers, None).apply(&scored);
            let alerts = zone_priority_alert::derive_alerts_with(visible, &thresholds);
            let stats = zone_priority_alert::summarize(&alerts);

            if json {
                let output = AlertsOutput {
                    stats,
                    alerts: &alerts,
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{}", render::alerts_text(&alerts, &stats));
            }
        }
        Commands::Search { query, max } => {
            let scored = load_and_score(&dataset, file.as_deref())?;
            let found = suggestions(&query, &scored, max);
            if found.is_empty() {
                log::warn!("No zones match '{query}'");
            }
            for name in found {
                println!("{name}");
            }
        }
        Commands::Export { format, output } => {
            let scored = load_and_score(&dataset, file.as_deref())?;
            let mut writer = output_writer(output.as_deref())?;
            match format {
                ExportFormat::Csv => zone_priority_export::write_csv(&mut writer, &scored)?,
                ExportFormat::Geojson => {
                    let collection = zone_priority_export::to_feature_collection(&scored);
                    serde_json::to_writer_pretty(&mut writer, &collection)?;
                    writeln!(writer)?;
                }
            }
            writer.flush()?;
            if let Some(path) = output {
                log::info!("Wrote {} zones to {}", scored.len(), path.display());
            }
        }
        Commands::Sheet { zone } => {
            let scored = load_and_score(&dataset, file.as_deref())?;
            let Some(found) = find_zone(&scored, &zone) else {
                let hints = suggestions(&zone, &scored, DEFAULT_MAX_SUGGESTIONS);
                if hints.is_empty() {
                    return Err(format!("Unknown zone: {zone}").into());
                }
                return Err(
                    format!("Unknown zone: {zone} (did you mean: {})", hints.join(", ")).into(),
                );
            };
            print!(
                "{}",
                zone_priority_export::render_zone_sheet(found, chrono::Utc::now())
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_repeated_tiers_and_zone_type() {
        let cli = Cli::parse_from([
            "zone_priority",
            "rank",
            "--tier",
            "high",
            "--tier",
            "Medium",
            "--zone-type",
            "rural",
            "--top",
            "3",
        ]);
        let Commands::Rank {
            top,
            tiers,
            zone_type,
            json,
        } = cli.command
        else {
            panic!("expected rank");
        };
        assert_eq!(top, Some(3));
        assert_eq!(tiers, vec![PriorityTier::High, PriorityTier::Medium]);
        assert_eq!(zone_type, Some(ZoneType::Rural));
        assert!(!json);
        assert_eq!(cli.dataset, "jamundi");
    }

    #[test]
    fn global_file_flag_after_subcommand() {
        let cli = Cli::parse_from(["zone_priority", "report", "--file", "zones.csv"]);
        assert_eq!(cli.file, Some(PathBuf::from("zones.csv")));
    }

    #[test]
    fn empty_tier_list_shows_everything() {
        let scored = load_and_score("jamundi", None).unwrap();
        assert_eq!(visibility(Vec::new(), None).apply(&scored).len(), scored.len());
    }

    #[test]
    fn zone_lookup_ignores_case() {
        let scored = load_and_score("jamundi", None).unwrap();
        assert_eq!(find_zone(&scored, "  potrerito ").unwrap().name(), "Potrerito");
        assert_eq!(find_zone(&scored, "QUINAMAYÓ").unwrap().name(), "Quinamayó");
        assert!(find_zone(&scored, "Cali").is_none());
    }
}

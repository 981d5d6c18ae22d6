use std::path::PathBuf;

use anyhow::{Context, Result};

use dugout_terminal::classify::{ClassificationPolicy, classify, tier_label};
use dugout_terminal::export::export_dataset_xlsx;
use dugout_terminal::query::{PlayerLookup, find_player};
use dugout_terminal::record::Dataset;
use dugout_terminal::sheet::is_placeholder_label;
use dugout_terminal::sheets_fetch::{SheetConfig, SheetSource};

const DEFAULT_OUT: &str = "dugout_stats.xlsx";

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let out = arg_value("--out")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT));
    let player = arg_value("--player");

    let source = SheetConfig::from_env().into_source();
    println!("[INFO] Fetching stats from {}", source.describe());
    let raw = source.fetch().context("failed to load data from the sheet")?;
    let (dataset, report) = Dataset::from_raw(raw);
    println!(
        "[INFO] Sheet loaded: {} rows x {} columns",
        report.rows, report.columns
    );
    if report.truncated_cells > 0 {
        eprintln!(
            "[WARN] Dropped {} cells beyond the header from {} rows",
            report.truncated_cells, report.truncated_rows
        );
    }

    let policy = ClassificationPolicy::default();
    let summary = export_dataset_xlsx(&out, &dataset, &policy)?;
    println!("Export complete");
    println!("File: {}", out.display());
    println!("Rows: {} | Columns: {}", summary.rows, summary.columns);
    println!("Players listed: {}", summary.players);
    println!("Classified cells: {}", summary.classified_cells);

    if let Some(name) = player {
        print_player(&dataset, &policy, &name);
    }
    Ok(())
}

fn print_player(dataset: &Dataset, policy: &ClassificationPolicy, name: &str) {
    match find_player(dataset, name) {
        Ok(PlayerLookup::Found { record, .. }) => {
            println!();
            println!("Player: {}", name.trim());
            for (label, value) in record.fields() {
                if value.trim().is_empty() {
                    continue;
                }
                if is_placeholder_label(label) {
                    println!(" {label:<12} {value}");
                } else {
                    let tier = classify(policy, label, value);
                    println!(" {label:<12} {value:<10} {}", tier_label(tier));
                }
            }
        }
        Ok(PlayerLookup::NotFound) => println!("Player not found: {name}"),
        Err(err) => eprintln!("[WARN] Player lookup unavailable: {err}"),
    }
}

fn arg_value(flag: &str) -> Option<String> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let prefix = format!("{flag}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == flag {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(next.clone());
            }
        }
    }
    None
}

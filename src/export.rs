use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Color, Format, Workbook, Worksheet};

use crate::classify::{ClassificationPolicy, Tier, classify};
use crate::record::Dataset;
use crate::sheet::is_placeholder_label;

pub struct ExportReport {
    pub rows: usize,
    pub columns: usize,
    pub players: usize,
    pub classified_cells: usize,
}

pub fn tier_rgb(tier: Tier) -> u32 {
    match tier {
        Tier::Excellent => 0x22C55E,
        Tier::Good => 0xEAB308,
        Tier::Poor => 0xEF4444,
        Tier::Neutral => 0x60A5FA,
        Tier::NonNumeric => 0x9CA3AF,
    }
}

/// Writes the normalized table with tier-coloured fonts, plus a player list sheet.
/// Metadata placeholder columns are written unstyled.
pub fn export_dataset_xlsx(
    path: &Path,
    dataset: &Dataset,
    policy: &ClassificationPolicy,
) -> Result<ExportReport> {
    let header_format = Format::new().set_bold();
    let mut classified_cells = 0usize;

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Stats")?;
        for (col_idx, label) in dataset.header().labels().iter().enumerate() {
            sheet
                .write_string_with_format(0, col_idx as u16, label, &header_format)
                .with_context(|| format!("write header ({col_idx})"))?;
        }
        for (row_idx, record) in dataset.records().iter().enumerate() {
            let row = row_idx as u32 + 1;
            for (col_idx, (label, value)) in record.fields().enumerate() {
                let col = col_idx as u16;
                if is_placeholder_label(label) {
                    sheet
                        .write_string(row, col, value)
                        .with_context(|| format!("write cell ({row},{col})"))?;
                    continue;
                }
                let tier = classify(policy, label, value);
                if matches!(tier, Tier::Excellent | Tier::Good | Tier::Poor) {
                    classified_cells += 1;
                }
                sheet
                    .write_string_with_format(row, col, value, &tier_format(tier))
                    .with_context(|| format!("write cell ({row},{col})"))?;
            }
        }
    }

    // A missing identity column only drops the player sheet.
    let players = dataset.player_names().unwrap_or_default();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Players")?;
        write_player_list(sheet, &players, &header_format)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        rows: dataset.len(),
        columns: dataset.header().len(),
        players: players.len(),
        classified_cells,
    })
}

fn tier_format(tier: Tier) -> Format {
    let format = Format::new().set_font_color(Color::RGB(tier_rgb(tier)));
    match tier {
        Tier::Excellent | Tier::Good | Tier::Poor => format.set_bold(),
        Tier::Neutral | Tier::NonNumeric => format,
    }
}

fn write_player_list(sheet: &mut Worksheet, players: &[String], header: &Format) -> Result<()> {
    sheet
        .write_string_with_format(0, 0, "Player", header)
        .context("write player header")?;
    for (idx, name) in players.iter().enumerate() {
        sheet
            .write_string(idx as u32 + 1, 0, name)
            .with_context(|| format!("write player ({idx})"))?;
    }
    Ok(())
}

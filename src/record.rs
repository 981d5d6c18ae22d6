use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::sheet::{self, RawSheet};

/// Identity values that mark team/staff aggregate rows rather than players.
pub const AGGREGATE_NAMES: &[&str] = &["staff total", "total", "team total", ""];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    #[error("no identity column among Column_B..Column_I")]
    NoIdentityColumn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl Header {
    pub fn new(labels: Vec<String>) -> Self {
        let index = labels
            .iter()
            .enumerate()
            .map(|(pos, label)| (label.clone(), pos))
            .collect();
        Self { labels, index }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }
}

/// One data row keyed by header label. Always exactly as wide as the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    header: Arc<Header>,
    values: Vec<String>,
}

impl Record {
    pub fn get(&self, label: &str) -> Option<&str> {
        self.header
            .position(label)
            .and_then(|pos| self.values.get(pos))
            .map(String::as_str)
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.header
            .labels()
            .iter()
            .zip(self.values.iter())
            .map(|(label, value)| (label.as_str(), value.as_str()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub rows: usize,
    pub columns: usize,
    pub padded_rows: usize,
    pub truncated_rows: usize,
    pub truncated_cells: usize,
}

/// Records sharing one normalized header. Rebuilt wholesale on every fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    header: Arc<Header>,
    records: Vec<Record>,
}

impl Dataset {
    pub fn from_raw(raw: RawSheet) -> (Self, BuildReport) {
        let mut rows = raw.into_iter();
        let raw_header = rows.next().unwrap_or_default();
        let header = Arc::new(Header::new(sheet::normalize_header(&raw_header)));
        let width = header.len();

        let mut report = BuildReport {
            columns: width,
            ..BuildReport::default()
        };
        let mut records = Vec::new();
        for row in rows {
            if row.len() < width {
                report.padded_rows += 1;
            }
            let rectified = sheet::rectify_row(row, width);
            if rectified.truncated > 0 {
                report.truncated_rows += 1;
                report.truncated_cells += rectified.truncated;
            }
            records.push(Record {
                header: Arc::clone(&header),
                values: rectified.cells,
            });
        }
        report.rows = records.len();
        (Self { header, records }, report)
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First placeholder column (`Column_B`..`Column_I`) present in the header.
    pub fn identity_column(&self) -> Result<&str, DatasetError> {
        sheet::placeholder_labels()
            .into_iter()
            .find_map(|label| {
                self.header
                    .position(&label)
                    .map(|pos| self.header.labels()[pos].as_str())
            })
            .ok_or(DatasetError::NoIdentityColumn)
    }

    /// Trimmed player names in row order, aggregate rows excluded. Duplicates kept.
    pub fn player_names(&self) -> Result<Vec<String>, DatasetError> {
        let identity = self.identity_column()?;
        Ok(self
            .records
            .iter()
            .filter_map(|record| record.get(identity))
            .map(str::trim)
            .filter(|name| !is_aggregate_name(name))
            .map(str::to_string)
            .collect())
    }

    pub fn metric_columns(&self) -> Vec<&str> {
        self.header
            .labels()
            .iter()
            .map(String::as_str)
            .filter(|label| !sheet::is_placeholder_label(label))
            .collect()
    }
}

pub fn is_aggregate_name(raw: &str) -> bool {
    let lowered = raw.trim().to_lowercase();
    let normalized = lowered.strip_suffix(':').unwrap_or(&lowered);
    AGGREGATE_NAMES.contains(&normalized)
}

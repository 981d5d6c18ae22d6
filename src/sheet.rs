use std::collections::{HashMap, HashSet};

/// Rows exactly as the spreadsheet backend returned them: first row is the header
/// candidate, every row may be ragged.
pub type RawSheet = Vec<Vec<String>>;

/// Sheet columns B..I are reserved for identity/metadata and may arrive unlabeled.
pub const PLACEHOLDER_COUNT: usize = 8;

const FIRST_PLACEHOLDER_LETTER: u8 = b'B';

pub fn placeholder_label(position: usize) -> String {
    let letter = (FIRST_PLACEHOLDER_LETTER + position as u8) as char;
    format!("Column_{letter}")
}

pub fn placeholder_labels() -> Vec<String> {
    (0..PLACEHOLDER_COUNT).map(placeholder_label).collect()
}

pub fn is_placeholder_label(label: &str) -> bool {
    (0..PLACEHOLDER_COUNT).any(|pos| placeholder_label(pos) == label)
}

/// Repairs a raw header row.
///
/// Blank or missing labels in the first [`PLACEHOLDER_COUNT`] positions become
/// `Column_<letter>`. Repeated labels keep their first occurrence verbatim and get
/// `_1`, `_2`, ... on later occurrences. A suffix that would collide with a label
/// already emitted is skipped, so the result is always unique.
pub fn normalize_header(raw: &[String]) -> Vec<String> {
    let mut labels: Vec<String> = raw.to_vec();
    for pos in 0..PLACEHOLDER_COUNT {
        match labels.get_mut(pos) {
            Some(label) if label.trim().is_empty() => *label = placeholder_label(pos),
            Some(_) => {}
            None => labels.push(placeholder_label(pos)),
        }
    }

    let mut seen: HashMap<String, usize> = HashMap::with_capacity(labels.len());
    let mut emitted: HashSet<String> = HashSet::with_capacity(labels.len());
    let mut unique = Vec::with_capacity(labels.len());
    for label in labels {
        let next = match seen.get(&label).copied() {
            None if !emitted.contains(&label) => {
                seen.insert(label.clone(), 0);
                label
            }
            prior => {
                let mut count = prior.unwrap_or(0);
                let candidate = loop {
                    count += 1;
                    let candidate = format!("{label}_{count}");
                    if !emitted.contains(&candidate) {
                        break candidate;
                    }
                };
                seen.insert(label, count);
                candidate
            }
        };
        emitted.insert(next.clone());
        unique.push(next);
    }
    unique
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rectified {
    pub cells: Vec<String>,
    pub truncated: usize,
}

/// Pads a short row with empty cells; truncates a long one and reports how many
/// cells were dropped so the caller can log it.
pub fn rectify_row(mut row: Vec<String>, width: usize) -> Rectified {
    let truncated = row.len().saturating_sub(width);
    row.resize(width, String::new());
    Rectified {
        cells: row,
        truncated,
    }
}

use crate::record::{Dataset, DatasetError, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerLookup<'a> {
    Found { index: usize, record: &'a Record },
    NotFound,
}

impl<'a> PlayerLookup<'a> {
    pub fn record(&self) -> Option<&'a Record> {
        match self {
            PlayerLookup::Found { record, .. } => Some(record),
            PlayerLookup::NotFound => None,
        }
    }
}

/// Resolves a requested player against the identity column.
///
/// A record matches when its stored value equals the request verbatim, or when both
/// agree after trimming and lower-casing. The first matching record in dataset order
/// wins. Aggregate rows are searchable; only the picker hides them.
pub fn find_player<'a>(
    dataset: &'a Dataset,
    requested: &str,
) -> Result<PlayerLookup<'a>, DatasetError> {
    let identity = dataset.identity_column()?;
    let wanted = normalize_name(requested);
    if wanted.is_empty() {
        return Ok(PlayerLookup::NotFound);
    }
    let found = dataset
        .records()
        .iter()
        .enumerate()
        .find(|(_, record)| {
            record
                .get(identity)
                .is_some_and(|stored| stored == requested || normalize_name(stored) == wanted)
        });
    Ok(match found {
        Some((index, record)) => PlayerLookup::Found { index, record },
        None => PlayerLookup::NotFound,
    })
}

fn normalize_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}

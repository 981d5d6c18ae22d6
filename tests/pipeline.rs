use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use dugout_terminal::classify::{ClassificationPolicy, Tier, classify};
use dugout_terminal::record::{Dataset, DatasetError};
use dugout_terminal::sheet::{normalize_header, rectify_row};
use dugout_terminal::sheets_fetch::parse_values_json;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn sheet(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter().map(|row| strings(row)).collect()
}

#[test]
fn empty_header_gets_all_placeholders() {
    let header = normalize_header(&[]);
    assert_eq!(
        header,
        strings(&[
            "Column_B", "Column_C", "Column_D", "Column_E", "Column_F", "Column_G", "Column_H",
            "Column_I",
        ])
    );
}

#[test]
fn duplicate_labels_get_numeric_suffixes() {
    let header = normalize_header(&strings(&["HR", "HR", "HR"]));
    assert_eq!(header.len(), 8);
    assert_eq!(header[0], "HR");
    assert_eq!(header[1], "HR_1");
    assert_eq!(header[2], "HR_2");
    assert_eq!(header[3], "Column_E");
}

#[test]
fn normalized_header_is_unique_and_at_least_eight_wide() {
    let inputs = [
        strings(&[]),
        strings(&["", "", ""]),
        strings(&["HR", "HR", "HR_1", "HR", "", "ERA", "ERA", "ERA_1", "Column_B", ""]),
        strings(&["Column_C", "", "", "K%", "K%", "K%", "K%", "K%", "K%", "K%", "", ""]),
    ];
    for input in inputs {
        let header = normalize_header(&input);
        assert!(header.len() >= 8.max(input.len()));
        let unique: HashSet<&String> = header.iter().collect();
        assert_eq!(unique.len(), header.len(), "duplicate label in {header:?}");
    }
}

#[test]
fn blank_labels_past_placeholders_stay_unique() {
    let mut input = strings(&["a", "b", "c", "d", "e", "f", "g", "h"]);
    input.extend(strings(&["", "", ""]));
    let header = normalize_header(&input);
    assert_eq!(&header[8..], &strings(&["", "_1", "_2"])[..]);
}

#[test]
fn rectify_full_row_is_unchanged() {
    let row = strings(&["a", "b", "c"]);
    let out = rectify_row(row.clone(), 3);
    assert_eq!(out.cells, row);
    assert_eq!(out.truncated, 0);
}

#[test]
fn rectify_short_row_appends_exactly_missing_cells() {
    let out = rectify_row(strings(&["a"]), 3);
    assert_eq!(out.cells, strings(&["a", "", ""]));
}

#[test]
fn end_to_end_scenario() {
    let raw = sheet(&[&["", "ERA"], &["John Doe", "2.50"], &["Team Total", "3.10"]]);
    let (dataset, report) = Dataset::from_raw(raw);

    let labels = dataset.header().labels();
    assert_eq!(labels[0], "Column_B");
    assert_eq!(labels[1], "ERA");
    assert_eq!(&labels[2..], &strings(&["Column_D", "Column_E", "Column_F", "Column_G", "Column_H", "Column_I"])[..]);
    assert_eq!(dataset.len(), 2);
    assert_eq!(report.padded_rows, 2);

    assert_eq!(dataset.identity_column(), Ok("Column_B"));
    assert_eq!(dataset.player_names().expect("identity"), strings(&["John Doe"]));

    let john = &dataset.records()[0];
    let era = john.get("ERA").expect("ERA column");
    assert_eq!(era, "2.50");
    assert_eq!(classify(&ClassificationPolicy::default(), "ERA", era), Tier::Excellent);
}

#[test]
fn records_are_as_wide_as_the_header() {
    let raw = fs::read_to_string(
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sheet_values.json"),
    )
    .expect("fixture file should be readable");
    let (dataset, report) = Dataset::from_raw(parse_values_json(&raw).expect("fixture should parse"));

    let width = dataset.header().len();
    assert_eq!(width, 13);
    assert!(dataset.records().iter().all(|r| r.values().len() == width));
    assert_eq!(report.truncated_rows, 1);
    assert_eq!(report.truncated_cells, 2);
    assert_eq!(dataset.header().labels()[12], "ERA_1");
    assert_eq!(dataset.records()[1].get("ERA"), Some(""));
}

#[test]
fn unknown_label_is_absent_not_a_panic() {
    let (dataset, _) = Dataset::from_raw(sheet(&[&["", "ERA"], &["John Doe", "2.50"]]));
    assert_eq!(dataset.records()[0].get("WHIP"), None);
    assert_eq!(dataset.records()[0].get("Column_B"), Some("John Doe"));
}

#[test]
fn aggregate_rows_are_excluded_from_player_list() {
    let raw = sheet(&[
        &[""],
        &["Team Total"],
        &["  total  "],
        &[""],
        &["Staff Total:"],
        &["Total Hitter"],
        &["  Jane Smith  "],
        &["Jane Smith"],
    ]);
    let (dataset, _) = Dataset::from_raw(raw);
    assert_eq!(
        dataset.player_names().expect("identity"),
        strings(&["Total Hitter", "Jane Smith", "Jane Smith"])
    );
}

#[test]
fn identity_uses_first_placeholder_present() {
    let raw = sheet(&[&["Player", "", "Pos"], &["John Doe", "Sr.", "RHP"]]);
    let (dataset, _) = Dataset::from_raw(raw);
    assert_eq!(dataset.identity_column(), Ok("Column_C"));
    assert_eq!(dataset.player_names().expect("identity"), strings(&["Sr."]));
}

#[test]
fn fully_labeled_header_has_no_identity_column() {
    let raw = sheet(&[
        &["Player", "Class", "Throws", "Pos", "Yr", "Team", "Notes", "Role", "ERA"],
        &["John Doe", "Sr.", "R", "P", "4", "A", "", "SP", "2.50"],
    ]);
    let (dataset, _) = Dataset::from_raw(raw);
    assert_eq!(dataset.identity_column(), Err(DatasetError::NoIdentityColumn));
    assert_eq!(dataset.player_names(), Err(DatasetError::NoIdentityColumn));
    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.records()[0].get("ERA"), Some("2.50"));
}

#[test]
fn metric_columns_skip_placeholders() {
    let (dataset, _) = Dataset::from_raw(sheet(&[&["", "Class", "", "", "", "", "", "", "ERA", "K%"]]));
    assert_eq!(dataset.metric_columns(), vec!["Class", "ERA", "K%"]);
    assert!(dataset.is_empty());
}

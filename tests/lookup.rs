use dugout_terminal::query::{PlayerLookup, find_player};
use dugout_terminal::record::{Dataset, DatasetError};

fn dataset(rows: &[&[&str]]) -> Dataset {
    let raw = rows
        .iter()
        .map(|row| row.iter().map(|s| s.to_string()).collect())
        .collect();
    Dataset::from_raw(raw).0
}

fn roster() -> Dataset {
    dataset(&[
        &["", "ERA"],
        &["John Doe", "2.50"],
        &["  Jane Smith ", "3.10"],
        &["JOHN DOE", "9.99"],
        &["Team Total", "3.10"],
    ])
}

#[test]
fn lookup_ignores_case_and_whitespace() {
    let data = roster();
    let found = find_player(&data, "john doe").expect("identity column");
    assert!(matches!(found, PlayerLookup::Found { index: 0, .. }));
    assert_eq!(found.record().and_then(|r| r.get("ERA")), Some("2.50"));

    let found = find_player(&data, "jane smith").expect("identity column");
    assert!(matches!(found, PlayerLookup::Found { index: 1, .. }));
}

#[test]
fn lookup_matches_raw_stored_value() {
    let data = roster();
    let found = find_player(&data, "  Jane Smith ").expect("identity column");
    assert!(matches!(found, PlayerLookup::Found { index: 1, .. }));
}

#[test]
fn first_matching_row_wins() {
    let data = roster();
    let found = find_player(&data, "JOHN DOE").expect("identity column");
    assert!(matches!(found, PlayerLookup::Found { index: 0, .. }));
}

#[test]
fn missing_player_is_not_found() {
    let data = roster();
    assert_eq!(
        find_player(&data, "Nonexistent Player"),
        Ok(PlayerLookup::NotFound)
    );
    assert_eq!(find_player(&data, "   "), Ok(PlayerLookup::NotFound));
}

#[test]
fn aggregate_rows_are_still_addressable() {
    let data = roster();
    let found = find_player(&data, "team total").expect("identity column");
    assert!(matches!(found, PlayerLookup::Found { index: 3, .. }));
}

#[test]
fn lookup_without_identity_column_fails() {
    let data = dataset(&[
        &["Player", "Class", "Throws", "Pos", "Yr", "Team", "Notes", "Role"],
        &["John Doe", "Sr.", "R", "P", "4", "A", "", "SP"],
    ]);
    assert_eq!(
        find_player(&data, "John Doe"),
        Err(DatasetError::NoIdentityColumn)
    );
}

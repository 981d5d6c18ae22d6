use std::fs;
use std::path::PathBuf;

use dugout_terminal::sheets_fetch::parse_values_json;
use dugout_terminal::summary::parse_completion_json;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_sheet_values_fixture() {
    let raw = read_fixture("sheet_values.json");
    let rows = parse_values_json(&raw).expect("fixture should parse");
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0][0], "");
    assert_eq!(rows[1][0], "Alex Moreno");
    assert_eq!(rows[2].len(), 2);
    assert_eq!(rows[3][8], "136.1");
}

#[test]
fn sheet_values_null_or_empty_is_error() {
    assert!(parse_values_json("null").is_err());
    assert!(parse_values_json("").is_err());
    assert!(parse_values_json(r#"{"range": "Dash!B1:BQ22"}"#).is_err());
    assert!(parse_values_json(r#"{"values": []}"#).is_err());
}

#[test]
fn sheet_values_render_non_string_cells() {
    let rows = parse_values_json(r#"{"values": [["a", 3, true, null]]}"#).expect("should parse");
    assert_eq!(rows[0], vec!["a", "3", "TRUE", ""]);
}

#[test]
fn parses_chat_completion_fixture() {
    let raw = read_fixture("chat_completion.json");
    let text = parse_completion_json(&raw).expect("fixture should parse");
    assert_eq!(
        text,
        "Alex Moreno is pitching well: a 2.38 ERA with a 31% strikeout rate."
    );
}

#[test]
fn empty_completion_is_error() {
    assert!(parse_completion_json(r#"{"choices": []}"#).is_err());
    assert!(parse_completion_json(r#"{"choices": [{"message": {"content": "   "}}]}"#).is_err());
    assert!(parse_completion_json(r#"{"choices": [{"message": {"content": null}}]}"#).is_err());
    assert!(parse_completion_json("not json").is_err());
}

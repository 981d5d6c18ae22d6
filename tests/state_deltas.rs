use std::sync::mpsc;

use anyhow::{Result, bail};

use dugout_terminal::provider::handle_command;
use dugout_terminal::record::{BuildReport, Dataset, Record};
use dugout_terminal::sheet::RawSheet;
use dugout_terminal::sheets_fetch::SheetSource;
use dugout_terminal::state::{
    AppState, Delta, LoadState, ProviderCommand, SummaryState, apply_delta,
};
use dugout_terminal::summary::{SummaryOutcome, Summarizer};

fn raw(rows: &[&[&str]]) -> RawSheet {
    rows.iter()
        .map(|row| row.iter().map(|s| s.to_string()).collect())
        .collect()
}

fn staff_sheet() -> RawSheet {
    raw(&[
        &["", "", "", "", "", "", "", "", "ERA", "K%"],
        &["Alex Moreno", "", "", "", "", "", "", "", "2.38", "31%"],
        &["Ben Ortiz"],
        &["Staff Total:", "", "", "", "", "", "", "", "3.40", "24%", "x"],
    ])
}

fn loaded_state() -> AppState {
    let mut state = AppState::new();
    let (dataset, report) = Dataset::from_raw(staff_sheet());
    apply_delta(&mut state, Delta::SetDataset { dataset, report });
    state
}

struct FixedSheet(Option<RawSheet>);

impl SheetSource for FixedSheet {
    fn describe(&self) -> String {
        "fixture sheet".to_string()
    }

    fn fetch(&self) -> Result<RawSheet> {
        match &self.0 {
            Some(raw) => Ok(raw.clone()),
            None => bail!("sheet unreachable"),
        }
    }
}

struct EchoSummarizer;

impl Summarizer for EchoSummarizer {
    fn summarize(&self, record: &Record) -> SummaryOutcome {
        SummaryOutcome::Ready(format!("{} fields", record.values().len()))
    }
}

#[test]
fn set_dataset_lists_players_and_logs() {
    let state = loaded_state();
    assert_eq!(state.load, LoadState::Loaded);
    assert!(state.fetched_at.is_some());
    assert_eq!(state.players(), ["Alex Moreno", "Ben Ortiz"]);
    assert_eq!(state.chart_axes(), vec!["ERA", "K%"]);
    assert!(state.logs.iter().any(|l| l.contains("Sheet loaded: 3 rows x 10 columns")));
    assert!(state.logs.iter().any(|l| l.starts_with("[WARN] Dropped 1 cells")));
}

#[test]
fn sheet_failure_drops_previous_dataset() {
    let mut state = loaded_state();
    apply_delta(&mut state, Delta::SheetFailed("HTTP 403".to_string()));
    assert!(state.dataset.is_none());
    assert!(state.players().is_empty());
    assert_eq!(state.load, LoadState::Failed("HTTP 403".to_string()));
    assert_eq!(
        state.logs.back().map(String::as_str),
        Some("[ERROR] Failed to load data from the sheet: HTTP 403")
    );
}

#[test]
fn summaries_track_pending_then_done() {
    let mut state = loaded_state();
    apply_delta(
        &mut state,
        Delta::SummaryStarted {
            player: "Alex Moreno".to_string(),
        },
    );
    assert_eq!(state.summaries.get("Alex Moreno"), Some(&SummaryState::Pending));

    apply_delta(
        &mut state,
        Delta::SetSummary {
            player: "Alex Moreno".to_string(),
            outcome: SummaryOutcome::MissingApiKey,
        },
    );
    assert_eq!(
        state.summaries.get("Alex Moreno"),
        Some(&SummaryState::Done(SummaryOutcome::MissingApiKey))
    );
    assert_eq!(
        state.logs.back().map(String::as_str),
        Some("[WARN] No OpenAI API key found")
    );
}

#[test]
fn summaries_are_keyed_by_stored_name() {
    let mut state = loaded_state();
    assert_eq!(state.summary_key("  alex MORENO "), Some("Alex Moreno".to_string()));
    assert_eq!(state.summary_key("Alex Moreno"), Some("Alex Moreno".to_string()));
    assert_eq!(state.summary_key("Nobody"), None);

    let (player, _) = state.summary_target("alex moreno").expect("record");
    apply_delta(
        &mut state,
        Delta::SetSummary {
            player,
            outcome: SummaryOutcome::Ready("steady".to_string()),
        },
    );
    let done = SummaryState::Done(SummaryOutcome::Ready("steady".to_string()));
    assert_eq!(state.summary_for("Alex Moreno"), Some(&done));
    assert_eq!(state.summary_for("alex moreno"), Some(&done));
    assert_eq!(state.summaries.len(), 1);
}

#[test]
fn reload_clears_summaries() {
    let mut state = loaded_state();
    apply_delta(
        &mut state,
        Delta::SetSummary {
            player: "Alex Moreno".to_string(),
            outcome: SummaryOutcome::Ready("ok".to_string()),
        },
    );
    let (dataset, report) = Dataset::from_raw(staff_sheet());
    apply_delta(&mut state, Delta::SetDataset { dataset, report });
    assert!(state.summaries.is_empty());
}

#[test]
fn log_ring_is_bounded() {
    let mut state = AppState::new();
    for idx in 0..250 {
        apply_delta(&mut state, Delta::Log(format!("[INFO] line {idx}")));
    }
    assert_eq!(state.logs.len(), 200);
    assert_eq!(state.logs.front().map(String::as_str), Some("[INFO] line 50"));
}

#[test]
fn fetch_command_reports_dataset() {
    let (tx, rx) = mpsc::channel();
    let source = FixedSheet(Some(staff_sheet()));
    assert!(handle_command(&source, &EchoSummarizer, &tx, ProviderCommand::FetchSheet));
    drop(tx);

    let deltas: Vec<Delta> = rx.iter().collect();
    assert!(matches!(deltas[0], Delta::SheetLoading));
    assert!(matches!(&deltas[1], Delta::Log(line) if line.contains("fixture sheet")));
    match &deltas[2] {
        Delta::SetDataset { dataset, report } => {
            assert_eq!(dataset.len(), 3);
            assert_eq!(
                *report,
                BuildReport {
                    rows: 3,
                    columns: 10,
                    padded_rows: 1,
                    truncated_rows: 1,
                    truncated_cells: 1,
                }
            );
        }
        other => panic!("unexpected delta: {other:?}"),
    }
}

#[test]
fn fetch_command_reports_failure() {
    let (tx, rx) = mpsc::channel();
    let source = FixedSheet(None);
    assert!(handle_command(&source, &EchoSummarizer, &tx, ProviderCommand::FetchSheet));
    drop(tx);

    let last = rx.iter().last();
    assert!(matches!(last, Some(Delta::SheetFailed(msg)) if msg.contains("sheet unreachable")));
}

#[test]
fn summarize_command_reports_outcome() {
    let state = loaded_state();
    let (player, record) = state.summary_target("alex moreno").expect("record");
    let (tx, rx) = mpsc::channel();
    let cmd = ProviderCommand::Summarize { player, record };
    assert!(handle_command(&FixedSheet(None), &EchoSummarizer, &tx, cmd));
    drop(tx);

    let deltas: Vec<Delta> = rx.iter().collect();
    assert!(matches!(&deltas[0], Delta::SummaryStarted { player } if player == "Alex Moreno"));
    assert!(matches!(
        &deltas[1],
        Delta::SetSummary { outcome: SummaryOutcome::Ready(text), .. } if text == "10 fields"
    ));
}

#[test]
fn closed_channel_stops_the_worker() {
    let (tx, rx) = mpsc::channel();
    drop(rx);
    let source = FixedSheet(Some(staff_sheet()));
    assert!(!handle_command(&source, &EchoSummarizer, &tx, ProviderCommand::FetchSheet));
}

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Local};

use crate::charts::ChartKind;
use crate::classify::ClassificationPolicy;
use crate::query::{PlayerLookup, find_player};
use crate::record::{BuildReport, Dataset, DatasetError, Record};
use crate::summary::SummaryOutcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Overview,
    Charts,
    Player { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartFocus {
    XAxis,
    YAxis,
    Kind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryState {
    Pending,
    Done(SummaryOutcome),
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub policy: ClassificationPolicy,
    pub dataset: Option<Dataset>,
    pub load: LoadState,
    pub fetched_at: Option<DateTime<Local>>,
    pub season: String,
    pub player_names: Result<Vec<String>, DatasetError>,
    pub picker_open: bool,
    pub picker_selected: usize,
    pub table_row: usize,
    pub table_col: usize,
    pub chart_x: usize,
    pub chart_y: usize,
    pub chart_kind: ChartKind,
    pub chart_focus: ChartFocus,
    pub chart_generated: bool,
    pub summaries: HashMap<String, SummaryState>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        let season = std::env::var("DASH_SEASON")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| Local::now().format("%Y").to_string());
        Self {
            screen: Screen::Overview,
            policy: ClassificationPolicy::default(),
            dataset: None,
            load: LoadState::Idle,
            fetched_at: None,
            season,
            player_names: Ok(Vec::new()),
            picker_open: false,
            picker_selected: 0,
            table_row: 0,
            table_col: 0,
            chart_x: 0,
            chart_y: 1,
            chart_kind: ChartKind::Scatter,
            chart_focus: ChartFocus::XAxis,
            chart_generated: false,
            summaries: HashMap::new(),
            logs: VecDeque::with_capacity(200),
            help_overlay: false,
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn players(&self) -> &[String] {
        match &self.player_names {
            Ok(names) => names,
            Err(_) => &[],
        }
    }

    pub fn chart_axes(&self) -> Vec<&str> {
        self.dataset
            .as_ref()
            .map(|d| d.metric_columns())
            .unwrap_or_default()
    }

    pub fn chart_x_label(&self) -> Option<&str> {
        self.chart_axes().get(self.chart_x).copied()
    }

    pub fn chart_y_label(&self) -> Option<&str> {
        self.chart_axes().get(self.chart_y).copied()
    }

    /// Cycles whichever chart control has focus. Changing a control hides the last chart
    /// until it is generated again.
    pub fn cycle_chart_control(&mut self, forward: bool) {
        let axes = self.chart_axes().len();
        match self.chart_focus {
            ChartFocus::XAxis => self.chart_x = step(self.chart_x, axes, forward),
            ChartFocus::YAxis => self.chart_y = step(self.chart_y, axes, forward),
            ChartFocus::Kind => self.chart_kind = self.chart_kind.next(),
        }
        self.chart_generated = false;
    }

    pub fn cycle_chart_focus(&mut self) {
        self.chart_focus = match self.chart_focus {
            ChartFocus::XAxis => ChartFocus::YAxis,
            ChartFocus::YAxis => ChartFocus::Kind,
            ChartFocus::Kind => ChartFocus::XAxis,
        };
    }

    pub fn scroll_table(&mut self, rows: isize, cols: isize) {
        let Some(dataset) = &self.dataset else {
            return;
        };
        let max_row = dataset.len().saturating_sub(1);
        let max_col = dataset.header().len().saturating_sub(1);
        self.table_row = self.table_row.saturating_add_signed(rows).min(max_row);
        self.table_col = self.table_col.saturating_add_signed(cols).min(max_col);
    }

    pub fn picker_next(&mut self) {
        let len = self.players().len();
        if len > 0 {
            self.picker_selected = (self.picker_selected + 1) % len;
        }
    }

    pub fn picker_prev(&mut self) {
        let len = self.players().len();
        if len > 0 {
            self.picker_selected = (self.picker_selected + len - 1) % len;
        }
    }

    pub fn picked_player(&self) -> Option<&str> {
        self.players().get(self.picker_selected).map(String::as_str)
    }

    pub fn current_player(&self) -> Option<Result<PlayerLookup<'_>, DatasetError>> {
        let Screen::Player { name } = &self.screen else {
            return None;
        };
        let dataset = self.dataset.as_ref()?;
        Some(find_player(dataset, name))
    }

    /// Summaries are keyed by the stored player name, so every spelling that resolves
    /// to the same row shares one entry.
    pub fn summary_key(&self, requested: &str) -> Option<String> {
        self.resolve_player(requested).map(|(key, _)| key)
    }

    pub fn summary_for(&self, requested: &str) -> Option<&SummaryState> {
        self.summaries.get(&self.summary_key(requested)?)
    }

    /// Cache key plus a record clone for hand-off to the worker.
    pub fn summary_target(&self, requested: &str) -> Option<(String, Record)> {
        self.resolve_player(requested)
            .map(|(key, record)| (key, record.clone()))
    }

    fn resolve_player(&self, requested: &str) -> Option<(String, &Record)> {
        let dataset = self.dataset.as_ref()?;
        let Ok(PlayerLookup::Found { record, .. }) = find_player(dataset, requested) else {
            return None;
        };
        let stored = dataset
            .identity_column()
            .ok()
            .and_then(|col| record.get(col))
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(requested.trim());
        Some((stored.to_string(), record))
    }

    fn install_dataset(&mut self, dataset: Dataset, report: BuildReport) {
        self.push_log(format!(
            "[INFO] Sheet loaded: {} rows x {} columns",
            report.rows, report.columns
        ));
        if report.padded_rows > 0 {
            self.push_log(format!("[INFO] Padded {} short rows", report.padded_rows));
        }
        if report.truncated_cells > 0 {
            self.push_log(format!(
                "[WARN] Dropped {} cells beyond the header from {} rows",
                report.truncated_cells, report.truncated_rows
            ));
        }

        self.player_names = dataset.player_names();
        let listed = match &self.player_names {
            Ok(names) => format!("[INFO] {} players listed", names.len()),
            Err(err) => format!("[WARN] Player pages unavailable: {err}"),
        };
        self.push_log(listed);

        let axes = dataset.metric_columns().len();
        self.chart_x = self.chart_x.min(axes.saturating_sub(1));
        self.chart_y = if axes > 1 {
            self.chart_y.min(axes - 1)
        } else {
            0
        };
        self.picker_selected = self
            .picker_selected
            .min(self.players().len().saturating_sub(1));
        self.table_row = self.table_row.min(dataset.len().saturating_sub(1));
        self.table_col = self.table_col.min(dataset.header().len().saturating_sub(1));
        self.chart_generated = false;
        self.summaries.clear();
        self.dataset = Some(dataset);
        self.load = LoadState::Loaded;
        self.fetched_at = Some(Local::now());
    }
}

fn step(current: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    }
}

#[derive(Debug, Clone)]
pub enum Delta {
    SheetLoading,
    SetDataset {
        dataset: Dataset,
        report: BuildReport,
    },
    SheetFailed(String),
    SummaryStarted {
        player: String,
    },
    SetSummary {
        player: String,
        outcome: SummaryOutcome,
    },
    Log(String),
}

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    FetchSheet,
    Summarize { player: String, record: Record },
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SheetLoading => {
            state.load = LoadState::Loading;
        }
        Delta::SetDataset { dataset, report } => state.install_dataset(dataset, report),
        Delta::SheetFailed(err) => {
            // The previous dataset is dropped: nothing stale is shown as live.
            state.dataset = None;
            state.player_names = Ok(Vec::new());
            state.summaries.clear();
            state.chart_generated = false;
            state.push_log(format!("[ERROR] Failed to load data from the sheet: {err}"));
            state.load = LoadState::Failed(err);
        }
        Delta::SummaryStarted { player } => {
            state.summaries.insert(player, SummaryState::Pending);
        }
        Delta::SetSummary { player, outcome } => {
            match &outcome {
                SummaryOutcome::Ready(_) => {
                    state.push_log(format!("[INFO] AI summary generated for {player}"))
                }
                SummaryOutcome::Failed(err) => {
                    state.push_log(format!("[WARN] AI summary failed for {player}: {err}"))
                }
                SummaryOutcome::MissingApiKey => {
                    state.push_log("[WARN] No OpenAI API key found")
                }
            }
            state.summaries.insert(player, SummaryState::Done(outcome));
        }
        Delta::Log(line) => state.push_log(line),
    }
}

pub fn screen_label(screen: &Screen) -> &'static str {
    match screen {
        Screen::Overview => "TEAM OVERVIEW",
        Screen::Charts => "INTERACTIVE CHARTS",
        Screen::Player { .. } => "PLAYER PAGE",
    }
}

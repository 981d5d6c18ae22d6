use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Cell, Chart, Clear, Dataset as ChartDataset,
    GraphType, List, ListItem, ListState, Paragraph, Row, Table, Wrap,
};

use dugout_terminal::charts::{self, ChartKind, ChartSeries, chart_kind_label};
use dugout_terminal::classify::{Tier, classify, tier_label};
use dugout_terminal::provider::spawn_provider;
use dugout_terminal::query::PlayerLookup;
use dugout_terminal::record::{Dataset, Record};
use dugout_terminal::sheet::is_placeholder_label;
use dugout_terminal::sheets_fetch::SheetConfig;
use dugout_terminal::state::{
    self, AppState, ChartFocus, LoadState, ProviderCommand, Screen, SummaryState, apply_delta,
    screen_label,
};
use dugout_terminal::summary::{OpenAiSummarizer, SummaryConfig, SummaryOutcome};

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
}

impl App {
    fn new(cmd_tx: Option<mpsc::Sender<ProviderCommand>>, player: Option<String>) -> Self {
        let mut state = AppState::new();
        if let Some(name) = player {
            state.screen = Screen::Player { name };
        }
        Self {
            state,
            should_quit: false,
            cmd_tx,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.picker_open {
            self.on_picker_key(key);
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.state.screen = Screen::Overview,
            KeyCode::Char('2') => self.state.screen = Screen::Charts,
            KeyCode::Char('p') | KeyCode::Char('P') => self.open_picker(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.request_sheet(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => match self.state.screen.clone() {
                Screen::Overview => self.on_overview_key(key),
                Screen::Charts => self.on_charts_key(key),
                Screen::Player { name } => self.on_player_key(key, &name),
            },
        }
    }

    fn on_overview_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.scroll_table(1, 0),
            KeyCode::Char('k') | KeyCode::Up => self.state.scroll_table(-1, 0),
            KeyCode::Char('l') | KeyCode::Right => self.state.scroll_table(0, 1),
            KeyCode::Char('h') | KeyCode::Left => self.state.scroll_table(0, -1),
            KeyCode::PageDown => self.state.scroll_table(10, 0),
            KeyCode::PageUp => self.state.scroll_table(-10, 0),
            _ => {}
        }
    }

    fn on_charts_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => self.state.cycle_chart_focus(),
            KeyCode::Char('l') | KeyCode::Right => self.state.cycle_chart_control(true),
            KeyCode::Char('h') | KeyCode::Left => self.state.cycle_chart_control(false),
            KeyCode::Enter | KeyCode::Char('g') => {
                if self.state.dataset.is_some() {
                    self.state.chart_generated = true;
                }
            }
            _ => {}
        }
    }

    fn on_player_key(&mut self, key: KeyEvent, name: &str) {
        match key.code {
            KeyCode::Char('b') | KeyCode::Esc => self.state.screen = Screen::Overview,
            KeyCode::Char('g') => self.request_summary(name),
            _ => {}
        }
    }

    fn on_picker_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('p') => self.state.picker_open = false,
            KeyCode::Char('j') | KeyCode::Down => self.state.picker_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.picker_prev(),
            KeyCode::Enter => {
                self.state.picker_open = false;
                if let Some(name) = self.state.picked_player().map(str::to_string) {
                    self.state
                        .push_log(format!("[INFO] Opening player page for {name}"));
                    self.state.screen = Screen::Player { name };
                }
            }
            _ => {}
        }
    }

    fn open_picker(&mut self) {
        match &self.state.player_names {
            Ok(names) if !names.is_empty() => self.state.picker_open = true,
            Ok(_) => self.state.push_log("[INFO] No players to pick from"),
            Err(err) => {
                let line = format!("[WARN] Player pages unavailable: {err}");
                self.state.push_log(line);
            }
        }
    }

    fn request_sheet(&mut self) {
        let Some(tx) = &self.cmd_tx else {
            self.state.push_log("[INFO] Sheet fetch unavailable");
            return;
        };
        if tx.send(ProviderCommand::FetchSheet).is_err() {
            self.state.push_log("[WARN] Sheet request failed");
        } else {
            self.state.load = LoadState::Loading;
        }
    }

    fn request_summary(&mut self, name: &str) {
        if let Some((player, record)) = self.state.summary_target(name) {
            self.send_summary(player, record);
        }
    }

    fn send_summary(&mut self, player: String, record: Record) {
        let Some(tx) = &self.cmd_tx else {
            self.state.push_log("[INFO] Summary generation unavailable");
            return;
        };
        let cmd = ProviderCommand::Summarize {
            player: player.clone(),
            record,
        };
        if tx.send(cmd).is_err() {
            self.state.push_log("[WARN] Summary request failed");
        } else {
            self.state.summaries.insert(player, SummaryState::Pending);
        }
    }

    // Player pages ask for a summary once per loaded dataset.
    fn maybe_request_summary(&mut self) {
        let Screen::Player { name } = &self.state.screen else {
            return;
        };
        if self.state.summary_for(name).is_some() {
            return;
        }
        if let Some((player, record)) = self.state.summary_target(name) {
            self.send_summary(player, record);
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let player = parse_player_arg();
    let source = SheetConfig::from_env().into_source();
    let summarizer = OpenAiSummarizer::new(SummaryConfig::from_env());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    spawn_provider(source, summarizer, tx, cmd_rx);

    let mut app = App::new(Some(cmd_tx), player);
    app.request_sheet();
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn parse_player_arg() -> Option<String> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    for (idx, arg) in args.iter().enumerate() {
        if let Some(name) = arg.strip_prefix("--player=") {
            if !name.trim().is_empty() {
                return Some(name.to_string());
            }
        }
        if arg == "--player" {
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

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<state::Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        app.maybe_request_summary();

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let state = &app.state;
    match (&state.load, &state.dataset) {
        (LoadState::Failed(err), _) => render_load_failed(frame, chunks[1], err),
        (_, None) => {
            let waiting = Paragraph::new("Loading baseball stats from the sheet...")
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(waiting, chunks[1]);
        }
        (_, Some(dataset)) => match &state.screen {
            Screen::Overview => render_overview(frame, chunks[1], state, dataset),
            Screen::Charts => render_charts(frame, chunks[1], state, dataset),
            Screen::Player { name } => render_player(frame, chunks[1], state, name),
        },
    }

    let console = Paragraph::new(console_text(state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(state));
    frame.render_widget(footer, chunks[3]);

    if state.picker_open {
        render_picker(frame, frame.size(), state);
    }
    if state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let line1 = format!("  ⚾  DUGOUT | {}", screen_label(&state.screen));
    let updated = match (&state.load, state.fetched_at) {
        (LoadState::Loading, _) => "refreshing...".to_string(),
        (_, Some(at)) => at.format("%Y-%m-%d %H:%M:%S").to_string(),
        (_, None) => "-".to_string(),
    };
    let (rows, cols) = state
        .dataset
        .as_ref()
        .map(|d| (d.len(), d.header().len()))
        .unwrap_or((0, 0));
    let line2 = format!(
        "  Total Players: {rows} | Data Columns: {cols} | Last Updated: {updated} | Season: {}",
        state.season
    );
    format!("{line1}\n{line2}")
}

fn footer_text(state: &AppState) -> String {
    match state.screen {
        Screen::Overview => {
            "1 Overview | 2 Charts | p Players | h/j/k/l Scroll | r Refresh | ? Help | q Quit"
                .to_string()
        }
        Screen::Charts => {
            "1 Overview | 2 Charts | Tab Control | ←/→ Change | Enter Generate | r Refresh | q Quit"
                .to_string()
        }
        Screen::Player { .. } => {
            "b/Esc Back | g Regenerate summary | p Players | r Refresh | ? Help | q Quit".to_string()
        }
    }
}

fn tier_style(tier: Tier) -> Style {
    match tier {
        Tier::Excellent => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        Tier::Good => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        Tier::Poor => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        Tier::Neutral => Style::default().fg(Color::LightBlue),
        Tier::NonNumeric => Style::default().fg(Color::Gray),
    }
}

fn cell_style(state: &AppState, label: &str, value: &str) -> Style {
    if is_placeholder_label(label) {
        return Style::default();
    }
    tier_style(classify(&state.policy, label, value))
}

fn render_load_failed(frame: &mut Frame, area: Rect, err: &str) {
    let text = vec![
        Line::styled(
            "Failed to load data from the sheet.",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::raw(err.to_string()),
        Line::raw(""),
        Line::styled(
            "Press r to retry.",
            Style::default().fg(Color::DarkGray),
        ),
    ];
    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("No dataset").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_overview(frame: &mut Frame, area: Rect, state: &AppState, dataset: &Dataset) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let block = Block::default().title("Team Statistics").borders(Borders::ALL);
    let inner = block.inner(sections[0]);
    frame.render_widget(block, sections[0]);

    let columns = visible_columns(dataset, state.table_col, inner.width);
    if columns.is_empty() {
        return;
    }
    let labels = dataset.header().labels();
    let widths = columns
        .iter()
        .map(|&idx| Constraint::Length(column_width(&labels[idx])))
        .collect::<Vec<_>>();

    let header = Row::new(
        columns
            .iter()
            .map(|&idx| Cell::from(labels[idx].clone()))
            .collect::<Vec<_>>(),
    )
    .style(Style::default().add_modifier(Modifier::BOLD));

    let visible_rows = inner.height.saturating_sub(1) as usize;
    let rows = dataset
        .records()
        .iter()
        .skip(state.table_row)
        .take(visible_rows)
        .map(|record| {
            let values = record.values();
            Row::new(
                columns
                    .iter()
                    .map(|&idx| {
                        let value = &values[idx];
                        Cell::from(value.clone()).style(cell_style(state, &labels[idx], value))
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect::<Vec<_>>();

    let table = Table::new(rows, widths).header(header).column_spacing(1);
    frame.render_widget(table, inner);

    frame.render_widget(Paragraph::new(legend_line()), sections[1]);
}

/// Identity column pinned first, then as many columns from `offset` as fit.
fn visible_columns(dataset: &Dataset, offset: usize, width: u16) -> Vec<usize> {
    let labels = dataset.header().labels();
    let pinned = dataset
        .identity_column()
        .ok()
        .and_then(|label| dataset.header().position(label));

    let mut used = 0u16;
    let mut out = Vec::new();
    if let Some(pos) = pinned {
        used += column_width(&labels[pos]) + 1;
        out.push(pos);
    }
    for idx in offset..labels.len() {
        if Some(idx) == pinned {
            continue;
        }
        let w = column_width(&labels[idx]) + 1;
        if used + w > width && !out.is_empty() {
            break;
        }
        used += w;
        out.push(idx);
    }
    out
}

fn column_width(label: &str) -> u16 {
    (label.chars().count() as u16).clamp(6, 14)
}

fn legend_line() -> Line<'static> {
    let tiers = [
        Tier::Excellent,
        Tier::Good,
        Tier::Poor,
        Tier::Neutral,
        Tier::NonNumeric,
    ];
    let mut spans = vec![Span::raw(" Legend: ")];
    for tier in tiers {
        spans.push(Span::styled(format!("■ {}", tier_label(tier)), tier_style(tier)));
        spans.push(Span::raw("  "));
    }
    Line::from(spans)
}

fn render_charts(frame: &mut Frame, area: Rect, state: &AppState, dataset: &Dataset) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(2),
        ])
        .split(area);

    let (Some(x_label), Some(y_label)) = (state.chart_x_label(), state.chart_y_label()) else {
        let empty = Paragraph::new("No metric columns to chart")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    };

    let control = |focus: ChartFocus, name: &str, value: &str| {
        let style = if state.chart_focus == focus {
            Style::default().fg(Color::Black).bg(Color::Red)
        } else {
            Style::default()
        };
        vec![
            Span::raw(format!(" {name}: ")),
            Span::styled(format!(" {value} "), style),
            Span::raw("  "),
        ]
    };
    let mut spans = control(ChartFocus::XAxis, "X Axis", x_label);
    spans.extend(control(ChartFocus::YAxis, "Y Axis", y_label));
    spans.extend(control(
        ChartFocus::Kind,
        "Chart Type",
        chart_kind_label(state.chart_kind),
    ));
    let controls = Paragraph::new(Line::from(spans))
        .block(Block::default().title("Chart Controls").borders(Borders::ALL));
    frame.render_widget(controls, sections[0]);

    if !state.chart_generated {
        let hint = Paragraph::new("Press Enter to generate the chart")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(hint, sections[1]);
        return;
    }

    let series = charts::build_series(dataset, x_label, y_label, state.chart_kind);
    if series.points.is_empty() {
        let empty = Paragraph::new(
            "No numeric values for these columns. Try selecting different columns.",
        )
        .style(Style::default().fg(Color::Red))
        .block(Block::default().title(series.title()).borders(Borders::ALL));
        frame.render_widget(empty, sections[1]);
        return;
    }

    match series.kind {
        ChartKind::Bar => render_bar_chart(frame, sections[1], &series),
        ChartKind::Scatter | ChartKind::Line => render_xy_chart(frame, sections[1], &series),
    }
    frame.render_widget(Paragraph::new(insights_text(&series)), sections[2]);
}

fn render_xy_chart(frame: &mut Frame, area: Rect, series: &ChartSeries) {
    let data = series
        .points
        .iter()
        .map(|p| (p.x, p.y))
        .collect::<Vec<_>>();
    let graph_type = match series.kind {
        ChartKind::Line => GraphType::Line,
        _ => GraphType::Scatter,
    };
    let dataset = ChartDataset::default()
        .name(series.y_label.clone())
        .marker(Marker::Braille)
        .graph_type(graph_type)
        .style(Style::default().fg(Color::Red))
        .data(&data);

    let x_bounds = series.x_bounds();
    let y_bounds = series.y_bounds();
    let chart = Chart::new(vec![dataset])
        .block(Block::default().title(series.title()).borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .title(series.x_label.clone())
                .style(Style::default().fg(Color::Gray))
                .bounds(x_bounds)
                .labels(axis_labels(x_bounds)),
        )
        .y_axis(
            Axis::default()
                .title(series.y_label.clone())
                .style(Style::default().fg(Color::Gray))
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds)),
        );
    frame.render_widget(chart, area);
}

fn axis_labels(bounds: [f64; 2]) -> Vec<Span<'static>> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    vec![
        Span::raw(format!("{:.1}", bounds[0])),
        Span::raw(format!("{mid:.1}")),
        Span::raw(format!("{:.1}", bounds[1])),
    ]
}

fn render_bar_chart(frame: &mut Frame, area: Rect, series: &ChartSeries) {
    // Bars take u64 heights; scale so two decimals survive.
    let bars = series
        .points
        .iter()
        .map(|p| {
            Bar::default()
                .value((p.y.max(0.0) * 100.0).round() as u64)
                .text_value(format!("{:.2}", p.y))
                .label(Line::from(short_name(&p.name)))
                .style(Style::default().fg(Color::Red))
        })
        .collect::<Vec<_>>();

    let inner_width = area.width.saturating_sub(2) as usize;
    let count = bars.len().max(1);
    let bar_width = ((inner_width / count).saturating_sub(1)).clamp(3, 12) as u16;

    let chart = BarChart::default()
        .block(Block::default().title(series.title()).borders(Borders::ALL))
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1);
    frame.render_widget(chart, area);
}

fn short_name(name: &str) -> String {
    name.split_whitespace()
        .last()
        .unwrap_or(name)
        .chars()
        .take(10)
        .collect()
}

fn insights_text(series: &ChartSeries) -> Text<'static> {
    let mut lines = Vec::new();
    if let Some(high) = &series.highest {
        lines.push(Line::styled(
            format!(
                " Highest {}: {} ({:.2})",
                series.y_label, high.name, high.value
            ),
            Style::default().fg(Color::Green),
        ));
    }
    if let Some(low) = &series.lowest {
        lines.push(Line::styled(
            format!(
                " Lowest {}: {} ({:.2})",
                series.y_label, low.name, low.value
            ),
            Style::default().fg(Color::LightBlue),
        ));
    }
    Text::from(lines)
}

fn render_player(frame: &mut Frame, area: Rect, state: &AppState, name: &str) {
    let record = match state.current_player() {
        Some(Ok(PlayerLookup::Found { record, .. })) => record,
        Some(Ok(PlayerLookup::NotFound)) | None => {
            let text = vec![
                Line::styled(
                    "Player not found.",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Line::raw(""),
                Line::styled(
                    format!(
                        "Requested '{}' (normalized '{}'); {} players listed.",
                        name,
                        name.trim().to_lowercase(),
                        state.players().len()
                    ),
                    Style::default().fg(Color::DarkGray),
                ),
                Line::raw("Press p to pick a player or b to go back."),
            ];
            let paragraph = Paragraph::new(text)
                .block(Block::default().title("Player").borders(Borders::ALL));
            frame.render_widget(paragraph, area);
            return;
        }
        Some(Err(err)) => {
            let paragraph = Paragraph::new(format!("Player pages unavailable: {err}"))
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().title("Player").borders(Borders::ALL));
            frame.render_widget(paragraph, area);
            return;
        }
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let stats = record
        .fields()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(
                    format!("{label:<12} "),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(value.to_string(), cell_style(state, label, value)),
            ])
        })
        .collect::<Vec<_>>();
    let stats = Paragraph::new(stats).block(
        Block::default()
            .title(format!("Player: {}", name.trim()))
            .borders(Borders::ALL),
    );
    frame.render_widget(stats, columns[0]);

    let summary = summary_text(state.summary_for(name));
    let summary = Paragraph::new(summary)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("AI Summary").borders(Borders::ALL));
    frame.render_widget(summary, columns[1]);
}

fn summary_text(summary: Option<&SummaryState>) -> Text<'static> {
    match summary {
        None | Some(SummaryState::Pending) => Text::styled(
            "Generating AI summary...",
            Style::default().fg(Color::DarkGray),
        ),
        Some(SummaryState::Done(SummaryOutcome::Ready(text))) => Text::raw(text.clone()),
        Some(SummaryState::Done(SummaryOutcome::Failed(_))) => Text::from(vec![
            Line::styled(
                "AI summary could not be generated. Please check your API key, network connection, or OpenAI account access.",
                Style::default().fg(Color::Red),
            ),
            Line::raw(""),
            Line::styled(
                "Details are in the console. Press g to retry.",
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Some(SummaryState::Done(SummaryOutcome::MissingApiKey)) => Text::from(vec![
            Line::styled(
                "No OpenAI API key found. Set OPENAI_API_KEY in your .env file.",
                Style::default().fg(Color::Yellow),
            ),
            Line::raw(""),
            Line::raw("AI summary cannot be generated without a valid API key."),
        ]),
    }
}

fn render_picker(frame: &mut Frame, area: Rect, state: &AppState) {
    let popup_area = centered_rect(40, 60, area);
    frame.render_widget(Clear, popup_area);

    let items = state
        .players()
        .iter()
        .map(|name| ListItem::new(name.clone()))
        .collect::<Vec<_>>();
    let list = List::new(items)
        .block(Block::default().title("Player Pages").borders(Borders::ALL))
        .highlight_style(Style::default().fg(Color::White).bg(Color::Red))
        .highlight_symbol("> ");
    let mut list_state = ListState::default();
    list_state.select(Some(state.picker_selected));
    frame.render_stateful_widget(list, popup_area, &mut list_state);
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Dugout Terminal - Help",
        "",
        "Global:",
        "  1            Team overview",
        "  2            Interactive charts",
        "  p            Player picker (Enter opens page)",
        "  r            Refresh data",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Overview:",
        "  h/j/k/l      Scroll table",
        "",
        "Charts:",
        "  Tab          Next control",
        "  ←/→          Change axis / chart type",
        "  Enter        Generate chart",
        "",
        "Player page:",
        "  g            Regenerate AI summary",
        "  b / Esc      Back",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

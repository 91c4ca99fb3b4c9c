//! Application state — single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels.
//! The record history is empty at startup, populated by the first
//! successful fetch and replaced wholesale by every later one.

use std::sync::mpsc::{Receiver, Sender};
use std::time::{Duration, Instant};

use chrono::{DateTime, Local, NaiveDate};
use tracing::{info, warn};

use ai4vt_core::domain::{DailyRecord, Summary};
use ai4vt_core::pagination::newest_first;
use ai4vt_core::{DashboardConfig, DerivedMetrics, MarketStatus, Paginator, TimeRange};

use crate::worker::{SummaryTarget, WorkerCommand, WorkerResponse};

/// How often the market clock is re-evaluated.
pub const MARKET_CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// Headline card text when no summary is available.
pub const HEADLINE_SUMMARY_FALLBACK: &str = "No major news available today.";

/// Drawer text when the summary request failed.
pub const SUMMARY_ERROR: &str = "Error loading summary.";

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Overview,
    Trends,
    History,
    Help,
}

impl Panel {
    pub const COUNT: usize = 4;

    pub fn index(self) -> usize {
        match self {
            Panel::Overview => 0,
            Panel::Trends => 1,
            Panel::History => 2,
            Panel::Help => 3,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Overview),
            1 => Some(Panel::Trends),
            2 => Some(Panel::History),
            3 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Overview => "Overview",
            Panel::Trends => "Trends",
            Panel::History => "History",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % Self::COUNT).unwrap_or(Panel::Overview)
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + Self::COUNT - 1) % Self::COUNT).unwrap_or(Panel::Overview)
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
}

/// Which trend chart the range keys act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartFocus {
    Line,
    Precision,
}

/// Trends panel state — one time range per chart.
#[derive(Debug, Clone)]
pub struct TrendsPanelState {
    pub line_range: TimeRange,
    pub precision_range: TimeRange,
    pub focus: ChartFocus,
}

impl TrendsPanelState {
    pub fn new(range: TimeRange) -> Self {
        Self {
            line_range: range,
            precision_range: range,
            focus: ChartFocus::Line,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            ChartFocus::Line => ChartFocus::Precision,
            ChartFocus::Precision => ChartFocus::Line,
        };
    }

    pub fn cycle_range(&mut self, forward: bool) {
        let range = match self.focus {
            ChartFocus::Line => &mut self.line_range,
            ChartFocus::Precision => &mut self.precision_range,
        };
        *range = if forward { range.next() } else { range.prev() };
    }
}

/// History table state.
#[derive(Debug, Clone)]
pub struct HistoryPanelState {
    pub pager: Paginator,
    /// Row within the current page.
    pub cursor: usize,
}

/// Content of the summary drawer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryState {
    Loading,
    Loaded(String),
    Failed(String),
}

impl SummaryState {
    pub fn text(&self) -> &str {
        match self {
            SummaryState::Loading => "Loading...",
            SummaryState::Loaded(s) | SummaryState::Failed(s) => s,
        }
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Summary { date: NaiveDate, state: SummaryState },
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    // Data
    pub history: Vec<DailyRecord>,
    pub metrics: DerivedMetrics,
    pub headline_summary: Option<String>,
    pub fetch_in_flight: bool,
    pub last_updated: Option<DateTime<Local>>,
    pub source_name: String,

    // Panel states
    pub trends: TrendsPanelState,
    pub table: HistoryPanelState,
    pub overlay: Overlay,

    // Clock
    pub market: MarketStatus,
    pub today: NaiveDate,
    market_checked: Instant,
    refresh_interval: Option<Duration>,
    next_refresh: Option<Instant>,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        config: &DashboardConfig,
        source_name: impl Into<String>,
    ) -> Self {
        let now = Instant::now();
        let pager = Paginator::new(config.page_size).unwrap_or_default();
        Self {
            active_panel: Panel::Overview,
            running: true,
            history: Vec::new(),
            metrics: DerivedMetrics::compute(&[]),
            headline_summary: None,
            fetch_in_flight: false,
            last_updated: None,
            source_name: source_name.into(),
            trends: TrendsPanelState::new(config.default_range),
            table: HistoryPanelState { pager, cursor: 0 },
            overlay: Overlay::None,
            market: MarketStatus::now(),
            today: Local::now().date_naive(),
            market_checked: now,
            refresh_interval: config.refresh_interval(),
            next_refresh: None,
            worker_tx,
            worker_rx,
            status_message: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.last_updated.is_some()
    }

    // ─── Requests ───────────────────────────────────────────────────

    /// Ask the worker for the full history. No-op while a fetch is pending.
    pub fn request_results(&mut self) {
        if self.fetch_in_flight {
            return;
        }
        if self.worker_tx.send(WorkerCommand::FetchResults).is_ok() {
            self.fetch_in_flight = true;
            self.set_status("Fetching results...");
        } else {
            warn!("worker channel closed, cannot fetch results");
        }
    }

    /// Open the summary drawer for the highlighted history row.
    pub fn open_selected_summary(&mut self) {
        let Some(date) = self.selected_record().map(|r| r.date) else {
            return;
        };
        self.overlay = Overlay::Summary {
            date,
            state: SummaryState::Loading,
        };
        let cmd = WorkerCommand::FetchSummary {
            date,
            target: SummaryTarget::Drawer,
        };
        if self.worker_tx.send(cmd).is_err() {
            warn!("worker channel closed, cannot fetch summary");
            self.overlay = Overlay::Summary {
                date,
                state: SummaryState::Failed(SUMMARY_ERROR.into()),
            };
        }
    }

    // ─── Responses ──────────────────────────────────────────────────

    pub fn handle_response(&mut self, resp: WorkerResponse) {
        match resp {
            WorkerResponse::ResultsLoaded { records } => self.apply_results(records),
            WorkerResponse::ResultsFailed { error } => {
                // Prior state stays on screen; the failure only goes to the log.
                self.fetch_in_flight = false;
                warn!(%error, "keeping previous results after failed fetch");
                if self.is_loaded() {
                    self.status_message = None;
                } else {
                    self.set_status("Loading...");
                }
            }
            WorkerResponse::SummaryLoaded {
                date,
                target,
                summary,
            } => self.apply_summary(date, target, Ok(summary)),
            WorkerResponse::SummaryFailed {
                date,
                target,
                not_found,
                ..
            } => self.apply_summary(date, target, Err(not_found)),
        }
    }

    /// Replace the history wholesale and recompute everything derived from it.
    pub fn apply_results(&mut self, records: Vec<DailyRecord>) {
        self.fetch_in_flight = false;
        self.history = records;
        self.metrics = DerivedMetrics::compute(&self.history);
        self.last_updated = Some(Local::now());

        let len = self.history.len();
        self.table.pager.clamp(len);
        self.clamp_cursor();

        info!(
            records = len,
            win_rate = self.metrics.win_rate,
            "results applied"
        );
        self.set_status(format!(
            "Loaded {len} records | win rate {}%",
            self.metrics.win_rate
        ));

        self.headline_summary = None;
        if let Some(date) = self.metrics.latest.as_ref().map(|r| r.date) {
            let cmd = WorkerCommand::FetchSummary {
                date,
                target: SummaryTarget::Headline,
            };
            if self.worker_tx.send(cmd).is_err() {
                warn!(%date, "worker channel closed, cannot fetch headline summary");
            }
        }
    }

    /// `Err(not_found)` for a failed fetch.
    fn apply_summary(&mut self, date: NaiveDate, target: SummaryTarget, result: Result<Summary, bool>) {
        match target {
            SummaryTarget::Headline => {
                // Ignore answers for a date that is no longer the latest.
                let latest = self.metrics.latest.as_ref().map(|r| r.date);
                if latest == Some(date) {
                    self.headline_summary = result
                        .ok()
                        .map(|s| s.summary)
                        .filter(|s| !s.trim().is_empty());
                }
            }
            SummaryTarget::Drawer => {
                let Overlay::Summary { date: open, state } = &mut self.overlay else {
                    return;
                };
                if *open != date {
                    return;
                }
                *state = match result {
                    Ok(summary) => SummaryState::Loaded(summary.text_or_fallback().to_string()),
                    Err(true) => SummaryState::Loaded(ai4vt_core::domain::SUMMARY_EMPTY.to_string()),
                    Err(false) => SummaryState::Failed(SUMMARY_ERROR.to_string()),
                };
            }
        }
    }

    pub fn headline_text(&self) -> &str {
        self.headline_summary
            .as_deref()
            .unwrap_or(HEADLINE_SUMMARY_FALLBACK)
    }

    // ─── Clock ──────────────────────────────────────────────────────

    /// Periodic housekeeping: market clock and optional auto-refresh.
    pub fn tick(&mut self, now: Instant) {
        if now.duration_since(self.market_checked) >= MARKET_CHECK_INTERVAL {
            self.market = MarketStatus::now();
            self.today = Local::now().date_naive();
            self.market_checked = now;
        }

        if let Some(interval) = self.refresh_interval {
            match self.next_refresh {
                None => self.next_refresh = Some(now + interval),
                Some(due) if now >= due => {
                    self.next_refresh = Some(now + interval);
                    self.request_results();
                }
                Some(_) => {}
            }
        }
    }

    // ─── History table ──────────────────────────────────────────────

    /// Rows of the current page, newest first.
    pub fn page_rows(&self) -> Vec<&DailyRecord> {
        let rows = newest_first(&self.history);
        self.table.pager.slice(&rows).to_vec()
    }

    pub fn total_pages(&self) -> usize {
        self.table.pager.total_pages(self.history.len())
    }

    pub fn selected_record(&self) -> Option<&DailyRecord> {
        self.page_rows().get(self.table.cursor).copied()
    }

    pub fn next_page(&mut self) {
        self.table.pager.next(self.history.len());
        self.clamp_cursor();
    }

    pub fn prev_page(&mut self) {
        self.table.pager.prev(self.history.len());
        self.clamp_cursor();
    }

    pub fn first_page(&mut self) {
        self.table.pager.go_to(1, self.history.len());
        self.clamp_cursor();
    }

    pub fn last_page(&mut self) {
        let last = self.total_pages();
        self.table.pager.go_to(last, self.history.len());
        self.clamp_cursor();
    }

    pub fn cursor_down(&mut self) {
        let rows = self.table.pager.range(self.history.len()).len();
        if self.table.cursor + 1 < rows {
            self.table.cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.table.cursor = self.table.cursor.saturating_sub(1);
    }

    fn clamp_cursor(&mut self) {
        let rows = self.table.pager.range(self.history.len()).len();
        self.table.cursor = self.table.cursor.min(rows.saturating_sub(1));
    }

    // ─── Status ─────────────────────────────────────────────────────

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}

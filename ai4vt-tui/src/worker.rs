//! Background worker thread — all network I/O runs here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. Each
//! command is a single best-effort attempt; failures come back as
//! responses and the UI decides what to keep.

use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use chrono::NaiveDate;
use tracing::{debug, warn};

use ai4vt_core::api::{ApiError, ResultsSource};
use ai4vt_core::domain::{DailyRecord, Summary};

/// Who asked for a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryTarget {
    /// Headline card on the overview panel (latest date).
    Headline,
    /// Drawer opened from a history row.
    Drawer,
}

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    FetchResults,
    FetchSummary {
        date: NaiveDate,
        target: SummaryTarget,
    },
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug)]
pub enum WorkerResponse {
    ResultsLoaded {
        records: Vec<DailyRecord>,
    },
    ResultsFailed {
        error: String,
    },
    SummaryLoaded {
        date: NaiveDate,
        target: SummaryTarget,
        summary: Summary,
    },
    SummaryFailed {
        date: NaiveDate,
        target: SummaryTarget,
        not_found: bool,
        error: String,
    },
}

/// Spawn the background worker thread owning `source`.
pub fn spawn_worker(
    source: Box<dyn ResultsSource>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("ai4vt-worker".into())
        .spawn(move || worker_loop(source.as_ref(), rx, tx))
}

fn worker_loop(source: &dyn ResultsSource, rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>) {
    debug!(source = source.name(), "worker started");
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(cmd) => {
                let resp = handle_command(source, cmd);
                if tx.send(resp).is_err() {
                    // UI is gone.
                    break;
                }
            }
        }
    }
    debug!("worker stopped");
}

/// Run one command against `source`. `Shutdown` never reaches here.
pub fn handle_command(source: &dyn ResultsSource, cmd: WorkerCommand) -> WorkerResponse {
    match cmd {
        WorkerCommand::FetchResults => match source.fetch_results() {
            Ok(records) => WorkerResponse::ResultsLoaded { records },
            Err(e) => {
                warn!(source = source.name(), error = %e, "results fetch failed");
                WorkerResponse::ResultsFailed {
                    error: e.to_string(),
                }
            }
        },
        WorkerCommand::FetchSummary { date, target } => match source.fetch_summary(date) {
            Ok(summary) => WorkerResponse::SummaryLoaded {
                date,
                target,
                summary,
            },
            Err(e) => {
                warn!(%date, error = %e, "summary fetch failed");
                WorkerResponse::SummaryFailed {
                    date,
                    target,
                    not_found: matches!(e, ApiError::SummaryNotFound { .. }),
                    error: e.to_string(),
                }
            }
        },
        WorkerCommand::Shutdown => WorkerResponse::ResultsFailed {
            error: "worker shutting down".into(),
        },
    }
}

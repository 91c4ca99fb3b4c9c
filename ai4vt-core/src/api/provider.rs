//! Results source trait and structured API error types.
//!
//! The trait abstracts over where records come from (the live prediction
//! API, or the deterministic demo feed) so the presentation layers can swap
//! implementations and tests can mock them.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{DailyRecord, Summary};

/// Errors from either read endpoint.
///
/// Displayable in both CLI and TUI contexts.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network unreachable: {0}")]
    Network(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("no summary found for {date}")]
    SummaryNotFound { date: NaiveDate },

    #[error("response could not be decoded: {0}")]
    Decode(String),

    #[error("invalid API base URL '{0}'")]
    InvalidBaseUrl(String),
}

/// Where the dashboard reads its records from.
pub trait ResultsSource: Send {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Full record history, in whatever order the source returns it.
    fn fetch_results(&self) -> Result<Vec<DailyRecord>, ApiError>;

    /// News digest for one trading day.
    fn fetch_summary(&self, date: NaiveDate) -> Result<Summary, ApiError>;
}

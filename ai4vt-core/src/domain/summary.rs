//! Summary — free-text news digest for one trading day.

use serde::{Deserialize, Serialize};

/// Shown when a summary body is empty.
pub const SUMMARY_EMPTY: &str = "No summary found.";

/// Response body of `GET /summary/{date}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub summary: String,
}

impl Summary {
    /// Summary text, or [`SUMMARY_EMPTY`] when the body is blank.
    pub fn text_or_fallback(&self) -> &str {
        if self.summary.trim().is_empty() {
            SUMMARY_EMPTY
        } else {
            &self.summary
        }
    }
}

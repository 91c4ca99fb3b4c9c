//! AI4VT Core — domain types and derived metrics for the VT-ETF forecast dashboard.
//!
//! This crate holds everything the front ends share:
//! - Daily prediction records and news summaries as served by the API
//! - The results aggregator (win rate, latest/previous, day-over-day deltas)
//! - Direction and value formatting helpers
//! - Chart series (time-range windows, precision bars) and table pagination
//! - NYSE market clock
//! - The blocking HTTP client and a deterministic demo feed
//! - Configuration and logging setup

pub mod api;
pub mod config;
pub mod domain;
pub mod logging;
pub mod market;
pub mod metrics;
pub mod pagination;
pub mod series;

pub use api::{ApiClient, ApiError, ResultsSource, SampleSource};
pub use config::{ConfigError, DashboardConfig};
pub use domain::{DailyRecord, NumericField, Summary, Unit};
pub use market::MarketStatus;
pub use metrics::{DerivedMetrics, Direction};
pub use pagination::Paginator;
pub use series::TimeRange;

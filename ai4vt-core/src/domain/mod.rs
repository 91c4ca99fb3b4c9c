//! Domain types returned by the prediction API.

pub mod record;
pub mod summary;

pub use record::{DailyRecord, NumericField, Unit, Volatility, HEADLINE_FALLBACK, IMPROVEMENT_FALLBACK};
pub use summary::{Summary, SUMMARY_EMPTY};

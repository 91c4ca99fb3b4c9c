//! Derived display metrics — pure functions over the record history.

pub mod aggregate;
pub mod direction;

pub use aggregate::{chronological, delta_between, win_rate, DerivedMetrics};
pub use direction::{format_delta, format_value, Direction, UNAVAILABLE};

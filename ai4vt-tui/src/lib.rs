//! AI4VT TUI — terminal dashboard for the VT-ETF forecast feed.
//!
//! Panels:
//! 1. Overview — KPI cards with day-over-day badges, headline summary
//! 2. Trends — real vs forecast line chart, precision bar chart
//! 3. History — paginated record table with a summary drawer
//! 4. Help — keyboard shortcuts

pub mod app;
pub mod input;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::{AppState, Panel};
pub use input::handle_key;

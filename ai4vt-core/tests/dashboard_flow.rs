//! End-to-end flow over a `ResultsSource`: fetch, aggregate, window, paginate.

use std::cell::Cell;

use ai4vt_core::api::{parse_results, ApiError, ResultsSource, SampleSource};
use ai4vt_core::domain::{DailyRecord, Summary};
use ai4vt_core::metrics::{format_delta, Direction};
use ai4vt_core::pagination::{newest_first, Paginator};
use ai4vt_core::series::{precision_bars, LineSeries, TimeRange};
use ai4vt_core::{DerivedMetrics, NumericField};
use chrono::NaiveDate;

/// Serves a fixed JSON body and counts calls.
struct FixedSource {
    body: &'static str,
    calls: Cell<usize>,
}

impl ResultsSource for FixedSource {
    fn name(&self) -> &str {
        "fixed"
    }

    fn fetch_results(&self) -> Result<Vec<DailyRecord>, ApiError> {
        self.calls.set(self.calls.get() + 1);
        parse_results(self.body)
    }

    fn fetch_summary(&self, date: NaiveDate) -> Result<Summary, ApiError> {
        Err(ApiError::SummaryNotFound { date })
    }
}

const THREE_DAYS: &str = r#"[
    {"date":"2025-01-01","correct":true,"average_pct":0.8,"real_move_pct":0.5},
    {"date":"2025-01-02","correct":false,"average_pct":1.5,"real_move_pct":-0.3},
    {"date":"2025-01-03","correct":true,"average_pct":-0.5,"real_move_pct":-0.9,"headline":"Stocks dip"}
]"#;

#[test]
fn three_day_feed() {
    let source = FixedSource {
        body: THREE_DAYS,
        calls: Cell::new(0),
    };
    let history = source.fetch_results().unwrap();
    let m = DerivedMetrics::compute(&history);

    assert_eq!(m.win_rate, 67);
    assert_eq!(m.delta(NumericField::AveragePct), Some(-2.0));
    assert_eq!(
        format_delta(m.delta(NumericField::AveragePct), NumericField::AveragePct.unit()),
        "-2.00%"
    );
    assert_eq!(Direction::of(m.delta(NumericField::AveragePct)), Direction::Down);
    assert_eq!(m.latest.as_ref().unwrap().headline_or_fallback(), "Stocks dip");
    assert_eq!(m.previous.as_ref().unwrap().headline_or_fallback(), "No headline available");
    assert_eq!(source.calls.get(), 1);
}

const FOUR_DAYS: &str = r#"[
    {"date":"2025-01-01","correct":true,"average_pct":0.8,"real_move_pct":0.5},
    {"date":"2025-01-02","correct":false,"average_pct":1.5,"real_move_pct":-0.3},
    {"date":"2025-01-03","correct":true,"average_pct":-0.5,"real_move_pct":-0.9},
    {"date":"2025-01-06","correct":true,"average_pct":0.25,"real_move_pct":0.4}
]"#;

#[test]
fn refetch_replaces_history_wholesale() {
    let before = FixedSource {
        body: THREE_DAYS,
        calls: Cell::new(0),
    };
    let after = FixedSource {
        body: FOUR_DAYS,
        calls: Cell::new(0),
    };

    let first = DerivedMetrics::compute(&before.fetch_results().unwrap());
    let history = after.fetch_results().unwrap();
    let second = DerivedMetrics::compute(&history);

    assert_eq!(first.win_rate, 67);
    assert_eq!(second.win_rate, 75);
    assert_eq!(second.sample_size, 4);
    assert_eq!(second.previous_win_rate, Some(first.win_rate));
    assert_eq!(second.latest.as_ref().unwrap().date.to_string(), "2025-01-06");
    assert_eq!(second.previous.as_ref().unwrap().date.to_string(), "2025-01-03");
    assert_eq!(second.delta(NumericField::AveragePct), Some(0.75));
    assert_ne!(first.delta(NumericField::AveragePct), second.delta(NumericField::AveragePct));
}

#[test]
fn sample_feed_through_every_view() {
    let end = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
    let source = SampleSource::new(25, end, 11);
    let history = source.fetch_results().unwrap();

    // Table: 25 rows, newest first, three pages of 10/10/5.
    let rows = newest_first(&history);
    assert_eq!(rows[0].date, end);
    let mut pager = Paginator::new(10).unwrap();
    assert_eq!(pager.total_pages(rows.len()), 3);
    pager.go_to(3, rows.len());
    assert_eq!(pager.slice(&rows).len(), 5);

    // Charts: the 7-day window holds at most 5 trading days + the boundary day.
    let window = TimeRange::Last7Days.filter(&history, end);
    assert!(!window.is_empty() && window.len() <= 6);
    let series = LineSeries::build(&window);
    assert_eq!(series.real.len(), window.len());
    assert_eq!(precision_bars(&window).len(), window.len());

    let m = DerivedMetrics::compute(&history);
    assert!(m.win_rate <= 100);
    assert!(m.delta(NumericField::OpenToday).is_some());
}

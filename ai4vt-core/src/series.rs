//! Chart series — time-range filtering, real-vs-forecast lines, precision bars.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::DailyRecord;
use crate::metrics::chronological;

/// Absolute real-vs-forecast gap (in percentage points) below which a day counts as precise.
pub const PRECISION_THRESHOLD_PCT: f64 = 1.5;

/// Look-back window for the trend charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "7d")]
    Last7Days,
    #[serde(rename = "30d")]
    Last30Days,
    #[default]
    #[serde(rename = "90d")]
    Last90Days,
    #[serde(rename = "365d")]
    LastYear,
}

impl TimeRange {
    pub const ALL: [TimeRange; 4] = [
        TimeRange::Last7Days,
        TimeRange::Last30Days,
        TimeRange::Last90Days,
        TimeRange::LastYear,
    ];

    pub fn days(self) -> i64 {
        match self {
            TimeRange::Last7Days => 7,
            TimeRange::Last30Days => 30,
            TimeRange::Last90Days => 90,
            TimeRange::LastYear => 365,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeRange::Last7Days => "Last 7 days",
            TimeRange::Last30Days => "Last 30 days",
            TimeRange::Last90Days => "Last 3 months",
            TimeRange::LastYear => "All Year",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            TimeRange::Last7Days => "7d",
            TimeRange::Last30Days => "30d",
            TimeRange::Last90Days => "90d",
            TimeRange::LastYear => "365d",
        }
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|r| *r == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|r| *r == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// First date inside the window ending at `reference`.
    pub fn start(self, reference: NaiveDate) -> NaiveDate {
        reference - Duration::days(self.days())
    }

    /// Records dated on or after `start(reference)`, oldest first.
    pub fn filter<'a>(self, history: &'a [DailyRecord], reference: NaiveDate) -> Vec<&'a DailyRecord> {
        let start = self.start(reference);
        chronological(history)
            .into_iter()
            .filter(|r| r.date >= start)
            .collect()
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.key() == s)
            .ok_or_else(|| format!("unknown time range '{s}' (expected 7d, 30d, 90d or 365d)"))
    }
}

/// The two line-chart series, x = index into the filtered window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineSeries {
    pub dates: Vec<NaiveDate>,
    pub real: Vec<(f64, f64)>,
    pub forecast: Vec<(f64, f64)>,
}

impl LineSeries {
    /// Points with an unavailable y value are dropped from their series only.
    pub fn build(records: &[&DailyRecord]) -> Self {
        let mut series = LineSeries::default();
        for (i, r) in records.iter().enumerate() {
            let x = i as f64;
            series.dates.push(r.date);
            if r.real_move_pct.is_finite() {
                series.real.push((x, r.real_move_pct));
            }
            if r.average_pct.is_finite() {
                series.forecast.push((x, r.average_pct));
            }
        }
        series
    }

    /// Y bounds across both series, padded by 5%; `[-1, 1]` when empty.
    pub fn y_bounds(&self) -> [f64; 2] {
        let ys = self.real.iter().chain(self.forecast.iter()).map(|p| p.1);
        let (lo, hi) = ys.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });
        if !lo.is_finite() || !hi.is_finite() {
            return [-1.0, 1.0];
        }
        let pad = ((hi - lo).abs() * 0.05).max(0.1);
        [lo - pad, hi + pad]
    }
}

/// One bar of the precision chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrecisionBar {
    pub date: NaiveDate,
    /// `|real_move_pct - average_pct|`.
    pub diff: f64,
    pub precise: bool,
}

impl PrecisionBar {
    /// `None` when either input is unavailable.
    pub fn from_record(record: &DailyRecord) -> Option<Self> {
        let real = record.real_move_pct;
        let forecast = record.average_pct;
        if !real.is_finite() || !forecast.is_finite() {
            return None;
        }
        let diff = (real - forecast).abs();
        let same_sign = (real >= 0.0 && forecast >= 0.0) || (real <= 0.0 && forecast <= 0.0);
        Some(Self {
            date: record.date,
            diff,
            precise: same_sign && diff < PRECISION_THRESHOLD_PCT,
        })
    }
}

pub fn precision_bars(records: &[&DailyRecord]) -> Vec<PrecisionBar> {
    records.iter().filter_map(|r| PrecisionBar::from_record(r)).collect()
}

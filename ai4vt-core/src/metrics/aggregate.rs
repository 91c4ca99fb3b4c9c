//! Results aggregation — win rate, latest/previous selection, day-over-day deltas.
//!
//! Every function here is pure: record slice in, derived values out.
//! Nothing mutates the history it is handed.

use serde::{Deserialize, Serialize};

use crate::domain::{DailyRecord, NumericField};

/// Display metrics derived from the full record history.
///
/// Recomputed from scratch on every fetch; never patched incrementally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Rounded percentage of correct forecasts, always in `0..=100`.
    pub win_rate: u32,
    /// Win rate over the history without its latest record.
    pub previous_win_rate: Option<u32>,
    pub correct_count: usize,
    pub sample_size: usize,
    /// Most recent record by date.
    pub latest: Option<DailyRecord>,
    /// Record immediately before `latest`.
    pub previous: Option<DailyRecord>,
}

impl DerivedMetrics {
    /// Derive metrics from `history` in any order.
    ///
    /// Records are ordered by `date` (stable, so duplicates keep feed order)
    /// before `latest` and `previous` are picked.
    pub fn compute(history: &[DailyRecord]) -> Self {
        let ordered = chronological(history);
        let correct_count = history.iter().filter(|r| r.correct).count();

        let previous_win_rate = match ordered.split_last() {
            Some((_, rest)) if !rest.is_empty() => Some(win_rate(rest.iter().copied())),
            _ => None,
        };

        Self {
            win_rate: win_rate(history.iter()),
            previous_win_rate,
            correct_count,
            sample_size: history.len(),
            latest: ordered.last().map(|r| (*r).clone()),
            previous: ordered.iter().rev().nth(1).map(|r| (*r).clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sample_size == 0
    }

    /// `latest[field] - previous[field]`; `None` without a previous record
    /// or when either side is unavailable.
    pub fn delta(&self, field: NumericField) -> Option<f64> {
        match (&self.latest, &self.previous) {
            (Some(latest), Some(previous)) => delta_between(latest, previous, field),
            _ => None,
        }
    }

    /// Change in win rate contributed by the latest record.
    pub fn win_rate_delta(&self) -> Option<f64> {
        self.previous_win_rate
            .map(|prev| f64::from(self.win_rate) - f64::from(prev))
    }

    /// Delta for every numeric field, in declaration order.
    pub fn deltas(&self) -> Vec<(NumericField, Option<f64>)> {
        NumericField::ALL
            .into_iter()
            .map(|field| (field, self.delta(field)))
            .collect()
    }
}

/// `a[field] - b[field]`, `None` when either value is unavailable.
pub fn delta_between(a: &DailyRecord, b: &DailyRecord, field: NumericField) -> Option<f64> {
    let diff = field.value(a)? - field.value(b)?;
    diff.is_finite().then_some(diff)
}

/// `round(100 * correct / total)`, `0` for an empty set.
pub fn win_rate<'a, I>(records: I) -> u32
where
    I: IntoIterator<Item = &'a DailyRecord>,
{
    let (correct, total) = records
        .into_iter()
        .fold((0usize, 0usize), |(c, t), r| (c + usize::from(r.correct), t + 1));
    if total == 0 {
        return 0;
    }
    ((correct as f64 / total as f64) * 100.0).round() as u32
}

/// References to `history` sorted by date ascending (stable).
pub fn chronological(history: &[DailyRecord]) -> Vec<&DailyRecord> {
    let mut ordered: Vec<&DailyRecord> = history.iter().collect();
    ordered.sort_by_key(|r| r.date);
    ordered
}

//! Deterministic demo feed.
//!
//! Produces a plausible record history so the dashboard and CLI can run
//! with no network:
//! - trading days only (weekends skipped)
//! - forecasts correlated with, but noisier than, the realized move
//! - a headline on most days and a summary for every day

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::provider::{ApiError, ResultsSource};
use crate::domain::{DailyRecord, Summary, Volatility};

const HEADLINES: [&str; 6] = [
    "Global equities edge higher as yields ease",
    "Tech rally lifts world indices",
    "Oil slides on demand worries",
    "Central banks signal patience on rates",
    "Emerging markets slip on dollar strength",
    "Investors brace for payrolls report",
];

/// In-memory source serving a generated history.
pub struct SampleSource {
    records: Vec<DailyRecord>,
}

impl SampleSource {
    /// `days` trading days ending on or before `end`.
    pub fn new(days: usize, end: NaiveDate, seed: u64) -> Self {
        Self {
            records: sample_history(days, end, seed),
        }
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }
}

impl ResultsSource for SampleSource {
    fn name(&self) -> &str {
        "sample"
    }

    fn fetch_results(&self) -> Result<Vec<DailyRecord>, ApiError> {
        Ok(self.records.clone())
    }

    fn fetch_summary(&self, date: NaiveDate) -> Result<Summary, ApiError> {
        let record = self
            .records
            .iter()
            .find(|r| r.date == date)
            .ok_or(ApiError::SummaryNotFound { date })?;
        Ok(Summary {
            date: Some(record.date_key()),
            summary: format!(
                "{} Model expected {:+.2}% and the market opened {:+.2}%.",
                record.headline_or_fallback(),
                record.average_pct,
                record.real_move_pct,
            ),
        })
    }
}

/// Generate `days` consecutive trading-day records ending on or before `end`,
/// oldest first.
pub fn sample_history(days: usize, end: NaiveDate, seed: u64) -> Vec<DailyRecord> {
    let mut dates = Vec::with_capacity(days);
    let mut d = end;
    while dates.len() < days {
        if !matches!(d.weekday(), Weekday::Sat | Weekday::Sun) {
            dates.push(d);
        }
        d -= Duration::days(1);
    }
    dates.reverse();

    let mut rng = StdRng::seed_from_u64(seed);
    let mut close = 112.0_f64;
    let mut records = Vec::with_capacity(days);

    for date in dates {
        let real = round2(rng.gen_range(-1.6..1.6));
        let forecasted = round2(real * 0.6 + rng.gen_range(-0.9..0.9));
        let calculated = round2(real * 0.4 + rng.gen_range(-1.2..1.2));
        let average = round2((forecasted + calculated) / 2.0);
        let open = round2(close * (1.0 + real / 100.0));

        let volatility = match rng.gen_range(0..3) {
            0 => "Low",
            1 => "Moderate",
            _ => "High",
        };

        let headline = if rng.gen_bool(0.8) {
            Some(HEADLINES[rng.gen_range(0..HEADLINES.len())].to_string())
        } else {
            None
        };

        records.push(DailyRecord {
            date,
            open_today: open,
            close_yesterday: round2(close),
            real_move_pct: real,
            forecasted_pct: forecasted,
            calculated_pct: calculated,
            average_pct: average,
            confidence_level: f64::from(rng.gen_range(45..96_u8)),
            sentiment_score: f64::from(rng.gen_range(1..11_u8)),
            market_impact_score: f64::from(rng.gen_range(1..11_u8)),
            volatility_indicator: Some(Volatility::Label(volatility.to_string())),
            correct: same_direction(real, average),
            headline,
            improvement: None,
        });

        // Drift the close a little further before the next open.
        close = open * (1.0 + rng.gen_range(-0.4..0.4) / 100.0);
    }

    records
}

/// A flat move or flat forecast is never a hit.
fn same_direction(real: f64, forecast: f64) -> bool {
    (real > 0.0 && forecast > 0.0) || (real < 0.0 && forecast < 0.0)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 18).unwrap()
    }

    #[test]
    fn deterministic_for_seed() {
        assert_eq!(sample_history(30, end(), 7), sample_history(30, end(), 7));
        assert_ne!(sample_history(30, end(), 7), sample_history(30, end(), 8));
    }

    #[test]
    fn trading_days_only_ascending() {
        let history = sample_history(40, end(), 1);
        assert_eq!(history.len(), 40);
        assert_eq!(history.last().unwrap().date, end());
        for pair in history.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
        assert!(history
            .iter()
            .all(|r| !matches!(r.date.weekday(), Weekday::Sat | Weekday::Sun)));
    }

    #[test]
    fn correctness_matches_direction() {
        for r in sample_history(60, end(), 3) {
            let hit = (r.real_move_pct > 0.0 && r.average_pct > 0.0)
                || (r.real_move_pct < 0.0 && r.average_pct < 0.0);
            assert_eq!(r.correct, hit);
        }
    }

    #[test]
    fn flat_move_is_a_miss() {
        assert!(same_direction(0.4, 0.1));
        assert!(same_direction(-0.4, -0.1));
        assert!(!same_direction(0.0, 0.3));
        assert!(!same_direction(-0.2, 0.0));
        assert!(!same_direction(0.0, 0.0));
        assert!(!same_direction(0.5, -0.5));
    }

    #[test]
    fn summary_for_known_and_unknown_dates() {
        let source = SampleSource::new(10, end(), 5);
        let s = source.fetch_summary(end()).unwrap();
        assert_eq!(s.date.as_deref(), Some("2025-04-18"));
        assert!(!s.summary.is_empty());

        let missing = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert!(matches!(
            source.fetch_summary(missing),
            Err(ApiError::SummaryNotFound { .. })
        ));
    }
}

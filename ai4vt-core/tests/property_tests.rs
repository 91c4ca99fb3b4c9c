//! Property tests for aggregation and pagination invariants.
//!
//! Uses proptest to verify:
//! 1. Win rate bounds — always within 0..=100, zero for empty history
//! 2. Delta antisymmetry — swapping operands negates the delta
//! 3. Order independence — shuffling the feed never changes derived metrics
//! 4. Pagination coverage — pages partition the table exactly

use ai4vt_core::metrics::{delta_between, DerivedMetrics};
use ai4vt_core::pagination::Paginator;
use ai4vt_core::{DailyRecord, NumericField};
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_pct() -> impl Strategy<Value = f64> {
    (-5.0..5.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_history(max_len: usize) -> impl Strategy<Value = Vec<DailyRecord>> {
    prop::collection::vec((any::<bool>(), arb_pct(), arb_pct()), 0..max_len).prop_map(|rows| {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        rows.into_iter()
            .enumerate()
            .map(|(i, (correct, real, avg))| {
                let mut r = DailyRecord::blank(base + Duration::days(i as i64));
                r.correct = correct;
                r.real_move_pct = real;
                r.average_pct = avg;
                r
            })
            .collect()
    })
}

fn arb_field() -> impl Strategy<Value = NumericField> {
    prop::sample::select(vec![NumericField::RealMovePct, NumericField::AveragePct])
}

// ── 1. Win rate bounds ───────────────────────────────────────────────

proptest! {
    #[test]
    fn win_rate_in_bounds(history in arb_history(200)) {
        let m = DerivedMetrics::compute(&history);
        prop_assert!(m.win_rate <= 100);
        if history.is_empty() {
            prop_assert_eq!(m.win_rate, 0);
        }
        if let Some(prev) = m.previous_win_rate {
            prop_assert!(prev <= 100);
        }
    }

    #[test]
    fn all_correct_is_one_hundred(n in 1usize..50) {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let history: Vec<DailyRecord> = (0..n)
            .map(|i| {
                let mut r = DailyRecord::blank(base + Duration::days(i as i64));
                r.correct = true;
                r
            })
            .collect();
        prop_assert_eq!(DerivedMetrics::compute(&history).win_rate, 100);
    }
}

// ── 2. Delta antisymmetry ────────────────────────────────────────────

proptest! {
    #[test]
    fn delta_is_antisymmetric(history in arb_history(20), field in arb_field()) {
        prop_assume!(history.len() >= 2);
        let a = &history[history.len() - 1];
        let b = &history[history.len() - 2];
        let forward = delta_between(a, b, field).unwrap();
        let backward = delta_between(b, a, field).unwrap();
        prop_assert_eq!(forward, -backward);
    }

    #[test]
    fn delta_requires_two_records(history in arb_history(3), field in arb_field()) {
        let m = DerivedMetrics::compute(&history);
        prop_assert_eq!(m.delta(field).is_some(), history.len() >= 2);
    }
}

// ── 3. Order independence ────────────────────────────────────────────

proptest! {
    #[test]
    fn feed_order_does_not_matter(history in arb_history(40)) {
        let sorted = DerivedMetrics::compute(&history);
        let mut reversed = history.clone();
        reversed.reverse();
        let shuffled = DerivedMetrics::compute(&reversed);

        // Blank records carry NaN fields, so compare by key rather than `==`.
        prop_assert_eq!(shuffled.win_rate, sorted.win_rate);
        prop_assert_eq!(shuffled.previous_win_rate, sorted.previous_win_rate);
        prop_assert_eq!(shuffled.latest.as_ref().map(|r| r.date), sorted.latest.as_ref().map(|r| r.date));
        prop_assert_eq!(shuffled.previous.as_ref().map(|r| r.date), sorted.previous.as_ref().map(|r| r.date));
        prop_assert_eq!(
            shuffled.delta(NumericField::AveragePct),
            sorted.delta(NumericField::AveragePct)
        );
    }
}

// ── 4. Pagination coverage ───────────────────────────────────────────

proptest! {
    #[test]
    fn pages_partition_rows(len in 0usize..300, page_size in 1usize..40) {
        let rows: Vec<usize> = (0..len).collect();
        let mut p = Paginator::new(page_size).unwrap();
        let total = p.total_pages(len);
        let mut seen = Vec::with_capacity(len);
        for page in 1..=total {
            p.go_to(page, len);
            let slice = p.slice(&rows);
            prop_assert!(!slice.is_empty());
            prop_assert!(slice.len() <= page_size);
            seen.extend_from_slice(slice);
        }
        prop_assert_eq!(seen, rows);
    }
}

//! Property-based tests for calendar-month stepping and cadence expansion.

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;

use super::cadence::{AnchorDate, Cadence, add_months, days_in_month, expand};

/// Strategy for generating any valid calendar date between 1990 and 2080.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (1990i32..2080, 1u32..=12, 1u32..=31).prop_map(|(y, m, d)| {
        NaiveDate::from_ymd_opt(y, m, d.min(days_in_month(y, m))).unwrap()
    })
}

/// Strategy for generating optional quarterly anchors.
fn arb_anchors() -> impl Strategy<Value = Vec<Option<AnchorDate>>> {
    prop::collection::vec(
        prop::option::of((1u32..=12, 1u32..=31).prop_map(|(m, d)| AnchorDate::new(m, d))),
        1..=4,
    )
}

#[test]
fn exhaustive_add_months_every_day_and_interval() {
    for year in [2023, 2024] {
        for month in 1..=12 {
            for day in 1..=days_in_month(year, month) {
                let start = NaiveDate::from_ymd_opt(year, month, day).unwrap();
                for interval in [1, 3, 6, 12] {
                    for k in 0..=24 {
                        let shifted = add_months(start, interval * k).unwrap();
                        let months_apart = (shifted.year() - start.year()) * 12
                            + shifted.month().cast_signed()
                            - start.month().cast_signed();
                        assert_eq!(months_apart, interval * k, "{start} + {}", interval * k);
                        let expected_day =
                            day.min(days_in_month(shifted.year(), shifted.month()));
                        assert_eq!(shifted.day(), expected_day, "{start} + {}", interval * k);
                    }
                }
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every fixed-interval occurrence lies in [start, horizon] and the
    /// sequence is strictly increasing with consecutive indices.
    #[test]
    fn prop_fixed_interval_bounded_and_ordered(
        start in arb_date(),
        span_days in 0i64..1500,
        months_between in 1u32..=12,
        pinned_day in prop::option::of(1u32..=31),
    ) {
        let horizon = start + chrono::Duration::days(span_days);
        let cadence = Cadence::FixedInterval { months_between, pinned_day };
        let result = expand(start, &cadence, horizon, start.year()).unwrap();

        for (i, occurrence) in result.iter().enumerate() {
            prop_assert!(occurrence.date >= start);
            prop_assert!(occurrence.date <= horizon);
            prop_assert_eq!(occurrence.index as usize, i);
        }
        for pair in result.windows(2) {
            prop_assert!(pair[0].date < pair[1].date);
        }
    }

    /// Without a pinned day the first occurrence is the start itself.
    #[test]
    fn prop_fixed_interval_starts_on_start(
        start in arb_date(),
        span_days in 0i64..800,
        months_between in 1u32..=12,
    ) {
        let horizon = start + chrono::Duration::days(span_days);
        let result = expand(start, &Cadence::every_months(months_between), horizon, start.year())
            .unwrap();
        prop_assert_eq!(result.first().map(|o| o.date), Some(start));
    }

    /// Quarterly sets stay inside the window, never emit an unconfigured
    /// slot, and come out sorted.
    #[test]
    fn prop_quarterly_set_respects_slots(
        start in arb_date(),
        span_days in 0i64..1200,
        anchors in arb_anchors(),
    ) {
        let horizon = start + chrono::Duration::days(span_days);
        let cadence = Cadence::QuarterlySet { anchors: anchors.clone() };
        let result = expand(start, &cadence, horizon, start.year() - 1).unwrap();

        for occurrence in &result {
            let slot = occurrence.slot.unwrap();
            let anchor = anchors[slot].unwrap();
            prop_assert_eq!(occurrence.date.month(), anchor.month);
            prop_assert!(occurrence.date >= start && occurrence.date <= horizon);
        }
        for pair in result.windows(2) {
            prop_assert!(pair[0].date <= pair[1].date);
        }
    }
}

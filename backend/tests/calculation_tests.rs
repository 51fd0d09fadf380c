//! Week numbering and yield arithmetic tests
//!
//! The mill counts production weeks as elapsed seven-day blocks since
//! January 1st, rounded up. That numbering drives batch numbers and the
//! planning window, so the calendar edges get explicit coverage here.

use chrono::{Datelike, Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::{
    batch_number, efficiency_percent, production_week, share_percent, validate_batch_number,
    week_date_range, week_options,
};

/// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Week numbering
// ============================================================================

mod week_numbering {
    use super::*;

    #[test]
    fn january_first_lands_in_week_zero() {
        assert_eq!(production_week(date(2025, 1, 1)), 0);
    }

    #[test]
    fn the_first_seven_day_block_is_week_one() {
        assert_eq!(production_week(date(2025, 1, 2)), 1);
        assert_eq!(production_week(date(2025, 1, 8)), 1);
        assert_eq!(production_week(date(2025, 1, 9)), 2);
    }

    #[test]
    fn ordinary_years_end_in_week_52() {
        assert_eq!(production_week(date(2025, 12, 31)), 52);
    }

    #[test]
    fn leap_years_reach_week_53() {
        assert_eq!(production_week(date(2024, 12, 31)), 53);
    }

    #[test]
    fn mid_february_is_week_seven() {
        assert_eq!(production_week(date(2025, 2, 15)), 7);
    }
}

// ============================================================================
// Batch numbers
// ============================================================================

mod batch_numbers {
    use super::*;

    #[test]
    fn weeks_are_zero_padded_to_two_digits() {
        assert_eq!(batch_number(7, 2025), "BATCH-2025-W07");
        assert_eq!(batch_number(40, 2024), "BATCH-2024-W40");
    }

    #[test]
    fn generated_batch_numbers_pass_format_validation() {
        for week in 1..=52 {
            assert!(validate_batch_number(&batch_number(week, 2025)).is_ok());
        }
    }
}

// ============================================================================
// Week date ranges
// ============================================================================

mod week_ranges {
    use super::*;

    #[test]
    fn week_one_starts_on_january_first() {
        let (start, end) = week_date_range(1, 2025);
        assert_eq!(start, date(2025, 1, 1));
        assert_eq!(end, date(2025, 1, 7));
    }

    #[test]
    fn ranges_span_seven_days() {
        for week in 1..=52 {
            let (start, end) = week_date_range(week, 2025);
            assert_eq!(end - start, Duration::days(6));
        }
    }

    #[test]
    fn week_zero_resolves_to_the_previous_december() {
        let (start, end) = week_date_range(0, 2025);
        assert_eq!(start, date(2024, 12, 25));
        assert_eq!(end, date(2024, 12, 31));
    }

    #[test]
    fn consecutive_weeks_are_adjacent() {
        let (_, end_of_four) = week_date_range(4, 2025);
        let (start_of_five, _) = week_date_range(5, 2025);
        assert_eq!(start_of_five, end_of_four + Duration::days(1));
    }
}

// ============================================================================
// Planning window
// ============================================================================

mod planning_window {
    use super::*;

    #[test]
    fn window_is_ten_weeks_back_through_two_ahead() {
        let options = week_options(date(2025, 6, 15));
        assert_eq!(options.len(), 13);

        let current = production_week(date(2025, 6, 15));
        assert_eq!(options[10].week, current);
        assert_eq!(options[10].year, 2025);
        assert_eq!(options[0].week, current - 10);
        assert_eq!(options[12].week, current + 2);
    }

    #[test]
    fn labels_spell_out_week_and_year() {
        let options = week_options(date(2025, 6, 15));
        let current = production_week(date(2025, 6, 15));
        assert_eq!(options[10].label, format!("Week {} / 2025", current));
    }

    #[test]
    fn early_january_reaches_back_into_the_previous_year() {
        let options = week_options(date(2025, 1, 10));
        assert_eq!(options[0].week, 44);
        assert_eq!(options[0].year, 2024);
        let last = options.last().unwrap();
        assert_eq!(last.week, 4);
        assert_eq!(last.year, 2025);
    }

    #[test]
    fn late_december_reaches_into_the_next_year() {
        // December 20th 2025 falls in week 51; two weeks ahead wraps
        let options = week_options(date(2025, 12, 20));
        let last = options.last().unwrap();
        assert_eq!(last.week, 1);
        assert_eq!(last.year, 2026);
    }
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Week numbers never leave the 0-53 band, any year
    #[test]
    fn week_numbers_stay_in_the_calendar(
        year in 2020i32..2031,
        ordinal in 1u32..367,
    ) {
        if let Some(day) = NaiveDate::from_yo_opt(year, ordinal) {
            prop_assert!(production_week(day) <= 53);
        }
    }

    /// The week number never decreases from one day to the next within a year
    #[test]
    fn week_numbers_never_decrease_within_a_year(
        year in 2020i32..2031,
        ordinal in 1u32..366,
    ) {
        if let (Some(day), Some(next)) = (
            NaiveDate::from_yo_opt(year, ordinal),
            NaiveDate::from_yo_opt(year, ordinal + 1),
        ) {
            prop_assert!(production_week(next) >= production_week(day));
        }
    }

    /// Planning options always offer thirteen weeks on the 52-week wheel
    #[test]
    fn planning_options_stay_on_the_52_week_wheel(
        year in 2021i32..2030,
        ordinal in 1u32..367,
    ) {
        if let Some(day) = NaiveDate::from_yo_opt(year, ordinal) {
            let options = week_options(day);
            prop_assert_eq!(options.len(), 13);
            for option in &options {
                prop_assert!(option.week >= 1 && option.week <= 52);
                prop_assert!(option.year >= day.year() - 1 && option.year <= day.year() + 1);
                prop_assert_eq!(&option.label, &format!("Week {} / {}", option.week, option.year));
            }
        }
    }

    /// A part of a whole is never more than 100 percent
    #[test]
    fn shares_stay_between_zero_and_one_hundred(
        part in 0u32..1000,
        extra in 0u32..1000,
    ) {
        let part = Decimal::from(part);
        let whole = part + Decimal::from(extra) + Decimal::ONE;
        let share = share_percent(part, whole);
        prop_assert!(share >= Decimal::ZERO);
        prop_assert!(share <= Decimal::from(100));
    }

    /// Efficiency recovers the percentage the output was derived from
    #[test]
    fn efficiency_recovers_the_derivation_percentage(
        input in 1u32..10_000,
        percent in 1u32..100,
    ) {
        let input = Decimal::from(input);
        let output = input * Decimal::from(percent) / Decimal::from(100);
        let calculated = efficiency_percent(input, output);
        let diff = (calculated - Decimal::from(percent)).abs();
        prop_assert!(diff < dec("0.0001"));
    }
}

// ============================================================================
// Zero guards
// ============================================================================

mod zero_guards {
    use super::*;

    #[test]
    fn efficiency_of_zero_input_is_zero() {
        assert_eq!(efficiency_percent(Decimal::ZERO, Decimal::from(5)), Decimal::ZERO);
    }

    #[test]
    fn share_of_zero_whole_is_zero() {
        assert_eq!(share_percent(Decimal::from(3), Decimal::ZERO), Decimal::ZERO);
    }
}

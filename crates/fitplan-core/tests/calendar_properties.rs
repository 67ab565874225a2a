//! Property tests for calendar arithmetic.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use fitplan_core::calendar::{
    date_at_index, index_of_date, month_grid, start_of_week, week_number, weeks_between,
};
use fitplan_core::days::{EmptySource, RestDayPolicy, WindowSpan, WorkoutDayWindow};
use proptest::prelude::*;
use proptest::test_runner::Config;

fn any_date() -> impl Strategy<Value = NaiveDate> {
    // 1900-01-01 .. 2200-01-01
    (0_i64..109_573).prop_map(|days| {
        NaiveDate::from_ymd_opt(1900, 1, 1).unwrap() + Duration::days(days)
    })
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn start_of_week_is_the_monday_on_or_before(date in any_date()) {
        let start = start_of_week(date);
        prop_assert_eq!(start.weekday(), Weekday::Mon);
        prop_assert!(start <= date);
        prop_assert!(date < start + Duration::days(7));
    }

    #[test]
    fn week_number_matches_iso_week(date in any_date()) {
        prop_assert_eq!(week_number(date), date.iso_week().week());
    }

    #[test]
    fn month_grid_is_42_consecutive_days(year in 1900_i32..2200, month in 1_u32..=12) {
        let grid = month_grid(month, year);
        let dates: Vec<NaiveDate> = grid.dates().collect();
        prop_assert_eq!(dates.len(), 42);
        prop_assert_eq!(dates[0].weekday(), Weekday::Mon);
        for pair in dates.windows(2) {
            prop_assert_eq!(pair[1] - pair[0], Duration::days(1));
        }
        let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
        prop_assert!(grid.contains(first));
        prop_assert_eq!(grid.first(), start_of_week(first));
    }

    #[test]
    fn index_and_date_agree(start in any_date(), offset in 0_usize..35) {
        let date = date_at_index(start, offset);
        prop_assert_eq!(index_of_date(start, 35, date), Some(offset));
    }

    #[test]
    fn weeks_between_is_antisymmetric(a in any_date(), b in any_date()) {
        prop_assert_eq!(weeks_between(a, b), -weeks_between(b, a));
    }

    #[test]
    fn window_places_reference_at_days_before(
        reference in any_date(),
        before in 0_u32..30,
        after in 0_u32..30,
    ) {
        let span = WindowSpan { days_before: before, days_after: after };
        let window = WorkoutDayWindow::generate(
            reference,
            span,
            &RestDayPolicy::default(),
            &EmptySource,
            0,
        );
        prop_assert_eq!(window.len(), (before + after + 1) as usize);
        prop_assert_eq!(window.get(before as usize).map(|d| d.date), Some(reference));
    }
}

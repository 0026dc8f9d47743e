//! Calendar arithmetic over a single month.
//!
//! - [`days_in_month`]: Gregorian day count, leap years included
//! - [`weekday_of`]: weekday of a given day
//! - [`weekday_coverage`]: how many times each weekday occurs in a month

mod period;
mod weekday;

use chrono::{Datelike, NaiveDate, Weekday};

pub use period::{BillingPeriod, PeriodError};
pub use weekday::{
    WEEKDAY_NAMES, WEEKDAYS, weekday_from_name, weekday_index, weekday_name,
};

/// Occurrences of each weekday within a month, indexed Monday = 0.
pub type WeekdayCoverage = [u32; 7];

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year`. Returns 0 for a month outside 1-12.
pub fn days_in_month(month: u32, year: i32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Weekday of `day` in `month` of `year`, or `None` if that date does not exist.
pub fn weekday_of(day: u32, month: u32, year: i32) -> Option<Weekday> {
    NaiveDate::from_ymd_opt(year, month, day).map(|d| d.weekday())
}

/// Count how many times each weekday occurs in the period's month.
///
/// Lays the month out as a Monday-first calendar grid. Every weekday gets one
/// per grid row, minus one if its cell in the first row is padding (before
/// day 1) and minus one if its cell in the last row is padding (after the
/// last day).
pub fn weekday_coverage(period: BillingPeriod) -> WeekdayCoverage {
    let days = period.days();
    let Some(first) = period.date(1) else {
        return [0; 7];
    };

    let lead = first.weekday().num_days_from_monday();
    let rows = (lead + days).div_ceil(7);
    let last = (lead + days - 1) % 7;

    let mut coverage = [rows; 7];
    for (idx, count) in (0u32..).zip(coverage.iter_mut()) {
        if idx < lead {
            *count -= 1;
        }
        if idx > last {
            *count -= 1;
        }
    }
    coverage
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn enumerate_coverage(period: BillingPeriod) -> WeekdayCoverage {
        let mut coverage = [0; 7];
        for date in period.dates() {
            coverage[weekday_index(date.weekday())] += 1;
        }
        coverage
    }

    #[rstest]
    #[case(1, 2023, 31)]
    #[case(2, 2023, 28)]
    #[case(2, 2024, 29)]
    #[case(2, 1900, 28)]
    #[case(2, 2000, 29)]
    #[case(4, 2024, 30)]
    #[case(12, 2024, 31)]
    #[case(13, 2024, 0)]
    fn days_in_month_follows_gregorian_rules(
        #[case] month: u32,
        #[case] year: i32,
        #[case] expected: u32,
    ) {
        assert_eq!(days_in_month(month, year), expected);
    }

    #[test]
    fn weekday_of_known_dates() {
        assert_eq!(weekday_of(1, 1, 2024), Some(Weekday::Mon));
        assert_eq!(weekday_of(29, 2, 2024), Some(Weekday::Thu));
        assert_eq!(weekday_of(30, 2, 2024), None);
    }

    #[test]
    fn coverage_for_january_2024() {
        // Starts on a Monday, 31 days: Mon-Wed occur five times.
        let p = BillingPeriod::new(1, 2024).unwrap();
        assert_eq!(weekday_coverage(p), [5, 5, 5, 4, 4, 4, 4]);
    }

    #[test]
    fn coverage_for_february_2021_is_exactly_four_weeks() {
        // Starts on a Monday, 28 days: no partial weeks at all.
        let p = BillingPeriod::new(2, 2021).unwrap();
        assert_eq!(weekday_coverage(p), [4; 7]);
    }

    #[test]
    fn coverage_for_month_starting_on_sunday() {
        // September 2024 starts on a Sunday and spans six grid rows.
        let p = BillingPeriod::new(9, 2024).unwrap();
        assert_eq!(weekday_coverage(p), [5, 4, 4, 4, 4, 4, 5]);
    }

    #[test]
    fn coverage_matches_enumeration_and_sums_to_days() {
        for year in [1900, 1999, 2000, 2023, 2024, 2025, 2100] {
            for month in 1..=12 {
                let p = BillingPeriod::new(month, year).unwrap();
                let coverage = weekday_coverage(p);
                assert_eq!(coverage, enumerate_coverage(p), "{month}/{year}");
                assert_eq!(coverage.iter().sum::<u32>(), p.days(), "{month}/{year}");
            }
        }
    }
}

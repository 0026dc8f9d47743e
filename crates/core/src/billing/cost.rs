//! Cost of a single paper for one month.

use crate::calendar::WeekdayCoverage;
use crate::papers::Schedule;
use crate::undelivered::{UndeliveredDates, count_by_weekday};

/// Number of days each weekday's paper was actually delivered.
///
/// Weekdays the paper is not scheduled on are 0. Undelivered dates can never
/// push a count below zero.
pub fn delivered_occurrences(
    schedule: &Schedule,
    coverage: &WeekdayCoverage,
    undelivered: &UndeliveredDates,
) -> [u32; 7] {
    let missed = count_by_weekday(undelivered);

    let mut delivered = [0; 7];
    for (idx, day) in schedule.days().iter().enumerate() {
        if day.delivered {
            delivered[idx] = coverage[idx].saturating_sub(missed[idx]);
        }
    }
    delivered
}

/// Cost of one paper: delivered occurrences times price, summed over weekdays.
///
/// Prices of weekdays the paper is not delivered on never enter the sum.
pub fn paper_cost(
    schedule: &Schedule,
    coverage: &WeekdayCoverage,
    undelivered: &UndeliveredDates,
) -> f64 {
    delivered_occurrences(schedule, coverage, undelivered)
        .iter()
        .zip(schedule.days())
        .filter(|(_, day)| day.delivered)
        .map(|(&count, day)| f64::from(count) * day.price)
        .sum()
}

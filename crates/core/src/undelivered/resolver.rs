//! Resolution of expressions to concrete dates within a billing period.

use chrono::{Datelike, NaiveDate};

use super::parser::{ExpressionError, parse};
use super::types::{Expression, Section, UndeliveredDates};
use crate::calendar::BillingPeriod;

/// Parse `input` and resolve it against `period`.
///
/// Sections that refer to days the month does not have are dropped without
/// error.
pub fn resolve(
    input: &str,
    period: BillingPeriod,
) -> Result<UndeliveredDates, ExpressionError> {
    Ok(parse(input)?.resolve(period))
}

impl Expression {
    /// Union of the dates selected by every section.
    pub fn resolve(&self, period: BillingPeriod) -> UndeliveredDates {
        let mut dates = UndeliveredDates::new();
        for section in self.sections() {
            section.resolve_into(period, &mut dates);
        }
        dates
    }
}

impl Section {
    /// Add the dates this section selects in `period` to `dates`.
    pub fn resolve_into(&self, period: BillingPeriod, dates: &mut UndeliveredDates) {
        match *self {
            Section::Day(day) => dates.extend(period.date(day)),
            Section::Range { start, end } => {
                // All or nothing: a range reaching past the month is ignored.
                if 1 <= start && start <= end && end <= period.days() {
                    dates.extend((start..=end).filter_map(|day| period.date(day)));
                }
            }
            Section::EveryWeekday(weekday) => {
                dates.extend(period.dates().filter(|d| d.weekday() == weekday));
            }
            Section::NthWeekday { n, weekday } => {
                let nth = n
                    .checked_sub(1)
                    .and_then(|idx| {
                        period.dates().filter(|d| d.weekday() == weekday).nth(idx as usize)
                    });
                dates.extend(nth);
            }
            Section::All => dates.extend(period.dates()),
        }
    }
}

/// Number of dates falling on each weekday, indexed Monday = 0.
pub fn count_by_weekday<'a>(dates: impl IntoIterator<Item = &'a NaiveDate>) -> [u32; 7] {
    let mut counts = [0; 7];
    for date in dates {
        counts[date.weekday().num_days_from_monday() as usize] += 1;
    }
    counts
}

//! Billing period: one (month, year) billing cycle.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use super::days_in_month;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PeriodError {
    #[error("month {0} is out of range (expected 1-12)")]
    InvalidMonth(u32),

    #[error("year {0} is outside the supported calendar range")]
    OutOfRange(i32),
}

/// A validated (month, year) pair.
///
/// Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BillingPeriod {
    year: i32,
    month: u32,
}

impl BillingPeriod {
    /// Create a billing period, rejecting months outside 1-12 and years that
    /// are not positive or cannot be represented by the calendar.
    pub fn new(month: u32, year: i32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodError::InvalidMonth(month));
        }
        if year <= 0 {
            return Err(PeriodError::OutOfRange(year));
        }

        // Both ends of the month must exist as calendar dates.
        let last = days_in_month(month, year);
        if NaiveDate::from_ymd_opt(year, month, 1).is_none()
            || NaiveDate::from_ymd_opt(year, month, last).is_none()
        {
            return Err(PeriodError::OutOfRange(year));
        }

        Ok(Self { year, month })
    }

    /// The period containing `date`.
    pub fn containing(date: NaiveDate) -> Result<Self, PeriodError> {
        Self::new(date.month(), date.year())
    }

    /// The month before the one containing `today`.
    pub fn previous_month(today: NaiveDate) -> Result<Self, PeriodError> {
        if today.month() == 1 {
            Self::new(12, today.year() - 1)
        } else {
            Self::new(today.month() - 1, today.year())
        }
    }

    /// Fill in a partially specified period relative to `today`.
    ///
    /// - neither given: the previous month
    /// - month only: that month of the current year
    /// - year only: the current month of that year
    pub fn from_parts(
        month: Option<u32>,
        year: Option<i32>,
        today: NaiveDate,
    ) -> Result<Self, PeriodError> {
        match (month, year) {
            (None, None) => Self::previous_month(today),
            (Some(m), None) => Self::new(m, today.year()),
            (None, Some(y)) => Self::new(today.month(), y),
            (Some(m), Some(y)) => Self::new(m, y),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Number of days in the period's month.
    pub fn days(&self) -> u32 {
        days_in_month(self.month, self.year)
    }

    /// The date for `day` within this period, if that day exists.
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        if day == 0 || day > self.days() {
            return None;
        }
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// Every date of the month, in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (1..=self.days()).filter_map(|day| self.date(day))
    }

    /// Whether `date` falls within this period.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for BillingPeriod {
    /// Formats as e.g. "January 2024".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.date(1) {
            Some(first) => write!(f, "{}", first.format("%B %Y")),
            None => write!(f, "{:02}/{}", self.month, self.year),
        }
    }
}

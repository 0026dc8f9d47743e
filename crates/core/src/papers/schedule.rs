//! Per-weekday delivery schedule of a paper.

use chrono::Weekday;
use thiserror::Error;

use crate::calendar::{WEEKDAY_NAMES, weekday_index};

/// Errors building a [`Schedule`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScheduleError {
    #[error("schedule must have exactly 7 weekday entries, got {0}")]
    WrongLength(usize),

    #[error("invalid price {price} for {day}: prices must be finite and non-negative")]
    InvalidPrice { day: &'static str, price: f64 },

    #[error("invalid delivery days '{0}': expected 7 characters of Y or N, Monday first")]
    InvalidDays(String),

    #[error("invalid price '{0}'")]
    UnparsablePrice(String),

    #[error("expected {expected} prices (one per delivered day, or one per weekday), got {found}")]
    PriceCount { expected: usize, found: usize },
}

/// Delivery flag and price for one weekday.
///
/// When `delivered` is false the price has no meaning and is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DaySchedule {
    pub delivered: bool,
    pub price: f64,
}

impl DaySchedule {
    pub fn delivered(price: f64) -> Self {
        Self { delivered: true, price }
    }

    pub fn not_delivered() -> Self {
        Self { delivered: false, price: 0.0 }
    }
}

/// Delivery flags and prices for all seven weekdays, Monday first.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    days: [DaySchedule; 7],
}

impl Schedule {
    /// Build a schedule, checking the price of every delivered day.
    pub fn new(days: [DaySchedule; 7]) -> Result<Self, ScheduleError> {
        for (name, day) in WEEKDAY_NAMES.iter().zip(&days) {
            if day.delivered && !(day.price.is_finite() && day.price >= 0.0) {
                return Err(ScheduleError::InvalidPrice { day: *name, price: day.price });
            }
        }
        Ok(Self { days })
    }

    /// Build a schedule from a list that must hold exactly seven entries.
    pub fn from_entries(entries: Vec<DaySchedule>) -> Result<Self, ScheduleError> {
        let days: [DaySchedule; 7] = entries
            .try_into()
            .map_err(|rejected: Vec<DaySchedule>| ScheduleError::WrongLength(rejected.len()))?;
        Self::new(days)
    }

    /// Build a schedule from a `YYYYYYN`-style delivery string and prices.
    ///
    /// `prices` holds either one price per delivered day, in weekday order,
    /// or one price for each of the seven weekdays.
    pub fn from_flags_and_prices(
        flags: &str,
        prices: &[f64],
    ) -> Result<Self, ScheduleError> {
        let delivered = parse_delivery_flags(flags)?;
        let delivered_count = delivered.iter().filter(|d| **d).count();

        let mut days = [DaySchedule::not_delivered(); 7];

        if prices.len() == 7 {
            for ((day, &is_delivered), &price) in days.iter_mut().zip(&delivered).zip(prices) {
                if is_delivered {
                    *day = DaySchedule::delivered(price);
                }
            }
        } else if prices.len() == delivered_count {
            let mut remaining = prices.iter();
            for (day, &is_delivered) in days.iter_mut().zip(&delivered) {
                if is_delivered {
                    if let Some(&price) = remaining.next() {
                        *day = DaySchedule::delivered(price);
                    }
                }
            }
        } else {
            return Err(ScheduleError::PriceCount {
                expected: delivered_count,
                found: prices.len(),
            });
        }

        Self::new(days)
    }

    /// Schedule entry for one weekday.
    pub fn day(&self, weekday: Weekday) -> DaySchedule {
        self.days[weekday_index(weekday)]
    }

    pub fn days(&self) -> &[DaySchedule; 7] {
        &self.days
    }

    /// Delivery flags rendered as `YYYYYYN`, Monday first.
    pub fn delivery_flags(&self) -> String {
        self.days.iter().map(|d| if d.delivered { 'Y' } else { 'N' }).collect()
    }
}

/// Parse a 7-character `Y`/`N` string (case-insensitive), Monday first.
pub fn parse_delivery_flags(flags: &str) -> Result<[bool; 7], ScheduleError> {
    let flags = flags.trim();
    let parsed: Vec<bool> = flags
        .chars()
        .map(|c| match c.to_ascii_uppercase() {
            'Y' => Some(true),
            'N' => Some(false),
            _ => None,
        })
        .collect::<Option<_>>()
        .ok_or_else(|| ScheduleError::InvalidDays(flags.to_string()))?;

    parsed.try_into().map_err(|_| ScheduleError::InvalidDays(flags.to_string()))
}

/// Parse a `;`-separated price list such as `"2;2;2.5"`.
pub fn parse_prices(input: &str) -> Result<Vec<f64>, ScheduleError> {
    input
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().map_err(|_| ScheduleError::UnparsablePrice(s.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_and_prices_per_delivered_day() {
        let s = Schedule::from_flags_and_prices("YYYYYYN", &[2.0, 2.0, 2.0, 2.0, 2.0, 3.5])
            .unwrap();
        assert_eq!(s.day(Weekday::Mon), DaySchedule::delivered(2.0));
        assert_eq!(s.day(Weekday::Sat), DaySchedule::delivered(3.5));
        assert!(!s.day(Weekday::Sun).delivered);
        assert_eq!(s.delivery_flags(), "YYYYYYN");
    }

    #[test]
    fn flags_and_prices_per_weekday() {
        let prices = [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 9.0];
        let s = Schedule::from_flags_and_prices("nnnnnny", &prices).unwrap();
        assert_eq!(s.day(Weekday::Sun), DaySchedule::delivered(9.0));
        assert!(!s.day(Weekday::Mon).delivered);
        assert_eq!(s.delivery_flags(), "NNNNNNY");
    }

    #[test]
    fn price_count_must_match() {
        let err = Schedule::from_flags_and_prices("YYNNNNN", &[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(err, ScheduleError::PriceCount { expected: 2, found: 3 });
    }

    #[test]
    fn flags_must_be_seven_y_or_n() {
        assert!(matches!(parse_delivery_flags("YYYY"), Err(ScheduleError::InvalidDays(_))));
        assert!(matches!(parse_delivery_flags("YYYYYYX"), Err(ScheduleError::InvalidDays(_))));
        assert_eq!(parse_delivery_flags("yYnNyYn").unwrap(), [
            true, true, false, false, true, true, false
        ]);
    }

    #[test]
    fn entries_must_cover_every_weekday() {
        let err = Schedule::from_entries(vec![DaySchedule::delivered(1.0); 6]).unwrap_err();
        assert_eq!(err, ScheduleError::WrongLength(6));
        assert!(Schedule::from_entries(vec![DaySchedule::delivered(1.0); 7]).is_ok());
    }

    #[test]
    fn negative_price_on_delivered_day_is_rejected() {
        let mut days = [DaySchedule::delivered(1.0); 7];
        days[2] = DaySchedule::delivered(-1.0);
        let err = Schedule::new(days).unwrap_err();
        assert_eq!(err, ScheduleError::InvalidPrice { day: "wednesday", price: -1.0 });
    }

    #[test]
    fn price_of_undelivered_day_is_ignored() {
        let mut days = [DaySchedule::delivered(1.0); 7];
        days[6] = DaySchedule { delivered: false, price: f64::NAN };
        assert!(Schedule::new(days).is_ok());
    }

    #[test]
    fn parses_price_lists() {
        assert_eq!(parse_prices("2; 2.5 ;3").unwrap(), vec![2.0, 2.5, 3.0]);
        assert_eq!(parse_prices("4;").unwrap(), vec![4.0]);
        assert!(matches!(parse_prices("2;x"), Err(ScheduleError::UnparsablePrice(_))));
    }
}

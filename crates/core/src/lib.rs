#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Core library for npbc.
//!
//! Turns compact undelivered-date notes ("1,5-10,mondays,2-tuesday") and
//! per-weekday delivery schedules into a monthly newspaper bill.

pub mod billing;
pub mod calendar;
pub mod config;
pub mod papers;
pub mod store;
pub mod undelivered;

pub use billing::{BillResult, BillingError, PaperBill, compute_bill, paper_cost};
pub use calendar::{BillingPeriod, PeriodError, WeekdayCoverage, weekday_coverage};
pub use papers::{ALL_PAPERS_KEY, DaySchedule, Paper, Schedule, ScheduleError};
pub use undelivered::{ExpressionError, UndeliveredDates, resolve, validate};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

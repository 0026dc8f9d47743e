//! Papers and their delivery schedules.

mod schedule;

pub use schedule::{
    DaySchedule, Schedule, ScheduleError, parse_delivery_flags, parse_prices,
};

/// Pseudo-key under which undelivered strings apply to every paper.
pub const ALL_PAPERS_KEY: &str = "all";

/// A newspaper subscription.
#[derive(Debug, Clone, PartialEq)]
pub struct Paper {
    /// Opaque identifier, used to attach undelivered strings.
    pub key: String,
    /// Display name.
    pub name: String,
    pub schedule: Schedule,
}

impl Paper {
    pub fn new(key: impl Into<String>, name: impl Into<String>, schedule: Schedule) -> Self {
        Self { key: key.into(), name: name.into(), schedule }
    }
}

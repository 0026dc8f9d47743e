//! Parsed undelivered-date expression types.

use std::collections::BTreeSet;

use chrono::{NaiveDate, Weekday};

/// Resolved dates on which a paper was not delivered.
pub type UndeliveredDates = BTreeSet<NaiveDate>;

/// One comma-separated unit of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// A single day of the month, e.g. `5`.
    Day(u32),
    /// An inclusive run of days, e.g. `5-10`.
    Range { start: u32, end: u32 },
    /// Every occurrence of a weekday, e.g. `mondays`.
    EveryWeekday(Weekday),
    /// The nth occurrence of a weekday (1-based), e.g. `2-monday`.
    NthWeekday { n: u32, weekday: Weekday },
    /// Every day of the month.
    All,
}

/// A syntactically valid expression: one or more sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    sections: Vec<Section>,
}

impl Expression {
    pub(crate) fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }
}

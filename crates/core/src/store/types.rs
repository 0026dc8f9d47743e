//! Types read back from the store.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::calendar::BillingPeriod;

/// Undelivered strings stored for one billing period.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndeliveredStrings {
    /// Strings per paper key, in insertion order.
    pub per_paper: HashMap<String, Vec<String>>,
    /// Strings that apply to every paper.
    pub all_papers: Vec<String>,
}

impl UndeliveredStrings {
    pub fn is_empty(&self) -> bool {
        self.all_papers.is_empty() && self.per_paper.values().all(Vec::is_empty)
    }

    /// Add a string under `key`, routing the all-papers key to `all_papers`.
    pub fn push(&mut self, key: &str, string: impl Into<String>) {
        if key == crate::papers::ALL_PAPERS_KEY {
            self.all_papers.push(string.into());
        } else {
            self.per_paper.entry(key.to_string()).or_default().push(string.into());
        }
    }
}

/// One recorded cost line.
#[derive(Debug, Clone, PartialEq)]
pub struct CostRecord {
    pub timestamp: DateTime<Utc>,
    pub period: BillingPeriod,
    /// `None` for the total of a calculation.
    pub paper_key: Option<String>,
    pub name: String,
    pub cost: f64,
}

/// Undelivered dates recorded for one paper at calculation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndeliveredRecord {
    pub timestamp: DateTime<Utc>,
    pub period: BillingPeriod,
    pub paper_key: String,
    pub dates: Vec<NaiveDate>,
}

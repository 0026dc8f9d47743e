//! Bill for every paper in a billing period.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use super::cost::paper_cost;
use crate::calendar::{BillingPeriod, weekday_coverage};
use crate::papers::{ALL_PAPERS_KEY, Paper};
use crate::undelivered::{ExpressionError, UndeliveredDates, parse};

#[derive(Debug, Error)]
pub enum BillingError {
    #[error("undelivered string for '{key}' is invalid: {source}")]
    Expression {
        key: String,
        #[source]
        source: ExpressionError,
    },
}

/// Cost of one paper and the dates that were excluded from it.
#[derive(Debug, Clone, PartialEq)]
pub struct PaperBill {
    pub key: String,
    pub cost: f64,
    pub undelivered: UndeliveredDates,
}

/// Costs for every paper in a period, in the order the papers were given.
#[derive(Debug, Clone, PartialEq)]
pub struct BillResult {
    pub period: BillingPeriod,
    pub papers: Vec<PaperBill>,
    pub total: f64,
}

impl BillResult {
    pub fn get(&self, key: &str) -> Option<&PaperBill> {
        self.papers.iter().find(|bill| bill.key == key)
    }

    pub fn cost_of(&self, key: &str) -> Option<f64> {
        self.get(key).map(|bill| bill.cost)
    }
}

/// Compute the bill for `papers` in `period`.
///
/// Strings under `all_papers_expressions` apply to every paper; each paper's
/// own strings from `expressions` are added on top. All strings are unioned,
/// none replaces another. Strings keyed by a paper not in `papers` are
/// ignored.
pub fn compute_bill(
    period: BillingPeriod,
    papers: &[Paper],
    expressions: &HashMap<String, Vec<String>>,
    all_papers_expressions: &[String],
) -> Result<BillResult, BillingError> {
    let coverage = weekday_coverage(period);
    let base = resolve_all(ALL_PAPERS_KEY, all_papers_expressions, period)?;

    for key in expressions.keys() {
        if !papers.iter().any(|paper| &paper.key == key) {
            debug!("Ignoring undelivered strings for unknown paper '{}'", key);
        }
    }

    let mut bills = Vec::with_capacity(papers.len());
    for paper in papers {
        let mut undelivered = base.clone();
        if let Some(strings) = expressions.get(&paper.key) {
            undelivered.extend(resolve_all(&paper.key, strings, period)?);
        }

        let cost = paper_cost(&paper.schedule, &coverage, &undelivered);
        debug!(
            "{}: {} undelivered dates, cost {:.2}",
            paper.key,
            undelivered.len(),
            cost
        );

        bills.push(PaperBill { key: paper.key.clone(), cost, undelivered });
    }

    let total = bills.iter().map(|bill| bill.cost).sum();
    Ok(BillResult { period, papers: bills, total })
}

fn resolve_all(
    key: &str,
    strings: &[String],
    period: BillingPeriod,
) -> Result<UndeliveredDates, BillingError> {
    let mut dates = UndeliveredDates::new();
    for string in strings {
        let expression = parse(string).map_err(|source| BillingError::Expression {
            key: key.to_string(),
            source,
        })?;
        dates.extend(expression.resolve(period));
    }
    Ok(dates)
}

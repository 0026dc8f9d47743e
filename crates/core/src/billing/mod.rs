//! Bill calculation: per-paper cost and the monthly total.

mod aggregate;
mod cost;

pub use aggregate::{BillResult, BillingError, PaperBill, compute_bill};
pub use cost::{delivered_occurrences, paper_cost};

//! Undelivered-date expressions.
//!
//! A compact notation for the days a paper was not delivered in a month:
//!
//! - `5`: the 5th
//! - `5-10`: the 5th through the 10th
//! - `mondays`: every Monday
//! - `2-monday`: the second Monday
//! - `all`: every day of the month
//!
//! Sections are separated by commas, e.g. `1,5-10,mondays,2-tuesday`.
//! Syntax is checked eagerly by [`validate`]/[`parse`]; references to days
//! that do not exist in the target month are dropped quietly by [`resolve`].

pub mod parser;
pub mod resolver;
pub mod types;

pub use parser::{ExpressionError, parse, validate};
pub use resolver::{count_by_weekday, resolve};
pub use types::{Expression, Section, UndeliveredDates};

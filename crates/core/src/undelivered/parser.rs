//! Undelivered-date expression parser.
//!
//! Each section is classified by its structure alone:
//! - only digits (1-2): a single day
//! - `digits - digits` (1-2 each): a range
//! - `digit - weekday`: the nth weekday
//! - `weekdays` (plural): every such weekday
//! - `all`: the whole month

use thiserror::Error;

use super::types::{Expression, Section};
use crate::calendar::weekday_from_name;

/// Error type for undelivered-date expression syntax.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExpressionError {
    #[error("undelivered expression is empty")]
    Empty,

    #[error("invalid section '{section}' in undelivered expression '{expression}'")]
    InvalidSection { section: String, expression: String },
}

/// Whether `input` is a syntactically valid undelivered-date expression.
///
/// Day numbers are not checked against any month here: `40` is valid syntax
/// and simply resolves to nothing.
pub fn validate(input: &str) -> bool {
    parse(input).is_ok()
}

/// Parse an expression into its sections.
///
/// Case and whitespace around separators are ignored. A single trailing comma
/// is tolerated.
pub fn parse(input: &str) -> Result<Expression, ExpressionError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ExpressionError::Empty);
    }

    let body = trimmed.strip_suffix(',').unwrap_or(trimmed);

    let sections = body
        .split(',')
        .map(|raw| {
            classify(raw.trim()).ok_or_else(|| ExpressionError::InvalidSection {
                section: raw.trim().to_string(),
                expression: trimmed.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Expression::new(sections))
}

fn classify(section: &str) -> Option<Section> {
    let lowered = section.to_ascii_lowercase();
    let section = lowered.as_str();

    if section == "all" {
        return Some(Section::All);
    }

    if let Some(day) = parse_day_number(section) {
        return Some(Section::Day(day));
    }

    if let Some((left, right)) = section.split_once('-') {
        let (left, right) = (left.trim(), right.trim());

        if let (Some(start), Some(end)) = (parse_day_number(left), parse_day_number(right)) {
            return Some(Section::Range { start, end });
        }

        if left.len() == 1 {
            if let (Some(n), Some(weekday)) = (parse_day_number(left), weekday_from_name(right)) {
                return Some(Section::NthWeekday { n, weekday });
            }
        }

        return None;
    }

    section
        .strip_suffix('s')
        .and_then(weekday_from_name)
        .map(Section::EveryWeekday)
}

/// One or two ASCII digits.
fn parse_day_number(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

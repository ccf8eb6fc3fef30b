//! Numeric comparisons allowed in an expected-value cell.
//!
//! Two shapes are understood, tried in this order:
//!
//! - simple: `<10`, `_ >= 2.5`, `!= 0`
//! - range: `1 < _ <= 10` (each bound is inclusive when written with `=`)
//!
//! Anything else, or a value that is not a number, yields no verdict.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::verdict::{self, Outcome};

lazy_static! {
    static ref SIMPLE_COMPARISON: Regex =
        Regex::new(r"\A\s*_?\s*((?:[<>]=?)|(?:!=))\s*([0-9]*\.?[0-9]+)\s*\z")
            .expect("simple comparison pattern is valid");
    static ref RANGE: Regex =
        Regex::new(r"\A\s*([0-9]*\.?[0-9]+)\s*<(=?)\s*_\s*<(=?)\s*([0-9]*\.?[0-9]+)\s*\z")
            .expect("range pattern is valid");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Less,
    Greater,
    LessOrEqual,
    GreaterOrEqual,
    NotEqual,
}

impl Relation {
    fn parse(operator: &str) -> Option<Self> {
        Some(match operator {
            "<" => Relation::Less,
            ">" => Relation::Greater,
            "<=" => Relation::LessOrEqual,
            ">=" => Relation::GreaterOrEqual,
            "!=" => Relation::NotEqual,
            _ => return None,
        })
    }

    fn holds(self, actual: f64, operand: f64) -> bool {
        match self {
            Relation::Less => actual < operand,
            Relation::Greater => actual > operand,
            Relation::LessOrEqual => actual <= operand,
            Relation::GreaterOrEqual => actual >= operand,
            Relation::NotEqual => actual != operand,
        }
    }
}

/// A parsed comparison expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Comparison {
    Simple {
        relation: Relation,
        operand: f64,
    },
    Range {
        low: f64,
        low_inclusive: bool,
        high: f64,
        high_inclusive: bool,
    },
}

impl Comparison {
    pub fn parse(expression: &str) -> Option<Self> {
        if let Some(caps) = SIMPLE_COMPARISON.captures(expression) {
            return Some(Comparison::Simple {
                relation: Relation::parse(&caps[1])?,
                operand: number(&caps, 2)?,
            });
        }
        let caps = RANGE.captures(expression)?;
        Some(Comparison::Range {
            low: number(&caps, 1)?,
            low_inclusive: &caps[2] == "=",
            high: number(&caps, 4)?,
            high_inclusive: &caps[3] == "=",
        })
    }

    pub fn holds(&self, actual: f64) -> bool {
        match *self {
            Comparison::Simple { relation, operand } => relation.holds(actual, operand),
            Comparison::Range {
                low,
                low_inclusive,
                high,
                high_inclusive,
            } => {
                (low < actual && actual < high)
                    || (low_inclusive && actual == low)
                    || (high_inclusive && actual == high)
            }
        }
    }
}

fn number(caps: &Captures<'_>, group: usize) -> Option<f64> {
    caps.get(group)?.as_str().parse().ok()
}

/// Evaluates `expression` (already symbol-substituted) against `actual`.
///
/// `original` is the expectation as the author wrote it; the verdict text is
/// built from it with spaces removed, and for ranges the actual value takes
/// the place of `_`.
pub fn compare(expression: &str, actual: &str, original: &str) -> Option<String> {
    judge(expression, actual, original).map(|(_, message)| message)
}

/// Like [`compare`], also telling whether the comparison held.
pub fn judge(expression: &str, actual: &str, original: &str) -> Option<(Outcome, String)> {
    let comparison = Comparison::parse(expression)?;
    let value: f64 = actual.trim().parse().ok()?;
    let passed = comparison.holds(value);
    let compact = original.replace(' ', "");
    let message = match comparison {
        Comparison::Simple { .. } => format!("{}{}", actual, compact),
        Comparison::Range { .. } => {
            // The original may hide the placeholder behind a symbol.
            let template = if compact.contains('_') {
                compact
            } else {
                expression.replace(' ', "")
            };
            let (left, right) = template.split_once('_').unwrap_or((template.as_str(), ""));
            format!("{}{}{}", left, actual, right)
        }
    };
    Some(if passed {
        (Outcome::Pass, verdict::pass(&message))
    } else {
        (Outcome::Fail, verdict::fail(&message))
    })
}

//! Field predicate evaluation and the AND filter combinator.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{FieldValue, Queryable};
use crate::error::AppError;

/// Fields compared numerically instead of as text.
///
/// Both are carried as text on the wire to avoid integer precision loss, so
/// the filter layer parses them before ordered comparison.
const NUMERIC_FIELDS: &[&str] = &["population", "area"];

/// Canonical filter operator vocabulary.
///
/// Wire names are `SCREAMING_SNAKE_CASE`; the short aliases `EQ`, `GT`, and
/// `LT` used by some callers are accepted on input. Anything else fails to
/// parse; there is no silent-pass mode for unknown operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterOp {
    #[serde(alias = "EQ")]
    Equal,
    NotEqual,
    Contains,
    NotContains,
    #[serde(alias = "GT")]
    Greater,
    GreaterOrEqual,
    #[serde(alias = "LT")]
    Less,
    LessOrEqual,
    StartsWith,
    EndsWith,
}

impl FromStr for FilterOp {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EQUAL" | "EQ" => Ok(Self::Equal),
            "NOT_EQUAL" => Ok(Self::NotEqual),
            "CONTAINS" => Ok(Self::Contains),
            "NOT_CONTAINS" => Ok(Self::NotContains),
            "GREATER" | "GT" => Ok(Self::Greater),
            "GREATER_OR_EQUAL" => Ok(Self::GreaterOrEqual),
            "LESS" | "LT" => Ok(Self::Less),
            "LESS_OR_EQUAL" => Ok(Self::LessOrEqual),
            "STARTS_WITH" => Ok(Self::StartsWith),
            "ENDS_WITH" => Ok(Self::EndsWith),
            other => Err(AppError::filter(
                "Unsupported filter operation",
                json!({ "operation": other }),
            )),
        }
    }
}

/// One filter condition: field, operator, comparison value.
///
/// The comparison value is always supplied as text; numeric coercion happens
/// during evaluation for the fields in [`NUMERIC_FIELDS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterClause {
    pub field: String,
    pub operation: FilterOp,
    pub value: String,
}

impl FilterClause {
    pub fn new(
        field: impl Into<String>,
        operation: FilterOp,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            operation,
            value: value.into(),
        }
    }
}

/// Evaluates a single clause against a record.
///
/// Missing fields are non-comparable: negated operators pass, everything
/// else fails. List-valued fields use membership in place of equality and
/// any-element semantics for the text operators; ordered comparison of a
/// list is always false.
pub fn evaluate<R: Queryable + ?Sized>(record: &R, clause: &FilterClause) -> bool {
    match record.field(&clause.field) {
        Some(FieldValue::Text(actual)) => evaluate_text(actual, clause),
        Some(FieldValue::List(items)) => evaluate_list(&items, clause),
        None => matches!(
            clause.operation,
            FilterOp::NotEqual | FilterOp::NotContains
        ),
    }
}

/// ANDs all clauses against a record, short-circuiting on the first failure.
///
/// An empty clause list always passes.
pub fn matches_all<R: Queryable + ?Sized>(record: &R, clauses: &[FilterClause]) -> bool {
    clauses.iter().all(|clause| evaluate(record, clause))
}

fn evaluate_text(actual: &str, clause: &FilterClause) -> bool {
    let numeric = NUMERIC_FIELDS.contains(&clause.field.as_str());
    let value = clause.value.as_str();

    match clause.operation {
        FilterOp::Equal => ordering(actual, value, numeric) == Some(Ordering::Equal),
        FilterOp::NotEqual => ordering(actual, value, numeric) != Some(Ordering::Equal),
        FilterOp::Contains => contains_ci(actual, value),
        FilterOp::NotContains => !contains_ci(actual, value),
        FilterOp::Greater => ordering(actual, value, numeric) == Some(Ordering::Greater),
        FilterOp::GreaterOrEqual => matches!(
            ordering(actual, value, numeric),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        FilterOp::Less => ordering(actual, value, numeric) == Some(Ordering::Less),
        FilterOp::LessOrEqual => matches!(
            ordering(actual, value, numeric),
            Some(Ordering::Less | Ordering::Equal)
        ),
        FilterOp::StartsWith => starts_with_ci(actual, value),
        FilterOp::EndsWith => ends_with_ci(actual, value),
    }
}

fn evaluate_list(items: &[&str], clause: &FilterClause) -> bool {
    let value = clause.value.as_str();

    match clause.operation {
        FilterOp::Equal => items.contains(&value),
        FilterOp::NotEqual => !items.contains(&value),
        FilterOp::Contains => items.iter().any(|item| contains_ci(item, value)),
        FilterOp::NotContains => !items.iter().any(|item| contains_ci(item, value)),
        FilterOp::StartsWith => items.iter().any(|item| starts_with_ci(item, value)),
        FilterOp::EndsWith => items.iter().any(|item| ends_with_ci(item, value)),
        FilterOp::Greater
        | FilterOp::GreaterOrEqual
        | FilterOp::Less
        | FilterOp::LessOrEqual => false,
    }
}

/// Orders the record value against the clause value.
///
/// Numeric fields parse both sides as `f64`; a side that fails to parse makes
/// the pair non-comparable (`None`), matching NaN comparison semantics.
/// Text fields compare lexicographically, case-sensitive.
fn ordering(actual: &str, value: &str, numeric: bool) -> Option<Ordering> {
    if numeric {
        let lhs: f64 = actual.parse().ok()?;
        let rhs: f64 = value.parse().ok()?;
        lhs.partial_cmp(&rhs)
    } else {
        Some(actual.cmp(value))
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn starts_with_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().starts_with(&needle.to_lowercase())
}

fn ends_with_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().ends_with(&needle.to_lowercase())
}

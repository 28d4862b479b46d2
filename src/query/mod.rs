//! Record query layer: field predicates, AND filtering, and stable sorting.
//!
//! This module is the single home for the list-query logic every adapter
//! shares. Records expose their fields by name through [`Queryable`], filter
//! clauses are ANDed by [`filter::matches_all`], and [`run`] composes
//! filtering and sorting into one pure pipeline.
//!
//! # Design
//!
//! - Operators are a closed vocabulary ([`filter::FilterOp`]); unknown names
//!   are rejected when a clause is parsed, never silently passed.
//! - Numeric comparison applies only inside the filter layer and only to the
//!   `population`/`area` fields; sorting always compares raw field text.
//! - The pipeline never mutates its input slice.

pub mod filter;
pub mod sort;

pub use filter::{FilterClause, FilterOp};
pub use sort::{SortOrder, SortSpec};

/// A field value as seen by the query layer.
///
/// Entity fields are either text (all scalar fields are carried as text on
/// the wire, including `population` and `area`) or a list of text values
/// (e.g. a country's landmark names).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    List(Vec<&'a str>),
}

/// Exposes record fields by name for filtering and sorting.
///
/// Returning `None` for an unknown field is expected; predicates treat a
/// missing field as non-comparable and sorting keeps the record in place.
pub trait Queryable {
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

/// Applies `filter` then `sort` to `records`, in that order.
///
/// Filtering runs on the full unsorted input; an empty or absent clause list
/// passes every record. The input slice is left untouched.
pub fn run<R>(records: &[R], filter: Option<&[FilterClause]>, sort: Option<&SortSpec>) -> Vec<R>
where
    R: Queryable + Clone,
{
    let mut result: Vec<R> = match filter {
        Some(clauses) if !clauses.is_empty() => records
            .iter()
            .filter(|record| filter::matches_all(*record, clauses))
            .cloned()
            .collect(),
        _ => records.to_vec(),
    };

    if let Some(spec) = sort {
        sort::apply(&mut result, spec);
    }

    result
}

//! Stable sort over a named record field.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{FieldValue, Queryable};

/// Sort direction; ascending when unspecified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Sort specification: a field name plus direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    #[serde(default)]
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    pub fn ascending(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Asc)
    }
}

/// Sorts records in place by the raw text of the named field.
///
/// The sort is stable: equal keys keep their original relative order. A
/// record whose field is missing or list-valued compares equal to everything,
/// so it also stays in place. Sorting never fails, whatever the field name.
pub fn apply<R: Queryable>(records: &mut [R], spec: &SortSpec) {
    records.sort_by(|a, b| {
        let ord = match (a.field(&spec.field), b.field(&spec.field)) {
            (Some(FieldValue::Text(lhs)), Some(FieldValue::Text(rhs))) => lhs.cmp(rhs),
            _ => Ordering::Equal,
        };

        match spec.order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Rec;
    use super::*;

    fn names(records: &[Rec]) -> Vec<&str> {
        records
            .iter()
            .map(|r| match r.field("name") {
                Some(FieldValue::Text(name)) => name,
                _ => "",
            })
            .collect()
    }

    #[test]
    fn test_ascending_sort() {
        let mut records = vec![
            Rec(vec![("name", "Polska")]),
            Rec(vec![("name", "Czechy")]),
            Rec(vec![("name", "Niemcy")]),
        ];

        apply(&mut records, &SortSpec::ascending("name"));

        assert_eq!(names(&records), vec!["Czechy", "Niemcy", "Polska"]);
    }

    #[test]
    fn test_descending_sort() {
        let mut records = vec![
            Rec(vec![("name", "Polska")]),
            Rec(vec![("name", "Czechy")]),
            Rec(vec![("name", "Niemcy")]),
        ];

        apply(&mut records, &SortSpec::new("name", SortOrder::Desc));

        assert_eq!(names(&records), vec!["Polska", "Niemcy", "Czechy"]);
    }

    #[test]
    fn test_sort_is_on_raw_text_not_numeric() {
        let mut records = vec![
            Rec(vec![("name", "a"), ("population", "9")]),
            Rec(vec![("name", "b"), ("population", "38000000")]),
        ];

        apply(&mut records, &SortSpec::ascending("population"));

        // Lexicographically "38000000" < "9".
        assert_eq!(names(&records), vec!["b", "a"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut records = vec![
            Rec(vec![("name", "first"), ("code", "AA")]),
            Rec(vec![("name", "second"), ("code", "AA")]),
            Rec(vec![("name", "third"), ("code", "AA")]),
        ];

        apply(&mut records, &SortSpec::ascending("code"));

        assert_eq!(names(&records), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_unknown_field_preserves_order() {
        let mut records = vec![
            Rec(vec![("name", "Polska")]),
            Rec(vec![("name", "Czechy")]),
        ];

        apply(&mut records, &SortSpec::ascending("no_such_field"));

        assert_eq!(names(&records), vec!["Polska", "Czechy"]);
    }

    #[test]
    fn test_order_deserializes_wire_names_and_defaults_to_asc() {
        let spec: SortSpec =
            serde_json::from_str(r#"{ "field": "name", "order": "DESC" }"#).unwrap();
        assert_eq!(spec.order, SortOrder::Desc);

        let defaulted: SortSpec = serde_json::from_str(r#"{ "field": "name" }"#).unwrap();
        assert_eq!(defaulted.order, SortOrder::Asc);
    }
}

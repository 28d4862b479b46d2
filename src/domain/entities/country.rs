//! Country entity and its extended details.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Landmark;
use crate::query::{FieldValue, Queryable};

/// A country owning an ordered list of landmarks.
///
/// Country codes are unique across the entire dataset, not just within the
/// owning continent, so a lookup by code alone resolves unambiguously.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    pub capital: String,
    pub code: String,
    #[serde(default)]
    pub landmarks: Vec<Landmark>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<CountryDetails>,
}

impl Country {
    /// Creates a new Country instance.
    pub fn new(name: String, capital: String, code: String, landmarks: Vec<Landmark>) -> Self {
        Self {
            name,
            capital,
            code,
            landmarks,
            details: None,
        }
    }

    /// Returns true if a landmark with the given name exists in this country.
    pub fn has_landmark(&self, name: &str) -> bool {
        self.landmarks.iter().any(|l| l.name == name)
    }
}

impl Queryable for Country {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "name" => Some(FieldValue::Text(&self.name)),
            "capital" => Some(FieldValue::Text(&self.capital)),
            "code" => Some(FieldValue::Text(&self.code)),
            "landmarks" => Some(FieldValue::List(
                self.landmarks.iter().map(|l| l.name.as_str()).collect(),
            )),
            _ => None,
        }
    }
}

/// Optional extended country details.
///
/// Recovered from the source catalog's extended payloads; all fields are
/// optional and validated only when present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
}

impl CountryDetails {
    pub fn is_empty(&self) -> bool {
        self.population.is_none() && self.area.is_none() && self.languages.is_none()
    }
}

/// A country paired with the name of its owning continent.
///
/// Returned by code lookups, where the caller does not know the continent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocatedCountry {
    #[serde(flatten)]
    pub country: Country,
    pub continent: String,
}

/// Payload for creating a country.
///
/// `name`, `capital`, and `code` are required; missing ones are reported
/// together. `landmarks` must be a sequence when supplied and defaults to
/// an empty list.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CountryInput {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Capital must not be empty"))]
    pub capital: Option<String>,
    pub code: Option<String>,
    #[serde(default)]
    pub landmarks: Option<Vec<Landmark>>,
    #[serde(default)]
    pub details: Option<CountryDetails>,
}

/// Payload for a full country update.
///
/// `name` and `capital` are required together; `code` is preserved from the
/// stored record and `landmarks` are kept unless explicitly supplied.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CountryUpdate {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Capital must not be empty"))]
    pub capital: Option<String>,
    #[serde(default)]
    pub landmarks: Option<Vec<Landmark>>,
    #[serde(default)]
    pub details: Option<CountryDetails>,
}

/// Partial update for a country.
///
/// `None` fields are left unchanged; `code` can never be altered.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CountryPatch {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Capital must not be empty"))]
    pub capital: Option<String>,
    #[serde(default)]
    pub details: Option<CountryDetails>,
}

impl CountryPatch {
    /// Returns true when no field is supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.capital.is_none() && self.details.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_creation() {
        let country = Country::new(
            "Polska".to_string(),
            "Warszawa".to_string(),
            "PL".to_string(),
            vec![],
        );

        assert_eq!(country.code, "PL");
        assert!(country.landmarks.is_empty());
        assert!(country.details.is_none());
        assert!(!country.has_landmark("Wawel"));
    }

    #[test]
    fn test_queryable_exposes_landmark_names() {
        let country = Country::new(
            "Polska".to_string(),
            "Warszawa".to_string(),
            "PL".to_string(),
            vec![Landmark::new(
                "Wawel".to_string(),
                "Zamek".to_string(),
                "Zamek królewski w Krakowie".to_string(),
            )],
        );

        assert_eq!(
            country.field("landmarks"),
            Some(FieldValue::List(vec!["Wawel"]))
        );
        assert_eq!(country.field("capital"), Some(FieldValue::Text("Warszawa")));
        assert_eq!(country.field("population"), None);
    }

    #[test]
    fn test_details_omitted_from_wire_when_absent() {
        let country = Country::new(
            "Polska".to_string(),
            "Warszawa".to_string(),
            "PL".to_string(),
            vec![],
        );

        let value = serde_json::to_value(&country).unwrap();
        assert!(value.get("details").is_none());
    }

    #[test]
    fn test_located_country_flattens_on_wire() {
        let located = LocatedCountry {
            country: Country::new(
                "Polska".to_string(),
                "Warszawa".to_string(),
                "PL".to_string(),
                vec![],
            ),
            continent: "Europa".to_string(),
        };

        let value = serde_json::to_value(&located).unwrap();
        assert_eq!(value["code"], "PL");
        assert_eq!(value["continent"], "Europa");
    }
}

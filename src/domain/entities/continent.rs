//! Continent entity: the top level of the catalog hierarchy.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Country;
use crate::query::{FieldValue, Queryable};

/// A continent owning an ordered list of countries.
///
/// `population` and `area` are carried as text on the wire to avoid integer
/// precision loss across protocols; the filter layer parses them on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Continent {
    pub name: String,
    pub code: String,
    pub population: String,
    pub area: String,
    #[serde(default)]
    pub countries: Vec<Country>,
}

impl Continent {
    /// Creates a new Continent instance.
    pub fn new(
        name: String,
        code: String,
        population: String,
        area: String,
        countries: Vec<Country>,
    ) -> Self {
        Self {
            name,
            code,
            population,
            area,
            countries,
        }
    }

    /// Returns true if a directly-owned country uses the given code.
    pub fn has_country(&self, code: &str) -> bool {
        self.countries.iter().any(|c| c.code == code)
    }
}

impl Queryable for Continent {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "name" => Some(FieldValue::Text(&self.name)),
            "code" => Some(FieldValue::Text(&self.code)),
            "population" => Some(FieldValue::Text(&self.population)),
            "area" => Some(FieldValue::Text(&self.area)),
            "countries" => Some(FieldValue::List(
                self.countries.iter().map(|c| c.name.as_str()).collect(),
            )),
            _ => None,
        }
    }
}

/// Payload for creating a continent.
///
/// `name` and `code` are required (checked together by the validator);
/// `population` and `area` default to `"0"` and `countries` to an empty list.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ContinentInput {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: Option<String>,
    pub code: Option<String>,
    pub population: Option<String>,
    pub area: Option<String>,
    #[serde(default)]
    pub countries: Option<Vec<Country>>,
}

/// Payload for a full continent update.
///
/// All three fields are required together; `code` and the owned `countries`
/// are preserved from the stored record.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ContinentUpdate {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: Option<String>,
    pub population: Option<String>,
    pub area: Option<String>,
}

/// Partial update for a continent.
///
/// `None` fields are left unchanged; `code` can never be altered.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ContinentPatch {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: Option<String>,
    pub population: Option<String>,
    pub area: Option<String>,
}

impl ContinentPatch {
    /// Returns true when no field is supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.population.is_none() && self.area.is_none()
    }
}

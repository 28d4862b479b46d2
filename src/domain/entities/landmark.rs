//! Landmark entity: the leaf of the catalog hierarchy.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::query::{FieldValue, Queryable};

/// A landmark owned by exactly one country.
///
/// Landmark names are unique within the owning country's list, not globally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<LandmarkDetails>,
}

impl Landmark {
    /// Creates a new Landmark instance.
    pub fn new(name: String, kind: String, description: String) -> Self {
        Self {
            name,
            kind,
            description,
            details: None,
        }
    }
}

impl Queryable for Landmark {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "name" => Some(FieldValue::Text(&self.name)),
            "type" => Some(FieldValue::Text(&self.kind)),
            "description" => Some(FieldValue::Text(&self.description)),
            _ => None,
        }
    }
}

/// Optional extended landmark details.
///
/// Recovered from the source catalog's extended payloads; all fields are
/// optional and validated only when present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LandmarkDetails {
    /// One of `active`, `under_renovation`, `closed`, `planned`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// `closed`, or an `HH:MM-HH:MM` range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visiting_hours: Option<String>,
    /// `free`, or an `N-M` range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
}

/// Payload for creating a landmark.
///
/// `name`, `type`, and `description` are required; missing ones are reported
/// together, and `name` is additionally checked against the shared length
/// rule.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LandmarkInput {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: Option<String>,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Type must not be empty"))]
    pub kind: Option<String>,
    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: Option<String>,
    #[serde(default)]
    pub details: Option<LandmarkDetails>,
}

/// Payload for a full landmark update.
///
/// `type` and `description` are required together; the landmark's `name` is
/// taken from the lookup key and never from the payload.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LandmarkUpdate {
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Type must not be empty"))]
    pub kind: Option<String>,
    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: Option<String>,
    #[serde(default)]
    pub details: Option<LandmarkDetails>,
}

/// Partial update for a landmark.
///
/// `None` fields are left unchanged; `name` can never be altered.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LandmarkPatch {
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Type must not be empty"))]
    pub kind: Option<String>,
    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: Option<String>,
    #[serde(default)]
    pub details: Option<LandmarkDetails>,
}

impl LandmarkPatch {
    /// Returns true when no field is supplied.
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.description.is_none() && self.details.is_none()
    }
}

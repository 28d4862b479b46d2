//! Structural and format validation for mutation payloads.
//!
//! Create and full-update validators report missing required fields
//! together rather than failing on the first one; patch validators are
//! lenient and only check the fields actually supplied. Uniqueness is not
//! checked here; conflicts are a service-level concern with their own
//! error kind.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Value, json};
use validator::Validate;

use super::entities::{
    ContinentInput, ContinentPatch, ContinentUpdate, CountryDetails, CountryInput, CountryPatch,
    CountryUpdate, LandmarkDetails, LandmarkInput, LandmarkPatch, LandmarkUpdate,
};
use crate::error::AppError;

/// Compiled regex for continent/country codes: exactly two uppercase letters.
static CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z]{2}$").unwrap());

/// Compiled regex for visiting hours: `HH:MM-HH:MM`, 24-hour clock.
static VISITING_HOURS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-1][0-9]|2[0-3]):[0-5][0-9]-([0-1][0-9]|2[0-3]):[0-5][0-9]$").unwrap()
});

/// Compiled regex for price ranges: `N-M`.
static PRICE_RANGE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+-\d+$").unwrap());

/// Accepted landmark statuses.
const LANDMARK_STATUSES: &[&str] = &["active", "under_renovation", "closed", "planned"];

/// Uppercases a caller-supplied code before lookup or storage.
///
/// All code lookups are case-sensitive on the normalized form.
pub fn normalize_code(code: &str) -> String {
    code.to_uppercase()
}

/// Validates a continent code: exactly two uppercase letters.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the code does not match.
pub fn validate_continent_code(code: &str) -> Result<(), AppError> {
    if !CODE_REGEX.is_match(code) {
        return Err(AppError::bad_request(
            "Invalid continent code format (2 uppercase letters required)",
            json!({ "code": code }),
        ));
    }
    Ok(())
}

/// Validates a country code: exactly two uppercase letters.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the code does not match.
pub fn validate_country_code(code: &str) -> Result<(), AppError> {
    if !CODE_REGEX.is_match(code) {
        return Err(AppError::bad_request(
            "Invalid country code format (2 uppercase letters required)",
            json!({ "code": code }),
        ));
    }
    Ok(())
}

/// Validates a continent create payload.
///
/// `name` and `code` are required together; the code format itself is
/// checked by the service after uppercase normalization.
pub fn validate_new_continent(input: &ContinentInput) -> Result<(), AppError> {
    let mut missing = Vec::new();
    if is_blank(&input.name) {
        missing.push("name");
    }
    if is_blank(&input.code) {
        missing.push("code");
    }
    if !missing.is_empty() {
        return Err(missing_fields_error(&missing));
    }

    input.validate().map_err(map_field_errors)
}

/// Validates a full continent update: `name`, `population`, and `area` are
/// all required.
pub fn validate_continent_update(update: &ContinentUpdate) -> Result<(), AppError> {
    let mut missing = Vec::new();
    if is_blank(&update.name) {
        missing.push("name");
    }
    if is_blank(&update.population) {
        missing.push("population");
    }
    if is_blank(&update.area) {
        missing.push("area");
    }
    if !missing.is_empty() {
        return Err(missing_fields_error(&missing));
    }

    update.validate().map_err(map_field_errors)
}

/// Validates a continent patch: at least one field, each checked only when
/// supplied.
pub fn validate_continent_patch(patch: &ContinentPatch) -> Result<(), AppError> {
    if patch.is_empty() {
        return Err(AppError::bad_request("No fields to update", json!({})));
    }

    patch.validate().map_err(map_field_errors)
}

/// Validates a country create payload.
///
/// `name`, `capital`, and `code` are required and reported together when
/// missing. The `landmarks` sequence shape is enforced by the payload type;
/// extended details are checked when present.
pub fn validate_new_country(input: &CountryInput) -> Result<(), AppError> {
    let mut missing = Vec::new();
    if is_blank(&input.name) {
        missing.push("name");
    }
    if is_blank(&input.capital) {
        missing.push("capital");
    }
    if is_blank(&input.code) {
        missing.push("code");
    }
    if !missing.is_empty() {
        return Err(missing_fields_error(&missing));
    }

    input.validate().map_err(map_field_errors)?;

    if let Some(details) = &input.details {
        validate_country_details(details)?;
    }
    Ok(())
}

/// Validates a full country update: `name` and `capital` are required
/// together.
pub fn validate_country_update(update: &CountryUpdate) -> Result<(), AppError> {
    let mut missing = Vec::new();
    if is_blank(&update.name) {
        missing.push("name");
    }
    if is_blank(&update.capital) {
        missing.push("capital");
    }
    if !missing.is_empty() {
        return Err(missing_fields_error(&missing));
    }

    update.validate().map_err(map_field_errors)?;

    if let Some(details) = &update.details {
        validate_country_details(details)?;
    }
    Ok(())
}

/// Validates a country patch: at least one field, each checked only when
/// supplied.
pub fn validate_country_patch(patch: &CountryPatch) -> Result<(), AppError> {
    if patch.is_empty() {
        return Err(AppError::bad_request("No fields to update", json!({})));
    }

    patch.validate().map_err(map_field_errors)?;

    if let Some(details) = &patch.details {
        validate_country_details(details)?;
    }
    Ok(())
}

/// Validates extended country details when present on a payload.
pub fn validate_country_details(details: &CountryDetails) -> Result<(), AppError> {
    if let Some(population) = &details.population {
        if population.parse::<f64>().is_err() {
            return Err(AppError::bad_request(
                "Population must be a number",
                json!({ "population": population }),
            ));
        }
    }
    if let Some(area) = &details.area {
        if area.parse::<f64>().is_err() {
            return Err(AppError::bad_request(
                "Area must be a number",
                json!({ "area": area }),
            ));
        }
    }
    Ok(())
}

/// Validates a landmark create payload.
///
/// `name`, `type`, and `description` are required together; `name` is
/// additionally checked against the shared 2-100 length rule.
pub fn validate_new_landmark(input: &LandmarkInput) -> Result<(), AppError> {
    let mut missing = Vec::new();
    if is_blank(&input.name) {
        missing.push("name");
    }
    if is_blank(&input.kind) {
        missing.push("type");
    }
    if is_blank(&input.description) {
        missing.push("description");
    }
    if !missing.is_empty() {
        return Err(missing_fields_error(&missing));
    }

    input.validate().map_err(map_field_errors)?;

    if let Some(details) = &input.details {
        validate_landmark_details(details)?;
    }
    Ok(())
}

/// Validates a full landmark update: `type` and `description` are required
/// together. The name is supplied by the lookup key, not the payload.
pub fn validate_landmark_update(update: &LandmarkUpdate) -> Result<(), AppError> {
    let mut missing = Vec::new();
    if is_blank(&update.kind) {
        missing.push("type");
    }
    if is_blank(&update.description) {
        missing.push("description");
    }
    if !missing.is_empty() {
        return Err(missing_fields_error(&missing));
    }

    update.validate().map_err(map_field_errors)?;

    if let Some(details) = &update.details {
        validate_landmark_details(details)?;
    }
    Ok(())
}

/// Validates a landmark patch: at least one field, each checked only when
/// supplied.
pub fn validate_landmark_patch(patch: &LandmarkPatch) -> Result<(), AppError> {
    if patch.is_empty() {
        return Err(AppError::bad_request("No fields to update", json!({})));
    }

    patch.validate().map_err(map_field_errors)?;

    if let Some(details) = &patch.details {
        validate_landmark_details(details)?;
    }
    Ok(())
}

/// Validates extended landmark details when present on a payload.
pub fn validate_landmark_details(details: &LandmarkDetails) -> Result<(), AppError> {
    if let Some(status) = &details.status {
        if !LANDMARK_STATUSES.contains(&status.as_str()) {
            return Err(AppError::bad_request(
                "Invalid landmark status",
                json!({ "status": status, "allowed": LANDMARK_STATUSES }),
            ));
        }
    }

    if let Some(hours) = &details.visiting_hours {
        if hours != "closed" && !VISITING_HOURS_REGEX.is_match(hours) {
            return Err(AppError::bad_request(
                "Invalid visiting hours format",
                json!({ "visiting_hours": hours }),
            ));
        }
    }

    if let Some(range) = &details.price_range {
        if range != "free" && !PRICE_RANGE_REGEX.is_match(range) {
            return Err(AppError::bad_request(
                "Invalid price range format",
                json!({ "price_range": range }),
            ));
        }
    }

    Ok(())
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().is_none_or(|value| value.is_empty())
}

fn missing_fields_error(missing: &[&str]) -> AppError {
    AppError::bad_request(
        "Missing required fields",
        json!({ "missing_fields": missing }),
    )
}

/// Flattens `validator` field errors into one `Validation` error whose
/// details map field names to their violated-rule messages.
fn map_field_errors(errors: validator::ValidationErrors) -> AppError {
    let fields: serde_json::Map<String, Value> = errors
        .field_errors()
        .iter()
        .map(|(field, field_errors)| {
            let messages: Vec<String> = field_errors
                .iter()
                .map(|error| {
                    error
                        .message
                        .as_ref()
                        .map(|message| message.to_string())
                        .unwrap_or_else(|| error.code.to_string())
                })
                .collect();
            (field.to_string(), json!(messages))
        })
        .collect();

    AppError::bad_request("Invalid payload", Value::Object(fields))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(
        status: Option<&str>,
        hours: Option<&str>,
        price: Option<&str>,
    ) -> LandmarkDetails {
        LandmarkDetails {
            status: status.map(str::to_string),
            visiting_hours: hours.map(str::to_string),
            price_range: price.map(str::to_string),
        }
    }

    #[test]
    fn test_code_format() {
        assert!(validate_continent_code("EU").is_ok());
        assert!(validate_country_code("PL").is_ok());

        for invalid in ["E", "EUR", "eu", "E1", "", "ĄĆ"] {
            assert!(validate_continent_code(invalid).is_err(), "{invalid}");
            assert!(validate_country_code(invalid).is_err(), "{invalid}");
        }
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code("pl"), "PL");
        assert_eq!(normalize_code("PL"), "PL");
    }

    #[test]
    fn test_new_continent_requires_name_and_code_together() {
        let err = validate_new_continent(&ContinentInput::default()).unwrap_err();

        match err {
            AppError::Validation { details, .. } => {
                assert_eq!(details["missing_fields"], json!(["name", "code"]));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_new_continent_valid() {
        let input = ContinentInput {
            name: Some("Europa".to_string()),
            code: Some("EU".to_string()),
            ..Default::default()
        };
        assert!(validate_new_continent(&input).is_ok());
    }

    #[test]
    fn test_continent_update_requires_all_fields() {
        let update = ContinentUpdate {
            name: Some("Europa".to_string()),
            ..Default::default()
        };
        let err = validate_continent_update(&update).unwrap_err();

        match err {
            AppError::Validation { details, .. } => {
                assert_eq!(details["missing_fields"], json!(["population", "area"]));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_continent_patch_rejects_empty() {
        assert!(validate_continent_patch(&ContinentPatch::default()).is_err());

        let patch = ContinentPatch {
            population: Some("750000000".to_string()),
            ..Default::default()
        };
        assert!(validate_continent_patch(&patch).is_ok());
    }

    #[test]
    fn test_new_country_reports_missing_fields_together() {
        let input = CountryInput {
            name: Some("Polska".to_string()),
            ..Default::default()
        };
        let err = validate_new_country(&input).unwrap_err();

        match err {
            AppError::Validation { details, .. } => {
                assert_eq!(details["missing_fields"], json!(["capital", "code"]));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_string_counts_as_missing() {
        let input = CountryInput {
            name: Some("Polska".to_string()),
            capital: Some(String::new()),
            code: Some("PL".to_string()),
            ..Default::default()
        };
        let err = validate_new_country(&input).unwrap_err();

        match err {
            AppError::Validation { details, .. } => {
                assert_eq!(details["missing_fields"], json!(["capital"]));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_country_name_length_rule() {
        let input = CountryInput {
            name: Some("P".to_string()),
            capital: Some("Warszawa".to_string()),
            code: Some("PL".to_string()),
            ..Default::default()
        };
        let err = validate_new_country(&input).unwrap_err();

        match err {
            AppError::Validation { details, .. } => {
                assert!(details.get("name").is_some());
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        let too_long = CountryInput {
            name: Some("x".repeat(101)),
            capital: Some("Warszawa".to_string()),
            code: Some("PL".to_string()),
            ..Default::default()
        };
        assert!(validate_new_country(&too_long).is_err());
    }

    #[test]
    fn test_country_details_numeric_rules() {
        let ok = CountryDetails {
            population: Some("38000000".to_string()),
            area: Some("312696".to_string()),
            languages: Some(vec!["polski".to_string()]),
        };
        assert!(validate_country_details(&ok).is_ok());

        let bad = CountryDetails {
            population: Some("dużo".to_string()),
            ..Default::default()
        };
        assert!(validate_country_details(&bad).is_err());
    }

    #[test]
    fn test_new_landmark_requirements() {
        let err = validate_new_landmark(&LandmarkInput::default()).unwrap_err();
        match err {
            AppError::Validation { details, .. } => {
                assert_eq!(
                    details["missing_fields"],
                    json!(["name", "type", "description"])
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        let input = LandmarkInput {
            name: Some("Wawel".to_string()),
            kind: Some("Zamek".to_string()),
            description: Some("Zamek królewski w Krakowie".to_string()),
            ..Default::default()
        };
        assert!(validate_new_landmark(&input).is_ok());

        let short_name = LandmarkInput {
            name: Some("W".to_string()),
            kind: Some("Zamek".to_string()),
            description: Some("Zamek królewski w Krakowie".to_string()),
            ..Default::default()
        };
        assert!(validate_new_landmark(&short_name).is_err());
    }

    #[test]
    fn test_landmark_update_requires_type_and_description() {
        let err = validate_landmark_update(&LandmarkUpdate::default()).unwrap_err();
        match err {
            AppError::Validation { details, .. } => {
                assert_eq!(details["missing_fields"], json!(["type", "description"]));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_landmark_patch_lenient() {
        assert!(validate_landmark_patch(&LandmarkPatch::default()).is_err());

        let patch = LandmarkPatch {
            description: Some("Nowy opis".to_string()),
            ..Default::default()
        };
        assert!(validate_landmark_patch(&patch).is_ok());
    }

    #[test]
    fn test_landmark_status_values() {
        for status in ["active", "under_renovation", "closed", "planned"] {
            assert!(validate_landmark_details(&details(Some(status), None, None)).is_ok());
        }
        assert!(validate_landmark_details(&details(Some("ruined"), None, None)).is_err());
    }

    #[test]
    fn test_visiting_hours_format() {
        assert!(validate_landmark_details(&details(None, Some("closed"), None)).is_ok());
        assert!(validate_landmark_details(&details(None, Some("09:00-17:00"), None)).is_ok());
        assert!(validate_landmark_details(&details(None, Some("23:59-00:00"), None)).is_ok());

        assert!(validate_landmark_details(&details(None, Some("25:00-17:00"), None)).is_err());
        assert!(validate_landmark_details(&details(None, Some("9:00-17:00"), None)).is_err());
        assert!(validate_landmark_details(&details(None, Some("open"), None)).is_err());
    }

    #[test]
    fn test_price_range_format() {
        assert!(validate_landmark_details(&details(None, None, Some("free"))).is_ok());
        assert!(validate_landmark_details(&details(None, None, Some("10-50"))).is_ok());

        assert!(validate_landmark_details(&details(None, None, Some("10-"))).is_err());
        assert!(validate_landmark_details(&details(None, None, Some("cheap"))).is_err());
    }
}

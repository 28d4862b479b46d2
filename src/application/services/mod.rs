//! Business logic services for the application layer.

pub mod continent_service;
pub mod country_service;
pub mod landmark_service;

pub use continent_service::ContinentService;
pub use country_service::CountryService;
pub use landmark_service::LandmarkService;

use serde::Serialize;

/// Outcome descriptor returned by delete operations.
///
/// Deletes report failure through this descriptor instead of an error:
/// deleting an absent or malformed key is an expected, non-exceptional
/// outcome and must not alter the dataset. `code` carries the
/// HTTP-status-like string adapters expect on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteOutcome {
    pub success: bool,
    pub message: String,
    pub code: String,
}

impl DeleteOutcome {
    pub fn deleted(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            code: "200".to_string(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            code: "400".to_string(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            code: "404".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_codes() {
        assert!(DeleteOutcome::deleted("x").success);
        assert_eq!(DeleteOutcome::deleted("x").code, "200");
        assert!(!DeleteOutcome::invalid("x").success);
        assert_eq!(DeleteOutcome::invalid("x").code, "400");
        assert_eq!(DeleteOutcome::not_found("x").code, "404");
    }
}

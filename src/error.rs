//! Application error types shared across all layers.
//!
//! Domain and infrastructure code returns [`AppError`]; adapters (the CLI, or
//! any external protocol binding) convert it into their own representation via
//! [`AppError::to_info`]. Client errors (validation, not-found, conflict,
//! filter) are kept distinct from server faults ([`AppError::Internal`]).

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Serializable error descriptor handed to protocol adapters.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Application-level error.
///
/// Variants map to the client/server split an adapter needs:
/// `Validation`, `NotFound`, `Conflict`, and `Filter` are client errors;
/// `Internal` covers persistence I/O and other faults.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    Filter { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn filter(message: impl Into<String>, details: Value) -> Self {
        Self::Filter {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Stable machine-readable error code.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::NotFound { .. } => "not_found",
            Self::Conflict { .. } => "conflict",
            Self::Filter { .. } => "filter_error",
            Self::Internal { .. } => "internal_error",
        }
    }

    /// True for errors caused by the caller rather than the service.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Internal { .. })
    }

    /// Converts into the serializable descriptor shape.
    pub fn to_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            Self::Validation { message, details }
            | Self::NotFound { message, details }
            | Self::Conflict { message, details }
            | Self::Filter { message, details }
            | Self::Internal { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code: self.kind(),
            message,
            details,
        }
    }
}

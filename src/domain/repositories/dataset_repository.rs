//! Repository trait for whole-document dataset access.

use crate::domain::dataset::Dataset;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the backing catalog document.
///
/// The document is always read and written as a whole; there is no partial
/// persistence. Callers that mutate must do so through
/// [`crate::domain::store::DocumentStore`], which serializes the
/// load-mutate-persist sequence.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::JsonFileRepository`] - JSON file on disk
/// - [`crate::infrastructure::persistence::InMemoryRepository`] - in-process document
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatasetRepository: Send + Sync {
    /// Loads the full document.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the document cannot be read or
    /// parsed.
    async fn load(&self) -> Result<Dataset, AppError>;

    /// Overwrites the full document.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the document cannot be written.
    async fn save(&self, dataset: &Dataset) -> Result<(), AppError>;
}

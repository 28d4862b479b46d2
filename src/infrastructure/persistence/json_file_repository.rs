//! JSON-file implementation of the dataset repository.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::dataset::Dataset;
use crate::domain::repositories::DatasetRepository;
use crate::error::AppError;

/// Repository backed by a single JSON document on disk.
///
/// Every load reads and parses the whole file; every save overwrites it.
/// There is no partial write: the document is small enough that whole-file
/// replacement is the simplest correct persistence model, and the
/// [`crate::domain::store::DocumentStore`] write lock keeps concurrent
/// mutations from interleaving.
pub struct JsonFileRepository {
    path: PathBuf,
    pretty: bool,
}

impl JsonFileRepository {
    /// Creates a repository over the given file path.
    ///
    /// With `pretty` set, saves use two-space indentation so the persisted
    /// file stays diffable against hand-edited fixtures.
    pub fn new(path: impl Into<PathBuf>, pretty: bool) -> Self {
        Self {
            path: path.into(),
            pretty,
        }
    }

    fn path_details(&self) -> serde_json::Value {
        json!({ "path": self.path.display().to_string() })
    }
}

#[async_trait]
impl DatasetRepository for JsonFileRepository {
    async fn load(&self) -> Result<Dataset, AppError> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "failed to read data file");
            AppError::internal("Failed to read data file", self.path_details())
        })?;

        serde_json::from_str(&raw).map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "failed to parse data file");
            AppError::internal("Failed to parse data file", self.path_details())
        })
    }

    async fn save(&self, dataset: &Dataset) -> Result<(), AppError> {
        let serialized = if self.pretty {
            serde_json::to_string_pretty(dataset)
        } else {
            serde_json::to_string(dataset)
        }
        .map_err(|e| {
            tracing::error!(error = %e, "failed to serialize dataset");
            AppError::internal("Failed to serialize dataset", json!({}))
        })?;

        tokio::fs::write(&self.path, serialized).await.map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "failed to write data file");
            AppError::internal("Failed to write data file", self.path_details())
        })
    }
}

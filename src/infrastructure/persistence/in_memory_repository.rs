//! In-memory implementation of the dataset repository.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::dataset::Dataset;
use crate::domain::repositories::DatasetRepository;
use crate::error::AppError;

/// Repository holding the document in process memory.
///
/// Used by tests and as a fixture backend; behaves like the file-backed
/// repository (loads return an independent copy, saves replace the whole
/// document) without touching disk.
pub struct InMemoryRepository {
    document: RwLock<Dataset>,
}

impl InMemoryRepository {
    /// Creates a repository seeded with the given document.
    pub fn new(initial: Dataset) -> Self {
        Self {
            document: RwLock::new(initial),
        }
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new(Dataset::default())
    }
}

#[async_trait]
impl DatasetRepository for InMemoryRepository {
    async fn load(&self) -> Result<Dataset, AppError> {
        Ok(self.document.read().await.clone())
    }

    async fn save(&self, dataset: &Dataset) -> Result<(), AppError> {
        *self.document.write().await = dataset.clone();
        Ok(())
    }
}

//! Single-writer document store.
//!
//! The source pattern this crate replaces loaded the document fresh in every
//! handler and overwrote the whole file on save, so two concurrent mutations
//! could silently lose one writer's update. The store closes that race: every
//! mutation runs the full load-mutate-persist sequence while holding one
//! write lock, so at most one mutation is in flight at a time.

use std::sync::Arc;

use tokio::sync::Mutex;

use super::dataset::Dataset;
use super::repositories::DatasetRepository;
use crate::error::AppError;

/// Owns the backing document and serializes mutations to it.
pub struct DocumentStore<R: DatasetRepository> {
    repository: Arc<R>,
    write_lock: Mutex<()>,
}

impl<R: DatasetRepository> DocumentStore<R> {
    /// Creates a new store over a repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            write_lock: Mutex::new(()),
        }
    }

    /// Loads a fresh copy of the document for a read-only operation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when loading fails.
    pub async fn read(&self) -> Result<Dataset, AppError> {
        self.repository.load().await
    }

    /// Runs a mutation against a freshly loaded document and persists the
    /// result, all under the write lock.
    ///
    /// The mutator's error aborts the sequence before anything is written,
    /// so a failed mutation never leaves a partial edit behind.
    ///
    /// # Errors
    ///
    /// Returns the mutator's error unchanged, or [`AppError::Internal`] when
    /// loading or persisting fails.
    pub async fn update<T, F>(&self, mutate: F) -> Result<T, AppError>
    where
        T: Send,
        F: FnOnce(&mut Dataset) -> Result<T, AppError> + Send,
    {
        let _guard = self.write_lock.lock().await;

        let mut dataset = self.repository.load().await?;
        let value = mutate(&mut dataset)?;
        self.repository.save(&dataset).await?;

        tracing::debug!("document mutation persisted");
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::ContinentEntry;
    use crate::domain::entities::Continent;
    use crate::domain::repositories::MockDatasetRepository;
    use serde_json::json;

    fn europe_entry() -> ContinentEntry {
        ContinentEntry {
            continent: Continent::new(
                "Europa".to_string(),
                "EU".to_string(),
                "746400000".to_string(),
                "10180000".to_string(),
                vec![],
            ),
        }
    }

    #[tokio::test]
    async fn test_update_persists_mutated_document() {
        let mut mock = MockDatasetRepository::new();

        mock.expect_load()
            .times(1)
            .returning(|| Ok(Dataset::default()));
        mock.expect_save()
            .withf(|dataset| dataset.find_continent("EU").is_some())
            .times(1)
            .returning(|_| Ok(()));

        let store = DocumentStore::new(Arc::new(mock));

        let result = store
            .update(|dataset| {
                dataset.push_continent(europe_entry().continent);
                Ok(dataset.entries.len())
            })
            .await;

        assert_eq!(result.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_does_not_persist_on_mutator_error() {
        let mut mock = MockDatasetRepository::new();

        mock.expect_load()
            .times(1)
            .returning(|| Ok(Dataset::new(vec![europe_entry()])));
        mock.expect_save().times(0);

        let store = DocumentStore::new(Arc::new(mock));

        let result: Result<(), AppError> = store
            .update(|dataset| {
                dataset.remove_continent("EU");
                Err(AppError::conflict("refused", json!({})))
            })
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_read_loads_fresh_copy() {
        let mut mock = MockDatasetRepository::new();

        mock.expect_load()
            .times(2)
            .returning(|| Ok(Dataset::new(vec![europe_entry()])));

        let store = DocumentStore::new(Arc::new(mock));

        assert_eq!(store.read().await.unwrap().entries.len(), 1);
        assert_eq!(store.read().await.unwrap().entries.len(), 1);
    }
}

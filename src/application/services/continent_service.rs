//! Continent CRUD service.

use std::sync::Arc;

use serde_json::json;

use super::DeleteOutcome;
use crate::domain::entities::{Continent, ContinentInput, ContinentPatch, ContinentUpdate};
use crate::domain::repositories::DatasetRepository;
use crate::domain::store::DocumentStore;
use crate::domain::validation::{
    normalize_code, validate_continent_code, validate_continent_patch, validate_continent_update,
    validate_new_continent,
};
use crate::error::AppError;
use crate::query::{self, FilterClause, SortSpec};

/// Service for managing continents, the top level of the catalog.
///
/// All mutations run through the document store's single-writer lock;
/// reads work on a fresh copy of the document.
pub struct ContinentService<R: DatasetRepository> {
    store: Arc<DocumentStore<R>>,
}

impl<R: DatasetRepository> ContinentService<R> {
    /// Creates a new continent service.
    pub fn new(store: Arc<DocumentStore<R>>) -> Self {
        Self { store }
    }

    /// Lists continents through the filter-then-sort pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the document cannot be loaded.
    pub async fn list_continents(
        &self,
        filter: Option<&[FilterClause]>,
        sort: Option<&SortSpec>,
    ) -> Result<Vec<Continent>, AppError> {
        let dataset = self.store.read().await?;
        let continents: Vec<Continent> = dataset.continents().cloned().collect();

        Ok(query::run(&continents, filter, sort))
    }

    /// Retrieves a continent by its two-letter code.
    ///
    /// The code is uppercased before the lookup.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed code and
    /// [`AppError::NotFound`] when no continent matches.
    pub async fn get_continent(&self, code: &str) -> Result<Continent, AppError> {
        let code = normalize_code(code);
        validate_continent_code(&code)?;

        let dataset = self.store.read().await?;
        dataset.find_continent(&code).cloned().ok_or_else(|| {
            AppError::not_found("Continent not found", json!({ "code": code }))
        })
    }

    /// Creates a continent.
    ///
    /// `population` and `area` default to `"0"` and `countries` to an empty
    /// list when not supplied.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if required fields are missing or
    /// malformed, and [`AppError::Conflict`] when the code is already taken.
    pub async fn create_continent(&self, input: ContinentInput) -> Result<Continent, AppError> {
        validate_new_continent(&input)?;

        let code = normalize_code(input.code.as_deref().unwrap_or_default());
        validate_continent_code(&code)?;

        let continent = Continent::new(
            input.name.unwrap_or_default(),
            code,
            input.population.unwrap_or_else(|| "0".to_string()),
            input.area.unwrap_or_else(|| "0".to_string()),
            input.countries.unwrap_or_default(),
        );

        let created = self
            .store
            .update(move |dataset| {
                if dataset.find_continent(&continent.code).is_some() {
                    return Err(AppError::conflict(
                        "Continent with this code already exists",
                        json!({ "code": continent.code }),
                    ));
                }

                dataset.push_continent(continent.clone());
                Ok(continent)
            })
            .await?;

        tracing::info!(code = %created.code, "continent created");
        Ok(created)
    }

    /// Fully updates a continent.
    ///
    /// `name`, `population`, and `area` are all required; the code and the
    /// owned countries are preserved from the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] on a malformed code or payload and
    /// [`AppError::NotFound`] when no continent matches.
    pub async fn update_continent(
        &self,
        code: &str,
        update: ContinentUpdate,
    ) -> Result<Continent, AppError> {
        let code = normalize_code(code);
        validate_continent_code(&code)?;
        validate_continent_update(&update)?;

        self.store
            .update(move |dataset| {
                let continent = dataset.find_continent_mut(&code).ok_or_else(|| {
                    AppError::not_found("Continent not found", json!({ "code": code }))
                })?;

                continent.name = update.name.unwrap_or_default();
                continent.population = update.population.unwrap_or_default();
                continent.area = update.area.unwrap_or_default();

                Ok(continent.clone())
            })
            .await
    }

    /// Partially updates a continent: only supplied fields are overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the payload is empty or a
    /// supplied field is malformed, and [`AppError::NotFound`] when no
    /// continent matches.
    pub async fn patch_continent(
        &self,
        code: &str,
        patch: ContinentPatch,
    ) -> Result<Continent, AppError> {
        let code = normalize_code(code);
        validate_continent_code(&code)?;
        validate_continent_patch(&patch)?;

        self.store
            .update(move |dataset| {
                let continent = dataset.find_continent_mut(&code).ok_or_else(|| {
                    AppError::not_found("Continent not found", json!({ "code": code }))
                })?;

                if let Some(name) = patch.name {
                    continent.name = name;
                }
                if let Some(population) = patch.population {
                    continent.population = population;
                }
                if let Some(area) = patch.area {
                    continent.area = area;
                }

                Ok(continent.clone())
            })
            .await
    }

    /// Deletes a continent and, by ownership, all of its descendants.
    ///
    /// Returns a [`DeleteOutcome`] descriptor; a malformed or unknown code
    /// is a failed outcome, not an error, and leaves the dataset untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] only on persistence failures.
    pub async fn delete_continent(&self, code: &str) -> Result<DeleteOutcome, AppError> {
        let code = normalize_code(code);
        if validate_continent_code(&code).is_err() {
            return Ok(DeleteOutcome::invalid("Invalid continent code format"));
        }

        let removed = {
            let code = code.clone();
            self.store
                .update(move |dataset| {
                    if dataset.remove_continent(&code) {
                        Ok(())
                    } else {
                        Err(AppError::not_found(
                            "Continent not found",
                            json!({ "code": code }),
                        ))
                    }
                })
                .await
        };

        match removed {
            Ok(()) => {
                tracing::info!(code = %code, "continent deleted");
                Ok(DeleteOutcome::deleted("Continent deleted"))
            }
            Err(AppError::NotFound { .. }) => Ok(DeleteOutcome::not_found("Continent not found")),
            Err(other) => Err(other),
        }
    }
}

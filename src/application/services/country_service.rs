//! Country CRUD service.

use std::sync::Arc;

use serde_json::json;

use super::DeleteOutcome;
use crate::domain::entities::{
    Country, CountryInput, CountryPatch, CountryUpdate, LocatedCountry,
};
use crate::domain::repositories::DatasetRepository;
use crate::domain::store::DocumentStore;
use crate::domain::validation::{
    normalize_code, validate_continent_code, validate_country_code, validate_country_patch,
    validate_country_update, validate_new_country,
};
use crate::error::AppError;
use crate::query::{self, FilterClause, SortSpec};

/// Service for managing countries across all continents.
///
/// Country codes are unique across the entire dataset, so every lookup and
/// conflict check scans all continents, not just one.
pub struct CountryService<R: DatasetRepository> {
    store: Arc<DocumentStore<R>>,
}

impl<R: DatasetRepository> CountryService<R> {
    /// Creates a new country service.
    pub fn new(store: Arc<DocumentStore<R>>) -> Self {
        Self { store }
    }

    /// Lists countries flattened across continents, through the
    /// filter-then-sort pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the document cannot be loaded.
    pub async fn list_countries(
        &self,
        filter: Option<&[FilterClause]>,
        sort: Option<&SortSpec>,
    ) -> Result<Vec<Country>, AppError> {
        let dataset = self.store.read().await?;
        let countries: Vec<Country> = dataset.countries().cloned().collect();

        Ok(query::run(&countries, filter, sort))
    }

    /// Retrieves a country by code, along with its owning continent's name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed code and
    /// [`AppError::NotFound`] when no country matches.
    pub async fn get_country(&self, code: &str) -> Result<LocatedCountry, AppError> {
        let code = normalize_code(code);
        validate_country_code(&code)?;

        let dataset = self.store.read().await?;
        dataset
            .find_country(&code)
            .map(|(continent, country)| LocatedCountry {
                country: country.clone(),
                continent: continent.name.clone(),
            })
            .ok_or_else(|| AppError::not_found("Country not found", json!({ "code": code })))
    }

    /// Creates a country under an existing continent.
    ///
    /// `landmarks` defaults to an empty list. The continent must exist, and
    /// the country code must be unused anywhere in the dataset.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for malformed codes or payload,
    /// [`AppError::NotFound`] when the continent is absent, and
    /// [`AppError::Conflict`] when the code is already taken.
    pub async fn create_country(
        &self,
        continent_code: &str,
        input: CountryInput,
    ) -> Result<Country, AppError> {
        let continent_code = normalize_code(continent_code);
        validate_continent_code(&continent_code)?;
        validate_new_country(&input)?;

        let code = normalize_code(input.code.as_deref().unwrap_or_default());
        validate_country_code(&code)?;

        let country = Country {
            name: input.name.unwrap_or_default(),
            capital: input.capital.unwrap_or_default(),
            code,
            landmarks: input.landmarks.unwrap_or_default(),
            details: input.details,
        };

        let created = self
            .store
            .update(move |dataset| {
                if dataset.find_continent(&continent_code).is_none() {
                    return Err(AppError::not_found(
                        "Continent not found",
                        json!({ "code": continent_code }),
                    ));
                }

                if dataset.has_country_code(&country.code) {
                    return Err(AppError::conflict(
                        "Country with this code already exists",
                        json!({ "code": country.code }),
                    ));
                }

                let continent = dataset
                    .find_continent_mut(&continent_code)
                    .ok_or_else(|| {
                        AppError::not_found(
                            "Continent not found",
                            json!({ "code": continent_code }),
                        )
                    })?;
                continent.countries.push(country.clone());
                Ok(country)
            })
            .await?;

        tracing::info!(code = %created.code, "country created");
        Ok(created)
    }

    /// Fully updates a country.
    ///
    /// `name` and `capital` are required together. The code is preserved
    /// from the stored record; landmarks are kept unless explicitly
    /// supplied, since they are managed through their own operations.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] on a malformed code or payload and
    /// [`AppError::NotFound`] when no country matches.
    pub async fn update_country(
        &self,
        code: &str,
        update: CountryUpdate,
    ) -> Result<Country, AppError> {
        let code = normalize_code(code);
        validate_country_code(&code)?;
        validate_country_update(&update)?;

        self.store
            .update(move |dataset| {
                let country = dataset.find_country_mut(&code).ok_or_else(|| {
                    AppError::not_found("Country not found", json!({ "code": code }))
                })?;

                country.name = update.name.unwrap_or_default();
                country.capital = update.capital.unwrap_or_default();
                country.details = update.details;
                if let Some(landmarks) = update.landmarks {
                    country.landmarks = landmarks;
                }

                Ok(country.clone())
            })
            .await
    }

    /// Partially updates a country: only supplied fields are overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the payload is empty or a
    /// supplied field is malformed, and [`AppError::NotFound`] when no
    /// country matches.
    pub async fn patch_country(
        &self,
        code: &str,
        patch: CountryPatch,
    ) -> Result<Country, AppError> {
        let code = normalize_code(code);
        validate_country_code(&code)?;
        validate_country_patch(&patch)?;

        self.store
            .update(move |dataset| {
                let country = dataset.find_country_mut(&code).ok_or_else(|| {
                    AppError::not_found("Country not found", json!({ "code": code }))
                })?;

                if let Some(name) = patch.name {
                    country.name = name;
                }
                if let Some(capital) = patch.capital {
                    country.capital = capital;
                }
                if let Some(details) = patch.details {
                    country.details = Some(details);
                }

                Ok(country.clone())
            })
            .await
    }

    /// Deletes a country and, by ownership, all of its landmarks.
    ///
    /// Returns a [`DeleteOutcome`] descriptor; a malformed or unknown code
    /// is a failed outcome, not an error, and leaves the dataset untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] only on persistence failures.
    pub async fn delete_country(&self, code: &str) -> Result<DeleteOutcome, AppError> {
        let code = normalize_code(code);
        if validate_country_code(&code).is_err() {
            return Ok(DeleteOutcome::invalid("Invalid country code format"));
        }

        let removed = {
            let code = code.clone();
            self.store
                .update(move |dataset| {
                    if dataset.remove_country(&code) {
                        Ok(())
                    } else {
                        Err(AppError::not_found(
                            "Country not found",
                            json!({ "code": code }),
                        ))
                    }
                })
                .await
        };

        match removed {
            Ok(()) => {
                tracing::info!(code = %code, "country deleted");
                Ok(DeleteOutcome::deleted("Country deleted"))
            }
            Err(AppError::NotFound { .. }) => Ok(DeleteOutcome::not_found("Country not found")),
            Err(other) => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::{ContinentEntry, Dataset};
    use crate::domain::entities::Continent;
    use crate::domain::repositories::MockDatasetRepository;

    fn dataset_with_continent() -> Dataset {
        Dataset::new(vec![ContinentEntry {
            continent: Continent::new(
                "Europa".to_string(),
                "EU".to_string(),
                "746400000".to_string(),
                "10180000".to_string(),
                vec![],
            ),
        }])
    }

    fn poland_input() -> CountryInput {
        CountryInput {
            name: Some("Polska".to_string()),
            capital: Some("Warszawa".to_string()),
            code: Some("PL".to_string()),
            ..Default::default()
        }
    }

    fn service(mock: MockDatasetRepository) -> CountryService<MockDatasetRepository> {
        CountryService::new(Arc::new(DocumentStore::new(Arc::new(mock))))
    }

    #[tokio::test]
    async fn test_create_country_without_continent_is_not_found() {
        let mut mock = MockDatasetRepository::new();
        mock.expect_load()
            .times(1)
            .returning(|| Ok(Dataset::default()));
        mock.expect_save().times(0);

        let result = service(mock).create_country("EU", poland_input()).await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_create_country_defaults_landmarks() {
        let mut mock = MockDatasetRepository::new();
        mock.expect_load()
            .times(1)
            .returning(|| Ok(dataset_with_continent()));
        mock.expect_save()
            .withf(|dataset| {
                let (_, country) = dataset.find_country("PL").unwrap();
                country.landmarks.is_empty()
            })
            .times(1)
            .returning(|_| Ok(()));

        let created = service(mock)
            .create_country("EU", poland_input())
            .await
            .unwrap();
        assert_eq!(created.code, "PL");
    }

    #[tokio::test]
    async fn test_create_country_code_conflict_is_global() {
        // The duplicate code lives under a different continent.
        let mut dataset = dataset_with_continent();
        dataset.push_continent(Continent::new(
            "Azja".to_string(),
            "AS".to_string(),
            "0".to_string(),
            "0".to_string(),
            vec![Country::new(
                "Polska".to_string(),
                "Warszawa".to_string(),
                "PL".to_string(),
                vec![],
            )],
        ));

        let mut mock = MockDatasetRepository::new();
        mock.expect_load().times(1).returning(move || Ok(dataset.clone()));
        mock.expect_save().times(0);

        let result = service(mock).create_country("EU", poland_input()).await;
        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_get_country_reports_owning_continent() {
        let mut dataset = dataset_with_continent();
        dataset
            .find_continent_mut("EU")
            .unwrap()
            .countries
            .push(Country::new(
                "Polska".to_string(),
                "Warszawa".to_string(),
                "PL".to_string(),
                vec![],
            ));

        let mut mock = MockDatasetRepository::new();
        mock.expect_load().times(1).returning(move || Ok(dataset.clone()));

        let located = service(mock).get_country("pl").await.unwrap();
        assert_eq!(located.country.code, "PL");
        assert_eq!(located.continent, "Europa");
    }

    #[tokio::test]
    async fn test_patch_country_never_alters_code() {
        let mut dataset = dataset_with_continent();
        dataset
            .find_continent_mut("EU")
            .unwrap()
            .countries
            .push(Country::new(
                "Polska".to_string(),
                "Warszawa".to_string(),
                "PL".to_string(),
                vec![],
            ));

        let mut mock = MockDatasetRepository::new();
        mock.expect_load().times(1).returning(move || Ok(dataset.clone()));
        mock.expect_save()
            .withf(|dataset| dataset.find_country("PL").is_some())
            .times(1)
            .returning(|_| Ok(()));

        let patch = CountryPatch {
            capital: Some("Kraków".to_string()),
            ..Default::default()
        };

        let patched = service(mock).patch_country("PL", patch).await.unwrap();
        assert_eq!(patched.code, "PL");
        assert_eq!(patched.capital, "Kraków");
        assert_eq!(patched.name, "Polska");
    }

    #[tokio::test]
    async fn test_delete_country_descriptor_on_absent() {
        let mut mock = MockDatasetRepository::new();
        mock.expect_load()
            .times(1)
            .returning(|| Ok(dataset_with_continent()));
        mock.expect_save().times(0);

        let outcome = service(mock).delete_country("PL").await.unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.code, "404");
    }
}

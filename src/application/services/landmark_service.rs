//! Landmark CRUD service.

use std::sync::Arc;

use serde_json::json;

use super::DeleteOutcome;
use crate::domain::entities::{Landmark, LandmarkInput, LandmarkPatch, LandmarkUpdate};
use crate::domain::repositories::DatasetRepository;
use crate::domain::store::DocumentStore;
use crate::domain::validation::{
    normalize_code, validate_country_code, validate_landmark_patch, validate_landmark_update,
    validate_new_landmark,
};
use crate::error::AppError;
use crate::query::{self, FilterClause, SortSpec};

/// Service for managing landmarks within countries.
///
/// Landmark names are the identifying key and are unique per country;
/// update and patch preserve the name from the lookup key.
pub struct LandmarkService<R: DatasetRepository> {
    store: Arc<DocumentStore<R>>,
}

impl<R: DatasetRepository> LandmarkService<R> {
    /// Creates a new landmark service.
    pub fn new(store: Arc<DocumentStore<R>>) -> Self {
        Self { store }
    }

    /// Lists landmarks through the filter-then-sort pipeline.
    ///
    /// With a country code, only that country's landmarks are listed; an
    /// unknown country yields an empty list, matching the listing shape of
    /// a known country without landmarks. Without a code, landmarks are
    /// flattened across every country.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the document cannot be loaded.
    pub async fn list_landmarks(
        &self,
        country_code: Option<&str>,
        filter: Option<&[FilterClause]>,
        sort: Option<&SortSpec>,
    ) -> Result<Vec<Landmark>, AppError> {
        let dataset = self.store.read().await?;

        let landmarks: Vec<Landmark> = match country_code {
            Some(code) => {
                let code = normalize_code(code);
                dataset
                    .find_country(&code)
                    .map(|(_, country)| country.landmarks.clone())
                    .unwrap_or_default()
            }
            None => dataset.landmarks().cloned().collect(),
        };

        Ok(query::run(&landmarks, filter, sort))
    }

    /// Retrieves a landmark by country code and name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed country code and
    /// [`AppError::NotFound`] when the country or the landmark is absent.
    pub async fn get_landmark(&self, country_code: &str, name: &str) -> Result<Landmark, AppError> {
        let country_code = normalize_code(country_code);
        validate_country_code(&country_code)?;

        let dataset = self.store.read().await?;
        let (_, country) = dataset.find_country(&country_code).ok_or_else(|| {
            AppError::not_found("Country not found", json!({ "code": country_code }))
        })?;

        country
            .landmarks
            .iter()
            .find(|landmark| landmark.name == name)
            .cloned()
            .ok_or_else(|| AppError::not_found("Landmark not found", json!({ "name": name })))
    }

    /// Adds a landmark to a country.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for malformed input,
    /// [`AppError::NotFound`] when the country is absent, and
    /// [`AppError::Conflict`] when the country already has a landmark with
    /// this name.
    pub async fn add_landmark(
        &self,
        country_code: &str,
        input: LandmarkInput,
    ) -> Result<Landmark, AppError> {
        let country_code = normalize_code(country_code);
        validate_country_code(&country_code)?;
        validate_new_landmark(&input)?;

        let landmark = Landmark {
            name: input.name.unwrap_or_default(),
            kind: input.kind.unwrap_or_default(),
            description: input.description.unwrap_or_default(),
            details: input.details,
        };

        let added = self
            .store
            .update(move |dataset| {
                let country = dataset.find_country_mut(&country_code).ok_or_else(|| {
                    AppError::not_found("Country not found", json!({ "code": country_code }))
                })?;

                if country.has_landmark(&landmark.name) {
                    return Err(AppError::conflict(
                        "Landmark with this name already exists",
                        json!({ "name": landmark.name }),
                    ));
                }

                country.landmarks.push(landmark.clone());
                Ok(landmark)
            })
            .await?;

        tracing::info!(name = %added.name, "landmark added");
        Ok(added)
    }

    /// Fully updates a landmark.
    ///
    /// `type` and `description` are required together. The name is taken
    /// from the lookup key and preserved regardless of the payload.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] on a malformed code or payload and
    /// [`AppError::NotFound`] when the country or the landmark is absent.
    pub async fn update_landmark(
        &self,
        country_code: &str,
        name: &str,
        update: LandmarkUpdate,
    ) -> Result<Landmark, AppError> {
        let country_code = normalize_code(country_code);
        validate_country_code(&country_code)?;
        validate_landmark_update(&update)?;

        let name = name.to_string();
        self.store
            .update(move |dataset| {
                let country = dataset.find_country_mut(&country_code).ok_or_else(|| {
                    AppError::not_found("Country not found", json!({ "code": country_code }))
                })?;

                let landmark = country
                    .landmarks
                    .iter_mut()
                    .find(|landmark| landmark.name == name)
                    .ok_or_else(|| {
                        AppError::not_found("Landmark not found", json!({ "name": name }))
                    })?;

                *landmark = Landmark {
                    name: name.clone(),
                    kind: update.kind.unwrap_or_default(),
                    description: update.description.unwrap_or_default(),
                    details: update.details,
                };

                Ok(landmark.clone())
            })
            .await
    }

    /// Partially updates a landmark: only supplied fields are overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the payload is empty or a
    /// supplied field is malformed, and [`AppError::NotFound`] when the
    /// country or the landmark is absent.
    pub async fn patch_landmark(
        &self,
        country_code: &str,
        name: &str,
        patch: LandmarkPatch,
    ) -> Result<Landmark, AppError> {
        let country_code = normalize_code(country_code);
        validate_country_code(&country_code)?;
        validate_landmark_patch(&patch)?;

        let name = name.to_string();
        self.store
            .update(move |dataset| {
                let country = dataset.find_country_mut(&country_code).ok_or_else(|| {
                    AppError::not_found("Country not found", json!({ "code": country_code }))
                })?;

                let landmark = country
                    .landmarks
                    .iter_mut()
                    .find(|landmark| landmark.name == name)
                    .ok_or_else(|| {
                        AppError::not_found("Landmark not found", json!({ "name": name }))
                    })?;

                if let Some(kind) = patch.kind {
                    landmark.kind = kind;
                }
                if let Some(description) = patch.description {
                    landmark.description = description;
                }
                if let Some(details) = patch.details {
                    landmark.details = Some(details);
                }

                Ok(landmark.clone())
            })
            .await
    }

    /// Deletes a landmark from a country.
    ///
    /// Returns a [`DeleteOutcome`] descriptor; a malformed code or an
    /// absent country/landmark is a failed outcome, not an error, and
    /// leaves the dataset untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] only on persistence failures.
    pub async fn delete_landmark(
        &self,
        country_code: &str,
        name: &str,
    ) -> Result<DeleteOutcome, AppError> {
        let country_code = normalize_code(country_code);
        if validate_country_code(&country_code).is_err() {
            return Ok(DeleteOutcome::invalid("Invalid country code format"));
        }

        let name = name.to_string();
        let removed = self
            .store
            .update(move |dataset| {
                let country = dataset.find_country_mut(&country_code).ok_or_else(|| {
                    AppError::not_found("Country not found", json!({ "code": country_code }))
                })?;

                let before = country.landmarks.len();
                country.landmarks.retain(|landmark| landmark.name != name);
                if country.landmarks.len() == before {
                    return Err(AppError::not_found(
                        "Landmark not found",
                        json!({ "name": name }),
                    ));
                }
                Ok(())
            })
            .await;

        match removed {
            Ok(()) => Ok(DeleteOutcome::deleted("Landmark deleted")),
            Err(AppError::NotFound { message, .. }) => Ok(DeleteOutcome::not_found(message)),
            Err(other) => Err(other),
        }
    }
}

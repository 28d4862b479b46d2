//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating the document
//! store, validation, and the query pipeline. Services provide a clean API
//! for protocol adapters (the CLI, or any external binding).
//!
//! # Available Services
//!
//! - [`services::continent_service::ContinentService`] - Continent CRUD
//! - [`services::country_service::CountryService`] - Country CRUD across continents
//! - [`services::landmark_service::LandmarkService`] - Landmark CRUD within countries

pub mod services;

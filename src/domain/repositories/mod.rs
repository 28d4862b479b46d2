//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interface that abstracts access to the
//! backing document, following the Repository pattern. Concrete
//! implementations live in `crate::infrastructure::persistence`.
//!
//! # Architecture
//!
//! - [`DatasetRepository`] defines whole-document load/save
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Testing
//!
//! See integration tests in `tests/store_persistence.rs` for usage examples.

pub mod dataset_repository;

pub use dataset_repository::DatasetRepository;

#[cfg(test)]
pub use dataset_repository::MockDatasetRepository;

//! # World Atlas
//!
//! A catalog of continents, countries, and landmarks backed by a single JSON
//! document, with a consolidated filter/sort query layer.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities, the backing document, validation,
//!   the repository trait, and the single-writer document store
//! - **Query Layer** ([`query`]) - Field predicates, AND filtering, stable sorting
//! - **Application Layer** ([`application`]) - CRUD services per entity kind
//! - **Infrastructure Layer** ([`infrastructure`]) - JSON-file and in-memory repositories
//!
//! Protocol adapters (REST, GraphQL, gRPC) are external collaborators: they
//! hand parsed filter/sort/payload inputs to the services and serialize the
//! returned records or [`error::ErrorInfo`] descriptors themselves. The only
//! adapter shipped in-crate is the `world-atlas` CLI binary.
//!
//! ## Quick Start
//!
//! ```bash
//! # Point the crate at a data file
//! export ATLAS_DATA_FILE="dane.json"
//!
//! # List continents with more than a million inhabitants, sorted by name
//! cargo run -- continent list --filter population:GREATER:1000000 --sort name
//! ```
//!
//! ## Concurrency
//!
//! Every mutation runs load-mutate-persist while holding the document
//! store's write lock, so concurrent mutations cannot lose updates. See
//! [`domain::store::DocumentStore`].
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod query;

pub use error::AppError;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        ContinentService, CountryService, DeleteOutcome, LandmarkService,
    };
    pub use crate::domain::dataset::{ContinentEntry, Dataset};
    pub use crate::domain::entities::{Continent, Country, Landmark};
    pub use crate::domain::store::DocumentStore;
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::{InMemoryRepository, JsonFileRepository};
    pub use crate::query::{FilterClause, FilterOp, SortOrder, SortSpec};
}

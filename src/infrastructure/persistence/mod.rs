//! Dataset repository implementations.
//!
//! Concrete implementations of the domain repository trait: one backed by a
//! JSON document on disk, one holding the document in memory for tests and
//! fixtures.

pub mod in_memory_repository;
pub mod json_file_repository;

pub use in_memory_repository::InMemoryRepository;
pub use json_file_repository::JsonFileRepository;

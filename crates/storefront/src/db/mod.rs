//! In-memory stores backing the mock service layer.
//!
//! # Stores
//!
//! - [`CatalogRepository`] - Read-only product catalog, loaded once at start
//! - [`AccountRepository`] - User accounts, appended to by signup
//!
//! Both are constructed explicitly by the caller and handed to the services
//! by reference. Nothing outside [`crate::services`] mutates them.

pub mod accounts;
pub mod catalog;

use thiserror::Error;

pub use accounts::AccountRepository;
pub use catalog::CatalogRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Seed data is malformed or violates an invariant.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Seed file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

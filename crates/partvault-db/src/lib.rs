//! partvault Database Library
//!
//! PostgreSQL persistence for the partvault identity services:
//!
//! - [`pool`] - Connection pool management (`DbPool`)
//! - [`migrations`] - Embedded, versioned SQL migrations
//! - [`models`] - Entity models with type-safe queries
//! - [`error`] - Database error types (`DbError`)

pub mod error;
pub mod migrations;
pub mod models;
pub mod pool;

pub use error::DbError;
pub use migrations::run_migrations;
pub use pool::DbPool;

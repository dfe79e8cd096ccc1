//! Database entity models for partvault-db.
//!
//! These models represent the database tables and provide
//! type-safe interactions with PostgreSQL.

pub mod group;
pub mod user;

pub use group::Group;
pub use user::{UpdateUserProfile, User, SSO_PASSWORD_SENTINEL};

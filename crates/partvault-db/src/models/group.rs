//! Group entity model.
//!
//! Represents a user group. SSO provisioning assigns one via the role
//! mapping configuration.

use chrono::{DateTime, Utc};
use partvault_core::GroupId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user group.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier for the group.
    pub id: Uuid,

    /// Display name (unique).
    pub name: String,

    /// When the group was created.
    pub created_at: DateTime<Utc>,
}

impl Group {
    /// Get the group ID as a typed `GroupId`.
    #[must_use]
    pub fn group_id(&self) -> GroupId {
        GroupId::from_uuid(self.id)
    }

    /// Create a new group.
    pub async fn create(pool: &sqlx::PgPool, name: &str) -> Result<Self, sqlx::Error> {
        sqlx::query_as(
            r"
            INSERT INTO groups (name)
            VALUES ($1)
            RETURNING *
            ",
        )
        .bind(name)
        .fetch_one(pool)
        .await
    }

    /// Find a group by ID.
    pub async fn find_by_id(
        pool: &sqlx::PgPool,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM groups WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a group by name.
    pub async fn find_by_name(
        pool: &sqlx::PgPool,
        name: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM groups WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await
    }
}

//! User entity model.
//!
//! Represents a user account. Accounts provisioned through federated login
//! carry a fixed sentinel in place of a password hash.

use chrono::{DateTime, Utc};
use partvault_core::{GroupId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Marker stored in `password_hash` for accounts that authenticate only
/// through the identity provider. No password hash ever starts with `!`,
/// so the value can never verify as a local credential.
pub const SSO_PASSWORD_SENTINEL: &str = "!!SAML!!";

/// A user account.
///
/// For SSO-provisioned users, `username` carries the stable external subject
/// identifier and is immutable after creation.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: Uuid,

    /// Login name (unique). For SSO users: the external subject identifier.
    pub username: String,

    /// User's first name (given name).
    pub first_name: Option<String>,

    /// User's last name (family name).
    pub last_name: Option<String>,

    /// User's email address.
    pub email: Option<String>,

    /// User's department.
    pub department: Option<String>,

    /// Password hash, or [`SSO_PASSWORD_SENTINEL`] for federated accounts.
    pub password_hash: String,

    /// Whether the user must change their password on next login.
    pub needs_pw_change: bool,

    /// Whether the account is disabled.
    pub disabled: bool,

    /// The group this user belongs to, if any.
    pub group_id: Option<Uuid>,

    /// When the user was created.
    pub created_at: DateTime<Utc>,

    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Profile changes to apply to an existing user.
///
/// `None` means "leave the field unchanged"; `Some` overwrites, including
/// with an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUserProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
}

impl UpdateUserProfile {
    /// True if no field would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.department.is_none()
    }
}

impl User {
    /// Construct a new federated (SSO) user in memory.
    ///
    /// The account is created enabled, with no pending password change and
    /// the sentinel credential. These three fields are fixed at creation and
    /// never touched by attribute updates.
    #[must_use]
    pub fn new_sso(username: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            first_name: None,
            last_name: None,
            email: None,
            department: None,
            password_hash: SSO_PASSWORD_SENTINEL.to_string(),
            needs_pw_change: false,
            disabled: false,
            group_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Get the user ID as a typed `UserId`.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.id)
    }

    /// Get the group ID as a typed `GroupId`, if assigned.
    #[must_use]
    pub fn typed_group_id(&self) -> Option<GroupId> {
        self.group_id.map(GroupId::from_uuid)
    }

    /// Whether this account authenticates only through the identity provider.
    #[must_use]
    pub fn is_sso_account(&self) -> bool {
        self.password_hash == SSO_PASSWORD_SENTINEL
    }

    /// Find a user by ID.
    pub async fn find_by_id(
        pool: &sqlx::PgPool,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username.
    pub async fn find_by_username(
        pool: &sqlx::PgPool,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Persist an in-memory user built with [`User::new_sso`].
    ///
    /// The unique index on `username` rejects a duplicate subject; the
    /// resulting `sqlx::Error` is surfaced unchanged for the caller to map.
    pub async fn insert(pool: &sqlx::PgPool, user: &Self) -> Result<Self, sqlx::Error> {
        sqlx::query_as(
            r"
            INSERT INTO users (
                id, username, first_name, last_name, email, department,
                password_hash, needs_pw_change, disabled, group_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            ",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.department)
        .bind(&user.password_hash)
        .bind(user.needs_pw_change)
        .bind(user.disabled)
        .bind(user.group_id)
        .fetch_one(pool)
        .await
    }

    /// Update profile fields.
    ///
    /// `None` fields are left unchanged via `COALESCE`; `Some` fields are
    /// overwritten, empty strings included. Security-control fields
    /// (`password_hash`, `needs_pw_change`, `disabled`) are not reachable
    /// from this statement.
    pub async fn update_profile(
        pool: &sqlx::PgPool,
        id: Uuid,
        changes: &UpdateUserProfile,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            UPDATE users
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email),
                department = COALESCE($5, department),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            ",
        )
        .bind(id)
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(&changes.email)
        .bind(&changes.department)
        .fetch_optional(pool)
        .await
    }

    /// Assign the user to a group (or clear the assignment with `None`).
    pub async fn assign_group(
        pool: &sqlx::PgPool,
        id: Uuid,
        group_id: Option<Uuid>,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            UPDATE users
            SET group_id = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            ",
        )
        .bind(id)
        .bind(group_id)
        .fetch_optional(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sso_fixed_fields() {
        let user = User::new_sso("sso_user");

        assert_eq!(user.username, "sso_user");
        assert_eq!(user.password_hash, SSO_PASSWORD_SENTINEL);
        assert!(!user.needs_pw_change);
        assert!(!user.disabled);
        assert!(user.first_name.is_none());
        assert!(user.group_id.is_none());
    }

    #[test]
    fn test_is_sso_account() {
        let sso = User::new_sso("sso_user");
        assert!(sso.is_sso_account());

        let mut local = User::new_sso("local_user");
        local.password_hash = "$argon2id$v=19$...".to_string();
        assert!(!local.is_sso_account());
    }

    #[test]
    fn test_user_id_conversion() {
        let user = User::new_sso("sso_user");
        assert_eq!(*user.user_id().as_uuid(), user.id);
    }

    #[test]
    fn test_typed_group_id() {
        let mut user = User::new_sso("sso_user");
        assert!(user.typed_group_id().is_none());

        let gid = Uuid::new_v4();
        user.group_id = Some(gid);
        assert_eq!(*user.typed_group_id().unwrap().as_uuid(), gid);
    }

    #[test]
    fn test_update_profile_is_empty() {
        assert!(UpdateUserProfile::default().is_empty());

        let changes = UpdateUserProfile {
            email: Some(String::new()),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }
}

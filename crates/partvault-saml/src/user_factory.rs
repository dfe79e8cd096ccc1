//! Just-In-Time user creation and profile sync from asserted attributes.

use crate::attributes::{resolve_profile_value, ProfileField, SamlAttributes};
use crate::error::{SamlError, SamlResult};
use crate::role_mapping::RoleMappingConfig;
use partvault_db::models::{Group, UpdateUserProfile, User};
use sqlx::PgPool;
use tracing::instrument;

/// User provisioning service.
///
/// Called by the authentication middleware after the assertion consumer has
/// validated a login: once with [`SamlUserFactory::create_user`] on first
/// login, then with [`SamlUserFactory::sync_user`] on every subsequent one.
/// [`SamlUserFactory::provision_or_sync`] bundles the two.
#[derive(Clone)]
pub struct SamlUserFactory {
    pool: PgPool,
    role_mapping: RoleMappingConfig,
}

impl SamlUserFactory {
    /// Create a factory without role-to-group mapping.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            role_mapping: RoleMappingConfig::none(),
        }
    }

    /// Create a factory with a role-to-group mapping configuration.
    #[must_use]
    pub fn with_role_mapping(pool: PgPool, role_mapping: RoleMappingConfig) -> Self {
        Self { pool, role_mapping }
    }

    /// Provision or sync a user for a login event.
    #[instrument(skip(self, attributes))]
    pub async fn provision_or_sync(
        &self,
        subject_id: &str,
        attributes: &SamlAttributes,
    ) -> SamlResult<User> {
        match User::find_by_username(&self.pool, subject_id).await? {
            Some(existing) => self.sync_user(&existing, attributes).await,
            None => self.create_user(subject_id, attributes).await,
        }
    }

    /// Create a new user from an external subject identifier and the
    /// asserted attributes (first login).
    ///
    /// The account is persisted with the sentinel credential, no pending
    /// password change and enabled, with profile fields populated from the
    /// bag and the group resolved through the role mapping.
    ///
    /// # Errors
    ///
    /// `SamlError::SubjectConflict` if a user with this subject already
    /// exists; the unique index decides, there is no pre-check.
    #[instrument(skip(self, attributes))]
    pub async fn create_user(
        &self,
        subject_id: &str,
        attributes: &SamlAttributes,
    ) -> SamlResult<User> {
        let mut user = Self::build_sso_user(subject_id, attributes)?;

        if let Some(group_name) = self.role_mapping.resolve_group(attributes.asserted_roles()) {
            match Group::find_by_name(&self.pool, group_name).await? {
                Some(group) => user.group_id = Some(group.id),
                None => tracing::warn!(
                    group = %group_name,
                    subject = %subject_id,
                    "Role mapping names an unknown group, user created without one"
                ),
            }
        }

        let created = User::insert(&self.pool, &user).await.map_err(|e| {
            if is_unique_violation(&e) {
                SamlError::SubjectConflict(subject_id.to_string())
            } else {
                SamlError::Database(e)
            }
        })?;

        tracing::info!(
            user_id = %created.id,
            subject = %subject_id,
            group_id = ?created.group_id,
            "Provisioned new user from IdP attributes"
        );

        Ok(created)
    }

    /// Persist the profile fields asserted in the bag for an existing user
    /// (subsequent login).
    ///
    /// Fields absent from the bag keep their stored values; present fields
    /// are overwritten, empty strings included. Credential and account
    /// status stay untouched.
    #[instrument(skip(self, user, attributes), fields(user_id = %user.id))]
    pub async fn sync_user(&self, user: &User, attributes: &SamlAttributes) -> SamlResult<User> {
        let changes = Self::resolve_profile_changes(attributes);
        if changes.is_empty() {
            return Ok(user.clone());
        }

        let updated = User::update_profile(&self.pool, user.id, &changes)
            .await?
            .ok_or(SamlError::UserNotFound(user.id))?;

        tracing::info!(user_id = %updated.id, "Synced user profile from IdP attributes");

        Ok(updated)
    }

    /// Build (but do not persist) a new SSO user from a subject identifier
    /// and the asserted attributes.
    ///
    /// # Errors
    ///
    /// `SamlError::InvalidSubject` if the subject identifier is empty.
    pub fn build_sso_user(subject_id: &str, attributes: &SamlAttributes) -> SamlResult<User> {
        if subject_id.is_empty() {
            return Err(SamlError::InvalidSubject(subject_id.to_string()));
        }

        let mut user = User::new_sso(subject_id);
        Self::update_user_info_from_attributes(&mut user, attributes);
        Ok(user)
    }

    /// Overwrite a user's profile fields in place from asserted attributes.
    ///
    /// For each profile field the candidate keys are checked in priority
    /// order (friendly name before OID); the first present key wins and its
    /// first value overwrites the field, empty string included. Fields with
    /// no present key are left unchanged. Touches nothing but the four
    /// profile fields and performs no I/O.
    pub fn update_user_info_from_attributes(user: &mut User, attributes: &SamlAttributes) {
        let changes = Self::resolve_profile_changes(attributes);

        if let Some(value) = changes.first_name {
            user.first_name = Some(value);
        }
        if let Some(value) = changes.last_name {
            user.last_name = Some(value);
        }
        if let Some(value) = changes.email {
            user.email = Some(value);
        }
        if let Some(value) = changes.department {
            user.department = Some(value);
        }
    }

    /// Resolve the per-field profile changes a bag implies.
    ///
    /// `None` = key absent, leave the field alone; `Some` = overwrite.
    #[must_use]
    pub fn resolve_profile_changes(attributes: &SamlAttributes) -> UpdateUserProfile {
        UpdateUserProfile {
            first_name: resolve_profile_value(attributes, ProfileField::FirstName)
                .map(String::from),
            last_name: resolve_profile_value(attributes, ProfileField::LastName)
                .map(String::from),
            email: resolve_profile_value(attributes, ProfileField::Email).map(String::from),
            department: resolve_profile_value(attributes, ProfileField::Department)
                .map(String::from),
        }
    }
}

impl std::fmt::Debug for SamlUserFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SamlUserFactory")
            .field("role_mapping", &self.role_mapping)
            .finish_non_exhaustive()
    }
}

/// Whether a database error is a uniqueness-constraint rejection.
fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{OID_EMAIL, OID_GIVEN_NAME, OID_SURNAME};
    use partvault_db::models::SSO_PASSWORD_SENTINEL;

    #[test]
    fn test_build_sso_user_rejects_empty_subject() {
        let result = SamlUserFactory::build_sso_user("", &SamlAttributes::new());
        assert!(matches!(result, Err(SamlError::InvalidSubject(_))));
    }

    #[test]
    fn test_build_sso_user_fixed_security_fields() {
        let attrs = SamlAttributes::new()
            .with("firstName", vec!["John".to_string()])
            .with("needs_pw_change", vec!["true".to_string()]);

        let user = SamlUserFactory::build_sso_user("sso_user", &attrs).unwrap();

        assert_eq!(user.username, "sso_user");
        assert_eq!(user.password_hash, SSO_PASSWORD_SENTINEL);
        assert!(!user.needs_pw_change);
        assert!(!user.disabled);
    }

    #[test]
    fn test_update_from_friendly_names() {
        let mut user = User::new_sso("sso_user");
        let attrs = SamlAttributes::new()
            .with("firstName", vec!["John".to_string()])
            .with("lastName", vec!["Doe".to_string()])
            .with("email", vec!["j.doe@invalid.invalid".to_string()])
            .with("department", vec!["Test Department".to_string()]);

        SamlUserFactory::update_user_info_from_attributes(&mut user, &attrs);

        assert_eq!(user.first_name.as_deref(), Some("John"));
        assert_eq!(user.last_name.as_deref(), Some("Doe"));
        assert_eq!(user.email.as_deref(), Some("j.doe@invalid.invalid"));
        assert_eq!(user.department.as_deref(), Some("Test Department"));
    }

    #[test]
    fn test_update_from_oid_names() {
        let mut user = User::new_sso("sso_user");
        let attrs = SamlAttributes::new()
            .with(OID_GIVEN_NAME, vec!["Jane".to_string()])
            .with(OID_SURNAME, vec!["Dane".to_string()])
            .with(OID_EMAIL, vec!["mail@invalid.invalid".to_string()]);

        SamlUserFactory::update_user_info_from_attributes(&mut user, &attrs);

        assert_eq!(user.first_name.as_deref(), Some("Jane"));
        assert_eq!(user.last_name.as_deref(), Some("Dane"));
        assert_eq!(user.email.as_deref(), Some("mail@invalid.invalid"));
    }

    #[test]
    fn test_update_ignores_unknown_attributes() {
        let mut user = User::new_sso("sso_user");
        let attrs = SamlAttributes::new()
            .with("displayName", vec!["Johnny".to_string()])
            .with("urn:oid:2.5.4.3", vec!["cn value".to_string()]);

        SamlUserFactory::update_user_info_from_attributes(&mut user, &attrs);

        assert!(user.first_name.is_none());
        assert!(user.last_name.is_none());
    }

    #[test]
    fn test_resolve_profile_changes_absent_keys_are_none() {
        let attrs = SamlAttributes::new().with("email", vec!["a@b.invalid".to_string()]);
        let changes = SamlUserFactory::resolve_profile_changes(&attrs);

        assert_eq!(changes.email.as_deref(), Some("a@b.invalid"));
        assert!(changes.first_name.is_none());
        assert!(changes.last_name.is_none());
        assert!(changes.department.is_none());
    }
}

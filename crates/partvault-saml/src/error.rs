//! Provisioning-specific error types

use partvault_core::PartvaultError;
use thiserror::Error;
use uuid::Uuid;

/// Result type for provisioning operations
pub type SamlResult<T> = Result<T, SamlError>;

/// Provisioning-specific errors
#[derive(Debug, Error)]
pub enum SamlError {
    /// Subject identifier failed validation (empty)
    #[error("Invalid subject identifier: {0:?}")]
    InvalidSubject(String),

    /// A user with this subject identifier already exists
    #[error("Subject already provisioned: {0}")]
    SubjectConflict(String),

    /// User row disappeared between lookup and update
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<SamlError> for PartvaultError {
    fn from(err: SamlError) -> Self {
        match err {
            SamlError::InvalidSubject(subject) => PartvaultError::Validation {
                field: "subject".to_string(),
                message: format!("invalid subject identifier: {subject:?}"),
            },
            SamlError::SubjectConflict(subject) => PartvaultError::Conflict {
                resource: "User".to_string(),
                id: subject,
            },
            SamlError::UserNotFound(id) => PartvaultError::NotFound {
                resource: "User".to_string(),
                id: Some(id.to_string()),
            },
            SamlError::Database(e) => {
                tracing::error!("Provisioning database error: {:?}", e);
                PartvaultError::Internal {
                    message: "A database error occurred".to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_conflict_display() {
        let err = SamlError::SubjectConflict("sso_user".to_string());
        assert_eq!(err.to_string(), "Subject already provisioned: sso_user");
    }

    #[test]
    fn test_conflict_maps_to_core_conflict() {
        let core: PartvaultError = SamlError::SubjectConflict("sso_user".to_string()).into();
        assert!(matches!(
            core,
            PartvaultError::Conflict { ref resource, ref id }
                if resource == "User" && id == "sso_user"
        ));
    }

    #[test]
    fn test_invalid_subject_maps_to_validation() {
        let core: PartvaultError = SamlError::InvalidSubject(String::new()).into();
        assert!(matches!(core, PartvaultError::Validation { ref field, .. } if field == "subject"));
    }

    #[test]
    fn test_database_maps_to_internal_without_details() {
        let core: PartvaultError = SamlError::Database(sqlx::Error::RowNotFound).into();
        match core {
            PartvaultError::Internal { message } => {
                // Driver details must not leak to the caller
                assert_eq!(message, "A database error occurred");
            }
            other => panic!("expected Internal, got {other:?}"),
        }
    }

    #[test]
    fn test_user_not_found_maps_to_not_found() {
        let id = Uuid::new_v4();
        let core: PartvaultError = SamlError::UserNotFound(id).into();
        match core {
            PartvaultError::NotFound { resource, id: found } => {
                assert_eq!(resource, "User");
                assert_eq!(found, Some(id.to_string()));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}

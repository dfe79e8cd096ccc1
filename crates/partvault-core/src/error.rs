//! Error Types
//!
//! This module provides standardized error types for partvault.
//!
//! # Example
//!
//! ```
//! use partvault_core::{PartvaultError, Result};
//!
//! fn find_user(username: &str) -> Result<String> {
//!     if username.is_empty() {
//!         return Err(PartvaultError::NotFound {
//!             resource: "User".to_string(),
//!             id: None,
//!         });
//!     }
//!     Ok(format!("User {}", username))
//! }
//! ```

use serde::Serialize;
use thiserror::Error;

/// Standardized error type for partvault.
///
/// This enum provides consistent error types that can be used across all
/// partvault services. Each variant maps to common error scenarios.
///
/// # Variants
///
/// - `NotFound` - Resource not found
/// - `Conflict` - Resource already exists (uniqueness violation)
/// - `Validation` - Input validation failure
/// - `Internal` - Unexpected internal failure (database, IO)
#[derive(Debug, Clone, Error, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PartvaultError {
    /// Requested resource was not found.
    ///
    /// Use when a database lookup returns no results.
    #[error("{resource} not found{}", id.as_ref().map(|i| format!(": {i}")).unwrap_or_default())]
    NotFound {
        /// The type of resource that was not found (e.g., "User", "Group")
        resource: String,
        /// Optional identifier of the resource
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },

    /// A resource with the same identity already exists.
    ///
    /// Use when a uniqueness constraint rejects a create.
    #[error("{resource} already exists: {id}")]
    Conflict {
        /// The type of resource that conflicted
        resource: String,
        /// The conflicting identifier
        id: String,
    },

    /// Input validation failure.
    ///
    /// Use when caller input fails validation rules.
    #[error("Validation error on field '{field}': {message}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// Description of the validation failure
        message: String,
    },

    /// Unexpected internal failure.
    ///
    /// The message is safe for logs, not for end users.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the failure
        message: String,
    },
}

/// Type alias for Results using `PartvaultError`.
///
/// ```
/// use partvault_core::{Result, PartvaultError};
///
/// fn example() -> Result<String> {
///     Ok("success".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, PartvaultError>;

#[cfg(test)]
mod tests {
    use super::*;

    mod not_found_tests {
        use super::*;

        #[test]
        fn test_display_without_id() {
            let error = PartvaultError::NotFound {
                resource: "User".to_string(),
                id: None,
            };
            assert_eq!(error.to_string(), "User not found");
        }

        #[test]
        fn test_display_with_id() {
            let error = PartvaultError::NotFound {
                resource: "Group".to_string(),
                id: Some("admins".to_string()),
            };
            assert_eq!(error.to_string(), "Group not found: admins");
        }

        #[test]
        fn test_is_std_error() {
            let error = PartvaultError::NotFound {
                resource: "User".to_string(),
                id: None,
            };
            let _: &dyn std::error::Error = &error;
        }
    }

    mod conflict_tests {
        use super::*;

        #[test]
        fn test_display_includes_resource_and_id() {
            let error = PartvaultError::Conflict {
                resource: "User".to_string(),
                id: "sso_user".to_string(),
            };
            assert_eq!(error.to_string(), "User already exists: sso_user");
        }
    }

    mod validation_tests {
        use super::*;

        #[test]
        fn test_display_includes_field_and_message() {
            let error = PartvaultError::Validation {
                field: "username".to_string(),
                message: "must not be empty".to_string(),
            };
            assert_eq!(
                error.to_string(),
                "Validation error on field 'username': must not be empty"
            );
        }
    }

    mod serde_tests {
        use super::*;

        #[test]
        fn test_not_found_serialization() {
            let error = PartvaultError::NotFound {
                resource: "User".to_string(),
                id: Some("123".to_string()),
            };
            let json = serde_json::to_string(&error).unwrap();
            assert!(json.contains("\"type\":\"not_found\""));
            assert!(json.contains("\"resource\":\"User\""));
            assert!(json.contains("\"id\":\"123\""));
        }

        #[test]
        fn test_not_found_skips_none_id() {
            let error = PartvaultError::NotFound {
                resource: "User".to_string(),
                id: None,
            };
            let json = serde_json::to_string(&error).unwrap();
            assert!(!json.contains("\"id\""));
        }

        #[test]
        fn test_conflict_serialization() {
            let error = PartvaultError::Conflict {
                resource: "User".to_string(),
                id: "sso_user".to_string(),
            };
            let json = serde_json::to_string(&error).unwrap();
            assert!(json.contains("\"type\":\"conflict\""));
            assert!(json.contains("\"id\":\"sso_user\""));
        }

        #[test]
        fn test_json_is_parseable() {
            let error = PartvaultError::Internal {
                message: "boom".to_string(),
            };
            let json = serde_json::to_string(&error).unwrap();
            let value: serde_json::Value = serde_json::from_str(&json).unwrap();
            assert!(value.is_object());
        }
    }

    mod result_tests {
        use super::*;

        fn error_function() -> Result<String> {
            Err(PartvaultError::NotFound {
                resource: "Test".to_string(),
                id: None,
            })
        }

        fn propagating_function() -> Result<String> {
            error_function()?;
            Ok("never reached".to_string())
        }

        #[test]
        fn test_question_mark_propagation() {
            let result = propagating_function();
            assert!(result.is_err());
        }
    }
}

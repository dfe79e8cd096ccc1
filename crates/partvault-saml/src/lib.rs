//! SAML user provisioning library for partvault
//!
//! This crate provides the identity-provisioning side of federated login:
//! - Attribute-bag handling with friendly-name / X.500 OID precedence
//! - Just-in-time user creation on first login
//! - Profile sync from asserted attributes on subsequent logins
//! - Role-to-group mapping applied at creation
//!
//! Assertion parsing and signature validation happen upstream; this crate
//! consumes the already-validated subject identifier and attribute bag.

pub mod attributes;
pub mod error;
pub mod role_mapping;
pub mod user_factory;

pub use attributes::{
    ProfileField, SamlAttributes, OID_EMAIL, OID_GIVEN_NAME, OID_SURNAME, ROLE_ATTRIBUTE_KEYS,
};
pub use error::{SamlError, SamlResult};
pub use role_mapping::{RoleMapping, RoleMappingConfig};
pub use user_factory::SamlUserFactory;

// The sentinel the rest of the application recognizes as "federated auth only".
pub use partvault_db::models::SSO_PASSWORD_SENTINEL;

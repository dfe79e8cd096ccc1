//! SAML attribute-bag handling and profile-field mapping

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// X.500 OID attribute name for "given name".
pub const OID_GIVEN_NAME: &str = "urn:oid:2.5.4.42";

/// X.500 OID attribute name for "surname".
pub const OID_SURNAME: &str = "urn:oid:2.5.4.4";

/// X.500 OID attribute name for "e-mail address" (PKCS#9 emailAddress).
pub const OID_EMAIL: &str = "urn:oid:1.2.840.113549.1.9.1";

/// Attribute keys checked, in priority order, for the roles asserted by the
/// identity provider.
pub const ROLE_ATTRIBUTE_KEYS: &[&str] = &["roles", "groups"];

/// The per-login attribute bag delivered by the assertion consumer after
/// successful federated authentication.
///
/// Keys are either friendly names or dotted OID strings, depending on the
/// identity provider's attribute-release policy. Values are always lists,
/// even for single-valued attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SamlAttributes(HashMap<String, Vec<String>>);

impl SamlAttributes {
    /// Create an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Chainable insert, mainly for building bags in tests and fixtures.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, values: Vec<String>) -> Self {
        self.0.insert(key.into(), values);
        self
    }

    /// First value of the named attribute.
    ///
    /// A key that is present with an empty value list is treated as absent:
    /// a malformed assertion must not be able to crash extraction.
    #[must_use]
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|values| values.first()).map(String::as_str)
    }

    /// All values of the named attribute (empty slice if missing).
    #[must_use]
    pub fn values(&self, key: &str) -> &[String] {
        self.0.get(key).map_or(&[], Vec::as_slice)
    }

    /// Whether the named attribute carries at least one value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.first(key).is_some()
    }

    /// The roles asserted by the identity provider: the values of the first
    /// present key among [`ROLE_ATTRIBUTE_KEYS`].
    #[must_use]
    pub fn asserted_roles(&self) -> &[String] {
        ROLE_ATTRIBUTE_KEYS
            .iter()
            .find(|key| self.contains(key))
            .map_or(&[], |key| self.values(key))
    }
}

impl From<HashMap<String, Vec<String>>> for SamlAttributes {
    fn from(map: HashMap<String, Vec<String>>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<String>)> for SamlAttributes {
    fn from_iter<I: IntoIterator<Item = (K, Vec<String>)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// A user profile field that can be populated from asserted attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    FirstName,
    LastName,
    Email,
    Department,
}

impl ProfileField {
    /// All mappable profile fields.
    pub const ALL: [ProfileField; 4] = [
        ProfileField::FirstName,
        ProfileField::LastName,
        ProfileField::Email,
        ProfileField::Department,
    ];

    /// Candidate attribute keys for this field, in priority order.
    ///
    /// The friendly name comes first; the X.500 OID name is the fallback.
    /// Extending support for another identity provider's naming scheme means
    /// adding a key here, not another conditional.
    #[must_use]
    pub fn candidate_keys(self) -> &'static [&'static str] {
        match self {
            ProfileField::FirstName => &["firstName", OID_GIVEN_NAME],
            ProfileField::LastName => &["lastName", OID_SURNAME],
            ProfileField::Email => &["email", OID_EMAIL],
            ProfileField::Department => &["department"],
        }
    }
}

/// Resolve the asserted value for a profile field.
///
/// Walks the field's candidate keys in priority order; the first present key
/// wins and its first value is returned. An empty string is a valid value; a
/// key with an empty value list does not count as present.
#[must_use]
pub fn resolve_profile_value<'a>(
    attributes: &'a SamlAttributes,
    field: ProfileField,
) -> Option<&'a str> {
    field
        .candidate_keys()
        .iter()
        .find_map(|key| attributes.first(key))
}

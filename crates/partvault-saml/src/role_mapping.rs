//! Role-to-group mapping configuration
//!
//! Defines how roles asserted by the identity provider select the local
//! group a user is placed in at creation.

use serde::{Deserialize, Serialize};

/// A single role-to-group mapping entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleMapping {
    /// Role pattern to match (glob syntax, `*` wildcard supported).
    /// A bare `*` is a catch-all that matches regardless of asserted roles.
    pub role: String,

    /// Name of the local group assigned when the pattern matches.
    pub group: String,
}

impl RoleMapping {
    /// Whether this entry applies to the given asserted roles.
    #[must_use]
    pub fn matches(&self, roles: &[String]) -> bool {
        if self.role == "*" {
            return true;
        }
        roles.iter().any(|role| glob_match(&self.role, role))
    }
}

/// Ordered role-to-group mapping configuration.
///
/// Entries are evaluated top to bottom; the first matching entry wins, so a
/// `*` catch-all belongs last.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleMappingConfig {
    /// Mapping entries in priority order.
    #[serde(default)]
    pub mappings: Vec<RoleMapping>,
}

impl RoleMappingConfig {
    /// A configuration that never assigns a group.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Build a configuration from `(role_pattern, group_name)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        Self {
            mappings: pairs
                .into_iter()
                .map(|(role, group)| RoleMapping {
                    role: role.into(),
                    group: group.into(),
                })
                .collect(),
        }
    }

    /// Resolve the group name for a set of asserted roles.
    ///
    /// Returns `None` when no entry matches; the user is then created
    /// without a group, which is not an error.
    #[must_use]
    pub fn resolve_group(&self, roles: &[String]) -> Option<&str> {
        self.mappings
            .iter()
            .find(|mapping| mapping.matches(roles))
            .map(|mapping| mapping.group.as_str())
    }
}

/// Simple glob matching (supports `*` wildcard).
fn glob_match(pattern: &str, text: &str) -> bool {
    if !pattern.contains('*') {
        return pattern == text;
    }

    // The pattern contains at least one '*', so there are >= 2 segments.
    // The first segment anchors the start, the last anchors the end, and
    // middle segments must appear in order between them.
    let parts: Vec<&str> = pattern.split('*').collect();
    let first = parts[0];
    let last = parts[parts.len() - 1];
    let middle = &parts[1..parts.len() - 1];

    if !text.starts_with(first) {
        return false;
    }
    let mut remaining = &text[first.len()..];

    for part in middle {
        if part.is_empty() {
            continue;
        }
        match remaining.find(part) {
            Some(pos) => remaining = &remaining[pos + part.len()..],
            None => return false,
        }
    }

    remaining.ends_with(last)
}

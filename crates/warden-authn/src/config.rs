//! Serde configuration for the authenticators.
//!
//! These structs are embedded as sections of the top-level Warden
//! configuration file; each rejects unknown keys.

use serde::{Deserialize, Serialize};

/// `[ip]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IpRegexConfig {
    /// Allow-list pattern. Left unset, validation fails with a technical
    /// error.
    #[serde(default)]
    pub pattern: Option<String>,
}

/// `[directory]` section. The client is injected in code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirectoryConfig {
    /// Comma-separated attribute names copied into the profile.
    #[serde(default)]
    pub attributes: String,
}

/// `[static_tokens]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticTokenConfig {
    /// Registered tokens.
    #[serde(default)]
    pub tokens: Vec<StaticTokenEntry>,
}

/// One token → identity mapping.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticTokenEntry {
    /// The secret token.
    pub token: String,
    /// Profile identifier.
    pub id: String,
    /// Permissions granted to the identity.
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Roles granted to the identity.
    #[serde(default)]
    pub roles: Vec<String>,
}

impl StaticTokenEntry {
    /// Create an entry with no permissions or roles.
    pub fn new(token: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            id: id.into(),
            permissions: Vec::new(),
            roles: Vec::new(),
        }
    }

    /// Add permissions.
    pub fn with_permissions<S: Into<String>>(mut self, permissions: impl IntoIterator<Item = S>) -> Self {
        self.permissions.extend(permissions.into_iter().map(Into::into));
        self
    }

    /// Add roles.
    pub fn with_roles<S: Into<String>>(mut self, roles: impl IntoIterator<Item = S>) -> Self {
        self.roles.extend(roles.into_iter().map(Into::into));
        self
    }
}

impl std::fmt::Debug for StaticTokenEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenEntry")
            .field("token", &"<redacted>")
            .field("id", &self.id)
            .field("permissions", &self.permissions)
            .field("roles", &self.roles)
            .finish()
    }
}

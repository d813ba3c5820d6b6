//! Verified identity produced by a successful authentication.
//!
//! A [`UserProfile`] is backend-agnostic: an identifier plus open attribute,
//! permission and role sets. Protocol-specific secrets (a bearer access token,
//! an identity-token string) live in named optional fields that can be
//! cleared independently with [`UserProfile::clear_sensitive_data`] before the
//! profile is persisted.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// ProfileAttribute
// ============================================================================

/// Value of a profile attribute: one string or a list of strings.
///
/// Both shapes are part of the public contract; directory backends produce
/// `Multi` only when the backend reported more than one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileAttribute {
    /// Single-valued attribute.
    Single(String),
    /// Multi-valued attribute.
    Multi(Vec<String>),
}

impl ProfileAttribute {
    /// The value if single-valued.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(v) => Some(v),
            Self::Multi(_) => None,
        }
    }

    /// The values if multi-valued.
    pub fn as_multi(&self) -> Option<&[String]> {
        match self {
            Self::Single(_) => None,
            Self::Multi(v) => Some(v),
        }
    }

    /// All values, whatever the shape.
    pub fn values(&self) -> Vec<&str> {
        match self {
            Self::Single(v) => vec![v.as_str()],
            Self::Multi(v) => v.iter().map(String::as_str).collect(),
        }
    }
}

impl From<String> for ProfileAttribute {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<&str> for ProfileAttribute {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<Vec<String>> for ProfileAttribute {
    fn from(values: Vec<String>) -> Self {
        Self::Multi(values)
    }
}

// ============================================================================
// Scope / BearerAccessToken
// ============================================================================

/// Space-delimited OAuth scope, e.g. `"openid email"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scope(Vec<String>);

impl Scope {
    /// Parse a space-delimited scope string. Duplicates are dropped, order
    /// of first appearance is kept.
    pub fn parse(s: &str) -> Self {
        let mut values: Vec<String> = Vec::new();
        for v in s.split_whitespace() {
            if !values.iter().any(|existing| existing == v) {
                values.push(v.to_string());
            }
        }
        Self(values)
    }

    /// Whether the scope contains the given value.
    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value)
    }

    /// Individual scope values.
    pub fn values(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

/// OAuth 2.0 bearer access token held by a profile.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BearerAccessToken {
    value: String,
    /// Lifetime in seconds, if the issuer reported one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lifetime: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scope: Option<Scope>,
}

impl BearerAccessToken {
    /// Wrap an issued token value.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            lifetime: None,
            scope: None,
        }
    }

    /// Generate a random token of `byte_length` bytes, base64url-encoded.
    pub fn generate(byte_length: usize, lifetime: Option<u64>, scope: Option<Scope>) -> Result<Self> {
        let mut buf = vec![0u8; byte_length];
        getrandom::getrandom(&mut buf)
            .map_err(|e| Error::technical_with_source("cannot generate access token", e))?;
        Ok(Self {
            value: base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buf),
            lifetime,
            scope,
        })
    }

    /// Set the lifetime in seconds.
    pub fn with_lifetime(mut self, seconds: u64) -> Self {
        self.lifetime = Some(seconds);
        self
    }

    /// Set the scope.
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// The token value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Lifetime in seconds.
    pub fn lifetime(&self) -> Option<u64> {
        self.lifetime
    }

    /// Granted scope.
    pub fn scope(&self) -> Option<&Scope> {
        self.scope.as_ref()
    }
}

impl fmt::Debug for BearerAccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerAccessToken")
            .field("value", &"<redacted>")
            .field("lifetime", &self.lifetime)
            .field("scope", &self.scope)
            .finish()
    }
}

// ============================================================================
// UserProfile
// ============================================================================

/// A verified identity.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    id: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, ProfileAttribute>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    permissions: BTreeSet<String>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    roles: BTreeSet<String>,

    #[serde(default)]
    remembered: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_token: Option<BearerAccessToken>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    id_token: Option<String>,
}

impl UserProfile {
    /// Create a profile for the given identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: BTreeMap::new(),
            permissions: BTreeSet::new(),
            roles: BTreeSet::new(),
            remembered: false,
            access_token: None,
            id_token: None,
        }
    }

    /// The stable identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    // -- attributes ---------------------------------------------------------

    /// Add an attribute, replacing any existing value under the same key.
    pub fn add_attribute(&mut self, key: impl Into<String>, value: impl Into<ProfileAttribute>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Add several attributes.
    pub fn add_attributes<K, V>(&mut self, attributes: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<ProfileAttribute>,
    {
        for (k, v) in attributes {
            self.add_attribute(k, v);
        }
    }

    /// An attribute by key.
    pub fn attribute(&self, key: &str) -> Option<&ProfileAttribute> {
        self.attributes.get(key)
    }

    /// A single-valued attribute as a string slice.
    pub fn attribute_as_str(&self, key: &str) -> Option<&str> {
        self.attribute(key).and_then(ProfileAttribute::as_single)
    }

    /// Whether an attribute is present.
    pub fn contains_attribute(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Remove an attribute, returning its value.
    pub fn remove_attribute(&mut self, key: &str) -> Option<ProfileAttribute> {
        self.attributes.remove(key)
    }

    /// All attributes.
    pub fn attributes(&self) -> &BTreeMap<String, ProfileAttribute> {
        &self.attributes
    }

    // -- permissions and roles ---------------------------------------------

    /// Grant a permission.
    pub fn add_permission(&mut self, permission: impl Into<String>) {
        self.permissions.insert(permission.into());
    }

    /// Grant several permissions.
    pub fn add_permissions<S: Into<String>>(&mut self, permissions: impl IntoIterator<Item = S>) {
        self.permissions.extend(permissions.into_iter().map(Into::into));
    }

    /// Granted permissions.
    pub fn permissions(&self) -> &BTreeSet<String> {
        &self.permissions
    }

    /// Whether the permission is granted.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    /// Grant a role.
    pub fn add_role(&mut self, role: impl Into<String>) {
        self.roles.insert(role.into());
    }

    /// Grant several roles.
    pub fn add_roles<S: Into<String>>(&mut self, roles: impl IntoIterator<Item = S>) {
        self.roles.extend(roles.into_iter().map(Into::into));
    }

    /// Granted roles.
    pub fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }

    /// Whether the role is granted.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    // -- remember-me --------------------------------------------------------

    /// Whether the identity was restored from a remember-me mechanism.
    pub fn is_remembered(&self) -> bool {
        self.remembered
    }

    /// Mark the identity as remembered.
    pub fn set_remembered(&mut self, remembered: bool) {
        self.remembered = remembered;
    }

    // -- sensitive data -----------------------------------------------------

    /// The bearer access token, if any.
    pub fn access_token(&self) -> Option<&BearerAccessToken> {
        self.access_token.as_ref()
    }

    /// Set or clear the bearer access token.
    pub fn set_access_token(&mut self, token: Option<BearerAccessToken>) {
        self.access_token = token;
    }

    /// The raw identity-token string, if any.
    pub fn id_token(&self) -> Option<&str> {
        self.id_token.as_deref()
    }

    /// Set or clear the identity-token string.
    pub fn set_id_token(&mut self, token: Option<String>) {
        self.id_token = token;
    }

    /// Drop every protocol-derived secret. Identifier, attributes,
    /// permissions and roles are left as they are.
    pub fn clear_sensitive_data(&mut self) {
        self.access_token = None;
        self.id_token = None;
    }

    // -- persistence --------------------------------------------------------

    /// Serialize to JSON for session storage.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restore from JSON produced by [`UserProfile::to_json`].
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to a JSON value (request or session attribute).
    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Restore from a JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

impl fmt::Debug for UserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserProfile")
            .field("id", &self.id)
            .field("attributes", &self.attributes)
            .field("permissions", &self.permissions)
            .field("roles", &self.roles)
            .field("remembered", &self.remembered)
            .field("access_token", &self.access_token)
            .field("id_token", &self.id_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

//! Username/password validation delegated to a directory service.
//!
//! The wire protocol lives behind [`DirectoryClient`]. This module only maps
//! the client's result onto the error taxonomy and builds the profile from
//! the returned entry.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use warden_core::constants::ELEMENT_SEPARATOR;
use warden_core::{
    Credentials, Error, InitState, LazyInit, ProfileAttribute, Result, UserProfile,
    UsernamePasswordCredentials,
};

use crate::Authenticator;
use crate::config::DirectoryConfig;

// ============================================================================
// Client boundary
// ============================================================================

/// A bind/search request sent to the directory.
#[derive(Clone)]
pub struct DirectoryRequest {
    /// Account reference to resolve.
    pub username: String,
    /// Proof to verify. Never logged.
    pub password: String,
    /// Attributes to return with the entry.
    pub attributes: Vec<String>,
}

impl fmt::Debug for DirectoryRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("attributes", &self.attributes)
            .finish()
    }
}

/// Outcome classification reported by the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DirectoryResultCode {
    /// Proof verified.
    Success,
    /// The account reference could not be resolved to an entry.
    DnResolutionFailure,
    /// The entry exists but the proof is wrong.
    InvalidCredential,
    /// The account is locked or disabled.
    AccountLocked,
    /// The password has expired.
    PasswordExpired,
}

/// A directory entry with its (possibly multi-valued) attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Distinguished name of the entry.
    pub dn: String,
    /// Attribute name → values.
    pub attributes: HashMap<String, Vec<String>>,
}

impl DirectoryEntry {
    /// Create an entry with no attributes.
    pub fn new(dn: impl Into<String>) -> Self {
        Self {
            dn: dn.into(),
            attributes: HashMap::new(),
        }
    }

    /// Add an attribute with its values.
    pub fn with_attribute<S: Into<String>>(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        self.attributes
            .insert(name.into(), values.into_iter().map(Into::into).collect());
        self
    }
}

/// What the directory answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryResponse {
    /// Result classification.
    pub result_code: DirectoryResultCode,
    /// The resolved entry, present on success.
    pub entry: Option<DirectoryEntry>,
}

impl DirectoryResponse {
    /// A successful response carrying `entry`.
    pub fn success(entry: DirectoryEntry) -> Self {
        Self {
            result_code: DirectoryResultCode::Success,
            entry: Some(entry),
        }
    }

    /// A failed response.
    pub fn failure(result_code: DirectoryResultCode) -> Self {
        Self {
            result_code,
            entry: None,
        }
    }

    /// Whether the proof verified.
    pub fn is_success(&self) -> bool {
        self.result_code == DirectoryResultCode::Success
    }
}

/// Protocol client that performs the actual proof check.
///
/// A returned `Err` is a client-level fault (connectivity, protocol error)
/// and is treated as technical. A negative verdict is an `Ok` response with a
/// non-success result code.
pub trait DirectoryClient: Send + Sync {
    /// Authenticate and fetch the entry.
    fn authenticate(
        &self,
        request: &DirectoryRequest,
    ) -> std::result::Result<DirectoryResponse, Box<dyn std::error::Error + Send + Sync>>;
}

// ============================================================================
// Authenticator
// ============================================================================

/// Validates [`UsernamePasswordCredentials`] through a [`DirectoryClient`].
pub struct DirectoryAuthenticator {
    client: Option<Arc<dyn DirectoryClient>>,
    attributes: Option<String>,
    attribute_names: LazyInit<Vec<String>>,
}

impl DirectoryAuthenticator {
    /// Create an authenticator that returns the comma-separated `attributes`.
    pub fn new(client: Arc<dyn DirectoryClient>, attributes: impl Into<String>) -> Self {
        Self::from_parts(Some(client), Some(attributes.into()))
    }

    /// Create an authenticator from optional parts. Missing parts surface as
    /// a technical error on first validation.
    pub fn from_parts(client: Option<Arc<dyn DirectoryClient>>, attributes: Option<String>) -> Self {
        Self {
            client,
            attributes,
            attribute_names: LazyInit::new("directory-authenticator"),
        }
    }

    /// Build from configuration with an injected client.
    pub fn from_config(client: Arc<dyn DirectoryClient>, config: &DirectoryConfig) -> Self {
        Self::new(client, config.attributes.clone())
    }

    /// Initialization state.
    pub fn state(&self) -> InitState {
        self.attribute_names.state()
    }

    fn initialized(&self) -> Result<(&dyn DirectoryClient, &[String])> {
        let names = self.attribute_names.get_or_init(|| {
            if self.client.is_none() {
                return Err(Error::technical("directoryClient cannot be null"));
            }
            let attributes = self
                .attributes
                .as_deref()
                .ok_or_else(|| Error::technical("attributes cannot be null"))?;
            Ok(parse_attribute_names(attributes))
        })?;
        let client = self
            .client
            .as_deref()
            .ok_or_else(|| Error::technical("directoryClient cannot be null"))?;
        Ok((client, names))
    }
}

impl fmt::Debug for DirectoryAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryAuthenticator")
            .field("client", &self.client.as_ref().map(|_| "<client>"))
            .field("attributes", &self.attributes)
            .field("state", &self.state())
            .finish()
    }
}

impl Authenticator<UsernamePasswordCredentials> for DirectoryAuthenticator {
    fn validate(&self, credentials: &mut UsernamePasswordCredentials) -> Result<()> {
        let (client, names) = self.initialized()?;
        log::debug!("Validating {credentials:?} against directory");

        let username = credentials.username().to_string();
        let request = DirectoryRequest {
            username: username.clone(),
            password: credentials.password().to_string(),
            attributes: names.to_vec(),
        };

        let response = client.authenticate(&request).map_err(|e| {
            log::error!("Directory client fault for '{username}': {e}");
            Error::Technical {
                message: "Unexpected directory error".to_string(),
                source: Some(e),
            }
        })?;

        match response.result_code {
            DirectoryResultCode::Success => {}
            DirectoryResultCode::DnResolutionFailure => {
                log::warn!("Directory account not found: {username}");
                return Err(Error::AccountNotFound(format!("{username} not found")));
            }
            code => {
                log::warn!("Directory rejected credentials for {username}: {code:?}");
                return Err(Error::BadCredentials(format!(
                    "Invalid credentials for: {username}"
                )));
            }
        }

        let entry = response.entry.unwrap_or_default();
        let profile = build_profile(&username, &entry, names);
        credentials.set_user_profile(profile);
        Ok(())
    }
}

fn parse_attribute_names(attributes: &str) -> Vec<String> {
    attributes
        .split(ELEMENT_SEPARATOR)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// Copy the requested attributes from `entry`. More than one value becomes a
/// list; exactly one becomes a single string; absent attributes are skipped.
fn build_profile(username: &str, entry: &DirectoryEntry, names: &[String]) -> UserProfile {
    let mut profile = UserProfile::new(username);
    for name in names {
        let Some(values) = entry.attributes.get(name) else {
            continue;
        };
        let attribute = match values.as_slice() {
            [] => continue,
            [single] => ProfileAttribute::Single(single.clone()),
            many => ProfileAttribute::Multi(many.to_vec()),
        };
        log::debug!("Adding directory attribute '{name}' to profile '{username}'");
        profile.add_attribute(name.clone(), attribute);
    }
    profile
}

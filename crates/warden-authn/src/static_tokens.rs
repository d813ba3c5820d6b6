//! Fixed token → identity registry.

use std::collections::HashMap;
use std::fmt;

use warden_core::{Credentials, Error, Result, TokenCredentials, UserProfile};

use crate::Authenticator;
use crate::config::{StaticTokenConfig, StaticTokenEntry};

/// Accepts tokens from a fixed registry, such as API keys issued to
/// service accounts.
///
/// Each accepted token yields a fresh profile with the registered identifier,
/// permissions and roles.
#[derive(Default)]
pub struct StaticTokenAuthenticator {
    tokens: HashMap<String, StaticTokenEntry>,
}

impl StaticTokenAuthenticator {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from configuration. Later entries replace earlier ones with
    /// the same token.
    pub fn from_config(config: &StaticTokenConfig) -> Self {
        config
            .tokens
            .iter()
            .cloned()
            .fold(Self::new(), |registry, entry| registry.with_entry(entry))
    }

    /// Register a token.
    pub fn with_entry(mut self, entry: StaticTokenEntry) -> Self {
        self.tokens.insert(entry.token.clone(), entry);
        self
    }

    /// Number of registered tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Debug for StaticTokenAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticTokenAuthenticator")
            .field("tokens", &self.tokens.len())
            .finish()
    }
}

impl Authenticator<TokenCredentials> for StaticTokenAuthenticator {
    fn validate(&self, credentials: &mut TokenCredentials) -> Result<()> {
        log::debug!("Validating {credentials:?} against static registry");

        let token = credentials.token();
        if token.is_empty() {
            log::warn!("Rejected empty token from {}", credentials.client_name());
            return Err(Error::BadCredentials("Token cannot be blank".to_string()));
        }

        let Some(entry) = self.tokens.get(token) else {
            log::warn!("Rejected unknown token from {}", credentials.client_name());
            return Err(Error::BadCredentials("Unknown token".to_string()));
        };

        let mut profile = UserProfile::new(entry.id.as_str());
        profile.add_permissions(entry.permissions.iter().cloned());
        profile.add_roles(entry.roles.iter().cloned());
        credentials.set_user_profile(profile);
        Ok(())
    }
}

//! TOML configuration.
//!
//! ```toml
//! [ip]
//! pattern = "10\\.0\\.0\\.[0-9]+"
//!
//! [static_tokens]
//! tokens = [{ token = "abc", id = "ci-bot", permissions = ["deploy"] }]
//!
//! [directory]
//! attributes = "cn,mail"
//!
//! [authorizers.admin]
//! kind = "require_any_role"
//! elements = ["admin"]
//!
//! [pipeline]
//! login_url = "/login"
//! authorizers = "admin"
//! ```
//!
//! Every section is optional; unknown keys are rejected.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use warden_authn::{
    Authenticator, DirectoryAuthenticator, DirectoryClient, DirectoryConfig, IpRegexAuthenticator,
    IpRegexConfig, StaticTokenAuthenticator, StaticTokenConfig,
};
use warden_authz::config::build_checker;
use warden_authz::{AuthorizationChecker, AuthorizerConfig};
use warden_core::{Credentials, Error, Result};

use crate::pipeline::SecurityPipeline;

/// `[pipeline]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Where rejected requests are redirected. Unset, rejections are
    /// reported as denials.
    #[serde(default)]
    pub login_url: Option<String>,

    /// Comma-separated authorizer names applied after authentication.
    #[serde(default)]
    pub authorizers: String,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WardenConfig {
    /// IP allow-listing.
    #[serde(default)]
    pub ip: Option<IpRegexConfig>,

    /// Static token registry.
    #[serde(default)]
    pub static_tokens: Option<StaticTokenConfig>,

    /// Directory delegation.
    #[serde(default)]
    pub directory: Option<DirectoryConfig>,

    /// Named authorizers.
    #[serde(default)]
    pub authorizers: BTreeMap<String, AuthorizerConfig>,

    /// Pipeline behaviour.
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl WardenConfig {
    /// Parse from a TOML string.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).map_err(|e| Error::config(format!("Failed to parse configuration: {e}")))
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
        log::info!("Loaded Warden configuration from {}", path.display());
        Ok(config)
    }

    /// Build the registry of every `[authorizers.*]` entry.
    pub fn authorization_checker(&self) -> AuthorizationChecker {
        build_checker(&self.authorizers)
    }

    /// The IP authenticator. Without an `[ip]` section it has no pattern and
    /// fails with a technical error on first use.
    pub fn ip_authenticator(&self) -> IpRegexAuthenticator {
        self.ip
            .as_ref()
            .map(IpRegexAuthenticator::from_config)
            .unwrap_or_default()
    }

    /// The static token authenticator (empty without a section).
    pub fn static_token_authenticator(&self) -> StaticTokenAuthenticator {
        self.static_tokens
            .as_ref()
            .map(StaticTokenAuthenticator::from_config)
            .unwrap_or_default()
    }

    /// The directory authenticator over `client`.
    pub fn directory_authenticator(&self, client: Arc<dyn DirectoryClient>) -> DirectoryAuthenticator {
        let config = self.directory.clone().unwrap_or_default();
        DirectoryAuthenticator::from_config(client, &config)
    }

    /// A pipeline around `authenticator` using the configured authorizers
    /// and login URL.
    pub fn pipeline<C, A>(&self, authenticator: A) -> SecurityPipeline<C>
    where
        C: Credentials + 'static,
        A: Authenticator<C> + 'static,
    {
        let pipeline = SecurityPipeline::new(authenticator)
            .with_checker(self.authorization_checker())
            .with_authorizers(self.pipeline.authorizers.clone());
        match &self.pipeline.login_url {
            Some(url) => pipeline.with_login_url(url.clone()),
            None => pipeline,
        }
    }
}

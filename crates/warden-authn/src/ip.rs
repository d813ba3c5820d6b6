//! Pattern-based allow-listing of client addresses.

use regex::Regex;
use warden_core::error::require_not_blank;
use warden_core::{Credentials, Error, InitState, LazyInit, Result, TokenCredentials, UserProfile};

use crate::Authenticator;
use crate::config::IpRegexConfig;

/// Accepts a token (typically the client IP address) when it matches the
/// configured pattern in full.
///
/// The pattern is compiled once, on first validation. A missing or invalid
/// pattern makes every validation fail with a technical error; it never
/// degrades to allow-all or deny-all.
#[derive(Debug)]
pub struct IpRegexAuthenticator {
    pattern: Option<String>,
    compiled: LazyInit<Regex>,
}

impl IpRegexAuthenticator {
    /// Create an authenticator for `pattern`.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self::with_pattern(Some(pattern.into()))
    }

    /// Create an authenticator with no pattern yet; call
    /// [`set_pattern`](Self::set_pattern) before first use.
    pub fn unconfigured() -> Self {
        Self::with_pattern(None)
    }

    /// Build from configuration.
    pub fn from_config(config: &IpRegexConfig) -> Self {
        Self::with_pattern(config.pattern.clone())
    }

    fn with_pattern(pattern: Option<String>) -> Self {
        Self {
            pattern,
            compiled: LazyInit::new("ip-regex-authenticator"),
        }
    }

    /// Replace the pattern. Discards any earlier initialization result.
    pub fn set_pattern(&mut self, pattern: impl Into<String>) {
        *self = Self::new(pattern);
    }

    /// The configured pattern, if any.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// Initialization state of the compiled pattern.
    pub fn state(&self) -> InitState {
        self.compiled.state()
    }

    fn regex(&self) -> Result<&Regex> {
        self.compiled.get_or_init(|| {
            let pattern = require_not_blank("pattern", self.pattern.as_deref())?;
            Regex::new(&format!("^(?:{pattern})$"))
                .map_err(|e| Error::config(format!("invalid pattern '{pattern}': {e}")))
        })
    }
}

impl Default for IpRegexAuthenticator {
    fn default() -> Self {
        Self::unconfigured()
    }
}

impl Authenticator<TokenCredentials> for IpRegexAuthenticator {
    fn validate(&self, credentials: &mut TokenCredentials) -> Result<()> {
        let regex = self.regex()?;
        let ip = credentials.token();
        log::debug!("Validating {credentials:?} against IP pattern");

        if !regex.is_match(ip) {
            log::warn!("Rejected IP address: {ip}");
            return Err(Error::BadCredentials(format!("Unauthorized IP address: {ip}")));
        }

        let profile = UserProfile::new(ip);
        credentials.set_user_profile(profile);
        Ok(())
    }
}

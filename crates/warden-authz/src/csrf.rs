//! Anti-forgery token issuance and verification.
//!
//! [`CsrfTokenGeneratorAuthorizer`] always grants access; it exists for its
//! side effect of publishing a fresh token to the request attribute slot and
//! a response cookie, both named [`CSRF_TOKEN`]. [`CsrfAuthorizer`] checks
//! that state-changing requests echo the token back.
//!
//! Issuing rotates the session token, so the issuer first copies the old one
//! into the request under [`PREVIOUS_CSRF_TOKEN`]. The check prefers that
//! copy, which makes the two authorizers work in either list order.

use std::fmt;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::Value;
use warden_core::constants::{CSRF_TOKEN, PREVIOUS_CSRF_TOKEN};
use warden_core::error::require;
use warden_core::{Cookie, Error, Result, UserProfile, WebContext};

use crate::Authorizer;

const TOKEN_BYTES: usize = 32;

/// Methods that must not change server state and are therefore exempt from
/// token verification.
const SAFE_METHODS: [&str; 4] = ["GET", "HEAD", "OPTIONS", "TRACE"];

/// Produces CSRF tokens. A fresh token per call.
pub trait CsrfTokenGenerator: Send + Sync {
    /// Generate a token for the current request.
    fn get(&self, context: &mut dyn WebContext) -> Result<String>;
}

/// 32 bytes from the OS CSPRNG, base64url-encoded without padding.
///
/// The token is also stored in the session under [`CSRF_TOKEN`] so that
/// [`CsrfAuthorizer`] can verify it on the next request.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCsrfTokenGenerator;

impl CsrfTokenGenerator for RandomCsrfTokenGenerator {
    fn get(&self, context: &mut dyn WebContext) -> Result<String> {
        let mut bytes = [0u8; TOKEN_BYTES];
        getrandom::getrandom(&mut bytes)
            .map_err(|e| Error::technical_with_source("cannot generate CSRF token", e))?;
        let token = URL_SAFE_NO_PAD.encode(bytes);
        context.set_session_attribute(CSRF_TOKEN, Value::String(token.clone()));
        Ok(token)
    }
}

/// Publishes a fresh CSRF token on every request and always grants access.
pub struct CsrfTokenGeneratorAuthorizer {
    generator: Option<Arc<dyn CsrfTokenGenerator>>,
}

impl CsrfTokenGeneratorAuthorizer {
    /// Use `generator`.
    pub fn new(generator: Arc<dyn CsrfTokenGenerator>) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    /// No generator; every evaluation fails with a technical error.
    pub fn unconfigured() -> Self {
        Self { generator: None }
    }

    /// Replace the generator.
    pub fn set_generator(&mut self, generator: Arc<dyn CsrfTokenGenerator>) {
        self.generator = Some(generator);
    }
}

impl Default for CsrfTokenGeneratorAuthorizer {
    fn default() -> Self {
        Self::new(Arc::new(RandomCsrfTokenGenerator))
    }
}

impl fmt::Debug for CsrfTokenGeneratorAuthorizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsrfTokenGeneratorAuthorizer")
            .field("configured", &self.generator.is_some())
            .finish()
    }
}

impl Authorizer for CsrfTokenGeneratorAuthorizer {
    fn is_authorized(
        &self,
        context: &mut dyn WebContext,
        _profile: Option<&UserProfile>,
    ) -> Result<bool> {
        let generator = require("csrfTokenGenerator", self.generator.as_deref())?;
        if context.request_attribute(PREVIOUS_CSRF_TOKEN).is_none() {
            let previous = context.session_attribute(CSRF_TOKEN).unwrap_or(Value::Null);
            context.set_request_attribute(PREVIOUS_CSRF_TOKEN, previous);
        }
        let token = generator.get(context)?;

        context.set_request_attribute(CSRF_TOKEN, Value::String(token.clone()));
        let cookie = Cookie::new(CSRF_TOKEN, token).with_domain(context.server_name());
        context.add_response_cookie(cookie);
        Ok(true)
    }
}

/// Grants state-changing requests only when they carry the session's CSRF
/// token as a request parameter or header named [`CSRF_TOKEN`].
///
/// When a token was already issued during this request, the comparison is
/// against the session token from before that issuance.
///
/// Safe methods (GET, HEAD, OPTIONS, TRACE) always pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsrfAuthorizer;

impl Authorizer for CsrfAuthorizer {
    fn is_authorized(
        &self,
        context: &mut dyn WebContext,
        _profile: Option<&UserProfile>,
    ) -> Result<bool> {
        let method = context.request_method().to_ascii_uppercase();
        if SAFE_METHODS.contains(&method.as_str()) {
            return Ok(true);
        }

        let expected = match context.request_attribute(PREVIOUS_CSRF_TOKEN) {
            Some(previous) => previous.as_str().map(String::from),
            None => context
                .session_attribute(CSRF_TOKEN)
                .and_then(|v| v.as_str().map(String::from)),
        };
        let Some(expected) = expected else {
            log::warn!("No CSRF token in session for {method} request");
            return Ok(false);
        };

        let supplied = context
            .request_parameter(CSRF_TOKEN)
            .or_else(|| context.request_header(CSRF_TOKEN));
        let granted = supplied.is_some_and(|s| constant_time_eq(s.as_bytes(), expected.as_bytes()));
        if !granted {
            log::warn!("CSRF token mismatch for {method} request");
        }
        Ok(granted)
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

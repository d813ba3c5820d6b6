//! Raw, unverified proof of identity.
//!
//! Credentials are built per request by a transport adapter and handed to an
//! authenticator. Their fields are immutable; the only mutable part is the
//! profile slot, which an authenticator fills on success.

use std::fmt;

use crate::constants::{PASSWORD, USERNAME};
use crate::context::WebContext;
use crate::profile::UserProfile;

/// Common behaviour of all credential variants.
pub trait Credentials: fmt::Debug {
    /// Name of the client (transport adapter) that produced the credentials.
    fn client_name(&self) -> &str;

    /// The profile attached by a successful validation.
    fn user_profile(&self) -> Option<&UserProfile>;

    /// Attach the verified profile, replacing any previous one.
    fn set_user_profile(&mut self, profile: UserProfile);

    /// Detach and return the verified profile.
    fn take_user_profile(&mut self) -> Option<UserProfile>;
}

/// A single opaque token: an IP address, a bearer token, an API key.
#[derive(Clone)]
pub struct TokenCredentials {
    token: String,
    client_name: String,
    profile: Option<UserProfile>,
}

impl TokenCredentials {
    /// Create token credentials.
    pub fn new(token: impl Into<String>, client_name: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            client_name: client_name.into(),
            profile: None,
        }
    }

    /// The token.
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl Credentials for TokenCredentials {
    fn client_name(&self) -> &str {
        &self.client_name
    }

    fn user_profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    fn set_user_profile(&mut self, profile: UserProfile) {
        self.profile = Some(profile);
    }

    fn take_user_profile(&mut self) -> Option<UserProfile> {
        self.profile.take()
    }
}

impl fmt::Debug for TokenCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCredentials")
            .field("token", &"<redacted>")
            .field("client_name", &self.client_name)
            .field("profile", &self.profile.as_ref().map(UserProfile::id))
            .finish()
    }
}

/// A username and password pair.
#[derive(Clone)]
pub struct UsernamePasswordCredentials {
    username: String,
    password: String,
    client_name: String,
    profile: Option<UserProfile>,
}

impl UsernamePasswordCredentials {
    /// Create username/password credentials.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        client_name: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            client_name: client_name.into(),
            profile: None,
        }
    }

    /// Extract from the `username` and `password` request parameters.
    /// Returns `None` unless both are present and the username is not blank.
    pub fn from_form(context: &dyn WebContext, client_name: impl Into<String>) -> Option<Self> {
        let username = context.request_parameter(USERNAME)?;
        let password = context.request_parameter(PASSWORD)?;
        if username.trim().is_empty() {
            return None;
        }
        Some(Self::new(username, password, client_name))
    }

    /// The username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The password. Never log it.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl Credentials for UsernamePasswordCredentials {
    fn client_name(&self) -> &str {
        &self.client_name
    }

    fn user_profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    fn set_user_profile(&mut self, profile: UserProfile) {
        self.profile = Some(profile);
    }

    fn take_user_profile(&mut self) -> Option<UserProfile> {
        self.profile.take()
    }
}

impl fmt::Debug for UsernamePasswordCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UsernamePasswordCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("client_name", &self.client_name)
            .field("profile", &self.profile.as_ref().map(UserProfile::id))
            .finish()
    }
}

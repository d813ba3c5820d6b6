//! Credentials in, tagged outcome out.
//!
//! [`SecurityPipeline::run`] performs, in order:
//!
//! 1. `validate` the credentials with the authenticator;
//! 2. create the profile through the [`ProfileCreator`];
//! 3. store the profile under [`USER_PROFILE`] in the request attributes;
//! 4. evaluate the configured authorizers.
//!
//! Rejected credentials become [`AuthOutcome::Denied`], or, when a login URL
//! is configured, a redirect to it after the requested URL has been saved in
//! the session under [`REQUESTED_URL`]. Technical faults are returned as
//! `Err` and never turned into an outcome.

use std::fmt;
use std::sync::Arc;

use warden_authn::{Authenticator, AuthenticatorProfileCreator, ProfileCreator};
use warden_authz::AuthorizationChecker;
use warden_core::constants::{REQUESTED_URL, USER_PROFILE};
use warden_core::{AuthOutcome, Credentials, HttpAction, Result, WebContext};

/// Runs one request through authentication and authorization.
pub struct SecurityPipeline<C: Credentials> {
    authenticator: Arc<dyn Authenticator<C>>,
    profile_creator: Arc<dyn ProfileCreator<C>>,
    checker: AuthorizationChecker,
    authorizers: String,
    login_url: Option<String>,
}

impl<C: Credentials + 'static> SecurityPipeline<C> {
    /// Create a pipeline with no authorizers and no login URL.
    pub fn new(authenticator: impl Authenticator<C> + 'static) -> Self {
        Self::with_shared_authenticator(Arc::new(authenticator))
    }

    /// Create a pipeline around an authenticator shared with other
    /// pipelines.
    pub fn with_shared_authenticator(authenticator: Arc<dyn Authenticator<C>>) -> Self {
        Self {
            authenticator,
            profile_creator: Arc::new(AuthenticatorProfileCreator),
            checker: AuthorizationChecker::new(),
            authorizers: String::new(),
            login_url: None,
        }
    }

    /// Replace the profile creator.
    pub fn with_profile_creator(mut self, creator: impl ProfileCreator<C> + 'static) -> Self {
        self.profile_creator = Arc::new(creator);
        self
    }

    /// Use `checker` to resolve authorizer names.
    pub fn with_checker(mut self, checker: AuthorizationChecker) -> Self {
        self.checker = checker;
        self
    }

    /// Comma-separated authorizer names evaluated after authentication.
    pub fn with_authorizers(mut self, names: impl Into<String>) -> Self {
        self.authorizers = names.into();
        self
    }

    /// Redirect rejected requests to `url`.
    pub fn with_login_url(mut self, url: impl Into<String>) -> Self {
        self.login_url = Some(url.into());
        self
    }

    /// The configured login URL.
    pub fn login_url(&self) -> Option<&str> {
        self.login_url.as_deref()
    }

    /// Authenticate `credentials` and authorize the resulting profile.
    ///
    /// # Errors
    ///
    /// Technical faults from the authenticator, the profile creator or an
    /// authorizer, and failures serializing the profile into the context.
    pub fn run(&self, context: &mut dyn WebContext, mut credentials: C) -> Result<AuthOutcome> {
        let client = credentials.client_name().to_string();

        match self.authenticator.validate(&mut credentials) {
            Ok(()) => {}
            Err(e) if e.is_credentials_error() => {
                log::warn!("Authentication failed for client '{client}': {e}");
                return Ok(self.reject(context, e.to_string()));
            }
            Err(e) => return Err(e),
        }

        let Some(profile) = self.profile_creator.create(&mut credentials)? else {
            log::warn!("No profile created for client '{client}'");
            return Ok(self.reject(context, "No profile created".to_string()));
        };
        log::debug!("Authenticated '{}' via client '{client}'", profile.id());

        context.set_request_attribute(USER_PROFILE, profile.to_value()?);

        if self
            .checker
            .is_authorized(context, Some(&profile), &self.authorizers)?
        {
            Ok(AuthOutcome::Success(profile))
        } else {
            log::warn!("Access denied for '{}'", profile.id());
            Ok(AuthOutcome::denied(format!("Access denied for {}", profile.id())))
        }
    }

    fn reject(&self, context: &mut dyn WebContext, reason: String) -> AuthOutcome {
        match &self.login_url {
            Some(location) => {
                let requested = context.full_request_url();
                context.set_session_attribute(REQUESTED_URL, requested.into());
                AuthOutcome::ActionRequired(HttpAction::Redirect {
                    location: location.clone(),
                })
            }
            None => AuthOutcome::denied(reason),
        }
    }
}

impl<C: Credentials> fmt::Debug for SecurityPipeline<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityPipeline")
            .field("checker", &self.checker)
            .field("authorizers", &self.authorizers)
            .field("login_url", &self.login_url)
            .finish()
    }
}

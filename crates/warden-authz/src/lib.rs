//! Per-request authorization for Warden.
//!
//! Provides:
//! - [`Authorizer`]: predicate over the request context and verified profile
//! - [`Elements`]: the one normalized form of configured permissions/roles
//! - [`RequireElementsAuthorizer`]: require any/all permissions or roles
//! - [`IsAuthenticatedAuthorizer`]: grants whenever a profile is present
//! - [`CsrfTokenGeneratorAuthorizer`] / [`CsrfAuthorizer`]: issue and verify
//!   anti-forgery tokens
//! - [`AuthorizationChecker`]: evaluates a named list of authorizers
//! - [`config`]: serde configuration for building authorizers
//!
//! Denial is a normal outcome (`Ok(false)`), never an error.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod checker;
pub mod config;
mod csrf;
mod elements;
mod proptests;
mod require;

pub use checker::AuthorizationChecker;
pub use config::AuthorizerConfig;
pub use csrf::{
    CsrfAuthorizer, CsrfTokenGenerator, CsrfTokenGeneratorAuthorizer, RandomCsrfTokenGenerator,
};
pub use elements::Elements;
pub use require::{IsAuthenticatedAuthorizer, Requirement, RequireElementsAuthorizer, Target};

use warden_core::{Result, UserProfile, WebContext};

/// Decides whether the current request may proceed.
///
/// Authorizers are shared between concurrent requests. They are
/// side-effect-free unless documented otherwise.
pub trait Authorizer: Send + Sync {
    /// Returns `Ok(true)` to grant access and `Ok(false)` to deny it.
    ///
    /// # Errors
    ///
    /// A technical error when the authorizer is misconfigured.
    fn is_authorized(
        &self,
        context: &mut dyn WebContext,
        profile: Option<&UserProfile>,
    ) -> Result<bool>;
}

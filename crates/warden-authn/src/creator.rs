//! Profile creation after successful validation.

use warden_core::{Credentials, Result, UserProfile};

/// Produces the profile returned to the caller from validated credentials.
pub trait ProfileCreator<C: Credentials>: Send + Sync {
    /// Create the profile. Returns `Ok(None)` when the credentials carry no
    /// identity.
    fn create(&self, credentials: &mut C) -> Result<Option<UserProfile>>;
}

/// Returns the profile the authenticator attached to the credentials.
#[derive(Debug, Default, Clone, Copy)]
pub struct AuthenticatorProfileCreator;

impl AuthenticatorProfileCreator {
    /// Create a new creator.
    pub fn new() -> Self {
        Self
    }
}

impl<C: Credentials> ProfileCreator<C> for AuthenticatorProfileCreator {
    fn create(&self, credentials: &mut C) -> Result<Option<UserProfile>> {
        Ok(credentials.take_user_profile())
    }
}

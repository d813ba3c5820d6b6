//! Credential validation for Warden.
//!
//! Provides:
//! - [`Authenticator`]: the contract every backend implements
//! - [`ProfileCreator`] / [`AuthenticatorProfileCreator`]: turns validated
//!   credentials into the profile handed to the caller
//! - [`IpRegexAuthenticator`]: allow-lists client addresses by pattern
//! - [`DirectoryAuthenticator`]: delegates username/password checks to a
//!   [`DirectoryClient`]
//! - [`StaticTokenAuthenticator`]: fixed token → identity registry
//! - [`config`]: serde configuration for the backends above
//!
//! An authenticator either attaches a [`UserProfile`] to the credentials or
//! fails with one of three error kinds: a technical fault, an unknown
//! account, or bad credentials.
//!
//! [`UserProfile`]: warden_core::UserProfile

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
mod creator;
mod directory;
mod ip;
mod static_tokens;

pub use config::{DirectoryConfig, IpRegexConfig, StaticTokenConfig, StaticTokenEntry};
pub use creator::{AuthenticatorProfileCreator, ProfileCreator};
pub use directory::{
    DirectoryAuthenticator, DirectoryClient, DirectoryEntry, DirectoryRequest, DirectoryResponse,
    DirectoryResultCode,
};
pub use ip::IpRegexAuthenticator;
pub use static_tokens::StaticTokenAuthenticator;

use warden_core::{Credentials, Result};

/// Validates credentials against a backend.
///
/// Implementations are long-lived and shared between concurrent requests, so
/// they must be `Send + Sync` and keep all configuration immutable once it
/// has been initialized.
pub trait Authenticator<C: Credentials>: Send + Sync {
    /// Check the credentials and, on success, attach the verified profile.
    ///
    /// # Errors
    ///
    /// - [`Error::Technical`] when configuration is missing or the backend
    ///   faults; raised before any backend call when initialization fails.
    /// - [`Error::AccountNotFound`] when the claimed identity does not exist.
    /// - [`Error::BadCredentials`] when the proof does not verify.
    ///
    /// [`Error::Technical`]: warden_core::Error::Technical
    /// [`Error::AccountNotFound`]: warden_core::Error::AccountNotFound
    /// [`Error::BadCredentials`]: warden_core::Error::BadCredentials
    fn validate(&self, credentials: &mut C) -> Result<()>;
}

impl<C: Credentials, A: Authenticator<C> + ?Sized> Authenticator<C> for std::sync::Arc<A> {
    fn validate(&self, credentials: &mut C) -> Result<()> {
        (**self).validate(credentials)
    }
}

//! Warden: protocol-agnostic authentication and authorization.
//!
//! Warden turns raw credentials into a verified [`UserProfile`] and then
//! decides whether that identity may proceed, independently of the wire
//! protocol or directory technology used to verify the credentials.
//!
//! This umbrella crate re-exports the building blocks and adds:
//! - [`WardenConfig`]: TOML configuration for backends and authorizers
//! - [`SecurityPipeline`]: credentials in, [`AuthOutcome`] out
//!
//! # Example
//!
//! ```rust
//! use warden::{AuthOutcome, IpRegexAuthenticator, MemoryWebContext, SecurityPipeline,
//!              TokenCredentials};
//!
//! let pipeline = SecurityPipeline::new(IpRegexAuthenticator::new("127\\.0\\.0\\.1"));
//! let mut context = MemoryWebContext::new("localhost");
//!
//! let outcome = pipeline
//!     .run(&mut context, TokenCredentials::new("127.0.0.1", "IpClient"))
//!     .unwrap();
//! assert!(matches!(outcome, AuthOutcome::Success(ref p) if p.id() == "127.0.0.1"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod pipeline;

pub use config::{PipelineConfig, WardenConfig};
pub use pipeline::SecurityPipeline;

pub use warden_authn::{
    Authenticator, AuthenticatorProfileCreator, DirectoryAuthenticator, DirectoryClient,
    DirectoryEntry, DirectoryRequest, DirectoryResponse, DirectoryResultCode,
    IpRegexAuthenticator, ProfileCreator, StaticTokenAuthenticator,
};
pub use warden_authz::{
    AuthorizationChecker, Authorizer, AuthorizerConfig, CsrfAuthorizer, CsrfTokenGenerator,
    CsrfTokenGeneratorAuthorizer, Elements, IsAuthenticatedAuthorizer, RandomCsrfTokenGenerator,
    RequireElementsAuthorizer,
};
pub use warden_core::constants;
pub use warden_core::{
    AuthOutcome, BearerAccessToken, Cookie, Credentials, Error, HttpAction, InitState, LazyInit,
    MemoryWebContext, ProfileAttribute, Result, Scope, TokenCredentials, UserProfile,
    UsernamePasswordCredentials, WebContext,
};

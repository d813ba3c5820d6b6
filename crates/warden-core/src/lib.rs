//! Warden Core: shared types for the authentication/authorization pipeline.
//!
//! This crate has no internal Warden dependencies. It defines the contracts
//! every backend and policy check builds on:
//!
//! - [`error`]: the failure taxonomy (technical, account-not-found,
//!   bad-credentials) and `Result` alias
//! - [`credentials`]: token and username/password credentials
//! - [`profile`]: the verified [`UserProfile`] and its sensitive fields
//! - [`context`]: the [`WebContext`] collaborator supplied by the transport
//! - [`init`]: exactly-once lazy initialization for shared components
//! - [`outcome`]: the tagged [`AuthOutcome`] returned to callers
//! - [`constants`]: attribute keys shared with session/transport layers

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod constants;
pub mod context;
pub mod credentials;
pub mod error;
pub mod init;
pub mod outcome;
pub mod profile;

// Re-export key types at crate root for convenience
pub use context::{Cookie, MemoryWebContext, WebContext};
pub use credentials::{Credentials, TokenCredentials, UsernamePasswordCredentials};
pub use error::{Error, Result};
pub use init::{InitState, LazyInit};
pub use outcome::{AuthOutcome, HttpAction};
pub use profile::{BearerAccessToken, ProfileAttribute, Scope, UserProfile};

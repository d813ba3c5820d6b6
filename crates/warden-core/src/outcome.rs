//! Tagged outcome of running a request through the security pipeline.

use serde::{Deserialize, Serialize};

use crate::profile::UserProfile;

/// A response the surrounding transport layer is asked to emit.
///
/// This is a control signal, not a failure: the pipeline worked, and its
/// decision is that the caller should answer with this action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum HttpAction {
    /// 302 redirect to `location`.
    Redirect {
        /// Target URL
        location: String,
    },
    /// 401 with an optional `WWW-Authenticate` challenge.
    Unauthorized {
        /// Challenge header value
        challenge: Option<String>,
    },
    /// 403.
    Forbidden,
    /// Any other status with an optional body.
    Status {
        /// HTTP status code
        code: u16,
        /// Response body
        body: Option<String>,
    },
}

impl HttpAction {
    /// The HTTP status code the action maps to.
    pub fn status_code(&self) -> u16 {
        match self {
            HttpAction::Redirect { .. } => 302,
            HttpAction::Unauthorized { .. } => 401,
            HttpAction::Forbidden => 403,
            HttpAction::Status { code, .. } => *code,
        }
    }
}

/// Result of authenticating and authorizing one request.
///
/// Technical faults are not an outcome; they are returned as `Err` alongside
/// this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AuthOutcome {
    /// Identity verified and every authorizer granted access.
    Success(UserProfile),

    /// Credentials rejected or an authorizer refused access.
    Denied {
        /// Why access was refused
        reason: String,
    },

    /// The caller must emit a specific response (e.g. redirect to login).
    ActionRequired(HttpAction),
}

impl AuthOutcome {
    /// Shorthand for a denial.
    pub fn denied(reason: impl Into<String>) -> Self {
        AuthOutcome::Denied {
            reason: reason.into(),
        }
    }

    /// Returns `true` if the outcome is `Success`.
    pub fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Success(_))
    }

    /// Returns `true` if the outcome is `Denied`.
    pub fn is_denied(&self) -> bool {
        matches!(self, AuthOutcome::Denied { .. })
    }

    /// Returns `true` if the outcome is `ActionRequired`.
    pub fn is_action_required(&self) -> bool {
        matches!(self, AuthOutcome::ActionRequired(_))
    }

    /// The verified profile, if successful.
    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            AuthOutcome::Success(profile) => Some(profile),
            _ => None,
        }
    }

    /// Consume the outcome, returning the profile if successful.
    pub fn into_profile(self) -> Option<UserProfile> {
        match self {
            AuthOutcome::Success(profile) => Some(profile),
            _ => None,
        }
    }

    /// The requested action, if any.
    pub fn action(&self) -> Option<&HttpAction> {
        match self {
            AuthOutcome::ActionRequired(action) => Some(action),
            _ => None,
        }
    }
}

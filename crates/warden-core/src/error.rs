//! Error taxonomy for the authentication and authorization pipeline.

/// Errors that can occur while validating credentials or evaluating
/// authorizers.
///
/// Policy denial is not represented here: an authorizer that refuses access
/// returns `Ok(false)`.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Infrastructure or configuration fault unrelated to a specific
    /// credential (missing configuration, backend connectivity, failed
    /// initialization).
    #[error("Technical error: {message}")]
    Technical {
        /// Human-readable error message
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The claimed identity does not exist in the backend.
    #[error("{0}")]
    AccountNotFound(String),

    /// The identity exists (or cannot be told apart from one that does) but
    /// the supplied proof did not verify.
    #[error("{0}")]
    BadCredentials(String),

    /// Configuration could not be parsed or is inconsistent.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error (reading configuration files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error (profile persistence).
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience `Result` type alias for Warden operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new technical error with a message.
    pub fn technical<S: Into<String>>(message: S) -> Self {
        Error::Technical {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new technical error with a message and source error.
    pub fn technical_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Technical {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Returns `true` for rejections of the supplied credentials
    /// (account-not-found and bad-credentials).
    pub fn is_credentials_error(&self) -> bool {
        matches!(self, Error::AccountNotFound(_) | Error::BadCredentials(_))
    }

    /// Returns `true` for technical faults.
    pub fn is_technical(&self) -> bool {
        matches!(self, Error::Technical { .. })
    }
}

/// Fails with a technical error when a required collaborator is absent.
pub fn require<'a, T: ?Sized>(name: &str, value: Option<&'a T>) -> Result<&'a T> {
    value.ok_or_else(|| Error::technical(format!("{name} cannot be null")))
}

/// Fails with a technical error when a required string is absent or blank.
pub fn require_not_blank<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::technical(format!("{name} cannot be blank"))),
    }
}

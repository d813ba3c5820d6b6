//! Exactly-once initialization for shared authenticators and authorizers.
//!
//! Components that hold validated or expensive configuration (compiled
//! patterns, backend clients, parsed attribute lists) are long-lived and
//! shared between concurrent requests. [`LazyInit`] runs their setup on first
//! use, exactly once, and makes the outcome permanent:
//!
//! - concurrent first callers block until the single initializer finishes
//!   and all observe the same result;
//! - a failure is remembered and returned, as the same technical error, to
//!   every later caller. Nothing is retried; build a new instance instead.
//!   A panicking initializer counts as a failure.
//!
//! # Usage
//!
//! ```rust
//! use warden_core::init::{InitState, LazyInit};
//!
//! let pattern: LazyInit<String> = LazyInit::new("pattern");
//! assert_eq!(pattern.state(), InitState::Uninitialized);
//!
//! let value = pattern.get_or_init(|| Ok("127.0.0.1".to_string())).unwrap();
//! assert_eq!(value, "127.0.0.1");
//! assert_eq!(pattern.state(), InitState::Initialized);
//! ```

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{Error, Result};

/// Observable state of a [`LazyInit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitState {
    /// Nobody has used the component yet.
    Uninitialized,
    /// The initializer is running.
    Initializing,
    /// Initialization succeeded; the value is immutable from now on.
    Initialized,
    /// Initialization failed; the failure is permanent.
    Failed,
}

impl fmt::Display for InitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::Initializing => write!(f, "initializing"),
            Self::Initialized => write!(f, "initialized"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// A value computed once, on first use, by a fallible initializer.
pub struct LazyInit<T> {
    name: &'static str,
    cell: OnceLock<std::result::Result<T, String>>,
    started: AtomicBool,
}

impl<T> LazyInit<T> {
    /// Create an uninitialized cell. `name` identifies the owning component
    /// in log output.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            cell: OnceLock::new(),
            started: AtomicBool::new(false),
        }
    }

    /// Return the initialized value, running `init` if this is the first use.
    ///
    /// Any error from `init` is converted into a technical error and stored;
    /// this call and every later one return it. `init` must not call back
    /// into the same cell.
    pub fn get_or_init<F>(&self, init: F) -> Result<&T>
    where
        F: FnOnce() -> Result<T>,
    {
        let outcome = self.cell.get_or_init(|| {
            self.started.store(true, Ordering::Release);
            match panic::catch_unwind(AssertUnwindSafe(init)) {
                Ok(Ok(value)) => {
                    log::info!("'{}' initialized", self.name);
                    Ok(value)
                }
                Ok(Err(e)) => {
                    log::error!("'{}' failed to initialize: {e}", self.name);
                    Err(failure_message(&e))
                }
                Err(_) => {
                    log::error!("'{}' initializer panicked", self.name);
                    Err(format!("{} initializer panicked", self.name))
                }
            }
        });

        match outcome {
            Ok(value) => Ok(value),
            Err(message) => Err(Error::technical(message.clone())),
        }
    }

    /// The value, if initialization has already succeeded.
    pub fn get(&self) -> Option<&T> {
        self.cell.get().and_then(|r| r.as_ref().ok())
    }

    /// Current state.
    ///
    /// `Initialized` and `Failed` are derived from the stored outcome, so
    /// they are only reported once [`get`](Self::get) agrees.
    pub fn state(&self) -> InitState {
        match self.cell.get() {
            Some(Ok(_)) => InitState::Initialized,
            Some(Err(_)) => InitState::Failed,
            None if self.started.load(Ordering::Acquire) => InitState::Initializing,
            None => InitState::Uninitialized,
        }
    }
}

impl<T> fmt::Debug for LazyInit<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyInit")
            .field("name", &self.name)
            .field("state", &self.state())
            .finish()
    }
}

fn failure_message(e: &Error) -> String {
    match e {
        Error::Technical { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

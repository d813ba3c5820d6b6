//! Composite evaluation over a registry of named authorizers.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use warden_core::constants::ELEMENT_SEPARATOR;
use warden_core::{Error, Result, UserProfile, WebContext};

use crate::Authorizer;

/// Evaluates comma-separated lists of authorizer names for a resource.
///
/// Evaluation is eager: every named authorizer runs in list order and
/// access is the AND of their results, so side effects such as CSRF token
/// issuance happen even when a later authorizer denies. Every name is
/// resolved before any authorizer runs. A technical error stops evaluation
/// and is returned.
#[derive(Default, Clone)]
pub struct AuthorizationChecker {
    authorizers: BTreeMap<String, Arc<dyn Authorizer>>,
}

impl AuthorizationChecker {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `authorizer` under `name`, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, authorizer: Arc<dyn Authorizer>) {
        self.authorizers.insert(name.into(), authorizer);
    }

    /// Builder form of [`register`](Self::register).
    pub fn with_authorizer(
        mut self,
        name: impl Into<String>,
        authorizer: impl Authorizer + 'static,
    ) -> Self {
        self.register(name, Arc::new(authorizer));
        self
    }

    /// The authorizer registered under `name`.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Authorizer>> {
        self.authorizers.get(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.authorizers.keys().map(String::as_str)
    }

    /// Evaluate the authorizers listed in `names`.
    ///
    /// Blank entries are ignored; an empty list grants access.
    ///
    /// # Errors
    ///
    /// A technical error if a name is not registered or an authorizer fails.
    pub fn is_authorized(
        &self,
        context: &mut dyn WebContext,
        profile: Option<&UserProfile>,
        names: &str,
    ) -> Result<bool> {
        let resolved = self.resolve(names)?;

        let mut granted = true;
        for (name, authorizer) in resolved {
            if !authorizer.is_authorized(context, profile)? {
                log::debug!("Authorizer '{name}' denied access");
                granted = false;
            }
        }
        Ok(granted)
    }

    fn resolve<'a>(&self, names: &'a str) -> Result<Vec<(&'a str, &Arc<dyn Authorizer>)>> {
        names
            .split(ELEMENT_SEPARATOR)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| {
                self.authorizers
                    .get(name)
                    .map(|authorizer| (name, authorizer))
                    .ok_or_else(|| Error::technical(format!("authorizer '{name}' must be defined")))
            })
            .collect()
    }
}

impl fmt::Debug for AuthorizationChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorizationChecker")
            .field("authorizers", &self.authorizers.keys().collect::<Vec<_>>())
            .finish()
    }
}

//! Permission and role checks against the verified profile.

use std::collections::BTreeSet;

use warden_core::{Result, UserProfile, WebContext};

use crate::{Authorizer, Elements};

/// How configured elements are matched against the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// At least one configured element must be held.
    Any,
    /// Every configured element must be held.
    All,
}

/// Which profile set the elements are matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// [`UserProfile::permissions`].
    Permissions,
    /// [`UserProfile::roles`].
    Roles,
}

impl Target {
    fn held(self, profile: &UserProfile) -> &BTreeSet<String> {
        match self {
            Target::Permissions => profile.permissions(),
            Target::Roles => profile.roles(),
        }
    }
}

/// Grants access when the profile holds any (or all) of the configured
/// permissions or roles.
///
/// An empty element set grants unconditionally. Otherwise a missing
/// profile is denied.
///
/// ```rust
/// use warden_authz::{Authorizer, RequireElementsAuthorizer};
/// use warden_core::{MemoryWebContext, UserProfile};
///
/// let authorizer = RequireElementsAuthorizer::any_permission(["read", "write"]);
/// let mut profile = UserProfile::new("jdoe");
/// profile.add_permission("read");
///
/// let mut context = MemoryWebContext::new("localhost");
/// assert!(authorizer.is_authorized(&mut context, Some(&profile)).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequireElementsAuthorizer {
    elements: Elements,
    requirement: Requirement,
    target: Target,
}

impl RequireElementsAuthorizer {
    /// Create an authorizer.
    pub fn new(requirement: Requirement, target: Target, elements: impl Into<Elements>) -> Self {
        Self {
            elements: elements.into(),
            requirement,
            target,
        }
    }

    /// Require any of `permissions`.
    pub fn any_permission(permissions: impl Into<Elements>) -> Self {
        Self::new(Requirement::Any, Target::Permissions, permissions)
    }

    /// Require all of `permissions`.
    pub fn all_permissions(permissions: impl Into<Elements>) -> Self {
        Self::new(Requirement::All, Target::Permissions, permissions)
    }

    /// Require any of `roles`.
    pub fn any_role(roles: impl Into<Elements>) -> Self {
        Self::new(Requirement::Any, Target::Roles, roles)
    }

    /// Require all of `roles`.
    pub fn all_roles(roles: impl Into<Elements>) -> Self {
        Self::new(Requirement::All, Target::Roles, roles)
    }

    /// The configured elements.
    pub fn elements(&self) -> &Elements {
        &self.elements
    }

    /// Replace the configured elements.
    pub fn set_elements(&mut self, elements: impl Into<Elements>) {
        self.elements = elements.into();
    }

    /// Add to the configured elements.
    pub fn add_elements<S: Into<String>>(&mut self, elements: impl IntoIterator<Item = S>) {
        self.elements.extend(elements);
    }

    /// Matching mode.
    pub fn requirement(&self) -> Requirement {
        self.requirement
    }

    /// Matched profile set.
    pub fn target(&self) -> Target {
        self.target
    }

    fn check(&self, profile: Option<&UserProfile>) -> bool {
        if self.elements.is_empty() {
            return true;
        }
        let Some(profile) = profile else {
            return false;
        };
        let held = self.target.held(profile);
        match self.requirement {
            Requirement::Any => self.elements.any_in(held),
            Requirement::All => self.elements.all_in(held),
        }
    }
}

impl Authorizer for RequireElementsAuthorizer {
    fn is_authorized(
        &self,
        _context: &mut dyn WebContext,
        profile: Option<&UserProfile>,
    ) -> Result<bool> {
        Ok(self.check(profile))
    }
}

/// Grants access whenever a verified profile is present.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsAuthenticatedAuthorizer;

impl Authorizer for IsAuthenticatedAuthorizer {
    fn is_authorized(
        &self,
        _context: &mut dyn WebContext,
        profile: Option<&UserProfile>,
    ) -> Result<bool> {
        Ok(profile.is_some())
    }
}

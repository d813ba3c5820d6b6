//! Serde configuration for authorizers.
//!
//! ```toml
//! [authorizers.admin]
//! kind = "require_any_role"
//! elements = ["admin"]
//!
//! [authorizers.csrfToken]
//! kind = "csrf_token_generator"
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    AuthorizationChecker, Authorizer, CsrfAuthorizer, CsrfTokenGeneratorAuthorizer, Elements,
    IsAuthenticatedAuthorizer, RequireElementsAuthorizer,
};

/// One authorizer definition, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum AuthorizerConfig {
    /// [`RequireElementsAuthorizer::any_permission`].
    RequireAnyPermission {
        /// Permissions, any of which grants access.
        #[serde(default)]
        elements: Elements,
    },
    /// [`RequireElementsAuthorizer::all_permissions`].
    RequireAllPermissions {
        /// Permissions that must all be held.
        #[serde(default)]
        elements: Elements,
    },
    /// [`RequireElementsAuthorizer::any_role`].
    RequireAnyRole {
        /// Roles, any of which grants access.
        #[serde(default)]
        elements: Elements,
    },
    /// [`RequireElementsAuthorizer::all_roles`].
    RequireAllRoles {
        /// Roles that must all be held.
        #[serde(default)]
        elements: Elements,
    },
    /// [`IsAuthenticatedAuthorizer`].
    IsAuthenticated,
    /// [`CsrfTokenGeneratorAuthorizer`] with the random generator.
    CsrfTokenGenerator,
    /// [`CsrfAuthorizer`].
    CsrfCheck,
}

impl AuthorizerConfig {
    /// Instantiate the authorizer.
    pub fn build(&self) -> Arc<dyn Authorizer> {
        match self {
            Self::RequireAnyPermission { elements } => {
                Arc::new(RequireElementsAuthorizer::any_permission(elements.clone()))
            }
            Self::RequireAllPermissions { elements } => {
                Arc::new(RequireElementsAuthorizer::all_permissions(elements.clone()))
            }
            Self::RequireAnyRole { elements } => {
                Arc::new(RequireElementsAuthorizer::any_role(elements.clone()))
            }
            Self::RequireAllRoles { elements } => {
                Arc::new(RequireElementsAuthorizer::all_roles(elements.clone()))
            }
            Self::IsAuthenticated => Arc::new(IsAuthenticatedAuthorizer),
            Self::CsrfTokenGenerator => Arc::new(CsrfTokenGeneratorAuthorizer::default()),
            Self::CsrfCheck => Arc::new(CsrfAuthorizer),
        }
    }
}

/// Build a checker holding every configured authorizer under its name.
pub fn build_checker(configs: &BTreeMap<String, AuthorizerConfig>) -> AuthorizationChecker {
    let mut checker = AuthorizationChecker::new();
    for (name, config) in configs {
        log::debug!("Registering authorizer '{name}'");
        checker.register(name.clone(), config.build());
    }
    checker
}

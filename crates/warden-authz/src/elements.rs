//! Normalized set of configured authorization elements.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

/// Permissions, roles or names an authorizer is configured with.
///
/// Every construction form (one value, a slice, a `Vec`, a set, an
/// iterator) collapses into the same sorted, de-duplicated set. An empty set
/// means no restriction is configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Elements(BTreeSet<String>);

impl Elements {
    /// Build from any sequence of elements.
    pub fn new<S: Into<String>>(elements: impl IntoIterator<Item = S>) -> Self {
        Self(elements.into_iter().map(Into::into).collect())
    }

    /// No restriction.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add more elements.
    pub fn extend<S: Into<String>>(&mut self, elements: impl IntoIterator<Item = S>) {
        self.0.extend(elements.into_iter().map(Into::into));
    }

    /// Whether no element is configured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct elements.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether `element` is configured.
    pub fn contains(&self, element: &str) -> bool {
        self.0.contains(element)
    }

    /// Iterate in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// `true` when empty, or when at least one element is in `held`.
    pub fn any_in(&self, held: &BTreeSet<String>) -> bool {
        self.is_empty() || self.0.iter().any(|e| held.contains(e))
    }

    /// `true` when every element is in `held` (trivially for an empty set).
    pub fn all_in(&self, held: &BTreeSet<String>) -> bool {
        self.0.is_subset(held)
    }
}

impl From<&str> for Elements {
    fn from(element: &str) -> Self {
        Self::new([element])
    }
}

impl From<String> for Elements {
    fn from(element: String) -> Self {
        Self::new([element])
    }
}

impl<S: Into<String> + Clone> From<&[S]> for Elements {
    fn from(elements: &[S]) -> Self {
        Self::new(elements.iter().cloned())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for Elements {
    fn from(elements: [S; N]) -> Self {
        Self::new(elements)
    }
}

impl<S: Into<String>> From<Vec<S>> for Elements {
    fn from(elements: Vec<S>) -> Self {
        Self::new(elements)
    }
}

impl From<HashSet<String>> for Elements {
    fn from(elements: HashSet<String>) -> Self {
        Self::new(elements)
    }
}

impl From<BTreeSet<String>> for Elements {
    fn from(elements: BTreeSet<String>) -> Self {
        Self(elements)
    }
}

impl<S: Into<String>> FromIterator<S> for Elements {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

use derive_more::IntoIterator;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

///
/// ExclusionSet
///
/// Facet names a predicate must not narrow ("doesNotAffect"). Names that do
/// not match a requested facet are inert. Ordered so two sets compare and
/// render deterministically.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, IntoIterator, PartialEq, Serialize)]
#[serde(transparent)]
#[into_iterator(owned, ref)]
pub struct ExclusionSet(BTreeSet<String>);

impl ExclusionSet {
    pub fn new<I, S>(facets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(facets.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn contains(&self, facet: &str) -> bool {
        self.0.contains(facet)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Union with an optional set declared further down the tree.
    #[must_use]
    pub fn union(&self, other: Option<&Self>) -> Self {
        match other {
            Some(other) => Self(self.0.union(&other.0).cloned().collect()),
            None => self.clone(),
        }
    }

    /// The only facet named, when exactly one is.
    #[must_use]
    pub fn single(&self) -> Option<&str> {
        if self.0.len() == 1 {
            self.0.first().map(String::as_str)
        } else {
            None
        }
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

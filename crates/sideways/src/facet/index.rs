use crate::{facet::FacetDefinitions, path::FieldPath};
use std::collections::{BTreeMap, BTreeSet};

///
/// PathFacetIndex
///
/// Field path → names of the facets bucketed over that path. Several facets
/// may share one path.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PathFacetIndex(BTreeMap<FieldPath, BTreeSet<String>>);

impl PathFacetIndex {
    #[must_use]
    pub fn from_definitions(definitions: &FacetDefinitions) -> Self {
        let mut index = Self::default();
        for (name, definition) in definitions.iter() {
            index.insert(definition.path().clone(), name);
        }

        index
    }

    pub fn insert(&mut self, path: FieldPath, facet: impl Into<String>) {
        self.0.entry(path).or_default().insert(facet.into());
    }

    #[must_use]
    pub fn facets_for(&self, path: &FieldPath) -> Option<&BTreeSet<String>> {
        self.0.get(path)
    }

    /// Every facet computed over any of `paths`.
    #[must_use]
    pub fn owning_facets<'a>(&'a self, paths: &[&FieldPath]) -> BTreeSet<&'a str> {
        paths
            .iter()
            .filter_map(|path| self.facets_for(path))
            .flatten()
            .map(String::as_str)
            .collect()
    }
}

use crate::{error::FacetDefinitionError, path::FieldPath, value::Value};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, btree_map};

///
/// FacetDefinition
///
/// Bucketing definition for one named facet. Only `path()` is consulted
/// while decomposing.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum FacetDefinition {
    String {
        path: FieldPath,
        num_buckets: usize,
    },
    Number {
        path: FieldPath,
        boundaries: Vec<Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_bucket: Option<String>,
    },
    Date {
        path: FieldPath,
        boundaries: Vec<Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_bucket: Option<String>,
    },
}

impl FacetDefinition {
    pub const DEFAULT_NUM_BUCKETS: usize = 10;

    #[must_use]
    pub fn string(path: impl Into<FieldPath>) -> Self {
        Self::String {
            path: path.into(),
            num_buckets: Self::DEFAULT_NUM_BUCKETS,
        }
    }

    #[must_use]
    pub fn number(path: impl Into<FieldPath>, boundaries: Vec<Value>) -> Self {
        Self::Number {
            path: path.into(),
            boundaries,
            default_bucket: None,
        }
    }

    #[must_use]
    pub const fn path(&self) -> &FieldPath {
        match self {
            Self::String { path, .. } | Self::Number { path, .. } | Self::Date { path, .. } => path,
        }
    }
}

///
/// FacetDefinitions
///
/// Requested facets keyed by name. Names are unique and non-empty and every
/// definition names a path.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "BTreeMap<String, FacetDefinition>")]
pub struct FacetDefinitions(BTreeMap<String, FacetDefinition>);

impl FacetDefinitions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        definition: FacetDefinition,
    ) -> Result<(), FacetDefinitionError> {
        let name = name.into();
        if name.is_empty() {
            return Err(FacetDefinitionError::EmptyName);
        }
        if definition.path().is_empty() {
            return Err(FacetDefinitionError::EmptyPath { facet: name });
        }

        match self.0.entry(name) {
            btree_map::Entry::Occupied(entry) => Err(FacetDefinitionError::DuplicateFacet {
                facet: entry.key().clone(),
            }),
            btree_map::Entry::Vacant(entry) => {
                entry.insert(definition);
                Ok(())
            }
        }
    }

    /// Builder-style insert for literal definition lists.
    pub fn with(
        mut self,
        name: impl Into<String>,
        definition: FacetDefinition,
    ) -> Result<Self, FacetDefinitionError> {
        self.insert(name, definition)?;
        Ok(self)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FacetDefinition> {
        self.0.get(name)
    }

    /// Facet names in ascending order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FacetDefinition)> {
        self.0.iter().map(|(name, definition)| (name.as_str(), definition))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<BTreeMap<String, FacetDefinition>> for FacetDefinitions {
    type Error = FacetDefinitionError;

    fn try_from(map: BTreeMap<String, FacetDefinition>) -> Result<Self, Self::Error> {
        map.into_iter()
            .try_fold(Self::new(), |defs, (name, definition)| defs.with(name, definition))
    }
}

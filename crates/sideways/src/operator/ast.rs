use crate::{
    operator::{CompoundClauseType, ExclusionSet},
    path::FieldPath,
    value::Value,
};
use derive_more::From;
use serde::{Deserialize, Serialize};
use std::ops::BitAnd;

///
/// Operator AST
///
/// Closed set of query operators. Leaves test one or more field paths;
/// `Compound` and `EmbeddedDocument` are the only interior nodes. Every
/// variant except `AllDocuments` and `Autocomplete` may carry a
/// "does not affect" exclusion set naming the facets it must not narrow.
///

#[derive(Clone, Debug, Deserialize, Eq, From, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    Equals(EqualsOperator),
    In(InOperator),
    Range(RangeOperator),
    Text(TextOperator),
    Exists(ExistsOperator),
    #[from(skip)]
    AllDocuments,
    Autocomplete(AutocompleteOperator),
    Compound(CompoundOperator),
    EmbeddedDocument(EmbeddedDocumentOperator),
}

impl Operator {
    #[must_use]
    pub fn equals(path: impl Into<FieldPath>, value: impl Into<Value>) -> Self {
        Self::Equals(EqualsOperator {
            path: path.into(),
            value: value.into(),
            does_not_affect: None,
        })
    }

    #[must_use]
    pub fn in_(path: impl Into<FieldPath>, values: Vec<Value>) -> Self {
        Self::In(InOperator {
            paths: vec![path.into()],
            values,
            does_not_affect: None,
        })
    }

    #[must_use]
    pub fn text(path: impl Into<FieldPath>, query: impl Into<String>) -> Self {
        Self::Text(TextOperator {
            paths: vec![path.into()],
            query: query.into(),
            does_not_affect: None,
        })
    }

    #[must_use]
    pub fn exists(path: impl Into<FieldPath>) -> Self {
        Self::Exists(ExistsOperator {
            path: path.into(),
            does_not_affect: None,
        })
    }

    #[must_use]
    pub const fn all_documents() -> Self {
        Self::AllDocuments
    }

    #[must_use]
    pub fn autocomplete(path: impl Into<FieldPath>, query: impl Into<String>) -> Self {
        Self::Autocomplete(AutocompleteOperator {
            path: path.into(),
            query: query.into(),
        })
    }

    #[must_use]
    pub fn embedded(path: impl Into<FieldPath>, operator: Self) -> Self {
        Self::EmbeddedDocument(EmbeddedDocumentOperator::new(path, operator))
    }

    /// Attach a "does not affect" set. An empty set clears the annotation;
    /// variants that cannot carry one are returned unchanged.
    #[must_use]
    pub fn excluding<I, S>(mut self, facets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = ExclusionSet::new(facets);
        let set = (!set.is_empty()).then_some(set);

        match &mut self {
            Self::Equals(op) => op.does_not_affect = set,
            Self::In(op) => op.does_not_affect = set,
            Self::Range(op) => op.does_not_affect = set,
            Self::Text(op) => op.does_not_affect = set,
            Self::Exists(op) => op.does_not_affect = set,
            Self::Compound(op) => op.does_not_affect = set,
            Self::EmbeddedDocument(op) => op.does_not_affect = set,
            Self::AllDocuments | Self::Autocomplete(_) => {}
        }

        self
    }

    /// The exclusion set declared on this node itself, if non-empty.
    #[must_use]
    pub fn does_not_affect(&self) -> Option<&ExclusionSet> {
        let set = match self {
            Self::Equals(op) => op.does_not_affect.as_ref(),
            Self::In(op) => op.does_not_affect.as_ref(),
            Self::Range(op) => op.does_not_affect.as_ref(),
            Self::Text(op) => op.does_not_affect.as_ref(),
            Self::Exists(op) => op.does_not_affect.as_ref(),
            Self::Compound(op) => op.does_not_affect.as_ref(),
            Self::EmbeddedDocument(op) => op.does_not_affect.as_ref(),
            Self::AllDocuments | Self::Autocomplete(_) => None,
        };

        set.filter(|set| !set.is_empty())
    }

    /// True when this node or any descendant declares an exclusion set.
    #[must_use]
    pub fn has_exclusion(&self) -> bool {
        if self.does_not_affect().is_some() {
            return true;
        }

        match self {
            Self::Compound(compound) => compound.operators().any(Self::has_exclusion),
            Self::EmbeddedDocument(embedded) => embedded.operator.has_exclusion(),
            Self::Equals(_)
            | Self::In(_)
            | Self::Range(_)
            | Self::Text(_)
            | Self::Exists(_)
            | Self::AllDocuments
            | Self::Autocomplete(_) => false,
        }
    }

    /// Field paths tested by a leaf. Interior nodes and `AllDocuments`
    /// declare none.
    #[must_use]
    pub fn paths(&self) -> Vec<&FieldPath> {
        match self {
            Self::Equals(op) => vec![&op.path],
            Self::Exists(op) => vec![&op.path],
            Self::Autocomplete(op) => vec![&op.path],
            Self::In(op) => op.paths.iter().collect(),
            Self::Range(op) => op.paths.iter().collect(),
            Self::Text(op) => op.paths.iter().collect(),
            Self::AllDocuments | Self::Compound(_) | Self::EmbeddedDocument(_) => Vec::new(),
        }
    }

    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        !matches!(self, Self::Compound(_) | Self::EmbeddedDocument(_))
    }
}

impl BitAnd for Operator {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        CompoundOperator::default().must(self).must(rhs).into()
    }
}

///
/// EqualsOperator
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EqualsOperator {
    pub path: FieldPath,
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub does_not_affect: Option<ExclusionSet>,
}

///
/// InOperator
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InOperator {
    pub paths: Vec<FieldPath>,
    pub values: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub does_not_affect: Option<ExclusionSet>,
}

///
/// RangeBound
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RangeBound {
    pub value: Value,
    pub inclusive: bool,
}

///
/// RangeOperator
///
/// Range over one or more paths; a missing bound is open.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeOperator {
    pub paths: Vec<FieldPath>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower: Option<RangeBound>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper: Option<RangeBound>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub does_not_affect: Option<ExclusionSet>,
}

impl RangeOperator {
    #[must_use]
    pub fn new(path: impl Into<FieldPath>) -> Self {
        Self {
            paths: vec![path.into()],
            lower: None,
            upper: None,
            does_not_affect: None,
        }
    }

    #[must_use]
    pub fn path(mut self, path: impl Into<FieldPath>) -> Self {
        self.paths.push(path.into());
        self
    }

    #[must_use]
    pub fn gte(mut self, value: impl Into<Value>) -> Self {
        self.lower = Some(RangeBound {
            value: value.into(),
            inclusive: true,
        });
        self
    }

    #[must_use]
    pub fn gt(mut self, value: impl Into<Value>) -> Self {
        self.lower = Some(RangeBound {
            value: value.into(),
            inclusive: false,
        });
        self
    }

    #[must_use]
    pub fn lte(mut self, value: impl Into<Value>) -> Self {
        self.upper = Some(RangeBound {
            value: value.into(),
            inclusive: true,
        });
        self
    }

    #[must_use]
    pub fn lt(mut self, value: impl Into<Value>) -> Self {
        self.upper = Some(RangeBound {
            value: value.into(),
            inclusive: false,
        });
        self
    }
}

///
/// TextOperator
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOperator {
    pub paths: Vec<FieldPath>,
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub does_not_affect: Option<ExclusionSet>,
}

///
/// ExistsOperator
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistsOperator {
    pub path: FieldPath,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub does_not_affect: Option<ExclusionSet>,
}

///
/// AutocompleteOperator
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AutocompleteOperator {
    pub path: FieldPath,
    pub query: String,
}

///
/// CompoundOperator
///
/// Four ordered clause lists. `minimum_should_match` counts `should`
/// children; when it is zero the should clause is required only if there
/// are no must/filter children.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundOperator {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub must: Vec<Operator>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filter: Vec<Operator>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub must_not: Vec<Operator>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub should: Vec<Operator>,
    #[serde(default)]
    pub minimum_should_match: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub does_not_affect: Option<ExclusionSet>,
}

impl CompoundOperator {
    #[must_use]
    pub fn must(mut self, operator: impl Into<Operator>) -> Self {
        self.must.push(operator.into());
        self
    }

    #[must_use]
    pub fn filter(mut self, operator: impl Into<Operator>) -> Self {
        self.filter.push(operator.into());
        self
    }

    #[must_use]
    pub fn must_not(mut self, operator: impl Into<Operator>) -> Self {
        self.must_not.push(operator.into());
        self
    }

    #[must_use]
    pub fn should(mut self, operator: impl Into<Operator>) -> Self {
        self.should.push(operator.into());
        self
    }

    #[must_use]
    pub const fn minimum_should_match(mut self, minimum: usize) -> Self {
        self.minimum_should_match = minimum;
        self
    }

    #[must_use]
    pub fn excluding<I, S>(mut self, facets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = ExclusionSet::new(facets);
        self.does_not_affect = (!set.is_empty()).then_some(set);
        self
    }

    #[must_use]
    pub fn clause(&self, clause: CompoundClauseType) -> &[Operator] {
        match clause {
            CompoundClauseType::Must => &self.must,
            CompoundClauseType::Filter => &self.filter,
            CompoundClauseType::MustNot => &self.must_not,
            CompoundClauseType::Should => &self.should,
        }
    }

    /// All children, in must, filter, mustNot, should order.
    pub fn operators(&self) -> impl Iterator<Item = &Operator> {
        CompoundClauseType::ALL
            .into_iter()
            .flat_map(|clause| self.clause(clause).iter())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.must.is_empty()
            && self.filter.is_empty()
            && self.must_not.is_empty()
            && self.should.is_empty()
    }

    /// True when the should clause selects documents rather than only
    /// contributing to score.
    #[must_use]
    pub fn should_is_required(&self) -> bool {
        !self.should.is_empty()
            && (self.minimum_should_match > 0 || (self.must.is_empty() && self.filter.is_empty()))
    }
}

///
/// EmbeddedDocumentOperator
///
/// Evaluates `operator` against the sub-documents found under `path`
/// (block-join scope).
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedDocumentOperator {
    pub path: FieldPath,
    pub operator: Box<Operator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub does_not_affect: Option<ExclusionSet>,
}

impl EmbeddedDocumentOperator {
    #[must_use]
    pub fn new(path: impl Into<FieldPath>, operator: Operator) -> Self {
        Self {
            path: path.into(),
            operator: Box::new(operator),
            does_not_affect: None,
        }
    }

    /// Same scope and annotation around a different child.
    #[must_use]
    pub fn rewrap(&self, operator: Operator) -> Operator {
        Operator::EmbeddedDocument(Self {
            path: self.path.clone(),
            operator: Box::new(operator),
            does_not_affect: self.does_not_affect.clone(),
        })
    }
}

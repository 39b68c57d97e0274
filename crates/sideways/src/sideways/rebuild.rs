//! Tree reconstruction shared by both decomposers.

use crate::operator::{CompoundClauseType, CompoundOperator, Operator};

///
/// PreFilterClauses
///
/// Clause buckets for the shared baseline filter. `should` only ever holds
/// optional (scoring) clauses; required disjunctions are grouped into a
/// single compound before they land in `must` or `filter`.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct PreFilterClauses {
    pub(crate) must: Vec<Operator>,
    pub(crate) filter: Vec<Operator>,
    pub(crate) must_not: Vec<Operator>,
    pub(crate) should: Vec<Operator>,
}

impl PreFilterClauses {
    /// Append to the bucket for `clause`; the root slot counts as must.
    pub(crate) fn push(&mut self, clause: Option<CompoundClauseType>, operator: Operator) {
        match clause.unwrap_or(CompoundClauseType::Must) {
            CompoundClauseType::Must => self.must.push(operator),
            CompoundClauseType::Filter => self.filter.push(operator),
            CompoundClauseType::MustNot => self.must_not.push(operator),
            CompoundClauseType::Should => self.should.push(operator),
        }
    }

    /// Assemble the buckets into one compound, or nothing when every bucket
    /// is empty. Optional should clauses are dropped when no must/filter
    /// clause is left to keep them optional.
    pub(crate) fn into_operator(self) -> Option<Operator> {
        let Self {
            must,
            filter,
            must_not,
            mut should,
        } = self;

        if must.is_empty() && filter.is_empty() {
            should.clear();
        }

        let compound = CompoundOperator {
            must,
            filter,
            must_not,
            should,
            minimum_should_match: 0,
            does_not_affect: None,
        };

        (!compound.is_empty()).then(|| compound.into())
    }

    /// These shared clauses plus facet-specific conjuncts as one operator.
    /// A lone conjunct with nothing shared is returned as-is.
    pub(crate) fn scoped_with(&self, conjuncts: Vec<Operator>) -> Option<Operator> {
        let mut scoped = self.clone();
        scoped.must.extend(conjuncts);

        if scoped.must.len() == 1
            && scoped.filter.is_empty()
            && scoped.must_not.is_empty()
            && scoped.should.is_empty()
        {
            return scoped.must.pop();
        }

        scoped.into_operator()
    }
}

/// Collapse one facet's pending clauses into its operator: a single clause
/// directly, several as a should compound that requires all of them.
pub(crate) fn facet_operator_from(mut pending: Vec<Operator>) -> Option<Operator> {
    match pending.len() {
        0 => None,
        1 => pending.pop(),
        len => Some(
            CompoundOperator {
                should: pending,
                minimum_should_match: len,
                ..CompoundOperator::default()
            }
            .into(),
        ),
    }
}

/// AND two optional operators; absent means match-all.
pub(crate) fn conjoin(left: Option<Operator>, right: Option<Operator>) -> Option<Operator> {
    match (left, right) {
        (Some(left), Some(right)) => Some(left & right),
        (Some(only), None) | (None, Some(only)) => Some(only),
        (None, None) => None,
    }
}

/// Rebuild `original` from whatever `rebuild` keeps of each child.
///
/// `minimum_should_match` is clamped to the surviving should children. An
/// optional should clause is dropped together with the last must/filter
/// child, since it never selected documents. A compound left with no
/// clauses disappears.
pub(crate) fn rebuild_compound(
    original: &CompoundOperator,
    mut rebuild: impl FnMut(&Operator) -> Option<Operator>,
) -> Option<Operator> {
    let mut keep = |children: &[Operator]| -> Vec<Operator> {
        children.iter().filter_map(&mut rebuild).collect()
    };

    let must = keep(&original.must);
    let filter = keep(&original.filter);
    let must_not = keep(&original.must_not);
    let mut should = keep(&original.should);

    if !original.should_is_required() && must.is_empty() && filter.is_empty() {
        should.clear();
    }

    let minimum_should_match = original.minimum_should_match.min(should.len());
    let rebuilt = CompoundOperator {
        must,
        filter,
        must_not,
        should,
        minimum_should_match,
        does_not_affect: original.does_not_affect.clone(),
    };

    (!rebuilt.is_empty()).then(|| rebuilt.into())
}

//! Single-pass decomposition into a shared pre-filter plus one small
//! conjunction per facet. Bails out to the generic rebuild as soon as the
//! tree holds an exclusion this shape cannot express.

use crate::{
    facet::PathFacetIndex,
    operator::{
        CompoundClauseType, CompoundOperator, EmbeddedDocumentOperator, ExclusionSet, Operator,
    },
    path::FieldPath,
    sideways::{
        DrillSidewaysInfo, FallbackReason,
        rebuild::{PreFilterClauses, facet_operator_from},
    },
};
use std::collections::BTreeMap;

///
/// ExcludedLeaf
///
/// A leaf that was routed per facet, with the effective exclusion set that
/// decided the routing. Re-checked against the facet catalog once the walk
/// is done.
///

#[derive(Clone, Debug, Eq, PartialEq)]
struct ExcludedLeaf {
    exclusions: ExclusionSet,
    paths: Vec<FieldPath>,
}

///
/// BuildState
///
/// Accumulator for one scope of the walk. Embedded documents get a fresh
/// nested state whose results are re-wrapped into the parent.
///

#[derive(Debug)]
pub(crate) struct BuildState<'a> {
    index: &'a PathFacetIndex,
    facets: &'a [String],
    pub(crate) fallback: Option<FallbackReason>,
    pub(crate) contains_exclusion: bool,
    pending: BTreeMap<String, Vec<Operator>>,
    pre_filter: PreFilterClauses,
    excluded_leaves: Vec<ExcludedLeaf>,
}

/// Walk `root`, then verify every routed leaf against the facet catalog.
pub(crate) fn decompose<'a>(
    root: &Operator,
    facets: &'a [String],
    index: &'a PathFacetIndex,
) -> BuildState<'a> {
    let mut state = BuildState::new(index, facets);
    state.traverse(root, None, &ExclusionSet::default());
    state.verify_query_optimizable();

    state
}

impl<'a> BuildState<'a> {
    fn new(index: &'a PathFacetIndex, facets: &'a [String]) -> Self {
        Self {
            index,
            facets,
            fallback: None,
            contains_exclusion: false,
            pending: facets
                .iter()
                .map(|facet| (facet.clone(), Vec::new()))
                .collect(),
            pre_filter: PreFilterClauses::default(),
            excluded_leaves: Vec::new(),
        }
    }

    #[must_use]
    pub(crate) const fn is_generic(&self) -> bool {
        self.fallback.is_some()
    }

    // First reason wins; later ones are consequences.
    fn fall_back(&mut self, reason: FallbackReason) {
        if self.fallback.is_none() {
            self.fallback = Some(reason);
        }
    }

    /// Route `operator`, found in `clause` of its parent (`None` at a scope
    /// root), under the exclusions declared by its ancestors.
    pub(crate) fn traverse(
        &mut self,
        operator: &Operator,
        clause: Option<CompoundClauseType>,
        inherited: &ExclusionSet,
    ) {
        if self.is_generic() {
            return;
        }

        if inherited.is_empty() && !operator.has_exclusion() {
            self.pre_filter.push(clause, operator.clone());
            return;
        }

        self.contains_exclusion = true;

        match clause {
            Some(CompoundClauseType::Should) => {
                self.fall_back(FallbackReason::DisjunctiveExclusion);
                return;
            }
            Some(CompoundClauseType::MustNot) => {
                self.fall_back(FallbackReason::NegatedExclusion);
                return;
            }
            Some(CompoundClauseType::Must | CompoundClauseType::Filter) | None => {}
        }

        let effective = inherited.union(operator.does_not_affect());

        match operator {
            Operator::Compound(compound) => self.decompose_compound(compound, clause, &effective),
            Operator::EmbeddedDocument(embedded) => {
                self.decompose_embedded(embedded, clause, &effective);
            }
            Operator::Equals(_)
            | Operator::In(_)
            | Operator::Range(_)
            | Operator::Text(_)
            | Operator::Exists(_)
            | Operator::AllDocuments
            | Operator::Autocomplete(_) => self.route_excluded_leaf(operator, effective),
        }
    }

    fn decompose_compound(
        &mut self,
        compound: &CompoundOperator,
        clause: Option<CompoundClauseType>,
        effective: &ExclusionSet,
    ) {
        for child in &compound.must {
            self.traverse(child, Some(CompoundClauseType::Must), effective);
        }
        for child in &compound.filter {
            self.traverse(child, Some(CompoundClauseType::Filter), effective);
        }
        for child in &compound.must_not {
            self.traverse(child, Some(CompoundClauseType::MustNot), effective);
        }

        if compound.should.is_empty() {
            return;
        }

        if compound.should_is_required() {
            // A required disjunction only survives as an indivisible group.
            if !effective.is_empty() || compound.should.iter().any(Operator::has_exclusion) {
                self.fall_back(FallbackReason::DisjunctiveExclusion);
                return;
            }

            let group = CompoundOperator {
                should: compound.should.clone(),
                minimum_should_match: compound.minimum_should_match,
                ..CompoundOperator::default()
            };
            self.pre_filter.push(clause, group.into());
        } else {
            for child in &compound.should {
                self.traverse(child, Some(CompoundClauseType::Should), effective);
            }
        }
    }

    fn decompose_embedded(
        &mut self,
        embedded: &EmbeddedDocumentOperator,
        clause: Option<CompoundClauseType>,
        effective: &ExclusionSet,
    ) {
        let mut nested = Self::new(self.index, self.facets);
        nested.traverse(&embedded.operator, None, effective);

        if let Some(reason) = nested.fallback {
            self.fall_back(reason);
            return;
        }

        let Self {
            pending,
            pre_filter,
            excluded_leaves,
            ..
        } = nested;
        self.excluded_leaves.extend(excluded_leaves);

        // Per-facet conjuncts only mean the same thing when they are checked
        // against the same sub-document as the shared clauses.
        for (facet, conjuncts) in pending {
            if conjuncts.is_empty() {
                continue;
            }
            if let Some(scoped) = pre_filter.scoped_with(conjuncts) {
                self.pending
                    .entry(facet)
                    .or_default()
                    .push(embedded.rewrap(scoped));
            }
        }

        if let Some(shared) = pre_filter.into_operator() {
            self.pre_filter.push(clause, embedded.rewrap(shared));
        }
    }

    fn route_excluded_leaf(&mut self, leaf: &Operator, exclusions: ExclusionSet) {
        let facets = self.facets;
        for facet in facets.iter().filter(|facet| !exclusions.contains(facet)) {
            self.pending
                .entry(facet.clone())
                .or_default()
                .push(leaf.clone());
        }

        self.excluded_leaves.push(ExcludedLeaf {
            paths: leaf.paths().into_iter().cloned().collect(),
            exclusions,
        });
    }

    /// Downgrade to generic unless every routed leaf excludes exactly the one
    /// facet computed over its own paths.
    pub(crate) fn verify_query_optimizable(&mut self) {
        if self.is_generic() {
            return;
        }

        let index = self.index;
        if !self
            .excluded_leaves
            .iter()
            .all(|leaf| leaf.excludes_only_own_facet(index))
        {
            self.fall_back(FallbackReason::UnverifiedExclusion);
        }
    }

    /// Final per-facet operators and pre-filter of a verified walk.
    pub(crate) fn into_info(self) -> DrillSidewaysInfo {
        let facet_operators = self
            .pending
            .into_iter()
            .map(|(facet, conjuncts)| (facet, facet_operator_from(conjuncts)))
            .collect();

        DrillSidewaysInfo::optimizable(facet_operators, self.pre_filter.into_operator())
    }
}

impl ExcludedLeaf {
    fn excludes_only_own_facet(&self, index: &PathFacetIndex) -> bool {
        let Some(facet) = self.exclusions.single() else {
            return false;
        };

        let paths: Vec<&FieldPath> = self.paths.iter().collect();
        let owners = index.owning_facets(&paths);

        owners.len() == 1 && owners.contains(facet)
    }
}

//! Drill-sideways decomposition.
//!
//! Given a query and the requested facets, produce for every facet the
//! operator its counts must be computed under: the query with every clause
//! that "does not affect" that facet removed. Two strategies exist. The
//! optimized one splits the query into a pre-filter shared by all facets
//! plus one small conjunction per facet; the generic one rebuilds the tree
//! per facet and is used whenever the optimized shape cannot be proven
//! equivalent.

mod generic;
mod optimized;
mod rebuild;

#[cfg(test)]
mod tests;

use crate::{
    config::DecomposerConfig,
    error::ConfigError,
    facet::{FacetDefinitions, PathFacetIndex},
    operator::Operator,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

///
/// OptimizationStatus
///
/// How drill-sideways counts will be computed for a query. Only the first
/// two are ever stored in a `DrillSidewaysInfo`; `NonDrillSideways` stands
/// for "no info at all".
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptimizationStatus {
    Optimizable,
    Generic,
    NonDrillSideways,
}

impl OptimizationStatus {
    /// Status of a decomposition result.
    #[must_use]
    pub const fn of(info: Option<&DrillSidewaysInfo>) -> Self {
        match info {
            Some(info) => info.optimization_status,
            None => Self::NonDrillSideways,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Optimizable => "OPTIMIZABLE",
            Self::Generic => "GENERIC",
            Self::NonDrillSideways => "NON_DRILL_SIDEWAYS",
        }
    }
}

impl fmt::Display for OptimizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// FallbackReason
///
/// Why the optimized split was abandoned for a query.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum FallbackReason {
    /// Exclusion inside a should clause, or a required should group.
    DisjunctiveExclusion,
    NegatedExclusion,
    /// A routed leaf did not exclude exactly the facet its path belongs to.
    UnverifiedExclusion,
}

impl FallbackReason {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::DisjunctiveExclusion => "disjunctive_exclusion",
            Self::NegatedExclusion => "negated_exclusion",
            Self::UnverifiedExclusion => "unverified_exclusion",
        }
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// DrillSidewaysInfo
///
/// Per-facet count operators for one query. Every requested facet has an
/// entry; `None` means the facet is counted over the pre-filter alone
/// (optimized) or over all documents (generic). `pre_filter` is only ever
/// set for optimized results.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillSidewaysInfo {
    optimization_status: OptimizationStatus,
    facet_operators: BTreeMap<String, Option<Operator>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pre_filter: Option<Operator>,
}

impl DrillSidewaysInfo {
    pub(crate) const fn optimizable(
        facet_operators: BTreeMap<String, Option<Operator>>,
        pre_filter: Option<Operator>,
    ) -> Self {
        Self {
            optimization_status: OptimizationStatus::Optimizable,
            facet_operators,
            pre_filter,
        }
    }

    pub(crate) const fn generic(facet_operators: BTreeMap<String, Option<Operator>>) -> Self {
        Self {
            optimization_status: OptimizationStatus::Generic,
            facet_operators,
            pre_filter: None,
        }
    }

    #[must_use]
    pub const fn optimization_status(&self) -> OptimizationStatus {
        self.optimization_status
    }

    #[must_use]
    pub const fn facet_operators(&self) -> &BTreeMap<String, Option<Operator>> {
        &self.facet_operators
    }

    /// The stored operator for `facet`; `None` both for unknown facets and
    /// facets with no specific operator.
    #[must_use]
    pub fn facet_operator(&self, facet: &str) -> Option<&Operator> {
        self.facet_operators.get(facet).and_then(Option::as_ref)
    }

    #[must_use]
    pub const fn pre_filter(&self) -> Option<&Operator> {
        self.pre_filter.as_ref()
    }

    /// The full operator `facet` must be counted under. `None` means every
    /// document counts.
    #[must_use]
    pub fn sideways_operator(&self, facet: &str) -> Option<Operator> {
        let facet_operator = self.facet_operator(facet).cloned();

        match self.optimization_status {
            OptimizationStatus::Optimizable => {
                rebuild::conjoin(self.pre_filter.clone(), facet_operator)
            }
            OptimizationStatus::Generic | OptimizationStatus::NonDrillSideways => facet_operator,
        }
    }
}

///
/// Decomposer
///
/// Orchestrates one decomposition: fast path, optimized attempt, generic
/// fallback.
///

#[derive(Clone, Debug, Default)]
pub struct Decomposer {
    config: DecomposerConfig,
}

impl Decomposer {
    pub fn new(config: DecomposerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &DecomposerConfig {
        &self.config
    }

    /// Build drill-sideways info for `root` over `facets`, or `None` when the
    /// query has no exclusion and facets are counted under the query itself.
    #[must_use]
    pub fn decompose(
        &self,
        root: &Operator,
        facets: &FacetDefinitions,
    ) -> Option<DrillSidewaysInfo> {
        if !self.may_contain_exclusion(root) {
            tracing::debug!(facets = facets.len(), "query has no exclusion at its root");
            return None;
        }

        let names = facets.names();
        let index = PathFacetIndex::from_definitions(facets);
        let state = optimized::decompose(root, &names, &index);

        if !state.contains_exclusion {
            tracing::debug!(facets = names.len(), "query has no exclusion");
            return None;
        }

        let info = match state.fallback {
            None => state.into_info(),
            Some(reason) => {
                tracing::debug!(
                    reason = %reason,
                    facets = names.len(),
                    "optimized decomposition rejected"
                );
                DrillSidewaysInfo::generic(generic::decompose(root, &names, &self.config))
            }
        };

        tracing::debug!(
            status = %info.optimization_status(),
            facets = names.len(),
            pre_filter = info.pre_filter().is_some(),
            "drill-sideways decomposition built"
        );

        Some(info)
    }

    // The default check is shallow: compound and embedded roots are assumed
    // to hold an exclusion and are settled by the walk.
    fn may_contain_exclusion(&self, root: &Operator) -> bool {
        if self.config.exact_exclusion_scan {
            return root.has_exclusion();
        }

        match root {
            Operator::Compound(_) | Operator::EmbeddedDocument(_) => true,
            Operator::Equals(_)
            | Operator::In(_)
            | Operator::Range(_)
            | Operator::Text(_)
            | Operator::Exists(_)
            | Operator::AllDocuments
            | Operator::Autocomplete(_) => root.does_not_affect().is_some(),
        }
    }
}

/// Decompose with the default configuration.
#[must_use]
pub fn build_drill_sideways_info(
    root: &Operator,
    facets: &FacetDefinitions,
) -> Option<DrillSidewaysInfo> {
    Decomposer::default().decompose(root, facets)
}

/// Operator `facet` is counted under, given the query and its decomposition.
/// Without drill-sideways info that is the query itself.
#[must_use]
pub fn facet_count_operator(
    root: &Operator,
    info: Option<&DrillSidewaysInfo>,
    facet: &str,
) -> Option<Operator> {
    match info {
        Some(info) => info.sideways_operator(facet),
        None => Some(root.clone()),
    }
}

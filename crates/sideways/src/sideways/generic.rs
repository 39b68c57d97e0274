//! Per-facet rebuild of the whole operator tree with that facet's
//! exclusions removed. Always correct, never shared between facets.

use crate::{
    config::DecomposerConfig,
    operator::{ExclusionSet, Operator},
    sideways::rebuild::rebuild_compound,
};
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Rebuild `root` once per requested facet.
pub(crate) fn decompose(
    root: &Operator,
    facets: &[String],
    config: &DecomposerConfig,
) -> BTreeMap<String, Option<Operator>> {
    let rebuild = |facet: &String| {
        let operator = rebuild_for_facet(root, facet);
        tracing::trace!(
            facet = facet.as_str(),
            dropped_all = operator.is_none(),
            "rebuilt facet operator"
        );

        (facet.clone(), operator)
    };

    if config.fans_out(facets.len()) {
        facets.par_iter().map(rebuild).collect()
    } else {
        facets.iter().map(rebuild).collect()
    }
}

/// `operator` with every subtree that does not affect `facet` removed.
/// `None` means nothing is left and the facet is unfiltered. Subtrees
/// without any exclusion are returned untouched.
#[must_use]
pub(crate) fn rebuild_for_facet(operator: &Operator, facet: &str) -> Option<Operator> {
    if !operator.has_exclusion() {
        return Some(operator.clone());
    }
    if !should_include_operator(operator.does_not_affect(), facet) {
        return None;
    }

    match operator {
        Operator::Compound(compound) => {
            rebuild_compound(compound, |child| rebuild_for_facet(child, facet))
        }
        Operator::EmbeddedDocument(embedded) => {
            rebuild_for_facet(&embedded.operator, facet).map(|child| embedded.rewrap(child))
        }
        Operator::Equals(_)
        | Operator::In(_)
        | Operator::Range(_)
        | Operator::Text(_)
        | Operator::Exists(_)
        | Operator::AllDocuments
        | Operator::Autocomplete(_) => Some(operator.clone()),
    }
}

#[must_use]
pub(crate) fn should_include_operator(does_not_affect: Option<&ExclusionSet>, facet: &str) -> bool {
    does_not_affect.is_none_or(|exclusions| !exclusions.contains(facet))
}

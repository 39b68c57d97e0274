//! Drill-sideways decomposition of faceted search queries: operator model,
//! facet catalog, and the decomposer that derives per-facet count
//! operators from a query annotated with "does not affect" exclusions.

pub mod config;
pub mod error;
pub mod facet;
pub mod operator;
pub mod path;
pub mod sideways;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Query-building vocabulary and the decomposition entry points.
///

pub mod prelude {
    pub use crate::{
        facet::{FacetDefinition, FacetDefinitions},
        operator::{CompoundClauseType, CompoundOperator, Operator, RangeOperator},
        path::FieldPath,
        sideways::{
            Decomposer, DrillSidewaysInfo, OptimizationStatus, build_drill_sideways_info,
            facet_count_operator,
        },
        value::Value,
    };
}

//! Operator tree model: the immutable boolean query AST the decomposer
//! rewrites. Evaluation, scoring and wire parsing live elsewhere.

mod ast;
mod clause;
mod exclusion;

#[cfg(test)]
mod tests;

pub use ast::{
    AutocompleteOperator, CompoundOperator, EmbeddedDocumentOperator, EqualsOperator,
    ExistsOperator, InOperator, Operator, RangeBound, RangeOperator, TextOperator,
};
pub use clause::CompoundClauseType;
pub use exclusion::ExclusionSet;

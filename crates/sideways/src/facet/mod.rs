//! Facet definitions as far as decomposition cares: a name and the field
//! path its buckets are computed over. Bucket semantics are interpreted by
//! the facet-counting executor.

mod definition;
mod index;


pub use definition::{FacetDefinition, FacetDefinitions};
pub use index::PathFacetIndex;

use serde::{Deserialize, Serialize};
use std::fmt;

///
/// CompoundClauseType
///
/// The boolean slot a child occupies inside its parent compound.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CompoundClauseType {
    Must,
    Filter,
    MustNot,
    Should,
}

impl CompoundClauseType {
    pub const ALL: [Self; 4] = [Self::Must, Self::Filter, Self::MustNot, Self::Should];

    /// Must and filter children are ANDed into the result; exclusions there
    /// can be removed per facet by dropping the clause.
    #[must_use]
    pub const fn is_conjunctive(self) -> bool {
        matches!(self, Self::Must | Self::Filter)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Must => "must",
            Self::Filter => "filter",
            Self::MustNot => "mustNot",
            Self::Should => "should",
        }
    }
}

impl fmt::Display for CompoundClauseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

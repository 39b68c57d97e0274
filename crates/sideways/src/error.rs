use thiserror::Error as ThisError;

///
/// Error
///
/// Failures at the configuration boundary. Decomposition itself is total and
/// never produces one of these.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    FacetDefinition(#[from] FacetDefinitionError),
}

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("decomposer config is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid decomposer config field '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

///
/// FacetDefinitionError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum FacetDefinitionError {
    #[error("facet name must not be empty")]
    EmptyName,

    #[error("facet '{facet}' has an empty path")]
    EmptyPath { facet: String },

    #[error("facet '{facet}' is defined more than once")]
    DuplicateFacet { facet: String },
}

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

///
/// DecomposerConfig
///
/// Tuning knobs for one decomposer instance. None of them change which
/// operators are produced, only how the work is scheduled and how eagerly
/// the fast path is taken.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecomposerConfig {
    /// Rebuild generic per-facet operators on the rayon pool.
    pub parallel_generic: bool,

    /// Minimum requested facets before the parallel rebuild is used.
    pub parallel_facet_threshold: usize,

    /// Recursively confirm an exclusion exists before leaving the fast path,
    /// instead of assuming any compound or embedded root may hold one.
    pub exact_exclusion_scan: bool,
}

impl DecomposerConfig {
    pub const DEFAULT_PARALLEL_FACET_THRESHOLD: usize = 4;

    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parallel_facet_threshold == 0 {
            return Err(ConfigError::Invalid {
                field: "parallel_facet_threshold",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    /// Whether a generic rebuild over `facet_count` facets fans out.
    #[must_use]
    pub const fn fans_out(&self, facet_count: usize) -> bool {
        self.parallel_generic && facet_count >= self.parallel_facet_threshold
    }
}

impl Default for DecomposerConfig {
    fn default() -> Self {
        Self {
            parallel_generic: true,
            parallel_facet_threshold: Self::DEFAULT_PARALLEL_FACET_THRESHOLD,
            exact_exclusion_scan: false,
        }
    }
}

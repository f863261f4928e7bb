//! Engine configuration loaded from TOML.
//!
//! Every table is optional; missing tables fall back to the defaults below.

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error as ThisError;

/// Default overall-fraction ceilings for an index backfill: the bulk scan
/// owns the first 60%, the temporary-index merge the remainder.
pub const DEFAULT_INDEX_BACKFILL_STAGES: [f32; 2] = [0.6, 1.0];

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

///
/// EngineConfig
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub progress: ProgressConfig,
    pub validation: ValidationConfig,
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;

        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&input)
    }

    /// Check cross-field invariants that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.progress.validate()
    }
}

///
/// ProgressConfig
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProgressConfig {
    /// Cumulative overall-fraction ceiling reached at the end of each
    /// index backfill stage.
    pub index_backfill_stages: Vec<f32>,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            index_backfill_stages: DEFAULT_INDEX_BACKFILL_STAGES.to_vec(),
        }
    }
}

impl ProgressConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let stages = &self.index_backfill_stages;
        if stages.is_empty() {
            return Err(ConfigError::Invalid(
                "progress.index_backfill_stages must not be empty".to_string(),
            ));
        }

        if let Some(bad) = stages.iter().find(|s| !(0.0..=1.0).contains(*s)) {
            return Err(ConfigError::Invalid(format!(
                "progress.index_backfill_stages entry {bad} is outside [0, 1]"
            )));
        }

        if stages.windows(2).any(|w| w[1] < w[0]) {
            return Err(ConfigError::Invalid(
                "progress.index_backfill_stages must be non-decreasing".to_string(),
            ));
        }

        Ok(())
    }
}

///
/// ValidationConfig
///

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    /// Skip validation of check constraints that only reference shard
    /// columns added in the same change.
    pub skip_shard_column_checks: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            skip_shard_column_checks: true,
        }
    }
}

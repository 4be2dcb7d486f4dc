//! # Graph Configuration
//!
//! Engine settings, loaded once at startup from TOML.
//!
//! ```toml
//! seed = 1337
//! max_propagation_rounds = 20
//! start_blueprint = "entrance"
//! initial_style = "amber"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};
use crate::portal::FixedStyle;

/// Default bound on distance propagation rounds.
pub const DEFAULT_MAX_PROPAGATION_ROUNDS: u32 = 20;

/// Level graph configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Seed for every random choice the generator makes.
    pub seed: u64,
    /// Upper bound on distance propagation rounds per refresh.
    pub max_propagation_rounds: u32,
    /// Blueprint instantiated as chamber 0.
    pub start_blueprint: String,
    /// Preferred portal style when the run starts.
    pub initial_style: FixedStyle,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            seed: 0xC0FF_EE15_DEAD_BEEF,
            max_propagation_rounds: DEFAULT_MAX_PROPAGATION_ROUNDS,
            start_blueprint: "entrance".to_string(),
            initial_style: FixedStyle::Amber,
        }
    }
}

impl GraphConfig {
    /// Default configuration with a specific seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Sets the start blueprint.
    #[must_use]
    pub fn with_start(mut self, blueprint: impl Into<String>) -> Self {
        self.start_blueprint = blueprint.into();
        self
    }

    /// Parses a configuration from TOML text. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` on malformed TOML or invalid values.
    pub fn from_toml_str(text: &str) -> GraphResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| GraphError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the file cannot be read or parsed.
    pub fn from_toml_file(path: impl AsRef<Path>) -> GraphResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            GraphError::InvalidConfig(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the round bound is zero or no start
    /// blueprint is named.
    pub fn validate(&self) -> GraphResult<()> {
        if self.max_propagation_rounds == 0 {
            return Err(GraphError::InvalidConfig(
                "max_propagation_rounds must be at least 1".to_string(),
            ));
        }
        if self.start_blueprint.is_empty() {
            return Err(GraphError::InvalidConfig(
                "start_blueprint must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

//! Core configuration types and data structures

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use templatizer_generation::{Derivation, TokenCatalog};

/// Main templatizer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct TemplatizerConfig {
    /// Directories searched for `*.templatizer` descriptors, in order
    pub template_paths: Vec<PathBuf>,
    /// Fallback base inputs
    pub defaults: DefaultsConfig,
    /// Extra literal tokens available to every run
    pub constants: Vec<ConstantConfig>,
}

/// A literal token
///
/// Stored as a list of entries rather than a table because configuration
/// keys are not case-preserving, and token names are uppercase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConstantConfig {
    /// Token name, e.g. `AUTHOR`
    pub name: String,
    /// Literal value
    pub value: String,
}

impl ConstantConfig {
    /// Create a constant entry
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Fallback values for base inputs not given on the command line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct DefaultsConfig {
    /// `::`-separated namespace path
    pub namespace: Option<String>,
    /// Year stamp
    pub year: Option<String>,
    /// Month stamp
    pub month: Option<String>,
}

impl TemplatizerConfig {
    /// Register the configured constants on `catalog`, replacing same-named tokens
    pub fn apply_constants(
        &self,
        catalog: &mut TokenCatalog,
    ) -> Result<(), crate::error::ConfigError> {
        for constant in &self.constants {
            catalog
                .set(constant.name.clone(), Derivation::Constant(constant.value.clone()))
                .map_err(|e| crate::error::ConfigError::Validation(e.to_string()))?;
        }
        Ok(())
    }

    /// Default vocabulary with the configured constants applied
    pub fn base_catalog(&self) -> Result<TokenCatalog, crate::error::ConfigError> {
        let mut catalog = TokenCatalog::new();
        self.apply_constants(&mut catalog)?;
        Ok(catalog)
    }
}

/// Configuration manager trait
pub trait ConfigManager {
    /// Load configuration
    fn load_config(&mut self) -> Result<TemplatizerConfig, crate::error::ConfigError>;
    /// Save configuration
    fn save_config(&self, config: &TemplatizerConfig) -> Result<(), crate::error::ConfigError>;
    /// Validate configuration
    fn validate_config(&self, config: &TemplatizerConfig) -> Result<(), crate::error::ConfigError>;
}

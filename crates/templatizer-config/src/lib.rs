//! Templatizer configuration
//!
//! Loads template search paths, default base inputs and extra constants from
//! an optional TOML file overlaid with `TEMPLATIZER_*` environment variables.

pub mod error;
pub mod manager;
pub mod types;

pub use error::{ConfigError, Result};
pub use manager::{expand_home, ConfigManager, PATH_LIST_SEPARATOR};
pub use types::{
    ConfigManager as ConfigManagerTrait, ConstantConfig, DefaultsConfig, TemplatizerConfig,
};

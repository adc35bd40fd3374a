//! Configuration manager implementation

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use templatizer_generation::templates::is_token_name;
use tracing::debug;

use crate::{
    error::{ConfigError, Result},
    types::{ConfigManager as ConfigManagerTrait, TemplatizerConfig},
};

/// Environment variable prefix, e.g. `TEMPLATIZER_DEFAULTS__NAMESPACE`
pub const ENV_PREFIX: &str = "TEMPLATIZER";

/// Separator between directories in `TEMPLATIZER_TEMPLATE_PATHS`
pub const PATH_LIST_SEPARATOR: &str = if cfg!(windows) { ";" } else { ":" };

/// Replace a leading `~` with the home directory
///
/// Only `~` alone or followed by a separator is expanded; `~user` forms and
/// paths without a home directory are returned unchanged.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) if rest.as_os_str().is_empty() => home,
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

/// Configuration manager
pub struct ConfigManager {
    /// Configuration file path
    config_path: PathBuf,
    /// Environment prefix
    env_prefix: String,
}

impl ConfigManager {
    /// Create a new configuration manager
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Create with custom config path
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config_path: path,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Use a different environment prefix
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Path the configuration is read from and saved to
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Get default config path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("templatizer")
            .join("config.toml")
    }
}

impl ConfigManagerTrait for ConfigManager {
    fn load_config(&mut self) -> Result<TemplatizerConfig> {
        debug!(path = %self.config_path.display(), "loading configuration");

        let builder = Config::builder()
            .add_source(
                File::from(self.config_path.clone())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(PATH_LIST_SEPARATOR)
                    .with_list_parse_key("template_paths"),
            );

        let config = builder.build()?;
        let mut config: TemplatizerConfig = config.try_deserialize()?;
        self.validate_config(&config)?;
        config.template_paths = config
            .template_paths
            .iter()
            .map(|path| expand_home(path))
            .collect();
        Ok(config)
    }

    fn save_config(&self, config: &TemplatizerConfig) -> Result<()> {
        self.validate_config(config)?;
        let toml = toml::to_string(config)?;
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.config_path, toml)?;
        Ok(())
    }

    fn validate_config(&self, config: &TemplatizerConfig) -> Result<()> {
        if let Some(constant) = config.constants.iter().find(|c| !is_token_name(&c.name)) {
            return Err(ConfigError::Validation(format!(
                "Constant name {:?} must use uppercase letters and hyphens",
                constant.name
            )));
        }
        if let Some(path) = config
            .template_paths
            .iter()
            .find(|path| path.as_os_str().is_empty())
        {
            return Err(ConfigError::Validation(format!(
                "Template path {:?} must not be empty",
                path
            )));
        }
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_home_prefix() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(expand_home(Path::new("~")), home);
        assert_eq!(expand_home(Path::new("~/templates/cpp")), home.join("templates/cpp"));
    }

    #[test]
    fn test_expand_home_leaves_other_paths() {
        assert_eq!(expand_home(Path::new("/opt/templates")), PathBuf::from("/opt/templates"));
        assert_eq!(expand_home(Path::new("templates/~")), PathBuf::from("templates/~"));
        assert_eq!(expand_home(Path::new("~user/templates")), PathBuf::from("~user/templates"));
    }
}

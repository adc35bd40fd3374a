// Command handlers for the templatizer CLI

pub mod generate;
pub mod list;
pub mod render;
pub mod tokens;
pub mod version;

pub use generate::GenerateCommand;
pub use list::ListCommand;
pub use render::RenderCommand;
pub use tokens::TokensCommand;
pub use version::VersionCommand;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use templatizer_config::{expand_home, ConfigManager, ConfigManagerTrait, TemplatizerConfig};
use templatizer_generation::{BaseInputs, TemplateRegistry};

use crate::error::CliResult;
use crate::router::StampArgs;

/// Trait for command handlers
pub trait Command {
    /// Execute the command
    fn execute(&self) -> CliResult<()>;
}

/// State shared by every command of one invocation
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Loaded configuration
    pub config: TemplatizerConfig,
    /// Clock reading used for default stamps
    pub now: DateTime<Local>,
    /// Suppress informational output
    pub quiet: bool,
}

impl CommandContext {
    /// Context over an explicit configuration, stamped now
    pub fn new(config: TemplatizerConfig) -> Self {
        Self {
            config,
            now: Local::now(),
            quiet: false,
        }
    }

    /// Load configuration from `path`, or from the default location
    pub fn load(path: Option<&Path>, quiet: bool) -> CliResult<Self> {
        let mut manager = match path {
            Some(path) => ConfigManager::with_path(path.to_path_buf()),
            None => ConfigManager::new(),
        };
        let config = manager.load_config()?;
        Ok(Self {
            quiet,
            ..Self::new(config)
        })
    }

    /// Use a fixed clock reading
    pub fn at(mut self, now: DateTime<Local>) -> Self {
        self.now = now;
        self
    }

    /// Build base inputs: explicit flags first, then configured defaults,
    /// then the clock
    pub fn base_inputs(&self, name: &str, stamps: &StampArgs) -> BaseInputs {
        let defaults = &self.config.defaults;
        let mut inputs = BaseInputs::new(name).stamped_at(self.now);

        if let Some(namespace) = stamps.namespace.as_ref().or(defaults.namespace.as_ref()) {
            inputs = inputs.with_namespace_str(namespace);
        }
        if let Some(year) = stamps.year.as_ref().or(defaults.year.as_ref()) {
            inputs = inputs.with_year(year);
        }
        if let Some(month) = stamps.month.as_ref().or(defaults.month.as_ref()) {
            inputs = inputs.with_month(month.clone());
        }
        if let Some(date) = &stamps.date {
            inputs = inputs.with_date(date.clone());
        }
        for (key, value) in &stamps.arguments {
            inputs = inputs.with_argument(key.clone(), value.clone());
        }
        inputs
    }

    /// Search path: extra directories first, then configured ones, with a
    /// leading `~` expanded
    pub fn template_paths(&self, extra: &[PathBuf]) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = Vec::new();
        for path in extra.iter().chain(&self.config.template_paths) {
            let path = expand_home(path);
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
        paths
    }

    /// Registry populated from every directory on the search path
    pub fn registry(&self, extra: &[PathBuf]) -> CliResult<TemplateRegistry> {
        let mut registry = TemplateRegistry::new();
        for dir in self.template_paths(extra) {
            registry.load_directory(&dir)?;
        }
        Ok(registry)
    }
}

// CLI error types

use templatizer_config::ConfigError;
use templatizer_generation::GenerationError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Template set not found: {0}")]
    TemplateNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Generation error: {0}")]
    Generation(GenerationError),

    #[error("Command failed: {command} ({status})")]
    CommandFailed { command: String, status: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<GenerationError> for CliError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::TemplateNotFound(name) => CliError::TemplateNotFound(name),
            other => CliError::Generation(other),
        }
    }
}

impl CliError {
    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            CliError::TemplateNotFound(name) => {
                format!(
                    "Template set '{}' not found.\n\nRun 'templatizer list' to see the available sets.",
                    name
                )
            }
            CliError::Io(e) => {
                format!("File operation failed: {}", e)
            }
            CliError::Config(e) => {
                format!(
                    "Configuration error: {}\n\nCheck the file passed with --config or the TEMPLATIZER_* environment.",
                    e
                )
            }
            CliError::Generation(GenerationError::InvalidInput { field, reason }) => {
                format!("Invalid input for '{}': {}", field, reason)
            }
            CliError::Generation(e) => {
                format!("Generation failed: {}", e)
            }
            CliError::CommandFailed { command, status } => {
                format!("Command '{}' failed with {}", command, status)
            }
            CliError::Internal(msg) => {
                format!("Internal error: {}\n\nPlease report this issue.", msg)
            }
        }
    }

    /// Get technical details for verbose mode
    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }
}

pub type CliResult<T> = Result<T, CliError>;

//! Error types for template generation

use thiserror::Error;

/// Errors that can occur while building catalogs or planning a generation run
#[derive(Debug, Error)]
pub enum GenerationError {
    /// A base input is missing or empty
    #[error("Invalid input `{field}`: {reason}")]
    InvalidInput {
        /// Name of the offending base input or argument key
        field: String,
        /// What was wrong with it
        reason: String,
    },

    /// A token name does not satisfy the marker naming rules
    #[error("Invalid token name: {0:?}")]
    InvalidToken(String),

    /// A token was registered twice in the same catalog
    #[error("Duplicate token: {0}")]
    DuplicateToken(String),

    /// A template set with the same name is already registered
    #[error("Duplicate template: {0}")]
    DuplicateTemplate(String),

    /// No template set with the given name is registered
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// A descriptor file could not be understood
    #[error("Invalid template descriptor {path}: {message}")]
    InvalidDescriptor {
        /// Path of the descriptor
        path: String,
        /// Parser or validation message
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl GenerationError {
    /// Shorthand for an [`GenerationError::InvalidInput`] error
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for generation operations
pub type Result<T> = std::result::Result<T, GenerationError>;

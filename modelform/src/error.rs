//! Error types for schema conversion

use std::path::PathBuf;
use thiserror::Error;

/// Result type for modelform operations
pub type Result<T> = std::result::Result<T, FormError>;

/// Errors that can occur while selecting, loading or converting model fields
#[derive(Debug, Error)]
pub enum FormError {
    /// A call was made with arguments that contradict each other
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A schema file names a default factory that was never registered
    #[error("field '{field}' uses unknown default factory '{factory}'")]
    UnknownFactory { field: String, factory: String },

    /// A model declares the same field name twice
    #[error("model '{model}' declares field '{name}' more than once")]
    DuplicateField { model: String, name: String },

    /// An explicitly requested configuration file does not exist
    #[error("configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration could not be extracted
    #[error("configuration error: {0}")]
    Config(Box<figment::Error>),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl FormError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        FormError::InvalidArgument {
            message: message.into(),
        }
    }
}

impl From<figment::Error> for FormError {
    fn from(error: figment::Error) -> Self {
        FormError::Config(Box::new(error))
    }
}

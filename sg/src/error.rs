//! Error types for brand project generation

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort generation for a single brand
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Configuration file not found at {}: {source}", .path.display())]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in configuration file {}: {message}", .path.display())]
    ConfigMalformed { path: PathBuf, message: String },

    #[error("Missing required field '{field}' in {}", .path.display())]
    RequiredFieldMissing { path: PathBuf, field: &'static str },

    #[error("Field '{field}' in {} must be {expected}", .path.display())]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        expected: &'static str,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML serialization error: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

impl GenerateError {
    /// Check if the failure happened while producing output rather than reading input
    pub fn is_output_error(&self) -> bool {
        match self {
            GenerateError::WriteFailure { .. } => true,
            GenerateError::Serialize(_) => true,
            GenerateError::ConfigNotFound { .. } => false,
            GenerateError::ConfigMalformed { .. } => false,
            GenerateError::RequiredFieldMissing { .. } => false,
            GenerateError::InvalidField { .. } => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, GenerateError>;

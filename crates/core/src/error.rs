//! Error types for bbndk
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// Errors raised while parsing an NDK version string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("empty version string")]
    Empty,

    #[error("expected 2 to 4 version components, found {0}")]
    ComponentCount(usize),

    #[error("invalid version component: {0:?}")]
    InvalidComponent(String),
}

/// Main error type for the bbndk model and configuration
#[derive(Error, Debug)]
pub enum NdkError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("host path must not be empty")]
    EmptyHostPath,

    #[error("target path must not be empty")]
    EmptyTargetPath,

    #[error("Invalid version: {0}")]
    Version(#[from] VersionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for bbndk operations
pub type Result<T> = std::result::Result<T, NdkError>;

impl NdkError {
    /// Check if this error comes from an invalid argument rather than the environment
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            NdkError::EmptyName
                | NdkError::EmptyHostPath
                | NdkError::EmptyTargetPath
                | NdkError::Version(_)
        )
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            NdkError::Io(e) => format!("File operation failed: {}", e),
            NdkError::Config(msg) => format!("Configuration error: {}", msg),
            NdkError::TomlParse(e) => format!("Configuration file is not valid TOML: {}", e),
            _ => self.to_string(),
        }
    }
}

//! Error types for docintel

use thiserror::Error;

/// Result type alias using DocIntelError
pub type Result<T> = std::result::Result<T, DocIntelError>;

/// Error type alias for convenience
pub type Error = DocIntelError;

/// Exit codes for CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const UPSTREAM_ERROR: i32 = 2;
    pub const INVALID_INPUT: i32 = 3;
}

/// Main error type for docintel
#[derive(Debug, Error)]
pub enum DocIntelError {
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("{provider} error: {message}")]
    Upstream { provider: String, message: String },

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DocIntelError {
    /// Build an upstream error for a named provider
    pub fn upstream(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// True for errors caused by the caller rather than the system
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownProvider(_) | Self::Extraction(_) | Self::InvalidInput(_)
        )
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Upstream { .. } | Self::Http(_) => exit_codes::UPSTREAM_ERROR,
            Self::UnknownProvider(_)
            | Self::Extraction(_)
            | Self::InvalidInput(_)
            | Self::Config(_) => exit_codes::INVALID_INPUT,
            _ => exit_codes::GENERAL_ERROR,
        }
    }
}

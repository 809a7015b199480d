//! Configuration loading errors.

/// Configuration loading error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: '{value}'")]
    InvalidEnv { var: String, value: String },

    #[error("Port file not found: {0}")]
    PortFileNotFound(String),

    #[error("Failed to parse port file {path}: {reason}")]
    PortFileParse { path: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] validator::ValidationErrors)
}

//! Error types for the configuration server.

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response}
};
use config::ConfigError;
use errors::{MergeError, ProfileError};
use std::net::SocketAddr;
use thiserror::Error;

/// Result type alias for the server.
pub type Result<T> = std::result::Result<T, ServerError>;

/// Errors that can occur in the configuration server.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Missing or invalid `Content-Length`, truncated body or a body that is
    /// not a configuration document.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// The configuration tree could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(serde_json::Error),

    /// The update document does not fit the configuration tree.
    #[error(transparent)]
    Merge(#[from] MergeError),

    /// The host refused a profile operation.
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// The profile controller has already been handed back by `stop`.
    #[error("Server is shutting down")]
    ShuttingDown,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The seed document for the standalone host could not be loaded.
    #[error("Failed to load seed document {path}: {reason}")]
    Seed { path: String, reason: String },

    /// The listener could not be bound.
    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error
    },

    /// Server runtime error.
    #[error("Server error: {0}")]
    Server(String)
}

impl ServerError {
    /// Stable identifier used in logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedRequest(_) => "MALFORMED_REQUEST",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Merge(MergeError::KeyNotFound { .. }) => "KEY_NOT_FOUND",
            Self::Merge(MergeError::ShapeMismatch { .. }) => "SHAPE_MISMATCH",
            Self::Profile(_) => "PROFILE_OPERATION_FAILED",
            Self::ShuttingDown => "SHUTTING_DOWN",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Seed { .. } => "SEED_ERROR",
            Self::Bind { .. } => "BIND_ERROR",
            Self::Server(_) => "SERVER_ERROR"
        }
    }
}

/// Every failure is reported as a 500 with a plain-text description.
impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match &self {
            Self::MalformedRequest(_) | Self::Merge(_) => {
                tracing::warn!(code = self.code(), error = %self, "Request rejected");
            }
            _ => {
                tracing::error!(code = self.code(), error = %self, "Request failed");
            }
        }

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("Error: \"{self}\"")
        )
            .into_response()
    }
}

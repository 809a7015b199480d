//! # Configuration Server Errors
//!
//! Domain errors for the configuration server.
//!
//! - `MergeError`: the structural merge engine refused an overlay
//! - `HostError`: the host configuration subsystem rejected a call
//! - `ProfileError`: a profile switch could not be completed
//!
//! Transport-level failures (malformed requests, serialization) live next to
//! the HTTP layer in `config-server`.

use strum::Display;
use thiserror::Error;

/// Errors raised while overlaying an update document onto a configuration
/// tree.
///
/// Paths are dotted key paths from the root of the tree, e.g.
/// `speech.espeak.rate`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    #[error("Key not found: {path}")]
    KeyNotFound { path: String },

    #[error("Shape mismatch at {path}: a section cannot be replaced by a value")]
    ShapeMismatch { path: String }
}

impl MergeError {
    /// Dotted path of the key that failed.
    pub fn path(&self) -> &str {
        match self {
            Self::KeyNotFound { path } | Self::ShapeMismatch { path } => path
        }
    }
}

/// Errors reported by a host configuration subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("Profile not found: {name}")]
    ProfileNotFound { name: String },

    #[error("Profile already exists: {name}")]
    ProfileExists { name: String },

    #[error("Host rejected the request: {reason}")]
    Rejected { reason: String }
}

/// Host operations performed by the profile isolation controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ProfileOperation {
    ListProfiles,
    CurrentProfile,
    CreateProfile,
    ActivateProfile,
    ReadTree
}

/// A host profile operation failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("Profile operation {operation} failed for '{profile}': {source}")]
    OperationFailed {
        operation: ProfileOperation,
        profile: String,
        #[source]
        source: HostError
    }
}

impl ProfileError {
    pub fn operation_failed(
        operation: ProfileOperation,
        profile: impl Into<String>,
        source: HostError
    ) -> Self {
        Self::OperationFailed {
            operation,
            profile: profile.into(),
            source
        }
    }
}

//! # Configuration System
//!
//! Settings for the configuration server process.
//!
//! This crate provides:
//! - The `ServerConfig` structure and its builder
//! - Environment variable loading
//! - Port file loading (the file written by the installer)
//! - Port precedence (env > port file > installer file > default)
//! - Configuration validation

pub mod config;
pub mod error;
pub mod file_loader;
pub mod loader;
pub mod precedence;

pub use config::{DEFAULT_PORT, DEFAULT_PORT_FILE, DEFAULT_PROFILE_NAME, ServerConfig};
pub use error::ConfigError;
pub use file_loader::load_port_file;
pub use loader::load_from_env;
pub use precedence::{PortSource, installer_port_file, installer_port_file_in, resolve_port};
pub use validator::Validate;

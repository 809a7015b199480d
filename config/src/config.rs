//! # Configuration Structures
//!
//! Settings for the configuration server process.
//!
//! All structures use `serde` for (de)serialization and `validator` for input
//! validation.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use validator::Validate;

use crate::error::ConfigError;

/// Port used when neither the environment nor a port file provides one.
pub const DEFAULT_PORT: u16 = 7658;

/// Name of the dedicated profile when none is configured.
pub const DEFAULT_PROFILE_NAME: &str = "config-server";

/// Port file location shipped by the installer, relative to the directory
/// holding the server executable.
pub const DEFAULT_PORT_FILE: &str = "shared/default-at-configuration-port.json";

/// Configuration server settings.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Describes where the server listens and which profile it isolates its
/// changes in.
///
/// ## Usage
/// ```rust,no_run
/// use config::ServerConfig;
///
/// let config = ServerConfig::builder().port(7658).profile_name("my-addon").build()?;
/// println!("Listening on {}", config.socket_addr());
/// # Ok::<(), config::ConfigError>(())
/// ```
///
/// ## Validation
/// - `host`: must be a loopback address
/// - `profile_name`: 1-64 characters, no path separators or control characters
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct ServerConfig {
    /// Address to bind to.
    #[serde(default = "default_host")]
    #[validate(custom(function = "validate_loopback"))]
    pub host: IpAddr,

    /// Port to bind to. `0` asks the OS for an ephemeral port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Name of the profile the server switches the host into.
    #[serde(default = "default_profile_name")]
    #[validate(
        length(min = 1, max = 64),
        custom(function = "validate_profile_name")
    )]
    pub profile_name: String,

    /// Optional JSON document used as the base configuration by the
    /// standalone binary.
    #[serde(default)]
    pub seed_file: Option<PathBuf>
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_profile_name() -> String {
    DEFAULT_PROFILE_NAME.to_string()
}

fn validate_loopback(host: &IpAddr) -> Result<(), validator::ValidationError> {
    if host.is_loopback() {
        Ok(())
    } else {
        Err(validator::ValidationError::new("host_not_loopback"))
    }
}

fn validate_profile_name(name: &str) -> Result<(), validator::ValidationError> {
    if name.chars().any(|c| c == '/' || c == '\\' || c.is_control()) {
        return Err(validator::ValidationError::new("invalid_profile_name"));
    }
    Ok(())
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: DEFAULT_PORT,
            profile_name: default_profile_name(),
            seed_file: None
        }
    }
}

impl ServerConfig {
    /// Creates a builder for configuration.
    #[must_use]
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Builder for `ServerConfig`.
#[derive(Default)]
pub struct ServerConfigBuilder {
    host: Option<IpAddr>,
    port: Option<u16>,
    profile_name: Option<String>,
    seed_file: Option<PathBuf>
}

impl ServerConfigBuilder {
    /// Sets the host to bind to.
    #[must_use]
    pub fn host(mut self, host: IpAddr) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the port to bind to.
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the dedicated profile name.
    #[must_use]
    pub fn profile_name(mut self, name: impl Into<String>) -> Self {
        self.profile_name = Some(name.into());
        self
    }

    /// Sets the seed document path.
    #[must_use]
    pub fn seed_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.seed_file = Some(path.into());
        self
    }

    /// Builds and validates the configuration.
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        let config = ServerConfig {
            host: self.host.unwrap_or_else(default_host),
            port: self.port.unwrap_or(DEFAULT_PORT),
            profile_name: self.profile_name.unwrap_or_else(default_profile_name),
            seed_file: self.seed_file
        };
        config.validate()?;
        Ok(config)
    }
}

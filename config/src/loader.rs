//! # Environment Variable Loader
//!
//! Loads server configuration from environment variables.
//!
//! # Variables
//! - `CONFIG_SERVER_HOST`: loopback address to bind (default: "127.0.0.1")
//! - `CONFIG_SERVER_PORT`: listening port, overrides any port file
//! - `CONFIG_SERVER_PORT_FILE`: path of a port file to read the port from
//! - `CONFIG_SERVER_PROFILE`: dedicated profile name (default: "config-server")
//! - `CONFIG_SERVER_SEED`: JSON document seeding the standalone host

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use validator::Validate;

use crate::config::{DEFAULT_PROFILE_NAME, ServerConfig};
use crate::error::ConfigError;
use crate::precedence::{installer_port_file, resolve_port};

pub const ENV_HOST: &str = "CONFIG_SERVER_HOST";
pub const ENV_PORT: &str = "CONFIG_SERVER_PORT";
pub const ENV_PORT_FILE: &str = "CONFIG_SERVER_PORT_FILE";
pub const ENV_PROFILE: &str = "CONFIG_SERVER_PROFILE";
pub const ENV_SEED: &str = "CONFIG_SERVER_SEED";

/// Load configuration from environment variables.
///
/// ## Usage
/// ```rust,no_run
/// use config::load_from_env;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = load_from_env()?;
///     println!("Port: {}", config.port);
///     Ok(())
/// }
/// ```
///
/// ## Error Handling
/// Returns `ConfigError` for unparsable variables, unreadable port files and
/// configurations that fail validation.
pub fn load_from_env() -> Result<ServerConfig, ConfigError> {
    let port_file = env::var_os(ENV_PORT_FILE).map(PathBuf::from);
    let (port, source) = resolve_port(
        parse_env(ENV_PORT)?,
        port_file.as_deref(),
        &installer_port_file()?
    )?;

    let config = ServerConfig {
        host: parse_env(ENV_HOST)?.unwrap_or_else(|| ServerConfig::default().host),
        port,
        profile_name: env::var(ENV_PROFILE).unwrap_or_else(|_| DEFAULT_PROFILE_NAME.to_string()),
        seed_file: env::var_os(ENV_SEED).map(PathBuf::from)
    };
    config.validate()?;

    tracing::info!(
        addr = %config.socket_addr(),
        port_source = %source,
        profile = %config.profile_name,
        "Configuration loaded from environment"
    );
    Ok(config)
}

/// Unset variables yield `None`; set but unparsable ones are an error.
fn parse_env<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv {
                var: key.to_string(),
                value
            }),
        Err(_) => Ok(None)
    }
}

//! # Port Precedence
//!
//! Resolves the listening port from multiple sources.
//!
//! # Precedence Order
//! 1. Environment variable (highest priority)
//! 2. Port file named explicitly by the environment
//! 3. Installer port file at its default location, when present
//! 4. Built-in default (lowest priority)

use std::path::{Path, PathBuf};
use strum::Display;

use crate::config::{DEFAULT_PORT, DEFAULT_PORT_FILE};
use crate::error::ConfigError;
use crate::file_loader::load_port_file;

/// Where the resolved port came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum PortSource {
    Env,
    PortFile,
    InstallerFile,
    Default
}

/// Resolve the listening port.
///
/// An explicitly named port file must exist; the installer file at
/// `installer_file` is only consulted if it is present.
pub fn resolve_port(
    env_port: Option<u16>,
    port_file: Option<&Path>,
    installer_file: &Path
) -> Result<(u16, PortSource), ConfigError> {
    let resolved = if let Some(port) = env_port {
        (port, PortSource::Env)
    } else if let Some(path) = port_file {
        (load_port_file(path)?, PortSource::PortFile)
    } else if installer_file.is_file() {
        (load_port_file(installer_file)?, PortSource::InstallerFile)
    } else {
        (DEFAULT_PORT, PortSource::Default)
    };

    tracing::debug!(port = resolved.0, source = %resolved.1, "Resolved listening port");
    Ok(resolved)
}

/// Location of the installer port file for a server installed in
/// `install_dir`.
pub fn installer_port_file_in(install_dir: &Path) -> PathBuf {
    install_dir.join(DEFAULT_PORT_FILE)
}

/// Location of the installer port file next to the running executable.
///
/// The lookup does not depend on the working directory the server was
/// launched from.
pub fn installer_port_file() -> Result<PathBuf, ConfigError> {
    let exe = std::env::current_exe()?;
    let install_dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(installer_port_file_in(install_dir))
}

//! # Port File Loading
//!
//! The installer drops a small JSON file next to the add-on that holds the
//! port the server should listen on. Both a bare integer (`7658`) and an
//! object (`{ "port": 7658 }`) are accepted.

use serde::Deserialize;
use std::path::Path;

use crate::error::ConfigError;

#[derive(Deserialize)]
#[serde(untagged)]
enum PortFile {
    Bare(u16),
    Object { port: u16 }
}

/// Load the listening port from a port file.
///
/// ## Error Handling
/// Returns `ConfigError` for:
/// - File not found
/// - Contents that are not a port number or `{ "port": n }`
pub fn load_port_file(path: &Path) -> Result<u16, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::PortFileNotFound(path.display().to_string())
        } else {
            ConfigError::Io(e)
        }
    })?;

    let parsed: PortFile =
        serde_json::from_str(&contents).map_err(|e| ConfigError::PortFileParse {
            path: path.display().to_string(),
            reason: e.to_string()
        })?;

    Ok(match parsed {
        PortFile::Bare(port) | PortFile::Object { port } => port
    })
}

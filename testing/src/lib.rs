//! Shared test fixtures for the configuration server workspace.
//!
//! - Sample configuration trees shaped like a screen reader's settings
//! - `RecordingHost`, a `ConfigHost` wrapper that records calls and can be
//!   told to reject profile operations

mod fixtures;
mod recording;

pub use fixtures::*;
pub use recording::{HostCall, RecordingHost};

//! Application state for the configuration server.

use config::ServerConfig;
use profile::ProfileIsolation;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared application state for Axum handlers.
///
/// The profile controller sits behind a single FIFO mutex. Every request
/// holds it for its whole critical section, so the host is only ever touched
/// by one request at a time, in arrival order.
pub struct AppState<H> {
    /// Profile controller; `None` once `stop` has taken it back.
    pub isolation: Mutex<Option<ProfileIsolation<H>>>,
    /// Server configuration.
    pub config: Arc<ServerConfig>
}

impl<H> AppState<H> {
    /// Creates a new application state.
    #[must_use]
    pub fn new(isolation: ProfileIsolation<H>, config: ServerConfig) -> Self {
        Self {
            isolation: Mutex::new(Some(isolation)),
            config: Arc::new(config)
        }
    }

    /// Takes the controller out, leaving later requests to fail with
    /// `ShuttingDown`.
    pub async fn take_isolation(&self) -> Option<ProfileIsolation<H>> {
        self.isolation.lock().await.take()
    }
}

//! # Configuration Server
//!
//! A local HTTP server that exposes a host application's live configuration
//! for inspection and partial updates, while keeping every change inside a
//! dedicated profile that is swapped out again when the server stops.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐  HTTP   ┌──────────────────┐  ConfigHost  ┌──────────────┐
//! │  client  │────────►│  config-server   │─────────────►│     host     │
//! │ (local)  │◄────────│ (this crate)     │◄─────────────│  profiles    │
//! └──────────┘         └──────────────────┘              └──────────────┘
//!                        │ ProfileIsolation
//!                        │ structural merge
//! ```
//!
//! ## Endpoints
//!
//! - `GET <any path>` - Returns the dedicated profile's configuration as JSON
//! - `POST <any path>` - Merges a JSON document into that configuration
//!
//! Failures are reported as `500` with a plain-text description and never
//! stop the server.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ServerError;
pub use server::{ConfigServer, RunningServer};
pub use state::AppState;

//! Route definitions for the configuration server.

use axum::{Router, routing::get};
use conf_core::ConfigHost;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Creates the Axum router.
///
/// GET and POST are served on every path; other methods get the
/// framework's 405.
pub fn create_router<H: ConfigHost + 'static>(state: Arc<AppState<H>>) -> Router {
    let tree = get(handlers::read_tree::<H>).post(handlers::write_tree::<H>);

    Router::new()
        .route("/", tree.clone())
        .route("/{*path}", tree)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! HTTP request handlers for the configuration server.
//!
//! Both handlers enter the dedicated profile before touching the tree and
//! only work on the tree handle returned by `ensure_isolated`.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, header},
    response::{IntoResponse, Response}
};
use conf_core::{ConfigHost, ConfigTree};
use std::sync::Arc;

use crate::error::{Result, ServerError};
use crate::state::AppState;

/// Body sent for a successful update.
pub const UPDATE_ACK: &str = "ok";

/// GET (any path)
///
/// Returns the whole configuration tree of the dedicated profile as JSON.
pub async fn read_tree<H: ConfigHost + 'static>(
    State(state): State<Arc<AppState<H>>>
) -> Result<Response> {
    let mut guard = state.isolation.lock().await;
    let isolation = guard.as_mut().ok_or(ServerError::ShuttingDown)?;
    let tree = isolation.ensure_isolated()?;

    let body = serde_json::to_vec(&*tree).map_err(ServerError::Serialization)?;
    tracing::debug!(
        profile = %state.config.profile_name,
        bytes = body.len(),
        "Returning configuration tree"
    );

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// POST (any path)
///
/// Merges the JSON document in the body into the dedicated profile's tree.
/// The body must be exactly `Content-Length` bytes long.
///
/// Updates are not atomic: if the merge fails part way, the leaves written
/// before the failure stay written.
pub async fn write_tree<H: ConfigHost + 'static>(
    State(state): State<Arc<AppState<H>>>,
    headers: HeaderMap,
    body: Body
) -> Result<&'static str> {
    let mut guard = state.isolation.lock().await;
    let isolation = guard.as_mut().ok_or(ServerError::ShuttingDown)?;
    let tree = isolation.ensure_isolated()?;

    let overlay = read_document(&headers, body).await?;
    let written = conf_core::update(tree, &overlay)?;

    tracing::info!(
        profile = %state.config.profile_name,
        keys = overlay.len(),
        leaves_written = written,
        "Applied configuration update"
    );

    Ok(UPDATE_ACK)
}

async fn read_document(headers: &HeaderMap, body: Body) -> Result<ConfigTree> {
    let expected = content_length(headers)?;

    let bytes = axum::body::to_bytes(body, expected)
        .await
        .map_err(|e| ServerError::MalformedRequest(format!("failed to read body: {e}")))?;
    if bytes.len() != expected {
        return Err(ServerError::MalformedRequest(format!(
            "body truncated: expected {expected} bytes, received {}",
            bytes.len()
        )));
    }

    ConfigTree::from_slice(&bytes)
        .map_err(|e| ServerError::MalformedRequest(format!("invalid configuration document: {e}")))
}

fn content_length(headers: &HeaderMap) -> Result<usize> {
    let value = headers.get(header::CONTENT_LENGTH).ok_or_else(|| {
        ServerError::MalformedRequest("missing Content-Length header".to_string())
    })?;

    value
        .to_str()
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .ok_or_else(|| {
            ServerError::MalformedRequest(format!("invalid Content-Length header: {value:?}"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_content_length_parses() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("17"));
        assert_eq!(content_length(&headers).unwrap(), 17);
    }

    #[test]
    fn test_content_length_missing() {
        let err = content_length(&HeaderMap::new()).unwrap_err();
        assert!(matches!(err, ServerError::MalformedRequest(_)));
    }

    #[test]
    fn test_content_length_invalid() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("-3"));
        let err = content_length(&headers).unwrap_err();
        assert!(err.to_string().contains("invalid Content-Length header"));
    }

    #[tokio::test]
    async fn test_read_document_rejects_truncated_body() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("10"));

        let err = read_document(&headers, Body::from("{}")).await.unwrap_err();
        assert!(err.to_string().contains("body truncated"));
    }

    #[tokio::test]
    async fn test_read_document_rejects_oversized_body() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("2"));

        let err = read_document(&headers, Body::from(r#"{"a": 1}"#))
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::MalformedRequest(_)));
    }
}

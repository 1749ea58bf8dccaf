//! HTTP plumbing around the request handler.
//!
//! The router has no routes of its own. Everything lands in a fallback
//! that forwards the method and path to [`crate::handler`], which owns
//! routing, so the 404 and OPTIONS behavior lives in exactly one place.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderName, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Router;
use reqwest::Client;
use tracing::info;

use crate::config::ReportConfig;
use crate::handler::{self, HandlerEvent, HandlerResponse};

/// Shared state for every request: the immutable configuration and the
/// one HTTP client reused across the whole process.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ReportConfig>,
    pub client: Client,
}

impl AppState {
    pub fn new(config: ReportConfig, client: Client) -> Self {
        Self {
            config: Arc::new(config),
            client,
        }
    }
}

/// Builds the service router.
pub fn router(state: AppState) -> Router {
    Router::new().fallback(dispatch).with_state(state)
}

/// Binds the listener and serves until the process is stopped.
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Report server listening");
    axum::serve(listener, router(state)).await
}

async fn dispatch(State(state): State<AppState>, request: Request) -> Response {
    let event = HandlerEvent {
        method: request.method().clone(),
        path: request.uri().path().to_string(),
    };
    let reply = handler::handle_request(&state.config, &state.client, event).await;
    into_http_response(reply)
}

fn into_http_response(reply: HandlerResponse) -> Response {
    let mut response = (reply.status, axum::Json(reply.body)).into_response();
    let headers = response.headers_mut();
    for &(name, value) in reply.headers {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[test]
    fn test_handler_response_becomes_http_response() {
        let config = ReportConfig::default();
        let reply = HandlerResponse {
            status: StatusCode::NOT_FOUND,
            headers: config.response_headers(),
            body: json!({ "error": "path not found" }),
        };

        let response = into_http_response(reply);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
        assert_eq!(
            response.headers().get("access-control-allow-methods").unwrap(),
            "GET, POST, PUT, DELETE, OPTIONS"
        );
    }
}

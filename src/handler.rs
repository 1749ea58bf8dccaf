//! Request handling for the report endpoint.
//!
//! The handler is transport-agnostic: it takes a method and a path,
//! decides what the response is, and leaves the HTTP plumbing to
//! [`crate::server`]. Routing is deliberately tiny:
//! - any `OPTIONS` request is acknowledged so browser preflights pass
//! - `POST` on the report route runs the pipeline
//! - everything else is a 404
//!
//! Every response, including errors, carries the fixed header set from
//! the configuration, so clients can rely on CORS headers even when the
//! pipeline blew up.

use axum::http::{Method, StatusCode};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, error, info, instrument};

use crate::articles;
use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::prompt;
use crate::schema;
use crate::search;
use crate::summarize;

/// The one route this service answers.
pub const REPORT_ROUTE: &str = "/v1/actions/generate-news-report";

/// The parts of an incoming request the handler cares about.
#[derive(Debug, Clone)]
pub struct HandlerEvent {
    pub method: Method,
    pub path: String,
}

/// A fully decided response: status, the fixed header set, and a JSON
/// body.
#[derive(Debug, Clone)]
pub struct HandlerResponse {
    pub status: StatusCode,
    pub headers: &'static [(&'static str, &'static str)],
    pub body: Value,
}

/// Routes one request and produces its response.
///
/// This function never fails; pipeline errors become the 500 envelope
/// with the error display in `details`.
#[instrument(level = "info", skip_all, fields(method = %event.method, path = %event.path))]
pub async fn handle_request(
    config: &ReportConfig,
    client: &Client,
    event: HandlerEvent,
) -> HandlerResponse {
    if event.method == Method::OPTIONS {
        debug!("Acknowledging preflight request");
        return respond(config, StatusCode::OK, json!({ "message": "OPTIONS" }));
    }

    if event.method == Method::POST && event.path == REPORT_ROUTE {
        return match generate_news_report(config, client).await {
            Ok(report) => respond(
                config,
                StatusCode::OK,
                json!({
                    "data": {
                        "type": "news-report",
                        "attributes": { "content": report }
                    }
                }),
            ),
            Err(err) => {
                error!(error = %err, "Report generation failed");
                respond(
                    config,
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Failed to generate news report.",
                        "details": err.to_string()
                    }),
                )
            }
        };
    }

    debug!("No route matched");
    respond(
        config,
        StatusCode::NOT_FOUND,
        json!({ "error": "path not found" }),
    )
}

/// Runs the whole pipeline: search, validate, fetch articles, build the
/// prompt, request the report.
///
/// Upstream failures abort with a [`ReportError`]; individual article
/// failures do not, they degrade to placeholders inside the fetch
/// stage.
pub async fn generate_news_report(
    config: &ReportConfig,
    client: &Client,
) -> Result<String, ReportError> {
    let payload = search::fetch_search_results(client, config).await?;
    let results = schema::validate_search_results(&payload)?;
    info!(results = results.len(), "Validated search results");

    let texts = articles::fetch_all_articles(client, &results, config).await;
    let prompt = prompt::build_summary_prompt(&texts);
    debug!(
        articles = texts.len(),
        prompt_chars = prompt.chars().count(),
        "Built summarization prompt"
    );

    summarize::request_summary(client, config, &prompt).await
}

fn respond(config: &ReportConfig, status: StatusCode, body: Value) -> HandlerResponse {
    HandlerResponse {
        status,
        headers: config.response_headers(),
        body,
    }
}

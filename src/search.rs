//! Client for the news search API.

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::ReportConfig;
use crate::error::{ReportError, Upstream};

/// Runs the configured search query and returns the decoded payload.
///
/// The payload comes back as raw JSON on purpose; structural checks
/// belong to [`crate::schema::validate_search_results`], which reports
/// per-field violations this client knows nothing about.
///
/// # Errors
///
/// [`ReportError::Transport`] when the request fails outright or the
/// body is not JSON, [`ReportError::UpstreamStatus`] on a non-success
/// status.
#[instrument(level = "info", skip_all, fields(query = %config.search_query))]
pub async fn fetch_search_results(
    client: &Client,
    config: &ReportConfig,
) -> Result<Value, ReportError> {
    let response = client
        .get(config.search_endpoint.clone())
        .query(&[("q", config.search_query.as_str())])
        .send()
        .await
        .map_err(|source| ReportError::Transport {
            upstream: Upstream::Search,
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ReportError::UpstreamStatus {
            upstream: Upstream::Search,
            status: status.as_u16(),
        });
    }

    let payload = response
        .json::<Value>()
        .await
        .map_err(|source| ReportError::Transport {
            upstream: Upstream::Search,
            source,
        })?;
    debug!("Fetched search results payload");
    Ok(payload)
}

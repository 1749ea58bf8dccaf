//! Client for the chat completion API that writes the report.

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::config::ReportConfig;
use crate::error::{ReportError, Upstream};
use crate::schema;

/// Wire shape of a completion request: one user message carrying the
/// whole prompt.
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Sends the prompt to the completion endpoint and returns the report
/// text from its reply.
///
/// Article fetches race a deadline; this request deliberately does not.
/// A completion can legitimately take longer than any single article
/// fetch, so the caller waits as long as the connection holds.
///
/// # Errors
///
/// [`ReportError::Transport`] when the request fails or the body is not
/// JSON, [`ReportError::UpstreamStatus`] on a non-success status, and
/// [`ReportError::Schema`] when the reply does not carry
/// `message.content` as a string.
#[instrument(level = "info", skip_all, fields(model = %config.model, prompt_chars = prompt.chars().count()))]
pub async fn request_summary(
    client: &Client,
    config: &ReportConfig,
    prompt: &str,
) -> Result<String, ReportError> {
    let request = CompletionRequest {
        model: &config.model,
        messages: [ChatMessage {
            role: "user",
            content: prompt,
        }],
    };

    let response = client
        .post(config.completion_endpoint.clone())
        .json(&request)
        .send()
        .await
        .map_err(|source| ReportError::Transport {
            upstream: Upstream::Completion,
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ReportError::UpstreamStatus {
            upstream: Upstream::Completion,
            status: status.as_u16(),
        });
    }

    let payload = response
        .json::<Value>()
        .await
        .map_err(|source| ReportError::Transport {
            upstream: Upstream::Completion,
            source,
        })?;

    let content = schema::validate_completion_reply(&payload)?;
    info!(report_chars = content.chars().count(), "Received report from completion API");
    Ok(content)
}

//! Runtime configuration for the report service.
//!
//! A [`ReportConfig`] is built once at startup (from CLI flags and
//! environment variables, see [`crate::cli`]) and then shared read-only
//! across requests. Nothing mutates it after process start.

use std::time::Duration;

use url::Url;

pub const DEFAULT_SEARCH_ENDPOINT: &str = "http://127.0.0.1:3001/search";
pub const DEFAULT_COMPLETION_ENDPOINT: &str = "http://127.0.0.1:3001/v1/chat/completions";
pub const DEFAULT_SEARCH_QUERY: &str = "top world news";
pub const DEFAULT_MODEL: &str = "llama3.2";
pub const DEFAULT_ARTICLE_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_ARTICLE_MAX_CHARS: usize = 10_000;

/// User agent sent on outbound requests to both upstreams and to
/// article hosts.
pub const USER_AGENT: &str = concat!("ai_news_report/", env!("CARGO_PKG_VERSION"));

/// Headers attached to every response the service produces, success or
/// failure. Names are lowercase so they can be used as static header
/// names directly.
const RESPONSE_HEADERS: [(&str, &str); 4] = [
    ("content-type", "application/json"),
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", "GET, POST, PUT, DELETE, OPTIONS"),
    ("access-control-allow-headers", "Content-Type, Authorization"),
];

/// Immutable settings for one service process.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// News search API endpoint; the query lands in its `q` parameter.
    pub search_endpoint: Url,
    /// Query string sent to the search API on every report request.
    pub search_query: String,
    /// Chat completion API endpoint that writes the report.
    pub completion_endpoint: Url,
    /// Model identifier forwarded to the completion API.
    pub model: String,
    /// Deadline for each individual article fetch.
    pub article_timeout: Duration,
    /// Character cap applied to each article text before prompting.
    pub article_max_chars: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            search_endpoint: Url::parse(DEFAULT_SEARCH_ENDPOINT)
                .expect("default search endpoint is a valid URL"),
            search_query: DEFAULT_SEARCH_QUERY.to_string(),
            completion_endpoint: Url::parse(DEFAULT_COMPLETION_ENDPOINT)
                .expect("default completion endpoint is a valid URL"),
            model: DEFAULT_MODEL.to_string(),
            article_timeout: Duration::from_millis(DEFAULT_ARTICLE_TIMEOUT_MS),
            article_max_chars: DEFAULT_ARTICLE_MAX_CHARS,
        }
    }
}

impl ReportConfig {
    /// Rejects configurations that could never produce a report.
    pub fn validate(&self) -> Result<(), String> {
        for (name, endpoint) in [
            ("search", &self.search_endpoint),
            ("completion", &self.completion_endpoint),
        ] {
            if !matches!(endpoint.scheme(), "http" | "https") {
                return Err(format!(
                    "{name} endpoint must use http or https, got {}",
                    endpoint.scheme()
                ));
            }
        }
        if self.search_query.trim().is_empty() {
            return Err("search query must not be empty".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("model identifier must not be empty".to_string());
        }
        if self.article_timeout.is_zero() {
            return Err("article timeout must be greater than zero".to_string());
        }
        if self.article_max_chars == 0 {
            return Err("article character cap must be greater than zero".to_string());
        }
        Ok(())
    }

    /// The fixed header set stamped onto every response.
    pub fn response_headers(&self) -> &'static [(&'static str, &'static str)] {
        &RESPONSE_HEADERS
    }
}

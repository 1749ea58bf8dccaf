//! Command-line interface definitions for the report service.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! All arguments can be provided via command-line flags or environment variables.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use url::Url;

use crate::config::{
    ReportConfig, DEFAULT_ARTICLE_MAX_CHARS, DEFAULT_ARTICLE_TIMEOUT_MS,
    DEFAULT_COMPLETION_ENDPOINT, DEFAULT_MODEL, DEFAULT_SEARCH_ENDPOINT, DEFAULT_SEARCH_QUERY,
};

/// Command-line arguments for the report service.
///
/// Everything here maps onto a [`ReportConfig`] field except the bind
/// address, which belongs to the HTTP listener rather than the
/// pipeline.
///
/// # Examples
///
/// ```sh
/// # Run against the local mock upstream with defaults
/// ai_news_report
///
/// # Point at real endpoints and a different model
/// ai_news_report \
///     --search-endpoint https://api.search.example.com/news \
///     --completion-endpoint http://localhost:11434/api/chat \
///     --model llama3.2 \
///     --search-query "renewable energy"
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Address to bind the report server on
    #[arg(short, long, env = "BIND_ADDR", default_value = "127.0.0.1:3000")]
    pub bind_addr: SocketAddr,

    /// News search API endpoint
    #[arg(long, env = "SEARCH_ENDPOINT", default_value = DEFAULT_SEARCH_ENDPOINT)]
    pub search_endpoint: Url,

    /// Query sent to the search API for every report
    #[arg(short = 'q', long, env = "SEARCH_QUERY", default_value = DEFAULT_SEARCH_QUERY)]
    pub search_query: String,

    /// Chat completion API endpoint used to write the report
    #[arg(long, env = "COMPLETION_ENDPOINT", default_value = DEFAULT_COMPLETION_ENDPOINT)]
    pub completion_endpoint: Url,

    /// Model identifier sent to the completion API
    #[arg(short, long, env = "SUMMARY_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Per-article fetch deadline in milliseconds
    #[arg(long, env = "ARTICLE_TIMEOUT_MS", default_value_t = DEFAULT_ARTICLE_TIMEOUT_MS)]
    pub article_timeout_ms: u64,

    /// Per-article character cap applied before prompting
    #[arg(long, env = "ARTICLE_MAX_CHARS", default_value_t = DEFAULT_ARTICLE_MAX_CHARS)]
    pub article_max_chars: usize,
}

impl Cli {
    /// Builds the immutable pipeline configuration from the parsed
    /// arguments.
    pub fn report_config(&self) -> ReportConfig {
        ReportConfig {
            search_endpoint: self.search_endpoint.clone(),
            search_query: self.search_query.clone(),
            completion_endpoint: self.completion_endpoint.clone(),
            model: self.model.clone(),
            article_timeout: Duration::from_millis(self.article_timeout_ms),
            article_max_chars: self.article_max_chars,
        }
    }
}

//! Concurrent article retrieval with graceful degradation.
//!
//! Every search result is fetched at the same time, each fetch bounded
//! by the configured timeout. A single article is never allowed to sink
//! the report: whatever goes wrong (connect failure, bad status, page
//! with no body, timeout) collapses into a fixed placeholder string, so
//! the aggregate future always resolves with one text per requested
//! article. The summarizer is told up front that some inputs may be
//! placeholders.

use std::time::Duration;

use futures::future::join_all;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::config::ReportConfig;
use crate::extract;
use crate::models::SearchResultSet;

/// Substituted when an article could not be fetched or read.
pub const RETRIEVAL_PLACEHOLDER: &str = "[Article content could not be retrieved.]";

/// Substituted when an article fetch exceeded its deadline.
pub const TIMEOUT_PLACEHOLDER: &str = "[Article content timeout]";

/// Why one article failed. Absorbed into a placeholder before leaving
/// this module; only the log line ever sees it.
#[derive(Debug, Error)]
enum FetchFailure {
    #[error("status {0}")]
    Status(u16),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("page has no readable body")]
    Unreadable,
}

/// Fetches one article and extracts its readable text.
///
/// This function is total: it always produces a string. On success that
/// is the extracted article text (possibly empty, when the page body
/// held nothing); on any failure it is one of the placeholder
/// constants. The timeout covers the whole fetch, and an expired
/// deadline drops the in-flight request on the floor.
#[instrument(level = "debug", skip_all, fields(url = %url))]
pub async fn fetch_article_text(client: &Client, url: &Url, timeout: Duration) -> String {
    match tokio::time::timeout(timeout, retrieve_readable(client, url)).await {
        Ok(Ok(text)) => {
            debug!(chars = text.chars().count(), "Extracted article text");
            text
        }
        Ok(Err(failure)) => {
            warn!(error = %failure, "Article fetch failed, substituting placeholder");
            RETRIEVAL_PLACEHOLDER.to_string()
        }
        Err(_) => {
            warn!(
                timeout_ms = timeout.as_millis() as u64,
                "Article fetch timed out, abandoning request"
            );
            TIMEOUT_PLACEHOLDER.to_string()
        }
    }
}

async fn retrieve_readable(client: &Client, url: &Url) -> Result<String, FetchFailure> {
    let response = client.get(url.clone()).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchFailure::Status(status.as_u16()));
    }
    let body = response.text().await?;
    extract::readable_text(&body).ok_or(FetchFailure::Unreadable)
}

/// Fetches every result in the set concurrently and aggregates the
/// texts.
///
/// Order matches the search results. Each text is truncated to the
/// configured character cap, then texts that extracted to nothing are
/// dropped. Placeholders survive both steps, so a failed article is
/// still represented in the output.
#[instrument(level = "info", skip_all, fields(articles = results.len()))]
pub async fn fetch_all_articles(
    client: &Client,
    results: &SearchResultSet,
    config: &ReportConfig,
) -> Vec<String> {
    let fetches = results
        .results
        .iter()
        .map(|result| fetch_article_text(client, &result.url, config.article_timeout));
    let texts = join_all(fetches).await;

    let kept: Vec<String> = texts
        .into_iter()
        .map(|text| truncate_chars(text, config.article_max_chars))
        .filter(|text| !text.is_empty())
        .collect();

    info!(
        requested = results.len(),
        kept = kept.len(),
        "Aggregated article texts"
    );
    kept
}

/// Truncates to a character count, never splitting a code point.
fn truncate_chars(mut text: String, max_chars: usize) -> String {
    if let Some((cut, _)) = text.char_indices().nth(max_chars) {
        text.truncate(cut);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SearchResult;
    use axum::response::Html;
    use axum::routing::get;
    use axum::Router;
    use std::net::SocketAddr;

    const ARTICLE_BODY: &str = "Negotiators emerged shortly after midnight to announce \
        that a framework agreement had been reached. The deal, which still requires \
        ratification, would phase in the new tariff schedule over three years and \
        establish a joint review board with rotating membership.";

    async fn spawn_app(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn article_url(addr: SocketAddr, path: &str) -> Url {
        Url::parse(&format!("http://{addr}{path}")).unwrap()
    }

    fn result_for(url: &Url) -> SearchResult {
        SearchResult {
            url: url.clone(),
            title: "t".to_string(),
            description: "d".to_string(),
            age: None,
            page_age: None,
            thumbnail: None,
            meta_url: None,
        }
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let text = "naïve café".to_string();
        assert_eq!(truncate_chars(text, 5), "naïve");
    }

    #[test]
    fn test_truncation_leaves_short_text_alone() {
        let text = "short".to_string();
        assert_eq!(truncate_chars(text, 10_000), "short");
    }

    #[test]
    fn test_placeholders_are_distinct() {
        assert_ne!(RETRIEVAL_PLACEHOLDER, TIMEOUT_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_fetch_extracts_served_article() {
        let app = Router::new().route(
            "/story",
            get(|| async {
                Html(format!(
                    "<html><body><article><p>{ARTICLE_BODY}</p></article></body></html>"
                ))
            }),
        );
        let addr = spawn_app(app).await;

        let text = fetch_article_text(
            &Client::new(),
            &article_url(addr, "/story"),
            Duration::from_secs(5),
        )
        .await;
        assert!(text.contains("framework agreement"));
    }

    #[tokio::test]
    async fn test_error_status_becomes_retrieval_placeholder() {
        // No routes registered, so every path is a 404.
        let addr = spawn_app(Router::new()).await;

        let text = fetch_article_text(
            &Client::new(),
            &article_url(addr, "/gone"),
            Duration::from_secs(5),
        )
        .await;
        assert_eq!(text, RETRIEVAL_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_connect_failure_becomes_retrieval_placeholder() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let text = fetch_article_text(
            &Client::new(),
            &article_url(addr, "/unreachable"),
            Duration::from_secs(5),
        )
        .await;
        assert_eq!(text, RETRIEVAL_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_slow_article_becomes_timeout_placeholder() {
        let app = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Html("<html><body>too late</body></html>")
            }),
        );
        let addr = spawn_app(app).await;

        let text = fetch_article_text(
            &Client::new(),
            &article_url(addr, "/slow"),
            Duration::from_millis(100),
        )
        .await;
        assert_eq!(text, TIMEOUT_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_aggregate_preserves_order_and_drops_empties() {
        let app = Router::new()
            .route(
                "/first",
                get(|| async {
                    Html(format!(
                        "<html><body><article><p>Alpha story. {ARTICLE_BODY}</p></article></body></html>"
                    ))
                }),
            )
            .route("/blank", get(|| async { Html("<html><body></body></html>") }))
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Html("late")
                }),
            );
        let addr = spawn_app(app).await;

        let urls = [
            article_url(addr, "/first"),
            article_url(addr, "/blank"),
            article_url(addr, "/slow"),
        ];
        let set = SearchResultSet {
            results: urls.iter().map(result_for).collect(),
        };
        let config = ReportConfig {
            article_timeout: Duration::from_millis(200),
            ..ReportConfig::default()
        };

        let texts = fetch_all_articles(&Client::new(), &set, &config).await;
        // The blank page extracted to an empty string and was dropped;
        // the slow one degraded to a placeholder in its original slot.
        assert_eq!(texts.len(), 2);
        assert!(texts[0].starts_with("Alpha story."));
        assert_eq!(texts[1], TIMEOUT_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_aggregate_truncates_to_configured_cap() {
        let app = Router::new().route(
            "/long",
            get(|| async {
                Html(format!(
                    "<html><body><article><p>{}</p></article></body></html>",
                    ARTICLE_BODY.repeat(50)
                ))
            }),
        );
        let addr = spawn_app(app).await;

        let url = article_url(addr, "/long");
        let set = SearchResultSet {
            results: vec![result_for(&url)],
        };
        let config = ReportConfig {
            article_max_chars: 300,
            ..ReportConfig::default()
        };

        let texts = fetch_all_articles(&Client::new(), &set, &config).await;
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].chars().count(), 300);
    }
}

//! Mock search and completion backend for local development.
//!
//! Serves all three things the report pipeline talks to, on one port:
//! - `GET /search?q=` answers with two fabricated news results whose
//!   URLs point back at this server
//! - `GET /articles/{slug}` serves the article pages those results
//!   reference, so fetching and extraction run for real
//! - `POST /v1/chat/completions` replies with a canned completion that
//!   echoes the user message, making it obvious in the output what the
//!   model was actually sent
//!
//! Latency is simulated so timeout behavior can be exercised locally.

use std::collections::HashMap;
use std::error::Error;
use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use clap::Parser;
use serde_json::{json, Value};
use tokio::time::sleep;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

/// Command-line arguments for the mock upstream.
#[derive(Parser, Debug)]
#[command(author, version, about = "Mock search and completion backend for local testing")]
struct Cli {
    /// Address to bind the mock backend on
    #[arg(short, long, env = "MOCK_BIND_ADDR", default_value = "127.0.0.1:3001")]
    bind_addr: SocketAddr,

    /// Simulated search latency in milliseconds
    #[arg(long, env = "MOCK_LATENCY_MS", default_value_t = 300)]
    latency_ms: u64,
}

#[derive(Clone)]
struct MockState {
    /// Base URL of this server, embedded into fabricated article links.
    base_url: String,
    latency: Duration,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let args = Cli::parse();
    let state = MockState {
        base_url: format!("http://{}", args.bind_addr),
        latency: Duration::from_millis(args.latency_ms),
    };

    let app = Router::new()
        .route("/search", get(search))
        .route("/articles/:slug", get(article_page))
        .route("/v1/chat/completions", post(completions))
        .fallback(not_found)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(args.bind_addr).await?;
    info!(addr = %args.bind_addr, "Mock upstream listening");
    info!("  GET  /search?q=...");
    info!("  GET  /articles/{{slug}}");
    info!("  POST /v1/chat/completions");
    axum::serve(listener, app).await?;
    Ok(())
}

#[instrument(level = "info", skip_all)]
async fn search(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let Some(query) = params.get("q") else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing query parameter ?q=" })),
        )
            .into_response();
    };

    info!(query = %query, "Serving mock search results");
    sleep(state.latency).await;
    Json(mock_news_results(&state.base_url, query)).into_response()
}

/// Two news results in the shape of a real search API reply, links
/// pointing back at this server's article pages.
fn mock_news_results(base_url: &str, query: &str) -> Value {
    let slug = urlencoding::encode(query).into_owned();
    let now = chrono::Utc::now();
    json!({
        "type": "news",
        "query": {
            "original": query,
            "spellcheck_off": false,
            "show_strict_warning": false
        },
        "results": [
            {
                "type": "news_result",
                "url": format!("{base_url}/articles/breaking-news-about-{slug}"),
                "title": format!("{query} makes headlines worldwide"),
                "description": format!("A sudden surge of interest in {query} is reshaping the conversation."),
                "age": "2 hours ago",
                "page_age": "7200",
                "page_fetched": now.to_rfc3339(),
                "breaking": true,
                "thumbnail": {
                    "src": format!("{base_url}/thumbnails/{slug}.jpg")
                },
                "meta_url": {
                    "scheme": "http",
                    "hostname": "127.0.0.1",
                    "path": format!("/articles/breaking-news-about-{slug}")
                },
                "extra_snippets": [
                    format!("Why {query} matters more than ever"),
                    format!("What experts say about {query}")
                ]
            },
            {
                "type": "news_result",
                "url": format!("{base_url}/articles/analysts-weigh-in-on-{slug}"),
                "title": format!("Top analysts weigh in on {query}"),
                "description": format!("Experts disagree about what {query} means for the months ahead."),
                "age": "1 day ago",
                "page_age": "86400",
                "page_fetched": (now - chrono::Duration::days(1)).to_rfc3339(),
                "breaking": false,
                "thumbnail": {
                    "src": format!("{base_url}/thumbnails/{slug}-analysis.jpg")
                },
                "meta_url": {
                    "scheme": "http",
                    "hostname": "127.0.0.1",
                    "path": format!("/articles/analysts-weigh-in-on-{slug}")
                }
            }
        ]
    })
}

/// Serves a fabricated article page long enough for the extractor to
/// find real content.
#[instrument(level = "debug", skip_all, fields(slug = %slug))]
async fn article_page(Path(slug): Path<String>) -> Html<String> {
    let headline = slug.replace('-', " ");
    Html(format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><title>{headline}</title></head>\n\
         <body>\n\
         <nav>Mock newsroom | Home | World | Business</nav>\n\
         <article>\n\
         <h1>{headline}</h1>\n\
         <p>This locally served story stands in for a real article about {headline}. \
         It exists so the report pipeline can exercise retrieval and readable-text \
         extraction without reaching the public internet.</p>\n\
         <p>Reporters describe steady developments through the morning, cautious \
         optimism among officials, and a news cycle showing no sign of slowing down. \
         Further updates are expected as the situation develops.</p>\n\
         </article>\n\
         <footer>Mock newsroom footer</footer>\n\
         </body>\n\
         </html>"
    ))
}

#[instrument(level = "info", skip_all)]
async fn completions(
    State(state): State<MockState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Ok(Json(payload)) = payload else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Request body must be JSON" })),
        )
            .into_response();
    };

    let Some(messages) = payload.get("messages").and_then(Value::as_array) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing 'messages' array in request body" })),
        )
            .into_response();
    };

    let user_content = messages
        .iter()
        .find(|message| message.get("role").and_then(Value::as_str) == Some("user"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .unwrap_or("No input");

    info!(prompt_chars = user_content.chars().count(), "Serving mock completion");
    sleep(state.latency / 2).await;

    let model = payload
        .get("model")
        .cloned()
        .unwrap_or_else(|| json!("mock-model"));
    Json(json!({
        "model": model,
        "created_at": chrono::Utc::now().to_rfc3339(),
        "message": {
            "role": "assistant",
            "content": format!("Mocked model response to: \"{user_content}\"")
        },
        "done": true
    }))
    .into_response()
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not Found" }))).into_response()
}

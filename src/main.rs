//! Server entrypoint: parse configuration, build the shared HTTP
//! client, serve the report endpoint.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

use ai_news_report::cli::Cli;
use ai_news_report::config::USER_AGENT;
use ai_news_report::server::{self, AppState};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!("ai_news_report starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = args.report_config();
    if let Err(reason) = config.validate() {
        error!(%reason, "Refusing to start with an unusable configuration");
        return Err(reason.into());
    }
    info!(
        search_endpoint = %config.search_endpoint,
        completion_endpoint = %config.completion_endpoint,
        model = %config.model,
        article_timeout_ms = config.article_timeout.as_millis() as u64,
        "Configuration loaded"
    );

    // One client for the whole process. No global timeout here: article
    // fetches carry their own deadline and the completion request is
    // allowed to run long.
    let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

    server::serve(args.bind_addr, AppState::new(config, client)).await?;
    Ok(())
}

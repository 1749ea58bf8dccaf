//! Minimal client for the report endpoint: request one report and print
//! it to stdout.

use std::error::Error;

use clap::Parser;
use serde_json::Value;
use tracing::{error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};
use url::Url;

use ai_news_report::handler::REPORT_ROUTE;

/// Command-line arguments for the display client.
#[derive(Parser, Debug)]
#[command(author, version, about = "Fetch one generated news report and print it")]
struct Cli {
    /// Base URL of the report server
    #[arg(short, long, env = "REPORT_SERVER", default_value = "http://127.0.0.1:3000")]
    server: Url,
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
    let url = args.server.join(REPORT_ROUTE)?;
    info!(%url, "Requesting news report");

    let response = reqwest::Client::new()
        .post(url)
        .header("Content-Type", "application/vnd.api+json")
        .send()
        .await?;
    let status = response.status();
    let payload = response.json::<Value>().await?;

    if !status.is_success() {
        let (error, details) = failure_fields(&payload);
        error!(status = status.as_u16(), error, details, "Report request failed");
        return Err(format!("report request failed with status {status}").into());
    }

    match report_content(&payload) {
        Some(report) => {
            println!("{report}");
            Ok(())
        }
        None => Err("response carried no report content".into()),
    }
}

/// Error envelope fields, with fallbacks for anything missing.
fn failure_fields(payload: &Value) -> (&str, &str) {
    (
        payload
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown"),
        payload.get("details").and_then(Value::as_str).unwrap_or(""),
    )
}

/// The report text inside a success envelope, if present.
fn report_content(payload: &Value) -> Option<&str> {
    payload
        .pointer("/data/attributes/content")
        .and_then(Value::as_str)
}

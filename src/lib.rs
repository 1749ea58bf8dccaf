//! # AI News Report
//!
//! A news report service that turns live search results into a single
//! AI-written report. One `POST` to the report endpoint searches the
//! news, scrapes every hit concurrently, and hands the readable text to
//! a chat completion API that writes the report.
//!
//! ## Features
//!
//! - Strict field-by-field validation of both upstream payloads
//! - Concurrent article fetching with a per-article deadline
//! - Graceful degradation: a dead or slow article becomes a placeholder
//!   instead of failing the report
//! - Fixed JSON response envelopes with CORS headers on every reply
//! - A bundled mock upstream so the whole loop runs offline
//!
//! ## Usage
//!
//! ```sh
//! ai_news_report --search-query "top world news"
//! ```
//!
//! ## Architecture
//!
//! One report request flows through a pipeline:
//! 1. **Search**: run the configured query against the news search API
//! 2. **Validate**: check the payload shape, reject on the first bad field
//! 3. **Fetch**: retrieve every article at once, bounded by the timeout
//! 4. **Prompt**: concatenate instruction and article texts
//! 5. **Summarize**: ask the completion API for the report and validate
//!    its reply

pub mod articles;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
pub mod models;
pub mod prompt;
pub mod schema;
pub mod search;
pub mod server;
pub mod summarize;

//! Error types shared across the report pipeline.
//!
//! Every failure that can abort a report carries enough structure to tell
//! the two upstream dependencies apart and, for schema failures, to name
//! the exact field that broke the contract. Article-level fetch failures
//! never appear here; those degrade to placeholder text inside
//! [`crate::articles`] instead of propagating.

use thiserror::Error;

/// The two remote services the pipeline depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    /// The news search API that supplies candidate articles.
    Search,
    /// The chat completion API that writes the report.
    Completion,
}

impl std::fmt::Display for Upstream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Upstream::Search => write!(f, "news search"),
            Upstream::Completion => write!(f, "completion"),
        }
    }
}

/// How a single field violated an upstream response contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// A required field was absent.
    #[error("is missing")]
    MissingField,
    /// A field was present but had the wrong JSON type.
    #[error("must be a {expected}")]
    TypeMismatch { expected: &'static str },
    /// A field did not parse as an absolute URL.
    #[error("is not a valid absolute URL")]
    MalformedUrl,
    /// A tag field held something other than its one permitted value.
    #[error("must equal {expected:?}")]
    WrongValue { expected: &'static str },
}

/// An upstream response that failed structural validation.
///
/// `field` is a JSON-path-like locator such as `results[2].url`, so log
/// lines and error bodies point at the offending element directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid response from the {upstream} API: `{field}` {violation}")]
pub struct SchemaError {
    pub upstream: Upstream,
    pub field: String,
    pub violation: Violation,
}

impl SchemaError {
    pub fn new(upstream: Upstream, field: impl Into<String>, violation: Violation) -> Self {
        Self {
            upstream,
            field: field.into(),
            violation,
        }
    }
}

/// A failure that aborts report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// An upstream replied 2xx but the payload broke its schema.
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// An upstream replied with a non-success HTTP status.
    #[error("the {upstream} API responded with status {status}")]
    UpstreamStatus { upstream: Upstream, status: u16 },
    /// The request never produced a usable HTTP response.
    #[error("request to the {upstream} API failed: {source}")]
    Transport {
        upstream: Upstream,
        #[source]
        source: reqwest::Error,
    },
}

//! Data models for validated news search results.
//!
//! This module defines the structures produced by [`crate::schema`] once a
//! raw search payload has passed validation:
//! - [`SearchResult`]: a single news hit with a parsed absolute URL
//! - [`SearchResultSet`]: the ordered collection for one search response
//!
//! Everything downstream of validation works with these types instead of
//! raw JSON, so the fetch and prompt stages never have to re-check shapes.

use serde_json::Value;
use url::Url;

/// A single validated news search result.
///
/// The required fields (`url`, `title`, `description`) are guaranteed
/// present and well-typed by validation. The rest is metadata the search
/// API may or may not send; it is preserved as-is so callers can log or
/// rank with it, but nothing in the pipeline depends on it.
///
/// # Fields
///
/// * `url` - The article link, already parsed as an absolute URL
/// * `title` - The headline as returned by the search API
/// * `description` - The search snippet for the article
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// The article link. Parsing happened during validation, so fetching
    /// this URL can never fail on address syntax.
    pub url: Url,
    /// The headline as returned by the search API.
    pub title: String,
    /// The search snippet describing the article.
    pub description: String,
    /// Human-readable age of the story, e.g. `"2 hours ago"`.
    pub age: Option<String>,
    /// Machine-readable page age, when the search API supplies one.
    pub page_age: Option<String>,
    /// Free-form thumbnail metadata, preserved untouched.
    pub thumbnail: Option<Value>,
    /// Free-form URL metadata block, preserved untouched.
    pub meta_url: Option<Value>,
}

/// The validated results of one news search, in the order the search API
/// returned them.
///
/// An empty set is legal: the pipeline still runs and the summarizer is
/// told there is nothing to work with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResultSet {
    /// The validated results, original order preserved.
    pub results: Vec<SearchResult>,
}

impl SearchResultSet {
    /// Number of validated results in the set.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the search returned no results at all.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

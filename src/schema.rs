//! Structural validation for upstream JSON payloads.
//!
//! Both remote dependencies are validated explicitly, field by field,
//! before anything downstream runs. The policy is strict on required
//! fields and permissive on extras:
//! - a missing or mistyped required field rejects the whole payload
//! - unknown fields are ignored
//! - the `type` tag on a search result is checked only when present
//!
//! Rejections surface as [`SchemaError`] values naming the offending
//! field with a `results[i].field` style locator.

use serde_json::{Map, Value};
use url::Url;

use crate::error::{SchemaError, Upstream, Violation};
use crate::models::{SearchResult, SearchResultSet};

/// The only `type` tag accepted on a search result, when one is present.
const NEWS_RESULT_TAG: &str = "news_result";

/// Validates a raw news search payload into a [`SearchResultSet`].
///
/// The payload must be an object carrying a `results` array. Every entry
/// needs a string `url` that parses as an absolute URL plus string
/// `title` and `description` fields. Optional metadata (`age`,
/// `page_age`, `thumbnail`, `meta_url`) is carried through when present
/// and well-typed, and ignored otherwise.
///
/// # Arguments
///
/// * `payload` - The decoded JSON body of the search response
///
/// # Returns
///
/// The validated set, preserving the order of the `results` array. An
/// empty `results` array validates to an empty set.
///
/// # Errors
///
/// Returns a [`SchemaError`] pointing at the first offending field. One
/// bad result rejects the entire payload.
pub fn validate_search_results(payload: &Value) -> Result<SearchResultSet, SchemaError> {
    let results = match payload.get("results") {
        None => {
            return Err(SchemaError::new(
                Upstream::Search,
                "results",
                Violation::MissingField,
            ));
        }
        Some(value) => value.as_array().ok_or_else(|| {
            SchemaError::new(
                Upstream::Search,
                "results",
                Violation::TypeMismatch { expected: "array" },
            )
        })?,
    };

    let mut validated = Vec::with_capacity(results.len());
    for (index, item) in results.iter().enumerate() {
        validated.push(validate_search_result(item, index)?);
    }

    Ok(SearchResultSet { results: validated })
}

/// Validates a chat completion reply down to the report text inside it.
///
/// The payload must be an object with a `message` object carrying a
/// string `content` field. Everything else the completion API sends
/// (model name, token counts, timing) is ignored.
///
/// # Errors
///
/// Returns a [`SchemaError`] naming the missing or mistyped field.
pub fn validate_completion_reply(payload: &Value) -> Result<String, SchemaError> {
    let message = match payload.get("message") {
        None => {
            return Err(SchemaError::new(
                Upstream::Completion,
                "message",
                Violation::MissingField,
            ));
        }
        Some(value) => value.as_object().ok_or_else(|| {
            SchemaError::new(
                Upstream::Completion,
                "message",
                Violation::TypeMismatch { expected: "object" },
            )
        })?,
    };

    match message.get("content") {
        None => Err(SchemaError::new(
            Upstream::Completion,
            "message.content",
            Violation::MissingField,
        )),
        Some(content) => content
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                SchemaError::new(
                    Upstream::Completion,
                    "message.content",
                    Violation::TypeMismatch { expected: "string" },
                )
            }),
    }
}

fn validate_search_result(item: &Value, index: usize) -> Result<SearchResult, SchemaError> {
    let object = item.as_object().ok_or_else(|| {
        SchemaError::new(
            Upstream::Search,
            format!("results[{index}]"),
            Violation::TypeMismatch { expected: "object" },
        )
    })?;

    // The tag is optional, but when present it has to be the news tag.
    if let Some(tag) = object.get("type") {
        let tag = tag.as_str().ok_or_else(|| {
            SchemaError::new(
                Upstream::Search,
                format!("results[{index}].type"),
                Violation::TypeMismatch { expected: "string" },
            )
        })?;
        if tag != NEWS_RESULT_TAG {
            return Err(SchemaError::new(
                Upstream::Search,
                format!("results[{index}].type"),
                Violation::WrongValue {
                    expected: NEWS_RESULT_TAG,
                },
            ));
        }
    }

    let raw_url = required_str(object, index, "url")?;
    let url = Url::parse(raw_url).map_err(|_| {
        SchemaError::new(
            Upstream::Search,
            format!("results[{index}].url"),
            Violation::MalformedUrl,
        )
    })?;

    Ok(SearchResult {
        url,
        title: required_str(object, index, "title")?.to_string(),
        description: required_str(object, index, "description")?.to_string(),
        age: optional_str(object, "age"),
        page_age: optional_str(object, "page_age"),
        thumbnail: object.get("thumbnail").cloned(),
        meta_url: object.get("meta_url").cloned(),
    })
}

fn required_str<'a>(
    object: &'a Map<String, Value>,
    index: usize,
    field: &str,
) -> Result<&'a str, SchemaError> {
    match object.get(field) {
        None => Err(SchemaError::new(
            Upstream::Search,
            format!("results[{index}].{field}"),
            Violation::MissingField,
        )),
        Some(value) => value.as_str().ok_or_else(|| {
            SchemaError::new(
                Upstream::Search,
                format!("results[{index}].{field}"),
                Violation::TypeMismatch { expected: "string" },
            )
        }),
    }
}

/// Optional metadata never rejects a payload; a wrong type just drops it.
fn optional_str(object: &Map<String, Value>, field: &str) -> Option<String> {
    object.get(field).and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn brave_style_payload() -> Value {
        json!({
            "type": "news",
            "query": { "original": "world news" },
            "results": [
                {
                    "type": "news_result",
                    "url": "https://news.example.com/articles/summit",
                    "title": "Leaders meet at summit",
                    "description": "A gathering of world leaders.",
                    "age": "2 hours ago",
                    "page_age": "7200",
                    "breaking": true,
                    "thumbnail": { "src": "https://news.example.com/thumb.jpg" },
                    "meta_url": { "hostname": "news.example.com" }
                },
                {
                    "url": "https://other.example.org/story",
                    "title": "Markets react",
                    "description": "Analysts weigh in.",
                    "extra_snippets": ["snippet one"]
                }
            ]
        })
    }

    #[test]
    fn test_accepts_well_formed_payload() {
        let set = validate_search_results(&brave_style_payload()).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.results[0].title, "Leaders meet at summit");
        assert_eq!(set.results[0].url.host_str(), Some("news.example.com"));
        assert_eq!(set.results[0].age.as_deref(), Some("2 hours ago"));
        assert!(set.results[0].thumbnail.is_some());
        // Second result has no optional metadata and no type tag.
        assert_eq!(set.results[1].age, None);
        assert_eq!(set.results[1].thumbnail, None);
    }

    #[test]
    fn test_accepts_empty_results_array() {
        let set = validate_search_results(&json!({ "results": [] })).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_rejects_missing_results() {
        let err = validate_search_results(&json!({ "type": "news" })).unwrap_err();
        assert_eq!(err.field, "results");
        assert_eq!(err.violation, Violation::MissingField);
    }

    #[test]
    fn test_rejects_results_of_wrong_type() {
        let err = validate_search_results(&json!({ "results": "nope" })).unwrap_err();
        assert_eq!(err.field, "results");
        assert_eq!(
            err.violation,
            Violation::TypeMismatch { expected: "array" }
        );
    }

    #[test]
    fn test_rejects_missing_title_with_indexed_field() {
        let payload = json!({
            "results": [{
                "url": "https://example.com/a",
                "description": "no title here"
            }]
        });
        let err = validate_search_results(&payload).unwrap_err();
        assert_eq!(err.field, "results[0].title");
        assert_eq!(err.violation, Violation::MissingField);
    }

    #[test]
    fn test_rejects_relative_url() {
        let payload = json!({
            "results": [{
                "url": "/articles/local-path",
                "title": "t",
                "description": "d"
            }]
        });
        let err = validate_search_results(&payload).unwrap_err();
        assert_eq!(err.field, "results[0].url");
        assert_eq!(err.violation, Violation::MalformedUrl);
    }

    #[test]
    fn test_rejects_foreign_type_tag() {
        let payload = json!({
            "results": [
                {
                    "type": "news_result",
                    "url": "https://example.com/a",
                    "title": "t",
                    "description": "d"
                },
                {
                    "type": "web_result",
                    "url": "https://example.com/b",
                    "title": "t",
                    "description": "d"
                }
            ]
        });
        let err = validate_search_results(&payload).unwrap_err();
        assert_eq!(err.field, "results[1].type");
        assert_eq!(
            err.violation,
            Violation::WrongValue { expected: "news_result" }
        );
    }

    #[test]
    fn test_rejects_non_object_result_entry() {
        let payload = json!({ "results": [42] });
        let err = validate_search_results(&payload).unwrap_err();
        assert_eq!(err.field, "results[0]");
        assert_eq!(
            err.violation,
            Violation::TypeMismatch { expected: "object" }
        );
    }

    #[test]
    fn test_mistyped_optional_metadata_is_dropped() {
        let payload = json!({
            "results": [{
                "url": "https://example.com/a",
                "title": "t",
                "description": "d",
                "age": 7200
            }]
        });
        let set = validate_search_results(&payload).unwrap();
        assert_eq!(set.results[0].age, None);
    }

    #[test]
    fn test_completion_reply_extracts_content() {
        let payload = json!({
            "model": "llama3.2",
            "created_at": "2025-05-06T20:30:00Z",
            "message": { "role": "assistant", "content": "The report text." },
            "done": true
        });
        let content = validate_completion_reply(&payload).unwrap();
        assert_eq!(content, "The report text.");
    }

    #[test]
    fn test_completion_reply_missing_message() {
        let err = validate_completion_reply(&json!({ "done": true })).unwrap_err();
        assert_eq!(err.field, "message");
        assert_eq!(err.violation, Violation::MissingField);
        assert!(err.to_string().contains("completion API"));
    }

    #[test]
    fn test_completion_reply_message_not_object() {
        let err = validate_completion_reply(&json!({ "message": "hi" })).unwrap_err();
        assert_eq!(err.field, "message");
        assert_eq!(
            err.violation,
            Violation::TypeMismatch { expected: "object" }
        );
    }

    #[test]
    fn test_completion_reply_content_wrong_type() {
        let err =
            validate_completion_reply(&json!({ "message": { "content": 12 } })).unwrap_err();
        assert_eq!(err.field, "message.content");
        assert_eq!(
            err.violation,
            Violation::TypeMismatch { expected: "string" }
        );
    }

    #[test]
    fn test_completion_reply_empty_content_is_legal() {
        let content = validate_completion_reply(&json!({ "message": { "content": "" } })).unwrap();
        assert!(content.is_empty());
    }
}

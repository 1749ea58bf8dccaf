//! Readable-text extraction from article HTML.
//!
//! A fetched page goes through a fixed selector cascade: the first
//! container that yields a substantial amount of text wins, and when no
//! container does, the whole `<body>` text is used. Script and style
//! blocks are stripped before parsing because their contents would
//! otherwise leak into the text nodes.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

/// Containers tried in order when hunting for the main article text.
static CONTENT_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    [
        "article",
        "main",
        "[role='main']",
        ".article-content",
        ".post-content",
        ".entry-content",
        ".article-body",
        ".story-body",
        "#content",
    ]
    .iter()
    .map(|selector| Selector::parse(selector).unwrap())
    .collect()
});

static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("body").unwrap());

static SCRIPT_BLOCKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap());

static STYLE_BLOCKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").unwrap());

/// A cascade hit below this many characters is treated as boilerplate
/// and the hunt moves on.
const SUBSTANTIAL_LEN: usize = 200;

/// Extracts the readable article text from an HTML document.
///
/// Returns `None` only when the document has no `<body>` at all. A page
/// whose body is empty still extracts, to an empty string; the caller
/// decides what to do with that.
pub fn readable_text(html: &str) -> Option<String> {
    let stripped = strip_noise_blocks(html);
    let document = Html::parse_document(&stripped);

    for selector in CONTENT_SELECTORS.iter() {
        if let Some(element) = document.select(selector).next() {
            let text = collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "));
            if text.len() >= SUBSTANTIAL_LEN {
                return Some(text);
            }
        }
    }

    document
        .select(&BODY_SELECTOR)
        .next()
        .map(|body| collapse_whitespace(&body.text().collect::<Vec<_>>().join(" ")))
}

fn strip_noise_blocks(html: &str) -> String {
    let without_scripts = SCRIPT_BLOCKS.replace_all(html, " ");
    STYLE_BLOCKS.replace_all(&without_scripts, " ").into_owned()
}

/// Collapses runs of whitespace, including the newlines and indentation
/// that survive HTML parsing, into single spaces.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

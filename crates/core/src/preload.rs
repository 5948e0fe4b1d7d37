//! The `window._preloads` structured-data blob.
//!
//! Substack pages embed the server's original representation of the post in
//! a page-global preload object. Two shapes are known: the reader app nests
//! the post at `feedData.initialPost.post` (with the publication alongside
//! it), and classic publication pages put it directly at `post` (publication
//! at `pub`). This is the most reliable extraction source when present, so
//! both detection and extraction try it before touching the DOM. Absence or
//! a malformed blob is a normal negative result, never a fault.

use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;

use crate::article::{ArticleData, DetectionResult};

/// One byline entry in the preload blob.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PreloadByline {
    pub name: Option<String>,
}

/// The post object as the preload blob carries it.
///
/// Every field is optional: partially populated blobs are common while a
/// page is still loading, and a missing field maps to empty downstream.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PreloadPost {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub post_date: Option<String>,
    #[serde(rename = "publishedBylines")]
    pub published_bylines: Vec<PreloadByline>,
    pub body_html: Option<String>,
    pub cover_image: Option<String>,
    pub canonical_url: Option<String>,
}

impl PreloadPost {
    fn body_html(&self) -> &str {
        self.body_html.as_deref().unwrap_or_default()
    }

    fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }
}

/// The publication object accompanying a post.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PreloadPublication {
    pub name: Option<String>,
}

/// A qualifying post located in the blob, with its publication if present.
#[derive(Debug, Clone)]
pub struct PreloadArticle {
    pub post: PreloadPost,
    pub publication: Option<PreloadPublication>,
}

impl PreloadArticle {
    /// Maps the preload fields into an [`ArticleData`], defaulting missing
    /// fields to empty and preserving byline order.
    pub fn into_article_data(self, page_url: Option<&url::Url>) -> ArticleData {
        let canonical_url = self
            .post
            .canonical_url
            .filter(|u| !u.is_empty())
            .or_else(|| page_url.map(|u| u.to_string()))
            .unwrap_or_default();

        ArticleData {
            title: self.post.title.unwrap_or_default(),
            subtitle: self.post.subtitle.unwrap_or_default(),
            date: self.post.post_date.unwrap_or_default(),
            bylines: self
                .post
                .published_bylines
                .into_iter()
                .filter_map(|b| b.name)
                .collect(),
            publication: self.publication.and_then(|p| p.name).unwrap_or_default(),
            body_html: self.post.body_html.unwrap_or_default(),
            cover_image: self.post.cover_image.unwrap_or_default(),
            canonical_url,
        }
    }
}

/// The two known blob shapes, in reliability order.
const SHAPES: &[(&str, &str)] = &[
    ("/feedData/initialPost/post", "/feedData/initialPost/publication"),
    ("/post", "/pub"),
];

fn post_at(preloads: &Value, pointer: &str) -> Option<PreloadPost> {
    let value = preloads.pointer(pointer)?;
    serde_json::from_value(value.clone()).ok()
}

/// Detection against the blob: a shape qualifies only when both the body
/// content and the title are non-empty. Returns `None` when no shape
/// qualifies (the caller falls through to DOM detection).
pub fn detect(preloads: Option<&Value>) -> Option<DetectionResult> {
    let preloads = preloads?;
    for (post_ptr, _) in SHAPES {
        if let Some(post) = post_at(preloads, post_ptr)
            && !post.body_html().is_empty()
            && !post.title().is_empty()
        {
            return Some(DetectionResult::article(post.title()));
        }
    }
    None
}

/// Extraction against the blob: a shape qualifies on non-empty body content
/// alone (a missing title maps to empty rather than disqualifying).
pub fn locate(preloads: Option<&Value>) -> Option<PreloadArticle> {
    let preloads = preloads?;
    for (post_ptr, pub_ptr) in SHAPES {
        if let Some(post) = post_at(preloads, post_ptr)
            && !post.body_html().is_empty()
        {
            let publication = preloads
                .pointer(pub_ptr)
                .and_then(|v| serde_json::from_value(v.clone()).ok());
            return Some(PreloadArticle { post, publication });
        }
    }
    None
}

/// The post date from any shape, regardless of body content.
///
/// Used as the last date fallback during DOM extraction, when the blob was
/// present but lacked a usable body.
pub fn partial_date(preloads: Option<&Value>) -> Option<String> {
    let preloads = preloads?;
    // Publication shape first, matching the original fallback order.
    for ptr in ["/post/post_date", "/feedData/initialPost/post/post_date"] {
        if let Some(date) = preloads.pointer(ptr).and_then(Value::as_str)
            && !date.is_empty()
        {
            return Some(date.to_string());
        }
    }
    None
}

/// Scans a document's inline scripts for the `window._preloads` assignment.
///
/// Handles both the `JSON.parse("...")` form (the payload is a JS string
/// literal, which is itself valid JSON string syntax) and a direct object
/// literal. Anything unparseable is treated as no blob.
pub fn scan_document(html: &Html) -> Option<Value> {
    let selector = Selector::parse("script").ok()?;
    let assign = regex::Regex::new(r"window\._preloads\s*=\s*").ok()?;

    for script in html.select(&selector) {
        let text: String = script.text().collect();
        if let Some(m) = assign.find(&text)
            && let Some(value) = parse_assignment(&text[m.end()..])
        {
            return Some(value);
        }
    }
    None
}

fn parse_assignment(tail: &str) -> Option<Value> {
    let tail = tail.trim_start();

    if let Some(rest) = tail.strip_prefix("JSON.parse(") {
        let literal = regex::Regex::new(r#"^\s*("(?:[^"\\]|\\.)*")"#)
            .ok()?
            .captures(rest)?
            .get(1)?
            .as_str()
            .to_string();
        let inner: String = serde_json::from_str(&literal).ok()?;
        return serde_json::from_str(&inner).ok();
    }

    // Direct object literal; parse the leading JSON value and ignore
    // whatever script text follows it.
    serde_json::Deserializer::from_str(tail)
        .into_iter::<Value>()
        .next()?
        .ok()
}

//! Article transfer types.
//!
//! This module defines [`ArticleData`], the structured representation of an
//! extracted article, and [`DetectionResult`], the verdict of a single
//! detection attempt. `ArticleData` is the object that crosses the hand-off
//! channel between the extraction context and the rendering surface, so it
//! serializes with the camelCase field names used on the wire.

use serde::{Deserialize, Serialize};

/// The structured content of one extracted article.
///
/// Built once per extract action and consumed exactly once by the renderer.
/// Every field defaults to empty rather than being optional: downstream code
/// treats an empty string as "unknown", and only `body_html` emptiness is
/// significant (it signals paywalled content).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleData {
    /// Article title. Required for a valid article.
    pub title: String,

    /// Subtitle, or empty if the article has none.
    pub subtitle: String,

    /// ISO-ish publication date string, empty if unknown.
    pub date: String,

    /// Author display names in page order.
    pub bylines: Vec<String>,

    /// Publisher display name, empty if unknown.
    pub publication: String,

    /// Raw, not-yet-sanitized body fragment. Empty means the content was
    /// inaccessible (paywall), and rendering must not proceed.
    pub body_html: String,

    /// Cover image URL, or empty. Only the structured-data extraction path
    /// can supply this.
    pub cover_image: String,

    /// Canonical article URL. Always populated; falls back to the page's
    /// own address when no canonical link exists.
    pub canonical_url: String,
}

impl ArticleData {
    /// Whether the article carries body content.
    ///
    /// An article without body content must not reach the renderer; the
    /// orchestrator reports it as the paywall case instead.
    pub fn has_body(&self) -> bool {
        !self.body_html.trim().is_empty()
    }
}

/// The verdict of a single detection attempt.
///
/// Produced fresh per attempt and never persisted. `title` is populated only
/// when `is_article` is true.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetectionResult {
    /// Whether the page is an article of the target platform.
    pub is_article: bool,

    /// The detected article title, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl DetectionResult {
    /// A positive verdict carrying the detected title.
    pub fn article(title: impl Into<String>) -> Self {
        Self { is_article: true, title: Some(title.into()) }
    }

    /// The negative verdict. Also the fallback for any internal fault
    /// during detection.
    pub fn not_article() -> Self {
        Self::default()
    }
}

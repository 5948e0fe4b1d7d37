//! Article detection.
//!
//! Decides whether a page snapshot is a Substack article. Detection is a
//! total function: any malformed or partial page state degrades to the
//! negative verdict, never a fault. Strategies run in reliability order and
//! the first hit wins: the preload blob, then the server-rendered page
//! template, then the client-rendered reader app.

use crate::article::DetectionResult;
use crate::page::Page;
use crate::selectors::{self, first_match_within, trimmed_text};
use crate::preload;

/// Tunables for the DOM detection strategies.
#[derive(Debug, Clone)]
pub struct DetectOptions {
    /// Minimum trimmed text length for the generic reader-content fallback
    /// to count as a real article body rather than a stub.
    pub reader_text_threshold: usize,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self { reader_text_threshold: 200 }
    }
}

/// Detects whether the page is a Substack article.
///
/// Never fails; returns the negative verdict when no strategy matches.
pub fn detect(page: &Page, options: &DetectOptions) -> DetectionResult {
    // Strategy 1: the preload blob (full page loads).
    if let Some(result) = preload::detect(page.preloads()) {
        return result;
    }

    // Strategy 2: the server-rendered publication template. Both a heading
    // and a body container must be present.
    if let Some(title_el) = page.first_match(selectors::STATIC_TITLE)
        && page.first_match(selectors::STATIC_BODY).is_some()
    {
        return DetectionResult::article(trimmed_text(title_el));
    }

    // Strategy 3: the reader app. Its content is client-rendered, so the
    // selectors are broader and a generic container only counts when it
    // holds enough text.
    if let Some(root) = page.first_match(selectors::READER_ROOT)
        && let Some(title_el) = first_match_within(root, selectors::READER_TITLE)
    {
        if first_match_within(root, selectors::READER_BODY).is_some() {
            return DetectionResult::article(trimmed_text(title_el));
        }

        if let Some(content) = first_match_within(root, selectors::READER_CONTENT)
            && content.text().collect::<String>().trim().len() > options.reader_text_threshold
        {
            return DetectionResult::article(trimmed_text(title_el));
        }
    }

    DetectionResult::not_article()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn detect_html(html: &str) -> DetectionResult {
        detect(&Page::parse(html), &DetectOptions::default())
    }

    #[test]
    fn test_preload_strategy_wins() {
        let page = Page::parse(
            r#"<html><body><h1 class="post-title">DOM Title</h1>
            <div class="body markup"><p>b</p></div></body></html>"#,
        )
        .with_preloads(json!({"post": {"title": "Blob Title", "body_html": "<p>b</p>"}}));

        let result = detect(&page, &DetectOptions::default());
        assert_eq!(result.title.as_deref(), Some("Blob Title"));
    }

    #[test]
    fn test_static_dom_strategy() {
        let result = detect_html(
            r#"<html><body>
                <h1 class="post-title">  Static Title  </h1>
                <div class="available-content"><div class="body markup"><p>text</p></div></div>
            </body></html>"#,
        );
        assert!(result.is_article);
        assert_eq!(result.title.as_deref(), Some("Static Title"));
    }

    #[test]
    fn test_static_dom_requires_both_title_and_body() {
        let title_only = detect_html(r#"<html><body><h1 class="post-title">T</h1></body></html>"#);
        assert!(!title_only.is_article);

        let body_only = detect_html(r#"<html><body><div class="body markup"><p>b</p></div></body></html>"#);
        assert!(!body_only.is_article);
    }

    #[test]
    fn test_reader_strategy_with_body() {
        let result = detect_html(
            r#"<html><body><div class="reader-nav-root">
                <h1 data-testid="post-title">Reader Title</h1>
                <div class="markup"><p>short</p></div>
            </div></body></html>"#,
        );
        assert!(result.is_article);
        assert_eq!(result.title.as_deref(), Some("Reader Title"));
    }

    #[test]
    fn test_reader_generic_fallback_needs_substantial_text() {
        let long_text = "word ".repeat(60);
        let html = format!(
            r#"<html><body><div class="reader2-font-base">
                <h1 data-testid="t">Reader Title</h1>
                <article><p>{}</p></article>
            </div></body></html>"#,
            long_text
        );
        assert!(detect_html(&html).is_article);

        let stub = r#"<html><body><div class="reader2-font-base">
            <h1 data-testid="t">Reader Title</h1>
            <article><p>stub</p></article>
        </div></body></html>"#;
        assert!(!detect_html(stub).is_article);
    }

    #[test]
    fn test_reader_threshold_is_configurable() {
        let html = r#"<html><body><div class="reader-nav-root">
            <h1 data-testid="t">Reader Title</h1>
            <article><p>a couple dozen characters of text</p></article>
        </div></body></html>"#;

        let page = Page::parse(html);
        assert!(!detect(&page, &DetectOptions::default()).is_article);
        assert!(detect(&page, &DetectOptions { reader_text_threshold: 10 }).is_article);
    }

    #[test]
    fn test_non_article_pages() {
        assert!(!detect_html("<html><body><p>nothing</p></body></html>").is_article);
        assert!(!detect_html("").is_article);
        assert!(!detect_html("<not even html").is_article);
    }

    #[test]
    fn test_malformed_preloads_fall_through_to_dom() {
        let page = Page::parse(
            r#"<html><body>
                <h1 class="post-title">DOM Title</h1>
                <div class="body markup"><p>b</p></div>
            </body></html>"#,
        )
        .with_preloads(json!({"post": "not an object"}));

        let result = detect(&page, &DetectOptions::default());
        assert!(result.is_article);
        assert_eq!(result.title.as_deref(), Some("DOM Title"));
    }
}

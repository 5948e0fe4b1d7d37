//! Article extraction.
//!
//! Produces the full [`ArticleData`] for a page that detection (or the
//! user) believes is an article. Like detection, extraction is total: it
//! returns `None` when no body container can be located by any strategy,
//! and never a partial result. The preload blob is the preferred source;
//! DOM scraping is the fallback of last resort, field by field.

use scraper::ElementRef;

use crate::article::ArticleData;
use crate::page::Page;
use crate::preload;
use crate::selectors::{self, first_match_within, trimmed_text};

/// The literal author value Substack emits when no real author is set.
const PLATFORM_AUTHOR_SENTINEL: &str = "Substack";

/// Extracts the article's structured content.
///
/// Returns `None` when neither the preload blob nor any DOM selector
/// cascade locates body content. The page itself is never mutated; the
/// body fragment is read out of the snapshot's own parse tree.
pub fn extract(page: &Page) -> Option<ArticleData> {
    // Strategy 1: the preload blob, the cleanest structured source.
    if let Some(found) = preload::locate(page.preloads()) {
        return Some(found.into_article_data(page.url()));
    }

    // Strategy 2: DOM scraping.
    let body_el = find_body(page)?;
    let body_html = body_el.inner_html();

    let title = page
        .first_match(selectors::STATIC_TITLE)
        .or_else(|| page.first_match(selectors::EXTRACT_TITLE_FALLBACK))
        .map(trimmed_text)
        .filter(|t| !t.is_empty())
        .or_else(|| page.meta_content("og:title"))
        .or_else(|| page.document_title())
        .unwrap_or_default();

    let subtitle = page
        .first_match(selectors::SUBTITLE)
        .map(trimmed_text)
        .unwrap_or_default();

    let bylines = extract_bylines(page);
    let date = extract_date(page);

    let publication = page
        .first_match(selectors::PUBLICATION_NAME)
        .map(trimmed_text)
        .filter(|p| !p.is_empty())
        .or_else(|| page.meta_content("og:site_name"))
        .unwrap_or_default();

    let canonical_url = page.canonical_url().unwrap_or_default();

    Some(ArticleData {
        title,
        subtitle,
        date,
        bylines,
        publication,
        body_html,
        // Only the preload path knows the cover image.
        cover_image: String::new(),
        canonical_url,
    })
}

/// Locates the body container: static publication selectors first, then the
/// reader cascades scoped to the reader root.
fn find_body<'a>(page: &'a Page) -> Option<ElementRef<'a>> {
    if let Some(el) = page.first_match(selectors::STATIC_BODY) {
        return Some(el);
    }

    let root = page.first_match(selectors::READER_ROOT)?;
    first_match_within(root, selectors::READER_BODY)
        .or_else(|| first_match_within(root, selectors::READER_CONTENT))
}

/// The author meta tag, unless it carries the platform sentinel; otherwise
/// an author-profile link from the byline area.
fn extract_bylines(page: &Page) -> Vec<String> {
    if let Some(author) = page.meta_content("author")
        && !author.is_empty()
        && author != PLATFORM_AUTHOR_SENTINEL
    {
        return vec![author];
    }

    if let Some(link) = page.first_match(selectors::BYLINE_LINK) {
        let name = trimmed_text(link);
        if !name.is_empty() {
            return vec![name];
        }
    }

    Vec::new()
}

/// `time[datetime]`, then the published-time meta tag, then the preload
/// blob's date if the blob was present but lacked a usable body.
fn extract_date(page: &Page) -> String {
    if let Some(el) = page.first_match(&["time[datetime]"])
        && let Some(datetime) = el.value().attr("datetime")
        && !datetime.is_empty()
    {
        return datetime.to_string();
    }

    if let Some(date) = page.meta_content("article:published_time") {
        return date;
    }

    preload::partial_date(page.preloads()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const STATIC_PAGE: &str = r#"
        <!DOCTYPE html>
        <html>
        <head>
            <title>Doc Title</title>
            <meta name="author" content="Jane Writer">
            <meta property="og:site_name" content="OG Letter">
            <link rel="canonical" href="https://example.substack.com/p/static">
        </head>
        <body>
            <div class="post-header">
                <h1 class="post-title">  Static Title  </h1>
                <h3 class="subtitle">A deck</h3>
            </div>
            <time datetime="2024-01-15T10:30:00Z">Jan 15</time>
            <div class="available-content">
                <div class="body markup"><p>First paragraph.</p><p>Second.</p></div>
            </div>
        </body>
        </html>
    "#;

    #[test]
    fn test_preload_path_takes_precedence() {
        let page = Page::parse(STATIC_PAGE).with_preloads(json!({
            "post": {"title": "Blob Title", "body_html": "<p>blob body</p>"}
        }));

        let data = extract(&page).unwrap();
        assert_eq!(data.title, "Blob Title");
        assert_eq!(data.body_html, "<p>blob body</p>");
    }

    #[test]
    fn test_dom_extraction_full_page() {
        let data = extract(&Page::parse(STATIC_PAGE)).unwrap();

        assert_eq!(data.title, "Static Title");
        assert_eq!(data.subtitle, "A deck");
        assert_eq!(data.bylines, vec!["Jane Writer".to_string()]);
        assert_eq!(data.date, "2024-01-15T10:30:00Z");
        assert_eq!(data.publication, "OG Letter");
        assert_eq!(data.body_html, "<p>First paragraph.</p><p>Second.</p>");
        assert!(data.cover_image.is_empty());
        assert_eq!(data.canonical_url, "https://example.substack.com/p/static");
    }

    #[test]
    fn test_extraction_fails_without_body() {
        assert!(extract(&Page::parse("<html><body><h1 class=\"post-title\">T</h1></body></html>")).is_none());
        assert!(extract(&Page::parse("")).is_none());
    }

    #[test]
    fn test_preload_without_body_falls_back_to_dom() {
        let page = Page::parse(STATIC_PAGE).with_preloads(json!({
            "post": {"title": "Blob Title", "post_date": "2023-12-01"}
        }));

        let data = extract(&page).unwrap();
        assert_eq!(data.title, "Static Title");
        // time[datetime] still wins over the partial blob date.
        assert_eq!(data.date, "2024-01-15T10:30:00Z");
    }

    #[test]
    fn test_partial_preload_date_fallback() {
        let html = r#"<html><body>
            <h1 class="post-title">T</h1>
            <div class="body markup"><p>b</p></div>
        </body></html>"#;
        let page = Page::parse(html).with_preloads(json!({"post": {"post_date": "2023-12-01"}}));

        let data = extract(&page).unwrap();
        assert_eq!(data.date, "2023-12-01");
    }

    #[test]
    fn test_platform_author_sentinel_is_ignored() {
        let html = r#"<html><head><meta name="author" content="Substack"></head><body>
            <div class="byline-wrapper"><a href="/@realauthor">Real Author</a></div>
            <div class="body markup"><p>b</p></div>
        </body></html>"#;

        let data = extract(&Page::parse(html)).unwrap();
        assert_eq!(data.bylines, vec!["Real Author".to_string()]);
    }

    #[test]
    fn test_no_author_found_means_empty_bylines() {
        let html = r#"<html><head><meta name="author" content="Substack"></head><body>
            <div class="body markup"><p>b</p></div>
        </body></html>"#;

        let data = extract(&Page::parse(html)).unwrap();
        assert!(data.bylines.is_empty());
    }

    #[test]
    fn test_title_falls_back_to_og_then_document_title() {
        let html = r#"<html><head><title>Doc Title</title>
            <meta property="og:title" content="OG Title"></head><body>
            <div class="body markup"><p>b</p></div>
        </body></html>"#;
        assert_eq!(extract(&Page::parse(html)).unwrap().title, "OG Title");

        let html = r#"<html><head><title>Doc Title</title></head><body>
            <div class="body markup"><p>b</p></div>
        </body></html>"#;
        assert_eq!(extract(&Page::parse(html)).unwrap().title, "Doc Title");
    }

    #[test]
    fn test_reader_body_fallback() {
        let html = r#"<html><body><div class="reader-nav-root">
            <h1 data-testid="t">Reader Title</h1>
            <div class="post-content-x"><p>reader body text</p></div>
        </div></body></html>"#;

        let data = extract(&Page::parse(html)).unwrap();
        assert_eq!(data.title, "Reader Title");
        assert_eq!(data.body_html, "<p>reader body text</p>");
    }

    #[test]
    fn test_canonical_falls_back_to_page_url() {
        let html = r#"<html><body><div class="body markup"><p>b</p></div></body></html>"#;
        let page = Page::parse_with_url(html, "https://example.substack.com/p/here").unwrap();

        let data = extract(&page).unwrap();
        assert_eq!(data.canonical_url, "https://example.substack.com/p/here");
    }
}

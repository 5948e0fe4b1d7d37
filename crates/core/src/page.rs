//! Parsed page snapshots.
//!
//! This module provides the [`Page`] type: one loaded page as the extraction
//! pipeline sees it, combining the parsed HTML document, the page's own URL,
//! and the `window._preloads` structured-data blob when one is embedded in
//! the markup. The pipeline only ever reads a `Page`; sanitization operates
//! on its own parse of the body fragment, so the snapshot is never mutated.
//!
//! # Example
//!
//! ```rust
//! use reprint_core::page::Page;
//!
//! let html = r#"<html><head><title>Test</title></head><body><p>Hello</p></body></html>"#;
//! let page = Page::parse(html);
//! assert_eq!(page.document_title(), Some("Test".to_string()));
//! ```

use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use url::Url;

use crate::{ReprintError, Result, preload, selectors};

/// One loaded page, parsed and ready for detection and extraction.
pub struct Page {
    html: Html,
    url: Option<Url>,
    preloads: Option<Value>,
}

impl Page {
    /// Parses a page snapshot from an HTML string.
    ///
    /// Inline scripts are scanned for the `window._preloads` assignment so
    /// that full-page snapshots expose the structured-data extraction path.
    pub fn parse(html: &str) -> Self {
        let html = Html::parse_document(html);
        let preloads = preload::scan_document(&html);
        Self { html, url: None, preloads }
    }

    /// Parses a page snapshot with a known page URL.
    ///
    /// The URL is the fallback for the canonical address when the page
    /// carries no canonical `<link>`.
    ///
    /// # Errors
    ///
    /// Returns [`ReprintError::InvalidUrl`] if the URL cannot be parsed.
    pub fn parse_with_url(html: &str, url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(|e| ReprintError::InvalidUrl(e.to_string()))?;
        let mut page = Self::parse(html);
        page.url = Some(url);
        Ok(page)
    }

    /// Replaces the preload blob, as a live page context would supply it.
    ///
    /// Overrides anything found while scanning the markup.
    pub fn with_preloads(mut self, preloads: Value) -> Self {
        self.preloads = Some(preloads);
        self
    }

    /// The page's own URL, if known.
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// The `window._preloads` blob, if the page exposes one.
    pub fn preloads(&self) -> Option<&Value> {
        self.preloads.as_ref()
    }

    /// The parsed document.
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// First element matched by any selector in `cascade`, in cascade order.
    pub fn first_match(&self, cascade: &[&str]) -> Option<ElementRef<'_>> {
        selectors::first_match(&self.html, cascade)
    }

    /// Content of a meta tag looked up by `name` first, then `property`.
    pub fn meta_content(&self, attr: &str) -> Option<String> {
        for kind in ["name", "property"] {
            let raw = format!(r#"meta[{}="{}"]"#, kind, attr);
            if let Ok(selector) = Selector::parse(&raw)
                && let Some(el) = self.html.select(&selector).next()
                && let Some(content) = el.value().attr("content")
            {
                return Some(content.to_string());
            }
        }
        None
    }

    /// The document's `<title>` text, if present and non-empty.
    pub fn document_title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        let title: String = self.html.select(&selector).next()?.text().collect();
        let title = title.trim();
        if title.is_empty() { None } else { Some(title.to_string()) }
    }

    /// The canonical address: the canonical `<link>` href, else the page URL.
    pub fn canonical_url(&self) -> Option<String> {
        let selector = Selector::parse(r#"link[rel="canonical"]"#).ok()?;
        if let Some(el) = self.html.select(&selector).next()
            && let Some(href) = el.value().attr("href")
            && !href.is_empty()
        {
            return Some(href.to_string());
        }
        self.url.as_ref().map(|u| u.to_string())
    }
}

//! Selector cascades for Substack page templates.
//!
//! Substack renders the same logical article through two independent
//! template systems: classic server-rendered publication pages and the
//! client-rendered reader app. Each cascade below is an ordered priority
//! list evaluated first-match-wins, from the most specific template marker
//! to the loosest structural fallback. Keeping the ordering in data (rather
//! than nested conditionals) makes the strategy order testable on its own.

use scraper::{ElementRef, Html, Selector};

/// Title headings on server-rendered publication pages.
pub const STATIC_TITLE: &[&str] = &["h1.post-title", "article h1", ".post-header h1"];

/// Body containers on server-rendered publication pages.
pub const STATIC_BODY: &[&str] = &[".available-content .body.markup", ".body.markup"];

/// Root containers that mark the reader single-page app.
pub const READER_ROOT: &[&str] = &[".reader-nav-root", ".reader2-font-base"];

/// Title headings inside the reader app. Broader than [`STATIC_TITLE`]
/// because the reader's class names are generated.
pub const READER_TITLE: &[&str] = &[
    "h1.post-title",
    r#"h1[class*="post-title"]"#,
    "article h1",
    "h1[data-testid]",
];

/// Body containers inside the reader app.
pub const READER_BODY: &[&str] = &[
    ".available-content .body.markup",
    ".body.markup",
    ".markup",
    r#"[class*="body"][class*="markup"]"#,
];

/// Generic content containers inside the reader app. Weakest signal; a hit
/// only counts as an article when its text is long enough to be a real body
/// rather than a stub.
pub const READER_CONTENT: &[&str] = &[
    r#"[class*="available-content"]"#,
    r#"[class*="post-content"]"#,
    "article",
];

/// Title headings tried during extraction, after the static cascade.
pub const EXTRACT_TITLE_FALLBACK: &[&str] = &[r#"h1[class*="post-title"]"#, "h1[data-testid]"];

/// Subtitle-styled elements.
pub const SUBTITLE: &[&str] = &["h3.subtitle", ".post-header h3", ".subtitle"];

/// Publication-name-styled elements.
pub const PUBLICATION_NAME: &[&str] = &[".publication-name", r#"[class*="publication-name"]"#];

/// Author profile links in the byline area.
pub const BYLINE_LINK: &[&str] = &[
    r#".byline-wrapper a[href*="/@"]"#,
    r#".post-header a[href*="/@"]"#,
];

/// Returns the first element in the document matched by any selector in the
/// cascade, in cascade order. Invalid selector strings are skipped.
pub fn first_match<'a>(doc: &'a Html, cascade: &[&str]) -> Option<ElementRef<'a>> {
    cascade.iter().find_map(|raw| {
        let selector = Selector::parse(raw).ok()?;
        doc.select(&selector).next()
    })
}

/// Like [`first_match`], scoped to the subtree under `scope`.
pub fn first_match_within<'a>(scope: ElementRef<'a>, cascade: &[&str]) -> Option<ElementRef<'a>> {
    cascade.iter().find_map(|raw| {
        let selector = Selector::parse(raw).ok()?;
        scope.select(&selector).next()
    })
}

/// Trimmed text content of an element.
pub fn trimmed_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

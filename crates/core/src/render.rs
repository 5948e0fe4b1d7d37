//! Print-document rendering.
//!
//! Turns an [`ArticleData`] into the print layout: cover image, header
//! (publication, title, subtitle, byline/date meta line), sanitized body,
//! and a footer carrying the canonical URL. Rendering is deterministic:
//! the date line always uses the long-month English format regardless of
//! environment locale. Every text field is escaped for embedding as text;
//! only the body, which has been through the sanitizer, is embedded as
//! markup.

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::article::ArticleData;
use crate::sanitize;

/// Separator glyph between the byline and the date in the meta line.
const META_SEPARATOR: &str = "|";

/// Renders the article as a print-layout fragment.
pub fn render_article(data: &ArticleData) -> String {
    let byline = data.bylines.join(", ");
    let date = format_date(&data.date);
    let clean_body = sanitize::sanitize(&data.body_html);

    let mut html = String::new();

    if !data.cover_image.is_empty() {
        html.push_str(&format!(
            r#"<div class="cover-image"><img src="{}" alt=""></div>"#,
            esc(&data.cover_image)
        ));
    }

    html.push_str(r#"<header class="article-header">"#);

    if !data.publication.is_empty() {
        html.push_str(&format!(
            r#"<div class="publication-name">{}</div>"#,
            esc(&data.publication)
        ));
    }

    html.push_str(&format!(r#"<h1 class="article-title">{}</h1>"#, esc(&data.title)));

    if !data.subtitle.is_empty() {
        html.push_str(&format!(
            r#"<div class="article-subtitle">{}</div>"#,
            esc(&data.subtitle)
        ));
    }

    if !byline.is_empty() || !date.is_empty() {
        html.push_str(r#"<div class="article-meta">"#);
        if !byline.is_empty() {
            html.push_str(&format!(r#"<span class="byline">{}</span>"#, esc(&byline)));
        }
        if !byline.is_empty() && !date.is_empty() {
            html.push_str(&format!(r#"<span class="separator">{}</span>"#, META_SEPARATOR));
        }
        if !date.is_empty() {
            html.push_str(&format!(r#"<span class="date">{}</span>"#, esc(&date)));
        }
        html.push_str("</div>");
    }

    html.push_str("</header>");
    html.push_str(&format!(r#"<div class="article-body">{}</div>"#, clean_body));
    html.push_str(&format!(
        r#"<footer class="article-footer">{}</footer>"#,
        esc(&data.canonical_url)
    ));

    html
}

/// Renders the article as a complete standalone HTML document with an
/// embedded print stylesheet.
pub fn print_document(data: &ArticleData) -> String {
    let title = if data.title.is_empty() { "Substack Article" } else { &data.title };

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{css}</style>\n</head>\n<body>\n\
         <article id=\"article\">{body}</article>\n</body>\n</html>\n",
        title = esc(title),
        css = PRINT_CSS,
        body = render_article(data)
    )
}

const PRINT_CSS: &str = r#"
body { font-family: Georgia, 'Times New Roman', serif; color: #1a1a1a; margin: 0; }
article { max-width: 42em; margin: 2em auto; padding: 0 1em; line-height: 1.6; }
.cover-image img { max-width: 100%; height: auto; }
.publication-name { font-size: 0.85em; text-transform: uppercase; letter-spacing: 0.08em; color: #555; }
.article-title { font-size: 1.9em; line-height: 1.2; margin: 0.3em 0; }
.article-subtitle { font-size: 1.15em; color: #444; margin-bottom: 0.6em; }
.article-meta { font-size: 0.9em; color: #666; margin-bottom: 1.5em; }
.article-meta .separator { margin: 0 0.5em; }
.article-body img { max-width: 100%; height: auto; }
.article-body blockquote { border-left: 3px solid #ddd; margin-left: 0; padding-left: 1em; color: #444; }
.article-footer { margin-top: 2em; padding-top: 1em; border-top: 1px solid #ddd; font-size: 0.8em; color: #777; word-break: break-all; }
@media print {
  article { margin: 0 auto; }
  a { color: inherit; text-decoration: none; }
}
"#;

/// Formats an ISO-ish date string as long month, numeric day, numeric year
/// ("January 15, 2024"). An unparseable non-empty input is returned
/// verbatim rather than dropped.
pub fn format_date(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let format = format_description!("[month repr:long] [day padding:none], [year]");

    if let Ok(datetime) = OffsetDateTime::parse(raw, &Rfc3339)
        && let Ok(formatted) = datetime.format(&format)
    {
        return formatted;
    }

    let date_part = format_description!("[year]-[month]-[day]");
    if raw.len() >= 10
        && let Ok(date) = Date::parse(&raw[..10], &date_part)
        && let Ok(formatted) = date.format(&format)
    {
        return formatted;
    }

    raw.to_string()
}

/// Escapes a string for embedding as HTML text or attribute content.
fn esc(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ArticleData {
        ArticleData {
            title: "T".to_string(),
            bylines: vec!["A".to_string(), "B".to_string()],
            date: "2024-01-15".to_string(),
            body_html: "<p>Body text.</p>".to_string(),
            canonical_url: "https://example.substack.com/p/t".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_meta_line_joins_bylines_and_formats_date() {
        let html = render_article(&sample());
        assert!(html.contains(r#"<span class="byline">A, B</span>"#));
        assert!(html.contains(r#"<span class="separator">|</span>"#));
        assert!(html.contains(r#"<span class="date">January 15, 2024</span>"#));
    }

    #[test]
    fn test_separator_only_when_both_present() {
        let mut data = sample();
        data.bylines.clear();
        let html = render_article(&data);
        assert!(!html.contains("separator"));
        assert!(html.contains("January 15, 2024"));

        let mut data = sample();
        data.date.clear();
        let html = render_article(&data);
        assert!(!html.contains("separator"));
        assert!(html.contains("A, B"));
    }

    #[test]
    fn test_meta_line_absent_when_both_empty() {
        let mut data = sample();
        data.bylines.clear();
        data.date.clear();
        assert!(!render_article(&data).contains("article-meta"));
    }

    #[test]
    fn test_optional_blocks() {
        let mut data = sample();
        data.publication = "The Letter".to_string();
        data.subtitle = "A deck".to_string();
        data.cover_image = "https://img.example/c.png".to_string();

        let html = render_article(&data);
        assert!(html.contains(r#"<div class="publication-name">The Letter</div>"#));
        assert!(html.contains(r#"<div class="article-subtitle">A deck</div>"#));
        assert!(html.contains(r#"<div class="cover-image">"#));

        let html = render_article(&sample());
        assert!(!html.contains("publication-name"));
        assert!(!html.contains("article-subtitle"));
        assert!(!html.contains("cover-image"));
    }

    #[test]
    fn test_text_fields_are_escaped_body_is_not() {
        let mut data = sample();
        data.title = "Tom & <Jerry>".to_string();
        data.body_html = "<p><em>markup stays</em></p>".to_string();

        let html = render_article(&data);
        assert!(html.contains("Tom &amp; &lt;Jerry&gt;"));
        assert!(html.contains("<em>markup stays</em>"));
    }

    #[test]
    fn test_body_is_sanitized_on_the_way_in() {
        let mut data = sample();
        data.body_html = r#"<p>keep</p><div class="subscription-widget">drop</div>"#.to_string();

        let html = render_article(&data);
        assert!(html.contains("keep"));
        assert!(!html.contains("subscription-widget"));
    }

    #[test]
    fn test_footer_carries_canonical_url_verbatim() {
        let html = render_article(&sample());
        assert!(html.contains(r#"<footer class="article-footer">https://example.substack.com/p/t</footer>"#));
    }

    #[test]
    fn test_format_date_variants() {
        assert_eq!(format_date("2024-01-15"), "January 15, 2024");
        assert_eq!(format_date("2024-01-05T10:30:00Z"), "January 5, 2024");
        assert_eq!(format_date("2024-01-15T10:30:00.123Z"), "January 15, 2024");
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("last Tuesday"), "last Tuesday");
    }

    #[test]
    fn test_print_document_is_standalone() {
        let html = print_document(&sample());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>T</title>"));
        assert!(html.contains("<style>"));
        assert!(html.contains("article-body"));
    }

    #[test]
    fn test_print_document_default_title() {
        let mut data = sample();
        data.title.clear();
        assert!(print_document(&data).contains("<title>Substack Article</title>"));
    }
}

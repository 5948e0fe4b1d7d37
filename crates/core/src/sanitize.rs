//! Body-fragment sanitization.
//!
//! Normalizes the raw article body into a fragment fit for print display.
//! The input is parsed into an owned tree, so the source of the fragment
//! (the live page snapshot) is never reachable for writes from here.
//!
//! Two passes, in a fixed order: a streaming pass removes platform chrome
//! by selector, then a tree pass applies the structure-sensitive rules
//! (subscribe call-to-actions, image-link unwrapping, empty-node cleanup).
//! Chrome removal must run first: stripping a widget can be what leaves a
//! paragraph empty.

use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};

/// Rules applied by the sanitizer.
///
/// The defaults are the fixed Substack rule table; the struct exists so
/// tests and callers can narrow the chrome list.
#[derive(Debug, Clone)]
pub struct SanitizeRules {
    /// Selectors removed wholesale in the streaming pass.
    pub chrome_selectors: Vec<String>,
    /// Substring of an anchor's href that marks a subscribe call-to-action.
    pub subscribe_marker: String,
}

impl Default for SanitizeRules {
    fn default() -> Self {
        Self {
            chrome_selectors: [
                ".subscription-widget-wrap-editor",
                ".subscription-widget",
                ".image-link-expand",
                "script",
                "style",
                r#"[data-component-name="SubscribeWidgetToDOM"]"#,
                r#"[data-component-name="ButtonCreateButton"]"#,
                ".button-wrapper",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            subscribe_marker: "subscribe".to_string(),
        }
    }
}

/// Sanitizes a raw HTML fragment with the default rule table.
pub fn sanitize(fragment: &str) -> String {
    sanitize_with_rules(fragment, &SanitizeRules::default())
}

/// Sanitizes a raw HTML fragment.
///
/// Pure: the result depends only on the input and the rules. Idempotent:
/// sanitizing an already-clean fragment changes nothing.
pub fn sanitize_with_rules(fragment: &str, rules: &SanitizeRules) -> String {
    let stripped = remove_chrome(fragment, rules);
    let mut doc = Html::parse_fragment(&stripped);

    remove_subscribe_ctas(&mut doc, rules);
    unwrap_image_links(&mut doc);
    remove_empty_paragraphs(&mut doc);
    remove_empty_mentions(&mut doc);

    doc.root_element().inner_html()
}

/// Streaming removal of the platform-chrome selector list.
fn remove_chrome(fragment: &str, rules: &SanitizeRules) -> String {
    let handlers = rules
        .chrome_selectors
        .iter()
        .map(|sel| {
            lol_html::element!(sel.as_str(), |el| {
                el.remove();
                Ok(())
            })
        })
        .collect();

    let mut output = String::new();
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings { element_content_handlers: handlers, ..Default::default() },
        |c: &[u8]| {
            output.push_str(&String::from_utf8_lossy(c));
        },
    );

    match rewriter.write(fragment.as_bytes()) {
        Ok(_) => {}
        Err(_) => return fragment.to_string(),
    }

    match rewriter.end() {
        Ok(_) => {}
        Err(_) => return fragment.to_string(),
    }

    output
}

fn collect_matches(doc: &Html, raw_selector: &str) -> Vec<NodeId> {
    match Selector::parse(raw_selector) {
        Ok(selector) => doc.select(&selector).map(|el| el.id()).collect(),
        Err(_) => Vec::new(),
    }
}

fn detach_all(doc: &mut Html, ids: Vec<NodeId>) {
    for id in ids {
        if let Some(mut node) = doc.tree.get_mut(id) {
            node.detach();
        }
    }
}

fn element_at(doc: &Html, id: NodeId) -> Option<ElementRef<'_>> {
    doc.tree.get(id).and_then(ElementRef::wrap)
}

fn has_no_text(el: ElementRef<'_>) -> bool {
    el.text().all(|t| t.trim().is_empty())
}

/// Subscribe call-to-action links: when the link is the only element child
/// of its enclosing paragraph, the whole paragraph goes; otherwise just the
/// link.
fn remove_subscribe_ctas(doc: &mut Html, rules: &SanitizeRules) {
    let anchors = collect_matches(doc, "a.button");

    let mut to_detach = Vec::new();
    for id in anchors {
        let Some(el) = element_at(doc, id) else { continue };
        let Some(href) = el.value().attr("href") else { continue };
        if !href.contains(&rules.subscribe_marker) {
            continue;
        }

        // The fragment root never counts as the enclosing block.
        let block = enclosing_paragraph(el)
            .or_else(|| {
                el.parent()
                    .and_then(ElementRef::wrap)
                    .filter(|p| p.value().name() != "html")
            })
            .unwrap_or(el);

        let sibling_elements = block.child_elements().count();
        if block.id() != el.id() && sibling_elements <= 1 {
            to_detach.push(block.id());
        } else {
            to_detach.push(el.id());
        }
    }

    detach_all(doc, to_detach);
}

fn enclosing_paragraph<'a>(el: ElementRef<'a>) -> Option<ElementRef<'a>> {
    let mut current = *el;
    loop {
        let parent = current.parent()?;
        let parent_el = ElementRef::wrap(parent)?;
        if parent_el.value().name() == "p" {
            return Some(parent_el);
        }
        current = parent;
    }
}

/// Replaces each image-wrapping anchor with its inner inset decoration if
/// present, else the bare image. The replacement subtree moves verbatim, so
/// every image attribute (srcset included) survives. Anchors with no image
/// inside are left alone.
fn unwrap_image_links(doc: &mut Html) {
    let anchors = collect_matches(doc, "a.image-link");

    let inset_selector = Selector::parse(".image2-inset").ok();
    let img_selector = Selector::parse("img").ok();
    let (Some(inset_selector), Some(img_selector)) = (inset_selector, img_selector) else {
        return;
    };

    let mut replacements = Vec::new();
    for id in anchors {
        let Some(el) = element_at(doc, id) else { continue };
        if el.select(&img_selector).next().is_none() {
            continue;
        }

        let replacement = el
            .select(&inset_selector)
            .next()
            .or_else(|| el.select(&img_selector).next())
            .map(|r| r.id());
        if let Some(replacement_id) = replacement {
            replacements.push((id, replacement_id));
        }
    }

    for (anchor_id, replacement_id) in replacements {
        if let Some(mut anchor) = doc.tree.get_mut(anchor_id) {
            anchor.insert_id_before(replacement_id);
            anchor.detach();
        }
    }
}

/// Paragraphs with no trimmed text and no image carry nothing worth
/// printing.
fn remove_empty_paragraphs(doc: &mut Html) {
    let Ok(img_selector) = Selector::parse("img") else { return };

    let ids: Vec<NodeId> = collect_matches(doc, "p")
        .into_iter()
        .filter(|&id| match element_at(doc, id) {
            Some(el) => has_no_text(el) && el.select(&img_selector).next().is_none(),
            None => false,
        })
        .collect();

    detach_all(doc, ids);
}

/// Mention decorations that render no visible text.
fn remove_empty_mentions(doc: &mut Html) {
    let ids: Vec<NodeId> = collect_matches(doc, ".mention-wrap")
        .into_iter()
        .filter(|&id| element_at(doc, id).is_some_and(has_no_text))
        .collect();

    detach_all(doc, ids);
}

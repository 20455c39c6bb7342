//! DOM Operations Adapter
//!
//! Query adapter over `dom_query`. It exposes the small capability set the
//! extraction pipeline needs: parse, select-first,
//! select-all, attribute access and text. Serialization of rewritten trees
//! lives in `tree`.

use std::panic::{self, AssertUnwindSafe};

// Re-export core types for external use
pub use dom_query::{Document, Selection};

pub use tendril::StrTendril;

// === Parsing ===

/// Parse an HTML string into a document.
///
/// Never fails: empty input yields an empty document, and a panic inside the
/// parser is recovered into an empty document.
#[must_use]
pub fn parse(html: &str) -> Document {
    if html.trim().is_empty() {
        return Document::from("");
    }

    match panic::catch_unwind(AssertUnwindSafe(|| Document::from(html))) {
        Ok(doc) => doc,
        Err(_) => {
            tracing::warn!(len = html.len(), "HTML parser panicked; using an empty document");
            Document::from("")
        }
    }
}

// === Querying ===

/// First element matching the selector, in document order.
#[must_use]
pub fn select_first<'a>(doc: &'a Document, selector: &str) -> Option<Selection<'a>> {
    doc.select(selector)
        .nodes()
        .first()
        .map(|node| Selection::from(*node))
}

/// Every element matching the selector, in document order.
#[must_use]
pub fn select_all<'a>(doc: &'a Document, selector: &str) -> Vec<Selection<'a>> {
    doc.select(selector)
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .collect()
}

/// First element matching the selector for which `predicate` holds.
#[must_use]
pub fn find_first<'a, P>(doc: &'a Document, selector: &str, predicate: P) -> Option<Selection<'a>>
where
    P: Fn(&Selection<'a>) -> bool,
{
    select_all(doc, selector).into_iter().find(|sel| predicate(sel))
}

// === Attribute Operations ===

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Attribute value, or an empty string when the attribute is missing.
#[inline]
#[must_use]
pub fn attribute_or_empty(sel: &Selection, name: &str) -> String {
    get_attribute(sel, name).unwrap_or_default()
}

// === Text Content ===

/// Get all text content of node and descendants
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_select_first() {
        let doc = parse(r#"<div id="main"><p>one</p><p>two</p></div>"#);

        let first = select_first(&doc, "p").map(|p| text_content(&p).to_string());
        assert_eq!(first.as_deref(), Some("one"));
    }

    #[test]
    fn test_select_all_preserves_document_order() {
        let doc = parse(r#"<img src="a.png"><div><img src="b.png"></div><img src="c.png">"#);

        let srcs: Vec<String> = select_all(&doc, "img")
            .iter()
            .map(|img| attribute_or_empty(img, "src"))
            .collect();
        assert_eq!(srcs, vec!["a.png", "b.png", "c.png"]);
    }

    #[test]
    fn test_find_first_with_predicate() {
        let doc = parse(
            r#"<meta name="author" content="A"><meta name="description" content="D">"#,
        );

        let meta = find_first(&doc, "meta", |m| {
            get_attribute(m, "name").as_deref() == Some("description")
        });
        assert_eq!(meta.map(|m| attribute_or_empty(&m, "content")).as_deref(), Some("D"));
    }

    #[test]
    fn test_missing_attribute_is_empty() {
        let doc = parse("<p>text</p>");
        let p = select_first(&doc, "p");

        assert!(p.is_some());
        if let Some(p) = p {
            assert_eq!(get_attribute(&p, "class"), None);
            assert_eq!(attribute_or_empty(&p, "class"), "");
        }
    }

    #[test]
    fn test_parse_empty_input() {
        let doc = parse("");
        assert!(select_first(&doc, "p").is_none());
        assert!(select_all(&doc, "meta").is_empty());
    }
}

//! HTML Meta Tag Readers
//!
//! Small readers for single tags and attributes. Every reader tolerates a
//! missing node or attribute and answers with an empty value instead.
//!
//! Character references are decoded once, by the HTML parser. Values are
//! returned as the parser hands them over, so text that was escaped twice in
//! the source keeps one level of escaping.

use crate::dom::{self, Document};

/// Decoded `content` of the first `<meta>` whose `property` equals `property`.
///
/// # Example
///
/// ```rust
/// use rs_linkpreview::dom;
/// use rs_linkpreview::metadata::read_property;
///
/// let doc = dom::parse(r#"<meta property="og:title" content="Fish &amp; Chips">"#);
/// assert_eq!(read_property(&doc, "og:title"), "Fish & Chips");
/// assert_eq!(read_property(&doc, "og:image"), "");
/// ```
#[must_use]
pub fn read_property(doc: &Document, property: &str) -> String {
    read_meta_content(doc, "property", property)
}

/// Decoded `content` of the first `<meta>` whose `name` equals `name`.
#[must_use]
pub fn read_meta_name(doc: &Document, name: &str) -> String {
    read_meta_content(doc, "name", name)
}

fn read_meta_content(doc: &Document, attribute: &str, expected: &str) -> String {
    dom::find_first(doc, "meta", |meta| {
        dom::get_attribute(meta, attribute).as_deref() == Some(expected)
    })
    .map(|meta| non_blank(dom::attribute_or_empty(&meta, "content")))
    .unwrap_or_default()
}

/// Decoded text of `<head><title>`.
#[must_use]
pub fn document_title(doc: &Document) -> String {
    dom::select_first(doc, "head title")
        .map(|title| non_blank(dom::text_content(&title).to_string()))
        .unwrap_or_default()
}

fn non_blank(value: String) -> String {
    if value.trim().is_empty() {
        String::new()
    } else {
        value
    }
}

/// `<meta name="description">` value.
#[must_use]
pub fn extract_description(doc: &Document) -> String {
    read_meta_name(doc, "description")
}

/// Entries of `<meta name="keywords">`.
///
/// Comma separated, each entry trimmed, empty entries dropped. Source order
/// is kept and duplicates are not merged.
#[must_use]
pub fn extract_keywords(doc: &Document) -> Vec<String> {
    split_keywords(&read_meta_name(doc, "keywords"))
}

fn split_keywords(content: &str) -> Vec<String> {
    content
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Every non-blank `<img src>` value, verbatim, in document order.
#[must_use]
pub fn collect_image_sources(doc: &Document) -> Vec<String> {
    dom::select_all(doc, "img")
        .iter()
        .filter_map(|img| dom::get_attribute(img, "src"))
        .filter(|src| !src.trim().is_empty())
        .collect()
}

//! Metadata extraction module.
//!
//! Runs the fallback waterfall that turns a parsed page into `Metadata`.
//! Open Graph tags are consulted first; plain `<title>`/`<meta>` tags and a
//! prefix of the page text only fill in what is still missing.

pub mod meta_tags;
pub mod open_graph;

use crate::dom::{self, Document};
use crate::language::LanguageDetector;
use crate::result::{Metadata, OpenGraphTag};
use crate::sanitize;
use crate::Options;

pub use meta_tags::{
    collect_image_sources, document_title, extract_description,
    extract_keywords, read_meta_name, read_property,
};
pub use open_graph::collect_open_graph;

/// Intermediate state threaded through the waterfall steps.
#[derive(Debug, Clone, Default)]
struct Draft {
    title: String,
    image: String,
    description: String,
    keywords: Vec<String>,
    open_graph_tags: Vec<OpenGraphTag>,
    content: String,
    images: Vec<String>,
}

/// Extract preview metadata from an HTML document.
///
/// Never fails: malformed or empty HTML produces a `Metadata` with empty
/// fields. The language is detected from the raw `html`.
#[must_use]
pub fn extract_metadata(
    uri: &str,
    html: &str,
    opts: &Options,
    detector: &dyn LanguageDetector,
) -> Metadata {
    tracing::debug!(uri, len = html.len(), "extracting metadata");

    let doc = dom::parse(html);

    let mut draft = Draft::default();
    draft = resolve_title(&doc, draft, opts);
    draft = resolve_open_graph(&doc, draft, opts);
    draft = resolve_keywords(&doc, draft, opts);
    draft = resolve_content(html, draft, opts);
    draft = resolve_images(&doc, draft, opts);
    draft = resolve_meta_description(&doc, draft, opts);
    draft = resolve_text_description(draft, opts);

    let language = detector.detect(html);

    draft.finish(uri, html, language)
}

impl Draft {
    fn finish(self, uri: &str, html: &str, language: String) -> Metadata {
        Metadata {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            keywords: self.keywords,
            open_graph_tags: self.open_graph_tags,
            images: self.images,
            content: self.content,
            raw: html.to_string(),
            url: uri.to_string(),
            language,
        }
    }
}

/// `og:title`, else the `<head><title>` text.
fn resolve_title(doc: &Document, mut draft: Draft, _opts: &Options) -> Draft {
    draft.title = read_property(doc, "og:title");
    if draft.title.trim().is_empty() {
        draft.title = document_title(doc);
        tracing::debug!("no og:title; using <title>");
    }
    draft
}

/// Singular `og:image`, `og:description` and the full Open Graph list.
fn resolve_open_graph(doc: &Document, mut draft: Draft, _opts: &Options) -> Draft {
    draft.image = read_property(doc, "og:image").trim().to_string();
    draft.description = read_property(doc, "og:description");
    draft.open_graph_tags = collect_open_graph(doc);
    draft
}

fn resolve_keywords(doc: &Document, mut draft: Draft, _opts: &Options) -> Draft {
    draft.keywords = extract_keywords(doc);
    draft
}

fn resolve_content(html: &str, mut draft: Draft, _opts: &Options) -> Draft {
    draft.content = sanitize::sanitize(html);
    draft
}

/// `og:image` replaces the page images; the default image only fills an
/// empty list.
fn resolve_images(doc: &Document, mut draft: Draft, opts: &Options) -> Draft {
    if draft.image.is_empty() {
        draft.images = collect_image_sources(doc);
        if draft.images.is_empty() {
            if let Some(default_image) = opts.default_image() {
                draft.images = vec![default_image.to_string()];
            }
        }
    } else {
        draft.images = vec![draft.image.clone()];
    }
    draft
}

fn resolve_meta_description(doc: &Document, mut draft: Draft, _opts: &Options) -> Draft {
    if draft.description.trim().is_empty() {
        draft.description = extract_description(doc);
        tracing::debug!("no og:description; using <meta name=\"description\">");
    }
    draft
}

/// Last resort: the first `description_length` characters of the content text.
fn resolve_text_description(mut draft: Draft, opts: &Options) -> Draft {
    if draft.description.trim().is_empty() {
        let text = sanitize::plain_text(&draft.content);
        draft.description = truncate_chars(&text, opts.description_length);
        tracing::debug!(chars = opts.description_length, "no description tags; using page text");
    }
    draft
}

/// Hard cut after `max` characters, never splitting a code point.
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

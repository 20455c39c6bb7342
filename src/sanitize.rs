//! Content sanitizer.
//!
//! Reduces an HTML document to text plus a small whitelist of inline tags.
//! Structural wrappers (`div`, `p`, `a`, `body`, ...) are unwrapped: their
//! children move into the wrapper's position, in order, and are examined in
//! turn, so nested wrappers are flattened all the way down. Whitelisted
//! elements are kept as-is together with everything inside them.

use std::collections::VecDeque;

use crate::patterns::{DOCTYPE_MARKER, LINE_BREAK_RUN};
use crate::tree::{NodeArena, NodeId, NodeKind};

/// Inline tags preserved by the sanitizer.
pub const WHITELIST: &[&str] = &["strong", "em", "u", "img", "i"];

/// Elements removed together with their content before flattening.
const NOISE_TAGS: &[&str] = &["script", "style"];

/// Replacement for runs of two or more line breaks.
const LINE_BREAK: &str = "<br />";

/// Sanitize an HTML document into a whitelisted inline fragment.
///
/// Empty input yields an empty string.
///
/// # Example
///
/// ```rust
/// use rs_linkpreview::sanitize::sanitize;
///
/// let html = "<div><p>Hello <b><i>there</i></b></p><script>track()</script></div>";
/// assert_eq!(sanitize(html), "Hello <i>there</i>");
/// ```
#[must_use]
pub fn sanitize(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let mut arena = NodeArena::from_html(html);
    remove_noise(&mut arena);
    flatten(&mut arena);

    let serialized = arena.to_html();
    collapse_line_breaks(serialized.trim())
}

/// Flattened text of an HTML fragment, with noise nodes removed.
///
/// Used for the description fallback, where the already-sanitized content is
/// reduced once more to its bare text.
#[must_use]
pub fn plain_text(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let mut arena = NodeArena::from_html(html);
    remove_noise(&mut arena);
    arena.text(arena.root())
}

/// Whether the sanitizer leaves this node in place without looking inside it.
#[must_use]
pub fn is_whitelisted(arena: &NodeArena, id: NodeId) -> bool {
    match arena.kind(id) {
        NodeKind::Text(_) => true,
        NodeKind::Element { name, .. } => WHITELIST.contains(&name.as_str()),
        NodeKind::Root => false,
    }
}

/// Detach `<script>`/`<style>` elements and text runs opening with a doctype
/// marker.
pub fn remove_noise(arena: &mut NodeArena) {
    let noise: Vec<NodeId> = arena
        .descendants(arena.root())
        .into_iter()
        .filter(|&id| match arena.kind(id) {
            NodeKind::Element { name, .. } => NOISE_TAGS.contains(&name.as_str()),
            NodeKind::Text(text) => DOCTYPE_MARKER.is_match(text),
            NodeKind::Root => false,
        })
        .collect();

    for id in noise {
        arena.detach(id);
    }
}

/// Unwrap every non-whitelisted element reachable from the root without
/// passing through a whitelisted one.
///
/// Breadth-first: a promoted child is queued again at its new position.
pub fn flatten(arena: &mut NodeArena) {
    let mut queue: VecDeque<NodeId> = arena.children(arena.root()).into_iter().collect();

    while let Some(id) = queue.pop_front() {
        if arena.parent(id).is_none() || is_whitelisted(arena, id) {
            continue;
        }
        queue.extend(arena.promote_children(id));
    }
}

fn collapse_line_breaks(html: &str) -> String {
    LINE_BREAK_RUN.replace_all(html, LINE_BREAK).into_owned()
}

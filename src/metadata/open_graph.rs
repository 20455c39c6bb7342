//! Open Graph collector.

use crate::dom::{self, Document};
use crate::result::OpenGraphTag;

/// Namespace prefix of Open Graph properties.
pub const OPEN_GRAPH_PREFIX: &str = "og:";

/// Collect every `<meta property="og:*">` as a key/value pair.
///
/// Document order is kept and duplicate keys are all reported. Values are the
/// `content` attribute as the parser returns it; a missing `content` gives an
/// empty value.
#[must_use]
pub fn collect_open_graph(doc: &Document) -> Vec<OpenGraphTag> {
    dom::select_all(doc, "meta")
        .iter()
        .filter_map(|meta| {
            let property = dom::get_attribute(meta, "property")?;
            if !property.starts_with(OPEN_GRAPH_PREFIX) {
                return None;
            }
            Some(OpenGraphTag::new(property, dom::attribute_or_empty(meta, "content")))
        })
        .collect()
}

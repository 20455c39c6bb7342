//! Owned node arena used for structural rewriting.
//!
//! `dom_query` documents are convenient to query but awkward to rewrite while
//! walking them. The sanitizer instead copies the element and text nodes into
//! a `NodeArena`, where every node is addressed by a `NodeId` and linked to
//! its parent and siblings. Moves and removals only relink neighbours, so they
//! cost the same however many siblings a node has, and a handle stays valid
//! after its node has been re-parented.
//!
//! Every walk over the tree (copying, traversal, serialization) runs on an
//! explicit worklist, so nesting depth is bounded only by memory.

use dom_query::{Document, NodeRef};

/// Elements serialized without an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "link", "meta", "param", "source", "track", "wbr",
];

/// Handle of a node inside a `NodeArena`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Payload of an arena node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The document root; never serialized itself.
    Root,
    /// An element with its lowercase tag name and attributes in source order.
    Element {
        name: String,
        attrs: Vec<(String, String)>,
    },
    /// A text node.
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    prev_sibling: Option<NodeId>,
    next_sibling: Option<NodeId>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
        }
    }
}

/// Serializer worklist entry.
enum Frame {
    Open(NodeId),
    Close(NodeId),
}

/// Arena of nodes forming one tree under `root()`.
#[derive(Debug, Clone)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeArena {
    /// Create an arena containing only a root node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Root)],
        }
    }

    /// Parse HTML and copy its element and text nodes into a new arena.
    #[must_use]
    pub fn from_html(html: &str) -> Self {
        Self::from_document(&crate::dom::parse(html))
    }

    /// Copy the element and text nodes of a parsed document.
    ///
    /// Doctype, comment and processing-instruction nodes are not carried over.
    #[must_use]
    pub fn from_document(doc: &Document) -> Self {
        let mut arena = Self::new();
        let root = arena.root();
        let mut stack: Vec<(NodeRef, NodeId)> = doc
            .root()
            .children()
            .into_iter()
            .rev()
            .map(|child| (child, root))
            .collect();

        while let Some((node, parent)) = stack.pop() {
            let Some(kind) = node_kind(&node) else {
                continue;
            };
            let id = arena.push(kind);
            arena.append_child(parent, id);

            if node.is_element() {
                stack.extend(node.children().into_iter().rev().map(|child| (child, id)));
            }
        }

        arena
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Payload of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    /// Parent of a node, `None` for the root and for detached nodes.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Ordered children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut next = self.nodes[id.0].first_child;
        while let Some(child) = next {
            out.push(child);
            next = self.nodes[child.0].next_sibling;
        }
        out
    }

    /// Lowercase tag name when the node is an element.
    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Create a detached element node.
    pub fn create_element(&mut self, name: &str, attrs: &[(&str, &str)]) -> NodeId {
        self.push(NodeKind::Element {
            name: name.to_ascii_lowercase(),
            attrs: attrs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        })
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()))
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);

        let last = self.nodes[parent.0].last_child;
        self.nodes[child.0].parent = Some(parent);
        self.nodes[child.0].prev_sibling = last;
        match last {
            Some(last) => self.nodes[last.0].next_sibling = Some(child),
            None => self.nodes[parent.0].first_child = Some(child),
        }
        self.nodes[parent.0].last_child = Some(child);
    }

    /// Insert `node` immediately before `anchor` in the anchor's parent.
    ///
    /// Returns `false` (leaving the tree untouched) when `anchor` is detached
    /// or is `node` itself.
    pub fn insert_before(&mut self, anchor: NodeId, node: NodeId) -> bool {
        if anchor == node {
            return false;
        }
        let Some(parent) = self.parent(anchor) else {
            return false;
        };
        self.detach(node);

        let prev = self.nodes[anchor.0].prev_sibling;
        self.nodes[node.0].parent = Some(parent);
        self.nodes[node.0].prev_sibling = prev;
        self.nodes[node.0].next_sibling = Some(anchor);
        self.nodes[anchor.0].prev_sibling = Some(node);
        match prev {
            Some(prev) => self.nodes[prev.0].next_sibling = Some(node),
            None => self.nodes[parent.0].first_child = Some(node),
        }
        true
    }

    /// Replace a node by its children, in order, then detach it.
    ///
    /// Returns the promoted children. A detached node is left as it is and
    /// nothing is promoted.
    pub fn promote_children(&mut self, id: NodeId) -> Vec<NodeId> {
        let Some(parent) = self.parent(id) else {
            return Vec::new();
        };
        let children = self.children(id);
        let (Some(first), Some(last)) = (children.first().copied(), children.last().copied()) else {
            self.detach(id);
            return children;
        };

        for &child in &children {
            self.nodes[child.0].parent = Some(parent);
        }

        let prev = self.nodes[id.0].prev_sibling;
        let next = self.nodes[id.0].next_sibling;
        self.nodes[first.0].prev_sibling = prev;
        self.nodes[last.0].next_sibling = next;
        match prev {
            Some(prev) => self.nodes[prev.0].next_sibling = Some(first),
            None => self.nodes[parent.0].first_child = Some(first),
        }
        match next {
            Some(next) => self.nodes[next.0].prev_sibling = Some(last),
            None => self.nodes[parent.0].last_child = Some(last),
        }

        let node = &mut self.nodes[id.0];
        node.parent = None;
        node.prev_sibling = None;
        node.next_sibling = None;
        node.first_child = None;
        node.last_child = None;
        children
    }

    /// Remove a node (with its subtree) from its parent.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.nodes[id.0].parent.take() else {
            return;
        };
        let prev = self.nodes[id.0].prev_sibling.take();
        let next = self.nodes[id.0].next_sibling.take();
        match prev {
            Some(prev) => self.nodes[prev.0].next_sibling = next,
            None => self.nodes[parent.0].first_child = next,
        }
        match next {
            Some(next) => self.nodes[next.0].prev_sibling = prev,
            None => self.nodes[parent.0].last_child = prev,
        }
    }

    /// Every node below `id`, in document order.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).into_iter().rev().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).into_iter().rev());
        }
        out
    }

    /// Concatenated text of the node and its descendants.
    #[must_use]
    pub fn text(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let NodeKind::Text(text) = self.kind(id) {
            out.push_str(text);
        }
        for node in self.descendants(id) {
            if let NodeKind::Text(text) = self.kind(node) {
                out.push_str(text);
            }
        }
        out
    }

    /// Serialize the children of the root as an HTML fragment.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        let mut stack: Vec<Frame> = self
            .children(self.root())
            .into_iter()
            .rev()
            .map(Frame::Open)
            .collect();

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Open(id) => self.open_node(id, &mut stack, &mut out),
                Frame::Close(id) => {
                    if let Some(name) = self.tag_name(id) {
                        out.push_str("</");
                        out.push_str(name);
                        out.push('>');
                    }
                }
            }
        }
        out
    }

    /// Write the start of a node and schedule its children and end tag.
    fn open_node(&self, id: NodeId, stack: &mut Vec<Frame>, out: &mut String) {
        match self.kind(id) {
            NodeKind::Root => {
                stack.extend(self.children(id).into_iter().rev().map(Frame::Open));
            }
            NodeKind::Text(text) => {
                html_escape::encode_text_to_string(text, out);
            }
            NodeKind::Element { name, attrs } => {
                out.push('<');
                out.push_str(name);
                for (key, value) in attrs {
                    out.push(' ');
                    out.push_str(key);
                    out.push_str("=\"");
                    html_escape::encode_double_quoted_attribute_to_string(value, out);
                    out.push('"');
                }
                out.push('>');

                if VOID_ELEMENTS.contains(&name.as_str()) {
                    return;
                }
                stack.push(Frame::Close(id));
                stack.extend(self.children(id).into_iter().rev().map(Frame::Open));
            }
        }
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(kind));
        id
    }
}

fn node_kind(node: &NodeRef) -> Option<NodeKind> {
    if node.is_element() {
        let name = node.node_name()?.to_ascii_lowercase();
        let attrs = node
            .attrs()
            .iter()
            .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
            .collect();
        Some(NodeKind::Element { name, attrs })
    } else if node.is_text() {
        Some(NodeKind::Text(node.text().to_string()))
    } else {
        None
    }
}

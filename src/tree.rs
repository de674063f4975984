//! Tagged document tree
//!
//! The central data structure of the engine: a tree of element, text and
//! raw nodes stored in an arena and addressed by index. Dialect listeners
//! rewrite nodes by replacing the node at an index, which lets them mutate
//! ancestors and splice children without intrusive pointer surgery.

use indexmap::IndexMap;
use serde::Serialize;

/// Index of a node inside a [`Tree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeId(pub(crate) usize);

/// An attribute value: a string or a bare boolean attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Str(String),
    Bool(bool),
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

/// Element attributes, kept in insertion order so output is stable.
pub type Attrs = IndexMap<String, AttrValue>;

/// A node in the tagged tree.
///
/// `Raw` nodes carry a key into the per-call hoist table instead of literal
/// content; they are never walked, escaped or re-parsed. The renderer prints
/// the key verbatim and the final substitution pass swaps it for the literal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Node {
    Element {
        tag: String,
        attrs: Attrs,
        children: Vec<NodeId>,
    },
    Text(String),
    Raw {
        key: String,
    },
}

/// Arena of tree nodes.
///
/// Node storage only grows during a transformation; "deleting" a node means
/// detaching it from its parent's child list, after which it is simply never
/// rendered.
#[derive(Debug, Default, Serialize)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Create an element node with no attributes or children.
    pub fn element(&mut self, tag: &str) -> NodeId {
        self.push(Node::Element {
            tag: tag.to_string(),
            attrs: Attrs::new(),
            children: Vec::new(),
        })
    }

    /// Create a text node.
    pub fn text(&mut self, value: impl Into<String>) -> NodeId {
        self.push(Node::Text(value.into()))
    }

    /// Create a raw node referencing a hoist table key.
    pub fn raw(&mut self, key: impl Into<String>) -> NodeId {
        self.push(Node::Raw { key: key.into() })
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Replace the node at `id` in place.
    pub fn replace(&mut self, id: NodeId, node: Node) {
        self.nodes[id.0] = node;
    }

    /// Append `child` to `id`'s children. No-op when `id` is not an element.
    pub fn append(&mut self, id: NodeId, child: NodeId) {
        if let Node::Element { children, .. } = &mut self.nodes[id.0] {
            children.push(child);
        }
    }

    /// Children of `id`; empty for text and raw nodes.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match &self.nodes[id.0] {
            Node::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// Replace the child at `index` of `parent` with `replacement` nodes.
    pub fn splice_child(&mut self, parent: NodeId, index: usize, replacement: Vec<NodeId>) {
        if let Node::Element { children, .. } = &mut self.nodes[parent.0] {
            children.splice(index..index + 1, replacement);
        }
    }

    /// Tag name of an element node.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0] {
            Node::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(&self.nodes[id.0], Node::Element { .. })
    }

    pub fn is_raw(&self, id: NodeId) -> bool {
        matches!(&self.nodes[id.0], Node::Raw { .. })
    }

    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0] {
            Node::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Set an attribute on an element node. No-op otherwise.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<AttrValue>) {
        if let Node::Element { attrs, .. } = &mut self.nodes[id.0] {
            attrs.insert(name.to_string(), value.into());
        }
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&AttrValue> {
        match &self.nodes[id.0] {
            Node::Element { attrs, .. } => attrs.get(name),
            _ => None,
        }
    }

    pub fn attr_str(&self, id: NodeId, name: &str) -> Option<&str> {
        match self.attr(id, name)? {
            AttrValue::Str(value) => Some(value),
            AttrValue::Bool(_) => None,
        }
    }

    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.attr(id, name).is_some()
    }

    /// Concatenated text of `id` and all its descendants, in reading order.
    /// Raw nodes contribute nothing.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id.0] {
            Node::Text(value) => out.push_str(value),
            Node::Element { children, .. } => {
                for child in children {
                    self.collect_text(*child, out);
                }
            }
            Node::Raw { .. } => {}
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_with_children() {
        let mut tree = Tree::new();
        let p = tree.element("p");
        let hello = tree.text("hello");
        tree.append(p, hello);

        assert_eq!(tree.tag(p), Some("p"));
        assert_eq!(tree.children(p), &[hello]);
        assert_eq!(tree.as_text(hello), Some("hello"));
    }

    #[test]
    fn test_attrs_keep_insertion_order() {
        let mut tree = Tree::new();
        let a = tree.element("a");
        tree.set_attr(a, "href", "https://example.com");
        tree.set_attr(a, "class", "onebox");

        match tree.node(a) {
            Node::Element { attrs, .. } => {
                let keys: Vec<&str> = attrs.keys().map(|k| k.as_str()).collect();
                assert_eq!(keys, vec!["href", "class"]);
            }
            _ => panic!("expected element"),
        }
    }

    #[test]
    fn test_attr_overwrite_keeps_unique_keys() {
        let mut tree = Tree::new();
        let a = tree.element("a");
        tree.set_attr(a, "href", "one");
        tree.set_attr(a, "href", "two");
        assert_eq!(tree.attr_str(a, "href"), Some("two"));
    }

    #[test]
    fn test_replace_in_place() {
        let mut tree = Tree::new();
        let p = tree.element("p");
        let a = tree.element("a");
        tree.append(p, a);

        tree.replace(a, Node::Text("plain".to_string()));
        assert_eq!(tree.as_text(a), Some("plain"));
        // The parent's child list still points at the same slot.
        assert_eq!(tree.children(p), &[a]);
    }

    #[test]
    fn test_splice_child() {
        let mut tree = Tree::new();
        let p = tree.element("p");
        let t = tree.text("a\nb");
        tree.append(p, t);

        let left = tree.text("a");
        let br = tree.element("br");
        let right = tree.text("b");
        tree.splice_child(p, 0, vec![left, br, right]);
        assert_eq!(tree.children(p), &[left, br, right]);
    }

    #[test]
    fn test_text_content_skips_raw() {
        let mut tree = Tree::new();
        let p = tree.element("p");
        let a = tree.element("a");
        let label = tree.text("link");
        tree.append(a, label);
        let raw = tree.raw("abc123");
        tree.append(p, a);
        tree.append(p, raw);

        assert_eq!(tree.text_content(p), "link");
    }
}

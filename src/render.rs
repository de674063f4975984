//! Default HTML renderer
//!
//! Serializes a tagged tree to an HTML string. Text nodes and attribute
//! values are escaped; raw nodes print their hoist key verbatim so the
//! final substitution pass can find them. Callers may swap in their own
//! renderer as long as it preserves raw-node keys.

use crate::tree::{AttrValue, Node, NodeId, Tree};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Render the children of `root` (the synthetic document node) in order.
pub fn render_document(tree: &Tree, root: NodeId) -> String {
    let mut out = String::new();
    if tree.is_element(root) {
        for child in tree.children(root) {
            render_node(tree, *child, &mut out);
        }
    } else {
        render_node(tree, root, &mut out);
    }
    out
}

/// Render a single node and its descendants.
pub fn render_node(tree: &Tree, id: NodeId, out: &mut String) {
    match tree.node(id) {
        // Comment-only text survives the walker's paragraph collapse and
        // stays a comment in the output.
        Node::Text(text) if crate::walker::is_bare_comment(text) => out.push_str(text),
        Node::Text(text) => out.push_str(&html_escape::encode_text(text)),
        Node::Raw { key } => out.push_str(key),
        Node::Element {
            tag,
            attrs,
            children,
        } => {
            out.push('<');
            out.push_str(tag);
            for (name, value) in attrs {
                match value {
                    AttrValue::Bool(true) => {
                        out.push(' ');
                        out.push_str(name);
                    }
                    AttrValue::Bool(false) => {}
                    AttrValue::Str(value) => {
                        out.push(' ');
                        out.push_str(name);
                        out.push_str("=\"");
                        out.push_str(&html_escape::encode_double_quoted_attribute(value));
                        out.push('"');
                    }
                }
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&tag.as_str()) && children.is_empty() {
                return;
            }
            for child in children {
                render_node(tree, *child, out);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_escaped() {
        let mut tree = Tree::new();
        let root = tree.element("doc");
        let p = tree.element("p");
        let t = tree.text("a < b & c");
        tree.append(root, p);
        tree.append(p, t);
        assert_eq!(render_document(&tree, root), "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn test_attributes_escaped_and_ordered() {
        let mut tree = Tree::new();
        let root = tree.element("doc");
        let a = tree.element("a");
        tree.set_attr(a, "href", "https://x.test/?a=1&b=2");
        tree.set_attr(a, "class", "onebox");
        let t = tree.text("link");
        tree.append(a, t);
        tree.append(root, a);
        assert_eq!(
            render_document(&tree, root),
            "<a href=\"https://x.test/?a=1&amp;b=2\" class=\"onebox\">link</a>"
        );
    }

    #[test]
    fn test_boolean_attribute_bare() {
        let mut tree = Tree::new();
        let root = tree.element("doc");
        let d = tree.element("details");
        tree.set_attr(d, "open", true);
        tree.set_attr(d, "hidden", false);
        tree.append(root, d);
        assert_eq!(render_document(&tree, root), "<details open></details>");
    }

    #[test]
    fn test_void_element_has_no_closing_tag() {
        let mut tree = Tree::new();
        let root = tree.element("doc");
        let br = tree.element("br");
        tree.append(root, br);
        assert_eq!(render_document(&tree, root), "<br>");
    }

    #[test]
    fn test_bare_comment_prints_verbatim() {
        let mut tree = Tree::new();
        let root = tree.element("doc");
        let c = tree.text("<!-- kept -->");
        tree.append(root, c);
        assert_eq!(render_document(&tree, root), "<!-- kept -->");
    }

    #[test]
    fn test_markup_between_comments_is_escaped() {
        let mut tree = Tree::new();
        let root = tree.element("doc");
        let t = tree.text("<!-- --><script>alert(1)</script><!-- -->");
        tree.append(root, t);
        assert_eq!(
            render_document(&tree, root),
            "&lt;!-- --&gt;&lt;script&gt;alert(1)&lt;/script&gt;&lt;!-- --&gt;"
        );
    }

    #[test]
    fn test_raw_key_verbatim() {
        let mut tree = Tree::new();
        let root = tree.element("doc");
        let raw = tree.raw("abc123def");
        tree.append(root, raw);
        assert_eq!(render_document(&tree, root), "abc123def");
    }
}

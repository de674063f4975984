//! Testing utilities for tree assertions
//!
//! Transformation tests usually compare final HTML strings, but tests about
//! *structure* (listener behavior, splicing, attribute placement) read much
//! better against the tree itself. [`assert_tree`] provides a fluent builder
//! for that, and [`cook_default`] runs the default registry so tests do not
//! rebuild it per case.

use once_cell::sync::Lazy;

use crate::options::CookOptions;
use crate::pipeline::{cook, cook_tree};
use crate::registry::DialectRegistry;
use crate::tree::{NodeId, Tree};

static DEFAULT_REGISTRY: Lazy<DialectRegistry> = Lazy::new(DialectRegistry::with_defaults);

/// Transform with every default dialect and default options.
pub fn cook_default(text: &str) -> String {
    cook(text, &DEFAULT_REGISTRY, &CookOptions::default())
}

/// Like [`cook_default`] but with explicit options.
pub fn cook_with(text: &str, options: &CookOptions) -> String {
    cook(text, &DEFAULT_REGISTRY, options)
}

/// Build the tree for `text` with the default registry.
pub fn tree_default(text: &str) -> Tree {
    cook_tree(text, &DEFAULT_REGISTRY, &CookOptions::default())
}

/// Assertion rooted at the document node [`cook_tree`] produces (always the
/// first node in the arena).
pub fn assert_document(tree: &Tree) -> NodeAssertion<'_> {
    assert_tree(tree, NodeId(0))
}

/// Entry point for fluent tree assertions, rooted at `node`.
pub fn assert_tree(tree: &Tree, node: NodeId) -> NodeAssertion<'_> {
    NodeAssertion {
        tree,
        node,
        context: "root".to_string(),
    }
}

pub struct NodeAssertion<'a> {
    tree: &'a Tree,
    node: NodeId,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    pub fn tag(self, expected: &str) -> Self {
        assert_eq!(
            self.tree.tag(self.node),
            Some(expected),
            "{}: expected tag <{}>, found {:?}",
            self.context,
            expected,
            self.tree.node(self.node)
        );
        self
    }

    pub fn attr(self, name: &str, expected: &str) -> Self {
        assert_eq!(
            self.tree.attr_str(self.node, name),
            Some(expected),
            "{}: expected attribute {}=\"{}\"",
            self.context,
            name,
            expected
        );
        self
    }

    pub fn no_attr(self, name: &str) -> Self {
        assert!(
            !self.tree.has_attr(self.node, name),
            "{}: expected no {} attribute",
            self.context,
            name
        );
        self
    }

    pub fn text(self, expected: &str) -> Self {
        assert_eq!(
            self.tree.text_content(self.node),
            expected,
            "{}: text content mismatch",
            self.context
        );
        self
    }

    pub fn is_text(self, expected: &str) -> Self {
        assert_eq!(
            self.tree.as_text(self.node),
            Some(expected),
            "{}: expected a text node",
            self.context
        );
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.tree.children(self.node).len();
        assert_eq!(
            actual, expected,
            "{}: expected {} children, found {}",
            self.context, expected, actual
        );
        self
    }

    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let children = self.tree.children(self.node);
        assert!(
            index < children.len(),
            "{}: child index {} out of bounds ({} children)",
            self.context,
            index,
            children.len()
        );
        assertion(NodeAssertion {
            tree: self.tree,
            node: children[index],
            context: format!("{}.children[{}]", self.context, index),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fluent_assertions_walk_structure() {
        let mut tree = Tree::new();
        let root = tree.element("doc");
        let p = tree.element("p");
        tree.set_attr(p, "class", "x");
        let t = tree.text("hi");
        tree.append(p, t);
        tree.append(root, p);

        assert_tree(&tree, root).tag("doc").child_count(1).child(0, |p| {
            p.tag("p").attr("class", "x").no_attr("id").child(0, |t| {
                t.is_text("hi");
            });
        });
    }

    #[test]
    fn test_cook_default_uses_builtin_dialects() {
        assert_eq!(cook_default("**x**"), "<p><strong>x</strong></p>");
    }
}

//! Tree walker and post-processor
//!
//! Single depth-first pass over the tagged tree. Every element node gets
//! the registered node-visited listeners (which may mutate any node via the
//! arena), then its text children run through the text post-processors,
//! then children are visited recursively while the ancestor path and
//! inside-count map are maintained around each descent.

use std::collections::HashMap;

use crate::options::CookOptions;
use crate::registry::{DialectRegistry, Event};
use crate::tree::{Node, NodeId, Tree};

/// Whether `text` is exactly one HTML comment: the `<!--` prefix, and a
/// single `-->` sitting at the very end. An earlier `-->` means live markup
/// sits between two comments and must keep normal escaping.
pub(crate) fn is_bare_comment(text: &str) -> bool {
    let text = text.trim();
    text.len() >= 7 && text.starts_with("<!--") && text.find("-->") == Some(text.len() - 3)
}

/// Per-tag nesting depth, incremented on entering a tag and decremented on
/// leaving. Cheap "am I inside tag X" queries without re-scanning the
/// ancestor path.
#[derive(Debug, Default)]
pub struct InsideCounts {
    counts: HashMap<String, usize>,
}

impl InsideCounts {
    pub fn depth(&self, tag: &str) -> usize {
        self.counts.get(tag).copied().unwrap_or(0)
    }

    pub fn inside(&self, tag: &str) -> bool {
        self.depth(tag) > 0
    }

    fn enter(&mut self, tag: &str) {
        *self.counts.entry(tag.to_string()).or_insert(0) += 1;
    }

    fn leave(&mut self, tag: &str) {
        if let Some(count) = self.counts.get_mut(tag) {
            *count = count.saturating_sub(1);
        }
    }
}

/// Walk the whole tree rooted at `root`, applying listeners and text
/// post-processors.
pub fn walk(tree: &mut Tree, root: NodeId, registry: &DialectRegistry, options: &CookOptions) {
    let mut path: Vec<NodeId> = Vec::new();
    let mut counts = InsideCounts::default();
    visit(tree, root, &mut path, &mut counts, registry, options);
}

fn visit(
    tree: &mut Tree,
    id: NodeId,
    path: &mut Vec<NodeId>,
    counts: &mut InsideCounts,
    registry: &DialectRegistry,
    options: &CookOptions,
) {
    if !tree.is_element(id) {
        return;
    }

    for listener in registry.listeners(Event::NodeVisited) {
        listener(tree, id, path, counts, options);
    }
    // A listener may have replaced this node with text (e.g. the nested
    // anchor fix); there is nothing left to descend into.
    if !tree.is_element(id) {
        return;
    }

    // Text post-processors over text children, in registration order; the
    // first one that returns a replacement wins for that child.
    let mut index = 0;
    while index < tree.children(id).len() {
        let child = tree.children(id)[index];
        let Some(text) = tree.as_text(child).map(|t| t.to_string()) else {
            index += 1;
            continue;
        };
        let mut consumed = 1;
        for processor in registry.text_post_processors() {
            if let Some(replacement) = processor(tree, &text, counts, options) {
                consumed = replacement.len();
                tree.splice_child(id, index, replacement);
                break;
            }
        }
        index += consumed.max(1);
    }

    // Recurse; the path and counts frame each descent.
    let mut index = 0;
    while index < tree.children(id).len() {
        let child = tree.children(id)[index];
        if let Some(tag) = tree.tag(child).map(|t| t.to_string()) {
            counts.enter(&tag);
            path.push(id);
            visit(tree, child, path, counts, registry, options);
            path.pop();
            counts.leave(&tag);
        }
        index += 1;
    }

    collapse_comment_only(tree, id);
    propagate_raw(tree, id);
}

// An element wrapping nothing but a bare HTML comment is replaced by the
// comment text itself (drops the spurious paragraph around comment-only
// content).
fn collapse_comment_only(tree: &mut Tree, id: NodeId) {
    let children = tree.children(id);
    if children.len() != 1 {
        return;
    }
    let only = children[0];
    let Some(text) = tree.as_text(only) else {
        return;
    };
    if is_bare_comment(text) {
        let text = text.to_string();
        tree.replace(id, Node::Text(text));
    }
}

// An element whose sole child is a raw node becomes a raw node for the same
// key, so "do not touch" status climbs through a single wrapping layer.
fn propagate_raw(tree: &mut Tree, id: NodeId) {
    let children = tree.children(id);
    if children.len() != 1 {
        return;
    }
    let only = children[0];
    if let Node::Raw { key } = tree.node(only) {
        let key = key.clone();
        tree.replace(id, Node::Raw { key });
    }
}

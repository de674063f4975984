//! Transformation pipeline
//!
//! `cook` runs the whole chain: pre-processors over the raw text,
//! tokenization into block tokens, the block-rule pass (unmatched tokens
//! fall back to plain paragraphs), the tree walk, rendering, the optional
//! sanitizer and finally hoisted-content restoration. The engine itself
//! never fails: malformed markup degrades to literal text, and the only
//! fallible step is dialect installation, which happens before any text is
//! seen.

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::hoist::HoistTable;
use crate::inline::process_inline;
use crate::options::CookOptions;
use crate::registry::DialectRegistry;
use crate::render::render_document;
use crate::tokenizer::{tokenize, BlockToken};
use crate::tree::{NodeId, Tree};
use crate::walker::walk;

/// Recursion ceiling shared by inline re-processing and interior block
/// re-parsing. Past it, content stays literal.
pub(crate) const MAX_DEPTH: usize = 20;

/// Everything a rule emitter can touch during one transformation: the tree
/// under construction, the frozen rule table, the caller's options and the
/// hoist table for raw content.
pub struct CookContext<'a> {
    pub tree: &'a mut Tree,
    pub registry: &'a DialectRegistry,
    pub options: &'a CookOptions,
    pub hoist: &'a mut HoistTable,
    pub(crate) depth: usize,
}

/// Transform `text` to an HTML string using the given rule table and
/// options.
pub fn cook(text: &str, registry: &DialectRegistry, options: &CookOptions) -> String {
    let mut tree = Tree::new();
    let mut hoist = HoistTable::new();
    let root = build_tree(&mut tree, &mut hoist, registry, options, text);
    walk(&mut tree, root, registry, options);
    let rendered = render_document(&tree, root);
    debug!(nodes = tree.len(), hoisted = hoist.len(), "rendered");
    let rendered = match (&options.sanitizer, options.sanitize) {
        (Some(sanitizer), true) => sanitizer(&rendered),
        _ => rendered,
    };
    hoist.unhoist(&rendered)
}

/// Transform `text` but stop after the tree walk, returning the tree
/// itself. Raw nodes keep their hoist keys; useful for inspecting what the
/// rules produced.
pub fn cook_tree(text: &str, registry: &DialectRegistry, options: &CookOptions) -> Tree {
    let mut tree = Tree::new();
    let mut hoist = HoistTable::new();
    let root = build_tree(&mut tree, &mut hoist, registry, options, text);
    walk(&mut tree, root, registry, options);
    tree
}

fn build_tree(
    tree: &mut Tree,
    hoist: &mut HoistTable,
    registry: &DialectRegistry,
    options: &CookOptions,
    text: &str,
) -> NodeId {
    let mut text = text.to_string();
    for pre in registry.pre_processors() {
        text = pre(text, options);
    }
    let blocks = tokenize(&text);
    debug!(blocks = blocks.len(), "tokenized");
    let root = tree.element("doc");
    let mut ctx = CookContext {
        tree,
        registry,
        options,
        hoist,
        depth: 0,
    };
    let nodes = run_block_pass(&mut ctx, blocks);
    for node in nodes {
        ctx.tree.append(root, node);
    }
    root
}

/// Run block rules over the token queue until it drains. Each iteration
/// offers the front token to every block rule in registration order; the
/// first rule that commits wins, otherwise the token becomes a paragraph.
/// Rules may push synthetic tokens back, so iterations are budgeted
/// against the initial queue length.
fn run_block_pass(ctx: &mut CookContext, blocks: Vec<BlockToken>) -> Vec<NodeId> {
    let mut queue: VecDeque<BlockToken> = blocks.into();
    let mut budget = queue.len() * 8 + 64;
    let registry = ctx.registry;
    let mut out = Vec::new();

    while !queue.is_empty() {
        if budget == 0 {
            warn!(remaining = queue.len(), "block pass budget exhausted");
            while let Some(block) = queue.pop_front() {
                out.push(paragraph(ctx, block.text.trim_end()));
            }
            break;
        }
        budget -= 1;

        let mut matched = false;
        for rule in registry.block_rules() {
            if let Some(nodes) = rule.try_match(&mut queue, ctx) {
                out.extend(nodes);
                matched = true;
                break;
            }
        }
        if !matched {
            if let Some(block) = queue.pop_front() {
                out.push(paragraph(ctx, block.text.trim_end()));
            }
        }
    }
    out
}

/// Inline-process `text` into a fresh `<p>` element.
pub(crate) fn paragraph(ctx: &mut CookContext, text: &str) -> NodeId {
    let p = ctx.tree.element("p");
    let children = process_inline(ctx, text);
    for child in children {
        ctx.tree.append(p, child);
    }
    p
}

/// Re-run the full block pass over interior text, for emitters whose
/// content is itself block-structured (quotes, block tags). Depth-guarded
/// the same way inline recursion is.
pub fn process_block_text(ctx: &mut CookContext, text: &str) -> Vec<NodeId> {
    if ctx.depth >= MAX_DEPTH {
        return vec![ctx.tree.text(text)];
    }
    ctx.depth += 1;
    let nodes = run_block_pass(ctx, tokenize(text));
    ctx.depth -= 1;
    nodes
}

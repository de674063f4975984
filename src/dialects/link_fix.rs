//! Nested anchor correction
//!
//! HTML forbids an `a` inside an `a`. A structural listener walks the
//! ancestor path; an anchor found nested inside another anchor is replaced
//! by its own text content.

use crate::options::CookOptions;
use crate::registry::{Event, RegistryBuilder};
use crate::tree::{Node, NodeId, Tree};
use crate::walker::InsideCounts;

pub fn install(builder: &mut RegistryBuilder) {
    builder.on(
        Event::NodeVisited,
        Box::new(
            |tree: &mut Tree,
             id: NodeId,
             path: &[NodeId],
             _counts: &InsideCounts,
             _options: &CookOptions| {
                if tree.tag(id) != Some("a") {
                    return;
                }
                if path.iter().any(|&ancestor| tree.tag(ancestor) == Some("a")) {
                    let text = tree.text_content(id);
                    tree.replace(id, Node::Text(text));
                }
            },
        ),
    );
}

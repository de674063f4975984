//! Onebox promotion
//!
//! A structural listener that marks a link as embeddable when it is the
//! only visible content on its line: the sibling before it must be a line
//! break or absent, the sibling after a line break, whitespace-only text,
//! or absent. Links inside list items or already carrying a class are
//! never promoted.

use crate::options::CookOptions;
use crate::registry::{Event, RegistryBuilder};
use crate::tree::{NodeId, Tree};
use crate::walker::InsideCounts;

pub fn install(builder: &mut RegistryBuilder) {
    builder.on(
        Event::NodeVisited,
        Box::new(
            |tree: &mut Tree,
             id: NodeId,
             path: &[NodeId],
             counts: &InsideCounts,
             _options: &CookOptions| {
                if tree.tag(id) != Some("a") || counts.inside("li") || tree.has_attr(id, "class")
                {
                    return;
                }
                let Some(&parent) = path.last() else { return };
                let siblings = tree.children(parent);
                let Some(index) = siblings.iter().position(|sibling| *sibling == id) else {
                    return;
                };
                let alone_before = index == 0 || tree.tag(siblings[index - 1]) == Some("br");
                let alone_after = match siblings.get(index + 1) {
                    None => true,
                    Some(&next) => {
                        tree.tag(next) == Some("br")
                            || tree
                                .as_text(next)
                                .map(|text| text.trim().is_empty())
                                .unwrap_or(false)
                    }
                };
                if alone_before && alone_after {
                    tree.set_attr(id, "class", "onebox");
                }
            },
        ),
    );
}

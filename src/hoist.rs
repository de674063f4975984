//! Raw-content hoisting
//!
//! Rendered or pre-formatted content that must never be re-parsed, escaped
//! or sanitized is replaced by a content-hash key for the duration of one
//! transformation. The hoist table lives exactly as long as a single cook
//! call and substitutes literals back in as the final step, after the
//! sanitizer has run.

use std::collections::HashMap;

use crate::tree::{NodeId, Tree};

/// Per-call table of hoisted content keyed by content hash.
///
/// Hash collisions are not defended against; blake3 keeps the collision
/// probability negligible at realistic content sizes.
#[derive(Debug, Default)]
pub struct HoistTable {
    entries: HashMap<String, String>,
}

impl HoistTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `content` and return a raw node wrapping its key.
    pub fn hoist(&mut self, tree: &mut Tree, content: impl Into<String>) -> NodeId {
        let content = content.into();
        let key = blake3::hash(content.as_bytes()).to_hex().to_string();
        self.entries.insert(key.clone(), content);
        tree.raw(key)
    }

    /// Substitute every key occurrence in `rendered` with its literal
    /// content. Repeats until stable so hoisted content containing other
    /// keys resolves fully; bounded by the entry count.
    pub fn unhoist(&self, rendered: &str) -> String {
        if self.entries.is_empty() {
            return rendered.to_string();
        }
        let mut out = rendered.to_string();
        for _ in 0..=self.entries.len() {
            let mut changed = false;
            for (key, content) in &self.entries {
                if out.contains(key.as_str()) {
                    out = out.replace(key.as_str(), content);
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

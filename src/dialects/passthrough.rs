//! HTML block passthrough
//!
//! A small allowlist of HTML block tags (tables and embedded media) passes
//! through untouched: the whole construct, opening tag through closing tag,
//! is reassembled and hoisted verbatim. Anything not on the allowlist stays
//! subject to normal text escaping.

use std::sync::Arc;

use regex::Regex;

use crate::block::{BlockMatch, BlockRule};
use crate::pipeline::CookContext;
use crate::registry::RegistryBuilder;

const ALLOWED_TAGS: &[&str] = &["table", "iframe", "video", "audio"];

pub fn install(builder: &mut RegistryBuilder) {
    for tag in ALLOWED_TAGS {
        let anchor = Regex::new(&format!(r"(?i)(<{}\b[^>]*>)", tag)).expect("passthrough pattern");
        let closing: Arc<str> = Arc::from(format!("</{}>", tag));
        let terminator = closing.to_string();
        let rule_name = format!("passthrough-{}", tag);
        builder.register_block(BlockRule::new(
            &rule_name,
            anchor,
            &terminator,
            move |lines: &[String], m: &BlockMatch, ctx: &mut CookContext| {
                let opening = m.capture(0)?;
                let mut html = String::from(opening);
                let interior = lines.join("\n");
                if !interior.is_empty() {
                    html.push('\n');
                    html.push_str(&interior);
                }
                html.push('\n');
                html.push_str(&closing);
                Some(vec![ctx.hoist.hoist(ctx.tree, html)])
            },
        ));
    }
}

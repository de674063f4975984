//! BBCode framework
//!
//! Generic `[tag]...[/tag]` registration helpers, plus the default tag set
//! (`b`, `i`, `u`, `s` inline, `code` block). Inline pairs register the
//! lower- and uppercase spelling of each delimiter; block rules match any
//! casing through a `(?i)` anchor and the block engine's case-insensitive
//! terminator search. The block helper also exposes the optional `=value`
//! parameter segment to its emitter.

use std::sync::Arc;

use regex::Regex;

use crate::block::{BlockMatch, BlockRule};
use crate::inline::InlineRule;
use crate::pipeline::{process_block_text, CookContext};
use crate::registry::RegistryBuilder;
use crate::tree::NodeId;

/// Register `[name]...[/name]` as an inline delimiter pair, both spellings.
pub fn register_inline_tag<F>(
    builder: &mut RegistryBuilder,
    name: &str,
    raw_contents: bool,
    emit: F,
) where
    F: Fn(Vec<NodeId>, &mut CookContext<'_>) -> Option<Vec<NodeId>> + Send + Sync + 'static,
{
    let emit = Arc::new(emit);
    for spelling in [name.to_lowercase(), name.to_uppercase()] {
        let start = format!("[{}]", spelling);
        let stop = format!("[/{}]", spelling);
        let emit = emit.clone();
        builder.register_inline(InlineRule::between(
            &start,
            &stop,
            raw_contents,
            move |contents: Vec<NodeId>, ctx: &mut CookContext| emit(contents, ctx),
        ));
    }
}

/// Register `[name]` / `[name=value]` ... `[/name]` as a block rule. The
/// anchor matches any casing and the block engine's terminator search is
/// case-insensitive, so mixed-case nestings keep a correct open count. The
/// emitter receives the parameter segment (if any) and the interior: raw as
/// a single text node, or re-run through the block pipeline. With
/// `unwrap_paragraph`, an interior that reduced to a single paragraph is
/// unwrapped to its children.
pub fn register_block_tag<F>(
    builder: &mut RegistryBuilder,
    name: &str,
    raw_contents: bool,
    unwrap_paragraph: bool,
    emit: F,
) where
    F: Fn(Option<&str>, Vec<NodeId>, &mut CookContext<'_>) -> Option<Vec<NodeId>>
        + Send
        + Sync
        + 'static,
{
    let name = name.to_lowercase();
    let anchor = Regex::new(&format!(
        r#"(?i)\[{}(?:=([^\]]*))?\]"#,
        regex::escape(&name)
    ))
    .expect("bbcode anchor pattern");
    let terminator = format!("[/{}]", name);
    let rule_name = format!("bbcode-{}", name);
    builder.register_block(BlockRule::new(
        &rule_name,
        anchor,
        &terminator,
        move |lines: &[String], m: &BlockMatch, ctx: &mut CookContext| {
            let interior = lines.join("\n");
            let mut contents = if raw_contents {
                vec![ctx.tree.text(interior)]
            } else {
                process_block_text(ctx, &interior)
            };
            if unwrap_paragraph && contents.len() == 1 && ctx.tree.tag(contents[0]) == Some("p") {
                contents = ctx.tree.children(contents[0]).to_vec();
            }
            emit(m.capture(0), contents, ctx)
        },
    ));
}

/// Default BBCode tags: styled inline spans and a preformatted code block.
pub fn install(builder: &mut RegistryBuilder) {
    for tag in ["b", "i", "u", "s"] {
        let class = format!("bbcode-{}", tag);
        register_inline_tag(
            builder,
            tag,
            false,
            move |contents: Vec<NodeId>, ctx: &mut CookContext| {
                let span = ctx.tree.element("span");
                ctx.tree.set_attr(span, "class", class.as_str());
                for child in contents {
                    ctx.tree.append(span, child);
                }
                Some(vec![span])
            },
        );
    }

    // The whole rendered block is hoisted as one unit so neither the
    // walker nor the sanitizer ever touches the (already escaped) interior.
    register_block_tag(
        builder,
        "code",
        true,
        false,
        |_param: Option<&str>, contents: Vec<NodeId>, ctx: &mut CookContext| {
            let mut interior = String::new();
            for node in contents {
                if let Some(text) = ctx.tree.as_text(node) {
                    interior.push_str(text);
                }
            }
            let html = format!(
                "<pre><code>{}</code></pre>",
                html_escape::encode_text(&interior)
            );
            Some(vec![ctx.hoist.hoist(ctx.tree, html)])
        },
    );
}

//! #category hashtags
//!
//! Space-or-tag boundary so a hashtag can open a line or directly follow
//! rendered markup, but `a#b` stays literal. Resolution goes through the
//! caller's hashtag lookup; unresolved slugs render as inert spans.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::inline::{Boundary, InlineRule, RegexpMatch};
use crate::pipeline::CookContext;
use crate::registry::RegistryBuilder;
use crate::tree::NodeId;

static HASHTAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#([\w-]+)").expect("hashtag pattern"));

pub fn install(builder: &mut RegistryBuilder) {
    builder.register_inline(
        InlineRule::regexp("#", HASHTAG.clone(), |m: &RegexpMatch, ctx: &mut CookContext| {
            let slug = m.capture(0)?;
            let target = ctx
                .options
                .hashtag_lookup
                .as_ref()
                .and_then(|lookup| lookup(slug));
            let node: NodeId = match target {
                Some(target) => {
                    let a = ctx.tree.element("a");
                    ctx.tree.set_attr(a, "class", "hashtag");
                    ctx.tree.set_attr(a, "data-kind", target.kind);
                    ctx.tree.set_attr(a, "href", target.href);
                    a
                }
                None => {
                    let span = ctx.tree.element("span");
                    ctx.tree.set_attr(span, "class", "hashtag");
                    span
                }
            };
            let label = ctx.tree.text(format!("#{}", slug));
            ctx.tree.append(node, label);
            Some(vec![node])
        })
        .with_boundary(Boundary::SpaceOrTag),
    );
}

//! @username mentions
//!
//! Word-boundary-gated inline match. The username is resolved through the
//! caller's mention lookup; an unknown name becomes an inert styled span
//! instead of a link.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::inline::{Boundary, InlineRule, RegexpMatch};
use crate::pipeline::CookContext;
use crate::registry::RegistryBuilder;
use crate::tree::NodeId;

static MENTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@(\w[\w.-]*)").expect("mention pattern"));

pub fn install(builder: &mut RegistryBuilder) {
    builder.register_inline(
        InlineRule::regexp("@", MENTION.clone(), |m: &RegexpMatch, ctx: &mut CookContext| {
            let name = m.capture(0)?;
            let href = ctx
                .options
                .mention_lookup
                .as_ref()
                .and_then(|lookup| lookup(name));
            let node: NodeId = match href {
                Some(href) => {
                    let a = ctx.tree.element("a");
                    ctx.tree.set_attr(a, "class", "mention");
                    ctx.tree.set_attr(a, "href", href);
                    a
                }
                None => {
                    let span = ctx.tree.element("span");
                    ctx.tree.set_attr(span, "class", "mention");
                    span
                }
            };
            let label = ctx.tree.text(format!("@{}", name));
            ctx.tree.append(node, label);
            Some(vec![node])
        })
        .with_boundary(Boundary::Word),
    );
}

//! Autolinking of bare URLs
//!
//! `http(s)://...` and `www.` runs become anchors. A candidate immediately
//! preceded by `](` is the target of a markdown-style link already being
//! written out and is left alone.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::inline::{Boundary, InlineRule, RegexpMatch};
use crate::pipeline::CookContext;
use crate::registry::RegistryBuilder;

// Last character class forbids trailing sentence punctuation from being
// swallowed into the link.
static HTTP_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^https?://[^\s<>\[\]]*[^\s<>\[\].,;:!?"')]"#).expect("url pattern"));

static WWW_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^www\.[^\s<>\[\]]*[^\s<>\[\].,;:!?"')]"#).expect("url pattern"));

pub fn install(builder: &mut RegistryBuilder) {
    builder.register_inline(
        InlineRule::regexp("http", HTTP_URL.clone(), |m: &RegexpMatch, ctx: &mut CookContext| {
            emit(ctx, m, m.full.clone())
        })
        .with_boundary(Boundary::Word),
    );
    builder.register_inline(
        InlineRule::regexp("www", WWW_URL.clone(), |m: &RegexpMatch, ctx: &mut CookContext| {
            emit(ctx, m, format!("https://{}", m.full))
        })
        .with_boundary(Boundary::Word),
    );
}

fn emit(
    ctx: &mut CookContext,
    m: &RegexpMatch,
    href: String,
) -> Option<Vec<crate::tree::NodeId>> {
    if m.preceding.ends_with("](") {
        return None;
    }
    let a = ctx.tree.element("a");
    ctx.tree.set_attr(a, "href", href);
    let label = ctx.tree.text(m.full.clone());
    ctx.tree.append(a, label);
    Some(vec![a])
}

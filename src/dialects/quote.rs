//! Quote blocks
//!
//! `[quote=user, post:1, topic:2]...[/quote]` becomes an `aside` with the
//! attribution parsed into data attributes and a title line enriched via
//! the caller's avatar and topic lookups. Lookups returning `None` simply
//! leave that enrichment out; the quote itself always renders.

use crate::pipeline::CookContext;
use crate::registry::RegistryBuilder;
use crate::tree::NodeId;

use super::bbcode::register_block_tag;

/// Attribution parsed from the parameter segment: the first bare segment
/// is the username, `key:value` segments carry the numbers.
#[derive(Debug, Default, PartialEq)]
struct Attribution {
    username: Option<String>,
    post: Option<u64>,
    topic: Option<u64>,
}

fn parse_attribution(raw: &str) -> Attribution {
    let raw = raw.trim().trim_matches('"');
    let mut attribution = Attribution::default();
    for segment in raw.split(',') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        match segment.split_once(':') {
            Some(("post", value)) => attribution.post = value.trim().parse().ok(),
            Some(("topic", value)) => attribution.topic = value.trim().parse().ok(),
            Some(_) => {}
            None => {
                if attribution.username.is_none() {
                    attribution.username = Some(segment.to_string());
                }
            }
        }
    }
    attribution
}

pub fn install(builder: &mut RegistryBuilder) {
    register_block_tag(
        builder,
        "quote",
        false,
        false,
        |param: Option<&str>, contents: Vec<NodeId>, ctx: &mut CookContext| {
            let attribution = param.map(parse_attribution).unwrap_or_default();

            let aside = ctx.tree.element("aside");
            ctx.tree.set_attr(aside, "class", "quote");
            if let Some(username) = &attribution.username {
                ctx.tree.set_attr(aside, "data-username", username.as_str());
            }
            if let Some(post) = attribution.post {
                ctx.tree.set_attr(aside, "data-post", post.to_string());
            }
            if let Some(topic) = attribution.topic {
                ctx.tree.set_attr(aside, "data-topic", topic.to_string());
            }

            if let Some(title) = build_title(ctx, &attribution) {
                ctx.tree.append(aside, title);
            }

            let blockquote = ctx.tree.element("blockquote");
            for child in contents {
                ctx.tree.append(blockquote, child);
            }
            ctx.tree.append(aside, blockquote);
            Some(vec![aside])
        },
    );
}

fn build_title(ctx: &mut CookContext, attribution: &Attribution) -> Option<NodeId> {
    let username = attribution.username.as_ref()?;
    let title = ctx.tree.element("div");
    ctx.tree.set_attr(title, "class", "title");

    let avatar = attribution
        .post
        .and_then(|post| ctx.options.avatar_lookup.as_ref().and_then(|f| f(post)));
    if let Some(src) = avatar {
        let img = ctx.tree.element("img");
        ctx.tree.set_attr(img, "class", "avatar");
        ctx.tree.set_attr(img, "src", src);
        ctx.tree.append(title, img);
    }

    let topic = attribution
        .topic
        .and_then(|topic| ctx.options.topic_lookup.as_ref().and_then(|f| f(topic)));
    match topic {
        Some(info) => {
            let label = ctx.tree.text(format!("{} in ", username));
            ctx.tree.append(title, label);
            let link = ctx.tree.element("a");
            ctx.tree.set_attr(link, "href", info.href);
            let text = ctx.tree.text(info.title);
            ctx.tree.append(link, text);
            ctx.tree.append(title, link);
        }
        None => {
            let label = ctx.tree.text(format!("{} said:", username));
            ctx.tree.append(title, label);
        }
    }
    Some(title)
}

//! Emphasis and linebreak basics
//!
//! `**bold**`, `*em*` and `` `code` `` delimiter pairs, plus the
//! legacy-linebreak post-processor that turns a single newline inside
//! paragraph text into a `br` element.

use crate::inline::InlineRule;
use crate::options::CookOptions;
use crate::pipeline::CookContext;
use crate::registry::RegistryBuilder;
use crate::tree::{NodeId, Tree};
use crate::walker::InsideCounts;

pub fn install(builder: &mut RegistryBuilder) {
    builder.register_inline(wrap("**", "strong"));
    builder.register_inline(wrap("*", "em"));
    builder.register_inline(InlineRule::between(
        "`",
        "`",
        true,
        |contents: Vec<NodeId>, ctx: &mut CookContext| {
            let code = ctx.tree.element("code");
            for child in contents {
                ctx.tree.append(code, child);
            }
            Some(vec![code])
        },
    ));

    builder.add_text_post_processor(Box::new(
        |tree: &mut Tree, text: &str, counts: &InsideCounts, options: &CookOptions| {
            if !options.legacy_linebreaks || counts.inside("pre") || !text.contains('\n') {
                return None;
            }
            let mut nodes = Vec::new();
            for (i, part) in text.split('\n').enumerate() {
                if i > 0 {
                    nodes.push(tree.element("br"));
                }
                if !part.is_empty() {
                    nodes.push(tree.text(part));
                }
            }
            Some(nodes)
        },
    ));
}

fn wrap(delimiter: &str, tag: &'static str) -> InlineRule {
    InlineRule::between(
        delimiter,
        delimiter,
        false,
        move |contents: Vec<NodeId>, ctx: &mut CookContext| {
            let element = ctx.tree.element(tag);
            for child in contents {
                ctx.tree.append(element, child);
            }
            Some(vec![element])
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::cook;
    use crate::registry::DialectRegistry;

    fn registry() -> DialectRegistry {
        let mut builder = RegistryBuilder::new();
        install(&mut builder);
        builder.build()
    }

    #[test]
    fn test_emphasis_pair() {
        let out = cook("**bold** and *em*", &registry(), &CookOptions::default());
        assert_eq!(out, "<p><strong>bold</strong> and <em>em</em></p>");
    }

    #[test]
    fn test_inline_code_contents_stay_raw() {
        let out = cook("`*x*`", &registry(), &CookOptions::default());
        assert_eq!(out, "<p><code>*x*</code></p>");
    }

    #[test]
    fn test_legacy_linebreak_inserts_br() {
        let out = cook("one\ntwo", &registry(), &CookOptions::default());
        assert_eq!(out, "<p>one<br>two</p>");
    }

    #[test]
    fn test_traditional_linebreaks_keep_newline() {
        let options = CookOptions {
            legacy_linebreaks: false,
            ..CookOptions::default()
        };
        let out = cook("one\ntwo", &registry(), &options);
        assert_eq!(out, "<p>one\ntwo</p>");
    }
}

//! End-to-end documents mixing several dialects, plus registry extension.

use std::sync::Arc;

use cooker::dialects;
use cooker::inline::InlineRule;
use cooker::testing::cook_default;
use cooker::{cook, CookContext, CookOptions, DialectRegistry, NodeId, RegistryBuilder};

#[test]
fn mixed_document_cooks_every_construct() {
    let input = "\
Hello **world**, ping @sam!

[quote=jane, post:2]
quoted *text*
[/quote]

```rust
let a = 1;
```

https://example.com/solo";

    let options = CookOptions::default()
        .with_mention_lookup(Arc::new(|name| Some(format!("/u/{}", name))));
    let registry = DialectRegistry::with_defaults();
    let out = cook(input, &registry, &options);

    assert!(out.contains("<strong>world</strong>"));
    assert!(out.contains("<a class=\"mention\" href=\"/u/sam\">@sam</a>"));
    assert!(out.contains("data-username=\"jane\""));
    assert!(out.contains("<em>text</em>"));
    assert!(out.contains("<pre><code class=\"lang-rust\">let a = 1;</code></pre>"));
    assert!(out.contains("class=\"onebox\""));
}

#[test]
fn custom_dialect_extends_the_default_set() {
    let mut builder = RegistryBuilder::new();
    dialects::install_defaults(&mut builder);
    builder.register_inline(InlineRule::between(
        "~~",
        "~~",
        false,
        |contents: Vec<NodeId>, ctx: &mut CookContext| {
            let del = ctx.tree.element("del");
            for child in contents {
                ctx.tree.append(del, child);
            }
            Some(vec![del])
        },
    ));
    let registry = builder.build();
    assert_eq!(
        cook("~~gone~~ **kept**", &registry, &CookOptions::default()),
        "<p><del>gone</del> <strong>kept</strong></p>"
    );
}

#[test]
fn reregistering_a_trigger_replaces_the_rule() {
    let mut builder = RegistryBuilder::new();
    dialects::install_defaults(&mut builder);
    builder.register_inline(InlineRule::between(
        "*",
        "*",
        false,
        |contents: Vec<NodeId>, ctx: &mut CookContext| {
            let mark = ctx.tree.element("mark");
            for child in contents {
                ctx.tree.append(mark, child);
            }
            Some(vec![mark])
        },
    ));
    let registry = builder.build();
    assert_eq!(
        cook("*x*", &registry, &CookOptions::default()),
        "<p><mark>x</mark></p>"
    );
}

#[test]
fn censored_terms_never_reach_the_output() {
    let mut builder = RegistryBuilder::new();
    dialects::install_defaults(&mut builder);
    dialects::censor::install(&mut builder, &["darn".to_string()]).unwrap();
    let registry = builder.build();
    let out = cook("well **darn** it", &registry, &CookOptions::default());
    assert_eq!(out, "<p>well <strong>■■■■</strong> it</p>");
}

#[test]
fn registry_is_shareable_across_threads() {
    let registry = Arc::new(DialectRegistry::with_defaults());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                cook(
                    &format!("thread **{}**", i),
                    &registry,
                    &CookOptions::default(),
                )
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(
            handle.join().unwrap(),
            format!("<p>thread <strong>{}</strong></p>", i)
        );
    }
}

#[test]
fn comment_only_paragraph_collapses() {
    assert_eq!(cook_default("<!-- note to self -->"), "<!-- note to self -->");
}

#[test]
fn markup_sandwiched_between_comments_is_escaped() {
    assert_eq!(
        cook_default("<!-- --><script>alert(1)</script><!-- -->"),
        "<p>&lt;!-- --&gt;&lt;script&gt;alert(1)&lt;/script&gt;&lt;!-- --&gt;</p>"
    );
}

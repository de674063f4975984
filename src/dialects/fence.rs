//! Fenced code blocks
//!
//! ```` ```lang ```` fences. The interior is escaped, wrapped in
//! `pre`/`code` with a language class from the allowlist, and hoisted as a
//! single unit so it is never re-parsed or sanitized. A fence that never
//! closes declines and renders as literal text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::block::{BlockMatch, BlockRule};
use crate::pipeline::CookContext;
use crate::registry::RegistryBuilder;

static FENCE_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^```([\w+#-]*)[ \t]*$").expect("fence pattern"));

const LANGUAGES: &[&str] = &[
    "bash", "c", "cpp", "csharp", "css", "go", "html", "java", "javascript", "js", "json",
    "kotlin", "lua", "perl", "php", "python", "ruby", "rust", "scala", "sh", "sql", "swift",
    "text", "toml", "typescript", "xml", "yaml",
];

pub fn install(builder: &mut RegistryBuilder) {
    builder.register_block(BlockRule::new(
        "fence",
        FENCE_OPEN.clone(),
        "```",
        |lines: &[String], m: &BlockMatch, ctx: &mut CookContext| {
            let lang = m.capture(0).unwrap_or("");
            let class = if LANGUAGES.contains(&lang) {
                format!("lang-{}", lang)
            } else {
                "lang-auto".to_string()
            };
            let html = format!(
                "<pre><code class=\"{}\">{}</code></pre>",
                class,
                html_escape::encode_text(&lines.join("\n"))
            );
            Some(vec![ctx.hoist.hoist(ctx.tree, html)])
        },
    ));
}

//! Quote block behavior through the public entry point: attribution
//! parsing, adjacency, nesting and lookup enrichment.

use std::sync::Arc;

use cooker::testing::{cook_default, cook_with};
use cooker::{CookOptions, TopicInfo};

#[test]
fn two_adjacent_quotes_stay_independent() {
    let out = cook_default("[quote]\nfirst\n[/quote]\n[quote]\nsecond\n[/quote]");
    assert_eq!(
        out,
        "<aside class=\"quote\"><blockquote><p>first</p></blockquote></aside>\
         <aside class=\"quote\"><blockquote><p>second</p></blockquote></aside>"
    );
}

#[test]
fn nested_quote_requires_matching_terminator() {
    let out = cook_default("[quote]\nouter\n[quote]\ninner\n[/quote]\n[/quote]");
    assert_eq!(
        out,
        "<aside class=\"quote\"><blockquote><p>outer</p>\
         <aside class=\"quote\"><blockquote><p>inner</p></blockquote></aside>\
         </blockquote></aside>"
    );
}

#[test]
fn mixed_case_nesting_closes_at_matching_depth() {
    let out = cook_default("[QUOTE]\nouter\n[quote]\ninner\n[/quote]\n[/QUOTE]");
    assert_eq!(
        out,
        "<aside class=\"quote\"><blockquote><p>outer</p>\
         <aside class=\"quote\"><blockquote><p>inner</p></blockquote></aside>\
         </blockquote></aside>"
    );
}

#[test]
fn unterminated_quote_stays_literal() {
    let out = cook_default("[quote]\nnever closed");
    assert_eq!(out, "<p>[quote]<br>never closed</p>");
}

#[test]
fn quote_interior_is_fully_processed() {
    let out = cook_default("[quote=jane]\n**strong words**\n[/quote]");
    assert_eq!(
        out,
        "<aside class=\"quote\" data-username=\"jane\">\
         <div class=\"title\">jane said:</div>\
         <blockquote><p><strong>strong words</strong></p></blockquote></aside>"
    );
}

#[test]
fn lookups_enrich_the_title() {
    let options = CookOptions::default()
        .with_avatar_lookup(Arc::new(|post| Some(format!("/a/{}.png", post))))
        .with_topic_lookup(Arc::new(|id| {
            Some(TopicInfo {
                title: format!("Thread {}", id),
                href: format!("/t/{}", id),
            })
        }));
    let out = cook_with("[quote=jane, post:4, topic:12]\nhi\n[/quote]", &options);
    assert!(out.contains("<img class=\"avatar\" src=\"/a/4.png\">"));
    assert!(out.contains("<a href=\"/t/12\">Thread 12</a>"));
}

#[test]
fn failed_lookups_fall_back_to_plain_title() {
    let options = CookOptions::default()
        .with_avatar_lookup(Arc::new(|_post| None))
        .with_topic_lookup(Arc::new(|_id| None));
    let out = cook_with("[quote=jane, post:4, topic:12]\nhi\n[/quote]", &options);
    assert!(out.contains("jane said:"));
    assert!(!out.contains("<img"));
    assert!(!out.contains("<a "));
}

#[test]
fn text_before_opener_becomes_leading_paragraph() {
    let out = cook_default("intro [quote]\nbody\n[/quote]");
    assert_eq!(
        out,
        "<p>intro</p>\
         <aside class=\"quote\"><blockquote><p>body</p></blockquote></aside>"
    );
}

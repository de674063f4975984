//! Mentions, hashtags and autolinking with injected lookups.

use std::sync::Arc;

use cooker::testing::{cook_default, cook_with};
use cooker::{CookOptions, HashtagTarget};

#[test]
fn unknown_mention_is_inert_span() {
    let options = CookOptions::default().with_mention_lookup(Arc::new(|_name| None));
    assert_eq!(
        cook_with("@unknownuser", &options),
        "<p><span class=\"mention\">@unknownuser</span></p>"
    );
}

#[test]
fn known_mention_links_to_profile() {
    let options =
        CookOptions::default().with_mention_lookup(Arc::new(|name| Some(format!("/u/{}", name))));
    assert_eq!(
        cook_with("ping @sam please", &options),
        "<p>ping <a class=\"mention\" href=\"/u/sam\">@sam</a> please</p>"
    );
}

#[test]
fn mention_mid_word_is_ignored() {
    let options =
        CookOptions::default().with_mention_lookup(Arc::new(|name| Some(format!("/u/{}", name))));
    assert_eq!(
        cook_with("mail sam@example.com", &options),
        "<p>mail sam@example.com</p>"
    );
}

#[test]
fn hashtag_resolves_through_lookup() {
    let options = CookOptions::default().with_hashtag_lookup(Arc::new(|slug| {
        Some(HashtagTarget {
            kind: "category".to_string(),
            href: format!("/c/{}", slug),
        })
    }));
    assert_eq!(
        cook_with("#support", &options),
        "<p><a class=\"hashtag\" data-kind=\"category\" href=\"/c/support\">#support</a></p>"
    );
}

#[test]
fn unresolved_hashtag_is_inert_span() {
    assert_eq!(
        cook_default("about #nothing"),
        "<p>about <span class=\"hashtag\">#nothing</span></p>"
    );
}

#[test]
fn bare_url_is_autolinked_inside_text() {
    assert_eq!(
        cook_default("docs at https://example.org/guide here"),
        "<p>docs at <a href=\"https://example.org/guide\">https://example.org/guide</a> here</p>"
    );
}

#[test]
fn www_url_gains_https_scheme() {
    assert_eq!(
        cook_default("visit www.example.org soon"),
        "<p>visit <a href=\"https://www.example.org\">www.example.org</a> soon</p>"
    );
}

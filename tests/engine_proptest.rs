//! Property-based tests over the whole transformation.

use proptest::prelude::*;

use cooker::testing::cook_default;
use cooker::{cook, CookOptions, DialectRegistry};

proptest! {
    /// The engine never panics and never leaks hoist keys, whatever the
    /// input text looks like.
    #[test]
    fn cook_never_panics(input in "\\PC{0,300}") {
        let out = cook_default(&input);
        prop_assert!(!out
            .split(|c: char| !c.is_ascii_hexdigit())
            .any(|run| run.len() == 64));
    }

    /// Adversarial delimiter runs terminate and produce output.
    #[test]
    fn delimiter_noise_terminates(stars in "[*`\\[\\]@#]{0,120}") {
        let _ = cook_default(&stars);
    }

    /// Word content without any trigger characters round-trips into a
    /// single paragraph, unchanged.
    #[test]
    fn plain_words_pass_through(words in "[a-zA-Z0-9 ]{1,80}") {
        prop_assume!(!words.trim().is_empty());
        let registry = DialectRegistry::with_defaults();
        let out = cook(&words, &registry, &CookOptions::default());
        prop_assert_eq!(out, format!("<p>{}</p>", words.trim_end()));
    }

    /// An unterminated bold marker always stays literal.
    #[test]
    fn unbalanced_bold_stays_literal(body in "[a-z ]{1,40}") {
        prop_assume!(!body.contains("**"));
        prop_assume!(!body.trim().is_empty());
        let input = format!("**{}", body);
        let out = cook_default(&input);
        let expected = format!("**{}", body.trim_end());
        prop_assert!(out.contains(&expected));
        prop_assert!(!out.contains("<strong>"));
    }
}

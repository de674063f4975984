//! Term censoring
//!
//! Pre-processing pass over the raw text, before any tree exists. The term
//! list is compiled into one alternation pattern; every whole-word match is
//! blanked with one `■` per censored character so text length and layout
//! are preserved.

use regex::Regex;

use crate::options::CookOptions;
use crate::registry::{DialectError, RegistryBuilder};

const BLANK: &str = "\u{25A0}";

/// Compile `terms` and register the censoring pre-processor. An empty term
/// list installs nothing.
pub fn install(builder: &mut RegistryBuilder, terms: &[String]) -> Result<(), DialectError> {
    if terms.is_empty() {
        return Ok(());
    }
    let alternation = terms
        .iter()
        .map(|term| regex::escape(term))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = Regex::new(&format!(r"(?i)\b(?:{})\b", alternation))
        .map_err(|error| DialectError::InvalidPattern(error.to_string()))?;
    builder.add_pre_processor(Box::new(move |text: String, _options: &CookOptions| {
        pattern
            .replace_all(&text, |caps: &regex::Captures| {
                BLANK.repeat(caps[0].chars().count())
            })
            .into_owned()
    }));
    Ok(())
}

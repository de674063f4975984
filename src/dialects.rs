//! Built-in dialects
//!
//! Each dialect exposes an `install` function that registers its rules
//! against a [`RegistryBuilder`]. `install_defaults` wires up the standard
//! set; callers wanting a different mix build their own registry from the
//! individual installers.

pub mod autolink;
pub mod basics;
pub mod bbcode;
pub mod censor;
pub mod fence;
pub mod hashtag;
pub mod link_fix;
pub mod mention;
pub mod onebox;
pub mod passthrough;
pub mod quote;

use crate::registry::RegistryBuilder;

/// Install every default dialect. The censor is not part of the default
/// set; it needs a term list, see [`censor::install`].
pub fn install_defaults(builder: &mut RegistryBuilder) {
    fence::install(builder);
    quote::install(builder);
    bbcode::install(builder);
    passthrough::install(builder);
    basics::install(builder);
    autolink::install(builder);
    mention::install(builder);
    hashtag::install(builder);
    onebox::install(builder);
    link_fix::install(builder);
}

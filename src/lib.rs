//! # cooker
//!
//! An extensible markup dialect engine: raw text goes in, a tagged tree is
//! built by pluggable block and inline rules, structural listeners rewrite
//! the tree, and the result is rendered to HTML with protected ("hoisted")
//! raw segments restored at the very end.
//!
//! ```rust
//! use cooker::{cook, CookOptions, DialectRegistry};
//!
//! let registry = DialectRegistry::with_defaults();
//! let html = cook("**hello**", &registry, &CookOptions::default());
//! assert_eq!(html, "<p><strong>hello</strong></p>");
//! ```
//!
//! Dialects are installed once at startup through a [`RegistryBuilder`];
//! the frozen [`DialectRegistry`] is then shared by reference across any
//! number of concurrent `cook` calls.

pub mod block;
pub mod dialects;
pub mod hoist;
pub mod inline;
pub mod options;
pub mod pipeline;
pub mod registry;
pub mod render;
pub mod testing;
pub mod tokenizer;
pub mod tree;
pub mod walker;

pub use options::{CookOptions, HashtagTarget, TopicInfo};
pub use pipeline::{cook, cook_tree, process_block_text, CookContext};
pub use registry::{DialectError, DialectRegistry, Event, RegistryBuilder};
pub use tree::{AttrValue, Node, NodeId, Tree};

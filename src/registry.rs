//! Dialect registry
//!
//! Dialects register block handlers, inline trigger handlers and lifecycle
//! listeners against a [`RegistryBuilder`]; `build()` freezes the result
//! into an immutable [`DialectRegistry`] that every cook call receives by
//! reference. Registration happens once at startup; transformation calls
//! only read the table, so concurrent cooks are safe.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;

use crate::block::BlockRule;
use crate::inline::InlineRule;
use crate::options::CookOptions;
use crate::tree::{NodeId, Tree};
use crate::walker::InsideCounts;

/// Structural events lifecycle listeners can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    NodeVisited,
}

/// Listener invoked for every element node during the tree walk. Receives
/// the tree, the node, the ancestor path (root first) and the inside-count
/// map; may mutate any node in the tree.
pub type Listener =
    Box<dyn Fn(&mut Tree, NodeId, &[NodeId], &InsideCounts, &CookOptions) + Send + Sync>;

/// Post-processor run over text-node children during the walk. Returning
/// `Some(nodes)` splices the replacement in place of the text child;
/// `None` leaves it untouched.
pub type TextPostProcessor = Box<
    dyn Fn(&mut Tree, &str, &InsideCounts, &CookOptions) -> Option<Vec<NodeId>> + Send + Sync,
>;

/// Whole-text rewrite applied before tokenization (e.g. censoring).
pub type PreProcessor = Box<dyn Fn(String, &CookOptions) -> String + Send + Sync>;

/// Error raised while installing a dialect.
#[derive(Debug, Clone, PartialEq)]
pub enum DialectError {
    InvalidPattern(String),
}

impl fmt::Display for DialectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialectError::InvalidPattern(msg) => write!(f, "Invalid dialect pattern: {}", msg),
        }
    }
}

impl std::error::Error for DialectError {}

/// Mutable registration surface handed to dialect installers.
#[derive(Default)]
pub struct RegistryBuilder {
    inline: IndexMap<String, InlineRule>,
    blocks: IndexMap<String, BlockRule>,
    listeners: Vec<(Event, Listener)>,
    text_post: Vec<TextPostProcessor>,
    pre: Vec<PreProcessor>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an inline rule under its trigger. Re-registering the same
    /// trigger replaces the handler without changing its position.
    pub fn register_inline(&mut self, rule: InlineRule) {
        self.inline.insert(rule.trigger.clone(), rule);
    }

    /// Register a block rule under its name, replacing any previous rule
    /// with that name.
    pub fn register_block(&mut self, rule: BlockRule) {
        self.blocks.insert(rule.name.clone(), rule);
    }

    /// Subscribe a lifecycle listener. Listeners run in registration order.
    pub fn on(&mut self, event: Event, listener: Listener) {
        self.listeners.push((event, listener));
    }

    pub fn add_text_post_processor(&mut self, processor: TextPostProcessor) {
        self.text_post.push(processor);
    }

    pub fn add_pre_processor(&mut self, processor: PreProcessor) {
        self.pre.push(processor);
    }

    /// Freeze into an immutable registry, indexing inline triggers by their
    /// first character (longest trigger first within a bucket).
    pub fn build(self) -> DialectRegistry {
        let mut trigger_index: HashMap<char, Vec<String>> = HashMap::new();
        for trigger in self.inline.keys() {
            if let Some(first) = trigger.chars().next() {
                trigger_index.entry(first).or_default().push(trigger.clone());
            }
        }
        for bucket in trigger_index.values_mut() {
            bucket.sort_by(|a, b| b.len().cmp(&a.len()));
        }
        DialectRegistry {
            inline: self.inline,
            blocks: self.blocks,
            listeners: self.listeners,
            text_post: self.text_post,
            pre: self.pre,
            trigger_index,
        }
    }
}

/// Immutable, shareable table of all registered dialect rules.
pub struct DialectRegistry {
    inline: IndexMap<String, InlineRule>,
    blocks: IndexMap<String, BlockRule>,
    listeners: Vec<(Event, Listener)>,
    text_post: Vec<TextPostProcessor>,
    pre: Vec<PreProcessor>,
    trigger_index: HashMap<char, Vec<String>>,
}

impl DialectRegistry {
    /// Registry with every built-in dialect installed.
    pub fn with_defaults() -> Self {
        let mut builder = RegistryBuilder::new();
        crate::dialects::install_defaults(&mut builder);
        builder.build()
    }

    /// Inline triggers starting with `c`, longest first.
    pub(crate) fn triggers_for(&self, c: char) -> Option<&[String]> {
        self.trigger_index.get(&c).map(|bucket| bucket.as_slice())
    }

    pub(crate) fn inline_rule(&self, trigger: &str) -> Option<&InlineRule> {
        self.inline.get(trigger)
    }

    pub(crate) fn block_rules(&self) -> impl Iterator<Item = &BlockRule> {
        self.blocks.values()
    }

    pub(crate) fn listeners(&self, event: Event) -> impl Iterator<Item = &Listener> {
        self.listeners
            .iter()
            .filter(move |(e, _)| *e == event)
            .map(|(_, listener)| listener)
    }

    pub(crate) fn text_post_processors(&self) -> &[TextPostProcessor] {
        &self.text_post
    }

    pub(crate) fn pre_processors(&self) -> &[PreProcessor] {
        &self.pre
    }

    pub fn inline_rule_count(&self) -> usize {
        self.inline.len()
    }

    pub fn block_rule_count(&self) -> usize {
        self.blocks.len()
    }
}

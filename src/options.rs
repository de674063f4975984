//! Per-call options context
//!
//! One immutable record threaded through a whole transformation: rendering
//! flags plus the externally supplied lookup callbacks dialects use to
//! enrich output. Lookups return `Option`; `None` means "lookup failed" and
//! selects the inert fallback path rather than aborting the transformation.

use std::fmt;
use std::sync::Arc;

/// Final HTML sanitizer, applied before hoisted content is restored.
pub type Sanitizer = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// `username -> profile href`
pub type MentionLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Resolved hashtag target.
#[derive(Debug, Clone, PartialEq)]
pub struct HashtagTarget {
    pub kind: String,
    pub href: String,
}

/// `slug -> target`
pub type HashtagLookup = Arc<dyn Fn(&str) -> Option<HashtagTarget> + Send + Sync>;

/// `post number -> avatar image url`
pub type AvatarLookup = Arc<dyn Fn(u64) -> Option<String> + Send + Sync>;

/// Resolved topic metadata for quote titles.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicInfo {
    pub title: String,
    pub href: String,
}

/// `topic id -> topic info`
pub type TopicLookup = Arc<dyn Fn(u64) -> Option<TopicInfo> + Send + Sync>;

/// Immutable per-call configuration. Create once, pass by reference into
/// [`crate::cook`]; never shared between concurrent calls by anything that
/// would make them observe each other.
#[derive(Clone)]
pub struct CookOptions {
    /// Run the sanitizer over the rendered HTML (before unhoisting).
    pub sanitize: bool,
    pub sanitizer: Option<Sanitizer>,
    /// Legacy linebreak semantics: a single newline inside a paragraph
    /// becomes a `<br>`. Off restores traditional blank-line-only breaks.
    pub legacy_linebreaks: bool,
    pub mention_lookup: Option<MentionLookup>,
    pub hashtag_lookup: Option<HashtagLookup>,
    pub avatar_lookup: Option<AvatarLookup>,
    pub topic_lookup: Option<TopicLookup>,
}

impl Default for CookOptions {
    fn default() -> Self {
        Self {
            sanitize: false,
            sanitizer: None,
            legacy_linebreaks: true,
            mention_lookup: None,
            hashtag_lookup: None,
            avatar_lookup: None,
            topic_lookup: None,
        }
    }
}

impl fmt::Debug for CookOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookOptions")
            .field("sanitize", &self.sanitize)
            .field("sanitizer", &self.sanitizer.is_some())
            .field("legacy_linebreaks", &self.legacy_linebreaks)
            .field("mention_lookup", &self.mention_lookup.is_some())
            .field("hashtag_lookup", &self.hashtag_lookup.is_some())
            .field("avatar_lookup", &self.avatar_lookup.is_some())
            .field("topic_lookup", &self.topic_lookup.is_some())
            .finish()
    }
}

impl CookOptions {
    pub fn with_sanitizer(mut self, sanitizer: Sanitizer) -> Self {
        self.sanitize = true;
        self.sanitizer = Some(sanitizer);
        self
    }

    pub fn with_mention_lookup(mut self, lookup: MentionLookup) -> Self {
        self.mention_lookup = Some(lookup);
        self
    }

    pub fn with_hashtag_lookup(mut self, lookup: HashtagLookup) -> Self {
        self.hashtag_lookup = Some(lookup);
        self
    }

    pub fn with_avatar_lookup(mut self, lookup: AvatarLookup) -> Self {
        self.avatar_lookup = Some(lookup);
        self
    }

    pub fn with_topic_lookup(mut self, lookup: TopicLookup) -> Self {
        self.topic_lookup = Some(lookup);
        self
    }
}

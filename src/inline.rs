//! Inline matching engine
//!
//! Text nodes are scanned character by character; when a registered trigger
//! string matches at the scan position, the rule's matcher is attempted.
//! Two matching modes exist: a regex anchored at the trigger, and a
//! start/stop delimiter pair whose interior is recursively re-processed
//! unless the rule declares it raw. Emitters return `None` to decline, in
//! which case the original text passes through unchanged.

use regex::Regex;

use crate::pipeline::{CookContext, MAX_DEPTH};
use crate::tree::NodeId;

/// Restriction on the character immediately preceding a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Boundary {
    /// No check.
    #[default]
    None,
    /// Reject when preceded by a word character or `/` (no mid-word
    /// triggering).
    Word,
    /// Reject unless preceded by whitespace.
    Space,
    /// Reject unless preceded by whitespace or `>` (may directly follow a
    /// rendered tag).
    SpaceOrTag,
}

/// A successful regex match handed to an emitter: owned capture groups plus
/// the pending literal text preceding the match (some rules reject based on
/// what comes right before them).
#[derive(Debug, Clone)]
pub struct RegexpMatch {
    pub full: String,
    pub captures: Vec<Option<String>>,
    pub preceding: String,
}

impl RegexpMatch {
    pub fn capture(&self, index: usize) -> Option<&str> {
        self.captures.get(index).and_then(|c| c.as_deref())
    }
}

pub type RegexpEmitter =
    Box<dyn Fn(&RegexpMatch, &mut CookContext<'_>) -> Option<Vec<NodeId>> + Send + Sync>;

pub type BetweenEmitter =
    Box<dyn Fn(Vec<NodeId>, &mut CookContext<'_>) -> Option<Vec<NodeId>> + Send + Sync>;

pub enum InlineMatcher {
    Regexp {
        pattern: Regex,
        emitter: RegexpEmitter,
    },
    Between {
        stop: String,
        raw_contents: bool,
        emitter: BetweenEmitter,
    },
}

/// An inline rule: the trigger it is indexed under, an optional boundary
/// policy and the matcher itself.
pub struct InlineRule {
    pub trigger: String,
    pub boundary: Boundary,
    pub matcher: InlineMatcher,
}

impl InlineRule {
    /// Rule matching `pattern` at the scan position. The pattern must match
    /// at offset zero of the remaining text (anchor it with `^`).
    pub fn regexp<F>(trigger: &str, pattern: Regex, emitter: F) -> Self
    where
        F: Fn(&RegexpMatch, &mut CookContext<'_>) -> Option<Vec<NodeId>> + Send + Sync + 'static,
    {
        Self {
            trigger: trigger.to_string(),
            boundary: Boundary::None,
            matcher: InlineMatcher::Regexp {
                pattern,
                emitter: Box::new(emitter),
            },
        }
    }

    /// Delimiter-pair rule. `start` doubles as the trigger; interior text is
    /// recursively inline-processed unless `raw_contents` is set.
    pub fn between<F>(start: &str, stop: &str, raw_contents: bool, emitter: F) -> Self
    where
        F: Fn(Vec<NodeId>, &mut CookContext<'_>) -> Option<Vec<NodeId>> + Send + Sync + 'static,
    {
        Self {
            trigger: start.to_string(),
            boundary: Boundary::None,
            matcher: InlineMatcher::Between {
                stop: stop.to_string(),
                raw_contents,
                emitter: Box::new(emitter),
            },
        }
    }

    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }
}

/// Scan `text` against all registered inline rules, returning the resulting
/// node sequence. Unmatched text comes back as plain text nodes.
pub fn process_inline(ctx: &mut CookContext, text: &str) -> Vec<NodeId> {
    if ctx.depth >= MAX_DEPTH {
        return vec![ctx.tree.text(text)];
    }
    ctx.depth += 1;
    let registry = ctx.registry;
    let mut out: Vec<NodeId> = Vec::new();
    let mut plain = String::new();
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];
        let Some(c) = rest.chars().next() else { break };
        let mut advance: Option<(usize, Vec<NodeId>)> = None;

        if let Some(triggers) = registry.triggers_for(c) {
            for trigger in triggers {
                if !rest.starts_with(trigger.as_str()) {
                    continue;
                }
                let Some(rule) = registry.inline_rule(trigger) else {
                    continue;
                };
                if invalid_boundary(rule.boundary, plain.chars().last()) {
                    continue;
                }
                match &rule.matcher {
                    InlineMatcher::Regexp { pattern, emitter } => {
                        let Some(caps) = pattern.captures(rest) else {
                            continue;
                        };
                        let Some(m0) = caps.get(0) else { continue };
                        if m0.start() != 0 || m0.as_str().is_empty() {
                            continue;
                        }
                        let matched = RegexpMatch {
                            full: m0.as_str().to_string(),
                            captures: (1..caps.len())
                                .map(|i| caps.get(i).map(|m| m.as_str().to_string()))
                                .collect(),
                            preceding: plain.clone(),
                        };
                        if let Some(nodes) = emitter(&matched, ctx) {
                            advance = Some((m0.end(), nodes));
                        }
                    }
                    InlineMatcher::Between {
                        stop,
                        raw_contents,
                        emitter,
                    } => {
                        let interior_start = trigger.len();
                        let Some(stop_at) = find_stop(rest, stop, interior_start) else {
                            continue;
                        };
                        let interior = &rest[interior_start..stop_at];
                        // An interior that is empty or just more of the
                        // delimiter run stays literal.
                        if interior.is_empty()
                            || interior.chars().all(|ch| stop.contains(ch))
                        {
                            continue;
                        }
                        let contents = if *raw_contents {
                            vec![ctx.tree.text(interior)]
                        } else {
                            process_inline(ctx, interior)
                        };
                        if let Some(nodes) = emitter(contents, ctx) {
                            advance = Some((stop_at + stop.len(), nodes));
                        }
                    }
                }
                if advance.is_some() {
                    break;
                }
            }
        }

        match advance {
            Some((consumed, nodes)) => {
                flush_plain(ctx, &mut plain, &mut out);
                out.extend(nodes);
                pos += consumed;
            }
            None => {
                plain.push(c);
                pos += c.len_utf8();
            }
        }
    }

    flush_plain(ctx, &mut plain, &mut out);
    ctx.depth -= 1;
    out
}

fn flush_plain(ctx: &mut CookContext, plain: &mut String, out: &mut Vec<NodeId>) {
    if !plain.is_empty() {
        let text = std::mem::take(plain);
        out.push(ctx.tree.text(text));
    }
}

/// Locate the stop delimiter at or after `from`. When the candidate stop is
/// immediately followed by another occurrence of the stop delimiter, the
/// search retries just past the candidate, so runs of identical delimiter
/// characters longer than the token never cut a span short.
fn find_stop(text: &str, stop: &str, mut from: usize) -> Option<usize> {
    loop {
        let rel = text[from..].find(stop)?;
        let at = from + rel;
        let after = at + stop.len();
        if text[after..].starts_with(stop) {
            from = after;
            continue;
        }
        return Some(at);
    }
}

/// Whether `prev` (the last character of pending literal text, if any)
/// violates the rule's boundary policy. Absence of preceding text -- start
/// of input or directly after an emitted node -- always passes.
pub(crate) fn invalid_boundary(boundary: Boundary, prev: Option<char>) -> bool {
    let Some(ch) = prev else { return false };
    match boundary {
        Boundary::None => false,
        Boundary::Word => ch.is_alphanumeric() || ch == '_' || ch == '/',
        Boundary::Space => !ch.is_whitespace(),
        Boundary::SpaceOrTag => !(ch.is_whitespace() || ch == '>'),
    }
}

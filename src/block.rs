//! Block matching engine
//!
//! A block rule pairs an anchoring regex with a terminator string (compared
//! ASCII-case-insensitively, matching tag-style terminators). When the
//! anchor matches inside the first block token, the rule consumes tokens
//! until a balanced terminator is found, accumulating interior lines for
//! its emitter. Interior occurrences of the anchor keep the construct open
//! (nested same-construct openings), trailing text after the opening or the
//! terminator is pushed back as synthetic block tokens, and a missing
//! terminator declines the whole match without consuming anything.

use std::collections::VecDeque;

use regex::Regex;
use tracing::{debug, trace};

use crate::pipeline::CookContext;
use crate::tokenizer::BlockToken;
use crate::tree::NodeId;

/// Owned capture groups from the anchor match.
#[derive(Debug, Clone)]
pub struct BlockMatch {
    pub captures: Vec<Option<String>>,
}

impl BlockMatch {
    pub fn capture(&self, index: usize) -> Option<&str> {
        self.captures.get(index).and_then(|c| c.as_deref())
    }
}

pub type BlockEmitter = Box<
    dyn Fn(&[String], &BlockMatch, &mut CookContext<'_>) -> Option<Vec<NodeId>> + Send + Sync,
>;

/// A block-level rule registered under a unique name.
pub struct BlockRule {
    pub name: String,
    pub anchor: Regex,
    pub terminator: String,
    emitter: BlockEmitter,
}

impl BlockRule {
    pub fn new<F>(name: &str, anchor: Regex, terminator: &str, emitter: F) -> Self
    where
        F: Fn(&[String], &BlockMatch, &mut CookContext<'_>) -> Option<Vec<NodeId>>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: name.to_string(),
            anchor,
            terminator: terminator.to_string(),
            emitter: Box::new(emitter),
        }
    }

    /// Attempt this rule against the front of the block-token stream.
    ///
    /// On success the consumed tokens are removed from `queue` (with any
    /// unconsumed trailing text pushed back) and the produced nodes are
    /// returned. On decline the queue is left exactly as it was.
    pub(crate) fn try_match(
        &self,
        queue: &mut VecDeque<BlockToken>,
        ctx: &mut CookContext,
    ) -> Option<Vec<NodeId>> {
        let (leading, captures, remainder, remainder_line) = {
            let first = queue.front()?;
            let caps = self.anchor.captures(&first.text)?;
            let m0 = caps.get(0)?;
            let leading = first.text[..m0.start()].to_string();
            let captures: Vec<Option<String>> = (1..caps.len())
                .map(|i| caps.get(i).map(|m| m.as_str().to_string()))
                .collect();
            let mut remainder = &first.text[m0.end()..];
            let mut consumed_lines = first.text[..m0.end()].matches('\n').count();
            if let Some(stripped) = remainder.strip_prefix('\n') {
                remainder = stripped;
                consumed_lines += 1;
            }
            (
                leading,
                captures,
                remainder.to_string(),
                first.line + consumed_lines,
            )
        };

        // A terminator must exist somewhere ahead before anything is
        // consumed; otherwise the rule declines with no side effects and
        // the content stays literal.
        let needle = self.terminator.to_ascii_lowercase();
        let terminator_ahead = find_ci(&remainder, &needle).is_some()
            || queue
                .iter()
                .skip(1)
                .any(|block| find_ci(&block.text, &needle).is_some());
        if !terminator_ahead {
            trace!(rule = %self.name, "no terminator ahead, declining");
            return None;
        }

        // Consume from a working copy; the live queue is only replaced once
        // a balanced terminator is confirmed.
        let mut work: VecDeque<BlockToken> = VecDeque::with_capacity(queue.len());
        if !remainder.is_empty() {
            work.push_back(BlockToken::new(remainder, remainder_line));
        }
        work.extend(queue.iter().skip(1).cloned());

        let mut open = 0usize;
        let mut lines: Vec<String> = Vec::new();
        let mut closed = false;

        while let Some(block) = work.pop_front() {
            let text = block.text;
            let mut search_from = 0usize;
            let mut close_at = None;

            while let Some(rel) = find_ci(&text[search_from..], &needle) {
                let at = search_from + rel;
                // Openings of the same construct in the portion before this
                // terminator keep it from closing here.
                open += self.anchor.find_iter(&text[search_from..at]).count();
                if open == 0 {
                    close_at = Some(at);
                    break;
                }
                open -= 1;
                search_from = at + self.terminator.len();
            }

            match close_at {
                Some(at) => {
                    accumulate(&mut lines, &text[..at]);
                    let after_start = at + self.terminator.len();
                    let mut after = &text[after_start..];
                    let mut consumed_lines = text[..after_start].matches('\n').count();
                    if let Some(stripped) = after.strip_prefix('\n') {
                        after = stripped;
                        consumed_lines += 1;
                    }
                    if !after.trim().is_empty() {
                        work.push_front(BlockToken::new(after, block.line + consumed_lines));
                    }
                    closed = true;
                    break;
                }
                None => {
                    // Whole block is interior; the unscanned tail may still
                    // contain further openings.
                    open += self.anchor.find_iter(&text[search_from..]).count();
                    accumulate(&mut lines, &text);
                }
            }
        }

        if !closed {
            debug!(rule = %self.name, "terminator never balanced, declining");
            return None;
        }

        let mut result = Vec::new();
        if !leading.trim().is_empty() {
            result.push(crate::pipeline::paragraph(ctx, leading.trim_end()));
        }
        let matched = BlockMatch { captures };
        if let Some(nodes) = (self.emitter)(&lines, &matched, ctx) {
            result.extend(nodes);
        }
        *queue = work;
        Some(result)
    }
}

/// Locate `needle_lower` in `haystack`, comparing ASCII-case-insensitively
/// so `[/QUOTE]` closes a `[/quote]` terminator. ASCII lowercasing keeps
/// byte offsets aligned with the original text.
fn find_ci(haystack: &str, needle_lower: &str) -> Option<usize> {
    haystack.to_ascii_lowercase().find(needle_lower)
}

/// Append an interior fragment to the accumulator, line by line. Fragments
/// from separate block tokens are separated by one empty line so emitters
/// that re-parse the interior see the original paragraph breaks.
fn accumulate(lines: &mut Vec<String>, interior: &str) {
    if !lines.is_empty() {
        lines.push(String::new());
    }
    let trimmed = interior.strip_suffix('\n').unwrap_or(interior);
    if trimmed.is_empty() {
        return;
    }
    for line in trimmed.split('\n') {
        lines.push(line.to_string());
    }
}

//! Block tokenizer adapter
//!
//! Splits raw input into ordered block tokens: runs of non-blank lines
//! separated by blank lines, each carrying the line number it starts on.
//! The line lexer is a logos scanner; grouping lines into blocks mirrors
//! how the rest of the engine consumes the stream one block at a time.

use logos::Logos;
use serde::Serialize;

/// Flat line-level tokens produced by the raw text scanner.
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum RawToken {
    #[token("\n")]
    Newline,

    // Everything up to the next newline
    #[regex(r"[^\n]+")]
    Line,
}

/// One unit of the tokenizer's output stream: the block's text (interior
/// newlines preserved, no trailing newline) and its starting line number
/// (1-based).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockToken {
    pub text: String,
    pub line: usize,
}

impl BlockToken {
    pub fn new(text: impl Into<String>, line: usize) -> Self {
        Self {
            text: text.into(),
            line,
        }
    }
}

/// Tokenize raw text into blank-line-delimited block tokens.
///
/// Whitespace-only lines count as blank. Blank runs between blocks are not
/// represented; only the starting line number records where a block sat in
/// the source.
pub fn tokenize(source: &str) -> Vec<BlockToken> {
    let mut lexer = RawToken::lexer(source);
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut line = 1usize;
    let mut start_line = 1usize;
    let mut line_has_content = false;

    while let Some(token) = lexer.next() {
        match token {
            Ok(RawToken::Line) => {
                let text = lexer.slice();
                if text.trim().is_empty() {
                    flush(&mut blocks, &mut current, start_line);
                } else {
                    if current.is_empty() {
                        start_line = line;
                    }
                    current.push(text);
                }
                line_has_content = true;
            }
            Ok(RawToken::Newline) => {
                if !line_has_content {
                    // Empty physical line: block separator
                    flush(&mut blocks, &mut current, start_line);
                }
                line_has_content = false;
                line += 1;
            }
            Err(_) => {}
        }
    }
    flush(&mut blocks, &mut current, start_line);
    blocks
}

fn flush(blocks: &mut Vec<BlockToken>, current: &mut Vec<&str>, start_line: usize) {
    if current.is_empty() {
        return;
    }
    blocks.push(BlockToken::new(current.join("\n"), start_line));
    current.clear();
}

//! Line tokenizer for pasted invoice text
//!
//! Splits the text into trimmed, non-empty candidate lines. Blank lines are
//! skipped but still counted, so line numbers always refer to the position in
//! the original text.

use crate::types::LineNumber;
use std::iter::Enumerate;
use std::str::Lines;

/// One non-blank input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    /// 1-based position in the original text
    pub line_number: LineNumber,

    /// Line content with surrounding whitespace removed
    pub text: &'a str,
}

/// Iterator over the non-blank lines of a text
///
/// Lazy and cheap to clone. A clone is an independent cursor over the same
/// text, and calling [`tokenize`] again starts over from the first line.
#[derive(Debug, Clone)]
pub struct RawLines<'a> {
    inner: Enumerate<Lines<'a>>,
}

impl<'a> Iterator for RawLines<'a> {
    type Item = RawLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for (index, line) in self.inner.by_ref() {
            let text = line.trim();
            if !text.is_empty() {
                return Some(RawLine {
                    line_number: index + 1,
                    text,
                });
            }
        }
        None
    }
}

/// Tokenize pasted text into non-blank lines
///
/// Accepts both `\n` and `\r\n` line endings.
pub fn tokenize(text: &str) -> RawLines<'_> {
    RawLines {
        inner: text.lines().enumerate(),
    }
}

//! Tokens and located occurrences

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// An identifier-shaped word taken from the buffer or the selection
///
/// Always non-empty and trimmed. Whether it only contains identifier
/// characters is checked by the literal matcher, which refuses to search for
/// anything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token(String);

impl Token {
    /// Create a token, trimming surrounding whitespace
    ///
    /// Returns `None` for empty or whitespace-only input.
    pub fn new(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A located literal occurrence of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Match {
    /// Byte offset into the buffer
    pub offset: usize,
    /// Length in bytes
    pub length: usize,
    /// 0-based line containing `offset`
    pub line: usize,
}

impl Match {
    pub fn new(offset: usize, length: usize, line: usize) -> Self {
        Self {
            offset,
            length,
            line,
        }
    }

    /// Exclusive end offset
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }
}

/// Byte offsets of line starts, for offset → line lookups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(newline_positions(text).map(|i| i + 1));
        Self { line_starts }
    }

    /// 0-based line containing `offset`
    ///
    /// Offsets past the end map to the last line.
    pub fn line_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        }
    }

    /// Number of lines (an empty buffer has one line)
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

fn newline_positions(text: &str) -> impl Iterator<Item = usize> + '_ {
    text.bytes()
        .enumerate()
        .filter(|(_, b)| *b == b'\n')
        .map(|(i, _)| i)
}

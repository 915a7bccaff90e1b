//! Identifier-shaped word boundaries
//!
//! A word here is a run of `[A-Za-z0-9_$]`. All of these characters are ASCII,
//! so word boundaries always fall on UTF-8 character boundaries and the
//! functions below can work on bytes.

use std::ops::Range;

/// Whether a byte belongs to an identifier-shaped word
pub fn is_word_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

/// Whether every character of `text` is a word character (and there is at least one)
pub fn is_word(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(is_word_char)
}

/// Find the start of the word containing `pos`
///
/// Walks left while the preceding byte is a word character.
pub fn find_word_start(text: &str, pos: usize) -> usize {
    let bytes = text.as_bytes();
    let mut start = pos.min(bytes.len());
    while start > 0 && is_word_char(bytes[start - 1]) {
        start -= 1;
    }
    start
}

/// Find the end (exclusive) of the word containing `pos`
pub fn find_word_end(text: &str, pos: usize) -> usize {
    let bytes = text.as_bytes();
    let mut end = pos.min(bytes.len());
    while end < bytes.len() && is_word_char(bytes[end]) {
        end += 1;
    }
    end
}

/// Byte range of the word containing or touching `position`
///
/// The cursor sits between characters, so a word immediately to the left of
/// the cursor (`foo|`) counts as touching it. Returns `None` when neither
/// neighbour is a word character.
pub fn word_range_at(text: &str, position: usize) -> Option<Range<usize>> {
    let bytes = text.as_bytes();
    if position > bytes.len() {
        return None;
    }

    let on_word = position < bytes.len() && is_word_char(bytes[position]);
    let after_word = position > 0 && is_word_char(bytes[position - 1]);
    if !on_word && !after_word {
        return None;
    }

    let start = find_word_start(text, position);
    let end = find_word_end(text, position);
    (start < end).then_some(start..end)
}

/// The token touching `position`, or an empty string if there is none
pub fn token_at(text: &str, position: usize) -> String {
    word_range_at(text, position)
        .map(|range| text[range].trim().to_string())
        .unwrap_or_default()
}

/// End position of the word touching `position`, or `position` itself
///
/// Symbol resolution is anchored on the end of a word, the same way a
/// completion engine evaluates the expression that ends at the caret.
pub fn word_end_position(text: &str, position: usize) -> usize {
    word_range_at(text, position)
        .map(|range| range.end)
        .unwrap_or(position)
}

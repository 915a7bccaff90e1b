//! Literal occurrence search
//!
//! Finds every textual occurrence of a token in a buffer. This is the cheap
//! first pass: it knows nothing about scopes or bindings, the semantic filter
//! narrows its output afterwards.

use crate::config::Config;
use crate::model::occurrence::{LineIndex, Match};
use crate::primitives::word_navigation::{is_word, is_word_char};
use regex::RegexBuilder;

/// Search options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchFlags {
    /// Require non-identifier characters (or buffer bounds) on both sides
    pub whole_word: bool,
    /// Compare case-sensitively
    pub case_sensitive: bool,
}

impl Default for SearchFlags {
    fn default() -> Self {
        Self {
            whole_word: true,
            case_sensitive: true,
        }
    }
}

impl From<&Config> for SearchFlags {
    fn from(config: &Config) -> Self {
        Self {
            whole_word: config.whole_words,
            case_sensitive: config.match_case,
        }
    }
}

/// Find all occurrences of `token` in `text`, in document order
///
/// Tokens containing anything other than `[A-Za-z0-9_$]` (typically a
/// partial selection with punctuation in it) are never searched for and
/// yield no matches.
pub fn find_matches(token: &str, text: &str, flags: SearchFlags) -> Vec<Match> {
    if !is_word(token) {
        return Vec::new();
    }

    // ASCII-only folding keeps match lengths equal to the token length
    let regex = match RegexBuilder::new(&regex::escape(token))
        .case_insensitive(!flags.case_sensitive)
        .unicode(false)
        .build()
    {
        Ok(regex) => regex,
        Err(e) => {
            tracing::debug!("Could not build search pattern for {:?}: {}", token, e);
            return Vec::new();
        }
    };

    let bytes = text.as_bytes();
    let lines = LineIndex::new(text);

    regex
        .find_iter(text)
        .filter(|m| {
            if !flags.whole_word {
                return true;
            }
            let is_word_start = m.start() == 0 || !is_word_char(bytes[m.start() - 1]);
            let is_word_end = m.end() >= bytes.len() || !is_word_char(bytes[m.end()]);
            is_word_start && is_word_end
        })
        .map(|m| Match::new(m.start(), m.len(), lines.line_of(m.start())))
        .collect()
}

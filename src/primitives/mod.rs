//! Low-level primitives
//!
//! Token extraction, literal occurrence search and the semantic narrowing of
//! occurrences. Nothing in here talks to timers or holds session state.

pub mod literal_matcher;
pub mod semantic_filter;
pub mod word_navigation;

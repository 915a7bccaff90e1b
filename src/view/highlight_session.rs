//! Per-document highlight state
//!
//! A session remembers what is currently highlighted in one document view and
//! why: the active token, the symbol it was confirmed against (if any), the
//! cursor position the highlight was computed for, and the matches.
//!
//! # States
//! - **Empty**: nothing highlighted
//! - **TokenActive**: literal occurrences of a token, no semantic confirmation
//! - **SymbolActive**: occurrences confirmed to resolve to the same symbol
//!
//! Clearing is unconditional and idempotent. Every clear also invalidates any
//! outstanding resolution ticket, so a resolution started before a buffer
//! edit or document switch cannot install stale matches afterwards.

use crate::model::occurrence::{Match, Token};
use crate::model::symbol::SymbolRef;

/// Which kind of highlight is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Empty,
    TokenActive,
    SymbolActive,
}

/// Identifies one symbol resolution; only the latest one can complete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionTicket {
    generation: u64,
    id: u64,
}

/// What the periodic cursor check decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollDecision {
    /// Cursor has not moved since the last check
    Unchanged,
    /// Cursor moved but the highlight still applies
    Keep,
    /// Highlight no longer applies; clear it and wait for the cursor to rest
    Reset,
    /// Highlight no longer applies; clear it
    Clear,
}

#[derive(Debug, Clone)]
pub struct HighlightSession {
    state: SessionState,
    active_token: Option<Token>,
    active_symbol: Option<SymbolRef>,
    /// Cursor position the highlight was last checked against; `None` after a clear
    last_cursor: Option<usize>,
    matches: Vec<Match>,
    /// Bumped on every clear
    generation: u64,
    next_ticket: u64,
    pending: Option<ResolutionTicket>,
}

impl HighlightSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Empty,
            active_token: None,
            active_symbol: None,
            last_cursor: None,
            matches: Vec::new(),
            generation: 0,
            next_ticket: 0,
            pending: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn active_token(&self) -> Option<&Token> {
        self.active_token.as_ref()
    }

    pub fn active_symbol(&self) -> Option<&SymbolRef> {
        self.active_symbol.as_ref()
    }

    pub fn last_cursor(&self) -> Option<usize> {
        self.last_cursor
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// Whether a resolution is outstanding
    pub fn is_resolving(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the highlight and forget the cursor position
    pub fn clear(&mut self) {
        self.state = SessionState::Empty;
        self.active_token = None;
        self.active_symbol = None;
        self.last_cursor = None;
        self.matches.clear();
        self.generation += 1;
        self.pending = None;
    }

    /// Remember the cursor position the current highlight was checked against
    pub fn set_last_cursor(&mut self, cursor: usize) {
        self.last_cursor = Some(cursor);
    }

    pub fn cursor_moved(&self, cursor: usize) -> bool {
        self.last_cursor != Some(cursor)
    }

    /// Literal highlight from an explicit selection or a file without semantics
    ///
    /// With no matches the session stays empty and only the cursor is kept.
    pub fn activate_token(&mut self, token: Token, matches: Vec<Match>, cursor: usize) {
        self.clear();
        self.last_cursor = Some(cursor);
        if matches.is_empty() {
            return;
        }
        tracing::debug!(
            "Token highlight for {:?}: {} occurrences",
            token.as_str(),
            matches.len()
        );
        self.state = SessionState::TokenActive;
        self.active_token = Some(token);
        self.matches = matches;
    }

    /// Start a symbol resolution; any earlier ticket becomes stale
    pub fn begin_resolution(&mut self) -> ResolutionTicket {
        self.next_ticket += 1;
        let ticket = ResolutionTicket {
            generation: self.generation,
            id: self.next_ticket,
        };
        self.pending = Some(ticket);
        ticket
    }

    /// Whether a ticket still belongs to the latest resolution of this
    /// generation
    pub fn is_current(&self, ticket: ResolutionTicket) -> bool {
        ticket.generation == self.generation && self.pending == Some(ticket)
    }

    /// Install the result of a resolution
    ///
    /// Returns `false` and leaves the session untouched when the ticket is
    /// stale. An empty match set leaves the session empty; the cursor
    /// position is still recorded so the same spot is not resolved again.
    pub fn complete_resolution(
        &mut self,
        ticket: ResolutionTicket,
        token: Token,
        symbol: SymbolRef,
        matches: Vec<Match>,
        cursor: usize,
    ) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!("Ignoring stale symbol resolution for {:?}", token.as_str());
            return false;
        }

        self.clear();
        self.last_cursor = Some(cursor);
        if matches.is_empty() {
            tracing::debug!("No confirmed occurrences of {:?}", token.as_str());
            return true;
        }

        tracing::debug!(
            "Symbol highlight for {:?} ({}): {} occurrences",
            token.as_str(),
            symbol.path,
            matches.len()
        );
        self.state = SessionState::SymbolActive;
        self.active_token = Some(token);
        self.active_symbol = Some(symbol);
        self.matches = matches;
        true
    }

    /// Decide what a cursor check at `cursor` means for the highlight
    ///
    /// `token_under_cursor` and `resolve` are only called when needed:
    /// resolution happens at most once per cursor movement, and only while a
    /// symbol is being tracked.
    pub fn poll<T, F>(
        &self,
        cursor: usize,
        track_symbols: bool,
        token_under_cursor: T,
        resolve: F,
    ) -> PollDecision
    where
        T: FnOnce() -> Option<Token>,
        F: FnOnce() -> Option<SymbolRef>,
    {
        if !self.cursor_moved(cursor) {
            return PollDecision::Unchanged;
        }

        if track_symbols {
            return match &self.active_symbol {
                Some(active) => match resolve() {
                    Some(symbol) if symbol.same_symbol(active) => PollDecision::Keep,
                    _ => PollDecision::Reset,
                },
                None => PollDecision::Reset,
            };
        }

        if token_under_cursor() != self.active_token {
            PollDecision::Clear
        } else {
            PollDecision::Keep
        }
    }
}

impl Default for HighlightSession {
    fn default() -> Self {
        Self::new()
    }
}

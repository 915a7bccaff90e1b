//! Highlight controller: wires host events and timers to the highlight sessions
//!
//! The host owns the clock and the views. It forwards its notifications as
//! [`HostEvent`]s and calls [`HighlightController::tick`] periodically. Two
//! timers run off that tick:
//!
//! - the **poll** timer checks whether the cursor moved and whether the current
//!   highlight still applies at the new position;
//! - the **idle** timer fires once the cursor has rested for the configured
//!   interval and computes a new highlight for the token under it.
//!
//! Everything runs on the caller's thread; a tick runs the poll check before
//! the idle check, never both at once.

pub mod timers;

use crate::config::Config;
use crate::hooks::HostEvent;
use crate::model::event::{BufferEdit, BufferId};
use crate::model::occurrence::Token;
use crate::plugin_api::EditorView;
use crate::primitives::literal_matcher::{find_matches, SearchFlags};
use crate::primitives::semantic_filter::filter_matches;
use crate::services::semantic::{resolve_symbol, NoSemantics, SymbolResolver};
use crate::view::highlight_session::{HighlightSession, PollDecision, SessionState};
use crate::view::overview_bar::OverviewBar;
use crate::view::render_projection::{
    clear_highlights, project, BufferMetrics, OverviewEntry, ProjectionOptions,
};
use crate::view::symbol_colors::SymbolColorTable;
use std::collections::HashMap;
use std::time::Instant;
use timers::Timer;

/// Drives occurrence highlighting for the documents of one host editor
pub struct HighlightController<R: SymbolResolver = NoSemantics> {
    config: Config,
    colors: SymbolColorTable,
    resolver: R,

    /// One session per document view
    sessions: HashMap<BufferId, HighlightSession>,

    /// Document view the last event or tick concerned
    active_buffer: Option<BufferId>,

    /// Fires once the cursor has rested long enough to resolve the symbol under it
    idle_timer: Timer,

    /// Fires periodically to check for cursor movement
    poll_timer: Timer,

    overview_bar: OverviewBar,
}

impl<R: SymbolResolver> HighlightController<R> {
    /// Create a controller; both timers start stopped
    ///
    /// The poll timer is armed by the first [`HostEvent::DocumentSwitched`]
    /// for an editable document.
    pub fn new(mut config: Config, resolver: R) -> Self {
        config.clamp_intervals();
        Self {
            colors: SymbolColorTable::from_config(&config),
            idle_timer: Timer::new(config.idle_interval()),
            poll_timer: Timer::new(config.poll_interval()),
            config,
            resolver,
            sessions: HashMap::new(),
            active_buffer: None,
            overview_bar: OverviewBar::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn color_table(&self) -> &SymbolColorTable {
        &self.colors
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn active_buffer(&self) -> Option<BufferId> {
        self.active_buffer
    }

    /// Session of the active document view
    pub fn session(&self) -> Option<&HighlightSession> {
        self.active_buffer.and_then(|id| self.sessions.get(&id))
    }

    pub fn session_for(&self, buffer_id: BufferId) -> Option<&HighlightSession> {
        self.sessions.get(&buffer_id)
    }

    /// State of the active session; `Empty` when there is none
    pub fn state(&self) -> SessionState {
        self.session()
            .map_or(SessionState::Empty, HighlightSession::state)
    }

    pub fn overview_bar(&self) -> &OverviewBar {
        &self.overview_bar
    }

    /// Overview bar entries for the host to draw
    pub fn overview_entries(&self) -> &[OverviewEntry] {
        self.overview_bar.entries()
    }

    pub fn is_idle_timer_running(&self) -> bool {
        self.idle_timer.is_running()
    }

    pub fn is_poll_timer_running(&self) -> bool {
        self.poll_timer.is_running()
    }

    /// Whether any timer is armed
    pub fn timers_armed(&self) -> bool {
        self.idle_timer.is_running() || self.poll_timer.is_running()
    }

    /// React to a host notification
    ///
    /// `view` is the document view the event concerns (the newly active one
    /// for a switch). Events that need a view are ignored without one.
    pub fn handle_event(
        &mut self,
        event: HostEvent,
        view: Option<&mut dyn EditorView>,
        now: Instant,
    ) {
        tracing::debug!("Highlight event: {}", event.name());

        match (event, view) {
            (HostEvent::SettingsChanged(config), view) => self.apply_settings(*config, view),
            (HostEvent::DocumentClosed { buffer_id }, _) => self.close_document(buffer_id),
            (event, None) => {
                tracing::debug!("No document view for {}, ignoring", event.name());
            }
            (HostEvent::DocumentSwitched, Some(view)) => self.on_document_switched(view, now),
            (HostEvent::DocumentSaved, Some(view)) => self.remove_highlights(view),
            (HostEvent::BufferModified(edit), Some(view)) => {
                self.on_buffer_modified(view, &edit, now)
            }
            (HostEvent::DoubleClick { selection }, Some(view)) => {
                self.on_double_click(view, &selection)
            }
        }
    }

    /// Advance the timers to `now`, running whichever came due
    pub fn tick(&mut self, now: Instant, view: Option<&mut dyn EditorView>) {
        let Some(view) = view else {
            return;
        };

        if self.poll_timer.fire(now) {
            self.on_poll(view, now);
        }
        if self.idle_timer.fire(now) {
            self.on_idle(view);
        }
    }

    /// Move the cursor to the occurrence under a pixel row of the overview bar
    ///
    /// Returns the line moved to, if an entry was hit.
    pub fn click_overview(&mut self, view: Option<&mut dyn EditorView>, y: u32) -> Option<usize> {
        let view = view?;
        let line = self.overview_bar.entry_at(y)?.target_line;
        tracing::debug!("Overview bar click at y={} -> line {}", y, line);
        view.goto_line(line);
        Some(line)
    }

    /// Stop both timers and drop all highlight state
    ///
    /// Returns the current settings so the host can persist them.
    pub fn shutdown(&mut self) -> Config {
        self.idle_timer.stop();
        self.poll_timer.stop();
        self.sessions.clear();
        self.active_buffer = None;
        self.overview_bar.clear();
        tracing::debug!("Highlight controller shut down");
        self.config.clone()
    }

    fn session_mut(&mut self, buffer_id: BufferId) -> &mut HighlightSession {
        self.sessions.entry(buffer_id).or_default()
    }

    /// Whether symbols can be resolved in the document shown in `view`
    fn semantic_available(&self, view: &dyn EditorView) -> bool {
        view.file_path().is_some_and(|path| {
            self.config.is_semantic_file(path) && self.resolver.supports(path)
        })
    }

    fn apply_settings(&mut self, mut config: Config, view: Option<&mut dyn EditorView>) {
        config.clamp_intervals();
        if let Err(e) = config.validate() {
            tracing::warn!("Ignoring invalid highlight settings: {}", e);
            return;
        }

        self.colors = SymbolColorTable::from_config(&config);
        self.idle_timer.set_interval(config.idle_interval());
        self.poll_timer.set_interval(config.poll_interval());
        if !config.highlight_under_cursor_enabled {
            self.idle_timer.stop();
        }
        self.config = config;

        if let Some(view) = view {
            self.overview_bar
                .update(self.config.enable_overview_bar, &*view);
        }
    }

    fn close_document(&mut self, buffer_id: BufferId) {
        self.sessions.remove(&buffer_id);
        if self.active_buffer == Some(buffer_id) {
            self.active_buffer = None;
            self.idle_timer.stop();
            self.overview_bar.clear();
        }
    }

    fn on_document_switched(&mut self, view: &mut dyn EditorView, now: Instant) {
        let buffer_id = view.buffer_id();
        self.active_buffer = Some(buffer_id);
        self.idle_timer.stop();
        self.remove_highlights(view);
        self.overview_bar
            .update(self.config.enable_overview_bar, &*view);

        if view.is_editable() {
            self.poll_timer.start(now);
        } else {
            tracing::debug!("Buffer {:?} is not editable, not polling", buffer_id);
            self.poll_timer.stop();
        }
    }

    fn on_buffer_modified(&mut self, view: &mut dyn EditorView, edit: &BufferEdit, now: Instant) {
        tracing::debug!(
            "Buffer {:?} modified at {} (+{} -{}), clearing highlights",
            view.buffer_id(),
            edit.position,
            edit.inserted_text.len(),
            edit.deleted_len
        );
        self.idle_timer.stop();
        self.poll_timer.stop();
        self.remove_highlights(view);
        self.overview_bar
            .update(self.config.enable_overview_bar, &*view);
        self.poll_timer.start(now);
    }

    fn on_double_click(&mut self, view: &mut dyn EditorView, selection: &str) {
        let buffer_id = view.buffer_id();
        self.active_buffer = Some(buffer_id);
        self.remove_highlights(view);

        let selection = if selection.is_empty() {
            view.selected_text()
        } else {
            selection.to_string()
        };
        let cursor = view.current_position();
        let matches = Token::new(&selection).map(|token| {
            let matches =
                find_matches(token.as_str(), &view.text(), SearchFlags::from(&self.config));
            (token, matches)
        });

        match matches {
            Some((token, matches)) if !matches.is_empty() => {
                self.session_mut(buffer_id)
                    .activate_token(token, matches, cursor);
                self.render(view);
            }
            _ => {
                tracing::debug!("Nothing to highlight for selection {:?}", selection);
                self.session_mut(buffer_id).set_last_cursor(cursor);
            }
        }
    }

    fn on_poll(&mut self, view: &mut dyn EditorView, now: Instant) {
        let buffer_id = view.buffer_id();
        self.active_buffer = Some(buffer_id);

        let cursor = view.current_position();
        let track_symbols = self.config.highlight_under_cursor_enabled;
        let semantic = self.semantic_available(&*view);

        let session = self.sessions.entry(buffer_id).or_default();
        if !session.cursor_moved(cursor) {
            return;
        }
        if track_symbols {
            self.idle_timer.stop();
        }

        let resolver = &mut self.resolver;
        let decision = session.poll(
            cursor,
            track_symbols,
            || Token::new(&view.word_at(cursor)),
            || {
                if semantic {
                    resolve_symbol(resolver, &*view, view.word_end_position(cursor))
                } else {
                    None
                }
            },
        );

        match decision {
            PollDecision::Unchanged => return,
            PollDecision::Keep => {}
            PollDecision::Reset => {
                self.remove_highlights(view);
                self.idle_timer.start(now);
            }
            PollDecision::Clear => self.remove_highlights(view),
        }
        self.session_mut(buffer_id).set_last_cursor(cursor);
    }

    fn on_idle(&mut self, view: &mut dyn EditorView) {
        self.idle_timer.stop();
        if !self.config.highlight_under_cursor_enabled {
            return;
        }

        let buffer_id = view.buffer_id();
        self.active_buffer = Some(buffer_id);
        let cursor = view.current_position();

        let Some(token) = Token::new(&view.word_at(cursor)) else {
            tracing::debug!("No token under cursor at {}", cursor);
            self.remove_highlights(view);
            self.session_mut(buffer_id).set_last_cursor(cursor);
            return;
        };

        let text = view.text();
        let flags = SearchFlags::from(&self.config);

        if !self.semantic_available(&*view) {
            let matches = find_matches(token.as_str(), &text, flags);
            self.clear_view(view);
            self.session_mut(buffer_id)
                .activate_token(token, matches, cursor);
            self.render(view);
            return;
        }

        let ticket = self.session_mut(buffer_id).begin_resolution();
        let position = view.word_end_position(cursor);
        let Some(symbol) = resolve_symbol(&mut self.resolver, &*view, position) else {
            tracing::debug!("Nothing resolved for {:?} at {}", token.as_str(), position);
            self.remove_highlights(view);
            self.session_mut(buffer_id).set_last_cursor(cursor);
            return;
        };

        let literal = find_matches(token.as_str(), &text, flags);
        let matches = filter_matches(&literal, &symbol, &mut self.resolver, &*view);

        if !self.session_mut(buffer_id).is_current(ticket) {
            tracing::debug!("Resolution for {:?} went stale", token.as_str());
            return;
        }
        self.clear_view(view);
        self.session_mut(buffer_id)
            .complete_resolution(ticket, token, symbol, matches, cursor);
        self.render(view);
    }

    /// Draw the active session's matches into the view and the overview bar
    fn render(&mut self, view: &mut dyn EditorView) {
        let Some(session) = self.sessions.get(&view.buffer_id()) else {
            return;
        };
        if session.matches().is_empty() {
            return;
        }

        let color = match session.active_symbol() {
            Some(symbol) if self.config.highlight_under_cursor_enabled => {
                self.colors.color_for(symbol)
            }
            _ => self.config.highlight_color.into(),
        };
        let options = ProjectionOptions {
            color,
            style: self.config.highlight_style,
            add_line_marker: self.config.add_line_marker,
            overview_bar: self.overview_bar.geometry(),
        };
        let projection = project(session.matches(), BufferMetrics::from_view(&*view), options);

        projection.apply(view);
        self.overview_bar.set_entries(projection.overview_entries);
    }

    /// Remove everything drawn for the view, leaving its session alone
    fn clear_view(&mut self, view: &mut dyn EditorView) {
        let metrics = BufferMetrics::from_view(&*view);
        clear_highlights(view, metrics);
        self.overview_bar.clear();
    }

    /// Clear the view's session and everything drawn for it
    fn remove_highlights(&mut self, view: &mut dyn EditorView) {
        self.session_mut(view.buffer_id()).clear();
        self.clear_view(view);
    }
}

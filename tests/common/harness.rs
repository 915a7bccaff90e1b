// HighlightHarness - in-memory host editor for driving the highlighter

use highlight_selection::config::{Config, IndicatorStyle};
use highlight_selection::model::event::{BufferEdit, BufferId};
use highlight_selection::model::occurrence::LineIndex;
use highlight_selection::model::symbol::SymbolRef;
use highlight_selection::plugin_api::{EditorView, MarkerId, OverviewBarGeometry};
use highlight_selection::{HighlightController, HostEvent, SymbolResolver};
use ratatui::style::Color;
use std::collections::HashMap;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Install a subscriber so `RUST_LOG=debug` shows state transitions
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer())
        .with(EnvFilter::from_default_env())
        .try_init();
}

/// A style range as the host received it
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedStyle {
    pub range: Range<usize>,
    pub mask: u32,
    pub style: IndicatorStyle,
    pub color: Color,
}

/// Document view backed by a string, recording everything drawn into it
pub struct FakeView {
    id: BufferId,
    path: Option<PathBuf>,
    editable: bool,
    text: String,
    lines: LineIndex,
    cursor: usize,
    selection: String,
    text_height: u32,
    overview_bar: Option<OverviewBarGeometry>,

    pub styles: Vec<AppliedStyle>,
    pub markers: Vec<(usize, MarkerId, Color)>,
    pub goto_lines: Vec<usize>,
    pub clear_calls: usize,
}

impl FakeView {
    pub fn new(id: usize, path: &str, text: &str) -> Self {
        Self {
            id: BufferId(id),
            path: Some(PathBuf::from(path)),
            editable: true,
            text: text.to_string(),
            lines: LineIndex::new(text),
            cursor: 0,
            selection: String::new(),
            text_height: 1,
            overview_bar: None,
            styles: Vec::new(),
            markers: Vec::new(),
            goto_lines: Vec::new(),
            clear_calls: 0,
        }
    }

    /// View of an unsaved buffer with no file behind it
    pub fn untitled(id: usize, text: &str) -> Self {
        Self {
            path: None,
            ..Self::new(id, "", text)
        }
    }

    pub fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }

    pub fn with_overview_bar(mut self, height: u32, width: u32) -> Self {
        self.overview_bar = Some(OverviewBarGeometry { height, width });
        self
    }

    pub fn with_text_height(mut self, text_height: u32) -> Self {
        self.text_height = text_height;
        self
    }

    pub fn set_cursor(&mut self, position: usize) {
        self.cursor = position;
    }

    pub fn select(&mut self, selection: &str) {
        self.selection = selection.to_string();
    }

    /// Byte offset of the `nth` occurrence of `needle`
    pub fn offset_of(&self, needle: &str, nth: usize) -> usize {
        self.text
            .match_indices(needle)
            .nth(nth)
            .map(|(offset, _)| offset)
            .unwrap_or_else(|| panic!("{needle:?} occurrence {nth} not in buffer"))
    }

    /// Apply an edit to the text the way the host buffer would
    pub fn apply_edit(&mut self, edit: &BufferEdit) {
        let end = (edit.position + edit.deleted_len).min(self.text.len());
        self.text
            .replace_range(edit.position..end, &edit.inserted_text);
        self.lines = LineIndex::new(&self.text);
        self.cursor = edit.position + edit.inserted_text.len();
    }

    /// Ranges currently styled, in the order they were applied
    pub fn styled_ranges(&self) -> Vec<Range<usize>> {
        self.styles.iter().map(|s| s.range.clone()).collect()
    }

    pub fn marker_lines(&self) -> Vec<usize> {
        self.markers.iter().map(|(line, _, _)| *line).collect()
    }
}

impl EditorView for FakeView {
    fn buffer_id(&self) -> BufferId {
        self.id
    }

    fn file_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn is_editable(&self) -> bool {
        self.editable
    }

    fn text_range(&self, range: Range<usize>) -> String {
        self.text[range].to_string()
    }

    fn len(&self) -> usize {
        self.text.len()
    }

    fn text(&self) -> String {
        self.text.clone()
    }

    fn line_from_offset(&self, offset: usize) -> usize {
        self.lines.line_of(offset)
    }

    fn line_count(&self) -> usize {
        self.lines.line_count()
    }

    fn current_position(&self) -> usize {
        self.cursor
    }

    fn selected_text(&self) -> String {
        self.selection.clone()
    }

    fn text_height(&self) -> u32 {
        self.text_height
    }

    fn overview_bar_geometry(&self) -> Option<OverviewBarGeometry> {
        self.overview_bar
    }

    fn set_style_range(
        &mut self,
        range: Range<usize>,
        mask: u32,
        style: IndicatorStyle,
        color: Color,
    ) {
        self.styles.push(AppliedStyle {
            range,
            mask,
            style,
            color,
        });
    }

    fn clear_all_styles(&mut self, mask: u32) {
        self.styles.retain(|s| s.mask != mask);
        self.clear_calls += 1;
    }

    fn add_line_marker(&mut self, line: usize, marker: MarkerId, color: Color) {
        self.markers.push((line, marker, color));
    }

    fn clear_line_markers(&mut self, marker: MarkerId) {
        self.markers.retain(|(_, m, _)| *m != marker);
    }

    fn goto_line(&mut self, line: usize) {
        self.goto_lines.push(line);
    }
}

/// Resolver scripted by word end position, counting every call
#[derive(Default)]
pub struct FakeResolver {
    answers: HashMap<usize, SymbolRef>,
    unsupported: bool,
    pub calls: usize,
}

impl FakeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver that declines every file
    pub fn unsupported() -> Self {
        Self {
            unsupported: true,
            ..Self::default()
        }
    }

    /// Resolve the word ending at `end` to `symbol`
    pub fn answer(&mut self, end: usize, symbol: SymbolRef) -> &mut Self {
        self.answers.insert(end, symbol);
        self
    }

    /// Resolve the listed occurrences of `word` in `text` to `symbol`
    pub fn answer_occurrences(
        &mut self,
        text: &str,
        word: &str,
        occurrences: &[usize],
        symbol: &SymbolRef,
    ) -> &mut Self {
        for (nth, (offset, _)) in text.match_indices(word).enumerate() {
            if occurrences.contains(&nth) {
                self.answers.insert(offset + word.len(), symbol.clone());
            }
        }
        self
    }
}

impl SymbolResolver for FakeResolver {
    fn supports(&self, _path: &Path) -> bool {
        !self.unsupported
    }

    fn resolve_at(&mut self, _view: &dyn EditorView, position: usize) -> Option<SymbolRef> {
        self.calls += 1;
        self.answers.get(&position).cloned()
    }
}

/// Controller, view and clock wired together
pub struct HighlightHarness {
    pub controller: HighlightController<FakeResolver>,
    pub view: FakeView,
    pub now: Instant,
}

impl HighlightHarness {
    /// Create a harness and make `view` the active document
    pub fn new(config: Config, resolver: FakeResolver, view: FakeView) -> Self {
        init_tracing();
        let mut harness = Self {
            controller: HighlightController::new(config, resolver),
            view,
            now: Instant::now(),
        };
        harness.send(HostEvent::DocumentSwitched);
        harness
    }

    pub fn send(&mut self, event: HostEvent) {
        self.controller
            .handle_event(event, Some(&mut self.view), self.now);
    }

    /// Let `ms` milliseconds pass, ticking every 10ms like a host UI loop
    pub fn advance(&mut self, ms: u64) {
        let step = Duration::from_millis(10);
        let end = self.now + Duration::from_millis(ms);
        while self.now < end {
            self.now += step;
            self.controller.tick(self.now, Some(&mut self.view));
        }
    }

    /// Move the cursor and wait long enough for the idle timer to fire
    pub fn rest_at(&mut self, position: usize) {
        self.view.set_cursor(position);
        let config = self.controller.config();
        let wait = config.poll_interval() + config.idle_interval() + Duration::from_millis(20);
        self.advance(wait.as_millis() as u64);
    }

    /// Edit the buffer and notify the controller
    pub fn edit(&mut self, edit: BufferEdit) {
        self.view.apply_edit(&edit);
        self.send(HostEvent::BufferModified(edit));
    }

    pub fn resolver_calls(&self) -> usize {
        self.controller.resolver().calls
    }
}

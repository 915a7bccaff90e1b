//! Overview bar: a miniature vertical map of occurrence positions
//!
//! The bar sits next to the scrollbar. It is only shown when enabled and when
//! the document is taller than the bar itself; for short documents every line
//! is already on screen and the bar adds nothing.

use crate::plugin_api::{EditorView, OverviewBarGeometry};
use crate::view::render_projection::OverviewEntry;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverviewBar {
    geometry: Option<OverviewBarGeometry>,
    visible: bool,
    entries: Vec<OverviewEntry>,
}

impl OverviewBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh geometry and visibility from the view
    pub fn update(&mut self, enabled: bool, view: &dyn EditorView) {
        self.geometry = view.overview_bar_geometry();
        let document_height = (view.line_count() as u64) * u64::from(view.text_height());
        self.visible = enabled
            && self
                .geometry
                .is_some_and(|bar| u64::from(bar.height) < document_height);
        if !self.visible {
            self.entries.clear();
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Geometry to project into, `None` while the bar is hidden
    pub fn geometry(&self) -> Option<OverviewBarGeometry> {
        self.geometry.filter(|_| self.visible)
    }

    pub fn set_entries(&mut self, entries: Vec<OverviewEntry>) {
        self.entries = entries;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries to draw, top to bottom in document order
    pub fn entries(&self) -> &[OverviewEntry] {
        &self.entries
    }

    /// Entry under a pixel row of the bar
    ///
    /// Entries can overlap when occurrences sit on neighbouring lines; the
    /// one drawn last (the later occurrence) is on top and wins.
    pub fn entry_at(&self, y: u32) -> Option<&OverviewEntry> {
        if !self.visible {
            return None;
        }
        self.entries.iter().rev().find(|entry| entry.contains_y(y))
    }
}

//! Host API: the narrow interface the highlighter needs from the editor
//!
//! The host implements [`EditorView`] for the document view that currently has
//! focus. The highlighter only reads text and cursor state through it and only
//! writes through the style, marker and navigation calls; everything else
//! about the editor stays opaque.

use crate::config::IndicatorStyle;
use crate::model::event::BufferId;
use crate::primitives::word_navigation;
use ratatui::style::Color;
use std::ops::Range;
use std::path::Path;

/// Gutter marker slot used for occurrence markers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(pub u8);

/// The marker slot the highlighter draws its line markers into
pub const OCCURRENCE_MARKER: MarkerId = MarkerId(0);

/// Pixel geometry of the overview bar next to the text area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverviewBarGeometry {
    /// Height of the bar in pixels
    pub height: u32,
    /// Width of the bar in pixels
    pub width: u32,
}

/// A document view as seen by the highlighter
pub trait EditorView {
    /// Identity of the buffer shown in this view
    fn buffer_id(&self) -> BufferId;

    /// File backing the buffer, if any
    fn file_path(&self) -> Option<&Path>;

    /// Whether the buffer accepts edits (read-only and virtual buffers do not)
    fn is_editable(&self) -> bool;

    /// Text in a byte range
    fn text_range(&self, range: Range<usize>) -> String;

    /// Length of the buffer in bytes
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whole buffer content
    fn text(&self) -> String {
        self.text_range(0..self.len())
    }

    /// 0-based line containing a byte offset
    fn line_from_offset(&self, offset: usize) -> usize;

    /// Number of lines in the buffer
    fn line_count(&self) -> usize;

    /// Byte position of the primary cursor
    fn current_position(&self) -> usize;

    /// Currently selected text (empty when nothing is selected)
    fn selected_text(&self) -> String;

    /// Identifier-shaped word touching `position`
    fn word_at(&self, position: usize) -> String {
        word_navigation::token_at(&self.text(), position)
    }

    /// End of the word touching `position`
    fn word_end_position(&self, position: usize) -> usize {
        word_navigation::word_end_position(&self.text(), position)
    }

    /// Number of bits the host reserves for lexer styles; occurrence
    /// indicators live in the bit right above them
    fn style_bits(&self) -> u8 {
        5
    }

    /// Height of a text line in pixels
    fn text_height(&self) -> u32 {
        1
    }

    /// Geometry of the overview bar, or `None` if the host has none
    fn overview_bar_geometry(&self) -> Option<OverviewBarGeometry> {
        None
    }

    /// Apply an indicator style to a byte range
    fn set_style_range(
        &mut self,
        range: Range<usize>,
        mask: u32,
        style: IndicatorStyle,
        color: Color,
    );

    /// Remove every indicator the highlighter applied
    fn clear_all_styles(&mut self, mask: u32);

    /// Add a colored gutter marker on a line
    fn add_line_marker(&mut self, line: usize, marker: MarkerId, color: Color);

    /// Remove every marker in a slot
    fn clear_line_markers(&mut self, marker: MarkerId);

    /// Move the cursor to the start of a line and scroll it into view
    fn goto_line(&mut self, line: usize);
}

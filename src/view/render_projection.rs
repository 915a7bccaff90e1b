//! Projection of a match set into renderable forms
//!
//! A finalized match set becomes three things the host can draw:
//! - inline indicator ranges over each occurrence
//! - gutter markers on every line holding an occurrence
//! - entries in the overview bar, positioned proportionally to the line
//!
//! Projection is pure; [`Projection::apply`] and [`clear_highlights`] are the
//! only places that touch the host view.

use crate::config::IndicatorStyle;
use crate::model::occurrence::Match;
use crate::plugin_api::{EditorView, OverviewBarGeometry, OCCURRENCE_MARKER};
use ratatui::style::Color;
use std::collections::BTreeSet;
use std::ops::Range;

/// Minimum height of an overview bar entry in pixels
pub const MIN_OVERVIEW_ENTRY_HEIGHT: u32 = 10;

/// Buffer facts the projection depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferMetrics {
    pub line_count: usize,
    /// Bits used by lexer styles; indicators use the next bit up
    pub style_bits: u8,
}

impl BufferMetrics {
    pub fn from_view(view: &dyn EditorView) -> Self {
        Self {
            line_count: view.line_count(),
            style_bits: view.style_bits(),
        }
    }

    /// Style mask for occurrence indicators
    pub fn indicator_mask(&self) -> u32 {
        1u32.checked_shl(u32::from(self.style_bits)).unwrap_or(0)
    }
}

/// How matches should be drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionOptions {
    pub color: Color,
    pub style: IndicatorStyle,
    pub add_line_marker: bool,
    /// Overview bar to project into, `None` when it is disabled or hidden
    pub overview_bar: Option<OverviewBarGeometry>,
}

/// Indicator over one occurrence
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRange {
    pub range: Range<usize>,
    pub mask: u32,
    pub style: IndicatorStyle,
    pub color: Color,
}

/// One marker in the overview bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverviewEntry {
    /// Distance from the top of the bar in pixels
    pub y: u32,
    pub height: u32,
    pub width: u32,
    pub color: Color,
    /// Line the cursor moves to when the entry is clicked
    pub target_line: usize,
}

impl OverviewEntry {
    /// Whether a pixel row of the bar falls inside this entry
    pub fn contains_y(&self, y: u32) -> bool {
        y >= self.y && y < self.y.saturating_add(self.height)
    }
}

/// Renderable description of a match set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    pub style_ranges: Vec<StyleRange>,
    /// Lines that get a gutter marker
    pub line_markers: BTreeSet<usize>,
    pub marker_color: Option<Color>,
    pub overview_entries: Vec<OverviewEntry>,
}

impl Projection {
    pub fn is_empty(&self) -> bool {
        self.style_ranges.is_empty()
    }

    /// Push indicators and gutter markers to the host
    ///
    /// Overview entries are not pushed: the overview bar is owned by the
    /// highlighter and drawn by the host from
    /// [`crate::view::overview_bar::OverviewBar::entries`].
    pub fn apply(&self, view: &mut dyn EditorView) {
        for range in &self.style_ranges {
            view.set_style_range(range.range.clone(), range.mask, range.style, range.color);
        }
        if let Some(color) = self.marker_color {
            for line in &self.line_markers {
                view.add_line_marker(*line, OCCURRENCE_MARKER, color);
            }
        }
    }
}

/// Vertical position of a line in the overview bar
pub fn overview_offset(bar_height: u32, line: usize, total_lines: usize) -> u32 {
    if total_lines == 0 {
        return 0;
    }
    let y = (f64::from(bar_height) * line as f64 / total_lines as f64).round();
    (y as u32).min(bar_height)
}

/// Height of an overview entry: one line's share of the bar, at least
/// [`MIN_OVERVIEW_ENTRY_HEIGHT`]
pub fn overview_entry_height(bar_height: u32, total_lines: usize) -> u32 {
    let per_line = match u32::try_from(total_lines) {
        Ok(0) => bar_height,
        Ok(total) => bar_height / total,
        Err(_) => 0,
    };
    per_line.max(MIN_OVERVIEW_ENTRY_HEIGHT)
}

/// Project matches into style ranges, line markers and overview entries
pub fn project(
    matches: &[Match],
    metrics: BufferMetrics,
    options: ProjectionOptions,
) -> Projection {
    let mask = metrics.indicator_mask();
    let mut projection = Projection {
        marker_color: options.add_line_marker.then_some(options.color),
        ..Projection::default()
    };

    for m in matches {
        projection.style_ranges.push(StyleRange {
            range: m.range(),
            mask,
            style: options.style,
            color: options.color,
        });

        if options.add_line_marker {
            projection.line_markers.insert(m.line);
        }

        if let Some(bar) = options.overview_bar {
            projection.overview_entries.push(OverviewEntry {
                y: overview_offset(bar.height, m.line, metrics.line_count),
                height: overview_entry_height(bar.height, metrics.line_count),
                width: bar.width,
                color: options.color,
                target_line: m.line,
            });
        }
    }

    projection
}

/// Remove every indicator and occurrence marker from the host
pub fn clear_highlights(view: &mut dyn EditorView, metrics: BufferMetrics) {
    view.clear_all_styles(metrics.indicator_mask());
    view.clear_line_markers(OCCURRENCE_MARKER);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(add_line_marker: bool, bar: Option<OverviewBarGeometry>) -> ProjectionOptions {
        ProjectionOptions {
            color: Color::Rgb(60, 60, 80),
            style: IndicatorStyle::RoundBox,
            add_line_marker,
            overview_bar: bar,
        }
    }

    fn metrics(line_count: usize) -> BufferMetrics {
        BufferMetrics {
            line_count,
            style_bits: 5,
        }
    }

    #[test]
    fn test_overview_offset() {
        assert_eq!(overview_offset(200, 50, 100), 100);
        assert_eq!(overview_offset(200, 0, 100), 0);
        assert_eq!(overview_offset(100, 1, 3), 33);
        assert_eq!(overview_offset(100, 2, 3), 67);
        assert_eq!(overview_offset(100, 5, 0), 0);
    }

    #[test]
    fn test_overview_entry_height() {
        // Plenty of lines: clamp to the minimum
        assert_eq!(overview_entry_height(200, 100), MIN_OVERVIEW_ENTRY_HEIGHT);
        // Few lines: each line gets its share
        assert_eq!(overview_entry_height(200, 4), 50);
        assert_eq!(overview_entry_height(200, 0), 200);
    }

    #[test]
    fn test_project_all_forms() {
        let matches = [Match::new(0, 3, 0), Match::new(10, 3, 50), Match::new(20, 3, 50)];
        let bar = OverviewBarGeometry {
            height: 200,
            width: 6,
        };
        let projection = project(&matches, metrics(100), options(true, Some(bar)));

        assert_eq!(projection.style_ranges.len(), 3);
        assert_eq!(projection.style_ranges[1].range, 10..13);
        assert_eq!(projection.style_ranges[1].mask, 1 << 5);

        assert_eq!(projection.line_markers.iter().copied().collect::<Vec<_>>(), vec![0, 50]);
        assert_eq!(projection.marker_color, Some(Color::Rgb(60, 60, 80)));

        assert_eq!(projection.overview_entries.len(), 3);
        let entry = projection.overview_entries[1];
        assert_eq!(entry.y, 100);
        assert_eq!(entry.height, MIN_OVERVIEW_ENTRY_HEIGHT);
        assert_eq!(entry.width, 6);
        assert_eq!(entry.target_line, 50);
        assert!(entry.contains_y(105));
        assert!(!entry.contains_y(110));
    }

    #[test]
    fn test_project_without_optional_forms() {
        let matches = [Match::new(0, 3, 0)];
        let projection = project(&matches, metrics(10), options(false, None));
        assert_eq!(projection.style_ranges.len(), 1);
        assert!(projection.line_markers.is_empty());
        assert!(projection.marker_color.is_none());
        assert!(projection.overview_entries.is_empty());
    }

    #[test]
    fn test_empty_projection() {
        let projection = project(&[], metrics(10), options(true, None));
        assert!(projection.is_empty());
    }
}

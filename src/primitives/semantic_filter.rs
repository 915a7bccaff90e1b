//! Semantic narrowing of literal occurrences
//!
//! Given the literal occurrences of a token and the symbol the token resolved
//! to at the cursor, keep only the occurrences that resolve to the same
//! binding:
//!
//! - locals and parameters only count inside their enclosing function, and
//!   only where the occurrence resolves to a local or parameter again;
//! - everything else counts where the occurrence resolves to a type itself or
//!   to a non-local member;
//! - in both cases the declaring type must agree, unless the occurrence
//!   resolves to a free binding with no declaring type.
//!
//! This is an approximation of "same binding": a resolver that returns a
//! generic or ambiguous answer can let unrelated occurrences through.

use crate::model::occurrence::Match;
use crate::model::symbol::{LineSpan, SymbolRef};
use crate::plugin_api::EditorView;
use crate::primitives::word_navigation;
use crate::services::semantic::{resolve_symbol, SymbolResolver};

/// Lines an occurrence has to fall on to be considered at all
fn allowed_lines(origin: &SymbolRef) -> Option<LineSpan> {
    if !origin.is_local_or_parameter() {
        return None;
    }
    if origin.enclosing_function.is_none() {
        tracing::debug!("Local symbol {:?} has no enclosing function", origin.path);
    }
    origin.enclosing_function
}

/// Whether an occurrence's own resolution denotes the origin's binding
pub fn is_same_binding(origin: &SymbolRef, candidate: &SymbolRef) -> bool {
    if candidate.declaring_type.is_some() && candidate.declaring_type != origin.declaring_type {
        return false;
    }

    if origin.is_local_or_parameter() {
        candidate.is_local_or_parameter()
    } else {
        candidate.is_type_itself()
            || (candidate.member.is_some() && !candidate.is_local_or_parameter())
    }
}

/// Keep the occurrences that resolve to the same binding as `origin`
///
/// The output is an order-preserving subset of `matches`. Each surviving
/// candidate costs one resolver call, at the end of the word it starts.
pub fn filter_matches<R: SymbolResolver + ?Sized>(
    matches: &[Match],
    origin: &SymbolRef,
    resolver: &mut R,
    view: &dyn EditorView,
) -> Vec<Match> {
    if matches.is_empty() {
        return Vec::new();
    }

    let lines = allowed_lines(origin);
    let text = view.text();

    let accepted: Vec<Match> = matches
        .iter()
        .filter(|m| lines.map_or(true, |span| span.contains(m.line)))
        .filter(|m| {
            let position = word_navigation::word_end_position(&text, m.offset);
            resolve_symbol(resolver, view, position)
                .is_some_and(|candidate| is_same_binding(origin, &candidate))
        })
        .copied()
        .collect();

    tracing::debug!(
        "Semantic filter kept {} of {} occurrences of {:?}",
        accepted.len(),
        matches.len(),
        origin.path
    );

    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndicatorStyle;
    use crate::model::event::BufferId;
    use crate::model::occurrence::LineIndex;
    use crate::model::symbol::{Classification, SymbolId, SymbolKind};
    use crate::plugin_api::MarkerId;
    use crate::primitives::literal_matcher::{find_matches, SearchFlags};
    use ratatui::style::Color;
    use std::collections::HashMap;
    use std::ops::Range;
    use std::path::Path;

    struct TextView {
        text: String,
        lines: LineIndex,
    }

    impl TextView {
        fn new(text: &str) -> Self {
            Self {
                text: text.to_string(),
                lines: LineIndex::new(text),
            }
        }
    }

    impl EditorView for TextView {
        fn buffer_id(&self) -> BufferId {
            BufferId(0)
        }
        fn file_path(&self) -> Option<&Path> {
            None
        }
        fn is_editable(&self) -> bool {
            true
        }
        fn text_range(&self, range: Range<usize>) -> String {
            self.text[range].to_string()
        }
        fn len(&self) -> usize {
            self.text.len()
        }
        fn line_from_offset(&self, offset: usize) -> usize {
            self.lines.line_of(offset)
        }
        fn line_count(&self) -> usize {
            self.lines.line_count()
        }
        fn current_position(&self) -> usize {
            0
        }
        fn selected_text(&self) -> String {
            String::new()
        }
        fn set_style_range(&mut self, _: Range<usize>, _: u32, _: IndicatorStyle, _: Color) {}
        fn clear_all_styles(&mut self, _: u32) {}
        fn add_line_marker(&mut self, _: usize, _: MarkerId, _: Color) {}
        fn clear_line_markers(&mut self, _: MarkerId) {}
        fn goto_line(&mut self, _: usize) {}
    }

    /// Resolver answering from a table keyed by word end position
    struct TableResolver {
        answers: HashMap<usize, SymbolRef>,
        calls: usize,
    }

    impl SymbolResolver for TableResolver {
        fn resolve_at(&mut self, _view: &dyn EditorView, position: usize) -> Option<SymbolRef> {
            self.calls += 1;
            self.answers.get(&position).cloned()
        }
    }

    fn local(id: u64, span: LineSpan) -> SymbolRef {
        SymbolRef::member(SymbolId(id), Classification::of(SymbolKind::LocalVariable))
            .in_type(SymbolId(100))
            .within(span)
    }

    fn field(id: u64, owner: u64) -> SymbolRef {
        SymbolRef::member(SymbolId(id), Classification::of(SymbolKind::Variable))
            .in_type(SymbolId(owner))
    }

    #[test]
    fn test_locals_are_limited_to_enclosing_function() {
        // lines 0..=3 hold function one, line 4 holds function two
        let text = "function one() {\n  var x = 1;\n  x++;\n}\nfunction two() { x; }";
        let view = TextView::new(text);
        let matches = find_matches("x", text, SearchFlags::default());
        assert_eq!(matches.len(), 3);

        let origin = local(1, LineSpan::new(0, 3));
        let mut resolver = TableResolver {
            answers: matches
                .iter()
                .map(|m| (m.end(), local(1, LineSpan::new(0, 3))))
                .collect(),
            calls: 0,
        };

        let filtered = filter_matches(&matches, &origin, &mut resolver, &view);
        assert_eq!(filtered, matches[..2].to_vec());
        // The out-of-range candidate is never resolved
        assert_eq!(resolver.calls, 2);
    }

    #[test]
    fn test_member_rejects_locals_with_same_name() {
        let text = "this.size = 1;\nvar size = 2;\nsize = this.size;";
        let view = TextView::new(text);
        let matches = find_matches("size", text, SearchFlags::default());
        assert_eq!(matches.len(), 4);

        let origin = field(5, 100);
        let mut answers = HashMap::new();
        answers.insert(matches[0].end(), field(5, 100));
        answers.insert(matches[1].end(), local(9, LineSpan::new(0, 2)));
        answers.insert(matches[2].end(), local(9, LineSpan::new(0, 2)));
        answers.insert(matches[3].end(), field(5, 100));
        let mut resolver = TableResolver { answers, calls: 0 };

        let filtered = filter_matches(&matches, &origin, &mut resolver, &view);
        assert_eq!(filtered, vec![matches[0], matches[3]]);
    }

    #[test]
    fn test_other_declaring_type_is_rejected() {
        let text = "a.name; b.name;";
        let view = TextView::new(text);
        let matches = find_matches("name", text, SearchFlags::default());

        let origin = field(1, 100);
        let mut answers = HashMap::new();
        answers.insert(matches[0].end(), field(1, 100));
        answers.insert(matches[1].end(), field(2, 200));
        let mut resolver = TableResolver { answers, calls: 0 };

        let filtered = filter_matches(&matches, &origin, &mut resolver, &view);
        assert_eq!(filtered, vec![matches[0]]);
    }

    #[test]
    fn test_free_bindings_and_types_are_accepted() {
        let text = "Point; Point; Point;";
        let view = TextView::new(text);
        let matches = find_matches("Point", text, SearchFlags::default());

        let origin = SymbolRef::type_itself(SymbolId(3), Classification::of(SymbolKind::Class));
        let mut answers = HashMap::new();
        answers.insert(matches[0].end(), origin.clone());
        // A member without declaring type (free function) passes the type check
        answers.insert(
            matches[1].end(),
            SymbolRef::member(SymbolId(4), Classification::of(SymbolKind::Function)),
        );
        // Unresolved occurrence is dropped
        let mut resolver = TableResolver { answers, calls: 0 };

        let filtered = filter_matches(&matches, &origin, &mut resolver, &view);
        assert_eq!(filtered, vec![matches[0], matches[1]]);
    }

    #[test]
    fn test_empty_input() {
        let view = TextView::new("");
        let mut resolver = TableResolver {
            answers: HashMap::new(),
            calls: 0,
        };
        let origin = field(1, 1);
        assert!(filter_matches(&[], &origin, &mut resolver, &view).is_empty());
        assert_eq!(resolver.calls, 0);
    }

    #[test]
    fn test_is_same_binding_for_parameters() {
        let param = SymbolRef::member(SymbolId(1), Classification::of(SymbolKind::Parameter))
            .within(LineSpan::new(0, 5));
        let local_var =
            SymbolRef::member(SymbolId(1), Classification::of(SymbolKind::LocalVariable));
        assert!(is_same_binding(&param, &local_var));
        assert!(!is_same_binding(&param, &field(1, 1)));
        assert!(!is_same_binding(&field(1, 1), &local_var));
    }
}

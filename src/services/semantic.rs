//! Semantic engine interface
//!
//! The code-analysis engine that knows what an expression at a position
//! refers to. Resolution is expected to be synchronous and fast compared to
//! the idle delay; the session still tags every resolution with a ticket so a
//! result that arrives after the buffer changed is discarded.

use crate::model::symbol::SymbolRef;
use crate::plugin_api::EditorView;
use std::path::Path;

/// Resolves the expression at a position to a symbol
pub trait SymbolResolver {
    /// Whether this resolver understands the given file at all
    ///
    /// Files it does not understand get literal highlighting only.
    fn supports(&self, path: &Path) -> bool {
        let _ = path;
        true
    }

    /// Resolve the expression ending at `position`
    ///
    /// Returns `None` when nothing could be resolved.
    fn resolve_at(&mut self, view: &dyn EditorView, position: usize) -> Option<SymbolRef>;
}

/// Resolver for hosts without a semantic engine: never resolves anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSemantics;

impl SymbolResolver for NoSemantics {
    fn supports(&self, _path: &Path) -> bool {
        false
    }

    fn resolve_at(&mut self, _view: &dyn EditorView, _position: usize) -> Option<SymbolRef> {
        None
    }
}

impl<F> SymbolResolver for F
where
    F: FnMut(&dyn EditorView, usize) -> Option<SymbolRef>,
{
    fn resolve_at(&mut self, view: &dyn EditorView, position: usize) -> Option<SymbolRef> {
        self(view, position)
    }
}

/// Resolve at `position`, treating an empty result as no result
pub fn resolve_symbol<R: SymbolResolver + ?Sized>(
    resolver: &mut R,
    view: &dyn EditorView,
    position: usize,
) -> Option<SymbolRef> {
    resolver
        .resolve_at(view, position)
        .filter(SymbolRef::is_resolved)
}

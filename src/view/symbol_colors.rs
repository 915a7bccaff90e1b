//! Classification colors for semantically resolved symbols
//!
//! The table is keyed by `(kind, is_static)`. Types, locals and parameters
//! have a single entry (stored as non-static); constants, variables,
//! accessors and functions have a static and a non-static entry. Packages get
//! their own color outside the table.

use crate::config::Config;
use crate::model::symbol::{SymbolKind, SymbolRef};
use ratatui::style::Color;
use std::collections::HashMap;

/// Number of `(kind, is_static)` entries in a complete table
pub const TABLE_SIZE: usize = 16;

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolColorTable {
    colors: HashMap<(SymbolKind, bool), Color>,
    package: Color,
    fallback: Color,
}

impl SymbolColorTable {
    /// Build the table from the configured colors
    pub fn from_config(config: &Config) -> Self {
        let c = &config.symbol_colors;
        let mut colors = HashMap::with_capacity(TABLE_SIZE);

        colors.insert((SymbolKind::Abstract, false), c.abstract_color.into());
        colors.insert((SymbolKind::TypeDef, false), c.typedef_color.into());
        colors.insert((SymbolKind::Enum, false), c.enum_color.into());
        colors.insert((SymbolKind::Class, false), c.class_color.into());
        colors.insert((SymbolKind::Parameter, false), c.parameter_color.into());
        colors.insert((SymbolKind::LocalVariable, false), c.local_variable_color.into());

        colors.insert((SymbolKind::Constant, false), c.constant_color.into());
        colors.insert((SymbolKind::Variable, false), c.variable_color.into());
        colors.insert((SymbolKind::Setter, false), c.accessor_color.into());
        colors.insert((SymbolKind::Getter, false), c.accessor_color.into());
        colors.insert((SymbolKind::Function, false), c.method_color.into());

        colors.insert((SymbolKind::Constant, true), c.static_constant_color.into());
        colors.insert((SymbolKind::Variable, true), c.static_variable_color.into());
        colors.insert((SymbolKind::Setter, true), c.static_accessor_color.into());
        colors.insert((SymbolKind::Getter, true), c.static_accessor_color.into());
        colors.insert((SymbolKind::Function, true), c.static_method_color.into());

        Self {
            colors,
            package: c.package_color.into(),
            fallback: config.highlight_color.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, kind: SymbolKind, is_static: bool) -> Option<Color> {
        self.colors.get(&(kind, is_static)).copied()
    }

    pub fn package_color(&self) -> Color {
        self.package
    }

    /// Color for a resolved symbol
    ///
    /// The first kind in precedence order wins: abstract, typedef, enum,
    /// class, parameter, local variable, then constant, variable, setter,
    /// getter and function split by staticness. Symbols with none of these
    /// kinds get the plain highlight color.
    pub fn color_for(&self, symbol: &SymbolRef) -> Color {
        if symbol.is_package {
            return self.package;
        }
        let Some(classification) = symbol.classification() else {
            return self.fallback;
        };

        let type_like = SymbolKind::TYPE_LIKE
            .iter()
            .find(|kind| classification.has(**kind))
            .map(|kind| (*kind, false));
        let member_like = || {
            SymbolKind::MEMBER_LIKE
                .iter()
                .find(|kind| classification.has(**kind))
                .map(|kind| (*kind, classification.is_static))
        };

        type_like
            .or_else(member_like)
            .and_then(|key| self.colors.get(&key).copied())
            .unwrap_or(self.fallback)
    }
}

impl Default for SymbolColorTable {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

//! Semantically resolved symbols
//!
//! A [`SymbolRef`] is what the semantic engine hands back for a position: the
//! member the expression resolves to (if any), the type it resolves to, the
//! type declaring it, a qualified path and a classification. Identities are
//! opaque ids assigned by the engine; two references denote the same symbol
//! when all of their identities agree.

use serde::{Deserialize, Serialize};

/// Opaque identity assigned by the semantic engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SymbolId(pub u64);

/// What kind of declaration a symbol is
///
/// A symbol may carry several kinds at once (an abstract class is both
/// [`SymbolKind::Abstract`] and [`SymbolKind::Class`]); staticness is tracked
/// separately in [`Classification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Abstract,
    TypeDef,
    Enum,
    Class,
    Parameter,
    LocalVariable,
    Constant,
    Variable,
    Setter,
    Getter,
    Function,
}

impl SymbolKind {
    /// Every kind, in color precedence order
    pub const ALL: [SymbolKind; 11] = [
        SymbolKind::Abstract,
        SymbolKind::TypeDef,
        SymbolKind::Enum,
        SymbolKind::Class,
        SymbolKind::Parameter,
        SymbolKind::LocalVariable,
        SymbolKind::Constant,
        SymbolKind::Variable,
        SymbolKind::Setter,
        SymbolKind::Getter,
        SymbolKind::Function,
    ];

    /// Kinds whose color does not depend on staticness
    pub const TYPE_LIKE: [SymbolKind; 6] = [
        SymbolKind::Abstract,
        SymbolKind::TypeDef,
        SymbolKind::Enum,
        SymbolKind::Class,
        SymbolKind::Parameter,
        SymbolKind::LocalVariable,
    ];

    /// Kinds that get a separate color when static
    pub const MEMBER_LIKE: [SymbolKind; 5] = [
        SymbolKind::Constant,
        SymbolKind::Variable,
        SymbolKind::Setter,
        SymbolKind::Getter,
        SymbolKind::Function,
    ];
}

/// Kinds plus an independent static flag
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Classification {
    kinds: Vec<SymbolKind>,
    pub is_static: bool,
}

impl Classification {
    pub fn new(kinds: impl IntoIterator<Item = SymbolKind>) -> Self {
        let mut classification = Self::default();
        for kind in kinds {
            classification.insert(kind);
        }
        classification
    }

    /// Classification with a single kind
    pub fn of(kind: SymbolKind) -> Self {
        Self::new([kind])
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn insert(&mut self, kind: SymbolKind) {
        if let Err(pos) = self.kinds.binary_search(&kind) {
            self.kinds.insert(pos, kind);
        }
    }

    pub fn has(&self, kind: SymbolKind) -> bool {
        self.kinds.binary_search(&kind).is_ok()
    }

    pub fn kinds(&self) -> &[SymbolKind] {
        &self.kinds
    }

    /// Locals and parameters are scoped to their enclosing function
    pub fn is_local_or_parameter(&self) -> bool {
        self.has(SymbolKind::LocalVariable) || self.has(SymbolKind::Parameter)
    }
}

/// A class member, local variable or parameter a position resolves to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberRef {
    pub id: SymbolId,
    pub classification: Classification,
}

/// A type a position resolves to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    pub id: SymbolId,
    pub classification: Classification,
}

/// Inclusive line range of a function body (0-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineSpan {
    pub line_from: usize,
    pub line_to: usize,
}

impl LineSpan {
    pub fn new(line_from: usize, line_to: usize) -> Self {
        Self { line_from, line_to }
    }

    pub fn contains(&self, line: usize) -> bool {
        line >= self.line_from && line <= self.line_to
    }
}

/// Result of resolving the expression at a position
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolRef {
    /// Member the expression resolves to
    pub member: Option<MemberRef>,
    /// Type of the expression (or the type itself when the expression names one)
    pub resolved_type: Option<TypeRef>,
    /// Type declaring the member; `None` for free bindings
    pub declaring_type: Option<SymbolId>,
    /// Fully qualified path
    pub path: String,
    pub is_package: bool,
    /// Function the symbol is scoped to, for locals and parameters
    pub enclosing_function: Option<LineSpan>,
}

impl SymbolRef {
    /// A member (field, method, local, parameter...)
    pub fn member(id: SymbolId, classification: Classification) -> Self {
        Self {
            member: Some(MemberRef { id, classification }),
            ..Self::default()
        }
    }

    /// An expression naming a type directly
    pub fn type_itself(id: SymbolId, classification: Classification) -> Self {
        Self {
            resolved_type: Some(TypeRef { id, classification }),
            ..Self::default()
        }
    }

    /// A package path
    pub fn package(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_package: true,
            ..Self::default()
        }
    }

    pub fn in_type(mut self, declaring_type: SymbolId) -> Self {
        self.declaring_type = Some(declaring_type);
        self
    }

    pub fn of_type(mut self, id: SymbolId, classification: Classification) -> Self {
        self.resolved_type = Some(TypeRef { id, classification });
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn within(mut self, function: LineSpan) -> Self {
        self.enclosing_function = Some(function);
        self
    }

    /// Whether the engine actually resolved anything
    pub fn is_resolved(&self) -> bool {
        self.member.is_some() || self.resolved_type.is_some() || self.is_package
    }

    /// The expression names a type rather than a member of one
    pub fn is_type_itself(&self) -> bool {
        self.resolved_type.is_some() && self.member.is_none()
    }

    /// Member flagged as local variable or parameter
    pub fn is_local_or_parameter(&self) -> bool {
        self.member
            .as_ref()
            .is_some_and(|m| m.classification.is_local_or_parameter())
    }

    /// Classification used for coloring: the type's when the expression names
    /// a type, otherwise the member's
    pub fn classification(&self) -> Option<&Classification> {
        match (&self.member, &self.resolved_type) {
            (Some(member), _) => Some(&member.classification),
            (None, Some(ty)) => Some(&ty.classification),
            (None, None) => None,
        }
    }

    /// Whether two references denote the same symbol
    pub fn same_symbol(&self, other: &SymbolRef) -> bool {
        self.member.as_ref().map(|m| m.id) == other.member.as_ref().map(|m| m.id)
            && self.resolved_type.as_ref().map(|t| t.id)
                == other.resolved_type.as_ref().map(|t| t.id)
            && self.declaring_type == other.declaring_type
            && self.path == other.path
    }
}

use serde::{Deserialize, Serialize};

/// Inclusive, 1-based line range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
}

impl LineSpan {
    /// Build a span, rejecting line 0 and inverted ranges
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Option<Self> {
        if start == 0 || end < start {
            None
        } else {
            Some(Self { start, end })
        }
    }

    /// Re-check a span built directly from its fields
    #[must_use]
    pub const fn validated(self) -> Option<Self> {
        Self::new(self.start, self.end)
    }

    /// Get the number of lines covered
    #[must_use]
    pub const fn line_count(self) -> usize {
        self.end - self.start + 1
    }

    #[must_use]
    pub const fn overlaps(self, other: LineSpan) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// Anything the extractor can turn into a unit: a line span plus an
/// optional identifier of its own.
pub trait SpannedNode {
    fn span(&self) -> Option<LineSpan>;
    fn identifier(&self) -> Option<&str>;
}

/// Shape of a top-level construct as reported by the syntax producer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Function,
    Class,
    Import,
    /// Export statement, with the declaration it wraps if there is one.
    /// Re-exports and plain expression exports carry `None`.
    Export(Option<Declaration>),
    /// Any other top-level statement
    Statement,
}

/// Declaration wrapped by an export statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: Option<String>,
    pub span: Option<LineSpan>,
}

impl SpannedNode for Declaration {
    fn span(&self) -> Option<LineSpan> {
        self.span
    }

    fn identifier(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Declaration categories an export can unwrap to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Function,
    Class,
    Variable,
    Interface,
    TypeAlias,
    Enum,
    Namespace,
}

impl DeclarationKind {
    /// Unit kind emitted for an export wrapping this declaration
    #[must_use]
    pub const fn unit_kind(self) -> UnitKind {
        match self {
            Self::Function => UnitKind::Function,
            Self::Class => UnitKind::Class,
            Self::Variable => UnitKind::Variable,
            Self::Interface => UnitKind::Interface,
            Self::TypeAlias => UnitKind::Type,
            Self::Enum => UnitKind::Enum,
            Self::Namespace => UnitKind::Namespace,
        }
    }
}

/// A declaration or statement at a file's outermost scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopLevelNode {
    pub kind: NodeKind,
    pub name: Option<String>,
    pub span: Option<LineSpan>,
}

impl TopLevelNode {
    #[must_use]
    pub const fn new(kind: NodeKind, span: Option<LineSpan>) -> Self {
        Self {
            kind,
            name: None,
            span,
        }
    }

    /// Builder: set identifier
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Declaration wrapped by this node, for exports
    #[must_use]
    pub const fn declaration(&self) -> Option<&Declaration> {
        match &self.kind {
            NodeKind::Export(declaration) => declaration.as_ref(),
            _ => None,
        }
    }
}

impl SpannedNode for TopLevelNode {
    fn span(&self) -> Option<LineSpan> {
        self.span
    }

    fn identifier(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Kind label carried by an emitted unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Function,
    Class,
    /// Import declaration
    Module,
    /// Export with no unwrappable declaration
    Export,
    Variable,
    Interface,
    Type,
    Enum,
    Namespace,
    /// Catch-all for top-level statements nothing else claimed
    Script,
}

impl UnitKind {
    /// Get the wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Class => "class",
            Self::Module => "module",
            Self::Export => "export",
            Self::Variable => "variable",
            Self::Interface => "interface",
            Self::Type => "type",
            Self::Enum => "enum",
            Self::Namespace => "namespace",
            Self::Script => "script",
        }
    }
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A line-addressable chunk of one source file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeUnit {
    #[serde(rename = "type")]
    pub kind: UnitKind,

    /// Identifier, empty when the construct has none
    pub name: String,

    /// Start line (1-indexed)
    pub start_line: usize,

    /// End line (1-indexed, inclusive)
    pub end_line: usize,

    /// Source lines of the unit, trimmed
    #[serde(rename = "code")]
    pub snippet: String,

    #[serde(rename = "file_path")]
    pub origin_path: String,
}

impl CodeUnit {
    /// Get the number of lines in this unit
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.end_line.saturating_sub(self.start_line) + 1
    }

    /// Check if unit contains a specific line
    #[must_use]
    pub const fn contains_line(&self, line: usize) -> bool {
        line >= self.start_line && line <= self.end_line
    }

    #[must_use]
    pub const fn span(&self) -> LineSpan {
        LineSpan {
            start: self.start_line,
            end: self.end_line,
        }
    }
}

use crate::level::Severity;
use serde::Serialize;
use tree_sitter::Point;

/// A single finding produced by a lint rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[must_use]
pub struct Warning {
    /// Name of the rule that produced the warning.
    pub code: &'static str,
    pub severity: Severity,
    pub message: String,
    /// Url of the document the warning points into.
    pub file: String,
    pub range: SourceRange,
    pub suggestion: Option<Suggestion>,
}

impl Warning {
    /// Replacement text of the attached suggestion, if any.
    pub fn replacement(&self) -> Option<&str> {
        self.suggestion.as_ref().map(|s| s.replacement.as_str())
    }
}

/// Optional human-applicable edit for a warning. Never applied by the linter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub message: String,
    pub replacement: String,
    /// Text covered by this range is what `replacement` stands in for.
    pub range: SourceRange,
    pub applicability: Applicability,
}

/// Applicability of a suggestion. Replacements only rename the called
/// method, so the arguments may still need a human look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Applicability {
    MaybeIncorrect,
}

/// Half-open `[start, end)` range in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct SourceRange {
    pub start: Position,
    pub end: Position,
}

/// Zero-based line/column position. Columns count bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Translate a position relative to an embedded block into document
    /// coordinates. Only the block's first line inherits the column offset.
    #[must_use]
    pub fn offset_by(self, origin: Position) -> Self {
        if self.line == 0 {
            Self {
                line: origin.line,
                column: origin.column + self.column,
            }
        } else {
            Self {
                line: origin.line + self.line,
                column: self.column,
            }
        }
    }
}

impl From<Point> for Position {
    fn from(point: Point) -> Self {
        Self {
            line: point.row,
            column: point.column,
        }
    }
}

impl SourceRange {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn offset_by(self, origin: Position) -> Self {
        Self {
            start: self.start.offset_by(origin),
            end: self.end.offset_by(origin),
        }
    }

    pub fn contains(&self, other: &SourceRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

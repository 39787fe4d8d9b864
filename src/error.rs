use thiserror::Error;

/// Result alias for errors emitted by polymer-lint internals.
pub type LintResult<T> = Result<T, LintError>;

/// Structured error type for polymer-lint subsystems.
///
/// Only parser setup and rule configuration fail through this type. Failures
/// while inspecting a single syntax node are absorbed by the rule that hit
/// them.
#[derive(Debug, Error)]
pub enum LintError {
    #[error("failed to load JavaScript grammar: {0}")]
    Grammar(String),

    #[error("failed to parse {0}")]
    Parse(String),

    #[error("check `{check}` in rule `{rule}` has no message")]
    MissingMessage {
        rule: &'static str,
        check: &'static str,
    },

    #[error("check `{check}` in rule `{rule}` has an empty message")]
    EmptyMessage {
        rule: &'static str,
        check: &'static str,
    },

    #[error("unknown lint: {0}")]
    UnknownLint(String),
}

impl LintError {
    pub fn parse(what: impl Into<String>) -> Self {
        Self::Parse(what.into())
    }
}

/// Why a computed replacement could not be produced for a matched node.
///
/// Never fatal: the emitter drops the suggestion and keeps the warning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplacementError {
    #[error("no replacement is defined for `{0}`")]
    Undefined(&'static str),

    #[error("unexpected node shape: {0}")]
    UnexpectedShape(String),
}

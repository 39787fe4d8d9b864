use crate::ast::{NodeKind, SyntaxNode};
use crate::diagnostics::{Applicability, SourceRange, Suggestion, Warning};
use crate::error::{LintError, LintResult, ReplacementError};
use crate::level::Severity;

/// Pure predicate deciding whether a node is a flagged call.
pub type Matcher = fn(&SyntaxNode) -> bool;

/// Suggested replacement for a flagged API.
#[derive(Debug, Clone, Copy)]
pub enum Replacement {
    /// No safe rewrite exists; the warning carries a message only.
    None,
    /// Fixed text standing in for the called method name.
    Literal(&'static str),
    /// Text derived from the matched call. An `Err` drops the suggestion.
    Computed(fn(&SyntaxNode) -> Result<String, ReplacementError>),
}

/// Warning text for a flagged API.
#[derive(Debug, Clone, Copy)]
pub enum Message {
    Literal(&'static str),
    Computed(fn(&SyntaxNode) -> String),
}

/// One row of a rule's table of flagged APIs.
#[derive(Debug, Clone, Copy)]
pub struct ApiCheck {
    /// Display name of the flagged API, e.g. `this.$$`.
    pub name: &'static str,
    pub matcher: Matcher,
    pub replacement: Replacement,
    pub message: Option<Message>,
}

impl ApiCheck {
    /// Reject rows that could never produce a readable warning.
    pub fn validate(&self, rule: &'static str) -> LintResult<()> {
        match self.message {
            None => Err(LintError::MissingMessage {
                rule,
                check: self.name,
            }),
            Some(Message::Literal(text)) if text.trim().is_empty() => Err(LintError::EmptyMessage {
                rule,
                check: self.name,
            }),
            Some(_) => Ok(()),
        }
    }

    /// Build the warning for a node this check's matcher accepted.
    ///
    /// Returns `None` only for a row that skipped validation and has no
    /// message. A computed message that comes back blank falls back to a
    /// generic one naming the API.
    pub fn emit(&self, code: &'static str, file: &str, node: &SyntaxNode) -> Option<Warning> {
        let mut message = match self.message? {
            Message::Literal(text) => text.to_string(),
            Message::Computed(describe) => describe(node),
        };
        if message.trim().is_empty() {
            tracing::debug!(check = self.name, "computed message is empty, using fallback");
            message = format!("`{}` was removed in Polymer 2.0", self.name);
        }

        Some(Warning {
            code,
            severity: Severity::Error,
            message,
            file: file.to_string(),
            range: node.range,
            suggestion: self.suggestion(node),
        })
    }

    fn suggestion(&self, node: &SyntaxNode) -> Option<Suggestion> {
        let replacement = match self.replacement {
            Replacement::None => return None,
            Replacement::Literal(text) => text.to_string(),
            Replacement::Computed(compute) => match compute(node) {
                Ok(text) => text,
                Err(err) => {
                    tracing::debug!(check = self.name, %err, "dropping replacement suggestion");
                    return None;
                }
            },
        };

        Some(Suggestion {
            message: format!("replace with `{replacement}`"),
            range: method_name_range(node).unwrap_or(node.range),
            replacement,
            applicability: Applicability::MaybeIncorrect,
        })
    }
}

/// Range of `method` in `receiver.method(...)`.
fn method_name_range(node: &SyntaxNode) -> Option<SourceRange> {
    let NodeKind::Call { callee, .. } = &node.kind else {
        return None;
    };
    match &callee.kind {
        NodeKind::Member { property, .. } => Some(property.range),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::build::*;
    use crate::diagnostics::Position;

    fn always(_: &SyntaxNode) -> bool {
        true
    }

    fn failing(_: &SyntaxNode) -> Result<String, ReplacementError> {
        Err(ReplacementError::UnexpectedShape("call".to_string()))
    }

    fn computed(node: &SyntaxNode) -> Result<String, ReplacementError> {
        Ok(format!("computed:{}", node.kind_name()))
    }

    fn check(replacement: Replacement, message: Option<Message>) -> ApiCheck {
        ApiCheck {
            name: "test",
            matcher: always,
            replacement,
            message,
        }
    }

    #[test]
    fn validate_rejects_missing_message() {
        let err = check(Replacement::None, None)
            .validate("rule")
            .expect_err("missing message must be rejected");
        assert!(matches!(err, LintError::MissingMessage { check: "test", .. }));
    }

    #[test]
    fn validate_rejects_blank_literal_message() {
        let err = check(Replacement::None, Some(Message::Literal("  ")))
            .validate("rule")
            .expect_err("blank message must be rejected");
        assert!(matches!(err, LintError::EmptyMessage { .. }));
    }

    #[test]
    fn emitted_warning_is_an_error_at_the_call() {
        let mut node = call(member(this(), ident("$$")), vec![]);
        node.range = SourceRange::new(Position::new(1, 2), Position::new(1, 12));

        let warning = check(Replacement::None, Some(Message::Literal("gone")))
            .emit("code", "el.js", &node)
            .expect("warning");
        assert_eq!(warning.severity, Severity::Error);
        assert_eq!(warning.code, "code");
        assert_eq!(warning.range, node.range);
        assert_eq!(warning.suggestion, None);
    }

    #[test]
    fn literal_replacement_anchors_to_method_name() {
        let mut property = ident("$$");
        property.range = SourceRange::new(Position::new(0, 5), Position::new(0, 7));
        let node = call(member(this(), property), vec![]);

        let warning = check(Replacement::Literal("shadowRoot.querySelector"), Some(Message::Literal("gone")))
            .emit("code", "el.js", &node)
            .expect("warning");
        let suggestion = warning.suggestion.expect("suggestion");
        assert_eq!(suggestion.replacement, "shadowRoot.querySelector");
        assert_eq!(suggestion.range.start, Position::new(0, 5));
        assert_eq!(suggestion.applicability, Applicability::MaybeIncorrect);
    }

    #[test]
    fn computed_replacement_is_evaluated() {
        let node = call(member(this(), ident("x")), vec![]);
        let warning = check(Replacement::Computed(computed), Some(Message::Literal("gone")))
            .emit("code", "el.js", &node)
            .expect("warning");
        assert_eq!(warning.replacement(), Some("computed:call_expression"));
    }

    #[test]
    fn failing_replacement_keeps_message_only_warning() {
        let node = call(member(this(), ident("x")), vec![]);
        let warning = check(Replacement::Computed(failing), Some(Message::Literal("gone")))
            .emit("code", "el.js", &node)
            .expect("warning is still emitted");
        assert_eq!(warning.message, "gone");
        assert_eq!(warning.suggestion, None);
    }

    #[test]
    fn computed_message_uses_node() {
        fn describe(node: &SyntaxNode) -> String {
            format!("saw {}", node.kind_name())
        }
        let node = call(member(this(), ident("x")), vec![]);
        let warning = check(Replacement::None, Some(Message::Computed(describe)))
            .emit("code", "el.js", &node)
            .expect("warning");
        assert_eq!(warning.message, "saw call_expression");
    }

    #[test]
    fn blank_computed_message_still_warns() {
        fn blank(_: &SyntaxNode) -> String {
            "  ".to_string()
        }
        let node = call(member(this(), ident("x")), vec![]);
        let warning = check(Replacement::None, Some(Message::Computed(blank)))
            .emit("code", "el.js", &node)
            .expect("every match produces a warning");
        assert_eq!(warning.message, "`test` was removed in Polymer 2.0");
        assert_eq!(warning.range, node.range);
    }
}

use crate::ast::SyntaxNode;
use crate::diagnostics::Warning;
use crate::document::{Document, FeatureKind};
use crate::error::{LintResult, ReplacementError};
use crate::lint::{LintDescriptor, LintRule};
use crate::visitor::walk_document;
use futures::FutureExt;
use futures::future::BoxFuture;

use super::api_check::{ApiCheck, Message, Replacement};
use super::matchers::{is_event_fire, is_polymer_instanceof, is_query_selector_shorthand};

// ============================================================================
// RemovedApisLint - Polymer 1.x APIs dropped in 2.0
// ============================================================================

static REMOVED_APIS: LintDescriptor = LintDescriptor {
    name: "removed-apis",
    description: "\
Warns when Polymer 1.x APIs that were removed in Polymer 2.0 are called.

    Polymer.instanceof(el, MyElement);
    this.$$('.foo');

Accepted syntax:

    el instanceof MyElement;
    this.shadowRoot.querySelector('.foo');",
};

/// Flagged APIs, in the order their warnings are emitted for a shared node.
const ACTIVE_CHECKS: &[ApiCheck] = &[
    ApiCheck {
        name: "Polymer.instanceof",
        matcher: is_polymer_instanceof,
        // The instanceof operator does not see Polymer 1.x element prototypes.
        replacement: Replacement::None,
        message: Some(Message::Literal(
            "`Polymer.instanceof` was removed in Polymer 2.0; use the `instanceof` operator \
             against the element class instead",
        )),
    },
    ApiCheck {
        name: "this.$$",
        matcher: is_query_selector_shorthand,
        replacement: Replacement::Literal("shadowRoot.querySelector"),
        message: Some(Message::Literal(
            "`this.$$` was removed in Polymer 2.0; use `this.shadowRoot.querySelector` instead",
        )),
    },
];

/// Check for `this.fire(...)`.
///
/// Not part of the active table: neither its message nor its replacement
/// text is settled, so validation rejects it until both are written.
pub fn event_fire_check() -> ApiCheck {
    ApiCheck {
        name: "this.fire",
        matcher: is_event_fire,
        replacement: Replacement::Computed(replace_event_fire),
        message: None,
    }
}

/// Replacement for a matched `this.fire(...)` call.
pub fn replace_event_fire(_node: &SyntaxNode) -> Result<String, ReplacementError> {
    // TODO: settle whether `fire` maps to `dispatchEvent(new CustomEvent(..))`
    // with or without `bubbles`/`composed` before producing text here.
    Err(ReplacementError::Undefined("this.fire"))
}

pub struct RemovedApisLint {
    checks: Vec<ApiCheck>,
}

impl RemovedApisLint {
    /// The rule with its built-in table.
    pub fn new() -> LintResult<Self> {
        Self::with_checks(ACTIVE_CHECKS.to_vec())
    }

    /// The rule with a custom table; every row must carry a message.
    pub fn with_checks(checks: Vec<ApiCheck>) -> LintResult<Self> {
        for check in &checks {
            check.validate(REMOVED_APIS.name)?;
        }
        Ok(Self { checks })
    }

    pub fn checks(&self) -> &[ApiCheck] {
        &self.checks
    }

    fn check_document(&self, document: &Document) -> Vec<Warning> {
        let mut warnings = Vec::new();
        if document.features(FeatureKind::JsDocument).next().is_none() {
            tracing::trace!(url = document.url(), "no script blocks");
            return warnings;
        }

        walk_document(document, &mut |_, node| {
            for check in &self.checks {
                if !(check.matcher)(node) {
                    continue;
                }
                if let Some(warning) = check.emit(REMOVED_APIS.name, document.url(), node) {
                    warnings.push(warning);
                }
            }
        });

        warnings
    }
}

impl LintRule for RemovedApisLint {
    fn descriptor(&self) -> &'static LintDescriptor {
        &REMOVED_APIS
    }

    fn check<'a>(&'a self, document: &'a Document) -> BoxFuture<'a, Vec<Warning>> {
        async move { self.check_document(document) }.boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentKind;
    use crate::error::LintError;
    use crate::level::Severity;

    fn lint(source: &str) -> Vec<Warning> {
        let doc = Document::from_js("el.js", source).expect("parse");
        RemovedApisLint::new().expect("rule").check_document(&doc)
    }

    #[test]
    fn built_in_table_is_valid() {
        let rule = RemovedApisLint::new().expect("built-in checks carry messages");
        let names: Vec<_> = rule.checks().iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Polymer.instanceof", "this.$$"]);
    }

    #[test]
    fn flags_query_selector_shorthand_with_replacement() {
        let warnings = lint("this.$$('.foo');");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, "removed-apis");
        assert_eq!(warnings[0].severity, Severity::Error);
        assert_eq!(warnings[0].replacement(), Some("shadowRoot.querySelector"));
    }

    #[test]
    fn flags_polymer_instanceof_without_replacement() {
        let warnings = lint("Polymer.instanceof(el, MyElement);");
        assert_eq!(warnings.len(), 1);
        assert!(!warnings[0].message.is_empty());
        assert_eq!(warnings[0].replacement(), None);
    }

    #[test]
    fn fire_is_detected_but_not_active() {
        assert!(lint("this.fire('change');").is_empty());
    }

    #[test]
    fn activating_fire_fails_validation() {
        let mut checks = ACTIVE_CHECKS.to_vec();
        checks.push(event_fire_check());
        let err = RemovedApisLint::with_checks(checks)
            .err()
            .expect("fire check has no message");
        assert!(matches!(
            err,
            LintError::MissingMessage {
                rule: "removed-apis",
                check: "this.fire"
            }
        ));
    }

    #[test]
    fn fire_replacement_is_undefined() {
        let doc = Document::from_js("el.js", "this.fire('x');").expect("parse");
        let mut results = Vec::new();
        walk_document(&doc, &mut |_, node| {
            if is_event_fire(node) {
                results.push(replace_event_fire(node));
            }
        });
        assert_eq!(results, vec![Err(ReplacementError::Undefined("this.fire"))]);
    }

    #[test]
    fn fire_with_a_message_degrades_to_message_only() {
        let mut fire = event_fire_check();
        fire.message = Some(Message::Literal("`this.fire` was removed"));
        let rule = RemovedApisLint::with_checks(vec![fire]).expect("rule");
        let doc = Document::from_js("el.js", "this.fire('x');").expect("parse");

        let warnings = rule.check_document(&doc);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].suggestion, None);
    }

    #[test]
    fn empty_html_document_has_no_warnings() {
        let doc = Document::empty("el.html", DocumentKind::Html);
        let rule = RemovedApisLint::new().expect("rule");
        assert!(rule.check_document(&doc).is_empty());
    }
}

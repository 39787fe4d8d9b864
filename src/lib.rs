//! Polymer lint engine and rule registry.
//!
//! The crate exposes a `LintEngine` that runs every registered rule over
//! parsed documents, plus the `removed-apis` rule that flags Polymer 1.x
//! calls which no longer exist in Polymer 2.0.

pub mod ast;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod document;
pub mod error;
pub mod html;
pub mod level;
pub mod lint;
pub mod parser;
pub mod rules;
pub mod telemetry;
pub mod visitor;

use futures::StreamExt;
use futures::future::join_all;
use futures::stream;
use tracing::Instrument;

use crate::diagnostics::Warning;
use crate::document::Document;
use crate::error::LintResult;
use crate::lint::LintRegistry;

/// Documents checked at the same time by [`LintEngine::check_documents`].
const DOCUMENT_CONCURRENCY: usize = 16;

/// Engine orchestrates linting by running registered rules over documents.
pub struct LintEngine {
    registry: LintRegistry,
}

impl LintEngine {
    pub fn new(registry: LintRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &LintRegistry {
        &self.registry
    }

    /// Run every rule over one document.
    ///
    /// Warnings are grouped by rule in registry order; each rule's warnings
    /// keep the order that rule produced them in.
    pub async fn check_document(&self, document: &Document) -> Vec<Warning> {
        let per_rule = join_all(self.registry.rules().map(|rule| rule.check(document))).await;
        per_rule.into_iter().flatten().collect()
    }

    /// Check many documents concurrently. Results line up with `documents`.
    pub async fn check_documents(&self, documents: &[Document]) -> Vec<Vec<Warning>> {
        let span = tracing::info_span!("check_documents", count = documents.len());
        stream::iter(documents)
            .map(|document| self.check_document(document))
            .buffered(DOCUMENT_CONCURRENCY)
            .collect::<Vec<_>>()
            .instrument(span)
            .await
    }

    /// Lint a single in-memory JavaScript source and return warnings.
    pub fn lint_source(&self, url: &str, source: &str) -> LintResult<Vec<Warning>> {
        let document = Document::from_js(url, source)?;
        Ok(futures::executor::block_on(self.check_document(&document)))
    }
}

/// Construct a `LintEngine` with all built-in rules enabled.
pub fn create_default_engine() -> LintResult<LintEngine> {
    Ok(LintEngine::new(LintRegistry::default_rules()?))
}

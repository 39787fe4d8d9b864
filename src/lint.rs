use crate::diagnostics::Warning;
use crate::document::Document;
use crate::error::{LintError, LintResult};
use futures::future::BoxFuture;
use std::collections::HashSet;

/// Static metadata describing a lint rule.
#[derive(Debug)]
pub struct LintDescriptor {
    /// Stable identifier, also used as the code of every warning.
    pub name: &'static str,
    pub description: &'static str,
}

/// A single lint rule that inspects one document at a time.
///
/// Rules hold no per-document state, so one instance can check many
/// documents concurrently.
pub trait LintRule: Send + Sync {
    fn descriptor(&self) -> &'static LintDescriptor;

    /// Warnings for `document`, ordered by where they occur.
    fn check<'a>(&'a self, document: &'a Document) -> BoxFuture<'a, Vec<Warning>>;
}

/// Explicitly composed set of active rules.
pub struct LintRegistry {
    rules: Vec<Box<dyn LintRule>>,
}

impl Default for LintRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LintRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    #[must_use]
    pub fn with_rule(mut self, rule: impl LintRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn rules(&self) -> impl Iterator<Item = &Box<dyn LintRule>> {
        self.rules.iter()
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &'static LintDescriptor> + '_ {
        self.rules.iter().map(|r| r.descriptor())
    }

    pub fn find_descriptor(&self, name: &str) -> Option<&'static LintDescriptor> {
        self.descriptors().find(|d| d.name == name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Every built-in rule.
    ///
    /// # Errors
    ///
    /// Fails when a built-in rule's static configuration is invalid.
    pub fn default_rules() -> LintResult<Self> {
        Ok(Self::new().with_rule(crate::rules::RemovedApisLint::new()?))
    }

    /// Built-in rules narrowed to `only` (when non-empty) minus `skip`.
    ///
    /// # Errors
    ///
    /// Returns error if any lint name in `only` or `skip` is unknown.
    pub fn default_rules_filtered(only: &[String], skip: &[String]) -> LintResult<Self> {
        let all = Self::default_rules()?;
        let known: HashSet<&str> = all.descriptors().map(|d| d.name).collect();

        for n in only.iter().chain(skip.iter()) {
            if !known.contains(n.as_str()) {
                return Err(LintError::UnknownLint(n.clone()));
            }
        }

        let only_set: Option<HashSet<&str>> = if only.is_empty() {
            None
        } else {
            Some(only.iter().map(String::as_str).collect())
        };
        let skip_set: HashSet<&str> = skip.iter().map(String::as_str).collect();

        let mut reg = Self::new();
        for rule in all.rules {
            let name = rule.descriptor().name;
            if only_set.as_ref().is_some_and(|only| !only.contains(name)) {
                continue;
            }
            if skip_set.contains(name) {
                continue;
            }
            reg.rules.push(rule);
        }

        Ok(reg)
    }
}

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{InvoiceError, Severity, Violation};

/// Ordered collection of rule violations produced by validation.
///
/// Violations are kept in the order the rule families ran. Warnings are
/// carried alongside errors but never make an invoice invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    entries: Vec<Violation>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation of a catalogued rule.
    pub fn add(&mut self, rule: &str, text: impl Into<String>) {
        self.entries.push(Violation::new(rule, text));
    }

    pub fn push(&mut self, violation: Violation) {
        self.entries.push(violation);
    }

    pub fn extend(&mut self, violations: impl IntoIterator<Item = Violation>) {
        self.entries.extend(violations);
    }

    /// `true` when no error-severity violation was recorded.
    pub fn is_valid(&self) -> bool {
        !self.entries.iter().any(Violation::is_error)
    }

    /// Number of errors. Warnings are not counted.
    pub fn count(&self) -> usize {
        self.entries.iter().filter(|v| v.is_error()).count()
    }

    /// Error-severity violations, in report order.
    pub fn violations(&self) -> Vec<&Violation> {
        self.entries
            .iter()
            .filter(|v| v.severity == Severity::Error)
            .collect()
    }

    /// Warning-severity violations, in report order.
    pub fn warnings(&self) -> Vec<&Violation> {
        self.entries
            .iter()
            .filter(|v| v.severity == Severity::Warning)
            .collect()
    }

    /// Errors and warnings, in report order.
    pub fn all(&self) -> &[Violation] {
        &self.entries
    }

    /// Distinct rule codes present in the report.
    pub fn rules(&self) -> BTreeSet<&str> {
        self.entries.iter().map(|v| v.rule.as_str()).collect()
    }

    /// Whether any violation of `rule` was recorded.
    pub fn has(&self, rule: &str) -> bool {
        self.entries.iter().any(|v| v.rule == rule)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn retain_errors(&mut self) {
        self.entries.retain(Violation::is_error);
    }

    /// Convert into a `Result`, failing when the report holds errors.
    pub fn into_result(self) -> Result<(), InvoiceError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(InvoiceError::Validation(self))
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return write!(f, "no violations");
        }
        for (i, violation) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl IntoIterator for Report {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::report::Report;
use super::rules;

/// Errors surfaced by reading, writing or checking an invoice.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InvoiceError {
    /// The underlying reader or writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed XML, or a value that cannot be represented in the model.
    #[error(
        "parse error: {message}{}",
        .line_id.as_ref().map(|id| format!(" (invoice line {id})")).unwrap_or_default()
    )]
    Parse {
        message: String,
        /// Identifier of the invoice line being read when the error occurred.
        line_id: Option<String>,
    },

    /// The document is well-formed XML but not a supported syntax.
    #[error("unsupported schema: {0}")]
    UnsupportedSchema(String),

    /// The invoice failed validation.
    #[error("validation failed with {count} error(s):\n{0}", count = .0.count())]
    Validation(Report),

    /// The invoice could not be serialised.
    #[error("write error: {0}")]
    Write(String),
}

impl InvoiceError {
    pub(crate) fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            line_id: None,
        }
    }

    pub(crate) fn parse_in_line(message: impl Into<String>, line_id: Option<&str>) -> Self {
        Self::Parse {
            message: message.into(),
            line_id: line_id.map(str::to_owned),
        }
    }
}

/// Whether a violation blocks acceptance of the invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule code, e.g. `BR-CO-10` or `PEPPOL-EN16931-R001`.
    pub rule: String,
    /// EN 16931 business terms the rule is about (e.g. `BT-106`).
    pub fields: Vec<String>,
    /// Human-readable description of what is wrong.
    pub text: String,
    pub severity: Severity,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.rule, self.text)
    }
}

impl Violation {
    /// Create a violation for a catalogued rule.
    ///
    /// Fields and severity come from the rule catalog. An empty `text`
    /// falls back to the catalog description.
    pub fn new(rule: &str, text: impl Into<String>) -> Self {
        let text = text.into();
        match rules::lookup(rule) {
            Some(entry) => Self {
                rule: entry.code.to_string(),
                fields: entry.fields.iter().map(|f| (*f).to_string()).collect(),
                text: if text.is_empty() {
                    entry.description.to_string()
                } else {
                    text
                },
                severity: entry.severity,
            },
            None => {
                tracing::debug!(rule, "violation for uncatalogued rule");
                Self {
                    rule: rule.to_string(),
                    fields: Vec::new(),
                    text,
                    severity: Severity::Error,
                }
            }
        }
    }

    /// Same as [`Violation::new`] but with the severity lowered to a warning.
    pub fn warning(rule: &str, text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::new(rule, text)
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

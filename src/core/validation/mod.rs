//! Rule-based invoice validation.
//!
//! Rule families run in a fixed order: core structure and arithmetic,
//! then the VAT category rules, then the PEPPOL and XRechnung
//! extensions when the profile (or [`ValidationOptions`]) selects them.
//! Validation never mutates the invoice and never stops at the first
//! failure.

mod structure;
mod vat;

use super::profile::level;
use super::report::Report;
use super::types::Invoice;

/// Switches for [`validate_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Apply the PEPPOL rules even if the profile is not PEPPOL.
    pub peppol: bool,
    /// Apply the XRechnung rules even if the profile is not XRechnung.
    pub xrechnung: bool,
    /// Keep warning-severity violations in the report.
    pub include_warnings: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            peppol: false,
            xrechnung: false,
            include_warnings: true,
        }
    }
}

impl ValidationOptions {
    pub fn with_peppol(mut self) -> Self {
        self.peppol = true;
        self
    }

    pub fn with_xrechnung(mut self) -> Self {
        self.xrechnung = true;
        self
    }

    /// Drop warning-severity violations from the report.
    pub fn errors_only(mut self) -> Self {
        self.include_warnings = false;
        self
    }
}

/// Validate an invoice against every rule family its profile selects.
pub fn validate(invoice: &Invoice) -> Report {
    validate_with(invoice, &ValidationOptions::default())
}

/// Validate with explicit options.
#[tracing::instrument(skip_all, fields(number = %invoice.number, profile = invoice.profile().tag()))]
pub fn validate_with(invoice: &Invoice, options: &ValidationOptions) -> Report {
    let profile = invoice.profile();
    // An unrecognised profile is reported (BR-1) and otherwise checked as EN 16931.
    let level = match profile.level() {
        level::UNKNOWN => level::EN16931,
        l => l,
    };

    let mut report = Report::new();
    structure::check(invoice, level, &mut report);
    vat::check(invoice, level, &mut report);

    if profile.is_peppol() || options.peppol {
        crate::peppol::check(invoice, &mut report);
    }
    if profile.is_xrechnung() || options.xrechnung {
        crate::xrechnung::check(invoice, &mut report);
    }

    if !options.include_warnings {
        report.retain_errors();
    }

    tracing::debug!(
        errors = report.count(),
        total = report.all().len(),
        "validation finished"
    );
    report
}

/// Header checks that make a document unusable, run right after reading:
/// BR-1 to BR-5 and the document type code list.
pub fn check_integrity(invoice: &Invoice) -> Report {
    let mut report = Report::new();
    structure::header(invoice, &mut report);
    report
}

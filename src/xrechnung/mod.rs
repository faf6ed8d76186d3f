//! XRechnung (German CIUS of EN 16931) rules.
//!
//! The `BR-DE-*` rules run from [`crate::core::validate_with`] whenever
//! the specification identifier names XRechnung or
//! [`ValidationOptions::with_xrechnung`] is set. IBAN and email checks
//! are structural only.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use einvoice::core::*;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
//! let invoice = InvoiceBuilder::new("XR-1", date).profile(Profile::XRechnung).build();
//! let report = einvoice::xrechnung::validate_xrechnung(&invoice);
//! assert!(report.has("BR-DE-15"));
//! ```
//!
//! [`ValidationOptions::with_xrechnung`]: crate::core::ValidationOptions::with_xrechnung

mod validate;

pub use validate::{check, is_valid_email, is_valid_iban};

use crate::core::{Invoice, Report, ValidationOptions};

/// XRechnung 3.0 specification identifier (BT-24).
pub const XRECHNUNG_CUSTOMIZATION_ID: &str = crate::core::XRECHNUNG_URN;

/// Full validation with the XRechnung rules forced on.
pub fn validate_xrechnung(invoice: &Invoice) -> Report {
    crate::core::validate_with(invoice, &ValidationOptions::default().with_xrechnung())
}

//! PEPPOL BIS Billing 3.0 rules.
//!
//! PEPPOL BIS 3.0 is a CIUS of EN 16931 with stricter rules
//! (`PEPPOL-EN16931-R*`) and national overlays for Dutch and Norwegian
//! sellers. The rules run from [`crate::core::validate_with`] whenever the
//! profile is PEPPOL or [`ValidationOptions::with_peppol`] is set.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use einvoice::core::*;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
//! let invoice = InvoiceBuilder::new("P-1", date).profile(Profile::Peppol).build();
//! let report = einvoice::peppol::validate_peppol(&invoice);
//! assert!(report.has("PEPPOL-EN16931-R020"));
//! ```
//!
//! [`ValidationOptions::with_peppol`]: crate::core::ValidationOptions::with_peppol

mod eas;
mod validate;

pub use eas::{EasScheme, is_eas_code, is_valid_gln};
pub use validate::check;

use crate::core::{Invoice, Report, ValidationOptions};

/// PEPPOL BIS Billing 3.0 customization identifier (BT-24).
pub const PEPPOL_CUSTOMIZATION_ID: &str = crate::core::PEPPOL_URN;

/// PEPPOL BIS Billing 3.0 profile identifier (BT-23).
pub const PEPPOL_PROFILE_ID: &str = crate::core::PEPPOL_PROCESS_ID;

/// Full validation with the PEPPOL rules forced on.
pub fn validate_peppol(invoice: &Invoice) -> Report {
    crate::core::validate_with(invoice, &ValidationOptions::default().with_peppol())
}

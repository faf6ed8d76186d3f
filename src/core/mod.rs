//! Core EN 16931 model, calculation and validation.
//!
//! Everything here is syntax-agnostic: the CII codec in [`crate::cii`]
//! maps to and from these types, and the PEPPOL and XRechnung rule sets
//! plug into [`validate_with`].

mod builder;
pub mod calculation;
pub mod codelists;
mod error;
pub mod profile;
mod report;
pub mod rules;
mod types;
mod validation;

pub use builder::*;
pub use calculation::{
    calculate, line_total, round_half_up, standard_exemption_reason, tax_amount,
    update_line_totals, update_totals, update_trade_taxes,
};
pub use error::*;
pub use profile::{
    EN16931_URN, PEPPOL_PROCESS_ID, PEPPOL_URN, Profile, XRECHNUNG_EXTENSION_URN,
    XRECHNUNG_URN, level,
};
pub use report::Report;
pub use types::*;
pub use validation::{ValidationOptions, check_integrity, validate, validate_with};

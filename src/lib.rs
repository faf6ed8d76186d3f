//! # einvoice
//!
//! EN 16931 e-invoicing core: a typed invoice model, a monetary calculator
//! and a rule-based validator, with a reader and writer for the UN/CEFACT
//! Cross Industry Invoice (CII) syntax used by ZUGFeRD and Factur-X.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Percentage-derived amounts are rounded to two places, ties away from zero.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use einvoice::core::*;
//! use rust_decimal_macros::dec;
//!
//! let invoice = InvoiceBuilder::new("RE-2024-001", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
//!     .profile(Profile::En16931)
//!     .seller(PartyBuilder::new("ACME GmbH")
//!         .address(AddressBuilder::new("DE").city("Berlin").postcode("10115").build())
//!         .vat_id("DE123456789")
//!         .build())
//!     .buyer(PartyBuilder::new("Kunde AG")
//!         .address(AddressBuilder::new("DE").city("München").postcode("80331").build())
//!         .build())
//!     .add_line(LineBuilder::new("1", "Beratung", dec!(10), "HUR", dec!(150))
//!         .tax(TaxCategory::StandardRate, dec!(19))
//!         .build())
//!     .payment_terms("Zahlbar innerhalb von 30 Tagen")
//!     .build();
//!
//! assert_eq!(invoice.totals.grand_total, Some(dec!(1785.00)));
//! assert!(validate(&invoice).is_valid());
//! ```
//!
//! ## Rule families
//!
//! | Family | Module | Active when |
//! |--------|--------|-------------|
//! | BR-*, BR-CO-*, BR-DEC-*, BR-CL-* | [`core`] | always |
//! | BR-S/AE/E/Z/G/IC/IG/IP/O-* | [`core`] | always |
//! | PEPPOL-EN16931-* and national PEPPOL rules | [`peppol`] | PEPPOL profile |
//! | BR-DE-* | [`xrechnung`] | XRechnung profile |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `cii` (default) | CII XML reader and writer |
//! | `all` | Everything |

pub mod core;
pub mod peppol;
pub mod xrechnung;

#[cfg(feature = "cii")]
pub mod cii;

// Re-export core types at crate root for convenience
pub use crate::core::*;

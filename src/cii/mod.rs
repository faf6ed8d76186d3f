//! UN/CEFACT Cross Industry Invoice (CII) reader and writer.
//!
//! CII D16B is the XML syntax behind ZUGFeRD 2.x, Factur-X and the CII
//! flavour of XRechnung. The reader maps a document onto [`Invoice`]
//! and runs the header integrity checks; the writer emits the elements
//! the invoice profile carries.
//!
//! ```
//! use chrono::NaiveDate;
//! use einvoice::cii;
//! use einvoice::core::*;
//! use rust_decimal_macros::dec;
//!
//! let invoice = InvoiceBuilder::new("RE-1", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
//!     .seller(PartyBuilder::new("ACME GmbH").vat_id("DE123456789").build())
//!     .buyer(PartyBuilder::new("Kunde AG").build())
//!     .add_line(LineBuilder::new("1", "Widget", dec!(2), "C62", dec!(10))
//!         .tax(TaxCategory::StandardRate, dec!(19))
//!         .build())
//!     .build();
//!
//! let xml = cii::to_cii_xml(&invoice).unwrap();
//! let parsed = cii::from_cii_xml(&xml).unwrap();
//! assert_eq!(parsed.invoice.totals.grand_total, Some(dec!(23.80)));
//! ```

mod reader;
mod writer;
mod xml_utils;

pub use reader::{Parsed, from_cii_xml, read_cii};
pub use writer::{Syntax, to_cii_xml, write_cii, write_invoice};

/// Namespace URIs of the CII D16B schema.
pub mod ns {
    pub const RSM: &str = "urn:un:unece:uncefact:data:standard:CrossIndustryInvoice:100";
    pub const RAM: &str =
        "urn:un:unece:uncefact:data:standard:ReusableAggregateBusinessInformationEntity:100";
    pub const QDT: &str = "urn:un:unece:uncefact:data:standard:QualifiedDataType:100";
    pub const UDT: &str = "urn:un:unece:uncefact:data:standard:UnqualifiedDataType:100";
}

/// Root namespace prefixes of the OASIS UBL 2.1 invoice and credit note.
pub(crate) const UBL_NAMESPACE_PREFIX: &str = "urn:oasis:names:specification:ubl:schema:xsd:";

/// Date format qualifier (UNTDID 2379) for `YYYYMMDD`.
pub(crate) const DATE_FORMAT: &str = "102";

//! Build an XRechnung invoice, validate it and print it as CII XML.

use chrono::NaiveDate;
use einvoice::cii;
use einvoice::core::*;
use rust_decimal_macros::dec;

fn main() -> Result<(), InvoiceError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let issued = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap_or_default();
    let invoice = InvoiceBuilder::new("RE-2024-0815", issued)
        .profile(Profile::XRechnung)
        .buyer_reference("04011000-12345-34")
        .tax_point_date(issued)
        .seller(
            PartyBuilder::new("ACME GmbH")
                .address(
                    AddressBuilder::new("DE")
                        .street("Friedrichstraße 123")
                        .city("Berlin")
                        .postcode("10115")
                        .build(),
                )
                .vat_id("DE123456789")
                .contact(Contact::new("Max Mustermann").phone("+49 30 1234567").email("rechnung@acme.de"))
                .electronic_address("EM", "rechnung@acme.de")
                .build(),
        )
        .buyer(
            PartyBuilder::new("Stadtverwaltung Musterstadt")
                .address(
                    AddressBuilder::new("DE")
                        .street("Rathausplatz 1")
                        .city("Musterstadt")
                        .postcode("12345")
                        .build(),
                )
                .electronic_address("EM", "eingang@musterstadt.de")
                .build(),
        )
        .add_line(
            LineBuilder::new("1", "Beratung", dec!(8), "HUR", dec!(120))
                .tax(TaxCategory::StandardRate, dec!(19))
                .build(),
        )
        .add_line(
            LineBuilder::new("2", "Fachbuch", dec!(2), "C62", dec!(49.90))
                .tax(TaxCategory::StandardRate, dec!(7))
                .build(),
        )
        .add_allowance(
            AllowanceChargeBuilder::allowance(dec!(20))
                .reason("Treuerabatt")
                .tax(TaxCategory::StandardRate, dec!(19))
                .build(),
        )
        .payment_means(PaymentMeans::sepa_credit_transfer("DE89370400440532013000"))
        .payment_terms("Zahlbar innerhalb von 30 Tagen ohne Abzug")
        .due_date(issued + chrono::Duration::days(30))
        .build_validated()?;

    eprintln!(
        "grand total {} {}, {} VAT rate(s)",
        invoice.totals.grand_total.unwrap_or_default(),
        invoice.currency,
        invoice.trade_taxes.len()
    );
    cii::write_cii(&invoice, std::io::stdout().lock())
}

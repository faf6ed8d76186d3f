#![cfg(feature = "cii")]

use chrono::NaiveDate;
use einvoice::cii::{self, Syntax};
use einvoice::core::*;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn seller() -> Party {
    PartyBuilder::new("ACME GmbH")
        .address(
            AddressBuilder::new("DE")
                .street("Friedrichstraße 123")
                .additional("Hinterhaus")
                .city("Berlin")
                .postcode("10115")
                .build(),
        )
        .vat_id("DE123456789")
        .tax_registration_id("201/113/40209")
        .legal_id("HRB 12345", Some("0002"))
        .trading_name("ACME")
        .contact(
            Contact::new("Max Mustermann")
                .phone("+49 30 12345678")
                .email("max@acme.de"),
        )
        .electronic_address("EM", "rechnung@acme.de")
        .build()
}

fn buyer() -> Party {
    PartyBuilder::new("Kunde AG")
        .id("K-10001")
        .global_id("4000001000005", "0088")
        .address(
            AddressBuilder::new("DE")
                .street("Marienplatz 1")
                .city("München")
                .postcode("80331")
                .build(),
        )
        .vat_id("DE987654321")
        .electronic_address("0088", "4000001000005")
        .build()
}

fn full_invoice(profile: Profile) -> Invoice {
    let mut line = LineBuilder::new("1", "Softwareentwicklung", dec!(12.5), "HUR", dec!(96))
        .tax(TaxCategory::StandardRate, dec!(19))
        .description("Sprint 14")
        .note("laut Angebot A-77")
        .build();
    line.product.seller_assigned_id = Some("SW-DEV".into());
    line.buyer_order_line_id = Some("10".into());
    line.product.characteristics.push(Characteristic {
        name: "Stufe".into(),
        value: "Senior".into(),
    });

    let mut shipping = LineBuilder::new("2", "Versandkarton", dec!(4), "H87", dec!(2.49))
        .tax(TaxCategory::StandardRate, dec!(7))
        .build();
    shipping.gross_price = Some(dec!(2.99));
    shipping.price_allowances_charges.push(AllowanceCharge {
        is_charge: false,
        amount: dec!(0.50),
        ..AllowanceCharge::default()
    });
    shipping.line_total = line_total(&shipping);

    InvoiceBuilder::new("RE-2024-0815", date(2024, 6, 15))
        .profile(profile)
        .note("Vielen Dank für Ihren Auftrag")
        .note_with_subject("Lieferung frei Haus", "AAI")
        .buyer_reference("LW-991-12345")
        .order_reference("PO-4711")
        .contract_reference("V-2024-3")
        .project_reference("PRJ-1", "Relaunch")
        .seller(seller())
        .buyer(buyer())
        .delivery_date(date(2024, 6, 10))
        .billing_period(date(2024, 6, 1), date(2024, 6, 30))
        .add_line(line)
        .add_line(shipping)
        .add_allowance(
            AllowanceChargeBuilder::allowance(dec!(25))
                .reason("Treuerabatt")
                .reason_code("95")
                .tax(TaxCategory::StandardRate, dec!(19))
                .build(),
        )
        .add_charge(
            AllowanceChargeBuilder::charge(dec!(4.90))
                .reason("Versandkosten")
                .tax(TaxCategory::StandardRate, dec!(19))
                .build(),
        )
        .payment_means(
            PaymentMeans::sepa_credit_transfer("DE89370400440532013000").with_bic("COBADEFFXXX"),
        )
        .payment_terms("Zahlbar innerhalb von 30 Tagen")
        .due_date(date(2024, 7, 15))
        .payment_reference("RE-2024-0815")
        .tax_point_date(date(2024, 6, 15))
        .preceding_invoice("RE-2024-0700", Some(date(2024, 5, 2)))
        .build()
}

#[test]
fn en16931_round_trip_is_lossless() {
    let inv = full_invoice(Profile::En16931);
    let xml = cii::to_cii_xml(&inv).unwrap();
    let parsed = cii::from_cii_xml(&xml).unwrap();
    assert!(parsed.violations.is_empty(), "{}", parsed.violations);
    assert_eq!(parsed.invoice, inv);
}

#[test]
fn xrechnung_round_trip_stays_valid() {
    let inv = full_invoice(Profile::XRechnung);
    let report = validate(&inv);
    assert!(report.is_valid(), "{report}");

    let parsed = cii::from_cii_xml(&cii::to_cii_xml(&inv).unwrap()).unwrap();
    assert_eq!(parsed.invoice.profile(), Profile::XRechnung);
    assert_eq!(validate(&parsed.invoice), report);
}

#[test]
fn round_trip_preserves_totals() {
    let inv = full_invoice(Profile::En16931);
    let parsed = cii::from_cii_xml(&cii::to_cii_xml(&inv).unwrap())
        .unwrap()
        .invoice;
    assert_eq!(parsed.totals, inv.totals);
    assert_eq!(parsed.trade_taxes, inv.trade_taxes);

    let mut recalculated = parsed.clone();
    calculate(&mut recalculated, None);
    assert_eq!(recalculated.totals, parsed.totals);
}

#[test]
fn basic_profile_drops_line_details() {
    let inv = full_invoice(Profile::Basic);
    let parsed = cii::from_cii_xml(&cii::to_cii_xml(&inv).unwrap())
        .unwrap()
        .invoice;
    assert_eq!(parsed.lines.len(), 2);
    assert_eq!(parsed.lines[0].line_total, inv.lines[0].line_total);
    assert_eq!(parsed.lines[0].product.description, None);
    assert_eq!(parsed.lines[0].buyer_order_line_id, None);
    assert!(parsed.seller.contacts.is_empty());
    assert_eq!(parsed.project_reference, None);
    assert_eq!(parsed.payment_means[0].payee_bic, None);
    // still carried at BASIC
    assert_eq!(parsed.notes.len(), 2);
    assert_eq!(parsed.allowances_charges.len(), 2);
    assert_eq!(parsed.totals, inv.totals);
}

#[test]
fn basic_wl_has_no_lines() {
    let inv = full_invoice(Profile::BasicWl);
    let parsed = cii::from_cii_xml(&cii::to_cii_xml(&inv).unwrap())
        .unwrap()
        .invoice;
    assert!(parsed.lines.is_empty());
    assert_eq!(parsed.trade_taxes, inv.trade_taxes);
    assert_eq!(parsed.buyer.postal_address, inv.buyer.postal_address);
    let report = validate(&parsed);
    assert!(!report.has("BR-16"));
    assert!(!report.has("BR-CO-10"));
    assert!(!report.has("BR-CO-18"));
}

#[test]
fn minimum_profile_keeps_header_and_totals() {
    let inv = full_invoice(Profile::Minimum);
    let parsed = cii::from_cii_xml(&cii::to_cii_xml(&inv).unwrap())
        .unwrap()
        .invoice;
    assert!(parsed.lines.is_empty());
    assert!(parsed.notes.is_empty());
    assert!(parsed.trade_taxes.is_empty());
    assert_eq!(parsed.number, inv.number);
    assert_eq!(parsed.buyer_reference, inv.buyer_reference);
    assert_eq!(parsed.buyer_order_reference, inv.buyer_order_reference);
    assert_eq!(parsed.seller.vat_id, inv.seller.vat_id);
    assert_eq!(parsed.seller.country_code(), Some("DE"));
    assert_eq!(parsed.buyer.postal_address, None);
    assert_eq!(parsed.totals.grand_total, inv.totals.grand_total);
    assert_eq!(parsed.totals.due_payable, inv.totals.due_payable);
    assert_eq!(parsed.totals.line_total, None);
}

#[test]
fn extended_profile_writes_contact_department() {
    let mut inv = full_invoice(Profile::Extended);
    inv.seller.contacts[0].department = Some("Buchhaltung".into());
    let xml = cii::to_cii_xml(&inv).unwrap();
    assert!(xml.contains("<ram:DepartmentName>Buchhaltung</ram:DepartmentName>"));

    let mut en = full_invoice(Profile::En16931);
    en.seller.contacts[0].department = Some("Buchhaltung".into());
    assert!(!cii::to_cii_xml(&en).unwrap().contains("DepartmentName"));
}

#[test]
fn direct_debit_mandate_round_trip() {
    let mut inv = InvoiceBuilder::new("RE-DD", date(2024, 6, 15))
        .seller(seller())
        .buyer(buyer())
        .add_line(
            LineBuilder::new("1", "Abo", dec!(1), "C62", dec!(9.99))
                .tax(TaxCategory::StandardRate, dec!(19))
                .build(),
        )
        .direct_debit("MANDATE-7", "DE98ZZZ09999999999")
        .build();
    inv.payment_means = vec![PaymentMeans::sepa_direct_debit("DE02120300000000202051")];

    let xml = cii::to_cii_xml(&inv).unwrap();
    assert!(xml.contains("<ram:DirectDebitMandateID>MANDATE-7</ram:DirectDebitMandateID>"));
    let parsed = cii::from_cii_xml(&xml).unwrap().invoice;
    assert_eq!(parsed.direct_debit_mandate_id.as_deref(), Some("MANDATE-7"));
    assert_eq!(parsed.creditor_reference_id.as_deref(), Some("DE98ZZZ09999999999"));
    assert_eq!(
        parsed.payment_means[0].payer_iban.as_deref(),
        Some("DE02120300000000202051")
    );
    // no terms were given, the mandate gets its own block
    assert!(parsed.payment_terms.is_empty());
}

#[test]
fn tax_currency_totals() {
    let mut inv = full_invoice(Profile::En16931);
    inv.tax_currency = Some("CHF".into());
    inv.totals.tax_total_accounting = Some(dec!(201.17));
    let xml = cii::to_cii_xml(&inv).unwrap();
    assert!(xml.contains(r#"<ram:TaxTotalAmount currencyID="CHF">201.17</ram:TaxTotalAmount>"#));
    let parsed = cii::from_cii_xml(&xml).unwrap().invoice;
    assert_eq!(parsed.totals.tax_total_accounting, Some(dec!(201.17)));
    assert_eq!(parsed.totals.tax_total, inv.totals.tax_total);
}

#[test]
fn tax_currency_equal_to_invoice_currency_keeps_both_totals() {
    let mut inv = full_invoice(Profile::En16931);
    inv.tax_currency = Some("EUR".into());
    inv.totals.tax_total_accounting = inv.totals.tax_total;
    let xml = cii::to_cii_xml(&inv).unwrap();
    assert_eq!(xml.matches(r#"<ram:TaxTotalAmount currencyID="EUR">"#).count(), 2);
    let parsed = cii::from_cii_xml(&xml).unwrap();
    assert_eq!(parsed.invoice.totals.tax_total_accounting, inv.totals.tax_total);
    assert_eq!(parsed.invoice, inv);
}

#[test]
fn special_characters_are_escaped() {
    let mut inv = full_invoice(Profile::En16931);
    inv.seller.name = "Müller & Söhne <GmbH>".into();
    inv.notes[0].content = "Preis \"netto\" & 'brutto'".into();
    let xml = cii::to_cii_xml(&inv).unwrap();
    assert!(xml.contains("Müller &amp; Söhne &lt;GmbH&gt;"));
    let parsed = cii::from_cii_xml(&xml).unwrap().invoice;
    assert_eq!(parsed.seller.name, inv.seller.name);
    assert_eq!(parsed.notes[0].content, inv.notes[0].content);
}

#[test]
fn attachment_round_trip() {
    let mut inv = full_invoice(Profile::En16931);
    inv.supporting_documents.push(SupportingDocument {
        id: "TS-2024-06".into(),
        type_code: Some(SUPPORTING_DOCUMENT.into()),
        description: Some("Stundennachweis".into()),
        uri: None,
        attachment: Some(BinaryObject {
            mime_code: "application/pdf".into(),
            filename: "stunden.pdf".into(),
            content: b"%PDF-1.7\n\x00\x01\x02binary".to_vec(),
        }),
    });
    let parsed = cii::from_cii_xml(&cii::to_cii_xml(&inv).unwrap())
        .unwrap()
        .invoice;
    assert_eq!(parsed.supporting_documents, inv.supporting_documents);
}

#[test]
fn unknown_profile_is_written_as_en16931() {
    let mut inv = full_invoice(Profile::En16931);
    inv.specification_id = "urn:example:custom".into();
    let parsed = cii::from_cii_xml(&cii::to_cii_xml(&inv).unwrap()).unwrap();
    assert_eq!(parsed.invoice.lines[0].product.description.as_deref(), Some("Sprint 14"));
    assert!(parsed.violations.has("BR-1"));
}

#[test]
fn write_invoice_dispatches_on_syntax() {
    let inv = full_invoice(Profile::En16931);
    let mut buf = Vec::new();
    cii::write_invoice(&inv, Syntax::Cii, &mut buf).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), cii::to_cii_xml(&inv).unwrap());

    let err = cii::write_invoice(&inv, Syntax::Ubl, Vec::new()).unwrap_err();
    assert!(matches!(err, InvoiceError::Write(_)));
}

#[test]
fn reads_from_any_buffered_reader() {
    let xml = cii::to_cii_xml(&full_invoice(Profile::En16931)).unwrap();
    let reader = std::io::BufReader::new(std::io::Cursor::new(xml.into_bytes()));
    let parsed = cii::read_cii(reader).unwrap();
    assert_eq!(parsed.invoice.number, "RE-2024-0815");
}

#[test]
fn ubl_input_is_refused() {
    let ubl = r#"<?xml version="1.0"?>
<Invoice xmlns="urn:oasis:names:specification:ubl:schema:xsd:Invoice-2"
         xmlns:cbc="urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2">
  <cbc:ID>1</cbc:ID>
</Invoice>"#;
    let err = cii::from_cii_xml(ubl).unwrap_err();
    assert!(matches!(err, InvoiceError::UnsupportedSchema(_)));
}

#[test]
fn truncated_document_is_a_parse_error() {
    let xml = cii::to_cii_xml(&full_invoice(Profile::En16931)).unwrap();
    let truncated = &xml.as_bytes()[..xml.len() / 2];
    assert!(matches!(
        cii::read_cii(truncated),
        Err(InvoiceError::Parse { .. })
    ));
}

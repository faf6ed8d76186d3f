use chrono::NaiveDate;
use einvoice::core::*;
use einvoice::peppol::{self, EasScheme, is_eas_code, is_valid_gln, validate_peppol};
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn address(country: &str, street: &str, city: &str, postcode: &str) -> PostalAddress {
    AddressBuilder::new(country)
        .street(street)
        .city(city)
        .postcode(postcode)
        .build()
}

fn seller() -> Party {
    PartyBuilder::new("ACME GmbH")
        .address(address("DE", "Friedrichstraße 123", "Berlin", "10115"))
        .vat_id("DE123456789")
        .electronic_address("9930", "DE123456789")
        .build()
}

fn buyer() -> Party {
    PartyBuilder::new("Kunde AG")
        .address(address("DE", "Marienplatz 1", "München", "80331"))
        .electronic_address("0088", "4000001000005")
        .build()
}

fn peppol_invoice() -> InvoiceBuilder {
    InvoiceBuilder::new("INV-2024-100", date(2024, 6, 15))
        .profile(Profile::Peppol)
        .buyer_reference("PO-4711")
        .seller(seller())
        .buyer(buyer())
        .add_line(
            LineBuilder::new("1", "Lizenz", dec!(5), "C62", dec!(80))
                .tax(TaxCategory::StandardRate, dec!(19))
                .build(),
        )
        .payment_means(PaymentMeans::sepa_credit_transfer("DE89370400440532013000"))
        .payment_terms("Net 30 days")
}

#[test]
fn valid_peppol_invoice_passes_all_rules() {
    let inv = peppol_invoice().build();
    assert!(inv.profile().is_peppol());
    let report = validate(&inv);
    assert!(report.is_empty(), "{report}");
    assert_eq!(validate_peppol(&inv), report);
}

#[test]
fn customization_and_profile_identifiers() {
    let inv = peppol_invoice().build();
    assert_eq!(inv.specification_id, peppol::PEPPOL_CUSTOMIZATION_ID);
    assert_eq!(inv.business_process.as_deref(), Some(peppol::PEPPOL_PROFILE_ID));
}

#[test]
fn peppol_process_upgrades_plain_en16931() {
    let inv = peppol_invoice()
        .specification_id(EN16931_URN)
        .business_process("urn:fdc:peppol.eu:2017:poacc:billing:01:1.0")
        .build();
    assert_eq!(inv.profile(), Profile::Peppol);
    // the identifier itself is still not the PEPPOL one
    assert!(validate(&inv).has("PEPPOL-EN16931-R004"));
}

#[test]
fn business_process_must_be_billing() {
    let mut inv = peppol_invoice().build();
    inv.business_process = Some("urn:fdc:peppol.eu:2017:poacc:ordering:01:1.0".into());
    assert!(inv.profile().is_peppol());
    assert!(validate(&inv).has("PEPPOL-EN16931-R007"));

    inv.business_process = None;
    assert!(validate(&inv).has("PEPPOL-EN16931-R001"));
}

#[test]
fn endpoints_required() {
    let mut inv = peppol_invoice().build();
    inv.seller.electronic_address = None;
    inv.buyer.electronic_address = Some(ElectronicAddress {
        scheme: "0088".into(),
        value: "4000001000006".into(),
    });
    let report = validate(&inv);
    assert!(report.has("PEPPOL-EN16931-R020"));
    assert!(report.has("PEPPOL-COMMON-R040"));
}

#[test]
fn unknown_endpoint_scheme() {
    let mut inv = peppol_invoice().build();
    inv.buyer.electronic_address = Some(ElectronicAddress {
        scheme: "XX".into(),
        value: "12345".into(),
    });
    assert!(validate(&inv).has("PEPPOL-EN16931-CL008"));
}

#[test]
fn buyer_reference_or_order_reference() {
    let mut inv = peppol_invoice().build();
    inv.buyer_reference = None;
    assert!(validate(&inv).has("PEPPOL-EN16931-R003"));
    inv.buyer_order_reference = Some("4500012345".into());
    assert!(!validate(&inv).has("PEPPOL-EN16931-R003"));
}

#[test]
fn percentage_allowance_is_checked() {
    let inv = peppol_invoice()
        .add_allowance(
            AllowanceChargeBuilder::allowance(dec!(40))
                .reason("Rabatt")
                .percentage(dec!(400), dec!(10))
                .tax(TaxCategory::StandardRate, dec!(19))
                .build(),
        )
        .build();
    assert!(!validate(&inv).has("PEPPOL-EN16931-R040"));

    let mut wrong = inv.clone();
    wrong.allowances_charges[0].amount = dec!(41);
    calculate(&mut wrong, None);
    assert!(validate(&wrong).has("PEPPOL-EN16931-R040"));

    let mut half = inv;
    half.allowances_charges[0].basis_amount = None;
    assert!(validate(&half).has("PEPPOL-EN16931-R041"));
}

#[test]
fn empty_breakdown_is_reported() {
    let mut inv = peppol_invoice().build();
    inv.trade_taxes.clear();
    let report = validate(&inv);
    assert!(report.has("PEPPOL-EN16931-R053"));
    assert!(report.has("BR-CO-18"));
}

#[test]
fn accounting_currency_total() {
    let mut inv = peppol_invoice().tax_currency("CHF").build();
    let report = validate(&inv);
    assert!(report.has("PEPPOL-EN16931-R054"));
    assert!(report.has("BR-53"));

    inv.totals.tax_total_accounting = Some(dec!(-76.50));
    let report = validate(&inv);
    assert!(!report.has("PEPPOL-EN16931-R054"));
    assert!(report.has("PEPPOL-EN16931-R055"));
}

#[test]
fn empty_optional_values() {
    let mut inv = peppol_invoice().build();
    inv.contract_reference = Some("  ".into());
    inv.lines[0].note = Some(String::new());
    let report = validate(&inv);
    let empty: Vec<_> = report
        .all()
        .iter()
        .filter(|v| v.rule == "PEPPOL-EN16931-R008")
        .collect();
    assert_eq!(empty.len(), 2);
}

#[test]
fn dutch_seller_rules() {
    let mut inv = peppol_invoice().build();
    inv.seller = PartyBuilder::new("Voorbeeld BV")
        .address(address("NL", "Keizersgracht 1", "Amsterdam", "1015 CJ"))
        .vat_id("NL123456789B01")
        .legal_id("12345678", Some(EasScheme::NL_KVK.code))
        .electronic_address("0106", "12345678")
        .build();
    let report = validate(&inv);
    assert!(report.rules().iter().all(|r| !r.starts_with("NL-R-")), "{report}");

    inv.seller.legal_organization = None;
    inv.payment_means[0].type_code = Some(PaymentMeansCode::Cash);
    let report = validate(&inv);
    assert!(report.has("NL-R-003"));
    assert!(report.has("NL-R-007"));
}

#[test]
fn norwegian_register_is_a_warning() {
    let mut inv = peppol_invoice().build();
    inv.seller.postal_address = Some(address("NO", "Karl Johans gate 1", "Oslo", "0154"));
    inv.seller.vat_id = Some("NO123456789MVA".into());
    let report = validate(&inv);
    assert!(report.has("NO-R-002"));
    assert!(report.is_valid(), "{report}");
}

#[test]
fn eas_and_gln_helpers() {
    assert!(is_eas_code("0088"));
    assert!(is_eas_code("EM"));
    assert!(!is_eas_code("XX"));
    assert!(is_valid_gln("4000001000005"));
    assert!(!is_valid_gln("4000001000006"));
    assert!(!is_valid_gln("40000010"));
}

//! PEPPOL BIS Billing 3.0 validation rules (PEPPOL-EN16931-Rxxx) and the
//! Dutch and Norwegian national rules.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::eas::{EasScheme, is_eas_code, is_valid_gln};
use crate::core::calculation::{line_total, round_half_up, sum};
use crate::core::*;

/// UNTDID 1001 subset accepted by PEPPOL (P0100).
static TYPE_CODES: &[u16] = &[
    71, 80, 81, 82, 83, 84, 102, 218, 219, 326, 331, 380, 381, 382, 383, 386, 388, 393, 395,
    396, 532, 553, 575, 623, 780, 817, 870, 875, 876, 877,
];

/// Payment means codes accepted for Dutch sellers (NL-R-007).
const NL_PAYMENT_CODES: &[u16] = &[30, 48, 49, 57, 58, 59];

/// Apply the PEPPOL rules, appending to `report`.
pub fn check(invoice: &Invoice, report: &mut Report) {
    let before = report.all().len();

    header(invoice, report);
    endpoints(invoice, report);
    empty_values(invoice, report);
    allowances_charges(invoice, report);
    lines(invoice, report);
    tax_totals(invoice, report);

    // R061: Mandate reference for direct debit
    let direct_debit = invoice
        .payment_means
        .iter()
        .any(|m| m.type_code.is_some_and(|c| c.is_direct_debit()));
    if direct_debit && !has_text(&invoice.direct_debit_mandate_id) {
        report.add("PEPPOL-EN16931-R061", "");
    }

    match invoice.seller.country_code() {
        Some("NL") => netherlands(invoice, report),
        Some("NO") => norway(invoice, report),
        _ => {}
    }

    tracing::debug!(violations = report.all().len() - before, "PEPPOL rules applied");
}

fn header(invoice: &Invoice, report: &mut Report) {
    // R001 / R007: Business process
    match invoice.business_process.as_deref().map(str::trim) {
        None | Some("") => report.add("PEPPOL-EN16931-R001", ""),
        Some(process) if !is_billing_process(process) => report.add(
            "PEPPOL-EN16931-R007",
            format!("business process '{process}' is not a PEPPOL billing process"),
        ),
        Some(_) => {}
    }

    // R002: At most one note, unless seller and buyer are both German
    let both_german =
        invoice.seller.country_code() == Some("DE") && invoice.buyer.country_code() == Some("DE");
    if invoice.notes.len() > 1 && !both_german {
        report.add(
            "PEPPOL-EN16931-R002",
            format!("{} notes on document level", invoice.notes.len()),
        );
    }

    // R003: Buyer reference or purchase order reference
    if !has_text(&invoice.buyer_reference) && !has_text(&invoice.buyer_order_reference) {
        report.add("PEPPOL-EN16931-R003", "");
    }

    // R004: Specification identifier
    if invoice.specification_id.trim() != super::PEPPOL_CUSTOMIZATION_ID {
        report.add(
            "PEPPOL-EN16931-R004",
            format!("specification identifier '{}'", invoice.specification_id),
        );
    }

    // R005: Tax currency differs from invoice currency
    if invoice
        .tax_currency
        .as_deref()
        .is_some_and(|c| c.trim() == invoice.currency.trim())
    {
        report.add("PEPPOL-EN16931-R005", "");
    }

    // R006: At most one invoiced object
    let invoiced_objects = invoice
        .supporting_documents
        .iter()
        .filter(|d| d.type_code.as_deref() == Some(INVOICED_OBJECT))
        .count();
    if invoiced_objects > 1 {
        report.add(
            "PEPPOL-EN16931-R006",
            format!("{invoiced_objects} invoiced object references"),
        );
    }

    // P0100: Type code
    if let Some(code) = invoice.type_code.map(|t| t.code()) {
        if TYPE_CODES.binary_search(&code).is_err() {
            report.add(
                "PEPPOL-EN16931-P0100",
                format!("invoice type code {code} is not allowed"),
            );
        }
    }
}

/// `urn:fdc:peppol.eu:2017:poacc:billing:NN:1.0`
fn is_billing_process(process: &str) -> bool {
    process
        .strip_prefix("urn:fdc:peppol.eu:2017:poacc:billing:")
        .and_then(|rest| rest.strip_suffix(":1.0"))
        .is_some_and(|nn| nn.len() == 2 && nn.bytes().all(|b| b.is_ascii_digit()))
}

fn endpoints(invoice: &Invoice, report: &mut Report) {
    // R020 / R010: Electronic addresses
    for (party, rule, role) in [
        (&invoice.seller, "PEPPOL-EN16931-R020", "seller"),
        (&invoice.buyer, "PEPPOL-EN16931-R010", "buyer"),
    ] {
        let Some(address) = party
            .electronic_address
            .as_ref()
            .filter(|ea| !ea.value.trim().is_empty())
        else {
            report.add(rule, "");
            continue;
        };

        // CL008: Scheme from the EAS list
        if !is_eas_code(&address.scheme) {
            report.add(
                "PEPPOL-EN16931-CL008",
                format!("{role} electronic address scheme '{}'", address.scheme),
            );
        }
        if address.scheme.trim() == EasScheme::GLN.code && !is_valid_gln(&address.value) {
            report.add(
                "PEPPOL-COMMON-R040",
                format!("{role} electronic address '{}' is not a valid GLN", address.value),
            );
        }
    }

    // COMMON-R040: GLN identifiers
    for (party, role) in [(&invoice.seller, "seller"), (&invoice.buyer, "buyer")] {
        for id in &party.global_ids {
            if id.scheme.as_deref() == Some(EasScheme::GLN.code) && !is_valid_gln(&id.value) {
                report.add(
                    "PEPPOL-COMMON-R040",
                    format!("{role} identifier '{}' is not a valid GLN", id.value),
                );
            }
        }
    }
}

/// Optional text that is present but blank would serialise as an empty
/// element.
fn empty_values(invoice: &Invoice, report: &mut Report) {
    let mut empty = Vec::new();
    let mut check_field = |name: &str, value: &Option<String>| {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            empty.push(name.to_string());
        }
    };

    check_field("tax currency", &invoice.tax_currency);
    check_field("buyer reference", &invoice.buyer_reference);
    check_field("purchase order reference", &invoice.buyer_order_reference);
    check_field("sales order reference", &invoice.seller_order_reference);
    check_field("contract reference", &invoice.contract_reference);
    check_field("receiving advice reference", &invoice.receiving_advice_reference);
    check_field("despatch advice reference", &invoice.despatch_advice_reference);
    check_field("buyer accounting reference", &invoice.buyer_accounting_reference);
    check_field("payment reference", &invoice.payment_reference);
    check_field("mandate reference", &invoice.direct_debit_mandate_id);
    check_field("creditor identifier", &invoice.creditor_reference_id);

    let parties = [
        ("seller", Some(&invoice.seller)),
        ("buyer", Some(&invoice.buyer)),
        ("payee", invoice.payee.as_ref()),
        ("tax representative", invoice.tax_representative.as_ref()),
        ("deliver-to", invoice.ship_to.as_ref()),
    ];
    for (role, party) in parties {
        let Some(party) = party else { continue };
        check_field(&format!("{role} VAT identifier"), &party.vat_id);
        check_field(&format!("{role} tax registration"), &party.tax_registration_id);
        check_field(&format!("{role} additional legal information"), &party.description);
        if let Some(address) = &party.postal_address {
            check_field(&format!("{role} address line 1"), &address.line1);
            check_field(&format!("{role} address line 2"), &address.line2);
            check_field(&format!("{role} address line 3"), &address.line3);
            check_field(&format!("{role} post code"), &address.postcode);
            check_field(&format!("{role} city"), &address.city);
            check_field(&format!("{role} country subdivision"), &address.subdivision);
        }
        for contact in &party.contacts {
            check_field(&format!("{role} contact name"), &contact.name);
            check_field(&format!("{role} contact telephone"), &contact.phone);
            check_field(&format!("{role} contact email"), &contact.email);
        }
    }

    for line in &invoice.lines {
        check_field(&format!("invoice line {} note", line.id), &line.note);
        check_field(&format!("invoice line {} description", line.id), &line.product.description);
        check_field(&format!("invoice line {} seller item id", line.id), &line.product.seller_assigned_id);
        check_field(&format!("invoice line {} buyer item id", line.id), &line.product.buyer_assigned_id);
        check_field(&format!("invoice line {} order line reference", line.id), &line.buyer_order_line_id);
    }

    for note in &invoice.notes {
        if note.content.trim().is_empty() {
            empty.push("note".to_string());
        }
    }

    for field in empty {
        report.add("PEPPOL-EN16931-R008", format!("empty value in {field}"));
    }
}

fn allowance_charge_amounts(ac: &AllowanceCharge, context: &str, report: &mut Report) {
    match (ac.basis_amount, ac.percent) {
        // R040: amount = base × percentage / 100
        (Some(basis), Some(percent)) => {
            let expected = round_half_up(basis.saturating_mul(percent) / dec!(100), 2);
            if ac.amount != expected {
                report.add(
                    "PEPPOL-EN16931-R040",
                    format!("{context}: amount {} should be {expected}", ac.amount),
                );
            }
        }
        // R041 / R042: Base and percentage go together
        (None, Some(_)) => report.add("PEPPOL-EN16931-R041", context.to_string()),
        (Some(_), None) => report.add("PEPPOL-EN16931-R042", context.to_string()),
        (None, None) => {}
    }
}

fn allowances_charges(invoice: &Invoice, report: &mut Report) {
    for (i, ac) in invoice.allowances_charges.iter().enumerate() {
        let what = if ac.is_charge { "charge" } else { "allowance" };
        allowance_charge_amounts(ac, &format!("document {what} {}", i + 1), report);
    }
    for line in &invoice.lines {
        for ac in &line.allowances_charges {
            let what = if ac.is_charge { "charge" } else { "allowance" };
            allowance_charge_amounts(ac, &format!("invoice line {} {what}", line.id), report);
        }
    }
}

fn lines(invoice: &Invoice, report: &mut Report) {
    let invoice_period = invoice.billing_period.as_ref();

    for line in &invoice.lines {
        let id = &line.id;

        // R044: No charges on price level
        if line.price_allowances_charges.iter().any(|ac| ac.is_charge) {
            report.add("PEPPOL-EN16931-R044", format!("invoice line {id}"));
        }

        // R046: Net price = gross price - price allowance
        if let Some(gross) = line.gross_price {
            let discount = sum(
                line.price_allowances_charges
                    .iter()
                    .filter(|ac| !ac.is_charge)
                    .map(|ac| ac.amount),
            );
            let expected = gross.saturating_sub(discount);
            if line.net_price != expected {
                report.add(
                    "PEPPOL-EN16931-R046",
                    format!("invoice line {id}: net price {} should be {expected}", line.net_price),
                );
            }
        }

        // R110 / R111: Line period inside the invoice period
        if let (Some(outer), Some(inner)) = (invoice_period, line.period.as_ref()) {
            if let (Some(start), Some(line_start)) = (outer.start, inner.start) {
                if line_start < start {
                    report.add(
                        "PEPPOL-EN16931-R110",
                        format!("invoice line {id}: period starts {line_start} before {start}"),
                    );
                }
            }
            if let (Some(end), Some(line_end)) = (outer.end, inner.end) {
                if line_end > end {
                    report.add(
                        "PEPPOL-EN16931-R111",
                        format!("invoice line {id}: period ends {line_end} after {end}"),
                    );
                }
            }
        }

        // R120: Line net amount formula
        let expected = line_total(line);
        if line.line_total != expected {
            report.add(
                "PEPPOL-EN16931-R120",
                format!("invoice line {id}: net amount {} should be {expected}", line.line_total),
            );
        }

        // R121: Base quantity
        if line.basis_quantity.is_some_and(|q| q <= Decimal::ZERO) {
            report.add("PEPPOL-EN16931-R121", format!("invoice line {id}"));
        }
    }
}

fn tax_totals(invoice: &Invoice, report: &mut Report) {
    // R053: One tax total with subtotals
    if invoice.trade_taxes.is_empty() {
        report.add("PEPPOL-EN16931-R053", "");
    }

    // R054: Tax total in accounting currency iff a tax currency is given
    let tax_currency = has_text(&invoice.tax_currency);
    let accounting = invoice.totals.tax_total_accounting;
    if tax_currency != accounting.is_some() {
        report.add("PEPPOL-EN16931-R054", "");
    }

    // R055: Same sign in both currencies
    if let (Some(total), Some(accounting)) = (invoice.totals.tax_total, accounting) {
        let opposite = (total > Decimal::ZERO && accounting < Decimal::ZERO)
            || (total < Decimal::ZERO && accounting > Decimal::ZERO);
        if opposite {
            report.add(
                "PEPPOL-EN16931-R055",
                format!("tax total {total} and {accounting} in accounting currency"),
            );
        }
    }
}

fn street_city_postcode(address: Option<&PostalAddress>) -> bool {
    address.is_some_and(|a| has_text(&a.line1) && has_text(&a.city) && has_text(&a.postcode))
}

fn netherlands(invoice: &Invoice, report: &mut Report) {
    // NL-R-001: Credit notes refer to the invoice they correct
    if invoice.is_credit_note() && invoice.preceding_invoices.is_empty() {
        report.add("NL-R-001", "");
    }

    // NL-R-002: Seller address
    if !street_city_postcode(invoice.seller.postal_address.as_ref()) {
        report.add("NL-R-002", "");
    }

    // NL-R-003: KVK or OIN
    let registered = invoice.seller.legal_organization.as_ref().is_some_and(|org| {
        has_text(&org.id)
            && org
                .scheme
                .as_deref()
                .is_some_and(|s| s == EasScheme::NL_KVK.code || s == EasScheme::NL_OIN.code)
    });
    if !registered {
        report.add("NL-R-003", "");
    }

    // NL-R-004: Dutch buyer address
    if invoice.buyer.country_code() == Some("NL")
        && !street_city_postcode(invoice.buyer.postal_address.as_ref())
    {
        report.add("NL-R-004", "");
    }

    // NL-R-007: Payment means code
    for means in &invoice.payment_means {
        if let Some(code) = means.type_code.map(|c| c.code()) {
            if !NL_PAYMENT_CODES.contains(&code) {
                report.add("NL-R-007", format!("payment means code {code}"));
            }
        }
    }
}

fn norway(invoice: &Invoice, report: &mut Report) {
    // NO-R-002: "Foretaksregisteret" in the legal information
    let registered = invoice
        .seller
        .description
        .as_deref()
        .is_some_and(|d| d.to_lowercase().contains("foretaksregisteret"));
    if !registered {
        report.add("NO-R-002", "");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn valid_peppol_invoice() -> Invoice {
        InvoiceBuilder::new("PEPPOL-001", date(2024, 6, 15))
            .profile(Profile::Peppol)
            .buyer_reference("BR-123")
            .seller(
                PartyBuilder::new("Seller GmbH")
                    .address(
                        AddressBuilder::new("DE")
                            .street("Hauptstr. 1")
                            .city("Berlin")
                            .postcode("10115")
                            .build(),
                    )
                    .vat_id("DE123456789")
                    .electronic_address("EM", "seller@example.com")
                    .build(),
            )
            .buyer(
                PartyBuilder::new("Buyer AG")
                    .address(
                        AddressBuilder::new("DE")
                            .street("Marienplatz 1")
                            .city("München")
                            .postcode("80331")
                            .build(),
                    )
                    .electronic_address("0088", "4000001000005")
                    .build(),
            )
            .add_line(
                LineBuilder::new("1", "Consulting", dec!(10), "HUR", dec!(100))
                    .tax(TaxCategory::StandardRate, dec!(19))
                    .build(),
            )
            .payment_means(PaymentMeans::sepa_credit_transfer("DE89370400440532013000"))
            .payment_terms("30 days net")
            .build()
    }

    fn run(inv: &Invoice) -> Report {
        let mut report = Report::new();
        check(inv, &mut report);
        report
    }

    #[test]
    fn valid_invoice_passes() {
        let inv = valid_peppol_invoice();
        assert!(run(&inv).is_empty(), "{}", run(&inv));
        assert!(validate(&inv).is_valid(), "{}", validate(&inv));
    }

    #[test]
    fn missing_buyer_reference_and_order_ref() {
        let mut inv = valid_peppol_invoice();
        inv.buyer_reference = None;
        assert!(run(&inv).has("PEPPOL-EN16931-R003"));
        inv.buyer_order_reference = Some("PO-123".into());
        assert!(!run(&inv).has("PEPPOL-EN16931-R003"));
    }

    #[test]
    fn missing_endpoints() {
        let mut inv = valid_peppol_invoice();
        inv.seller.electronic_address = None;
        inv.buyer.electronic_address = None;
        let report = run(&inv);
        assert!(report.has("PEPPOL-EN16931-R020"));
        assert!(report.has("PEPPOL-EN16931-R010"));
    }

    #[test]
    fn bad_gln_and_scheme() {
        let mut inv = valid_peppol_invoice();
        inv.buyer.electronic_address = Some(ElectronicAddress {
            scheme: "0088".into(),
            value: "4000001000006".into(),
        });
        inv.seller.electronic_address = Some(ElectronicAddress {
            scheme: "XX".into(),
            value: "seller".into(),
        });
        let report = run(&inv);
        assert!(report.has("PEPPOL-COMMON-R040"));
        assert!(report.has("PEPPOL-EN16931-CL008"));
    }

    #[test]
    fn business_process_format() {
        let mut inv = valid_peppol_invoice();
        inv.business_process = Some("urn:fdc:peppol.eu:2017:poacc:billing:1:1.0".into());
        assert!(run(&inv).has("PEPPOL-EN16931-R007"));
        inv.business_process = None;
        assert!(run(&inv).has("PEPPOL-EN16931-R001"));
    }

    #[test]
    fn notes_limited_unless_both_german() {
        let mut inv = valid_peppol_invoice();
        inv.notes = vec![Note::new("one"), Note::new("two")];
        assert!(!run(&inv).has("PEPPOL-EN16931-R002"));
        if let Some(address) = inv.buyer.postal_address.as_mut() {
            address.country_code = "FR".into();
        }
        assert!(run(&inv).has("PEPPOL-EN16931-R002"));
    }

    #[test]
    fn empty_optional_values() {
        let mut inv = valid_peppol_invoice();
        inv.payment_reference = Some(String::new());
        inv.lines[0].note = Some(" ".into());
        let report = run(&inv);
        let empties = report
            .all()
            .iter()
            .filter(|v| v.rule == "PEPPOL-EN16931-R008")
            .count();
        assert_eq!(empties, 2);
    }

    #[test]
    fn percentage_allowance_must_add_up() {
        let mut inv = valid_peppol_invoice();
        inv.allowances_charges.push(
            AllowanceChargeBuilder::allowance(dec!(10))
                .reason("Discount")
                .tax(TaxCategory::StandardRate, dec!(19))
                .percentage(dec!(1000), dec!(2))
                .build(),
        );
        inv.allowances_charges.push(AllowanceCharge {
            percent: Some(dec!(5)),
            ..Default::default()
        });
        let report = run(&inv);
        assert!(report.has("PEPPOL-EN16931-R040"));
        assert!(report.has("PEPPOL-EN16931-R041"));
    }

    #[test]
    fn price_charge_not_allowed() {
        let mut inv = valid_peppol_invoice();
        inv.lines[0].gross_price = Some(dec!(110));
        inv.lines[0].price_allowances_charges.push(AllowanceCharge {
            is_charge: true,
            amount: dec!(10),
            ..Default::default()
        });
        let report = run(&inv);
        assert!(report.has("PEPPOL-EN16931-R044"));
        assert!(report.has("PEPPOL-EN16931-R046"));
    }

    #[test]
    fn line_period_outside_invoice_period() {
        let mut inv = valid_peppol_invoice();
        inv.billing_period = Some(Period {
            start: Some(date(2024, 6, 1)),
            end: Some(date(2024, 6, 30)),
        });
        inv.lines[0].period = Some(Period {
            start: Some(date(2024, 5, 31)),
            end: Some(date(2024, 7, 1)),
        });
        let report = run(&inv);
        assert!(report.has("PEPPOL-EN16931-R110"));
        assert!(report.has("PEPPOL-EN16931-R111"));
    }

    #[test]
    fn tax_currency_needs_accounting_total() {
        let mut inv = valid_peppol_invoice();
        inv.tax_currency = Some("EUR".into());
        let report = run(&inv);
        assert!(report.has("PEPPOL-EN16931-R005"));
        assert!(report.has("PEPPOL-EN16931-R054"));

        inv.tax_currency = Some("SEK".into());
        inv.totals.tax_total_accounting = Some(dec!(-2000));
        let report = run(&inv);
        assert!(!report.has("PEPPOL-EN16931-R054"));
        assert!(report.has("PEPPOL-EN16931-R055"));
    }

    #[test]
    fn direct_debit_needs_mandate() {
        let mut inv = valid_peppol_invoice();
        inv.payment_means = vec![PaymentMeans::sepa_direct_debit("DE89370400440532013000")];
        assert!(run(&inv).has("PEPPOL-EN16931-R061"));
    }

    #[test]
    fn unsupported_type_code() {
        let mut inv = valid_peppol_invoice();
        inv.type_code = Some(InvoiceTypeCode::SelfBilled);
        assert!(run(&inv).has("PEPPOL-EN16931-P0100"));
    }

    #[test]
    fn dutch_seller_rules() {
        let mut inv = valid_peppol_invoice();
        inv.type_code = Some(InvoiceTypeCode::CreditNote);
        inv.seller.postal_address = Some(AddressBuilder::new("NL").city("Utrecht").build());
        inv.buyer.postal_address = Some(AddressBuilder::new("NL").build());
        inv.payment_means = vec![PaymentMeans {
            type_code: Some(PaymentMeansCode::Cash),
            ..Default::default()
        }];
        let report = run(&inv);
        for rule in ["NL-R-001", "NL-R-002", "NL-R-003", "NL-R-004", "NL-R-007"] {
            assert!(report.has(rule), "missing {rule}");
        }
    }

    #[test]
    fn norwegian_register_is_a_warning() {
        let mut inv = valid_peppol_invoice();
        inv.seller.postal_address = Some(AddressBuilder::new("NO").build());
        let report = run(&inv);
        assert!(report.warnings().iter().any(|v| v.rule == "NO-R-002"));
        assert!(report.violations().iter().all(|v| v.rule != "NO-R-002"));
    }
}

use std::collections::HashSet;

use crate::core::*;

/// Type codes XRechnung accepts (BR-DE-17).
const TYPE_CODES: &[u16] = &[326, 380, 381, 384, 389, 875, 876, 877];

/// Categories that need a seller tax identifier (BR-DE-16).
const TAXABLE: &[TaxCategory] = &[
    TaxCategory::StandardRate,
    TaxCategory::ZeroRated,
    TaxCategory::Exempt,
    TaxCategory::ReverseCharge,
    TaxCategory::IntraCommunitySupply,
    TaxCategory::Export,
    TaxCategory::CanaryIslands,
    TaxCategory::CeutaMelilla,
];

/// Apply the XRechnung rules (BR-DE-*), appending to `report`.
pub fn check(invoice: &Invoice, report: &mut Report) {
    let before = report.all().len();

    parties(invoice, report);
    document(invoice, report);
    tax(invoice, report);
    payment(invoice, report);

    tracing::debug!(violations = report.all().len() - before, "XRechnung rules applied");
}

fn parties(invoice: &Invoice, report: &mut Report) {
    let seller_address = invoice.seller.postal_address.as_ref();

    // BR-DE-3 / BR-DE-4: Seller city and post code
    if !seller_address.is_some_and(|a| has_text(&a.city)) {
        report.add("BR-DE-3", "");
    }
    if !seller_address.is_some_and(|a| has_text(&a.postcode)) {
        report.add("BR-DE-4", "");
    }

    // BR-DE-2, BR-DE-5 to BR-DE-7: Seller contact
    match invoice.seller.contacts.first() {
        None => report.add("BR-DE-2", ""),
        Some(contact) => {
            if !has_text(&contact.name) && !has_text(&contact.department) {
                report.add("BR-DE-5", "");
            }
            match contact.phone.as_deref().filter(|p| !p.trim().is_empty()) {
                None => report.add("BR-DE-6", ""),
                // BR-DE-27
                Some(phone) if phone.chars().filter(char::is_ascii_digit).count() < 3 => {
                    report.add("BR-DE-27", format!("telephone number '{phone}'"));
                }
                Some(_) => {}
            }
            match contact.email.as_deref().filter(|e| !e.trim().is_empty()) {
                None => report.add("BR-DE-7", ""),
                // BR-DE-28
                Some(email) if !is_valid_email(email) => {
                    report.add("BR-DE-28", format!("email address '{email}'"));
                }
                Some(_) => {}
            }
        }
    }

    // BR-DE-8 / BR-DE-9: Buyer city and post code
    let buyer_address = invoice.buyer.postal_address.as_ref();
    if !buyer_address.is_some_and(|a| has_text(&a.city)) {
        report.add("BR-DE-8", "");
    }
    if !buyer_address.is_some_and(|a| has_text(&a.postcode)) {
        report.add("BR-DE-9", "");
    }

    // BR-DE-10 / BR-DE-11: Deliver-to city and post code
    if let Some(address) = invoice.ship_to.as_ref().and_then(|p| p.postal_address.as_ref()) {
        if !has_text(&address.city) {
            report.add("BR-DE-10", "");
        }
        if !has_text(&address.postcode) {
            report.add("BR-DE-11", "");
        }
    }
}

fn document(invoice: &Invoice, report: &mut Report) {
    // BR-DE-15: Buyer reference (Leitweg-ID)
    if !has_text(&invoice.buyer_reference) {
        report.add("BR-DE-15", "");
    }

    // BR-DE-17: Type code
    if let Some(code) = invoice.type_code.map(|t| t.code()) {
        if !TYPE_CODES.contains(&code) {
            report.add("BR-DE-17", format!("invoice type code {code}"));
        }
    }

    // BR-DE-21: Specification identifier
    if !invoice.profile().is_xrechnung() {
        report.add(
            "BR-DE-21",
            format!("specification identifier '{}'", invoice.specification_id),
        );
    }

    // BR-DE-22: Unique attachment filenames
    let mut seen = HashSet::new();
    for doc in &invoice.supporting_documents {
        if let Some(attachment) = &doc.attachment {
            if !seen.insert(attachment.filename.as_str()) {
                report.add(
                    "BR-DE-22",
                    format!("filename '{}' is used more than once", attachment.filename),
                );
            }
        }
    }

    // BR-DE-26: Corrected invoice references its predecessor
    if invoice.type_code == Some(InvoiceTypeCode::Corrected) && invoice.preceding_invoices.is_empty() {
        report.add("BR-DE-26", "");
    }
}

fn tax(invoice: &Invoice, report: &mut Report) {
    // BR-DE-14: Rate in every breakdown entry that can carry one
    for tt in &invoice.trade_taxes {
        if tt.rate.is_none() && tt.category != Some(TaxCategory::NotSubjectToVat) {
            let code = tt.category.map(|c| c.code()).unwrap_or("?");
            report.add("BR-DE-14", format!("VAT breakdown {code} has no rate"));
        }
    }

    // BR-DE-16: Seller tax identifier for taxable categories
    let taxable = |category: Option<TaxCategory>| category.is_some_and(|c| TAXABLE.contains(&c));
    let uses_taxable = invoice.lines.iter().any(|l| taxable(l.tax_category))
        || invoice.allowances_charges.iter().any(|ac| taxable(ac.tax_category))
        || invoice.trade_taxes.iter().any(|tt| taxable(tt.category));
    if uses_taxable && !invoice.seller_has_tax_id() {
        report.add("BR-DE-16", "");
    }
}

fn payment(invoice: &Invoice, report: &mut Report) {
    // BR-DE-1: Payment instructions
    if invoice.payment_means.is_empty() {
        report.add("BR-DE-1", "");
    }

    // BR-DE-18: Cash discount syntax
    for terms in &invoice.payment_terms {
        let Some(description) = terms.description.as_deref() else {
            continue;
        };
        for line in description.lines().map(str::trim) {
            if line.starts_with('#') && !is_skonto_line(line) {
                report.add("BR-DE-18", format!("malformed payment terms line '{line}'"));
            }
        }
    }

    for means in &invoice.payment_means {
        let Some(code) = means.type_code else {
            continue;
        };
        let transfer = means.payee_account.is_some();
        let card = means.card.is_some();
        let debit = means.payer_iban.is_some();

        // BR-DE-23: Credit transfer
        if code.is_credit_transfer() {
            if !transfer {
                report.add("BR-DE-23-a", "");
            }
            if card || debit {
                report.add("BR-DE-23-b", "");
            }
        }

        // BR-DE-24: Payment card
        if code.is_card() {
            if !card {
                report.add("BR-DE-24-a", "");
            }
            if transfer || debit {
                report.add("BR-DE-24-b", "");
            }
        }

        // BR-DE-25: Direct debit
        if code == PaymentMeansCode::SepaDirectDebit {
            if !debit && !has_text(&invoice.direct_debit_mandate_id) {
                report.add("BR-DE-25-a", "");
            }
            if transfer || card {
                report.add("BR-DE-25-b", "");
            }
        }

        // BR-DE-19: IBAN for SEPA credit transfer
        if code == PaymentMeansCode::SepaCreditTransfer {
            if let Some(iban) = means.payee_account.as_ref().and_then(|a| a.iban.as_deref()) {
                if !is_valid_iban(iban) {
                    report.add("BR-DE-19", format!("'{iban}' is not an IBAN"));
                }
            }
        }

        if code.is_direct_debit() {
            // BR-DE-30 / BR-DE-31
            if !has_text(&invoice.creditor_reference_id) {
                report.add("BR-DE-30", "");
            }
            match means.payer_iban.as_deref().filter(|i| !i.trim().is_empty()) {
                None => report.add("BR-DE-31", ""),
                // BR-DE-20
                Some(iban) if code == PaymentMeansCode::SepaDirectDebit && !is_valid_iban(iban) => {
                    report.add("BR-DE-20", format!("'{iban}' is not an IBAN"));
                }
                Some(_) => {}
            }
        }
    }
}

/// Structural IBAN check: two letters, two digits, then 11 to 30
/// alphanumerics. The checksum is not verified.
pub fn is_valid_iban(iban: &str) -> bool {
    let compact: String = iban
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    let bytes = compact.as_bytes();
    (15..=34).contains(&bytes.len())
        && bytes[..2].iter().all(u8::is_ascii_uppercase)
        && bytes[2..4].iter().all(u8::is_ascii_digit)
        && bytes[4..].iter().all(u8::is_ascii_alphanumeric)
}

/// Email shape check: one `@`, at least two characters on either side,
/// no dot at either end or next to the `@`, no whitespace next to the `@`.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if domain.contains('@') {
        return false;
    }
    let bad_edge = |c: Option<char>| c.is_none_or(|c| c == '.' || c.is_whitespace());
    local.chars().count() >= 2
        && domain.chars().count() >= 2
        && !email.starts_with('.')
        && !email.ends_with('.')
        && !bad_edge(local.chars().last())
        && !bad_edge(domain.chars().next())
}

/// `#SKONTO#TAGE=14#PROZENT=2.00#` with an optional `BASISBETRAG=100.00#`.
fn is_skonto_line(line: &str) -> bool {
    let Some(body) = line.strip_prefix('#').and_then(|l| l.strip_suffix('#')) else {
        return false;
    };
    let parts: Vec<&str> = body.split('#').collect();
    if !(3..=4).contains(&parts.len()) {
        return false;
    }
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    let amount = |s: &str| {
        s.split_once('.')
            .is_some_and(|(int, frac)| digits(int) && frac.len() == 2 && digits(frac))
    };

    matches!(parts[0], "SKONTO" | "VERZUG")
        && parts[1].strip_prefix("TAGE=").is_some_and(digits)
        && parts[2].strip_prefix("PROZENT=").is_some_and(amount)
        && parts.get(3).is_none_or(|p| {
            p.strip_prefix("BASISBETRAG=")
                .is_some_and(|v| amount(v.strip_prefix('-').unwrap_or(v)))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn address(street: &str, city: &str, postcode: &str) -> PostalAddress {
        AddressBuilder::new("DE")
            .street(street)
            .city(city)
            .postcode(postcode)
            .build()
    }

    fn valid_xrechnung_invoice() -> Invoice {
        InvoiceBuilder::new("XR-001", date(2024, 6, 15))
            .profile(Profile::XRechnung)
            .buyer_reference("04011000-12345-03")
            .seller(
                PartyBuilder::new("Seller GmbH")
                    .address(address("Hauptstr. 1", "Berlin", "10115"))
                    .vat_id("DE123456789")
                    .contact(
                        Contact::new("Max Mustermann")
                            .phone("+49 30 12345")
                            .email("max@seller.de"),
                    )
                    .electronic_address("EM", "invoice@seller.de")
                    .build(),
            )
            .buyer(
                PartyBuilder::new("Stadt Musterstadt")
                    .address(address("Rathausplatz 1", "Musterstadt", "12345"))
                    .electronic_address("0204", "04011000-12345-03")
                    .build(),
            )
            .add_line(
                LineBuilder::new("1", "Beratung", dec!(8), "HUR", dec!(120))
                    .tax(TaxCategory::StandardRate, dec!(19))
                    .build(),
            )
            .payment_means(PaymentMeans::sepa_credit_transfer("DE89 3704 0044 0532 0130 00"))
            .payment_terms("#SKONTO#TAGE=14#PROZENT=2.00#\nZahlbar innerhalb 30 Tagen")
            .build()
    }

    fn run(inv: &Invoice) -> Report {
        let mut report = Report::new();
        check(inv, &mut report);
        report
    }

    #[test]
    fn valid_invoice_passes() {
        let inv = valid_xrechnung_invoice();
        assert!(run(&inv).is_empty(), "{}", run(&inv));
        assert!(validate(&inv).is_valid(), "{}", validate(&inv));
    }

    #[test]
    fn missing_seller_contact() {
        let mut inv = valid_xrechnung_invoice();
        inv.seller.contacts.clear();
        assert!(run(&inv).has("BR-DE-2"));
    }

    #[test]
    fn contact_details_required() {
        let mut inv = valid_xrechnung_invoice();
        inv.seller.contacts = vec![Contact::default()];
        let report = run(&inv);
        for rule in ["BR-DE-5", "BR-DE-6", "BR-DE-7"] {
            assert!(report.has(rule), "missing {rule}");
        }
    }

    #[test]
    fn short_phone_and_bad_email_are_warnings() {
        let mut inv = valid_xrechnung_invoice();
        inv.seller.contacts = vec![Contact::new("Max").phone("12").email("max@.de")];
        let report = run(&inv);
        assert!(report.has("BR-DE-27"));
        assert!(report.has("BR-DE-28"));
        assert!(report.is_valid());
    }

    #[test]
    fn leitweg_id_required() {
        let mut inv = valid_xrechnung_invoice();
        inv.buyer_reference = None;
        assert!(run(&inv).has("BR-DE-15"));
    }

    #[test]
    fn buyer_and_delivery_addresses() {
        let mut inv = valid_xrechnung_invoice();
        inv.buyer.postal_address = Some(AddressBuilder::new("DE").build());
        inv.ship_to = Some(PartyBuilder::new("Lager").address(AddressBuilder::new("DE").build()).build());
        let report = run(&inv);
        for rule in ["BR-DE-8", "BR-DE-9", "BR-DE-10", "BR-DE-11"] {
            assert!(report.has(rule), "missing {rule}");
        }
    }

    #[test]
    fn type_code_restricted() {
        let mut inv = valid_xrechnung_invoice();
        inv.type_code = Some(InvoiceTypeCode::Prepayment);
        assert!(run(&inv).has("BR-DE-17"));
    }

    #[test]
    fn seller_needs_tax_id() {
        let mut inv = valid_xrechnung_invoice();
        inv.seller.vat_id = None;
        assert!(run(&inv).has("BR-DE-16"));
        inv.seller.tax_registration_id = Some("201/113/40209".into());
        assert!(!run(&inv).has("BR-DE-16"));
    }

    #[test]
    fn skonto_lines() {
        assert!(is_skonto_line("#SKONTO#TAGE=14#PROZENT=2.00#"));
        assert!(is_skonto_line("#SKONTO#TAGE=7#PROZENT=3.00#BASISBETRAG=-100.00#"));
        assert!(is_skonto_line("#VERZUG#TAGE=30#PROZENT=5.00#"));
        assert!(!is_skonto_line("#SKONTO#TAGE=14#PROZENT=2#"));
        assert!(!is_skonto_line("#SKONTO#TAGE=14#PROZENT=2.00"));
        assert!(!is_skonto_line("#RABATT#TAGE=14#PROZENT=2.00#"));

        let mut inv = valid_xrechnung_invoice();
        inv.payment_terms[0].description = Some("#SKONTO#TAGE=vierzehn#PROZENT=2.00#".into());
        assert!(run(&inv).has("BR-DE-18"));
    }

    #[test]
    fn iban_structure() {
        assert!(is_valid_iban("DE89370400440532013000"));
        assert!(is_valid_iban("de89 3704 0044 0532 0130 00"));
        assert!(!is_valid_iban("DE8937040044"));
        assert!(!is_valid_iban("1289370400440532013000"));
        assert!(!is_valid_iban("DEXX370400440532013000"));
        assert!(!is_valid_iban("DE89-3704-0044-0532-0130-00"));
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("max@seller.de"));
        assert!(!is_valid_email("max.seller.de"));
        assert!(!is_valid_email("m@seller.de"));
        assert!(!is_valid_email("max@@seller.de"));
        assert!(!is_valid_email("max.@seller.de"));
        assert!(!is_valid_email("max@seller.de."));
        assert!(!is_valid_email(".max@seller.de"));
        assert!(!is_valid_email("max @seller.de"));
    }

    #[test]
    fn sepa_credit_transfer_with_bad_iban_is_a_warning() {
        let mut inv = valid_xrechnung_invoice();
        inv.payment_means = vec![PaymentMeans::sepa_credit_transfer("not an iban")];
        let report = run(&inv);
        assert!(report.has("BR-DE-19"));
        assert!(report.is_valid());
    }

    #[test]
    fn payment_groups_are_exclusive() {
        let mut inv = valid_xrechnung_invoice();
        let mut means = PaymentMeans::sepa_credit_transfer("DE89370400440532013000");
        means.card = Some(FinancialCard {
            id: "1234".into(),
            cardholder: None,
        });
        inv.payment_means = vec![
            means,
            PaymentMeans {
                type_code: Some(PaymentMeansCode::CreditCard),
                ..Default::default()
            },
        ];
        let report = run(&inv);
        assert!(report.has("BR-DE-23-b"));
        assert!(report.has("BR-DE-24-a"));
    }

    #[test]
    fn direct_debit_needs_creditor_and_account() {
        let mut inv = valid_xrechnung_invoice();
        inv.payment_means = vec![PaymentMeans {
            type_code: Some(PaymentMeansCode::SepaDirectDebit),
            ..Default::default()
        }];
        let report = run(&inv);
        for rule in ["BR-DE-25-a", "BR-DE-30", "BR-DE-31"] {
            assert!(report.has(rule), "missing {rule}");
        }

        inv.direct_debit_mandate_id = Some("MANDATE-1".into());
        inv.creditor_reference_id = Some("DE98ZZZ09999999999".into());
        inv.payment_means = vec![PaymentMeans::sepa_direct_debit("DE89370400440532013000")];
        assert!(run(&inv).is_empty());
    }

    #[test]
    fn corrected_invoice_should_reference_predecessor() {
        let mut inv = valid_xrechnung_invoice();
        inv.type_code = Some(InvoiceTypeCode::Corrected);
        let report = run(&inv);
        assert!(report.has("BR-DE-26"));
        assert!(report.is_valid());
    }

    #[test]
    fn duplicate_attachment_names() {
        let mut inv = valid_xrechnung_invoice();
        let doc = SupportingDocument {
            id: "A1".into(),
            attachment: Some(BinaryObject {
                mime_code: "application/pdf".into(),
                filename: "timesheet.pdf".into(),
                content: vec![1, 2, 3],
            }),
            ..Default::default()
        };
        inv.supporting_documents = vec![doc.clone(), SupportingDocument { id: "A2".into(), ..doc }];
        assert!(run(&inv).has("BR-DE-22"));
    }

    #[test]
    fn forced_on_plain_en16931_warns_about_specification() {
        let mut inv = valid_xrechnung_invoice();
        inv.specification_id = EN16931_URN.into();
        let report = run(&inv);
        assert!(report.has("BR-DE-21"));
        assert!(report.is_valid());
    }
}

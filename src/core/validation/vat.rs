//! VAT category rules (BR-S, BR-AE, BR-E, BR-Z, BR-G, BR-IC, BR-IG,
//! BR-IP, BR-O).
//!
//! The nine families share one shape, so each category is described by a
//! [`CategoryRules`] row and checked by the same code.

use rust_decimal::Decimal;

use super::super::calculation::tax_amount;
use super::super::profile::level;
use super::super::report::Report;
use super::super::types::*;
use super::structure::expected_basis;

/// How many breakdown entries a used category needs (rule -1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    ExactlyOne,
    AtLeastOne,
}

/// Seller-side identifier requirement (rules -2 to -4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SellerId {
    /// Seller VAT id, tax registration or tax representative VAT id.
    TaxId,
    /// As [`SellerId::TaxId`], or any buyer identifier.
    TaxIdOrBuyer,
}

/// Buyer-side identifier requirement (rules -2 to -4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BuyerId {
    Any,
    VatOrLegal,
    Vat,
    NoVat,
}

/// Rate constraint on items using the category (rules -5 to -7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RateRule {
    Positive,
    Zero,
    NonNegative,
    Absent,
}

/// Expected tax amount of a breakdown entry (rule -9).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TaxRule {
    Proportional,
    Zero,
}

/// Exemption reason on a breakdown entry (rule -10).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exemption {
    Required,
    Forbidden,
}

#[derive(Debug, Clone, Copy)]
struct CategoryRules {
    category: TaxCategory,
    prefix: &'static str,
    presence: Presence,
    seller: SellerId,
    buyer: BuyerId,
    rate: RateRule,
    tax: TaxRule,
    exemption: Exemption,
}

const fn row(
    category: TaxCategory,
    prefix: &'static str,
    presence: Presence,
    seller: SellerId,
    buyer: BuyerId,
    rate: RateRule,
    tax: TaxRule,
    exemption: Exemption,
) -> CategoryRules {
    CategoryRules {
        category,
        prefix,
        presence,
        seller,
        buyer,
        rate,
        tax,
        exemption,
    }
}

use super::super::types::TaxCategory as C;
use BuyerId as B;
use Exemption as X;
use Presence as P;
use RateRule as R;
use SellerId as S;
use TaxRule as T;

static CATEGORY_RULES: [CategoryRules; 9] = [
    row(C::StandardRate, "S", P::AtLeastOne, S::TaxId, B::Any, R::Positive, T::Proportional, X::Forbidden),
    row(C::ReverseCharge, "AE", P::ExactlyOne, S::TaxId, B::VatOrLegal, R::Zero, T::Zero, X::Required),
    row(C::Exempt, "E", P::ExactlyOne, S::TaxId, B::Any, R::Zero, T::Zero, X::Required),
    row(C::ZeroRated, "Z", P::ExactlyOne, S::TaxId, B::Any, R::Zero, T::Zero, X::Forbidden),
    row(C::Export, "G", P::ExactlyOne, S::TaxId, B::Any, R::Zero, T::Zero, X::Required),
    row(C::IntraCommunitySupply, "IC", P::ExactlyOne, S::TaxId, B::Vat, R::Zero, T::Zero, X::Required),
    row(C::CanaryIslands, "IG", P::AtLeastOne, S::TaxId, B::NoVat, R::NonNegative, T::Proportional, X::Forbidden),
    row(C::CeutaMelilla, "IP", P::AtLeastOne, S::TaxId, B::NoVat, R::NonNegative, T::Proportional, X::Forbidden),
    row(C::NotSubjectToVat, "O", P::ExactlyOne, S::TaxIdOrBuyer, B::Any, R::Absent, T::Zero, X::Required),
];

impl CategoryRules {
    fn rule(&self, n: u8) -> String {
        format!("BR-{}-{n}", self.prefix)
    }

    fn parties_ok(&self, invoice: &Invoice) -> bool {
        let buyer = &invoice.buyer;
        let buyer_vat = has_text(&buyer.vat_id);
        let seller_ok = match self.seller {
            SellerId::TaxId => invoice.seller_has_tax_id(),
            SellerId::TaxIdOrBuyer => {
                invoice.seller_has_tax_id() || buyer_vat || buyer.legal_id().is_some()
            }
        };
        let buyer_ok = match self.buyer {
            BuyerId::Any => true,
            BuyerId::VatOrLegal => buyer_vat || buyer.legal_id().is_some(),
            BuyerId::Vat => buyer_vat,
            BuyerId::NoVat => !buyer_vat,
        };
        seller_ok && buyer_ok
    }

    fn rate_ok(&self, rate: Option<Decimal>) -> bool {
        match self.rate {
            RateRule::Positive => rate.is_some_and(|r| r > Decimal::ZERO),
            RateRule::Zero => rate.is_some_and(|r| r.is_zero()),
            RateRule::NonNegative => rate.is_some_and(|r| r >= Decimal::ZERO),
            RateRule::Absent => rate.is_none(),
        }
    }
}

fn rate_text(rate: Option<Decimal>) -> String {
    rate.map(|r| r.normalize().to_string())
        .unwrap_or_else(|| "none".into())
}

pub(super) fn check(invoice: &Invoice, level: u8, report: &mut Report) {
    if level < level::BASIC_WL {
        return;
    }
    let lines: &[InvoiceLine] = if level >= level::BASIC {
        &invoice.lines
    } else {
        &[]
    };

    for rules in &CATEGORY_RULES {
        check_category(invoice, lines, level, rules, report);
    }
    intra_community(invoice, lines, report);
    not_subject(invoice, lines, report);
}

fn check_category(
    invoice: &Invoice,
    lines: &[InvoiceLine],
    level: u8,
    rules: &CategoryRules,
    report: &mut Report,
) {
    let category = Some(rules.category);
    let code = rules.category.code();

    let used_lines: Vec<&InvoiceLine> = lines.iter().filter(|l| l.tax_category == category).collect();
    let used_allowances: Vec<&AllowanceCharge> = invoice
        .allowances()
        .filter(|a| a.tax_category == category)
        .collect();
    let used_charges: Vec<&AllowanceCharge> = invoice
        .charges()
        .filter(|c| c.tax_category == category)
        .collect();
    let entries: Vec<&TradeTax> = invoice
        .trade_taxes
        .iter()
        .filter(|tt| tt.category == category)
        .collect();

    let used = !used_lines.is_empty() || !used_allowances.is_empty() || !used_charges.is_empty();

    // -1: Breakdown presence
    if used {
        let missing = match rules.presence {
            Presence::ExactlyOne => entries.len() != 1,
            Presence::AtLeastOne => entries.is_empty(),
        };
        if missing {
            report.add(
                &rules.rule(1),
                format!("category {code} is used but the VAT breakdown has {} entries for it", entries.len()),
            );
        }
    }

    // -2 to -4: Party identifiers, reported once per item kind
    if used && !rules.parties_ok(invoice) {
        if !used_lines.is_empty() {
            report.add(&rules.rule(2), "");
        }
        if !used_allowances.is_empty() {
            report.add(&rules.rule(3), "");
        }
        if !used_charges.is_empty() {
            report.add(&rules.rule(4), "");
        }
    }

    // -5 to -7: Rates
    for line in &used_lines {
        if !rules.rate_ok(line.tax_rate) {
            report.add(
                &rules.rule(5),
                format!("invoice line {}: category {code} with rate {}", line.id, rate_text(line.tax_rate)),
            );
        }
    }
    for (n, ac) in [(6, &used_allowances), (7, &used_charges)] {
        let what = if n == 6 { "allowance" } else { "charge" };
        for item in ac.iter() {
            if !rules.rate_ok(item.tax_rate) {
                report.add(
                    &rules.rule(n),
                    format!("document {what}: category {code} with rate {}", rate_text(item.tax_rate)),
                );
            }
        }
    }

    for entry in &entries {
        // -8: Taxable amount
        if level >= level::BASIC {
            let basis = expected_basis(invoice, entry.category, entry.rate);
            if entry.basis_amount != basis {
                report.add(
                    &rules.rule(8),
                    format!(
                        "category {code} rate {}: taxable amount {} differs from calculated {basis}",
                        rate_text(entry.rate),
                        entry.basis_amount
                    ),
                );
            }
        }

        // -9: Tax amount
        let expected = match rules.tax {
            TaxRule::Proportional => tax_amount(entry.basis_amount, entry.rate),
            TaxRule::Zero => Decimal::ZERO,
        };
        if entry.calculated_amount != expected {
            report.add(
                &rules.rule(9),
                format!(
                    "category {code} rate {}: tax amount {} should be {expected}",
                    rate_text(entry.rate),
                    entry.calculated_amount
                ),
            );
        }

        // -10: Exemption reason
        let ok = match rules.exemption {
            Exemption::Required => entry.has_exemption(),
            Exemption::Forbidden => !entry.has_exemption(),
        };
        if !ok {
            report.add(&rules.rule(10), "");
        }
    }
}

fn intra_community(invoice: &Invoice, lines: &[InvoiceLine], report: &mut Report) {
    let ic = Some(TaxCategory::IntraCommunitySupply);
    let used = lines.iter().any(|l| l.tax_category == ic)
        || invoice.allowances_charges.iter().any(|ac| ac.tax_category == ic)
        || invoice.trade_taxes.iter().any(|tt| tt.category == ic);
    if !used {
        return;
    }

    // BR-IC-11: Delivery date or invoicing period
    let period_set = invoice
        .billing_period
        .as_ref()
        .is_some_and(|p| p.start.is_some() || p.end.is_some());
    if invoice.actual_delivery_date.is_none() && !period_set {
        report.add("BR-IC-11", "");
    }

    // BR-IC-12: Deliver-to country
    if invoice.deliver_to_country().is_none() {
        report.add("BR-IC-12", "");
    }
}

fn not_subject(invoice: &Invoice, lines: &[InvoiceLine], report: &mut Report) {
    let o = Some(TaxCategory::NotSubjectToVat);
    if !invoice.trade_taxes.iter().any(|tt| tt.category == o) {
        return;
    }
    let other = |category: Option<TaxCategory>| category.is_some() && category != o;

    // BR-O-11 to BR-O-14: Nothing else besides O
    if invoice.trade_taxes.iter().any(|tt| other(tt.category)) {
        report.add("BR-O-11", "");
    }
    if lines.iter().any(|l| other(l.tax_category)) {
        report.add("BR-O-12", "");
    }
    if invoice.allowances().any(|a| other(a.tax_category)) {
        report.add("BR-O-13", "");
    }
    if invoice.charges().any(|c| other(c.tax_category)) {
        report.add("BR-O-14", "");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use crate::core::calculation::calculate;
    use crate::core::profile::EN16931_URN;

    fn line(id: &str, price: Decimal, category: TaxCategory, rate: Option<Decimal>) -> InvoiceLine {
        InvoiceLine {
            id: id.into(),
            product: Product {
                name: "Service".into(),
                ..Default::default()
            },
            billed_quantity: dec!(1),
            unit_code: "C62".into(),
            net_price: price,
            tax_category: Some(category),
            tax_rate: rate,
            ..Default::default()
        }
    }

    fn invoice(lines: Vec<InvoiceLine>) -> Invoice {
        let mut inv = Invoice {
            number: "V-1".into(),
            issue_date: NaiveDate::from_ymd_opt(2024, 5, 2),
            type_code: Some(InvoiceTypeCode::Invoice),
            currency: "EUR".into(),
            specification_id: EN16931_URN.into(),
            seller: Party {
                name: "Seller".into(),
                vat_id: Some("DE123456789".into()),
                ..Default::default()
            },
            buyer: Party {
                name: "Buyer".into(),
                vat_id: Some("FR45678901234".into()),
                ..Default::default()
            },
            lines,
            ..Default::default()
        };
        calculate(&mut inv, None);
        inv
    }

    fn run(inv: &Invoice) -> Report {
        let mut report = Report::new();
        check(inv, level::EN16931, &mut report);
        report
    }

    #[test]
    fn every_category_has_a_row() {
        for category in TaxCategory::ALL {
            assert!(CATEGORY_RULES.iter().any(|r| r.category == category));
        }
    }

    #[test]
    fn reverse_charge_invoice_is_clean() {
        let inv = invoice(vec![line("1", dec!(100), C::ReverseCharge, Some(dec!(0)))]);
        assert_eq!(inv.trade_taxes[0].exemption_reason.as_deref(), Some("Reverse charge"));
        assert!(run(&inv).is_empty());
    }

    #[test]
    fn reverse_charge_needs_buyer_identifier() {
        let mut inv = invoice(vec![line("1", dec!(100), C::ReverseCharge, Some(dec!(0)))]);
        inv.buyer.vat_id = None;
        let report = run(&inv);
        assert!(report.has("BR-AE-2"));
        assert!(!report.has("BR-AE-3"));
    }

    #[test]
    fn standard_rate_must_be_positive() {
        let inv = invoice(vec![line("1", dec!(100), C::StandardRate, Some(dec!(0)))]);
        assert!(run(&inv).has("BR-S-5"));
    }

    #[test]
    fn standard_rate_allows_several_rates() {
        let inv = invoice(vec![
            line("1", dec!(100), C::StandardRate, Some(dec!(19))),
            line("2", dec!(10), C::StandardRate, Some(dec!(7))),
        ]);
        assert_eq!(inv.trade_taxes.len(), 2);
        assert!(run(&inv).is_empty());
    }

    #[test]
    fn exempt_breakdown_needs_reason() {
        let mut inv = invoice(vec![line("1", dec!(50), C::Exempt, Some(dec!(0)))]);
        inv.trade_taxes[0].exemption_reason = None;
        assert!(run(&inv).has("BR-E-10"));
    }

    #[test]
    fn missing_breakdown_entry() {
        let mut inv = invoice(vec![line("1", dec!(50), C::ZeroRated, Some(dec!(0)))]);
        inv.trade_taxes.clear();
        assert!(run(&inv).has("BR-Z-1"));
    }

    #[test]
    fn tampered_basis_hits_category_rule() {
        let mut inv = invoice(vec![line("1", dec!(100), C::StandardRate, Some(dec!(19)))]);
        inv.trade_taxes[0].basis_amount = dec!(90);
        let report = run(&inv);
        assert!(report.has("BR-S-8"));
        assert!(report.has("BR-S-9"));
    }

    #[test]
    fn intra_community_needs_delivery_information() {
        let inv = invoice(vec![line("1", dec!(100), C::IntraCommunitySupply, Some(dec!(0)))]);
        let report = run(&inv);
        assert!(report.has("BR-IC-11"));
        assert!(report.has("BR-IC-12"));
    }

    #[test]
    fn canary_islands_forbid_buyer_vat() {
        let inv = invoice(vec![line("1", dec!(100), C::CanaryIslands, Some(dec!(7)))]);
        assert!(run(&inv).has("BR-IG-2"));
    }

    #[test]
    fn not_subject_must_stand_alone() {
        let inv = invoice(vec![
            line("1", dec!(100), C::NotSubjectToVat, None),
            line("2", dec!(100), C::StandardRate, Some(dec!(19))),
        ]);
        let report = run(&inv);
        assert!(report.has("BR-O-11"));
        assert!(report.has("BR-O-12"));
        assert!(!report.has("BR-O-5"));
    }

    #[test]
    fn not_subject_basis_mismatch_is_rule_eight() {
        let mut inv = invoice(vec![line("1", dec!(100), C::NotSubjectToVat, None)]);
        inv.trade_taxes[0].basis_amount = dec!(90);
        let report = run(&inv);
        assert!(report.has("BR-O-8"));
        assert!(!report.has("BR-O-9"));
    }

    #[test]
    fn fixed_rate_category_needs_exactly_one_entry() {
        let mut inv = invoice(vec![line("1", dec!(50), C::ZeroRated, Some(dec!(0)))]);
        let duplicate = inv.trade_taxes[0].clone();
        inv.trade_taxes.push(duplicate);
        assert!(run(&inv).has("BR-Z-1"));
    }

    #[test]
    fn not_subject_rejects_a_rate() {
        let inv = invoice(vec![line("1", dec!(100), C::NotSubjectToVat, Some(dec!(0)))]);
        assert!(run(&inv).has("BR-O-5"));
    }

    #[test]
    fn skipped_below_basic_wl() {
        let mut inv = invoice(vec![line("1", dec!(100), C::StandardRate, Some(dec!(0)))]);
        inv.trade_taxes.clear();
        let mut report = Report::new();
        check(&inv, level::MINIMUM, &mut report);
        assert!(report.is_empty());
    }
}

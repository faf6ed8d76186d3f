//! Monetary calculator: line totals, VAT breakdown and document totals.
//!
//! All amounts stay in [`Decimal`]. Arithmetic saturates instead of
//! panicking so that hostile input read from XML cannot abort the process.

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::error::Violation;
use super::rules::CHECK;
use super::types::*;

/// Round to `dp` decimal places, ties away from zero (commercial rounding).
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Saturating sum.
pub(crate) fn sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}

/// `basis × rate / 100`, rounded to two places.
pub fn tax_amount(basis: Decimal, rate: Option<Decimal>) -> Decimal {
    let rate = rate.unwrap_or(Decimal::ZERO);
    round_half_up(basis.saturating_mul(rate) / dec!(100), 2)
}

/// Number of significant decimal places.
pub(crate) fn decimal_places(value: Decimal) -> u32 {
    value.normalize().scale()
}

/// BT-131 for one line:
/// `round(quantity × net price / base quantity, 2) + charges − allowances`.
pub fn line_total(line: &InvoiceLine) -> Decimal {
    let basis = line
        .basis_quantity
        .filter(|b| !b.is_zero())
        .unwrap_or(Decimal::ONE);
    let gross = line
        .billed_quantity
        .saturating_mul(line.net_price)
        .checked_div(basis)
        .unwrap_or(Decimal::ZERO);
    let charges = sum(line.charges().map(|c| c.amount));
    let allowances = sum(line.allowances().map(|a| a.amount));
    round_half_up(gross, 2)
        .saturating_add(charges)
        .saturating_sub(allowances)
}

/// Recompute BT-131 on every line.
pub fn update_line_totals(invoice: &mut Invoice) {
    for line in &mut invoice.lines {
        line.line_total = line_total(line);
    }
}

/// Standard exemption text for categories that need one.
pub fn standard_exemption_reason(category: TaxCategory) -> Option<&'static str> {
    match category {
        TaxCategory::Exempt => Some("Exempt from VAT"),
        TaxCategory::ReverseCharge => Some("Reverse charge"),
        TaxCategory::IntraCommunitySupply => Some("Intra-community supply"),
        TaxCategory::Export => Some("Export outside the EU"),
        TaxCategory::NotSubjectToVat => Some("Not subject to VAT"),
        _ => None,
    }
}

type TaxKey = (Option<TaxCategory>, Option<Decimal>);

fn tax_key(category: Option<TaxCategory>, rate: Option<Decimal>) -> TaxKey {
    (category, rate.map(|r| r.normalize()))
}

#[derive(Default)]
struct Accumulator {
    basis: Decimal,
    has_line: bool,
    has_allowance: bool,
    has_charge: bool,
}

/// Fields of a breakdown entry that the calculator keeps across rebuilds.
struct Kept {
    exemption_reason: Option<String>,
    exemption_reason_code: Option<String>,
    tax_point_date: Option<chrono::NaiveDate>,
    due_date_type_code: Option<String>,
}

/// Rebuild the VAT breakdown (BG-23) from lines and document-level
/// allowances and charges.
///
/// Existing exemption reasons are preserved per (category, rate). Missing
/// reasons on categories that need one are filled from `default_reason`,
/// or the standard text for the category when `None`. A negative basis is
/// clamped to zero. Entries that only document-level allowances contribute
/// to are reported as `Check` violations.
pub fn update_trade_taxes(invoice: &mut Invoice, default_reason: Option<&str>) -> Vec<Violation> {
    let mut groups: HashMap<TaxKey, Accumulator> = HashMap::new();

    for line in &invoice.lines {
        if line.tax_category.is_none() {
            tracing::debug!(line = %line.id, "line without VAT category left out of breakdown");
            continue;
        }
        let acc = groups
            .entry(tax_key(line.tax_category, line.tax_rate))
            .or_default();
        acc.basis = acc.basis.saturating_add(line.line_total);
        acc.has_line = true;
    }

    for ac in &invoice.allowances_charges {
        if ac.tax_category.is_none() {
            continue;
        }
        let acc = groups
            .entry(tax_key(ac.tax_category, ac.tax_rate))
            .or_default();
        if ac.is_charge {
            acc.basis = acc.basis.saturating_add(ac.amount);
            acc.has_charge = true;
        } else {
            acc.basis = acc.basis.saturating_sub(ac.amount);
            acc.has_allowance = true;
        }
    }

    let kept: HashMap<TaxKey, Kept> = invoice
        .trade_taxes
        .iter()
        .map(|tt| {
            (
                tax_key(tt.category, tt.rate),
                Kept {
                    exemption_reason: tt.exemption_reason.clone(),
                    exemption_reason_code: tt.exemption_reason_code.clone(),
                    tax_point_date: tt.tax_point_date,
                    due_date_type_code: tt.due_date_type_code.clone(),
                },
            )
        })
        .collect();

    let mut violations = Vec::new();
    let mut trade_taxes = Vec::with_capacity(groups.len());

    for ((category, rate), acc) in groups {
        let code = category.map(|c| c.code()).unwrap_or_default();
        if acc.has_allowance && !acc.has_line && !acc.has_charge {
            violations.push(Violation::new(
                CHECK,
                format!(
                    "Document-level allowance has no corresponding invoice lines (category {code}, rate {})",
                    rate.map(|r| r.to_string()).unwrap_or_else(|| "none".into())
                ),
            ));
        }

        let mut basis = acc.basis;
        if basis.is_sign_negative() && !basis.is_zero() {
            tracing::warn!(category = code, %basis, "negative VAT basis clamped to zero");
            basis = Decimal::ZERO;
        }

        let mut entry = TradeTax {
            type_code: "VAT".into(),
            category,
            rate,
            basis_amount: basis,
            calculated_amount: tax_amount(basis, rate),
            ..TradeTax::default()
        };

        if let Some(kept) = kept.get(&(category, rate)) {
            entry.exemption_reason = kept.exemption_reason.clone();
            entry.exemption_reason_code = kept.exemption_reason_code.clone();
            entry.tax_point_date = kept.tax_point_date;
            entry.due_date_type_code = kept.due_date_type_code.clone();
        }

        if let Some(cat) = category {
            if cat.requires_exemption_reason() && !entry.has_exemption() {
                entry.exemption_reason = default_reason
                    .or_else(|| standard_exemption_reason(cat))
                    .map(str::to_owned);
            }
        }

        trade_taxes.push(entry);
    }

    trade_taxes.sort_by(|a, b| {
        let code_a = a.category.map(|c| c.code()).unwrap_or_default();
        let code_b = b.category.map(|c| c.code()).unwrap_or_default();
        code_a.cmp(code_b).then(a.rate.cmp(&b.rate))
    });

    tracing::debug!(entries = trade_taxes.len(), "VAT breakdown rebuilt");
    invoice.trade_taxes = trade_taxes;
    violations
}

/// Recompute the document totals (BG-22) from lines, allowances, charges
/// and the VAT breakdown. Paid amount and rounding amount are inputs;
/// missing values count as zero. BT-111 is left untouched.
pub fn update_totals(invoice: &mut Invoice) {
    let line_total = sum(invoice.lines.iter().map(|l| l.line_total));
    let allowance_total = sum(invoice.allowances().map(|a| a.amount));
    let charge_total = sum(invoice.charges().map(|c| c.amount));
    let tax_basis_total = line_total
        .saturating_sub(allowance_total)
        .saturating_add(charge_total);
    let tax_total = sum(invoice.trade_taxes.iter().map(|t| t.calculated_amount));
    let grand_total = tax_basis_total.saturating_add(tax_total);

    let totals = &mut invoice.totals;
    let prepaid = totals.prepaid.unwrap_or(Decimal::ZERO);
    let rounding = totals.rounding.unwrap_or(Decimal::ZERO);

    totals.line_total = Some(line_total);
    totals.allowance_total = Some(allowance_total);
    totals.charge_total = Some(charge_total);
    totals.tax_basis_total = Some(tax_basis_total);
    totals.tax_total = Some(tax_total);
    totals.grand_total = Some(grand_total);
    totals.due_payable = Some(
        grand_total
            .saturating_sub(prepaid)
            .saturating_add(rounding),
    );
}

/// Run the full calculation: line totals, then the VAT breakdown, then
/// the document totals. Returns the breakdown's `Check` violations.
#[tracing::instrument(skip(invoice), fields(number = %invoice.number, lines = invoice.lines.len()))]
pub fn calculate(invoice: &mut Invoice, default_reason: Option<&str>) -> Vec<Violation> {
    update_line_totals(invoice);
    let violations = update_trade_taxes(invoice, default_reason);
    update_totals(invoice);
    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, qty: Decimal, price: Decimal, cat: TaxCategory, rate: Option<Decimal>) -> InvoiceLine {
        InvoiceLine {
            id: id.into(),
            billed_quantity: qty,
            unit_code: "C62".into(),
            net_price: price,
            tax_category: Some(cat),
            tax_rate: rate,
            product: Product {
                name: format!("Item {id}"),
                ..Product::default()
            },
            ..InvoiceLine::default()
        }
    }

    fn allowance(amount: Decimal, cat: TaxCategory, rate: Option<Decimal>) -> AllowanceCharge {
        AllowanceCharge {
            is_charge: false,
            amount,
            reason: Some("Discount".into()),
            tax_category: Some(cat),
            tax_rate: rate,
            ..AllowanceCharge::default()
        }
    }

    #[test]
    fn round_half_up_ties_away_from_zero() {
        assert_eq!(round_half_up(dec!(2.345), 2), dec!(2.35));
        assert_eq!(round_half_up(dec!(-2.345), 2), dec!(-2.35));
        assert_eq!(round_half_up(dec!(2.344), 2), dec!(2.34));
    }

    #[test]
    fn tax_amount_rounds_commercially() {
        assert_eq!(tax_amount(dec!(0.05), Some(dec!(10))), dec!(0.01));
        assert_eq!(tax_amount(dec!(100), None), dec!(0));
    }

    #[test]
    fn line_total_uses_base_quantity() {
        let mut l = line("1", dec!(3), dec!(10), TaxCategory::StandardRate, Some(dec!(19)));
        l.basis_quantity = Some(dec!(2));
        assert_eq!(line_total(&l), dec!(15.00));
        l.basis_quantity = Some(Decimal::ZERO);
        assert_eq!(line_total(&l), dec!(30.00));
    }

    #[test]
    fn line_total_applies_line_allowances_and_charges() {
        let mut l = line("1", dec!(2), dec!(50), TaxCategory::StandardRate, Some(dec!(19)));
        l.allowances_charges.push(AllowanceCharge {
            amount: dec!(5),
            ..AllowanceCharge::default()
        });
        l.allowances_charges.push(AllowanceCharge {
            is_charge: true,
            amount: dec!(1.50),
            ..AllowanceCharge::default()
        });
        assert_eq!(line_total(&l), dec!(96.50));
    }

    #[test]
    fn fractional_quantity_is_rounded_once() {
        let l = line("1", dec!(0.333), dec!(10), TaxCategory::StandardRate, Some(dec!(19)));
        assert_eq!(line_total(&l), dec!(3.33));
    }

    #[test]
    fn breakdown_groups_by_category_and_rate() {
        let mut inv = Invoice::default();
        inv.lines.push(line("1", dec!(1), dec!(100), TaxCategory::StandardRate, Some(dec!(19))));
        inv.lines.push(line("2", dec!(1), dec!(50), TaxCategory::StandardRate, Some(dec!(7))));
        inv.lines.push(line("3", dec!(1), dec!(25), TaxCategory::StandardRate, Some(dec!(19.00))));
        let violations = calculate(&mut inv, None);
        assert!(violations.is_empty());
        assert_eq!(inv.trade_taxes.len(), 2);
        assert_eq!(inv.trade_taxes[0].rate, Some(dec!(7)));
        assert_eq!(inv.trade_taxes[0].calculated_amount, dec!(3.50));
        assert_eq!(inv.trade_taxes[1].basis_amount, dec!(125.00));
        assert_eq!(inv.trade_taxes[1].calculated_amount, dec!(23.75));
    }

    #[test]
    fn allowance_only_group_is_clamped_and_reported() {
        let mut inv = Invoice::default();
        inv.lines.push(line("1", dec!(1), dec!(100), TaxCategory::StandardRate, Some(dec!(19))));
        inv.allowances_charges
            .push(allowance(dec!(10), TaxCategory::StandardRate, Some(dec!(7))));
        let violations = calculate(&mut inv, None);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, CHECK);
        let seven = inv
            .trade_taxes
            .iter()
            .find(|t| t.rate == Some(dec!(7)))
            .expect("7% entry");
        assert_eq!(seven.basis_amount, Decimal::ZERO);
        assert_eq!(seven.calculated_amount, Decimal::ZERO);
    }

    #[test]
    fn existing_exemption_reason_survives() {
        let mut inv = Invoice::default();
        inv.lines.push(line("1", dec!(1), dec!(100), TaxCategory::Exempt, Some(dec!(0))));
        inv.trade_taxes.push(TradeTax {
            category: Some(TaxCategory::Exempt),
            rate: Some(dec!(0.00)),
            exemption_reason: Some("Medical services".into()),
            ..TradeTax::default()
        });
        calculate(&mut inv, Some("Exempt"));
        assert_eq!(inv.trade_taxes.len(), 1);
        assert_eq!(
            inv.trade_taxes[0].exemption_reason.as_deref(),
            Some("Medical services")
        );
    }

    #[test]
    fn default_reason_fills_exempt_categories_only() {
        let mut inv = Invoice::default();
        inv.lines.push(line("1", dec!(1), dec!(100), TaxCategory::ReverseCharge, Some(dec!(0))));
        inv.lines.push(line("2", dec!(1), dec!(100), TaxCategory::StandardRate, Some(dec!(19))));
        calculate(&mut inv, Some("Custom reason"));
        let ae = &inv.trade_taxes[0];
        assert_eq!(ae.category, Some(TaxCategory::ReverseCharge));
        assert_eq!(ae.exemption_reason.as_deref(), Some("Custom reason"));
        assert_eq!(inv.trade_taxes[1].exemption_reason, None);
    }

    #[test]
    fn not_subject_to_vat_has_no_rate() {
        let mut inv = Invoice::default();
        inv.lines.push(line("1", dec!(2), dec!(40), TaxCategory::NotSubjectToVat, None));
        calculate(&mut inv, None);
        assert_eq!(inv.trade_taxes[0].rate, None);
        assert_eq!(inv.trade_taxes[0].calculated_amount, Decimal::ZERO);
        assert_eq!(
            inv.trade_taxes[0].exemption_reason.as_deref(),
            Some("Not subject to VAT")
        );
    }

    #[test]
    fn totals_respect_prepaid_and_rounding() {
        let mut inv = Invoice::default();
        inv.lines.push(line("1", dec!(1), dec!(100), TaxCategory::StandardRate, Some(dec!(19))));
        inv.totals.prepaid = Some(dec!(19));
        inv.totals.rounding = Some(dec!(0.01));
        calculate(&mut inv, None);
        assert_eq!(inv.totals.grand_total, Some(dec!(119.00)));
        assert_eq!(inv.totals.due_payable, Some(dec!(100.01)));
    }

    #[test]
    fn huge_values_saturate() {
        let mut inv = Invoice::default();
        inv.lines.push(line("1", Decimal::MAX, Decimal::MAX, TaxCategory::StandardRate, Some(dec!(19))));
        inv.lines.push(line("2", Decimal::MAX, dec!(1), TaxCategory::StandardRate, Some(dec!(19))));
        calculate(&mut inv, None);
        assert!(inv.totals.grand_total.is_some());
    }
}

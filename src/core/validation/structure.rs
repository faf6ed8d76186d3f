//! EN 16931 structural, arithmetic and code-list rules (BR, BR-CO,
//! BR-DEC, BR-CL).

use rust_decimal::Decimal;

use super::super::calculation::{decimal_places, line_total, sum, tax_amount};
use super::super::codelists;
use super::super::profile::{Profile, level};
use super::super::report::Report;
use super::super::rules::CHECK;
use super::super::types::*;

pub(super) fn check(invoice: &Invoice, level: u8, report: &mut Report) {
    header(invoice, report);
    parties(invoice, level, report);
    if level >= level::BASIC {
        lines(invoice, report);
    }
    period(invoice, report);
    allowances_charges(invoice, report);
    if level >= level::BASIC_WL {
        breakdown(invoice, level, report);
        payment(invoice, report);
    }
    references(invoice, level, report);
    totals(invoice, level, report);
}

/// BR-1 to BR-5 and the header code lists.
pub(super) fn header(invoice: &Invoice, report: &mut Report) {
    // BR-1: Specification identifier
    if invoice.profile() == Profile::Unknown {
        let text = if invoice.specification_id.trim().is_empty() {
            String::new()
        } else {
            format!(
                "unrecognised specification identifier '{}'",
                invoice.specification_id
            )
        };
        report.add("BR-1", text);
    }

    // BR-2: Invoice number
    if invoice.number.trim().is_empty() {
        report.add("BR-2", "");
    }

    // BR-3: Issue date
    if invoice.issue_date.is_none() {
        report.add("BR-3", "");
    }

    // BR-4: Type code, BR-CL-01: UNTDID 1001
    match invoice.type_code {
        None => report.add("BR-4", ""),
        Some(InvoiceTypeCode::Other(code)) if !codelists::is_document_type_code(code) => {
            report.add("BR-CL-01", format!("unknown invoice type code {code}"));
        }
        Some(_) => {}
    }

    // BR-5: Currency, BR-CL-04 / BR-CL-05: ISO 4217
    if invoice.currency.trim().is_empty() {
        report.add("BR-5", "");
    } else if !codelists::is_currency_code(&invoice.currency) {
        report.add(
            "BR-CL-04",
            format!("unknown currency code '{}'", invoice.currency),
        );
    }
    if let Some(tax_currency) = &invoice.tax_currency {
        if !codelists::is_currency_code(tax_currency) {
            report.add(
                "BR-CL-05",
                format!("unknown tax currency code '{tax_currency}'"),
            );
        }
    }
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn country_in_list(party: &Party, role: &str, report: &mut Report) {
    if let Some(country) = party.country_code() {
        if !codelists::is_country_code(country) {
            report.add(
                "BR-CL-14",
                format!("{role} country code '{country}' is not an ISO 3166-1 code"),
            );
        }
    }
}

fn vat_prefix(vat_id: &Option<String>, role: &str, report: &mut Report) {
    let Some(vat_id) = vat_id.as_deref().filter(|v| !blank(v)) else {
        return;
    };
    let valid = vat_id.trim().get(..2).is_some_and(codelists::is_vat_prefix);
    if !valid {
        report.add(
            "BR-CO-9",
            format!("{role} VAT identifier '{vat_id}' does not start with a country prefix"),
        );
    }
}

fn parties(invoice: &Invoice, level: u8, report: &mut Report) {
    let seller = &invoice.seller;
    let buyer = &invoice.buyer;

    // BR-6 / BR-7: Names
    if blank(&seller.name) {
        report.add("BR-6", "");
    }
    if blank(&buyer.name) {
        report.add("BR-7", "");
    }

    // BR-8 / BR-9: Seller address and country
    match &seller.postal_address {
        None => report.add("BR-8", ""),
        Some(address) if blank(&address.country_code) => report.add("BR-9", ""),
        Some(_) => {}
    }

    // BR-10 / BR-11: Buyer address and country
    if level >= level::BASIC_WL {
        match &buyer.postal_address {
            None => report.add("BR-10", ""),
            Some(address) if blank(&address.country_code) => report.add("BR-11", ""),
            Some(_) => {}
        }
    }

    // BR-17: Payee name
    if let Some(payee) = &invoice.payee {
        if blank(&payee.name) {
            report.add("BR-17", "");
        }
    }

    // BR-18, BR-19, BR-20, BR-56: Tax representative
    if let Some(rep) = &invoice.tax_representative {
        if blank(&rep.name) {
            report.add("BR-18", "");
        }
        match &rep.postal_address {
            None => report.add("BR-19", ""),
            Some(address) if blank(&address.country_code) => report.add("BR-20", ""),
            Some(_) => {}
        }
        if !has_text(&rep.vat_id) {
            report.add("BR-56", "");
        }
    }

    // BR-57: Deliver-to country
    if let Some(address) = invoice.ship_to.as_ref().and_then(|p| p.postal_address.as_ref()) {
        if blank(&address.country_code) {
            report.add("BR-57", "");
        }
    }

    // BR-CL-14: Country codes
    country_in_list(seller, "seller", report);
    country_in_list(buyer, "buyer", report);
    if let Some(rep) = &invoice.tax_representative {
        country_in_list(rep, "tax representative", report);
    }
    if let Some(ship_to) = &invoice.ship_to {
        country_in_list(ship_to, "deliver-to", report);
    }

    // BR-CO-9: VAT identifier prefix
    vat_prefix(&seller.vat_id, "seller", report);
    vat_prefix(&buyer.vat_id, "buyer", report);
    if let Some(rep) = &invoice.tax_representative {
        vat_prefix(&rep.vat_id, "tax representative", report);
    }

    // BR-CO-26: Seller identifier
    let seller_identified = seller.ids.iter().any(|id| !blank(id))
        || seller.global_ids.iter().any(|id| !blank(&id.value))
        || seller.legal_id().is_some()
        || has_text(&seller.vat_id);
    if !seller_identified {
        report.add("BR-CO-26", "");
    }

    // BR-62 / BR-63: Electronic address scheme
    if seller
        .electronic_address
        .as_ref()
        .is_some_and(|ea| blank(&ea.scheme))
    {
        report.add("BR-62", "");
    }
    if buyer
        .electronic_address
        .as_ref()
        .is_some_and(|ea| blank(&ea.scheme))
    {
        report.add("BR-63", "");
    }
}

fn line_period(line: &InvoiceLine, report: &mut Report) {
    let Some(period) = &line.period else {
        return;
    };
    match (period.start, period.end) {
        (None, None) => report.add(
            "BR-CO-20",
            format!("invoice line {}: period has neither start nor end date", line.id),
        ),
        (Some(start), Some(end)) if end < start => report.add(
            "BR-30",
            format!("invoice line {}: period ends {end} before it starts {start}", line.id),
        ),
        _ => {}
    }
}

fn lines(invoice: &Invoice, report: &mut Report) {
    // BR-16: At least one line
    if invoice.lines.is_empty() {
        report.add("BR-16", "");
    }

    for line in &invoice.lines {
        let id = &line.id;

        // BR-21: Line identifier
        if blank(id) {
            report.add("BR-21", "");
        }

        // BR-22: Quantity
        let bad_quantity = if invoice.is_credit_note() {
            line.billed_quantity.is_zero()
        } else {
            line.billed_quantity <= Decimal::ZERO
        };
        if bad_quantity {
            report.add(
                "BR-22",
                format!("invoice line {id}: invalid quantity {}", line.billed_quantity),
            );
        }

        // BR-23: Unit code, BR-CL-23: Rec 20/21
        if blank(&line.unit_code) {
            report.add("BR-23", format!("invoice line {id}: missing unit code"));
        } else if !codelists::is_unit_code(&line.unit_code) {
            report.add(
                "BR-CL-23",
                format!("invoice line {id}: unknown unit code '{}'", line.unit_code),
            );
        }

        // BR-25: Item name
        if blank(&line.product.name) {
            report.add("BR-25", format!("invoice line {id}: missing item name"));
        }

        // BR-27 / BR-28: Prices
        if line.net_price.is_sign_negative() && !line.net_price.is_zero() {
            report.add(
                "BR-27",
                format!("invoice line {id}: net price {} is negative", line.net_price),
            );
        }
        if let Some(gross) = line.gross_price {
            if gross.is_sign_negative() && !gross.is_zero() {
                report.add(
                    "BR-28",
                    format!("invoice line {id}: gross price {gross} is negative"),
                );
            }
        }

        // BR-CO-4: Line VAT category
        if line.tax_category.is_none() {
            report.add("BR-CO-4", format!("invoice line {id}: missing VAT category"));
        }

        // BR-30 / BR-CO-20
        line_period(line, report);

        // BR-41 to BR-44: Line allowances and charges
        for ac in &line.allowances_charges {
            let (amount_rule, reason_rule, what) = if ac.is_charge {
                ("BR-43", "BR-44", "charge")
            } else {
                ("BR-41", "BR-42", "allowance")
            };
            if ac.amount.is_zero() {
                report.add(amount_rule, format!("invoice line {id}: {what} amount is zero"));
            }
            if !ac.has_reason() {
                report.add(reason_rule, format!("invoice line {id}: {what} has no reason"));
            }
            let (amount_dec, basis_dec) = if ac.is_charge {
                ("BR-DEC-27", "BR-DEC-28")
            } else {
                ("BR-DEC-24", "BR-DEC-25")
            };
            if decimal_places(ac.amount) > 2 {
                report.add(amount_dec, format!("invoice line {id}: {what} amount {}", ac.amount));
            }
            if let Some(basis) = ac.basis_amount {
                if decimal_places(basis) > 2 {
                    report.add(basis_dec, format!("invoice line {id}: {what} base amount {basis}"));
                }
            }
        }

        // BR-54: Item attributes
        for attr in &line.product.characteristics {
            if blank(&attr.name) || blank(&attr.value) {
                report.add("BR-54", format!("invoice line {id}: incomplete item attribute"));
            }
        }

        // BR-64 / BR-65: Item identifier schemes
        if line
            .product
            .global_id
            .as_ref()
            .is_some_and(|gid| !has_text(&gid.scheme))
        {
            report.add("BR-64", format!("invoice line {id}: standard identifier without scheme"));
        }
        if line
            .product
            .classifications
            .iter()
            .any(|c| !has_text(&c.list_id))
        {
            report.add("BR-65", format!("invoice line {id}: classification without scheme"));
        }

        // BR-DEC-23: Line net amount
        if decimal_places(line.line_total) > 2 {
            report.add(
                "BR-DEC-23",
                format!("invoice line {id}: net amount {}", line.line_total),
            );
        }

        let expected = line_total(line);
        if line.line_total != expected {
            report.add(
                CHECK,
                format!(
                    "invoice line {id}: net amount {} differs from calculated {expected}",
                    line.line_total
                ),
            );
        }
    }
}

fn period(invoice: &Invoice, report: &mut Report) {
    let Some(period) = &invoice.billing_period else {
        return;
    };
    match (period.start, period.end) {
        // BR-CO-19
        (None, None) => report.add("BR-CO-19", ""),
        // BR-29
        (Some(start), Some(end)) if end < start => report.add(
            "BR-29",
            format!("invoicing period ends {end} before it starts {start}"),
        ),
        _ => {}
    }
}

fn allowances_charges(invoice: &Invoice, report: &mut Report) {
    for (i, ac) in invoice.allowances_charges.iter().enumerate() {
        let n = i + 1;
        let (what, amount_rule, category_rule, reason_rule) = if ac.is_charge {
            ("charge", "BR-36", "BR-37", "BR-38")
        } else {
            ("allowance", "BR-31", "BR-32", "BR-33")
        };

        if ac.amount.is_zero() {
            report.add(amount_rule, format!("document {what} {n}: amount is zero"));
        }
        if ac.tax_category.is_none() {
            report.add(category_rule, format!("document {what} {n}: missing VAT category"));
        }
        if !ac.has_reason() {
            report.add(reason_rule, format!("document {what} {n}: missing reason"));
        }

        // BR-CL-19 / BR-CL-20: Reason code lists
        if let Some(code) = ac.reason_code.as_deref().filter(|c| !blank(c)) {
            let known = if ac.is_charge {
                codelists::is_charge_reason_code(code)
            } else {
                codelists::is_allowance_reason_code(code)
            };
            if !known {
                let rule = if ac.is_charge { "BR-CL-20" } else { "BR-CL-19" };
                report.add(rule, format!("document {what} {n}: unknown reason code '{code}'"));
            }
        }

        let (amount_dec, basis_dec) = if ac.is_charge {
            ("BR-DEC-05", "BR-DEC-06")
        } else {
            ("BR-DEC-01", "BR-DEC-02")
        };
        if decimal_places(ac.amount) > 2 {
            report.add(amount_dec, format!("document {what} {n}: amount {}", ac.amount));
        }
        if let Some(basis) = ac.basis_amount {
            if decimal_places(basis) > 2 {
                report.add(basis_dec, format!("document {what} {n}: base amount {basis}"));
            }
        }
    }
}

/// Expected BT-116 for a breakdown entry, clamped at zero like the calculator.
pub(super) fn expected_basis(
    invoice: &Invoice,
    category: Option<TaxCategory>,
    rate: Option<Decimal>,
) -> Decimal {
    let lines = sum(invoice
        .lines
        .iter()
        .filter(|l| l.tax_category == category && l.tax_rate == rate)
        .map(|l| l.line_total));
    let matching = |ac: &&AllowanceCharge| ac.tax_category == category && ac.tax_rate == rate;
    let charges = sum(invoice.charges().filter(matching).map(|c| c.amount));
    let allowances = sum(invoice.allowances().filter(matching).map(|a| a.amount));
    let basis = lines.saturating_add(charges).saturating_sub(allowances);
    basis.max(Decimal::ZERO)
}

fn breakdown(invoice: &Invoice, level: u8, report: &mut Report) {
    // BR-CO-18: At least one VAT breakdown
    if invoice.trade_taxes.is_empty() {
        report.add("BR-CO-18", "");
    }

    for tt in &invoice.trade_taxes {
        let code = tt.category.map(|c| c.code()).unwrap_or("?");

        // BR-47 / BR-48
        if tt.category.is_none() {
            report.add("BR-47", "");
        }
        if tt.rate.is_none() && tt.category != Some(TaxCategory::NotSubjectToVat) {
            report.add("BR-48", format!("VAT breakdown {code} has no rate"));
        }

        if let Some(rate) = tt.rate {
            if decimal_places(rate) > 4 {
                report.add(
                    "BR-DEC-VAT-RATE",
                    format!("VAT rate {rate} has more than four decimals"),
                );
            }
        }

        // BR-CO-17: Category tax amount
        let expected = tax_amount(tt.basis_amount, tt.rate);
        if tt.calculated_amount != expected {
            report.add(
                "BR-CO-17",
                format!(
                    "VAT breakdown {code}: tax amount {} differs from calculated {expected}",
                    tt.calculated_amount
                ),
            );
        }

        // BR-45: Category taxable amount
        if level >= level::BASIC {
            let basis = expected_basis(invoice, tt.category, tt.rate);
            if tt.basis_amount != basis {
                report.add(
                    "BR-45",
                    format!(
                        "VAT breakdown {code}: taxable amount {} differs from calculated {basis}",
                        tt.basis_amount
                    ),
                );
            }
        }

        // BR-CO-3: Tax point date and date code
        if tt.tax_point_date.is_some() && has_text(&tt.due_date_type_code) {
            report.add("BR-CO-3", "");
        }

        if decimal_places(tt.basis_amount) > 2 {
            report.add(
                "BR-DEC-19",
                format!("VAT breakdown {code}: taxable amount {}", tt.basis_amount),
            );
        }
        if decimal_places(tt.calculated_amount) > 2 {
            report.add(
                "BR-DEC-20",
                format!("VAT breakdown {code}: tax amount {}", tt.calculated_amount),
            );
        }
    }
}

fn payment(invoice: &Invoice, report: &mut Report) {
    for means in &invoice.payment_means {
        // BR-49: Type code
        let Some(code) = means.type_code else {
            report.add("BR-49", "");
            continue;
        };

        // BR-50 / BR-61: Account identifier
        match &means.payee_account {
            Some(account) if !account.has_identifier() => report.add("BR-50", ""),
            None if code.is_credit_transfer() => report.add(
                "BR-61",
                format!("payment means {} without payee account", code.code()),
            ),
            _ => {}
        }

        // BR-51: Card number
        if let Some(card) = &means.card {
            if card.id.trim().chars().count() > 6 {
                report.add("BR-51", "");
            }
        }
    }

    // BR-CO-25: Due date or terms when an amount is due
    let due = invoice.totals.due_payable.unwrap_or(Decimal::ZERO);
    if due > Decimal::ZERO {
        let has_terms = invoice
            .payment_terms
            .iter()
            .any(|t| t.due_date.is_some() || has_text(&t.description));
        if !has_terms {
            report.add("BR-CO-25", "");
        }
    }
}

fn references(invoice: &Invoice, level: u8, report: &mut Report) {
    // BR-52: Supporting document reference
    for doc in &invoice.supporting_documents {
        if blank(&doc.id) {
            report.add("BR-52", "");
        }
    }

    // BR-55: Preceding invoice reference
    for preceding in &invoice.preceding_invoices {
        if blank(&preceding.id) {
            report.add("BR-55", "");
        }
    }

    // BR-53: Total VAT in accounting currency
    if level >= level::BASIC_WL
        && has_text(&invoice.tax_currency)
        && invoice.totals.tax_total_accounting.is_none()
    {
        report.add("BR-53", "");
    }
}

fn totals(invoice: &Invoice, level: u8, report: &mut Report) {
    let t = &invoice.totals;
    let zero = Decimal::ZERO;

    // BR-12 to BR-15: Presence
    if level >= level::BASIC_WL && t.line_total.is_none() {
        report.add("BR-12", "");
    }
    if t.tax_basis_total.is_none() {
        report.add("BR-13", "");
    }
    if t.grand_total.is_none() {
        report.add("BR-14", "");
    }
    if t.due_payable.is_none() {
        report.add("BR-15", "");
    }

    // BR-CO-10: Sum of line net amounts
    if level >= level::BASIC {
        let expected = sum(invoice.lines.iter().map(|l| l.line_total));
        if let Some(actual) = t.line_total {
            if actual != expected {
                report.add(
                    "BR-CO-10",
                    format!("line total {actual} differs from sum of lines {expected}"),
                );
            }
        }
    }

    let allowance_total = t.allowance_total.unwrap_or(zero);
    let charge_total = t.charge_total.unwrap_or(zero);

    if level >= level::BASIC_WL {
        // BR-CO-11 / BR-CO-12
        let allowances = sum(invoice.allowances().map(|a| a.amount));
        if allowance_total != allowances {
            report.add(
                "BR-CO-11",
                format!("allowance total {allowance_total} differs from sum of allowances {allowances}"),
            );
        }
        let charges = sum(invoice.charges().map(|c| c.amount));
        if charge_total != charges {
            report.add(
                "BR-CO-12",
                format!("charge total {charge_total} differs from sum of charges {charges}"),
            );
        }

        // BR-CO-14: Total VAT
        let tax_sum = sum(invoice.trade_taxes.iter().map(|tt| tt.calculated_amount));
        let tax_total = t.tax_total.unwrap_or(zero);
        if tax_total != tax_sum {
            report.add(
                "BR-CO-14",
                format!("tax total {tax_total} differs from sum of VAT breakdown {tax_sum}"),
            );
        }
    }

    let tax_basis = t.tax_basis_total.unwrap_or(zero);
    let tax_total = t.tax_total.unwrap_or(zero);
    let grand = t.grand_total.unwrap_or(zero);

    // BR-CO-13: Total without VAT
    if let Some(lines) = t.line_total {
        let expected = lines
            .saturating_sub(allowance_total)
            .saturating_add(charge_total);
        if tax_basis != expected {
            report.add(
                "BR-CO-13",
                format!("total without VAT {tax_basis} differs from calculated {expected}"),
            );
        }
    } else if level >= level::BASIC_WL {
        let expected = charge_total.saturating_sub(allowance_total);
        if tax_basis != expected {
            report.add(
                "BR-CO-13",
                format!("total without VAT {tax_basis} differs from calculated {expected}"),
            );
        }
    }

    // BR-CO-15: Total with VAT
    let expected = tax_basis.saturating_add(tax_total);
    if grand != expected {
        report.add(
            "BR-CO-15",
            format!("total with VAT {grand} differs from calculated {expected}"),
        );
    }

    // BR-CO-16: Amount due
    let expected = grand
        .saturating_sub(t.prepaid.unwrap_or(zero))
        .saturating_add(t.rounding.unwrap_or(zero));
    let due = t.due_payable.unwrap_or(zero);
    if due != expected {
        report.add(
            "BR-CO-16",
            format!("amount due {due} differs from calculated {expected}"),
        );
    }

    // BR-DEC-09 to BR-DEC-18
    let amounts = [
        ("BR-DEC-09", t.line_total),
        ("BR-DEC-10", t.allowance_total),
        ("BR-DEC-11", t.charge_total),
        ("BR-DEC-12", t.tax_basis_total),
        ("BR-DEC-13", t.tax_total),
        ("BR-DEC-14", t.grand_total),
        ("BR-DEC-15", t.tax_total_accounting),
        ("BR-DEC-16", t.prepaid),
        ("BR-DEC-17", t.rounding),
        ("BR-DEC-18", t.due_payable),
    ];
    for (rule, amount) in amounts {
        if let Some(amount) = amount.filter(|a| decimal_places(*a) > 2) {
            report.add(rule, format!("amount {amount} has more than two decimals"));
        }
    }
}

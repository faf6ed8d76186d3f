use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::calculation;
use super::error::InvoiceError;
use super::profile::{PEPPOL_PROCESS_ID, Profile};
use super::types::*;
use super::validation;

/// Builder for invoices.
///
/// [`build`](Self::build) runs the calculator so line totals, the VAT
/// breakdown and the document totals are filled in;
/// [`build_validated`](Self::build_validated) additionally rejects
/// invoices with rule violations.
///
/// ```
/// use einvoice::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let invoice = InvoiceBuilder::new("RE-2024-001", NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
///     .seller(PartyBuilder::new("ACME GmbH")
///         .address(AddressBuilder::new("DE").city("Berlin").postcode("10115").build())
///         .vat_id("DE123456789")
///         .build())
///     .buyer(PartyBuilder::new("Kunde AG")
///         .address(AddressBuilder::new("DE").city("München").postcode("80331").build())
///         .build())
///     .add_line(LineBuilder::new("1", "Beratung", dec!(10), "HUR", dec!(150.00))
///         .tax(TaxCategory::StandardRate, dec!(19))
///         .build())
///     .due_date(NaiveDate::from_ymd_opt(2024, 2, 15).unwrap())
///     .build_validated()
///     .unwrap();
/// assert_eq!(invoice.totals.due_payable, Some(dec!(1785.00)));
/// ```
pub struct InvoiceBuilder {
    invoice: Invoice,
    default_exemption_reason: Option<String>,
}

impl InvoiceBuilder {
    /// Start an EN 16931 commercial invoice in EUR.
    pub fn new(number: impl Into<String>, issue_date: NaiveDate) -> Self {
        Self {
            invoice: Invoice {
                number: number.into(),
                issue_date: Some(issue_date),
                type_code: Some(InvoiceTypeCode::Invoice),
                currency: "EUR".to_string(),
                specification_id: Profile::En16931.urn().to_string(),
                ..Invoice::default()
            },
            default_exemption_reason: None,
        }
    }

    /// Select the profile by writing its canonical specification identifier.
    /// PEPPOL also gets the default billing business process.
    pub fn profile(mut self, profile: Profile) -> Self {
        self.invoice.specification_id = profile.urn().to_string();
        if profile.is_peppol() && self.invoice.business_process.is_none() {
            self.invoice.business_process = Some(PEPPOL_PROCESS_ID.to_string());
        }
        self
    }

    pub fn specification_id(mut self, id: impl Into<String>) -> Self {
        self.invoice.specification_id = id.into();
        self
    }

    pub fn business_process(mut self, id: impl Into<String>) -> Self {
        self.invoice.business_process = Some(id.into());
        self
    }

    pub fn type_code(mut self, code: InvoiceTypeCode) -> Self {
        self.invoice.type_code = Some(code);
        self
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.invoice.currency = code.into();
        self
    }

    pub fn tax_currency(mut self, code: impl Into<String>) -> Self {
        self.invoice.tax_currency = Some(code.into());
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.invoice.notes.push(Note::new(note));
        self
    }

    pub fn note_with_subject(mut self, note: impl Into<String>, subject: impl Into<String>) -> Self {
        self.invoice.notes.push(Note {
            content: note.into(),
            subject_code: Some(subject.into()),
        });
        self
    }

    pub fn buyer_reference(mut self, reference: impl Into<String>) -> Self {
        self.invoice.buyer_reference = Some(reference.into());
        self
    }

    pub fn order_reference(mut self, reference: impl Into<String>) -> Self {
        self.invoice.buyer_order_reference = Some(reference.into());
        self
    }

    pub fn seller_order_reference(mut self, reference: impl Into<String>) -> Self {
        self.invoice.seller_order_reference = Some(reference.into());
        self
    }

    pub fn contract_reference(mut self, reference: impl Into<String>) -> Self {
        self.invoice.contract_reference = Some(reference.into());
        self
    }

    pub fn project_reference(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.invoice.project_reference = Some(ProjectReference {
            id: id.into(),
            name: name.into(),
        });
        self
    }

    pub fn despatch_advice_reference(mut self, reference: impl Into<String>) -> Self {
        self.invoice.despatch_advice_reference = Some(reference.into());
        self
    }

    pub fn receiving_advice_reference(mut self, reference: impl Into<String>) -> Self {
        self.invoice.receiving_advice_reference = Some(reference.into());
        self
    }

    pub fn buyer_accounting_reference(mut self, reference: impl Into<String>) -> Self {
        self.invoice.buyer_accounting_reference = Some(reference.into());
        self
    }

    pub fn preceding_invoice(mut self, id: impl Into<String>, issue_date: Option<NaiveDate>) -> Self {
        self.invoice.preceding_invoices.push(PrecedingInvoice {
            id: id.into(),
            issue_date,
        });
        self
    }

    pub fn supporting_document(mut self, document: SupportingDocument) -> Self {
        self.invoice.supporting_documents.push(document);
        self
    }

    pub fn seller(mut self, party: Party) -> Self {
        self.invoice.seller = party;
        self
    }

    pub fn buyer(mut self, party: Party) -> Self {
        self.invoice.buyer = party;
        self
    }

    pub fn payee(mut self, party: Party) -> Self {
        self.invoice.payee = Some(party);
        self
    }

    pub fn tax_representative(mut self, party: Party) -> Self {
        self.invoice.tax_representative = Some(party);
        self
    }

    pub fn ship_to(mut self, party: Party) -> Self {
        self.invoice.ship_to = Some(party);
        self
    }

    pub fn delivery_date(mut self, date: NaiveDate) -> Self {
        self.invoice.actual_delivery_date = Some(date);
        self
    }

    pub fn billing_period(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.invoice.billing_period = Some(Period {
            start: Some(start),
            end: Some(end),
        });
        self
    }

    pub fn add_line(mut self, line: InvoiceLine) -> Self {
        self.invoice.lines.push(line);
        self
    }

    pub fn add_allowance(mut self, allowance: AllowanceCharge) -> Self {
        self.invoice.allowances_charges.push(AllowanceCharge {
            is_charge: false,
            ..allowance
        });
        self
    }

    pub fn add_charge(mut self, charge: AllowanceCharge) -> Self {
        self.invoice.allowances_charges.push(AllowanceCharge {
            is_charge: true,
            ..charge
        });
        self
    }

    /// VAT point date (BT-7), kept on every VAT breakdown entry.
    pub fn tax_point_date(mut self, date: NaiveDate) -> Self {
        self.invoice.trade_taxes = vec![TradeTax {
            tax_point_date: Some(date),
            ..TradeTax::default()
        }];
        self
    }

    pub fn payment_means(mut self, means: PaymentMeans) -> Self {
        self.invoice.payment_means.push(means);
        self
    }

    pub fn payment_terms(mut self, description: impl Into<String>) -> Self {
        self.terms().description = Some(description.into());
        self
    }

    pub fn due_date(mut self, date: NaiveDate) -> Self {
        self.terms().due_date = Some(date);
        self
    }

    pub fn payment_reference(mut self, reference: impl Into<String>) -> Self {
        self.invoice.payment_reference = Some(reference.into());
        self
    }

    /// Mandate reference (BT-89) and creditor identifier (BT-90) for direct debit.
    pub fn direct_debit(mut self, mandate_id: impl Into<String>, creditor_id: impl Into<String>) -> Self {
        self.invoice.direct_debit_mandate_id = Some(mandate_id.into());
        self.invoice.creditor_reference_id = Some(creditor_id.into());
        self
    }

    pub fn prepaid(mut self, amount: Decimal) -> Self {
        self.invoice.totals.prepaid = Some(amount);
        self
    }

    pub fn rounding(mut self, amount: Decimal) -> Self {
        self.invoice.totals.rounding = Some(amount);
        self
    }

    /// Exemption text used for exempt-like categories without their own reason.
    pub fn default_exemption_reason(mut self, reason: impl Into<String>) -> Self {
        self.default_exemption_reason = Some(reason.into());
        self
    }

    fn terms(&mut self) -> &mut PaymentTerms {
        if self.invoice.payment_terms.is_empty() {
            self.invoice.payment_terms.push(PaymentTerms::default());
        }
        let last = self.invoice.payment_terms.len() - 1;
        &mut self.invoice.payment_terms[last]
    }

    /// Build the invoice and run the calculator.
    pub fn build(self) -> Invoice {
        let mut invoice = self.invoice;
        let tax_point = invoice.trade_taxes.first().and_then(|t| t.tax_point_date);
        let violations =
            calculation::calculate(&mut invoice, self.default_exemption_reason.as_deref());
        for violation in &violations {
            tracing::warn!(%violation, "calculation check");
        }
        if let Some(date) = tax_point {
            for tt in &mut invoice.trade_taxes {
                tt.tax_point_date.get_or_insert(date);
            }
        }
        invoice
    }

    /// Build, calculate and validate. Returns every violation on failure.
    pub fn build_validated(self) -> Result<Invoice, InvoiceError> {
        let invoice = self.build();
        validation::validate(&invoice).into_result()?;
        Ok(invoice)
    }
}

/// Builder for trade parties.
pub struct PartyBuilder {
    party: Party,
}

impl PartyBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            party: Party {
                name: name.into(),
                ..Party::default()
            },
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.party.ids.push(id.into());
        self
    }

    pub fn global_id(mut self, value: impl Into<String>, scheme: impl Into<String>) -> Self {
        self.party.global_ids.push(Identifier::new(value, scheme));
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.party.description = Some(description.into());
        self
    }

    /// Legal registration identifier (BT-30 / BT-47), optionally with an ICD scheme.
    pub fn legal_id(mut self, id: impl Into<String>, scheme: Option<&str>) -> Self {
        let org = self.party.legal_organization.get_or_insert_with(LegalOrganization::default);
        org.id = Some(id.into());
        org.scheme = scheme.map(str::to_owned);
        self
    }

    pub fn trading_name(mut self, name: impl Into<String>) -> Self {
        self.party
            .legal_organization
            .get_or_insert_with(LegalOrganization::default)
            .trading_name = Some(name.into());
        self
    }

    pub fn address(mut self, address: PostalAddress) -> Self {
        self.party.postal_address = Some(address);
        self
    }

    pub fn vat_id(mut self, id: impl Into<String>) -> Self {
        self.party.vat_id = Some(id.into());
        self
    }

    pub fn tax_registration_id(mut self, id: impl Into<String>) -> Self {
        self.party.tax_registration_id = Some(id.into());
        self
    }

    pub fn contact(mut self, contact: Contact) -> Self {
        self.party.contacts.push(contact);
        self
    }

    pub fn electronic_address(mut self, scheme: impl Into<String>, value: impl Into<String>) -> Self {
        self.party.electronic_address = Some(ElectronicAddress {
            scheme: scheme.into(),
            value: value.into(),
        });
        self
    }

    pub fn build(self) -> Party {
        self.party
    }
}

/// Builder for postal addresses.
pub struct AddressBuilder {
    address: PostalAddress,
}

impl AddressBuilder {
    pub fn new(country_code: impl Into<String>) -> Self {
        Self {
            address: PostalAddress {
                country_code: country_code.into(),
                ..PostalAddress::default()
            },
        }
    }

    pub fn street(mut self, street: impl Into<String>) -> Self {
        self.address.line1 = Some(street.into());
        self
    }

    pub fn additional(mut self, line: impl Into<String>) -> Self {
        self.address.line2 = Some(line.into());
        self
    }

    pub fn line3(mut self, line: impl Into<String>) -> Self {
        self.address.line3 = Some(line.into());
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.address.city = Some(city.into());
        self
    }

    pub fn postcode(mut self, postcode: impl Into<String>) -> Self {
        self.address.postcode = Some(postcode.into());
        self
    }

    pub fn subdivision(mut self, subdivision: impl Into<String>) -> Self {
        self.address.subdivision = Some(subdivision.into());
        self
    }

    pub fn build(self) -> PostalAddress {
        self.address
    }
}

impl Contact {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Builder for invoice lines.
pub struct LineBuilder {
    line: InvoiceLine,
}

impl LineBuilder {
    pub fn new(
        id: impl Into<String>,
        item_name: impl Into<String>,
        quantity: Decimal,
        unit_code: impl Into<String>,
        net_price: Decimal,
    ) -> Self {
        Self {
            line: InvoiceLine {
                id: id.into(),
                billed_quantity: quantity,
                unit_code: unit_code.into(),
                net_price,
                product: Product {
                    name: item_name.into(),
                    ..Product::default()
                },
                ..InvoiceLine::default()
            },
        }
    }

    pub fn tax(mut self, category: TaxCategory, rate: Decimal) -> Self {
        self.line.tax_category = Some(category);
        self.line.tax_rate = Some(rate);
        self
    }

    /// Mark the line as not subject to VAT (category O, no rate).
    pub fn not_subject_to_vat(mut self) -> Self {
        self.line.tax_category = Some(TaxCategory::NotSubjectToVat);
        self.line.tax_rate = None;
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.line.note = Some(note.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.line.product.description = Some(description.into());
        self
    }

    pub fn seller_item_id(mut self, id: impl Into<String>) -> Self {
        self.line.product.seller_assigned_id = Some(id.into());
        self
    }

    pub fn buyer_item_id(mut self, id: impl Into<String>) -> Self {
        self.line.product.buyer_assigned_id = Some(id.into());
        self
    }

    pub fn standard_item_id(mut self, id: impl Into<String>, scheme: impl Into<String>) -> Self {
        self.line.product.global_id = Some(Identifier::new(id, scheme));
        self
    }

    pub fn characteristic(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.line.product.characteristics.push(Characteristic {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn classification(mut self, code: impl Into<String>, list_id: impl Into<String>) -> Self {
        self.line.product.classifications.push(Classification {
            code: code.into(),
            list_id: Some(list_id.into()),
            list_version: None,
        });
        self
    }

    pub fn origin_country(mut self, country: impl Into<String>) -> Self {
        self.line.product.origin_country = Some(country.into());
        self
    }

    pub fn gross_price(mut self, price: Decimal) -> Self {
        self.line.gross_price = Some(price);
        self
    }

    /// Discount applied to the gross price (BT-147).
    pub fn price_discount(mut self, amount: Decimal) -> Self {
        self.line.price_allowances_charges.push(AllowanceCharge {
            amount,
            ..AllowanceCharge::default()
        });
        self
    }

    pub fn basis_quantity(mut self, quantity: Decimal) -> Self {
        self.line.basis_quantity = Some(quantity);
        self
    }

    pub fn period(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.line.period = Some(Period {
            start: Some(start),
            end: Some(end),
        });
        self
    }

    pub fn allowance(mut self, amount: Decimal, reason: impl Into<String>) -> Self {
        self.line.allowances_charges.push(AllowanceCharge {
            amount,
            reason: Some(reason.into()),
            ..AllowanceCharge::default()
        });
        self
    }

    pub fn charge(mut self, amount: Decimal, reason: impl Into<String>) -> Self {
        self.line.allowances_charges.push(AllowanceCharge {
            is_charge: true,
            amount,
            reason: Some(reason.into()),
            ..AllowanceCharge::default()
        });
        self
    }

    pub fn buyer_order_line_id(mut self, id: impl Into<String>) -> Self {
        self.line.buyer_order_line_id = Some(id.into());
        self
    }

    pub fn accounting_reference(mut self, reference: impl Into<String>) -> Self {
        self.line.accounting_reference = Some(reference.into());
        self
    }

    /// Build the line with its net amount (BT-131) already calculated.
    pub fn build(self) -> InvoiceLine {
        let mut line = self.line;
        line.line_total = calculation::line_total(&line);
        line
    }
}

/// Builder for document-level allowances and charges.
pub struct AllowanceChargeBuilder {
    ac: AllowanceCharge,
}

impl AllowanceChargeBuilder {
    pub fn allowance(amount: Decimal) -> Self {
        Self {
            ac: AllowanceCharge {
                is_charge: false,
                amount,
                ..AllowanceCharge::default()
            },
        }
    }

    pub fn charge(amount: Decimal) -> Self {
        Self {
            ac: AllowanceCharge {
                is_charge: true,
                amount,
                ..AllowanceCharge::default()
            },
        }
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.ac.reason = Some(reason.into());
        self
    }

    pub fn reason_code(mut self, code: impl Into<String>) -> Self {
        self.ac.reason_code = Some(code.into());
        self
    }

    pub fn tax(mut self, category: TaxCategory, rate: Decimal) -> Self {
        self.ac.tax_category = Some(category);
        self.ac.tax_rate = Some(rate);
        self
    }

    /// VAT category without a rate, for category O.
    pub fn tax_category(mut self, category: TaxCategory) -> Self {
        self.ac.tax_category = Some(category);
        self.ac.tax_rate = None;
        self
    }

    /// Percentage-based amount: records base and percentage next to the amount.
    pub fn percentage(mut self, basis: Decimal, percent: Decimal) -> Self {
        self.ac.basis_amount = Some(basis);
        self.ac.percent = Some(percent);
        self
    }

    pub fn build(self) -> AllowanceCharge {
        self.ac
    }
}

impl PaymentMeans {
    /// SEPA credit transfer (58) to `iban`.
    pub fn sepa_credit_transfer(iban: impl Into<String>) -> Self {
        Self::credit_transfer(PaymentMeansCode::SepaCreditTransfer, iban)
    }

    /// Credit transfer with an explicit code (30 or 58) to `iban`.
    pub fn credit_transfer(code: PaymentMeansCode, iban: impl Into<String>) -> Self {
        Self {
            type_code: Some(code),
            payee_account: Some(PayeeAccount {
                iban: Some(iban.into()),
                ..PayeeAccount::default()
            }),
            ..Self::default()
        }
    }

    /// SEPA direct debit (59) from `payer_iban`.
    pub fn sepa_direct_debit(payer_iban: impl Into<String>) -> Self {
        Self {
            type_code: Some(PaymentMeansCode::SepaDirectDebit),
            payer_iban: Some(payer_iban.into()),
            ..Self::default()
        }
    }

    /// Card payment (48, 54 or 55) with the trailing digits of the card.
    pub fn card(code: PaymentMeansCode, card_id: impl Into<String>) -> Self {
        Self {
            type_code: Some(code),
            card: Some(FinancialCard {
                id: card_id.into(),
                cardholder: None,
            }),
            ..Self::default()
        }
    }

    pub fn with_bic(mut self, bic: impl Into<String>) -> Self {
        self.payee_bic = Some(bic.into());
        self
    }

    pub fn with_account_name(mut self, name: impl Into<String>) -> Self {
        if let Some(account) = self.payee_account.as_mut() {
            account.name = Some(name.into());
        }
        self
    }
}

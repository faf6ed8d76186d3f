use std::io::Write;

use base64::{Engine as _, engine::general_purpose};
use rust_decimal::Decimal;

use super::ns;
use super::xml_utils::{XmlWriter, format_price, format_rate};
use crate::core::*;

/// Output syntax for [`write_invoice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Syntax {
    /// UN/CEFACT Cross Industry Invoice.
    Cii,
    /// OASIS UBL 2.1. Not supported for output.
    Ubl,
}

/// Write `invoice` in the requested syntax.
pub fn write_invoice<W: Write>(invoice: &Invoice, syntax: Syntax, out: W) -> Result<(), InvoiceError> {
    match syntax {
        Syntax::Cii => write_cii(invoice, out),
        Syntax::Ubl => Err(InvoiceError::Write("UBL output is not supported".into())),
    }
}

/// Write `invoice` as CII XML.
///
/// The invoice is written as is: run the calculator first if totals and
/// the VAT breakdown are not filled in. Elements outside the invoice
/// profile are left out; an unknown profile is written as EN 16931.
#[tracing::instrument(skip_all, fields(number = %invoice.number))]
pub fn write_cii<W: Write>(invoice: &Invoice, out: W) -> Result<(), InvoiceError> {
    let level = match invoice.profile().level() {
        level::UNKNOWN => level::EN16931,
        l => l,
    };
    tracing::debug!(level, "writing CII");

    let mut writer = CiiWriter {
        w: XmlWriter::new(out)?,
        inv: invoice,
        level,
    };
    writer.document()?;
    writer.w.into_inner().flush()?;
    Ok(())
}

/// Write `invoice` as a CII XML string.
pub fn to_cii_xml(invoice: &Invoice) -> Result<String, InvoiceError> {
    let mut buf = Vec::new();
    write_cii(invoice, &mut buf)?;
    String::from_utf8(buf).map_err(|e| InvoiceError::Write(format!("XML UTF-8 error: {e}")))
}

struct CiiWriter<'a, W: Write> {
    w: XmlWriter<W>,
    inv: &'a Invoice,
    level: u8,
}

impl<W: Write> CiiWriter<'_, W> {
    fn at(&self, min: u8) -> bool {
        self.level >= min
    }

    fn document(&mut self) -> Result<(), InvoiceError> {
        let inv = self.inv;
        self.w.start_element_with_attrs(
            "rsm:CrossIndustryInvoice",
            &[
                ("xmlns:rsm", ns::RSM),
                ("xmlns:qdt", ns::QDT),
                ("xmlns:ram", ns::RAM),
                ("xmlns:udt", ns::UDT),
            ],
        )?;

        // --- ExchangedDocumentContext ---
        self.w.start_element("rsm:ExchangedDocumentContext")?;
        self.w.wrapped_element(
            "ram:BusinessProcessSpecifiedDocumentContextParameter",
            "ram:ID",
            inv.business_process.as_deref(),
        )?;
        self.w.wrapped_element(
            "ram:GuidelineSpecifiedDocumentContextParameter",
            "ram:ID",
            Some(inv.specification_id.as_str()),
        )?;
        self.w.end_element("rsm:ExchangedDocumentContext")?;

        // --- ExchangedDocument ---
        self.w.start_element("rsm:ExchangedDocument")?;
        self.w.text_element("ram:ID", &inv.number)?;
        if let Some(code) = inv.type_code {
            self.w.text_element("ram:TypeCode", &code.code().to_string())?;
        }
        if let Some(date) = inv.issue_date {
            self.w.date_element("ram:IssueDateTime", "udt:DateTimeString", date)?;
        }
        if self.at(level::BASIC_WL) {
            for note in inv.notes.iter().filter(|n| !n.content.trim().is_empty()) {
                self.w.start_element("ram:IncludedNote")?;
                self.w.text_element("ram:Content", &note.content)?;
                self.w.opt_element("ram:SubjectCode", note.subject_code.as_deref())?;
                self.w.end_element("ram:IncludedNote")?;
            }
        }
        self.w.end_element("rsm:ExchangedDocument")?;

        // --- SupplyChainTradeTransaction ---
        self.w.start_element("rsm:SupplyChainTradeTransaction")?;
        if self.at(level::BASIC) {
            for line in &inv.lines {
                self.line(line)?;
            }
        }
        self.agreement()?;
        self.delivery()?;
        self.settlement()?;
        self.w.end_element("rsm:SupplyChainTradeTransaction")?;

        self.w.end_element("rsm:CrossIndustryInvoice")?;
        Ok(())
    }

    fn line(&mut self, line: &InvoiceLine) -> Result<(), InvoiceError> {
        let detailed = self.at(level::EN16931);
        self.w.start_element("ram:IncludedSupplyChainTradeLineItem")?;

        self.w.start_element("ram:AssociatedDocumentLineDocument")?;
        self.w.text_element("ram:LineID", &line.id)?;
        self.w
            .wrapped_element("ram:IncludedNote", "ram:Content", line.note.as_deref())?;
        self.w.end_element("ram:AssociatedDocumentLineDocument")?;

        // Product
        let product = &line.product;
        self.w.start_element("ram:SpecifiedTradeProduct")?;
        if let Some(id) = &product.global_id {
            self.identifier("ram:GlobalID", id)?;
        }
        if detailed {
            self.w
                .opt_element("ram:SellerAssignedID", product.seller_assigned_id.as_deref())?;
            self.w
                .opt_element("ram:BuyerAssignedID", product.buyer_assigned_id.as_deref())?;
        }
        self.w.text_element("ram:Name", &product.name)?;
        if detailed {
            self.w.opt_element("ram:Description", product.description.as_deref())?;
            for c in &product.characteristics {
                self.w.start_element("ram:ApplicableProductCharacteristic")?;
                self.w.text_element("ram:Description", &c.name)?;
                self.w.text_element("ram:Value", &c.value)?;
                self.w.end_element("ram:ApplicableProductCharacteristic")?;
            }
            for c in &product.classifications {
                self.w.start_element("ram:DesignatedProductClassification")?;
                self.w.text_element_with_attrs(
                    "ram:ClassCode",
                    &c.code,
                    &[
                        ("listID", c.list_id.as_deref().unwrap_or_default()),
                        ("listVersionID", c.list_version.as_deref().unwrap_or_default()),
                    ],
                )?;
                self.w.end_element("ram:DesignatedProductClassification")?;
            }
            self.w
                .wrapped_element("ram:OriginTradeCountry", "ram:ID", product.origin_country.as_deref())?;
        }
        self.w.end_element("ram:SpecifiedTradeProduct")?;

        // Agreement: prices
        self.w.start_element("ram:SpecifiedLineTradeAgreement")?;
        if detailed {
            self.w.wrapped_element(
                "ram:BuyerOrderReferencedDocument",
                "ram:LineID",
                line.buyer_order_line_id.as_deref(),
            )?;
        }
        if let Some(gross) = line.gross_price {
            self.w.start_element("ram:GrossPriceProductTradePrice")?;
            self.w.text_element("ram:ChargeAmount", &format_price(gross))?;
            for ac in &line.price_allowances_charges {
                self.w.start_element("ram:AppliedTradeAllowanceCharge")?;
                self.indicator(ac.is_charge)?;
                self.w.text_element("ram:ActualAmount", &format_price(ac.amount))?;
                self.w.end_element("ram:AppliedTradeAllowanceCharge")?;
            }
            self.w.end_element("ram:GrossPriceProductTradePrice")?;
        }
        self.w.start_element("ram:NetPriceProductTradePrice")?;
        self.w.text_element("ram:ChargeAmount", &format_price(line.net_price))?;
        if let Some(basis) = line.basis_quantity {
            self.w.quantity_element("ram:BasisQuantity", basis, &line.unit_code)?;
        }
        self.w.end_element("ram:NetPriceProductTradePrice")?;
        self.w.end_element("ram:SpecifiedLineTradeAgreement")?;

        // Delivery: quantity
        self.w.start_element("ram:SpecifiedLineTradeDelivery")?;
        self.w
            .quantity_element("ram:BilledQuantity", line.billed_quantity, &line.unit_code)?;
        self.w.end_element("ram:SpecifiedLineTradeDelivery")?;

        // Settlement: tax, period, allowances, total
        self.w.start_element("ram:SpecifiedLineTradeSettlement")?;
        if line.tax_category.is_some() || line.tax_rate.is_some() {
            self.w.start_element("ram:ApplicableTradeTax")?;
            self.w.text_element("ram:TypeCode", "VAT")?;
            self.w
                .opt_element("ram:CategoryCode", line.tax_category.map(|c| c.code()))?;
            if let Some(rate) = line.tax_rate {
                self.w.text_element("ram:RateApplicablePercent", &format_rate(rate))?;
            }
            self.w.end_element("ram:ApplicableTradeTax")?;
        }
        if let Some(period) = &line.period {
            self.period(period)?;
        }
        for ac in &line.allowances_charges {
            self.allowance_charge(ac, false)?;
        }
        self.w.start_element("ram:SpecifiedTradeSettlementLineMonetarySummation")?;
        self.w.amount_element("ram:LineTotalAmount", line.line_total, None)?;
        self.w.end_element("ram:SpecifiedTradeSettlementLineMonetarySummation")?;
        if detailed {
            self.w.wrapped_element(
                "ram:ReceivableSpecifiedTradeAccountingAccount",
                "ram:ID",
                line.accounting_reference.as_deref(),
            )?;
        }
        self.w.end_element("ram:SpecifiedLineTradeSettlement")?;

        self.w.end_element("ram:IncludedSupplyChainTradeLineItem")?;
        Ok(())
    }

    fn agreement(&mut self) -> Result<(), InvoiceError> {
        let inv = self.inv;
        self.w.start_element("ram:ApplicableHeaderTradeAgreement")?;
        self.w.opt_element("ram:BuyerReference", inv.buyer_reference.as_deref())?;
        self.party("ram:SellerTradeParty", &inv.seller, true)?;
        self.party("ram:BuyerTradeParty", &inv.buyer, false)?;

        if self.at(level::BASIC_WL) {
            if let Some(rep) = &inv.tax_representative {
                self.party("ram:SellerTaxRepresentativeTradeParty", rep, false)?;
            }
            self.w.wrapped_element(
                "ram:SellerOrderReferencedDocument",
                "ram:IssuerAssignedID",
                inv.seller_order_reference.as_deref(),
            )?;
        }
        self.w.wrapped_element(
            "ram:BuyerOrderReferencedDocument",
            "ram:IssuerAssignedID",
            inv.buyer_order_reference.as_deref(),
        )?;
        if self.at(level::BASIC_WL) {
            self.w.wrapped_element(
                "ram:ContractReferencedDocument",
                "ram:IssuerAssignedID",
                inv.contract_reference.as_deref(),
            )?;
        }
        if self.at(level::EN16931) {
            for doc in &inv.supporting_documents {
                self.supporting_document(doc)?;
            }
            if let Some(project) = &inv.project_reference {
                self.w.start_element("ram:SpecifiedProcuringProject")?;
                self.w.text_element("ram:ID", &project.id)?;
                self.w.text_element("ram:Name", &project.name)?;
                self.w.end_element("ram:SpecifiedProcuringProject")?;
            }
        }
        self.w.end_element("ram:ApplicableHeaderTradeAgreement")?;
        Ok(())
    }

    fn supporting_document(&mut self, doc: &SupportingDocument) -> Result<(), InvoiceError> {
        self.w.start_element("ram:AdditionalReferencedDocument")?;
        self.w.text_element("ram:IssuerAssignedID", &doc.id)?;
        self.w.opt_element("ram:URIID", doc.uri.as_deref())?;
        self.w.text_element(
            "ram:TypeCode",
            doc.type_code.as_deref().unwrap_or(SUPPORTING_DOCUMENT),
        )?;
        self.w.opt_element("ram:Name", doc.description.as_deref())?;
        if let Some(attachment) = doc.attachment.as_ref().filter(|a| !a.content.is_empty()) {
            self.w.text_element_with_attrs(
                "ram:AttachmentBinaryObject",
                &general_purpose::STANDARD.encode(&attachment.content),
                &[
                    ("mimeCode", &attachment.mime_code),
                    ("filename", &attachment.filename),
                ],
            )?;
        }
        self.w.end_element("ram:AdditionalReferencedDocument")?;
        Ok(())
    }

    /// Trade party. Below BASIC WL only the name, legal and tax
    /// identifiers and (for the seller) the country are carried.
    fn party(&mut self, tag: &str, party: &Party, seller: bool) -> Result<(), InvoiceError> {
        let full = self.at(level::BASIC_WL);
        let detailed = self.at(level::EN16931);

        self.w.start_element(tag)?;
        if full {
            for id in &party.ids {
                self.w.text_element("ram:ID", id)?;
            }
            for id in &party.global_ids {
                self.identifier("ram:GlobalID", id)?;
            }
        }
        self.w.text_element("ram:Name", &party.name)?;
        if detailed {
            self.w.opt_element("ram:Description", party.description.as_deref())?;
        }

        if let Some(org) = &party.legal_organization {
            let trading_name = org.trading_name.as_deref().filter(|_| detailed);
            if party.legal_id().is_some() || trading_name.is_some_and(|n| !n.trim().is_empty()) {
                self.w.start_element("ram:SpecifiedLegalOrganization")?;
                if let Some(id) = party.legal_id() {
                    self.w.text_element_with_attrs(
                        "ram:ID",
                        id,
                        &[("schemeID", org.scheme.as_deref().unwrap_or_default())],
                    )?;
                }
                self.w.opt_element("ram:TradingBusinessName", trading_name)?;
                self.w.end_element("ram:SpecifiedLegalOrganization")?;
            }
        }

        if detailed {
            for contact in &party.contacts {
                self.contact(contact)?;
            }
        }

        if let Some(address) = &party.postal_address {
            if full {
                self.address(address)?;
            } else if seller && !address.country_code.trim().is_empty() {
                self.w.start_element("ram:PostalTradeAddress")?;
                self.w.text_element("ram:CountryID", &address.country_code)?;
                self.w.end_element("ram:PostalTradeAddress")?;
            }
        }

        if full {
            if let Some(ea) = party.electronic_address.as_ref().filter(|ea| !ea.value.trim().is_empty()) {
                self.w.start_element("ram:URIUniversalCommunication")?;
                self.w
                    .text_element_with_attrs("ram:URIID", &ea.value, &[("schemeID", &ea.scheme)])?;
                self.w.end_element("ram:URIUniversalCommunication")?;
            }
        }

        // Tax registrations come last in a TradeParty.
        for (id, scheme) in [(&party.vat_id, "VA"), (&party.tax_registration_id, "FC")] {
            if let Some(id) = id.as_deref().filter(|id| !id.trim().is_empty()) {
                self.w.start_element("ram:SpecifiedTaxRegistration")?;
                self.w.text_element_with_attrs("ram:ID", id, &[("schemeID", scheme)])?;
                self.w.end_element("ram:SpecifiedTaxRegistration")?;
            }
        }
        self.w.end_element(tag)?;
        Ok(())
    }

    fn contact(&mut self, contact: &Contact) -> Result<(), InvoiceError> {
        let department = contact.department.as_deref().filter(|_| self.at(level::EXTENDED));
        let fields = [
            contact.name.as_deref(),
            department,
            contact.phone.as_deref(),
            contact.email.as_deref(),
        ];
        if fields.iter().flatten().all(|f| f.trim().is_empty()) {
            return Ok(());
        }
        self.w.start_element("ram:DefinedTradeContact")?;
        self.w.opt_element("ram:PersonName", contact.name.as_deref())?;
        self.w.opt_element("ram:DepartmentName", department)?;
        self.w.wrapped_element(
            "ram:TelephoneUniversalCommunication",
            "ram:CompleteNumber",
            contact.phone.as_deref(),
        )?;
        self.w.wrapped_element(
            "ram:EmailURIUniversalCommunication",
            "ram:URIID",
            contact.email.as_deref(),
        )?;
        self.w.end_element("ram:DefinedTradeContact")?;
        Ok(())
    }

    fn address(&mut self, a: &PostalAddress) -> Result<(), InvoiceError> {
        let parts = [
            a.postcode.as_deref(),
            a.line1.as_deref(),
            a.line2.as_deref(),
            a.line3.as_deref(),
            a.city.as_deref(),
            Some(a.country_code.as_str()),
            a.subdivision.as_deref(),
        ];
        if parts.iter().flatten().all(|p| p.trim().is_empty()) {
            return Ok(());
        }
        self.w.start_element("ram:PostalTradeAddress")?;
        self.w.opt_element("ram:PostcodeCode", a.postcode.as_deref())?;
        self.w.opt_element("ram:LineOne", a.line1.as_deref())?;
        self.w.opt_element("ram:LineTwo", a.line2.as_deref())?;
        self.w.opt_element("ram:LineThree", a.line3.as_deref())?;
        self.w.opt_element("ram:CityName", a.city.as_deref())?;
        self.w.text_element("ram:CountryID", &a.country_code)?;
        self.w
            .opt_element("ram:CountrySubDivisionName", a.subdivision.as_deref())?;
        self.w.end_element("ram:PostalTradeAddress")?;
        Ok(())
    }

    fn delivery(&mut self) -> Result<(), InvoiceError> {
        let inv = self.inv;
        self.w.start_element("ram:ApplicableHeaderTradeDelivery")?;
        if self.at(level::BASIC_WL) {
            if let Some(ship_to) = &inv.ship_to {
                self.party("ram:ShipToTradeParty", ship_to, false)?;
            }
            if let Some(date) = inv.actual_delivery_date {
                self.w.start_element("ram:ActualDeliverySupplyChainEvent")?;
                self.w
                    .date_element("ram:OccurrenceDateTime", "udt:DateTimeString", date)?;
                self.w.end_element("ram:ActualDeliverySupplyChainEvent")?;
            }
            self.w.wrapped_element(
                "ram:DespatchAdviceReferencedDocument",
                "ram:IssuerAssignedID",
                inv.despatch_advice_reference.as_deref(),
            )?;
            self.w.wrapped_element(
                "ram:ReceivingAdviceReferencedDocument",
                "ram:IssuerAssignedID",
                inv.receiving_advice_reference.as_deref(),
            )?;
        }
        self.w.end_element("ram:ApplicableHeaderTradeDelivery")?;
        Ok(())
    }

    fn settlement(&mut self) -> Result<(), InvoiceError> {
        let inv = self.inv;
        let full = self.at(level::BASIC_WL);
        self.w.start_element("ram:ApplicableHeaderTradeSettlement")?;
        if full {
            self.w
                .opt_element("ram:CreditorReferenceID", inv.creditor_reference_id.as_deref())?;
            self.w
                .opt_element("ram:PaymentReference", inv.payment_reference.as_deref())?;
            self.w.opt_element("ram:TaxCurrencyCode", inv.tax_currency.as_deref())?;
        }
        self.w.text_element("ram:InvoiceCurrencyCode", &inv.currency)?;

        if full {
            if let Some(payee) = &inv.payee {
                self.party("ram:PayeeTradeParty", payee, false)?;
            }
            for means in &inv.payment_means {
                self.payment_means(means)?;
            }
            for tax in &inv.trade_taxes {
                self.trade_tax(tax)?;
            }
            if let Some(period) = &inv.billing_period {
                self.period(period)?;
            }
            for ac in &inv.allowances_charges {
                self.allowance_charge(ac, true)?;
            }
            self.payment_terms()?;
        }

        self.totals()?;

        if full {
            for preceding in &inv.preceding_invoices {
                self.w.start_element("ram:InvoiceReferencedDocument")?;
                self.w.text_element("ram:IssuerAssignedID", &preceding.id)?;
                if let Some(date) = preceding.issue_date {
                    self.w
                        .date_element("ram:FormattedIssueDateTime", "qdt:DateTimeString", date)?;
                }
                self.w.end_element("ram:InvoiceReferencedDocument")?;
            }
            self.w.wrapped_element(
                "ram:ReceivableSpecifiedTradeAccountingAccount",
                "ram:ID",
                inv.buyer_accounting_reference.as_deref(),
            )?;
        }
        self.w.end_element("ram:ApplicableHeaderTradeSettlement")?;
        Ok(())
    }

    fn payment_means(&mut self, means: &PaymentMeans) -> Result<(), InvoiceError> {
        let detailed = self.at(level::EN16931);
        self.w.start_element("ram:SpecifiedTradeSettlementPaymentMeans")?;
        if let Some(code) = means.type_code {
            self.w.text_element("ram:TypeCode", &code.code().to_string())?;
        }
        if detailed {
            self.w.opt_element("ram:Information", means.information.as_deref())?;
            if let Some(card) = &means.card {
                self.w.start_element("ram:ApplicableTradeSettlementFinancialCard")?;
                self.w.text_element("ram:ID", &card.id)?;
                self.w.opt_element("ram:CardholderName", card.cardholder.as_deref())?;
                self.w.end_element("ram:ApplicableTradeSettlementFinancialCard")?;
            }
        }
        self.w.wrapped_element(
            "ram:PayerPartyDebtorFinancialAccount",
            "ram:IBANID",
            means.payer_iban.as_deref(),
        )?;
        if let Some(account) = means.payee_account.as_ref().filter(|a| a.has_identifier()) {
            self.w.start_element("ram:PayeePartyCreditorFinancialAccount")?;
            self.w.opt_element("ram:IBANID", account.iban.as_deref())?;
            if detailed {
                self.w.opt_element("ram:AccountName", account.name.as_deref())?;
            }
            self.w
                .opt_element("ram:ProprietaryID", account.proprietary_id.as_deref())?;
            self.w.end_element("ram:PayeePartyCreditorFinancialAccount")?;
        }
        if detailed {
            self.w.wrapped_element(
                "ram:PayeeSpecifiedCreditorFinancialInstitution",
                "ram:BICID",
                means.payee_bic.as_deref(),
            )?;
        }
        self.w.end_element("ram:SpecifiedTradeSettlementPaymentMeans")?;
        Ok(())
    }

    fn trade_tax(&mut self, tax: &TradeTax) -> Result<(), InvoiceError> {
        self.w.start_element("ram:ApplicableTradeTax")?;
        self.w
            .amount_element("ram:CalculatedAmount", tax.calculated_amount, None)?;
        self.w.text_element(
            "ram:TypeCode",
            if tax.type_code.is_empty() { "VAT" } else { &tax.type_code },
        )?;
        self.w.opt_element("ram:ExemptionReason", tax.exemption_reason.as_deref())?;
        self.w.amount_element("ram:BasisAmount", tax.basis_amount, None)?;
        self.w.opt_element("ram:CategoryCode", tax.category.map(|c| c.code()))?;
        self.w
            .opt_element("ram:ExemptionReasonCode", tax.exemption_reason_code.as_deref())?;
        if let Some(date) = tax.tax_point_date {
            self.w.date_element("ram:TaxPointDate", "udt:DateString", date)?;
        }
        self.w
            .opt_element("ram:DueDateTypeCode", tax.due_date_type_code.as_deref())?;
        if let Some(rate) = tax.rate {
            self.w.text_element("ram:RateApplicablePercent", &format_rate(rate))?;
        }
        self.w.end_element("ram:ApplicableTradeTax")?;
        Ok(())
    }

    fn payment_terms(&mut self) -> Result<(), InvoiceError> {
        let inv = self.inv;
        let mut mandate = inv
            .direct_debit_mandate_id
            .as_deref()
            .filter(|m| !m.trim().is_empty());
        for terms in &inv.payment_terms {
            if terms.description.is_none() && terms.due_date.is_none() && mandate.is_none() {
                continue;
            }
            self.w.start_element("ram:SpecifiedTradePaymentTerms")?;
            self.w.opt_element("ram:Description", terms.description.as_deref())?;
            if let Some(date) = terms.due_date {
                self.w
                    .date_element("ram:DueDateDateTime", "udt:DateTimeString", date)?;
            }
            self.w.opt_element("ram:DirectDebitMandateID", mandate.take())?;
            self.w.end_element("ram:SpecifiedTradePaymentTerms")?;
        }
        if let Some(mandate) = mandate {
            self.w.wrapped_element(
                "ram:SpecifiedTradePaymentTerms",
                "ram:DirectDebitMandateID",
                Some(mandate),
            )?;
        }
        Ok(())
    }

    fn totals(&mut self) -> Result<(), InvoiceError> {
        let inv = self.inv;
        let t = &inv.totals;
        let full = self.at(level::BASIC_WL);
        let currency = Some(inv.currency.as_str()).filter(|c| !c.is_empty());

        self.w
            .start_element("ram:SpecifiedTradeSettlementHeaderMonetarySummation")?;
        if full {
            self.opt_amount("ram:LineTotalAmount", t.line_total, None)?;
            self.opt_amount("ram:ChargeTotalAmount", t.charge_total, None)?;
            self.opt_amount("ram:AllowanceTotalAmount", t.allowance_total, None)?;
        }
        self.opt_amount("ram:TaxBasisTotalAmount", t.tax_basis_total, None)?;
        self.opt_amount("ram:TaxTotalAmount", t.tax_total, currency)?;
        if full {
            if let Some(tax_currency) = inv.tax_currency.as_deref() {
                self.opt_amount("ram:TaxTotalAmount", t.tax_total_accounting, Some(tax_currency))?;
            }
            self.opt_amount("ram:RoundingAmount", t.rounding, None)?;
        }
        self.opt_amount("ram:GrandTotalAmount", t.grand_total, None)?;
        if full {
            self.opt_amount("ram:TotalPrepaidAmount", t.prepaid, None)?;
        }
        self.opt_amount("ram:DuePayableAmount", t.due_payable, None)?;
        self.w
            .end_element("ram:SpecifiedTradeSettlementHeaderMonetarySummation")?;
        Ok(())
    }

    fn allowance_charge(&mut self, ac: &AllowanceCharge, document: bool) -> Result<(), InvoiceError> {
        self.w.start_element("ram:SpecifiedTradeAllowanceCharge")?;
        self.indicator(ac.is_charge)?;
        if let Some(percent) = ac.percent {
            self.w.text_element("ram:CalculationPercent", &format_rate(percent))?;
        }
        self.opt_amount("ram:BasisAmount", ac.basis_amount, None)?;
        self.w.amount_element("ram:ActualAmount", ac.amount, None)?;
        self.w.opt_element("ram:ReasonCode", ac.reason_code.as_deref())?;
        self.w.opt_element("ram:Reason", ac.reason.as_deref())?;
        if document && (ac.tax_category.is_some() || ac.tax_rate.is_some()) {
            self.w.start_element("ram:CategoryTradeTax")?;
            self.w.text_element("ram:TypeCode", "VAT")?;
            self.w.opt_element("ram:CategoryCode", ac.tax_category.map(|c| c.code()))?;
            if let Some(rate) = ac.tax_rate {
                self.w.text_element("ram:RateApplicablePercent", &format_rate(rate))?;
            }
            self.w.end_element("ram:CategoryTradeTax")?;
        }
        self.w.end_element("ram:SpecifiedTradeAllowanceCharge")?;
        Ok(())
    }

    fn period(&mut self, period: &Period) -> Result<(), InvoiceError> {
        if period.start.is_none() && period.end.is_none() {
            return Ok(());
        }
        self.w.start_element("ram:BillingSpecifiedPeriod")?;
        if let Some(start) = period.start {
            self.w.date_element("ram:StartDateTime", "udt:DateTimeString", start)?;
        }
        if let Some(end) = period.end {
            self.w.date_element("ram:EndDateTime", "udt:DateTimeString", end)?;
        }
        self.w.end_element("ram:BillingSpecifiedPeriod")?;
        Ok(())
    }

    fn indicator(&mut self, is_charge: bool) -> Result<(), InvoiceError> {
        self.w.start_element("ram:ChargeIndicator")?;
        self.w
            .text_element("udt:Indicator", if is_charge { "true" } else { "false" })?;
        self.w.end_element("ram:ChargeIndicator")?;
        Ok(())
    }

    fn identifier(&mut self, tag: &str, id: &Identifier) -> Result<(), InvoiceError> {
        self.w.text_element_with_attrs(
            tag,
            &id.value,
            &[("schemeID", id.scheme.as_deref().unwrap_or_default())],
        )?;
        Ok(())
    }

    fn opt_amount(
        &mut self,
        tag: &str,
        amount: Option<Decimal>,
        currency: Option<&str>,
    ) -> Result<(), InvoiceError> {
        if let Some(amount) = amount {
            self.w.amount_element(tag, amount, currency)?;
        }
        Ok(())
    }
}

use std::io::BufRead;
use std::str::FromStr;

use base64::{Engine as _, engine::general_purpose};
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::xml_utils::{Element, parse_tree};
use super::{DATE_FORMAT, UBL_NAMESPACE_PREFIX, ns};
use crate::core::*;

/// An invoice read from CII, with the violations found while reading.
#[derive(Debug, Clone)]
pub struct Parsed {
    pub invoice: Invoice,
    /// Header integrity violations (BR-1 to BR-5, BR-CL-01) and unknown
    /// VAT category codes (BR-CL-18). Full validation is a separate step.
    pub violations: Report,
}

/// Read a CII document.
///
/// Syntax errors (malformed XML, bad dates, decimals or Base64) fail the
/// read. Missing or unknown values do not: the partial invoice is
/// returned together with the violations they cause.
#[tracing::instrument(skip_all)]
pub fn read_cii<R: BufRead>(input: R) -> Result<Parsed, InvoiceError> {
    let root = parse_tree(input)?;
    check_root(&root)?;

    let mut reader = CiiReader::default();
    let invoice = reader.invoice(&root)?;

    let mut violations = check_integrity(&invoice);
    violations.extend(reader.violations);
    tracing::debug!(
        number = %invoice.number,
        lines = invoice.lines.len(),
        violations = violations.all().len(),
        "CII document read"
    );
    Ok(Parsed {
        invoice,
        violations,
    })
}

/// Read a CII document from a string.
pub fn from_cii_xml(xml: &str) -> Result<Parsed, InvoiceError> {
    read_cii(xml.as_bytes())
}

fn check_root(root: &Element) -> Result<(), InvoiceError> {
    if root.ns.starts_with(UBL_NAMESPACE_PREFIX) {
        tracing::warn!(root = %root.name, "UBL document refused");
        return Err(InvoiceError::UnsupportedSchema(format!(
            "UBL {} documents are not supported",
            root.name
        )));
    }
    if root.ns != ns::RSM || root.name != "CrossIndustryInvoice" {
        tracing::warn!(root = %root.name, ns = %root.ns, "unknown document root");
        return Err(InvoiceError::UnsupportedSchema(format!(
            "unknown document root '{}' in namespace '{}'",
            root.name, root.ns
        )));
    }
    Ok(())
}

#[derive(Default)]
struct CiiReader {
    violations: Report,
    /// Line being read, for error messages.
    line_id: Option<String>,
}

impl CiiReader {
    fn invoice(&mut self, root: &Element) -> Result<Invoice, InvoiceError> {
        let mut inv = Invoice::default();

        if let Some(context) = root.child("ExchangedDocumentContext") {
            inv.business_process =
                context.text_at(&["BusinessProcessSpecifiedDocumentContextParameter", "ID"]);
            inv.specification_id = context
                .text_at(&["GuidelineSpecifiedDocumentContextParameter", "ID"])
                .unwrap_or_default();
        }

        if let Some(doc) = root.child("ExchangedDocument") {
            inv.number = doc.text_at(&["ID"]).unwrap_or_default();
            if let Some(code) = doc.child("TypeCode").and_then(Element::text) {
                let code = code
                    .parse::<u16>()
                    .map_err(|_| self.error(format!("invalid document type code '{code}'")))?;
                inv.type_code = Some(InvoiceTypeCode::from_code(code));
            }
            inv.issue_date = self.date(doc.child("IssueDateTime"))?;
            inv.notes = doc
                .children("IncludedNote")
                .filter_map(|n| {
                    Some(Note {
                        content: n.text_at(&["Content"])?,
                        subject_code: n.text_at(&["SubjectCode"]),
                    })
                })
                .collect();
        }

        let Some(tx) = root.child("SupplyChainTradeTransaction") else {
            return Ok(inv);
        };
        for item in tx.children("IncludedSupplyChainTradeLineItem") {
            let line = self.line(item)?;
            inv.lines.push(line);
        }
        if let Some(agreement) = tx.child("ApplicableHeaderTradeAgreement") {
            self.agreement(agreement, &mut inv)?;
        }
        if let Some(delivery) = tx.child("ApplicableHeaderTradeDelivery") {
            self.delivery(delivery, &mut inv)?;
        }
        if let Some(settlement) = tx.child("ApplicableHeaderTradeSettlement") {
            self.settlement(settlement, &mut inv)?;
        }
        Ok(inv)
    }

    fn line(&mut self, item: &Element) -> Result<InvoiceLine, InvoiceError> {
        let id = item
            .text_at(&["AssociatedDocumentLineDocument", "LineID"])
            .unwrap_or_default();
        self.line_id = Some(id.clone());

        let agreement = item.child("SpecifiedLineTradeAgreement");
        let gross = agreement.and_then(|a| a.child("GrossPriceProductTradePrice"));
        let net = agreement.and_then(|a| a.child("NetPriceProductTradePrice"));
        let quantity = item.find(&["SpecifiedLineTradeDelivery", "BilledQuantity"]);
        let settlement = item.child("SpecifiedLineTradeSettlement");
        let tax = settlement.and_then(|s| s.child("ApplicableTradeTax"));

        let mut price_allowances_charges = Vec::new();
        for ac in gross.into_iter().flat_map(|g| g.children("AppliedTradeAllowanceCharge")) {
            price_allowances_charges.push(self.allowance_charge(ac)?);
        }
        let mut allowances_charges = Vec::new();
        for ac in settlement
            .into_iter()
            .flat_map(|s| s.children("SpecifiedTradeAllowanceCharge"))
        {
            allowances_charges.push(self.allowance_charge(ac)?);
        }

        let line = InvoiceLine {
            id,
            note: item.text_at(&["AssociatedDocumentLineDocument", "IncludedNote", "Content"]),
            product: item.child("SpecifiedTradeProduct").map(product).unwrap_or_default(),
            billed_quantity: self.decimal(quantity)?.unwrap_or_default(),
            unit_code: quantity
                .and_then(|q| q.attr("unitCode"))
                .unwrap_or_default()
                .to_owned(),
            gross_price: self.decimal(gross.and_then(|g| g.child("ChargeAmount")))?,
            price_allowances_charges,
            net_price: self
                .decimal(net.and_then(|n| n.child("ChargeAmount")))?
                .unwrap_or_default(),
            basis_quantity: self.decimal(
                net.and_then(|n| n.child("BasisQuantity"))
                    .or_else(|| gross.and_then(|g| g.child("BasisQuantity"))),
            )?,
            period: self.period(settlement.and_then(|s| s.child("BillingSpecifiedPeriod")))?,
            allowances_charges,
            tax_category: self.category(tax.and_then(|t| t.child("CategoryCode"))),
            tax_rate: self.decimal(tax.and_then(|t| t.child("RateApplicablePercent")))?,
            line_total: self
                .decimal(settlement.and_then(|s| {
                    s.find(&["SpecifiedTradeSettlementLineMonetarySummation", "LineTotalAmount"])
                }))?
                .unwrap_or_default(),
            buyer_order_line_id: agreement
                .and_then(|a| a.text_at(&["BuyerOrderReferencedDocument", "LineID"])),
            accounting_reference: settlement
                .and_then(|s| s.text_at(&["ReceivableSpecifiedTradeAccountingAccount", "ID"])),
        };
        self.line_id = None;
        Ok(line)
    }

    fn agreement(&mut self, elem: &Element, inv: &mut Invoice) -> Result<(), InvoiceError> {
        inv.buyer_reference = elem.text_at(&["BuyerReference"]);
        if let Some(seller) = elem.child("SellerTradeParty") {
            inv.seller = party(seller);
        }
        if let Some(buyer) = elem.child("BuyerTradeParty") {
            inv.buyer = party(buyer);
        }
        inv.tax_representative = elem.child("SellerTaxRepresentativeTradeParty").map(party);
        inv.seller_order_reference =
            elem.text_at(&["SellerOrderReferencedDocument", "IssuerAssignedID"]);
        inv.buyer_order_reference =
            elem.text_at(&["BuyerOrderReferencedDocument", "IssuerAssignedID"]);
        inv.contract_reference = elem.text_at(&["ContractReferencedDocument", "IssuerAssignedID"]);

        for doc in elem.children("AdditionalReferencedDocument") {
            let document = self.supporting_document(doc)?;
            inv.supporting_documents.push(document);
        }

        inv.project_reference = elem.child("SpecifiedProcuringProject").map(|p| ProjectReference {
            id: p.text_at(&["ID"]).unwrap_or_default(),
            name: p.text_at(&["Name"]).unwrap_or_default(),
        });
        Ok(())
    }

    fn supporting_document(&self, doc: &Element) -> Result<SupportingDocument, InvoiceError> {
        let attachment = match doc.child("AttachmentBinaryObject") {
            Some(obj) => {
                let filename = obj.attr("filename").unwrap_or_default();
                // Base64 payloads are often wrapped across lines.
                let encoded: String = obj.text.chars().filter(|c| !c.is_whitespace()).collect();
                if encoded.is_empty() {
                    None
                } else {
                    let content = general_purpose::STANDARD.decode(encoded).map_err(|e| {
                        self.error(format!("cannot decode attachment '{filename}': {e}"))
                    })?;
                    Some(BinaryObject {
                        mime_code: obj.attr("mimeCode").unwrap_or_default().to_owned(),
                        filename: filename.to_owned(),
                        content,
                    })
                }
            }
            None => None,
        };
        Ok(SupportingDocument {
            id: doc.text_at(&["IssuerAssignedID"]).unwrap_or_default(),
            type_code: doc.text_at(&["TypeCode"]),
            description: doc.text_at(&["Name"]),
            uri: doc.text_at(&["URIID"]),
            attachment,
        })
    }

    fn delivery(&mut self, elem: &Element, inv: &mut Invoice) -> Result<(), InvoiceError> {
        inv.ship_to = elem.child("ShipToTradeParty").map(party);
        inv.actual_delivery_date =
            self.date(elem.find(&["ActualDeliverySupplyChainEvent", "OccurrenceDateTime"]))?;
        inv.despatch_advice_reference =
            elem.text_at(&["DespatchAdviceReferencedDocument", "IssuerAssignedID"]);
        inv.receiving_advice_reference =
            elem.text_at(&["ReceivingAdviceReferencedDocument", "IssuerAssignedID"]);
        Ok(())
    }

    fn settlement(&mut self, elem: &Element, inv: &mut Invoice) -> Result<(), InvoiceError> {
        inv.creditor_reference_id = elem.text_at(&["CreditorReferenceID"]);
        inv.payment_reference = elem.text_at(&["PaymentReference"]);
        inv.tax_currency = elem.text_at(&["TaxCurrencyCode"]);
        inv.currency = elem.text_at(&["InvoiceCurrencyCode"]).unwrap_or_default();
        inv.payee = elem.child("PayeeTradeParty").map(party);

        for means in elem.children("SpecifiedTradeSettlementPaymentMeans") {
            let means = self.payment_means(means)?;
            inv.payment_means.push(means);
        }

        for tax in elem.children("ApplicableTradeTax") {
            let tax = self.trade_tax(tax)?;
            inv.trade_taxes.push(tax);
        }

        inv.billing_period = self.period(elem.child("BillingSpecifiedPeriod"))?;

        for ac in elem.children("SpecifiedTradeAllowanceCharge") {
            let ac = self.allowance_charge(ac)?;
            inv.allowances_charges.push(ac);
        }

        for terms in elem.children("SpecifiedTradePaymentTerms") {
            if inv.direct_debit_mandate_id.is_none() {
                inv.direct_debit_mandate_id = terms.text_at(&["DirectDebitMandateID"]);
            }
            let terms = PaymentTerms {
                description: terms.text_at(&["Description"]),
                due_date: self.date(terms.child("DueDateDateTime"))?,
            };
            if terms.description.is_some() || terms.due_date.is_some() {
                inv.payment_terms.push(terms);
            }
        }

        if let Some(sums) = elem.child("SpecifiedTradeSettlementHeaderMonetarySummation") {
            self.totals(sums, inv)?;
        }

        for doc in elem.children("InvoiceReferencedDocument") {
            inv.preceding_invoices.push(PrecedingInvoice {
                id: doc.text_at(&["IssuerAssignedID"]).unwrap_or_default(),
                issue_date: self.date(doc.child("FormattedIssueDateTime"))?,
            });
        }

        inv.buyer_accounting_reference =
            elem.text_at(&["ReceivableSpecifiedTradeAccountingAccount", "ID"]);
        Ok(())
    }

    fn payment_means(&self, elem: &Element) -> Result<PaymentMeans, InvoiceError> {
        let type_code = match elem.child("TypeCode").and_then(Element::text) {
            Some(code) => Some(PaymentMeansCode::from_code(code.parse().map_err(|_| {
                self.error(format!("invalid payment means code '{code}'"))
            })?)),
            None => None,
        };
        Ok(PaymentMeans {
            type_code,
            information: elem.text_at(&["Information"]),
            card: elem
                .child("ApplicableTradeSettlementFinancialCard")
                .map(|card| FinancialCard {
                    id: card.text_at(&["ID"]).unwrap_or_default(),
                    cardholder: card.text_at(&["CardholderName"]),
                }),
            payee_account: elem
                .child("PayeePartyCreditorFinancialAccount")
                .map(|account| PayeeAccount {
                    iban: account.text_at(&["IBANID"]),
                    name: account.text_at(&["AccountName"]),
                    proprietary_id: account.text_at(&["ProprietaryID"]),
                }),
            payer_iban: elem.text_at(&["PayerPartyDebtorFinancialAccount", "IBANID"]),
            payee_bic: elem.text_at(&["PayeeSpecifiedCreditorFinancialInstitution", "BICID"]),
        })
    }

    fn trade_tax(&mut self, elem: &Element) -> Result<TradeTax, InvoiceError> {
        Ok(TradeTax {
            type_code: elem.text_at(&["TypeCode"]).unwrap_or_else(|| "VAT".to_owned()),
            category: self.category(elem.child("CategoryCode")),
            rate: self.decimal(elem.child("RateApplicablePercent"))?,
            basis_amount: self.decimal(elem.child("BasisAmount"))?.unwrap_or_default(),
            calculated_amount: self
                .decimal(elem.child("CalculatedAmount"))?
                .unwrap_or_default(),
            exemption_reason: elem.text_at(&["ExemptionReason"]),
            exemption_reason_code: elem.text_at(&["ExemptionReasonCode"]),
            tax_point_date: self.date(elem.child("TaxPointDate"))?,
            due_date_type_code: elem.text_at(&["DueDateTypeCode"]),
        })
    }

    fn totals(&self, elem: &Element, inv: &mut Invoice) -> Result<(), InvoiceError> {
        let tax_currency = inv.tax_currency.clone();
        let same_currency = tax_currency.as_deref() == Some(inv.currency.as_str());
        let t = &mut inv.totals;
        t.line_total = self.decimal(elem.child("LineTotalAmount"))?;
        t.charge_total = self.decimal(elem.child("ChargeTotalAmount"))?;
        t.allowance_total = self.decimal(elem.child("AllowanceTotalAmount"))?;
        t.tax_basis_total = self.decimal(elem.child("TaxBasisTotalAmount"))?;
        t.rounding = self.decimal(elem.child("RoundingAmount"))?;
        t.grand_total = self.decimal(elem.child("GrandTotalAmount"))?;
        t.prepaid = self.decimal(elem.child("TotalPrepaidAmount"))?;
        t.due_payable = self.decimal(elem.child("DuePayableAmount"))?;

        // Invoice currency first, then tax currency. When both currencies
        // are the same only the order tells the two amounts apart.
        let mut seen_invoice_total = false;
        for amount in elem.children("TaxTotalAmount") {
            let value = self.decimal(Some(amount))?;
            let in_tax_currency =
                tax_currency.is_some() && amount.attr("currencyID") == tax_currency.as_deref();
            if in_tax_currency && (seen_invoice_total || !same_currency) {
                t.tax_total_accounting = value;
            } else if !seen_invoice_total {
                t.tax_total = value;
                seen_invoice_total = true;
            }
        }
        Ok(())
    }

    fn allowance_charge(&mut self, elem: &Element) -> Result<AllowanceCharge, InvoiceError> {
        let is_charge = match elem.text_at(&["ChargeIndicator", "Indicator"]).as_deref() {
            Some("true" | "1") => true,
            Some("false" | "0") | None => false,
            Some(other) => return Err(self.error(format!("invalid charge indicator '{other}'"))),
        };
        let tax = elem.child("CategoryTradeTax");
        Ok(AllowanceCharge {
            is_charge,
            amount: self.decimal(elem.child("ActualAmount"))?.unwrap_or_default(),
            basis_amount: self.decimal(elem.child("BasisAmount"))?,
            percent: self.decimal(elem.child("CalculationPercent"))?,
            reason: elem.text_at(&["Reason"]),
            reason_code: elem.text_at(&["ReasonCode"]),
            tax_category: self.category(tax.and_then(|t| t.child("CategoryCode"))),
            tax_rate: self.decimal(tax.and_then(|t| t.child("RateApplicablePercent")))?,
        })
    }

    fn period(&self, elem: Option<&Element>) -> Result<Option<Period>, InvoiceError> {
        let Some(elem) = elem else {
            return Ok(None);
        };
        Ok(Some(Period {
            start: self.date(elem.child("StartDateTime"))?,
            end: self.date(elem.child("EndDateTime"))?,
        }))
    }

    /// Date inside a wrapper element such as `IssueDateTime`.
    fn date(&self, wrapper: Option<&Element>) -> Result<Option<NaiveDate>, InvoiceError> {
        let Some(value) = wrapper.and_then(|w| {
            w.children
                .iter()
                .find(|c| c.name == "DateTimeString" || c.name == "DateString")
        }) else {
            return Ok(None);
        };
        if value.ns != ns::UDT && value.ns != ns::QDT {
            return Err(self.error(format!("date element in unexpected namespace '{}'", value.ns)));
        }
        match value.attr("format") {
            Some(DATE_FORMAT) => {}
            Some(other) => return Err(self.error(format!("unsupported date format '{other}'"))),
            None => return Err(self.error("date without format qualifier")),
        }
        let text = value.text().unwrap_or_default();
        if text.len() != 8 || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(self.error(format!("invalid date '{text}'")));
        }
        NaiveDate::parse_from_str(text, "%Y%m%d")
            .map(Some)
            .map_err(|_| self.error(format!("invalid date '{text}'")))
    }

    fn decimal(&self, elem: Option<&Element>) -> Result<Option<Decimal>, InvoiceError> {
        let Some(text) = elem.and_then(Element::text) else {
            return Ok(None);
        };
        Decimal::from_str(text)
            .map(Some)
            .map_err(|_| self.error(format!("invalid decimal '{text}'")))
    }

    /// UNCL 5305 category; unknown codes are reported and dropped.
    fn category(&mut self, elem: Option<&Element>) -> Option<TaxCategory> {
        let code = elem.and_then(Element::text)?;
        let category = TaxCategory::from_code(code);
        if category.is_none() {
            self.violations
                .add("BR-CL-18", format!("unknown VAT category code '{code}'"));
        }
        category
    }

    fn error(&self, message: impl Into<String>) -> InvoiceError {
        InvoiceError::parse_in_line(message, self.line_id.as_deref())
    }
}

fn party(elem: &Element) -> Party {
    Party {
        ids: elem
            .children("ID")
            .filter_map(Element::text)
            .map(str::to_owned)
            .collect(),
        global_ids: elem.children("GlobalID").filter_map(identifier).collect(),
        name: elem.text_at(&["Name"]).unwrap_or_default(),
        description: elem.text_at(&["Description"]),
        legal_organization: elem
            .child("SpecifiedLegalOrganization")
            .map(|org| LegalOrganization {
                id: org.text_at(&["ID"]),
                scheme: org
                    .child("ID")
                    .and_then(|id| id.attr("schemeID"))
                    .map(str::to_owned),
                trading_name: org.text_at(&["TradingBusinessName"]),
            }),
        postal_address: elem.child("PostalTradeAddress").map(|a| PostalAddress {
            line1: a.text_at(&["LineOne"]),
            line2: a.text_at(&["LineTwo"]),
            line3: a.text_at(&["LineThree"]),
            postcode: a.text_at(&["PostcodeCode"]),
            city: a.text_at(&["CityName"]),
            country_code: a.text_at(&["CountryID"]).unwrap_or_default(),
            subdivision: a.text_at(&["CountrySubDivisionName"]),
        }),
        vat_id: tax_registration(elem, "VA"),
        tax_registration_id: tax_registration(elem, "FC"),
        contacts: elem
            .children("DefinedTradeContact")
            .map(|c| Contact {
                name: c.text_at(&["PersonName"]),
                department: c.text_at(&["DepartmentName"]),
                phone: c.text_at(&["TelephoneUniversalCommunication", "CompleteNumber"]),
                email: c.text_at(&["EmailURIUniversalCommunication", "URIID"]),
            })
            .collect(),
        electronic_address: elem.find(&["URIUniversalCommunication", "URIID"]).and_then(|id| {
            Some(ElectronicAddress {
                scheme: id.attr("schemeID").unwrap_or_default().to_owned(),
                value: id.text()?.to_owned(),
            })
        }),
    }
}

fn tax_registration(party: &Element, scheme: &str) -> Option<String> {
    party
        .children("SpecifiedTaxRegistration")
        .filter_map(|reg| reg.child("ID"))
        .find(|id| id.attr("schemeID") == Some(scheme))
        .and_then(|id| id.text())
        .map(str::to_owned)
}

fn identifier(elem: &Element) -> Option<Identifier> {
    Some(Identifier {
        value: elem.text()?.to_owned(),
        scheme: elem.attr("schemeID").map(str::to_owned),
    })
}

fn product(elem: &Element) -> Product {
    Product {
        global_id: elem.child("GlobalID").and_then(identifier),
        seller_assigned_id: elem.text_at(&["SellerAssignedID"]),
        buyer_assigned_id: elem.text_at(&["BuyerAssignedID"]),
        name: elem.text_at(&["Name"]).unwrap_or_default(),
        description: elem.text_at(&["Description"]),
        characteristics: elem
            .children("ApplicableProductCharacteristic")
            .map(|c| Characteristic {
                name: c.text_at(&["Description"]).unwrap_or_default(),
                value: c.text_at(&["Value"]).unwrap_or_default(),
            })
            .collect(),
        classifications: elem
            .children("DesignatedProductClassification")
            .filter_map(|c| c.child("ClassCode"))
            .filter_map(|code| {
                Some(Classification {
                    code: code.text()?.to_owned(),
                    list_id: code.attr("listID").map(str::to_owned),
                    list_version: code.attr("listVersionID").map(str::to_owned),
                })
            })
            .collect(),
        origin_country: elem.text_at(&["OriginTradeCountry", "ID"]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn document(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<rsm:CrossIndustryInvoice xmlns:rsm="{}" xmlns:ram="{}" xmlns:udt="{}" xmlns:qdt="{}">
  <rsm:ExchangedDocumentContext>
    <ram:GuidelineSpecifiedDocumentContextParameter><ram:ID>urn:cen.eu:en16931:2017</ram:ID></ram:GuidelineSpecifiedDocumentContextParameter>
  </rsm:ExchangedDocumentContext>
  <rsm:ExchangedDocument>
    <ram:ID>INV-1</ram:ID>
    <ram:TypeCode>380</ram:TypeCode>
    <ram:IssueDateTime><udt:DateTimeString format="102">20240615</udt:DateTimeString></ram:IssueDateTime>
  </rsm:ExchangedDocument>
  <rsm:SupplyChainTradeTransaction>{body}
    <ram:ApplicableHeaderTradeSettlement>
      <ram:InvoiceCurrencyCode>EUR</ram:InvoiceCurrencyCode>
    </ram:ApplicableHeaderTradeSettlement>
  </rsm:SupplyChainTradeTransaction>
</rsm:CrossIndustryInvoice>"#,
            ns::RSM,
            ns::RAM,
            ns::UDT,
            ns::QDT
        )
    }

    #[test]
    fn reads_header() {
        let parsed = from_cii_xml(&document("")).unwrap();
        let inv = parsed.invoice;
        assert_eq!(inv.number, "INV-1");
        assert_eq!(inv.type_code, Some(InvoiceTypeCode::Invoice));
        assert_eq!(inv.issue_date, NaiveDate::from_ymd_opt(2024, 6, 15));
        assert_eq!(inv.currency, "EUR");
        assert_eq!(inv.profile(), Profile::En16931);
        assert!(parsed.violations.is_empty(), "{}", parsed.violations);
    }

    #[test]
    fn prefixes_are_resolved_by_uri() {
        let xml = document("")
            .replace("rsm:", "inv:")
            .replace("xmlns:rsm", "xmlns:inv");
        let parsed = from_cii_xml(&xml).unwrap();
        assert_eq!(parsed.invoice.number, "INV-1");
    }

    #[test]
    fn ubl_is_refused() {
        let xml = r#"<Invoice xmlns="urn:oasis:names:specification:ubl:schema:xsd:Invoice-2"><ID>1</ID></Invoice>"#;
        assert!(matches!(
            from_cii_xml(xml),
            Err(InvoiceError::UnsupportedSchema(_))
        ));
    }

    #[test]
    fn unknown_root_is_refused() {
        assert!(matches!(
            from_cii_xml("<Something/>"),
            Err(InvoiceError::UnsupportedSchema(_))
        ));
    }

    #[test]
    fn missing_header_fields_become_violations() {
        let xml = document("")
            .replace("<ram:ID>INV-1</ram:ID>", "")
            .replace("<ram:TypeCode>380</ram:TypeCode>", "<ram:TypeCode>999</ram:TypeCode>");
        let parsed = from_cii_xml(&xml).unwrap();
        assert!(parsed.violations.has("BR-2"));
        assert!(parsed.violations.has("BR-CL-01"));
        assert_eq!(parsed.invoice.type_code, Some(InvoiceTypeCode::Other(999)));
    }

    #[test]
    fn date_format_must_be_102() {
        let xml = document("").replace(r#"format="102""#, r#"format="610""#);
        let err = from_cii_xml(&xml).unwrap_err();
        assert!(err.to_string().contains("unsupported date format '610'"));

        let xml = document("").replace(r#" format="102""#, "");
        assert!(matches!(from_cii_xml(&xml), Err(InvoiceError::Parse { .. })));
    }

    #[test]
    fn bad_decimal_names_the_line() {
        let line = r#"
    <ram:IncludedSupplyChainTradeLineItem>
      <ram:AssociatedDocumentLineDocument><ram:LineID>7</ram:LineID></ram:AssociatedDocumentLineDocument>
      <ram:SpecifiedLineTradeDelivery><ram:BilledQuantity unitCode="C62">ten</ram:BilledQuantity></ram:SpecifiedLineTradeDelivery>
    </ram:IncludedSupplyChainTradeLineItem>"#;
        match from_cii_xml(&document(line)) {
            Err(InvoiceError::Parse { message, line_id }) => {
                assert!(message.contains("invalid decimal 'ten'"));
                assert_eq!(line_id.as_deref(), Some("7"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_category_is_reported() {
        let line = r#"
    <ram:IncludedSupplyChainTradeLineItem>
      <ram:AssociatedDocumentLineDocument><ram:LineID>1</ram:LineID></ram:AssociatedDocumentLineDocument>
      <ram:SpecifiedLineTradeDelivery><ram:BilledQuantity unitCode="C62">2</ram:BilledQuantity></ram:SpecifiedLineTradeDelivery>
      <ram:SpecifiedLineTradeSettlement>
        <ram:ApplicableTradeTax><ram:TypeCode>VAT</ram:TypeCode><ram:CategoryCode>B</ram:CategoryCode></ram:ApplicableTradeTax>
        <ram:SpecifiedTradeSettlementLineMonetarySummation><ram:LineTotalAmount>20.00</ram:LineTotalAmount></ram:SpecifiedTradeSettlementLineMonetarySummation>
      </ram:SpecifiedLineTradeSettlement>
    </ram:IncludedSupplyChainTradeLineItem>"#;
        let parsed = from_cii_xml(&document(line)).unwrap();
        assert!(parsed.violations.has("BR-CL-18"));
        let line = &parsed.invoice.lines[0];
        assert_eq!(line.tax_category, None);
        assert_eq!(line.billed_quantity, dec!(2));
        assert_eq!(line.line_total, dec!(20.00));
    }

    #[test]
    fn attachments_are_decoded() {
        let agreement = r#"
    <ram:ApplicableHeaderTradeAgreement>
      <ram:AdditionalReferencedDocument>
        <ram:IssuerAssignedID>TS-1</ram:IssuerAssignedID>
        <ram:TypeCode>916</ram:TypeCode>
        <ram:AttachmentBinaryObject mimeCode="text/plain" filename="a.txt">aGVs
bG8=</ram:AttachmentBinaryObject>
      </ram:AdditionalReferencedDocument>
    </ram:ApplicableHeaderTradeAgreement>"#;
        let parsed = from_cii_xml(&document(agreement)).unwrap();
        let doc = &parsed.invoice.supporting_documents[0];
        let attachment = doc.attachment.as_ref().unwrap();
        assert_eq!(attachment.filename, "a.txt");
        assert_eq!(attachment.content, b"hello");

        let broken = agreement.replace("aGVs\nbG8=", "not*base64");
        let err = from_cii_xml(&document(&broken)).unwrap_err();
        assert!(err.to_string().contains("cannot decode attachment"));
    }

    #[test]
    fn malformed_xml_is_an_error() {
        let xml = document("").replace("</rsm:ExchangedDocument>", "");
        assert!(matches!(from_cii_xml(&xml), Err(InvoiceError::Parse { .. })));
    }
}

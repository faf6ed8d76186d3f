use std::hash::{Hash, Hasher};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::profile::Profile;

/// BG-0: Invoice, the top-level document.
///
/// Fields that the calculator derives (line totals, the VAT breakdown and
/// the document totals) are plain data: nothing is recomputed implicitly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// BT-1: Invoice number.
    pub number: String,
    /// BT-2: Invoice issue date.
    pub issue_date: Option<NaiveDate>,
    /// BT-3: Invoice type code (UNTDID 1001).
    pub type_code: Option<InvoiceTypeCode>,
    /// BT-5: Invoice currency code (ISO 4217).
    pub currency: String,
    /// BT-6: VAT accounting currency code.
    pub tax_currency: Option<String>,
    /// BT-10: Buyer reference (Leitweg-ID for XRechnung).
    pub buyer_reference: Option<String>,
    /// BT-23: Business process type.
    pub business_process: Option<String>,
    /// BT-24: Specification identifier, selects the profile.
    pub specification_id: String,
    /// BG-1: Invoice notes.
    pub notes: Vec<Note>,

    /// BG-4: Seller.
    pub seller: Party,
    /// BG-7: Buyer.
    pub buyer: Party,
    /// BG-10: Payee, when different from the seller.
    pub payee: Option<Party>,
    /// BG-11: Seller tax representative.
    pub tax_representative: Option<Party>,
    /// BG-13: Deliver-to party.
    pub ship_to: Option<Party>,

    /// BT-72: Actual delivery date.
    pub actual_delivery_date: Option<NaiveDate>,
    /// BG-14: Invoicing period.
    pub billing_period: Option<Period>,

    /// BT-11: Project reference.
    pub project_reference: Option<ProjectReference>,
    /// BT-12: Contract reference.
    pub contract_reference: Option<String>,
    /// BT-13: Purchase order reference.
    pub buyer_order_reference: Option<String>,
    /// BT-14: Sales order reference.
    pub seller_order_reference: Option<String>,
    /// BT-15: Receiving advice reference.
    pub receiving_advice_reference: Option<String>,
    /// BT-16: Despatch advice reference.
    pub despatch_advice_reference: Option<String>,
    /// BT-19: Buyer accounting reference.
    pub buyer_accounting_reference: Option<String>,
    /// BG-3: Preceding invoice references.
    pub preceding_invoices: Vec<PrecedingInvoice>,
    /// BG-24: Additional supporting documents (also BT-17 tender and BT-18 invoiced object).
    pub supporting_documents: Vec<SupportingDocument>,

    /// BG-25: Invoice lines.
    pub lines: Vec<InvoiceLine>,
    /// BG-20 / BG-21: Document-level allowances and charges.
    pub allowances_charges: Vec<AllowanceCharge>,
    /// BG-23: VAT breakdown.
    pub trade_taxes: Vec<TradeTax>,
    /// BG-22: Document totals.
    pub totals: MonetarySummation,

    /// BG-16: Payment instructions.
    pub payment_means: Vec<PaymentMeans>,
    /// BT-20 / BT-9: Payment terms and due dates.
    pub payment_terms: Vec<PaymentTerms>,
    /// BT-83: Remittance information.
    pub payment_reference: Option<String>,
    /// BT-89: Mandate reference for direct debit.
    pub direct_debit_mandate_id: Option<String>,
    /// BT-90: Bank assigned creditor identifier.
    pub creditor_reference_id: Option<String>,
}

impl Invoice {
    /// Profile selected by the specification identifier and business process.
    pub fn profile(&self) -> Profile {
        Profile::classify(&self.specification_id, self.business_process.as_deref())
    }

    /// Document-level allowances (BG-20).
    pub fn allowances(&self) -> impl Iterator<Item = &AllowanceCharge> {
        self.allowances_charges.iter().filter(|ac| !ac.is_charge)
    }

    /// Document-level charges (BG-21).
    pub fn charges(&self) -> impl Iterator<Item = &AllowanceCharge> {
        self.allowances_charges.iter().filter(|ac| ac.is_charge)
    }

    /// BT-80: Deliver-to country code.
    pub fn deliver_to_country(&self) -> Option<&str> {
        self.ship_to
            .as_ref()
            .and_then(|p| p.postal_address.as_ref())
            .map(|a| a.country_code.as_str())
            .filter(|c| !c.is_empty())
    }

    /// Seller VAT identifier, tax registration, or tax representative VAT identifier.
    pub fn seller_has_tax_id(&self) -> bool {
        has_text(&self.seller.vat_id)
            || has_text(&self.seller.tax_registration_id)
            || self
                .tax_representative
                .as_ref()
                .is_some_and(|rep| has_text(&rep.vat_id))
    }

    /// Whether the document is a credit note (UNTDID 1001 code 381).
    pub fn is_credit_note(&self) -> bool {
        self.type_code == Some(InvoiceTypeCode::CreditNote)
    }
}

/// `true` when an optional string carries non-blank text.
pub(crate) fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// BT-22: Invoice note with optional subject code (BT-21).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub content: String,
    /// BT-21: UNTDID 4451 subject code.
    pub subject_code: Option<String>,
}

impl Note {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            subject_code: None,
        }
    }
}

/// BG-4 / BG-7 / BG-10 / BG-11 / BG-13: a trade party.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Party {
    /// BT-29 / BT-46 / BT-60: Party identifiers without scheme.
    pub ids: Vec<String>,
    /// BT-29 / BT-46 / BT-60 / BT-71: Party identifiers with scheme (e.g. GLN `0088`).
    pub global_ids: Vec<Identifier>,
    /// BT-27 / BT-44 / BT-59 / BT-62 / BT-70: Name.
    pub name: String,
    /// BT-33: Additional legal information.
    pub description: Option<String>,
    /// BT-30 / BT-47 / BT-61 and BT-28 / BT-45: Legal registration and trading name.
    pub legal_organization: Option<LegalOrganization>,
    /// BG-5 / BG-8 / BG-12 / BG-15: Postal address.
    pub postal_address: Option<PostalAddress>,
    /// BT-31 / BT-48 / BT-63: VAT identifier.
    pub vat_id: Option<String>,
    /// BT-32: Tax registration identifier (Steuernummer).
    pub tax_registration_id: Option<String>,
    /// BG-6 / BG-9: Contacts.
    pub contacts: Vec<Contact>,
    /// BT-34 / BT-49: Electronic address.
    pub electronic_address: Option<ElectronicAddress>,
}

impl Party {
    /// Legal registration identifier, when present.
    pub fn legal_id(&self) -> Option<&str> {
        self.legal_organization
            .as_ref()
            .and_then(|org| org.id.as_deref())
            .filter(|id| !id.trim().is_empty())
    }

    pub fn country_code(&self) -> Option<&str> {
        self.postal_address
            .as_ref()
            .map(|a| a.country_code.as_str())
            .filter(|c| !c.is_empty())
    }
}

/// An identifier with an optional scheme.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    pub value: String,
    pub scheme: Option<String>,
}

impl Identifier {
    pub fn new(value: impl Into<String>, scheme: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            scheme: Some(scheme.into()),
        }
    }
}

/// Legal organisation of a party.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegalOrganization {
    /// BT-30 / BT-47 / BT-61: Legal registration identifier.
    pub id: Option<String>,
    /// Scheme of the legal registration identifier (ISO 6523 ICD).
    pub scheme: Option<String>,
    /// BT-28 / BT-45: Trading name.
    pub trading_name: Option<String>,
}

/// BG-5 / BG-8 / BG-12 / BG-15: Postal address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostalAddress {
    /// BT-35: Address line 1 (street).
    pub line1: Option<String>,
    /// BT-36: Address line 2.
    pub line2: Option<String>,
    /// BT-162: Address line 3.
    pub line3: Option<String>,
    /// BT-38: Post code.
    pub postcode: Option<String>,
    /// BT-37: City.
    pub city: Option<String>,
    /// BT-40: Country code (ISO 3166-1 alpha-2).
    pub country_code: String,
    /// BT-39: Country subdivision.
    pub subdivision: Option<String>,
}

/// BG-6 / BG-9: Contact information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// BT-41 / BT-56: Contact point.
    pub name: Option<String>,
    pub department: Option<String>,
    /// BT-42 / BT-57: Telephone.
    pub phone: Option<String>,
    /// BT-43 / BT-58: Email.
    pub email: Option<String>,
}

/// Electronic address with scheme identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElectronicAddress {
    /// EAS scheme (e.g. "EM" for email, "0088" for GLN, "0204" for Leitweg-ID).
    pub scheme: String,
    pub value: String,
}

/// BG-14 / BG-26: Period with optional bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// BT-11: Project reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectReference {
    pub id: String,
    pub name: String,
}

/// BG-3: Preceding invoice reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrecedingInvoice {
    /// BT-25
    pub id: String,
    /// BT-26
    pub issue_date: Option<NaiveDate>,
}

/// Document type code of a supporting document for the tender or lot reference (BT-17).
pub const TENDER_REFERENCE: &str = "50";
/// Document type code of a supporting document for the invoiced object (BT-18).
pub const INVOICED_OBJECT: &str = "130";
/// Document type code of an additional supporting document (BG-24).
pub const SUPPORTING_DOCUMENT: &str = "916";

/// BG-24: Additional supporting document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportingDocument {
    /// BT-122: Document reference.
    pub id: String,
    /// UNTDID 1001 type code: 916, 50 (tender) or 130 (invoiced object).
    pub type_code: Option<String>,
    /// BT-123: Description.
    pub description: Option<String>,
    /// BT-124: External location.
    pub uri: Option<String>,
    /// BT-125: Attached document.
    pub attachment: Option<BinaryObject>,
}

/// BT-125: Embedded binary object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BinaryObject {
    /// BT-125-1: MIME code.
    pub mime_code: String,
    /// BT-125-2: File name.
    pub filename: String,
    /// Raw content; Base64 encoded on the wire.
    pub content: Vec<u8>,
}

/// BG-25: Invoice line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLine {
    /// BT-126: Line identifier.
    pub id: String,
    /// BT-127: Line note.
    pub note: Option<String>,
    /// BG-31: Item information.
    pub product: Product,
    /// BT-129: Invoiced quantity.
    pub billed_quantity: Decimal,
    /// BT-130: Unit of measure (UN/ECE Rec 20).
    pub unit_code: String,
    /// BT-148: Item gross price.
    pub gross_price: Option<Decimal>,
    /// BT-147: Allowances and charges applied to the gross price.
    pub price_allowances_charges: Vec<AllowanceCharge>,
    /// BT-146: Item net price.
    pub net_price: Decimal,
    /// BT-149: Item price base quantity.
    pub basis_quantity: Option<Decimal>,
    /// BG-26: Line period.
    pub period: Option<Period>,
    /// BG-27 / BG-28: Line allowances and charges.
    pub allowances_charges: Vec<AllowanceCharge>,
    /// BT-151: VAT category.
    pub tax_category: Option<TaxCategory>,
    /// BT-152: VAT rate; absent for "not subject to VAT".
    pub tax_rate: Option<Decimal>,
    /// BT-131: Line net amount, set by the calculator.
    pub line_total: Decimal,
    /// BT-132: Referenced purchase order line.
    pub buyer_order_line_id: Option<String>,
    /// BT-133: Buyer accounting reference.
    pub accounting_reference: Option<String>,
}

impl InvoiceLine {
    pub fn allowances(&self) -> impl Iterator<Item = &AllowanceCharge> {
        self.allowances_charges.iter().filter(|ac| !ac.is_charge)
    }

    pub fn charges(&self) -> impl Iterator<Item = &AllowanceCharge> {
        self.allowances_charges.iter().filter(|ac| ac.is_charge)
    }
}

/// BG-31: Item information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// BT-157: Standard identifier (e.g. GTIN `0160`).
    pub global_id: Option<Identifier>,
    /// BT-155: Seller's item identifier.
    pub seller_assigned_id: Option<String>,
    /// BT-156: Buyer's item identifier.
    pub buyer_assigned_id: Option<String>,
    /// BT-153: Item name.
    pub name: String,
    /// BT-154: Item description.
    pub description: Option<String>,
    /// BG-32: Item attributes.
    pub characteristics: Vec<Characteristic>,
    /// BT-158: Item classifications.
    pub classifications: Vec<Classification>,
    /// BT-159: Country of origin.
    pub origin_country: Option<String>,
}

/// BG-32: Item attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Characteristic {
    /// BT-160
    pub name: String,
    /// BT-161
    pub value: String,
}

/// BT-158: Item classification identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub code: String,
    /// BT-158-1: Scheme identifier (UNTDID 7143).
    pub list_id: Option<String>,
    /// BT-158-2: Scheme version.
    pub list_version: Option<String>,
}

/// UNCL 5305 VAT category codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaxCategory {
    /// S: Standard rate.
    StandardRate,
    /// Z: Zero rated goods.
    ZeroRated,
    /// E: Exempt from VAT.
    Exempt,
    /// AE: VAT reverse charge.
    ReverseCharge,
    /// K: Intra-community supply.
    IntraCommunitySupply,
    /// G: Free export item, VAT not charged.
    Export,
    /// O: Services outside scope of tax.
    NotSubjectToVat,
    /// L: Canary Islands general indirect tax (IGIC).
    CanaryIslands,
    /// M: Tax for production, services and importation in Ceuta and Melilla (IPSI).
    CeutaMelilla,
}

impl TaxCategory {
    pub const ALL: [TaxCategory; 9] = [
        Self::StandardRate,
        Self::ZeroRated,
        Self::Exempt,
        Self::ReverseCharge,
        Self::IntraCommunitySupply,
        Self::Export,
        Self::NotSubjectToVat,
        Self::CanaryIslands,
        Self::CeutaMelilla,
    ];

    /// UNCL 5305 code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::StandardRate => "S",
            Self::ZeroRated => "Z",
            Self::Exempt => "E",
            Self::ReverseCharge => "AE",
            Self::IntraCommunitySupply => "K",
            Self::Export => "G",
            Self::NotSubjectToVat => "O",
            Self::CanaryIslands => "L",
            Self::CeutaMelilla => "M",
        }
    }

    /// Parse from a UNCL 5305 code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "S" => Some(Self::StandardRate),
            "Z" => Some(Self::ZeroRated),
            "E" => Some(Self::Exempt),
            "AE" => Some(Self::ReverseCharge),
            "K" => Some(Self::IntraCommunitySupply),
            "G" => Some(Self::Export),
            "O" => Some(Self::NotSubjectToVat),
            "L" => Some(Self::CanaryIslands),
            "M" => Some(Self::CeutaMelilla),
            _ => None,
        }
    }

    /// Categories whose breakdown carries an exemption reason.
    pub fn requires_exemption_reason(&self) -> bool {
        matches!(
            self,
            Self::Exempt
                | Self::ReverseCharge
                | Self::IntraCommunitySupply
                | Self::Export
                | Self::NotSubjectToVat
        )
    }
}

/// UNTDID 1001 document type codes.
///
/// Equality and hashing go through the numeric code, so `Other(380)` equals
/// `Invoice`. Serialised as the bare number.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "u16", into = "u16")]
pub enum InvoiceTypeCode {
    /// 326: Partial invoice.
    Partial,
    /// 380: Commercial invoice.
    Invoice,
    /// 381: Credit note.
    CreditNote,
    /// 384: Corrected invoice.
    Corrected,
    /// 386: Prepayment invoice.
    Prepayment,
    /// 389: Self-billed invoice.
    SelfBilled,
    /// Any other UNTDID 1001 code.
    Other(u16),
}

impl InvoiceTypeCode {
    pub fn code(&self) -> u16 {
        match self {
            Self::Partial => 326,
            Self::Invoice => 380,
            Self::CreditNote => 381,
            Self::Corrected => 384,
            Self::Prepayment => 386,
            Self::SelfBilled => 389,
            Self::Other(c) => *c,
        }
    }

    pub fn from_code(code: u16) -> Self {
        match code {
            326 => Self::Partial,
            380 => Self::Invoice,
            381 => Self::CreditNote,
            384 => Self::Corrected,
            386 => Self::Prepayment,
            389 => Self::SelfBilled,
            c => Self::Other(c),
        }
    }
}

impl PartialEq for InvoiceTypeCode {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code()
    }
}

impl Eq for InvoiceTypeCode {}

impl Hash for InvoiceTypeCode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code().hash(state);
    }
}

impl From<u16> for InvoiceTypeCode {
    fn from(code: u16) -> Self {
        Self::from_code(code)
    }
}

impl From<InvoiceTypeCode> for u16 {
    fn from(value: InvoiceTypeCode) -> Self {
        value.code()
    }
}

/// BG-20 / BG-21 / BG-27 / BG-28: Allowance or charge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllowanceCharge {
    /// `true` for a charge, `false` for an allowance.
    pub is_charge: bool,
    /// BT-92 / BT-99 / BT-136 / BT-141: Amount.
    pub amount: Decimal,
    /// BT-93 / BT-100 / BT-137 / BT-142: Base amount.
    pub basis_amount: Option<Decimal>,
    /// BT-94 / BT-101 / BT-138 / BT-143: Percentage.
    pub percent: Option<Decimal>,
    /// BT-97 / BT-104 / BT-139 / BT-144: Reason text.
    pub reason: Option<String>,
    /// BT-98 / BT-105 / BT-140 / BT-145: Reason code (UNTDID 5189 or 7161).
    pub reason_code: Option<String>,
    /// BT-95 / BT-102: VAT category, document level only.
    pub tax_category: Option<TaxCategory>,
    /// BT-96 / BT-103: VAT rate, document level only.
    pub tax_rate: Option<Decimal>,
}

impl AllowanceCharge {
    pub fn has_reason(&self) -> bool {
        has_text(&self.reason) || has_text(&self.reason_code)
    }
}

/// BG-23: VAT breakdown entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeTax {
    /// Tax type code, always "VAT" for EN 16931.
    pub type_code: String,
    /// BT-118: VAT category.
    pub category: Option<TaxCategory>,
    /// BT-119: VAT rate; absent for "not subject to VAT".
    pub rate: Option<Decimal>,
    /// BT-116: Taxable amount.
    pub basis_amount: Decimal,
    /// BT-117: Tax amount.
    pub calculated_amount: Decimal,
    /// BT-120: Exemption reason text.
    pub exemption_reason: Option<String>,
    /// BT-121: Exemption reason code (VATEX).
    pub exemption_reason_code: Option<String>,
    /// BT-7: VAT point date.
    pub tax_point_date: Option<NaiveDate>,
    /// BT-8: VAT point date code (UNTDID 2005).
    pub due_date_type_code: Option<String>,
}

impl TradeTax {
    pub fn has_exemption(&self) -> bool {
        has_text(&self.exemption_reason) || has_text(&self.exemption_reason_code)
    }
}

/// BG-22: Document totals. Missing values are treated as zero in arithmetic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonetarySummation {
    /// BT-106: Sum of line net amounts.
    pub line_total: Option<Decimal>,
    /// BT-107: Sum of document-level allowances.
    pub allowance_total: Option<Decimal>,
    /// BT-108: Sum of document-level charges.
    pub charge_total: Option<Decimal>,
    /// BT-109: Total without VAT.
    pub tax_basis_total: Option<Decimal>,
    /// BT-110: Total VAT amount.
    pub tax_total: Option<Decimal>,
    /// BT-111: Total VAT amount in accounting currency.
    pub tax_total_accounting: Option<Decimal>,
    /// BT-112: Total with VAT.
    pub grand_total: Option<Decimal>,
    /// BT-113: Paid amount.
    pub prepaid: Option<Decimal>,
    /// BT-114: Rounding amount.
    pub rounding: Option<Decimal>,
    /// BT-115: Amount due for payment.
    pub due_payable: Option<Decimal>,
}

/// BG-16: Payment instructions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentMeans {
    /// BT-81: Payment means type code (UNTDID 4461).
    pub type_code: Option<PaymentMeansCode>,
    /// BT-82: Payment means text.
    pub information: Option<String>,
    /// BG-18: Payment card.
    pub card: Option<FinancialCard>,
    /// BG-17: Credit transfer account.
    pub payee_account: Option<PayeeAccount>,
    /// BT-91: Debited account (direct debit).
    pub payer_iban: Option<String>,
    /// BT-86: Payment service provider (BIC).
    pub payee_bic: Option<String>,
}

/// BG-18: Payment card information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialCard {
    /// BT-87: Last four to six digits of the card number.
    pub id: String,
    /// BT-88: Card holder name.
    pub cardholder: Option<String>,
}

/// BG-17: Credit transfer account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayeeAccount {
    /// BT-84: IBAN.
    pub iban: Option<String>,
    /// BT-85: Account name.
    pub name: Option<String>,
    /// BT-84: Proprietary account identifier, for non-IBAN accounts.
    pub proprietary_id: Option<String>,
}

impl PayeeAccount {
    pub fn has_identifier(&self) -> bool {
        has_text(&self.iban) || has_text(&self.proprietary_id)
    }
}

/// BT-20 / BT-9: Payment terms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentTerms {
    /// BT-20
    pub description: Option<String>,
    /// BT-9
    pub due_date: Option<NaiveDate>,
}

/// UNTDID 4461 payment means codes, compared and serialised by number.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "u16", into = "u16")]
pub enum PaymentMeansCode {
    /// 1: Instrument not defined.
    NotDefined,
    /// 10: In cash.
    Cash,
    /// 30: Credit transfer.
    CreditTransfer,
    /// 42: Payment to bank account.
    PaymentToBankAccount,
    /// 48: Bank card.
    BankCard,
    /// 49: Direct debit.
    DirectDebit,
    /// 54: Credit card.
    CreditCard,
    /// 55: Debit card.
    DebitCard,
    /// 57: Standing agreement.
    StandingAgreement,
    /// 58: SEPA credit transfer.
    SepaCreditTransfer,
    /// 59: SEPA direct debit.
    SepaDirectDebit,
    /// Any other UNTDID 4461 code.
    Other(u16),
}

impl PaymentMeansCode {
    pub fn code(&self) -> u16 {
        match self {
            Self::NotDefined => 1,
            Self::Cash => 10,
            Self::CreditTransfer => 30,
            Self::PaymentToBankAccount => 42,
            Self::BankCard => 48,
            Self::DirectDebit => 49,
            Self::CreditCard => 54,
            Self::DebitCard => 55,
            Self::StandingAgreement => 57,
            Self::SepaCreditTransfer => 58,
            Self::SepaDirectDebit => 59,
            Self::Other(c) => *c,
        }
    }

    pub fn from_code(code: u16) -> Self {
        match code {
            1 => Self::NotDefined,
            10 => Self::Cash,
            30 => Self::CreditTransfer,
            42 => Self::PaymentToBankAccount,
            48 => Self::BankCard,
            49 => Self::DirectDebit,
            54 => Self::CreditCard,
            55 => Self::DebitCard,
            57 => Self::StandingAgreement,
            58 => Self::SepaCreditTransfer,
            59 => Self::SepaDirectDebit,
            c => Self::Other(c),
        }
    }

    /// Codes 30 and 58.
    pub fn is_credit_transfer(&self) -> bool {
        matches!(self.code(), 30 | 58)
    }

    /// Codes 48, 54 and 55.
    pub fn is_card(&self) -> bool {
        matches!(self.code(), 48 | 54 | 55)
    }

    /// Codes 49 and 59.
    pub fn is_direct_debit(&self) -> bool {
        matches!(self.code(), 49 | 59)
    }
}

impl PartialEq for PaymentMeansCode {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code()
    }
}

impl Eq for PaymentMeansCode {}

impl Hash for PaymentMeansCode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code().hash(state);
    }
}

impl From<u16> for PaymentMeansCode {
    fn from(code: u16) -> Self {
        Self::from_code(code)
    }
}

impl From<PaymentMeansCode> for u16 {
    fn from(value: PaymentMeansCode) -> Self {
        value.code()
    }
}

//! Catalog of every business rule the validator can report.
//!
//! Each entry names the rule code, the EN 16931 business terms it covers,
//! its default severity and a short description. [`Violation::new`]
//! resolves these by code.
//!
//! [`Violation::new`]: super::Violation::new

use super::error::Severity;

/// A catalogued business rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub code: &'static str,
    pub fields: &'static [&'static str],
    pub severity: Severity,
    pub description: &'static str,
}

const fn err(
    code: &'static str,
    fields: &'static [&'static str],
    description: &'static str,
) -> Rule {
    Rule {
        code,
        fields,
        severity: Severity::Error,
        description,
    }
}

const fn warn(
    code: &'static str,
    fields: &'static [&'static str],
    description: &'static str,
) -> Rule {
    Rule {
        code,
        fields,
        severity: Severity::Warning,
        description,
    }
}

/// Look up a rule by its code.
pub fn lookup(code: &str) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.code == code)
}

/// Code used for arithmetic checks that no official rule covers.
pub const CHECK: &str = "Check";

pub static RULES: &[Rule] = &[
    // Core presence and integrity
    err("BR-1", &["BT-24"], "An invoice shall have a specification identifier"),
    err("BR-2", &["BT-1"], "An invoice shall have an invoice number"),
    err("BR-3", &["BT-2"], "An invoice shall have an invoice issue date"),
    err("BR-4", &["BT-3"], "An invoice shall have an invoice type code"),
    err("BR-5", &["BT-5"], "An invoice shall have an invoice currency code"),
    err("BR-6", &["BT-27"], "An invoice shall contain the seller name"),
    err("BR-7", &["BT-44"], "An invoice shall contain the buyer name"),
    err("BR-8", &["BG-5"], "An invoice shall contain the seller postal address"),
    err("BR-9", &["BT-40"], "The seller postal address shall contain a country code"),
    err("BR-10", &["BG-8"], "An invoice shall contain the buyer postal address"),
    err("BR-11", &["BT-55"], "The buyer postal address shall contain a country code"),
    err("BR-12", &["BT-106"], "An invoice shall have the sum of invoice line net amounts"),
    err("BR-13", &["BT-109"], "An invoice shall have the invoice total amount without VAT"),
    err("BR-14", &["BT-112"], "An invoice shall have the invoice total amount with VAT"),
    err("BR-15", &["BT-115"], "An invoice shall have the amount due for payment"),
    err("BR-16", &["BG-25"], "An invoice shall have at least one invoice line"),
    err("BR-17", &["BT-59"], "The payee name shall be provided if the payee differs from the seller"),
    err("BR-18", &["BT-62"], "The seller tax representative name shall be provided"),
    err("BR-19", &["BG-12"], "The seller tax representative postal address shall be provided"),
    err("BR-20", &["BT-69"], "The seller tax representative postal address shall contain a country code"),
    err("BR-21", &["BT-126"], "Each invoice line shall have an invoice line identifier"),
    err("BR-22", &["BT-129"], "Each invoice line shall have a positive invoiced quantity"),
    err("BR-23", &["BT-130"], "An invoice line shall have an invoiced quantity unit of measure code"),
    err("BR-24", &["BT-131"], "Each invoice line shall have an invoice line net amount"),
    err("BR-25", &["BT-153"], "Each invoice line shall contain the item name"),
    err("BR-26", &["BT-146"], "Each invoice line shall contain the item net price"),
    err("BR-27", &["BT-146"], "The item net price shall not be negative"),
    err("BR-28", &["BT-148"], "The item gross price shall not be negative"),
    err("BR-29", &["BT-73", "BT-74"], "The invoicing period end date shall not be before its start date"),
    err("BR-30", &["BT-134", "BT-135"], "The invoice line period end date shall not be before its start date"),
    err("BR-31", &["BT-92"], "Each document level allowance shall have an allowance amount"),
    err("BR-32", &["BT-95"], "Each document level allowance shall have a VAT category code"),
    err("BR-33", &["BT-97", "BT-98"], "Each document level allowance shall have a reason or a reason code"),
    err("BR-36", &["BT-99"], "Each document level charge shall have a charge amount"),
    err("BR-37", &["BT-102"], "Each document level charge shall have a VAT category code"),
    err("BR-38", &["BT-104", "BT-105"], "Each document level charge shall have a reason or a reason code"),
    err("BR-41", &["BT-136"], "Each invoice line allowance shall have an allowance amount"),
    err("BR-42", &["BT-139", "BT-140"], "Each invoice line allowance shall have a reason or a reason code"),
    err("BR-43", &["BT-141"], "Each invoice line charge shall have a charge amount"),
    err("BR-44", &["BT-144", "BT-145"], "Each invoice line charge shall have a reason or a reason code"),
    err("BR-45", &["BT-116"], "The VAT category taxable amount shall equal the matching line, allowance and charge amounts"),
    err("BR-46", &["BT-117"], "Each VAT breakdown shall have a VAT category tax amount"),
    err("BR-47", &["BT-118"], "Each VAT breakdown shall be defined through a VAT category code"),
    err("BR-48", &["BT-119"], "Each VAT breakdown shall have a VAT category rate, except if not subject to VAT"),
    err("BR-49", &["BT-81"], "A payment instruction shall specify the payment means type code"),
    err("BR-50", &["BT-84"], "A payment account identifier shall be present if credit transfer information is provided"),
    warn("BR-51", &["BT-87"], "Only the last four to six digits of the payment card number should be shown"),
    err("BR-52", &["BT-122"], "Each additional supporting document shall contain a document reference"),
    err("BR-53", &["BT-111"], "If the VAT accounting currency code is present, the total VAT amount in accounting currency shall be provided"),
    err("BR-54", &["BT-160", "BT-161"], "Each item attribute shall contain a name and a value"),
    err("BR-55", &["BT-25"], "Each preceding invoice reference shall contain a preceding invoice number"),
    err("BR-56", &["BT-63"], "Each seller tax representative party shall have a VAT identifier"),
    err("BR-57", &["BT-80"], "Each deliver to address shall contain a country code"),
    err("BR-61", &["BT-84", "BT-81"], "For credit transfer the payment account identifier shall be present"),
    err("BR-62", &["BT-34"], "The seller electronic address shall have a scheme identifier"),
    err("BR-63", &["BT-49"], "The buyer electronic address shall have a scheme identifier"),
    err("BR-64", &["BT-157"], "The item standard identifier shall have a scheme identifier"),
    err("BR-65", &["BT-158"], "The item classification identifier shall have a scheme identifier"),
    // Conditions
    err("BR-CO-3", &["BT-7", "BT-8"], "Value added tax point date and value added tax point date code are mutually exclusive"),
    err("BR-CO-4", &["BT-151"], "Each invoice line shall be categorized with an invoiced item VAT category code"),
    err("BR-CO-9", &["BT-31", "BT-63", "BT-48"], "A VAT identifier shall have an ISO 3166-1 alpha-2 prefix"),
    err("BR-CO-10", &["BT-106", "BT-131"], "Sum of invoice line net amounts = sum of invoice line net amounts"),
    err("BR-CO-11", &["BT-107", "BT-92"], "Sum of allowances on document level = sum of document level allowance amounts"),
    err("BR-CO-12", &["BT-108", "BT-99"], "Sum of charges on document level = sum of document level charge amounts"),
    err("BR-CO-13", &["BT-109"], "Invoice total without VAT = line net sum - allowances + charges"),
    err("BR-CO-14", &["BT-110", "BT-117"], "Invoice total VAT amount = sum of VAT category tax amounts"),
    err("BR-CO-15", &["BT-112"], "Invoice total with VAT = invoice total without VAT + invoice total VAT amount"),
    err("BR-CO-16", &["BT-115"], "Amount due for payment = total with VAT - paid amount + rounding amount"),
    err("BR-CO-17", &["BT-117"], "VAT category tax amount = VAT category taxable amount x VAT rate / 100, rounded to two decimals"),
    err("BR-CO-18", &["BG-23"], "An invoice shall have at least one VAT breakdown group"),
    err("BR-CO-19", &["BG-14"], "If the invoicing period is used, its start date or end date shall be filled"),
    err("BR-CO-20", &["BG-26"], "If the invoice line period is used, its start date or end date shall be filled"),
    err("BR-CO-25", &["BT-9", "BT-20"], "If the amount due for payment is positive, a payment due date or payment terms shall be present"),
    err("BR-CO-26", &["BT-29", "BT-30", "BT-31"], "The seller identifier, legal registration identifier or VAT identifier shall be present"),
    // Decimal places
    err("BR-DEC-01", &["BT-92"], "Document level allowance amount has at most two decimals"),
    err("BR-DEC-02", &["BT-93"], "Document level allowance base amount has at most two decimals"),
    err("BR-DEC-05", &["BT-99"], "Document level charge amount has at most two decimals"),
    err("BR-DEC-06", &["BT-100"], "Document level charge base amount has at most two decimals"),
    err("BR-DEC-09", &["BT-106"], "Sum of invoice line net amounts has at most two decimals"),
    err("BR-DEC-10", &["BT-107"], "Sum of allowances on document level has at most two decimals"),
    err("BR-DEC-11", &["BT-108"], "Sum of charges on document level has at most two decimals"),
    err("BR-DEC-12", &["BT-109"], "Invoice total amount without VAT has at most two decimals"),
    err("BR-DEC-13", &["BT-110"], "Invoice total VAT amount has at most two decimals"),
    err("BR-DEC-14", &["BT-112"], "Invoice total amount with VAT has at most two decimals"),
    err("BR-DEC-15", &["BT-111"], "Invoice total VAT amount in accounting currency has at most two decimals"),
    err("BR-DEC-16", &["BT-113"], "Paid amount has at most two decimals"),
    err("BR-DEC-17", &["BT-114"], "Rounding amount has at most two decimals"),
    err("BR-DEC-18", &["BT-115"], "Amount due for payment has at most two decimals"),
    err("BR-DEC-19", &["BT-116"], "VAT category taxable amount has at most two decimals"),
    err("BR-DEC-20", &["BT-117"], "VAT category tax amount has at most two decimals"),
    err("BR-DEC-23", &["BT-131"], "Invoice line net amount has at most two decimals"),
    err("BR-DEC-24", &["BT-136"], "Invoice line allowance amount has at most two decimals"),
    err("BR-DEC-25", &["BT-137"], "Invoice line allowance base amount has at most two decimals"),
    err("BR-DEC-27", &["BT-141"], "Invoice line charge amount has at most two decimals"),
    err("BR-DEC-28", &["BT-142"], "Invoice line charge base amount has at most two decimals"),
    err("BR-DEC-VAT-RATE", &["BT-119"], "VAT category rate has at most four decimals"),
    // Code lists
    err("BR-CL-01", &["BT-3"], "The document type code shall be coded using UNTDID 1001"),
    err("BR-CL-04", &["BT-5"], "The invoice currency code shall be coded using ISO 4217"),
    err("BR-CL-05", &["BT-6"], "The tax currency code shall be coded using ISO 4217"),
    err("BR-CL-14", &["BT-40", "BT-55", "BT-69", "BT-80"], "Country codes shall be coded using ISO 3166-1"),
    err("BR-CL-18", &["BT-118", "BT-151", "BT-95", "BT-102"], "VAT category codes shall be coded using UNCL5305"),
    warn("BR-CL-19", &["BT-98"], "Allowance reason codes should be coded using UNTDID 5189"),
    warn("BR-CL-20", &["BT-105"], "Charge reason codes should be coded using UNTDID 7161"),
    warn("BR-CL-23", &["BT-130"], "Unit codes should be coded using UN/ECE Recommendation 20 and 21"),
    // Standard rated
    err("BR-S-1", &["BG-23"], "An invoice using standard rate VAT shall have a standard rated VAT breakdown"),
    err("BR-S-2", &["BT-31", "BT-32", "BT-63"], "A standard rated invoice line requires a seller VAT identifier, tax registration or tax representative VAT identifier"),
    err("BR-S-3", &["BT-31", "BT-32", "BT-63"], "A standard rated document allowance requires a seller VAT identifier, tax registration or tax representative VAT identifier"),
    err("BR-S-4", &["BT-31", "BT-32", "BT-63"], "A standard rated document charge requires a seller VAT identifier, tax registration or tax representative VAT identifier"),
    err("BR-S-5", &["BT-152"], "A standard rated invoice line shall have a VAT rate greater than zero"),
    err("BR-S-6", &["BT-96"], "A standard rated document allowance shall have a VAT rate greater than zero"),
    err("BR-S-7", &["BT-103"], "A standard rated document charge shall have a VAT rate greater than zero"),
    err("BR-S-8", &["BT-116"], "Standard rated taxable amount shall match the lines, allowances and charges at that rate"),
    err("BR-S-9", &["BT-117"], "Standard rated VAT amount shall equal the taxable amount multiplied by the rate"),
    err("BR-S-10", &["BT-120", "BT-121"], "A standard rated VAT breakdown shall not have an exemption reason"),
    // Reverse charge
    err("BR-AE-1", &["BG-23"], "An invoice using reverse charge shall have exactly one reverse charge VAT breakdown"),
    err("BR-AE-2", &["BT-31", "BT-32", "BT-63", "BT-48", "BT-47"], "A reverse charge invoice line requires seller and buyer VAT or legal identifiers"),
    err("BR-AE-3", &["BT-31", "BT-32", "BT-63", "BT-48", "BT-47"], "A reverse charge document allowance requires seller and buyer VAT or legal identifiers"),
    err("BR-AE-4", &["BT-31", "BT-32", "BT-63", "BT-48", "BT-47"], "A reverse charge document charge requires seller and buyer VAT or legal identifiers"),
    err("BR-AE-5", &["BT-152"], "A reverse charge invoice line shall have a VAT rate of zero"),
    err("BR-AE-6", &["BT-96"], "A reverse charge document allowance shall have a VAT rate of zero"),
    err("BR-AE-7", &["BT-103"], "A reverse charge document charge shall have a VAT rate of zero"),
    err("BR-AE-8", &["BT-116"], "Reverse charge taxable amount shall match the reverse charge lines, allowances and charges"),
    err("BR-AE-9", &["BT-117"], "Reverse charge VAT amount shall be zero"),
    err("BR-AE-10", &["BT-120", "BT-121"], "A reverse charge VAT breakdown shall have an exemption reason or reason code"),
    // Exempt
    err("BR-E-1", &["BG-23"], "An invoice using exempt VAT shall have exactly one exempt VAT breakdown"),
    err("BR-E-2", &["BT-31", "BT-32", "BT-63"], "An exempt invoice line requires a seller VAT identifier, tax registration or tax representative VAT identifier"),
    err("BR-E-3", &["BT-31", "BT-32", "BT-63"], "An exempt document allowance requires a seller VAT identifier, tax registration or tax representative VAT identifier"),
    err("BR-E-4", &["BT-31", "BT-32", "BT-63"], "An exempt document charge requires a seller VAT identifier, tax registration or tax representative VAT identifier"),
    err("BR-E-5", &["BT-152"], "An exempt invoice line shall have a VAT rate of zero"),
    err("BR-E-6", &["BT-96"], "An exempt document allowance shall have a VAT rate of zero"),
    err("BR-E-7", &["BT-103"], "An exempt document charge shall have a VAT rate of zero"),
    err("BR-E-8", &["BT-116"], "Exempt taxable amount shall match the exempt lines, allowances and charges"),
    err("BR-E-9", &["BT-117"], "Exempt VAT amount shall be zero"),
    err("BR-E-10", &["BT-120", "BT-121"], "An exempt VAT breakdown shall have an exemption reason or reason code"),
    // Zero rated
    err("BR-Z-1", &["BG-23"], "An invoice using zero rated VAT shall have exactly one zero rated VAT breakdown"),
    err("BR-Z-2", &["BT-31", "BT-32", "BT-63"], "A zero rated invoice line requires a seller VAT identifier, tax registration or tax representative VAT identifier"),
    err("BR-Z-3", &["BT-31", "BT-32", "BT-63"], "A zero rated document allowance requires a seller VAT identifier, tax registration or tax representative VAT identifier"),
    err("BR-Z-4", &["BT-31", "BT-32", "BT-63"], "A zero rated document charge requires a seller VAT identifier, tax registration or tax representative VAT identifier"),
    err("BR-Z-5", &["BT-152"], "A zero rated invoice line shall have a VAT rate of zero"),
    err("BR-Z-6", &["BT-96"], "A zero rated document allowance shall have a VAT rate of zero"),
    err("BR-Z-7", &["BT-103"], "A zero rated document charge shall have a VAT rate of zero"),
    err("BR-Z-8", &["BT-116"], "Zero rated taxable amount shall match the zero rated lines, allowances and charges"),
    err("BR-Z-9", &["BT-117"], "Zero rated VAT amount shall be zero"),
    err("BR-Z-10", &["BT-120", "BT-121"], "A zero rated VAT breakdown shall not have an exemption reason"),
    // Export outside the EU
    err("BR-G-1", &["BG-23"], "An invoice using export VAT shall have exactly one export VAT breakdown"),
    err("BR-G-2", &["BT-31", "BT-63"], "An export invoice line requires a seller VAT identifier or tax representative VAT identifier"),
    err("BR-G-3", &["BT-31", "BT-63"], "An export document allowance requires a seller VAT identifier or tax representative VAT identifier"),
    err("BR-G-4", &["BT-31", "BT-63"], "An export document charge requires a seller VAT identifier or tax representative VAT identifier"),
    err("BR-G-5", &["BT-152"], "An export invoice line shall have a VAT rate of zero"),
    err("BR-G-6", &["BT-96"], "An export document allowance shall have a VAT rate of zero"),
    err("BR-G-7", &["BT-103"], "An export document charge shall have a VAT rate of zero"),
    err("BR-G-8", &["BT-116"], "Export taxable amount shall match the export lines, allowances and charges"),
    err("BR-G-9", &["BT-117"], "Export VAT amount shall be zero"),
    err("BR-G-10", &["BT-120", "BT-121"], "An export VAT breakdown shall have an exemption reason or reason code"),
    // Intra-community supply
    err("BR-IC-1", &["BG-23"], "An invoice using intra-community supply shall have exactly one intra-community VAT breakdown"),
    err("BR-IC-2", &["BT-31", "BT-63", "BT-48"], "An intra-community invoice line requires seller and buyer VAT identifiers"),
    err("BR-IC-3", &["BT-31", "BT-63", "BT-48"], "An intra-community document allowance requires seller and buyer VAT identifiers"),
    err("BR-IC-4", &["BT-31", "BT-63", "BT-48"], "An intra-community document charge requires seller and buyer VAT identifiers"),
    err("BR-IC-5", &["BT-152"], "An intra-community invoice line shall have a VAT rate of zero"),
    err("BR-IC-6", &["BT-96"], "An intra-community document allowance shall have a VAT rate of zero"),
    err("BR-IC-7", &["BT-103"], "An intra-community document charge shall have a VAT rate of zero"),
    err("BR-IC-8", &["BT-116"], "Intra-community taxable amount shall match the intra-community lines, allowances and charges"),
    err("BR-IC-9", &["BT-117"], "Intra-community VAT amount shall be zero"),
    err("BR-IC-10", &["BT-120", "BT-121"], "An intra-community VAT breakdown shall have an exemption reason or reason code"),
    err("BR-IC-11", &["BT-72", "BG-14"], "An intra-community supply shall have an actual delivery date or an invoicing period"),
    err("BR-IC-12", &["BT-80"], "An intra-community supply shall have a deliver to country code"),
    // Canary Islands
    err("BR-IG-1", &["BG-23"], "An invoice using IGIC shall have at least one IGIC VAT breakdown"),
    err("BR-IG-2", &["BT-31", "BT-32", "BT-63"], "An IGIC invoice line requires a seller VAT identifier, tax registration or tax representative VAT identifier"),
    err("BR-IG-3", &["BT-31", "BT-32", "BT-63"], "An IGIC document allowance requires a seller VAT identifier, tax registration or tax representative VAT identifier"),
    err("BR-IG-4", &["BT-31", "BT-32", "BT-63"], "An IGIC document charge requires a seller VAT identifier, tax registration or tax representative VAT identifier"),
    err("BR-IG-5", &["BT-152"], "An IGIC invoice line shall have a VAT rate of zero or greater"),
    err("BR-IG-6", &["BT-96"], "An IGIC document allowance shall have a VAT rate of zero or greater"),
    err("BR-IG-7", &["BT-103"], "An IGIC document charge shall have a VAT rate of zero or greater"),
    err("BR-IG-8", &["BT-116"], "IGIC taxable amount shall match the lines, allowances and charges at that rate"),
    err("BR-IG-9", &["BT-117"], "IGIC VAT amount shall equal the taxable amount multiplied by the rate"),
    err("BR-IG-10", &["BT-120", "BT-121"], "An IGIC VAT breakdown shall not have an exemption reason"),
    // Ceuta and Melilla
    err("BR-IP-1", &["BG-23"], "An invoice using IPSI shall have at least one IPSI VAT breakdown"),
    err("BR-IP-2", &["BT-31", "BT-32", "BT-63"], "An IPSI invoice line requires a seller VAT identifier, tax registration or tax representative VAT identifier"),
    err("BR-IP-3", &["BT-31", "BT-32", "BT-63"], "An IPSI document allowance requires a seller VAT identifier, tax registration or tax representative VAT identifier"),
    err("BR-IP-4", &["BT-31", "BT-32", "BT-63"], "An IPSI document charge requires a seller VAT identifier, tax registration or tax representative VAT identifier"),
    err("BR-IP-5", &["BT-152"], "An IPSI invoice line shall have a VAT rate of zero or greater"),
    err("BR-IP-6", &["BT-96"], "An IPSI document allowance shall have a VAT rate of zero or greater"),
    err("BR-IP-7", &["BT-103"], "An IPSI document charge shall have a VAT rate of zero or greater"),
    err("BR-IP-8", &["BT-116"], "IPSI taxable amount shall match the lines, allowances and charges at that rate"),
    err("BR-IP-9", &["BT-117"], "IPSI VAT amount shall equal the taxable amount multiplied by the rate"),
    err("BR-IP-10", &["BT-120", "BT-121"], "An IPSI VAT breakdown shall not have an exemption reason"),
    // Not subject to VAT
    err("BR-O-1", &["BG-23"], "An invoice not subject to VAT shall have exactly one not-subject-to-VAT breakdown"),
    err("BR-O-2", &["BT-31", "BT-63", "BT-48"], "A not-subject-to-VAT invoice line requires a seller or buyer identifier"),
    err("BR-O-3", &["BT-31", "BT-63", "BT-48"], "A not-subject-to-VAT document allowance requires a seller or buyer identifier"),
    err("BR-O-4", &["BT-31", "BT-63", "BT-48"], "A not-subject-to-VAT document charge requires a seller or buyer identifier"),
    err("BR-O-5", &["BT-152"], "A not-subject-to-VAT invoice line shall not contain a VAT rate"),
    err("BR-O-6", &["BT-96"], "A not-subject-to-VAT document allowance shall not contain a VAT rate"),
    err("BR-O-7", &["BT-103"], "A not-subject-to-VAT document charge shall not contain a VAT rate"),
    err("BR-O-8", &["BT-116"], "Not-subject-to-VAT taxable amount shall match the matching lines, allowances and charges"),
    err("BR-O-9", &["BT-117"], "Not-subject-to-VAT tax amount shall be zero"),
    err("BR-O-10", &["BT-120", "BT-121"], "A not-subject-to-VAT breakdown shall have an exemption reason or reason code"),
    err("BR-O-11", &["BG-23"], "An invoice with a not-subject-to-VAT breakdown shall not contain other VAT breakdowns"),
    err("BR-O-12", &["BT-151"], "An invoice with a not-subject-to-VAT breakdown shall not contain lines in other VAT categories"),
    err("BR-O-13", &["BT-95"], "An invoice with a not-subject-to-VAT breakdown shall not contain document allowances in other VAT categories"),
    err("BR-O-14", &["BT-102"], "An invoice with a not-subject-to-VAT breakdown shall not contain document charges in other VAT categories"),
    // Unofficial arithmetic checks
    err(CHECK, &[], "Calculated amounts are inconsistent"),
    // PEPPOL BIS Billing 3.0
    err("PEPPOL-EN16931-R001", &["BT-23"], "Business process MUST be provided"),
    err("PEPPOL-EN16931-R002", &["BG-1"], "No more than one note is allowed on document level, unless both seller and buyer are German"),
    err("PEPPOL-EN16931-R003", &["BT-10", "BT-13"], "A buyer reference or purchase order reference MUST be provided"),
    err("PEPPOL-EN16931-R004", &["BT-24"], "Specification identifier MUST have the value 'urn:cen.eu:en16931:2017#compliant#urn:fdc:peppol.eu:2017:poacc:billing:3.0'"),
    err("PEPPOL-EN16931-R005", &["BT-6"], "VAT accounting currency code MUST be different from invoice currency code when provided"),
    err("PEPPOL-EN16931-R006", &["BT-18"], "Only one invoiced object is allowed on document level"),
    err("PEPPOL-EN16931-R007", &["BT-23"], "Business process MUST be in the format 'urn:fdc:peppol.eu:2017:poacc:billing:NN:1.0'"),
    err("PEPPOL-EN16931-R008", &[], "Document MUST not contain empty elements"),
    err("PEPPOL-EN16931-R010", &["BT-49"], "Buyer electronic address MUST be provided"),
    err("PEPPOL-EN16931-R020", &["BT-34"], "Seller electronic address MUST be provided"),
    err("PEPPOL-EN16931-R040", &["BT-92", "BT-93", "BT-94"], "Allowance or charge amount MUST equal base amount x percentage / 100 if base amount and percentage exist"),
    err("PEPPOL-EN16931-R041", &["BT-93", "BT-94"], "Allowance or charge base amount MUST be provided when allowance or charge percentage is provided"),
    err("PEPPOL-EN16931-R042", &["BT-93", "BT-94"], "Allowance or charge percentage MUST be provided when allowance or charge base amount is provided"),
    err("PEPPOL-EN16931-R044", &["BT-147"], "Charge on price level is NOT allowed"),
    err("PEPPOL-EN16931-R046", &["BT-146", "BT-147", "BT-148"], "Item net price MUST equal gross price - allowance amount when gross price is provided"),
    err("PEPPOL-EN16931-R053", &["BT-110"], "Only one tax total with tax subtotals MUST be provided"),
    err("PEPPOL-EN16931-R054", &["BT-111"], "Only one tax total without tax subtotals MUST be provided when tax currency code is provided"),
    err("PEPPOL-EN16931-R055", &["BT-110", "BT-111"], "Invoice total VAT amount and invoice total VAT amount in accounting currency MUST have the same operational sign"),
    err("PEPPOL-EN16931-R061", &["BT-89"], "Mandate reference MUST be provided for direct debit"),
    err("PEPPOL-EN16931-R110", &["BT-134"], "Start date of line period MUST be within invoice period"),
    err("PEPPOL-EN16931-R111", &["BT-135"], "End date of line period MUST be within invoice period"),
    err("PEPPOL-EN16931-R120", &["BT-131"], "Invoice line net amount MUST equal quantity x (net price / price base quantity) + charges - allowances"),
    err("PEPPOL-EN16931-R121", &["BT-149"], "Base quantity MUST be a positive number above zero"),
    err("PEPPOL-EN16931-P0100", &["BT-3"], "Invoice type code MUST be set according to the profile"),
    err("PEPPOL-COMMON-R040", &["BT-29", "BT-34", "BT-46", "BT-49"], "GLN must have a valid format according to GS1 rules"),
    err("PEPPOL-EN16931-CL008", &["BT-34", "BT-49"], "Electronic address identifier scheme must be from the codelist 'Electronic Address Identifier Scheme'"),
    err("NL-R-001", &["BT-25"], "For Dutch suppliers, a credit note MUST refer to the preceding invoice"),
    err("NL-R-002", &["BG-5"], "For Dutch suppliers the seller address MUST contain street name, city and post code"),
    err("NL-R-003", &["BT-30"], "For Dutch suppliers the seller legal registration identifier MUST be provided with scheme 0106 (KVK) or 0190 (OIN)"),
    err("NL-R-004", &["BG-8"], "For Dutch suppliers with a Dutch buyer the buyer address MUST contain street name, city and post code"),
    err("NL-R-007", &["BT-81"], "For Dutch suppliers the payment means code MUST be one of 30, 48, 49, 57, 58 or 59"),
    warn("NO-R-002", &["BT-30"], "For Norwegian suppliers the legal entity should include 'Foretaksregisteret'"),
    // XRechnung (CIUS Germany)
    err("BR-DE-1", &["BG-16"], "An invoice shall contain payment instructions"),
    err("BR-DE-2", &["BG-6"], "The seller contact group shall be transmitted"),
    err("BR-DE-3", &["BT-37"], "The seller city shall be transmitted"),
    err("BR-DE-4", &["BT-38"], "The seller post code shall be transmitted"),
    err("BR-DE-5", &["BT-41"], "The seller contact point shall be transmitted"),
    err("BR-DE-6", &["BT-42"], "The seller contact telephone number shall be transmitted"),
    err("BR-DE-7", &["BT-43"], "The seller contact email address shall be transmitted"),
    err("BR-DE-8", &["BT-52"], "The buyer city shall be transmitted"),
    err("BR-DE-9", &["BT-53"], "The buyer post code shall be transmitted"),
    err("BR-DE-10", &["BT-77"], "The deliver to city shall be transmitted if the deliver to address is given"),
    err("BR-DE-11", &["BT-78"], "The deliver to post code shall be transmitted if the deliver to address is given"),
    err("BR-DE-14", &["BT-119"], "The VAT category rate shall be transmitted"),
    err("BR-DE-15", &["BT-10"], "The buyer reference shall be transmitted"),
    err("BR-DE-16", &["BT-31", "BT-32", "BT-63"], "Taxable categories require a seller VAT identifier, tax number or tax representative"),
    err("BR-DE-17", &["BT-3"], "The invoice type code shall be one of 326, 380, 384, 389, 381, 875, 876, 877"),
    err("BR-DE-18", &["BT-20"], "Cash discount terms shall follow the #SKONTO# structure"),
    warn("BR-DE-19", &["BT-84"], "The payment account identifier should be a valid IBAN for SEPA credit transfer"),
    warn("BR-DE-20", &["BT-91"], "The debited account identifier should be a valid IBAN for SEPA direct debit"),
    warn("BR-DE-21", &["BT-24"], "The specification identifier should identify XRechnung"),
    err("BR-DE-22", &["BT-125"], "Attached document filenames shall be unique"),
    err("BR-DE-23-a", &["BG-17"], "Credit transfer information shall be transmitted for payment means 30 or 58"),
    err("BR-DE-23-b", &["BG-18", "BG-19"], "Card and direct debit information shall not be transmitted for payment means 30 or 58"),
    err("BR-DE-24-a", &["BG-18"], "Payment card information shall be transmitted for payment means 48, 54 or 55"),
    err("BR-DE-24-b", &["BG-17", "BG-19"], "Credit transfer and direct debit information shall not be transmitted for payment means 48, 54 or 55"),
    err("BR-DE-25-a", &["BG-19"], "Direct debit information shall be transmitted for payment means 59"),
    err("BR-DE-25-b", &["BG-17", "BG-18"], "Credit transfer and card information shall not be transmitted for payment means 59"),
    warn("BR-DE-26", &["BG-3"], "A corrected invoice should reference the preceding invoice"),
    warn("BR-DE-27", &["BT-42"], "The seller contact telephone number should contain at least three digits"),
    warn("BR-DE-28", &["BT-43"], "The seller contact email address should be a valid email address"),
    err("BR-DE-30", &["BT-90"], "The bank assigned creditor identifier shall be transmitted for direct debit"),
    err("BR-DE-31", &["BT-91"], "The debited account identifier shall be transmitted for direct debit"),
];

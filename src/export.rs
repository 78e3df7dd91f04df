//! JSON export of a converted filing.
//!
//! The offline filing tool expects the document pretty-printed with a
//! two-space indent and amounts as plain JSON numbers.

use crate::core::{FilingMeta, Gstr1Error, OutputDocument};

/// Serialize a document as pretty-printed JSON.
///
/// ```
/// use gstr1::{FilingMeta, OutputDocument};
/// use gstr1::export::to_json_pretty;
///
/// let doc = OutputDocument::empty(&FilingMeta::new("27ABCDE1234F1Z5", "042024"));
/// let json = to_json_pretty(&doc).unwrap();
/// assert!(json.starts_with("{\n  \"gstin\": \"27ABCDE1234F1Z5\""));
/// ```
pub fn to_json_pretty(document: &OutputDocument) -> Result<String, Gstr1Error> {
    serde_json::to_string_pretty(document).map_err(|e| Gstr1Error::Json(e.to_string()))
}

/// Compact single-line JSON.
pub fn to_json(document: &OutputDocument) -> Result<String, Gstr1Error> {
    serde_json::to_string(document).map_err(|e| Gstr1Error::Json(e.to_string()))
}

/// Read a previously exported document back.
pub fn from_json(json: &str) -> Result<OutputDocument, Gstr1Error> {
    serde_json::from_str(json).map_err(|e| Gstr1Error::Json(e.to_string()))
}

/// Download name for an exported filing: `gstr1_{gstin}_{fp}.json`.
pub fn suggested_filename(meta: &FilingMeta) -> String {
    format!("gstr1_{}_{}.json", meta.gstin, meta.fp)
}

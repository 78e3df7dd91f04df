use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::amount;

/// Schema version written when the caller does not supply one.
pub const DEFAULT_VERSION: &str = "GST3.2.3";

/// Placeholder written to the `hash` field. The offline tool recomputes it.
pub const HASH_PLACEHOLDER: &str = "hash";

/// A pasted spreadsheet: one header row and a matrix of string cells.
///
/// Tables produced by [`parse_table`](crate::table::parse_table) always have
/// rows exactly as wide as the header. Hand-built tables may not; run
/// [`validate_table`](crate::table::validate_table) before converting them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ParsedTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Number of header columns.
    pub fn width(&self) -> usize {
        self.headers.len()
    }
}

/// Filer information supplied by the caller, not derived from the table.
///
/// ```
/// use gstr1::FilingMeta;
///
/// let meta = FilingMeta::new("27ABCDE1234F1Z5", "042024").version("GST2.4");
/// assert_eq!(meta.supplier_state(), "27");
/// assert_eq!(meta.version_or_default(), "GST2.4");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingMeta {
    /// Supplier GSTIN (15 characters).
    pub gstin: String,
    /// Filing period, MMYYYY (e.g. "042024" for April 2024).
    pub fp: String,
    /// Schema version; [`DEFAULT_VERSION`] when `None`.
    pub version: Option<String>,
}

impl FilingMeta {
    pub fn new(gstin: impl Into<String>, fp: impl Into<String>) -> Self {
        Self {
            gstin: gstin.into(),
            fp: fp.into(),
            version: None,
        }
    }

    /// Set the schema version.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn version_or_default(&self) -> &str {
        match self.version.as_deref() {
            Some(v) if !v.is_empty() => v,
            _ => DEFAULT_VERSION,
        }
    }

    /// Supplier state code: the first two characters of the GSTIN.
    /// Empty when the GSTIN is shorter than two characters.
    pub fn supplier_state(&self) -> &str {
        self.gstin.get(..2).unwrap_or("")
    }
}

/// Root of the GSTR-1 filing JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputDocument {
    pub gstin: String,
    /// Filing period (MMYYYY).
    pub fp: String,
    pub version: String,
    /// Always [`HASH_PLACEHOLDER`].
    pub hash: String,
    pub b2b: Vec<B2bGroup>,
}

impl OutputDocument {
    /// An empty document for the given filer.
    pub fn empty(meta: &FilingMeta) -> Self {
        Self {
            gstin: meta.gstin.clone(),
            fp: meta.fp.clone(),
            version: meta.version_or_default().to_string(),
            hash: HASH_PLACEHOLDER.to_string(),
            b2b: Vec::new(),
        }
    }

    /// Total number of invoices across all recipients.
    pub fn invoice_count(&self) -> usize {
        self.b2b.iter().map(|g| g.inv.len()).sum()
    }
}

/// All B2B invoices issued to one recipient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct B2bGroup {
    /// Recipient GSTIN (uppercased).
    pub ctin: String,
    pub inv: Vec<InvoiceRecord>,
}

/// One invoice. Identified within its group by `(inum, idt)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Invoice number.
    pub inum: String,
    /// Invoice date, DD-MM-YYYY.
    pub idt: String,
    /// Invoice value.
    #[serde(with = "amount::number")]
    pub val: Decimal,
    /// Place of supply, 2-digit state code.
    pub pos: String,
    /// Reverse charge flag.
    pub rchrg: ReverseCharge,
    pub inv_typ: InvoiceType,
    pub itms: Vec<LineItem>,
}

/// One rate line of an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item number: 1801 for the first item of an invoice, then count + 1.
    pub num: u32,
    pub itm_det: ItemDetails,
}

/// Tax details of a line item. Zero tax components are omitted, except
/// cess which is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDetails {
    /// Taxable value.
    #[serde(with = "amount::number")]
    pub txval: Decimal,
    /// Rate in percent.
    #[serde(with = "amount::number")]
    pub rt: Decimal,
    /// CGST amount.
    #[serde(
        default,
        with = "amount::option_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub camt: Option<Decimal>,
    /// SGST amount.
    #[serde(
        default,
        with = "amount::option_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub samt: Option<Decimal>,
    /// IGST amount.
    #[serde(
        default,
        with = "amount::option_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub igst: Option<Decimal>,
    /// Cess amount.
    #[serde(with = "amount::number")]
    pub csamt: Decimal,
}

/// Reverse-charge flag, written as "Y" or "N".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReverseCharge {
    #[serde(rename = "Y")]
    Yes,
    #[default]
    #[serde(rename = "N")]
    No,
}

impl ReverseCharge {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Yes => "Y",
            Self::No => "N",
        }
    }
}

/// GSTR-1 invoice type (`inv_typ`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceType {
    /// R: regular B2B.
    #[default]
    #[serde(rename = "R")]
    Regular,
    /// SEZWP: SEZ supplies with payment of tax.
    #[serde(rename = "SEZWP")]
    SezWithPayment,
    /// DE: deemed exports.
    #[serde(rename = "DE")]
    DeemedExport,
}

impl InvoiceType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Regular => "R",
            Self::SezWithPayment => "SEZWP",
            Self::DeemedExport => "DE",
        }
    }

    /// Parse from the GSTR-1 code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "R" => Some(Self::Regular),
            "SEZWP" => Some(Self::SezWithPayment),
            "DE" => Some(Self::DeemedExport),
            _ => None,
        }
    }
}

//! The logical fields a spreadsheet column can be mapped to.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A business field the converter understands.
///
/// Serialized with the camelCase key used in mapping forms
/// (e.g. `"invoiceNumber"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LogicalField {
    InvoiceNumber,
    InvoiceDate,
    InvoiceValue,
    PlaceOfSupply,
    GstinOfRecipient,
    TaxableValue,
    Rate,
    IgstAmount,
    CgstAmount,
    SgstAmount,
    ReverseCharge,
    InvoiceType,
    CessAmount,
}

impl LogicalField {
    /// All fields in catalog order.
    pub const ALL: [LogicalField; 13] = [
        Self::InvoiceNumber,
        Self::InvoiceDate,
        Self::InvoiceValue,
        Self::PlaceOfSupply,
        Self::GstinOfRecipient,
        Self::TaxableValue,
        Self::Rate,
        Self::IgstAmount,
        Self::CgstAmount,
        Self::SgstAmount,
        Self::ReverseCharge,
        Self::InvoiceType,
        Self::CessAmount,
    ];

    /// The camelCase key, also used as the `field` of validation errors.
    pub fn key(&self) -> &'static str {
        match self {
            Self::InvoiceNumber => "invoiceNumber",
            Self::InvoiceDate => "invoiceDate",
            Self::InvoiceValue => "invoiceValue",
            Self::PlaceOfSupply => "placeOfSupply",
            Self::GstinOfRecipient => "gstinOfRecipient",
            Self::TaxableValue => "taxableValue",
            Self::Rate => "rate",
            Self::IgstAmount => "igstAmount",
            Self::CgstAmount => "cgstAmount",
            Self::SgstAmount => "sgstAmount",
            Self::ReverseCharge => "reverseCharge",
            Self::InvoiceType => "invoiceType",
            Self::CessAmount => "cessAmount",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    /// Catalog metadata for this field.
    pub fn info(&self) -> &'static FieldInfo {
        // LOGICAL_FIELDS is declared in the same order as ALL.
        &LOGICAL_FIELDS[*self as usize]
    }

    pub fn label(&self) -> &'static str {
        self.info().label
    }

    pub fn is_required(&self) -> bool {
        self.info().required
    }

    /// Required fields in catalog order.
    pub fn required() -> impl Iterator<Item = LogicalField> {
        Self::ALL.into_iter().filter(|f| f.is_required())
    }
}

impl fmt::Display for LogicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Display metadata for a [`LogicalField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    pub field: LogicalField,
    pub label: &'static str,
    pub required: bool,
    pub description: &'static str,
}

/// The field catalog, in display order.
pub static LOGICAL_FIELDS: [FieldInfo; 13] = [
    FieldInfo {
        field: LogicalField::InvoiceNumber,
        label: "Invoice Number",
        required: true,
        description: "Invoice number or invoice no",
    },
    FieldInfo {
        field: LogicalField::InvoiceDate,
        label: "Invoice Date",
        required: true,
        description: "Date of invoice",
    },
    FieldInfo {
        field: LogicalField::InvoiceValue,
        label: "Invoice Value",
        required: true,
        description: "Total invoice value",
    },
    FieldInfo {
        field: LogicalField::PlaceOfSupply,
        label: "Place of Supply",
        required: true,
        description: "State code (e.g., 29, KA) or state name",
    },
    FieldInfo {
        field: LogicalField::GstinOfRecipient,
        label: "GSTIN of Recipient",
        required: false,
        description: "Leave empty for B2C invoices",
    },
    FieldInfo {
        field: LogicalField::TaxableValue,
        label: "Taxable Value",
        required: true,
        description: "Taxable amount before tax",
    },
    FieldInfo {
        field: LogicalField::Rate,
        label: "GST Rate (%)",
        required: true,
        description: "GST rate percentage (e.g., 18, 5, 12)",
    },
    FieldInfo {
        field: LogicalField::IgstAmount,
        label: "IGST Amount",
        required: false,
        description: "IGST amount (0 for intra-state, calculated if not provided)",
    },
    FieldInfo {
        field: LogicalField::CgstAmount,
        label: "CGST Amount",
        required: false,
        description: "CGST amount (0 for inter-state, calculated if not provided)",
    },
    FieldInfo {
        field: LogicalField::SgstAmount,
        label: "SGST Amount",
        required: false,
        description: "SGST amount (0 for inter-state, calculated if not provided)",
    },
    FieldInfo {
        field: LogicalField::ReverseCharge,
        label: "Reverse Charge",
        required: false,
        description: "Y/N or Yes/No (defaults to N)",
    },
    FieldInfo {
        field: LogicalField::InvoiceType,
        label: "Invoice Type",
        required: false,
        description: "Invoice type (e.g., Regular B2B)",
    },
    FieldInfo {
        field: LogicalField::CessAmount,
        label: "Cess Amount",
        required: false,
        description: "Cess amount (defaults to 0)",
    },
];

/// Partial assignment of logical fields to zero-based column indices.
///
/// Two fields may point at the same column; nothing enforces uniqueness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMapping {
    columns: BTreeMap<LogicalField, usize>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, field: LogicalField, column: usize) -> Self {
        self.set(field, column);
        self
    }

    pub fn get(&self, field: LogicalField) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    pub fn set(&mut self, field: LogicalField, column: usize) {
        self.columns.insert(field, column);
    }

    /// Assign `column` only if `field` has no column yet.
    /// Returns true if the assignment happened.
    pub fn set_if_unmapped(&mut self, field: LogicalField, column: usize) -> bool {
        if self.columns.contains_key(&field) {
            return false;
        }
        self.columns.insert(field, column);
        true
    }

    pub fn remove(&mut self, field: LogicalField) -> Option<usize> {
        self.columns.remove(&field)
    }

    pub fn is_mapped(&self, field: LogicalField) -> bool {
        self.columns.contains_key(&field)
    }

    /// Required fields without a column, in catalog order.
    pub fn missing_required(&self) -> Vec<LogicalField> {
        LogicalField::required()
            .filter(|f| !self.is_mapped(*f))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LogicalField, usize)> + '_ {
        self.columns.iter().map(|(f, c)| (*f, *c))
    }

    /// The raw cell for `field` in `row`; empty when the field is
    /// unmapped or the column is out of range.
    pub fn cell<'a>(&self, row: &'a [String], field: LogicalField) -> &'a str {
        self.get(field)
            .and_then(|c| row.get(c))
            .map(String::as_str)
            .unwrap_or("")
    }
}

impl FromIterator<(LogicalField, usize)> for ColumnMapping {
    fn from_iter<I: IntoIterator<Item = (LogicalField, usize)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

use thiserror::Error;

/// Errors that can occur while normalizing or exporting a filing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Gstr1Error {
    /// An invoice date cell was empty where a date was required.
    #[error("Empty date")]
    EmptyDate,

    /// A number cell does not fit in an amount.
    #[error("number '{0}' is out of range")]
    OutOfRange(String),

    /// Tax arithmetic overflowed.
    #[error("arithmetic error: {0}")]
    Arithmetic(String),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(String),

    /// Filing metadata is structurally invalid.
    #[error("meta error: {0}")]
    Meta(String),
}

/// Structural problems with a parsed table, detected before conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// Nothing could be parsed from the input.
    #[error("No data to parse")]
    NoData,

    /// The table has no header cells.
    #[error("No headers found")]
    NoHeaders,

    /// The table has a header row but no data rows.
    #[error("No data rows found")]
    NoRows,

    /// A data row's width differs from the header width.
    /// `row` is the display row number (header = row 1).
    #[error("Row {row} has {found} columns, expected {expected}")]
    ColumnCount {
        row: usize,
        found: usize,
        expected: usize,
    },
}

/// A single conversion problem tied to an input row.
///
/// `row` is the 1-based spreadsheet row number: the header is row 1, so the
/// first data row is row 2. Row 0 marks a global problem such as an
/// unmapped required column.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ValidationError {
    pub row: usize,
    /// Logical field name (e.g. "invoiceDate"), or "general".
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {}: {}: {}", self.row, self.field, self.message)
    }
}

impl ValidationError {
    /// Create an error for a specific input row.
    pub fn new(row: usize, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            row,
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an error that applies to the whole table (row 0).
    pub fn global(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(0, field, message)
    }
}

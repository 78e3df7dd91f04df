//! Paste → table + mapping in one call.

use tracing::debug;

use crate::convert::{Conversion, convert};
use crate::core::{ColumnMapping, FilingMeta, ParsedTable, ShapeError};
use crate::mapping::{auto_map, complete_mapping};
use crate::table::{parse_table, validate_table};

/// A validated table together with its guessed column mapping.
///
/// The mapping may still lack required fields; callers show it for review
/// and let the user fix it before converting.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedTable {
    pub table: ParsedTable,
    pub mapping: ColumnMapping,
}

impl PreparedTable {
    /// Convert with the current mapping.
    pub fn convert(&self, meta: &FilingMeta) -> Conversion {
        convert(&self.table, &self.mapping, meta)
    }
}

/// Parse and validate pasted text, then guess the column mapping.
///
/// ```
/// use gstr1::LogicalField;
/// use gstr1::pipeline::prepare;
///
/// let text = "Invoice Number\tInvoice Date\tInvoice Value\tPlace Of Supply\tTaxable Value\tRate\n\
///             INV-1\t01-04-2024\t1180\t29\t1000\t18";
/// let prepared = prepare(text).unwrap();
/// assert_eq!(prepared.mapping.get(LogicalField::Rate), Some(5));
/// assert!(prepared.mapping.missing_required().is_empty());
/// ```
pub fn prepare(text: &str) -> Result<PreparedTable, ShapeError> {
    let table = parse_table(text).ok_or(ShapeError::NoData)?;
    validate_table(Some(&table))?;

    let mut mapping = auto_map(&table.headers);
    let filled = complete_mapping(&mut mapping, &table.headers);
    debug!(
        rows = table.rows.len(),
        mapped = mapping.len(),
        ?filled,
        "table prepared"
    );

    Ok(PreparedTable { table, mapping })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogicalField;

    #[test]
    fn empty_paste() {
        assert_eq!(prepare("").unwrap_err(), ShapeError::NoData);
        assert_eq!(prepare(" \n\t\n").unwrap_err(), ShapeError::NoData);
    }

    #[test]
    fn header_only() {
        assert_eq!(prepare("Invoice Number\tRate").unwrap_err(), ShapeError::NoRows);
    }

    #[test]
    fn unmapped_fields_left_for_review() {
        let prepared = prepare("Foo\tBar\n1\t2").unwrap();
        assert!(prepared.mapping.is_empty());
        assert_eq!(prepared.mapping.missing_required().len(), 6);
    }

    #[test]
    fn convert_uses_prepared_mapping() {
        let text = "GSTIN/UIN of Recipient\tInvoice Number\tInvoice date\tInvoice Value\tPlace Of Supply\tRate\tTaxable Value\n\
                    29ABCDE1234F1Z5\tINV-1\t01/04/2024\t1,180\t29-Karnataka\t18\t1000";
        let prepared = prepare(text).unwrap();
        assert_eq!(prepared.mapping.get(LogicalField::GstinOfRecipient), Some(0));

        let result = prepared.convert(&FilingMeta::new("27ABCDE1234F1Z5", "042024"));
        assert!(result.errors.is_empty());
        assert_eq!(result.document.invoice_count(), 1);
        assert_eq!(result.document.b2b[0].inv[0].pos, "29");
    }
}

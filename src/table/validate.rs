use crate::core::{ParsedTable, ShapeError};

/// Check that a parsed table is usable before mapping and conversion.
///
/// Fails when there is no table, no headers, no data rows, or a row whose
/// width differs from the header. The first offending row is reported with
/// its display number (header = row 1).
pub fn validate_table(table: Option<&ParsedTable>) -> Result<(), ShapeError> {
    let table = table.ok_or(ShapeError::NoData)?;

    if table.headers.is_empty() {
        return Err(ShapeError::NoHeaders);
    }
    if table.rows.is_empty() {
        return Err(ShapeError::NoRows);
    }

    let expected = table.headers.len();
    if let Some((i, row)) = table
        .rows
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != expected)
    {
        return Err(ShapeError::ColumnCount {
            row: i + 2,
            found: row.len(),
            expected,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> ParsedTable {
        ParsedTable::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn valid_table() {
        let t = table(&["A", "B", "C"], &[&["1", "2", "3"], &["4", "5", "6"]]);
        assert_eq!(validate_table(Some(&t)), Ok(()));
    }

    #[test]
    fn missing_table() {
        let err = validate_table(None).unwrap_err();
        assert_eq!(err.to_string(), "No data to parse");
    }

    #[test]
    fn no_headers() {
        let t = table(&[], &[&["1", "2"]]);
        assert_eq!(validate_table(Some(&t)), Err(ShapeError::NoHeaders));
    }

    #[test]
    fn no_rows() {
        let t = table(&["A", "B"], &[]);
        assert_eq!(validate_table(Some(&t)), Err(ShapeError::NoRows));
    }

    #[test]
    fn mismatched_row_reports_display_number() {
        let t = table(&["A", "B", "C"], &[&["1", "2", "3"], &["4", "5"]]);
        let err = validate_table(Some(&t)).unwrap_err();
        assert!(err.to_string().contains("Row 3 has 2 columns"));
        assert_eq!(
            err,
            ShapeError::ColumnCount {
                row: 3,
                found: 2,
                expected: 3
            }
        );
    }
}

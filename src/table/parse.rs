//! Pasted spreadsheet text → [`ParsedTable`].

use tracing::debug;

use crate::core::ParsedTable;

/// How many leading non-blank lines are searched for the header row.
pub const HEADER_SCAN_LIMIT: usize = 15;

/// Minimum cells for a header row that names the recipient GSTIN.
const MIN_HEADER_CELLS: usize = 8;

/// Minimum cells for a fallback header row (invoice number + date only).
const MIN_FALLBACK_HEADER_CELLS: usize = 5;

/// Cell separator of a paste.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// CSV export: comma separated, double-quote aware.
    Comma,
    /// Excel / Google Sheets clipboard: tab separated, no quoting.
    Tab,
}

impl Delimiter {
    /// Comma when the first line has more commas than tabs, tab otherwise.
    pub fn detect(text: &str) -> Self {
        let first = text.split('\n').next().unwrap_or("");
        let commas = first.matches(',').count();
        let tabs = first.matches('\t').count();
        if commas > tabs { Self::Comma } else { Self::Tab }
    }

    /// Split one line into raw cells.
    pub fn split(self, line: &str) -> Vec<String> {
        match self {
            Self::Comma => split_csv_line(line),
            Self::Tab => line.split('\t').map(str::to_string).collect(),
        }
    }
}

/// Parse pasted text into a header row and data rows.
///
/// Spreadsheet exports often start with title or summary rows, so the header
/// is searched for among the first [`HEADER_SCAN_LIMIT`] non-blank lines.
/// Every data row is padded with empty cells or truncated to the header
/// width.
///
/// Returns `None` for empty or whitespace-only input.
///
/// ```
/// use gstr1::table::parse_table;
///
/// let table = parse_table("A\tB\tC\n1\t2").unwrap();
/// assert_eq!(table.headers, ["A", "B", "C"]);
/// assert_eq!(table.rows[0], ["1", "2", ""]);
/// ```
pub fn parse_table(text: &str) -> Option<ParsedTable> {
    if text.trim().is_empty() {
        return None;
    }

    let lines: Vec<&str> = text
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .filter(|l| !l.trim().is_empty())
        .collect();
    if lines.is_empty() {
        return None;
    }

    let delimiter = Delimiter::detect(text);
    let header_index = find_header_row(&lines, delimiter);
    debug!(header_index, ?delimiter, lines = lines.len(), "header row located");

    let headers: Vec<String> = delimiter
        .split(lines[header_index])
        .iter()
        .map(|c| clean_cell(c))
        .collect();
    if headers.is_empty() {
        return None;
    }

    let width = headers.len();
    let rows = lines[header_index + 1..]
        .iter()
        .map(|line| {
            let mut cells: Vec<String> =
                delimiter.split(line).iter().map(|c| clean_cell(c)).collect();
            cells.resize(width, String::new());
            cells
        })
        .collect();

    Some(ParsedTable { headers, rows })
}

/// Index of the most likely header row within the scan window.
fn find_header_row(lines: &[&str], delimiter: Delimiter) -> usize {
    let window = &lines[..lines.len().min(HEADER_SCAN_LIMIT)];
    let candidates: Vec<(usize, String)> = window
        .iter()
        .map(|line| {
            let cells = delimiter.split(line);
            (cells.len(), cells.join(" ").to_lowercase())
        })
        .collect();

    let primary = candidates.iter().position(|(cells, text)| {
        !is_summary_row(text)
            && (text.contains("gstin") || text.contains("uin"))
            && has_invoice_number(text)
            && has_invoice_date(text)
            && *cells >= MIN_HEADER_CELLS
    });
    if let Some(i) = primary {
        return i;
    }

    candidates
        .iter()
        .position(|(cells, text)| {
            has_invoice_number(text) && has_invoice_date(text) && *cells >= MIN_FALLBACK_HEADER_CELLS
        })
        .unwrap_or(0)
}

/// Title and summary rows that mention header words without being headers.
fn is_summary_row(text: &str) -> bool {
    text.contains("summary")
        || (text.contains("no. of") && !text.contains("invoice number"))
        || (text.contains("total") && !text.contains("taxable value"))
}

fn has_invoice_number(text: &str) -> bool {
    text.contains("invoice") && (text.contains("number") || text.contains("no"))
}

fn has_invoice_date(text: &str) -> bool {
    text.contains("invoice") && text.contains("date")
}

/// Trim and drop one layer of surrounding double quotes.
fn clean_cell(cell: &str) -> String {
    let cell = cell.trim();
    let cell = cell.strip_prefix('"').unwrap_or(cell);
    let cell = cell.strip_suffix('"').unwrap_or(cell);
    cell.to_string()
}

/// Quote-aware CSV split. `""` inside quotes is a literal quote; commas and
/// tabs inside quotes are literal. Cells are trimmed.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' | '\t' if !in_quotes => {
                cells.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    cells.push(current.trim().to_string());
    cells
}

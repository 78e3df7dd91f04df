//! Tolerant parsing of pasted spreadsheet text and shape validation.
//!
//! Handles both Excel / Google Sheets clipboard data (tab separated) and
//! CSV exports (comma separated, quoted fields). Leading title and summary
//! rows are skipped when locating the header.

mod parse;
mod validate;

pub use parse::{Delimiter, HEADER_SCAN_LIMIT, parse_table};
pub use validate::validate_table;

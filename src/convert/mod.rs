//! Row-to-document conversion.
//!
//! Every valid row becomes one line item. Line items are grouped by
//! recipient GSTIN in first-seen order, and rows sharing an invoice number
//! and date are merged into one invoice. Missing tax amounts are derived
//! from the taxable value and rate.

mod engine;
mod normalize;
mod tax;

pub use engine::{Conversion, FIRST_ITEM_NUMBER, convert};
pub use normalize::{normalize_date, normalize_state_code, parse_invoice_type, parse_reverse_charge};
pub use tax::{TaxSplit, calculate_taxes, resolve_taxes};

//! # gstr1
//!
//! Turns invoice rows pasted from a spreadsheet into the B2B section of an
//! Indian GSTR-1 filing JSON, ready for the GST offline tool.
//!
//! All monetary values use [`rust_decimal::Decimal`] and are written to JSON
//! as plain numbers.
//!
//! ## Quick Start
//!
//! ```rust
//! use gstr1::FilingMeta;
//! use gstr1::pipeline::prepare;
//! use rust_decimal_macros::dec;
//!
//! let paste = "GSTR-1 B2B Summary\n\
//!     GSTIN/UIN of Recipient\tReceiver Name\tInvoice Number\tInvoice date\tInvoice Value\tPlace Of Supply\tReverse Charge\tRate\tTaxable Value\n\
//!     27AAACR5055K1Z7\tReliance\tINV-001\t01/04/2024\t1,180\t27-Maharashtra\tN\t18\t1000\n\
//!     27AAACR5055K1Z7\tReliance\tINV-001\t01/04/2024\t1,180\t27-Maharashtra\tN\t5\t200";
//!
//! let prepared = prepare(paste).unwrap();
//! let result = prepared.convert(&FilingMeta::new("27ABCDE1234F1Z5", "042024"));
//!
//! assert!(result.is_exportable());
//! let invoice = &result.document.b2b[0].inv[0];
//! assert_eq!(invoice.itms.len(), 2);
//! assert_eq!(invoice.itms[0].itm_det.camt, Some(dec!(90)));
//! assert_eq!(invoice.itms[1].num, 2);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`table`] | Tolerant parsing of pasted text, shape validation |
//! | [`mapping`] | Header → logical field heuristics |
//! | [`convert`] | Normalization, tax split, grouping into the filing document |
//! | [`pipeline`] | Parse + validate + map in one call |
//! | `export` (feature `json`, default) | Pretty JSON and download file name |

pub mod convert;
pub mod core;
pub mod mapping;
pub mod pipeline;
pub mod table;

#[cfg(feature = "json")]
pub mod export;

// Re-export core types at crate root for convenience
pub use crate::core::*;
pub use crate::convert::{Conversion, convert};
pub use crate::pipeline::{PreparedTable, prepare};

//! Header → logical field mapping heuristics.
//!
//! Two independent strategies, kept separate because their precedence
//! differs:
//!
//! - [`auto_map`]: per-field substring rules over normalized headers,
//!   first match wins, exact "rate" preferred. [`complete_mapping`] is the
//!   same rule set restricted to the core fields, without the rate
//!   preference.
//! - [`find_best_match`]: synonym scoring (exact 100, containment 50).
//!
//! Only header text is consulted, never cell contents.

mod auto;
mod best_match;

pub use auto::{auto_map, complete_mapping, header_matches, normalize_header};
pub use best_match::{best_match_mapping, find_best_match};

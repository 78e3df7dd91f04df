//! Core types: the parsed table, field catalog, column mapping, filing
//! document and errors.

pub mod amount;
mod error;
mod fields;
mod meta;
pub mod states;
mod types;

pub use error::*;
pub use fields::*;
pub use meta::check_meta;
pub use states::state_code;
pub use types::*;

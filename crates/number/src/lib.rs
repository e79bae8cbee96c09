//! Exact integer arithmetic shared by the order model and the validation
//! pipeline. Nothing in here ever touches floating point.

pub mod amount;
pub mod conversions;
pub mod permyriad;

pub use amount::{Amount, ParseAmountError};

//! Core data types for box spread scanning
//!
//! Defines fundamental types:
//! - ContractQuote: id plus bid/ask for one leg
//! - ChainIndex: calls and puts by expiry and strike
//! - BoxSpreadError: error taxonomy

pub mod chain;
pub mod error;
pub mod option;

pub use chain::*;
pub use error::*;
pub use option::*;

//! Common identifiers, addresses and validation errors

pub mod address;
pub mod errors;
pub mod identifiers;

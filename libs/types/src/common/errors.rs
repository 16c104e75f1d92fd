//! Validation errors for identifiers, addresses and bundle discriminators

use thiserror::Error;

/// Errors that can occur while validating typed IDs and parsed values
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// ID value is null/zero when non-null required
    #[error("ID cannot be null/zero")]
    NullId,

    /// Address string is not a 20-byte hex value
    #[error("Invalid address '{input}': {reason}")]
    InvalidAddress { input: String, reason: String },

    /// Slot discriminator string does not name a known payload shape
    #[error("Unknown slot schema '{0}'")]
    UnknownSchema(String),
}

impl ValidationError {
    pub(crate) fn invalid_address(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidAddress {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

//! Read-optimized indexes built from flat snapshot collections
//!
//! Every index is built once in O(n) and exposes no mutating API afterwards.
//! Lookups borrow from the index and return `None` on a miss; listings
//! (`all()`, `protocols()`) hand back owned copies, so nothing a caller does
//! with a returned value can be observed inside the index.

mod pool_index;
mod protocol_index;
mod token_index;

pub use pool_index::PoolRegistryIndex;
pub use protocol_index::{ConcentratedIndex, ConstantProductIndex, ProtocolPoolIndex};
pub use token_index::TokenIndex;

use thiserror::Error;

/// Snapshot content that violates identity uniqueness
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    #[error("duplicate {entity} identity {id}")]
    DuplicateIdentity { entity: &'static str, id: String },

    #[error("duplicate {entity} key {key}")]
    DuplicateKey { entity: &'static str, key: String },
}

impl IndexError {
    pub(crate) fn duplicate_identity(entity: &'static str, id: impl ToString) -> Self {
        Self::DuplicateIdentity {
            entity,
            id: id.to_string(),
        }
    }

    pub(crate) fn duplicate_key(entity: &'static str, key: impl ToString) -> Self {
        Self::DuplicateKey {
            entity,
            key: key.to_string(),
        }
    }
}

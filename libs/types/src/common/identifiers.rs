//! # Typed Identifiers
//!
//! Zero-cost wrappers for the numeric identities used across reconciliation:
//!
//! - `TokenId` - identity of a token within a token snapshot
//! - `PoolId` - identity of a pool within a pool registry snapshot
//! - `ProtocolCode` - small numeric code compressing a protocol identifier
//!   such as `"uniswap-v2"` inside the registry's protocol dictionary
//!
//! ```rust
//! use types::{PoolId, TokenId};
//!
//! fn lookup(_token: TokenId, _pool: PoolId) {}
//!
//! lookup(TokenId::new(1), PoolId::new(100)); // ✅ Correct
//! // lookup(PoolId::new(100), TokenId::new(1)); // ❌ Compile error!
//! ```

use crate::common::errors::ValidationError;
use serde::{Deserialize, Serialize};

/// Macro to define a typed numeric ID with transparent serialization
macro_rules! define_typed_id {
    (
        $(#[$meta:meta])*
        $name:ident, $inner:ty
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Default,
            Serialize,
            Deserialize
        )]
        #[serde(transparent)]
        #[repr(transparent)] // Same memory layout as the inner integer
        pub struct $name(pub $inner);

        impl $name {
            /// Create a new typed ID
            #[inline(always)]
            pub const fn new(id: $inner) -> Self {
                Self(id)
            }

            /// Create a new typed ID, rejecting the zero value an
            /// uninitialized or defaulted ID carries
            #[inline]
            pub fn new_validated(id: $inner) -> Result<Self, ValidationError> {
                if id == 0 {
                    return Err(ValidationError::NullId);
                }
                Ok(Self(id))
            }

            /// Extract the inner value
            #[inline(always)]
            pub const fn inner(&self) -> $inner {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(id: $inner) -> Self {
                Self(id)
            }
        }
    };
}

define_typed_id!(
    /// Identity of a token within a token snapshot (also unique by address)
    TokenId, u64
);

define_typed_id!(
    /// Identity of a pool within a pool registry snapshot (also unique by `PoolKey`)
    PoolId, u64
);

define_typed_id!(
    /// Numeric code standing in for a protocol identifier in the registry dictionary
    ProtocolCode, u16
);

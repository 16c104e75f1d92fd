//! Token entity

use crate::common::address::Address;
use crate::common::identifiers::TokenId;
use crate::entity::{Identified, Tracked};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// ERC-20 style token as carried in a token snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    /// Full 20-byte token contract address (unique within a snapshot)
    pub address: Address,
    /// Display symbol, e.g. "WETH" (untracked)
    pub symbol: String,
    /// Decimal precision, e.g. 18 for WETH, 6 for USDC (untracked)
    pub decimals: u8,
    /// Fee-on-transfer percentage, zero for plain tokens (tracked)
    #[serde(default)]
    pub fee_pct: Decimal,
    /// Gas cost of a single transfer (tracked)
    #[serde(default)]
    pub gas: u64,
}

impl Token {
    pub fn new(id: TokenId, address: Address, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            id,
            address,
            symbol: symbol.into(),
            decimals,
            fee_pct: Decimal::ZERO,
            gas: 0,
        }
    }

    pub fn with_transfer_fee(mut self, fee_pct: Decimal) -> Self {
        self.fee_pct = fee_pct;
        self
    }

    pub fn with_transfer_gas(mut self, gas: u64) -> Self {
        self.gas = gas;
        self
    }
}

impl Identified for Token {
    type Id = TokenId;

    #[inline]
    fn identity(&self) -> TokenId {
        self.id
    }
}

impl Tracked for Token {
    fn tracked_eq(&self, other: &Self) -> bool {
        self.fee_pct == other.fee_pct && self.gas == other.gas
    }
}

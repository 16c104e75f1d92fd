//! Pool registry entities and per-protocol pool batch records
//!
//! The registry carries identity only: a pool's ID, its canonical key and a
//! small protocol code. Protocol names are compressed into the registry's
//! dictionary so a block with thousands of pools repeats each name once.
//!
//! Protocol-specific state (reserves, sqrt price, ticks) travels separately in
//! pool-protocol batches. The reconciliation core treats those records as
//! payload keyed by `PoolId` and never interprets the AMM math.

use crate::common::address::{Address, PoolKey};
use crate::common::identifiers::{PoolId, ProtocolCode};
use crate::entity::{Identified, Tracked};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Protocol code -> protocol identifier (e.g. `1 -> "uniswap-v2"`)
pub type ProtocolDictionary = BTreeMap<ProtocolCode, String>;

/// Pool identity as listed in the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub id: PoolId,
    /// Canonical key derived from the pool contract address
    pub key: PoolKey,
    /// Code resolving to a protocol identifier through the registry dictionary
    pub protocol: ProtocolCode,
}

impl Pool {
    pub fn new(id: PoolId, address: &Address, protocol: ProtocolCode) -> Self {
        Self {
            id,
            key: PoolKey::from_address(address),
            protocol,
        }
    }
}

impl Identified for Pool {
    type Id = PoolId;

    #[inline]
    fn identity(&self) -> PoolId {
        self.id
    }
}

/// Pools are diffed on presence only: there is no tracked field, so a pool
/// that keeps its ID never produces an update, even if its protocol code moved.
impl Tracked for Pool {
    fn tracked_eq(&self, _other: &Self) -> bool {
        true
    }
}

/// Complete pool registry snapshot for one block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolRegistry {
    #[serde(default)]
    pub pools: Vec<Pool>,
    #[serde(default)]
    pub protocols: ProtocolDictionary,
}

impl PoolRegistry {
    pub fn new(pools: Vec<Pool>, protocols: ProtocolDictionary) -> Self {
        Self { pools, protocols }
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty() && self.protocols.is_empty()
    }
}

/// Constant-product (x*y=k) pool state record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantProductPool {
    pub pool_id: PoolId,
    pub reserve0: Decimal,
    pub reserve1: Decimal,
    /// Swap fee in basis points (30 = 0.3%)
    pub fee_bps: u32,
}

impl Identified for ConstantProductPool {
    type Id = PoolId;

    #[inline]
    fn identity(&self) -> PoolId {
        self.pool_id
    }
}

/// Concentrated-liquidity pool state record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConcentratedPool {
    pub pool_id: PoolId,
    pub sqrt_price_x96: u128,
    pub liquidity: u128,
    pub tick: i32,
    /// Swap fee in hundredths of a basis point (500 = 0.05%)
    pub fee_pips: u32,
}

impl Identified for ConcentratedPool {
    type Id = PoolId;

    #[inline]
    fn identity(&self) -> PoolId {
        self.pool_id
    }
}

//! # Torq Chain-State Types
//!
//! Shared data model for block-by-block reconciliation of on-chain DeFi state.
//!
//! ## Design Philosophy
//!
//! - **Typed Identities**: `TokenId`, `PoolId` and `ProtocolCode` are distinct types, so a
//!   token ID can never be handed to a pool lookup by accident
//! - **Canonical Keys**: pools are also unique by a `PoolKey` derived deterministically from
//!   their on-chain address
//! - **Closed Bundle Shape**: every slot of a raw block bundle is one variant of `BundleSlot`,
//!   so demultiplexing is checked exhaustively at compile time
//! - **Serializable Everything**: snapshots, diffs and bundles derive serde so the transport
//!   layer can ship them without adapters
//!
//! ## Quick Start
//!
//! ```rust
//! use types::{Address, Pool, PoolId, PoolRegistry, ProtocolCode, Token, TokenId};
//!
//! let weth: Address = "0x7ceB23fD6bC0adD59E62ac25578270cFf1b9f619".parse().unwrap();
//! let token = Token::new(TokenId::new(1), weth, "WETH", 18);
//!
//! let pool_address: Address = "0x45dDa9cb7c25131DF268515131f647d726f50608".parse().unwrap();
//! let mut registry = PoolRegistry::default();
//! registry.pools.push(Pool::new(PoolId::new(100), &pool_address, ProtocolCode::new(1)));
//! registry.protocols.insert(ProtocolCode::new(1), "uniswap-v2".to_string());
//! # let _ = token;
//! ```
//!
//! ## Integration Points
//!
//! - **Transport**: decodes wire bytes into `RawBundle` values and ships `TokenSetDiff` /
//!   `PoolRegistryDiff` deltas between full snapshots
//! - **State library**: diff/patch engine, read-optimized indexes and the protocol resolver
//! - **Reconciler service**: demultiplexes `RawBundle` slots and assembles processed snapshots

pub mod bundle;
pub mod common;
pub mod diff;
pub mod entity;
pub mod pool;
pub mod token;

pub use bundle::{
    BlockMeta, BundleSlot, ProtocolSchema, RawBundle, RawEdge, RawGraph, SchemaManifest,
    SlotSchema,
};
pub use common::address::{Address, PoolKey};
pub use common::errors::ValidationError;
pub use common::identifiers::{PoolId, ProtocolCode, TokenId};
pub use diff::{CollectionDiff, DictionaryDiff, PoolRegistryDiff, TokenSetDiff};
pub use entity::{Identified, Tracked};
pub use pool::{ConcentratedPool, ConstantProductPool, Pool, PoolRegistry, ProtocolDictionary};
pub use token::Token;

/// Re-exported so callers can build fee percentages and reserves without a direct dependency
pub use rust_decimal::Decimal;

//! # Chain State Reconciliation - Diff/Patch, Indexes and Protocol Resolution
//!
//! ## Purpose
//!
//! Turns flat, authoritative entity snapshots into consistent, cross-indexed views and
//! computes the deltas between successive snapshots. Everything built here is immutable
//! once constructed and safe to share across tasks without synchronization.
//!
//! ## Integration Points
//!
//! - **Transport (upstream)**: uses `TokenReconciler` / `PoolRegistryReconciler` to ship
//!   deltas instead of full snapshots and to rebuild snapshots on the receiving side
//! - **Reconciler service**: builds the four indexes per block in parallel, then a fresh
//!   `ProtocolResolver` from the block's manifest and pool registry index
//! - **Grapher (downstream)**: reads the indexes and resolver while building the analytical graph
//!
//! ## Architecture Role
//!
//! ```text
//! Snapshot S ──┐
//!              ├─> [Differ] ──> Delta ──> [Patcher(S)] ──> S'
//! Snapshot S' ─┘
//!
//! Flat collections ──> [Index builders] ──> TokenIndex / PoolRegistryIndex / ProtocolPoolIndex
//!                                                         │
//! Block manifest ────────────────────────────> [ProtocolResolver]
//!                      pool id → pool → protocol code → protocol identifier → schema
//! ```
//!
//! ## Invariants
//!
//! - `patch(S, diff(S, S'))` equals `S'` on identities and tracked fields
//! - `diff(S, S)` is empty
//! - Patching never mutates its input snapshot
//! - Identities are unique within a snapshot; index builders reject duplicates

pub mod index;
pub mod reconcile;
pub mod resolver;
pub mod traits;

pub use index::{
    ConcentratedIndex, ConstantProductIndex, IndexError, PoolRegistryIndex, ProtocolPoolIndex,
    TokenIndex,
};
pub use reconcile::{
    diff_collection, diff_dictionary, patch_collection, patch_dictionary,
    PoolRegistryReconciler, TokenReconciler,
};
pub use resolver::{ProtocolResolver, ResolveMiss};
pub use traits::{Differ, Patcher};

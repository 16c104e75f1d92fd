//! Pool registry reconciliation
//!
//! The pool namespace and the protocol dictionary namespace are diffed and
//! patched independently, then composed into one `PoolRegistryDiff`.
//!
//! Two behaviors to be aware of:
//!
//! - Pools are identity-presence only. A pool that keeps its ID but moves to a
//!   different protocol code produces no diff entry at all.
//! - A dictionary code whose identifier changed is reported as a protocol
//!   addition that overwrites the old identifier.

use super::{diff_collection, diff_dictionary, patch_collection, patch_dictionary};
use crate::traits::{Differ, Patcher};
use types::{CollectionDiff, DictionaryDiff, Pool, PoolRegistry, PoolRegistryDiff};

#[derive(Debug, Clone, Copy, Default)]
pub struct PoolRegistryReconciler;

impl Differ for PoolRegistryReconciler {
    type Snapshot = PoolRegistry;
    type Delta = PoolRegistryDiff;

    fn diff(&self, old: &PoolRegistry, new: &PoolRegistry) -> PoolRegistryDiff {
        let pools: CollectionDiff<Pool> = diff_collection(&old.pools, &new.pools);
        debug_assert!(pools.updates.is_empty(), "pools have no tracked fields");

        let protocols = diff_dictionary(&old.protocols, &new.protocols);

        PoolRegistryDiff {
            pool_additions: pools.additions,
            pool_deletions: pools.deletions,
            protocol_additions: protocols.additions,
            protocol_deletions: protocols.deletions,
        }
    }
}

impl Patcher for PoolRegistryReconciler {
    type Snapshot = PoolRegistry;
    type Delta = PoolRegistryDiff;

    fn patch(&self, old: &PoolRegistry, delta: &PoolRegistryDiff) -> PoolRegistry {
        let pool_delta = CollectionDiff {
            additions: delta.pool_additions.clone(),
            updates: Vec::new(),
            deletions: delta.pool_deletions.clone(),
        };
        let protocol_delta: DictionaryDiff<_, _> = delta.protocol_diff();

        PoolRegistry {
            pools: patch_collection(&old.pools, &pool_delta),
            protocols: patch_dictionary(&old.protocols, &protocol_delta),
        }
    }
}

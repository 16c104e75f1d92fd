//! IndexedPoolRegistry: pools by ID and canonical key, plus the protocol dictionary

use super::IndexError;
use std::collections::HashMap;
use tracing::debug;
use types::{Pool, PoolId, PoolKey, PoolRegistry, ProtocolCode, ProtocolDictionary};

/// Immutable pool registry lookup built from one registry snapshot
#[derive(Debug, Clone, Default)]
pub struct PoolRegistryIndex {
    pools: Vec<Pool>,
    by_id: HashMap<PoolId, usize>,
    by_key: HashMap<PoolKey, usize>,
    protocols: ProtocolDictionary,
}

impl PoolRegistryIndex {
    /// Index a registry snapshot
    ///
    /// Fails if two pools share an ID or a canonical key. Pools whose protocol
    /// code is missing from the dictionary are kept; they simply never resolve.
    pub fn build(registry: PoolRegistry) -> Result<Self, IndexError> {
        let PoolRegistry { pools, protocols } = registry;

        let mut by_id = HashMap::with_capacity(pools.len());
        let mut by_key = HashMap::with_capacity(pools.len());

        for (slot, pool) in pools.iter().enumerate() {
            if by_id.insert(pool.id, slot).is_some() {
                return Err(IndexError::duplicate_identity("pool", pool.id));
            }
            if by_key.insert(pool.key.clone(), slot).is_some() {
                return Err(IndexError::duplicate_key("pool", &pool.key));
            }
        }

        debug!(
            pools = pools.len(),
            protocols = protocols.len(),
            "Pool registry index built"
        );

        Ok(Self {
            pools,
            by_id,
            by_key,
            protocols,
        })
    }

    pub fn get_by_id(&self, id: PoolId) -> Option<&Pool> {
        self.by_id.get(&id).map(|&slot| &self.pools[slot])
    }

    pub fn get_by_key(&self, key: &PoolKey) -> Option<&Pool> {
        self.by_key.get(key).map(|&slot| &self.pools[slot])
    }

    /// Owned copy of every indexed pool, in snapshot order
    pub fn all(&self) -> Vec<Pool> {
        self.pools.clone()
    }

    /// Owned copy of the protocol dictionary
    pub fn protocols(&self) -> ProtocolDictionary {
        self.protocols.clone()
    }

    /// Protocol identifier for a code, borrowed from the dictionary
    pub fn protocol_name(&self, code: ProtocolCode) -> Option<&str> {
        self.protocols.get(&code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}

//! Per-block protocol identity resolution
//!
//! ```text
//! PoolId ──[pool index]──> Pool ──> ProtocolCode ──[dictionary]──> identifier ──[manifest]──> schema
//! ```
//!
//! The chain short-circuits on the first miss and never returns a partial
//! result. A resolver is bound to the manifest and pool index of exactly one
//! block; the pipeline builds a fresh one every cycle.

use crate::index::PoolRegistryIndex;
use std::sync::Arc;
use thiserror::Error;
use types::{PoolId, ProtocolCode, ProtocolSchema, SchemaManifest};

/// Step of the resolution chain that failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveMiss {
    #[error("pool {0} not in registry")]
    UnknownPool(PoolId),

    #[error("pool {pool} has unknown protocol code {code}")]
    UnknownProtocolCode { pool: PoolId, code: ProtocolCode },

    #[error("pool {pool} protocol '{protocol}' has no schema")]
    UnmappedProtocol { pool: PoolId, protocol: String },
}

/// Immutable pool-to-schema resolver for one block
#[derive(Debug, Clone)]
pub struct ProtocolResolver {
    block_number: u64,
    manifest: SchemaManifest,
    pools: Arc<PoolRegistryIndex>,
}

impl ProtocolResolver {
    pub fn new(block_number: u64, manifest: SchemaManifest, pools: Arc<PoolRegistryIndex>) -> Self {
        Self {
            block_number,
            manifest,
            pools,
        }
    }

    /// Block this resolver was built for
    pub fn block_number(&self) -> u64 {
        self.block_number
    }

    /// Resolve a pool all the way to its schema, `None` on any miss
    pub fn resolve_schema_from_pool_id(&self, pool_id: PoolId) -> Option<&ProtocolSchema> {
        self.try_resolve(pool_id).ok()
    }

    /// Same chain as [`resolve_schema_from_pool_id`](Self::resolve_schema_from_pool_id),
    /// reporting which step missed
    pub fn try_resolve(&self, pool_id: PoolId) -> Result<&ProtocolSchema, ResolveMiss> {
        let pool = self
            .pools
            .get_by_id(pool_id)
            .ok_or(ResolveMiss::UnknownPool(pool_id))?;

        let protocol = self
            .pools
            .protocol_name(pool.protocol)
            .ok_or(ResolveMiss::UnknownProtocolCode {
                pool: pool_id,
                code: pool.protocol,
            })?;

        self.manifest
            .get(protocol)
            .ok_or_else(|| ResolveMiss::UnmappedProtocol {
                pool: pool_id,
                protocol: protocol.to_string(),
            })
    }

    /// Protocol identifier of a pool, without consulting the manifest
    pub fn resolve_protocol(&self, pool_id: PoolId) -> Option<&str> {
        let pool = self.pools.get_by_id(pool_id)?;
        self.pools.protocol_name(pool.protocol)
    }

    /// Direct manifest lookup, independent of the pool index
    pub fn resolve_schema(&self, protocol: &str) -> Option<&ProtocolSchema> {
        self.manifest.get(protocol)
    }

    pub fn pools(&self) -> &PoolRegistryIndex {
        &self.pools
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{Address, Pool, PoolRegistry, ProtocolDictionary};

    fn resolver() -> ProtocolResolver {
        let registry = PoolRegistry::new(
            vec![
                Pool::new(PoolId::new(100), &Address::new([1; 20]), ProtocolCode::new(1)),
                Pool::new(PoolId::new(101), &Address::new([2; 20]), ProtocolCode::new(4)),
                Pool::new(PoolId::new(102), &Address::new([3; 20]), ProtocolCode::new(2)),
            ],
            ProtocolDictionary::from([
                (ProtocolCode::new(1), "uniswap-v2".to_string()),
                (ProtocolCode::new(2), "curve".to_string()),
            ]),
        );
        let manifest =
            SchemaManifest::from([("uniswap-v2".to_string(), ProtocolSchema::from("uniswap-v2-pools"))]);

        let index = PoolRegistryIndex::build(registry).unwrap();
        ProtocolResolver::new(42, manifest, Arc::new(index))
    }

    #[test]
    fn test_full_chain_resolves() {
        let resolver = resolver();

        assert_eq!(
            resolver.resolve_schema_from_pool_id(PoolId::new(100)),
            Some(&ProtocolSchema::from("uniswap-v2-pools"))
        );
        assert_eq!(resolver.block_number(), 42);
    }

    #[test]
    fn test_unknown_pool_is_not_found() {
        let resolver = resolver();

        assert_eq!(resolver.resolve_schema_from_pool_id(PoolId::new(999)), None);
        assert_eq!(
            resolver.try_resolve(PoolId::new(999)),
            Err(ResolveMiss::UnknownPool(PoolId::new(999)))
        );
    }

    #[test]
    fn test_each_miss_short_circuits() {
        let resolver = resolver();

        assert_eq!(
            resolver.try_resolve(PoolId::new(101)),
            Err(ResolveMiss::UnknownProtocolCode {
                pool: PoolId::new(101),
                code: ProtocolCode::new(4)
            })
        );
        assert_eq!(resolver.resolve_protocol(PoolId::new(101)), None);

        assert_eq!(resolver.resolve_protocol(PoolId::new(102)), Some("curve"));
        assert_eq!(resolver.resolve_schema_from_pool_id(PoolId::new(102)), None);
        assert!(matches!(
            resolver.try_resolve(PoolId::new(102)),
            Err(ResolveMiss::UnmappedProtocol { .. })
        ));
    }

    #[test]
    fn test_direct_schema_lookup() {
        let resolver = resolver();

        assert_eq!(
            resolver.resolve_schema("uniswap-v2").map(ProtocolSchema::as_str),
            Some("uniswap-v2-pools")
        );
        assert_eq!(resolver.resolve_schema("curve"), None);
    }
}

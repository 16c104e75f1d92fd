//! Per-protocol pool batch indexes keyed by pool ID

use super::IndexError;
use std::collections::HashMap;
use std::fmt::Debug;
use tracing::debug;
use types::{ConcentratedPool, ConstantProductPool, Identified, PoolId};

/// Immutable index over one protocol family's pool state records
#[derive(Debug, Clone)]
pub struct ProtocolPoolIndex<R> {
    records: Vec<R>,
    by_pool: HashMap<PoolId, usize>,
}

pub type ConstantProductIndex = ProtocolPoolIndex<ConstantProductPool>;
pub type ConcentratedIndex = ProtocolPoolIndex<ConcentratedPool>;

impl<R> ProtocolPoolIndex<R>
where
    R: Identified<Id = PoolId> + Clone + Debug,
{
    /// Index the concatenated batches of one protocol family for a block
    pub fn build(records: Vec<R>) -> Result<Self, IndexError> {
        let mut by_pool = HashMap::with_capacity(records.len());

        for (slot, record) in records.iter().enumerate() {
            if by_pool.insert(record.identity(), slot).is_some() {
                return Err(IndexError::duplicate_identity("pool record", record.identity()));
            }
        }

        debug!(records = records.len(), "Protocol pool index built");

        Ok(Self { records, by_pool })
    }

    pub fn get(&self, pool_id: PoolId) -> Option<&R> {
        self.by_pool.get(&pool_id).map(|&slot| &self.records[slot])
    }

    /// Owned copy of every record, in arrival order
    pub fn all(&self) -> Vec<R> {
        self.records.clone()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<R> Default for ProtocolPoolIndex<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            by_pool: HashMap::new(),
        }
    }
}

//! Delta types produced by diffing two snapshots of the same entity kind

use crate::common::identifiers::{PoolId, ProtocolCode};
use crate::entity::Identified;
use crate::pool::{Pool, ProtocolDictionary};
use crate::token::Token;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Delta between two identity-keyed collections
///
/// `updates` carry the full new value. `deletions` carry identities only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize, T::Id: Serialize",
    deserialize = "T: Deserialize<'de>, T::Id: Deserialize<'de>"
))]
pub struct CollectionDiff<T: Identified> {
    pub additions: Vec<T>,
    pub updates: Vec<T>,
    pub deletions: Vec<T::Id>,
}

impl<T: Identified> CollectionDiff<T> {
    pub fn new() -> Self {
        Self {
            additions: Vec::new(),
            updates: Vec::new(),
            deletions: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.updates.is_empty() && self.deletions.is_empty()
    }

    /// Total number of entries across all three categories
    pub fn len(&self) -> usize {
        self.additions.len() + self.updates.len() + self.deletions.len()
    }
}

impl<T: Identified> Default for CollectionDiff<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Token snapshot delta
pub type TokenSetDiff = CollectionDiff<Token>;

/// Delta between two key -> value dictionaries
///
/// A key present in both with a different value is an addition (overwrite);
/// there is no separate update category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryDiff<K: Ord, V> {
    pub additions: BTreeMap<K, V>,
    pub deletions: Vec<K>,
}

impl<K: Ord, V> DictionaryDiff<K, V> {
    pub fn new() -> Self {
        Self {
            additions: BTreeMap::new(),
            deletions: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.deletions.is_empty()
    }
}

impl<K: Ord, V> Default for DictionaryDiff<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Pool registry delta
///
/// Pools and the protocol dictionary are diffed independently. Pools are
/// identity-presence only, so there is no pool update category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolRegistryDiff {
    #[serde(default)]
    pub pool_additions: Vec<Pool>,
    #[serde(default)]
    pub pool_deletions: Vec<PoolId>,
    #[serde(default)]
    pub protocol_additions: ProtocolDictionary,
    #[serde(default)]
    pub protocol_deletions: Vec<ProtocolCode>,
}

impl PoolRegistryDiff {
    pub fn is_empty(&self) -> bool {
        self.pool_additions.is_empty()
            && self.pool_deletions.is_empty()
            && self.protocol_additions.is_empty()
            && self.protocol_deletions.is_empty()
    }

    /// Split view of the protocol dictionary part of this delta
    pub fn protocol_diff(&self) -> DictionaryDiff<ProtocolCode, String> {
        DictionaryDiff {
            additions: self.protocol_additions.clone(),
            deletions: self.protocol_deletions.clone(),
        }
    }
}

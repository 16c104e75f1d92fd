//! # Raw Block Bundles
//!
//! A bundle is everything the transport decoded for one block: block metadata,
//! the block's protocol-identifier -> schema manifest, and an ordered list of
//! schema-tagged slots.
//!
//! ## Slot Shapes
//!
//! ```text
//! token_snapshot             exactly once   Vec<Token>
//! pool_registry_snapshot     exactly once   PoolRegistry
//! graph_snapshot             exactly once   RawGraph
//! constant_product_pools     zero or more   Vec<ConstantProductPool>
//! concentrated_pools         zero or more   Vec<ConcentratedPool>
//! ```
//!
//! Slots are serialized adjacently tagged:
//! `{"schema": "token_snapshot", "payload": [...]}`.

use crate::common::errors::ValidationError;
use crate::common::identifiers::{PoolId, TokenId};
use crate::pool::{ConcentratedPool, ConstantProductPool, PoolRegistry};
use crate::token::Token;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Identifying metadata of the block a bundle was decoded from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockMeta {
    pub number: u64,
    pub hash: String,
    /// Block timestamp in seconds since the Unix epoch
    pub timestamp: u64,
}

impl BlockMeta {
    pub fn new(number: u64, hash: impl Into<String>, timestamp: u64) -> Self {
        Self {
            number,
            hash: hash.into(),
            timestamp,
        }
    }
}

/// Data-shape discriminator for a protocol's pool payload, scoped to one block
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProtocolSchema(String);

impl ProtocolSchema {
    pub fn new(schema: impl Into<String>) -> Self {
        Self(schema.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProtocolSchema {
    fn from(schema: &str) -> Self {
        Self::new(schema)
    }
}

impl fmt::Display for ProtocolSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Protocol identifier -> schema, shipped with every block
pub type SchemaManifest = BTreeMap<String, ProtocolSchema>;

/// One directed edge of the raw trading graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEdge {
    pub pool_id: PoolId,
    pub token_in: TokenId,
    pub token_out: TokenId,
}

/// Raw graph snapshot handed unmodified to the grapher
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawGraph {
    #[serde(default)]
    pub edges: Vec<RawEdge>,
}

/// Discriminator of a bundle slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotSchema {
    TokenSnapshot,
    PoolRegistrySnapshot,
    GraphSnapshot,
    ConstantProductPools,
    ConcentratedPools,
}

impl SlotSchema {
    /// Discriminators that must appear exactly once per bundle
    pub const REQUIRED: [SlotSchema; 3] = [
        SlotSchema::TokenSnapshot,
        SlotSchema::PoolRegistrySnapshot,
        SlotSchema::GraphSnapshot,
    ];

    pub const ALL: [SlotSchema; 5] = [
        SlotSchema::TokenSnapshot,
        SlotSchema::PoolRegistrySnapshot,
        SlotSchema::GraphSnapshot,
        SlotSchema::ConstantProductPools,
        SlotSchema::ConcentratedPools,
    ];

    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SlotSchema::TokenSnapshot => "token_snapshot",
            SlotSchema::PoolRegistrySnapshot => "pool_registry_snapshot",
            SlotSchema::GraphSnapshot => "graph_snapshot",
            SlotSchema::ConstantProductPools => "constant_product_pools",
            SlotSchema::ConcentratedPools => "concentrated_pools",
        }
    }
}

impl fmt::Display for SlotSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlotSchema {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|schema| schema.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownSchema(s.to_string()))
    }
}

/// One schema-tagged slot of a raw bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "schema", content = "payload", rename_all = "snake_case")]
pub enum BundleSlot {
    TokenSnapshot(Vec<Token>),
    PoolRegistrySnapshot(PoolRegistry),
    GraphSnapshot(RawGraph),
    ConstantProductPools(Vec<ConstantProductPool>),
    ConcentratedPools(Vec<ConcentratedPool>),
}

impl BundleSlot {
    pub fn schema(&self) -> SlotSchema {
        match self {
            BundleSlot::TokenSnapshot(_) => SlotSchema::TokenSnapshot,
            BundleSlot::PoolRegistrySnapshot(_) => SlotSchema::PoolRegistrySnapshot,
            BundleSlot::GraphSnapshot(_) => SlotSchema::GraphSnapshot,
            BundleSlot::ConstantProductPools(_) => SlotSchema::ConstantProductPools,
            BundleSlot::ConcentratedPools(_) => SlotSchema::ConcentratedPools,
        }
    }
}

/// Everything decoded for one block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBundle {
    pub block: BlockMeta,
    #[serde(default)]
    pub manifest: SchemaManifest,
    #[serde(default)]
    pub slots: Vec<BundleSlot>,
}

impl RawBundle {
    pub fn new(block: BlockMeta, manifest: SchemaManifest) -> Self {
        Self {
            block,
            manifest,
            slots: Vec::new(),
        }
    }

    pub fn with_slot(mut self, slot: BundleSlot) -> Self {
        self.slots.push(slot);
        self
    }

    /// Number of slots carrying each discriminator
    pub fn schema_counts(&self) -> BTreeMap<SlotSchema, usize> {
        let mut counts = BTreeMap::new();
        for slot in &self.slots {
            *counts.entry(slot.schema()).or_insert(0) += 1;
        }
        counts
    }
}

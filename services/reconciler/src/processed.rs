//! Fully reconciled, immutable view of one block

use chrono::{DateTime, Utc};
use state::{ConcentratedIndex, ConstantProductIndex, PoolRegistryIndex, ProtocolResolver, TokenIndex};
use std::sync::Arc;
use std::time::{Duration, Instant};
use types::BlockMeta;

/// Measured phase durations; reported, never used for control flow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseTimings {
    pub index: Duration,
    pub graph: Duration,
}

impl PhaseTimings {
    pub fn total(&self) -> Duration {
        self.index + self.graph
    }
}

/// The four indexes of one block
#[derive(Debug, Clone)]
pub(crate) struct BlockIndexes {
    pub tokens: Arc<TokenIndex>,
    pub pools: Arc<PoolRegistryIndex>,
    pub constant_product: Arc<ConstantProductIndex>,
    pub concentrated: Arc<ConcentratedIndex>,
}

/// Output of one successful reconciliation cycle
///
/// Only ever constructed whole by the pipeline. Every part is read-only and
/// may be shared across tasks.
#[derive(Debug)]
pub struct ProcessedState<G> {
    graph: G,
    indexes: BlockIndexes,
    resolver: Arc<ProtocolResolver>,
    block: BlockMeta,
    processed_at: Instant,
    processed_at_utc: DateTime<Utc>,
    timings: PhaseTimings,
}

impl<G> ProcessedState<G> {
    pub(crate) fn new(
        graph: G,
        indexes: BlockIndexes,
        resolver: Arc<ProtocolResolver>,
        block: BlockMeta,
        timings: PhaseTimings,
    ) -> Self {
        Self {
            graph,
            indexes,
            resolver,
            block,
            processed_at: Instant::now(),
            processed_at_utc: Utc::now(),
            timings,
        }
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn tokens(&self) -> &Arc<TokenIndex> {
        &self.indexes.tokens
    }

    pub fn pools(&self) -> &Arc<PoolRegistryIndex> {
        &self.indexes.pools
    }

    pub fn constant_product(&self) -> &Arc<ConstantProductIndex> {
        &self.indexes.constant_product
    }

    pub fn concentrated(&self) -> &Arc<ConcentratedIndex> {
        &self.indexes.concentrated
    }

    pub fn resolver(&self) -> &Arc<ProtocolResolver> {
        &self.resolver
    }

    pub fn block(&self) -> &BlockMeta {
        &self.block
    }

    /// Monotonic completion time
    pub fn processed_at(&self) -> Instant {
        self.processed_at
    }

    /// Wall-clock completion time
    pub fn processed_at_utc(&self) -> DateTime<Utc> {
        self.processed_at_utc
    }

    pub fn timings(&self) -> PhaseTimings {
        self.timings
    }
}

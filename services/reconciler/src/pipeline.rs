//! Per-block reconciliation pipeline
//!
//! ```text
//! RawBundle ─> demultiplex ─┬─> TokenIndexer ──────────┐
//!                           ├─> PoolRegistryIndexer ───┤
//!                           ├─> ConstantProductIndexer ┼─> join ─> ProtocolResolver ─> Grapher ─> ProcessedState
//!                           └─> ConcentratedIndexer ───┘
//! ```
//!
//! Each indexing job owns a disjoint part of the demultiplexed bundle and
//! returns its own index; the join is the only synchronization point. Any
//! failure rejects the whole block and nothing partial is produced.

use crate::error::PipelineError;
use crate::grapher::{GraphInput, Grapher};
use crate::indexers::{PipelineOptions, SharedIndexer};
use crate::log_slow;
use crate::processed::{BlockIndexes, PhaseTimings, ProcessedState};
use state::ProtocolResolver;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;
use types::{
    BlockMeta, BundleSlot, ConcentratedPool, ConstantProductPool, PoolRegistry, RawBundle,
    RawGraph, SchemaManifest, SlotSchema, Token,
};

/// A validated bundle routed by slot kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Demultiplexed {
    pub block: BlockMeta,
    pub manifest: SchemaManifest,
    pub tokens: Vec<Token>,
    pub registry: PoolRegistry,
    pub graph: RawGraph,
    /// All constant-product batches of the bundle, concatenated in arrival order
    pub constant_product: Vec<ConstantProductPool>,
    /// All concentrated-liquidity batches, concatenated in arrival order
    pub concentrated: Vec<ConcentratedPool>,
}

/// Validate slot composition and route every slot to its destination
///
/// Token, pool registry and graph snapshots must appear exactly once.
pub fn demultiplex(bundle: RawBundle) -> Result<Demultiplexed, PipelineError> {
    let number = bundle.block.number;
    let counts = bundle.schema_counts();

    for schema in SlotSchema::REQUIRED {
        match counts.get(&schema).copied().unwrap_or(0) {
            1 => {}
            0 => return Err(PipelineError::MissingSlot { block: number, schema }),
            count => {
                return Err(PipelineError::DuplicateSlot {
                    block: number,
                    schema,
                    count,
                })
            }
        }
    }

    let RawBundle {
        block,
        manifest,
        slots,
    } = bundle;

    let mut tokens = None;
    let mut registry = None;
    let mut graph = None;
    let mut constant_product = Vec::new();
    let mut concentrated = Vec::new();

    for slot in slots {
        match slot {
            BundleSlot::TokenSnapshot(snapshot) => tokens = Some(snapshot),
            BundleSlot::PoolRegistrySnapshot(snapshot) => registry = Some(snapshot),
            BundleSlot::GraphSnapshot(snapshot) => graph = Some(snapshot),
            BundleSlot::ConstantProductPools(mut batch) => constant_product.append(&mut batch),
            BundleSlot::ConcentratedPools(mut batch) => concentrated.append(&mut batch),
        }
    }

    let missing = |schema| PipelineError::MissingSlot {
        block: number,
        schema,
    };

    Ok(Demultiplexed {
        block,
        manifest,
        tokens: tokens.ok_or_else(|| missing(SlotSchema::TokenSnapshot))?,
        registry: registry.ok_or_else(|| missing(SlotSchema::PoolRegistrySnapshot))?,
        graph: graph.ok_or_else(|| missing(SlotSchema::GraphSnapshot))?,
        constant_product,
        concentrated,
    })
}

/// Run one indexing job on the blocking pool
async fn run_indexer<I, O>(
    indexer: SharedIndexer<I, O>,
    input: I,
    block: u64,
) -> Result<Arc<O>, PipelineError>
where
    I: Send + 'static,
    O: Send + 'static,
{
    let output = tokio::task::spawn_blocking(move || indexer.index(input))
        .await
        .map_err(|e| PipelineError::IndexTaskFailed {
            block,
            reason: e.to_string(),
        })?
        .map_err(|source| PipelineError::Index { block, source })?;

    Ok(Arc::new(output))
}

/// Reconciles raw bundles into processed states
pub struct ReconciliationPipeline<G: Grapher> {
    options: PipelineOptions<G>,
}

impl<G: Grapher> ReconciliationPipeline<G> {
    pub fn new(options: PipelineOptions<G>) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PipelineOptions<G> {
        &self.options
    }

    /// Reconcile one bundle
    ///
    /// All four indexing jobs are awaited even if one fails early.
    pub async fn process(&self, bundle: RawBundle) -> Result<ProcessedState<G::Graph>, PipelineError> {
        let Demultiplexed {
            block,
            manifest,
            tokens,
            registry,
            graph,
            constant_product,
            concentrated,
        } = demultiplex(bundle)?;
        let number = block.number;

        let index_start = Instant::now();
        let (tokens, pools, constant_product, concentrated) = tokio::join!(
            run_indexer(self.options.token_indexer.clone(), tokens, number),
            run_indexer(self.options.pool_indexer.clone(), registry, number),
            run_indexer(
                self.options.constant_product_indexer.clone(),
                constant_product,
                number
            ),
            run_indexer(self.options.concentrated_indexer.clone(), concentrated, number),
        );
        let indexes = BlockIndexes {
            tokens: tokens?,
            pools: pools?,
            constant_product: constant_product?,
            concentrated: concentrated?,
        };
        let index_elapsed = index_start.elapsed();

        let resolver = Arc::new(ProtocolResolver::new(number, manifest, indexes.pools.clone()));

        let graph_start = Instant::now();
        let analytical = self
            .options
            .grapher
            .build(GraphInput {
                block: &block,
                raw: &graph,
                pools: &indexes.pools,
                constant_product: &indexes.constant_product,
                concentrated: &indexes.concentrated,
                resolver: &resolver,
            })
            .map_err(|source| PipelineError::Graph {
                block: number,
                source,
            })?;

        let timings = PhaseTimings {
            index: index_elapsed,
            graph: graph_start.elapsed(),
        };

        debug!(
            block = number,
            tokens = indexes.tokens.len(),
            pools = indexes.pools.len(),
            constant_product = indexes.constant_product.len(),
            concentrated = indexes.concentrated.len(),
            index_us = timings.index.as_micros() as u64,
            graph_us = timings.graph.as_micros() as u64,
            "Block reconciled"
        );

        if timings.total() > self.options.slow_block {
            log_slow!(
                "Block {} took {}ms (threshold {}ms)",
                number,
                timings.total().as_millis(),
                self.options.slow_block.as_millis()
            );
        }

        Ok(ProcessedState::new(analytical, indexes, resolver, block, timings))
    }
}

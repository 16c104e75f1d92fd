//! Indexing jobs and the pipeline's construction-time options
//!
//! Each of the four indexing jobs is an `Indexer` taking ownership of its own
//! demultiplexed input. `PipelineOptions` collects the indexers, the grapher
//! and the slow-block threshold once, before the pipeline exists; the
//! pipeline consumes it and exposes no way to swap anything afterwards.

use crate::grapher::{AdjacencyGrapher, Grapher};
use state::{ConcentratedIndex, ConstantProductIndex, IndexError, PoolRegistryIndex, TokenIndex};
use std::sync::Arc;
use std::time::Duration;
use types::{ConcentratedPool, ConstantProductPool, PoolRegistry, Token};

/// One indexing job of the fork-join phase
pub trait Indexer<I, O>: Send + Sync {
    fn index(&self, input: I) -> Result<O, IndexError>;
}

impl<I, O, F> Indexer<I, O> for F
where
    F: Fn(I) -> Result<O, IndexError> + Send + Sync,
{
    fn index(&self, input: I) -> Result<O, IndexError> {
        self(input)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokenIndexer;

impl Indexer<Vec<Token>, TokenIndex> for TokenIndexer {
    fn index(&self, tokens: Vec<Token>) -> Result<TokenIndex, IndexError> {
        TokenIndex::build(tokens)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PoolRegistryIndexer;

impl Indexer<PoolRegistry, PoolRegistryIndex> for PoolRegistryIndexer {
    fn index(&self, registry: PoolRegistry) -> Result<PoolRegistryIndex, IndexError> {
        PoolRegistryIndex::build(registry)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantProductIndexer;

impl Indexer<Vec<ConstantProductPool>, ConstantProductIndex> for ConstantProductIndexer {
    fn index(&self, records: Vec<ConstantProductPool>) -> Result<ConstantProductIndex, IndexError> {
        ConstantProductIndex::build(records)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConcentratedIndexer;

impl Indexer<Vec<ConcentratedPool>, ConcentratedIndex> for ConcentratedIndexer {
    fn index(&self, records: Vec<ConcentratedPool>) -> Result<ConcentratedIndex, IndexError> {
        ConcentratedIndex::build(records)
    }
}

pub(crate) type SharedIndexer<I, O> = Arc<dyn Indexer<I, O>>;

/// Collaborators and thresholds fixed at pipeline construction
pub struct PipelineOptions<G> {
    pub(crate) grapher: G,
    pub(crate) token_indexer: SharedIndexer<Vec<Token>, TokenIndex>,
    pub(crate) pool_indexer: SharedIndexer<PoolRegistry, PoolRegistryIndex>,
    pub(crate) constant_product_indexer: SharedIndexer<Vec<ConstantProductPool>, ConstantProductIndex>,
    pub(crate) concentrated_indexer: SharedIndexer<Vec<ConcentratedPool>, ConcentratedIndex>,
    pub(crate) slow_block: Duration,
}

impl PipelineOptions<AdjacencyGrapher> {
    /// Default indexers, `AdjacencyGrapher`, 250ms slow-block threshold
    pub fn new() -> Self {
        Self {
            grapher: AdjacencyGrapher,
            token_indexer: Arc::new(TokenIndexer),
            pool_indexer: Arc::new(PoolRegistryIndexer),
            constant_product_indexer: Arc::new(ConstantProductIndexer),
            concentrated_indexer: Arc::new(ConcentratedIndexer),
            slow_block: Duration::from_millis(250),
        }
    }
}

impl Default for PipelineOptions<AdjacencyGrapher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Grapher> PipelineOptions<G> {
    pub fn with_grapher<H: Grapher>(self, grapher: H) -> PipelineOptions<H> {
        PipelineOptions {
            grapher,
            token_indexer: self.token_indexer,
            pool_indexer: self.pool_indexer,
            constant_product_indexer: self.constant_product_indexer,
            concentrated_indexer: self.concentrated_indexer,
            slow_block: self.slow_block,
        }
    }

    pub fn with_token_indexer(
        mut self,
        indexer: impl Indexer<Vec<Token>, TokenIndex> + 'static,
    ) -> Self {
        self.token_indexer = Arc::new(indexer);
        self
    }

    pub fn with_pool_indexer(
        mut self,
        indexer: impl Indexer<PoolRegistry, PoolRegistryIndex> + 'static,
    ) -> Self {
        self.pool_indexer = Arc::new(indexer);
        self
    }

    pub fn with_constant_product_indexer(
        mut self,
        indexer: impl Indexer<Vec<ConstantProductPool>, ConstantProductIndex> + 'static,
    ) -> Self {
        self.constant_product_indexer = Arc::new(indexer);
        self
    }

    pub fn with_concentrated_indexer(
        mut self,
        indexer: impl Indexer<Vec<ConcentratedPool>, ConcentratedIndex> + 'static,
    ) -> Self {
        self.concentrated_indexer = Arc::new(indexer);
        self
    }

    /// Blocks taking longer than this end-to-end are logged at warn level
    pub fn with_slow_block_threshold(mut self, threshold: Duration) -> Self {
        self.slow_block = threshold;
        self
    }

    pub fn grapher(&self) -> &G {
        &self.grapher
    }

    pub fn slow_block_threshold(&self) -> Duration {
        self.slow_block
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{Address, TokenId};

    #[test]
    fn test_default_indexers_build() {
        let options = PipelineOptions::new();
        let token = Token::new(TokenId::new(1), Address::new([1; 20]), "WETH", 18);

        let index = options.token_indexer.index(vec![token]).unwrap();
        assert_eq!(index.len(), 1);
        assert!(options.pool_indexer.index(PoolRegistry::default()).unwrap().is_empty());
        assert_eq!(options.slow_block_threshold(), Duration::from_millis(250));
    }

    #[test]
    fn test_closure_overrides_indexer() {
        let options = PipelineOptions::new()
            .with_token_indexer(|_tokens: Vec<Token>| TokenIndex::build(Vec::new()))
            .with_slow_block_threshold(Duration::from_millis(5));

        let token = Token::new(TokenId::new(1), Address::new([1; 20]), "WETH", 18);
        assert!(options.token_indexer.index(vec![token]).unwrap().is_empty());
        assert_eq!(options.slow_block_threshold(), Duration::from_millis(5));
    }
}

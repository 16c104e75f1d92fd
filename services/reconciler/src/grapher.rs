//! Grapher collaborator: turns a block's raw graph and indexes into an analytical graph
//!
//! The pipeline calls `Grapher::build` exactly once per block, after every
//! index and the resolver exist. Implementations must be pure; the default
//! `AdjacencyGrapher` is a plain adjacency list annotated with each edge's
//! resolved schema and pool state.

use crate::error::GraphError;
use state::{ConcentratedIndex, ConstantProductIndex, PoolRegistryIndex, ProtocolResolver};
use std::collections::BTreeMap;
use types::{
    BlockMeta, ConcentratedPool, ConstantProductPool, PoolId, ProtocolSchema, RawGraph, TokenId,
};

/// Everything a grapher may read for one block
#[derive(Debug, Clone, Copy)]
pub struct GraphInput<'a> {
    pub block: &'a BlockMeta,
    pub raw: &'a RawGraph,
    pub pools: &'a PoolRegistryIndex,
    pub constant_product: &'a ConstantProductIndex,
    pub concentrated: &'a ConcentratedIndex,
    pub resolver: &'a ProtocolResolver,
}

/// Builds the analytical graph for one block
pub trait Grapher: Send + Sync + 'static {
    type Graph: Send + Sync + 'static;

    fn build(&self, input: GraphInput<'_>) -> Result<Self::Graph, GraphError>;
}

/// Pool state attached to an edge, when the block carried one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeState {
    ConstantProduct(ConstantProductPool),
    Concentrated(ConcentratedPool),
    /// Registry lists the pool but no batch in this block carried its state
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    pub pool_id: PoolId,
    pub token_out: TokenId,
    pub schema: ProtocolSchema,
    pub state: EdgeState,
}

/// Token -> outgoing edges
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyticalGraph {
    block: u64,
    adjacency: BTreeMap<TokenId, Vec<GraphEdge>>,
    edge_count: usize,
}

impl AnalyticalGraph {
    pub fn block(&self) -> u64 {
        self.block
    }

    /// Outgoing edges of a token, empty if it has none
    pub fn edges_from(&self, token: TokenId) -> &[GraphEdge] {
        self.adjacency.get(&token).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn tokens(&self) -> impl Iterator<Item = TokenId> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn token_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.edge_count == 0
    }
}

/// Default grapher: every raw edge must resolve to a schema
#[derive(Debug, Clone, Copy, Default)]
pub struct AdjacencyGrapher;

impl Grapher for AdjacencyGrapher {
    type Graph = AnalyticalGraph;

    fn build(&self, input: GraphInput<'_>) -> Result<AnalyticalGraph, GraphError> {
        let mut adjacency: BTreeMap<TokenId, Vec<GraphEdge>> = BTreeMap::new();

        for edge in &input.raw.edges {
            if edge.token_in == edge.token_out {
                return Err(GraphError::SelfLoop {
                    pool: edge.pool_id,
                    token: edge.token_in,
                });
            }

            let schema = input
                .resolver
                .try_resolve(edge.pool_id)
                .map_err(|miss| GraphError::UnresolvedPool {
                    pool: edge.pool_id,
                    miss,
                })?
                .clone();

            let state = if let Some(record) = input.constant_product.get(edge.pool_id) {
                EdgeState::ConstantProduct(record.clone())
            } else if let Some(record) = input.concentrated.get(edge.pool_id) {
                EdgeState::Concentrated(record.clone())
            } else {
                EdgeState::Missing
            };

            adjacency.entry(edge.token_in).or_default().push(GraphEdge {
                pool_id: edge.pool_id,
                token_out: edge.token_out,
                schema,
                state,
            });
        }

        Ok(AnalyticalGraph {
            block: input.block.number,
            adjacency,
            edge_count: input.raw.edges.len(),
        })
    }
}

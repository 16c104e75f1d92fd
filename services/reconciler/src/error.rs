//! Error types for the reconciler service
//!
//! Only `UpstreamError` ever reaches the consumer. `PipelineError` and
//! `GraphError` are scoped to one block: the block is logged and skipped.

use state::{IndexError, ResolveMiss};
use thiserror::Error;
use types::{PoolId, SlotSchema, TokenId};

/// Fatal failure reported by the upstream transport
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    #[error("bundle on line {line} could not be decoded: {reason}")]
    Decode { line: usize, reason: String },

    #[error("upstream read failed: {0}")]
    Io(String),

    #[error("upstream disconnected: {0}")]
    Disconnected(String),
}

/// Failure of the external grapher for one block
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("edge on pool {pool} cannot be resolved: {miss}")]
    UnresolvedPool {
        pool: PoolId,
        #[source]
        miss: ResolveMiss,
    },

    #[error("edge on pool {pool} loops on token {token}")]
    SelfLoop { pool: PoolId, token: TokenId },

    #[error("{0}")]
    Other(String),
}

/// Block-scoped reconciliation failure
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("block {block}: required slot {schema} is missing")]
    MissingSlot { block: u64, schema: SlotSchema },

    #[error("block {block}: required slot {schema} appears {count} times")]
    DuplicateSlot {
        block: u64,
        schema: SlotSchema,
        count: usize,
    },

    #[error("block {block}: {source}")]
    Index {
        block: u64,
        #[source]
        source: IndexError,
    },

    #[error("block {block}: indexing task failed: {reason}")]
    IndexTaskFailed { block: u64, reason: String },

    #[error("block {block}: graph build failed: {source}")]
    Graph {
        block: u64,
        #[source]
        source: GraphError,
    },
}

impl PipelineError {
    /// Block the failure belongs to
    pub fn block(&self) -> u64 {
        match self {
            PipelineError::MissingSlot { block, .. }
            | PipelineError::DuplicateSlot { block, .. }
            | PipelineError::Index { block, .. }
            | PipelineError::IndexTaskFailed { block, .. }
            | PipelineError::Graph { block, .. } => *block,
        }
    }

    /// Whether the bundle itself was malformed, as opposed to failing later
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PipelineError::MissingSlot { .. } | PipelineError::DuplicateSlot { .. }
        )
    }
}

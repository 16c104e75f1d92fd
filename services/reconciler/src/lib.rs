//! # State Reconciler Service
//!
//! ## Purpose
//!
//! Turns each raw block bundle into a fully indexed, immutable `ProcessedState` and
//! hands it to a single consumer under a recency-over-completeness policy: if the
//! consumer has not taken the previous state, the new one is dropped rather than
//! queued.
//!
//! ## Integration Points
//!
//! - **Input**: `Upstream` bundle and fatal-error channels (wire transport, or the
//!   NDJSON `source` used by the runner binary)
//! - **Output**: `Downstream` single-slot state mailbox, single-error channel, stats
//! - **Collaborators**: `Grapher` and the four `Indexer`s, fixed via `PipelineOptions`
//!
//! ## Architecture Role
//!
//! ```text
//! Upstream ──> [DeliveryLoop] ──> [ReconciliationPipeline] ──> Arc<ProcessedState> ──> Mailbox(1)
//!     │              │                                                                   │
//!     └─ error ──────┴──────────────────────> error channel (at most one) ───────────────┴─> Consumer
//! ```
//!
//! ## Failure Scoping
//!
//! - Missing/duplicate required slots, index failures and grapher failures reject
//!   one block; the loop continues
//! - Upstream errors and end of stream stop the loop; only upstream errors reach
//!   the consumer

pub mod delivery;
pub mod error;
pub mod grapher;
pub mod indexers;
pub mod logging;
pub mod mailbox;
pub mod pipeline;
pub mod processed;
pub mod source;
pub mod stats;

pub use delivery::{DeliveryLoop, Downstream, Upstream, UpstreamHandle};
pub use error::{GraphError, PipelineError, UpstreamError};
pub use grapher::{AdjacencyGrapher, AnalyticalGraph, EdgeState, GraphEdge, GraphInput, Grapher};
pub use indexers::{
    ConcentratedIndexer, ConstantProductIndexer, Indexer, PipelineOptions, PoolRegistryIndexer,
    TokenIndexer,
};
pub use mailbox::{mailbox, Delivery, MailboxReceiver, MailboxSender};
pub use pipeline::{demultiplex, Demultiplexed, ReconciliationPipeline};
pub use processed::{PhaseTimings, ProcessedState};
pub use source::feed_ndjson;
pub use stats::{LoopStats, LoopStatsSnapshot};

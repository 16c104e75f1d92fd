//! Delivery loop: binds the pipeline to an upstream source and a drop-on-full consumer
//!
//! One long-lived task. Each iteration waits on, in priority order:
//!
//! 1. cancellation: stop immediately
//! 2. an upstream fatal error: finish the bundles already queued ahead of
//!    it, hand the error to the consumer once, then stop
//! 3. the next raw bundle: reconcile it and try to deliver the result
//!
//! A closed bundle stream stops the loop without an error. Block-scoped
//! failures are logged and counted; the loop moves on to the next bundle.
//! Both consumer channels close exactly once, when the task returns.

use crate::error::UpstreamError;
use crate::grapher::Grapher;
use crate::mailbox::{mailbox, Delivery, MailboxReceiver, MailboxSender};
use crate::pipeline::ReconciliationPipeline;
use crate::processed::ProcessedState;
use crate::stats::LoopStats;
use crate::{log_block, log_dropped, log_rejected, log_start, log_stop};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use types::RawBundle;

/// Receiving side of the upstream transport
#[derive(Debug)]
pub struct Upstream {
    pub bundles: mpsc::Receiver<RawBundle>,
    pub errors: mpsc::Receiver<UpstreamError>,
}

/// Publishing side of the upstream transport
///
/// Publish at most one error; no bundles may follow it.
#[derive(Debug, Clone)]
pub struct UpstreamHandle {
    pub bundles: mpsc::Sender<RawBundle>,
    pub errors: mpsc::Sender<UpstreamError>,
}

impl Upstream {
    /// In-process upstream with a bounded bundle channel and a single-error channel
    pub fn channel(buffer: usize) -> (UpstreamHandle, Upstream) {
        let (bundle_tx, bundle_rx) = mpsc::channel(buffer.max(1));
        let (error_tx, error_rx) = mpsc::channel(1);

        (
            UpstreamHandle {
                bundles: bundle_tx,
                errors: error_tx,
            },
            Upstream {
                bundles: bundle_rx,
                errors: error_rx,
            },
        )
    }
}

/// Consumer side of a running delivery loop
#[derive(Debug)]
pub struct Downstream<G> {
    pub states: MailboxReceiver<Arc<ProcessedState<G>>>,
    pub errors: mpsc::Receiver<UpstreamError>,
    pub stats: Arc<LoopStats>,
}

pub struct DeliveryLoop<G: Grapher> {
    pipeline: ReconciliationPipeline<G>,
    upstream: Upstream,
    cancel: CancellationToken,
    states: MailboxSender<Arc<ProcessedState<G::Graph>>>,
    errors: mpsc::Sender<UpstreamError>,
    stats: Arc<LoopStats>,
}

impl<G: Grapher> DeliveryLoop<G> {
    /// Start the loop on the current runtime
    pub fn spawn(
        pipeline: ReconciliationPipeline<G>,
        upstream: Upstream,
        cancel: CancellationToken,
    ) -> (Downstream<G::Graph>, JoinHandle<()>) {
        let (state_tx, state_rx) = mailbox();
        let (error_tx, error_rx) = mpsc::channel(1);
        let stats = Arc::new(LoopStats::default());

        let task = DeliveryLoop {
            pipeline,
            upstream,
            cancel,
            states: state_tx,
            errors: error_tx,
            stats: stats.clone(),
        };

        let handle = tokio::spawn(task.run());

        (
            Downstream {
                states: state_rx,
                errors: error_rx,
                stats,
            },
            handle,
        )
    }

    async fn run(mut self) {
        log_start!("Delivery loop started");
        let mut errors_open = true;

        loop {
            tokio::select! {
                biased;

                _ = self.cancel.cancelled() => {
                    log_stop!("Cancellation received, delivery loop stopping");
                    break;
                }

                error = self.upstream.errors.recv(), if errors_open => match error {
                    Some(error) => {
                        if self.drain_queued().await {
                            self.forward_error(error).await;
                        }
                        break;
                    }
                    None => {
                        debug!("Upstream error channel closed without an error");
                        errors_open = false;
                    }
                },

                bundle = self.upstream.bundles.recv() => match bundle {
                    Some(bundle) => self.handle_bundle(bundle).await,
                    None => {
                        info!("Upstream bundle stream closed");
                        break;
                    }
                },
            }
        }

        let stats = self.stats.snapshot();
        log_stop!(
            "Delivery loop stopped: {} received, {} delivered, {} dropped, {} rejected",
            stats.blocks_received,
            stats.states_delivered,
            stats.states_dropped,
            stats.blocks_rejected
        );
        // Dropping self closes both consumer channels
    }

    /// Process bundles published before an upstream error, in arrival order
    ///
    /// Returns false if cancellation fired while draining.
    async fn drain_queued(&mut self) -> bool {
        while let Ok(bundle) = self.upstream.bundles.try_recv() {
            if self.cancel.is_cancelled() {
                log_stop!("Cancellation received while draining queued bundles");
                return false;
            }
            self.handle_bundle(bundle).await;
        }
        !self.cancel.is_cancelled()
    }

    async fn handle_bundle(&self, bundle: RawBundle) {
        self.stats.record_received();
        let number = bundle.block.number;

        let state = match self.pipeline.process(bundle).await {
            Ok(state) => state,
            Err(e) => {
                self.stats.record_rejected();
                log_rejected!("Block {} rejected: {}", number, e);
                return;
            }
        };
        self.stats.record_processed();

        if self.cancel.is_cancelled() {
            debug!(block = number, "Cancelled during processing, state not delivered");
            return;
        }

        match self.states.try_deliver(Arc::new(state)) {
            Delivery::Delivered => {
                self.stats.record_delivered();
                log_block!("Block {} reconciled and delivered", number);
            }
            Delivery::Dropped => {
                self.stats.record_dropped();
                log_dropped!("Block {} dropped: consumer has not taken the previous state", number);
            }
            Delivery::Closed => {
                debug!(block = number, "State consumer gone, state discarded");
            }
        }
    }

    async fn forward_error(&self, error: UpstreamError) {
        warn!(error = %error, "Upstream reported a fatal error");

        tokio::select! {
            biased;

            _ = self.cancel.cancelled() => {
                debug!("Cancelled before upstream error was delivered");
            }
            sent = self.errors.send(error) => {
                if sent.is_err() {
                    debug!("Error consumer gone, upstream error discarded");
                }
            }
        }
    }
}

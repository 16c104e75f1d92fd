//! Delivery loop counters

use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free counters shared between the loop and its consumers
#[derive(Debug, Default)]
pub struct LoopStats {
    blocks_received: AtomicU64,
    blocks_processed: AtomicU64,
    blocks_rejected: AtomicU64,
    states_delivered: AtomicU64,
    states_dropped: AtomicU64,
}

/// Point-in-time copy of `LoopStats`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStatsSnapshot {
    pub blocks_received: u64,
    pub blocks_processed: u64,
    pub blocks_rejected: u64,
    pub states_delivered: u64,
    pub states_dropped: u64,
}

impl LoopStats {
    pub(crate) fn record_received(&self) {
        self.blocks_received.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_processed(&self) {
        self.blocks_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rejected(&self) {
        self.blocks_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_delivered(&self) {
        self.states_delivered.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_dropped(&self) {
        self.states_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> LoopStatsSnapshot {
        LoopStatsSnapshot {
            blocks_received: self.blocks_received.load(Ordering::Relaxed),
            blocks_processed: self.blocks_processed.load(Ordering::Relaxed),
            blocks_rejected: self.blocks_rejected.load(Ordering::Relaxed),
            states_delivered: self.states_delivered.load(Ordering::Relaxed),
            states_dropped: self.states_dropped.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_reflects_counters() {
        let stats = LoopStats::default();
        stats.record_received();
        stats.record_received();
        stats.record_processed();
        stats.record_rejected();
        stats.record_dropped();

        assert_eq!(
            stats.snapshot(),
            LoopStatsSnapshot {
                blocks_received: 2,
                blocks_processed: 1,
                blocks_rejected: 1,
                states_delivered: 0,
                states_dropped: 1,
            }
        );
    }
}

//! State Reconciliation Traits
//!
//! Core traits for computing and applying deltas between two snapshots of
//! the same entity kind.

/// Computes the delta that turns `old` into `new`
pub trait Differ {
    /// Snapshot type this differ compares
    type Snapshot;

    /// Delta type produced by a comparison
    type Delta;

    /// Compare two snapshots. Cost is linear in the size of both.
    fn diff(&self, old: &Self::Snapshot, new: &Self::Snapshot) -> Self::Delta;
}

/// Applies a delta to a snapshot, producing the next snapshot
pub trait Patcher {
    /// Snapshot type this patcher rebuilds
    type Snapshot;

    /// Delta type this patcher applies
    type Delta;

    /// Apply `delta` on top of `old` and return a new snapshot.
    ///
    /// `old` is borrowed immutably and never modified. Well-formed input
    /// never fails, so there is no error path.
    fn patch(&self, old: &Self::Snapshot, delta: &Self::Delta) -> Self::Snapshot;
}

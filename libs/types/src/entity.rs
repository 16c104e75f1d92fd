//! Identity and tracked-field traits shared by every reconciled entity kind

use std::fmt::Debug;
use std::hash::Hash;

/// An entity with a stable identity inside its snapshot
pub trait Identified {
    type Id: Copy + Eq + Hash + Ord + Debug;

    fn identity(&self) -> Self::Id;
}

/// An entity whose updates are detected on a fixed set of tracked fields
///
/// Two values with the same identity that agree on every tracked field are
/// the same for diffing purposes, whatever their untracked fields say.
pub trait Tracked: Identified {
    fn tracked_eq(&self, other: &Self) -> bool;
}

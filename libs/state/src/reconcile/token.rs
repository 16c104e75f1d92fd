//! Token snapshot reconciliation
//!
//! Tokens are diffed on their tracked fields only: transfer fee percentage and
//! transfer gas cost. A renamed symbol or changed decimal precision on an
//! existing token never produces an update.

use super::{diff_collection, patch_collection};
use crate::traits::{Differ, Patcher};
use types::{Token, TokenSetDiff};

#[derive(Debug, Clone, Copy, Default)]
pub struct TokenReconciler;

impl Differ for TokenReconciler {
    type Snapshot = Vec<Token>;
    type Delta = TokenSetDiff;

    fn diff(&self, old: &Vec<Token>, new: &Vec<Token>) -> TokenSetDiff {
        diff_collection(old, new)
    }
}

impl Patcher for TokenReconciler {
    type Snapshot = Vec<Token>;
    type Delta = TokenSetDiff;

    fn patch(&self, old: &Vec<Token>, delta: &TokenSetDiff) -> Vec<Token> {
        patch_collection(old, delta)
    }
}

//! Generic diff/patch engine
//!
//! Two namespaces are supported:
//!
//! - **Collections** keyed by entity identity (`Identified`), with updates detected on
//!   tracked fields only (`Tracked`)
//! - **Dictionaries** keyed by a small code, where a changed value for an existing key
//!   is reported as an addition (overwrite)
//!
//! Both patch functions take the old snapshot by reference and build the result in a
//! freshly owned working map, so callers' snapshots are never modified.

pub mod pool_registry;
pub mod token;

pub use pool_registry::PoolRegistryReconciler;
pub use token::TokenReconciler;

use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, trace};
use types::{CollectionDiff, DictionaryDiff, Identified, Tracked};

/// Diff two identity-keyed collections
///
/// - present only in `new` ⇒ addition
/// - present only in `old` ⇒ deletion (identity only)
/// - present in both ⇒ update only if a tracked field differs
///
/// Entries come out in the order they appear in `new` (additions, updates) and
/// `old` (deletions).
pub fn diff_collection<T>(old: &[T], new: &[T]) -> CollectionDiff<T>
where
    T: Tracked + Clone,
{
    let old_by_id: HashMap<T::Id, &T> = old.iter().map(|item| (item.identity(), item)).collect();
    let new_ids: HashSet<T::Id> = new.iter().map(T::identity).collect();

    let mut diff = CollectionDiff::new();

    for item in new {
        match old_by_id.get(&item.identity()) {
            None => diff.additions.push(item.clone()),
            Some(previous) if !previous.tracked_eq(item) => diff.updates.push(item.clone()),
            Some(_) => {}
        }
    }

    for item in old {
        let id = item.identity();
        if !new_ids.contains(&id) {
            diff.deletions.push(id);
        }
    }

    trace!(
        additions = diff.additions.len(),
        updates = diff.updates.len(),
        deletions = diff.deletions.len(),
        "Collection diff computed"
    );

    diff
}

/// Apply a collection delta: deletions, then updates, then additions
///
/// The result is an unordered collection; no positional relationship to `old`
/// is kept.
pub fn patch_collection<T>(old: &[T], diff: &CollectionDiff<T>) -> Vec<T>
where
    T: Identified + Clone,
{
    let mut working: HashMap<T::Id, T> = old
        .iter()
        .map(|item| (item.identity(), item.clone()))
        .collect();

    for id in &diff.deletions {
        if working.remove(id).is_none() {
            debug!(?id, "Deletion of absent identity ignored");
        }
    }

    for item in &diff.updates {
        if working.insert(item.identity(), item.clone()).is_none() {
            debug!(id = ?item.identity(), "Update for absent identity applied as insert");
        }
    }

    for item in &diff.additions {
        working.insert(item.identity(), item.clone());
    }

    working.into_values().collect()
}

/// Diff two dictionaries
///
/// A key whose value changed is an addition carrying the new value.
pub fn diff_dictionary<K, V>(old: &BTreeMap<K, V>, new: &BTreeMap<K, V>) -> DictionaryDiff<K, V>
where
    K: Ord + Clone,
    V: PartialEq + Clone,
{
    let mut diff = DictionaryDiff::new();

    for (key, value) in new {
        if old.get(key) != Some(value) {
            diff.additions.insert(key.clone(), value.clone());
        }
    }

    diff.deletions = old
        .keys()
        .filter(|key| !new.contains_key(*key))
        .cloned()
        .collect();

    diff
}

/// Apply a dictionary delta: deletions, then additions (overwriting)
pub fn patch_dictionary<K, V>(old: &BTreeMap<K, V>, diff: &DictionaryDiff<K, V>) -> BTreeMap<K, V>
where
    K: Ord + Clone,
    V: Clone,
{
    let mut working = old.clone();

    for key in &diff.deletions {
        working.remove(key);
    }

    for (key, value) in &diff.additions {
        working.insert(key.clone(), value.clone());
    }

    working
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u32,
        tracked: u32,
        label: &'static str,
    }

    impl Identified for Item {
        type Id = u32;

        fn identity(&self) -> u32 {
            self.id
        }
    }

    impl Tracked for Item {
        fn tracked_eq(&self, other: &Self) -> bool {
            self.tracked == other.tracked
        }
    }

    fn item(id: u32, tracked: u32) -> Item {
        Item {
            id,
            tracked,
            label: "x",
        }
    }

    fn sorted(mut items: Vec<Item>) -> Vec<Item> {
        items.sort_by_key(|i| i.id);
        items
    }

    #[test]
    fn test_diff_categorizes_entries() {
        let old = vec![item(1, 10), item(2, 20), item(3, 30)];
        let new = vec![item(2, 20), item(3, 31), item(4, 40)];

        let diff = diff_collection(&old, &new);

        assert_eq!(diff.additions, vec![item(4, 40)]);
        assert_eq!(diff.updates, vec![item(3, 31)]);
        assert_eq!(diff.deletions, vec![1]);
    }

    #[test]
    fn test_untracked_change_is_not_an_update() {
        let old = vec![item(1, 10)];
        let mut relabeled = item(1, 10);
        relabeled.label = "renamed";

        assert!(diff_collection(&old, &[relabeled]).is_empty());
    }

    #[test]
    fn test_patch_applies_deletions_before_additions() {
        let old = vec![item(1, 10)];
        let mut diff = CollectionDiff::new();
        diff.deletions.push(1);
        diff.additions.push(item(1, 99));

        assert_eq!(patch_collection(&old, &diff), vec![item(1, 99)]);
    }

    #[test]
    fn test_patch_leaves_input_untouched() {
        let old = vec![item(1, 10), item(2, 20)];
        let before = old.clone();
        let diff = diff_collection(&old, &[item(2, 21), item(5, 50)]);

        let patched = patch_collection(&old, &diff);

        assert_eq!(old, before);
        assert_eq!(sorted(patched), vec![item(2, 21), item(5, 50)]);
    }

    #[test]
    fn test_patch_is_lenient_on_absent_identities() {
        let old = vec![item(1, 10)];
        let mut diff = CollectionDiff::new();
        diff.deletions.push(7);
        diff.updates.push(item(8, 80));

        assert_eq!(sorted(patch_collection(&old, &diff)), vec![item(1, 10), item(8, 80)]);
    }

    #[test]
    fn test_dictionary_changed_value_is_an_addition() {
        let old = BTreeMap::from([(1u16, "uniswap-v2".to_string()), (2, "curve".to_string())]);
        let new = BTreeMap::from([(1u16, "sushiswap-v2".to_string()), (3, "balancer".to_string())]);

        let diff = diff_dictionary(&old, &new);

        assert_eq!(
            diff.additions,
            BTreeMap::from([(1u16, "sushiswap-v2".to_string()), (3, "balancer".to_string())])
        );
        assert_eq!(diff.deletions, vec![2]);
        assert_eq!(patch_dictionary(&old, &diff), new);
    }

    #[test]
    fn test_dictionary_self_diff_is_empty() {
        let dict = BTreeMap::from([(1u16, "uniswap-v2".to_string())]);
        assert!(diff_dictionary(&dict, &dict).is_empty());
        assert_eq!(patch_dictionary(&dict, &DictionaryDiff::new()), dict);
    }
}

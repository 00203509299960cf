//! The order permutation: `index_to_key` and its inverse.

use reflow_layout::ItemKey;
use rustc_hash::{FxHashMap, FxHashSet};

/// Bijection between item keys and 0-based order indices.
///
/// `index_to_key` is always a dense permutation of the known key set;
/// candidate orders that are not a permutation of the current keys are
/// rejected at the replacement boundary.
#[derive(Clone, Debug, Default)]
pub struct ItemOrder {
    index_to_key: Vec<ItemKey>,
    key_to_index: FxHashMap<ItemKey, usize>,
    fixed: FxHashSet<ItemKey>,
}

impl ItemOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an order from keys, skipping duplicates.
    pub fn from_keys(keys: impl IntoIterator<Item = ItemKey>) -> Self {
        let mut order = Self::new();
        for key in keys {
            order.insert_key(key);
        }
        order
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.index_to_key.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index_to_key.is_empty()
    }

    #[inline]
    pub fn index_of(&self, key: &ItemKey) -> Option<usize> {
        self.key_to_index.get(key).copied()
    }

    #[inline]
    pub fn key_at(&self, index: usize) -> Option<&ItemKey> {
        self.index_to_key.get(index)
    }

    #[inline]
    pub fn index_to_key(&self) -> &[ItemKey] {
        &self.index_to_key
    }

    #[inline]
    pub fn key_to_index(&self) -> &FxHashMap<ItemKey, usize> {
        &self.key_to_index
    }

    #[inline]
    pub fn contains(&self, key: &ItemKey) -> bool {
        self.key_to_index.contains_key(key)
    }

    /// Pins a key so reorder strategies refuse to move it.
    pub fn set_fixed(&mut self, key: &ItemKey, fixed: bool) {
        if fixed {
            self.fixed.insert(key.clone());
        } else {
            self.fixed.remove(key);
        }
    }

    #[inline]
    pub fn is_fixed(&self, key: &ItemKey) -> bool {
        self.fixed.contains(key)
    }

    /// Appends a key at the end of the order. Duplicates are ignored.
    pub fn insert_key(&mut self, key: ItemKey) {
        if self.key_to_index.contains_key(&key) {
            log::warn!("duplicate key {key} ignored");
            return;
        }
        self.key_to_index.insert(key.clone(), self.index_to_key.len());
        self.index_to_key.push(key);
    }

    /// Removes a key, keeping the order dense. Returns false for
    /// unknown keys.
    pub fn remove_key(&mut self, key: &ItemKey) -> bool {
        let Some(index) = self.key_to_index.remove(key) else {
            return false;
        };
        self.index_to_key.remove(index);
        self.fixed.remove(key);
        for (offset, moved) in self.index_to_key[index..].iter().enumerate() {
            self.key_to_index.insert(moved.clone(), index + offset);
        }
        true
    }

    /// Replaces the whole key set (external data reset). Pins survive
    /// for keys that are still present.
    pub fn reset(&mut self, keys: impl IntoIterator<Item = ItemKey>) {
        self.index_to_key.clear();
        self.key_to_index.clear();
        for key in keys {
            if self.key_to_index.contains_key(&key) {
                log::warn!("duplicate key {key} ignored in reset");
                continue;
            }
            self.key_to_index.insert(key.clone(), self.index_to_key.len());
            self.index_to_key.push(key);
        }
        let key_to_index = &self.key_to_index;
        self.fixed.retain(|key| key_to_index.contains_key(key));
    }

    /// Replaces the order with `candidate` if it is a permutation of
    /// the current key set; otherwise rejects it and returns false.
    pub fn apply(&mut self, candidate: Vec<ItemKey>) -> bool {
        if !self.is_permutation(&candidate) {
            log::warn!("rejected candidate order: not a permutation of the current key set");
            return false;
        }
        for (index, key) in candidate.iter().enumerate() {
            self.key_to_index.insert(key.clone(), index);
        }
        self.index_to_key = candidate;
        true
    }

    fn is_permutation(&self, candidate: &[ItemKey]) -> bool {
        if candidate.len() != self.index_to_key.len() {
            return false;
        }
        let mut seen: FxHashSet<&ItemKey> = FxHashSet::default();
        candidate
            .iter()
            .all(|key| self.key_to_index.contains_key(key) && seen.insert(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(names: &[&str]) -> Vec<ItemKey> {
        names.iter().map(|name| ItemKey::from(*name)).collect()
    }

    #[test]
    fn indices_stay_dense_after_removal() {
        let mut order = ItemOrder::from_keys(keys(&["A", "B", "C", "D"]));
        assert!(order.remove_key(&ItemKey::from("B")));
        assert_eq!(order.index_to_key(), keys(&["A", "C", "D"]).as_slice());
        assert_eq!(order.index_of(&ItemKey::from("C")), Some(1));
        assert_eq!(order.index_of(&ItemKey::from("D")), Some(2));
    }

    #[test]
    fn apply_accepts_permutations_only() {
        let mut order = ItemOrder::from_keys(keys(&["A", "B", "C"]));
        assert!(order.apply(keys(&["C", "A", "B"])));
        assert_eq!(order.index_of(&ItemKey::from("C")), Some(0));
    }

    #[test]
    fn apply_rejects_dropped_keys() {
        let mut order = ItemOrder::from_keys(keys(&["A", "B", "C"]));
        assert!(!order.apply(keys(&["A", "B"])));
        assert_eq!(order.index_to_key(), keys(&["A", "B", "C"]).as_slice());
    }

    #[test]
    fn apply_rejects_duplicates() {
        let mut order = ItemOrder::from_keys(keys(&["A", "B", "C"]));
        assert!(!order.apply(keys(&["A", "A", "B"])));
        assert_eq!(order.index_to_key(), keys(&["A", "B", "C"]).as_slice());
    }

    #[test]
    fn duplicate_insert_is_ignored() {
        let mut order = ItemOrder::from_keys(keys(&["A", "B"]));
        order.insert_key(ItemKey::from("A"));
        assert_eq!(order.len(), 2);
    }

    #[test]
    fn reset_drops_stale_pins() {
        let mut order = ItemOrder::from_keys(keys(&["A", "B"]));
        order.set_fixed(&ItemKey::from("B"), true);
        order.reset(keys(&["C", "A"]));
        assert!(!order.is_fixed(&ItemKey::from("B")));
        assert_eq!(order.index_of(&ItemKey::from("C")), Some(0));
    }
}

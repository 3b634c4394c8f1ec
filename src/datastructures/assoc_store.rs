//! # Associative Store
//!
//! Array dictionary: key/value pairs kept in a fixed-capacity slot array with a running count
//! `n_elements`. Lookups are linear scans over `[0, n_elements)`; when the array is full the
//! capacity doubles. Removal moves the last pair into the vacated slot, so insertion order is
//! NOT preserved once anything has been removed. Anything iterating the store after a removal
//! sees that reordering.
use super::container_errors::ContainerError;
use std::borrow::Borrow;
use std::fmt;

/// capacity of a store built with [`AssocStore::new`]
pub const DEFAULT_CAPACITY: usize = 100;

#[derive(Clone, Debug, PartialEq)]
struct Pair<K, V> {
    key: K,
    value: V,
}

/// Array-backed unique-key mapping
#[derive(Clone)]
pub struct AssocStore<K, V> {
    pairs: Vec<Option<Pair<K, V>>>,
    n_elements: usize,
}

impl<K: PartialEq, V> Default for AssocStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PartialEq, V> AssocStore<K, V> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// creates an empty store with room for `capacity` pairs (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        AssocStore {
            pairs: Self::make_array_of_pairs(capacity.max(1)),
            n_elements: 0,
        }
    }

    fn make_array_of_pairs(size: usize) -> Vec<Option<Pair<K, V>>> {
        let mut pairs = Vec::with_capacity(size);
        pairs.resize_with(size, || None);
        pairs
    }

    /// slot of `key` among the live pairs
    fn index_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.pairs[..self.n_elements]
            .iter()
            .position(|pair| matches!(pair, Some(pair) if <K as Borrow<Q>>::borrow(&pair.key) == key))
    }

    fn pair(&self, index: usize) -> &Pair<K, V> {
        match &self.pairs[index] {
            Some(pair) => pair,
            None => unreachable!("live slot {} is empty", index),
        }
    }

    /// moves every pair into a new array twice as large
    fn copy_over(&mut self) {
        let mut bigger = Self::make_array_of_pairs(self.pairs.len() * 2);
        for (slot, pair) in bigger.iter_mut().zip(self.pairs.iter_mut()) {
            *slot = pair.take();
        }
        self.pairs = bigger;
    }

    pub fn get<Q>(&self, key: &Q) -> Result<&V, ContainerError>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        match self.index_of(key) {
            Some(index) => Ok(&self.pair(index).value),
            None => Err(ContainerError::NoSuchKey),
        }
    }

    /// binds `key` to `value`; an existing key keeps its slot and only the value is replaced
    pub fn put(&mut self, key: K, value: V) {
        match self.index_of(&key) {
            Some(index) => {
                if let Some(pair) = &mut self.pairs[index] {
                    pair.value = value;
                }
            }
            None => {
                if self.n_elements == self.pairs.len() {
                    self.copy_over();
                }
                self.pairs[self.n_elements] = Some(Pair { key, value });
                self.n_elements += 1;
            }
        }
    }

    /// swap-delete: the last live pair is moved into the removed slot
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V, ContainerError>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        let index = self.index_of(key).ok_or(ContainerError::NoSuchKey)?;
        let last = self.n_elements - 1;
        let removed = self.pairs[index].take();
        self.pairs[index] = self.pairs[last].take();
        self.n_elements -= 1;
        match removed {
            Some(pair) => Ok(pair.value),
            None => unreachable!("live slot {} is empty", index),
        }
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.index_of(key).is_some()
    }

    pub fn size(&self) -> usize {
        self.n_elements
    }

    pub fn is_empty(&self) -> bool {
        self.n_elements == 0
    }

    /// current slot array length
    pub fn capacity(&self) -> usize {
        self.pairs.len()
    }

    /// pairs in slot order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.pairs[..self.n_elements]
            .iter()
            .flatten()
            .map(|pair| (&pair.key, &pair.value))
    }
}

impl<K: PartialEq + fmt::Debug, V: fmt::Debug> fmt::Debug for AssocStore<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_get() {
        let mut store: AssocStore<String, i32> = AssocStore::new();
        store.put("a".to_string(), 1);
        store.put("b".to_string(), 2);
        assert_eq!(store.get("a"), Ok(&1));
        assert_eq!(store.get("b"), Ok(&2));
        assert_eq!(store.get("c"), Err(ContainerError::NoSuchKey));
        assert_eq!(store.size(), 2);
    }

    #[test]
    fn test_put_replaces_in_place() {
        let mut store: AssocStore<&str, i32> = AssocStore::new();
        store.put("a", 1);
        store.put("b", 2);
        store.put("a", 10);
        assert_eq!(store.size(), 2);
        assert_eq!(store.get("a"), Ok(&10));
        let order: Vec<&str> = store.iter().map(|(k, _)| *k).collect();
        assert_eq!(order, vec!["a", "b"]);
    }

    #[test]
    fn test_remove_swaps_last_into_slot() {
        let mut store: AssocStore<&str, i32> = AssocStore::new();
        for (i, key) in ["a", "b", "c", "d"].into_iter().enumerate() {
            store.put(key, i as i32);
        }
        assert_eq!(store.remove("b"), Ok(1));
        assert!(!store.contains_key("b"));
        assert_eq!(store.size(), 3);
        let order: Vec<&str> = store.iter().map(|(k, _)| *k).collect();
        assert_eq!(order, vec!["a", "d", "c"]);
        // removing the last entry is a plain deletion
        assert_eq!(store.remove("c"), Ok(2));
        let order: Vec<&str> = store.iter().map(|(k, _)| *k).collect();
        assert_eq!(order, vec!["a", "d"]);
        assert_eq!(store.remove("zz"), Err(ContainerError::NoSuchKey));
    }

    #[test]
    fn test_growth_doubles_and_keeps_pairs() {
        let mut store: AssocStore<usize, usize> = AssocStore::with_capacity(4);
        let mut capacities = vec![store.capacity()];
        for i in 0..40 {
            store.put(i, i * i);
            if store.capacity() != *capacities.last().unwrap() {
                capacities.push(store.capacity());
            }
        }
        assert_eq!(capacities, vec![4, 8, 16, 32, 64]);
        for i in 0..40 {
            assert_eq!(store.get(&i), Ok(&(i * i)));
        }
    }

    #[test]
    fn test_default_capacity_growth() {
        let mut store: AssocStore<String, usize> = AssocStore::new();
        assert_eq!(store.capacity(), DEFAULT_CAPACITY);
        for i in 0..=DEFAULT_CAPACITY {
            store.put(format!("k{}", i), i);
        }
        assert_eq!(store.capacity(), 2 * DEFAULT_CAPACITY);
        assert_eq!(store.size(), DEFAULT_CAPACITY + 1);
    }

    #[test]
    fn test_null_key() {
        let mut store: AssocStore<Option<&str>, i32> = AssocStore::new();
        store.put(None, 0);
        store.put(Some("x"), 1);
        assert_eq!(store.get(&None::<&str>), Ok(&0));
        assert_eq!(store.remove(&None::<&str>), Ok(0));
        assert!(!store.contains_key(&None::<&str>));
        assert!(store.contains_key(&Some("x")));
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut store: AssocStore<i32, i32> = AssocStore::with_capacity(0);
        store.put(1, 1);
        store.put(2, 2);
        assert_eq!(store.capacity(), 2);
    }
}

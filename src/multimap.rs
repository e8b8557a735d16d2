//! Key → set multimap without empty buckets.
//!
//! A bucket exists iff it holds at least one value: [`MultiMap::remove`]
//! deletes the key together with its last value, and there is no API that
//! hands out a mutable bucket.

use std::borrow::Borrow;
use std::collections::hash_map;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

#[derive(Debug, Clone)]
pub struct MultiMap<K, V> {
    buckets: HashMap<K, HashSet<V>>,
    values: usize,
}

impl<K, V> MultiMap<K, V>
where
    K: Hash + Eq,
    V: Hash + Eq,
{
    pub fn new() -> Self {
        Self {
            buckets: HashMap::new(),
            values: 0,
        }
    }

    /// Add `value` under `key`. Returns `false` if the pair was already present.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let inserted = self.buckets.entry(key).or_default().insert(value);
        if inserted {
            self.values += 1;
        }
        inserted
    }

    /// Remove `value` from under `key`, dropping the key when its bucket empties.
    /// Returns `false` if the pair was not present.
    pub fn remove<Q, R>(&mut self, key: &Q, value: &R) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Borrow<R>,
        R: Hash + Eq + ?Sized,
    {
        let Some(bucket) = self.buckets.get_mut(key) else {
            return false;
        };
        if !bucket.remove(value) {
            return false;
        }
        self.values -= 1;
        if bucket.is_empty() {
            self.buckets.remove(key);
        }
        true
    }

    /// Drop a key and return everything stored under it.
    pub fn remove_key<Q>(&mut self, key: &Q) -> HashSet<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let bucket = self.buckets.remove(key).unwrap_or_default();
        self.values -= bucket.len();
        bucket
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&HashSet<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.buckets.get(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.buckets.contains_key(key)
    }

    pub fn contains<Q, R>(&self, key: &Q, value: &R) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Borrow<R>,
        R: Hash + Eq + ?Sized,
    {
        self.buckets
            .get(key)
            .is_some_and(|bucket| bucket.contains(value))
    }

    /// Number of values stored under `key` (0 if absent).
    pub fn bucket_len<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.buckets.get(key).map_or(0, HashSet::len)
    }

    pub fn keys(&self) -> hash_map::Keys<'_, K, HashSet<V>> {
        self.buckets.keys()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, K, HashSet<V>> {
        self.buckets.iter()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of (key, value) pairs.
    pub fn value_count(&self) -> usize {
        self.values
    }
}

impl<K, V> Default for MultiMap<K, V>
where
    K: Hash + Eq,
    V: Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_removal_drops_the_key() {
        let mut map: MultiMap<&str, u32> = MultiMap::new();
        assert!(map.insert("dog", 1));
        assert!(map.insert("dog", 2));
        assert!(!map.insert("dog", 2));
        assert_eq!(map.bucket_len("dog"), 2);
        assert_eq!(map.value_count(), 2);

        assert!(map.remove("dog", &1));
        assert!(map.contains_key("dog"));
        assert!(map.remove("dog", &2));
        assert!(!map.contains_key("dog"));
        assert!(map.is_empty());
        assert_eq!(map.value_count(), 0);
    }

    #[test]
    fn removing_absent_pairs_is_a_no_op() {
        let mut map: MultiMap<String, String> = MultiMap::new();
        map.insert("leaf".into(), "a".into());
        assert!(!map.remove("leaf", "b"));
        assert!(!map.remove("leaves", "a"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn remove_key_returns_bucket() {
        let mut map: MultiMap<u8, u8> = MultiMap::new();
        map.insert(1, 10);
        map.insert(1, 11);
        map.insert(2, 20);
        let bucket = map.remove_key(&1);
        assert_eq!(bucket.len(), 2);
        assert_eq!(map.value_count(), 1);
        assert!(map.remove_key(&9).is_empty());
    }
}

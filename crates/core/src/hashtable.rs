//! Chaining hashtable keyed by strings.
//!
//! Each bucket is a `Vec` of [`KeyValuePair`]s kept in insertion order. A
//! `put` never replaces an existing pair: storing the same key twice keeps
//! both pairs, and lookups return the oldest one.
//!
//! # Invariants
//! - Every stored pair sits in bucket `hash(key) % num_buckets`, including
//!   right after a resize.
//! - `num_elements` equals the number of pairs across all buckets.
//! - After every `put`, `num_elements / num_buckets < MAX_LOAD_FACTOR`; when
//!   the ratio reaches the threshold the bucket count is multiplied by
//!   [`GROWTH_FACTOR`] and every pair is rehashed. The table never shrinks.
//!
//! # Example
//! ```
//! use huffdex_core::hashtable::Hashtable;
//!
//! let mut table = Hashtable::with_buckets(5);
//! table.put("1", "a");
//! table.put("1", "b");
//!
//! assert_eq!(table.get("1"), Some(&"a"));
//! assert_eq!(table.num_elements(), 2);
//! ```

use crate::error::{Error, HashtableError, Result};
use crate::metrics::TableStats;
use std::hash::{BuildHasher, Hasher};
use std::iter::FusedIterator;

/// Bucket count used by [`Hashtable::new`].
pub const DEFAULT_BUCKETS: usize = 9;

/// Load factor at which a `put` triggers a resize.
pub const MAX_LOAD_FACTOR: usize = 3;

/// Multiplier applied to the bucket count on resize.
pub const GROWTH_FACTOR: usize = 9;

/// Fowler–Noll–Vo (FNV-1a) 64-bit hasher.
///
/// Deterministic across runs and platforms, unlike the std `RandomState`.
#[derive(Debug, Clone, Copy)]
pub struct FnvHasher {
    hash: u64,
}

impl FnvHasher {
    const FNV_PRIME: u64 = 0x0000_0100_0000_01B3;
    const FNV_OFFSET_BASIS: u64 = 0xCBF2_9CE4_8422_2325;

    /// Create a hasher initialized with the FNV offset basis.
    pub fn new() -> Self {
        Self {
            hash: Self::FNV_OFFSET_BASIS,
        }
    }
}

impl Default for FnvHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for FnvHasher {
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.hash ^= u64::from(*byte);
            self.hash = self.hash.wrapping_mul(Self::FNV_PRIME);
        }
    }
}

/// Builder for [`FnvHasher`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FnvBuildHasher;

impl BuildHasher for FnvBuildHasher {
    type Hasher = FnvHasher;

    fn build_hasher(&self) -> FnvHasher {
        FnvHasher::new()
    }
}

/// A key and the value stored with it.
///
/// Pairs are immutable once created; the owning bucket is the only place
/// they live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValuePair<V> {
    key: String,
    value: V,
}

impl<V> KeyValuePair<V> {
    /// Create a new pair.
    pub fn new(key: impl Into<String>, value: V) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    /// Split the pair back into its key and value.
    pub fn into_parts(self) -> (String, V) {
        (self.key, self.value)
    }
}

/// String-keyed hashtable with separate chaining and 9x growth.
///
/// Single-threaded: wrap in a lock if several threads need access.
#[derive(Debug, Clone)]
pub struct Hashtable<V, S = FnvBuildHasher> {
    buckets: Vec<Vec<KeyValuePair<V>>>,
    num_elements: usize,
    resizes: usize,
    hasher: S,
}

impl<V> Hashtable<V> {
    /// Create an empty table with [`DEFAULT_BUCKETS`] buckets.
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_BUCKETS)
    }

    /// Create an empty table with `num_buckets` buckets (at least one).
    pub fn with_buckets(num_buckets: usize) -> Self {
        Self::with_hasher(num_buckets, FnvBuildHasher)
    }

    /// Like [`with_buckets`](Self::with_buckets), but rejects a zero bucket count.
    pub fn try_with_buckets(num_buckets: usize) -> Result<Self> {
        if num_buckets == 0 {
            return Err(Error::Config("hashtable needs at least one bucket".to_string()));
        }
        Ok(Self::with_buckets(num_buckets))
    }
}

impl<V> Default for Hashtable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, S: BuildHasher> Hashtable<V, S> {
    /// Create an empty table that hashes keys with `hasher`.
    pub fn with_hasher(num_buckets: usize, hasher: S) -> Self {
        let num_buckets = num_buckets.max(1);
        Self {
            buckets: (0..num_buckets).map(|_| Vec::new()).collect(),
            num_elements: 0,
            resizes: 0,
            hasher,
        }
    }

    fn hash_key(&self, key: &str) -> u64 {
        let mut state = self.hasher.build_hasher();
        state.write(key.as_bytes());
        state.finish()
    }

    /// Index of the bucket `key` belongs to under the current bucket count.
    pub fn bucket_index(&self, key: &str) -> usize {
        (self.hash_key(key) % self.buckets.len() as u64) as usize
    }

    /// Append a new pair for `key`.
    ///
    /// Existing pairs with the same key are left in place; the new pair goes
    /// after them in the chain. Resizes when the load factor reaches
    /// [`MAX_LOAD_FACTOR`].
    pub fn put(&mut self, key: impl Into<String>, value: V) {
        let pair = KeyValuePair::new(key, value);
        let idx = self.bucket_index(&pair.key);
        self.buckets[idx].push(pair);
        self.num_elements += 1;

        if self.num_elements >= MAX_LOAD_FACTOR * self.buckets.len() {
            self.resize();
        }
    }

    /// Value of the oldest pair stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.buckets[self.bucket_index(key)]
            .iter()
            .find(|pair| pair.key == key)
            .map(|pair| &pair.value)
    }

    /// Mutable access to the value [`get`](Self::get) would return.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let idx = self.bucket_index(key);
        self.buckets[idx]
            .iter_mut()
            .find(|pair| pair.key == key)
            .map(|pair| &mut pair.value)
    }

    /// True iff [`get`](Self::get) returns a value.
    pub fn key_exists(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove and return the oldest pair stored under `key`.
    ///
    /// # Errors
    /// Returns `HashtableError::KeyNotFound` if no pair has this key.
    pub fn remove(&mut self, key: &str) -> Result<KeyValuePair<V>> {
        let idx = self.bucket_index(key);
        let bucket = &mut self.buckets[idx];

        let pos = bucket
            .iter()
            .position(|pair| pair.key == key)
            .ok_or_else(|| HashtableError::KeyNotFound {
                key: key.to_string(),
            })?;

        self.num_elements -= 1;
        Ok(bucket.remove(pos))
    }

    /// Grow the bucket array by [`GROWTH_FACTOR`] and rehash every pair.
    ///
    /// Old buckets are drained in order, so pairs that land in the same new
    /// bucket keep their relative order.
    fn resize(&mut self) {
        let new_count = self.buckets.len() * GROWTH_FACTOR;
        let old = std::mem::replace(
            &mut self.buckets,
            (0..new_count).map(|_| Vec::new()).collect(),
        );

        for pair in old.into_iter().flatten() {
            let idx = self.bucket_index(&pair.key);
            self.buckets[idx].push(pair);
        }
        self.resizes += 1;
    }

    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }

    pub fn num_elements(&self) -> usize {
        self.num_elements
    }

    pub fn len(&self) -> usize {
        self.num_elements
    }

    pub fn is_empty(&self) -> bool {
        self.num_elements == 0
    }

    /// Elements stored divided by bucket count.
    pub fn load_factor(&self) -> f64 {
        self.num_elements as f64 / self.buckets.len() as f64
    }

    /// Read-only view of one chain, or `None` if `index` is out of range.
    pub fn bucket(&self, index: usize) -> Option<&[KeyValuePair<V>]> {
        self.buckets.get(index).map(Vec::as_slice)
    }

    /// Iterate over `(key, value)` in bucket order, then chain order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: Default::default(),
            remaining: self.num_elements,
        }
    }

    /// All keys, in iteration order. Duplicate keys appear once per pair.
    pub fn keys(&self) -> Vec<&str> {
        self.iter().map(|(key, _)| key).collect()
    }

    /// Snapshot of the table's shape.
    pub fn stats(&self) -> TableStats {
        TableStats {
            num_buckets: self.buckets.len(),
            num_elements: self.num_elements,
            longest_chain: self.buckets.iter().map(Vec::len).max().unwrap_or(0),
            empty_buckets: self.buckets.iter().filter(|b| b.is_empty()).count(),
            resizes: self.resizes,
        }
    }
}

impl<T, S: BuildHasher> Hashtable<Option<T>, S> {
    /// Like [`key_exists`](Self::key_exists), but a stored `None` counts as absent.
    pub fn value_exists(&self, key: &str) -> bool {
        matches!(self.get(key), Some(Some(_)))
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for Hashtable<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Hashtable::new();
        for (key, value) in iter {
            table.put(key, value);
        }
        table
    }
}

impl<'a, V, S: BuildHasher> IntoIterator for &'a Hashtable<V, S> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One-pass iterator over the pairs of a [`Hashtable`].
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    buckets: std::slice::Iter<'a, Vec<KeyValuePair<V>>>,
    chain: std::slice::Iter<'a, KeyValuePair<V>>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pair) = self.chain.next() {
                self.remaining -= 1;
                return Some((pair.key.as_str(), &pair.value));
            }
            // Current chain exhausted; skip to the next bucket.
            self.chain = self.buckets.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_default() {
        let table: Hashtable<i32> = Hashtable::new();
        assert_eq!(table.num_buckets(), 9);
        assert_eq!(table.num_elements(), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_create_non_default_size() {
        let table: Hashtable<i32> = Hashtable::with_buckets(5);
        assert_eq!(table.num_buckets(), 5);
        assert_eq!(table.num_elements(), 0);
        assert!(table.bucket(4).is_some());
        assert!(table.bucket(5).is_none());
    }

    #[test]
    fn test_zero_buckets() {
        let table: Hashtable<i32> = Hashtable::with_buckets(0);
        assert_eq!(table.num_buckets(), 1);

        assert!(matches!(
            Hashtable::<i32>::try_with_buckets(0),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_insert_correct_bucket() {
        let mut table = Hashtable::with_buckets(5);
        table.put("1", "testing");

        let idx = table.bucket_index("1");
        let bucket = table.bucket(idx).unwrap();
        assert_eq!(bucket.len(), 1);
        assert_eq!(bucket[0].key(), "1");
        assert_eq!(*bucket[0].value(), "testing");
    }

    #[test]
    fn test_put_two_values_same_key() {
        let mut table = Hashtable::with_buckets(5);
        table.put("1", "a");
        table.put("1", "b");

        assert_eq!(table.get("1"), Some(&"a"));
        assert_eq!(table.num_elements(), 2);

        let bucket = table.bucket(table.bucket_index("1")).unwrap();
        assert_eq!(bucket.len(), 2);
        assert_eq!(*bucket[1].value(), "b");
        assert_eq!(bucket[1].key(), "1");
    }

    #[test]
    fn test_put_multiple_items() {
        let mut table = Hashtable::with_buckets(5);
        table.put("0", "testing1");
        table.put("8", "testing2");
        table.put("25", "testing3");

        for (key, value) in [("0", "testing1"), ("8", "testing2"), ("25", "testing3")] {
            let bucket = table.bucket(table.bucket_index(key)).unwrap();
            let pair = bucket.iter().find(|p| p.key() == key).unwrap();
            assert_eq!(*pair.value(), value);
        }
        assert_eq!(table.num_elements(), 3);
    }

    #[test]
    fn test_get_missing_is_none() {
        let mut table = Hashtable::new();
        table.put("present", 1);

        assert_eq!(table.get("absent"), None);
        assert!(!table.key_exists("absent"));
        assert!(table.key_exists("present"));
    }

    #[test]
    fn test_get_mut_updates_first_match() {
        let mut table = Hashtable::new();
        table.put("k", vec![1]);
        table.put("k", vec![2]);

        table.get_mut("k").unwrap().push(10);

        assert_eq!(table.get("k"), Some(&vec![1, 10]));
        assert!(table.get_mut("missing").is_none());
    }

    #[test]
    fn test_remove() {
        let mut table = Hashtable::with_buckets(5);
        table.put("1", "testing");

        let removed = table.remove("1").unwrap();
        assert_eq!(removed.key(), "1");
        assert_eq!(*removed.value(), "testing");
        assert_eq!(table.num_elements(), 0);
        assert!(table.bucket(table.bucket_index("1")).unwrap().is_empty());
    }

    #[test]
    fn test_remove_first_of_duplicates() {
        let mut table = Hashtable::new();
        table.put("k", 1);
        table.put("k", 2);

        let (key, value) = table.remove("k").unwrap().into_parts();
        assert_eq!(key, "k");
        assert_eq!(value, 1);
        assert_eq!(table.get("k"), Some(&2));
        assert_eq!(table.num_elements(), 1);
    }

    #[test]
    fn test_remove_nonexistent_key() {
        let mut table: Hashtable<i32> = Hashtable::new();
        table.put("a", 1);

        let err = table.remove("b").unwrap_err();
        assert!(matches!(
            err,
            Error::Hashtable(HashtableError::KeyNotFound { ref key }) if key == "b"
        ));
        assert_eq!(table.num_elements(), 1);
    }

    #[test]
    fn test_resize_at_threshold() {
        let mut table = Hashtable::with_buckets(3);

        for i in 0..8 {
            table.put(i.to_string(), i);
        }
        assert_eq!(table.num_buckets(), 3);

        // Ninth element brings the load factor to exactly 3.
        table.put("8", 8);
        assert_eq!(table.num_buckets(), 27);

        for i in 9..20 {
            table.put(i.to_string(), i);
        }
        assert_eq!(table.num_buckets(), 27);
        assert_eq!(table.num_elements(), 20);

        for i in 0..20 {
            assert_eq!(table.get(&i.to_string()), Some(&i));
        }
    }

    #[test]
    fn test_pairs_in_correct_bucket_after_resize() {
        let mut table = Hashtable::with_buckets(2);
        for i in 0..50 {
            table.put(format!("key{i}"), i);
        }

        for idx in 0..table.num_buckets() {
            for pair in table.bucket(idx).unwrap() {
                assert_eq!(table.bucket_index(pair.key()), idx);
            }
        }
    }

    #[test]
    fn test_resize_keeps_duplicate_order() {
        let mut table = Hashtable::with_buckets(1);
        table.put("dup", 1);
        table.put("dup", 2);
        table.put("other", 3);
        assert_eq!(table.num_buckets(), 9);

        assert_eq!(table.get("dup"), Some(&1));
        table.remove("dup").unwrap();
        assert_eq!(table.get("dup"), Some(&2));
    }

    #[test]
    fn test_iteration_visits_everything() {
        let mut table = Hashtable::with_buckets(4);
        for i in 0..30 {
            table.put(format!("k{i}"), i);
        }

        let iter = table.iter();
        assert_eq!(iter.len(), 30);

        let mut values: Vec<i32> = iter.map(|(_, v)| *v).collect();
        values.sort_unstable();
        assert_eq!(values, (0..30).collect::<Vec<_>>());
    }

    #[test]
    fn test_iteration_order_bucket_then_chain() {
        let mut table = Hashtable::with_buckets(7);
        for key in ["a", "b", "c", "d", "e"] {
            table.put(key, ());
        }

        let expected: Vec<&str> = (0..table.num_buckets())
            .flat_map(|i| table.bucket(i).unwrap().iter().map(|p| p.key()))
            .collect();
        assert_eq!(table.keys(), expected);
    }

    #[test]
    fn test_iterate_empty() {
        let table: Hashtable<i32> = Hashtable::new();
        assert_eq!(table.iter().count(), 0);
        assert!(table.keys().is_empty());
    }

    #[test]
    fn test_value_exists_treats_none_as_absent() {
        let mut table: Hashtable<Option<i32>> = Hashtable::new();
        table.put("null", None);
        table.put("set", Some(1));

        assert!(table.key_exists("null"));
        assert!(!table.value_exists("null"));
        assert!(table.value_exists("set"));
        assert!(!table.value_exists("missing"));
    }

    #[test]
    fn test_from_iterator() {
        let table: Hashtable<i32> = [("x", 1), ("y", 2), ("x", 3)].into_iter().collect();
        assert_eq!(table.num_elements(), 3);
        assert_eq!(table.get("x"), Some(&1));
    }

    #[test]
    fn test_stats() {
        let mut table = Hashtable::with_buckets(3);
        for i in 0..9 {
            table.put(i.to_string(), i);
        }

        let stats = table.stats();
        assert_eq!(stats.num_buckets, 27);
        assert_eq!(stats.num_elements, 9);
        assert_eq!(stats.resizes, 1);
        assert!(stats.longest_chain >= 1);
        assert!(stats.empty_buckets <= 27 - 1);
    }

    #[test]
    fn test_fnv_known_values() {
        let mut hasher = FnvHasher::new();
        hasher.write(b"");
        assert_eq!(hasher.finish(), 0xcbf29ce484222325);

        let mut hasher = FnvHasher::new();
        hasher.write(b"a");
        assert_eq!(hasher.finish(), 0xaf63dc4c8601ec8c);
    }
}

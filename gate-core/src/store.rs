///! Keyed store for ephemeral satellite and custom-object records
///!
///! A string-keyed table backed by chained buckets. The bucket array starts
///! empty, is initialised to two buckets on the first insertion and doubles
///! whenever the entry count would exceed the bucket count.

use std::iter;

const INITIAL_BUCKETS: usize = 2;

struct Entry<V> {
    key: String,
    value: V,
    next: Option<Box<Entry<V>>>,
}

type Chain<V> = Option<Box<Entry<V>>>;

/// String keyed store owning its values
pub struct KeyedStore<V> {
    buckets: Vec<Chain<V>>,
    len: usize,
}

/// Polynomial string hash over the raw key bytes (`h = 31 * h + byte`)
pub fn hash_key(key: &str) -> i32 {
    key.bytes()
        .fold(0i32, |h, b| h.wrapping_mul(31).wrapping_add(b as i32))
}

impl<V> Default for KeyedStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> KeyedStore<V> {
    pub fn new() -> Self {
        Self {
            buckets: Vec::new(),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    fn bucket_index(&self, key: &str) -> usize {
        // Mask off the sign bit so negative hashes never produce a negative index
        (hash_key(key) & i32::MAX) as usize % self.buckets.len()
    }

    /// Insert `value` under `key`, returning the value it replaced
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        self.ensure_capacity(self.len + 1);
        self.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        if self.buckets.is_empty() {
            return None;
        }

        let mut node = self.buckets[self.bucket_index(key)].as_deref();
        while let Some(entry) = node {
            if entry.key == key {
                return Some(&entry.value);
            }
            node = entry.next.as_deref();
        }

        None
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove `key`, handing ownership of its value back to the caller
    pub fn remove(&mut self, key: &str) -> Option<V> {
        if self.buckets.is_empty() {
            return None;
        }

        let idx = self.bucket_index(key);
        let mut link = &mut self.buckets[idx];
        while link.as_ref().is_some_and(|entry| entry.key != key) {
            link = &mut link.as_mut()?.next;
        }

        let mut removed = link.take()?;
        *link = removed.next.take();
        self.len -= 1;

        Some(removed.value)
    }

    /// Drop every entry and release the bucket array
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.len = 0;
    }

    /// Visit every live entry exactly once, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.buckets.iter().flat_map(|bucket| {
            iter::successors(bucket.as_deref(), |entry| entry.next.as_deref())
                .map(|entry| (entry.key.as_str(), &entry.value))
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(key, _)| key)
    }

    fn insert(&mut self, key: String, value: V) -> Option<V> {
        let idx = self.bucket_index(&key);

        let mut link = &mut self.buckets[idx];
        while let Some(entry) = link {
            if entry.key == key {
                return Some(std::mem::replace(&mut entry.value, value));
            }
            link = &mut entry.next;
        }

        *link = Some(Box::new(Entry {
            key,
            value,
            next: None,
        }));
        self.len += 1;

        None
    }

    fn ensure_capacity(&mut self, required: usize) {
        let old_len = self.buckets.len();
        if old_len >= required {
            return;
        }

        let new_len = if old_len == 0 {
            INITIAL_BUCKETS
        } else {
            old_len * 2
        };

        let old_buckets = std::mem::replace(
            &mut self.buckets,
            iter::repeat_with(|| None).take(new_len).collect(),
        );
        self.len = 0;

        // Relink every entry into its new bucket through the normal insertion path
        for mut chain in old_buckets {
            while let Some(mut entry) = chain {
                chain = entry.next.take();
                self.insert(entry.key, entry.value);
            }
        }

        tracing::trace!(buckets = new_len, entries = self.len, "Keyed store resized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_hash_matches_polynomial_string_hash() {
        assert_eq!(hash_key(""), 0);
        assert_eq!(hash_key("a"), 97);
        assert_eq!(hash_key("ab"), 97 * 31 + 98);
        // Long keys overflow and wrap like a 32-bit signed accumulator
        assert_eq!(hash_key("polygenelubricants"), i32::MIN);
    }

    #[test]
    fn test_empty_store_lookups() {
        let mut store: KeyedStore<u32> = KeyedStore::new();
        assert_eq!(store.bucket_count(), 0);
        assert!(store.get("ISS").is_none());
        assert!(store.remove("ISS").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_put_get_overwrite() {
        let mut store = KeyedStore::new();
        assert_eq!(store.put("ISS", 1), None);
        assert_eq!(store.get("ISS"), Some(&1));

        assert_eq!(store.put("ISS", 2), Some(1));
        assert_eq!(store.get("ISS"), Some(&2));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_growth_keeps_every_entry() {
        let mut store = KeyedStore::new();
        for i in 0..10 {
            store.put(format!("SAT-{}", i), i);
        }

        assert_eq!(store.len(), 10);
        assert_eq!(store.bucket_count(), 16);
        for i in 0..10 {
            assert_eq!(store.get(&format!("SAT-{}", i)), Some(&i));
        }
    }

    #[test]
    fn test_negative_hash_key() {
        let mut store = KeyedStore::new();
        assert!(hash_key("polygenelubricants") < 0);
        store.put("polygenelubricants", "negative");
        store.put("other", "positive");
        assert_eq!(store.get("polygenelubricants"), Some(&"negative"));
    }

    #[test]
    fn test_remove_head_middle_and_tail_of_chain() {
        let mut store = KeyedStore::new();
        // "Aa" and "BB" share a hash, so these land in the same chain
        assert_eq!(hash_key("Aa"), hash_key("BB"));
        assert_eq!(hash_key("AaAa"), hash_key("BBBB"));
        for key in ["AaAa", "AaBB", "BBAa", "BBBB"] {
            store.put(key, key.to_lowercase());
        }

        assert_eq!(store.remove("AaBB").as_deref(), Some("aabb"));
        assert_eq!(store.remove("AaAa").as_deref(), Some("aaaa"));
        assert_eq!(store.remove("BBBB").as_deref(), Some("bbbb"));
        assert_eq!(store.remove("BBBB"), None);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("BBAa").map(String::as_str), Some("bbaa"));
    }

    #[test]
    fn test_size_tracks_live_keys() {
        let mut store = KeyedStore::new();
        let mut model = HashMap::new();

        for i in 0..40u32 {
            let key = format!("K{}", i % 13);
            if i % 3 == 0 {
                assert_eq!(store.remove(&key), model.remove(&key));
            } else {
                assert_eq!(store.put(key.clone(), i), model.insert(key, i));
            }
            assert_eq!(store.len(), model.len());
        }

        for (key, value) in &model {
            assert_eq!(store.get(key), Some(value));
        }
    }

    #[test]
    fn test_iter_visits_each_entry_once() {
        let mut store = KeyedStore::new();
        for i in 0..7 {
            store.put(format!("OBJ{}", i), i);
        }
        store.remove("OBJ3");

        let mut keys: Vec<&str> = store.keys().collect();
        keys.sort();
        assert_eq!(keys, vec!["OBJ0", "OBJ1", "OBJ2", "OBJ4", "OBJ5", "OBJ6"]);
    }

    #[test]
    fn test_clear() {
        let mut store = KeyedStore::new();
        store.put("a", 1);
        store.put("b", 2);
        store.clear();

        assert!(store.is_empty());
        assert!(store.get("a").is_none());
        store.put("a", 3);
        assert_eq!(store.get("a"), Some(&3));
    }
}

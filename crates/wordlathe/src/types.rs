//! # Common Types

/// Integer id of a vocabulary entry.
///
/// `tokenizer.json` ids are non-negative and fit in 32 bits.
pub type TokenId = u32;

cfg_if::cfg_if! {
    if #[cfg(feature = "ahash")] {
        /// Type Alias for hash maps in this crate.
        pub type WLHashMap<K, V> = ahash::AHashMap<K, V>;

        /// Create a new empty hash map.
        pub fn hash_map_new<K, V>() -> WLHashMap<K, V> {
            WLHashMap::new()
        }

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> WLHashMap<K, V> {
            WLHashMap::with_capacity(capacity)
        }

        /// Type Alias for hash sets in this crate.
        pub type WLHashSet<V> = ahash::AHashSet<V>;

    } else if #[cfg(feature = "foldhash")] {
        /// Type Alias for hash maps in this crate.
        pub type WLHashMap<K, V> = foldhash::HashMap<K, V>;

        /// Create a new empty hash map.
        pub fn hash_map_new<K, V>() -> WLHashMap<K, V> {
            foldhash::HashMapExt::new()
        }

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> WLHashMap<K, V> {
            foldhash::HashMapExt::with_capacity(capacity)
        }

        /// Type Alias for hash sets in this crate.
        pub type WLHashSet<V> = foldhash::HashSet<V>;

    } else {
        /// Type Alias for hash maps in this crate.
        pub type WLHashMap<K, V> = std::collections::HashMap<K, V>;

        /// Create a new empty hash map.
        pub fn hash_map_new<K, V>() -> WLHashMap<K, V> {
            WLHashMap::new()
        }

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> WLHashMap<K, V> {
            WLHashMap::with_capacity(capacity)
        }

        /// Type Alias for hash sets in this crate.
        pub type WLHashSet<V> = std::collections::HashSet<V>;
    }
}

/// Static check that a type is `Send`.
pub fn static_is_send_check<S: Send>(_: &S) {}

/// Static check that a type is `Sync`.
pub fn static_is_sync_check<S: Sync>(_: &S) {}

/// Static check that a type is `Send` and `Sync`.
pub fn static_is_send_sync_check<S: Send + Sync>(v: &S) {
    static_is_send_check(v);
    static_is_sync_check(v);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_map_aliases() {
        let mut map: WLHashMap<&str, TokenId> = hash_map_with_capacity(4);
        map.insert("a", 1);
        assert_eq!(map.get("a"), Some(&1));

        let empty: WLHashMap<u8, u8> = hash_map_new();
        assert!(empty.is_empty());

        let set: WLHashSet<TokenId> = [1, 2, 2].into_iter().collect();
        assert_eq!(set.len(), 2);
    }
}

//! # Word Cache
//!
//! A bounded, thread-safe word → subword-list memo for BPE.

use core::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;

/// The default number of words held by a [`WordCache`].
pub const DEFAULT_WORD_CACHE_CAPACITY: usize = 10_000;

/// Words at or over this many characters are never cached.
pub const DEFAULT_MAX_LENGTH_TO_CACHE: usize = 256;

/// A least-recently-used cache of BPE results, shared behind a mutex.
///
/// Cache hits never change results; only throughput depends on them.
#[derive(Debug)]
pub struct WordCache {
    inner: Mutex<LruCache<String, Vec<String>>>,
    max_length_to_cache: usize,
}

impl Default for WordCache {
    fn default() -> Self {
        Self::new(DEFAULT_WORD_CACHE_CAPACITY)
    }
}

impl WordCache {
    /// Create a cache holding at most `capacity` words (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
            max_length_to_cache: DEFAULT_MAX_LENGTH_TO_CACHE,
        }
    }

    /// Set the word length limit for caching.
    pub fn with_max_length_to_cache(
        mut self,
        max_length_to_cache: usize,
    ) -> Self {
        self.max_length_to_cache = max_length_to_cache;
        self
    }

    /// The maximum number of cached words.
    pub fn capacity(&self) -> usize {
        self.inner.lock().cap().get()
    }

    /// The word length limit for caching.
    pub fn max_length_to_cache(&self) -> usize {
        self.max_length_to_cache
    }

    /// Would `word` be cached?
    pub fn accepts(
        &self,
        word: &str,
    ) -> bool {
        word.chars().count() < self.max_length_to_cache
    }

    /// Look up `word`, marking it most recently used.
    pub fn get(
        &self,
        word: &str,
    ) -> Option<Vec<String>> {
        self.inner.lock().get(word).cloned()
    }

    /// Insert `word`, evicting the least recently used entry when full.
    ///
    /// Words the cache does not accept are ignored.
    pub fn put(
        &self,
        word: &str,
        pieces: Vec<String>,
    ) {
        if self.accepts(word) {
            self.inner.lock().put(word.to_string(), pieces);
        }
    }

    /// The number of cached words.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Is the cache empty?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::static_is_send_sync_check;

    fn pieces(ps: &[&str]) -> Vec<String> {
        ps.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_evicts_least_recent() {
        let cache = WordCache::new(2);
        static_is_send_sync_check(&cache);
        assert_eq!(cache.capacity(), 2);

        cache.put("a", pieces(&["a"]));
        cache.put("b", pieces(&["b"]));
        assert_eq!(cache.get("a"), Some(pieces(&["a"])));

        // "b" is now the least recently used.
        cache.put("c", pieces(&["c"]));
        assert_eq!(cache.len(), 2);
        assert!(cache.get("b").is_none());
        assert!(cache.get("a").is_some());
        assert!(cache.get("c").is_some());

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_long_words_are_not_cached() {
        let cache = WordCache::new(4).with_max_length_to_cache(3);
        cache.put("abc", pieces(&["abc"]));
        cache.put("ab", pieces(&["ab"]));
        assert!(cache.get("abc").is_none());
        assert!(cache.get("ab").is_some());
        assert_eq!(cache.max_length_to_cache(), 3);

        // Two characters, six bytes.
        cache.put("\u{4f60}\u{597d}", pieces(&["\u{4f60}", "\u{597d}"]));
        assert!(cache.get("\u{4f60}\u{597d}").is_some());
        assert!(!cache.accepts("\u{4f60}\u{597d}\u{5417}"));
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        assert_eq!(WordCache::new(0).capacity(), 1);
        assert_eq!(WordCache::default().capacity(), DEFAULT_WORD_CACHE_CAPACITY);
    }
}

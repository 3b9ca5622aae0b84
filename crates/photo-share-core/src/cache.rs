// SPDX-License-Identifier: AGPL-3.0
// Photo Share Core - Full-resolution image cache
//
// Bounded FIFO keyed by asset id. Eviction follows insertion order only;
// reads never refresh an entry's position.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Number of full-resolution renditions kept in memory
pub const FULL_IMAGE_CACHE_CAPACITY: usize = 10;

/// Lookups go through `peek` so the recency order stays the insertion order.
#[derive(Debug)]
pub struct ImageCache {
    cache: LruCache<String, Arc<[u8]>>,
}

impl ImageCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
        }
    }

    pub fn get(&self, asset_id: &str) -> Option<Arc<[u8]>> {
        self.cache.peek(asset_id).cloned()
    }

    pub fn contains(&self, asset_id: &str) -> bool {
        self.cache.contains(asset_id)
    }

    /// Insert a rendition, evicting the oldest insertion when full.
    /// Returns the evicted asset id, if any.
    pub fn insert(&mut self, asset_id: impl Into<String>, image: Arc<[u8]>) -> Option<String> {
        let asset_id = asset_id.into();

        if let Some(existing) = self.cache.peek_mut(&asset_id) {
            *existing = image;
            return None;
        }

        let evicted = self.cache.push(asset_id, image).map(|(oldest, _)| oldest);
        if let Some(oldest) = &evicted {
            tracing::debug!("Image cache full, evicted {}", oldest);
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cache.cap().get()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new(FULL_IMAGE_CACHE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(n: u8) -> Arc<[u8]> {
        Arc::from(vec![n])
    }

    #[test]
    fn test_default_capacity() {
        assert_eq!(ImageCache::default().capacity(), 10);
    }

    #[test]
    fn test_evicts_oldest_insertion_even_when_recently_read() {
        let mut cache = ImageCache::new(3);
        cache.insert("a", bytes(1));
        cache.insert("b", bytes(2));
        cache.insert("c", bytes(3));

        // Reading "a" does not protect it
        assert!(cache.get("a").is_some());

        let evicted = cache.insert("d", bytes(4));
        assert_eq!(evicted.as_deref(), Some("a"));
        assert!(!cache.contains("a"));
        assert!(cache.contains("b"));
        assert!(cache.contains("d"));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_reinsert_replaces_without_eviction() {
        let mut cache = ImageCache::new(2);
        cache.insert("a", bytes(1));
        cache.insert("b", bytes(2));
        assert_eq!(cache.insert("a", bytes(9)), None);
        assert_eq!(cache.get("a").unwrap()[0], 9);

        // "a" keeps its first slot in the eviction order
        assert_eq!(cache.insert("c", bytes(3)).as_deref(), Some("a"));
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let mut cache = ImageCache::new(0);
        assert_eq!(cache.capacity(), 1);
        cache.insert("a", bytes(1));
        assert_eq!(cache.insert("b", bytes(2)).as_deref(), Some("a"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut cache = ImageCache::new(2);
        cache.insert("a", bytes(1));
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.insert("b", bytes(2)), None);
    }
}

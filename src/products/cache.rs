//! TTL cache of live product search results.

use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::products::config::CacheConfig;
use crate::products::types::Product;

#[derive(Clone)]
struct CacheEntry {
    products: Vec<Product>,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        Instant::now() > self.expires_at
    }
}

/// Thread-safe cache keyed by `country:query`.
pub struct ProductCache {
    config: CacheConfig,
    entries: DashMap<String, CacheEntry>,
}

impl ProductCache {
    /// Create a cache with the given configuration.
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            entries: DashMap::new(),
        }
    }

    /// Cache key for a lookup. Queries differing only in case or padding share a key.
    #[must_use]
    pub fn key(country: &str, query: &str) -> String {
        format!("{}:{}", country.to_uppercase(), query.trim().to_lowercase())
    }

    /// Cached products for `key`, dropping the entry if it has expired.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Vec<Product>> {
        if !self.config.enabled {
            return None;
        }

        self.entries.get(key).and_then(|entry| {
            if entry.is_expired() {
                drop(entry);
                self.entries.remove(key);
                None
            } else {
                Some(entry.products.clone())
            }
        })
    }

    /// Store products for `key`.
    pub fn insert(&self, key: &str, products: &[Product]) {
        if !self.config.enabled {
            return;
        }

        self.enforce_max_entries();

        let ttl = Duration::from_secs(self.config.ttl_seconds);
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                products: products.to_vec(),
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Number of live entries, expired ones included until touched.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn cleanup_expired(&self) {
        self.entries.retain(|_, entry| !entry.is_expired());
    }

    fn enforce_max_entries(&self) {
        if self.entries.len() < self.config.max_entries {
            return;
        }

        self.cleanup_expired();

        // Still full: evict arbitrary entries to make room.
        if self.entries.len() >= self.config.max_entries {
            let to_remove = self.entries.len() - self.config.max_entries + 1;
            let keys: Vec<String> = self
                .entries
                .iter()
                .take(to_remove)
                .map(|entry| entry.key().clone())
                .collect();
            for key in keys {
                self.entries.remove(&key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(title: &str) -> Product {
        Product {
            title: title.to_string(),
            price: Some("$1.00".to_string()),
            rating: None,
            url: None,
            image: None,
            asin: "B000TEST".to_string(),
            is_best_seller: None,
            is_amazon_choice: None,
            is_prime: None,
        }
    }

    #[test]
    fn test_insert_and_get() {
        let cache = ProductCache::new(CacheConfig::default());
        let key = ProductCache::key("us", "  Eggs ");
        assert_eq!(key, "US:eggs");

        cache.insert(&key, &[product("Eggs")]);
        assert_eq!(cache.get("US:eggs").map(|p| p.len()), Some(1));
    }

    #[test]
    fn test_expired_entries_are_dropped() {
        let cache = ProductCache::new(CacheConfig {
            ttl_seconds: 0,
            ..CacheConfig::default()
        });
        cache.insert("US:eggs", &[product("Eggs")]);
        std::thread::sleep(Duration::from_millis(5));

        assert!(cache.get("US:eggs").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_max_entries_is_enforced() {
        let cache = ProductCache::new(CacheConfig {
            max_entries: 2,
            ..CacheConfig::default()
        });
        for q in ["a", "b", "c", "d"] {
            cache.insert(q, &[product(q)]);
        }
        assert!(cache.len() <= 2);
        assert!(cache.get("d").is_some());
    }

    #[test]
    fn test_disabled_cache_stores_nothing() {
        let cache = ProductCache::new(CacheConfig {
            enabled: false,
            ..CacheConfig::default()
        });
        cache.insert("US:eggs", &[product("Eggs")]);
        assert!(cache.get("US:eggs").is_none());
    }
}

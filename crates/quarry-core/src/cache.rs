use std::time::{Duration, Instant};

use moka::Expiry;
use sha2::{Digest, Sha256};

use crate::models::{ScrapeResult, SelectorMap};
use crate::traits::ResultCache;

/// Default entry capacity for [`MemoryCache`].
pub const DEFAULT_CACHE_CAPACITY: u64 = 10_000;

/// Derive the cache key for a `(url, fields)` pair, as 64-char hex.
///
/// SHA-256 over the URL and every (name, selector) pair in sorted order,
/// NUL-separated so component boundaries cannot collide. Rendering mode,
/// timeout, and headers are not part of the key: they tune the transport,
/// not what is extracted, so requests differing only in those share an
/// entry.
pub fn cache_key(url: &str, fields: &SelectorMap) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    for (name, selector) in fields {
        hasher.update([0u8]);
        hasher.update(name.as_bytes());
        hasher.update([0u8]);
        hasher.update(selector.as_bytes());
    }
    format!("{:x}", hasher.finalize())
}

/// In-memory result cache backed by moka, with per-entry TTL.
///
/// Cheap to clone; clones share the underlying cache.
#[derive(Clone)]
pub struct MemoryCache {
    inner: moka::future::Cache<String, (ScrapeResult, Duration)>,
}

/// Expires each entry after the TTL it was stored with.
struct PerEntryTtl;

impl Expiry<String, (ScrapeResult, Duration)> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &(ScrapeResult, Duration),
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.1)
    }
}

impl MemoryCache {
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: moka::future::Cache::builder()
                .max_capacity(max_capacity)
                .expire_after(PerEntryTtl)
                .build(),
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl ResultCache for MemoryCache {
    async fn get(&self, key: &str) -> Option<ScrapeResult> {
        self.inner.get(key).await.map(|(value, _ttl)| value)
    }

    async fn set(&self, key: String, value: ScrapeResult, ttl: Duration) {
        self.inner.insert(key, (value, ttl)).await;
    }
}

use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;

use crate::error::EngineError;
use crate::models::{ScrapeResult, SelectorMap};

/// Fetches a page and extracts the requested fields from it.
///
/// `use_browser` selects JavaScript rendering, `timeout` overrides the
/// engine's default fetch deadline, and `headers` are forwarded on the
/// outgoing request. Failures are reported in the engine's own taxonomy;
/// the orchestrator translates them for the outside world.
pub trait FetchEngine: Send + Sync + Clone {
    fn fetch(
        &self,
        url: &str,
        use_browser: bool,
        timeout: Option<u64>,
        headers: &BTreeMap<String, String>,
        fields: &SelectorMap,
    ) -> impl Future<Output = Result<ScrapeResult, EngineError>> + Send;
}

/// Key-value store for extracted results with per-entry expiration.
///
/// Implementations must tolerate concurrent readers and writers. No
/// single-flight guarantee is required: two concurrent misses on the same
/// key may both trigger a fetch.
pub trait ResultCache: Send + Sync + Clone {
    fn get(&self, key: &str) -> impl Future<Output = Option<ScrapeResult>> + Send;

    fn set(
        &self,
        key: String,
        value: ScrapeResult,
        ttl: Duration,
    ) -> impl Future<Output = ()> + Send;
}

/// A no-op ResultCache for callers that never want results cached.
#[derive(Debug, Clone)]
pub struct NullCache;

impl ResultCache for NullCache {
    async fn get(&self, _key: &str) -> Option<ScrapeResult> {
        None
    }

    async fn set(&self, _key: String, _value: ScrapeResult, _ttl: Duration) {}
}

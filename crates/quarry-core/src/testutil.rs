//! Test utilities: mock implementations of the core traits.
//!
//! Handwritten mocks for dependency-injected tests. Everything is built on
//! `Arc<Mutex<_>>` interior mutability so a test can keep a clone of the
//! mock and assert on the calls it recorded.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::EngineError;
use crate::models::{FieldValue, ScrapeResult, SelectorMap};
use crate::traits::{FetchEngine, ResultCache};

// ---------------------------------------------------------------------------
// MockEngine
// ---------------------------------------------------------------------------

/// One recorded [`FetchEngine::fetch`] invocation.
#[derive(Debug, Clone)]
pub struct RecordedFetch {
    pub url: String,
    pub use_browser: bool,
    pub timeout: Option<u64>,
    pub headers: BTreeMap<String, String>,
    pub fields: SelectorMap,
}

/// Mock engine that pops queued responses and records every call.
#[derive(Clone, Default)]
pub struct MockEngine {
    /// Response queue; each call pops the front. An empty queue
    /// yields an empty result.
    responses: Arc<Mutex<Vec<Result<ScrapeResult, EngineError>>>>,
    pub calls: Arc<Mutex<Vec<RecordedFetch>>>,
}

impl MockEngine {
    pub fn new(result: ScrapeResult) -> Self {
        Self {
            responses: Arc::new(Mutex::new(vec![Ok(result)])),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_error(error: EngineError) -> Self {
        Self {
            responses: Arc::new(Mutex::new(vec![Err(error)])),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_responses(responses: Vec<Result<ScrapeResult, EngineError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl FetchEngine for MockEngine {
    async fn fetch(
        &self,
        url: &str,
        use_browser: bool,
        timeout: Option<u64>,
        headers: &BTreeMap<String, String>,
        fields: &SelectorMap,
    ) -> Result<ScrapeResult, EngineError> {
        self.calls.lock().unwrap().push(RecordedFetch {
            url: url.to_string(),
            use_browser,
            timeout,
            headers: headers.clone(),
            fields: fields.clone(),
        });

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(ScrapeResult::new())
        } else {
            responses.remove(0)
        }
    }
}

// ---------------------------------------------------------------------------
// MockCache
// ---------------------------------------------------------------------------

/// Mock cache backed by a HashMap, with inspectable traffic.
#[derive(Clone, Default)]
pub struct MockCache {
    entries: Arc<Mutex<HashMap<String, ScrapeResult>>>,
    gets: Arc<Mutex<usize>>,
    /// Every store as (key, ttl), in order.
    pub sets: Arc<Mutex<Vec<(String, Duration)>>>,
}

impl MockCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_count(&self) -> usize {
        *self.gets.lock().unwrap()
    }

    pub fn set_count(&self) -> usize {
        self.sets.lock().unwrap().len()
    }
}

impl ResultCache for MockCache {
    async fn get(&self, key: &str) -> Option<ScrapeResult> {
        *self.gets.lock().unwrap() += 1;
        self.entries.lock().unwrap().get(key).cloned()
    }

    async fn set(&self, key: String, value: ScrapeResult, ttl: Duration) {
        self.sets.lock().unwrap().push((key.clone(), ttl));
        self.entries.lock().unwrap().insert(key, value);
    }
}

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Build a selector map from (field, selector) pairs.
pub fn make_fields(pairs: &[(&str, &str)]) -> SelectorMap {
    pairs
        .iter()
        .map(|(name, selector)| (name.to_string(), selector.to_string()))
        .collect()
}

/// Build a result with single-valued fields from (field, value) pairs.
pub fn make_result(pairs: &[(&str, &str)]) -> ScrapeResult {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), FieldValue::Single(value.to_string())))
        .collect()
}

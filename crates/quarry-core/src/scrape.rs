use std::time::Duration;

use crate::cache::cache_key;
use crate::error::{AppError, EngineError};
use crate::models::{ScrapeRequest, ScrapeResult};
use crate::traits::{FetchEngine, ResultCache};
use crate::validate::validate_url;

/// How long successful results stay cached.
pub const CACHE_TTL: Duration = Duration::from_secs(3600);

/// Message returned in place of unanticipated engine failures. The real
/// detail never leaves the server logs.
const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred while processing your request";

/// Orchestrates a scrape: validate → cache lookup → fetch → cache store.
///
/// Generic over the fetch engine and result cache via traits, enabling
/// dependency injection and testability without real HTTP or a real browser.
/// Holds no per-request state; one instance serves concurrent requests.
pub struct ScrapeService<E, C>
where
    E: FetchEngine,
    C: ResultCache,
{
    engine: E,
    cache: C,
}

impl<E, C> ScrapeService<E, C>
where
    E: FetchEngine,
    C: ResultCache,
{
    pub fn new(engine: E, cache: C) -> Self {
        Self { engine, cache }
    }

    /// Run one scrape request.
    ///
    /// 1. Validate the URL; nothing else is touched on failure.
    /// 2. `skip_cache` bypasses the cache in both directions.
    /// 3. Otherwise cache-aside: hit returns immediately, miss fetches and
    ///    stores on success. Failures are never cached.
    ///
    /// At most one engine invocation per call, and failures are returned
    /// as-is rather than retried.
    pub async fn scrape(&self, request: &ScrapeRequest) -> Result<ScrapeResult, AppError> {
        validate_url(&request.url)?;

        if request.skip_cache {
            tracing::debug!(url = %request.url, "Cache bypassed");
            return self.fetch(request).await;
        }

        let key = cache_key(&request.url, &request.fields);
        if let Some(hit) = self.cache.get(&key).await {
            tracing::debug!(url = %request.url, key = %&key[..8], "Cache hit");
            return Ok(hit);
        }

        tracing::debug!(url = %request.url, key = %&key[..8], "Cache miss");
        let result = self.fetch(request).await?;
        self.cache.set(key, result.clone(), CACHE_TTL).await;
        Ok(result)
    }

    async fn fetch(&self, request: &ScrapeRequest) -> Result<ScrapeResult, AppError> {
        tracing::info!(url = %request.url, use_browser = request.use_browser, "Fetching");
        self.engine
            .fetch(
                &request.url,
                request.use_browser,
                request.timeout,
                &request.headers,
                &request.fields,
            )
            .await
            .map_err(|err| match err {
                EngineError::Unavailable(message) => AppError::FetchUnavailable(message),
                EngineError::Parse(message) => AppError::ParseFailure(message),
                EngineError::Other(detail) => {
                    tracing::error!(url = %request.url, error = %detail, "Engine failed unexpectedly");
                    AppError::Unexpected(UNEXPECTED_MESSAGE.to_string())
                }
            })
    }
}

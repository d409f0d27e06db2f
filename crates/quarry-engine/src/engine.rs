use std::collections::BTreeMap;
#[cfg(feature = "browser")]
use std::sync::Arc;

use quarry_core::error::EngineError;
use quarry_core::models::{ScrapeResult, SelectorMap};
use quarry_core::traits::FetchEngine;
#[cfg(feature = "browser")]
use tokio::sync::OnceCell;

#[cfg(feature = "browser")]
use crate::browser::BrowserFetcher;
use crate::extract::extract_fields;
use crate::fetcher::HttpFetcher;

/// Production fetch engine: plain HTTP or headless-browser rendering,
/// followed by CSS field extraction.
///
/// The browser is launched lazily on the first rendering request and shared
/// by all clones for the life of the process. Without the `browser` feature,
/// rendering requests fail with a typed error instead.
#[derive(Clone)]
pub struct ScraperEngine {
    http: HttpFetcher,
    #[cfg(feature = "browser")]
    browser: Arc<OnceCell<BrowserFetcher>>,
}

impl ScraperEngine {
    pub fn new() -> Result<Self, EngineError> {
        Ok(Self {
            http: HttpFetcher::new()?,
            #[cfg(feature = "browser")]
            browser: Arc::new(OnceCell::new()),
        })
    }

    #[cfg(feature = "browser")]
    async fn browser(&self) -> Result<&BrowserFetcher, EngineError> {
        self.browser.get_or_try_init(BrowserFetcher::launch).await
    }
}

impl FetchEngine for ScraperEngine {
    async fn fetch(
        &self,
        url: &str,
        use_browser: bool,
        timeout: Option<u64>,
        headers: &BTreeMap<String, String>,
        fields: &SelectorMap,
    ) -> Result<ScrapeResult, EngineError> {
        let html = if use_browser {
            #[cfg(feature = "browser")]
            {
                self.browser().await?.fetch(url, timeout, headers).await?
            }
            #[cfg(not(feature = "browser"))]
            {
                return Err(EngineError::Other(
                    "Browser rendering support was not compiled in".to_string(),
                ));
            }
        } else {
            self.http.fetch(url, timeout, headers).await?
        };

        tracing::debug!(url, bytes = html.len(), "Fetched page");
        extract_fields(&html, fields)
    }
}

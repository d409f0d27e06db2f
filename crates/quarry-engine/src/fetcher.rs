use std::collections::BTreeMap;
use std::time::Duration;

use quarry_core::error::EngineError;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// Plain HTTP fetcher using reqwest.
///
/// Downloads raw HTML without executing JavaScript, which is enough for
/// server-rendered pages. Pair with the browser fetcher when the target
/// builds its content client-side.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Default fetch timeout, overridable per request.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new() -> Result<Self, EngineError> {
        let client = Client::builder()
            .user_agent(concat!(
                "Quarry/",
                env!("CARGO_PKG_VERSION"),
                " (structured data fetcher)"
            ))
            .timeout(Self::DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| EngineError::Other(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Fetch a page, returning the raw HTML body.
    ///
    /// `timeout` overrides the client default for this request only.
    /// `headers` with invalid names or values are skipped rather than
    /// failing the fetch.
    pub async fn fetch(
        &self,
        url: &str,
        timeout: Option<u64>,
        headers: &BTreeMap<String, String>,
    ) -> Result<String, EngineError> {
        let mut request = self.client.get(url);
        if let Some(seconds) = timeout {
            request = request.timeout(Duration::from_secs(seconds));
        }
        if !headers.is_empty() {
            request = request.headers(build_header_map(headers));
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                EngineError::Unavailable(format!("Request timed out fetching {url}"))
            } else if e.is_connect() {
                EngineError::Unavailable(format!("Connection failed: {e}"))
            } else {
                EngineError::Unavailable(format!("HTTP error: {e}"))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::Unavailable(format!(
                "HTTP status {} fetching {url}",
                status.as_u16()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| EngineError::Unavailable(format!("Failed to read response body: {e}")))
    }
}

fn build_header_map(headers: &BTreeMap<String, String>) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(parsed_name), Ok(parsed_value)) => {
                map.insert(parsed_name, parsed_value);
            }
            _ => tracing::warn!(header = %name, "Skipping invalid request header"),
        }
    }
    map
}

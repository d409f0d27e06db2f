use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::network::{Headers, SetExtraHttpHeadersParams};
use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use quarry_core::error::EngineError;

/// Headless Chromium fetcher speaking the Chrome DevTools Protocol.
///
/// Unlike [`HttpFetcher`](crate::HttpFetcher), this executes JavaScript
/// before returning the HTML, making it suitable for SPAs and pages with
/// lazy-loaded content.
///
/// A single Chromium process is shared across all clones of this struct; each
/// fetch opens a new tab, grabs the rendered HTML, and closes the tab.
#[derive(Clone)]
pub struct BrowserFetcher {
    browser: Arc<Browser>,
    default_timeout: Duration,
}

impl BrowserFetcher {
    /// Default navigation timeout, overridable per fetch.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Launches a headless Chromium browser.
    ///
    /// Requires a Chrome/Chromium binary. `CHROME_BIN` overrides discovery;
    /// otherwise well-known install locations are probed before letting
    /// chromiumoxide do its own lookup.
    pub async fn launch() -> Result<Self, EngineError> {
        let mut builder = BrowserConfig::builder().no_sandbox().disable_default_args();

        if let Some(binary) = locate_browser_binary() {
            tracing::info!(binary = %binary.display(), "Using browser binary");
            builder = builder.chrome_executable(binary);
        }

        let config = builder
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--no-first-run")
            .build()
            .map_err(|e| EngineError::Other(format!("Browser config error: {e}")))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| EngineError::Other(format!("Failed to launch browser: {e}")))?;

        // The CDP event stream has to be drained or the connection stalls.
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    tracing::warn!("Browser CDP handler error: {event:?}");
                    break;
                }
            }
        });

        Ok(Self {
            browser: Arc::new(browser),
            default_timeout: Self::DEFAULT_TIMEOUT,
        })
    }

    /// Fetch a page with JavaScript rendering, returning the rendered DOM.
    ///
    /// Extra headers are installed on the tab before navigation so they apply
    /// to the initial document request as well as any subresources.
    pub async fn fetch(
        &self,
        url: &str,
        timeout: Option<u64>,
        headers: &BTreeMap<String, String>,
    ) -> Result<String, EngineError> {
        let deadline = timeout
            .map(Duration::from_secs)
            .unwrap_or(self.default_timeout);

        let result = tokio::time::timeout(deadline, async {
            let page = self
                .browser
                .new_page("about:blank")
                .await
                .map_err(|e| EngineError::Other(format!("Failed to open tab: {e}")))?;

            if !headers.is_empty() {
                let entries: serde_json::Map<String, serde_json::Value> = headers
                    .iter()
                    .map(|(name, value)| (name.clone(), serde_json::Value::String(value.clone())))
                    .collect();
                page.execute(SetExtraHttpHeadersParams::new(Headers::new(
                    serde_json::Value::Object(entries),
                )))
                .await
                .map_err(|e| EngineError::Other(format!("Failed to set headers: {e}")))?;
            }

            page.goto(url)
                .await
                .map_err(|e| EngineError::Unavailable(format!("Failed to navigate to {url}: {e}")))?;

            // Wait until <body> is present, the minimal signal that the page
            // has rendered its main content.
            page.find_element("body")
                .await
                .map_err(|e| EngineError::Unavailable(format!("Page did not render body: {e}")))?;

            let html = page
                .content()
                .await
                .map_err(|e| EngineError::Unavailable(format!("Failed to read page content: {e}")))?;

            // Close the tab to free browser resources.
            let _ = page.close().await;

            Ok::<String, EngineError>(html)
        })
        .await;

        match result {
            Ok(inner) => inner,
            Err(_) => Err(EngineError::Unavailable(format!(
                "Request timed out after {} seconds rendering {url}",
                deadline.as_secs()
            ))),
        }
    }
}

/// Locate a Chrome/Chromium binary.
///
/// The snap wrapper for Chromium strips Chrome CLI flags it does not
/// recognize, so the real binary inside the snap is probed along with the
/// usual install locations. `None` lets chromiumoxide do its own lookup.
fn locate_browser_binary() -> Option<PathBuf> {
    if let Ok(overridden) = std::env::var("CHROME_BIN") {
        let path = PathBuf::from(&overridden);
        if path.exists() {
            return Some(path);
        }
    }

    let candidates: &[&str] = &[
        "/usr/bin/google-chrome-stable",
        "/usr/bin/google-chrome",
        "/usr/bin/chromium",
        "/usr/bin/chromium-browser",
        "/snap/chromium/current/usr/lib/chromium-browser/chrome",
        "/var/lib/flatpak/exports/bin/org.chromium.Chromium",
    ];

    candidates.iter().map(PathBuf::from).find(|p| p.exists())
}

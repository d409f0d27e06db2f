use std::collections::BTreeMap;

use serde::Serialize;

/// Field name mapped to the CSS selector that extracts it.
///
/// A `BTreeMap` so iteration order is canonical no matter the order the
/// caller listed the fields in; cache keys depend on this.
pub type SelectorMap = BTreeMap<String, String>;

/// A single extracted field value.
///
/// Serializes untagged: one match renders as a bare string, several matches
/// as an array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    Many(Vec<String>),
}

/// Extracted values keyed by field name. Fields that matched nothing are
/// absent. Opaque to the orchestrator: produced by the engine, cached and
/// returned verbatim.
pub type ScrapeResult = BTreeMap<String, FieldValue>;

/// A fully normalized scrape request.
///
/// The transport boundary coerces its raw parameters before building this,
/// so the core never sees unparsed strings.
#[derive(Debug, Clone)]
pub struct ScrapeRequest {
    pub url: String,
    pub fields: SelectorMap,
    /// Render JavaScript with a headless browser before extraction.
    pub use_browser: bool,
    /// Bypass the result cache entirely: no lookup, no store.
    pub skip_cache: bool,
    /// Per-request fetch timeout in seconds. `None` means engine default.
    pub timeout: Option<u64>,
    /// Extra request headers forwarded to the engine.
    pub headers: BTreeMap<String, String>,
}

impl ScrapeRequest {
    /// Build a request with the documented defaults: browser rendering on,
    /// caching on, no timeout override, no extra headers.
    pub fn new(url: impl Into<String>, fields: SelectorMap) -> Self {
        Self {
            url: url.into(),
            fields,
            use_browser: true,
            skip_cache: false,
            timeout: None,
            headers: BTreeMap::new(),
        }
    }

    pub fn with_browser(mut self, use_browser: bool) -> Self {
        self.use_browser = use_browser;
        self
    }

    pub fn with_skip_cache(mut self, skip_cache: bool) -> Self {
        self.skip_cache = skip_cache;
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers = headers;
        self
    }
}

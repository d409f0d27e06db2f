#[cfg(feature = "browser")]
pub mod browser;
pub mod engine;
pub mod extract;
pub mod fetcher;

#[cfg(feature = "browser")]
pub use browser::BrowserFetcher;
pub use engine::ScraperEngine;
pub use extract::extract_fields;
pub use fetcher::HttpFetcher;

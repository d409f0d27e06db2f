pub mod cache;
pub mod error;
pub mod models;
pub mod scrape;
pub mod testutil;
pub mod traits;
pub mod validate;

pub use cache::{DEFAULT_CACHE_CAPACITY, MemoryCache, cache_key};
pub use error::{AppError, EngineError};
pub use models::{FieldValue, ScrapeRequest, ScrapeResult, SelectorMap};
pub use scrape::{CACHE_TTL, ScrapeService};
pub use traits::{FetchEngine, NullCache, ResultCache};
pub use validate::validate_url;

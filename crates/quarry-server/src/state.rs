use quarry_core::ScrapeService;
use quarry_core::traits::{FetchEngine, ResultCache};

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
///
/// Generic over the engine and cache so tests can inject mocks.
pub struct AppState<E, C>
where
    E: FetchEngine,
    C: ResultCache,
{
    pub service: ScrapeService<E, C>,
}

use std::sync::Arc;

use axum::Router;

use quarry_core::testutil::MockEngine;
use quarry_core::{MemoryCache, ScrapeService};
use quarry_server::routes;
use quarry_server::state::AppState;

/// Router plus a handle to the injected mock engine for assertions.
pub struct TestApp {
    pub router: Router,
    pub engine: MockEngine,
}

/// Build a test app around the given mock engine and a fresh in-memory cache.
pub fn setup_test_app(engine: MockEngine) -> TestApp {
    let service = ScrapeService::new(engine.clone(), MemoryCache::default());
    let state = Arc::new(AppState { service });

    TestApp {
        router: routes::router(state),
        engine,
    }
}

/// Smoke-test for the browser-rendering path.
///
/// Launches a headless Chromium, renders <https://example.com>, and extracts
/// a couple of fields with CSS selectors.
///
/// Run with:
///   cargo run --example browser_smoke --features browser
use quarry_core::ScrapeService;
use quarry_core::models::{ScrapeRequest, SelectorMap};
use quarry_core::traits::NullCache;
use quarry_engine::ScraperEngine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let mut fields = SelectorMap::new();
    fields.insert("heading".to_string(), "h1".to_string());
    fields.insert("paragraphs".to_string(), "p".to_string());

    let service = ScrapeService::new(ScraperEngine::new()?, NullCache);
    let request = ScrapeRequest::new("https://example.com", fields);

    println!("Rendering {} …", request.url);
    let result = service.scrape(&request).await?;

    // Basic sanity checks
    assert!(
        result.contains_key("heading"),
        "Expected <h1> not found in rendered page"
    );

    for (name, value) in &result {
        println!("{name}: {value:?}");
    }
    Ok(())
}

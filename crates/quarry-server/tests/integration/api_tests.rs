use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use quarry_core::error::EngineError;
use quarry_core::models::{FieldValue, ScrapeResult};
use quarry_core::testutil::{MockEngine, make_result};

use crate::integration::common::setup_test_app;

async fn get_json(
    router: axum::Router,
    uri: &str,
) -> (StatusCode, serde_json::Value) {
    let response = router
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_returns_200() {
    let app = setup_test_app(MockEngine::default());

    let (status, json) = get_json(app.router, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}

// ---------------------------------------------------------------------------
// URL validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_url_returns_400() {
    let app = setup_test_app(MockEngine::default());

    let (status, json) = get_json(app.router, "/v1/data").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["message"], "URL parameter is required");
    assert_eq!(json["error"]["status"], 400);
    assert!(!json["error"]["request_id"].as_str().unwrap().is_empty());
    assert_eq!(app.engine.call_count(), 0);
}

#[tokio::test]
async fn empty_url_returns_400() {
    let app = setup_test_app(MockEngine::default());

    let (status, json) = get_json(app.router, "/v1/data?url=").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["message"], "URL parameter is required");
}

#[tokio::test]
async fn invalid_url_returns_400() {
    let app = setup_test_app(MockEngine::default());

    let (status, json) = get_json(app.router, "/v1/data?url=not-a-url").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["message"], "Invalid URL format");
    assert_eq!(app.engine.call_count(), 0);
}

#[tokio::test]
async fn non_http_scheme_returns_400() {
    let app = setup_test_app(MockEngine::default());

    let (status, json) = get_json(app.router, "/v1/data?url=ftp://example.com").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["message"], "Invalid URL format");
}

#[tokio::test]
async fn undecodable_url_bytes_return_400() {
    let app = setup_test_app(MockEngine::default());

    // %FF is not valid UTF-8; it decodes lossily and never parses as a URL.
    let (status, json) = get_json(app.router, "/v1/data?url=%FF").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["message"], "Invalid URL format");
    assert!(!json["error"]["request_id"].as_str().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Extraction and caching
// ---------------------------------------------------------------------------

#[tokio::test]
async fn returns_extracted_fields_and_caches_them() {
    let app = setup_test_app(MockEngine::new(make_result(&[("title", "Test Page")])));
    let uri = "/v1/data?url=https://example.com&fields%5Btitle%5D=h1";

    let (status, json) = get_json(app.router.clone(), uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({"title": "Test Page"}));

    // Identical request is served from cache without another fetch.
    let (status, json) = get_json(app.router, uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({"title": "Test Page"}));
    assert_eq!(app.engine.call_count(), 1);
}

#[tokio::test]
async fn skip_cache_fetches_every_time() {
    let app = setup_test_app(MockEngine::with_responses(vec![
        Ok(make_result(&[("title", "First")])),
        Ok(make_result(&[("title", "Second")])),
    ]));
    let uri = "/v1/data?url=https://example.com&fields%5Btitle%5D=h1&skip_cache=true";

    let (_, first) = get_json(app.router.clone(), uri).await;
    let (_, second) = get_json(app.router, uri).await;

    assert_eq!(first, serde_json::json!({"title": "First"}));
    assert_eq!(second, serde_json::json!({"title": "Second"}));
    assert_eq!(app.engine.call_count(), 2);
}

#[tokio::test]
async fn multiple_matches_render_as_array() {
    let mut result = ScrapeResult::new();
    result.insert(
        "links".to_string(),
        FieldValue::Many(vec!["first".to_string(), "second".to_string()]),
    );
    let app = setup_test_app(MockEngine::new(result));

    let (status, json) = get_json(
        app.router,
        "/v1/data?url=https://example.com&fields%5Blinks%5D=a",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({"links": ["first", "second"]}));
}

// ---------------------------------------------------------------------------
// Engine failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unreachable_site_returns_503() {
    let app = setup_test_app(MockEngine::with_error(EngineError::Unavailable(
        "Service unavailable".into(),
    )));

    let (status, json) = get_json(app.router, "/v1/data?url=https://example.com").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"]["message"], "Service unavailable");
    assert_eq!(json["error"]["status"], 503);
}

#[tokio::test]
async fn unparseable_content_returns_422() {
    let app = setup_test_app(MockEngine::with_error(EngineError::Parse(
        "Failed to parse HTML".into(),
    )));

    let (status, json) = get_json(app.router, "/v1/data?url=https://example.com").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"]["message"], "Failed to parse HTML");
}

#[tokio::test]
async fn unexpected_failure_returns_500_with_generic_message() {
    let app = setup_test_app(MockEngine::with_error(EngineError::Other(
        "chrome crashed: SIGSEGV".into(),
    )));

    let (status, json) = get_json(app.router, "/v1/data?url=https://example.com").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json["error"]["message"],
        "An unexpected error occurred while processing your request"
    );
    assert!(!json["error"]["message"].as_str().unwrap().contains("chrome"));
    assert!(!json["error"]["request_id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn failed_fetch_is_retried_on_next_request() {
    let app = setup_test_app(MockEngine::with_responses(vec![
        Err(EngineError::Unavailable("Service unavailable".into())),
        Ok(make_result(&[("title", "Recovered")])),
    ]));
    let uri = "/v1/data?url=https://example.com&fields%5Btitle%5D=h1";

    let (status, _) = get_json(app.router.clone(), uri).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    // The failure was not cached, so the next request fetches again.
    let (status, json) = get_json(app.router, uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({"title": "Recovered"}));
    assert_eq!(app.engine.call_count(), 2);
}

// ---------------------------------------------------------------------------
// Parameter coercion
// ---------------------------------------------------------------------------

#[tokio::test]
async fn transport_parameters_are_forwarded() {
    let app = setup_test_app(MockEngine::default());

    let (status, _) = get_json(
        app.router,
        "/v1/data?url=https://example.com&fields%5Btitle%5D=h1&use_browser=false&timeout=60\
         &headers=%7B%22User-Agent%22%3A%22Test%20Agent%22%7D",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let calls = app.engine.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].url, "https://example.com");
    assert!(!calls[0].use_browser);
    assert_eq!(calls[0].timeout, Some(60));
    assert_eq!(
        calls[0].headers.get("User-Agent").map(String::as_str),
        Some("Test Agent")
    );
    assert_eq!(calls[0].fields.get("title").map(String::as_str), Some("h1"));
}

#[tokio::test]
async fn malformed_headers_degrade_to_none() {
    let app = setup_test_app(MockEngine::default());

    let (status, _) = get_json(
        app.router,
        "/v1/data?url=https://example.com&headers=not-json",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let calls = app.engine.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].headers.is_empty());
}

#[tokio::test]
async fn browser_rendering_is_the_default() {
    let app = setup_test_app(MockEngine::default());

    let (status, _) = get_json(app.router, "/v1/data?url=https://example.com").await;
    assert_eq!(status, StatusCode::OK);

    let calls = app.engine.calls.lock().unwrap();
    assert!(calls[0].use_browser);
    assert_eq!(calls[0].timeout, None);
}

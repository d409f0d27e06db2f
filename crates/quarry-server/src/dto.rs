use std::collections::BTreeMap;

use serde::Serialize;

use quarry_core::models::{ScrapeRequest, ScrapeResult, SelectorMap};

// ---------------------------------------------------------------------------
// Data endpoint parameters
// ---------------------------------------------------------------------------

/// Raw query parameters of the data endpoint, before coercion.
///
/// Collected from the decoded pair list rather than a serde struct so
/// `fields[NAME]=SELECTOR` bracket keys can be folded into a map. Unknown
/// parameters are ignored.
#[derive(Debug, Default)]
pub struct RawDataParams {
    pub url: Option<String>,
    pub fields: SelectorMap,
    pub use_browser: Option<String>,
    pub skip_cache: Option<String>,
    pub timeout: Option<String>,
    pub headers: Option<String>,
}

impl RawDataParams {
    /// Fold a decoded query-pair list into raw parameters.
    ///
    /// Repeated keys keep the last value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "url" => params.url = Some(value),
                "use_browser" => params.use_browser = Some(value),
                "skip_cache" => params.skip_cache = Some(value),
                "timeout" => params.timeout = Some(value),
                "headers" => params.headers = Some(value),
                other => {
                    if let Some(name) = other
                        .strip_prefix("fields[")
                        .and_then(|rest| rest.strip_suffix(']'))
                    {
                        if !name.is_empty() {
                            params.fields.insert(name.to_string(), value);
                        }
                    }
                }
            }
        }
        params
    }

    /// Coerce raw parameters into a typed [`ScrapeRequest`].
    ///
    /// Coercion never fails:
    /// - `use_browser` is true unless the value is a case-insensitive
    ///   `"false"`; absence means true.
    /// - `skip_cache` is true only for a case-insensitive `"true"`.
    /// - `timeout` accepts positive integers; anything else is dropped.
    /// - `headers` must be a JSON object of strings; anything that fails to
    ///   parse collapses to no extra headers.
    /// - an absent `url` becomes the empty string, which the validator
    ///   reports as a required parameter.
    pub fn into_request(self) -> ScrapeRequest {
        let use_browser = match &self.use_browser {
            Some(value) => !value.eq_ignore_ascii_case("false"),
            None => true,
        };
        let skip_cache = self
            .skip_cache
            .as_deref()
            .is_some_and(|value| value.eq_ignore_ascii_case("true"));
        let timeout = self
            .timeout
            .as_deref()
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|seconds| *seconds > 0);
        let headers = self
            .headers
            .as_deref()
            .and_then(|raw| serde_json::from_str::<BTreeMap<String, String>>(raw).ok())
            .unwrap_or_default();

        let mut request = ScrapeRequest::new(self.url.unwrap_or_default(), self.fields)
            .with_browser(use_browser)
            .with_skip_cache(skip_cache)
            .with_headers(headers);
        if let Some(seconds) = timeout {
            request = request.with_timeout(seconds);
        }
        request
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Successful response body: extracted values keyed by field name.
/// Single matches render as strings, multiple matches as string arrays.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[schema(value_type = Object)]
pub struct DataResponse(pub ScrapeResult);

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub message: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

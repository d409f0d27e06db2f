use url::Url;

use crate::error::AppError;

/// Validate that a caller-supplied URL is a well-formed absolute http(s) URL.
///
/// Pure string inspection, no DNS and no I/O. A blank value gets its own
/// message because the parameter is required at the boundary; anything else
/// that fails to parse, or parses to a non-http(s) scheme, is reported as a
/// format problem.
pub fn validate_url(url: &str) -> Result<(), AppError> {
    if url.trim().is_empty() {
        return Err(AppError::InvalidUrl("URL parameter is required".to_string()));
    }

    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(AppError::InvalidUrl("Invalid URL format".to_string())),
    }
}

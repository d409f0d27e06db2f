use thiserror::Error;

/// Stable error taxonomy exposed by the orchestration layer.
///
/// Every failure the service can surface is one of these variants. The HTTP
/// boundary maps variants onto status codes and never sees engine internals.
#[derive(Error, Debug)]
pub enum AppError {
    /// The target URL is missing, malformed, or not http/https.
    #[error("{0}")]
    InvalidUrl(String),

    /// The request itself was malformed or a required parameter is absent.
    #[error("{0}")]
    MissingParameter(String),

    /// The upstream site could not be reached (connect failure, timeout,
    /// non-success status).
    #[error("{0}")]
    FetchUnavailable(String),

    /// The page was fetched but the requested fields could not be extracted.
    #[error("{0}")]
    ParseFailure(String),

    /// Anything unanticipated. Carries a generic user-facing message; the
    /// underlying detail is logged where the failure was detected.
    #[error("{0}")]
    Unexpected(String),
}

impl AppError {
    /// Whether the failure is transient and a retry could succeed.
    ///
    /// The service never retries on its own; the classification is for
    /// library consumers with their own retry policy.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::FetchUnavailable(_))
    }
}

/// Failure modes reported by a [`FetchEngine`](crate::traits::FetchEngine).
///
/// Engines describe failures in their own terms; the orchestrator translates
/// them into the external [`AppError`] taxonomy.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Transport-level failure: connection refused, timeout, bad status.
    #[error("{0}")]
    Unavailable(String),

    /// Fetched content could not be parsed or a selector was invalid.
    #[error("{0}")]
    Parse(String),

    /// Anything else (browser launch failure, internal channel errors).
    #[error("{0}")]
    Other(String),
}

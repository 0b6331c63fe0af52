use thiserror::Error;

/// Failure of a call against the services backend.
///
/// The page does not look inside; any variant counts as "operation failed".
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("backend responded with {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("service not found")]
    NotFound,
    #[error("backend unavailable")]
    Unavailable,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid API base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to build URL for '{path}': {source}")]
    Route {
        path: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to construct HTTP client: {0}")]
    Client(reqwest::Error),
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{path} returned HTTP {status}")]
    Status {
        path: String,
        status: reqwest::StatusCode,
    },
    #[error("failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

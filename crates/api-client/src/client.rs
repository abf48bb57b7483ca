//! The shared HTTP client.

use crate::{ApiError, ApiResult};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client bound to one backend base URL.
///
/// Carries a cookie store so the session established by the backend rides
/// along on every call (the `/api/auth/me` probe and the session-based
/// report variant depend on this). Cloning is cheap and shares the
/// underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new client for `base_url`, e.g. `http://localhost:8080`.
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let mut base_url = Url::parse(base_url).map_err(|source| ApiError::InvalidBaseUrl {
            url: base_url.to_owned(),
            source,
        })?;
        // Joining relative endpoint paths requires a trailing slash, else
        // the last path segment would be replaced.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .cookie_store(true)
            .build()
            .map_err(ApiError::Client)?;

        tracing::debug!(base_url = %base_url, "constructed API client");

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path)
            .map_err(|source| ApiError::Route {
                path: path.to_owned(),
                source,
            })
    }

    /// GET `path` with `query` parameters and decode a JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ApiResult<T> {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                path: path.to_owned(),
                source,
            })?;
        Self::decode(path, response).await
    }

    /// POST a JSON `body` to `path` and decode a JSON response.
    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                path: path.to_owned(),
                source,
            })?;
        Self::decode(path, response).await
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                path: path.to_owned(),
                status,
            });
        }
        response.json().await.map_err(|source| ApiError::Decode {
            path: path.to_owned(),
            source,
        })
    }
}

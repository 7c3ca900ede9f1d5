//! reqwest implementation of [`MovieBackend`].
//!
//! The service is a small JSON API:
//! - `GET /movies` returns `["Avatar", "Up", ...]`
//! - `GET /recommend?movie=Up` returns `[{"title": "...", "poster": "..."|null}, ...]`
//! - errors come back as `{"error": "..."}` with a 4xx status

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use super::service::{BackendError, MovieBackend};
use super::types::{ErrorBody, Recommendation};

/// Recommendation service reached over HTTP.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    /// Builds a backend rooted at `base_url`. A trailing `/` is ignored.
    /// `timeout` bounds each request; `None` waits as long as the server does.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, BackendError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Turns a response into `T`, mapping non-2xx statuses to `BackendError::Api`.
    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        let status = response.status();
        debug!("Backend response status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            let message = api_error_message(&body);
            warn!("Backend API error: {} - {}", status.as_u16(), message);
            return Err(BackendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| BackendError::Parse(e.to_string()))
    }
}

/// Prefers the service's `{"error": ...}` message, falls back to the raw body.
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

#[async_trait]
impl MovieBackend for HttpBackend {
    fn name(&self) -> &str {
        &self.base_url
    }

    async fn fetch_catalog(&self) -> Result<Vec<String>, BackendError> {
        let url = format!("{}/movies", self.base_url);
        info!("Fetching catalog from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let titles: Vec<String> = Self::read_json(response).await?;
        info!("Catalog loaded: {} titles", titles.len());
        Ok(titles)
    }

    async fn fetch_recommendations(
        &self,
        title: &str,
    ) -> Result<Vec<Recommendation>, BackendError> {
        let url = format!("{}/recommend", self.base_url);
        info!("Requesting recommendations for {:?}", title);

        let response = self
            .client
            .get(&url)
            .query(&[("movie", title)])
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let items: Vec<Recommendation> = Self::read_json(response).await?;
        info!("Received {} recommendations for {:?}", items.len(), title);
        Ok(items)
    }
}

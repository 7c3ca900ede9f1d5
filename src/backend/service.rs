use std::fmt;

use async_trait::async_trait;

use super::types::Recommendation;

/// Errors that can occur while talking to the recommendation service.
/// Nothing is retried, so the variants only need to be good log lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Transport failure (timeout, DNS, connection refused).
    Network(String),
    /// The service answered with a non-success status.
    Api { status: u16, message: String },
    /// The body was not the JSON shape we expect.
    Parse(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Network(msg) => write!(f, "network error: {msg}"),
            BackendError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            BackendError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

/// The two read endpoints the client depends on.
#[async_trait]
pub trait MovieBackend: Send + Sync {
    /// Human-readable location of the backend, shown in the title bar.
    fn name(&self) -> &str;

    /// `GET /movies`: every selectable title, in catalog order.
    async fn fetch_catalog(&self) -> Result<Vec<String>, BackendError>;

    /// `GET /recommend?movie=<title>`: recommendations in the order the
    /// service ranked them.
    async fn fetch_recommendations(
        &self,
        title: &str,
    ) -> Result<Vec<Recommendation>, BackendError>;
}

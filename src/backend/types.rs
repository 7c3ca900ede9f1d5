//! Wire types for the recommendation service.

use serde::{Deserialize, Serialize};

/// A single recommended movie.
///
/// The service sends `"poster": null` when the poster lookup fails, and older
/// deployments omit the field entirely. Both end up as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Recommendation {
    pub title: String,
    #[serde(default)]
    pub poster: Option<String>,
}

impl Recommendation {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            poster: None,
        }
    }

    pub fn with_poster(mut self, poster: impl Into<String>) -> Self {
        self.poster = Some(poster.into());
        self
    }
}

/// Error body returned by the service on 4xx (`{"error": "Movie not found"}`).
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}

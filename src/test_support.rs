//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;

use crate::backend::{BackendError, MovieBackend, Recommendation};
use crate::core::action::{Action, update};
use crate::core::state::App;

/// A canned backend for tests that don't need a real server.
pub struct StubBackend {
    pub catalog: Result<Vec<String>, BackendError>,
    pub recommendations: Result<Vec<Recommendation>, BackendError>,
}

impl StubBackend {
    pub fn new(catalog: &[&str], recommendations: Vec<Recommendation>) -> Self {
        Self {
            catalog: Ok(catalog.iter().map(|t| t.to_string()).collect()),
            recommendations: Ok(recommendations),
        }
    }

    pub fn failing(error: BackendError) -> Self {
        Self {
            catalog: Err(error.clone()),
            recommendations: Err(error),
        }
    }
}

#[async_trait]
impl MovieBackend for StubBackend {
    fn name(&self) -> &str {
        "stub"
    }

    async fn fetch_catalog(&self) -> Result<Vec<String>, BackendError> {
        self.catalog.clone()
    }

    async fn fetch_recommendations(
        &self,
        _title: &str,
    ) -> Result<Vec<Recommendation>, BackendError> {
        self.recommendations.clone()
    }
}

/// Creates a test App with the given catalog already loaded.
pub fn test_app(catalog: &[&str]) -> App {
    let mut app = App::new();
    update(
        &mut app,
        Action::CatalogLoaded(catalog.iter().map(|t| t.to_string()).collect()),
    );
    app
}

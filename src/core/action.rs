//! # Actions
//!
//! Everything that can happen in Reelpick becomes an `Action`.
//! User types a letter? That's `Action::InputChanged(text)`.
//! Backend answers? That's `Action::RecommendationsLoaded { .. }`.
//!
//! `update()` applies an action to the state and returns the `Effect` the
//! caller must perform. No I/O happens here: the TUI runs the effects and
//! feeds their results back in as new actions.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::backend::{BackendError, Recommendation};
use crate::core::state::{Alert, App, RequestState};
use crate::core::suggest::suggestions_for;

pub const EMPTY_SELECTION_MESSAGE: &str = "Please select a movie";
pub const RECOMMENDATION_ERROR_MESSAGE: &str = "Error fetching recommendations";
pub const CATALOG_ERROR_MESSAGE: &str = "Could not load the movie catalog";

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// View mounted; fetch the catalog once.
    LoadCatalog,
    CatalogLoaded(Vec<String>),
    CatalogFailed(BackendError),
    InputChanged(String),
    SelectSuggestion(String),
    /// Close the dropdown without touching the input.
    CloseSuggestions,
    RequestRecommendations,
    RecommendationsLoaded {
        request_id: u64,
        items: Vec<Recommendation>,
    },
    RecommendationsFailed {
        request_id: u64,
        error: BackendError,
    },
    DismissAlert,
    Quit,
}

/// Side effects requested by `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    FetchCatalog,
    FetchRecommendations { request_id: u64, title: String },
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::LoadCatalog => {
            app.status_message = String::from("Loading catalog...");
            Effect::FetchCatalog
        }

        Action::CatalogLoaded(titles) => {
            info!("Catalog replaced: {} titles", titles.len());
            app.catalog = titles;
            // A selection or request already closed the dropdown for this input
            if !app.suggestions_closed && !app.is_loading() {
                app.suggestions = suggestions_for(&app.catalog, &app.input, app.max_suggestions);
            }
            app.status_message = format!("{} movies", app.catalog.len());
            Effect::None
        }

        Action::CatalogFailed(error) => {
            warn!("Catalog load failed: {}", error);
            app.catalog.clear();
            app.suggestions.clear();
            if app.catalog_failure_alert {
                app.status_message = String::from("Catalog unavailable");
                app.alert = Some(Alert::new(CATALOG_ERROR_MESSAGE, error.to_string()));
            } else {
                app.status_message = String::from("0 movies");
            }
            Effect::None
        }

        Action::InputChanged(text) => {
            app.suggestions = suggestions_for(&app.catalog, &text, app.max_suggestions);
            app.input = text;
            app.suggestions_closed = false;
            Effect::None
        }

        Action::SelectSuggestion(title) => {
            debug!("Suggestion selected: {:?}", title);
            app.input = title;
            app.suggestions.clear();
            app.suggestions_closed = true;
            Effect::None
        }

        Action::CloseSuggestions => {
            app.suggestions.clear();
            app.suggestions_closed = true;
            Effect::None
        }

        Action::RequestRecommendations => {
            if app.input.is_empty() {
                app.alert = Some(Alert::new(EMPTY_SELECTION_MESSAGE, ""));
                return Effect::None;
            }

            app.latest_request_id += 1;
            app.request_state = RequestState::Loading;
            app.recommendations.clear();
            app.suggestions.clear();
            app.suggestions_closed = true;
            app.status_message = format!("Finding movies like {}...", app.input);
            info!(
                "Recommendation request #{} for {:?}",
                app.latest_request_id, app.input
            );
            Effect::FetchRecommendations {
                request_id: app.latest_request_id,
                title: app.input.clone(),
            }
        }

        Action::RecommendationsLoaded { request_id, items } => {
            if request_id != app.latest_request_id {
                debug!(
                    "Dropping stale response #{} (latest is #{})",
                    request_id, app.latest_request_id
                );
                return Effect::None;
            }
            app.status_message = format!("{} recommendations", items.len());
            app.recommendations = items;
            app.request_state = RequestState::Idle;
            Effect::None
        }

        Action::RecommendationsFailed { request_id, error } => {
            if request_id != app.latest_request_id {
                debug!(
                    "Dropping stale failure #{} (latest is #{}): {}",
                    request_id, app.latest_request_id, error
                );
                return Effect::None;
            }
            warn!("Recommendation request #{} failed: {}", request_id, error);
            app.alert = Some(Alert::new(RECOMMENDATION_ERROR_MESSAGE, error.to_string()));
            app.status_message = String::from("Request failed");
            app.request_state = RequestState::Idle;
            Effect::None
        }

        Action::DismissAlert => {
            app.alert = None;
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}

//! # Application State
//!
//! Core state for the recommendation view. Domain data only; presentation
//! state (highlighted suggestion, spinner frame) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── catalog: Vec<String>               // every selectable title
//! ├── input: String                      // search box contents
//! ├── suggestions: Vec<String>           // type-ahead matches (<= max_suggestions)
//! ├── suggestions_closed: bool           // dropdown dismissed for the current input
//! ├── request_state: RequestState        // Idle | Loading
//! ├── recommendations: Vec<Recommendation>
//! ├── latest_request_id: u64             // tag of the request we still care about
//! ├── alert: Option<Alert>               // blocking modal
//! ├── status_message: String             // title bar text
//! ├── max_suggestions: usize
//! └── catalog_failure_alert: bool        // surface catalog failures to the user
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::backend::Recommendation;
use crate::core::config::ResolvedConfig;
use crate::core::suggest::DEFAULT_MAX_SUGGESTIONS;

/// Whether a recommendation request is outstanding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
}

/// A blocking message. While set, the TUI only accepts dismissal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

pub struct App {
    pub catalog: Vec<String>,
    pub input: String,
    pub suggestions: Vec<String>,
    /// Set by selection, Esc or a request; cleared by the next edit.
    pub suggestions_closed: bool,
    pub request_state: RequestState,
    pub recommendations: Vec<Recommendation>,
    /// Tag handed to the most recent recommendation request. Responses with
    /// any other tag were superseded and are dropped.
    pub latest_request_id: u64,
    pub alert: Option<Alert>,
    pub status_message: String,
    pub max_suggestions: usize,
    pub catalog_failure_alert: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            catalog: Vec::new(),
            input: String::new(),
            suggestions: Vec::new(),
            suggestions_closed: false,
            request_state: RequestState::Idle,
            recommendations: Vec::new(),
            latest_request_id: 0,
            alert: None,
            status_message: String::from("Loading catalog..."),
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            catalog_failure_alert: false,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            max_suggestions: config.max_suggestions,
            catalog_failure_alert: config.catalog_failure_alert,
            ..Self::new()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.request_state == RequestState::Loading
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{ReelpickConfig, resolve_with_env};

    #[test]
    fn test_app_new_defaults() {
        let app = App::new();
        assert!(app.catalog.is_empty());
        assert!(app.input.is_empty());
        assert!(!app.is_loading());
        assert_eq!(app.max_suggestions, 5);
        assert!(!app.catalog_failure_alert);
        assert!(app.alert.is_none());
    }

    #[test]
    fn test_app_from_config() {
        let mut config = ReelpickConfig::default();
        config.general.max_suggestions = Some(8);
        config.general.catalog_failure_alert = Some(true);
        let resolved = resolve_with_env(&config, &Default::default(), |_| None);

        let app = App::from_config(&resolved);
        assert_eq!(app.max_suggestions, 8);
        assert!(app.catalog_failure_alert);
    }
}

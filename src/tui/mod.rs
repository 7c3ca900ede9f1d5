//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the view,
//! translates keyboard events into `core::Action` values and runs the
//! `Effect`s the reducer asks for.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the spinner turns.
//! - **Idle**: sleeps up to 500ms, only redraws on events, terminal resize
//!   or a backend response.
//!
//! ## Request Ownership
//!
//! Backend calls run on tokio and report back through an mpsc channel as
//! `Action`s. Starting a recommendation request aborts the one still in
//! flight; the reducer additionally drops any response whose request id is
//! not the latest, so a late answer can never overwrite a newer one.

mod component;
pub mod components;
pub mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::backend::{HttpBackend, MovieBackend};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{RecommendationListState, SuggestionEvent, SuggestionListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub suggestions: SuggestionListState,
    pub results: RecommendationListState,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            suggestions: SuggestionListState::new(),
            results: RecommendationListState::new(),
        }
    }

    /// Mirror core state after every `update`.
    pub fn sync(&mut self, app: &App) {
        self.suggestions.sync(&app.suggestions);
        self.results.sync(app.latest_request_id);
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol is harmlessly ignored by terminals without it
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Executes reducer effects by spawning backend calls on tokio.
pub struct EffectRunner {
    backend: Arc<dyn MovieBackend>,
    tx: mpsc::Sender<Action>,
    /// The recommendation request still in flight, if any.
    in_flight: Option<tokio::task::AbortHandle>,
}

impl EffectRunner {
    pub fn new(backend: Arc<dyn MovieBackend>, tx: mpsc::Sender<Action>) -> Self {
        Self {
            backend,
            tx,
            in_flight: None,
        }
    }

    /// Runs `effect`. Returns true when the app should exit.
    pub fn perform(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::None => false,
            Effect::Quit => true,
            Effect::FetchCatalog => {
                self.spawn_catalog_fetch();
                false
            }
            Effect::FetchRecommendations { request_id, title } => {
                self.spawn_recommendation_fetch(request_id, title);
                false
            }
        }
    }

    fn spawn_catalog_fetch(&self) {
        info!("Spawning catalog fetch");
        let backend = self.backend.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let action = match backend.fetch_catalog().await {
                Ok(titles) => Action::CatalogLoaded(titles),
                Err(e) => Action::CatalogFailed(e),
            };
            if tx.send(action).is_err() {
                warn!("Failed to deliver catalog result: receiver dropped");
            }
        });
    }

    fn spawn_recommendation_fetch(&mut self, request_id: u64, title: String) {
        if let Some(previous) = self.in_flight.take() {
            debug!("Aborting superseded recommendation request");
            previous.abort();
        }

        info!("Spawning recommendation request #{} for {:?}", request_id, title);
        let backend = self.backend.clone();
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let action = match backend.fetch_recommendations(&title).await {
                Ok(items) => Action::RecommendationsLoaded { request_id, items },
                Err(error) => Action::RecommendationsFailed { request_id, error },
            };
            if tx.send(action).is_err() {
                warn!(
                    "Failed to deliver result of request #{}: receiver dropped",
                    request_id
                );
            }
        });
        self.in_flight = Some(handle.abort_handle());
    }
}

/// Routes one terminal event through the alert, the dropdown and finally
/// the core. Returns the effect the caller must run.
pub fn dispatch(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    // Ctrl+C always quits, even over an alert
    if matches!(event, TuiEvent::ForceQuit) {
        return update(app, Action::Quit);
    }
    if matches!(event, TuiEvent::Resize) {
        return Effect::None;
    }

    // A visible alert swallows everything except dismissal
    if app.alert.is_some() {
        return match event {
            TuiEvent::Submit | TuiEvent::Escape => update(app, Action::DismissAlert),
            _ => Effect::None,
        };
    }

    let effect = match tui.suggestions.handle_event(&event) {
        Some(SuggestionEvent::Pick(title)) => update(app, Action::SelectSuggestion(title)),
        Some(SuggestionEvent::Navigated) => Effect::None,
        Some(SuggestionEvent::Close) => update(app, Action::CloseSuggestions),
        None => match event {
            TuiEvent::Submit => update(app, Action::RequestRecommendations),
            TuiEvent::Escape => update(app, Action::Quit),
            // Arrows reach the results only while the dropdown is closed
            TuiEvent::CursorUp
            | TuiEvent::CursorDown
            | TuiEvent::ScrollPageUp
            | TuiEvent::ScrollPageDown => {
                tui.results.handle_event(&event);
                Effect::None
            }
            TuiEvent::InputChar(c) => {
                let mut text = app.input.clone();
                text.push(c);
                update(app, Action::InputChanged(text))
            }
            TuiEvent::Paste(pasted) => {
                let mut text = app.input.clone();
                text.extend(pasted.chars().filter(|c| !c.is_control()));
                update(app, Action::InputChanged(text))
            }
            TuiEvent::Backspace => {
                let mut text = app.input.clone();
                if text.pop().is_some() {
                    update(app, Action::InputChanged(text))
                } else {
                    Effect::None
                }
            }
            TuiEvent::ClearInput => update(app, Action::InputChanged(String::new())),
            _ => Effect::None,
        },
    };

    tui.sync(app);
    effect
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let backend: Arc<dyn MovieBackend> = Arc::new(
        HttpBackend::new(config.backend_url.clone(), config.request_timeout)
            .map_err(std::io::Error::other)?,
    );
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let result = event_loop(&mut terminal, &mut app, &mut tui, backend);

    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    tui: &mut TuiState,
    backend: Arc<dyn MovieBackend>,
) -> std::io::Result<()> {
    let (tx, rx) = mpsc::channel();
    let mut runner = EffectRunner::new(backend.clone(), tx);

    // Mount: fetch the catalog once
    runner.perform(update(app, Action::LoadCatalog));

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = app.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, app, tui, backend.name(), spinner_frame))?;
            needs_redraw = false;
        }

        // Short timeout while the spinner runs (~12fps), long when idle
        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let effect = dispatch(app, tui, event);
            if runner.perform(effect) {
                info!("Quit requested");
                return Ok(());
            }
        }

        // Results from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(app, action);
            tui.sync(app);
            if runner.perform(effect) {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendError, Recommendation};
    use crate::core::action::EMPTY_SELECTION_MESSAGE;
    use crate::core::state::RequestState;
    use crate::test_support::{StubBackend, test_app};
    use async_trait::async_trait;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::time::Duration;

    fn type_text(app: &mut App, tui: &mut TuiState, text: &str) {
        for c in text.chars() {
            dispatch(app, tui, TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_typing_updates_input_and_dropdown() {
        let mut app = test_app(&["Inception", "Interstellar", "Up"]);
        let mut tui = TuiState::new();

        type_text(&mut app, &mut tui, "in");
        assert_eq!(app.input, "in");
        assert_eq!(tui.suggestions.items, vec!["Inception", "Interstellar"]);

        dispatch(&mut app, &mut tui, TuiEvent::Backspace);
        dispatch(&mut app, &mut tui, TuiEvent::Backspace);
        assert!(app.input.is_empty());
        assert!(tui.suggestions.items.is_empty());
    }

    #[test]
    fn test_arrow_then_enter_selects_suggestion() {
        let mut app = test_app(&["Inception", "Interstellar", "Up"]);
        let mut tui = TuiState::new();
        type_text(&mut app, &mut tui, "in");

        dispatch(&mut app, &mut tui, TuiEvent::CursorDown);
        dispatch(&mut app, &mut tui, TuiEvent::CursorDown);
        let effect = dispatch(&mut app, &mut tui, TuiEvent::Submit);

        assert_eq!(effect, Effect::None);
        assert_eq!(app.input, "Interstellar");
        assert!(app.suggestions.is_empty());
        assert!(tui.suggestions.items.is_empty());
    }

    #[test]
    fn test_tab_completes_first_suggestion() {
        let mut app = test_app(&["Inception", "Interstellar", "Up"]);
        let mut tui = TuiState::new();
        type_text(&mut app, &mut tui, "in");

        dispatch(&mut app, &mut tui, TuiEvent::Complete);
        assert_eq!(app.input, "Inception");
    }

    #[test]
    fn test_enter_without_highlight_requests() {
        let mut app = test_app(&["Up"]);
        let mut tui = TuiState::new();
        type_text(&mut app, &mut tui, "Up");

        let effect = dispatch(&mut app, &mut tui, TuiEvent::Submit);
        assert_eq!(
            effect,
            Effect::FetchRecommendations {
                request_id: 1,
                title: "Up".to_string()
            }
        );
        assert_eq!(app.request_state, RequestState::Loading);
    }

    #[test]
    fn test_empty_enter_alerts_and_blocks_input() {
        let mut app = test_app(&["Up"]);
        let mut tui = TuiState::new();

        assert_eq!(dispatch(&mut app, &mut tui, TuiEvent::Submit), Effect::None);
        assert_eq!(app.alert.as_ref().unwrap().title, EMPTY_SELECTION_MESSAGE);

        // Typing while the alert is up goes nowhere
        dispatch(&mut app, &mut tui, TuiEvent::InputChar('u'));
        assert!(app.input.is_empty());

        // Esc dismisses instead of quitting
        assert_eq!(dispatch(&mut app, &mut tui, TuiEvent::Escape), Effect::None);
        assert!(app.alert.is_none());
    }

    #[test]
    fn test_escape_closes_dropdown_before_quitting() {
        let mut app = test_app(&["Inception", "Interstellar", "Up"]);
        let mut tui = TuiState::new();
        type_text(&mut app, &mut tui, "in");

        assert_eq!(dispatch(&mut app, &mut tui, TuiEvent::Escape), Effect::None);
        assert_eq!(app.input, "in");
        assert!(tui.suggestions.items.is_empty());

        assert_eq!(dispatch(&mut app, &mut tui, TuiEvent::Escape), Effect::Quit);
    }

    #[test]
    fn test_arrows_scroll_results_when_dropdown_closed() {
        let mut app = test_app(&["Up"]);
        let mut tui = TuiState::new();
        type_text(&mut app, &mut tui, "Up");
        dispatch(&mut app, &mut tui, TuiEvent::Submit);
        let request_id = app.latest_request_id;
        update(
            &mut app,
            Action::RecommendationsLoaded {
                request_id,
                items: vec![Recommendation::new("WALL-E"), Recommendation::new("Cars")],
            },
        );
        tui.sync(&app);

        // Six rows of results for eight rows of cards
        let mut terminal = Terminal::new(TestBackend::new(80, 10)).unwrap();
        terminal
            .draw(|f| ui::draw_ui(f, &app, &mut tui, "stub", 0))
            .unwrap();

        dispatch(&mut app, &mut tui, TuiEvent::CursorDown);
        assert_eq!(tui.results.scroll_state.offset().y, 1);
        dispatch(&mut app, &mut tui, TuiEvent::CursorUp);
        assert_eq!(tui.results.scroll_state.offset().y, 0);
        assert_eq!(app.input, "Up");
    }

    #[test]
    fn test_escape_quits_and_ctrl_c_always_quits() {
        let mut app = test_app(&["Up"]);
        let mut tui = TuiState::new();
        assert_eq!(dispatch(&mut app, &mut tui, TuiEvent::Escape), Effect::Quit);

        dispatch(&mut app, &mut tui, TuiEvent::Submit);
        assert!(app.alert.is_some());
        assert_eq!(dispatch(&mut app, &mut tui, TuiEvent::ForceQuit), Effect::Quit);
    }

    #[test]
    fn test_paste_strips_control_chars() {
        let mut app = test_app(&["The Matrix"]);
        let mut tui = TuiState::new();
        dispatch(&mut app, &mut tui, TuiEvent::Paste("The\tMatrix\n".to_string()));
        assert_eq!(app.input, "TheMatrix");
    }

    #[test]
    fn test_clear_input() {
        let mut app = test_app(&["Up"]);
        let mut tui = TuiState::new();
        type_text(&mut app, &mut tui, "Up");
        dispatch(&mut app, &mut tui, TuiEvent::ClearInput);
        assert!(app.input.is_empty());
        assert!(tui.suggestions.items.is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_runner_delivers_catalog() {
        let (tx, rx) = mpsc::channel();
        let backend = Arc::new(StubBackend::new(&["Inception", "Up"], vec![]));
        let mut runner = EffectRunner::new(backend, tx);

        assert!(!runner.perform(Effect::FetchCatalog));
        let action = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(
            action,
            Action::CatalogLoaded(vec!["Inception".to_string(), "Up".to_string()])
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_runner_delivers_failure_with_request_id() {
        let (tx, rx) = mpsc::channel();
        let error = BackendError::Network("connection refused".to_string());
        let backend = Arc::new(StubBackend::failing(error.clone()));
        let mut runner = EffectRunner::new(backend, tx);

        runner.perform(Effect::FetchRecommendations {
            request_id: 7,
            title: "Up".to_string(),
        });
        let action = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(
            action,
            Action::RecommendationsFailed {
                request_id: 7,
                error
            }
        );
    }

    /// Answers "slow" after a delay and everything else immediately.
    struct SlowFirstBackend;

    #[async_trait]
    impl MovieBackend for SlowFirstBackend {
        fn name(&self) -> &str {
            "slow-first"
        }

        async fn fetch_catalog(&self) -> Result<Vec<String>, BackendError> {
            Ok(Vec::new())
        }

        async fn fetch_recommendations(
            &self,
            title: &str,
        ) -> Result<Vec<Recommendation>, BackendError> {
            if title == "slow" {
                tokio::time::sleep(Duration::from_millis(300)).await;
            }
            Ok(vec![Recommendation::new(format!("like {title}"))])
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_new_request_aborts_superseded_one() {
        let (tx, rx) = mpsc::channel();
        let mut runner = EffectRunner::new(Arc::new(SlowFirstBackend), tx);

        runner.perform(Effect::FetchRecommendations {
            request_id: 1,
            title: "slow".to_string(),
        });
        runner.perform(Effect::FetchRecommendations {
            request_id: 2,
            title: "fast".to_string(),
        });

        let first = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(
            first,
            Action::RecommendationsLoaded {
                request_id: 2,
                items: vec![Recommendation::new("like fast")]
            }
        );
        // The aborted request never reports back
        assert!(rx.recv_timeout(Duration::from_millis(600)).is_err());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_full_cycle_through_runner() {
        let (tx, rx) = mpsc::channel();
        let backend = Arc::new(StubBackend::new(
            &["Inception", "Interstellar", "Up"],
            vec![Recommendation::new("WALL-E"), Recommendation::new("Cars")],
        ));
        let mut runner = EffectRunner::new(backend, tx);
        let mut app = App::new();
        let mut tui = TuiState::new();

        runner.perform(update(&mut app, Action::LoadCatalog));
        let loaded = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        update(&mut app, loaded);
        assert_eq!(app.catalog.len(), 3);

        type_text(&mut app, &mut tui, "Up");
        runner.perform(dispatch(&mut app, &mut tui, TuiEvent::Submit));
        let answered = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        update(&mut app, answered);

        assert_eq!(app.request_state, RequestState::Idle);
        let titles: Vec<&str> = app.recommendations.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["WALL-E", "Cars"]);
    }
}

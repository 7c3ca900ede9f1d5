use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::search_box;
use crate::tui::components::{
    AlertModal, RecommendationList, SearchBox, SuggestionList, TitleBar,
};

/// Screen regions, top to bottom. The dropdown collapses to zero rows
/// when there is nothing to suggest.
pub struct ScreenLayout {
    pub title: Rect,
    pub search: Rect,
    pub suggestions: Rect,
    pub results: Rect,
}

pub fn screen_layout(area: Rect, suggestion_height: u16) -> ScreenLayout {
    use Constraint::{Length, Min};
    let [title, search, suggestions, results] = Layout::vertical([
        Length(1),
        Length(search_box::HEIGHT),
        Length(suggestion_height),
        Min(0),
    ])
    .areas(area);
    ScreenLayout {
        title,
        search,
        suggestions,
        results,
    }
}

pub fn draw_ui(
    frame: &mut Frame,
    app: &App,
    tui: &mut TuiState,
    backend_name: &str,
    spinner_frame: usize,
) {
    let area = frame.area();
    let layout = screen_layout(area, tui.suggestions.height());
    let blocked = app.alert.is_some();

    TitleBar::new(backend_name, &app.status_message, app.is_loading())
        .render(frame, layout.title);

    SearchBox::new(&app.input, blocked).render(frame, layout.search);

    SuggestionList::new(&mut tui.suggestions, &app.input).render(frame, layout.suggestions);

    RecommendationList::new(
        &mut tui.results,
        &app.recommendations,
        app.is_loading(),
        spinner_frame,
    )
    .render(frame, layout.results);

    if let Some(alert) = &app.alert {
        AlertModal::new(alert).render(frame, area);
    }
}

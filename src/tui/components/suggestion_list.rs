//! # Suggestion List Component
//!
//! Type-ahead dropdown under the search box.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `SuggestionListState` lives in `TuiState` and tracks the highlight
//! - `SuggestionList` is created each frame with borrowed state
//!
//! The suggestions themselves are core state; `sync()` copies them in
//! after every update and drops the highlight when they change.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

/// Persistent state for the dropdown.
#[derive(Default)]
pub struct SuggestionListState {
    pub items: Vec<String>,
    pub list_state: ListState,
}

/// Events emitted by the dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionEvent {
    /// Put this title in the search box.
    Pick(String),
    /// Highlight moved or was dropped; nothing for the core to do.
    Navigated,
    /// Esc with nothing highlighted: hide the dropdown, keep the input.
    Close,
}

impl SuggestionListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirror the core's suggestion list. Resets the highlight on change.
    pub fn sync(&mut self, suggestions: &[String]) {
        if self.items != suggestions {
            self.items = suggestions.to_vec();
            self.list_state.select(None);
        }
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Rows the dropdown needs, borders included. Zero when closed.
    pub fn height(&self) -> u16 {
        if self.items.is_empty() {
            0
        } else {
            self.items.len() as u16 + 2
        }
    }
}

impl EventHandler for SuggestionListState {
    type Event = SuggestionEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SuggestionEvent> {
        if self.items.is_empty() {
            return None;
        }
        match event {
            TuiEvent::CursorDown => {
                let next = match self.highlighted() {
                    None => 0,
                    Some(i) => (i + 1).min(self.items.len() - 1),
                };
                self.list_state.select(Some(next));
                Some(SuggestionEvent::Navigated)
            }
            TuiEvent::CursorUp => {
                // Moving up from the first row returns focus to the input
                let prev = match self.highlighted() {
                    None | Some(0) => None,
                    Some(i) => Some(i - 1),
                };
                self.list_state.select(prev);
                Some(SuggestionEvent::Navigated)
            }
            TuiEvent::Escape if self.highlighted().is_some() => {
                self.list_state.select(None);
                Some(SuggestionEvent::Navigated)
            }
            TuiEvent::Escape => Some(SuggestionEvent::Close),
            TuiEvent::Submit => self
                .highlighted()
                .and_then(|i| self.items.get(i))
                .map(|title| SuggestionEvent::Pick(title.clone())),
            TuiEvent::Complete => {
                let index = self.highlighted().unwrap_or(0);
                self.items
                    .get(index)
                    .map(|title| SuggestionEvent::Pick(title.clone()))
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the dropdown.
pub struct SuggestionList<'a> {
    state: &'a mut SuggestionListState,
    /// Current input, underlined inside each title
    query: &'a str,
}

impl<'a> SuggestionList<'a> {
    pub fn new(state: &'a mut SuggestionListState, query: &'a str) -> Self {
        Self { state, query }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.state.items.is_empty() || area.height == 0 {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        let items: Vec<ListItem> = self
            .state
            .items
            .iter()
            .map(|title| ListItem::new(highlight_match(title, self.query)))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            )
            .highlight_symbol("› ");

        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

/// Splits `title` around the first case-insensitive occurrence of `query`
/// and underlines the match.
fn highlight_match<'t>(title: &'t str, query: &str) -> Line<'t> {
    let plain = Style::default().fg(Color::Gray);
    if query.is_empty() {
        return Line::from(Span::styled(title, plain));
    }

    // Lowercasing can change byte lengths, so only split when it doesn't.
    let lower = title.to_lowercase();
    let needle = query.to_lowercase();
    match lower.find(&needle) {
        Some(start)
            if lower.len() == title.len()
                && title.is_char_boundary(start)
                && title.is_char_boundary(start + needle.len()) =>
        {
            let end = start + needle.len();
            Line::from(vec![
                Span::styled(&title[..start], plain),
                Span::styled(
                    &title[start..end],
                    plain.fg(Color::Yellow).add_modifier(Modifier::UNDERLINED),
                ),
                Span::styled(&title[end..], plain),
            ])
        }
        _ => Line::from(Span::styled(title, plain)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn state_with(items: &[&str]) -> SuggestionListState {
        let mut state = SuggestionListState::new();
        state.sync(&items.iter().map(|t| t.to_string()).collect::<Vec<_>>());
        state
    }

    #[test]
    fn test_height_tracks_items() {
        assert_eq!(SuggestionListState::new().height(), 0);
        assert_eq!(state_with(&["Inception", "Interstellar"]).height(), 4);
    }

    #[test]
    fn test_down_up_navigation() {
        let mut state = state_with(&["Inception", "Interstellar"]);
        assert_eq!(state.highlighted(), None);

        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.highlighted(), Some(0));
        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.highlighted(), Some(1));

        state.handle_event(&TuiEvent::CursorUp);
        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(state.highlighted(), None);
    }

    #[test]
    fn test_submit_picks_highlighted_only() {
        let mut state = state_with(&["Inception", "Interstellar"]);
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);

        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(SuggestionEvent::Pick("Interstellar".to_string()))
        );
    }

    #[test]
    fn test_tab_completes_first_without_highlight() {
        let mut state = state_with(&["Inception", "Interstellar"]);
        assert_eq!(
            state.handle_event(&TuiEvent::Complete),
            Some(SuggestionEvent::Pick("Inception".to_string()))
        );
    }

    #[test]
    fn test_escape_drops_highlight_then_closes() {
        let mut state = state_with(&["Inception"]);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(
            state.handle_event(&TuiEvent::Escape),
            Some(SuggestionEvent::Navigated)
        );
        assert_eq!(state.highlighted(), None);
        assert_eq!(
            state.handle_event(&TuiEvent::Escape),
            Some(SuggestionEvent::Close)
        );
    }

    #[test]
    fn test_sync_resets_highlight_on_change() {
        let mut state = state_with(&["Inception", "Interstellar"]);
        state.handle_event(&TuiEvent::CursorDown);

        // Same list: highlight kept
        state.sync(&["Inception".to_string(), "Interstellar".to_string()]);
        assert_eq!(state.highlighted(), Some(0));

        state.sync(&["Inception".to_string()]);
        assert_eq!(state.highlighted(), None);
    }

    #[test]
    fn test_empty_list_ignores_events() {
        let mut state = SuggestionListState::new();
        assert_eq!(state.handle_event(&TuiEvent::CursorDown), None);
        assert_eq!(state.handle_event(&TuiEvent::Complete), None);
        assert_eq!(state.handle_event(&TuiEvent::Escape), None);
    }

    #[test]
    fn test_highlight_match_splits_on_query() {
        let line = highlight_match("Interstellar", "STELL");
        let parts: Vec<&str> = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(parts, vec!["Inter", "stell", "ar"]);
    }

    #[test]
    fn test_render_lists_titles() {
        let backend = TestBackend::new(40, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = state_with(&["Inception", "Interstellar"]);

        terminal
            .draw(|f| {
                SuggestionList::new(&mut state, "in").render(f, f.area());
            })
            .unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Inception"));
        assert!(text.contains("Interstellar"));
    }
}

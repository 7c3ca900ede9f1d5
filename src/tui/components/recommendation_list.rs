//! # Recommendation List Component
//!
//! Results area below the search box. Three looks:
//!
//! - **Loading**: braille spinner + "Loading..."
//! - **Empty**: a one-line hint
//! - **Populated**: one card per recommendation, title in bold and the
//!   poster URL (or "No Poster") underneath, in response order
//!
//! Cards live in a `ScrollView`. When they don't all fit, a scrollbar
//! appears and a "N more" marker sits on the bottom edge until the last
//! card is fully on screen. Scroll position persists in
//! `RecommendationListState` and resets when a new response arrives.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::backend::Recommendation;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub const NO_POSTER: &str = "No Poster";
pub const EMPTY_HINT: &str = "Pick a movie and press Enter to get recommendations";

/// Title line + poster line + top/bottom border.
const CARD_HEIGHT: u16 = 4;

/// Persistent scroll state for the results area.
#[derive(Default)]
pub struct RecommendationListState {
    pub scroll_state: ScrollViewState,
    /// Request whose results are on screen.
    shown_request: u64,
}

impl RecommendationListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump back to the first card when a different request's results show up.
    pub fn sync(&mut self, request_id: u64) {
        if self.shown_request != request_id {
            self.shown_request = request_id;
            self.scroll_state.scroll_to_top();
        }
    }
}

impl EventHandler for RecommendationListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        match event {
            TuiEvent::CursorUp => self.scroll_state.scroll_up(),
            TuiEvent::CursorDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            _ => return None,
        }
        Some(())
    }
}

/// Cards whose bottom edge is below the viewport.
fn cards_below(count: usize, offset_y: u16, viewport_height: u16) -> usize {
    let visible_bottom = offset_y as usize + viewport_height as usize;
    (0..count)
        .filter(|i| (i + 1) * CARD_HEIGHT as usize > visible_bottom)
        .count()
}

pub struct RecommendationList<'a> {
    state: &'a mut RecommendationListState,
    pub items: &'a [Recommendation],
    pub loading: bool,
    pub spinner_frame: usize,
}

impl<'a> RecommendationList<'a> {
    pub fn new(
        state: &'a mut RecommendationListState,
        items: &'a [Recommendation],
        loading: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            items,
            loading,
            spinner_frame,
        }
    }

    fn render_spinner(&self, frame: &mut Frame, area: Rect) {
        let glyph = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
        let lines = vec![
            Line::from(Span::styled(
                glyph,
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            )),
            Line::from("Loading..."),
        ];
        let [center] = Layout::vertical([Constraint::Length(2)])
            .flex(Flex::Center)
            .areas(area);
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), center);
    }

    fn render_hint(&self, frame: &mut Frame, area: Rect) {
        let [center] = Layout::vertical([Constraint::Length(1)])
            .flex(Flex::Center)
            .areas(area);
        let hint = Paragraph::new(EMPTY_HINT)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(hint, center);
    }

    fn render_cards(&mut self, frame: &mut Frame, area: Rect) {
        if area.height == 0 || area.width < 2 {
            return;
        }
        let content_width = area.width - 1; // scrollbar column
        let content_height = CARD_HEIGHT.saturating_mul(self.items.len() as u16);

        // Clamp so scrolling past the last card doesn't leave blank space
        let max_y = content_height.saturating_sub(area.height);
        if self.state.scroll_state.offset().y > max_y {
            self.state.scroll_state.set_offset(Position { x: 0, y: max_y });
        }
        let offset_y = self.state.scroll_state.offset().y;

        let mut scroll_view = ScrollView::new(Size::new(content_width, content_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        for (i, rec) in self.items.iter().enumerate() {
            let row = Rect::new(0, i as u16 * CARD_HEIGHT, content_width, CARD_HEIGHT);
            scroll_view.render_widget(card(rec), row);
        }
        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);

        let below = cards_below(self.items.len(), offset_y, area.height);
        if below > 0 {
            let marker = Line::from(format!(" {below} more, PgDn "))
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
            let width = (marker.width() as u16).min(content_width);
            let spot = Rect::new(
                area.x + content_width - width,
                area.y + area.height - 1,
                width,
                1,
            );
            frame.render_widget(marker, spot);
        }
    }
}

fn card(rec: &Recommendation) -> Paragraph<'_> {
    let poster_line = match rec.poster.as_deref() {
        Some(url) => Line::from(Span::styled(url, Style::default().fg(Color::Cyan))),
        None => Line::from(Span::styled(
            NO_POSTER,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
    };

    Paragraph::new(vec![
        Line::from(Span::styled(
            rec.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        poster_line,
    ])
    .block(
        Block::bordered()
            .border_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::DIM))
            .padding(Padding::horizontal(1)),
    )
}

impl Component for RecommendationList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.loading {
            self.render_spinner(frame, area);
        } else if self.items.is_empty() {
            self.render_hint(frame, area);
        } else {
            self.render_cards(frame, area);
        }
    }
}

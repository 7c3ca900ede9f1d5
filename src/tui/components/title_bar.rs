//! # TitleBar Component
//!
//! Top status line: which backend we are talking to and what it is doing.
//!
//! TitleBar is purely presentational. It receives all data as props and
//! has no internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(backend.name(), &app.status_message, app.is_loading());
//! title_bar.render(frame, area);
//! ```
//!
//! ## Conditional Formatting
//!
//! 1. **Loading**: `"Reelpick (http://localhost:5000) | Finding movies like Up... | ⏳"`
//! 2. **Status message**: `"Reelpick (http://localhost:5000) | 4803 movies"`
//! 3. **Default**: `"Reelpick (http://localhost:5000)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Top status bar component showing backend location and status.
pub struct TitleBar<'a> {
    /// Backend base URL
    pub backend: &'a str,
    /// Status message (e.g., "4803 movies", "Request failed")
    pub status_message: &'a str,
    /// Whether a recommendation request is outstanding
    pub loading: bool,
}

impl<'a> TitleBar<'a> {
    pub fn new(backend: &'a str, status_message: &'a str, loading: bool) -> Self {
        Self {
            backend,
            status_message,
            loading,
        }
    }

    fn text(&self) -> String {
        let mut text = format!("Reelpick ({})", self.backend);
        if !self.status_message.is_empty() {
            text.push_str(" | ");
            text.push_str(self.status_message);
        }
        if self.loading {
            text.push_str(" | ⏳");
        }
        text
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.text(),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(line, area);
    }
}

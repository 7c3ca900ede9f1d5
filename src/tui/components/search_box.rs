//! # SearchBox Component
//!
//! Single-line movie title input. The text itself is core state
//! (`App::input`); this component only draws it and places the cursor.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::Component;

pub const PLACEHOLDER: &str = "Type a movie name...";

/// Left + right border.
const HORIZONTAL_OVERHEAD: u16 = 2;

/// Total height of the box (1 content line + borders).
pub const HEIGHT: u16 = 3;

pub struct SearchBox<'a> {
    pub input: &'a str,
    /// Dimmed while an alert owns the keyboard
    pub dimmed: bool,
}

impl<'a> SearchBox<'a> {
    pub fn new(input: &'a str, dimmed: bool) -> Self {
        Self { input, dimmed }
    }

    /// The longest suffix of the input that fits in `width` columns with
    /// the cursor after it.
    fn visible_tail(&self, width: u16) -> &'a str {
        let width = width as usize;
        if width == 0 {
            return "";
        }
        // Keep one column for the cursor
        let budget = width.saturating_sub(1);
        if self.input.width() <= budget {
            return self.input;
        }

        let mut start = self.input.len();
        let mut used = 0;
        for (idx, ch) in self.input.char_indices().rev() {
            let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
            if used + w > budget {
                break;
            }
            used += w;
            start = idx;
        }
        &self.input[start..]
    }
}

impl Component for SearchBox<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.dimmed {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        } else {
            Style::default().fg(Color::Yellow)
        };
        let block = Block::bordered()
            .title(" Movie ")
            .title_bottom(Line::from(" Enter Recommend  Tab Complete  Esc Quit ").right_aligned())
            .border_style(border_style);

        let inner_width = area.width.saturating_sub(HORIZONTAL_OVERHEAD);

        let paragraph = if self.input.is_empty() {
            Paragraph::new(PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(self.visible_tail(inner_width))
        };
        frame.render_widget(paragraph.block(block), area);

        if !self.dimmed && area.height >= HEIGHT {
            let shown = if self.input.is_empty() {
                0
            } else {
                self.visible_tail(inner_width).width() as u16
            };
            frame.set_cursor_position(Position::new(area.x + 1 + shown, area.y + 1));
        }
    }
}

//! # Alert Modal
//!
//! Blocking popup drawn over everything else. The event loop routes every
//! key to dismissal while `App::alert` is set, so rendering is all this
//! component does.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Padding, Paragraph};

use crate::core::state::Alert;
use crate::tui::component::Component;

/// Popup width as a share of the terminal, in percent.
const WIDTH_PERCENT: u16 = 60;
/// Borders plus one line of vertical padding on each side.
const VERTICAL_OVERHEAD: u16 = 4;
/// Borders plus two columns of horizontal padding on each side.
const HORIZONTAL_OVERHEAD: u16 = 6;

pub struct AlertModal<'a> {
    pub alert: &'a Alert,
}

impl<'a> AlertModal<'a> {
    pub fn new(alert: &'a Alert) -> Self {
        Self { alert }
    }

    /// Bold title, then a blank line and the detail message if there is one.
    fn body_lines(&self, width: u16) -> Vec<Line<'static>> {
        let width = width.max(1) as usize;
        let bold = Style::default().add_modifier(Modifier::BOLD);

        let mut lines: Vec<Line<'static>> = textwrap::wrap(&self.alert.title, width)
            .into_iter()
            .map(|l| Line::styled(l.into_owned(), bold))
            .collect();
        if !self.alert.message.is_empty() {
            lines.push(Line::default());
            lines.extend(
                textwrap::wrap(&self.alert.message, width)
                    .into_iter()
                    .map(|l| Line::from(l.into_owned())),
            );
        }
        lines
    }
}

impl Component for AlertModal<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [column] = Layout::horizontal([Constraint::Percentage(WIDTH_PERCENT)])
            .flex(Flex::Center)
            .areas(area);

        let lines = self.body_lines(column.width.saturating_sub(HORIZONTAL_OVERHEAD));
        let height = (lines.len() as u16 + VERTICAL_OVERHEAD).min(area.height);
        let [popup] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(column);

        let block = Block::bordered()
            .title(" Alert ")
            .title_bottom(Line::from(" Enter OK ").centered())
            .border_style(Style::default().fg(Color::Red))
            .padding(Padding::new(2, 2, 1, 1));

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(block),
            popup,
        );
    }
}

//! The send control next to the input field.

use crate::ui::theme::Styles;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Clickable send control.
///
/// Clicking it submits like Enter does. It is drawn dimmed while the
/// input holds no text, but stays clickable; an empty submit is a no-op.
pub struct SendButton {
    ready: bool,
}

impl SendButton {
    pub fn new() -> Self {
        Self { ready: false }
    }

    /// Whether the input currently holds submittable text.
    #[must_use]
    pub fn ready(mut self, ready: bool) -> Self {
        self.ready = ready;
        self
    }
}

impl Default for SendButton {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for SendButton {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = if self.ready {
            Styles::button()
        } else {
            Styles::button_idle()
        };
        let border = if self.ready {
            Styles::border_active()
        } else {
            Styles::border()
        };

        Paragraph::new("Send")
            .alignment(Alignment::Center)
            .style(style)
            .block(Block::default().borders(Borders::ALL).border_style(border))
            .render(area, buf);
    }
}

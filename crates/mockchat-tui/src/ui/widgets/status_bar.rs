//! Status bar widget.

use crate::ui::theme::{Palette, Styles};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

/// A key hint for the status bar.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: &'static str,
    pub label: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// Hints shown on the chat screen.
pub const CHAT_HINTS: [KeyHint; 4] = [
    KeyHint::new("Enter", "send"),
    KeyHint::new("PgUp/PgDn", "scroll"),
    KeyHint::new("F1", "help"),
    KeyHint::new("Esc", "quit"),
];

/// Status bar displayed at the bottom of the screen.
#[derive(Debug, Clone)]
pub struct StatusBar<'a> {
    hints: &'a [KeyHint],
    pending: usize,
}

impl<'a> StatusBar<'a> {
    pub fn new(hints: &'a [KeyHint]) -> Self {
        Self { hints, pending: 0 }
    }

    /// Number of replies still on their way.
    #[must_use]
    pub fn pending(mut self, pending: usize) -> Self {
        self.pending = pending;
        self
    }

    fn pending_text(&self) -> Option<String> {
        match self.pending {
            0 => None,
            1 => Some("● 1 reply pending".into()),
            n => Some(format!("● {n} replies pending")),
        }
    }
}

impl Widget for StatusBar<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        for x in area.x..area.x.saturating_add(area.width) {
            buf[(x, area.y)].set_char(' ').set_bg(Palette::STATUS_BG);
        }

        let mut spans = vec![Span::styled(" ", Styles::status_bar())];
        for hint in self.hints {
            spans.push(Span::styled(format!(" {} ", hint.key), Styles::key_hint()));
            spans.push(Span::styled(format!(" {} ", hint.label), Styles::key_label()));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);

        if let Some(text) = self.pending_text() {
            let text_width = text.width() as u16;
            if text_width < area.width {
                let x = area.x + area.width - text_width - 1;
                buf.set_string(x, area.y, &text, Styles::pending());
            }
        }
    }
}

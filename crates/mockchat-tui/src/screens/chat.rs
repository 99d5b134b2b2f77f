//! The chat screen: transcript, input row, and status bar.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use super::Screen;
use crate::app::App;
use crate::ui::widgets::{HelpOverlay, SendButton, StatusBar, TextInput, Transcript, CHAT_HINTS};
use crate::ui::ChatLayout;

/// The only screen.
pub struct ChatScreen;

impl Screen for ChatScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let layout = ChatLayout::new(area);

        {
            let panel = app.panel.lock();
            Transcript::new(&panel, &app.config.title)
                .max_width_percent(app.config.bubble_max_width_percent)
                .render(layout.transcript, buf);
        }

        TextInput::new(&app.input)
            .focused(!app.show_help)
            .render(layout.input, buf);
        SendButton::new()
            .ready(app.input.has_text())
            .render(layout.send, buf);
        StatusBar::new(&CHAT_HINTS)
            .pending(app.pending_replies())
            .render(layout.status, buf);

        if app.show_help {
            HelpOverlay.render(area, buf);
        }
    }
}

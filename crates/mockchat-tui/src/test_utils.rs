//! Test utilities for mockchat-tui rendering and interaction tests.
//!
//! This module provides helpers for creating test apps, rendering screens,
//! and converting buffers to strings for assertions and snapshots.

use crate::app::App;
use crate::screens::Screen as ScreenTrait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use mockchat_engine::Config;
use ratatui::{buffer::Buffer, layout::Rect};

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 80;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 24;

/// The default test area (80x24).
pub fn test_area() -> Rect {
    Rect::new(0, 0, TEST_WIDTH, TEST_HEIGHT)
}

/// Create a test app with default config, laid out for the test area.
pub fn create_test_app() -> App {
    let mut app = App::new(Config::default());
    app.sync_viewport(test_area());
    app
}

/// Type `text` into the app one key at a time.
pub fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        app.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE));
    }
}

pub use crate::headless::buffer_to_string;

/// Render a screen to a buffer and return it as a string.
pub fn render_screen_to_string<S: ScreenTrait>(screen: &S, app: &App) -> String {
    let area = test_area();
    let mut buffer = Buffer::empty(area);
    screen.render(app, area, &mut buffer);
    buffer_to_string(&buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_to_string() {
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "Hello", ratatui::style::Style::default());
        buffer.set_string(0, 1, "World", ratatui::style::Style::default());

        assert_eq!(buffer_to_string(&buffer), "Hello\nWorld\n");
    }

    #[test]
    fn test_create_test_app_is_laid_out() {
        let app = create_test_app();
        assert_eq!(app.layout.status.y, TEST_HEIGHT - 1);
        assert!(app.panel.is_empty());
    }
}

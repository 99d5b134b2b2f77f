//! Help overlay.

use crate::ui::layout::centered_fixed;
use crate::ui::theme::Styles;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

const HELP_TEXT: &str = r"
  Chat
    Enter             Send message
    Ctrl+Enter        New line
    Click [Send]      Send message
    Up/Down           Input history, else scroll

  Transcript
    PgUp/PgDn         Scroll
    Mouse wheel       Scroll
    Ctrl+End          Jump to newest

    F1                Toggle this help
    Esc / Ctrl+C      Quit

  [Press any key to close]
";

/// Centered help overlay.
pub struct HelpOverlay;

impl Widget for HelpOverlay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = 54.min(area.width.saturating_sub(4));
        let height = 19.min(area.height.saturating_sub(2));
        let overlay_area = centered_fixed(width, height, area);

        Clear.render(overlay_area, buf);

        let block = Block::default()
            .title(" Help ")
            .title_style(Styles::title())
            .borders(Borders::ALL)
            .border_style(Styles::border_active())
            .style(Styles::default());

        Paragraph::new(HELP_TEXT)
            .block(block)
            .style(Styles::default())
            .render(overlay_area, buf);
    }
}

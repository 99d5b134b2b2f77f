//! Layout helpers for the mockchat TUI.

use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

/// Height of the input row (bar and send control).
pub const INPUT_HEIGHT: u16 = 3;

/// Width of the send control.
pub const SEND_WIDTH: u16 = 10;

/// Create a centered rect with fixed dimensions.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Regions of the chat screen.
///
/// ```text
/// ┌─ mockchat ─────────────────────────────┐
/// │                         ┊ hello      ┊ │
/// │ ┊ This is a simulated... ┊             │
/// └────────────────────────────────────────┘
/// ┌────────────────────────────┐┌────────┐
/// │ > _                        ││  Send  │
/// └────────────────────────────┘└────────┘
///  Enter send  F1 help  Esc quit
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChatLayout {
    pub transcript: Rect,
    pub input: Rect,
    pub send: Rect,
    pub status: Rect,
}

impl ChatLayout {
    /// Split the screen into transcript, input row, and status bar.
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(INPUT_HEIGHT),
                Constraint::Length(1),
            ])
            .split(area);

        let input_row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(SEND_WIDTH)])
            .split(rows[1]);

        Self {
            transcript: rows[0],
            input: input_row[0],
            send: input_row[1],
            status: rows[2],
        }
    }

    /// Whether a terminal cell lies on the send control.
    pub fn hits_send(&self, column: u16, row: u16) -> bool {
        self.send.contains(Position::new(column, row))
    }

    /// Whether a terminal cell lies inside the transcript.
    pub fn hits_transcript(&self, column: u16, row: u16) -> bool {
        self.transcript.contains(Position::new(column, row))
    }
}

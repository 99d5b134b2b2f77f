//! Event handling for the mockchat TUI.

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use mockchat_engine::Trigger;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::ui::ChatLayout;

/// Events that can occur in the TUI.
#[derive(Debug, Clone)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse event occurred.
    Mouse(MouseEvent),
    /// A tick event for UI updates.
    Tick,
    /// Terminal was resized.
    Resize(u16, u16),
}

/// Event handler that runs in a background thread.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _tx: mpsc::UnboundedSender<Event>,
}

impl EventHandler {
    /// Create a new event handler with the specified tick rate.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let tx_clone = tx.clone();

        // crossterm polling blocks, so it gets its own thread
        std::thread::spawn(move || loop {
            let event = if event::poll(tick_rate).unwrap_or(false) {
                match event::read() {
                    // Only key-down counts; release events would double-submit
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        Some(Event::Key(key))
                    }
                    Ok(CrosstermEvent::Mouse(mouse)) => Some(Event::Mouse(mouse)),
                    Ok(CrosstermEvent::Resize(w, h)) => Some(Event::Resize(w, h)),
                    _ => None,
                }
            } else {
                Some(Event::Tick)
            };

            if let Some(e) = event {
                if tx_clone.send(e).is_err() {
                    break;
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Get the next event, waiting until one is available.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Action that can be performed in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Help,
    Back,
    Submit(Trigger),
    ScrollUp(usize),
    ScrollDown(usize),
    PageUp,
    PageDown,
    JumpToEnd,
    None,
}

/// Convert a key event to an action.
///
/// Text editing keys are consumed by the input field before this runs.
pub fn key_to_action(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Enter => Action::Submit(Trigger::EnterKey),
        KeyCode::F(1) => Action::Help,
        KeyCode::Esc => Action::Back,
        KeyCode::Up => Action::ScrollUp(1),
        KeyCode::Down => Action::ScrollDown(1),
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::End if key.modifiers.contains(KeyModifiers::CONTROL) => Action::JumpToEnd,
        _ => Action::None,
    }
}

/// Convert a mouse event to an action using the last drawn layout.
pub fn mouse_to_action(mouse: MouseEvent, layout: &ChatLayout) -> Action {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if layout.hits_send(mouse.column, mouse.row) => {
            Action::Submit(Trigger::SendControl)
        }
        MouseEventKind::ScrollUp if layout.hits_transcript(mouse.column, mouse.row) => {
            Action::ScrollUp(mockchat_engine::SCROLL_SPEED)
        }
        MouseEventKind::ScrollDown if layout.hits_transcript(mouse.column, mouse.row) => {
            Action::ScrollDown(mockchat_engine::SCROLL_SPEED)
        }
        _ => Action::None,
    }
}

//! Headless mode for the mockchat TUI.
//!
//! Runs the real app loop against a `TestBackend` instead of a terminal.
//! Events are sent through a channel and the rendered screen is
//! published after every frame, enabling E2E tests and scripted runs.

use crate::app::App;
use crate::event::Event;
use crate::screens::{chat::ChatScreen, Screen as ScreenTrait};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use mockchat_engine::{Config, Message};
use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, Terminal};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Default terminal dimensions for headless mode.
pub const DEFAULT_WIDTH: u16 = 80;
pub const DEFAULT_HEIGHT: u16 = 24;

/// State captured from the headless TUI after each render.
#[derive(Debug, Clone, Default)]
pub struct HeadlessState {
    /// Text contents of the terminal buffer.
    pub screen_contents: String,
    /// Messages in the panel, in display order.
    pub messages: Vec<Message>,
    /// Current input field content.
    pub input: String,
    /// Replies scheduled but not yet shown.
    pub pending_replies: usize,
    /// Where the send control was drawn.
    pub send_area: Rect,
    /// Whether the TUI should quit.
    pub should_quit: bool,
    /// Whether help overlay is visible.
    pub show_help: bool,
}

/// Handle to control a headless TUI instance.
pub struct HeadlessHandle {
    event_tx: mpsc::UnboundedSender<Event>,
    state_rx: watch::Receiver<HeadlessState>,
}

impl HeadlessHandle {
    /// Send a raw event to the TUI.
    ///
    /// Returns `true` if the event was sent successfully.
    pub fn send_event(&self, event: Event) -> bool {
        self.event_tx.send(event).is_ok()
    }

    /// Send a key press without modifiers.
    pub fn press(&self, code: KeyCode) -> bool {
        self.send_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    /// Type `text` one key at a time.
    pub fn type_text(&self, text: &str) -> bool {
        text.chars().all(|ch| self.press(KeyCode::Char(ch)))
    }

    /// Left-click a terminal cell.
    pub fn click(&self, column: u16, row: u16) -> bool {
        self.send_event(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }))
    }

    /// Left-click the middle of the send control.
    pub fn click_send(&self) -> bool {
        let area = self.state().send_area;
        self.click(area.x + area.width / 2, area.y + area.height / 2)
    }

    /// Get the current state of the TUI.
    pub fn state(&self) -> HeadlessState {
        self.state_rx.borrow().clone()
    }

    /// Wait until a condition is met on the state.
    ///
    /// Returns the state when the condition is met, or `None` if timed out.
    pub async fn wait_for<F>(&mut self, condition: F, timeout: Duration) -> Option<HeadlessState>
    where
        F: Fn(&HeadlessState) -> bool,
    {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            let state = self.state();
            if condition(&state) {
                return Some(state);
            }

            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                return None;
            }

            match tokio::time::timeout(remaining, self.state_rx.changed()).await {
                Ok(Ok(())) => {}
                // Timed out, or the loop exited without meeting the condition
                Ok(Err(_)) | Err(_) => return None,
            }
        }
    }

    /// Wait for specific text to appear on screen.
    pub async fn wait_for_text(&mut self, text: &str, timeout: Duration) -> Option<HeadlessState> {
        self.wait_for(|s| s.screen_contents.contains(text), timeout)
            .await
    }

    /// Wait until the panel holds at least `count` messages.
    pub async fn wait_for_messages(
        &mut self,
        count: usize,
        timeout: Duration,
    ) -> Option<HeadlessState> {
        self.wait_for(|s| s.messages.len() >= count, timeout).await
    }

    /// Check if the TUI has quit.
    pub fn has_quit(&self) -> bool {
        self.state().should_quit
    }
}

/// Configuration for headless mode.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Terminal width.
    pub width: u16,
    /// Terminal height.
    pub height: u16,
    /// Tick interval.
    pub tick_rate: Duration,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tick_rate: Duration::from_millis(50),
        }
    }
}

/// Run the TUI in headless mode.
///
/// Returns a handle to control the TUI and a join handle for the background task.
///
/// # Example
///
/// ```ignore
/// let (mut handle, task) = run_tui_headless(Config::default(), HeadlessConfig::default());
///
/// handle.type_text("hello");
/// handle.press(KeyCode::Enter);
/// handle.wait_for_text("simulated AI response", Duration::from_secs(2)).await;
///
/// handle.press(KeyCode::Esc);
/// task.await.unwrap();
/// ```
pub fn run_tui_headless(
    config: Config,
    headless: HeadlessConfig,
) -> (HeadlessHandle, JoinHandle<Result<(), String>>) {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(HeadlessState::default());

    let task = tokio::spawn(async move {
        run_headless_loop(config, headless, event_rx, state_tx)
            .await
            .map_err(|e| e.to_string())
    });

    let handle = HeadlessHandle { event_tx, state_rx };

    (handle, task)
}

async fn run_headless_loop(
    config: Config,
    headless: HeadlessConfig,
    mut event_rx: mpsc::UnboundedReceiver<Event>,
    state_tx: watch::Sender<HeadlessState>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let backend = TestBackend::new(headless.width, headless.height);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            app.sync_viewport(area);
            ChatScreen.render(&app, area, frame.buffer_mut());
        })?;

        let screen_contents = buffer_to_string(terminal.backend().buffer());
        let _ = state_tx.send(HeadlessState {
            screen_contents,
            messages: app.panel.messages(),
            input: app.input.content().to_string(),
            pending_replies: app.pending_replies(),
            send_area: app.layout.send,
            should_quit: app.should_quit,
            show_help: app.show_help,
        });

        if app.should_quit {
            app.shutdown();
            break;
        }

        let event = tokio::select! {
            Some(event) = event_rx.recv() => event,
            () = tokio::time::sleep(headless.tick_rate) => Event::Tick,
        };
        crate::handle_event(&mut app, event);
    }

    Ok(())
}

/// Convert a terminal buffer to a string, one trimmed line per row.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                result.push_str(cell.symbol());
            }
        }
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    if result.ends_with('\n') {
        result.pop();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockchat_engine::Role;

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn test_headless_state_default() {
        let state = HeadlessState::default();
        assert!(!state.should_quit);
        assert!(!state.show_help);
        assert!(state.messages.is_empty());
        assert!(state.screen_contents.is_empty());
    }

    #[test]
    fn test_headless_config_default() {
        let config = HeadlessConfig::default();
        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.tick_rate, Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_flow_end_to_end() {
        let (mut handle, task) = run_tui_headless(Config::default(), HeadlessConfig::default());

        handle.type_text("hello");
        handle.press(KeyCode::Enter);

        let state = handle.wait_for_messages(1, WAIT).await.unwrap();
        assert_eq!(state.messages[0].text(), "hello");

        let state = handle
            .wait_for_text(r#"This is a simulated AI response to "hello"."#, WAIT)
            .await
            .unwrap();
        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.messages[1].role(), Role::Assistant);
        assert!(state.input.is_empty());

        handle.press(KeyCode::Esc);
        task.await.unwrap().unwrap();
        assert!(handle.has_quit());
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_send_end_to_end() {
        let (mut handle, task) = run_tui_headless(Config::default(), HeadlessConfig::default());

        // Wait for the first frame so the send control has a position
        handle
            .wait_for(|s| s.send_area.width > 0, WAIT)
            .await
            .unwrap();

        handle.type_text("via mouse");
        handle
            .wait_for(|s| s.input == "via mouse", WAIT)
            .await
            .unwrap();
        handle.click_send();

        let state = handle.wait_for_messages(2, WAIT).await.unwrap();
        assert_eq!(state.messages[0].text(), "via mouse");
        assert!(state.messages[1].text().contains(r#""via mouse""#));

        handle.send_event(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        task.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_click_appends_nothing() {
        let (mut handle, task) = run_tui_headless(Config::default(), HeadlessConfig::default());
        handle
            .wait_for(|s| s.send_area.width > 0, WAIT)
            .await
            .unwrap();

        handle.type_text("  ");
        handle.click_send();
        handle.press(KeyCode::Enter);

        // Nothing may arrive, so wait out more than one reply delay
        assert!(handle
            .wait_for_messages(1, Duration::from_millis(1500))
            .await
            .is_none());
        assert_eq!(handle.state().input, "  ");

        handle.press(KeyCode::Esc);
        task.await.unwrap().unwrap();
    }
}

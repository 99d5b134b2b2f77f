//! Application state and update logic for the mockchat TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use mockchat_engine::{ChatController, Config, ReplyHandle, SharedPanel, Trigger};
use ratatui::layout::Rect;
use tracing::debug;

use crate::event::{key_to_action, mouse_to_action, Action};
use crate::ui::widgets::{transcript_block, transcript_lines, TextInputState};
use crate::ui::ChatLayout;

/// Application state.
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// Whether the help overlay is visible.
    pub show_help: bool,

    /// Loaded configuration.
    pub config: Config,

    /// The input field.
    pub input: TextInputState,

    /// Messages shown in the transcript.
    pub panel: SharedPanel,

    /// Regions from the last layout pass, used for mouse hit testing.
    pub layout: ChatLayout,

    controller: ChatController<SharedPanel>,

    /// Replies still scheduled; cancelled on shutdown.
    replies: Vec<ReplyHandle>,
}

impl App {
    /// Create a new app. Must be called from within a tokio runtime.
    pub fn new(config: Config) -> Self {
        let panel = SharedPanel::new();
        let controller = ChatController::from_config(panel.clone(), &config);
        Self {
            should_quit: false,
            show_help: false,
            config,
            input: TextInputState::new(),
            panel,
            layout: ChatLayout::default(),
            controller,
            replies: Vec::new(),
        }
    }

    /// Number of replies scheduled but not yet shown.
    pub fn pending_replies(&self) -> usize {
        self.controller.pending_replies()
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.show_help {
            self.show_help = false;
            return;
        }
        if self.handle_input_key(key) {
            return;
        }
        self.handle_action(key_to_action(key));
    }

    /// Handle a mouse event against the last drawn layout.
    ///
    /// While help is open a click only closes it, like a key press.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.show_help {
            if matches!(mouse.kind, MouseEventKind::Down(_)) {
                self.show_help = false;
            }
            return;
        }
        let action = mouse_to_action(mouse, &self.layout);
        self.handle_action(action);
    }

    /// Handle a high-level action.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit | Action::Back => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.should_quit = true;
                }
            }
            Action::Help => self.show_help = !self.show_help,
            Action::Submit(trigger) => self.submit(trigger),
            Action::ScrollUp(lines) => self.panel.lock().scroll_up(lines),
            Action::ScrollDown(lines) => self.panel.lock().scroll_down(lines),
            Action::PageUp => {
                let page = self.page_height();
                self.panel.lock().scroll_up(page);
            }
            Action::PageDown => {
                let page = self.page_height();
                self.panel.lock().scroll_down(page);
            }
            Action::JumpToEnd => self.panel.lock().scroll_to_bottom(),
            Action::None => {}
        }
    }

    fn submit(&mut self, trigger: Trigger) {
        if let Some(handle) = self.controller.trigger(trigger, &mut self.input) {
            self.replies.push(handle);
        }
    }

    /// Handle keys that edit the input field.
    /// Returns true if the key was consumed.
    fn handle_input_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Enter {
            self.input.insert('\n');
            return true;
        }

        // Leave Ctrl+C and friends to the action handler
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }

        let browsing = self.input.is_empty() || self.input.is_browsing_history();

        match key.code {
            // With no history entry to move to, Up/Down scroll the transcript
            KeyCode::Up if browsing => return self.input.history_prev(),
            KeyCode::Down if browsing => return self.input.history_next(),
            KeyCode::Char(c) => self.input.insert(c),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            _ => return false,
        }
        true
    }

    /// Periodic housekeeping.
    pub fn tick(&mut self) {
        self.replies.retain(|handle| !handle.is_finished());
    }

    /// Recompute the layout for `area` and report transcript dimensions
    /// to the panel so scroll offsets clamp against what is drawn.
    pub fn sync_viewport(&mut self, area: Rect) {
        self.layout = ChatLayout::new(area);
        let inner = transcript_block(&self.config.title).inner(self.layout.transcript);

        let mut panel = self.panel.lock();
        let content_height = transcript_lines(
            panel.messages(),
            inner.width,
            self.config.bubble_max_width_percent,
        )
        .len();
        panel.set_viewport(content_height, usize::from(inner.height));
    }

    fn page_height(&self) -> usize {
        let inner = transcript_block(&self.config.title).inner(self.layout.transcript);
        usize::from(inner.height).max(1)
    }

    /// Cancel replies that have not fired yet.
    pub fn shutdown(&mut self) {
        let pending = self.replies.len();
        for handle in self.replies.drain(..) {
            handle.cancel();
        }
        debug!(pending, "app shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_app, type_text};
    use crossterm::event::MouseButton;
    use mockchat_engine::Role;
    use std::time::Duration;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn click(app: &mut App, column: u16, row: u16) {
        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_submits_and_clears_input() {
        let mut app = create_test_app();
        type_text(&mut app, "hello");
        press(&mut app, KeyCode::Enter);

        assert!(app.input.is_empty());
        assert_eq!(app.panel.len(), 1);
        assert_eq!(app.pending_replies(), 1);

        tokio::time::sleep(Duration::from_millis(1001)).await;
        let messages = app.panel.messages();
        assert_eq!(messages[1].role(), Role::Assistant);
        assert_eq!(
            messages[1].text(),
            r#"This is a simulated AI response to "hello"."#
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_send_control_submits() {
        let mut app = create_test_app();
        type_text(&mut app, "clicked");

        let send = app.layout.send;
        click(&mut app, send.x + 1, send.y + 1);

        assert!(app.input.is_empty());
        assert_eq!(app.panel.messages()[0].text(), "clicked");
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_outside_send_control_does_nothing() {
        let mut app = create_test_app();
        type_text(&mut app, "stay");
        click(&mut app, 0, 0);
        assert_eq!(app.input.content(), "stay");
        assert!(app.panel.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_whitespace_submit_keeps_input() {
        let mut app = create_test_app();
        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input.content(), "   ");
        assert!(app.panel.is_empty());
        assert_eq!(app.pending_replies(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_enter_with_same_text() {
        let mut app = create_test_app();
        type_text(&mut app, "again");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "again");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.pending_replies(), 2);
        tokio::time::sleep(Duration::from_millis(1001)).await;
        assert_eq!(app.panel.lock().count(Role::User), 2);
        assert_eq!(app.panel.lock().count(Role::Assistant), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ctrl_enter_inserts_newline() {
        let mut app = create_test_app();
        type_text(&mut app, "a");
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::CONTROL));
        type_text(&mut app, "b");
        assert_eq!(app.input.content(), "a\nb");
        assert!(app.panel.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_up_recalls_history() {
        let mut app = create_test_app();
        type_text(&mut app, "first");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "second");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Up);
        assert_eq!(app.input.content(), "second");
        press(&mut app, KeyCode::Up);
        assert_eq!(app.input.content(), "first");
        press(&mut app, KeyCode::Down);
        assert_eq!(app.input.content(), "second");
    }

    #[tokio::test(start_paused = true)]
    async fn test_help_toggle_and_quit() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::F(1));
        assert!(app.show_help);

        // Any key closes help first
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_pending_replies() {
        let mut app = create_test_app();
        type_text(&mut app, "never answered");
        press(&mut app, KeyCode::Enter);
        app.shutdown();

        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(app.panel.len(), 1);
        assert_eq!(app.pending_replies(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_prunes_finished_replies() {
        let mut app = create_test_app();
        type_text(&mut app, "x");
        press(&mut app, KeyCode::Enter);
        tokio::time::sleep(Duration::from_millis(1001)).await;

        app.tick();
        assert!(app.replies.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_scrolling_detaches_and_reattaches() {
        let mut app = create_test_app();
        for i in 0..12 {
            type_text(&mut app, &format!("message {i}"));
            press(&mut app, KeyCode::Enter);
        }
        app.sync_viewport(crate::test_utils::test_area());
        assert!(app.panel.lock().is_following());

        app.handle_action(Action::PageUp);
        assert!(!app.panel.lock().is_following());

        app.handle_action(Action::JumpToEnd);
        assert!(app.panel.lock().is_following());
    }

    #[tokio::test(start_paused = true)]
    async fn test_up_without_history_scrolls_transcript() {
        let mut app = create_test_app();
        {
            let mut panel = app.panel.lock();
            for i in 0..12 {
                panel.push(mockchat_engine::Message::user(format!("message {i}")));
            }
        }
        app.sync_viewport(crate::test_utils::test_area());
        let bottom = app.panel.lock().scroll_offset();
        assert!(bottom > 0);

        press(&mut app, KeyCode::Up);
        assert_eq!(app.panel.lock().scroll_offset(), bottom - 1);
        assert!(!app.panel.lock().is_following());
        assert!(app.input.is_empty());

        press(&mut app, KeyCode::Down);
        assert_eq!(app.panel.lock().scroll_offset(), bottom);
        assert!(app.panel.lock().is_following());
    }

    #[tokio::test(start_paused = true)]
    async fn test_triggers_only_close_help() {
        let mut app = create_test_app();
        type_text(&mut app, "hello");
        let send = app.layout.send;

        app.handle_action(Action::Help);
        press(&mut app, KeyCode::Enter);
        assert!(!app.show_help);
        assert!(app.panel.is_empty());

        app.handle_action(Action::Help);
        click(&mut app, send.x + 1, send.y + 1);
        assert!(!app.show_help);
        assert!(app.panel.is_empty());
        assert_eq!(app.input.content(), "hello");

        // Help closed, the same click submits
        click(&mut app, send.x + 1, send.y + 1);
        assert_eq!(app.panel.len(), 1);
    }
}

//! Multi-line text input field.

use crate::ui::theme::{Palette, Styles};
use mockchat_engine::InputSource;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// State for a text input, managing content and cursor position.
#[derive(Debug, Clone)]
pub struct TextInputState {
    /// The text content.
    content: String,
    /// Cursor position (character index).
    cursor: usize,
    /// Submitted inputs for up/down navigation.
    history: Vec<String>,
    /// Position in history while navigating (`None` = editing the draft).
    history_index: Option<usize>,
    /// Draft saved when navigation started.
    saved_input: String,
}

impl Default for TextInputState {
    fn default() -> Self {
        Self::new()
    }
}

impl TextInputState {
    /// Create a new empty text input state.
    pub fn new() -> Self {
        Self {
            content: String::new(),
            cursor: 0,
            history: Vec::new(),
            history_index: None,
            saved_input: String::new(),
        }
    }

    /// Get the current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Check if the content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Whether the content would be accepted as a submission.
    pub fn has_text(&self) -> bool {
        !self.content.trim().is_empty()
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Byte offset of the character at `index`.
    fn byte_index(&self, index: usize) -> usize {
        self.content
            .char_indices()
            .nth(index)
            .map_or(self.content.len(), |(i, _)| i)
    }

    /// Replace the content, placing the cursor at the end.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.cursor = self.char_count();
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, ch: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, ch);
        self.cursor += 1;
    }

    /// Insert a string at the cursor position.
    pub fn insert_str(&mut self, s: &str) {
        let at = self.byte_index(self.cursor);
        self.content.insert_str(at, s);
        self.cursor += s.chars().count();
    }

    /// Delete the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Delete the character at the cursor (delete).
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Move cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    /// Move cursor to start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end.
    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Record the current content in history and clear it.
    pub fn commit(&mut self) -> String {
        let content = std::mem::take(&mut self.content);
        self.cursor = 0;
        if !content.trim().is_empty() {
            self.history.push(content.clone());
        }
        self.history_index = None;
        self.saved_input.clear();
        content
    }

    /// Whether Up/Down are currently walking through history.
    pub fn is_browsing_history(&self) -> bool {
        self.history_index.is_some()
    }

    /// Navigate to the previous history entry.
    ///
    /// Returns `false` when there is no older entry to move to.
    pub fn history_prev(&mut self) -> bool {
        let next = match self.history_index {
            None if self.history.is_empty() => return false,
            None => {
                self.saved_input = self.content.clone();
                0
            }
            Some(i) if i + 1 < self.history.len() => i + 1,
            Some(_) => return false,
        };

        self.history_index = Some(next);
        let entry = self.history[self.history.len() - 1 - next].clone();
        self.set_content(entry);
        true
    }

    /// Navigate to the next history entry, restoring the draft at the end.
    ///
    /// Returns `false` when not browsing history.
    pub fn history_next(&mut self) -> bool {
        match self.history_index {
            None => return false,
            Some(0) => {
                self.history_index = None;
                let draft = std::mem::take(&mut self.saved_input);
                self.set_content(draft);
            }
            Some(i) => {
                self.history_index = Some(i - 1);
                let entry = self.history[self.history.len() - i].clone();
                self.set_content(entry);
            }
        }
        true
    }
}

impl InputSource for TextInputState {
    fn value(&self) -> String {
        self.content.clone()
    }

    fn clear(&mut self) {
        self.commit();
    }
}

const PROMPT: &str = "> ";
const PLACEHOLDER: &str = "Type your message here...";

/// Bordered input field rendering a [`TextInputState`].
pub struct TextInput<'a> {
    state: &'a TextInputState,
    focused: bool,
}

impl<'a> TextInput<'a> {
    pub fn new(state: &'a TextInputState) -> Self {
        Self {
            state,
            focused: true,
        }
    }

    /// Set focus state.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Build display lines; returns them with the index of the cursor line.
    fn build_lines(&self) -> (Vec<Line<'static>>, usize) {
        let prompt_len = PROMPT.chars().count();

        if self.state.is_empty() {
            let mut spans = vec![Span::styled(PROMPT, Styles::input())];
            if self.focused {
                spans.push(Span::styled("_", Styles::input()));
            }
            spans.push(Span::styled(PLACEHOLDER, Styles::placeholder()));
            return (vec![Line::from(spans)], 0);
        }

        let mut lines = Vec::new();
        let mut current = PROMPT.to_string();
        let mut cursor_line = 0;
        let mut cursor_drawn = false;

        for (index, ch) in self.state.content().chars().enumerate() {
            if self.focused && index == self.state.cursor() && !cursor_drawn {
                current.push(if ch == '\n' { '_' } else { '|' });
                cursor_line = lines.len();
                cursor_drawn = true;
            }
            if ch == '\n' {
                lines.push(Line::styled(std::mem::take(&mut current), Styles::input()));
                // Continuation lines are indented to the prompt
                current.push_str(&" ".repeat(prompt_len));
            } else {
                current.push(ch);
            }
        }

        if self.focused && !cursor_drawn {
            current.push('_');
            cursor_line = lines.len();
        }
        lines.push(Line::styled(current, Styles::input()));

        (lines, cursor_line)
    }
}

impl Widget for TextInput<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Styles::border_active()
        } else {
            Styles::border()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Styles::input().bg(Palette::SURFACE));

        let inner_height = block.inner(area).height as usize;
        let (lines, cursor_line) = self.build_lines();

        // Keep the cursor line visible
        let scroll = if lines.len() <= inner_height {
            0
        } else {
            cursor_line.saturating_sub(inner_height.saturating_sub(1))
        };

        Paragraph::new(lines)
            .block(block)
            .scroll((scroll.min(u16::MAX as usize) as u16, 0))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    #[test]
    fn test_text_input_state_basic() {
        let mut state = TextInputState::new();
        assert!(state.is_empty());

        state.insert('H');
        state.insert('i');
        assert_eq!(state.content(), "Hi");
        assert_eq!(state.cursor(), 2);

        state.backspace();
        assert_eq!(state.content(), "H");
    }

    #[test]
    fn test_text_input_state_cursor_movement() {
        let mut state = TextInputState::new();
        state.insert_str("Hello");

        state.move_left();
        state.move_left();
        assert_eq!(state.cursor(), 3);

        state.insert('X');
        assert_eq!(state.content(), "HelXlo");

        state.move_home();
        state.delete();
        assert_eq!(state.content(), "elXlo");

        state.move_end();
        assert_eq!(state.cursor(), 5);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut state = TextInputState::new();
        state.insert_str("héllo");
        state.move_left();
        state.move_left();
        state.move_left();
        state.backspace();
        assert_eq!(state.content(), "hllo");
        state.insert('ü');
        assert_eq!(state.content(), "hüllo");
        assert_eq!(state.cursor(), 2);
    }

    #[test]
    fn test_commit_records_history() {
        let mut state = TextInputState::new();

        state.insert_str("first");
        assert_eq!(state.commit(), "first");
        assert!(state.is_empty());

        state.insert_str("second");
        state.commit();

        state.history_prev();
        assert_eq!(state.content(), "second");
        assert!(state.is_browsing_history());

        assert!(state.history_prev());
        assert_eq!(state.content(), "first");

        // Already at the oldest entry
        assert!(!state.history_prev());
        assert_eq!(state.content(), "first");

        assert!(state.history_next());
        assert_eq!(state.content(), "second");

        assert!(state.history_next());
        assert!(state.is_empty());
        assert!(!state.is_browsing_history());
        assert!(!state.history_next());
    }

    #[test]
    fn test_history_restores_draft() {
        let mut state = TextInputState::new();
        state.insert_str("sent");
        state.commit();

        state.insert_str("dra");
        state.history_prev();
        assert_eq!(state.content(), "sent");
        state.history_next();
        assert_eq!(state.content(), "dra");
    }

    #[test]
    fn test_whitespace_not_recorded() {
        let mut state = TextInputState::new();
        state.insert_str("   ");
        state.commit();
        assert!(!state.history_prev());
        assert!(state.is_empty());
    }

    #[test]
    fn test_input_source_clear_commits() {
        let mut state = TextInputState::new();
        state.insert_str("hello");
        assert_eq!(InputSource::value(&state), "hello");
        InputSource::clear(&mut state);
        assert!(state.is_empty());
        state.history_prev();
        assert_eq!(state.content(), "hello");
    }

    #[test]
    fn test_renders_placeholder_then_content() {
        let area = Rect::new(0, 0, 40, 3);

        let state = TextInputState::new();
        let mut buf = Buffer::empty(area);
        TextInput::new(&state).render(area, &mut buf);
        assert!(buffer_to_string(&buf).contains("> _Type your message here..."));

        let mut state = TextInputState::new();
        state.insert_str("hi");
        let mut buf = Buffer::empty(area);
        TextInput::new(&state).render(area, &mut buf);
        assert!(buffer_to_string(&buf).contains("> hi_"));
    }
}

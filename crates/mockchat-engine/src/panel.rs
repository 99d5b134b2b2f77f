//! Panel state: the ordered, append-only list of messages plus its view.
//!
//! Scrolling is tracked in rendered lines. The renderer reports the
//! content and viewport heights through [`Panel::set_viewport`]; the
//! panel only stores the numbers and clamps the offset against them.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::warn;

use crate::message::{Message, Role};
use crate::sink::DisplaySink;

/// Lines scrolled per mouse wheel tick.
pub const SCROLL_SPEED: usize = 3;

/// Ordered chat history with scroll state.
#[derive(Debug)]
pub struct Panel {
    /// All messages in append order.
    messages: Vec<Message>,
    /// First visible rendered line.
    scroll_offset: usize,
    /// Whether the view sticks to the newest line.
    follow: bool,
    /// Total rendered lines, as last reported by the renderer.
    content_height: usize,
    /// Visible lines, as last reported by the renderer.
    viewport_height: usize,
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel {
    /// Create an empty panel that follows new messages.
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            scroll_offset: 0,
            follow: true,
            content_height: 0,
            viewport_height: 0,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn is_following(&self) -> bool {
        self.follow
    }

    /// Number of messages with the given role.
    pub fn count(&self, role: Role) -> usize {
        self.messages.iter().filter(|m| m.role() == role).count()
    }

    /// Append a message. Existing messages are never touched.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Largest valid scroll offset for the reported dimensions.
    pub fn max_scroll(&self) -> usize {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Jump to the maximum scroll offset and resume following.
    pub fn scroll_to_bottom(&mut self) {
        self.follow = true;
        self.scroll_offset = self.max_scroll();
    }

    /// Scroll towards older messages. Stops following.
    pub fn scroll_up(&mut self, lines: usize) {
        if self.max_scroll() == 0 {
            return;
        }
        self.follow = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    /// Scroll towards newer messages. Reaching the end resumes following.
    pub fn scroll_down(&mut self, lines: usize) {
        let max = self.max_scroll();
        self.scroll_offset = (self.scroll_offset + lines).min(max);
        if self.scroll_offset == max {
            self.follow = true;
        }
    }

    /// Record the renderer's current content and viewport heights.
    ///
    /// While following, the offset tracks the bottom; otherwise it is
    /// clamped so a shrinking transcript never leaves it past the end.
    pub fn set_viewport(&mut self, content_height: usize, viewport_height: usize) {
        self.content_height = content_height;
        self.viewport_height = viewport_height;
        if self.follow {
            self.scroll_offset = self.max_scroll();
        } else {
            self.scroll_offset = self.scroll_offset.min(self.max_scroll());
        }
    }

    /// Plain `role: text` transcript, one message per line.
    pub fn transcript(&self) -> String {
        self.messages
            .iter()
            .map(|m| format!("{}: {}", m.role(), m.text()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A panel shared between the controller, its timers, and the renderer.
#[derive(Debug, Clone, Default)]
pub struct SharedPanel {
    inner: Arc<Mutex<Panel>>,
}

impl SharedPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the panel.
    ///
    /// A poisoned lock is recovered: every critical section is a single
    /// push or offset update, so the panel is consistent either way.
    pub fn lock(&self) -> MutexGuard<'_, Panel> {
        self.inner.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            warn!("panel lock was poisoned; recovering");
            poisoned.into_inner()
        })
    }

    /// Copy of all messages in display order.
    pub fn messages(&self) -> Vec<Message> {
        self.lock().messages().to_vec()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl DisplaySink for SharedPanel {
    fn append(&self, message: Message) {
        self.lock().push(message);
    }

    fn scroll_to_bottom(&self) {
        self.lock().scroll_to_bottom();
    }
}

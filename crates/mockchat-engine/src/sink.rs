//! Collaborator seams for the chat controller.
//!
//! The controller never touches a rendering surface or a text field
//! directly. It talks to a [`DisplaySink`] for output and an
//! [`InputSource`] for the current draft.

use crate::message::Message;

/// Append-only output surface for chat messages.
///
/// Methods take `&self` because the controller and every pending reply
/// timer hold the same sink.
pub trait DisplaySink: Send + Sync + 'static {
    /// Append a message after every message already shown.
    fn append(&self, message: Message);

    /// Scroll the surface to its maximum scroll offset.
    fn scroll_to_bottom(&self);
}

impl<S: DisplaySink + ?Sized> DisplaySink for std::sync::Arc<S> {
    fn append(&self, message: Message) {
        (**self).append(message);
    }

    fn scroll_to_bottom(&self) {
        (**self).scroll_to_bottom();
    }
}

/// The text field a submission is read from.
pub trait InputSource {
    /// Current raw value of the field.
    fn value(&self) -> String;

    /// Empty the field.
    fn clear(&mut self);
}

impl InputSource for String {
    fn value(&self) -> String {
        self.clone()
    }

    fn clear(&mut self) {
        String::clear(self);
    }
}

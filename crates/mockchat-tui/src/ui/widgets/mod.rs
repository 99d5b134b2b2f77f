//! Reusable widgets for the mockchat TUI.

mod help;
mod send_button;
pub mod status_bar;
pub mod text_input;
pub mod transcript;

pub use help::HelpOverlay;
pub use send_button::SendButton;
pub use status_bar::{StatusBar, CHAT_HINTS};
pub use text_input::{TextInput, TextInputState};
pub use transcript::{transcript_block, transcript_lines, Transcript};

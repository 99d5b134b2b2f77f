//! mockchat-engine: Headless chat panel controller
//!
//! This crate provides the core of mockchat, including:
//! - Message and panel state
//! - Display sink and input source seams
//! - One-shot reply timers with cancellable handles
//! - The chat controller and its simulated responder
//! - Configuration

pub mod config;
pub mod controller;
pub mod message;
pub mod panel;
pub mod responder;
pub mod sink;
pub mod timer;

// Re-export commonly used types
pub use config::{Config, ConfigError, CONFIG_DIR, CONFIG_FILE};
pub use controller::{ChatController, ReplyHandle, Trigger};
pub use message::{Message, Role};
pub use panel::{Panel, SharedPanel, SCROLL_SPEED};
pub use responder::{Responder, SimulatedResponder, DEFAULT_REPLY_TEMPLATE};
pub use sink::{DisplaySink, InputSource};
pub use timer::{schedule_once, TimerHandle};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

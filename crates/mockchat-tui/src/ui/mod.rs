//! UI module for the mockchat TUI.

pub mod layout;
pub mod theme;
pub mod widgets;

pub use layout::*;

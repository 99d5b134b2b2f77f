//! Theme and styling definitions for the mockchat TUI.

use ratatui::style::{Color, Modifier, Style};

/// Color palette for the TUI.
pub struct Palette;

impl Palette {
    // Base colors
    pub const BG: Color = Color::Rgb(14, 17, 23); // #0e1117
    pub const SURFACE: Color = Color::Rgb(22, 27, 34); // #161b22
    pub const FG: Color = Color::Rgb(224, 230, 240); // #e0e6f0
    pub const DIM: Color = Color::Rgb(125, 133, 144);

    // Accent colors
    pub const ACCENT: Color = Color::Rgb(31, 111, 235); // #1f6feb
    pub const ACCENT_PRESSED: Color = Color::Rgb(21, 88, 176); // #1558b0

    // Bubbles
    pub const USER_BUBBLE: Color = Color::Rgb(31, 111, 235); // #1f6feb
    pub const USER_TEXT: Color = Color::Rgb(255, 255, 255);
    pub const ASSISTANT_BUBBLE: Color = Color::Rgb(45, 47, 51); // #2d2f33
    pub const ASSISTANT_TEXT: Color = Color::Rgb(197, 198, 199); // #c5c6c7

    // Status bar colors
    pub const STATUS_BG: Color = Color::Rgb(22, 27, 34);
    pub const STATUS_KEY_BG: Color = Color::Rgb(48, 54, 61);
    pub const WARNING: Color = Color::Rgb(240, 200, 100);

    // Border colors
    pub const BORDER: Color = Color::Rgb(48, 54, 61);
    pub const BORDER_ACTIVE: Color = Color::Rgb(31, 111, 235);
}

/// Common styles used throughout the TUI.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::BG)
    }

    /// Dimmed text for secondary information.
    pub fn dim() -> Style {
        Style::default().fg(Palette::DIM).bg(Palette::BG)
    }

    /// Input field text.
    pub fn input() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::SURFACE)
    }

    /// Dimmed placeholder inside the input field.
    pub fn placeholder() -> Style {
        Style::default().fg(Palette::DIM).bg(Palette::SURFACE)
    }

    /// Title text.
    pub fn title() -> Style {
        Style::default()
            .fg(Palette::FG)
            .bg(Palette::BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Default border style.
    pub fn border() -> Style {
        Style::default().fg(Palette::BORDER).bg(Palette::BG)
    }

    /// Active/focused border style.
    pub fn border_active() -> Style {
        Style::default().fg(Palette::BORDER_ACTIVE).bg(Palette::BG)
    }

    /// Bubble body for user messages.
    pub fn user_bubble() -> Style {
        Style::default()
            .fg(Palette::USER_TEXT)
            .bg(Palette::USER_BUBBLE)
    }

    /// Bubble body for assistant messages.
    pub fn assistant_bubble() -> Style {
        Style::default()
            .fg(Palette::ASSISTANT_TEXT)
            .bg(Palette::ASSISTANT_BUBBLE)
    }

    /// Send control.
    pub fn button() -> Style {
        Style::default()
            .fg(Palette::USER_TEXT)
            .bg(Palette::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Send control while disabled (empty input).
    pub fn button_idle() -> Style {
        Style::default().fg(Palette::DIM).bg(Palette::ACCENT_PRESSED)
    }

    /// Status bar background.
    pub fn status_bar() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::STATUS_BG)
    }

    /// Key hint in status bar.
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Palette::FG)
            .bg(Palette::STATUS_KEY_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Key label in status bar.
    pub fn key_label() -> Style {
        Style::default().fg(Palette::DIM).bg(Palette::STATUS_BG)
    }

    /// Pending reply indicator.
    pub fn pending() -> Style {
        Style::default().fg(Palette::WARNING).bg(Palette::STATUS_BG)
    }
}

//! mockchat-tui: Terminal UI for the mockchat chat panel
//!
//! This crate provides the TUI layer for mockchat, including:
//! - The chat screen with message bubbles and an input row
//! - Keyboard and mouse handling for the send triggers
//! - Headless mode for testing and automation

mod app;
mod event;
pub mod headless;
mod screens;
#[cfg(test)]
pub mod test_utils;
mod ui;

use screens::{chat::ChatScreen, Screen as ScreenTrait};

pub use app::App;
pub use event::{Action, Event, EventHandler};
pub use mockchat_engine;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mockchat_engine::Config;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use tracing::info;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// Sets up the terminal, runs the event loop, and restores the terminal
/// on exit. Must be called from within a tokio runtime.
pub async fn run_tui(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal with RAII guard for cleanup
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut events = EventHandler::new(config.tick_rate());
    let mut app = App::new(config);
    info!("tui started");

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    // Restore cursor before guard drops
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            app.sync_viewport(area);
            ChatScreen.render(app, area, frame.buffer_mut());
        })?;

        if app.should_quit {
            app.shutdown();
            break;
        }

        match events.next().await {
            Some(event) => handle_event(app, event),
            // Input thread is gone; nothing more can arrive
            None => app.should_quit = true,
        }
    }

    info!(messages = app.panel.len(), "tui stopped");
    Ok(())
}

/// Route one event to the app. Shared by the terminal and headless loops.
pub(crate) fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) => app.handle_key(key),
        Event::Mouse(mouse) => app.handle_mouse(mouse),
        Event::Tick => app.tick(),
        // The next draw picks up the new size
        Event::Resize(_, _) => {}
    }
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

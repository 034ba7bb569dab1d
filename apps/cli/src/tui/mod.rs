//! Ratatui-based terminal UI for News Explorer.
//!
//! Layout:
//! - Header: app name, Home / Saved articles tabs, account
//! - Body: search and results (Home) or the saved-articles page
//! - Footer: key hints and the demo account banner
//!
//! Login / register modals and notices render on top. All state lives in the
//! orchestrator; this module only draws it and forwards key presses.

mod app;
mod components;
mod event;
pub mod theme;
mod ui;

use app::App;
pub use theme::ThemeMode;

use crate::context::AppContext;
use anyhow::Result;
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, panic};
use tokio::sync::mpsc::error::TryRecvError;

/// Restore terminal to normal state.
/// This is called both on normal exit and on panic.
fn restore_terminal() {
    // Each step independently; one failure must not prevent the others.
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}

/// Install a panic hook that restores the terminal before displaying the panic message.
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));
}

/// Run the TUI for the profile described by `ctx`.
pub async fn run(ctx: &AppContext, theme_mode: ThemeMode) -> Result<()> {
    // Build services before touching the terminal so errors print normally.
    let orchestrator = ctx.orchestrator()?;

    install_panic_hook();

    let result = run_with_terminal(App::new(orchestrator, theme_mode)).await;

    // Always restore, even if setup failed partway through.
    restore_terminal();

    result
}

async fn run_with_terminal(mut app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    run_app(&mut terminal, &mut app).await
}

/// Main application loop.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    // Show the loading placeholder while the stored session is resolved.
    terminal.draw(|f| ui::render(f, app))?;
    app.orchestrator.initialize().await;

    loop {
        // Apply finished searches; stale ones are dropped by the orchestrator.
        loop {
            match app.search_results.try_recv() {
                Ok(completion) => app.apply_search_completion(completion),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        if app.orchestrator.search_state().is_loading() {
            app.advance_spinner();
        }

        terminal.draw(|f| ui::render(f, app))?;

        if event::handle_events(app).await? {
            break;
        }
    }

    Ok(())
}

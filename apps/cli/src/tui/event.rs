//! Keyboard event handling for the TUI.

use super::app::{App, Focus, FormField};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use session_article_orchestrator::Route;
use std::time::Duration;

/// Handle input events. Returns true if the app should quit.
pub async fn handle_events(app: &mut App) -> Result<bool> {
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                return Ok(false);
            }
            return Ok(handle_key_event(app, key).await);
        }
    }

    Ok(false)
}

/// Handle a key event. Returns true if the app should quit.
pub(crate) async fn handle_key_event(app: &mut App, key: KeyEvent) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    // A notice blocks everything until dismissed.
    if app.orchestrator.notice().is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.orchestrator.dismiss_notice();
        }
        return false;
    }

    if app.orchestrator.is_initializing() {
        return key.code == KeyCode::Char('q');
    }

    if app.orchestrator.modal().is_open() {
        handle_modal_key(app, key).await;
        return false;
    }

    app.clear_status_message();

    if app.route() == Route::Home && app.focus == Focus::SearchInput {
        handle_search_input(app, key);
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,

        // Pages
        KeyCode::Char('1') | KeyCode::Char('h') => app.navigate(Route::Home),
        KeyCode::Char('2') => app.navigate(Route::SavedNews),

        // Movement
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),

        // Search
        KeyCode::Char('/') | KeyCode::Char('i') | KeyCode::Tab => {
            app.navigate(Route::Home);
            app.focus = Focus::SearchInput;
        }
        KeyCode::Char('m') if app.route() == Route::Home => app.show_more(),

        // Saved articles
        KeyCode::Enter | KeyCode::Char('s') if app.route() == Route::Home => {
            app.toggle_selected_saved().await;
        }
        KeyCode::Char('d') | KeyCode::Delete if app.route() == Route::SavedNews => {
            app.delete_selected_saved().await;
        }

        // Account
        KeyCode::Char('l') if !app.orchestrator.is_authenticated() => app.open_login(),
        KeyCode::Char('r') if !app.orchestrator.is_authenticated() => app.open_register(),
        KeyCode::Char('o') => app.sign_out().await,

        // Help
        KeyCode::Char('?') => {
            app.set_status_message(
                "/: search | j/k: move | s: save | m: more | 1/2: pages | l: sign in | o: sign out | q: quit"
                    .to_string(),
            );
        }

        _ => {}
    }

    false
}

/// Typing into the search box on the Home page.
fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.start_search(),
        KeyCode::Esc | KeyCode::Tab | KeyCode::Down => app.focus = Focus::Results,
        KeyCode::Backspace => {
            app.search_input.pop();
        }
        KeyCode::Char(c) => app.search_input.push(c),
        _ => {}
    }
}

/// Keys while the login or register modal is open.
async fn handle_modal_key(app: &mut App, key: KeyEvent) {
    let modal = app.orchestrator.modal();
    let field = app.form.focused_field(modal);

    match key.code {
        KeyCode::Esc => app.close_modals(),
        KeyCode::Tab | KeyCode::Down => app.form.next(modal),
        KeyCode::BackTab | KeyCode::Up => app.form.prev(modal),
        KeyCode::Enter => match field {
            FormField::Submit => {
                app.submit_form().await;
            }
            FormField::Switch => app.switch_modal(),
            // Enter in a text field submits once the form is filled in.
            _ if app.form.is_complete(modal) => {
                app.submit_form().await;
            }
            _ => app.form.next(modal),
        },
        KeyCode::Backspace => {
            if let Some(buffer) = app.form.buffer_mut(field) {
                buffer.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(buffer) = app.form.buffer_mut(field) {
                buffer.push(c);
            }
        }
        _ => {}
    }
}

//! Main render function and layout for the TUI.

use super::app::App;
use super::components::{
    about, auth_modal, footer, header, notice, results, saved_news, search_panel,
};
use super::theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
    Frame,
};
use session_article_orchestrator::Route;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Below this width the About panel is hidden.
const ABOUT_MIN_WIDTH: u16 = 100;

/// Render the entire application.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let theme = &app.theme;

    Clear.render(area, frame.buffer_mut());
    Block::default()
        .style(Style::default().bg(theme.bg))
        .render(area, frame.buffer_mut());

    if app.orchestrator.is_initializing() {
        render_loading(frame, app, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Page
            Constraint::Length(1), // Status bar
            Constraint::Length(2), // Footer
        ])
        .split(area);

    header::render(frame, app, chunks[0]);

    match app.route() {
        Route::Home => render_home(frame, app, chunks[1]),
        Route::SavedNews => saved_news::render(frame, app, chunks[1]),
    }

    render_status_bar(frame, app, chunks[2]);
    footer::render(frame, app, chunks[3]);

    // Overlays, notice on top of everything
    auth_modal::render(frame, app);
    notice::render(frame, app);
}

fn render_home(frame: &mut Frame, app: &App, area: Rect) {
    let (main, side) = if area.width >= ABOUT_MIN_WIDTH {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(60), Constraint::Length(34)])
            .split(area);
        (columns[0], Some(columns[1]))
    } else {
        (area, None)
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(main);

    search_panel::render(frame, app, rows[0]);
    results::render(frame, app, rows[1]);

    if let Some(side) = side {
        about::render(frame, app, side);
    }
}

/// Placeholder shown while the stored session is being resolved.
fn render_loading(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Percentage(45),
        ])
        .split(area);

    let message = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("{} ", app.spinner_char()),
            Style::default().fg(theme.spinner),
        ),
        Span::styled("Loading...", Style::default().fg(theme.text_muted)),
    ]))
    .alignment(Alignment::Center);

    frame.render_widget(message, vertical[1]);
}

/// Render the status bar above the footer.
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let (text, color) = match &app.status_message {
        Some(msg) => (msg.clone(), theme.warning),
        None => (build_status_text(app), theme.text_muted),
    };

    let status = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(
            truncate_str(&text, area.width.saturating_sub(2) as usize),
            Style::default().fg(color),
        ),
    ]))
    .style(Style::default().bg(theme.bg_panel));

    frame.render_widget(status, area);
}

/// Build the default status text.
fn build_status_text(app: &App) -> String {
    let session = match app.orchestrator.current_user() {
        Some(user) => user.email.as_str(),
        None => "signed out",
    };
    let page = match app.route() {
        Route::Home => "Home",
        Route::SavedNews => "Saved articles",
    };
    format!("Session: {} | Page: {} | Press ? for help, q to quit", session, page)
}

/// Helper to create a styled block for panels.
pub fn panel_block<'a>(title: &str, is_active: bool, theme: &Theme) -> Block<'a> {
    let border_color = if is_active {
        theme.border_active
    } else {
        theme.border
    };

    let title_color = if is_active {
        theme.accent
    } else {
        theme.text_secondary
    };

    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(title_color).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(theme.bg_panel))
}

/// Truncate `s` to at most `max_width` terminal columns, ending in "..." when cut.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let (budget, ellipsis) = if max_width > 3 {
        (max_width - 3, "...")
    } else {
        (max_width, "")
    };

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str(ellipsis);
    out
}

/// Create a centered rect of given width and height within the parent area.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

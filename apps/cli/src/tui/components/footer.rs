//! Footer: demo account banner and key hints.

use crate::tui::app::{App, Focus};
use explorer_auth::{DEMO_EMAIL, DEMO_PASSWORD};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use session_article_orchestrator::Route;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let banner = if app.orchestrator.is_authenticated() {
        Line::from(Span::styled(
            " \u{a9} News Explorer, powered by NewsAPI",
            Style::default().fg(theme.text_muted),
        ))
    } else {
        Line::from(vec![
            Span::styled(" Test account: ", Style::default().fg(theme.info)),
            Span::styled(
                format!("{} / {}", DEMO_EMAIL, DEMO_PASSWORD),
                Style::default().fg(theme.text_secondary),
            ),
        ])
    };

    let hints = Line::from(Span::styled(
        format!(" {}", key_hints(app)),
        Style::default().fg(theme.text_muted),
    ));

    frame.render_widget(
        Paragraph::new(vec![banner, hints]).style(Style::default().bg(theme.bg)),
        area,
    );
}

fn key_hints(app: &App) -> &'static str {
    if app.orchestrator.modal().is_open() {
        return "Tab: next field | Enter: select | Esc: close";
    }
    match (app.route(), app.focus) {
        (Route::Home, Focus::SearchInput) => "Enter: search | Esc: results | Ctrl-C: quit",
        (Route::Home, Focus::Results) => {
            "/: search | j/k: move | s: save | m: more | 2: saved | q: quit"
        }
        (Route::SavedNews, _) => "j/k: move | d: remove | 1: home | q: quit",
    }
}

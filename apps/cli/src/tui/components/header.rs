//! Header: app name, page tabs, and the account button.

use crate::tui::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use session_article_orchestrator::Route;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(36)])
        .split(inner);

    let route = app.route();
    let tab = |label: &'static str, key: &'static str, target: Route| {
        let style = if route == target {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(theme.text_secondary)
        };
        vec![
            Span::styled(format!("[{}] ", key), Style::default().fg(theme.text_muted)),
            Span::styled(label, style),
            Span::raw("   "),
        ]
    };

    let mut spans = vec![
        Span::styled(
            " NewsExplorer",
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
    ];
    spans.extend(tab("Home", "1", Route::Home));
    // The saved page only exists for a signed-in session.
    if app.orchestrator.is_authenticated() {
        spans.extend(tab("Saved articles", "2", Route::SavedNews));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), columns[0]);

    let account = match app.orchestrator.current_user() {
        Some(user) => Line::from(vec![
            Span::styled(
                user.display_name().to_string(),
                Style::default().fg(theme.text),
            ),
            Span::styled("  [o] Sign out ", Style::default().fg(theme.text_muted)),
        ]),
        None => Line::from(vec![
            Span::styled("[l] ", Style::default().fg(theme.text_muted)),
            Span::styled(
                "Sign in ",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    };
    frame.render_widget(
        Paragraph::new(account).alignment(Alignment::Right),
        columns[1],
    );
}

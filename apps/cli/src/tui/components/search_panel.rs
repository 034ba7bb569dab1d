//! Search box and the status line under it.

use crate::tui::app::{App, Focus};
use crate::tui::ui::panel_block;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use session_article_orchestrator::SearchCondition;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let is_active = app.focus == Focus::SearchInput && !app.orchestrator.modal().is_open();
    let block = panel_block("What's going on in the world?", is_active, theme);

    let input = if app.search_input.is_empty() && !is_active {
        Span::styled("Enter topic", Style::default().fg(theme.text_muted))
    } else {
        Span::styled(app.search_input.clone(), Style::default().fg(theme.text))
    };
    let cursor = if is_active {
        Span::styled("_", Style::default().fg(theme.accent))
    } else {
        Span::raw("")
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("> ", Style::default().fg(theme.accent)),
            input,
            cursor,
        ]),
        status_line(app),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Searching / validation / nothing found / failure, in that order of precedence.
fn status_line(app: &App) -> Line<'static> {
    let theme = &app.theme;
    let state = app.orchestrator.search_state();

    if state.is_loading() {
        return Line::from(vec![
            Span::styled(
                format!("{} ", app.spinner_char()),
                Style::default().fg(theme.spinner),
            ),
            Span::styled("Searching for news...", Style::default().fg(theme.text_muted)),
        ]);
    }

    match state.condition() {
        Some(condition @ SearchCondition::Validation) => Line::from(Span::styled(
            condition.message(),
            Style::default().fg(theme.error),
        )),
        Some(condition @ SearchCondition::NoResults) => Line::from(Span::styled(
            condition.message(),
            Style::default().fg(theme.text_secondary),
        )),
        Some(condition @ SearchCondition::Failed) => Line::from(Span::styled(
            condition.message(),
            Style::default().fg(theme.error),
        )),
        None if state.has_searched() => Line::from(Span::styled(
            format!(
                "{} results for \"{}\"",
                state.articles().len(),
                state.keyword()
            ),
            Style::default().fg(theme.text_muted),
        )),
        None => Line::from(Span::styled(
            "Find the latest news on any topic and save them in your personal account.",
            Style::default().fg(theme.text_muted),
        )),
    }
}

//! Saved articles page.

use super::results::article_card;
use crate::commands::saved_heading;
use crate::tui::app::App;
use crate::tui::ui::panel_block;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let saved = app.orchestrator.saved();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(area);

    let name = app
        .orchestrator
        .current_user()
        .map(|u| u.display_name().to_string())
        .unwrap_or_default();

    let mut summary = vec![
        Line::from(Span::styled(
            "Saved articles",
            Style::default().fg(theme.text_muted),
        )),
        Line::from(Span::styled(
            saved_heading(&name, saved.len()),
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    if let Some(line) = saved.keyword_line() {
        summary.push(Line::from(Span::styled(
            line,
            Style::default().fg(theme.text_secondary),
        )));
    }
    frame.render_widget(Paragraph::new(summary), rows[0]);

    let block = panel_block("Your articles", true, theme);

    if saved.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "Nothing saved yet. Search on the Home page and press s to save.",
            Style::default().fg(theme.text_muted),
        )))
        .block(block);
        frame.render_widget(empty, rows[1]);
        return;
    }

    let inner = block.inner(rows[1]);
    frame.render_widget(block, rows[1]);

    let list_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let width = list_rows[0].width as usize;
    let items: Vec<ListItem> = saved
        .articles()
        .iter()
        .enumerate()
        .map(|(idx, article)| {
            let selected = idx == app.selected_saved && !app.orchestrator.modal().is_open();
            article_card(article, width, selected, false, theme)
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(app.selected_saved));
    frame.render_stateful_widget(List::new(items), list_rows[0], &mut list_state);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("[d] ", Style::default().fg(theme.text_muted)),
            Span::styled("Remove from saved", Style::default().fg(theme.error)),
        ])),
        list_rows[1],
    );
}

#[cfg(test)]
mod tests {
    use crate::tui::app::tests::{test_app, with_results};
    use crate::tui::ui::render;
    use explorer_auth::{DEMO_EMAIL, DEMO_PASSWORD};
    use ratatui::{backend::TestBackend, Terminal};
    use session_article_orchestrator::Route;

    #[tokio::test]
    async fn saved_page_shows_heading_and_keywords() {
        let (_dir, mut app) = test_app();
        app.orchestrator.initialize().await;
        app.open_login();
        app.form.email = DEMO_EMAIL.to_string();
        app.form.password = DEMO_PASSWORD.to_string();
        assert!(app.submit_form().await);
        with_results(&mut app, "bitcoin", 2);
        app.toggle_selected_saved().await;
        app.navigate(Route::SavedNews);

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();

        assert!(text.contains("Test User, you have 1 saved article"));
        assert!(text.contains("By keywords: bitcoin"));
        assert!(text.contains("Story 0"));
    }
}

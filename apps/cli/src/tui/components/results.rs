//! Search result cards and the "Show more" hint.

use crate::tui::app::{App, Focus};
use crate::tui::theme::Theme;
use crate::tui::ui::{panel_block, truncate_str};
use explorer_types::ArticleSummary;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

/// Lines of description shown per card.
const DESCRIPTION_LINES: usize = 2;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let is_active = app.focus == Focus::Results && !app.orchestrator.modal().is_open();
    let state = app.orchestrator.search_state();
    let articles = app.orchestrator.visible_articles();

    let block = panel_block("Search results", is_active, theme);

    if articles.is_empty() {
        let hint = if state.is_loading() {
            "Searching for news..."
        } else if state.has_searched() {
            ""
        } else {
            "Type a topic and press Enter"
        };
        let placeholder = Paragraph::new(Line::from(Span::styled(
            hint,
            Style::default().fg(theme.text_muted),
        )))
        .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let width = rows[0].width as usize;
    let items: Vec<ListItem> = articles
        .iter()
        .enumerate()
        .map(|(idx, article)| {
            let selected = is_active && idx == app.selected_result;
            let saved = app.orchestrator.is_saved(&article.url);
            article_card(article, width, selected, saved, theme)
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(app.selected_result));
    frame.render_stateful_widget(List::new(items), rows[0], &mut list_state);

    let footer = if app.orchestrator.can_show_more() {
        Line::from(vec![
            Span::styled("[m] ", Style::default().fg(theme.text_muted)),
            Span::styled("Show more", Style::default().fg(theme.accent)),
            Span::styled(
                format!("  ({} of {})", articles.len(), state.articles().len()),
                Style::default().fg(theme.text_muted),
            ),
        ])
    } else {
        let hint = if app.orchestrator.is_authenticated() {
            "[s] Save / unsave"
        } else {
            "Sign in to save articles"
        };
        Line::from(Span::styled(hint, Style::default().fg(theme.text_muted)))
    };
    frame.render_widget(Paragraph::new(footer), rows[1]);
}

/// One article card: source and date, title, description, keyword tag.
pub fn article_card(
    article: &ArticleSummary,
    width: usize,
    selected: bool,
    saved: bool,
    theme: &Theme,
) -> ListItem<'static> {
    let text_width = width.saturating_sub(4).max(10);
    let gutter = if selected { "> " } else { "  " };
    let gutter_style = Style::default().fg(theme.accent);

    let mut meta = vec![
        Span::styled(gutter, gutter_style),
        Span::styled(
            truncate_str(&article.source, text_width / 2),
            Style::default().fg(theme.text_secondary),
        ),
        Span::styled(
            format!("  {}", article.display_date()),
            Style::default().fg(theme.text_muted),
        ),
    ];
    if saved {
        meta.push(Span::styled("  * saved", Style::default().fg(theme.success)));
    }

    let mut lines = vec![Line::from(meta)];

    let title_style = if selected {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
    };
    for line in textwrap::wrap(&article.title, text_width).into_iter().take(2) {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(line.into_owned(), title_style),
        ]));
    }

    let description = textwrap::wrap(&article.description, text_width);
    let truncated = description.len() > DESCRIPTION_LINES;
    for (idx, line) in description.into_iter().take(DESCRIPTION_LINES).enumerate() {
        let mut text = line.into_owned();
        if truncated && idx + 1 == DESCRIPTION_LINES {
            text = truncate_str(&format!("{}...", text), text_width);
        }
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(text, Style::default().fg(theme.text_muted)),
        ]));
    }

    if !article.keyword.is_empty() {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!("#{}", article.keyword),
                Style::default().fg(theme.tag),
            ),
        ]));
    }

    lines.push(Line::from(""));

    let item = ListItem::new(lines);
    if selected {
        item.style(Style::default().bg(theme.bg_selection))
    } else {
        item
    }
}

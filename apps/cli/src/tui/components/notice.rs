//! Notice popup; blocks other input until dismissed.

use crate::tui::app::App;
use crate::tui::ui::centered_rect;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use session_article_orchestrator::NoticeKind;

const NOTICE_WIDTH: u16 = 56;

pub fn render(frame: &mut Frame, app: &App) {
    let Some(notice) = app.orchestrator.notice() else {
        return;
    };
    let theme = &app.theme;

    let text_width = NOTICE_WIDTH.saturating_sub(4) as usize;
    let wrapped = textwrap::wrap(&notice.message, text_width);
    // Message, blank line, hint, borders.
    let height = wrapped.len() as u16 + 4;
    let area = centered_rect(NOTICE_WIDTH, height, frame.area());

    frame.render_widget(Clear, area);

    let color = match notice.kind {
        NoticeKind::Auth => theme.error,
        NoticeKind::Storage => theme.warning,
    };

    let mut lines: Vec<Line> = wrapped
        .into_iter()
        .map(|l| Line::from(Span::styled(l.into_owned(), Style::default().fg(theme.text))))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("[Enter]", Style::default().fg(theme.text_muted)),
        Span::styled(" OK", Style::default().fg(theme.text_secondary)),
    ]));

    let block = Block::default()
        .title(format!(" {} ", notice.title()))
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(theme.bg_panel));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

//! About panel beside the search results.

use crate::tui::app::App;
use crate::tui::ui::panel_block;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

const ABOUT_TEXT: &str = "News Explorer searches recent headlines from thousands of sources. \
Sign in to keep the articles worth reading; they stay in your profile between runs.";

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let block = panel_block("About", false, theme);

    let lines = vec![
        Line::from(Span::styled(ABOUT_TEXT, Style::default().fg(theme.text_secondary))),
        Line::from(""),
        Line::from(Span::styled(
            "Powered by NewsAPI.",
            Style::default().fg(theme.text_muted),
        )),
    ];

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

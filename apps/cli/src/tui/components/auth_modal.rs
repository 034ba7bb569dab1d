//! Login and register modals.

use crate::tui::app::{App, AuthForm, FormField};
use crate::tui::theme::Theme;
use crate::tui::ui::{centered_rect, truncate_str};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use session_article_orchestrator::ModalVisibility;

const MODAL_WIDTH: u16 = 50;

/// Render the open modal, if any.
pub fn render(frame: &mut Frame, app: &App) {
    let modal = app.orchestrator.modal();
    let title = match modal {
        ModalVisibility::Login => " Sign in ",
        ModalVisibility::Register => " Sign up ",
        ModalVisibility::None => return,
    };

    let theme = &app.theme;
    let fields = AuthForm::fields(modal);
    // Two rows per field plus borders and the close hint.
    let height = fields.len() as u16 * 2 + 4;
    let area = centered_rect(MODAL_WIDTH, height, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_active))
        .style(Style::default().bg(theme.bg_panel));
    frame.render_widget(block, area);

    let inner = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    };

    let lines = build_form_lines(app, modal, inner.width as usize, theme);
    frame.render_widget(Paragraph::new(lines), inner);
}

fn build_form_lines(
    app: &App,
    modal: ModalVisibility,
    width: usize,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let form = &app.form;
    let focused = form.focused_field(modal);
    let mut lines = Vec::new();

    for &field in AuthForm::fields(modal) {
        let is_focused = field == focused;
        let prefix = if is_focused { "> " } else { "  " };

        if field.is_text() {
            let (label, value, placeholder) = match field {
                FormField::Email => ("Email", form.email.clone(), "Enter email"),
                FormField::Password => (
                    "Password",
                    "*".repeat(form.password.chars().count()),
                    "Enter password",
                ),
                _ => ("Username", form.name.clone(), "Enter your username"),
            };
            lines.push(Line::from(Span::styled(
                format!("{}{}", prefix, label),
                Style::default().fg(if is_focused {
                    theme.accent
                } else {
                    theme.text_secondary
                }),
            )));
            let value_span = if value.is_empty() {
                Span::styled(placeholder, Style::default().fg(theme.text_muted))
            } else {
                Span::styled(
                    truncate_str(&value, width.saturating_sub(4)),
                    Style::default().fg(theme.text),
                )
            };
            let cursor = if is_focused { "_" } else { "" };
            lines.push(Line::from(vec![
                Span::raw("  "),
                value_span,
                Span::styled(cursor, Style::default().fg(theme.accent)),
            ]));
            continue;
        }

        let line = match field {
            FormField::Submit => {
                let label = if modal == ModalVisibility::Register {
                    "Sign up"
                } else {
                    "Sign in"
                };
                let style = if !form.is_complete(modal) {
                    Style::default().fg(theme.text_muted)
                } else if is_focused {
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
                };
                Line::from(Span::styled(format!("{}[ {} ]", prefix, label), style))
            }
            _ => {
                let link = if modal == ModalVisibility::Register {
                    "Sign in"
                } else {
                    "Sign up"
                };
                let link_style = if is_focused {
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::UNDERLINED | Modifier::BOLD)
                } else {
                    Style::default().fg(theme.accent)
                };
                Line::from(vec![
                    Span::styled(prefix, Style::default().fg(theme.accent)),
                    Span::styled("or ", Style::default().fg(theme.text_secondary)),
                    Span::styled(link, link_style),
                ])
            }
        };
        lines.push(Line::from(""));
        lines.push(line);
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("[Esc]", Style::default().fg(theme.text_muted)),
        Span::styled(" Close  ", Style::default().fg(theme.text_secondary)),
        Span::styled("[Tab]", Style::default().fg(theme.text_muted)),
        Span::styled(" Next field", Style::default().fg(theme.text_secondary)),
    ]));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::tests::test_app;

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn password_is_masked() {
        let (_dir, mut app) = test_app();
        app.open_login();
        app.form.email = "ann@example.com".to_string();
        app.form.password = "hunter2".to_string();

        let rendered = text(&build_form_lines(&app, ModalVisibility::Login, 40, &app.theme));

        assert!(rendered.contains("ann@example.com"));
        assert!(rendered.contains("*******"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn register_form_has_username_and_sign_in_link() {
        let (_dir, mut app) = test_app();
        app.open_register();

        let rendered = text(&build_form_lines(&app, ModalVisibility::Register, 40, &app.theme));

        assert!(rendered.contains("Username"));
        assert!(rendered.contains("or Sign in"));
        assert!(rendered.contains("[ Sign up ]"));
    }
}

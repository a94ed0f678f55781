use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::auth::{self, LoginField};
use crate::tui::app::App;

use super::helpers::{centered_rect_fixed, fit, panel};

const BOX_W: u16 = 64;
const BOX_H: u16 = 20;
const FIELD_W: usize = 36;

/// Full-screen sign-in form with the demo accounts listed below it
pub fn render_login_view(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let form = &app.login;
    let rect = centered_rect_fixed(BOX_W, BOX_H, area);

    let label = |text: &'static str| Span::styled(text, Style::default().fg(theme.dim).bg(bg));
    let error_line = |field: Option<LoginField>| -> Line<'static> {
        match &form.error {
            Some(e) if e.field() == field => Line::from(Span::styled(
                format!("  {}", e),
                Style::default().fg(theme.red).bg(bg),
            )),
            _ => Line::from(""),
        }
    };
    let field_line = |name: &'static str, value: String, field: LoginField| -> Line<'static> {
        let focused = form.focus == field;
        let style = if focused {
            Style::default().fg(theme.text_bright).bg(theme.selection_bg)
        } else {
            Style::default().fg(theme.text).bg(theme.surface)
        };
        let marker = if focused { "\u{25B8} " } else { "  " };
        let cursor = if focused { "\u{258C}" } else { "" };
        Line::from(vec![
            Span::styled(marker, Style::default().fg(theme.highlight).bg(bg)),
            label(name),
            Span::styled(fit(&format!("{}{}", value, cursor), FIELD_W), style),
        ])
    };

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            "  Enterprise Dashboard",
            Style::default()
                .fg(theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(label("  Sign in to your account")),
        Line::from(""),
        field_line("Username  ", form.username.clone(), LoginField::Username),
        error_line(Some(LoginField::Username)),
        field_line(
            "Password  ",
            "\u{2022}".repeat(form.password.chars().count()),
            LoginField::Password,
        ),
        error_line(Some(LoginField::Password)),
        error_line(None),
        Line::from(label("  Enter sign in  Tab switch field  Ctrl+Q quit")),
        Line::from(""),
        Line::from(Span::styled(
            "  Demo accounts",
            Style::default().fg(theme.text_bright).bg(bg),
        )),
    ];
    for (i, cred) in auth::demo_credentials().iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  F{} ", i + 1),
                Style::default().fg(theme.highlight).bg(bg),
            ),
            Span::styled(
                format!("{:<7}", cred.role.label()),
                Style::default().fg(theme.purple).bg(bg),
            ),
            Span::styled(
                format!("{} / {}", cred.username, cred.password),
                Style::default().fg(theme.text).bg(bg),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::styled(" ".repeat(12), Style::default().bg(bg)),
            label(cred.description),
        ]));
    }

    let block = panel(theme, "Sign in");
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

#[cfg(test)]
mod tests {
    use super::super::test_helpers::*;
    use crate::ops::auth::AuthError;

    #[test]
    fn password_is_masked() {
        let mut app = test_app();
        app.login.username = "admin@example.com".into();
        app.login.password = "secret".into();
        let out = render_app(&app);
        assert!(out.contains("admin@example.com"));
        assert!(out.contains("\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}"));
        assert!(!out.contains("secret"));
    }

    #[test]
    fn field_error_sits_under_its_field() {
        let mut app = test_app();
        app.login.error = Some(AuthError::MissingPassword);
        let out = render_app(&app);
        let lines: Vec<&str> = out.lines().collect();
        let pw = lines.iter().position(|l| l.contains("Password")).unwrap();
        assert!(lines[pw + 1].contains("Password is required"));
    }

    #[test]
    fn lists_demo_accounts() {
        let out = render_app(&test_app());
        assert!(out.contains("F1 Admin  admin@example.com / admin123"));
        assert!(out.contains("F3 Sales  sales@example.com / sales123"));
        assert!(out.contains("Full system access"));
    }
}

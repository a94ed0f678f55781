use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

use super::helpers::spans_width;

/// Render the header: app name, current view and the signed-in user,
/// with a separator line below
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title row
            Constraint::Length(1), // separator
        ])
        .split(area);

    render_title_row(frame, app, chunks[0]);

    let sep = Paragraph::new(Line::from(Span::styled(
        "\u{2500}".repeat(area.width as usize),
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    )));
    frame.render_widget(sep, chunks[1]);
}

fn render_title_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let bg_style = Style::default().bg(bg);
    let width = area.width as usize;

    let mut spans: Vec<Span> = vec![
        Span::styled(" ", bg_style),
        Span::styled("\u{25B6}", Style::default().fg(app.theme.purple).bg(bg)),
        Span::styled(
            " Enterprise Dashboard ",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("\u{2502}", Style::default().fg(app.theme.dim).bg(bg)),
        Span::styled(
            format!(" {}", app.view().title()),
            Style::default().fg(app.theme.highlight).bg(bg),
        ),
    ];

    // Right side: user badge and theme
    let mut right: Vec<Span> = Vec::new();
    if let Some(user) = app.state.user() {
        right.push(Span::styled(
            format!("[{}] ", user.avatar),
            Style::default().fg(app.theme.purple).bg(bg),
        ));
        right.push(Span::styled(
            user.name.clone(),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
        right.push(Span::styled(
            format!(" ({})", user.role),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }
    right.push(Span::styled(
        format!("  {} ", app.state.ui.theme.label()),
        Style::default().fg(app.theme.dim).bg(bg),
    ));

    let used = spans_width(&spans) + spans_width(&right);
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), bg_style));
        spans.extend(right);
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
}

#[cfg(test)]
mod tests {
    use super::super::test_helpers::*;
    use super::*;

    #[test]
    fn header_shows_view_and_user() {
        let app = app_signed_in("sales@example.com", "sales123");
        let out = render_to_string(TERM_W, 2, |frame, area| {
            render_header(frame, &app, area);
        });
        let first = out.lines().next().unwrap();
        assert!(first.contains("Enterprise Dashboard"));
        assert!(first.contains("Dashboard"));
        assert!(first.contains("(Sales)"));
        assert!(first.ends_with("dark"));
        assert!(out.lines().nth(1).unwrap().starts_with("\u{2500}"));
    }
}

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::View;
use crate::ops::kanban;
use crate::tui::app::{App, Mode, SearchTarget};

use super::helpers::spans_width;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let dim = Style::default().fg(app.theme.dim).bg(bg);

    let (mut spans, hint): (Vec<Span>, &str) = match app.mode {
        Mode::Navigate => {
            let mut spans = Vec::new();
            if app.view() == View::Kanban && !app.board_search.is_empty() {
                spans.push(Span::styled(format!("/{}", app.board_search), dim));
            }
            if app.view() == View::Dashboard && !app.company_query.is_empty() {
                spans.push(Span::styled(format!("companies: {}", app.company_query), dim));
            }
            (spans, navigate_hint(app.view()))
        }
        Mode::Search => {
            let prefix = match app.search_target {
                SearchTarget::Board => "/",
                SearchTarget::Companies => "company: ",
            };
            (
                vec![
                    Span::styled(
                        format!("{}{}", prefix, app.search_input),
                        Style::default().fg(app.theme.text_bright).bg(bg),
                    ),
                    // ▌ cursor
                    Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)),
                ],
                "Enter search  Esc cancel",
            )
        }
        Mode::Move => {
            let mut spans = vec![Span::styled(
                "-- MOVE --",
                Style::default().fg(app.theme.yellow).bg(bg),
            )];
            if let Some(moving) = &app.moving
                && let Some(task) = app.state.task_by_id(&moving.task_id)
            {
                let target = kanban::columns()
                    .get(moving.target)
                    .map_or("", |c| c.title);
                spans.push(Span::styled(
                    format!(" {} \u{2192} {}", task.title, target),
                    Style::default().fg(app.theme.text).bg(bg),
                ));
            }
            (spans, "h/l column  Enter drop  Esc cancel")
        }
        Mode::Edit => (
            vec![Span::styled(
                "-- EDIT --",
                Style::default().fg(app.theme.highlight).bg(bg),
            )],
            "Tab next  \u{2190}\u{2192} choose  Enter save  Esc cancel",
        ),
        Mode::Confirm => (Vec::new(), "y confirm  n cancel"),
        Mode::Profile => (
            vec![Span::styled(
                "-- EDIT --",
                Style::default().fg(app.theme.highlight).bg(bg),
            )],
            "Enter done  Esc revert",
        ),
    };

    let hint = if app.config.ui.show_key_hints { hint } else { "" };
    let content_width = spans_width(&spans);
    let hint_width = hint.chars().count();
    if !hint.is_empty() && content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, dim));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn navigate_hint(view: View) -> &'static str {
    match view {
        View::Kanban => "hjkl move  n new  e edit  space grab  / search  f/p filter  ? help",
        View::Dashboard => "/ companies  x dismiss alert  1-5 views  ? help",
        View::Settings => "j/k select  Enter change  ? help",
        View::Users => "j/k select  ? help",
        View::Reports | View::Login => "? help",
    }
}

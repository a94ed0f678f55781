pub mod confirm_popup;
pub mod dashboard_view;
pub mod header;
pub mod help_overlay;
pub mod kanban_view;
pub mod login_view;
pub mod reports_view;
pub mod settings_view;
pub mod sidebar;
pub mod status_row;
pub mod task_modal;
pub mod toast;
pub mod users_view;

mod helpers;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use regex::Regex;

use crate::model::View;

use super::app::{App, Mode};

/// Width of the sidebar when open
const SIDEBAR_W: u16 = 24;

/// Draw the whole screen for the current view and mode
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    if app.view() == View::Login {
        login_view::render_login_view(frame, app, area);
        toast::render_toast(frame, app, area);
        return;
    }

    // Layout: header (2 rows) | body | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // header + separator
            Constraint::Min(1),    // body
            Constraint::Length(1), // status row
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);

    let content = if app.state.ui.sidebar_open {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_W), Constraint::Min(1)])
            .split(chunks[1]);
        sidebar::render_sidebar(frame, app, cols[0]);
        cols[1]
    } else {
        chunks[1]
    };

    match app.view() {
        View::Dashboard => dashboard_view::render_dashboard_view(frame, app, content),
        View::Kanban => kanban_view::render_kanban_view(frame, app, content),
        View::Settings => settings_view::render_settings_view(frame, app, content),
        View::Users => users_view::render_users_view(frame, app, content),
        View::Reports => reports_view::render_reports_view(frame, app, content),
        View::Login => {}
    }

    // Modals (rendered on top of the view)
    if app.mode == Mode::Edit && app.editor.is_some() {
        task_modal::render_task_modal(frame, app, area);
    }
    if app.mode == Mode::Confirm {
        confirm_popup::render_confirm_popup(frame, app, area);
    }

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }

    toast::render_toast(frame, app, chunks[1]);
    status_row::render_status_row(frame, app, chunks[2]);
}

/// Push spans for text with regex match highlighting. If no regex or no matches,
/// pushes a single span with `base_style`. Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let re = match search_re {
        Some(r) => r,
        None => {
            spans.push(Span::styled(text.to_string(), base_style));
            return;
        }
    };

    let mut last_end = 0;
    let mut has_match = false;
    for m in re.find_iter(text) {
        has_match = true;
        if m.start() > last_end {
            spans.push(Span::styled(
                text[last_end..m.start()].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(
            text[m.start()..m.end()].to_string(),
            highlight_style,
        ));
        last_end = m.end();
    }
    if !has_match {
        spans.push(Span::styled(text.to_string(), base_style));
    } else if last_end < text.len() {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use super::*;

    #[test]
    fn signed_out_shows_login_only() {
        let app = test_app();
        let out = render_app(&app);
        assert!(out.contains("Sign in"));
        assert!(!out.contains("Kanban"));
    }

    #[test]
    fn sidebar_can_be_hidden() {
        let mut app = app_signed_in("admin@example.com", "admin123");
        assert!(render_app(&app).contains("User Management"));
        app.state.toggle_sidebar();
        let out = render_app(&app);
        assert!(!out.contains("User Management"));
        assert!(out.contains("Dashboard"));
    }

    #[test]
    fn highlighted_spans_split_on_matches() {
        let re = Regex::new("(?i)bud").unwrap();
        let mut spans = Vec::new();
        push_highlighted_spans(
            &mut spans,
            "Q1 Budget budget",
            Style::default(),
            Style::default(),
            Some(&re),
        );
        let parts: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(parts, vec!["Q1 ", "Bud", "get ", "bud", "get"]);
    }
}

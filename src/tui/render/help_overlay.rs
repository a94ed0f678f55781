use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::View;
use crate::ops::auth;
use crate::tui::app::App;

use super::helpers::centered_rect;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Center the overlay, leaving some margin
    let overlay_area = centered_rect(60, 80, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    // Context-sensitive help
    match app.view() {
        View::Kanban => {
            lines.push(Line::from(Span::styled(" Board", header_style)));
            add_binding(&mut lines, " \u{2190}\u{2192}/hl", "Move between columns", key_style, desc_style);
            add_binding(&mut lines, " \u{2191}\u{2193}/jk", "Move between cards", key_style, desc_style);
            add_binding(&mut lines, " Space", "Grab card, then h/l and Enter to drop", key_style, desc_style);
            add_binding(&mut lines, " n", "New task", key_style, desc_style);
            add_binding(&mut lines, " e/Enter", "Edit task", key_style, desc_style);
            add_binding(&mut lines, " x/Del", "Delete task", key_style, desc_style);
            add_binding(&mut lines, " /", "Search tasks", key_style, desc_style);
            add_binding(&mut lines, " f / p", "Cycle tag / priority filter", key_style, desc_style);
            add_binding(&mut lines, " c", "Clear filters", key_style, desc_style);
            lines.push(Line::from(""));
        }
        View::Dashboard => {
            lines.push(Line::from(Span::styled(" Dashboard", header_style)));
            add_binding(&mut lines, " /", "Search companies", key_style, desc_style);
            add_binding(&mut lines, " Esc", "Clear company search", key_style, desc_style);
            add_binding(&mut lines, " x", "Dismiss top alert", key_style, desc_style);
            lines.push(Line::from(""));
        }
        View::Settings => {
            lines.push(Line::from(Span::styled(" Settings", header_style)));
            add_binding(&mut lines, " \u{2191}\u{2193}/jk", "Select setting", key_style, desc_style);
            add_binding(&mut lines, " Enter", "Edit / apply", key_style, desc_style);
            add_binding(&mut lines, " \u{2190}\u{2192}/hl", "Change choice", key_style, desc_style);
            add_binding(&mut lines, " Esc", "Discard profile changes", key_style, desc_style);
            lines.push(Line::from(""));
        }
        View::Users => {
            lines.push(Line::from(Span::styled(" Users", header_style)));
            add_binding(&mut lines, " \u{2191}\u{2193}/jk", "Move cursor", key_style, desc_style);
            add_binding(&mut lines, " g/G", "Jump to top/bottom", key_style, desc_style);
            lines.push(Line::from(""));
        }
        View::Reports | View::Login => {}
    }

    // Views the user may open
    lines.push(Line::from(Span::styled(" Views", header_style)));
    for item in auth::accessible_nav_items(app.state.user()) {
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<15}", item.key), key_style),
            Span::styled(item.label, desc_style),
        ]));
    }
    add_binding(&mut lines, " Tab", "Next view", key_style, desc_style);
    lines.push(Line::from(""));

    // Global keys
    lines.push(Line::from(Span::styled(" Global", header_style)));
    add_binding(&mut lines, " ?", "Toggle this help", key_style, desc_style);
    add_binding(&mut lines, " b", "Toggle sidebar", key_style, desc_style);
    add_binding(&mut lines, " t", "Toggle dark/light theme", key_style, desc_style);
    add_binding(&mut lines, " L", "Sign out", key_style, desc_style);
    add_binding(&mut lines, " q", "Quit", key_style, desc_style);
    add_binding(&mut lines, " Ctrl+Q", "Quit (immediate)", key_style, desc_style);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 16;
    let padded_key = format!("{:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}

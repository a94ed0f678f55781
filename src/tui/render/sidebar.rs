use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::ops::auth;
use crate::tui::app::App;

use super::helpers::fit;

/// Render the navigation sidebar: one row per view the user may open
pub fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label_w = (inner.width as usize).saturating_sub(5);
    let mut lines: Vec<Line> = vec![Line::from("")];
    for item in auth::accessible_nav_items(app.state.user()) {
        let active = item.view == app.view();
        let row_bg = if active { app.theme.selection_bg } else { bg };
        let marker = if active { "\u{258E}" } else { " " };
        let label_style = if active {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(row_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(row_bg)
        };
        lines.push(Line::from(vec![
            Span::styled(
                marker,
                Style::default().fg(app.theme.selection_border).bg(row_bg),
            ),
            Span::styled(
                format!("{} ", item.key),
                Style::default().fg(app.theme.dim).bg(row_bg),
            ),
            Span::styled(format!(" {}", fit(item.label, label_w)), label_style),
        ]));
    }

    if let Some(user) = app.state.user() {
        let spare = (inner.height as usize).saturating_sub(lines.len() + 3);
        lines.extend(std::iter::repeat_n(Line::from(""), spare));
        lines.push(Line::from(Span::styled(
            format!(" {}", user.name),
            Style::default().fg(app.theme.text_bright).bg(bg),
        )));
        lines.push(Line::from(Span::styled(
            format!(" {}", user.email),
            Style::default().fg(app.theme.dim).bg(bg),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(bg)),
        inner,
    );
}

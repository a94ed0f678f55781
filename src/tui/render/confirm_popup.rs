use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use crate::model::ModalKind;
use crate::tui::app::App;

use super::helpers::centered_rect_fixed;

const POPUP_W: u16 = 52;
const POPUP_H: u16 = 8;

/// Yes/no popup for the modal recorded in the UI state
pub fn render_confirm_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(modal) = &app.state.ui.modal else {
        return;
    };
    let (title, message) = match modal.kind {
        ModalKind::ConfirmDelete => {
            let task = modal
                .task_id
                .as_deref()
                .and_then(|id| app.state.task_by_id(id))
                .map(|t| t.title.as_str())
                .unwrap_or("this task");
            (
                "Delete task",
                format!("Delete \"{}\"? This cannot be undone.", task),
            )
        }
        ModalKind::ConfirmLogout => (
            "Sign out",
            "Sign out and clear the saved session?".to_string(),
        ),
        ModalKind::ConfirmClearCache => (
            "Clear cache",
            "Reset all data to the demo defaults and sign out?".to_string(),
        ),
        ModalKind::TaskEditor => return,
    };

    let theme = &app.theme;
    let bg = theme.surface;
    let rect = centered_rect_fixed(POPUP_W, POPUP_H, area);
    frame.render_widget(Clear, rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.red).bg(bg))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));

    let key_style = Style::default()
        .fg(theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!(" {}", message),
            Style::default().fg(theme.text).bg(bg),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" y", key_style),
            Span::styled(" confirm   ", Style::default().fg(theme.dim).bg(bg)),
            Span::styled("n", key_style),
            Span::styled(" cancel", Style::default().fg(theme.dim).bg(bg)),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        rect,
    );
}

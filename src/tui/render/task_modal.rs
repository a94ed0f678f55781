use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::tui::app::{App, EditorField, EditorState};

use super::helpers::{centered_rect_fixed, fit};

const MODAL_W: u16 = 68;
const MODAL_H: u16 = 14;
const LABEL_W: usize = 13;

fn field_value(editor: &EditorState, field: EditorField) -> String {
    let draft = &editor.draft;
    match field {
        EditorField::Title => draft.title.clone(),
        EditorField::Description => draft.description.clone(),
        EditorField::Tag => draft
            .tag
            .map_or_else(|| "Select a tag".to_string(), |t| t.label().to_string()),
        EditorField::Priority => draft.priority.label().to_string(),
        EditorField::Status => draft.status.label().to_string(),
        EditorField::Due => editor.due_input.clone(),
    }
}

/// Task editor modal, drawn over the board
pub fn render_task_modal(frame: &mut Frame, app: &App, area: Rect) {
    let Some(editor) = &app.editor else {
        return;
    };
    let theme = &app.theme;
    let bg = theme.surface;
    let rect = centered_rect_fixed(MODAL_W, MODAL_H, area);
    frame.render_widget(Clear, rect);

    let title = match &editor.task_id {
        Some(id) => format!(" Edit Task {} ", id),
        None => " New Task ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.selection_border).bg(bg))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let value_w = (inner.width as usize).saturating_sub(LABEL_W + 3);
    let mut lines: Vec<Line> = vec![Line::from("")];
    for field in EditorField::ALL {
        let focused = editor.field == field;
        let mut value = field_value(editor, field);
        if focused && field.is_text() {
            value.push('\u{258C}');
        }
        if !field.is_text() {
            value = format!("\u{25C2} {} \u{25B8}", value);
        }
        let value_style = if focused {
            Style::default().fg(theme.text_bright).bg(theme.selection_bg)
        } else {
            Style::default().fg(theme.text).bg(bg)
        };
        let value_style = match field {
            EditorField::Tag if editor.draft.tag.is_none() => value_style.fg(theme.dim),
            EditorField::Tag => value_style.fg(
                editor
                    .draft
                    .tag
                    .map_or(theme.text, |t| theme.tag_color(t)),
            ),
            EditorField::Priority => value_style.fg(theme.priority_color(editor.draft.priority)),
            EditorField::Status => value_style.fg(theme.status_color(editor.draft.status)),
            _ => value_style,
        };
        lines.push(Line::from(vec![
            Span::styled(
                if focused { " \u{25B8} " } else { "   " },
                Style::default().fg(theme.selection_border).bg(bg),
            ),
            Span::styled(
                fit(field.label(), LABEL_W),
                Style::default().fg(theme.dim).bg(bg),
            ),
            Span::styled(fit(&value, value_w), value_style),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(match &editor.error {
        Some(msg) => Line::from(Span::styled(
            format!("   {}", msg),
            Style::default().fg(theme.red).bg(bg),
        )),
        None => Line::from(""),
    });
    lines.push(Line::from(Span::styled(
        "   Tab next field  \u{2190}\u{2192} change  Enter save  Esc cancel",
        Style::default().fg(theme.dim).bg(bg),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

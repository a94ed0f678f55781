use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::model::NotificationLevel;
use crate::tui::app::App;
use crate::util::unicode;

const MAX_W: u16 = 48;

fn level_icon(level: NotificationLevel) -> &'static str {
    match level {
        NotificationLevel::Success => "\u{2713}",
        NotificationLevel::Error => "\u{2717}",
        NotificationLevel::Warning => "!",
        NotificationLevel::Info => "i",
    }
}

/// Render the current toast in the bottom-right corner of `area`
pub fn render_toast(frame: &mut Frame, app: &App, area: Rect) {
    let Some(toast) = &app.toast else {
        return;
    };
    let n = &toast.notification;
    let color = app.theme.level_color(n.level);
    let bg = app.theme.surface;

    let text_w = u16::try_from(unicode::display_width(&n.message))
        .unwrap_or(u16::MAX)
        .saturating_add(4);
    let width = text_w.saturating_add(2).min(MAX_W).min(area.width);
    let height = 3.min(area.height);
    if width < 6 || height < 3 {
        return;
    }
    let rect = Rect::new(
        area.x + area.width - width,
        area.y + area.height - height,
        width,
        height,
    );

    frame.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color).bg(bg))
        .style(Style::default().bg(bg));
    let msg_w = (width as usize).saturating_sub(6);
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", level_icon(n.level)),
            Style::default().fg(color).bg(bg).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            unicode::truncate_to_width(&n.message, msg_w),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ),
    ]);
    frame.render_widget(Paragraph::new(line).block(block), rect);
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::super::test_helpers::*;
    use super::*;

    #[test]
    fn toast_shows_latest_notification() {
        let mut app = app_signed_in("admin@example.com", "admin123");
        app.state.notify(NotificationLevel::Success, "Task moved to Done");
        app.tick(Instant::now());
        let out = render_app(&app);
        assert!(out.contains("\u{2713} Task moved to Done"));
    }

    #[test]
    fn oversized_message_is_clipped_to_the_box() {
        let mut app = app_signed_in("admin@example.com", "admin123");
        let name = "N".repeat(70_000);
        app.state
            .notify(NotificationLevel::Success, format!("Welcome back, {}!", name));
        app.tick(Instant::now());
        let out = render_to_string(60, 5, |frame, area| render_toast(frame, &app, area));
        let line = out.lines().find(|l| l.contains("Welcome back")).unwrap();
        assert!(line.contains("\u{2026}"));
        assert!(unicode::display_width(line.trim_end()) <= 60);
    }

    #[test]
    fn no_toast_no_box() {
        let app = app_signed_in("admin@example.com", "admin123");
        let out = render_to_string(40, 5, |frame, area| render_toast(frame, &app, area));
        assert_eq!(out, "");
    }
}

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::analytics::{self, Share};
use crate::tui::app::App;
use crate::tui::theme::Theme;

use super::helpers::{bar, fit, panel};

/// System-wide report (admin only)
pub fn render_reports_view(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let report = analytics::report(&app.state);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // totals
            Constraint::Length(5), // by owner role
            Constraint::Min(7),    // by status
        ])
        .split(area);

    let totals = [
        ("Total Users", report.total_users.to_string()),
        ("Total Tasks", report.total_tasks.to_string()),
        ("Completed", report.completed_tasks.to_string()),
        ("Completion Rate", format!("{}%", report.completion_rate)),
    ];
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(chunks[0]);
    for ((label, value), cell) in totals.iter().zip(cells.iter()) {
        let line = Line::from(Span::styled(
            format!(" {}", value),
            Style::default()
                .fg(theme.text_bright)
                .bg(theme.background)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line).block(panel(theme, label)), *cell);
    }

    let bar_w = (area.width as usize).saturating_sub(34).max(4);
    let role_lines: Vec<Line> = report
        .by_owner_role
        .iter()
        .map(|(role, share)| share_line(theme, role.label(), *share, theme.purple, bar_w))
        .collect();
    frame.render_widget(
        Paragraph::new(role_lines).block(panel(theme, "Tasks by Owner Role")),
        chunks[1],
    );

    let status_lines: Vec<Line> = report
        .by_status
        .iter()
        .map(|(status, share)| {
            share_line(theme, status.label(), *share, theme.status_color(*status), bar_w)
        })
        .collect();
    frame.render_widget(
        Paragraph::new(status_lines).block(panel(theme, "Status Breakdown")),
        chunks[2],
    );
}

fn share_line(
    theme: &Theme,
    label: &'static str,
    share: Share,
    color: Color,
    bar_w: usize,
) -> Line<'static> {
    let bg = theme.background;
    Line::from(vec![
        Span::styled(
            format!(" {}", fit(label, 14)),
            Style::default().fg(theme.text).bg(bg),
        ),
        Span::styled(bar(share.percent, bar_w), Style::default().fg(color).bg(bg)),
        Span::styled(
            format!(" {:>3} tasks {:>3}%", share.count, share.percent),
            Style::default().fg(theme.dim).bg(bg),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::super::test_helpers::*;
    use super::*;

    #[test]
    fn report_totals_and_shares() {
        let app = app_signed_in("admin@example.com", "admin123");
        let out = render_to_string(90, 20, |frame, area| render_reports_view(frame, &app, area));
        assert!(out.contains("Completion Rate"));
        assert!(out.contains(" 20%"));
        let admin = out.lines().find(|l| l.contains(" Admin ")).unwrap();
        assert!(admin.contains("4 tasks  40%"));
        let done = out.lines().find(|l| l.contains(" Done ")).unwrap();
        assert!(done.contains("2 tasks  20%"));
    }
}

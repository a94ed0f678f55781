use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Cell, Row, Table};

use crate::ops::analytics;
use crate::tui::app::App;

use super::helpers::panel;

/// User management table (admin only)
pub fn render_users_view(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let rows_data = analytics::user_rows(&app.state);

    let header = Row::new(
        ["", "Name", "Role", "Email", "Last login", "Tasks"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD))),
    )
    .style(Style::default().fg(theme.text_bright).bg(bg));

    let rows: Vec<Row> = rows_data
        .iter()
        .enumerate()
        .map(|(i, u)| {
            let row_bg = if i == app.users_cursor {
                theme.selection_bg
            } else {
                bg
            };
            Row::new(vec![
                Cell::from(u.avatar.clone()).style(Style::default().fg(theme.purple)),
                Cell::from(u.name.clone()),
                Cell::from(u.role.label()).style(Style::default().fg(theme.highlight)),
                Cell::from(u.email.clone()),
                Cell::from(u.last_login.clone().unwrap_or_else(|| "never".to_string())),
                Cell::from(u.task_count.to_string()),
            ])
            .style(Style::default().fg(theme.text).bg(row_bg))
        })
        .collect();

    let widths = [
        Constraint::Length(3),  // avatar
        Constraint::Length(18), // Name
        Constraint::Length(6),  // Role
        Constraint::Min(20),    // Email
        Constraint::Length(11), // Last login
        Constraint::Length(5),  // Tasks
    ];
    let title = format!("Users ({})", rows_data.len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(panel(theme, &title));
    frame.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::super::test_helpers::*;
    use super::*;

    #[test]
    fn lists_every_user_with_task_counts() {
        let app = app_signed_in("admin@example.com", "admin123");
        let out = render_to_string(100, 8, |frame, area| render_users_view(frame, &app, area));
        assert!(out.contains("Users (3)"));
        let sarah = out.lines().find(|l| l.contains("Sarah Anderson")).unwrap();
        assert!(sarah.contains("sarah.anderson@enterprise.com"));
        assert!(sarah.trim_end().trim_end_matches('\u{2502}').trim_end().ends_with('4'));
        assert!(out.contains("Jessica Rivera"));
        assert!(out.contains("2024-01-14"));
    }
}

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use regex::Regex;

use crate::model::{Density, Task};
use crate::ops::kanban;
use crate::tui::app::{App, Mode};

use super::helpers::{fit, priority_symbol};
use super::push_highlighted_spans;

/// Rows a card takes, including its spacer line
fn card_height(density: Density) -> u16 {
    match density {
        Density::Compact => 1,
        Density::Normal => 3,
        Density::Spacious => 4,
    }
}

pub fn render_kanban_view(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);
    render_filter_bar(frame, app, rows[0]);

    let columns = kanban::columns();
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, columns.len() as u32); columns.len()])
        .split(rows[1]);

    let density = app
        .state
        .user()
        .map(|u| u.preferences.layout_density)
        .unwrap_or_default();
    let matcher = kanban::search_matcher(&app.board_search);
    for (i, cell) in cells.iter().enumerate() {
        render_column(frame, app, i, *cell, density, matcher.as_ref());
    }
}

/// Active filters and search, or the visible task count
fn render_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let filters = app.state.ui.kanban_filters;
    let mut spans: Vec<Span> = Vec::new();

    if let Some(tag) = filters.tag {
        spans.push(Span::styled(" tag: ", Style::default().fg(theme.dim).bg(bg)));
        spans.push(Span::styled(
            tag.label(),
            Style::default().fg(theme.tag_color(tag)).bg(bg),
        ));
    }
    if let Some(priority) = filters.priority {
        spans.push(Span::styled(" priority: ", Style::default().fg(theme.dim).bg(bg)));
        spans.push(Span::styled(
            priority.label(),
            Style::default().fg(theme.priority_color(priority)).bg(bg),
        ));
    }
    if !app.board_search.is_empty() {
        spans.push(Span::styled(
            format!(" /{}", app.board_search),
            Style::default().fg(theme.highlight).bg(bg),
        ));
    }
    let shown = kanban::filtered_tasks(&app.state, &app.board_search).len();
    if spans.is_empty() {
        spans.push(Span::styled(
            format!(" {} tasks", shown),
            Style::default().fg(theme.dim).bg(bg),
        ));
    } else {
        spans.push(Span::styled(
            format!("  ({} shown)", shown),
            Style::default().fg(theme.dim).bg(bg),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_column(
    frame: &mut Frame,
    app: &App,
    index: usize,
    area: Rect,
    density: Density,
    matcher: Option<&Regex>,
) {
    let theme = &app.theme;
    let bg = theme.background;
    let columns = kanban::columns();
    let column = columns[index];
    let tasks = app.column_tasks(index);

    let is_target = app.mode == Mode::Move && app.moving.as_ref().is_some_and(|m| m.target == index);
    let is_cursor = app.board.column == index;
    let border_color = if is_target {
        theme.yellow
    } else if is_cursor {
        theme.selection_border
    } else {
        theme.dim
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color).bg(bg))
        .title(Line::from(vec![
            Span::styled(
                format!(" {} ", column.title),
                Style::default()
                    .fg(theme.status_color(column.status))
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{} ", tasks.len()),
                Style::default().fg(theme.dim).bg(bg),
            ),
        ]))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if tasks.is_empty() {
        let hint = if is_target { " drop here" } else { " empty" };
        frame.render_widget(
            Paragraph::new(Span::styled(hint, Style::default().fg(theme.dim).bg(bg))),
            inner,
        );
        return;
    }

    // Scroll so the cursor card stays visible
    let h = card_height(density);
    let visible = (inner.height / h).max(1) as usize;
    let start = if is_cursor {
        app.board.row.saturating_sub(visible - 1)
    } else {
        0
    };

    let moving_id = app.moving.as_ref().map(|m| m.task_id.as_str());
    let mut lines: Vec<Line> = Vec::new();
    for (row, task) in tasks.iter().enumerate().skip(start).take(visible) {
        let selected = is_cursor && row == app.board.row && app.mode != Mode::Move;
        let carried = moving_id == Some(task.id.as_str());
        card_lines(app, task, inner.width as usize, density, selected, carried, matcher, &mut lines);
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

#[allow(clippy::too_many_arguments)]
fn card_lines<'a>(
    app: &App,
    task: &Task,
    width: usize,
    density: Density,
    selected: bool,
    carried: bool,
    matcher: Option<&Regex>,
    lines: &mut Vec<Line<'a>>,
) {
    let theme = &app.theme;
    let card_bg = if selected || carried {
        theme.selection_bg
    } else {
        theme.background
    };
    let text_fg = if carried { theme.dim } else { theme.text_bright };
    let marker = if carried {
        "\u{21C4}"
    } else if selected {
        "\u{258E}"
    } else {
        " "
    };

    let title_w = width.saturating_sub(3);
    let title = fit(&task.title, title_w);
    let mut first: Vec<Span> = vec![
        Span::styled(
            marker,
            Style::default().fg(theme.selection_border).bg(card_bg),
        ),
        Span::styled(
            format!("{} ", priority_symbol(task.priority)),
            Style::default().fg(theme.priority_color(task.priority)).bg(card_bg),
        ),
    ];
    push_highlighted_spans(
        &mut first,
        &title,
        Style::default().fg(text_fg).bg(card_bg),
        Style::default()
            .fg(theme.search_match_fg)
            .bg(theme.search_match_bg),
        matcher,
    );
    lines.push(Line::from(first));

    if density == Density::Compact {
        return;
    }

    let assignee = app
        .state
        .user_by_id(&task.assigned_user)
        .map(|u| u.avatar.as_str())
        .unwrap_or("--");
    let meta_w = width.saturating_sub(2);
    let tag = task.tag.label();
    let rest = meta_w.saturating_sub(tag.len() + 1);
    lines.push(Line::from(vec![
        Span::styled("  ", Style::default().bg(card_bg)),
        Span::styled(
            format!("{} ", tag),
            Style::default().fg(theme.tag_color(task.tag)).bg(card_bg),
        ),
        Span::styled(
            fit(&format!("{} {}", assignee, task.id), rest),
            Style::default().fg(theme.dim).bg(card_bg),
        ),
    ]));

    if density == Density::Spacious {
        let due = task
            .due_date
            .map(|d| format!("due {}", d.format("%b %-d")))
            .unwrap_or_default();
        lines.push(Line::from(Span::styled(
            format!("  {}", fit(&due, meta_w)),
            Style::default().fg(theme.dim).bg(card_bg),
        )));
    }
    lines.push(Line::from(""));
}

#[cfg(test)]
mod tests {
    use super::super::test_helpers::*;
    use super::*;
    use crate::model::{KanbanFilters, TaskTag};
    use crate::ops::settings;
    use crate::tui::app::MoveState;

    fn board(app: &App) -> String {
        render_to_string(150, 30, |frame, area| render_kanban_view(frame, app, area))
    }

    fn admin_on_board() -> App {
        let mut app = app_signed_in("admin@example.com", "admin123");
        assert!(app.navigate(crate::model::View::Kanban));
        app
    }

    #[test]
    fn columns_show_titles_and_counts() {
        let app = admin_on_board();
        let out = board(&app);
        let first = out.lines().nth(1).unwrap();
        assert!(first.contains("Backlog 2"));
        assert!(first.contains("To Do 3"));
        assert!(first.contains("In Progress 3"));
        assert!(first.contains("Review 0"));
        assert!(first.contains("Done 2"));
        assert!(out.contains(" 10 tasks"));
    }

    #[test]
    fn filter_bar_reflects_filters_and_search() {
        let mut app = admin_on_board();
        app.state.set_kanban_filters(KanbanFilters {
            tag: Some(TaskTag::Sales),
            priority: None,
        });
        app.board_search = "leads".into();
        let out = board(&app);
        let bar = out.lines().next().unwrap();
        assert!(bar.contains("tag: Sales"));
        assert!(bar.contains("/leads"));
        assert!(bar.contains("(1 shown)"));
        assert!(out.contains("Contact Top 10"));
        assert!(!out.contains("Quarterly Sales"));
    }

    #[test]
    fn compact_density_drops_meta_line() {
        let mut app = admin_on_board();
        assert!(board(&app).contains("Admin SA task-1"));
        let mut prefs = app.state.user().unwrap().preferences.clone();
        prefs.layout_density = Density::Compact;
        settings::update_preferences(&mut app.state, prefs);
        assert!(!board(&app).contains("Admin SA task-1"));
    }

    #[test]
    fn move_target_column_invites_drop() {
        let mut app = admin_on_board();
        app.mode = Mode::Move;
        app.moving = Some(MoveState {
            task_id: "task-1".into(),
            target: 3,
        });
        let out = board(&app);
        assert!(out.contains("drop here"));
        assert!(out.contains("\u{21C4}"));
    }
}

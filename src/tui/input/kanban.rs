use crossterm::event::{KeyCode, KeyEvent};

use crate::model::KanbanFilters;
use crate::ops::kanban::{self, MoveOutcome};
use crate::tui::app::{App, EditorField, EditorState, Mode, MoveState, SearchTarget};

const COLUMNS: usize = 5;

pub(super) fn handle_board(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => {
            if app.board.column > 0 {
                app.board.column -= 1;
                app.clamp_board();
            }
        }
        KeyCode::Char('l') | KeyCode::Right => {
            if app.board.column + 1 < COLUMNS {
                app.board.column += 1;
                app.clamp_board();
            }
        }
        KeyCode::Char('j') | KeyCode::Down => {
            let len = app.column_tasks(app.board.column).len();
            if app.board.row + 1 < len {
                app.board.row += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.board.row = app.board.row.saturating_sub(1);
        }
        KeyCode::Char('g') | KeyCode::Home => app.board.row = 0,
        KeyCode::Char('G') | KeyCode::End => {
            app.board.row = app.column_tasks(app.board.column).len().saturating_sub(1);
        }
        KeyCode::Char('n') => open_editor(app, None),
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(id) = app.selected_task_id() {
                open_editor(app, Some(id));
            }
        }
        KeyCode::Char('x') | KeyCode::Delete => {
            if let Some(id) = app.selected_task_id()
                && kanban::request_delete(&mut app.state, &id).is_ok()
            {
                app.mode = Mode::Confirm;
            }
        }
        KeyCode::Char(' ') => {
            if let Some(id) = app.selected_task_id()
                && kanban::begin_drag(&mut app.state, &id).is_ok()
            {
                app.moving = Some(MoveState {
                    task_id: id,
                    target: app.board.column,
                });
                app.mode = Mode::Move;
            }
        }
        KeyCode::Char('/') => {
            app.search_target = SearchTarget::Board;
            app.search_input = app.board_search.clone();
            app.mode = Mode::Search;
        }
        KeyCode::Char('f') => {
            let tag = kanban::next_tag_filter(app.state.ui.kanban_filters.tag);
            app.state.set_kanban_filters(KanbanFilters {
                tag,
                ..app.state.ui.kanban_filters
            });
            app.clamp_board();
        }
        KeyCode::Char('p') => {
            let priority = kanban::next_priority_filter(app.state.ui.kanban_filters.priority);
            app.state.set_kanban_filters(KanbanFilters {
                priority,
                ..app.state.ui.kanban_filters
            });
            app.clamp_board();
        }
        KeyCode::Char('c') => {
            app.state.set_kanban_filters(KanbanFilters::default());
            app.clamp_board();
        }
        KeyCode::Esc => {
            if !app.board_search.is_empty() {
                app.board_search.clear();
                app.clamp_board();
            }
        }
        _ => {}
    }
}

/// Move mode: the grabbed task follows h/l until dropped
pub(super) fn handle_move(app: &mut App, key: KeyEvent) {
    let Some(moving) = app.moving.as_mut() else {
        app.mode = Mode::Navigate;
        return;
    };
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => {
            moving.target = moving.target.saturating_sub(1);
        }
        KeyCode::Char('l') | KeyCode::Right => {
            moving.target = (moving.target + 1).min(COLUMNS - 1);
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            let Some(moving) = app.moving.take() else {
                return;
            };
            app.mode = Mode::Navigate;
            let column = kanban::columns()[moving.target];
            if let Ok(MoveOutcome::Moved(_) | MoveOutcome::Unchanged) =
                kanban::drop_task(&mut app.state, &moving.task_id, column.id)
            {
                app.select_task(&moving.task_id);
            }
        }
        KeyCode::Esc => {
            app.moving = None;
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}

/// Open the task editor for a task, or a blank one for `None`
pub(super) fn open_editor(app: &mut App, task_id: Option<String>) {
    if let Ok(draft) = kanban::open_task_editor(&mut app.state, task_id.as_deref()) {
        app.editor = Some(EditorState {
            original_status: task_id.as_ref().map(|_| draft.status),
            task_id,
            due_input: draft
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            draft,
            field: EditorField::Title,
            error: None,
        });
        app.mode = Mode::Edit;
    }
}


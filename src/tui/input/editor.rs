use chrono::{NaiveDate, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::{Priority, TaskStatus, TaskTag};
use crate::ops::{auth, kanban};
use crate::tui::app::{App, EditorField, EditorState, Mode};

use super::*;

pub(super) fn handle_editor(app: &mut App, key: KeyEvent) {
    let allowed = auth::allowed_task_statuses(app.state.user());
    let Some(editor) = app.editor.as_mut() else {
        app.mode = Mode::Navigate;
        return;
    };
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => {
            close_editor(app);
            return;
        }
        KeyCode::Enter => {
            save_editor(app);
            return;
        }
        KeyCode::Char('s') if ctrl => {
            save_editor(app);
            return;
        }
        KeyCode::Tab | KeyCode::Down => editor.field = step_field(editor.field, true),
        KeyCode::BackTab | KeyCode::Up => editor.field = step_field(editor.field, false),
        KeyCode::Left | KeyCode::Right if !editor.field.is_text() => {
            let forward = key.code == KeyCode::Right;
            cycle_choice(editor, &allowed, forward);
        }
        KeyCode::Char(' ') if !editor.field.is_text() => cycle_choice(editor, &allowed, true),
        _ => {
            let buf = match editor.field {
                EditorField::Title => &mut editor.draft.title,
                EditorField::Description => &mut editor.draft.description,
                EditorField::Due => &mut editor.due_input,
                _ => return,
            };
            edit_text(buf, key);
        }
    }
}

fn step_field(field: EditorField, forward: bool) -> EditorField {
    cycle(&EditorField::ALL, field, forward)
}

/// Left/Right on a choice field
fn cycle_choice(editor: &mut EditorState, allowed: &[TaskStatus], forward: bool) {
    let draft = &mut editor.draft;
    match editor.field {
        EditorField::Tag => {
            let options = [
                None,
                Some(TaskTag::General),
                Some(TaskTag::Admin),
                Some(TaskTag::Sales),
            ];
            draft.tag = cycle(&options, draft.tag, forward);
        }
        EditorField::Priority => {
            draft.priority = cycle(&Priority::ALL, draft.priority, forward);
        }
        EditorField::Status => {
            let options = status_options(allowed, editor.original_status);
            draft.status = cycle(&options, draft.status, forward);
        }
        _ => {}
    }
}

/// Statuses the user may pick: the allowed ones, plus the task's stored
/// status even when the user could not move a task into it
fn status_options(allowed: &[TaskStatus], original: Option<TaskStatus>) -> Vec<TaskStatus> {
    TaskStatus::ALL
        .into_iter()
        .filter(|s| allowed.contains(s) || original == Some(*s))
        .collect()
}

fn close_editor(app: &mut App) {
    kanban::close_modal(&mut app.state);
    app.editor = None;
    app.mode = Mode::Navigate;
}

fn save_editor(app: &mut App) {
    let Some(editor) = app.editor.as_mut() else {
        return;
    };
    let due = editor.due_input.trim();
    let due_date = if due.is_empty() {
        None
    } else {
        match NaiveDate::parse_from_str(due, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                editor.error = Some("Due date must be YYYY-MM-DD".to_string());
                editor.field = EditorField::Due;
                return;
            }
        }
    };
    let mut draft = editor.draft.clone();
    draft.due_date = due_date;
    let task_id = editor.task_id.clone();

    match kanban::save_task(&mut app.state, task_id.as_deref(), draft, Utc::now()) {
        Ok(task) => {
            app.editor = None;
            app.mode = Mode::Navigate;
            app.select_task(&task.id);
        }
        Err(e) if e.is_validation() => {
            if let Some(editor) = app.editor.as_mut() {
                editor.field = match e {
                    kanban::KanbanError::TagRequired => EditorField::Tag,
                    _ => EditorField::Title,
                };
                editor.error = Some(e.to_string());
            }
        }
        // Permission refusals are already reported as a notification
        Err(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_editor(stored: TaskStatus) -> EditorState {
        let mut draft = kanban::TaskDraft::blank(&[]);
        draft.status = stored;
        EditorState {
            task_id: Some("task-9".into()),
            draft,
            original_status: Some(stored),
            field: EditorField::Status,
            due_input: String::new(),
            error: None,
        }
    }

    const USER_STATUSES: [TaskStatus; 3] =
        [TaskStatus::Backlog, TaskStatus::ToDo, TaskStatus::InProgress];

    #[test]
    fn status_choices_keep_current_status() {
        let mut editor = status_editor(TaskStatus::Done);
        cycle_choice(&mut editor, &USER_STATUSES, true);
        assert_eq!(editor.draft.status, TaskStatus::Backlog);
        cycle_choice(&mut editor, &USER_STATUSES, false);
        assert_eq!(editor.draft.status, TaskStatus::Done);
    }

    #[test]
    fn stored_status_survives_moving_away() {
        let mut editor = status_editor(TaskStatus::Review);
        cycle_choice(&mut editor, &USER_STATUSES, false);
        assert_eq!(editor.draft.status, TaskStatus::InProgress);
        cycle_choice(&mut editor, &USER_STATUSES, false);
        assert_eq!(editor.draft.status, TaskStatus::ToDo);
        cycle_choice(&mut editor, &USER_STATUSES, true);
        cycle_choice(&mut editor, &USER_STATUSES, true);
        assert_eq!(editor.draft.status, TaskStatus::Review);
    }

    #[test]
    fn new_task_offers_only_allowed_statuses() {
        assert_eq!(status_options(&USER_STATUSES, None), USER_STATUSES.to_vec());
        assert_eq!(
            status_options(&USER_STATUSES, Some(TaskStatus::Done)),
            vec![
                TaskStatus::Backlog,
                TaskStatus::ToDo,
                TaskStatus::InProgress,
                TaskStatus::Done
            ]
        );
    }

    #[test]
    fn tag_cycle_includes_unset() {
        let mut editor = EditorState {
            task_id: None,
            draft: kanban::TaskDraft::blank(&[TaskStatus::ToDo]),
            original_status: None,
            field: EditorField::Tag,
            due_input: String::new(),
            error: None,
        };
        cycle_choice(&mut editor, &[], false);
        assert_eq!(editor.draft.tag, None);
    }
}

//! Kanban board operations: column layout, filtering, drag-and-drop moves
//! and the task editor.

use chrono::{DateTime, NaiveDate, Utc};
use regex::{Regex, RegexBuilder};
use tracing::{info, warn};

use crate::model::{
    ModalKind, ModalState, NotificationLevel, Priority, Task, TaskStatus, TaskTag,
};
use crate::ops::auth;
use crate::ops::store::{AppState, NewTask, TaskUpdate};

/// Error type for board actions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KanbanError {
    #[error("Task not found")]
    TaskNotFound,
    #[error("You must be signed in")]
    NotSignedIn,
    #[error("You do not have permission to move this task")]
    MoveDenied,
    #[error("You cannot move tasks to {0} status")]
    StatusDenied(TaskStatus),
    #[error("You do not have permission to edit this task")]
    EditDenied,
    #[error("You do not have permission to delete this task")]
    DeleteDenied,
    #[error("Task title is required")]
    TitleRequired,
    #[error("Please select a tag")]
    TagRequired,
}

impl KanbanError {
    /// Form validation failures are shown inline rather than as toasts
    pub fn is_validation(&self) -> bool {
        matches!(self, KanbanError::TitleRequired | KanbanError::TagRequired)
    }

    pub fn level(&self) -> NotificationLevel {
        match self {
            KanbanError::TaskNotFound => NotificationLevel::Error,
            _ => NotificationLevel::Warning,
        }
    }
}

/// Surface a refused action in the activity log and hand the error back
fn refuse(state: &mut AppState, err: KanbanError) -> KanbanError {
    warn!(error = %err, "board action refused");
    state.notify(err.level(), err.to_string());
    err
}

// ---------------------------------------------------------------------------
// Columns and filtering
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub id: &'static str,
    pub title: &'static str,
    pub status: TaskStatus,
}

pub fn columns() -> [Column; 5] {
    TaskStatus::ALL.map(|status| Column {
        id: status.column_id(),
        title: status.label(),
        status,
    })
}

/// Case-insensitive literal matcher; `None` for a blank query
pub fn search_matcher(query: &str) -> Option<Regex> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
        .ok()
}

pub fn matches_search(task: &Task, matcher: Option<&Regex>) -> bool {
    match matcher {
        None => true,
        Some(re) => re.is_match(&task.title) || re.is_match(&task.description) || re.is_match(&task.id),
    }
}

/// Visible tasks narrowed by the saved tag/priority filters and a search query
pub fn filtered_tasks<'a>(state: &'a AppState, query: &str) -> Vec<&'a Task> {
    narrow(state, state.current_user_tasks(), query)
}

/// Filtered tasks in one column
pub fn column_tasks<'a>(state: &'a AppState, status: TaskStatus, query: &str) -> Vec<&'a Task> {
    narrow(state, state.tasks_by_status(status), query)
}

fn narrow<'a>(state: &AppState, tasks: Vec<&'a Task>, query: &str) -> Vec<&'a Task> {
    let filters = state.ui.kanban_filters;
    let matcher = search_matcher(query);
    tasks
        .into_iter()
        .filter(|t| filters.tag.is_none_or(|tag| t.tag == tag))
        .filter(|t| filters.priority.is_none_or(|p| t.priority == p))
        .filter(|t| matches_search(t, matcher.as_ref()))
        .collect()
}

/// all → General → Admin → Sales → all
pub fn next_tag_filter(current: Option<TaskTag>) -> Option<TaskTag> {
    match current {
        None => Some(TaskTag::ALL[0]),
        Some(tag) => TaskTag::ALL
            .iter()
            .position(|t| *t == tag)
            .and_then(|i| TaskTag::ALL.get(i + 1).copied()),
    }
}

/// all → high → medium → low → all
pub fn next_priority_filter(current: Option<Priority>) -> Option<Priority> {
    match current {
        None => Some(Priority::High),
        Some(Priority::High) => Some(Priority::Medium),
        Some(Priority::Medium) => Some(Priority::Low),
        Some(Priority::Low) => None,
    }
}

// ---------------------------------------------------------------------------
// Drag and drop
// ---------------------------------------------------------------------------

/// Result of dropping a task on a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved(TaskStatus),
    /// Dropped on its own column
    Unchanged,
    /// Unknown task or column
    Ignored,
}

/// Start dragging. Refused unless the task may stay where it is under the
/// user's move rules.
pub fn begin_drag(state: &mut AppState, task_id: &str) -> Result<(), KanbanError> {
    let Some(task) = state.task_by_id(task_id) else {
        return Err(KanbanError::TaskNotFound);
    };
    if !auth::can_move_task(state.user(), task, task.status) {
        return Err(refuse(state, KanbanError::MoveDenied));
    }
    Ok(())
}

/// Drop a task on the column with this id
pub fn drop_task(
    state: &mut AppState,
    task_id: &str,
    column_id: &str,
) -> Result<MoveOutcome, KanbanError> {
    let Some(status) = TaskStatus::from_column_id(column_id) else {
        return Ok(MoveOutcome::Ignored);
    };
    move_task(state, task_id, status)
}

/// Move a task to a status, enforcing the user's move rules
pub fn move_task(
    state: &mut AppState,
    task_id: &str,
    status: TaskStatus,
) -> Result<MoveOutcome, KanbanError> {
    let Some(task) = state.task_by_id(task_id) else {
        return Ok(MoveOutcome::Ignored);
    };
    if !auth::can_move_task(state.user(), task, status) {
        return Err(refuse(state, KanbanError::StatusDenied(status)));
    }
    if task.status == status {
        return Ok(MoveOutcome::Unchanged);
    }
    state.update_task(
        task_id,
        TaskUpdate {
            status: Some(status),
            ..Default::default()
        },
    );
    info!(task_id, %status, "task moved");
    state.notify(NotificationLevel::Success, format!("Task moved to {}", status));
    Ok(MoveOutcome::Moved(status))
}

// ---------------------------------------------------------------------------
// Task editor
// ---------------------------------------------------------------------------

/// Editable fields of the task modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub tag: Option<TaskTag>,
    pub priority: Priority,
    pub status: TaskStatus,
    pub due_date: Option<NaiveDate>,
}

impl TaskDraft {
    pub fn from_task(task: &Task) -> Self {
        TaskDraft {
            title: task.title.clone(),
            description: task.description.clone(),
            tag: Some(task.tag),
            priority: task.priority,
            status: task.status,
            due_date: task.due_date,
        }
    }

    /// Blank draft, starting in To Do when the user may create there
    pub fn blank(allowed: &[TaskStatus]) -> Self {
        let status = if allowed.contains(&TaskStatus::ToDo) {
            TaskStatus::ToDo
        } else {
            allowed.first().copied().unwrap_or(TaskStatus::Backlog)
        };
        TaskDraft {
            title: String::new(),
            description: String::new(),
            tag: Some(TaskTag::General),
            priority: Priority::Medium,
            status,
            due_date: None,
        }
    }
}

/// Open the editor for an existing task (`Some(id)`) or a new one (`None`)
pub fn open_task_editor(
    state: &mut AppState,
    task_id: Option<&str>,
) -> Result<TaskDraft, KanbanError> {
    if state.user().is_none() {
        return Err(KanbanError::NotSignedIn);
    }
    let draft = match task_id {
        None => TaskDraft::blank(&auth::allowed_task_statuses(state.user())),
        Some(id) => {
            let Some(task) = state.task_by_id(id) else {
                return Err(refuse(state, KanbanError::TaskNotFound));
            };
            if !auth::can_edit_task(state.user(), task) {
                return Err(refuse(state, KanbanError::EditDenied));
            }
            TaskDraft::from_task(task)
        }
    };
    let task_id = task_id.map(str::to_string);
    state.update_ui(|ui| {
        ui.modal = Some(ModalState {
            kind: ModalKind::TaskEditor,
            task_id,
        })
    });
    Ok(draft)
}

pub fn close_modal(state: &mut AppState) {
    state.update_ui(|ui| ui.modal = None);
}

/// Save the editor. New tasks are owned by and assigned to the current
/// user; a status change must pass the move rules.
pub fn save_task(
    state: &mut AppState,
    task_id: Option<&str>,
    draft: TaskDraft,
    now: DateTime<Utc>,
) -> Result<Task, KanbanError> {
    let Some(user) = state.user().cloned() else {
        return Err(KanbanError::NotSignedIn);
    };
    let title = draft.title.trim().to_string();
    if title.is_empty() {
        return Err(KanbanError::TitleRequired);
    }
    let Some(tag) = draft.tag else {
        return Err(KanbanError::TagRequired);
    };
    let description = draft.description.trim().to_string();

    let saved = match task_id {
        None => {
            if !auth::allowed_task_statuses(Some(&user)).contains(&draft.status) {
                return Err(refuse(state, KanbanError::StatusDenied(draft.status)));
            }
            let task = state.add_task(
                NewTask {
                    title,
                    description,
                    status: draft.status,
                    tag,
                    priority: draft.priority,
                    owner_role: user.role,
                    assigned_user: user.id.clone(),
                    due_date: draft.due_date,
                },
                now,
            );
            state.notify(NotificationLevel::Success, "Task created successfully");
            task
        }
        Some(id) => {
            let Some(existing) = state.task_by_id(id) else {
                return Err(refuse(state, KanbanError::TaskNotFound));
            };
            if !auth::can_edit_task(Some(&user), existing) {
                return Err(refuse(state, KanbanError::EditDenied));
            }
            if existing.status != draft.status
                && !auth::can_move_task(Some(&user), existing, draft.status)
            {
                return Err(refuse(state, KanbanError::StatusDenied(draft.status)));
            }
            let update = TaskUpdate {
                title: Some(title),
                description: Some(description),
                status: Some(draft.status),
                tag: Some(tag),
                priority: Some(draft.priority),
                due_date: Some(draft.due_date),
            };
            let Some(task) = state.update_task(id, update) else {
                return Err(refuse(state, KanbanError::TaskNotFound));
            };
            state.notify(NotificationLevel::Success, "Task updated successfully");
            task
        }
    };
    close_modal(state);
    Ok(saved)
}

/// Check a delete is allowed before asking for confirmation
pub fn request_delete(state: &mut AppState, task_id: &str) -> Result<(), KanbanError> {
    let Some(task) = state.task_by_id(task_id) else {
        return Err(KanbanError::TaskNotFound);
    };
    if !auth::can_delete_task(state.user(), task) {
        return Err(refuse(state, KanbanError::DeleteDenied));
    }
    let task_id = task_id.to_string();
    state.update_ui(|ui| {
        ui.modal = Some(ModalState {
            kind: ModalKind::ConfirmDelete,
            task_id: Some(task_id),
        })
    });
    Ok(())
}

/// Delete a task the user has confirmed. Removes exactly one task.
pub fn delete_task(state: &mut AppState, task_id: &str) -> Result<Task, KanbanError> {
    let Some(task) = state.task_by_id(task_id).cloned() else {
        return Err(KanbanError::TaskNotFound);
    };
    if !auth::can_delete_task(state.user(), &task) {
        return Err(refuse(state, KanbanError::DeleteDenied));
    }
    state.ui.modal = None;
    state.delete_task(task_id);
    state.notify(NotificationLevel::Success, "Task deleted successfully");
    Ok(task)
}

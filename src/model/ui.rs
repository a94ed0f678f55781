use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::task::{Priority, TaskTag};
use super::user::ThemeMode;

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Login,
    Dashboard,
    Kanban,
    Settings,
    Users,
    Reports,
}

impl View {
    pub fn title(self) -> &'static str {
        match self {
            View::Login => "Sign in",
            View::Dashboard => "Dashboard",
            View::Kanban => "Kanban Board",
            View::Settings => "Settings",
            View::Users => "User Management",
            View::Reports => "Reports & Analytics",
        }
    }
}

/// Kanban filters. `None` means "all".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KanbanFilters {
    #[serde(default)]
    pub tag: Option<TaskTag>,
    #[serde(default)]
    pub priority: Option<Priority>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModalKind {
    TaskEditor,
    ConfirmDelete,
    ConfirmLogout,
    ConfirmClearCache,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalState {
    pub kind: ModalKind,
    /// Task the modal is about (None for "new task" and non-task modals)
    #[serde(default)]
    pub task_id: Option<String>,
}

/// Persisted UI state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    #[serde(default)]
    pub active_view: View,
    #[serde(default = "default_true")]
    pub sidebar_open: bool,
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default)]
    pub modal: Option<ModalState>,
    #[serde(default)]
    pub kanban_filters: KanbanFilters,
}

fn default_true() -> bool {
    true
}

impl Default for UiState {
    fn default() -> Self {
        UiState {
            active_view: View::Login,
            sidebar_open: true,
            theme: ThemeMode::Dark,
            modal: None,
            kanban_filters: KanbanFilters::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
    Warning,
    Info,
}

/// One entry in the activity log, shown as a toast while fresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub at: DateTime<Utc>,
}

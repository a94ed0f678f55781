//! The application state store: users, tasks, UI state, and the activity log,
//! persisted as a snapshot after every mutation.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, error, info, warn};

use crate::io::storage::{Snapshot, Storage};
use crate::model::{
    KanbanFilters, Notification, NotificationLevel, Preferences, Priority, Role, Task, TaskStatus,
    TaskTag, UiState, User, View,
};
use crate::ops::auth::{self, AuthError};
use crate::ops::seed;

/// Oldest notifications are dropped past this many
pub const MAX_NOTIFICATIONS: usize = 50;

/// Fields for a task being created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub tag: TaskTag,
    pub priority: Priority,
    pub owner_role: Role,
    pub assigned_user: String,
    pub due_date: Option<NaiveDate>,
}

/// Partial update; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub tag: Option<TaskTag>,
    pub priority: Option<Priority>,
    pub due_date: Option<Option<NaiveDate>>,
}

/// Per-status counts over the tasks visible to the current user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCounts {
    pub total: usize,
    pub backlog: usize,
    pub todo: usize,
    pub in_progress: usize,
    pub review: usize,
    pub done: usize,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub current_user: Option<User>,
    pub users: Vec<User>,
    pub tasks: Vec<Task>,
    pub ui: UiState,
    /// Activity log, oldest first
    pub notifications: Vec<Notification>,
    storage: Option<Storage>,
}

impl AppState {
    /// Fresh state from the mock data, not backed by storage
    pub fn seeded() -> Self {
        AppState {
            current_user: None,
            users: seed::users(),
            tasks: seed::tasks(),
            ui: UiState::default(),
            notifications: Vec::new(),
            storage: None,
        }
    }

    /// Seed, then restore whatever the snapshot holds. A signed-in session
    /// takes its theme from the user's preferences; otherwise the login
    /// screen is shown.
    pub fn initialize(storage: Option<Storage>) -> Self {
        let mut state = AppState::seeded();
        state.storage = storage;
        state.load();
        match &state.current_user {
            Some(user) => state.ui.theme = user.preferences.theme,
            None => state.ui.active_view = View::Login,
        }
        info!(
            view = ?state.ui.active_view,
            user = state.current_user.as_ref().map(|u| u.name.as_str()).unwrap_or("none"),
            "state initialized"
        );
        state
    }

    pub fn storage(&self) -> Option<&Storage> {
        self.storage.as_ref()
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            current_user: self.current_user.clone(),
            tasks: Some(self.tasks.clone()),
            users: Some(self.users.clone()),
            ui: Some(self.ui.clone()),
        }
    }

    /// Persist the snapshot. Failures are logged, never raised.
    pub fn save(&self) {
        let Some(storage) = &self.storage else {
            return;
        };
        match storage.save(&self.snapshot()) {
            Ok(()) => debug!(path = %storage.path().display(), "state saved"),
            Err(e) => error!("error saving state: {}", e),
        }
    }

    /// Restore from storage. Returns true when a snapshot was applied; a
    /// missing or unreadable snapshot leaves the current state alone.
    pub fn load(&mut self) -> bool {
        let Some(storage) = &self.storage else {
            return false;
        };
        match storage.load() {
            Ok(Some(snapshot)) => {
                self.restore(snapshot);
                info!("state loaded");
                true
            }
            Ok(None) => false,
            Err(e) => {
                warn!("ignoring saved state: {}", e);
                false
            }
        }
    }

    /// Merge a snapshot into the state. Parts the snapshot lacks keep their
    /// current values.
    pub fn restore(&mut self, snapshot: Snapshot) {
        if let Some(user) = snapshot.current_user {
            self.current_user = Some(user.without_password());
            self.ui.active_view = View::Dashboard;
        }
        if let Some(tasks) = snapshot.tasks {
            self.tasks = tasks;
        }
        if let Some(users) = snapshot.users {
            self.users = users;
        }
        if let Some(ui) = snapshot.ui {
            let view = ui.active_view;
            self.ui = UiState { modal: None, ..ui };
            if self.current_user.is_some() && view == View::Login {
                self.ui.active_view = View::Dashboard;
            }
        }
        if !auth::can_access_view(self.current_user.as_ref(), self.ui.active_view) {
            self.ui.active_view = match self.current_user {
                Some(_) => View::Dashboard,
                None => View::Login,
            };
        }
    }

    /// Remove the snapshot and sign out
    pub fn clear_storage(&mut self) {
        if let Some(storage) = &self.storage
            && let Err(e) = storage.clear()
        {
            error!("error clearing saved state: {}", e);
        }
        self.current_user = None;
        self.ui.active_view = View::Login;
        info!("saved state cleared");
    }

    /// Remove the snapshot and go back to the mock data, signed out
    pub fn reset(&mut self) {
        self.clear_storage();
        self.users = seed::users();
        self.tasks = seed::tasks();
        self.ui = UiState::default();
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn user_by_id(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Tasks visible to the current user, in store order
    pub fn current_user_tasks(&self) -> Vec<&Task> {
        let user = self.user();
        self.tasks
            .iter()
            .filter(|t| auth::can_view_task(user, t))
            .collect()
    }

    pub fn tasks_by_status(&self, status: TaskStatus) -> Vec<&Task> {
        self.current_user_tasks()
            .into_iter()
            .filter(|t| t.status == status)
            .collect()
    }

    pub fn task_by_id(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn task_counts(&self) -> TaskCounts {
        let mut counts = TaskCounts::default();
        for task in self.current_user_tasks() {
            counts.total += 1;
            match task.status {
                TaskStatus::Backlog => counts.backlog += 1,
                TaskStatus::ToDo => counts.todo += 1,
                TaskStatus::InProgress => counts.in_progress += 1,
                TaskStatus::Review => counts.review += 1,
                TaskStatus::Done => counts.done += 1,
            }
        }
        counts
    }

    /// Newest visible tasks by creation time
    pub fn recent_tasks(&self, limit: usize) -> Vec<&Task> {
        let mut tasks = self.current_user_tasks();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        tasks.truncate(limit);
        tasks
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Sign a user in: password-free copy, dashboard view, theme from prefs
    pub fn set_current_user(&mut self, user: User) {
        self.ui.theme = user.preferences.theme;
        self.current_user = Some(user.without_password());
        self.ui.active_view = View::Dashboard;
        self.save();
    }

    /// Apply preferences to the current user and mirror them into the user list
    pub fn update_user_preferences(&mut self, update: impl FnOnce(&mut Preferences)) {
        let Some(current) = self.current_user.as_mut() else {
            return;
        };
        update(&mut current.preferences);
        let prefs = current.preferences.clone();
        let id = current.id.clone();
        if let Some(stored) = self.users.iter_mut().find(|u| u.id == id) {
            stored.preferences = prefs;
        }
        self.save();
    }

    /// Replace the current user's profile fields in both copies
    pub fn update_current_user(&mut self, update: impl Fn(&mut User)) {
        let Some(current) = self.current_user.as_mut() else {
            return;
        };
        update(current);
        let id = current.id.clone();
        if let Some(stored) = self.users.iter_mut().find(|u| u.id == id) {
            update(stored);
        }
        self.save();
    }

    pub fn add_task(&mut self, new: NewTask, now: DateTime<Utc>) -> Task {
        let task = Task {
            id: self.next_task_id(now),
            title: new.title,
            description: new.description,
            status: new.status,
            tag: new.tag,
            priority: new.priority,
            owner_role: new.owner_role,
            assigned_user: new.assigned_user,
            created_at: now,
            due_date: new.due_date,
        };
        self.tasks.push(task.clone());
        info!(id = %task.id, "task added");
        self.save();
        task
    }

    /// `task-<millis>`, bumped until unused
    fn next_task_id(&self, now: DateTime<Utc>) -> String {
        let mut n = now.timestamp_millis();
        loop {
            let id = format!("task-{}", n);
            if self.task_by_id(&id).is_none() {
                return id;
            }
            n += 1;
        }
    }

    pub fn update_task(&mut self, id: &str, update: TaskUpdate) -> Option<Task> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        if let Some(title) = update.title {
            task.title = title;
        }
        if let Some(description) = update.description {
            task.description = description;
        }
        if let Some(status) = update.status {
            task.status = status;
        }
        if let Some(tag) = update.tag {
            task.tag = tag;
        }
        if let Some(priority) = update.priority {
            task.priority = priority;
        }
        if let Some(due) = update.due_date {
            task.due_date = due;
        }
        let updated = task.clone();
        debug!(id, "task updated");
        self.save();
        Some(updated)
    }

    /// Remove the task with this id. Returns false when there is none.
    pub fn delete_task(&mut self, id: &str) -> bool {
        let Some(index) = self.tasks.iter().position(|t| t.id == id) else {
            return false;
        };
        self.tasks.remove(index);
        info!(id, "task deleted");
        self.save();
        true
    }

    pub fn update_ui(&mut self, update: impl FnOnce(&mut UiState)) {
        update(&mut self.ui);
        self.save();
    }

    pub fn set_active_view(&mut self, view: View) {
        self.ui.active_view = view;
        self.save();
    }

    pub fn toggle_sidebar(&mut self) {
        self.ui.sidebar_open = !self.ui.sidebar_open;
        self.save();
    }

    pub fn set_kanban_filters(&mut self, filters: KanbanFilters) {
        self.ui.kanban_filters = filters;
        self.save();
    }

    // -----------------------------------------------------------------------
    // Session and notifications
    // -----------------------------------------------------------------------

    /// Append to the activity log
    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            NotificationLevel::Error => warn!(%message, "notify"),
            _ => debug!(?level, %message, "notify"),
        }
        self.notifications.push(Notification {
            level,
            message,
            at: Utc::now(),
        });
        if self.notifications.len() > MAX_NOTIFICATIONS {
            let excess = self.notifications.len() - MAX_NOTIFICATIONS;
            self.notifications.drain(..excess);
        }
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<User, AuthError> {
        match auth::authenticate(&mut self.users, username, password, Utc::now()) {
            Ok(user) => {
                info!(user = %user.name, role = %user.role, "user authenticated");
                self.set_current_user(user.clone());
                self.notify(
                    NotificationLevel::Success,
                    format!("Welcome back, {}!", user.name),
                );
                Ok(user)
            }
            Err(e) => {
                if e == AuthError::InvalidCredentials {
                    warn!(username, "authentication failed");
                }
                Err(e)
            }
        }
    }

    /// Sign out: the snapshot is removed and the login screen shown
    pub fn logout(&mut self) {
        if let Some(user) = &self.current_user {
            info!(user = %user.name, "user logged out");
        }
        self.clear_storage();
        self.ui.modal = None;
        self.notify(NotificationLevel::Info, "You have been logged out");
    }

    /// Switch views if the current user may see the target. Returns whether
    /// the view changed.
    pub fn navigate(&mut self, view: View) -> bool {
        if !auth::can_access_view(self.user(), view) {
            warn!(?view, "navigation denied");
            self.notify(
                NotificationLevel::Warning,
                "You do not have permission to access this view",
            );
            return false;
        }
        self.set_active_view(view);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn signed_in(username: &str, password: &str) -> AppState {
        let mut state = AppState::seeded();
        state.login(username, password).unwrap();
        state
    }

    fn stored(dir: &TempDir) -> Storage {
        Storage::new(dir.path(), "app_state.json")
    }

    #[test]
    fn sales_sees_exactly_sales_tagged_tasks() {
        let mut state = signed_in("sales@example.com", "sales123");
        // reassign one sales task away from the sales user
        state.tasks[2].assigned_user = "user-1".into();

        let visible: Vec<&str> = state
            .current_user_tasks()
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        let expected: Vec<&str> = state
            .tasks
            .iter()
            .filter(|t| t.tag == TaskTag::Sales)
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(visible, expected);
        assert_eq!(visible, vec!["task-3", "task-5", "task-8"]);
    }

    #[test]
    fn user_sees_only_assigned_tasks() {
        let state = signed_in("user@example.com", "user123");
        let counts = state.task_counts();
        assert_eq!(counts.total, 3);
        assert_eq!(counts.todo, 2);
        assert_eq!(counts.in_progress, 1);
        assert_eq!(counts.done, 0);
    }

    #[test]
    fn nothing_visible_when_signed_out() {
        let state = AppState::seeded();
        assert!(state.current_user_tasks().is_empty());
        assert_eq!(state.task_counts(), TaskCounts::default());
    }

    #[test]
    fn delete_removes_exactly_one() {
        let mut state = signed_in("admin@example.com", "admin123");
        assert!(state.delete_task("task-4"));
        assert_eq!(state.tasks.len(), 9);
        assert!(state.task_by_id("task-4").is_none());
        assert!(!state.delete_task("task-4"));
        assert!(!state.delete_task("task-404"));
        assert_eq!(state.tasks.len(), 9);
    }

    #[test]
    fn recent_tasks_newest_first() {
        let state = signed_in("admin@example.com", "admin123");
        let ids: Vec<&str> = state.recent_tasks(3).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["task-7", "task-4", "task-2"]);
    }

    #[test]
    fn add_task_ids_are_unique() {
        let mut state = signed_in("user@example.com", "user123");
        let now = Utc::now();
        let new = NewTask {
            title: "Write tests".into(),
            description: String::new(),
            status: TaskStatus::ToDo,
            tag: TaskTag::General,
            priority: Priority::Low,
            owner_role: Role::User,
            assigned_user: "user-2".into(),
            due_date: None,
        };
        let a = state.add_task(new.clone(), now);
        let b = state.add_task(new, now);
        assert_eq!(a.id, format!("task-{}", now.timestamp_millis()));
        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, now);
        assert_eq!(state.tasks.len(), 12);
    }

    #[test]
    fn update_task_merges_fields() {
        let mut state = AppState::seeded();
        let updated = state
            .update_task(
                "task-2",
                TaskUpdate {
                    title: Some("Rewrite docs".into()),
                    priority: Some(Priority::High),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.title, "Rewrite docs");
        assert_eq!(updated.priority, Priority::High);
        assert_eq!(updated.status, TaskStatus::ToDo);
        assert!(state.update_task("missing", TaskUpdate::default()).is_none());
    }

    #[test]
    fn snapshot_round_trips_through_storage() {
        let dir = TempDir::new().unwrap();
        let mut state = AppState::initialize(Some(stored(&dir)));
        state.login("user@example.com", "user123").unwrap();
        state.update_task(
            "task-2",
            TaskUpdate {
                status: Some(TaskStatus::InProgress),
                ..Default::default()
            },
        );

        let restored = AppState::initialize(Some(stored(&dir)));
        assert_eq!(restored.tasks, state.tasks);
        assert_eq!(restored.users, state.users);
        assert_eq!(restored.current_user, state.current_user);
        assert_eq!(restored.ui.active_view, View::Dashboard);
    }

    #[test]
    fn restored_session_keeps_saved_view() {
        let dir = TempDir::new().unwrap();
        let mut state = AppState::initialize(Some(stored(&dir)));
        state.login("admin@example.com", "admin123").unwrap();
        state.navigate(View::Reports);

        let restored = AppState::initialize(Some(stored(&dir)));
        assert_eq!(restored.ui.active_view, View::Reports);
    }

    #[test]
    fn restore_without_ui_lands_on_dashboard() {
        let mut state = AppState::seeded();
        let user = state.users[1].clone();
        state.restore(Snapshot {
            current_user: Some(user),
            ..Default::default()
        });
        assert_eq!(state.ui.active_view, View::Dashboard);
        assert!(state.current_user.as_ref().unwrap().password.is_none());
    }

    #[test]
    fn corrupt_snapshot_falls_back_to_seed() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("app_state.json"), "{ not json").unwrap();
        let state = AppState::initialize(Some(stored(&dir)));
        assert!(state.current_user.is_none());
        assert_eq!(state.tasks, seed::tasks());
        assert_eq!(state.ui.active_view, View::Login);
    }

    #[test]
    fn logout_clears_snapshot() {
        let dir = TempDir::new().unwrap();
        let mut state = AppState::initialize(Some(stored(&dir)));
        state.login("sales@example.com", "sales123").unwrap();
        assert!(stored(&dir).exists());

        state.logout();
        assert!(!stored(&dir).exists());
        assert!(state.current_user.is_none());
        assert_eq!(state.ui.active_view, View::Login);
    }

    #[test]
    fn login_sets_view_theme_and_greets() {
        let mut state = AppState::seeded();
        state.users[0].preferences.theme = crate::model::ThemeMode::Light;
        let user = state.login("admin@example.com", "admin123").unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(state.ui.active_view, View::Dashboard);
        assert_eq!(state.ui.theme, crate::model::ThemeMode::Light);
        assert_eq!(
            state.notifications.last().unwrap().message,
            "Welcome back, Sarah Anderson!"
        );
    }

    #[test]
    fn navigation_is_gated_by_role() {
        let mut state = signed_in("user@example.com", "user123");
        assert!(!state.navigate(View::Users));
        assert_eq!(state.ui.active_view, View::Dashboard);
        assert_eq!(
            state.notifications.last().unwrap().message,
            "You do not have permission to access this view"
        );
        assert!(state.navigate(View::Kanban));
        assert_eq!(state.ui.active_view, View::Kanban);
    }

    #[test]
    fn preferences_mirror_into_user_list() {
        let mut state = signed_in("user@example.com", "user123");
        state.update_user_preferences(|p| p.advanced_metrics = true);
        assert!(state.current_user.as_ref().unwrap().preferences.advanced_metrics);
        assert!(state.user_by_id("user-2").unwrap().preferences.advanced_metrics);
    }

    #[test]
    fn notification_log_is_bounded() {
        let mut state = AppState::seeded();
        for i in 0..(MAX_NOTIFICATIONS + 5) {
            state.notify(NotificationLevel::Info, format!("n{}", i));
        }
        assert_eq!(state.notifications.len(), MAX_NOTIFICATIONS);
        assert_eq!(state.notifications[0].message, "n5");
    }
}

//! Authentication and role-based access control.
//!
//! Every predicate is a pure function of the current user (or `None` when
//! nobody is signed in) and its subject. With no current user every
//! predicate is false.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use crate::model::{Role, Task, TaskStatus, TaskTag, User, View};

/// Error type for sign-in
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Username is required")]
    MissingUsername,
    #[error("Password is required")]
    MissingPassword,
    #[error("Invalid username or password. Please try again.")]
    InvalidCredentials,
}

/// Which login field an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

impl AuthError {
    /// The form field to show the error under; `None` for a form-level error
    pub fn field(&self) -> Option<LoginField> {
        match self {
            AuthError::MissingUsername => Some(LoginField::Username),
            AuthError::MissingPassword => Some(LoginField::Password),
            AuthError::InvalidCredentials => None,
        }
    }
}

/// Gated areas of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Dashboard,
    Kanban,
    Settings,
    Users,
    Reports,
    Audit,
}

impl Feature {
    pub const ALL: [Feature; 6] = [
        Feature::Dashboard,
        Feature::Kanban,
        Feature::Settings,
        Feature::Users,
        Feature::Reports,
        Feature::Audit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Feature::Dashboard => "dashboard",
            Feature::Kanban => "kanban",
            Feature::Settings => "settings",
            Feature::Users => "users",
            Feature::Reports => "reports",
            Feature::Audit => "audit",
        }
    }

    /// Roles allowed to use this feature
    pub fn roles(self) -> &'static [Role] {
        match self {
            Feature::Dashboard | Feature::Kanban | Feature::Settings => &Role::ALL,
            Feature::Users | Feature::Reports | Feature::Audit => &[Role::Admin],
        }
    }

    /// The feature guarding a view. The login screen is ungated.
    pub fn for_view(view: View) -> Option<Feature> {
        match view {
            View::Login => None,
            View::Dashboard => Some(Feature::Dashboard),
            View::Kanban => Some(Feature::Kanban),
            View::Settings => Some(Feature::Settings),
            View::Users => Some(Feature::Users),
            View::Reports => Some(Feature::Reports),
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| format!("unknown feature: {}", s))
    }
}

// ---------------------------------------------------------------------------
// Roles and features
// ---------------------------------------------------------------------------

/// Admin satisfies every role requirement
pub fn has_role(user: Option<&User>, required: Role) -> bool {
    match user {
        Some(u) => u.role == Role::Admin || u.role == required,
        None => false,
    }
}

pub fn can_access_feature(user: Option<&User>, feature: Feature) -> bool {
    user.is_some_and(|u| feature.roles().contains(&u.role))
}

/// Feature check by name. Unknown names are denied.
pub fn can_access_feature_named(user: Option<&User>, name: &str) -> bool {
    name.parse::<Feature>()
        .is_ok_and(|feature| can_access_feature(user, feature))
}

/// Whether the view can be shown. The login screen is always reachable.
pub fn can_access_view(user: Option<&User>, view: View) -> bool {
    match Feature::for_view(view) {
        Some(feature) => can_access_feature(user, feature),
        None => true,
    }
}

/// A sidebar entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub id: &'static str,
    pub label: &'static str,
    #[serde(skip)]
    pub view: View,
    /// Shortcut key in the terminal UI
    #[serde(skip)]
    pub key: char,
}

const BASE_NAV: [NavItem; 3] = [
    NavItem {
        id: "dashboard",
        label: "Dashboard",
        view: View::Dashboard,
        key: '1',
    },
    NavItem {
        id: "kanban",
        label: "Kanban",
        view: View::Kanban,
        key: '2',
    },
    NavItem {
        id: "settings",
        label: "Settings",
        view: View::Settings,
        key: '3',
    },
];

const ADMIN_NAV: [NavItem; 2] = [
    NavItem {
        id: "users",
        label: "User Management",
        view: View::Users,
        key: '4',
    },
    NavItem {
        id: "reports",
        label: "Reports",
        view: View::Reports,
        key: '5',
    },
];

/// Sidebar entry for a shortcut key, regardless of role
pub fn nav_item_by_key(key: char) -> Option<NavItem> {
    BASE_NAV.iter().chain(ADMIN_NAV.iter()).find(|i| i.key == key).copied()
}

pub fn accessible_nav_items(user: Option<&User>) -> Vec<NavItem> {
    let Some(u) = user else {
        return Vec::new();
    };
    let mut items = BASE_NAV.to_vec();
    if u.role == Role::Admin {
        items.extend(ADMIN_NAV);
    }
    items
}

// ---------------------------------------------------------------------------
// Task permissions
// ---------------------------------------------------------------------------

pub fn can_view_task(user: Option<&User>, task: &Task) -> bool {
    match user {
        None => false,
        Some(u) => match u.role {
            Role::Admin => true,
            Role::User => task.assigned_user == u.id,
            Role::Sales => task.tag == TaskTag::Sales,
        },
    }
}

pub fn can_edit_task(user: Option<&User>, task: &Task) -> bool {
    match user {
        None => false,
        Some(u) => match u.role {
            Role::Admin => true,
            Role::User => task.assigned_user == u.id,
            Role::Sales => task.tag == TaskTag::Sales && task.assigned_user == u.id,
        },
    }
}

pub fn can_delete_task(user: Option<&User>, task: &Task) -> bool {
    can_edit_task(user, task)
}

/// Moving requires edit rights; Users cannot finish tasks and Sales cannot
/// send them to Review or Done.
pub fn can_move_task(user: Option<&User>, task: &Task, status: TaskStatus) -> bool {
    let Some(u) = user else {
        return false;
    };
    if !can_edit_task(user, task) {
        return false;
    }
    match u.role {
        Role::Admin => true,
        Role::User => status != TaskStatus::Done,
        Role::Sales => !matches!(status, TaskStatus::Review | TaskStatus::Done),
    }
}

pub fn can_create_task(user: Option<&User>) -> bool {
    user.is_some()
}

/// Statuses a new task may start in
pub fn allowed_task_statuses(user: Option<&User>) -> Vec<TaskStatus> {
    match user.map(|u| u.role) {
        Some(Role::Admin) => TaskStatus::ALL.to_vec(),
        Some(Role::User) | Some(Role::Sales) => vec![
            TaskStatus::Backlog,
            TaskStatus::ToDo,
            TaskStatus::InProgress,
        ],
        None => Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Users, reports, metrics
// ---------------------------------------------------------------------------

pub fn can_manage_users(user: Option<&User>) -> bool {
    has_role(user, Role::Admin)
}

pub fn can_view_user_details(user: Option<&User>, user_id: &str) -> bool {
    user.is_some_and(|u| u.role == Role::Admin || u.id == user_id)
}

pub fn can_edit_user_details(user: Option<&User>, user_id: &str) -> bool {
    can_view_user_details(user, user_id)
}

pub fn can_view_reports(user: Option<&User>) -> bool {
    has_role(user, Role::Admin)
}

pub fn can_view_audit_logs(user: Option<&User>) -> bool {
    has_role(user, Role::Admin)
}

pub fn can_view_advanced_metrics(user: Option<&User>) -> bool {
    user.is_some_and(|u| u.role == Role::Admin || u.preferences.advanced_metrics)
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSummary {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Feature name to access flag, in sidebar order
    pub features: IndexMap<&'static str, bool>,
    pub can_create_task: bool,
    pub can_view_reports: bool,
    pub can_view_audit_logs: bool,
    pub can_manage_users: bool,
    pub can_view_advanced_metrics: bool,
    pub allowed_statuses: Vec<TaskStatus>,
    pub nav_items: Vec<NavItem>,
}

pub fn permission_summary(user: Option<&User>) -> PermissionSummary {
    PermissionSummary {
        authenticated: user.is_some(),
        user_id: user.map(|u| u.id.clone()),
        role: user.map(|u| u.role),
        name: user.map(|u| u.name.clone()),
        features: Feature::ALL
            .into_iter()
            .map(|f| (f.name(), can_access_feature(user, f)))
            .collect(),
        can_create_task: can_create_task(user),
        can_view_reports: can_view_reports(user),
        can_view_audit_logs: can_view_audit_logs(user),
        can_manage_users: can_manage_users(user),
        can_view_advanced_metrics: can_view_advanced_metrics(user),
        allowed_statuses: allowed_task_statuses(user),
        nav_items: accessible_nav_items(user),
    }
}

/// Login hint shown on the sign-in screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoCredential {
    pub role: Role,
    pub username: &'static str,
    pub password: &'static str,
    pub description: &'static str,
}

pub fn demo_credentials() -> [DemoCredential; 3] {
    [
        DemoCredential {
            role: Role::Admin,
            username: "admin@example.com",
            password: "admin123",
            description: "Full system access",
        },
        DemoCredential {
            role: Role::User,
            username: "user@example.com",
            password: "user123",
            description: "Task management only",
        },
        DemoCredential {
            role: Role::Sales,
            username: "sales@example.com",
            password: "sales123",
            description: "Sales focused access",
        },
    ]
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

/// Check the login form fields are filled in. Username wins when both are empty.
pub fn validate_login(username: &str, password: &str) -> Result<(), AuthError> {
    if username.trim().is_empty() {
        return Err(AuthError::MissingUsername);
    }
    if password.is_empty() {
        return Err(AuthError::MissingPassword);
    }
    Ok(())
}

/// Authenticate against the user list. On success the stored user's
/// `last_login` is set to `now` and a password-free copy is returned.
pub fn authenticate(
    users: &mut [User],
    username: &str,
    password: &str,
    now: DateTime<Utc>,
) -> Result<User, AuthError> {
    validate_login(username, password)?;
    let username = username.trim();
    let user = users
        .iter_mut()
        .find(|u| u.username == username)
        .filter(|u| u.password.as_deref() == Some(password))
        .ok_or(AuthError::InvalidCredentials)?;
    user.last_login = Some(now);
    Ok(user.without_password())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::seed;

    fn user_with(role: Role) -> User {
        seed::users().into_iter().find(|u| u.role == role).unwrap()
    }

    fn task(id: &str) -> Task {
        seed::tasks().into_iter().find(|t| t.id == id).unwrap()
    }

    #[test]
    fn feature_table_by_role() {
        let expected = [
            (Role::Admin, [true, true, true, true, true, true]),
            (Role::User, [true, true, true, false, false, false]),
            (Role::Sales, [true, true, true, false, false, false]),
        ];
        for (role, flags) in expected {
            let u = user_with(role);
            for (feature, want) in Feature::ALL.into_iter().zip(flags) {
                assert_eq!(
                    can_access_feature(Some(&u), feature),
                    want,
                    "{:?} -> {}",
                    role,
                    feature
                );
                assert_eq!(can_access_feature_named(Some(&u), feature.name()), want);
            }
        }
    }

    #[test]
    fn unknown_feature_and_anonymous_are_denied() {
        let admin = user_with(Role::Admin);
        assert!(!can_access_feature_named(Some(&admin), "billing"));
        assert!(!can_access_feature_named(Some(&admin), "Dashboard"));
        for feature in Feature::ALL {
            assert!(!can_access_feature(None, feature));
        }
    }

    #[test]
    fn admin_satisfies_every_role() {
        let admin = user_with(Role::Admin);
        let sales = user_with(Role::Sales);
        assert!(has_role(Some(&admin), Role::Sales));
        assert!(has_role(Some(&sales), Role::Sales));
        assert!(!has_role(Some(&sales), Role::User));
        assert!(!has_role(None, Role::User));
    }

    #[test]
    fn user_sees_and_edits_only_own_tasks() {
        let u = user_with(Role::User);
        assert!(can_view_task(Some(&u), &task("task-2")));
        assert!(can_edit_task(Some(&u), &task("task-2")));
        assert!(!can_view_task(Some(&u), &task("task-1")));
        assert!(!can_delete_task(Some(&u), &task("task-3")));
    }

    #[test]
    fn sales_views_tag_but_edits_only_own_sales_tasks() {
        let s = user_with(Role::Sales);
        let mut foreign = task("task-3");
        foreign.assigned_user = "user-1".into();
        assert!(can_view_task(Some(&s), &foreign));
        assert!(!can_edit_task(Some(&s), &foreign));
        assert!(can_edit_task(Some(&s), &task("task-5")));

        let mut own_general = task("task-2");
        own_general.assigned_user = s.id.clone();
        assert!(!can_view_task(Some(&s), &own_general));
        assert!(!can_edit_task(Some(&s), &own_general));
    }

    #[test]
    fn move_restrictions_per_role() {
        let u = user_with(Role::User);
        let s = user_with(Role::Sales);
        let admin = user_with(Role::Admin);
        let own = task("task-2");
        let sales_task = task("task-5");

        assert!(can_move_task(Some(&u), &own, TaskStatus::Review));
        assert!(!can_move_task(Some(&u), &own, TaskStatus::Done));
        assert!(can_move_task(Some(&s), &sales_task, TaskStatus::ToDo));
        assert!(!can_move_task(Some(&s), &sales_task, TaskStatus::Review));
        assert!(!can_move_task(Some(&s), &sales_task, TaskStatus::Done));
        for status in TaskStatus::ALL {
            assert!(can_move_task(Some(&admin), &own, status));
            assert!(!can_move_task(None, &own, status));
        }
    }

    #[test]
    fn allowed_statuses_exclude_review_and_done_for_non_admins() {
        let admin = user_with(Role::Admin);
        assert_eq!(allowed_task_statuses(Some(&admin)).len(), 5);
        for role in [Role::User, Role::Sales] {
            let statuses = allowed_task_statuses(Some(&user_with(role)));
            assert_eq!(
                statuses,
                vec![TaskStatus::Backlog, TaskStatus::ToDo, TaskStatus::InProgress]
            );
        }
        assert!(allowed_task_statuses(None).is_empty());
    }

    #[test]
    fn user_details_and_metrics() {
        let u = user_with(Role::User);
        let admin = user_with(Role::Admin);
        assert!(can_view_user_details(Some(&u), "user-2"));
        assert!(!can_edit_user_details(Some(&u), "user-1"));
        assert!(can_edit_user_details(Some(&admin), "user-3"));

        assert!(can_view_advanced_metrics(Some(&admin)));
        assert!(!can_view_advanced_metrics(Some(&u)));
        let mut opted_in = u.clone();
        opted_in.preferences.advanced_metrics = true;
        assert!(can_view_advanced_metrics(Some(&opted_in)));
    }

    #[test]
    fn nav_items_grow_for_admin() {
        let ids = |role: Role| -> Vec<&'static str> {
            accessible_nav_items(Some(&user_with(role)))
                .iter()
                .map(|n| n.id)
                .collect()
        };
        assert_eq!(ids(Role::Sales), vec!["dashboard", "kanban", "settings"]);
        assert_eq!(
            ids(Role::Admin),
            vec!["dashboard", "kanban", "settings", "users", "reports"]
        );
        assert!(accessible_nav_items(None).is_empty());
    }

    #[test]
    fn summary_reflects_role() {
        let summary = permission_summary(Some(&user_with(Role::Sales)));
        assert!(summary.authenticated);
        assert_eq!(summary.features.get("users"), Some(&false));
        assert_eq!(summary.features.get("kanban"), Some(&true));
        assert!(!summary.can_manage_users);

        let anon = permission_summary(None);
        assert!(!anon.authenticated);
        assert!(anon.features.values().all(|v| !v));
        let json = serde_json::to_value(&anon).unwrap();
        assert!(json.get("userId").is_none());
    }

    #[test]
    fn login_validation_order() {
        assert_eq!(validate_login("", ""), Err(AuthError::MissingUsername));
        assert_eq!(validate_login("a", ""), Err(AuthError::MissingPassword));
        assert_eq!(
            AuthError::MissingPassword.field(),
            Some(LoginField::Password)
        );
        assert!(validate_login("a", "b").is_ok());
    }

    #[test]
    fn authenticate_updates_last_login_and_strips_password() {
        let mut users = seed::users();
        let now = Utc::now();
        let signed_in = authenticate(&mut users, "sales@example.com", "sales123", now).unwrap();
        assert_eq!(signed_in.id, "user-3");
        assert!(signed_in.password.is_none());
        assert_eq!(users[2].last_login, Some(now));
        assert!(users[2].password.is_some());
    }

    #[test]
    fn authenticate_rejects_bad_credentials() {
        let mut users = seed::users();
        let now = Utc::now();
        assert_eq!(
            authenticate(&mut users, "sales@example.com", "wrong", now),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            authenticate(&mut users, "nobody@example.com", "sales123", now),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid username or password. Please try again."
        );
    }

    #[test]
    fn nav_shortcut_lookup_ignores_role() {
        assert_eq!(nav_item_by_key('2').map(|i| i.view), Some(View::Kanban));
        assert_eq!(nav_item_by_key('5').map(|i| i.id), Some("reports"));
        assert!(nav_item_by_key('9').is_none());
    }
}

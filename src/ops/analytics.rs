//! Dashboard and report aggregates, computed from the store on demand.

use indexmap::IndexMap;
use serde::Serialize;

use crate::model::{Role, Task, TaskStatus, TaskTag, User};
use crate::ops::store::{AppState, TaskCounts};

pub fn greeting(hour: u32) -> &'static str {
    if hour < 12 {
        "Good morning! Here's what's happening today."
    } else if hour < 18 {
        "Good afternoon! Keep up the great work."
    } else {
        "Good evening! Here's your end-of-day summary."
    }
}

/// A headline number on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiCard {
    pub label: &'static str,
    pub value: usize,
    pub note: &'static str,
    /// Whether the note describes an improvement
    pub up: bool,
}

/// Total, in progress, completed, and one card depending on the role
pub fn kpi_cards(state: &AppState) -> Vec<KpiCard> {
    let counts = state.task_counts();
    let mut cards = vec![
        KpiCard {
            label: "Total Tasks",
            value: counts.total,
            note: "12% from last month",
            up: true,
        },
        KpiCard {
            label: "In Progress",
            value: counts.in_progress,
            note: "Active tasks",
            up: true,
        },
        KpiCard {
            label: "Completed",
            value: counts.done,
            note: "8% from last month",
            up: true,
        },
    ];
    if let Some(card) = role_kpi(state, &counts) {
        cards.push(card);
    }
    cards
}

pub fn role_kpi(state: &AppState, counts: &TaskCounts) -> Option<KpiCard> {
    let card = match state.user()?.role {
        Role::Admin => KpiCard {
            label: "Active Users",
            value: state.users.len(),
            note: "All active",
            up: true,
        },
        Role::Sales => KpiCard {
            label: "Sales Pipeline",
            value: sales_pipeline(state).count,
            note: "5% conversion",
            up: true,
        },
        Role::User => KpiCard {
            label: "Backlog",
            value: counts.backlog,
            note: "3% less than last week",
            up: false,
        },
    };
    Some(card)
}

/// Count and whole-number percentage of a total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Share {
    pub count: usize,
    pub percent: u32,
}

impl Share {
    /// A zero total is treated as one so empty boards show 0%
    pub fn of(count: usize, total: usize) -> Share {
        let total = total.max(1);
        Share {
            count,
            percent: (count as f64 * 100.0 / total as f64).round() as u32,
        }
    }
}

/// Visible tasks per status, in board order
pub fn task_distribution(counts: &TaskCounts) -> IndexMap<TaskStatus, Share> {
    TaskStatus::ALL
        .into_iter()
        .map(|status| {
            let count = match status {
                TaskStatus::Backlog => counts.backlog,
                TaskStatus::ToDo => counts.todo,
                TaskStatus::InProgress => counts.in_progress,
                TaskStatus::Review => counts.review,
                TaskStatus::Done => counts.done,
            };
            (status, Share::of(count, counts.total))
        })
        .collect()
}

/// Top five assignees of the visible tasks by task count. Ties keep the
/// order in which assignees first appear; unknown ids are "Unassigned".
pub fn workload(state: &AppState) -> Vec<(String, usize)> {
    let mut per_user: IndexMap<String, usize> = IndexMap::new();
    for task in state.current_user_tasks() {
        let name = state
            .user_by_id(&task.assigned_user)
            .map(|u| u.name.clone())
            .unwrap_or_else(|| "Unassigned".to_string());
        *per_user.entry(name).or_insert(0) += 1;
    }
    let mut rows: Vec<(String, usize)> = per_user.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1));
    rows.truncate(5);
    rows
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Health {
    Good,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HealthMetric {
    pub label: &'static str,
    pub value: f64,
    pub lower_is_better: bool,
}

impl HealthMetric {
    pub fn health(&self) -> Health {
        if self.lower_is_better {
            if self.value > 5.0 {
                Health::Danger
            } else if self.value > 1.0 {
                Health::Warning
            } else {
                Health::Good
            }
        } else if self.value < 95.0 {
            Health::Danger
        } else if self.value < 99.0 {
            Health::Warning
        } else {
            Health::Good
        }
    }
}

pub fn system_health() -> [HealthMetric; 4] {
    [
        HealthMetric {
            label: "API Uptime",
            value: 99.9,
            lower_is_better: false,
        },
        HealthMetric {
            label: "Database Health",
            value: 98.5,
            lower_is_better: false,
        },
        HealthMetric {
            label: "Cache Hit Rate",
            value: 95.2,
            lower_is_better: false,
        },
        HealthMetric {
            label: "Error Rate",
            value: 0.1,
            lower_is_better: true,
        },
    ]
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesPipeline {
    pub count: usize,
    pub in_progress: usize,
    pub done: usize,
}

/// Totals over every Sales-tagged task, not only the visible ones
pub fn sales_pipeline(state: &AppState) -> SalesPipeline {
    let mut pipeline = SalesPipeline::default();
    for task in state.tasks.iter().filter(|t| t.tag == TaskTag::Sales) {
        pipeline.count += 1;
        match task.status {
            TaskStatus::InProgress => pipeline.in_progress += 1,
            TaskStatus::Done => pipeline.done += 1,
            _ => {}
        }
    }
    pipeline
}

// ---------------------------------------------------------------------------
// Admin views
// ---------------------------------------------------------------------------

/// One row of the user-management table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    pub id: String,
    pub avatar: String,
    pub name: String,
    pub role: Role,
    pub email: String,
    pub last_login: Option<String>,
    pub task_count: usize,
}

pub fn user_rows(state: &AppState) -> Vec<UserRow> {
    state
        .users
        .iter()
        .map(|u: &User| UserRow {
            id: u.id.clone(),
            avatar: u.avatar.clone(),
            name: u.name.clone(),
            role: u.role,
            email: u.email.clone(),
            last_login: u.last_login.map(|d| d.format("%Y-%m-%d").to_string()),
            task_count: state
                .tasks
                .iter()
                .filter(|t| t.assigned_user == u.id)
                .count(),
        })
        .collect()
}

/// System-wide figures for the reports view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub total_users: usize,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub completion_rate: u32,
    pub by_owner_role: IndexMap<Role, Share>,
    pub by_status: IndexMap<TaskStatus, Share>,
}

fn count_tasks(state: &AppState, pred: impl Fn(&Task) -> bool) -> usize {
    state.tasks.iter().filter(|t| pred(t)).count()
}

pub fn report(state: &AppState) -> Report {
    let total = state.tasks.len();
    let completed = count_tasks(state, |t| t.status == TaskStatus::Done);
    Report {
        total_users: state.users.len(),
        total_tasks: total,
        completed_tasks: completed,
        completion_rate: Share::of(completed, total).percent,
        by_owner_role: Role::ALL
            .into_iter()
            .map(|role| (role, Share::of(count_tasks(state, |t| t.owner_role == role), total)))
            .collect(),
        by_status: TaskStatus::ALL
            .into_iter()
            .map(|status| (status, Share::of(count_tasks(state, |t| t.status == status), total)))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_in(username: &str, password: &str) -> AppState {
        let mut state = AppState::seeded();
        state.login(username, password).unwrap();
        state
    }

    #[test]
    fn greeting_boundaries() {
        assert!(greeting(0).starts_with("Good morning"));
        assert!(greeting(11).starts_with("Good morning"));
        assert!(greeting(12).starts_with("Good afternoon"));
        assert!(greeting(17).starts_with("Good afternoon"));
        assert!(greeting(18).starts_with("Good evening"));
        assert!(greeting(23).starts_with("Good evening"));
    }

    #[test]
    fn role_card_differs_per_role() {
        let label = |u: &str, p: &str| {
            let state = signed_in(u, p);
            let cards = kpi_cards(&state);
            assert_eq!(cards.len(), 4);
            (cards[3].label, cards[3].value)
        };
        assert_eq!(label("admin@example.com", "admin123"), ("Active Users", 3));
        assert_eq!(label("sales@example.com", "sales123"), ("Sales Pipeline", 3));
        assert_eq!(label("user@example.com", "user123"), ("Backlog", 0));
    }

    #[test]
    fn no_role_card_when_signed_out() {
        assert_eq!(kpi_cards(&AppState::seeded()).len(), 3);
    }

    #[test]
    fn distribution_percentages() {
        let state = signed_in("admin@example.com", "admin123");
        let dist = task_distribution(&state.task_counts());
        assert_eq!(dist.len(), 5);
        assert_eq!(dist[&TaskStatus::Backlog], Share { count: 2, percent: 20 });
        assert_eq!(dist[&TaskStatus::ToDo].percent, 30);
        assert_eq!(dist[&TaskStatus::Review].percent, 0);
        assert_eq!(dist.keys().next(), Some(&TaskStatus::Backlog));
    }

    #[test]
    fn empty_distribution_is_all_zero() {
        let dist = task_distribution(&TaskCounts::default());
        assert!(dist.values().all(|s| s.percent == 0 && s.count == 0));
    }

    #[test]
    fn workload_names_and_unassigned() {
        let mut state = signed_in("admin@example.com", "admin123");
        state.tasks[1].assigned_user = "user-99".into();
        let rows = workload(&state);
        assert_eq!(rows[0], ("Sarah Anderson".to_string(), 4));
        assert_eq!(rows[1], ("Jessica Rivera".to_string(), 3));
        assert_eq!(rows[2], ("Michael Chen".to_string(), 2));
        assert_eq!(rows[3], ("Unassigned".to_string(), 1));
    }

    #[test]
    fn health_colors() {
        let metrics = system_health();
        let states: Vec<Health> = metrics.iter().map(|m| m.health()).collect();
        assert_eq!(
            states,
            vec![Health::Good, Health::Warning, Health::Warning, Health::Good]
        );
    }

    #[test]
    fn pipeline_counts_all_sales_tasks() {
        // a User does not see sales tasks but the pipeline is global
        let state = signed_in("user@example.com", "user123");
        assert_eq!(
            sales_pipeline(&state),
            SalesPipeline {
                count: 3,
                in_progress: 1,
                done: 0
            }
        );
    }

    #[test]
    fn report_shares_by_owner_role() {
        let state = signed_in("admin@example.com", "admin123");
        let r = report(&state);
        assert_eq!(r.total_tasks, 10);
        assert_eq!(r.completed_tasks, 2);
        assert_eq!(r.completion_rate, 20);
        assert_eq!(r.by_owner_role[&Role::Admin], Share { count: 4, percent: 40 });
        assert_eq!(r.by_owner_role[&Role::User].count, 3);
        assert_eq!(r.by_owner_role[&Role::Sales].percent, 30);
    }

    #[test]
    fn user_rows_count_assigned_tasks() {
        let state = signed_in("admin@example.com", "admin123");
        let rows = user_rows(&state);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].task_count, 4);
        assert_eq!(rows[2].last_login.as_deref(), Some("2024-01-14"));
    }
}

use serde::Serialize;

use crate::model::{Company, Role, Task, User, View};
use crate::ops::market::format_change;
use crate::ops::store::TaskCounts;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserJson {
    pub id: String,
    pub username: String,
    pub name: String,
    pub role: Role,
    pub avatar: String,
}

impl From<&User> for UserJson {
    fn from(u: &User) -> Self {
        UserJson {
            id: u.id.clone(),
            username: u.username.clone(),
            name: u.name.clone(),
            role: u.role,
            avatar: u.avatar.clone(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusJson {
    pub user: Option<UserJson>,
    pub active_view: View,
    pub counts: TaskCounts,
    pub data_dir: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRowJson<'a> {
    #[serde(flatten)]
    pub task: &'a Task,
    /// Display name of the assignee
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<&'a str>,
}

#[derive(Serialize)]
pub struct ExportJson {
    pub path: String,
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// One task per line: id, status, priority, tag, title, then assignee and due date
pub fn format_task_line(task: &Task, assignee: Option<&str>) -> String {
    let mut line = format!(
        "{:<8} {:<11} {:<6} {:<7} {}",
        task.id,
        task.status.label(),
        task.priority.label(),
        task.tag.label(),
        task.title
    );
    if let Some(name) = assignee {
        line.push_str(&format!("  @{}", name));
    }
    if let Some(due) = task.due_date {
        line.push_str(&format!("  due {}", due.format("%Y-%m-%d")));
    }
    line
}

/// Summary block for `edash status`
pub fn format_status(user: Option<&User>, counts: &TaskCounts) -> Vec<String> {
    let Some(user) = user else {
        return vec!["not signed in (try `edash login admin@example.com admin123`)".to_string()];
    };
    vec![
        format!("{} [{}] <{}>", user.name, user.role, user.username),
        format!(
            "tasks: {} total, {} backlog, {} to do, {} in progress, {} review, {} done",
            counts.total, counts.backlog, counts.todo, counts.in_progress, counts.review, counts.done
        ),
    ]
}

pub fn format_company_line(c: &Company) -> String {
    format!(
        "{:<6} {:<32} ${:>8.2}  {}",
        c.symbol,
        c.name,
        c.price,
        format_change(c.change)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::seed;
    use insta::assert_snapshot;

    #[test]
    fn task_lines_align() {
        let tasks = seed::tasks();
        let lines: Vec<String> = tasks[..3]
            .iter()
            .map(|t| format_task_line(t, None))
            .collect();
        assert_snapshot!(lines.join("\n"), @r"
        task-1   In Progress high   Admin   Complete Q1 Budget Review  due 2024-02-01
        task-2   To Do       medium General Update User Documentation  due 2024-02-05
        task-3   Backlog     high   Sales   Contact Top 10 Leads  due 2024-01-25
        ");
    }

    #[test]
    fn task_line_with_assignee() {
        let mut task = seed::tasks().remove(4);
        task.due_date = None;
        assert_eq!(
            format_task_line(&task, Some("Jessica Rivera")),
            "task-5   In Progress high   Sales   Quarterly Sales Report  @Jessica Rivera"
        );
    }

    #[test]
    fn status_when_signed_out() {
        let lines = format_status(None, &TaskCounts::default());
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("not signed in"));
    }

    #[test]
    fn task_row_json_flattens_task() {
        let task = &seed::tasks()[0];
        let row = TaskRowJson {
            task,
            assignee: Some("Sarah Anderson"),
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["id"], "task-1");
        assert_eq!(value["status"], "In Progress");
        assert_eq!(value["assignedUser"], "user-1");
        assert_eq!(value["assignee"], "Sarah Anderson");
    }

    #[test]
    fn company_line() {
        let companies = seed::companies(0);
        assert_eq!(
            format_company_line(&companies[2]),
            "GOOGL  Alphabet Inc.                    $  135.50  ▼ 0.2%"
        );
    }
}

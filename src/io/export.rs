use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::io::storage::{StorageError, atomic_write};
use crate::model::{Task, User};

/// The downloadable data export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    pub export_date: DateTime<Utc>,
    pub current_user: Option<User>,
    pub users: Vec<User>,
    pub tasks: Vec<Task>,
}

impl ExportData {
    /// Build an export. Passwords are stripped from every user.
    pub fn new(now: DateTime<Utc>, current_user: Option<&User>, users: &[User], tasks: &[Task]) -> Self {
        ExportData {
            export_date: now,
            current_user: current_user.map(User::without_password),
            users: users.iter().map(User::without_password).collect(),
            tasks: tasks.to_vec(),
        }
    }
}

pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("dashboard-export-{}.json", now.timestamp_millis())
}

/// Write the export as pretty JSON into `dir`, returning the file path.
pub fn write_export(dir: &Path, data: &ExportData) -> Result<PathBuf, StorageError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(data.export_date));
    let content = serde_json::to_string_pretty(data)?;
    atomic_write(&path, content.as_bytes()).map_err(|e| StorageError::WriteError {
        path: path.clone(),
        source: e,
    })?;
    Ok(path)
}

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Configuration from config.toml in the data directory. Every section is
/// optional; a missing file yields the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Snapshot file name inside the data directory
    #[serde(default = "default_snapshot_file")]
    pub snapshot_file: String,
    /// Where `export` writes when no output directory is given
    #[serde(default)]
    pub export_dir: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            snapshot_file: default_snapshot_file(),
            export_dir: None,
        }
    }
}

fn default_snapshot_file() -> String {
    "app_state.json".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Seconds a toast stays on screen
    #[serde(default = "default_toast_seconds")]
    pub toast_seconds: u64,
    /// Rows in the dashboard "recent tasks" panel
    #[serde(default = "default_recent_tasks")]
    pub recent_tasks: usize,
    /// Hex color overrides keyed by theme slot name (e.g. `highlight = "#FB4196"`)
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            toast_seconds: default_toast_seconds(),
            recent_tasks: default_recent_tasks(),
            colors: HashMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_toast_seconds() -> u64 {
    4
}

fn default_recent_tasks() -> usize {
    6
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// tracing filter directive, e.g. "info" or "enterprise_dashboard=debug"
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_file")]
    pub file: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "dashboard.log".to_string()
}

use std::fs;
use std::path::Path;

use crate::cli::commands::{ConfigAction, ConfigCmd};
use crate::io::config_io;
use crate::model::config::AppConfig;

const CONFIG_TOML_TEMPLATE: &str = r##"# edash configuration. Every key is optional.

[storage]
# Snapshot file inside the data directory
snapshot_file = "app_state.json"
# Where `edash export` writes when -o is not given
# export_dir = "/path/to/exports"

[ui]
show_key_hints = true
# Seconds a notification toast stays on screen
toast_seconds = 4
# Rows in the dashboard "Recent Tasks" panel
recent_tasks = 6

# Hex color overrides by theme slot
# [ui.colors]
# highlight = "#FB4196"

[log]
# tracing filter; EDASH_LOG overrides
level = "info"
file = "dashboard.log"
"##;

pub fn cmd_config(cmd: ConfigCmd, data_dir: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    match cmd.action {
        ConfigAction::Show => {
            let config = config_io::load_config(data_dir)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", toml::to_string_pretty(&config)?);
            }
        }
        ConfigAction::Init(args) => {
            let path = config_io::config_path(data_dir);
            if path.exists() && !args.force {
                return Err(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )
                .into());
            }
            fs::create_dir_all(data_dir)?;
            fs::write(&path, CONFIG_TOML_TEMPLATE)?;
            println!("wrote {}", path.display());
        }
        ConfigAction::Set(args) => {
            let (_config, mut doc) = config_io::read_config(data_dir)?;
            config_io::set_value(&mut doc, &args.key, &args.value)?;
            // Reject values of the wrong type before touching the file
            toml::from_str::<AppConfig>(&doc.to_string())
                .map_err(|e| format!("invalid value for {}: {}", args.key, e.message()))?;
            config_io::write_config(data_dir, &doc)?;
            println!("{} = {}", args.key, args.value);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_parses_to_defaults() {
        let config: AppConfig = toml::from_str(CONFIG_TOML_TEMPLATE).unwrap();
        let defaults = AppConfig::default();
        assert_eq!(config.storage.snapshot_file, defaults.storage.snapshot_file);
        assert_eq!(config.ui.toast_seconds, defaults.ui.toast_seconds);
        assert_eq!(config.ui.recent_tasks, defaults.ui.recent_tasks);
        assert_eq!(config.log.level, defaults.log.level);
        assert!(config.ui.colors.is_empty());
    }
}

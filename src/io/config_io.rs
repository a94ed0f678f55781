use std::fs;
use std::path::{Path, PathBuf};

use crate::io::storage::{StorageError, atomic_write};
use crate::model::config::AppConfig;

/// Error for `config set` key handling
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("expected <section>.<key>, got '{0}'")]
    InvalidKey(String),
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

/// Read config.toml, returning both the parsed config and the raw toml_edit
/// document for round-trip-safe editing. A missing file yields defaults and
/// an empty document.
pub fn read_config(data_dir: &Path) -> Result<(AppConfig, toml_edit::DocumentMut), StorageError> {
    let path = config_path(data_dir);
    if !path.exists() {
        return Ok((AppConfig::default(), toml_edit::DocumentMut::new()));
    }
    let text = fs::read_to_string(&path).map_err(|e| StorageError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    let config: AppConfig = toml::from_str(&text)?;
    let doc: toml_edit::DocumentMut = text.parse()?;
    Ok((config, doc))
}

/// Load just the parsed config
pub fn load_config(data_dir: &Path) -> Result<AppConfig, StorageError> {
    read_config(data_dir).map(|(config, _)| config)
}

/// Write the config document back to disk, preserving formatting.
pub fn write_config(data_dir: &Path, doc: &toml_edit::DocumentMut) -> Result<(), StorageError> {
    fs::create_dir_all(data_dir)?;
    let path = config_path(data_dir);
    atomic_write(&path, doc.to_string().as_bytes())
        .map_err(|e| StorageError::WriteError { path, source: e })
}

/// Set `section.key` in the document. The raw value is stored as a bool or
/// integer when it parses as one, otherwise as a string.
pub fn set_value(
    doc: &mut toml_edit::DocumentMut,
    dotted_key: &str,
    raw: &str,
) -> Result<(), ConfigError> {
    let (section, key) = dotted_key
        .split_once('.')
        .filter(|(s, k)| !s.is_empty() && !k.is_empty())
        .ok_or_else(|| ConfigError::InvalidKey(dotted_key.to_string()))?;
    if !doc.contains_key(section) {
        doc[section] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    let value = if let Ok(b) = raw.parse::<bool>() {
        toml_edit::value(b)
    } else if let Ok(n) = raw.parse::<i64>() {
        toml_edit::value(n)
    } else {
        toml_edit::value(raw)
    };
    doc[section][key] = value;
    Ok(())
}

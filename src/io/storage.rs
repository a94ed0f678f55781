use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::model::{Task, UiState, User};

/// Error type for data-directory I/O
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not serialize state: {0}")]
    SerializeError(#[from] serde_json::Error),
    #[error("could not parse config.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("could not edit config.toml: {0}")]
    ConfigEditError(#[from] toml_edit::TomlError),
    #[error("io error: {0}")]
    IoError(#[from] io::Error),
}

/// Persisted application state (written to app_state.json).
///
/// Every part is optional on read: whatever is missing keeps its seeded value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub current_user: Option<User>,
    #[serde(default)]
    pub tasks: Option<Vec<Task>>,
    #[serde(default)]
    pub users: Option<Vec<User>>,
    #[serde(default)]
    pub ui: Option<UiState>,
}

/// The snapshot slot: one JSON file inside the data directory
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
    file: String,
}

impl Storage {
    pub fn new(dir: impl Into<PathBuf>, file: impl Into<String>) -> Self {
        Storage {
            dir: dir.into(),
            file: file.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file)
    }

    pub fn exists(&self) -> bool {
        self.path().is_file()
    }

    /// Read the snapshot. `Ok(None)` when nothing has been saved yet.
    pub fn load(&self) -> Result<Option<Snapshot>, StorageError> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(|e| StorageError::ReadError {
            path: path.clone(),
            source: e,
        })?;
        let snapshot = serde_json::from_str(&content)
            .map_err(|e| StorageError::ParseError { path, source: e })?;
        Ok(Some(snapshot))
    }

    /// Write the snapshot atomically, creating the data directory if needed
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::WriteError {
            path: self.dir.clone(),
            source: e,
        })?;
        let content = serde_json::to_string_pretty(snapshot)?;
        let path = self.path();
        atomic_write(&path, content.as_bytes())
            .map_err(|e| StorageError::WriteError { path, source: e })
    }

    /// Remove the snapshot. Removing a missing snapshot is not an error.
    pub fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(self.path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::WriteError {
                path: self.path(),
                source: e,
            }),
        }
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Resolve the data directory: explicit override, then `EDASH_DATA_DIR`,
/// then `XDG_DATA_HOME`, then `~/.local/share`.
pub fn data_dir(override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }
    if let Ok(dir) = std::env::var("EDASH_DATA_DIR")
        && !dir.is_empty()
    {
        return PathBuf::from(dir);
    }
    let base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".local").join("share")
        });
    base.join("enterprise-dashboard")
}

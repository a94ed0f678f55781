use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::io::storage::StorageError;
use crate::model::config::LogConfig;

/// Environment variable that overrides `[log] level`
pub const LOG_ENV: &str = "EDASH_LOG";

/// Install the global tracing subscriber, appending to the log file in the
/// data directory. The terminal belongs to the UI, so nothing goes to stdout.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_logging(data_dir: &Path, config: &LogConfig) -> Result<(), StorageError> {
    fs::create_dir_all(data_dir)?;
    let path = data_dir.join(&config.file);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| StorageError::WriteError { path, source: e })?;

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();
    Ok(())
}

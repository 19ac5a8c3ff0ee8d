//! File-based tracing setup for the binary.

use color_eyre::{eyre::eyre, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

const DEFAULT_FILTER: &str = "planets=info";

/// Default log file location
pub fn default_log_path() -> Result<PathBuf> {
  let data_dir = dirs::data_dir()
    .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
    .ok_or_else(|| eyre!("Could not determine data directory"))?;

  Ok(data_dir.join("planets").join("planets.log"))
}

/// Install a global subscriber writing to the configured log file.
///
/// `RUST_LOG` overrides the default filter. Keep the returned guard alive
/// for the life of the process so buffered lines are flushed.
pub fn init(config: &Config) -> Result<WorkerGuard> {
  let path = match &config.log_file {
    Some(path) => path.clone(),
    None => default_log_path()?,
  };

  let (dir, file_name) = split_log_path(&path)?;
  std::fs::create_dir_all(dir)
    .map_err(|e| eyre!("Failed to create log directory {}: {}", dir.display(), e))?;

  let appender = tracing_appender::rolling::never(dir, file_name);
  let (writer, guard) = tracing_appender::non_blocking(appender);

  let env_filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

  // Ignore error if already initialized
  let _ = tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_ansi(false)
    .with_writer(writer)
    .try_init();

  Ok(guard)
}

fn split_log_path(path: &Path) -> Result<(&Path, &std::ffi::OsStr)> {
  let file_name = path
    .file_name()
    .ok_or_else(|| eyre!("Log path has no file name: {}", path.display()))?;
  let dir = path
    .parent()
    .filter(|p| !p.as_os_str().is_empty())
    .unwrap_or_else(|| Path::new("."));

  Ok((dir, file_name))
}

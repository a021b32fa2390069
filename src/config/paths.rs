//! Platform-specific configuration paths.

use crate::constants::{APP_NAME, DEFAULT_DAQ_DATABASE};
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Get the configuration directory for the current platform.
///
/// - Linux: `~/.config/rundb/`
/// - macOS: `~/Library/Application Support/rundb/`
/// - Windows: `%APPDATA%\rundb\`
pub fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(Error::ConfigDirNotFound)
}

/// Get the full path to the config file.
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Default location of the DAQ database mirror.
pub fn default_daq_database_path() -> Result<PathBuf> {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.data_dir().join(DEFAULT_DAQ_DATABASE))
        .ok_or(Error::ConfigDirNotFound)
}

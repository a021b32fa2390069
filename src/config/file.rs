//! Configuration file loading.

use crate::config::Config;
use crate::constants::CONFIG_ENV_VAR;
use crate::error::{Error, Result};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.
///
/// Returns default config if the file does not exist.
pub fn load_config_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| Error::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Where the configuration file path came from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ConfigLocation {
    /// Named by `--config` or `RUNDB_CONFIG`; must exist when loading.
    Named(PathBuf),
    /// Platform default; may be absent.
    Platform(PathBuf),
}

impl ConfigLocation {
    fn into_path(self) -> PathBuf {
        match self {
            Self::Named(path) | Self::Platform(path) => path,
        }
    }
}

/// Resolve which config file to use.
///
/// Priority: explicit path > `RUNDB_CONFIG` > platform default.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    choose_config_path(explicit, std::env::var_os(CONFIG_ENV_VAR)).map(ConfigLocation::into_path)
}

fn choose_config_path(explicit: Option<&Path>, from_env: Option<OsString>) -> Result<ConfigLocation> {
    if let Some(path) = explicit {
        return Ok(ConfigLocation::Named(path.to_path_buf()));
    }
    if let Some(path) = from_env.filter(|v| !v.is_empty()) {
        return Ok(ConfigLocation::Named(PathBuf::from(path)));
    }
    super::config_file_path().map(ConfigLocation::Platform)
}

/// Load configuration from the resolved path.
///
/// A missing platform file yields the default config; a missing file named
/// by `--config` or `RUNDB_CONFIG` is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    load_from(choose_config_path(explicit, std::env::var_os(CONFIG_ENV_VAR)))
}

fn load_from(location: Result<ConfigLocation>) -> Result<Config> {
    match location {
        Ok(ConfigLocation::Named(path)) if !path.exists() => Err(Error::ConfigRead {
            source: io::Error::new(io::ErrorKind::NotFound, "config file does not exist"),
            path,
        }),
        Ok(location) => load_config_file(&location.into_path()),
        Err(_) => Ok(Config::default()),
    }
}

/// Save configuration to a TOML file.
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::ConfigWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let contents = toml::to_string_pretty(config).map_err(|e| Error::ConfigSerialize { source: e })?;

    std::fs::write(path, contents).map_err(|e| Error::ConfigWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

//! Configuration type definitions.

use crate::constants::{TIMESTAMP_FORMAT, catalog, weeks};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Run-info catalog settings.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// DAQ database settings.
    #[serde(default)]
    pub daq: DaqConfig,

    /// Week numbering settings.
    #[serde(default)]
    pub weeks: WeeksConfig,
}

/// Run-info catalog settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Base URL; runs are fetched from `{base_url}/runs/{run}`.
    pub base_url: String,

    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: catalog::DEFAULT_BASE_URL.to_string(),
            connect_timeout_secs: catalog::DEFAULT_CONNECT_TIMEOUT_SECS,
            timeout_secs: catalog::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// DAQ database settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DaqConfig {
    /// Path to the SQLite mirror (default: platform data directory).
    pub database: Option<PathBuf>,
}

/// Week numbering settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeeksConfig {
    /// First week break (UTC).
    pub epoch: NaiveDateTime,

    /// Seconds subtracted from each reference run start.
    pub shift_back_secs: i64,

    /// Runs whose start times add week breaks, in chronological order.
    pub reference_runs: Vec<u32>,
}

impl Default for WeeksConfig {
    fn default() -> Self {
        Self {
            epoch: NaiveDateTime::parse_from_str(weeks::EPOCH, TIMESTAMP_FORMAT)
                .unwrap_or_default(),
            shift_back_secs: weeks::SHIFT_BACK_SECS,
            reference_runs: weeks::REFERENCE_RUNS.to_vec(),
        }
    }
}

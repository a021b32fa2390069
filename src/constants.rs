//! Application-wide constants.
//!
//! Catalog keys, database paths and the reference configuration for week
//! numbering live here so they are easy to find and change.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "rundb";

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV_VAR: &str = "RUNDB_CONFIG";

/// Run-type values reported by the catalog.
pub mod run_type {
    /// Source calibration runs.
    pub const SOURCE_CALIBRATION: &str = "Data-Source calibration";
}

/// Prefix of the `sourceType` value for thorium sources.
pub const THORIUM_SOURCE_PREFIX: &str = "Th";

/// Run-info catalog metadata keys.
pub mod metadata_keys {
    /// Run type, e.g. `Data-Source calibration`.
    pub const RUN_TYPE: &str = "runType";
    /// Nominal source position, e.g. `S5: P4_px (  25.4,   0.0,   0.0)`.
    pub const SOURCE_POSITION: &str = "sourcePosition";
    /// Source isotope and strength.
    pub const SOURCE_TYPE: &str = "sourceType";
    /// Run start time.
    pub const START_TIME: &str = "startTime";
}

/// Trending database paths.
pub mod trending_paths {
    /// Electron lifetime measured for the run.
    pub const PURITY: &str = "Purity/ElectronLifetime";
    /// Compton-telescope source position; matches the X, Y and Z rows.
    pub const COMPTON_SOURCE_POSITION: &str = "ComptonTelescope/SourcePosition/%";
}

/// Trigger configuration selection in the DAQ database.
pub mod trigger_config {
    /// `runConfig.configType` of the physics trigger file.
    pub const CONFIG_TYPE: i64 = 0;
    /// `runConfig.configIndex` of the physics trigger file.
    pub const CONFIG_INDEX: i64 = 0;
}

/// Week-numbering reference configuration.
pub mod weeks {
    /// First break, long before any useful data.
    pub const EPOCH: &str = "2011-05-01T00:00:00";

    /// Breaks sit this many seconds before the reference run start.
    pub const SHIFT_BACK_SECS: i64 = 10;

    /// Runs that mark hardware changes.
    ///
    /// - 2332: first logged run with new u-wire shaping times.
    /// - 2401: new APD biases.
    /// - 2424: new APD biases.
    pub const REFERENCE_RUNS: [u32; 3] = [2332, 2401, 2424];

    /// Days per week.
    pub const DAYS_PER_WEEK: i64 = 7;
}

/// Timestamp layout accepted from the catalog and the command line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Run catalog client defaults.
pub mod catalog {
    /// Default catalog base URL.
    pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
    /// Default connect timeout in seconds.
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
    /// Default request timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
}

/// Default file name of the local DAQ database mirror.
pub const DEFAULT_DAQ_DATABASE: &str = "exoddb.sqlite";

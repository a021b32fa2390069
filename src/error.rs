//! Error types for rundb.

use crate::run::RunNumber;

/// Result type alias for rundb operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for rundb.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Run is not a source calibration run.
    #[error("run {run} has type '{run_type}'; it is not a source run")]
    NotSourceRun {
        /// Run number.
        run: RunNumber,
        /// Run type reported by the catalog.
        run_type: String,
    },

    /// Source run did not use a thorium source.
    #[error("run {run} used source '{source_type}'; it is not a thorium run")]
    NotThoriumRun {
        /// Run number.
        run: RunNumber,
        /// Source type reported by the catalog.
        source_type: String,
    },

    /// Value could not be parsed as a timestamp.
    #[error("invalid timestamp: '{value}'")]
    InvalidTimestamp {
        /// The rejected input.
        value: String,
    },

    /// Timestamp precedes the first week break.
    #[error("time {time} is before start time {start}")]
    BeforeFirstWeekBreak {
        /// The rejected time.
        time: chrono::NaiveDateTime,
        /// First week break.
        start: chrono::NaiveDateTime,
    },

    /// Week break list is empty or not strictly increasing.
    #[error("invalid week breaks: {reason}")]
    InvalidWeekBreaks {
        /// Description of the problem.
        reason: String,
    },

    /// Metadata key missing from the catalog response.
    #[error("run {run} has no '{key}' metadata")]
    MissingMetadata {
        /// Run number.
        run: RunNumber,
        /// Missing key.
        key: String,
    },

    /// Query returned a different number of rows than required.
    #[error("found {found} rows of {what} for run {run}; expected exactly {expected}{hint}")]
    UnexpectedRowCount {
        /// Run number.
        run: RunNumber,
        /// What was being queried.
        what: String,
        /// Required row count.
        expected: usize,
        /// Actual row count.
        found: usize,
        /// Extra explanation appended to the message (may be empty).
        hint: String,
    },

    /// Trigger configuration row without a file.
    #[error("trigger configuration of run {run} has no file attached")]
    MissingConfigFile {
        /// Run number.
        run: RunNumber,
    },

    /// Trending value has an unusable type.
    #[error("trending value '{path}' for run {run} is not numeric")]
    InvalidTrendingValue {
        /// Run number.
        run: RunNumber,
        /// Trending path.
        path: String,
    },

    /// HTTP request to the run catalog failed.
    #[error("run catalog request to '{url}' failed")]
    CatalogRequest {
        /// Request URL.
        url: String,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Run catalog answered with something unusable.
    #[error("unexpected run catalog response from '{url}': {reason}")]
    CatalogResponse {
        /// Request URL.
        url: String,
        /// Description of the problem.
        reason: String,
    },

    /// Failed to open the DAQ database.
    #[error("failed to open DAQ database '{path}'")]
    DatabaseOpen {
        /// Path to the database file.
        path: std::path::PathBuf,
        /// Underlying database error.
        #[source]
        source: rusqlite::Error,
    },

    /// A DAQ database query failed.
    #[error("DAQ database query failed")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Internal error (for unexpected failures).
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl Error {
    /// Whether this error rejects the caller's input (bad run, bad timestamp).
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NotSourceRun { .. }
                | Self::NotThoriumRun { .. }
                | Self::InvalidTimestamp { .. }
                | Self::BeforeFirstWeekBreak { .. }
                | Self::InvalidWeekBreaks { .. }
                | Self::ConfigValidation { .. }
        )
    }

    /// Whether this error reports inconsistent data from a collaborator.
    pub const fn is_data_integrity(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedRowCount { .. }
                | Self::MissingMetadata { .. }
                | Self::MissingConfigFile { .. }
                | Self::InvalidTrendingValue { .. }
        )
    }
}

//! SQLite mirror of the DAQ database.

use super::{DaqDatabase, TrendingValue};
use crate::constants::trigger_config::{CONFIG_INDEX, CONFIG_TYPE};
use crate::error::{Error, Result};
use crate::run::RunNumber;
use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags, params};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

const TRIGGER_FILE_QUERY: &str = "
    SELECT configFile.file
    FROM runConfig LEFT JOIN configFile
        ON runConfig.configInstance = configFile.configFile
    WHERE runConfig.configType = ?1
        AND runConfig.configIndex = ?2
        AND runConfig.runIndex = ?3
";

const TRENDING_QUERY: &str = "
    SELECT path, value
    FROM trending
    WHERE runIndex = ?1 AND path LIKE ?2
    ORDER BY path
";

/// Read-only DAQ database, opened on first query.
#[derive(Debug)]
pub struct SqliteDaqDatabase {
    path: PathBuf,
    conn: Mutex<Option<Connection>>,
}

impl SqliteDaqDatabase {
    /// Database at `path`; nothing is opened until the first query.
    pub fn open_lazy(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            conn: Mutex::new(None),
        }
    }

    /// Wrap an already open connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            path: PathBuf::from(":memory:"),
            conn: Mutex::new(Some(conn)),
        }
    }

    /// Database file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the connection has been opened.
    pub fn is_open(&self) -> bool {
        self.conn.lock().map(|guard| guard.is_some()).unwrap_or(false)
    }

    fn with_connection<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let mut guard = self.conn.lock().map_err(|_| Error::Internal {
            message: "DAQ database lock poisoned".to_string(),
        })?;

        if guard.is_none() {
            info!("Opening DAQ database: {}", self.path.display());
            let conn = Connection::open_with_flags(
                &self.path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .map_err(|e| Error::DatabaseOpen {
                path: self.path.clone(),
                source: e,
            })?;
            *guard = Some(conn);
        }

        match guard.as_ref() {
            Some(conn) => f(conn),
            None => Err(Error::Internal {
                message: "DAQ database connection missing after open".to_string(),
            }),
        }
    }
}

impl DaqDatabase for SqliteDaqDatabase {
    fn trigger_config_files(&self, run: RunNumber) -> Result<Vec<Option<String>>> {
        debug!("Querying trigger config files for run {}", run);
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(TRIGGER_FILE_QUERY)?;
            let rows = stmt.query_map(params![CONFIG_TYPE, CONFIG_INDEX, run], |row| {
                row.get::<_, Value>(0)
            })?;

            rows.map(|row| Ok(text_of(row?)))
                .collect::<Result<Vec<_>>>()
        })
    }

    fn trending_values(&self, run: RunNumber, path_pattern: &str) -> Result<Vec<TrendingValue>> {
        debug!("Querying trending '{}' for run {}", path_pattern, run);
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(TRENDING_QUERY)?;
            let rows = stmt.query_map(params![run, path_pattern], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, Value>(1)?))
            })?;

            rows.map(|row| {
                let (path, value) = row?;
                let value = number_of(&value).ok_or_else(|| Error::InvalidTrendingValue {
                    run,
                    path: path.clone(),
                })?;
                Ok(TrendingValue { path, value })
            })
            .collect()
        })
    }
}

/// Config files may be stored as text or as blobs.
fn text_of(value: Value) -> Option<String> {
    match value {
        Value::Text(s) => Some(s),
        Value::Blob(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Value::Integer(i) => Some(i.to_string()),
        Value::Real(r) => Some(r.to_string()),
        Value::Null => None,
    }
}

#[allow(clippy::cast_precision_loss)]
fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Real(r) => Some(*r),
        Value::Integer(i) => Some(*i as f64),
        Value::Text(s) => s.trim().parse().ok(),
        Value::Blob(_) | Value::Null => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn seeded() -> SqliteDaqDatabase {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "
            CREATE TABLE runConfig (runIndex INTEGER, configType INTEGER,
                                    configIndex INTEGER, configInstance INTEGER);
            CREATE TABLE configFile (configFile INTEGER, file BLOB);
            CREATE TABLE trending (runIndex INTEGER, path TEXT, value);

            INSERT INTO configFile VALUES (7, CAST('<trigger/>' AS BLOB));
            INSERT INTO runConfig VALUES (2424, 0, 0, 7);
            INSERT INTO runConfig VALUES (2424, 1, 0, 7);
            INSERT INTO runConfig VALUES (2500, 0, 0, 99);

            INSERT INTO trending VALUES (6336, 'Purity/ElectronLifetime', 2400.5);
            INSERT INTO trending VALUES (6336, 'ComptonTelescope/SourcePosition/Z', 3);
            INSERT INTO trending VALUES (6336, 'ComptonTelescope/SourcePosition/X', '25.4');
            INSERT INTO trending VALUES (6336, 'ComptonTelescope/SourcePosition/Y', -1.5);
            INSERT INTO trending VALUES (6337, 'Purity/ElectronLifetime', 'n/a');
            ",
        )
        .unwrap();
        SqliteDaqDatabase::from_connection(conn)
    }

    #[test]
    fn test_trigger_file_blob_decoded() {
        let db = seeded();
        let files = db.trigger_config_files(2424).unwrap();
        assert_eq!(files, vec![Some("<trigger/>".to_string())]);
    }

    #[test]
    fn test_trigger_file_missing_instance_is_none() {
        let db = seeded();
        assert_eq!(db.trigger_config_files(2500).unwrap(), vec![None]);
    }

    #[test]
    fn test_trigger_file_unknown_run_is_empty() {
        let db = seeded();
        assert!(db.trigger_config_files(1).unwrap().is_empty());
    }

    #[test]
    fn test_trending_values_ordered_by_path() {
        let db = seeded();
        let values = db
            .trending_values(6336, "ComptonTelescope/SourcePosition/%")
            .unwrap();
        let paths: Vec<_> = values.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "ComptonTelescope/SourcePosition/X",
                "ComptonTelescope/SourcePosition/Y",
                "ComptonTelescope/SourcePosition/Z"
            ]
        );
        assert_eq!(values[0].value, 25.4);
        assert_eq!(values[1].value, -1.5);
        assert_eq!(values[2].value, 3.0);
    }

    #[test]
    fn test_non_numeric_trending_value_rejected() {
        let db = seeded();
        let err = db
            .trending_values(6337, "Purity/ElectronLifetime")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidTrendingValue { run: 6337, .. }));
    }

    #[test]
    fn test_lazy_open_defers_until_query() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.sqlite");
        let db = SqliteDaqDatabase::open_lazy(&missing);
        assert!(!db.is_open());
        assert_eq!(db.path(), missing);

        let err = db.trending_values(1, "%").unwrap_err();
        assert!(matches!(err, Error::DatabaseOpen { ref path, .. } if *path == missing));
        assert!(!db.is_open());
    }
}

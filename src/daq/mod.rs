//! DAQ and trending database access.
//!
//! Two query shapes are used: the physics trigger configuration file of a
//! run, and trending values of a run selected by a path pattern.

mod sqlite;

pub use sqlite::SqliteDaqDatabase;

use crate::error::Result;
use crate::run::RunNumber;

/// One trending row.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendingValue {
    /// Trending path, e.g. `Purity/ElectronLifetime`.
    pub path: String,
    /// Recorded value.
    pub value: f64,
}

/// Relational store of trigger configuration and trending values.
pub trait DaqDatabase {
    /// Physics trigger configuration files attached to `run`.
    ///
    /// A `None` entry is a configuration row whose file is missing.
    fn trigger_config_files(&self, run: RunNumber) -> Result<Vec<Option<String>>>;

    /// Trending values of `run` whose path matches the SQL `LIKE` pattern,
    /// ordered by path.
    fn trending_values(&self, run: RunNumber, path_pattern: &str) -> Result<Vec<TrendingValue>>;
}

impl<T: DaqDatabase + ?Sized> DaqDatabase for &T {
    fn trigger_config_files(&self, run: RunNumber) -> Result<Vec<Option<String>>> {
        (**self).trigger_config_files(run)
    }

    fn trending_values(&self, run: RunNumber, path_pattern: &str) -> Result<Vec<TrendingValue>> {
        (**self).trending_values(run, path_pattern)
    }
}

impl<T: DaqDatabase + ?Sized> DaqDatabase for Box<T> {
    fn trigger_config_files(&self, run: RunNumber) -> Result<Vec<Option<String>>> {
        (**self).trigger_config_files(run)
    }

    fn trending_values(&self, run: RunNumber, path_pattern: &str) -> Result<Vec<TrendingValue>> {
        (**self).trending_values(run, path_pattern)
    }
}

//! Test doubles for the catalog and the DAQ database.

#![allow(dead_code, clippy::unwrap_used)]

use rundb::catalog::{RunInfoSource, RunMetadata};
use rundb::daq::{DaqDatabase, TrendingValue};
use rundb::run::RunNumber;
use rundb::{Error, Result};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};

pub const SOURCE_RUN: &str = "Data-Source calibration";

/// Catalog answering from a fixed table, counting lookups.
#[derive(Default)]
pub struct FakeCatalog {
    runs: HashMap<RunNumber, BTreeMap<String, String>>,
    pub lookups: RefCell<Vec<RunNumber>>,
}

impl FakeCatalog {
    /// Catalog with the three reference runs used for week breaks.
    ///
    /// Breaks land at 2011-10-20 10:00, 2011-11-03 10:00 and 2011-11-06 10:00.
    pub fn with_reference_runs() -> Self {
        Self::default()
            .with_run(2332, &[("runType", "Data-Physics"), ("startTime", "2011-10-20T10:00:10.000+0000")])
            .with_run(2401, &[("runType", "Data-Physics"), ("startTime", "2011-11-03T10:00:10.000+0000")])
            .with_run(2424, &[("runType", "Data-Physics"), ("startTime", "2011-11-06T10:00:10.000+0000")])
    }

    pub fn with_run(mut self, run: RunNumber, fields: &[(&str, &str)]) -> Self {
        self.runs.insert(
            run,
            fields
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        );
        self
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.borrow().len()
    }
}

impl RunInfoSource for FakeCatalog {
    fn run_metadata(&self, run: RunNumber) -> Result<RunMetadata> {
        self.lookups.borrow_mut().push(run);
        self.runs
            .get(&run)
            .map(|fields| RunMetadata::new(run, fields.clone()))
            .ok_or_else(|| Error::CatalogResponse {
                url: format!("fake://runs/{run}"),
                reason: "HTTP 404 Not Found".to_string(),
            })
    }
}

/// DAQ database answering from fixed rows, counting queries.
#[derive(Default)]
pub struct FakeDaq {
    trending: Vec<(RunNumber, String, f64)>,
    trigger_files: Vec<(RunNumber, Option<String>)>,
    pub queries: Cell<usize>,
}

impl FakeDaq {
    pub fn with_trending(mut self, run: RunNumber, path: &str, value: f64) -> Self {
        self.trending.push((run, path.to_string(), value));
        self
    }

    pub fn with_trigger_file(mut self, run: RunNumber, file: Option<&str>) -> Self {
        self.trigger_files.push((run, file.map(str::to_string)));
        self
    }

    pub fn query_count(&self) -> usize {
        self.queries.get()
    }
}

/// SQL `LIKE` with only a trailing `%` wildcard, enough for the fixed paths.
fn like(path: &str, pattern: &str) -> bool {
    pattern
        .strip_suffix('%')
        .map_or_else(|| path == pattern, |prefix| path.starts_with(prefix))
}

impl DaqDatabase for FakeDaq {
    fn trigger_config_files(&self, run: RunNumber) -> Result<Vec<Option<String>>> {
        self.queries.set(self.queries.get() + 1);
        Ok(self
            .trigger_files
            .iter()
            .filter(|(r, _)| *r == run)
            .map(|(_, file)| file.clone())
            .collect())
    }

    fn trending_values(&self, run: RunNumber, path_pattern: &str) -> Result<Vec<TrendingValue>> {
        self.queries.set(self.queries.get() + 1);
        let mut rows: Vec<TrendingValue> = self
            .trending
            .iter()
            .filter(|(r, path, _)| *r == run && like(path, path_pattern))
            .map(|(_, path, value)| TrendingValue {
                path: path.clone(),
                value: *value,
            })
            .collect();
        rows.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(rows)
    }
}

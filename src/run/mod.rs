//! Run accessors over the catalog and the DAQ database.
//!
//! [`RunDatabase`] owns both collaborators plus the lazily built week
//! calendar. Accessors that only make sense for source calibration runs
//! check the run type from the catalog before touching the DAQ database.

mod types;

pub use types::{RunNumber, RunSummary, SourcePosition, SourceSummary};

use crate::catalog::{HttpRunCatalog, RunInfoSource, RunMetadata};
use crate::config::{Config, WeeksConfig, default_daq_database_path, validate_config};
use crate::constants::trending_paths;
use crate::daq::{DaqDatabase, SqliteDaqDatabase};
use crate::error::{Error, Result};
use crate::utils::date::parse_timestamp;
use crate::week::{WeekCalendar, build_calendar};
use chrono::NaiveDateTime;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Appended to row-count errors for the trigger configuration query.
const TRIGGER_FILE_HINT: &str = "; probably this run was not a physics-trigger run \
     (noise, laser and charge injection runs are handled differently)";

/// Production wiring: HTTP catalog plus SQLite DAQ mirror.
pub type DefaultRunDatabase = RunDatabase<HttpRunCatalog, SqliteDaqDatabase>;

/// Context object for run lookups.
#[derive(Debug)]
pub struct RunDatabase<C, D> {
    catalog: C,
    daq: D,
    weeks: WeeksConfig,
    calendar: Mutex<Option<Arc<WeekCalendar>>>,
}

/// Build the production [`RunDatabase`] from configuration.
///
/// Nothing is fetched or opened until the first lookup.
pub fn open(config: &Config) -> Result<DefaultRunDatabase> {
    validate_config(config)?;

    let catalog = HttpRunCatalog::from_config(&config.catalog)?;
    let database = match &config.daq.database {
        Some(path) => path.clone(),
        None => default_daq_database_path()?,
    };
    let daq = SqliteDaqDatabase::open_lazy(database);
    debug!(
        "Run database: catalog {}, DAQ mirror {}",
        catalog.base_url(),
        daq.path().display()
    );

    Ok(RunDatabase::new(catalog, daq, config.weeks.clone()))
}

impl<C: RunInfoSource, D: DaqDatabase> RunDatabase<C, D> {
    /// Create a context; the week calendar is built on first use.
    pub fn new(catalog: C, daq: D, weeks: WeeksConfig) -> Self {
        Self {
            catalog,
            daq,
            weeks,
            calendar: Mutex::new(None),
        }
    }

    /// Create a context with a ready-made week calendar.
    pub fn with_calendar(catalog: C, daq: D, calendar: WeekCalendar) -> Self {
        Self {
            catalog,
            daq,
            weeks: WeeksConfig::default(),
            calendar: Mutex::new(Some(Arc::new(calendar))),
        }
    }

    /// Run-info collaborator.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// DAQ database collaborator.
    pub fn daq(&self) -> &D {
        &self.daq
    }

    /// Catalog metadata of `run`.
    pub fn metadata(&self, run: RunNumber) -> Result<RunMetadata> {
        self.catalog.run_metadata(run)
    }

    /// Run type, e.g. `Data-Source calibration`.
    pub fn run_type(&self, run: RunNumber) -> Result<String> {
        Ok(self.metadata(run)?.run_type()?.to_string())
    }

    /// Start time of `run` in UTC.
    pub fn start_time(&self, run: RunNumber) -> Result<NaiveDateTime> {
        self.metadata(run)?.start_time()
    }

    /// Nominal source position of a source run.
    ///
    /// For example S5 reads `S5: P4_px (  25.4,   0.0,   0.0)`.
    pub fn source_location(&self, run: RunNumber) -> Result<String> {
        let meta = self.metadata(run)?;
        meta.ensure_source_run()?;
        Ok(meta.source_position()?.to_string())
    }

    /// Source type of a source run.
    pub fn source_type(&self, run: RunNumber) -> Result<String> {
        let meta = self.metadata(run)?;
        meta.ensure_source_run()?;
        Ok(meta.source_type()?.to_string())
    }

    /// Electron lifetime of a source run.
    pub fn purity(&self, run: RunNumber) -> Result<f64> {
        self.purity_of(&self.metadata(run)?)
    }

    /// Compton-telescope source position of a thorium source run.
    pub fn compton_source_location(&self, run: RunNumber) -> Result<SourcePosition> {
        self.compton_location_of(&self.metadata(run)?)
    }

    /// Physics trigger configuration file (XML text) of `run`.
    pub fn trigger_file(&self, run: RunNumber) -> Result<String> {
        let rows = self.daq.trigger_config_files(run)?;
        let [file] = exactly::<_, 1>(run, "trigger config files", rows, TRIGGER_FILE_HINT)?;
        file.ok_or(Error::MissingConfigFile { run })
    }

    /// Week calendar, built from the catalog on first call.
    pub fn week_calendar(&self) -> Result<Arc<WeekCalendar>> {
        let mut guard = self.calendar.lock().map_err(|_| Error::Internal {
            message: "week calendar lock poisoned".to_string(),
        })?;

        if let Some(calendar) = guard.as_ref() {
            return Ok(Arc::clone(calendar));
        }

        let calendar = Arc::new(build_calendar(&self.catalog, &self.weeks)?);
        *guard = Some(Arc::clone(&calendar));
        Ok(calendar)
    }

    /// Week index of a UTC instant.
    pub fn week_of_date(&self, time: NaiveDateTime) -> Result<u32> {
        self.week_calendar()?.week_of(time)
    }

    /// Week index of a timestamp string.
    ///
    /// The string is validated before the calendar is built.
    pub fn week_of_date_str(&self, value: &str) -> Result<u32> {
        let time = parse_timestamp(value)?;
        self.week_of_date(time)
    }

    /// Week index of the start of `run`.
    pub fn week_of_run(&self, run: RunNumber) -> Result<u32> {
        let start = self.start_time(run)?;
        self.week_of_date(start)
    }

    /// Collect everything known about `run` with a single catalog lookup.
    ///
    /// Missing trending data leaves purity or the Compton position empty.
    pub fn summary(&self, run: RunNumber) -> Result<RunSummary> {
        let meta = self.metadata(run)?;
        let start_time = meta.start_time()?;
        let week = self.week_of_date(start_time)?;

        let source = if meta.is_source_run()? {
            let purity = optional(self.purity_of(&meta), run, "purity")?;
            let compton_location = if meta.ensure_thorium_run().is_ok() {
                optional(self.compton_location_of(&meta), run, "Compton position")?
            } else {
                None
            };
            Some(SourceSummary {
                source_type: meta.source_type()?.to_string(),
                nominal_location: meta.source_position()?.to_string(),
                purity,
                compton_location,
            })
        } else {
            None
        };

        Ok(RunSummary {
            run,
            run_type: meta.run_type()?.to_string(),
            start_time,
            week,
            source,
        })
    }

    fn purity_of(&self, meta: &RunMetadata) -> Result<f64> {
        meta.ensure_source_run()?;
        let run = meta.run();
        let rows = self.daq.trending_values(run, trending_paths::PURITY)?;
        let [purity] = exactly::<_, 1>(run, "purity values", rows, "")?;
        Ok(purity.value)
    }

    fn compton_location_of(&self, meta: &RunMetadata) -> Result<SourcePosition> {
        meta.ensure_thorium_run()?;
        let run = meta.run();
        let rows = self
            .daq
            .trending_values(run, trending_paths::COMPTON_SOURCE_POSITION)?;
        let [x, y, z] = exactly::<_, 3>(run, "Compton source coordinates", rows, "")?;
        Ok(SourcePosition {
            x: x.value,
            y: y.value,
            z: z.value,
        })
    }
}

/// Require exactly `N` rows.
fn exactly<T, const N: usize>(
    run: RunNumber,
    what: &str,
    rows: Vec<T>,
    hint: &str,
) -> Result<[T; N]> {
    let found = rows.len();
    <[T; N]>::try_from(rows).map_err(|_| Error::UnexpectedRowCount {
        run,
        what: what.to_string(),
        expected: N,
        found,
        hint: hint.to_string(),
    })
}

/// Turn data-integrity failures into `None`, keeping other errors.
fn optional<T>(result: Result<T>, run: RunNumber, what: &str) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_data_integrity() => {
            warn!("No {} for run {}: {}", what, run, e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

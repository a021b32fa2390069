//! Run-info catalog access.
//!
//! The catalog reports per-run metadata as string key/value pairs. Only the
//! handful of keys listed in [`crate::constants::metadata_keys`] are consumed.

mod http;

pub use http::HttpRunCatalog;

use crate::constants::{THORIUM_SOURCE_PREFIX, metadata_keys, run_type};
use crate::error::{Error, Result};
use crate::run::RunNumber;
use crate::utils::date::parse_timestamp;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;

/// Source of run metadata.
pub trait RunInfoSource {
    /// Fetch all metadata recorded for `run`.
    fn run_metadata(&self, run: RunNumber) -> Result<RunMetadata>;
}

impl<T: RunInfoSource + ?Sized> RunInfoSource for &T {
    fn run_metadata(&self, run: RunNumber) -> Result<RunMetadata> {
        (**self).run_metadata(run)
    }
}

impl<T: RunInfoSource + ?Sized> RunInfoSource for Box<T> {
    fn run_metadata(&self, run: RunNumber) -> Result<RunMetadata> {
        (**self).run_metadata(run)
    }
}

/// Metadata of a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunMetadata {
    run: RunNumber,
    fields: BTreeMap<String, String>,
}

impl RunMetadata {
    /// Wrap catalog fields for `run`.
    pub fn new(run: RunNumber, fields: BTreeMap<String, String>) -> Self {
        Self { run, fields }
    }

    /// Run these fields belong to.
    pub fn run(&self) -> RunNumber {
        self.run
    }

    /// Raw field lookup.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Field lookup that fails when the key is absent.
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| Error::MissingMetadata {
            run: self.run,
            key: key.to_string(),
        })
    }

    /// Run type, e.g. `Data-Source calibration`.
    pub fn run_type(&self) -> Result<&str> {
        self.require(metadata_keys::RUN_TYPE)
    }

    /// Whether this is a source calibration run.
    pub fn is_source_run(&self) -> Result<bool> {
        Ok(self.run_type()? == run_type::SOURCE_CALIBRATION)
    }

    /// Fail with [`Error::NotSourceRun`] unless this is a source run.
    pub fn ensure_source_run(&self) -> Result<()> {
        let run_type = self.run_type()?;
        if run_type == run_type::SOURCE_CALIBRATION {
            Ok(())
        } else {
            Err(Error::NotSourceRun {
                run: self.run,
                run_type: run_type.to_string(),
            })
        }
    }

    /// Fail unless this is a source run with a thorium source.
    pub fn ensure_thorium_run(&self) -> Result<()> {
        self.ensure_source_run()?;
        let source_type = self.source_type()?;
        if source_type.trim_start().starts_with(THORIUM_SOURCE_PREFIX) {
            Ok(())
        } else {
            Err(Error::NotThoriumRun {
                run: self.run,
                source_type: source_type.to_string(),
            })
        }
    }

    /// Nominal source position string.
    pub fn source_position(&self) -> Result<&str> {
        self.require(metadata_keys::SOURCE_POSITION)
    }

    /// Source isotope and strength.
    pub fn source_type(&self) -> Result<&str> {
        self.require(metadata_keys::SOURCE_TYPE)
    }

    /// Start time in UTC.
    pub fn start_time(&self) -> Result<NaiveDateTime> {
        parse_timestamp(self.require(metadata_keys::START_TIME)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn metadata(pairs: &[(&str, &str)]) -> RunMetadata {
        RunMetadata::new(
            6336,
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_missing_key_names_run_and_key() {
        let err = metadata(&[]).run_type().unwrap_err();
        assert_eq!(err.to_string(), "run 6336 has no 'runType' metadata");
    }

    #[test]
    fn test_source_run_detection() {
        let source = metadata(&[("runType", "Data-Source calibration")]);
        assert!(source.is_source_run().unwrap());
        assert!(source.ensure_source_run().is_ok());

        let physics = metadata(&[("runType", "Data-Physics")]);
        assert!(!physics.is_source_run().unwrap());
        let err = physics.ensure_source_run().unwrap_err();
        assert!(matches!(err, Error::NotSourceRun { run: 6336, .. }));
    }

    #[test]
    fn test_thorium_detection() {
        let thorium = metadata(&[
            ("runType", "Data-Source calibration"),
            ("sourceType", "Th-228: weak"),
        ]);
        assert!(thorium.ensure_thorium_run().is_ok());

        let cobalt = metadata(&[
            ("runType", "Data-Source calibration"),
            ("sourceType", "Co-60"),
        ]);
        assert!(matches!(
            cobalt.ensure_thorium_run().unwrap_err(),
            Error::NotThoriumRun { .. }
        ));
    }

    #[test]
    fn test_thorium_check_requires_source_run() {
        let physics = metadata(&[("runType", "Data-Physics"), ("sourceType", "Th-228")]);
        assert!(matches!(
            physics.ensure_thorium_run().unwrap_err(),
            Error::NotSourceRun { .. }
        ));
    }

    #[test]
    fn test_start_time_parsed_from_catalog_format() {
        let meta = metadata(&[("startTime", "2011-09-27T22:04:46.000+0000")]);
        assert_eq!(
            meta.start_time().unwrap().to_string(),
            "2011-09-27 22:04:46"
        );
    }

    #[test]
    fn test_start_time_garbage_is_rejected() {
        let meta = metadata(&[("startTime", "yesterday")]);
        assert!(matches!(
            meta.start_time().unwrap_err(),
            Error::InvalidTimestamp { .. }
        ));
    }
}

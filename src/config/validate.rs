//! Configuration validation.

use crate::config::{CatalogConfig, Config, WeeksConfig};
use crate::error::{Error, Result};
use std::collections::HashSet;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_catalog(&config.catalog)?;
    validate_weeks(&config.weeks)?;

    if let Some(path) = &config.daq.database
        && path.as_os_str().is_empty()
    {
        return Err(Error::ConfigValidation {
            message: "daq.database must not be empty".to_string(),
        });
    }

    Ok(())
}

/// Validate catalog client settings.
fn validate_catalog(catalog: &CatalogConfig) -> Result<()> {
    let url = catalog.base_url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(Error::ConfigValidation {
            message: format!(
                "catalog.base_url must be an http(s) URL, got '{}'",
                catalog.base_url
            ),
        });
    }

    if catalog.connect_timeout_secs == 0 || catalog.timeout_secs == 0 {
        return Err(Error::ConfigValidation {
            message: "catalog timeouts must be at least 1 second".to_string(),
        });
    }

    Ok(())
}

/// Validate week numbering settings.
///
/// Chronological order of the reference runs can only be checked once their
/// start times are known, see [`crate::week::WeekCalendar::new`].
fn validate_weeks(weeks: &WeeksConfig) -> Result<()> {
    if weeks.shift_back_secs < 0 {
        return Err(Error::ConfigValidation {
            message: format!(
                "weeks.shift_back_secs must be non-negative, got {}",
                weeks.shift_back_secs
            ),
        });
    }

    let mut seen = HashSet::new();
    if let Some(dup) = weeks.reference_runs.iter().find(|run| !seen.insert(**run)) {
        return Err(Error::ConfigValidation {
            message: format!("weeks.reference_runs lists run {dup} twice"),
        });
    }

    Ok(())
}

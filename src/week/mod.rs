//! Week indexing of run start times.
//!
//! Weeks are counted from a fixed epoch, with extra breaks placed just
//! before the start of runs that changed the detector configuration.

mod calendar;

pub use calendar::WeekCalendar;

use crate::catalog::RunInfoSource;
use crate::config::WeeksConfig;
use crate::error::Result;
use chrono::Duration;
use tracing::{debug, info};

/// Build the week calendar for `config`, resolving reference run start times.
///
/// Issues one catalog lookup per reference run.
pub fn build_calendar(source: &dyn RunInfoSource, config: &WeeksConfig) -> Result<WeekCalendar> {
    let shift_back = Duration::seconds(config.shift_back_secs);

    let mut breaks = Vec::with_capacity(config.reference_runs.len() + 1);
    breaks.push(config.epoch);

    for &run in &config.reference_runs {
        let start = source.run_metadata(run)?.start_time()?;
        let week_break = start - shift_back;
        debug!("Week break from run {}: {}", run, week_break);
        breaks.push(week_break);
    }

    let calendar = WeekCalendar::new(breaks)?;
    info!(
        "Week calendar ready: {} breaks starting {}",
        calendar.breaks().len(),
        calendar.epoch()
    );
    Ok(calendar)
}

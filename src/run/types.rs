//! Values returned by run accessors.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

/// Run number as used by the catalog and the DAQ database.
pub type RunNumber = u32;

/// Reconstructed source position in detector coordinates (mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SourcePosition {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1}, {:.1})", self.x, self.y, self.z)
    }
}

/// Everything known about one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Run number.
    pub run: RunNumber,
    /// Catalog run type.
    pub run_type: String,
    /// Start time (UTC).
    pub start_time: NaiveDateTime,
    /// Week index of the start time.
    pub week: u32,
    /// Source details, present for source calibration runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceSummary>,
}

/// Source details of a calibration run.
#[derive(Debug, Clone, Serialize)]
pub struct SourceSummary {
    /// Source isotope and strength.
    pub source_type: String,
    /// Nominal position string from the catalog.
    pub nominal_location: String,
    /// Electron lifetime, if trended for the run.
    pub purity: Option<f64>,
    /// Compton-telescope position, for thorium runs with trending data.
    pub compton_location: Option<SourcePosition>,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Run {} is a {} run.", self.run, self.run_type)?;
        writeln!(f, "It started at {}.", self.start_time)?;
        write!(f, "It falls in week {}.", self.week)?;

        if let Some(source) = &self.source {
            writeln!(f)?;
            writeln!(f, "Its source was {}.", source.source_type)?;
            write!(f, "Its nominal position was {}.", source.nominal_location)?;
            if let Some(purity) = source.purity {
                write!(f, "\nIts purity was {purity:.3}.")?;
            }
            if let Some(position) = source.compton_location {
                write!(f, "\nThe Compton telescope places its position at {position}.")?;
            }
        }

        Ok(())
    }
}

//! CLI argument validators.

use crate::run::RunNumber;

/// Parse and validate a run number (positive integer).
pub fn parse_run_number(s: &str) -> Result<RunNumber, String> {
    let value: RunNumber = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a valid run number"))?;

    if value == 0 {
        return Err("run numbers start at 1".to_string());
    }

    Ok(value)
}

//! Week numbering over a fixed list of break points.

use crate::constants::weeks::DAYS_PER_WEEK;
use crate::error::{Error, Result};
use chrono::NaiveDateTime;

/// Ordered week breaks with the week-index walk over them.
///
/// Between two breaks, weeks count whole 7-day spans from the earlier break.
/// Each completed interval contributes `days / 7 + 1` weeks, so a partial
/// trailing week always counts as a full one and an interval shorter than a
/// week still advances the index by one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekCalendar {
    breaks: Vec<NaiveDateTime>,
}

impl WeekCalendar {
    /// Build a calendar from break points.
    ///
    /// # Errors
    /// Returns [`Error::InvalidWeekBreaks`] if `breaks` is empty or not
    /// strictly increasing.
    pub fn new(breaks: Vec<NaiveDateTime>) -> Result<Self> {
        if breaks.is_empty() {
            return Err(Error::InvalidWeekBreaks {
                reason: "at least one break (the epoch) is required".to_string(),
            });
        }

        if let Some(pair) = breaks.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(Error::InvalidWeekBreaks {
                reason: format!("{} is not before {}", pair[0], pair[1]),
            });
        }

        Ok(Self { breaks })
    }

    /// Break points in order; the first is the epoch.
    pub fn breaks(&self) -> &[NaiveDateTime] {
        &self.breaks
    }

    /// First break point.
    pub fn epoch(&self) -> NaiveDateTime {
        self.breaks[0]
    }

    /// Week index of `time`.
    ///
    /// Intervals are half-open: a time equal to a break belongs to the
    /// interval starting there.
    ///
    /// # Errors
    /// Returns [`Error::BeforeFirstWeekBreak`] if `time` precedes the epoch.
    pub fn week_of(&self, time: NaiveDateTime) -> Result<u32> {
        let epoch = self.epoch();
        if time < epoch {
            return Err(Error::BeforeFirstWeekBreak { time, start: epoch });
        }

        let mut leading_weeks = 0;
        for pair in self.breaks.windows(2) {
            let (start, end) = (pair[0], pair[1]);
            if time < end {
                return Ok(whole_weeks(start, time) + leading_weeks);
            }
            // Zero whole weeks between breaks still means one week passed.
            leading_weeks += whole_weeks(start, end) + 1;
        }

        let last = self.breaks[self.breaks.len() - 1];
        Ok(whole_weeks(last, time) + leading_weeks)
    }
}

/// Whole weeks from `from` to `to`, fractional days discarded.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_weeks(from: NaiveDateTime, to: NaiveDateTime) -> u32 {
    ((to - from).num_days() / DAYS_PER_WEEK) as u32
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn synthetic() -> WeekCalendar {
        let b0 = day(2011, 5, 1);
        WeekCalendar::new(vec![
            b0,
            b0 + Duration::days(14),
            b0 + Duration::days(17),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_breaks_rejected() {
        let err = WeekCalendar::new(Vec::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidWeekBreaks { .. }));
    }

    #[test]
    fn test_unordered_breaks_rejected() {
        let result = WeekCalendar::new(vec![day(2011, 6, 1), day(2011, 5, 1)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_breaks_rejected() {
        let result = WeekCalendar::new(vec![day(2011, 5, 1), day(2011, 5, 1)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_epoch_is_week_zero() {
        assert_eq!(synthetic().week_of(day(2011, 5, 1)).unwrap(), 0);
    }

    #[test]
    fn test_one_second_before_epoch_fails() {
        let err = synthetic()
            .week_of(day(2011, 5, 1) - Duration::seconds(1))
            .unwrap_err();
        assert!(matches!(err, Error::BeforeFirstWeekBreak { .. }));
        assert!(err.is_validation());
    }

    #[test]
    fn test_within_first_interval() {
        let calendar = synthetic();
        // Day 6 is still week 0, day 7 starts week 1.
        assert_eq!(calendar.week_of(day(2011, 5, 7)).unwrap(), 0);
        assert_eq!(calendar.week_of(day(2011, 5, 8)).unwrap(), 1);
        assert_eq!(
            calendar
                .week_of(day(2011, 5, 15) - Duration::seconds(1))
                .unwrap(),
            1
        );
    }

    #[test]
    fn test_boundary_belongs_to_next_interval() {
        // First interval is 14 days: 2 whole weeks + 1 for the break.
        let at_break = day(2011, 5, 1) + Duration::days(14);
        assert_eq!(synthetic().week_of(at_break).unwrap(), 3);
    }

    #[test]
    fn test_short_interval_counts_one_week() {
        let calendar = synthetic();
        // Second interval is 3 days: 0 whole weeks + 1.
        let last_break = day(2011, 5, 1) + Duration::days(17);
        assert_eq!(calendar.week_of(last_break).unwrap(), 4);
        assert_eq!(
            calendar
                .week_of(last_break - Duration::seconds(1))
                .unwrap(),
            3
        );
    }

    #[test]
    fn test_after_last_break() {
        let last_break = day(2011, 5, 1) + Duration::days(17);
        let calendar = synthetic();
        assert_eq!(
            calendar.week_of(last_break + Duration::days(6)).unwrap(),
            4
        );
        assert_eq!(
            calendar.week_of(last_break + Duration::days(7)).unwrap(),
            5
        );
        assert_eq!(
            calendar.week_of(last_break + Duration::days(70)).unwrap(),
            14
        );
    }

    #[test]
    fn test_single_break_counts_from_epoch() {
        let calendar = WeekCalendar::new(vec![day(2011, 5, 1)]).unwrap();
        assert_eq!(calendar.week_of(day(2011, 5, 29)).unwrap(), 4);
    }

    #[test]
    fn test_partial_days_discarded() {
        let calendar = WeekCalendar::new(vec![day(2011, 5, 1)]).unwrap();
        let almost_two_weeks = day(2011, 5, 15) - Duration::minutes(1);
        assert_eq!(calendar.week_of(almost_two_weeks).unwrap(), 1);
    }

    #[test]
    fn test_monotonic_across_range() {
        let calendar = synthetic();
        let mut previous = 0;
        let mut time = day(2011, 5, 1);
        while time < day(2011, 8, 1) {
            let week = calendar.week_of(time).unwrap();
            assert!(week >= previous, "week decreased at {time}");
            previous = week;
            time += Duration::hours(5);
        }
    }
}

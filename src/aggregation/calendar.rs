//! Period calendar.
//!
//! Enumerates the inclusive day sequence of a reporting period. The grid
//! renderers generate one column per [`CalendarDay`].

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::{ReportError, ReportResult};
use crate::models::{PeriodRequest, ReportPeriod};

/// Longest period a single report may cover.
pub const MAX_PERIOD_DAYS: usize = 366;

/// One day of a reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CalendarDay {
    /// Day-of-month number shown as the column heading.
    pub day_number: u32,
    /// The calendar date.
    pub date: NaiveDate,
}

/// Enumerates every day from `from` to `to`, both inclusive.
///
/// Returns an empty sequence when `to` is before `from`.
///
/// # Example
///
/// ```
/// use muster_roll::aggregation::enumerate_days;
/// use chrono::NaiveDate;
///
/// let from = NaiveDate::from_ymd_opt(2026, 1, 30).unwrap();
/// let to = NaiveDate::from_ymd_opt(2026, 2, 2).unwrap();
/// let days: Vec<u32> = enumerate_days(from, to).iter().map(|d| d.day_number).collect();
/// assert_eq!(days, vec![30, 31, 1, 2]);
///
/// assert!(enumerate_days(to, from).is_empty());
/// ```
pub fn enumerate_days(from: NaiveDate, to: NaiveDate) -> Vec<CalendarDay> {
    let mut days = Vec::new();
    let mut current = from;
    while current <= to {
        days.push(CalendarDay {
            day_number: current.day(),
            date: current,
        });
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    days
}

/// A validated reporting period with its day sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodCalendar {
    period: ReportPeriod,
    days: Vec<CalendarDay>,
}

impl PeriodCalendar {
    /// Builds the calendar for a period.
    ///
    /// An inverted range is reported as [`ReportError::InvertedPeriod`] instead
    /// of producing an empty report.
    pub fn new(period: ReportPeriod) -> ReportResult<Self> {
        let (from, to) = period.bounds()?;
        if to < from {
            return Err(ReportError::InvertedPeriod { from, to });
        }

        let span = (to - from).num_days() + 1;
        if span > MAX_PERIOD_DAYS as i64 {
            return Err(ReportError::InvalidPeriod {
                message: format!(
                    "period covers {} days, at most {} are allowed",
                    span, MAX_PERIOD_DAYS
                ),
            });
        }

        Ok(Self {
            period,
            days: enumerate_days(from, to),
        })
    }

    /// Resolves loose period inputs and builds the calendar.
    pub fn from_request(request: &PeriodRequest) -> ReportResult<Self> {
        Self::new(request.resolve()?)
    }

    /// The period this calendar covers.
    pub fn period(&self) -> &ReportPeriod {
        &self.period
    }

    /// The ordered day sequence. Never empty.
    pub fn days(&self) -> &[CalendarDay] {
        &self.days
    }

    /// Number of days in the period.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Always false for a constructed calendar.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// First day of the period.
    pub fn first_date(&self) -> NaiveDate {
        self.days[0].date
    }

    /// Last day of the period.
    pub fn last_date(&self) -> NaiveDate {
        self.days[self.days.len() - 1].date
    }

    /// Returns true if the date falls inside the period.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_date() && date <= self.last_date()
    }
}

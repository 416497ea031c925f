//! Reporting period models.
//!
//! A report covers either an explicit inclusive date range or a whole
//! calendar month. [`PeriodRequest`] carries the loose inputs a caller
//! supplies and [`ReportPeriod`] is the resolved form.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ReportError, ReportResult};

/// Loose period inputs as supplied by a caller.
///
/// Explicit dates take precedence over month/year when both are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRequest {
    /// Start date of an explicit range (inclusive).
    #[serde(default)]
    pub from: Option<NaiveDate>,
    /// End date of an explicit range (inclusive).
    #[serde(default)]
    pub to: Option<NaiveDate>,
    /// Calendar month, 1 through 12.
    #[serde(default)]
    pub month: Option<u32>,
    /// Calendar year.
    #[serde(default)]
    pub year: Option<i32>,
}

impl PeriodRequest {
    /// Resolves the inputs into a [`ReportPeriod`].
    ///
    /// # Example
    ///
    /// ```
    /// use muster_roll::models::{PeriodRequest, ReportPeriod};
    /// use chrono::NaiveDate;
    ///
    /// let request = PeriodRequest {
    ///     from: NaiveDate::from_ymd_opt(2026, 1, 5),
    ///     to: NaiveDate::from_ymd_opt(2026, 1, 6),
    ///     month: Some(3),
    ///     year: Some(2026),
    /// };
    /// // Explicit dates win over month/year.
    /// assert!(matches!(request.resolve().unwrap(), ReportPeriod::Range { .. }));
    /// ```
    pub fn resolve(&self) -> ReportResult<ReportPeriod> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => Ok(ReportPeriod::Range { from, to }),
            (Some(_), None) | (None, Some(_)) => Err(ReportError::InvalidPeriod {
                message: "both 'from' and 'to' are required for a date range".to_string(),
            }),
            (None, None) => match (self.year, self.month) {
                (Some(year), Some(month)) => ReportPeriod::month(year, month),
                _ => Err(ReportError::InvalidPeriod {
                    message: "either 'from'/'to' or 'month'/'year' must be supplied".to_string(),
                }),
            },
        }
    }
}

/// A resolved reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportPeriod {
    /// An explicit inclusive date range.
    Range {
        /// First day of the range.
        from: NaiveDate,
        /// Last day of the range.
        to: NaiveDate,
    },
    /// A whole calendar month.
    Month {
        /// Calendar year.
        year: i32,
        /// Calendar month, 1 through 12.
        month: u32,
    },
}

impl ReportPeriod {
    /// Creates a validated calendar-month period.
    pub fn month(year: i32, month: u32) -> ReportResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(ReportError::InvalidPeriod {
                message: format!("month must be between 1 and 12, got {}", month),
            });
        }
        Ok(ReportPeriod::Month { year, month })
    }

    /// Returns the first and last day of the period, both inclusive.
    ///
    /// # Example
    ///
    /// ```
    /// use muster_roll::models::ReportPeriod;
    /// use chrono::NaiveDate;
    ///
    /// let (first, last) = ReportPeriod::month(2024, 2).unwrap().bounds().unwrap();
    /// assert_eq!(first, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    /// assert_eq!(last, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    /// ```
    pub fn bounds(&self) -> ReportResult<(NaiveDate, NaiveDate)> {
        match *self {
            ReportPeriod::Range { from, to } => Ok((from, to)),
            ReportPeriod::Month { year, month } => {
                let invalid = || ReportError::InvalidPeriod {
                    message: format!("no such month: {}-{:02}", year, month),
                };
                let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
                let next_first = if month == 12 {
                    NaiveDate::from_ymd_opt(year + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(year, month + 1, 1)
                };
                let last = next_first
                    .and_then(|d| d.pred_opt())
                    .ok_or_else(invalid)?;
                Ok((first, last))
            }
        }
    }

    /// Returns the year and month used to name muster roll exports.
    ///
    /// Ranges are named after the month they start in.
    pub fn year_month(&self) -> (i32, u32) {
        match *self {
            ReportPeriod::Range { from, .. } => (from.year(), from.month()),
            ReportPeriod::Month { year, month } => (year, month),
        }
    }

    /// Human-readable label used in report headers.
    pub fn label(&self) -> String {
        match *self {
            ReportPeriod::Range { from, to } => {
                format!("{} to {}", from.format("%d %b %Y"), to.format("%d %b %Y"))
            }
            ReportPeriod::Month { year, month } => NaiveDate::from_ymd_opt(year, month, 1)
                .map(|d| d.format("%B %Y").to_string())
                .unwrap_or_else(|| format!("{}-{:02}", year, month)),
        }
    }
}

//! Day-by-day attendance summary.
//!
//! Walks a date range one day at a time and asks the source for each shift's
//! present count. A failing day degrades to a zero-filled row instead of
//! failing the whole report.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::ReportResult;
use crate::models::{ReportPeriod, Shift};
use crate::source::AttendanceSource;

use super::calendar::PeriodCalendar;

/// Present counts for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySummaryRow {
    /// The day.
    pub date: NaiveDate,
    /// Present on the morning shift.
    pub morning: u32,
    /// Present on the evening shift.
    pub evening: u32,
    /// Present on the night shift.
    pub night: u32,
    /// Present across all shifts.
    pub total: u32,
    /// True when the counts are zero because the fetch failed.
    pub failed: bool,
}

impl DailySummaryRow {
    fn from_counts(date: NaiveDate, morning: u32, evening: u32, night: u32) -> Self {
        Self {
            date,
            morning,
            evening,
            night,
            total: morning + evening + night,
            failed: false,
        }
    }

    fn zeroed(date: NaiveDate) -> Self {
        Self {
            failed: true,
            ..Self::from_counts(date, 0, 0, 0)
        }
    }

    /// Returns the count for a shift.
    pub fn count(&self, shift: Shift) -> u32 {
        match shift {
            Shift::Morning => self.morning,
            Shift::Evening => self.evening,
            Shift::Night => self.night,
        }
    }
}

/// The day-by-day summary for a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySummary {
    /// First day of the range.
    pub from: NaiveDate,
    /// Last day of the range.
    pub to: NaiveDate,
    /// One row per day, in order.
    pub rows: Vec<DailySummaryRow>,
    /// Sum of all row totals.
    pub grand_total: u32,
    /// Number of days whose fetch failed.
    pub failed_days: usize,
}

impl DailySummary {
    /// Total present on a shift across the range.
    pub fn shift_total(&self, shift: Shift) -> u32 {
        self.rows.iter().map(|r| r.count(shift)).sum()
    }
}

/// Builds the summary by querying every shift of every day in turn.
///
/// Requests are awaited one after another. With a `site_id` only that site's
/// employees are counted. An inverted or overlong range is rejected before
/// anything is fetched.
pub async fn build_daily_summary(
    source: &dyn AttendanceSource,
    from: NaiveDate,
    to: NaiveDate,
    site_id: Option<&str>,
) -> ReportResult<DailySummary> {
    let calendar = PeriodCalendar::new(ReportPeriod::Range { from, to })?;

    let mut rows = Vec::with_capacity(calendar.len());
    for day in calendar.days() {
        let row = match fetch_day(source, day.date, site_id).await {
            Ok([morning, evening, night]) => {
                DailySummaryRow::from_counts(day.date, morning, evening, night)
            }
            Err(err) => {
                warn!(date = %day.date, error = %err, "Summary fetch failed, using zero counts");
                DailySummaryRow::zeroed(day.date)
            }
        };
        rows.push(row);
    }

    let grand_total = rows.iter().map(|r| r.total).sum();
    let failed_days = rows.iter().filter(|r| r.failed).count();

    info!(
        from = %from,
        to = %to,
        site_id = site_id.unwrap_or("all"),
        days = rows.len(),
        failed_days,
        grand_total,
        "Built daily summary"
    );

    Ok(DailySummary {
        from,
        to,
        rows,
        grand_total,
        failed_days,
    })
}

async fn fetch_day(
    source: &dyn AttendanceSource,
    date: NaiveDate,
    site_id: Option<&str>,
) -> ReportResult<[u32; 3]> {
    let mut counts = [0; 3];
    for (slot, shift) in counts.iter_mut().zip(Shift::ALL) {
        *slot = source.attendance_summary(date, shift, site_id).await?;
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use crate::source::InMemorySource;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
    }

    fn source() -> InMemorySource {
        InMemorySource::default()
            .with_summary(date(5), Shift::Morning, 3)
            .with_summary(date(5), Shift::Evening, 2)
            .with_summary(date(5), Shift::Night, 1)
            .with_summary(date(6), Shift::Morning, 4)
            .with_summary(date(7), Shift::Night, 5)
    }

    #[tokio::test]
    async fn test_summary_has_one_row_per_day() {
        let summary = build_daily_summary(&source(), date(5), date(7), None).await.unwrap();

        assert_eq!(summary.rows.len(), 3);
        assert_eq!(summary.rows[0].total, 6);
        assert_eq!(summary.rows[1].morning, 4);
        assert_eq!(summary.rows[2].night, 5);
        assert_eq!(summary.grand_total, 15);
        assert_eq!(summary.failed_days, 0);
        assert_eq!(summary.shift_total(Shift::Morning), 7);
    }

    #[tokio::test]
    async fn test_failed_day_is_zero_filled() {
        let source = source().with_failing_day(date(6));

        let summary = build_daily_summary(&source, date(5), date(7), None).await.unwrap();

        assert_eq!(summary.rows.len(), 3);
        assert_eq!(summary.rows[0].total, 6);
        assert!(summary.rows[1].failed);
        assert_eq!(summary.rows[1].morning, 0);
        assert_eq!(summary.rows[1].evening, 0);
        assert_eq!(summary.rows[1].night, 0);
        assert_eq!(summary.rows[1].total, 0);
        assert_eq!(summary.rows[2].night, 5);
        assert_eq!(summary.failed_days, 1);
        assert_eq!(summary.grand_total, 11);
    }

    #[tokio::test]
    async fn test_site_summary_counts_only_that_site() {
        let source = source()
            .with_site("s1", &["e1"])
            .with_site_summary("s1", date(5), Shift::Morning, 1)
            .with_site_summary("s1", date(7), Shift::Night, 2);

        let summary = build_daily_summary(&source, date(5), date(7), Some("s1"))
            .await
            .unwrap();

        assert_eq!(summary.rows[0].morning, 1);
        assert_eq!(summary.rows[0].total, 1);
        assert_eq!(summary.rows[1].total, 0);
        assert_eq!(summary.rows[2].night, 2);
        assert_eq!(summary.grand_total, 3);
        assert_eq!(summary.failed_days, 0);
    }

    #[tokio::test]
    async fn test_inverted_range_is_rejected() {
        let result = build_daily_summary(&source(), date(7), date(5), None).await;
        assert!(matches!(result, Err(ReportError::InvertedPeriod { .. })));
    }
}

//! Attendance aggregation for the muster roll engine.
//!
//! This module contains the period calendar, the record aggregator, the
//! single-status classifier, totals, row filtering, the assembled
//! [`MusterRoll`], and the day-by-day summary builder.

mod aggregator;
mod calendar;
mod classifier;
mod filter;
mod muster_roll;
mod summary;
mod totals;

pub use aggregator::{Aggregation, AggregationMode, DuplicateEntry, aggregate};
pub use calendar::{CalendarDay, MAX_PERIOD_DAYS, PeriodCalendar, enumerate_days};
pub use classifier::{AttendanceStatus, classify, classify_with_shift};
pub use filter::RowFilter;
pub use muster_roll::MusterRoll;
pub use summary::{DailySummary, DailySummaryRow, build_daily_summary};
pub use totals::{PeriodTotals, compute_totals};

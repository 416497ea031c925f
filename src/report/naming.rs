//! Export formats and file names.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::ReportPeriod;

use super::context::ReportScope;

/// A user-facing export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Spreadsheet workbook.
    Xlsx,
    /// Paginated landscape document.
    Pdf,
    /// Plain-text document.
    #[serde(alias = "text")]
    Txt,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Txt => "txt",
        }
    }

    /// MIME type of the exported bytes.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Txt => "text/plain; charset=utf-8",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            "pdf" => Ok(ExportFormat::Pdf),
            "txt" | "text" => Ok(ExportFormat::Txt),
            other => Err(format!("unknown export format: {}", other)),
        }
    }
}

/// File name for a muster roll export.
///
/// # Example
///
/// ```
/// use muster_roll::models::ReportPeriod;
/// use muster_roll::report::{muster_roll_file_name, ExportFormat, ReportScope};
///
/// let period = ReportPeriod::month(2026, 1).unwrap();
/// assert_eq!(
///     muster_roll_file_name(&ReportScope::Global, &period, ExportFormat::Xlsx),
///     "All_Sites_MusterRoll_2026_01.xlsx"
/// );
/// ```
pub fn muster_roll_file_name(
    scope: &ReportScope,
    period: &ReportPeriod,
    format: ExportFormat,
) -> String {
    let (year, month) = period.year_month();
    format!(
        "{}_MusterRoll_{}_{:02}.{}",
        scope.file_prefix(),
        year,
        month,
        format.extension()
    )
}

/// File name for a day-by-day summary export.
pub fn summary_file_name(
    scope: &ReportScope,
    from: NaiveDate,
    to: NaiveDate,
    format: ExportFormat,
) -> String {
    format!(
        "{}_SummaryReport_{}_{}.{}",
        scope.file_prefix(),
        from.format("%Y-%m-%d"),
        to.format("%Y-%m-%d"),
        format.extension()
    )
}

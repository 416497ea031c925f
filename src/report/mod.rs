//! Report rendering.
//!
//! Turns a built [`MusterRoll`] or [`DailySummary`] into an on-screen table,
//! a spreadsheet workbook or a paginated document, and names the exported
//! file.

mod context;
pub mod document;
mod naming;
mod spreadsheet;
mod table;

use tracing::info;

use crate::aggregation::{DailySummary, MusterRoll, PeriodCalendar};
use crate::config::EngineConfig;
use crate::error::ReportResult;

pub use context::{ReportContext, ReportScope};
pub use naming::{ExportFormat, muster_roll_file_name, summary_file_name};
pub use spreadsheet::{
    SheetCell, info_rows, muster_roll_grid, muster_roll_workbook, summary_grid, summary_workbook,
};
pub use table::{TOTAL_LABEL, TableCell, TablePage, TableRow, TableView, TotalsRow};

/// Column headings shared by every muster roll rendering.
pub fn grid_headers(calendar: &PeriodCalendar) -> Vec<String> {
    let mut headers: Vec<String> = ["SR", "NAME", "DESIGNATION", "SHIFT"]
        .into_iter()
        .map(String::from)
        .collect();
    headers.extend(calendar.days().iter().map(|d| d.day_number.to_string()));
    headers.push(TOTAL_LABEL.to_string());
    headers
}

/// An exported report ready to be written or served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    /// Derived file name.
    pub file_name: String,
    /// Actual format of `bytes`.
    pub format: ExportFormat,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl ExportedFile {
    /// MIME type of the contents.
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}

/// Exports a muster roll in the requested format.
pub fn export_muster_roll(
    roll: &MusterRoll,
    context: &ReportContext,
    config: &EngineConfig,
    format: ExportFormat,
    allow_text_fallback: bool,
) -> ReportResult<ExportedFile> {
    let (format, bytes) = match format {
        ExportFormat::Xlsx => (format, muster_roll_workbook(roll, context)?),
        ExportFormat::Pdf | ExportFormat::Txt => {
            let layout = document::lay_out_muster_roll(
                roll,
                context,
                &config.organization().muster_roll_title,
                &config.report().document,
            );
            let rendered = document::render_document(&layout, format, allow_text_fallback)?;
            (rendered.format, rendered.bytes)
        }
    };

    let file_name = muster_roll_file_name(&context.scope, roll.calendar().period(), format);
    info!(
        file_name = %file_name,
        rows = roll.rows().len(),
        bytes = bytes.len(),
        "Exported muster roll"
    );

    Ok(ExportedFile {
        file_name,
        format,
        bytes,
    })
}

/// Exports a day-by-day summary in the requested format.
pub fn export_summary(
    summary: &DailySummary,
    context: &ReportContext,
    config: &EngineConfig,
    format: ExportFormat,
    allow_text_fallback: bool,
) -> ReportResult<ExportedFile> {
    let (format, bytes) = match format {
        ExportFormat::Xlsx => (format, summary_workbook(summary)?),
        ExportFormat::Pdf | ExportFormat::Txt => {
            let layout = document::lay_out_summary(
                summary,
                context,
                &config.organization().summary_title,
                &config.report().document,
            );
            let rendered = document::render_document(&layout, format, allow_text_fallback)?;
            (rendered.format, rendered.bytes)
        }
    };

    let file_name = summary_file_name(&context.scope, summary.from, summary.to, format);
    info!(
        file_name = %file_name,
        days = summary.rows.len(),
        bytes = bytes.len(),
        "Exported summary"
    );

    Ok(ExportedFile {
        file_name,
        format,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::{AggregationMode, RowFilter};
    use crate::config::ConfigLoader;
    use crate::models::ReportPeriod;

    fn config() -> EngineConfig {
        ConfigLoader::load("./config/default").unwrap().config().clone()
    }

    fn roll() -> MusterRoll {
        let calendar = PeriodCalendar::new(ReportPeriod::month(2026, 3).unwrap()).unwrap();
        MusterRoll::build(
            &[],
            &[],
            calendar,
            AggregationMode::Sparse,
            RowFilter::default(),
            "%H:%M",
        )
    }

    #[test]
    fn test_export_names_file_after_scope_and_month() {
        let context = ReportContext::new(
            "Northfield",
            ReportScope::Site {
                id: "s1".to_string(),
                name: "East Wing".to_string(),
            },
        );

        let file = export_muster_roll(&roll(), &context, &config(), ExportFormat::Xlsx, false).unwrap();
        assert_eq!(file.file_name, "East_Wing_MusterRoll_2026_03.xlsx");
        assert_eq!(file.content_type(), ExportFormat::Xlsx.content_type());

        let text = export_muster_roll(&roll(), &context, &config(), ExportFormat::Txt, false).unwrap();
        assert_eq!(text.file_name, "East_Wing_MusterRoll_2026_03.txt");
        let body = String::from_utf8(text.bytes).unwrap();
        assert!(body.contains("Muster Roll"));
        assert!(body.contains("Scope: East Wing"));
    }

    #[test]
    fn test_headers_for_month() {
        let headers = grid_headers(roll().calendar());
        assert_eq!(headers.len(), 4 + 31 + 1);
        assert_eq!(headers[4], "1");
        assert_eq!(headers.last().map(String::as_str), Some(TOTAL_LABEL));
    }
}

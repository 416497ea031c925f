//! Plain-text document backend.

use crate::error::ReportResult;
use crate::report::naming::ExportFormat;

use super::DocumentBackend;
use super::layout::{DocumentLayout, DocumentRow};

/// Renders a layout as fixed-width text, one form feed between pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextBackend;

impl DocumentBackend for TextBackend {
    fn format(&self) -> ExportFormat {
        ExportFormat::Txt
    }

    fn render(&self, layout: &DocumentLayout) -> ReportResult<Vec<u8>> {
        Ok(render_text(layout).into_bytes())
    }
}

/// Renders a layout to a string.
pub fn render_text(layout: &DocumentLayout) -> String {
    let widths = column_widths(layout);
    let mut out = String::new();

    for (index, page) in layout.pages.iter().enumerate() {
        if index > 0 {
            out.push('\u{c}');
            out.push('\n');
        }

        out.push_str(&layout.header.organization);
        out.push('\n');
        out.push_str(&layout.header.title);
        out.push('\n');
        out.push_str(&format!(
            "Period: {}    Scope: {}\n",
            layout.header.period, layout.header.scope
        ));
        if !layout.header.filters.is_empty() {
            out.push_str(&format!("Filters: {}\n", layout.header.filters.join("; ")));
        }
        out.push('\n');

        let headings: Vec<&str> = layout.columns.iter().map(|c| c.heading.as_str()).collect();
        push_line(&mut out, &headings, &widths);
        let rule: usize = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);
        out.push_str(&"-".repeat(rule));
        out.push('\n');

        for row in &page.rows {
            let cells = flatten(row);
            let cells: Vec<&str> = cells.iter().map(String::as_str).collect();
            push_line(&mut out, &cells, &widths);
        }

        let (left, right) = layout.footer(page);
        out.push('\n');
        out.push_str(&format!("{}    {}\n", left, right));
    }

    out
}

fn flatten(row: &DocumentRow) -> Vec<String> {
    row.cells.iter().map(|lines| lines.join(" ")).collect()
}

fn column_widths(layout: &DocumentLayout) -> Vec<usize> {
    let mut widths: Vec<usize> = layout
        .columns
        .iter()
        .map(|c| c.heading.chars().count())
        .collect();
    for row in layout.pages.iter().flat_map(|p| &p.rows) {
        for (width, cell) in widths.iter_mut().zip(flatten(row)) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths
}

fn push_line(out: &mut String, cells: &[&str], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
        .collect();
    out.push_str(padded.join(" | ").trim_end());
    out.push('\n');
}

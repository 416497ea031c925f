//! PDF document backend drawn with builtin Helvetica.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use tracing::debug;

use crate::error::{ReportError, ReportResult};
use crate::report::naming::ExportFormat;

use super::DocumentBackend;
use super::layout::{DocumentLayout, DocumentPage};

/// Approximate advance of a Helvetica glyph, as a fraction of the font size.
const GLYPH_WIDTH_FACTOR: f32 = 0.5;
const PT_TO_MM: f32 = 0.3528;

/// Draws a layout into a landscape PDF.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfBackend;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl DocumentBackend for PdfBackend {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    fn render(&self, layout: &DocumentLayout) -> ReportResult<Vec<u8>> {
        let settings = &layout.settings;
        let width = Mm(settings.page_width_mm);
        let height = Mm(settings.page_height_mm);

        let (doc, first_page, first_layer) =
            PdfDocument::new(layout.header.title.as_str(), width, height, "Layer 1");
        let fonts = Fonts {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(pdf_error)?,
        };

        let mut handles = vec![(first_page, first_layer)];
        for number in 2..=layout.page_count() {
            handles.push(doc.add_page(width, height, format!("Page {}", number)));
        }

        for (page, (page_index, layer_index)) in layout.pages.iter().zip(handles) {
            let layer = doc.get_page(page_index).get_layer(layer_index);
            draw_page(&layer, layout, page, &fonts);
        }

        let bytes = doc.save_to_bytes().map_err(pdf_error)?;
        debug!(pages = layout.page_count(), bytes = bytes.len(), "Rendered PDF document");
        Ok(bytes)
    }
}

fn draw_page(layer: &PdfLayerReference, layout: &DocumentLayout, page: &DocumentPage, fonts: &Fonts) {
    let settings = &layout.settings;
    let page_height = settings.page_height_mm;
    let margin = settings.margin_mm;
    let body_size = settings.font_size_pt;
    let line = settings.line_height_mm;
    // Baseline from the top of a text line.
    let to_y = |top: f32| Mm(page_height - top);

    let header = &layout.header;
    let mut top = margin + settings.title_font_size_pt * PT_TO_MM;
    layer.use_text(
        header.organization.as_str(),
        settings.title_font_size_pt,
        Mm(margin),
        to_y(top),
        &fonts.bold,
    );
    top += line * 2.5;
    layer.use_text(
        format!("{} - {}", header.title, header.period),
        body_size * 1.6,
        Mm(margin),
        to_y(top),
        &fonts.regular,
    );
    top += line * 2.0;
    let mut details = format!("Scope: {}", header.scope);
    if !header.filters.is_empty() {
        details.push_str(&format!("    Filters: {}", header.filters.join("; ")));
    }
    layer.use_text(details, body_size * 1.3, Mm(margin), to_y(top), &fonts.regular);

    let padding = settings.row_padding_mm / 2.0;
    let mut row_top = layout.table_top_mm();
    for column in &layout.columns {
        layer.use_text(
            column.heading.as_str(),
            body_size,
            Mm(column.x_mm + padding),
            to_y(row_top + padding + line),
            &fonts.bold,
        );
    }
    row_top += layout.heading_height_mm;

    for row in &page.rows {
        let font = if row.emphasis { &fonts.bold } else { &fonts.regular };
        for (column, lines) in layout.columns.iter().zip(&row.cells) {
            for (offset, text) in lines.iter().enumerate() {
                if text.is_empty() {
                    continue;
                }
                let baseline = row_top + padding + line * (offset as f32 + 1.0);
                layer.use_text(
                    text.as_str(),
                    body_size,
                    Mm(column.x_mm + padding),
                    to_y(baseline),
                    font,
                );
            }
        }
        row_top += row.height_mm;
    }

    let (left, right) = layout.footer(page);
    let footer_y = Mm(margin);
    layer.use_text(left, body_size, Mm(margin), footer_y, &fonts.regular);
    let right_width = right.chars().count() as f32 * body_size * PT_TO_MM * GLYPH_WIDTH_FACTOR;
    layer.use_text(
        right,
        body_size,
        Mm(settings.page_width_mm - margin - right_width),
        footer_y,
        &fonts.regular,
    );
}

fn pdf_error(err: printpdf::Error) -> ReportError {
    ReportError::Export {
        format: "pdf".to_string(),
        message: format!("{:?}", err),
    }
}

//! Paginated document rendering.
//!
//! A report is first laid out into [`DocumentLayout`] pages, then handed to a
//! [`DocumentBackend`]. The PDF backend is compiled in with the `pdf` feature;
//! the text backend is always available.

mod layout;
#[cfg(feature = "pdf")]
mod pdf;
mod text;

use tracing::warn;

use crate::error::{ReportError, ReportResult};

use super::naming::ExportFormat;

pub use layout::{
    DocumentColumn, DocumentHeader, DocumentLayout, DocumentPage, DocumentRow, ELLIPSIS,
    cell_lines, day_column_width, lay_out_muster_roll, lay_out_summary, truncate_name,
};
#[cfg(feature = "pdf")]
pub use pdf::PdfBackend;
pub use text::{TextBackend, render_text};

/// Draws a laid out document into bytes.
pub trait DocumentBackend {
    /// Format of the produced bytes.
    fn format(&self) -> ExportFormat;

    /// Renders every page of the layout.
    fn render(&self, layout: &DocumentLayout) -> ReportResult<Vec<u8>>;
}

/// A rendered document and the format it ended up in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    /// Actual format of `bytes`.
    pub format: ExportFormat,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// Returns true if the PDF backend is compiled in.
pub fn pdf_available() -> bool {
    cfg!(feature = "pdf")
}

/// Selects the backend for a document format.
pub fn backend_for(format: ExportFormat) -> ReportResult<Box<dyn DocumentBackend>> {
    match format {
        ExportFormat::Txt => Ok(Box::new(TextBackend)),
        ExportFormat::Pdf => pdf_backend(),
        ExportFormat::Xlsx => Err(ReportError::InvalidRequest {
            field: "format".to_string(),
            message: "xlsx is not a document format".to_string(),
        }),
    }
}

#[cfg(feature = "pdf")]
fn pdf_backend() -> ReportResult<Box<dyn DocumentBackend>> {
    Ok(Box::new(PdfBackend))
}

#[cfg(not(feature = "pdf"))]
fn pdf_backend() -> ReportResult<Box<dyn DocumentBackend>> {
    Err(ReportError::ExportUnavailable {
        format: "pdf".to_string(),
        reason: "built without the `pdf` feature".to_string(),
    })
}

/// Renders a layout in the requested format.
///
/// When `allow_text_fallback` is set and the requested backend is missing or
/// fails, the plain-text backend is used instead and the returned format says
/// so. Otherwise the error is returned and no bytes are produced.
pub fn render_document(
    layout: &DocumentLayout,
    format: ExportFormat,
    allow_text_fallback: bool,
) -> ReportResult<RenderedDocument> {
    let rendered = backend_for(format).and_then(|backend| {
        backend.render(layout).map(|bytes| RenderedDocument {
            format: backend.format(),
            bytes,
        })
    });

    match rendered {
        Ok(document) => Ok(document),
        Err(err) if allow_text_fallback && format != ExportFormat::Txt => {
            warn!(
                format = format.extension(),
                error = %err,
                "Document backend unavailable, falling back to plain text"
            );
            Ok(RenderedDocument {
                format: ExportFormat::Txt,
                bytes: TextBackend.render(layout)?,
            })
        }
        Err(err) => Err(err),
    }
}

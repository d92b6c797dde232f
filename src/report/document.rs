//! PDF report renderer.
//!
//! Lays the narrative summary out as monospaced text on A4 pages, so the
//! PDF carries exactly the content of the text report.

use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::error::{BoxedCause, EngineError, EngineResult};
use crate::models::AnalyticsSnapshot;

use super::narrative::TITLE;
use super::{NarrativeRenderer, ReportFormat, ReportRenderer};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;
const FONT_SIZE_PT: f32 = 9.0;
const LINE_HEIGHT_MM: f32 = 4.5;
const LAYER: &str = "Report";

/// Renders a snapshot as a PDF document.
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    narrative: NarrativeRenderer,
}

impl PdfRenderer {
    /// Creates a renderer listing `top_employees` employees.
    pub fn new(top_employees: usize, currency_symbol: impl Into<String>) -> Self {
        Self {
            narrative: NarrativeRenderer::new(top_employees, currency_symbol),
        }
    }
}

fn lines_per_page() -> usize {
    ((PAGE_HEIGHT_MM - 2.0 * MARGIN_MM) / LINE_HEIGHT_MM) as usize
}

/// Writes `text` one line at a time, starting a new page when one fills.
fn layout(text: &str) -> Result<Vec<u8>, printpdf::Error> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        TITLE,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        LAYER,
    );
    let font = doc.add_builtin_font(BuiltinFont::Courier)?;

    let lines: Vec<&str> = text.lines().collect();
    for (index, chunk) in lines.chunks(lines_per_page()).enumerate() {
        let (page, layer) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER)
        };
        let layer = doc.get_page(page).get_layer(layer);
        for (row, line) in chunk.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let y = PAGE_HEIGHT_MM - MARGIN_MM - LINE_HEIGHT_MM * (row as f32 + 1.0);
            layer.use_text(*line, FONT_SIZE_PT, Mm(MARGIN_MM), Mm(y), &font);
        }
    }

    doc.save_to_bytes()
}

impl ReportRenderer for PdfRenderer {
    fn format(&self) -> ReportFormat {
        ReportFormat::Pdf
    }

    fn render(&self, snapshot: &AnalyticsSnapshot) -> EngineResult<Vec<u8>> {
        let render_err = |e: BoxedCause| EngineError::render_failed(ReportFormat::Pdf.as_str(), e);
        let text = self
            .narrative
            .document(snapshot)
            .map_err(|e| render_err(e.into()))?;
        layout(&text).map_err(|e| render_err(e.into()))
    }
}

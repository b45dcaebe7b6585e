//! PDF rendering for stroke risk reports.
//!
//! Lines are planned here and drawn with `printpdf` using the built-in
//! Helvetica fonts. Document dates and id are pinned so equal reports give
//! byte-identical files.

pub mod layout;

pub use layout::{plan, to_latin1, PageSetup, PlacedLine, PlannedPage, Weight};

use printpdf::{BuiltinFont, CustomPdfConformance, Mm, PdfConformance, PdfDocument};
use stroke_risk_core::export::{
    DocumentRenderer, RenderError, RenderResult, ReportDocument, PDF_FILE_NAME, PDF_MEDIA_TYPE,
    REPORT_TITLE,
};
use time::OffsetDateTime;

const LAYER_NAME: &str = "Report";
const DOCUMENT_ID: &str = "stroke-risk-report";

/// Renders report documents as PDF bytes.
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    setup: PageSetup,
}

impl PdfRenderer {
    pub fn new(setup: PageSetup) -> RenderResult<Self> {
        if !setup.is_usable() {
            return Err(RenderError::Unsupported(format!(
                "page setup leaves no room for text: {:?}",
                setup
            )));
        }
        Ok(Self { setup })
    }

    pub fn setup(&self) -> &PageSetup {
        &self.setup
    }
}

impl DocumentRenderer for PdfRenderer {
    fn media_type(&self) -> &'static str {
        PDF_MEDIA_TYPE
    }

    fn file_name(&self) -> &'static str {
        PDF_FILE_NAME
    }

    fn render(&self, document: &ReportDocument) -> RenderResult<Vec<u8>> {
        let setup = &self.setup;
        let pages = plan(document, setup);
        let (width, height) = (Mm(setup.width_mm), Mm(setup.height_mm));

        let (doc, first_page, first_layer) =
            PdfDocument::new(REPORT_TITLE, width, height, LAYER_NAME);
        let doc = doc
            .with_conformance(PdfConformance::Custom(CustomPdfConformance {
                requires_icc_profile: false,
                requires_xmp_metadata: false,
                ..Default::default()
            }))
            .with_document_id(DOCUMENT_ID.to_string())
            .with_creation_date(OffsetDateTime::UNIX_EPOCH)
            .with_mod_date(OffsetDateTime::UNIX_EPOCH)
            .with_metadata_date(OffsetDateTime::UNIX_EPOCH);

        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(backend_error)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(backend_error)?;

        for (number, page) in pages.iter().enumerate() {
            let (page_index, layer_index) = if number == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(width, height, LAYER_NAME)
            };
            let layer = doc.get_page(page_index).get_layer(layer_index);

            for line in &page.lines {
                let font = match line.weight {
                    Weight::Regular => &regular,
                    Weight::Bold => &bold,
                };
                layer.use_text(
                    line.text.as_str(),
                    setup.font_size_pt,
                    Mm(line.x_mm),
                    Mm(line.baseline_mm),
                    font,
                );
            }
        }

        let bytes = doc.save_to_bytes().map_err(backend_error)?;
        tracing::debug!("Rendered PDF report: {} page(s), {} bytes", pages.len(), bytes.len());

        Ok(bytes)
    }
}

fn backend_error(e: printpdf::Error) -> RenderError {
    RenderError::Backend(e.to_string())
}

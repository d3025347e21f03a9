//! # PDF Exporter
//!
//! Produces the paginated grading report in two steps:
//!
//! 1. [`layout::build_report`] turns the records into an ordered list of [`layout::Block`]s
//!    (title, summary statistics table, one detail section per record).
//! 2. [`render::PdfRenderer`] places the blocks on fixed-size pages using the style sheet and
//!    serializes the document with `printpdf`, breaking pages when the bottom margin is reached.
//!
//! Text the built-in fonts cannot encode fails the export (see [`encoding`]).

pub mod encoding;
pub mod layout;
pub mod render;

use crate::error::ExportError;
use crate::format::ExportFormat;
use crate::styles::StyleSheet;
use crate::traits::exporter::Exporter;
use crate::types::AssignmentResult;
use layout::{REPORT_TITLE, build_report};
use render::PdfRenderer;

pub struct PdfExporter<'a> {
    styles: &'a StyleSheet,
}

impl<'a> PdfExporter<'a> {
    pub fn new(styles: &'a StyleSheet) -> Self {
        Self { styles }
    }
}

impl Exporter for PdfExporter<'_> {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    fn export(&self, records: &[AssignmentResult]) -> Result<Vec<u8>, ExportError> {
        let blocks = build_report(records, self.styles.block_gap);
        let (bytes, pages) = PdfRenderer::new(self.styles, REPORT_TITLE)?.render(&blocks)?;
        log::debug!(
            "Rendered PDF report: {} records, {} pages, {} bytes",
            records.len(),
            pages,
            bytes.len()
        );
        Ok(bytes)
    }
}

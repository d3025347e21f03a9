use crate::error::ExportError;
use crate::exporters::csv_exporter::CsvExporter;
use crate::exporters::excel_exporter::ExcelExporter;
use crate::exporters::pdf::PdfExporter;
use crate::format::ExportFormat;
use crate::styles::StyleSheet;
use crate::traits::exporter::Exporter;
use crate::types::{AssignmentResult, validate_records};

/// Converts assignment results into downloadable documents.
///
/// The manager owns an immutable [`StyleSheet`] and keeps no other state, so one instance can be
/// shared across threads and reused for any number of exports.
///
/// # Example
///
/// ```rust
/// use exporter::{AssignmentResult, AssignmentStatus, ExportManager};
///
/// let manager = ExportManager::default();
/// let records = vec![AssignmentResult::new("hw1.pdf", 15.0, AssignmentStatus::Success, "Good")];
/// let csv = manager.export_to_csv(&records).unwrap();
/// assert!(String::from_utf8(csv).unwrap().starts_with("Assignment,Score,Status,Feedback"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExportManager {
    styles: StyleSheet,
}

impl ExportManager {
    pub fn new(styles: StyleSheet) -> Self {
        Self { styles }
    }

    pub fn styles(&self) -> &StyleSheet {
        &self.styles
    }

    /// One row per record: `Assignment, Score, Status, Feedback`.
    pub fn export_to_csv(&self, records: &[AssignmentResult]) -> Result<Vec<u8>, ExportError> {
        self.run(&CsvExporter, records)
    }

    /// Workbook with a `Summary` and a `Details` sheet.
    pub fn export_to_excel(&self, records: &[AssignmentResult]) -> Result<Vec<u8>, ExportError> {
        self.run(&ExcelExporter::new(self.styles.columns), records)
    }

    /// Paginated report with summary statistics and one section per record.
    pub fn export_to_pdf(&self, records: &[AssignmentResult]) -> Result<Vec<u8>, ExportError> {
        self.run(&PdfExporter::new(&self.styles), records)
    }

    pub fn export(
        &self,
        format: ExportFormat,
        records: &[AssignmentResult],
    ) -> Result<Vec<u8>, ExportError> {
        match format {
            ExportFormat::Csv => self.export_to_csv(records),
            ExportFormat::Excel => self.export_to_excel(records),
            ExportFormat::Pdf => self.export_to_pdf(records),
        }
    }

    fn run(
        &self,
        exporter: &dyn Exporter,
        records: &[AssignmentResult],
    ) -> Result<Vec<u8>, ExportError> {
        validate_records(records)?;
        let bytes = exporter.export(records)?;
        log::debug!(
            "Exported {} records as {} ({} bytes)",
            records.len(),
            exporter.format(),
            bytes.len()
        );
        Ok(bytes)
    }
}

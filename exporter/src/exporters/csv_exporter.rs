use crate::error::ExportError;
use crate::format::ExportFormat;
use crate::traits::exporter::Exporter;
use crate::types::{AssignmentResult, format_score};
use csv::Writer;

/// Column headers of the CSV export, in order.
pub const CSV_HEADERS: [&str; 4] = ["Assignment", "Score", "Status", "Feedback"];

/// Flat one-row-per-record CSV with standard quoting.
pub struct CsvExporter;

impl Exporter for CsvExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn export(&self, records: &[AssignmentResult]) -> Result<Vec<u8>, ExportError> {
        let mut writer = Writer::from_writer(vec![]);
        writer.write_record(CSV_HEADERS)?;

        for record in records {
            let score = format_score(record.grade.score);
            writer.write_record([
                record.filename.as_str(),
                score.as_str(),
                record.grade.status.as_str(),
                record.feedback.as_str(),
            ])?;
        }

        writer
            .into_inner()
            .map_err(|e| ExportError::failure("CSV writer", e.error()))
    }
}

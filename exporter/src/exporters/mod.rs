//! Document writers, one per [`ExportFormat`](crate::format::ExportFormat).
//!
//! Each exporter implements [`Exporter`](crate::traits::exporter::Exporter) and is selected by the
//! export manager according to the requested format.

pub mod csv_exporter;
pub mod excel_exporter;
pub mod pdf;

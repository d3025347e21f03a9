//! # Exporter Library
//!
//! Turns graded assignment results into downloadable reports: CSV, an Excel workbook and a
//! paginated PDF.
//!
//! ## Key Concepts
//! - **AssignmentResult**: The grading outcome for one uploaded file (filename, score, status,
//!   feedback, optional improvements).
//! - **RecordParser**: Validates the loosely-shaped JSON produced by the grading pipeline and turns
//!   it into typed records.
//! - **ExportManager**: Stateless entry point that validates records and dispatches to one of the
//!   format exporters.
//! - **StyleSheet**: Immutable presentation constants (fonts, spacing, page geometry, column widths).
//!
//! No export call touches the file system or returns a partial document.

pub mod error;
pub mod exporters;
pub mod format;
pub mod manager;
pub mod records;
pub mod styles;
pub mod summary;
pub mod traits;
pub mod types;

pub use error::ExportError;
pub use format::ExportFormat;
pub use manager::ExportManager;
pub use records::RecordParser;
pub use styles::StyleSheet;
pub use summary::SummaryStatistics;
pub use types::{AssignmentResult, AssignmentStatus, Grade};

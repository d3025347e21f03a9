//! Exporter Error Types
//!
//! This module defines the [`ExportError`] enum, which covers every way an export call can fail.
//! Errors are raised before any output is returned, so callers never receive a partial document.
//!
//! # Example
//!
//! ```rust
//! use exporter::error::ExportError;
//!
//! fn check_filename(index: usize, filename: &str) -> Result<(), ExportError> {
//!     if filename.is_empty() {
//!         return Err(ExportError::malformed(index, "filename is empty"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_filename(0, "").is_err());
//! ```

/// Represents all error types that can occur while exporting assignment results.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// A record is missing a required field or a field has the wrong shape.
    #[error("Malformed record at index {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    /// The underlying document writer failed.
    #[error("Export failed: {0}")]
    ExportFailure(String),
}

impl ExportError {
    pub fn malformed(index: usize, reason: impl Into<String>) -> Self {
        ExportError::MalformedRecord {
            index,
            reason: reason.into(),
        }
    }

    pub fn failure(context: &str, err: impl std::fmt::Display) -> Self {
        ExportError::ExportFailure(format!("{context}: {err}"))
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::failure("CSV writer", err)
    }
}

impl From<zip::result::ZipError> for ExportError {
    fn from(err: zip::result::ZipError) -> Self {
        ExportError::failure("Workbook archive", err)
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::failure("Buffer write", err)
    }
}

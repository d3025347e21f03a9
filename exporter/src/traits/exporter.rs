use crate::error::ExportError;
use crate::format::ExportFormat;
use crate::types::AssignmentResult;

/// Exporter is a strategy trait for turning assignment results into one document format.
///
/// Implementations only write into the returned buffer. An error means no buffer at all.
pub trait Exporter: Send + Sync {
    /// The format this exporter produces.
    fn format(&self) -> ExportFormat;

    /// Serialize `records`, in order, into a complete document.
    ///
    /// - `records`: already validated by the caller.
    fn export(&self, records: &[AssignmentResult]) -> Result<Vec<u8>, ExportError>;
}

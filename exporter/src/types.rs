//! # Types Module
//!
//! This module defines the record schema shared by every exporter.
//! An [`AssignmentResult`] is the grading outcome for one uploaded student file, as produced by the
//! grading pipeline and handed to the export manager.

use crate::error::ExportError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound of the grading scale used in reports.
pub const MAX_SCORE: f64 = 20.0;

/// Processing outcome label of a graded assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    Success,
    Error,
    Unknown,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Success => "success",
            AssignmentStatus::Error => "error",
            AssignmentStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "success" => Ok(AssignmentStatus::Success),
            "error" => Ok(AssignmentStatus::Error),
            "unknown" => Ok(AssignmentStatus::Unknown),
            other => Err(format!("unknown status '{other}'")),
        }
    }
}

/// Score, status and improvement suggestions for one assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    /// Score on the `0..=MAX_SCORE` scale.
    pub score: f64,
    pub status: AssignmentStatus,
    /// Suggested improvements, in the order the grader produced them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub improvements: Option<Vec<String>>,
}

/// Grading outcome for one uploaded file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentResult {
    pub filename: String,
    pub grade: Grade,
    /// Free-text feedback; each line is a separate feedback point.
    #[serde(default)]
    pub feedback: String,
}

impl AssignmentResult {
    pub fn new(
        filename: impl Into<String>,
        score: f64,
        status: AssignmentStatus,
        feedback: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            grade: Grade {
                score,
                status,
                improvements: None,
            },
            feedback: feedback.into(),
        }
    }

    pub fn with_improvements<I, S>(mut self, improvements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.grade.improvements = Some(improvements.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_success(&self) -> bool {
        self.grade.status == AssignmentStatus::Success
    }

    /// Improvement suggestions, empty when none were given.
    pub fn improvements(&self) -> &[String] {
        self.grade.improvements.as_deref().unwrap_or(&[])
    }

    /// Checks the invariants every exporter relies on.
    pub fn validate(&self, index: usize) -> Result<(), ExportError> {
        if self.filename.trim().is_empty() {
            return Err(ExportError::malformed(index, "missing field `filename`"));
        }
        if !self.grade.score.is_finite() {
            return Err(ExportError::malformed(
                index,
                format!("`grade.score` must be a finite number, got {}", self.grade.score),
            ));
        }
        Ok(())
    }
}

/// Validates every record up front so no exporter starts writing on bad input.
pub fn validate_records(records: &[AssignmentResult]) -> Result<(), ExportError> {
    for (index, record) in records.iter().enumerate() {
        if let Err(err) = record.validate(index) {
            log::warn!("Rejecting export input: {err}");
            return Err(err);
        }
    }
    Ok(())
}

/// Formats a score the way reports show it: no trailing `.0` for whole numbers.
pub fn format_score(score: f64) -> String {
    format!("{score}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip_labels() {
        for status in [
            AssignmentStatus::Success,
            AssignmentStatus::Error,
            AssignmentStatus::Unknown,
        ] {
            assert_eq!(status.as_str().parse::<AssignmentStatus>(), Ok(status));
        }
        assert!("pending".parse::<AssignmentStatus>().is_err());
        assert_eq!("SUCCESS".parse::<AssignmentStatus>(), Ok(AssignmentStatus::Success));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&AssignmentStatus::Success).unwrap();
        assert_eq!(json, "\"success\"");
    }

    #[test]
    fn test_improvements_default_empty() {
        let record = AssignmentResult::new("a.pdf", 12.0, AssignmentStatus::Success, "ok");
        assert!(record.improvements().is_empty());

        let record = record.with_improvements(["Add comments"]);
        assert_eq!(record.improvements(), ["Add comments".to_string()]);
    }

    #[test]
    fn test_validate_rejects_empty_filename() {
        let record = AssignmentResult::new("  ", 12.0, AssignmentStatus::Success, "");
        match record.validate(4) {
            Err(ExportError::MalformedRecord { index, .. }) => assert_eq!(index, 4),
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_nan_score() {
        let record = AssignmentResult::new("a.pdf", f64::NAN, AssignmentStatus::Error, "");
        assert!(matches!(
            record.validate(0),
            Err(ExportError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_validate_records_reports_first_bad_index() {
        let records = vec![
            AssignmentResult::new("a.pdf", 10.0, AssignmentStatus::Success, ""),
            AssignmentResult::new("", 10.0, AssignmentStatus::Success, ""),
            AssignmentResult::new("c.pdf", f64::INFINITY, AssignmentStatus::Success, ""),
        ];
        match validate_records(&records) {
            Err(ExportError::MalformedRecord { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(15.0), "15");
        assert_eq!(format_score(12.5), "12.5");
        assert_eq!(format_score(0.0), "0");
    }
}

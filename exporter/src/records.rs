//! # Record Parser
//!
//! Converts the loosely-shaped JSON the grading pipeline emits into typed [`AssignmentResult`]s.
//!
//! ## Accepted shape
//!
//! ```json
//! [
//!   {
//!     "filename": "student1.pdf",
//!     "status": "success",
//!     "feedback": "Good structure.\nMissing edge cases.",
//!     "grade": { "score": 15, "status": "success", "improvements": ["Add comments"] }
//!   }
//! ]
//! ```
//!
//! - `grade.status` is preferred; a top-level `status` is accepted as a fallback.
//! - `feedback` is read from the top level, then from `grade.feedback`, and defaults to empty.
//! - `grade.improvements` may be absent or `null`; otherwise it must be an array of strings.
//!
//! Any other deviation is reported as [`ExportError::MalformedRecord`] with the record index.

use crate::error::ExportError;
use crate::traits::parser::Parser;
use crate::types::{AssignmentResult, AssignmentStatus, Grade};
use serde_json::{Map, Value};

/// Parses a JSON array of grading records.
pub struct RecordParser;

impl RecordParser {
    /// Parses raw JSON text. Invalid JSON is reported against record 0.
    pub fn parse_str(&self, raw: &str) -> Result<Vec<AssignmentResult>, ExportError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| ExportError::malformed(0, format!("invalid JSON: {e}")))?;
        self.parse(&value)
    }
}

impl<'a> Parser<&'a Value, Vec<AssignmentResult>> for RecordParser {
    fn parse(&self, raw: &'a Value) -> Result<Vec<AssignmentResult>, ExportError> {
        let items = raw
            .as_array()
            .ok_or_else(|| ExportError::malformed(0, "expected a JSON array of records"))?;

        items
            .iter()
            .enumerate()
            .map(|(index, item)| parse_record(index, item))
            .collect()
    }
}

fn parse_record(index: usize, item: &Value) -> Result<AssignmentResult, ExportError> {
    let obj = item
        .as_object()
        .ok_or_else(|| ExportError::malformed(index, "record is not an object"))?;

    let filename = match obj.get("filename") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(Value::String(_)) => {
            return Err(ExportError::malformed(index, "`filename` is empty"));
        }
        Some(_) => return Err(ExportError::malformed(index, "`filename` must be a string")),
        None => return Err(ExportError::malformed(index, "missing field `filename`")),
    };

    let grade = match obj.get("grade") {
        Some(Value::Object(g)) => g,
        Some(_) => return Err(ExportError::malformed(index, "`grade` must be an object")),
        None => return Err(ExportError::malformed(index, "missing field `grade`")),
    };

    let score = match grade.get("score") {
        Some(Value::Number(n)) => n
            .as_f64()
            .filter(|s| s.is_finite())
            .ok_or_else(|| ExportError::malformed(index, "`grade.score` is not a finite number"))?,
        Some(_) => {
            return Err(ExportError::malformed(index, "`grade.score` must be a number"));
        }
        None => return Err(ExportError::malformed(index, "missing field `grade.score`")),
    };

    let status = parse_status(index, grade, obj)?;
    let improvements = parse_improvements(index, grade)?;

    let feedback = match obj.get("feedback").or_else(|| grade.get("feedback")) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(_) => return Err(ExportError::malformed(index, "`feedback` must be a string")),
    };

    Ok(AssignmentResult {
        filename,
        grade: Grade {
            score,
            status,
            improvements,
        },
        feedback,
    })
}

fn parse_status(
    index: usize,
    grade: &Map<String, Value>,
    record: &Map<String, Value>,
) -> Result<AssignmentStatus, ExportError> {
    match grade.get("status").or_else(|| record.get("status")) {
        Some(Value::String(s)) => s
            .parse()
            .map_err(|e: String| ExportError::malformed(index, format!("`status`: {e}"))),
        Some(_) => Err(ExportError::malformed(index, "`status` must be a string")),
        None => Err(ExportError::malformed(index, "missing field `grade.status`")),
    }
}

fn parse_improvements(
    index: usize,
    grade: &Map<String, Value>,
) -> Result<Option<Vec<String>>, ExportError> {
    match grade.get("improvements") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_owned).ok_or_else(|| {
                    ExportError::malformed(index, "`grade.improvements` must contain only strings")
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        Some(_) => Err(ExportError::malformed(
            index,
            "`grade.improvements` must be a list",
        )),
    }
}

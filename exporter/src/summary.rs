use crate::types::{AssignmentResult, MAX_SCORE};
use serde::Serialize;

/// Aggregate figures over one set of assignment results.
///
/// Every figure is zero for an empty set; the average is never computed by dividing by zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub total: usize,
    pub successful: usize,
    /// Mean score over all records (denominator = `total`).
    pub average_score: f64,
    pub highest_score: f64,
    pub lowest_score: f64,
    /// Share of successful records, in percent.
    pub success_rate: f64,
}

impl SummaryStatistics {
    pub fn from_records(records: &[AssignmentResult]) -> Self {
        let total = records.len();
        if total == 0 {
            return Self {
                total: 0,
                successful: 0,
                average_score: 0.0,
                highest_score: 0.0,
                lowest_score: 0.0,
                success_rate: 0.0,
            };
        }

        let successful = records.iter().filter(|r| r.is_success()).count();
        let scores = records.iter().map(|r| r.grade.score);
        let highest = scores.clone().fold(f64::NEG_INFINITY, f64::max);
        let lowest = scores.clone().fold(f64::INFINITY, f64::min);

        let count = total as f64;
        let sum: f64 = scores.clone().sum();
        // Finite scores can still overflow the sum; their scaled sum never does.
        let average_score = if sum.is_finite() {
            sum / count
        } else {
            scores.map(|s| s / count).sum()
        };

        Self {
            total,
            successful,
            average_score,
            highest_score: highest,
            lowest_score: lowest,
            success_rate: successful as f64 * 100.0 / total as f64,
        }
    }

    /// `"<successful>/<total>"`.
    pub fn success_ratio_label(&self) -> String {
        format!("{}/{}", self.successful, self.total)
    }

    /// Average to two decimals on the report scale, e.g. `"15.00/20"`.
    pub fn average_label(&self) -> String {
        format!("{:.2}/{}", self.average_score, MAX_SCORE)
    }

    /// Label/value rows of the PDF summary table, in display order.
    pub fn table_rows(&self) -> Vec<[String; 2]> {
        vec![
            ["Total Assignments".to_string(), self.total.to_string()],
            ["Successfully Processed".to_string(), self.success_ratio_label()],
            ["Average Score".to_string(), self.average_label()],
        ]
    }
}

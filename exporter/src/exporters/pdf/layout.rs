//! Report plan: the ordered blocks of the PDF report, independent of page geometry.

use crate::summary::SummaryStatistics;
use crate::types::{AssignmentResult, MAX_SCORE, format_score};

pub const REPORT_TITLE: &str = "Assignment Grading Results";
pub const SUMMARY_HEADING: &str = "Summary Statistics";
pub const DETAILS_HEADING: &str = "Detailed Results";
pub const FEEDBACK_LABEL: &str = "Feedback:";
pub const IMPROVEMENTS_LABEL: &str = "Improvements:";
pub const BULLET: &str = "\u{2022}";

/// One element of the report, rendered top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    Heading(String),
    SubHeading(String),
    /// Body text, wrapped at word boundaries.
    Paragraph(String),
    /// Monospaced text; every embedded line break is kept.
    Preformatted(String),
    /// One improvement line, drawn as `• text` in the code style.
    Bullet(String),
    /// Label/value rows with a grid.
    SummaryTable(Vec<[String; 2]>),
    /// Vertical gap in points.
    Spacer(f32),
}

impl Block {
    /// Every string this block puts on the page.
    pub fn texts(&self) -> Vec<&str> {
        match self {
            Block::Title(text)
            | Block::Heading(text)
            | Block::SubHeading(text)
            | Block::Paragraph(text)
            | Block::Preformatted(text)
            | Block::Bullet(text) => vec![text.as_str()],
            Block::SummaryTable(rows) => rows.iter().flatten().map(String::as_str).collect(),
            Block::Spacer(_) => Vec::new(),
        }
    }
}

/// Builds the full report plan for `records`, in input order.
pub fn build_report(records: &[AssignmentResult], block_gap: f32) -> Vec<Block> {
    let stats = SummaryStatistics::from_records(records);
    let mut blocks = vec![
        Block::Title(REPORT_TITLE.to_string()),
        Block::Heading(SUMMARY_HEADING.to_string()),
        Block::SummaryTable(stats.table_rows()),
        Block::Heading(DETAILS_HEADING.to_string()),
    ];

    for record in records {
        push_record(&mut blocks, record);
        blocks.push(Block::Spacer(block_gap));
    }

    blocks
}

fn push_record(blocks: &mut Vec<Block>, record: &AssignmentResult) {
    blocks.push(Block::SubHeading(record.filename.clone()));
    blocks.push(Block::Paragraph(format!(
        "Score: {}/{}",
        format_score(record.grade.score),
        MAX_SCORE
    )));
    blocks.push(Block::Paragraph(format!("Status: {}", record.grade.status)));
    blocks.push(Block::Paragraph(FEEDBACK_LABEL.to_string()));
    blocks.push(Block::Preformatted(record.feedback.clone()));

    let improvements = record.improvements();
    if !improvements.is_empty() {
        blocks.push(Block::Paragraph(IMPROVEMENTS_LABEL.to_string()));
        blocks.extend(improvements.iter().cloned().map(Block::Bullet));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AssignmentStatus;

    fn table(blocks: &[Block]) -> &Vec<[String; 2]> {
        blocks
            .iter()
            .find_map(|b| match b {
                Block::SummaryTable(rows) => Some(rows),
                _ => None,
            })
            .expect("summary table present")
    }

    #[test]
    fn test_empty_report_has_title_summary_and_details_heading() {
        let blocks = build_report(&[], 20.0);
        assert_eq!(blocks[0], Block::Title(REPORT_TITLE.to_string()));
        assert_eq!(blocks[1], Block::Heading(SUMMARY_HEADING.to_string()));
        assert_eq!(blocks[3], Block::Heading(DETAILS_HEADING.to_string()));
        assert_eq!(blocks.len(), 4);

        let rows = table(&blocks);
        assert_eq!(rows[0][1], "0");
        assert_eq!(rows[1][1], "0/0");
        assert_eq!(rows[2][1], "0.00/20");
    }

    #[test]
    fn test_summary_average_of_three() {
        let records = vec![
            AssignmentResult::new("a.pdf", 10.0, AssignmentStatus::Success, ""),
            AssignmentResult::new("b.pdf", 15.0, AssignmentStatus::Error, ""),
            AssignmentResult::new("c.pdf", 20.0, AssignmentStatus::Success, ""),
        ];
        let blocks = build_report(&records, 20.0);
        let rows = table(&blocks);
        assert_eq!(rows[1][1], "2/3");
        assert_eq!(rows[2][1], "15.00/20");
    }

    #[test]
    fn test_record_block_order() {
        let records = vec![AssignmentResult::new(
            "hw1.pdf",
            12.5,
            AssignmentStatus::Success,
            "Line one\nLine two",
        )];
        let blocks = build_report(&records, 20.0);
        assert_eq!(
            &blocks[4..],
            &[
                Block::SubHeading("hw1.pdf".to_string()),
                Block::Paragraph("Score: 12.5/20".to_string()),
                Block::Paragraph("Status: success".to_string()),
                Block::Paragraph(FEEDBACK_LABEL.to_string()),
                Block::Preformatted("Line one\nLine two".to_string()),
                Block::Spacer(20.0),
            ]
        );
    }

    #[test]
    fn test_improvements_follow_label_in_order() {
        let records = vec![
            AssignmentResult::new("a.pdf", 14.0, AssignmentStatus::Success, "ok")
                .with_improvements(["Add comments", "Fix indentation"]),
        ];
        let blocks = build_report(&records, 20.0);
        let label = blocks
            .iter()
            .position(|b| *b == Block::Paragraph(IMPROVEMENTS_LABEL.to_string()))
            .expect("improvements label");
        assert_eq!(blocks[label + 1], Block::Bullet("Add comments".to_string()));
        assert_eq!(blocks[label + 2], Block::Bullet("Fix indentation".to_string()));
        assert_eq!(blocks[label + 3], Block::Spacer(20.0));
        assert_eq!(
            blocks.iter().filter(|b| matches!(b, Block::Bullet(_))).count(),
            2
        );
    }

    #[test]
    fn test_texts_cover_table_cells() {
        let block = Block::SummaryTable(vec![
            ["Total Assignments".to_string(), "2".to_string()],
            ["Average Score".to_string(), "9.00/20".to_string()],
        ]);
        assert_eq!(
            block.texts(),
            vec!["Total Assignments", "2", "Average Score", "9.00/20"]
        );
        assert!(Block::Spacer(4.0).texts().is_empty());
    }

    #[test]
    fn test_no_improvements_no_label() {
        let records = vec![
            AssignmentResult::new("a.pdf", 14.0, AssignmentStatus::Success, "ok"),
            AssignmentResult::new("b.pdf", 9.0, AssignmentStatus::Success, "ok")
                .with_improvements(Vec::<String>::new()),
        ];
        let blocks = build_report(&records, 20.0);
        assert!(!blocks.contains(&Block::Paragraph(IMPROVEMENTS_LABEL.to_string())));
        assert!(!blocks.iter().any(|b| matches!(b, Block::Bullet(_))));
    }
}

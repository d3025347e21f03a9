use exporter::error::ExportError;
use exporter::exporters::pdf::encoding::WIN_ANSI_HIGH;
use exporter::exporters::pdf::layout::{Block, IMPROVEMENTS_LABEL, build_report};
use exporter::{AssignmentResult, AssignmentStatus, ExportFormat, ExportManager, RecordParser};
use lopdf::content::Content;
use lopdf::{Document, Object};
use serde_json::json;
use std::io::{Cursor, Read};
use std::thread;
use zip::ZipArchive;

fn sample_records() -> Vec<AssignmentResult> {
    vec![
        AssignmentResult::new(
            "alice_hw3.pdf",
            10.0,
            AssignmentStatus::Success,
            "Correct approach.\nMissing edge cases, e.g. empty input.",
        )
        .with_improvements(["Add comments", "Fix indentation"]),
        AssignmentResult::new("bob_hw3.pdf", 15.0, AssignmentStatus::Error, "Could not parse page 2"),
        AssignmentResult::new("carol_hw3.pdf", 20.0, AssignmentStatus::Success, "Excellent"),
    ]
}

fn read_zip_part(bytes: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut part = archive.by_name(name).unwrap();
    let mut out = String::new();
    part.read_to_string(&mut out).unwrap();
    out
}

fn decode_win_ansi(raw: &[u8]) -> String {
    raw.iter()
        .map(|&b| match b {
            0x80..=0x9F => WIN_ANSI_HIGH[usize::from(b - 0x80)].unwrap_or('?'),
            _ => char::from(b),
        })
        .collect()
}

/// Every string drawn in the PDF, page by page in drawing order.
fn pdf_text_runs(bytes: &[u8]) -> Vec<String> {
    let doc = Document::load_mem(bytes).unwrap();
    let mut runs = Vec::new();
    for (_, page_id) in doc.get_pages() {
        let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
        for op in content.operations {
            match (op.operator.as_str(), op.operands.first()) {
                ("Tj", Some(Object::String(raw, _))) => runs.push(decode_win_ansi(raw)),
                ("TJ", Some(Object::Array(parts))) => runs.push(
                    parts
                        .iter()
                        .filter_map(|part| match part {
                            Object::String(raw, _) => Some(decode_win_ansi(raw)),
                            _ => None,
                        })
                        .collect(),
                ),
                _ => {}
            }
        }
    }
    runs
}

#[test]
fn csv_has_header_plus_one_row_per_record_in_order() {
    let records = sample_records();
    let bytes = ExportManager::default().export_to_csv(&records).unwrap();

    let mut reader = csv::Reader::from_reader(bytes.as_slice());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["Assignment", "Score", "Status", "Feedback"]
    );

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), records.len());
    for (row, record) in rows.iter().zip(&records) {
        assert_eq!(&row[0], record.filename);
        assert_eq!(row[1].parse::<f64>().unwrap(), record.grade.score);
        assert_eq!(&row[2], record.grade.status.as_str());
        assert_eq!(&row[3], record.feedback);
    }
}

#[test]
fn csv_round_trips_feedback_with_commas_and_newlines() {
    let records = vec![AssignmentResult::new(
        "x.pdf",
        11.0,
        AssignmentStatus::Success,
        "First, second, third\nnext line",
    )];
    let bytes = ExportManager::default().export_to_csv(&records).unwrap();
    let mut reader = csv::Reader::from_reader(bytes.as_slice());
    let row = reader.records().next().unwrap().unwrap();
    assert_eq!(row.len(), 4);
    assert_eq!(&row[3], "First, second, third\nnext line");
}

#[test]
fn excel_has_summary_and_details_with_matching_row_counts() {
    for records in [Vec::new(), sample_records()] {
        let bytes = ExportManager::default().export_to_excel(&records).unwrap();

        let workbook = read_zip_part(&bytes, "xl/workbook.xml");
        assert_eq!(workbook.matches("<sheet ").count(), 2);
        assert!(workbook.find("\"Summary\"").unwrap() < workbook.find("\"Details\"").unwrap());

        let summary = read_zip_part(&bytes, "xl/worksheets/sheet1.xml");
        let details = read_zip_part(&bytes, "xl/worksheets/sheet2.xml");
        let summary_rows = summary.matches("<row ").count() - 1;
        let details_rows = details.matches("<row ").count() - 1;
        assert_eq!(summary_rows, records.len());
        assert_eq!(details_rows, records.len());
    }
}

#[test]
fn pdf_of_empty_set_does_not_fail() {
    let bytes = ExportManager::default().export_to_pdf(&[]).unwrap();
    assert!(bytes.starts_with(b"%PDF"));

    let blocks = build_report(&[], 20.0);
    let rows = blocks
        .iter()
        .find_map(|b| match b {
            Block::SummaryTable(rows) => Some(rows.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(rows[0][1], "0");
    assert_eq!(rows[1][1], "0/0");
    assert_eq!(rows[2][1], "0.00/20");
}

#[test]
fn pdf_summary_counts_successes_and_averages() {
    let records = sample_records();
    let blocks = build_report(&records, 20.0);
    let rows = blocks
        .iter()
        .find_map(|b| match b {
            Block::SummaryTable(rows) => Some(rows.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(rows[1][1], "2/3");
    assert_eq!(rows[2][1], "15.00/20");

    let bytes = ExportManager::default().export_to_pdf(&records).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn pdf_bullets_only_for_records_with_improvements() {
    let records = sample_records();
    let blocks = build_report(&records, 20.0);

    let labels: Vec<usize> = blocks
        .iter()
        .enumerate()
        .filter(|(_, b)| **b == Block::Paragraph(IMPROVEMENTS_LABEL.to_string()))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(labels.len(), 1);
    assert_eq!(blocks[labels[0] + 1], Block::Bullet("Add comments".to_string()));
    assert_eq!(blocks[labels[0] + 2], Block::Bullet("Fix indentation".to_string()));
    assert_eq!(blocks.iter().filter(|b| matches!(b, Block::Bullet(_))).count(), 2);
}

#[test]
fn rendered_pdf_carries_summary_and_improvement_lines() {
    let bytes = ExportManager::default()
        .export_to_pdf(&sample_records())
        .unwrap();
    let runs = pdf_text_runs(&bytes);

    assert_eq!(runs[0], "Assignment Grading Results");
    assert!(runs.iter().any(|r| r == "2/3"));
    assert!(runs.iter().any(|r| r == "15.00/20"));
    assert!(runs.iter().any(|r| r == "Score: 10/20"));
    assert!(runs.iter().any(|r| r == "Missing edge cases, e.g. empty input."));

    let labels: Vec<usize> = runs
        .iter()
        .enumerate()
        .filter(|(_, r)| r.as_str() == IMPROVEMENTS_LABEL)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(labels.len(), 1);
    assert_eq!(runs[labels[0] + 1], "\u{2022} Add comments");
    assert_eq!(runs[labels[0] + 2], "\u{2022} Fix indentation");
    assert_eq!(runs[labels[0] + 3], "bob_hw3.pdf");
}

#[test]
fn rendered_empty_pdf_shows_zero_summary() {
    let bytes = ExportManager::default().export_to_pdf(&[]).unwrap();
    let runs = pdf_text_runs(&bytes);

    let average = runs.iter().position(|r| r == "Average Score").unwrap();
    assert_eq!(runs[average + 1], "0.00/20");
    assert!(runs.iter().any(|r| r == "0/0"));
    assert_eq!(runs.last().map(String::as_str), Some("Detailed Results"));
}

#[test]
fn pdf_keeps_latin1_text_and_rejects_unencodable_text() {
    let manager = ExportManager::default();

    let latin = vec![AssignmentResult::new(
        "r\u{E9}sum\u{E9}.pdf",
        12.0,
        AssignmentStatus::Success,
        "R\u{E9}sum\u{E9} ok (paren) \u{2019}quoted\u{2019}",
    )];
    let runs = pdf_text_runs(&manager.export_to_pdf(&latin).unwrap());
    assert!(runs.iter().any(|r| r == "R\u{E9}sum\u{E9} ok (paren) \u{2019}quoted\u{2019}"));
    assert!(runs.iter().any(|r| r == "r\u{E9}sum\u{E9}.pdf"));

    let wide = vec![AssignmentResult::new(
        "cjk.pdf",
        12.0,
        AssignmentStatus::Success,
        "R\u{E9}sum\u{E9} \u{65E5}\u{672C}\u{8A9E} \u{1F600} ok",
    )];
    assert!(matches!(
        manager.export_to_pdf(&wide),
        Err(ExportError::ExportFailure(_))
    ));
    assert!(manager.export_to_csv(&wide).is_ok());
}

#[test]
fn missing_filename_fails_every_format_before_output() {
    let raw = json!([
        { "filename": "ok.pdf", "grade": { "score": 12, "status": "success" } },
        { "grade": { "score": 12, "status": "success" } }
    ]);
    match RecordParser.parse_str(&raw.to_string()) {
        Err(ExportError::MalformedRecord { index, .. }) => assert_eq!(index, 1),
        other => panic!("expected MalformedRecord, got {other:?}"),
    }

    let mut records = sample_records();
    records[2].filename.clear();
    let manager = ExportManager::default();
    for format in ExportFormat::ALL {
        assert!(matches!(
            manager.export(format, &records),
            Err(ExportError::MalformedRecord { index: 2, .. })
        ));
    }
}

#[test]
fn parsed_pipeline_json_exports_to_all_formats() {
    let raw = r#"[
        {
            "filename": "s1.pdf",
            "status": "success",
            "grade": {
                "score": 17.5,
                "feedback": "Well structured",
                "improvements": ["Name variables clearly"],
                "breakdown": { "question1": 9, "question2": 8.5 }
            }
        },
        {
            "filename": "s2.pdf",
            "status": "error",
            "grade": { "score": 0, "feedback": "Error calling API: timeout", "improvements": ["API call failed"] }
        }
    ]"#;
    let records = RecordParser.parse_str(raw).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].feedback, "Well structured");

    let manager = ExportManager::default();
    for format in ExportFormat::ALL {
        let bytes = manager.export(format, &records).unwrap();
        assert!(!bytes.is_empty(), "{format} produced no bytes");
    }
}

#[test]
fn independent_exports_run_in_parallel() {
    let manager = ExportManager::default();
    let records = sample_records();

    let outputs: Vec<Vec<u8>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| manager.export_to_csv(&records).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(outputs.windows(2).all(|pair| pair[0] == pair[1]));
}

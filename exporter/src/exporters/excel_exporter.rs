//! # Excel Exporter
//!
//! Writes an Office Open XML workbook (`.xlsx`) with two sheets:
//!
//! - `Summary`: `Assignment, Score, Status, Feedback`
//! - `Details`: the same columns plus `Improvements` (newline-joined)
//!
//! The workbook is a zip container holding the package relationships, the workbook part, a small
//! style part (bold headers, wrapped long text) and one worksheet part per sheet. Text cells are
//! written as inline strings, scores as numeric cells. Column widths come from the
//! [`ColumnLayout`] of the style sheet and do not depend on content.

use crate::error::ExportError;
use crate::format::ExportFormat;
use crate::styles::ColumnLayout;
use crate::traits::exporter::Exporter;
use crate::types::AssignmentResult;
use std::fmt::Write as _;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const SUMMARY_SHEET: &str = "Summary";
pub const DETAILS_SHEET: &str = "Details";

const SUMMARY_HEADERS: [&str; 4] = ["Assignment", "Score", "Status", "Feedback"];
const DETAILS_HEADERS: [&str; 5] = ["Assignment", "Score", "Status", "Feedback", "Improvements"];

const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PKG_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

// cellXfs indices in styles.xml
const STYLE_DEFAULT: u8 = 0;
const STYLE_HEADER: u8 = 1;
const STYLE_WRAP: u8 = 2;

/// First column index (zero-based) that holds long text and wraps.
const FIRST_TEXT_COLUMN: usize = 3;

/// Longest text Excel accepts in a single cell.
pub const MAX_CELL_CHARS: usize = 32_767;

#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Text(String),
    Number(f64),
}

struct Sheet {
    name: &'static str,
    headers: &'static [&'static str],
    rows: Vec<Vec<Cell>>,
}

/// Two-sheet workbook writer.
pub struct ExcelExporter {
    columns: ColumnLayout,
}

impl ExcelExporter {
    pub fn new(columns: ColumnLayout) -> Self {
        Self { columns }
    }

    fn sheets(records: &[AssignmentResult]) -> [Sheet; 2] {
        let summary = records
            .iter()
            .map(|r| {
                vec![
                    Cell::Text(r.filename.clone()),
                    Cell::Number(r.grade.score),
                    Cell::Text(r.grade.status.to_string()),
                    Cell::Text(r.feedback.clone()),
                ]
            })
            .collect();

        let details = records
            .iter()
            .map(|r| {
                vec![
                    Cell::Text(r.filename.clone()),
                    Cell::Number(r.grade.score),
                    Cell::Text(r.grade.status.to_string()),
                    Cell::Text(r.feedback.clone()),
                    Cell::Text(r.improvements().join("\n")),
                ]
            })
            .collect();

        [
            Sheet {
                name: SUMMARY_SHEET,
                headers: &SUMMARY_HEADERS,
                rows: summary,
            },
            Sheet {
                name: DETAILS_SHEET,
                headers: &DETAILS_HEADERS,
                rows: details,
            },
        ]
    }

    /// Rejects cells Excel would truncate or refuse to open.
    fn check_cell_lengths(sheets: &[Sheet]) -> Result<(), ExportError> {
        for sheet in sheets {
            for (offset, row) in sheet.rows.iter().enumerate() {
                for (col, cell) in row.iter().enumerate() {
                    let Cell::Text(text) = cell else { continue };
                    let len = text.chars().count();
                    if len > MAX_CELL_CHARS {
                        return Err(ExportError::ExportFailure(format!(
                            "Workbook cell {}!{}{} holds {len} characters, Excel allows {MAX_CELL_CHARS}",
                            sheet.name,
                            column_letter(col),
                            offset + 2
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    fn worksheet_xml(&self, sheet: &Sheet) -> String {
        let mut xml = String::with_capacity(1024 + sheet.rows.len() * 256);
        let _ = write!(xml, r#"{XML_DECL}<worksheet xmlns="{NS_MAIN}"><cols>"#);
        for index in 0..sheet.headers.len() {
            let _ = write!(
                xml,
                r#"<col min="{n}" max="{n}" width="{w}" customWidth="1"/>"#,
                n = index + 1,
                w = self.columns.width(index)
            );
        }
        xml.push_str("</cols><sheetData>");

        let header_cells: Vec<Cell> = sheet
            .headers
            .iter()
            .map(|h| Cell::Text((*h).to_string()))
            .collect();
        write_row(&mut xml, 1, &header_cells, true);
        for (offset, row) in sheet.rows.iter().enumerate() {
            write_row(&mut xml, offset + 2, row, false);
        }

        xml.push_str("</sheetData></worksheet>");
        xml
    }
}

impl Exporter for ExcelExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Excel
    }

    fn export(&self, records: &[AssignmentResult]) -> Result<Vec<u8>, ExportError> {
        let sheets = Self::sheets(records);
        Self::check_cell_lengths(&sheets)?;
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        zip.start_file("[Content_Types].xml", options)?;
        zip.write_all(content_types_xml(sheets.len()).as_bytes())?;

        zip.start_file("_rels/.rels", options)?;
        zip.write_all(package_rels_xml().as_bytes())?;

        zip.start_file("xl/workbook.xml", options)?;
        zip.write_all(workbook_xml(&sheets).as_bytes())?;

        zip.start_file("xl/_rels/workbook.xml.rels", options)?;
        zip.write_all(workbook_rels_xml(sheets.len()).as_bytes())?;

        zip.start_file("xl/styles.xml", options)?;
        zip.write_all(styles_xml().as_bytes())?;

        for (index, sheet) in sheets.iter().enumerate() {
            zip.start_file(format!("xl/worksheets/sheet{}.xml", index + 1), options)?;
            zip.write_all(self.worksheet_xml(sheet).as_bytes())?;
        }

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}

fn write_row(xml: &mut String, row_number: usize, cells: &[Cell], header: bool) {
    let _ = write!(xml, r#"<row r="{row_number}">"#);
    for (col, cell) in cells.iter().enumerate() {
        let reference = format!("{}{}", column_letter(col), row_number);
        let style = if header {
            STYLE_HEADER
        } else if col >= FIRST_TEXT_COLUMN {
            STYLE_WRAP
        } else {
            STYLE_DEFAULT
        };
        match cell {
            Cell::Number(n) => {
                let _ = write!(xml, r#"<c r="{reference}" s="{style}"><v>{n}</v></c>"#);
            }
            Cell::Text(s) => {
                let _ = write!(
                    xml,
                    r#"<c r="{reference}" s="{style}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                    escape_xml(s)
                );
            }
        }
    }
    xml.push_str("</row>");
}

/// Spreadsheet column name for a zero-based index (`0 -> A`, `25 -> Z`, `26 -> AA`).
fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Escapes markup characters and drops control characters XML 1.0 cannot carry.
fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\r' => out.push_str("&#13;"),
            '\t' | '\n' => out.push(ch),
            c if (c as u32) < 0x20 => {}
            c => out.push(c),
        }
    }
    out
}

fn content_types_xml(sheet_count: usize) -> String {
    let mut xml = format!(
        r#"{XML_DECL}<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#
    );
    for n in 1..=sheet_count {
        let _ = write!(
            xml,
            r#"<Override PartName="/xl/worksheets/sheet{n}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#
        );
    }
    xml.push_str("</Types>");
    xml
}

fn package_rels_xml() -> String {
    format!(
        r#"{XML_DECL}<Relationships xmlns="{NS_PKG_REL}"><Relationship Id="rId1" Type="{NS_REL}/officeDocument" Target="xl/workbook.xml"/></Relationships>"#
    )
}

fn workbook_xml(sheets: &[Sheet]) -> String {
    let mut xml = format!(r#"{XML_DECL}<workbook xmlns="{NS_MAIN}" xmlns:r="{NS_REL}"><sheets>"#);
    for (index, sheet) in sheets.iter().enumerate() {
        let _ = write!(
            xml,
            r#"<sheet name="{}" sheetId="{id}" r:id="rId{id}"/>"#,
            escape_xml(sheet.name),
            id = index + 1
        );
    }
    xml.push_str("</sheets></workbook>");
    xml
}

fn workbook_rels_xml(sheet_count: usize) -> String {
    let mut xml = format!(r#"{XML_DECL}<Relationships xmlns="{NS_PKG_REL}">"#);
    for n in 1..=sheet_count {
        let _ = write!(
            xml,
            r#"<Relationship Id="rId{n}" Type="{NS_REL}/worksheet" Target="worksheets/sheet{n}.xml"/>"#
        );
    }
    let _ = write!(
        xml,
        r#"<Relationship Id="rId{}" Type="{NS_REL}/styles" Target="styles.xml"/></Relationships>"#,
        sheet_count + 1
    );
    xml
}

fn styles_xml() -> String {
    format!(
        r#"{XML_DECL}<styleSheet xmlns="{NS_MAIN}"><fonts count="2"><font><sz val="11"/><name val="Calibri"/></font><font><b/><sz val="11"/><name val="Calibri"/></font></fonts><fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills><borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="3"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="0" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1"/><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0" applyAlignment="1"><alignment vertical="top" wrapText="1"/></xf></cellXfs><cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles></styleSheet>"#
    )
}

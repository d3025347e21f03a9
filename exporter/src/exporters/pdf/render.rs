use super::encoding::ensure_encodable;
use super::layout::{BULLET, Block};
use crate::error::ExportError;
use crate::styles::{FontFamily, StyleSheet, TextStyle};
use printpdf::path::PaintMode;
use printpdf::*;
use std::io::BufWriter;

const MM_PER_PT: f32 = 25.4 / 72.0;
const LAYER_NAME: &str = "Layer 1";
const TAB_STOP: &str = "    ";

fn mm(points: f32) -> Mm {
    Mm(points * MM_PER_PT)
}

/// Fonts registered once per document.
struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    mono: IndirectFontRef,
}

impl Fonts {
    fn get(&self, family: FontFamily) -> &IndirectFontRef {
        match family {
            FontFamily::Helvetica => &self.regular,
            FontFamily::HelveticaBold => &self.bold,
            FontFamily::Courier => &self.mono,
        }
    }
}

/// Lays a report plan out on fixed-size pages and serializes the document.
///
/// `cursor` is the top of the free area on the current page, in points from the bottom edge.
pub struct PdfRenderer<'a> {
    styles: &'a StyleSheet,
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: Fonts,
    cursor: f32,
    pages: usize,
}

impl<'a> PdfRenderer<'a> {
    pub fn new(styles: &'a StyleSheet, title: &str) -> Result<Self, ExportError> {
        let page = &styles.page;
        let (doc, page1, layer1) =
            PdfDocument::new(title, mm(page.width), mm(page.height), LAYER_NAME);

        let font = |f: BuiltinFont| {
            doc.add_builtin_font(f)
                .map_err(|e| ExportError::failure("PDF font", e))
        };
        let fonts = Fonts {
            regular: font(BuiltinFont::Helvetica)?,
            bold: font(BuiltinFont::HelveticaBold)?,
            mono: font(BuiltinFont::Courier)?,
        };

        let layer = doc.get_page(page1).get_layer(layer1);
        Ok(Self {
            styles,
            doc,
            layer,
            fonts,
            cursor: page.frame_top(),
            pages: 1,
        })
    }

    /// Renders every block and returns the document bytes with the page count.
    ///
    /// All text is checked against the font encoding before anything is drawn.
    pub fn render(mut self, blocks: &[Block]) -> Result<(Vec<u8>, usize), ExportError> {
        for text in blocks.iter().flat_map(Block::texts) {
            ensure_encodable(text)?;
        }

        for block in blocks {
            self.draw_block(block);
        }

        let pages = self.pages;
        let mut buf = BufWriter::new(Vec::new());
        self.doc
            .save(&mut buf)
            .map_err(|e| ExportError::failure("PDF writer", e))?;
        let bytes = buf
            .into_inner()
            .map_err(|e| ExportError::failure("PDF buffer", e.error()))?;

        Ok((bytes, pages))
    }

    fn draw_block(&mut self, block: &Block) {
        let styles = self.styles;
        match block {
            Block::Title(text) => self.draw_paragraph(text, &styles.title),
            Block::Heading(text) => self.draw_paragraph(text, &styles.heading),
            Block::SubHeading(text) => self.draw_paragraph(text, &styles.subheading),
            Block::Paragraph(text) => self.draw_paragraph(text, &styles.body),
            Block::Preformatted(text) => self.draw_preformatted(text, &styles.code),
            Block::Bullet(text) => {
                self.draw_paragraph(&format!("{BULLET} {text}"), &styles.code)
            }
            Block::SummaryTable(rows) => self.draw_table(rows),
            Block::Spacer(height) => self.advance(*height),
        }
    }

    fn new_page(&mut self) {
        let page = &self.styles.page;
        let (page_index, layer_index) = self.doc.add_page(mm(page.width), mm(page.height), LAYER_NAME);
        self.layer = self.doc.get_page(page_index).get_layer(layer_index);
        self.cursor = page.frame_top();
        self.pages += 1;
    }

    /// Starts a new page when `height` does not fit above the bottom margin.
    fn ensure_space(&mut self, height: f32) {
        if self.cursor - height < self.styles.page.frame_bottom() {
            self.new_page();
        }
    }

    /// Moves the cursor down; gaps never carry over onto a fresh page.
    fn advance(&mut self, height: f32) {
        self.cursor -= height;
        if self.cursor < self.styles.page.frame_bottom() {
            self.new_page();
        }
    }

    fn draw_line(&mut self, text: &str, style: &TextStyle) {
        self.ensure_space(style.leading);
        let baseline = self.cursor - style.font_size;
        let x = self.styles.page.margin_left + style.left_indent;
        self.layer.set_fill_color(Color::Greyscale(Greyscale::new(0.0, None)));
        self.layer
            .use_text(text, style.font_size, mm(x), mm(baseline), self.fonts.get(style.font));
        self.cursor -= style.leading;
    }

    fn draw_paragraph(&mut self, text: &str, style: &TextStyle) {
        let width = style.line_width(self.styles.page.frame_width());
        let measure = |s: &str| style.font.text_width(s, style.font_size);
        self.advance(style.space_before);
        for line in text.lines() {
            for wrapped in wrap_words(line, width, measure) {
                self.draw_line(&wrapped, style);
            }
        }
        self.advance(style.space_after);
    }

    fn draw_preformatted(&mut self, text: &str, style: &TextStyle) {
        let width = style.chars_per_line(self.styles.page.frame_width());
        self.advance(style.space_before);
        for line in text.split('\n') {
            let line = line.trim_end_matches('\r').replace('\t', TAB_STOP);
            if line.is_empty() {
                self.ensure_space(style.leading);
                self.cursor -= style.leading;
                continue;
            }
            for chunk in chunk_chars(&line, width) {
                self.draw_line(&chunk, style);
            }
        }
        self.advance(style.space_after);
    }

    fn draw_table(&mut self, rows: &[[String; 2]]) {
        let table = self.styles.table;
        let left = self.styles.page.margin_left;
        let [label_width, value_width] = table.column_widths;
        self.ensure_space(table.row_height * rows.len() as f32);

        for row in rows {
            let top = self.cursor;
            let bottom = top - table.row_height;

            self.layer
                .set_fill_color(Color::Greyscale(Greyscale::new(table.label_background, None)));
            self.layer.add_rect(
                Rect::new(mm(left), mm(bottom), mm(left + label_width), mm(top))
                    .with_mode(PaintMode::Fill),
            );

            self.layer
                .set_outline_color(Color::Greyscale(Greyscale::new(table.grid_color, None)));
            self.layer.set_outline_thickness(table.grid_thickness);
            for (x0, x1) in [
                (left, left + label_width),
                (left + label_width, left + label_width + value_width),
            ] {
                self.layer.add_rect(
                    Rect::new(mm(x0), mm(bottom), mm(x1), mm(top)).with_mode(PaintMode::Stroke),
                );
            }

            self.layer.set_fill_color(Color::Greyscale(Greyscale::new(0.0, None)));
            let baseline = bottom + (table.row_height - table.font_size * 0.7) / 2.0;
            let font = self.fonts.get(table.font);
            self.layer.use_text(
                row[0].as_str(),
                table.font_size,
                mm(left + table.cell_padding),
                mm(baseline),
                font,
            );
            self.layer.use_text(
                row[1].as_str(),
                table.font_size,
                mm(left + label_width + table.cell_padding),
                mm(baseline),
                font,
            );

            self.cursor = bottom;
        }

        self.advance(table.space_after);
    }
}

/// Greedy word wrap to `max_width` as reported by `measure`; words wider than a line are split.
pub(crate) fn wrap_words(
    line: &str,
    max_width: f32,
    measure: impl Fn(&str) -> f32,
) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        for piece in split_to_width(word, max_width, &measure) {
            if !current.is_empty() && measure(&format!("{current} {piece}")) > max_width {
                out.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&piece);
        }
    }

    if !current.is_empty() || out.is_empty() {
        out.push(current);
    }
    out
}

/// Splits one word into pieces no wider than `max_width`; every piece holds at least one char.
fn split_to_width(word: &str, max_width: f32, measure: &impl Fn(&str) -> f32) -> Vec<String> {
    if measure(word) <= max_width {
        return vec![word.to_string()];
    }

    let mut pieces = Vec::new();
    let mut current = String::new();
    for ch in word.chars() {
        current.push(ch);
        if measure(&current) > max_width && current.chars().count() > 1 {
            current.pop();
            pieces.push(std::mem::replace(&mut current, ch.to_string()));
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Splits `text` into runs of at most `width` characters, keeping spacing intact.
pub(crate) fn chunk_chars(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars
        .chunks(width.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}

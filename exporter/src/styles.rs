//! # Style Sheet
//!
//! Presentation constants for the spreadsheet and PDF exporters. A [`StyleSheet`] is built once,
//! owned by the export manager and only ever read, so one instance can serve concurrent exports.
//!
//! All PDF measurements are in points (1/72 inch).

/// Built-in PDF font families used by the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    Helvetica,
    HelveticaBold,
    Courier,
}

/// Advance widths of ASCII `0x20..=0x7E` in 1/1000 em, from the Adobe core font metrics.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width assumed for glyphs outside ASCII (accented capitals are the widest common case).
const FALLBACK_WIDTH: u16 = 778;

impl FontFamily {
    /// Advance width of `ch` in 1/1000 em. Courier is monospaced at 600.
    pub fn glyph_width(&self, ch: char) -> u16 {
        let table = match self {
            FontFamily::Courier => return 600,
            FontFamily::Helvetica => &HELVETICA_WIDTHS,
            FontFamily::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        };
        match ch {
            ' '..='~' => table[ch as usize - 0x20],
            _ => FALLBACK_WIDTH,
        }
    }

    /// Width of `text` in points at `font_size`.
    pub fn text_width(&self, text: &str, font_size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| u32::from(self.glyph_width(c))).sum();
        units as f32 * font_size / 1000.0
    }
}

/// A paragraph style: font, size and vertical/horizontal spacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: FontFamily,
    pub font_size: f32,
    /// Baseline-to-baseline distance.
    pub leading: f32,
    pub space_before: f32,
    pub space_after: f32,
    pub left_indent: f32,
    pub right_indent: f32,
}

impl TextStyle {
    const fn new(font: FontFamily, font_size: f32) -> Self {
        Self {
            font,
            font_size,
            leading: font_size * 1.2,
            space_before: 0.0,
            space_after: 0.0,
            left_indent: 0.0,
            right_indent: 0.0,
        }
    }

    const fn spacing(mut self, before: f32, after: f32) -> Self {
        self.space_before = before;
        self.space_after = after;
        self
    }

    const fn indent(mut self, left: f32, right: f32) -> Self {
        self.left_indent = left;
        self.right_indent = right;
        self
    }

    /// Room for text on one line of a `frame_width` frame, after indents.
    pub fn line_width(&self, frame_width: f32) -> f32 {
        frame_width - self.left_indent - self.right_indent
    }

    /// Number of `M`-wide characters that fit on one line; exact for Courier.
    pub fn chars_per_line(&self, frame_width: f32) -> usize {
        let per_char = self.font.text_width("M", self.font_size);
        ((self.line_width(frame_width) / per_char).floor() as usize).max(1)
    }
}

/// Page size and margins, identical for every page of a document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

impl PageGeometry {
    /// A4 portrait with one-inch margins.
    pub const A4: PageGeometry = PageGeometry {
        width: 595.28,
        height: 841.89,
        margin_top: 72.0,
        margin_bottom: 72.0,
        margin_left: 72.0,
        margin_right: 72.0,
    };

    pub fn frame_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    /// Y coordinate (from the bottom edge) of the first baseline area.
    pub fn frame_top(&self) -> f32 {
        self.height - self.margin_top
    }

    pub fn frame_bottom(&self) -> f32 {
        self.margin_bottom
    }
}

/// Styling of the summary statistics table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableStyle {
    pub font: FontFamily,
    pub font_size: f32,
    pub row_height: f32,
    pub cell_padding: f32,
    pub column_widths: [f32; 2],
    /// Greyscale fill of the label cells (0 = black, 1 = white).
    pub label_background: f32,
    /// Greyscale colour of the grid lines.
    pub grid_color: f32,
    pub grid_thickness: f32,
    pub space_after: f32,
}

/// Fixed spreadsheet column widths, in character units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnLayout {
    pub assignment: f64,
    pub score: f64,
    pub status: f64,
    /// Shared by the feedback and improvements columns.
    pub text: f64,
}

impl ColumnLayout {
    /// Width of the zero-based column `index`.
    pub fn width(&self, index: usize) -> f64 {
        match index {
            0 => self.assignment,
            1 => self.score,
            2 => self.status,
            _ => self.text,
        }
    }
}

/// Every presentation constant the exporters use.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSheet {
    pub page: PageGeometry,
    pub title: TextStyle,
    pub heading: TextStyle,
    pub subheading: TextStyle,
    pub body: TextStyle,
    pub code: TextStyle,
    pub table: TableStyle,
    /// Vertical gap after the summary table and after each record block.
    pub block_gap: f32,
    pub columns: ColumnLayout,
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            page: PageGeometry::A4,
            title: TextStyle::new(FontFamily::HelveticaBold, 24.0).spacing(0.0, 30.0),
            heading: TextStyle::new(FontFamily::HelveticaBold, 16.0).spacing(20.0, 10.0),
            subheading: TextStyle::new(FontFamily::HelveticaBold, 12.0).spacing(10.0, 4.0),
            body: TextStyle::new(FontFamily::Helvetica, 10.0).spacing(5.0, 5.0),
            code: TextStyle::new(FontFamily::Courier, 8.0).indent(20.0, 20.0),
            table: TableStyle {
                font: FontFamily::Helvetica,
                font_size: 10.0,
                row_height: 18.0,
                cell_padding: 6.0,
                column_widths: [150.0, 100.0],
                label_background: 0.83,
                grid_color: 0.5,
                grid_thickness: 1.0,
                space_after: 20.0,
            },
            block_gap: 20.0,
            columns: ColumnLayout {
                assignment: 30.0,
                score: 10.0,
                status: 15.0,
                text: 50.0,
            },
        }
    }
}

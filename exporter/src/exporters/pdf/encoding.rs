//! Text encoding for the built-in PDF fonts.
//!
//! Helvetica and Courier are written with `WinAnsiEncoding`: one byte per glyph, Latin-1 plus a
//! handful of typographic characters in `0x80..=0x9F`. Anything else has no glyph, so it is
//! reported as an export failure instead of vanishing from the page.

use crate::error::ExportError;

/// Characters at WinAnsi codes `0x80..=0x9F`; `None` marks unassigned codes.
pub const WIN_ANSI_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'),
    None,
    Some('\u{201A}'),
    Some('\u{0192}'),
    Some('\u{201E}'),
    Some('\u{2026}'),
    Some('\u{2020}'),
    Some('\u{2021}'),
    Some('\u{02C6}'),
    Some('\u{2030}'),
    Some('\u{0160}'),
    Some('\u{2039}'),
    Some('\u{0152}'),
    None,
    Some('\u{017D}'),
    None,
    None,
    Some('\u{2018}'),
    Some('\u{2019}'),
    Some('\u{201C}'),
    Some('\u{201D}'),
    Some('\u{2022}'),
    Some('\u{2013}'),
    Some('\u{2014}'),
    Some('\u{02DC}'),
    Some('\u{2122}'),
    Some('\u{0161}'),
    Some('\u{203A}'),
    Some('\u{0153}'),
    None,
    Some('\u{017E}'),
    Some('\u{0178}'),
];

/// WinAnsi byte for `ch`, if the built-in fonts can draw it.
pub fn win_ansi_byte(ch: char) -> Option<u8> {
    match ch as u32 {
        0x20..=0x7E | 0xA0..=0xFF => Some(ch as u8),
        _ => WIN_ANSI_HIGH
            .iter()
            .position(|c| *c == Some(ch))
            .map(|i| 0x80 + i as u8),
    }
}

/// Fails on the first character that cannot be drawn. Line breaks and tabs are laid out by the
/// renderer and never reach the page as glyphs.
pub fn ensure_encodable(text: &str) -> Result<(), ExportError> {
    let unsupported = text
        .chars()
        .find(|&c| !matches!(c, '\n' | '\r' | '\t') && win_ansi_byte(c).is_none());

    match unsupported {
        Some(c) => Err(ExportError::failure(
            "PDF text encoding",
            format!(
                "{c:?} (U+{:04X}) has no glyph in the built-in fonts",
                c as u32
            ),
        )),
        None => Ok(()),
    }
}

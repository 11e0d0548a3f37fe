//! Cursor state carried by each screen: position, pending-wrap, current
//! attribute, and the G0/G1 character-set designations.

use vtline::{CellAttrs, ColorIndex};

/// The VT character sets selectable into G0/G1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharSet {
    Ascii,
    Uk,
    LineDrawing,
    Oem,
}

impl Default for CharSet {
    fn default() -> Self {
        Self::Ascii
    }
}

impl CharSet {
    /// Translates a printable 7-bit byte through this character set, as
    /// `put_char` does before placement.
    #[must_use]
    pub fn translate(self, byte: u8) -> char {
        match self {
            Self::Ascii => byte as char,
            Self::Uk if byte == b'#' => '\u{a3}',
            Self::Uk => byte as char,
            Self::LineDrawing => line_drawing_char(byte),
            Self::Oem => byte as char,
        }
    }
}

fn line_drawing_char(byte: u8) -> char {
    match byte {
        b'`' => '\u{25c6}',
        b'a' => '\u{2592}',
        b'b' => '\u{2409}',
        b'c' => '\u{240c}',
        b'd' => '\u{240d}',
        b'e' => '\u{240a}',
        b'f' => '\u{00b0}',
        b'g' => '\u{00b1}',
        b'h' => '\u{2424}',
        b'i' => '\u{240b}',
        b'j' => '\u{2518}',
        b'k' => '\u{2510}',
        b'l' => '\u{250c}',
        b'm' => '\u{2514}',
        b'n' => '\u{253c}',
        b'o' => '\u{23ba}',
        b'p' => '\u{23bb}',
        b'q' => '\u{2500}',
        b'r' => '\u{23bc}',
        b's' => '\u{23bd}',
        b't' => '\u{251c}',
        b'u' => '\u{2524}',
        b'v' => '\u{2534}',
        b'w' => '\u{252c}',
        b'x' => '\u{2502}',
        b'y' => '\u{2264}',
        b'z' => '\u{2265}',
        b'{' => '\u{03c0}',
        b'|' => '\u{2260}',
        b'}' => '\u{00a3}',
        b'~' => '\u{00b7}',
        other => other as char,
    }
}

/// A screen's cursor: position plus everything `save_cursor`/`restore_cursor`
/// snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub row: u16,
    pub col: u16,
    pub pending_wrap: bool,
    pub attrs: CellAttrs,
    pub fg: ColorIndex,
    pub bg: ColorIndex,
    pub utf8: bool,
    pub oem_acs: bool,
    pub g1_active: bool,
    pub g0: CharSet,
    pub g1: CharSet,
}

impl Cursor {
    #[must_use]
    pub fn home() -> Self {
        Self {
            row: 0,
            col: 0,
            pending_wrap: false,
            attrs: CellAttrs::empty(),
            fg: ColorIndex::DEFAULT_FG,
            bg: ColorIndex::DEFAULT_BG,
            utf8: true,
            oem_acs: false,
            g1_active: false,
            g0: CharSet::Ascii,
            g1: CharSet::Ascii,
        }
    }

    #[must_use]
    pub fn active_charset(&self) -> CharSet {
        if self.g1_active { self.g1 } else { self.g0 }
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::home()
    }
}

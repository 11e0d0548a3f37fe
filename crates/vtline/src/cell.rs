//! The terminal cell: the unit of the display grid.

use bitflags::bitflags;

/// A palette index, as used by the 9-bit foreground/background fields of the
/// original attribute word.
///
/// 0-7 are ANSI colours, 8-15 their bold variants, 16-255 the xterm 256-colour
/// cube/greyscale ramp, and 256-261 the default/cursor colours (see
/// `vtscreen::palette`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorIndex(pub u16);

impl ColorIndex {
    /// Default foreground, palette slot 256.
    pub const DEFAULT_FG: ColorIndex = ColorIndex(256);
    /// Default background, palette slot 258.
    pub const DEFAULT_BG: ColorIndex = ColorIndex(258);
    /// Cursor foreground, palette slot 260.
    pub const CURSOR_FG: ColorIndex = ColorIndex(260);
    /// Cursor background, palette slot 261.
    pub const CURSOR_BG: ColorIndex = ColorIndex(261);
}

impl Default for ColorIndex {
    fn default() -> Self {
        Self::DEFAULT_FG
    }
}

bitflags! {
    /// Persisted per-cell attribute flags.
    ///
    /// `CURSOR` and `SELECTED` are transient (painting-only) bits, kept
    /// separate from the persisted attribute word per the TATTR/ATTR split in
    /// the original design; they are never written into scrollback.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellAttrs: u16 {
        const BOLD      = 0x0001;
        const DIM       = 0x0002;
        const INVISIBLE = 0x0004;
        const UNDERLINE = 0x0008;
        const REVERSE   = 0x0010;
        const BLINK     = 0x0020;
        const WIDE      = 0x0040;
        const NARROW    = 0x0080;
        const CURSOR    = 0x0100;
        const SELECTED  = 0x0200;
    }
}

/// Sentinel base character marking the right half of a wide character.
///
/// Mirrors the original's `UCSWIDE` cell: a cell holding this value is never
/// painted directly, it only reserves the column next to a `WIDE` cell.
pub const WIDE_CONTINUATION: char = '\0';

/// A single display cell.
///
/// `cc_next` links to the next combining character appended to this cell's
/// logical character, stored as a relative offset into the line's backing
/// array (0 = end of chain), matching the `termchar.cc_next` layout the
/// original line storage uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub cc_next: u16,
    pub attrs: CellAttrs,
    pub fg: ColorIndex,
    pub bg: ColorIndex,
}

impl Cell {
    /// A blank cell: a space, no attributes, default colours.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            ch: ' ',
            cc_next: 0,
            attrs: CellAttrs::empty(),
            fg: ColorIndex::DEFAULT_FG,
            bg: ColorIndex::DEFAULT_BG,
        }
    }

    /// A blank cell carrying the given fill attribute (used for erase-cell
    /// fills, where the current SGR state determines the background).
    #[must_use]
    pub fn blank_with(attrs: CellAttrs, fg: ColorIndex, bg: ColorIndex) -> Self {
        Self {
            ch: ' ',
            cc_next: 0,
            attrs,
            fg,
            bg,
        }
    }

    #[must_use]
    pub fn is_wide_continuation(&self) -> bool {
        self.ch == WIDE_CONTINUATION
    }

    #[must_use]
    pub fn has_combining(&self) -> bool {
        self.cc_next != 0
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank()
    }
}

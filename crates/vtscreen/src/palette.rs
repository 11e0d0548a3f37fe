//! The 262-entry colour table that [`vtline::ColorIndex`] indexes into.
//!
//! Slots 0-15 are the ANSI colours and their bold variants, 16-231 the
//! 6x6x6 colour cube, 232-255 the greyscale ramp, and 256-261 the
//! default/cursor foreground and background — the same layout xterm's
//! 256-colour mode and the original terminal's `ATTR_FGMASK`/`ATTR_BGMASK`
//! fields use (see `original_source/term.h`).

use vtline::ColorIndex;
use xparsecolor::XColor;

pub const SIZE: usize = 262;

pub const DEFAULT_FG_INDEX: u16 = 256;
pub const DEFAULT_BOLD_FG_INDEX: u16 = 257;
pub const DEFAULT_BG_INDEX: u16 = 258;
pub const DEFAULT_BOLD_BG_INDEX: u16 = 259;
pub const CURSOR_FG_INDEX: u16 = 260;
pub const CURSOR_BG_INDEX: u16 = 261;

const ANSI_16: [(u8, u8, u8); 16] = [
    (0x00, 0x00, 0x00),
    (0xcd, 0x00, 0x00),
    (0x00, 0xcd, 0x00),
    (0xcd, 0xcd, 0x00),
    (0x00, 0x00, 0xee),
    (0xcd, 0x00, 0xcd),
    (0x00, 0xcd, 0xcd),
    (0xe5, 0xe5, 0xe5),
    (0x7f, 0x7f, 0x7f),
    (0xff, 0x00, 0x00),
    (0x00, 0xff, 0x00),
    (0xff, 0xff, 0x00),
    (0x5c, 0x5c, 0xff),
    (0xff, 0x00, 0xff),
    (0x00, 0xff, 0xff),
    (0xff, 0xff, 0xff),
];

const CUBE_STEPS: [u8; 6] = [0x00, 0x5f, 0x87, 0xaf, 0xd7, 0xff];

/// A colour palette: 262 RGB entries addressable by [`ColorIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    entries: [(u8, u8, u8); SIZE],
}

impl Palette {
    /// The default xterm-256 palette plus mintty's default-colour slots.
    #[must_use]
    pub fn default_xterm() -> Self {
        let mut entries = [(0u8, 0u8, 0u8); SIZE];

        entries[..16].copy_from_slice(&ANSI_16);

        for idx in 0..216 {
            let r = CUBE_STEPS[idx / 36];
            let g = CUBE_STEPS[(idx / 6) % 6];
            let b = CUBE_STEPS[idx % 6];
            entries[16 + idx] = (r, g, b);
        }

        for idx in 0..24 {
            let level = 8 + idx as u16 * 10;
            let level = level.min(238) as u8;
            entries[232 + idx] = (level, level, level);
        }

        entries[DEFAULT_FG_INDEX as usize] = (0xe5, 0xe5, 0xe5);
        entries[DEFAULT_BOLD_FG_INDEX as usize] = (0xff, 0xff, 0xff);
        entries[DEFAULT_BG_INDEX as usize] = (0x00, 0x00, 0x00);
        entries[DEFAULT_BOLD_BG_INDEX as usize] = (0x00, 0x00, 0x00);
        entries[CURSOR_FG_INDEX as usize] = (0x00, 0x00, 0x00);
        entries[CURSOR_BG_INDEX as usize] = (0xe5, 0xe5, 0xe5);

        Self { entries }
    }

    #[must_use]
    pub fn get(&self, index: ColorIndex) -> (u8, u8, u8) {
        self.entries[index.0 as usize % SIZE]
    }

    pub fn set(&mut self, index: ColorIndex, rgb: (u8, u8, u8)) {
        if (index.0 as usize) < SIZE {
            self.entries[index.0 as usize] = rgb;
        }
    }

    /// Sets a palette entry from a parsed `XColor`, as consumed by OSC 4/10/
    /// 11/12 palette and default-colour sequences.
    pub fn set_from_xcolor(&mut self, index: ColorIndex, color: XColor) {
        self.set(index, color.to_rgb8());
    }

    /// Finds the palette entry closest to an arbitrary RGB triple, by
    /// squared Euclidean distance over the 0-255 indexable entries. Used to
    /// degrade a 24-bit SGR colour (`38;2;r;g;b`) to the nearest indexed
    /// colour, since a [`vtline::Cell`] only carries a palette index.
    #[must_use]
    pub fn nearest_index(&self, rgb: (u8, u8, u8)) -> ColorIndex {
        let (r, g, b) = (i32::from(rgb.0), i32::from(rgb.1), i32::from(rgb.2));
        let mut best = ColorIndex(0);
        let mut best_dist = i32::MAX;
        for (idx, &(er, eg, eb)) in self.entries[..256].iter().enumerate() {
            let dr = r - i32::from(er);
            let dg = g - i32::from(eg);
            let db = b - i32::from(eb);
            let dist = dr * dr + dg * dg + db * db;
            if dist < best_dist {
                best_dist = dist;
                best = ColorIndex(idx as u16);
            }
        }
        best
    }

    /// Resets slots 256-261 (default fg/bg, cursor fg/bg) to the xterm
    /// defaults, as OSC 104/110/111/112 request.
    pub fn reset_defaults(&mut self) {
        let defaults = Self::default_xterm();
        for idx in DEFAULT_FG_INDEX..=CURSOR_BG_INDEX {
            self.entries[idx as usize] = defaults.entries[idx as usize];
        }
    }

    /// Resets slots 0-255 to the xterm defaults (OSC 104 with no argument
    /// restores the whole 256-colour table).
    pub fn reset_colors(&mut self) {
        let defaults = Self::default_xterm();
        self.entries[..256].copy_from_slice(&defaults.entries[..256]);
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::default_xterm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ansi_colors_match_known_values() {
        let palette = Palette::default_xterm();
        assert_eq!(palette.get(ColorIndex(1)), (0xcd, 0x00, 0x00));
        assert_eq!(palette.get(ColorIndex(15)), (0xff, 0xff, 0xff));
    }

    #[test]
    fn cube_corner_values() {
        let palette = Palette::default_xterm();
        assert_eq!(palette.get(ColorIndex(16)), (0, 0, 0));
        assert_eq!(palette.get(ColorIndex(231)), (0xff, 0xff, 0xff));
    }

    #[test]
    fn set_and_reset_defaults() {
        let mut palette = Palette::default_xterm();
        palette.set(ColorIndex::DEFAULT_FG, (1, 2, 3));
        assert_eq!(palette.get(ColorIndex::DEFAULT_FG), (1, 2, 3));
        palette.reset_defaults();
        assert_eq!(palette.get(ColorIndex::DEFAULT_FG), (0xe5, 0xe5, 0xe5));
    }

    #[test]
    fn nearest_index_finds_exact_matches_lowest_index_first() {
        let palette = Palette::default_xterm();
        // Pure black/white are exact hits at both an ANSI slot and a cube
        // corner; ties resolve to the lower index.
        assert_eq!(palette.nearest_index((0, 0, 0)), ColorIndex(0));
        assert_eq!(palette.nearest_index((0xff, 0xff, 0xff)), ColorIndex(15));
    }

    #[test]
    fn nearest_index_approximates_off_palette_colour() {
        let palette = Palette::default_xterm();
        // A mid grey with no exact match should land in the greyscale ramp.
        let idx = palette.nearest_index((0x76, 0x76, 0x76));
        assert!((232..256).contains(&idx.0));
    }
}

//! Line storage: the compressed scrollback and in-memory line buffers.

use bitflags::bitflags;
use smallvec::SmallVec;

use crate::cell::Cell;

bitflags! {
    /// Line-level attribute flags.
    ///
    /// `WIDE`/`TOP`/`BOTTOM` are conventionally mutually exclusive (a line is
    /// either single-width, double-width, or one half of a double-height
    /// pair); [`Line::set_width_mode`] enforces that. `WRAPPED`/`WRAPPED2`
    /// are independent soft-wrap markers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LineAttrs: u8 {
        const WIDE     = 0x01;
        const TOP      = 0x02;
        const BOTTOM   = 0x03;
        const WRAPPED  = 0x10;
        const WRAPPED2 = 0x20;
    }
}

const WIDTH_MODE_MASK: u8 = 0x03;

impl LineAttrs {
    /// The disjoint width-mode sub-bits, masked out of the wrap bits.
    #[must_use]
    pub fn width_mode_bits(self) -> u8 {
        self.bits() & WIDTH_MODE_MASK
    }
}

/// Inline capacity before a line's cell storage spills to the heap; sized for
/// a common 80-column terminal with a handful of combining characters.
const INLINE_CELLS: usize = 88;

/// A single row of the screen: a sequence of cells, logically `columns` long,
/// with any combining characters threaded off the end of that range.
#[derive(Debug, Clone)]
pub struct Line {
    cells: SmallVec<[Cell; INLINE_CELLS]>,
    columns: u16,
    attrs: LineAttrs,
    /// Free combining-character slots, by absolute index into `cells`.
    ///
    /// The original threads this as an intrusive list through `cc_next`; a
    /// flat free list is simpler here and behaviourally equivalent since
    /// nothing outside this module observes slot identity.
    free_list: Vec<u16>,
    /// Set on lines fetched from scrollback via [`Scrollback::fetch`]; callers
    /// that mutate such a line are working on a throwaway decompressed copy.
    temporary: bool,
}

impl Line {
    /// `new_line(columns, fill_attribute)`: a blank line of `columns` cells,
    /// each holding a space filled with `fill`.
    #[must_use]
    pub fn new(columns: u16, fill: Cell) -> Self {
        let mut cells = SmallVec::with_capacity(columns as usize);
        cells.resize(columns as usize, fill);
        Self {
            cells,
            columns,
            attrs: LineAttrs::empty(),
            free_list: Vec::new(),
            temporary: false,
        }
    }

    #[must_use]
    pub fn columns(&self) -> u16 {
        self.columns
    }

    #[must_use]
    pub fn attrs(&self) -> LineAttrs {
        self.attrs
    }

    pub fn set_attrs(&mut self, attrs: LineAttrs) {
        self.attrs = attrs;
    }

    /// Sets the width-mode sub-bits (normal/wide/top/bottom), preserving the
    /// independent wrap bits.
    pub fn set_width_mode(&mut self, mode: LineAttrs) {
        let wrap_bits = self.attrs.bits() & !WIDTH_MODE_MASK;
        self.attrs = LineAttrs::from_bits_retain(wrap_bits | mode.width_mode_bits());
    }

    #[must_use]
    pub fn is_temporary(&self) -> bool {
        self.temporary
    }

    /// Cells in the logical (on-screen) range `[0, columns)`.
    #[must_use]
    pub fn visible_cells(&self) -> &[Cell] {
        &self.cells[..self.columns as usize]
    }

    pub fn visible_cells_mut(&mut self) -> &mut [Cell] {
        let columns = self.columns as usize;
        &mut self.cells[..columns]
    }

    #[must_use]
    pub fn cell(&self, column: u16) -> &Cell {
        &self.cells[column as usize]
    }

    pub fn cell_mut(&mut self, column: u16) -> &mut Cell {
        &mut self.cells[column as usize]
    }

    pub fn set_cell(&mut self, column: u16, cell: Cell) {
        if self.cells[column as usize].has_combining() {
            self.clear_combining(column);
        }
        self.cells[column as usize] = cell;
    }

    /// The logical text of the line, combining characters applied, trailing
    /// blanks from the wide-continuation sentinel stripped.
    #[must_use]
    pub fn visible_text(&self) -> String {
        let mut out = String::with_capacity(self.columns as usize);
        for col in 0..self.columns {
            let cell = self.cell(col);
            if cell.is_wide_continuation() {
                continue;
            }
            out.push(cell.ch);
            let mut next = cell.cc_next;
            let mut idx = col as usize;
            while next != 0 {
                idx += next as usize;
                let cc = &self.cells[idx];
                out.push(cc.ch);
                next = cc.cc_next;
            }
        }
        out
    }

    /// `resize_line(line, new_columns)`: pad with blanks when growing,
    /// truncate and free dangling combining chains when shrinking.
    pub fn resize(&mut self, new_columns: u16, fill: Cell) {
        if new_columns > self.columns {
            // Grow the visible range in place; shift any existing combining
            // payload (which lives past the old `columns` boundary) out to
            // make room.
            let grow_by = (new_columns - self.columns) as usize;
            let insert_at = self.columns as usize;
            for _ in 0..grow_by {
                self.cells.insert(insert_at, fill);
            }
            // A root cell's link to its first combining character now
            // crosses the inserted gap; bump that one hop's offset. Hops
            // between combining slots themselves (all originally past
            // `insert_at`) shifted together and need no adjustment.
            for idx in 0..insert_at {
                let next = self.cells[idx].cc_next;
                if next != 0 && idx + next as usize >= insert_at {
                    self.cells[idx].cc_next = (next as usize + grow_by) as u16;
                }
            }
            // Free-list indices past the insertion point shift right.
            for idx in &mut self.free_list {
                if *idx as usize >= insert_at {
                    *idx += grow_by as u16;
                }
            }
            self.columns = new_columns;
        } else if new_columns < self.columns {
            // All combining-character payload lives past `columns`, so
            // truncating discards every chain outright; surviving root cells
            // just need their now-dangling links cleared.
            for col in 0..new_columns {
                self.cells[col as usize].cc_next = 0;
            }
            self.cells.truncate(new_columns as usize);
            self.columns = new_columns;
            self.free_list.clear();
        }
    }

    /// `add_combining(line, column, codepoint)`: append a combining code
    /// point to the logical character at `column`.
    pub fn add_combining(&mut self, column: u16, codepoint: char) {
        let new_cell = Cell {
            ch: codepoint,
            cc_next: 0,
            ..Cell::blank()
        };
        let slot = if let Some(free_idx) = self.free_list.pop() {
            self.cells[free_idx as usize] = new_cell;
            free_idx as usize
        } else {
            self.cells.push(new_cell);
            self.cells.len() - 1
        };

        // Walk to the end of the existing chain from `column` and link the
        // new slot on.
        let mut idx = column as usize;
        loop {
            let next = self.cells[idx].cc_next;
            if next == 0 {
                let offset = slot as i64 - idx as i64;
                self.cells[idx].cc_next = offset as u16;
                break;
            }
            idx += next as usize;
        }
    }

    /// `clear_combining(line, column)`: return the chain rooted at `column`
    /// to the free list.
    pub fn clear_combining(&mut self, column: u16) {
        let mut idx = column as usize;
        let mut next = self.cells[idx].cc_next;
        self.cells[idx].cc_next = 0;
        while next != 0 {
            idx += next as usize;
            next = self.cells[idx].cc_next;
            self.cells[idx].cc_next = 0;
            self.free_list.push(idx as u16);
        }
    }

    /// `compress(line)`: a lossless, size-reduced encoding for scrollback
    /// storage. Run-encodes repeated default cells and varint-deltas
    /// attribute changes; the exact byte layout is an implementation detail,
    /// only `decompress(compress(l)) == l` is required.
    #[must_use]
    pub fn compress(&self) -> CompressedLine {
        CompressedLine::from_line(self)
    }
}

/// A line encoded for scrollback storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedLine {
    columns: u16,
    attrs: LineAttrs,
    encoded: Vec<u8>,
}

// Encoding: a run-length stream of `(run_len: varint, cell)` pairs, followed
// by a combining-character section of `(column: varint, cc_next: varint,
// codepoint: varint)` triples, terminated by a zero-length marker. Attribute
// words and colours are varint-delta-encoded against the previous cell's
// values to keep runs of similarly-styled text small.
impl CompressedLine {
    fn from_line(line: &Line) -> Self {
        let mut encoded = Vec::new();
        let cells = line.visible_cells();
        let mut i = 0;
        let mut prev_attrs = 0u32;
        let mut prev_fg = 0u32;
        let mut prev_bg = 0u32;
        while i < cells.len() {
            let c = &cells[i];
            let mut run = 1usize;
            while i + run < cells.len()
                && cells[i + run].ch == c.ch
                && cells[i + run].attrs == c.attrs
                && cells[i + run].fg == c.fg
                && cells[i + run].bg == c.bg
                && !cells[i + run].has_combining()
            {
                run += 1;
            }
            write_varint(&mut encoded, run as u64);
            write_varint(&mut encoded, u32::from(c.ch) as u64);
            write_signed_varint(&mut encoded, i64::from(c.attrs.bits()) - i64::from(prev_attrs));
            write_signed_varint(&mut encoded, i64::from(c.fg.0) - i64::from(prev_fg));
            write_signed_varint(&mut encoded, i64::from(c.bg.0) - i64::from(prev_bg));
            prev_attrs = c.attrs.bits().into();
            prev_fg = c.fg.0.into();
            prev_bg = c.bg.0.into();
            i += run;
        }
        // End-of-cells marker: a zero run length.
        write_varint(&mut encoded, 0);

        for col in 0..line.columns {
            let cell = line.cell(col);
            if !cell.has_combining() {
                continue;
            }
            let mut idx = col as usize;
            let mut next = cell.cc_next;
            while next != 0 {
                idx += next as usize;
                let cc = &line.cells[idx];
                write_varint(&mut encoded, u64::from(col) + 1);
                write_varint(&mut encoded, (idx - col as usize) as u64);
                write_varint(&mut encoded, u32::from(cc.ch) as u64);
                next = cc.cc_next;
            }
        }
        write_varint(&mut encoded, 0);

        Self {
            columns: line.columns,
            attrs: line.attrs,
            encoded,
        }
    }

    /// `decompress(bytes)`: reconstruct a mutable [`Line`], marked
    /// `temporary` so the caller knows to discard it rather than mutate
    /// scrollback in place.
    #[must_use]
    pub fn decompress(&self) -> Line {
        let mut line = Line::new(self.columns, Cell::blank());
        line.attrs = self.attrs;
        line.temporary = true;

        let mut cursor = 0usize;
        let mut col = 0usize;
        let mut prev_attrs = 0u32;
        let mut prev_fg = 0u32;
        let mut prev_bg = 0u32;
        loop {
            let (run, next_cursor) = read_varint(&self.encoded, cursor);
            cursor = next_cursor;
            if run == 0 {
                break;
            }
            let (ch, c) = read_varint(&self.encoded, cursor);
            cursor = c;
            let (attrs_delta, c) = read_signed_varint(&self.encoded, cursor);
            cursor = c;
            let (fg_delta, c) = read_signed_varint(&self.encoded, cursor);
            cursor = c;
            let (bg_delta, c) = read_signed_varint(&self.encoded, cursor);
            cursor = c;

            let attrs_bits = (i64::from(prev_attrs) + attrs_delta) as u16;
            let fg = (i64::from(prev_fg) + fg_delta) as u16;
            let bg = (i64::from(prev_bg) + bg_delta) as u16;
            prev_attrs = attrs_bits.into();
            prev_fg = fg.into();
            prev_bg = bg.into();

            let cell = Cell {
                ch: char::from_u32(ch as u32).unwrap_or(' '),
                cc_next: 0,
                attrs: crate::cell::CellAttrs::from_bits_retain(attrs_bits),
                fg: crate::cell::ColorIndex(fg),
                bg: crate::cell::ColorIndex(bg),
            };
            for _ in 0..run {
                line.cells[col] = cell;
                col += 1;
            }
        }

        loop {
            let (marker, next_cursor) = read_varint(&self.encoded, cursor);
            cursor = next_cursor;
            if marker == 0 {
                break;
            }
            let base_col = (marker - 1) as u16;
            let (rel_idx, c) = read_varint(&self.encoded, cursor);
            cursor = c;
            let (ch, c) = read_varint(&self.encoded, cursor);
            cursor = c;
            let codepoint = char::from_u32(ch as u32).unwrap_or(' ');
            let target = base_col as usize + rel_idx as usize;
            while line.cells.len() <= target {
                line.cells.push(Cell::blank());
            }
            line.cells[target] = Cell {
                ch: codepoint,
                cc_next: 0,
                ..Cell::blank()
            };
            let mut idx = base_col as usize;
            loop {
                let next = line.cells[idx].cc_next;
                if next == 0 {
                    let offset = target as i64 - idx as i64;
                    line.cells[idx].cc_next = offset as u16;
                    break;
                }
                idx += next as usize;
            }
        }

        line
    }
}

fn write_varint(buf: &mut Vec<u8>, mut value: u64) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            break;
        }
        buf.push(byte | 0x80);
    }
}

fn read_varint(buf: &[u8], mut cursor: usize) -> (u64, usize) {
    let mut value = 0u64;
    let mut shift = 0;
    loop {
        let byte = buf[cursor];
        cursor += 1;
        value |= u64::from(byte & 0x7f) << shift;
        if byte & 0x80 == 0 {
            break;
        }
        shift += 7;
    }
    (value, cursor)
}

fn write_signed_varint(buf: &mut Vec<u8>, value: i64) {
    let zigzag = ((value << 1) ^ (value >> 63)) as u64;
    write_varint(buf, zigzag);
}

fn read_signed_varint(buf: &[u8], cursor: usize) -> (i64, usize) {
    let (zigzag, cursor) = read_varint(buf, cursor);
    let value = ((zigzag >> 1) as i64) ^ -((zigzag & 1) as i64);
    (value, cursor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{CellAttrs, ColorIndex};
    use pretty_assertions::assert_eq;

    #[test]
    fn new_line_is_blank() {
        let line = Line::new(10, Cell::blank());
        assert_eq!(line.columns(), 10);
        assert_eq!(line.visible_text(), " ".repeat(10));
    }

    #[test]
    fn resize_grow_pads_with_fill() {
        let mut line = Line::new(5, Cell::blank());
        line.set_cell(0, Cell { ch: 'x', ..Cell::blank() });
        line.resize(8, Cell::blank());
        assert_eq!(line.columns(), 8);
        assert_eq!(line.visible_text(), format!("x{}", " ".repeat(7)));
    }

    #[test]
    fn resize_shrink_truncates_and_frees_combining() {
        let mut line = Line::new(5, Cell::blank());
        line.set_cell(4, Cell { ch: 'e', ..Cell::blank() });
        line.add_combining(4, '\u{0301}');
        line.resize(3, Cell::blank());
        assert_eq!(line.columns(), 3);
    }

    #[test]
    fn add_and_clear_combining() {
        let mut line = Line::new(3, Cell::blank());
        line.set_cell(0, Cell { ch: 'e', ..Cell::blank() });
        line.add_combining(0, '\u{0301}');
        assert_eq!(line.visible_text(), "e\u{0301}  ");
        line.clear_combining(0);
        assert_eq!(line.visible_text(), "e  ");
    }

    #[test]
    fn multiple_combining_chars_chain() {
        let mut line = Line::new(3, Cell::blank());
        line.set_cell(0, Cell { ch: 'a', ..Cell::blank() });
        line.add_combining(0, '\u{0301}');
        line.add_combining(0, '\u{0302}');
        assert_eq!(line.visible_text(), "a\u{0301}\u{0302}  ");
    }

    #[test]
    fn compress_decompress_round_trip() {
        let mut line = Line::new(10, Cell::blank());
        line.set_cell(
            2,
            Cell {
                ch: 'Z',
                attrs: CellAttrs::BOLD,
                fg: ColorIndex(1),
                bg: ColorIndex::DEFAULT_BG,
                cc_next: 0,
            },
        );
        line.add_combining(2, '\u{0301}');
        line.set_attrs(LineAttrs::WRAPPED);

        let compressed = line.compress();
        let decompressed = compressed.decompress();

        assert_eq!(decompressed.columns(), line.columns());
        assert_eq!(decompressed.attrs(), line.attrs());
        assert_eq!(decompressed.visible_text(), line.visible_text());
        assert!(decompressed.is_temporary());
    }

    #[test]
    fn compress_decompress_all_blank() {
        let line = Line::new(80, Cell::blank());
        let round = line.compress().decompress();
        assert_eq!(round.visible_text(), line.visible_text());
    }
}

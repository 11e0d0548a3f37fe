//! The screen model: a 2D grid of lines plus cursor and margin state.

use vtline::{Cell, Line, LineAttrs};

use crate::cursor::Cursor;

/// Scope for `EL` (erase in line).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseLineMode {
    ToEnd,
    ToStart,
    Whole,
}

/// Scope for `ED` (erase in display). `Scrollback` is handled by the caller
/// (it clears the scrollback ring, not the display) but kept here so parser
/// code can dispatch on a single enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseDisplayMode {
    ToEnd,
    ToStart,
    Whole,
    Scrollback,
}

/// One of the two grids (primary or alternate) plus the state the parser
/// mutates directly: margins, cursor, tab stops, and the per-screen mode
/// toggles that affect how mutations behave.
#[derive(Debug, Clone)]
pub struct Screen {
    lines: Vec<Line>,
    rows: u16,
    columns: u16,
    margin_top: u16,
    margin_bottom: u16,
    pub origin_mode: bool,
    pub autowrap: bool,
    pub insert_mode: bool,
    cursor: Cursor,
    saved_cursor: Option<Cursor>,
    tab_stops: Vec<bool>,
}

impl Screen {
    #[must_use]
    pub fn new(rows: u16, columns: u16, fill: Cell) -> Self {
        let lines = (0..rows).map(|_| Line::new(columns, fill)).collect();
        Self {
            lines,
            rows,
            columns,
            margin_top: 0,
            margin_bottom: rows.saturating_sub(1),
            origin_mode: false,
            autowrap: true,
            insert_mode: false,
            cursor: Cursor::home(),
            saved_cursor: None,
            tab_stops: default_tab_stops(columns),
        }
    }

    #[must_use]
    pub fn rows(&self) -> u16 {
        self.rows
    }

    #[must_use]
    pub fn columns(&self) -> u16 {
        self.columns
    }

    #[must_use]
    pub fn margins(&self) -> (u16, u16) {
        (self.margin_top, self.margin_bottom)
    }

    #[must_use]
    pub fn line(&self, row: u16) -> &Line {
        &self.lines[row as usize]
    }

    pub fn line_mut(&mut self, row: u16) -> &mut Line {
        &mut self.lines[row as usize]
    }

    #[must_use]
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    /// The cell attribute a new character should be painted with, folding in
    /// the transient cursor bit — kept separate from the persisted attribute
    /// the cursor carries, per the ATTR/TATTR split in §3.
    #[must_use]
    pub fn cursor_cell_attrs(&self) -> vtline::CellAttrs {
        self.cursor.attrs | vtline::CellAttrs::CURSOR
    }

    /// `set_tab_stop`/`clear_tab_stop`/`next_tab`/`prev_tab`.
    pub fn set_tab_stop(&mut self, column: u16) {
        if let Some(slot) = self.tab_stops.get_mut(column as usize) {
            *slot = true;
        }
    }

    pub fn clear_tab_stop(&mut self, column: u16) {
        if let Some(slot) = self.tab_stops.get_mut(column as usize) {
            *slot = false;
        }
    }

    pub fn clear_all_tab_stops(&mut self) {
        self.tab_stops.fill(false);
    }

    #[must_use]
    pub fn next_tab(&self, column: u16) -> u16 {
        let mut col = column as usize + 1;
        while col < self.tab_stops.len() && !self.tab_stops[col] {
            col += 1;
        }
        col.min(self.columns.saturating_sub(1) as usize) as u16
    }

    #[must_use]
    pub fn prev_tab(&self, column: u16) -> u16 {
        if column == 0 {
            return 0;
        }
        let mut col = column as usize - 1;
        while col > 0 && !self.tab_stops[col] {
            col -= 1;
        }
        col as u16
    }

    /// `move_cursor(row, column)`: respects origin mode.
    pub fn move_cursor(&mut self, row: u16, column: u16) {
        let (row, col) = if self.origin_mode {
            let height = self.margin_bottom - self.margin_top;
            (
                self.margin_top + row.min(height),
                column.min(self.columns.saturating_sub(1)),
            )
        } else {
            (row.min(self.rows.saturating_sub(1)), column.min(self.columns.saturating_sub(1)))
        };
        self.cursor.row = row;
        self.cursor.col = col;
        self.cursor.pending_wrap = false;
    }

    /// Moves the cursor by a relative delta, clamped to the screen (or scroll
    /// region, in origin mode); used by CUU/CUD/CUF/CUB and friends.
    pub fn move_cursor_by(&mut self, d_row: i32, d_col: i32) {
        let (top, bottom) = if self.origin_mode {
            (self.margin_top, self.margin_bottom)
        } else {
            (0, self.rows.saturating_sub(1))
        };
        let new_row = (i32::from(self.cursor.row) + d_row).clamp(i32::from(top), i32::from(bottom));
        let new_col = (i32::from(self.cursor.col) + d_col)
            .clamp(0, i32::from(self.columns.saturating_sub(1)));
        self.cursor.row = new_row as u16;
        self.cursor.col = new_col as u16;
        if d_col != 0 {
            self.cursor.pending_wrap = false;
        }
    }

    pub fn save_cursor(&mut self) {
        self.saved_cursor = Some(self.cursor);
    }

    pub fn restore_cursor(&mut self) {
        if let Some(saved) = self.saved_cursor {
            self.cursor = saved;
        }
    }

    /// `scroll_region(top, bottom, lines, ...)`: positive `lines` scrolls the
    /// region up (content moves toward row `top`, blanks enter at `bottom`);
    /// negative scrolls down. Returns the lines retired off the top when
    /// scrolling up, in oldest-first order, for the caller to push to
    /// scrollback if appropriate.
    pub fn scroll_region(&mut self, top: u16, bottom: u16, lines: i32, fill: Cell) -> Vec<Line> {
        if top >= bottom || bottom >= self.rows || lines == 0 {
            return Vec::new();
        }
        let region_height = (bottom - top + 1) as usize;
        let amount = (lines.unsigned_abs() as usize).min(region_height);
        if amount == 0 {
            return Vec::new();
        }

        if lines > 0 {
            let mut retired = Vec::with_capacity(amount);
            for _ in 0..amount {
                retired.push(self.lines.remove(top as usize));
                self.lines
                    .insert(bottom as usize, Line::new(self.columns, fill));
            }
            retired
        } else {
            for _ in 0..amount {
                self.lines.remove(bottom as usize);
                self.lines
                    .insert(top as usize, Line::new(self.columns, fill));
            }
            Vec::new()
        }
    }

    /// `erase(mode)` restricted to the current line.
    pub fn erase_line(&mut self, mode: EraseLineMode, fill: Cell) {
        let row = self.cursor.row;
        let col = self.cursor.col as usize;
        let columns = self.columns as usize;
        let line = self.line_mut(row);
        match mode {
            EraseLineMode::ToEnd => {
                for c in col..columns {
                    line.set_cell(c as u16, fill);
                }
            }
            EraseLineMode::ToStart => {
                for c in 0..=col.min(columns.saturating_sub(1)) {
                    line.set_cell(c as u16, fill);
                }
            }
            EraseLineMode::Whole => {
                for c in 0..columns {
                    line.set_cell(c as u16, fill);
                }
                line.set_attrs(LineAttrs::empty());
            }
        }
    }

    /// `erase(mode)` restricted to the display. Returns nothing retired —
    /// erased content is discarded, not scrolled into scrollback.
    pub fn erase_display(&mut self, mode: EraseDisplayMode, fill: Cell) {
        let cursor_row = self.cursor.row;
        match mode {
            EraseDisplayMode::ToEnd => {
                self.erase_line(EraseLineMode::ToEnd, fill);
                for row in (cursor_row + 1)..self.rows {
                    self.clear_row(row, fill);
                }
            }
            EraseDisplayMode::ToStart => {
                self.erase_line(EraseLineMode::ToStart, fill);
                for row in 0..cursor_row {
                    self.clear_row(row, fill);
                }
            }
            EraseDisplayMode::Whole => {
                for row in 0..self.rows {
                    self.clear_row(row, fill);
                }
            }
            EraseDisplayMode::Scrollback => {
                // Handled by the terminal container; no display-local effect.
            }
        }
    }

    fn clear_row(&mut self, row: u16, fill: Cell) {
        let columns = self.columns;
        let line = self.line_mut(row);
        for c in 0..columns {
            line.set_cell(c, fill);
        }
        line.set_attrs(LineAttrs::empty());
    }

    /// `put_char`: place one cell (or a wide pair) at the cursor, handling
    /// pending-wrap, autowrap-triggered scroll, and insert mode. Returns any
    /// line retired by an autowrap-triggered scroll.
    pub fn put_char(&mut self, ch: char, width: u8, attrs: vtline::CellAttrs, fg: vtline::ColorIndex, bg: vtline::ColorIndex, fill: Cell) -> Option<Line> {
        let mut retired = None;

        if self.cursor.pending_wrap {
            if self.autowrap {
                let row = self.cursor.row;
                self.line_mut(row)
                    .set_attrs(self.line(row).attrs() | LineAttrs::WRAPPED);
                if row == self.margin_bottom {
                    retired = self
                        .scroll_region(self.margin_top, self.margin_bottom, 1, fill)
                        .into_iter()
                        .next();
                } else {
                    self.cursor.row = (row + 1).min(self.rows - 1);
                }
                self.cursor.col = 0;
            }
            self.cursor.pending_wrap = false;
        }

        if self.insert_mode {
            self.shift_right_from_cursor(width);
        }

        let cell = Cell {
            ch,
            cc_next: 0,
            attrs,
            fg,
            bg,
        };
        let row = self.cursor.row;
        let col = self.cursor.col;
        self.line_mut(row).set_cell(col, cell);
        if width == 2 && col + 1 < self.columns {
            self.line_mut(row).set_cell(
                col + 1,
                Cell {
                    ch: vtline::WIDE_CONTINUATION,
                    attrs,
                    ..Cell::blank()
                },
            );
        }

        let advance = u16::from(width.max(1));
        if self.cursor.col + advance >= self.columns {
            self.cursor.col = self.columns - 1;
            self.cursor.pending_wrap = true;
        } else {
            self.cursor.col += advance;
        }

        retired
    }

    fn shift_right_from_cursor(&mut self, width: u8) {
        let row = self.cursor.row;
        let col = self.cursor.col as usize;
        let columns = self.columns as usize;
        let shift = usize::from(width.max(1));
        let line = self.line_mut(row);
        for c in (col..columns).rev() {
            if c + shift < columns {
                let src = *line.cell((c) as u16);
                line.set_cell((c + shift) as u16, src);
            }
        }
    }

    /// `ICH`: insert `n` blank cells at the cursor, shifting right.
    pub fn insert_blank_cells(&mut self, n: u16, fill: Cell) {
        let row = self.cursor.row;
        let col = self.cursor.col as usize;
        let columns = self.columns as usize;
        let line = self.line_mut(row);
        let n = usize::from(n);
        for c in (col..columns).rev() {
            if c + n < columns {
                let src = *line.cell(c as u16);
                line.set_cell((c + n) as u16, src);
            }
        }
        for c in col..(col + n).min(columns) {
            line.set_cell(c as u16, fill);
        }
    }

    /// `DCH`: delete `n` cells at the cursor, shifting left.
    pub fn delete_cells(&mut self, n: u16, fill: Cell) {
        let row = self.cursor.row;
        let col = self.cursor.col as usize;
        let columns = self.columns as usize;
        let n = usize::from(n).min(columns.saturating_sub(col));
        let line = self.line_mut(row);
        for c in col..columns {
            if c + n < columns {
                let src = *line.cell((c + n) as u16);
                line.set_cell(c as u16, src);
            } else {
                line.set_cell(c as u16, fill);
            }
        }
    }

    /// `ECH`: erase `n` cells at the cursor, no movement.
    pub fn erase_cells(&mut self, n: u16, fill: Cell) {
        let row = self.cursor.row;
        let col = self.cursor.col;
        let end = (col + n).min(self.columns);
        let line = self.line_mut(row);
        for c in col..end {
            line.set_cell(c, fill);
        }
    }

    /// `IL`: insert `n` blank lines at the cursor row, within the scroll
    /// region (lines at the bottom of the region fall off).
    pub fn insert_lines(&mut self, n: u16, fill: Cell) {
        let row = self.cursor.row;
        if row < self.margin_top || row > self.margin_bottom {
            return;
        }
        self.scroll_region(row, self.margin_bottom, -(i32::from(n)), fill);
    }

    /// `DL`: delete `n` lines at the cursor row, within the scroll region.
    pub fn delete_lines(&mut self, n: u16, fill: Cell) {
        let row = self.cursor.row;
        if row < self.margin_top || row > self.margin_bottom {
            return;
        }
        self.scroll_region(row, self.margin_bottom, i32::from(n), fill);
    }

    /// `DECSTBM`: set scroll margins. A no-op (clipped to the prior margins)
    /// when `top >= bottom`.
    pub fn set_margins(&mut self, top: u16, bottom: u16) {
        if top >= bottom || bottom >= self.rows {
            return;
        }
        self.margin_top = top;
        self.margin_bottom = bottom;
    }

    pub fn reset_margins(&mut self) {
        self.margin_top = 0;
        self.margin_bottom = self.rows.saturating_sub(1);
    }

    /// `resize(rows, columns)`. `rewrap` distinguishes the primary screen's
    /// soft-wrap-preserving reflow from the alternate screen's plain
    /// pad/truncate.
    pub fn resize(&mut self, new_rows: u16, new_columns: u16, fill: Cell, rewrap: bool) {
        if rewrap && new_columns != self.columns {
            self.rewrap_to_width(new_columns, fill);
        } else if new_columns != self.columns {
            for line in &mut self.lines {
                line.resize(new_columns, fill);
            }
        }
        self.columns = new_columns;

        if new_rows > self.rows {
            for _ in 0..(new_rows - self.rows) {
                self.lines.push(Line::new(self.columns, fill));
            }
        } else if new_rows < self.rows {
            self.lines.truncate(new_rows as usize);
        }
        self.rows = new_rows;

        self.tab_stops = resize_tab_stops(std::mem::take(&mut self.tab_stops), new_columns);
        self.margin_top = self.margin_top.min(self.rows.saturating_sub(1));
        self.margin_bottom = self.rows.saturating_sub(1).min(self.margin_bottom.max(self.margin_top));
        self.cursor.row = self.cursor.row.min(self.rows.saturating_sub(1));
        self.cursor.col = self.cursor.col.min(self.columns.saturating_sub(1));
    }

    /// Re-flows soft-wrapped line runs to a new column width, preserving as
    /// much content as possible.
    fn rewrap_to_width(&mut self, new_columns: u16, fill: Cell) {
        let mut paragraphs: Vec<String> = Vec::new();
        let mut current = String::new();
        for line in &self.lines {
            current.push_str(&line.visible_text());
            if line.attrs().contains(LineAttrs::WRAPPED) {
                continue;
            }
            paragraphs.push(std::mem::take(&mut current).trim_end().to_string());
        }
        if !current.is_empty() {
            paragraphs.push(current.trim_end().to_string());
        }

        let mut new_lines = Vec::new();
        for para in paragraphs {
            let chars: Vec<char> = para.chars().collect();
            if chars.is_empty() {
                new_lines.push(Line::new(new_columns, fill));
                continue;
            }
            let mut idx = 0;
            while idx < chars.len() {
                let end = (idx + new_columns as usize).min(chars.len());
                let mut line = Line::new(new_columns, fill);
                for (c, ch) in chars[idx..end].iter().enumerate() {
                    line.set_cell(c as u16, Cell { ch: *ch, ..fill });
                }
                if end < chars.len() {
                    line.set_attrs(LineAttrs::WRAPPED);
                }
                new_lines.push(line);
                idx = end;
            }
        }

        while new_lines.len() < self.lines.len() {
            new_lines.push(Line::new(new_columns, fill));
        }
        self.lines = new_lines;
    }
}

fn default_tab_stops(columns: u16) -> Vec<bool> {
    (0..columns).map(|c| c % 8 == 0).collect()
}

fn resize_tab_stops(mut stops: Vec<bool>, new_columns: u16) -> Vec<bool> {
    let old_len = stops.len();
    stops.resize(new_columns as usize, false);
    for (col, stop) in stops.iter_mut().enumerate().skip(old_len) {
        *stop = col % 8 == 0;
    }
    stops
}

//! The `Terminal`: the state container a single-threaded main loop owns and
//! drives by `&mut` reference. Everything else in this crate is a method
//! call away from here — there is no internal locking and no `Send`/`Sync`
//! requirement, matching the single-threaded cooperative model of §5.

use std::time::Duration;

use vtline::{Cell, CellAttrs, ColorIndex, Scrollback};

use crate::palette::Palette;
use crate::screen::Screen;

/// Which of the two grids is currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveScreen {
    Primary,
    Alternate,
}

/// The mouse-reporting mode, selected by DEC private modes 9/1000/1002/1003.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseMode {
    #[default]
    Off,
    X10,
    Vt200,
    ButtonEvent,
    AnyEvent,
}

/// Selection lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Idle,
    Clicked,
    CharSelecting,
    WordSelecting,
    LineSelecting,
}

/// A character-cell position on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Pos {
    pub row: u16,
    pub col: u16,
}

/// The current selection, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub state: SelectionState,
    pub start: Pos,
    pub end: Pos,
    pub anchor: Pos,
    pub rectangular: bool,
}

impl Selection {
    #[must_use]
    pub fn idle() -> Self {
        Self {
            state: SelectionState::Idle,
            start: Pos { row: 0, col: 0 },
            end: Pos { row: 0, col: 0 },
            anchor: Pos { row: 0, col: 0 },
            rectangular: false,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state != SelectionState::Idle
    }

    /// Normalizes `start`/`end` into reading order (or rectangular-product
    /// order, if `rectangular`), per the invariant in §3.
    pub fn normalize(&mut self) {
        let out_of_order = if self.rectangular {
            (self.start.row, self.start.col) > (self.end.row, self.end.col)
        } else {
            self.start > self.end
        };
        if out_of_order {
            std::mem::swap(&mut self.start, &mut self.end);
        }
    }
}

/// Tracks recent bell ticks to detect bell overload (too many bells in too
/// short a window), matching the original's `belltime` ring.
#[derive(Debug, Clone, Default)]
pub struct BellOverloadTracker {
    ticks: Vec<Duration>,
    window: Duration,
    limit: usize,
}

impl BellOverloadTracker {
    #[must_use]
    pub fn new(window: Duration, limit: usize) -> Self {
        Self {
            ticks: Vec::new(),
            window,
            limit,
        }
    }

    /// Records a bell at `now` and reports whether the terminal is currently
    /// bell-overloaded (more than `limit` bells within `window`).
    pub fn record(&mut self, now: Duration) -> bool {
        self.ticks.retain(|&t| now.saturating_sub(t) < self.window);
        self.ticks.push(now);
        self.ticks.len() > self.limit
    }
}

/// Printer routing state (`§4.3` "Printing").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrintState {
    #[default]
    Off,
    Active,
    ScanningForEnd,
}

bitflags::bitflags! {
    /// The DEC/xterm mode toggles that aren't already fields of [`Screen`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ModeFlags: u32 {
        const APPLICATION_KEYPAD       = 1 << 0;
        const APPLICATION_CURSOR_KEYS  = 1 << 1;
        const NEWLINE_MODE             = 1 << 2;
        const REVERSE_VIDEO            = 1 << 3;
        const CURSOR_VISIBLE           = 1 << 4;
        const DEC_BCE                  = 1 << 5;
        const BLINK_IS_REAL            = 1 << 6;
        const ECHO                     = 1 << 7;
        const LOCAL_EDIT               = 1 << 8;
        const MOUSE_REPORT_FOCUS       = 1 << 9;
        const REPORT_AMBIGUOUS_WIDTH   = 1 << 10;
        const ALLOW_COLUMN_SWITCHING   = 1 << 11;
        const BRACKETED_PASTE          = 1 << 12;
    }
}

impl Default for ModeFlags {
    fn default() -> Self {
        Self::CURSOR_VISIBLE | Self::DEC_BCE
    }
}

/// The terminal state container: both screens, the scrollback ring, the
/// palette, and every mode toggle and transient bit the parser and input
/// layers mutate. Owned exclusively by the main loop; every operation takes
/// `&mut Terminal`.
pub struct Terminal {
    primary: Screen,
    alternate: Screen,
    active: ActiveScreen,
    show_scrollback_on_alt: bool,
    scrollback: Scrollback,
    erase_attrs: CellAttrs,
    erase_fg: ColorIndex,
    erase_bg: ColorIndex,
    pub bell_overload: BellOverloadTracker,
    pub mouse_mode: MouseMode,
    pub selection: Selection,
    pub palette: Palette,
    pub modes: ModeFlags,
    pub print_state: PrintState,
    pub has_focus: bool,
    pub seen_key_since_paint: bool,
    rows: u16,
    columns: u16,
}

const DEFAULT_SCROLLBACK_LINES: usize = 10_000;

impl Terminal {
    #[must_use]
    pub fn new(rows: u16, columns: u16) -> Self {
        let fill = Cell::blank();
        Self {
            primary: Screen::new(rows, columns, fill),
            alternate: Screen::new(rows, columns, fill),
            active: ActiveScreen::Primary,
            show_scrollback_on_alt: false,
            scrollback: Scrollback::new(DEFAULT_SCROLLBACK_LINES),
            erase_attrs: CellAttrs::empty(),
            erase_fg: ColorIndex::DEFAULT_FG,
            erase_bg: ColorIndex::DEFAULT_BG,
            bell_overload: BellOverloadTracker::new(Duration::from_secs(2), 5),
            mouse_mode: MouseMode::Off,
            selection: Selection::idle(),
            palette: Palette::default_xterm(),
            modes: ModeFlags::default(),
            print_state: PrintState::Off,
            has_focus: true,
            seen_key_since_paint: false,
            rows,
            columns,
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
    pub fn active_screen(&self) -> ActiveScreen {
        self.active
    }

    #[must_use]
    pub fn screen(&self) -> &Screen {
        match self.active {
            ActiveScreen::Primary => &self.primary,
            ActiveScreen::Alternate => &self.alternate,
        }
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        match self.active {
            ActiveScreen::Primary => &mut self.primary,
            ActiveScreen::Alternate => &mut self.alternate,
        }
    }

    #[must_use]
    pub fn primary_screen(&self) -> &Screen {
        &self.primary
    }

    #[must_use]
    pub fn alternate_screen(&self) -> &Screen {
        &self.alternate
    }

    #[must_use]
    pub fn scrollback(&self) -> &Scrollback {
        &self.scrollback
    }

    /// The erase cell `erase`/scroll fills use: background-colour-erase
    /// applies the current background when `DEC_BCE` is set, otherwise the
    /// default blank.
    #[must_use]
    pub fn erase_cell(&self) -> Cell {
        if self.modes.contains(ModeFlags::DEC_BCE) {
            Cell::blank_with(self.erase_attrs, self.erase_fg, self.erase_bg)
        } else {
            Cell::blank()
        }
    }

    pub fn set_erase_attrs(&mut self, attrs: CellAttrs, fg: ColorIndex, bg: ColorIndex) {
        self.erase_attrs = attrs;
        self.erase_fg = fg;
        self.erase_bg = bg;
    }

    /// `swap_screens(which, reset, keep_cursor)`.
    pub fn swap_screens(&mut self, to: ActiveScreen, reset: bool, keep_cursor: bool) {
        if self.active == to {
            return;
        }
        let prev_cursor = *self.screen().cursor();
        self.active = to;
        if to == ActiveScreen::Alternate && reset {
            let fill = self.erase_cell();
            self.alternate = Screen::new(self.rows, self.columns, fill);
        }
        if keep_cursor {
            *self.screen_mut().cursor_mut() = prev_cursor;
        }
    }

    /// `put_char`: place one cell (or a wide pair) at the cursor on the
    /// active screen, pushing any line retired by an autowrap-triggered
    /// scroll to the scrollback ring under the same full-primary-screen
    /// condition [`Terminal::scroll_active_region`] uses.
    pub fn put_char(&mut self, ch: char, width: u8, attrs: CellAttrs, fg: ColorIndex, bg: ColorIndex) {
        let fill = self.erase_cell();
        let is_primary = self.active == ActiveScreen::Primary;
        let (top, bottom) = self.screen().margins();
        let full_screen = top == 0 && bottom == self.screen().rows().saturating_sub(1);
        if let Some(line) = self.screen_mut().put_char(ch, width, attrs, fg, bg, fill)
            && is_primary
            && full_screen
        {
            self.scrollback.push(&line);
        }
    }

    /// Scrolls `lines` through the active screen's current scroll region,
    /// pushing retired lines to scrollback when the region spans the full
    /// primary screen.
    pub fn scroll_active_region(&mut self, lines: i32) {
        let fill = self.erase_cell();
        let is_primary = self.active == ActiveScreen::Primary;
        let (top, bottom) = self.screen().margins();
        let full_screen = top == 0 && bottom == self.screen().rows().saturating_sub(1);
        let retired = self.screen_mut().scroll_region(top, bottom, lines, fill);
        if is_primary && full_screen {
            for line in &retired {
                self.scrollback.push(line);
            }
        }
    }

    /// Resizes both screens: rewrap on the primary, pad/truncate on the
    /// alternate.
    pub fn resize(&mut self, rows: u16, columns: u16) {
        let fill = self.erase_cell();
        self.primary.resize(rows, columns, fill, true);
        self.alternate.resize(rows, columns, fill, false);
        self.rows = rows;
        self.columns = columns;
    }

    /// `ESC c` (RIS): full reset. Both screens blank, cursor home, margins
    /// full screen, all mode flags to power-on defaults, tab stops every 8
    /// columns, G0/G1 to ASCII, current screen to primary.
    pub fn full_reset(&mut self) {
        let fill = Cell::blank();
        self.primary = Screen::new(self.rows, self.columns, fill);
        self.alternate = Screen::new(self.rows, self.columns, fill);
        self.active = ActiveScreen::Primary;
        self.show_scrollback_on_alt = false;
        self.modes = ModeFlags::default();
        self.mouse_mode = MouseMode::Off;
        self.selection = Selection::idle();
        self.erase_attrs = CellAttrs::empty();
        self.erase_fg = ColorIndex::DEFAULT_FG;
        self.erase_bg = ColorIndex::DEFAULT_BG;
        self.print_state = PrintState::Off;
    }

    pub fn clear_scrollback(&mut self) {
        self.scrollback.clear();
    }
}

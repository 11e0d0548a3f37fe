//! Terminal output parser.
//!
//! Consumes bytes written by the child process and applies them directly to
//! a [`vtscreen::Terminal`]: UTF-8 text placement, C0 controls, ESC/CSI/OSC
//! sequences. `vt_push_parser` owns the byte-level state machine (GROUND,
//! CSI_SEEN, OSC_STRING, ...); this module is the dispatcher that turns its
//! events into terminal mutations.

use unicode_width::UnicodeWidthChar;
use vt_push_parser::{
    VT_PARSER_INTEREST_ALL, VTPushParser,
    event::{CSI, Esc, EscInvalid, VTEvent},
};
use vtline::{Cell, CellAttrs, ColorIndex};
use vtscreen::{
    ActiveScreen, BellKind, CharSet, EraseDisplayMode, EraseLineMode, ModeFlags, MouseMode,
    Palette, PtyChannel, Terminal, WindowSink, palette,
};
use xparsecolor::XColor;

use crate::event::PlainText;

use super::common;

const MAX_UTF8_CHAR_BYTES: usize = 4;
const MAX_OSC_BYTES: usize = 2048;

/// Fixed primary-DA response: VT220 class with selective erase, DRCS, UDK,
/// NRCS, Greek/Turkish, and ANSI colour, matching xterm's default report.
const DEVICE_ATTRIBUTES_RESPONSE: &[u8] = b"\x1b[?62;1;2;4;6;9;15;22c";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum CaptureMode {
    #[default]
    None,
    Dcs,
    Osc,
}

#[derive(Debug, Default)]
struct ParserState {
    utf8_buffer: [u8; MAX_UTF8_CHAR_BYTES],
    utf8_buffer_len: usize,
    capture_buffer: Vec<u8>,
    capture_mode: CaptureMode,
}

impl ParserState {
    const fn new() -> Self {
        Self {
            utf8_buffer: [0; MAX_UTF8_CHAR_BYTES],
            utf8_buffer_len: 0,
            capture_buffer: Vec::new(),
            capture_mode: CaptureMode::None,
        }
    }
}

/// Terminal output parser: feeds host bytes to a [`Terminal`] by `&mut`
/// reference, and to a [`WindowSink`]/[`PtyChannel`] pair for the side
/// effects (title changes, bells, query responses) the screen model itself
/// doesn't own.
pub struct TerminalOutputParser {
    seq_parser: VTPushParser<VT_PARSER_INTEREST_ALL>,
    state: ParserState,
}

impl Default for TerminalOutputParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalOutputParser {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            seq_parser: VTPushParser::new_with_interest::<VT_PARSER_INTEREST_ALL>(),
            state: ParserState::new(),
        }
    }

    /// Feeds a chunk of host output into the parser, applying every
    /// sequence it completes to `term`, `window`, and `pty` as it goes.
    pub fn feed<W: WindowSink, P: PtyChannel>(
        &mut self,
        input: &[u8],
        term: &mut Terminal,
        window: &mut W,
        pty: &mut P,
    ) {
        let state = &mut self.state;
        self.seq_parser.feed_with(input, |vt_event: VTEvent| {
            process_vt_event(&vt_event, state, term, window, pty);
        });
    }
}

#[allow(clippy::too_many_lines)]
fn process_vt_event<W: WindowSink, P: PtyChannel>(
    vt_event: &VTEvent,
    state: &mut ParserState,
    term: &mut Terminal,
    window: &mut W,
    pty: &mut P,
) {
    match vt_event {
        VTEvent::Raw(bytes) => {
            if state.utf8_buffer_len == 0 {
                state.utf8_buffer_len =
                    common::bytes_to_plaintext(bytes, &mut state.utf8_buffer, &mut |pt: &PlainText| {
                        place_text(pt.0, term);
                    });
            } else {
                let buf_len = state.utf8_buffer_len;
                let mut temp_buf = [0u8; MAX_UTF8_CHAR_BYTES];
                temp_buf[..buf_len].copy_from_slice(&state.utf8_buffer[..buf_len]);

                let take = bytes.len().min(MAX_UTF8_CHAR_BYTES - buf_len);
                temp_buf[buf_len..buf_len + take].copy_from_slice(&bytes[..take]);

                let incomplete_len = common::bytes_to_plaintext(
                    &temp_buf[..buf_len + take],
                    &mut state.utf8_buffer,
                    &mut |pt: &PlainText| place_text(pt.0, term),
                );

                state.utf8_buffer_len = if take < bytes.len() && incomplete_len <= take {
                    common::bytes_to_plaintext(
                        &bytes[take - incomplete_len..],
                        &mut state.utf8_buffer,
                        &mut |pt: &PlainText| place_text(pt.0, term),
                    )
                } else {
                    incomplete_len
                };
            }
        }
        VTEvent::C0(byte) => dispatch_c0(*byte, term, window),
        VTEvent::Esc(esc) => dispatch_esc(*esc, term),
        VTEvent::EscInvalid(esc) => dispatch_esc_invalid(*esc),
        VTEvent::Csi(csi) => dispatch_csi(csi, term, window, pty),
        VTEvent::Ss3(ss3) => {
            tracing::trace!(char = ss3.char, "unhandled output SS3");
        }
        VTEvent::Ss2(_) => {
            tracing::trace!("unhandled output SS2");
        }
        VTEvent::OscStart => {
            state.capture_buffer.clear();
            state.capture_mode = CaptureMode::Osc;
        }
        VTEvent::OscCancel => {
            state.capture_buffer.clear();
            state.capture_mode = CaptureMode::None;
        }
        VTEvent::OscData(data) => {
            if state.capture_mode == CaptureMode::Osc
                && state.capture_buffer.len() < MAX_OSC_BYTES
            {
                let room = MAX_OSC_BYTES - state.capture_buffer.len();
                state.capture_buffer.extend_from_slice(&data[..data.len().min(room)]);
            }
        }
        VTEvent::OscEnd { data, .. } => {
            if state.capture_buffer.len() < MAX_OSC_BYTES {
                let room = MAX_OSC_BYTES - state.capture_buffer.len();
                state.capture_buffer.extend_from_slice(&data[..data.len().min(room)]);
            }
            state.capture_mode = CaptureMode::None;
            let osc_data = std::mem::take(&mut state.capture_buffer);
            dispatch_osc(&osc_data, term, window);
        }
        // Device control strings are recognized but their bodies are
        // discarded; nothing in this engine consumes DCS payloads.
        VTEvent::DcsStart(_) => state.capture_mode = CaptureMode::Dcs,
        VTEvent::DcsCancel => state.capture_mode = CaptureMode::None,
        VTEvent::DcsData(_) => {}
        VTEvent::DcsEnd(_) => state.capture_mode = CaptureMode::None,
    }
}

fn place_text(text: &str, term: &mut Terminal) {
    for ch in text.chars() {
        place_char(ch, term);
    }
}

fn place_char(ch: char, term: &mut Terminal) {
    let translated = if ch.is_ascii() {
        term.screen().cursor().active_charset().translate(ch as u8)
    } else {
        ch
    };

    let width = UnicodeWidthChar::width(translated).unwrap_or(0);
    if width == 0 {
        attach_combining(translated, term);
        return;
    }

    let cursor = *term.screen().cursor();
    term.put_char(translated, width as u8, cursor.attrs, cursor.fg, cursor.bg);
}

fn attach_combining(ch: char, term: &mut Terminal) {
    let cursor = *term.screen().cursor();
    let row = cursor.row;
    let col = if cursor.pending_wrap {
        cursor.col
    } else {
        cursor.col.saturating_sub(1)
    };
    term.screen_mut().line_mut(row).add_combining(col, ch);
}

fn dispatch_c0<W: WindowSink>(byte: u8, term: &mut Terminal, window: &mut W) {
    match byte {
        0x07 => window.bell(BellKind::Sound),
        0x08 => term.screen_mut().move_cursor_by(0, -1),
        0x09 => {
            let col = term.screen().next_tab(term.screen().cursor().col);
            term.screen_mut().cursor_mut().col = col;
        }
        0x0A | 0x0B | 0x0C => newline(term, term.modes.contains(ModeFlags::NEWLINE_MODE)),
        0x0D => {
            let cursor = term.screen_mut().cursor_mut();
            cursor.col = 0;
            cursor.pending_wrap = false;
        }
        0x0E => term.screen_mut().cursor_mut().g1_active = true,
        0x0F => term.screen_mut().cursor_mut().g1_active = false,
        _ => tracing::trace!(byte, "unhandled C0 control"),
    }
}

/// `LF`/`VT`/`FF` (and `ESC E`, which also forces a CR): scroll the region
/// when the cursor sits on the bottom margin, otherwise move down one.
fn newline(term: &mut Terminal, also_cr: bool) {
    let (top, bottom) = term.screen().margins();
    let row = term.screen().cursor().row;
    if row == bottom {
        term.scroll_active_region(1);
    } else if row < bottom || row < top {
        term.screen_mut().move_cursor_by(1, 0);
    }
    if also_cr {
        let cursor = term.screen_mut().cursor_mut();
        cursor.col = 0;
        cursor.pending_wrap = false;
    }
}

/// `ESC M`: scroll the region down by one when at the top margin.
fn reverse_index(term: &mut Terminal) {
    let (top, _) = term.screen().margins();
    let row = term.screen().cursor().row;
    if row == top {
        term.scroll_active_region(-1);
    } else {
        term.screen_mut().move_cursor_by(-1, 0);
    }
}

fn dec_screen_alignment(term: &mut Terminal) {
    let rows = term.rows();
    let columns = term.columns();
    let fill = Cell {
        ch: 'E',
        ..Cell::blank()
    };
    for row in 0..rows {
        for col in 0..columns {
            term.screen_mut().line_mut(row).set_cell(col, fill);
        }
    }
    term.screen_mut().reset_margins();
    term.screen_mut().move_cursor(0, 0);
}

fn charset_from_byte(byte: u8) -> CharSet {
    match byte {
        b'0' => CharSet::LineDrawing,
        b'A' => CharSet::Uk,
        b'<' => CharSet::Oem,
        _ => CharSet::Ascii,
    }
}

fn dispatch_esc(esc: Esc, term: &mut Terminal) {
    if esc.intermediates.is_empty() {
        match esc.final_byte {
            b'7' => term.screen_mut().save_cursor(),
            b'8' => term.screen_mut().restore_cursor(),
            b'D' => newline(term, false),
            b'M' => reverse_index(term),
            b'E' => newline(term, true),
            b'H' => {
                let col = term.screen().cursor().col;
                term.screen_mut().set_tab_stop(col);
            }
            b'c' => term.full_reset(),
            final_byte => tracing::trace!(final_byte, "unhandled ESC sequence"),
        }
    } else if esc.intermediates.has(b'#') && esc.final_byte == b'8' {
        dec_screen_alignment(term);
    } else if esc.intermediates.has(b'(') {
        term.screen_mut().cursor_mut().g0 = charset_from_byte(esc.final_byte);
    } else if esc.intermediates.has(b')') {
        term.screen_mut().cursor_mut().g1 = charset_from_byte(esc.final_byte);
    } else {
        tracing::trace!(final_byte = esc.final_byte, "unhandled ESC sequence with intermediates");
    }
}

fn dispatch_esc_invalid(_esc: EscInvalid) {
    tracing::trace!("discarded malformed ESC sequence");
}

#[allow(clippy::too_many_lines)]
fn dispatch_csi<W: WindowSink, P: PtyChannel>(
    csi: &CSI,
    term: &mut Terminal,
    window: &mut W,
    pty: &mut P,
) {
    let n = |i: usize, default: u16| common::param_or(csi.params.try_parse::<u16>(i), default);
    let n0 = |i: usize, default: u16| common::param_or_unspecified(csi.params.try_parse::<u16>(i), default);

    match (csi.private, csi.final_byte) {
        (None, b'@') => {
            let fill = term.erase_cell();
            term.screen_mut().insert_blank_cells(n(0, 1), fill);
        }
        (None, b'A') => term.screen_mut().move_cursor_by(-i32::from(n(0, 1)), 0),
        (None, b'B') => term.screen_mut().move_cursor_by(i32::from(n(0, 1)), 0),
        (None, b'C') => term.screen_mut().move_cursor_by(0, i32::from(n(0, 1))),
        (None, b'D') => term.screen_mut().move_cursor_by(0, -i32::from(n(0, 1))),
        (None, b'E') => {
            term.screen_mut().move_cursor_by(i32::from(n(0, 1)), 0);
            term.screen_mut().cursor_mut().col = 0;
        }
        (None, b'F') => {
            term.screen_mut().move_cursor_by(-i32::from(n(0, 1)), 0);
            term.screen_mut().cursor_mut().col = 0;
        }
        (None, b'G' | b'`') => set_cursor_column(term, n(0, 1) - 1),
        (None, b'H' | b'f') => term.screen_mut().move_cursor(n(0, 1) - 1, n(1, 1) - 1),
        (None, b'I') => {
            for _ in 0..n(0, 1) {
                let col = term.screen().next_tab(term.screen().cursor().col);
                term.screen_mut().cursor_mut().col = col;
            }
        }
        (None, b'Z') => {
            for _ in 0..n(0, 1) {
                let col = term.screen().prev_tab(term.screen().cursor().col);
                term.screen_mut().cursor_mut().col = col;
            }
        }
        (None, b'J') => {
            let fill = term.erase_cell();
            match n0(0, 0) {
                0 => term.screen_mut().erase_display(EraseDisplayMode::ToEnd, fill),
                1 => term.screen_mut().erase_display(EraseDisplayMode::ToStart, fill),
                2 => term.screen_mut().erase_display(EraseDisplayMode::Whole, fill),
                3 => term.clear_scrollback(),
                _ => {}
            }
        }
        (None, b'K') => {
            let fill = term.erase_cell();
            match n0(0, 0) {
                0 => term.screen_mut().erase_line(EraseLineMode::ToEnd, fill),
                1 => term.screen_mut().erase_line(EraseLineMode::ToStart, fill),
                2 => term.screen_mut().erase_line(EraseLineMode::Whole, fill),
                _ => {}
            }
        }
        (None, b'L') => {
            let fill = term.erase_cell();
            term.screen_mut().insert_lines(n(0, 1), fill);
        }
        (None, b'M') => {
            let fill = term.erase_cell();
            term.screen_mut().delete_lines(n(0, 1), fill);
        }
        (None, b'P') => {
            let fill = term.erase_cell();
            term.screen_mut().delete_cells(n(0, 1), fill);
        }
        (None, b'S') => term.scroll_active_region(i32::from(n(0, 1))),
        (None, b'T') => term.scroll_active_region(-i32::from(n(0, 1))),
        (None, b'X') => {
            let fill = term.erase_cell();
            term.screen_mut().erase_cells(n(0, 1), fill);
        }
        (None, b'c') => {
            let _ = pty.write(DEVICE_ATTRIBUTES_RESPONSE);
        }
        (None, b'd') => {
            let row = n(0, 1) - 1;
            let col = term.screen().cursor().col;
            term.screen_mut().move_cursor(row, col);
        }
        (None, b'g') => match n0(0, 0) {
            0 => {
                let col = term.screen().cursor().col;
                term.screen_mut().clear_tab_stop(col);
            }
            3 => term.screen_mut().clear_all_tab_stops(),
            _ => {}
        },
        (None, b'h') => set_ansi_mode(term, n(0, 1), true),
        (None, b'l') => set_ansi_mode(term, n(0, 1), false),
        (Some(b'?'), b'h') => set_dec_mode(csi, term, true),
        (Some(b'?'), b'l') => set_dec_mode(csi, term, false),
        (None, b'm') => apply_sgr(csi, term),
        (None, b'n') => dispatch_dsr(n0(0, 0), term, pty),
        (None, b'r') => dispatch_decstbm(&n, term),
        (None, b's') | (Some(b'?'), b's') => term.screen_mut().save_cursor(),
        (None, b'u') | (Some(b'?'), b'u') => term.screen_mut().restore_cursor(),
        (None, b't') => window.report_size_request(),
        (private, final_byte) => {
            tracing::trace!(?private, final_byte, "unhandled CSI sequence");
        }
    }
}

fn set_cursor_column(term: &mut Terminal, column: u16) {
    let columns = term.screen().columns();
    let cursor = term.screen_mut().cursor_mut();
    cursor.col = column.min(columns.saturating_sub(1));
    cursor.pending_wrap = false;
}

fn dispatch_decstbm(n: &impl Fn(usize, u16) -> u16, term: &mut Terminal) {
    let rows = term.screen().rows();
    let top = n(0, 1) - 1;
    let bottom = n(1, rows).min(rows).saturating_sub(1);
    if top < bottom {
        term.screen_mut().set_margins(top, bottom);
        term.screen_mut().move_cursor(0, 0);
    }
}

fn dispatch_dsr<P: PtyChannel>(code: u16, term: &mut Terminal, pty: &mut P) {
    match code {
        5 => {
            let _ = pty.write(b"\x1b[0n");
        }
        6 => {
            let cursor = term.screen().cursor();
            let report = format!("\x1b[{};{}R", cursor.row + 1, cursor.col + 1);
            let _ = pty.write(report.as_bytes());
        }
        _ => {}
    }
}

fn set_ansi_mode(term: &mut Terminal, code: u16, enable: bool) {
    match code {
        4 => term.screen_mut().insert_mode = enable,
        20 => term.modes.set(ModeFlags::NEWLINE_MODE, enable),
        _ => tracing::trace!(code, enable, "unhandled ANSI mode"),
    }
}

fn set_dec_mode(csi: &CSI, term: &mut Terminal, enable: bool) {
    for i in 0..csi.params.len().max(1) {
        let Some(code) = csi.params.try_parse::<u16>(i) else {
            continue;
        };
        apply_dec_mode(code, term, enable);
    }
}

fn apply_dec_mode(code: u16, term: &mut Terminal, enable: bool) {
    match code {
        1 => term.modes.set(ModeFlags::APPLICATION_CURSOR_KEYS, enable),
        3 => term.modes.set(ModeFlags::ALLOW_COLUMN_SWITCHING, enable),
        5 => term.modes.set(ModeFlags::REVERSE_VIDEO, enable),
        6 => {
            term.screen_mut().origin_mode = enable;
            term.screen_mut().move_cursor(0, 0);
        }
        7 => term.screen_mut().autowrap = enable,
        9 => term.mouse_mode = if enable { MouseMode::X10 } else { MouseMode::Off },
        25 => term.modes.set(ModeFlags::CURSOR_VISIBLE, enable),
        1000 => term.mouse_mode = if enable { MouseMode::Vt200 } else { MouseMode::Off },
        1002 => term.mouse_mode = if enable { MouseMode::ButtonEvent } else { MouseMode::Off },
        1003 => term.mouse_mode = if enable { MouseMode::AnyEvent } else { MouseMode::Off },
        1004 => term.modes.set(ModeFlags::MOUSE_REPORT_FOCUS, enable),
        47 => set_alt_screen(term, enable, 47),
        1047 => set_alt_screen(term, enable, 1047),
        1048 => set_alt_screen(term, enable, 1048),
        1049 => set_alt_screen(term, enable, 1049),
        2004 => term.modes.set(ModeFlags::BRACKETED_PASTE, enable),
        _ => tracing::trace!(code, enable, "unhandled DEC private mode"),
    }
}

/// Switches the alternate screen per xterm's current behaviour for `1047`/
/// `1049` (reset the alternate screen on entry); `47` never resets.
fn set_alt_screen(term: &mut Terminal, enable: bool, mode: u16) {
    match mode {
        47 => term.swap_screens(
            if enable { ActiveScreen::Alternate } else { ActiveScreen::Primary },
            false,
            false,
        ),
        1047 => term.swap_screens(
            if enable { ActiveScreen::Alternate } else { ActiveScreen::Primary },
            enable,
            false,
        ),
        1048 => {
            if enable {
                term.screen_mut().save_cursor();
            } else {
                term.screen_mut().restore_cursor();
            }
        }
        1049 => {
            if enable {
                term.screen_mut().save_cursor();
                term.swap_screens(ActiveScreen::Alternate, true, false);
            } else {
                term.swap_screens(ActiveScreen::Primary, false, false);
                term.screen_mut().restore_cursor();
            }
        }
        _ => unreachable!("set_alt_screen only called with 47/1047/1048/1049"),
    }
}

fn apply_sgr(csi: &CSI, term: &mut Terminal) {
    if csi.params.is_empty() {
        reset_attrs(term);
        return;
    }

    let len = csi.params.len().min(common::MAX_CSI_PARAMS);
    let mut i = 0;
    while i < len {
        let code = common::param_or_unspecified(csi.params.try_parse::<u16>(i), 0);
        match code {
            0 => reset_attrs(term),
            1 => add_attr(term, CellAttrs::BOLD),
            2 => add_attr(term, CellAttrs::DIM),
            4 => add_attr(term, CellAttrs::UNDERLINE),
            5 | 6 => add_attr(term, CellAttrs::BLINK),
            7 => add_attr(term, CellAttrs::REVERSE),
            8 => add_attr(term, CellAttrs::INVISIBLE),
            22 => {
                remove_attr(term, CellAttrs::BOLD);
                remove_attr(term, CellAttrs::DIM);
            }
            24 => remove_attr(term, CellAttrs::UNDERLINE),
            25 => remove_attr(term, CellAttrs::BLINK),
            27 => remove_attr(term, CellAttrs::REVERSE),
            28 => remove_attr(term, CellAttrs::INVISIBLE),
            30..=37 => set_fg(term, ColorIndex(u16::from(code - 30))),
            40..=47 => set_bg(term, ColorIndex(u16::from(code - 40))),
            90..=97 => set_fg(term, ColorIndex(u16::from(code - 90 + 8))),
            100..=107 => set_bg(term, ColorIndex(u16::from(code - 100 + 8))),
            38 | 48 => {
                let (consumed, color) = parse_extended_color(csi, i + 1, term);
                i += consumed;
                if let Some(index) = color {
                    if code == 38 {
                        set_fg(term, index);
                    } else {
                        set_bg(term, index);
                    }
                }
            }
            39 => set_fg(term, ColorIndex::DEFAULT_FG),
            49 => set_bg(term, ColorIndex::DEFAULT_BG),
            _ => {}
        }
        i += 1;
    }
}

/// Parses the `5;N` or `2;r;g;b` tail of an extended SGR colour starting at
/// parameter index `start`. Returns how many extra parameters were consumed
/// (not counting the `38`/`48` itself) and the resolved palette index, if
/// any. True colour is degraded to the nearest palette entry, since a
/// [`Cell`] only carries a palette index.
fn parse_extended_color(csi: &CSI, start: usize, term: &Terminal) -> (usize, Option<ColorIndex>) {
    match csi.params.try_parse::<u16>(start) {
        Some(5) => match csi.params.try_parse::<u16>(start + 1) {
            Some(index) => (2, Some(ColorIndex(index))),
            None => (1, None),
        },
        Some(2) => {
            let r = csi.params.try_parse::<u8>(start + 1);
            let g = csi.params.try_parse::<u8>(start + 2);
            let b = csi.params.try_parse::<u8>(start + 3);
            match (r, g, b) {
                (Some(r), Some(g), Some(b)) => {
                    (4, Some(term.palette.nearest_index((r, g, b))))
                }
                _ => (1, None),
            }
        }
        _ => (0, None),
    }
}

fn reset_attrs(term: &mut Terminal) {
    let cursor = term.screen_mut().cursor_mut();
    cursor.attrs = CellAttrs::empty();
    cursor.fg = ColorIndex::DEFAULT_FG;
    cursor.bg = ColorIndex::DEFAULT_BG;
}

fn add_attr(term: &mut Terminal, attr: CellAttrs) {
    term.screen_mut().cursor_mut().attrs.insert(attr);
}

fn remove_attr(term: &mut Terminal, attr: CellAttrs) {
    term.screen_mut().cursor_mut().attrs.remove(attr);
}

fn set_fg(term: &mut Terminal, index: ColorIndex) {
    term.screen_mut().cursor_mut().fg = index;
}

fn set_bg(term: &mut Terminal, index: ColorIndex) {
    term.screen_mut().cursor_mut().bg = index;
}

fn dispatch_osc<W: WindowSink>(payload: &[u8], term: &mut Terminal, window: &mut W) {
    let (number, rest) = common::split_osc_number(payload);
    match number {
        Some(0 | 1 | 2) => {
            let title = String::from_utf8_lossy(rest);
            window.set_title(&title);
        }
        Some(4) => set_palette_entries(rest, term),
        Some(10) => set_named_color(rest, ColorIndex::DEFAULT_FG, term),
        Some(11) => set_named_color(rest, ColorIndex::DEFAULT_BG, term),
        Some(12) => set_named_color(rest, ColorIndex::CURSOR_FG, term),
        Some(52) => {
            // Clipboard access belongs to the host application; this engine
            // only models the screen, not the system clipboard.
        }
        Some(104) => term.palette.reset_colors(),
        Some(110) => reset_default_colors(term, &[palette::DEFAULT_FG_INDEX, palette::DEFAULT_BOLD_FG_INDEX]),
        Some(111) => reset_default_colors(term, &[palette::DEFAULT_BG_INDEX, palette::DEFAULT_BOLD_BG_INDEX]),
        Some(112) => reset_default_colors(term, &[palette::CURSOR_FG_INDEX, palette::CURSOR_BG_INDEX]),
        _ => tracing::trace!(?number, "unhandled OSC command"),
    }
}

fn set_palette_entries(payload: &[u8], term: &mut Terminal) {
    let mut parts = payload.split(|&b| b == b';');
    while let (Some(index_bytes), Some(spec_bytes)) = (parts.next(), parts.next()) {
        let Ok(index) = atoi_simd::parse::<u16>(index_bytes) else {
            continue;
        };
        if let Ok(color) = XColor::try_from_bytes(spec_bytes) {
            term.palette.set_from_xcolor(ColorIndex(index), color);
        }
    }
}

fn set_named_color(spec: &[u8], index: ColorIndex, term: &mut Terminal) {
    if let Ok(color) = XColor::try_from_bytes(spec) {
        term.palette.set_from_xcolor(index, color);
    }
}

fn reset_default_colors(term: &mut Terminal, indices: &[u16]) {
    let defaults = Palette::default_xterm();
    for &idx in indices {
        let rgb = defaults.get(ColorIndex(idx));
        term.palette.set(ColorIndex(idx), rgb);
    }
}

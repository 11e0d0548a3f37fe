//! The line discipline: local echo and cooked-mode editing sitting between
//! the input encoder and the PTY write channel.
//!
//! Grounded on `original_source/linedisc.c`'s `ldisc_send`/`uclen`/`ucwrite`.
//! When `local-edit` is off, bytes pass straight through (the PTY's own
//! discipline, not this one, generates `SIGINT`/`SIGQUIT` for `^C`/`^\\`).

/// What the line discipline produced for one input burst.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisciplineOutput {
    /// Bytes to write to the child.
    pub to_child: Vec<u8>,
    /// Bytes to echo to the screen model (local echo), in input order.
    pub echo: Vec<u8>,
    /// Set when `^D` was pressed on an empty buffer: the caller should treat
    /// this as a close request.
    pub close_requested: bool,
}

/// Display width, in echoed bytes, of one input byte — `uclen` in the
/// original. Governs how many `^H <SP> ^H` triples erase it.
fn uclen(byte: u8, utf8: bool) -> usize {
    if (32..=126).contains(&byte) || (byte >= 0xA0 && !utf8) {
        1
    } else if byte < 128 {
        2 // `^X` form
    } else if utf8 && byte >= 0xC0 {
        1 // UTF-8 introducer byte
    } else if utf8 && (0x80..0xC0).contains(&byte) {
        0 // UTF-8 continuation byte
    } else {
        4 // `<XY>` hex form
    }
}

/// Whether `byte` starts a new logical character (for `^H`/DEL, which must
/// erase back to the previous character boundary, not just one byte).
fn char_start(byte: u8, utf8: bool) -> bool {
    if utf8 {
        byte < 0x80 || byte >= 0xC0
    } else {
        true
    }
}

fn push_echo_byte(echo: &mut Vec<u8>, byte: u8, utf8: bool) {
    if (32..=126).contains(&byte) || (!utf8 && byte >= 0xA0) || (utf8 && byte >= 0x80) {
        echo.push(byte);
    } else if byte < 128 {
        echo.push(b'^');
        echo.push(if byte == 127 { b'?' } else { byte + 0x40 });
    } else {
        echo.extend(format!("<{byte:02X}>").into_bytes());
    }
}

fn push_backspace_erase(echo: &mut Vec<u8>, n: usize) {
    for _ in 0..n {
        echo.extend_from_slice(b"\x08 \x08");
    }
}

/// The line discipline's editing buffer and mode.
#[derive(Debug, Clone, Default)]
pub struct LineDiscipline {
    buf: Vec<u8>,
    quote_next: bool,
    pub local_edit: bool,
    pub local_echo: bool,
    pub utf8: bool,
}

impl LineDiscipline {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            quote_next: false,
            local_edit: false,
            local_echo: false,
            utf8: true,
        }
    }

    #[must_use]
    pub fn buffer(&self) -> &[u8] {
        &self.buf
    }

    /// Feeds a burst of input bytes through the discipline. Matches
    /// `ldisc_send`: when `local_edit` is off, flushes any pending buffer
    /// (erasing its echo first) and passes bytes straight through.
    pub fn feed(&mut self, bytes: &[u8]) -> DisciplineOutput {
        let mut out = DisciplineOutput::default();

        if !self.local_edit {
            if !self.buf.is_empty() {
                out.to_child.extend_from_slice(&self.buf);
                if self.local_echo {
                    let total: usize = self.buf.iter().map(|&b| uclen(b, self.utf8)).sum();
                    push_backspace_erase(&mut out.echo, total);
                }
                self.buf.clear();
            }
            if !bytes.is_empty() {
                if self.local_echo {
                    out.echo.extend_from_slice(bytes);
                }
                out.to_child.extend_from_slice(bytes);
            }
            return out;
        }

        for &raw in bytes {
            let c = if self.quote_next { b' ' } else { raw };
            self.quote_next = false;
            match c {
                0x08 | 0x7F => {
                    // backspace/delete: erase back to the previous char
                    // boundary, which may be multiple bytes in UTF-8.
                    if !self.buf.is_empty() {
                        loop {
                            let last = self.buf.pop().unwrap();
                            if self.local_echo {
                                push_backspace_erase(&mut out.echo, uclen(last, self.utf8));
                            }
                            if self.buf.is_empty() || char_start(*self.buf.last().unwrap(), self.utf8) {
                                break;
                            }
                        }
                    }
                }
                0x17 => {
                    // ^W: delete previous word
                    while let Some(&last) = self.buf.last() {
                        self.buf.pop();
                        if self.local_echo {
                            push_backspace_erase(&mut out.echo, uclen(last, self.utf8));
                        }
                        if let Some(&prev) = self.buf.last() {
                            if prev.is_ascii_whitespace() && !last.is_ascii_whitespace() {
                                break;
                            }
                        } else {
                            break;
                        }
                    }
                }
                0x12 => {
                    // ^R: redraw
                    if self.local_echo {
                        out.echo.extend_from_slice(b"^R\r\n");
                        for &b in &self.buf {
                            push_echo_byte(&mut out.echo, b, self.utf8);
                        }
                    }
                }
                0x16 => {
                    // ^V: quote next
                    self.quote_next = true;
                }
                0x04 => {
                    // ^D: send buffer, or request close if empty
                    if !self.buf.is_empty() {
                        out.to_child.extend_from_slice(&self.buf);
                        self.buf.clear();
                    } else {
                        out.close_requested = true;
                    }
                }
                b'\r' => {
                    if !self.buf.is_empty() {
                        out.to_child.extend_from_slice(&self.buf);
                    } else {
                        out.to_child.push(b'\r');
                    }
                    if self.local_echo {
                        out.echo.extend_from_slice(b"\r\n");
                    }
                    self.buf.clear();
                }
                0x15 | 0x03 | 0x1C | 0x1A => {
                    // ^U / ^C / ^\ / ^Z: clear the buffer (no signal sent —
                    // the PTY's own discipline handles SIGINT/SIGQUIT/SIGTSTP
                    // when local-edit is in play this way).
                    while let Some(last) = self.buf.pop() {
                        if self.local_echo {
                            push_backspace_erase(&mut out.echo, uclen(last, self.utf8));
                        }
                    }
                }
                _ => {
                    self.buf.push(c);
                    if self.local_echo {
                        push_echo_byte(&mut out.echo, c, self.utf8);
                    }
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scenario_5_local_edit_and_echo() {
        let mut ld = LineDiscipline::new();
        ld.local_edit = true;
        ld.local_echo = true;

        let out = ld.feed(b"AB\x08C\r");
        assert_eq!(out.to_child, b"AC\r");
        assert_eq!(out.echo, b"AB\x08 \x08C\r\n");
    }

    #[test]
    fn ctrl_d_on_empty_buffer_requests_close() {
        let mut ld = LineDiscipline::new();
        ld.local_edit = true;
        let out = ld.feed(b"\x04");
        assert!(out.close_requested);
        assert!(out.to_child.is_empty());
    }

    #[test]
    fn ctrl_d_with_pending_buffer_sends_without_newline() {
        let mut ld = LineDiscipline::new();
        ld.local_edit = true;
        let out = ld.feed(b"hi\x04");
        assert_eq!(out.to_child, b"hi");
        assert!(!out.close_requested);
    }

    #[test]
    fn ctrl_u_clears_buffer() {
        let mut ld = LineDiscipline::new();
        ld.local_edit = true;
        ld.local_echo = true;
        let out = ld.feed(b"hello\x15world\r");
        assert_eq!(out.to_child, b"world\r");
    }

    #[test]
    fn ctrl_w_deletes_previous_word() {
        let mut ld = LineDiscipline::new();
        ld.local_edit = true;
        let out = ld.feed(b"foo bar\x17\r");
        assert_eq!(out.to_child, b"foo \r");
    }

    #[test]
    fn ctrl_v_quotes_next_char_literally() {
        let mut ld = LineDiscipline::new();
        ld.local_edit = true;
        let out = ld.feed(b"\x16\x15\r");
        assert_eq!(out.to_child, b"\x15\r");
    }

    #[test]
    fn local_edit_off_passes_through_and_flushes_pending() {
        let mut ld = LineDiscipline::new();
        ld.local_edit = true;
        ld.feed(b"partial");
        ld.local_edit = false;
        let out = ld.feed(b"x");
        assert_eq!(out.to_child, b"partialx");
    }

    #[test]
    fn uclen_widths() {
        assert_eq!(uclen(b'A', true), 1);
        assert_eq!(uclen(0x01, true), 2);
        assert_eq!(uclen(0xC2, true), 1);
        assert_eq!(uclen(0x80, true), 0);
        assert_eq!(uclen(0xFF, false), 1);
    }
}

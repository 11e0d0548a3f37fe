//! Key event encoding: turning a decoded [`KeyEvent`] into the bytes sent to
//! the child process.

use vtansi::{AnsiEncode, EncodeError, write_csi};

use super::KeyboardModeFlags;
use super::event::KeyEvent;
use super::keycode::KeyCode;
use super::modifier::{KeyEventKind, KeyModifiers};

/// Map Ctrl+<char> to control code (ASCII).
#[inline]
pub(crate) fn control_code_for(c: char) -> u8 {
    match c {
        '@' | ' ' => 0x00,
        '[' => 0x1b,
        '\\' => 0x1c,
        ']' => 0x1d,
        '^' => 0x1e,
        '_' => 0x1f,
        '?' => 0x7f,
        _ => c as u8 & 0x1f,
    }
}

/// Generates bidirectional byte↔key conversion functions from a single
/// mapping definition. Only the key→byte direction is exercised by the
/// encoder, but both are generated so the table stays a single source of
/// truth if a decode path is ever added.
macro_rules! key_byte_conversions {
    (
        $byte_to_key:ident, $key_to_byte:ident, {
            $( [$first:expr $(, $rest:expr)*] => $key:ident $( ( $($arg:tt)* ) )? ),* $(,)?
        }
    ) => {
        #[inline]
        #[allow(dead_code)]
        fn $byte_to_key(byte: u8) -> Option<KeyCode> {
            match byte {
                $( $first $( | $rest )* => Some(KeyCode::$key $( ( $($arg)* ) )?), )*
                _ => None,
            }
        }

        #[inline]
        fn $key_to_byte(key: KeyCode) -> Option<u8> {
            match key {
                $( KeyCode::$key $( ( $($arg)* ) )? => Some($first), )*
                _ => None,
            }
        }
    };
}

// CSI final byte ↔ KeyCode conversions
//
// These keys use letter final bytes in CSI (`ESC [`) sequences:
// - Cursor keys: A (Up), B (Down), C (Right), D (Left)
// - Navigation: F (End), H (Home)
// - Function keys: P (F1), Q (F2), R (F3), S (F4)
// - BackTab: Z (CSI-only, not valid in SS3)
key_byte_conversions! {
    csi_final_byte_to_key, key_to_csi_final_byte, {
        [b'A'] => Up,
        [b'B'] => Down,
        [b'C'] => Right,
        [b'D'] => Left,
        [b'F'] => End,
        [b'H'] => Home,
        [b'P'] => F(1),
        [b'Q'] => F(2),
        [b'R'] => F(3),
        [b'S'] => F(4),
        [b'Z'] => BackTab,
    }
}

// CSI tilde code ↔ KeyCode conversions
//
// These keys use numeric codes followed by `~` in CSI sequences
// (`ESC [ <code> ~`): navigation (Home/Insert/Delete/End/PageUp/PageDown)
// and extended function keys F5-F20.
//
// Home and End have both VT220 (1/4) and xterm (7/8) codes; the VT220 codes
// are used as the canonical encoding.
key_byte_conversions! {
    csi_tilde_code_to_key, key_to_csi_tilde_code, {
        [1, 7] => Home,
        [2] => Insert,
        [3] => Delete,
        [4, 8] => End,
        [5] => PageUp,
        [6] => PageDown,
        [15] => F(5),
        [17] => F(6),
        [18] => F(7),
        [19] => F(8),
        [20] => F(9),
        [21] => F(10),
        [23] => F(11),
        [24] => F(12),
        [25] => F(13),
        [26] => F(14),
        [28] => F(15),
        [29] => F(16),
        [31] => F(17),
        [32] => F(18),
        [33] => F(19),
        [34] => F(20),
    }
}

/// Internal encoding strategy for a single key event.
///
/// This is the output side of the keyboard protocol: which bytes to write
/// for a given key, chosen from:
/// - Raw bytes (control codes, simple ASCII)
/// - UTF-8 encoded characters, optionally ESC-prefixed for Alt
/// - SS3 sequences (ESC O) for application mode keys
/// - CSI sequences (ESC [) with various parameter formats
#[derive(Debug, Clone, PartialEq, Eq)]
enum KeyEncoding {
    /// Single raw byte (control codes, simple ASCII chars).
    Raw(u8),
    /// UTF-8 encoded character, optionally with ESC prefix for Alt.
    Char { alt_prefix: bool, ch: char },
    /// SS3 sequence: `ESC O <final_byte>`.
    Ss3(u8),
    /// CSI with letter final byte, no modifiers: `ESC [ <final_byte>`.
    CsiFinal(u8),
    /// CSI with letter final byte and modifiers: `ESC [ 1 ; <mods> <final_byte>`.
    CsiModFinal { mods: u8, final_byte: u8 },
    /// CSI with numeric code and tilde: ESC [ <code> ~.
    CsiTilde(u8),
    /// CSI with numeric code, modifiers, and tilde: ESC [ <code> ; <mods> ~.
    CsiModTilde { code: u8, mods: u8 },
    /// No encoding (unsupported keys like Media, Modifier, or non-press events).
    None,
}

impl KeyEncoding {
    /// Determine the encoding strategy for a key event, ignoring terminal
    /// mode flags (as if none were set).
    #[cfg(test)]
    fn from_key_event(event: &KeyEvent) -> Self {
        Self::from_key_event_with_modes(event, KeyboardModeFlags::empty())
    }

    /// Determine the encoding strategy for a key event, respecting terminal
    /// mode flags.
    ///
    /// - `CURSOR_KEYS`: cursor keys use SS3 (ESC O) instead of CSI (ESC [)
    /// - `BACKSPACE_SENDS_DELETE`: Backspace sends BS (0x08) instead of DEL
    /// - `ALT_KEY_HIGH_BIT_SET`: Alt sets the high bit instead of ESC prefix
    /// - `DELETE_KEY_SENDS_DEL`: Delete sends DEL (0x7F) instead of CSI-tilde
    fn from_key_event_with_modes(
        event: &KeyEvent,
        mode_flags: KeyboardModeFlags,
    ) -> Self {
        if event.kind != KeyEventKind::Press {
            return Self::None;
        }

        let mods = event.modifiers;
        let mod_param = mods.to_xterm_param();
        let has_mods = mod_param > 1;
        let code = event.code;

        let alt_high_bit =
            mode_flags.contains(KeyboardModeFlags::ALT_KEY_HIGH_BIT_SET);
        let alt_prefix = mods.contains(KeyModifiers::ALT) && !alt_high_bit;
        let alt_set_high_bit = mods.contains(KeyModifiers::ALT) && alt_high_bit;

        let cursor_keys_mode =
            mode_flags.contains(KeyboardModeFlags::CURSOR_KEYS);

        if let KeyCode::Char(c) = code {
            return Self::encode_char(c, mods, alt_prefix, alt_set_high_bit);
        }

        match code {
            KeyCode::Enter => return Self::Raw(b'\r'),
            KeyCode::Backspace => {
                return if mode_flags
                    .contains(KeyboardModeFlags::BACKSPACE_SENDS_DELETE)
                {
                    Self::Raw(0x08)
                } else {
                    Self::Raw(0x7f)
                };
            }
            KeyCode::Delete => {
                if mode_flags.contains(KeyboardModeFlags::DELETE_KEY_SENDS_DEL)
                {
                    return Self::Raw(0x7f);
                }
                // Otherwise fall through to CSI-tilde encoding below.
            }
            KeyCode::Tab => {
                return if mods.contains(KeyModifiers::SHIFT) {
                    Self::CsiFinal(b'Z') // BackTab
                } else {
                    Self::Raw(b'\t')
                };
            }
            KeyCode::Esc => return Self::Raw(0x1b),
            _ => {}
        }

        // Navigation keys: CSI final byte format (cursor keys, Home/End, F1-F4)
        if let Some(final_byte) = key_to_csi_final_byte(code) {
            let is_cursor_key = matches!(
                code,
                KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right
            );
            let is_f1_f4 = matches!(code, KeyCode::F(1..=4));
            let is_home_end = matches!(code, KeyCode::Home | KeyCode::End);

            let use_ss3 = !has_mods
                && (is_f1_f4
                    || (is_cursor_key && cursor_keys_mode)
                    || (is_home_end && cursor_keys_mode));

            return if use_ss3 {
                Self::Ss3(final_byte)
            } else if has_mods {
                Self::CsiModFinal {
                    mods: mod_param,
                    final_byte,
                }
            } else {
                Self::CsiFinal(final_byte)
            };
        }

        // Extended keys: CSI tilde format (Insert, Delete, PageUp/Down, F5-F20)
        // Home/End are handled above via their final-byte form.
        if let Some(tilde_code) = key_to_csi_tilde_code(code) {
            if !matches!(code, KeyCode::Home | KeyCode::End) {
                return if has_mods {
                    Self::CsiModTilde {
                        code: tilde_code,
                        mods: mod_param,
                    }
                } else {
                    Self::CsiTilde(tilde_code)
                };
            }
        }

        Self::None
    }

    /// Encode a character key based on modifiers.
    ///
    /// - With CONTROL: produces control code (0x00-0x1F, 0x7F)
    /// - With SHIFT on lowercase: produces uppercase
    /// - With ALT: adds ESC prefix or sets high bit depending on mode
    #[inline]
    fn encode_char(
        c: char,
        mods: KeyModifiers,
        alt_prefix: bool,
        alt_set_high_bit: bool,
    ) -> Self {
        if mods.contains(KeyModifiers::CONTROL) {
            let ctrl = control_code_for(c);
            if alt_prefix {
                Self::Char {
                    alt_prefix: true,
                    ch: ctrl as char,
                }
            } else if alt_set_high_bit {
                Self::Raw(ctrl | 0x80)
            } else {
                Self::Raw(ctrl)
            }
        } else {
            let ch = if mods.contains(KeyModifiers::SHIFT)
                && c.is_ascii_lowercase()
            {
                c.to_ascii_uppercase()
            } else {
                c
            };

            if alt_set_high_bit && ch.is_ascii() {
                Self::Raw((ch as u8) | 0x80)
            } else {
                Self::Char { alt_prefix, ch }
            }
        }
    }
}

impl AnsiEncode for KeyEncoding {
    fn encode_ansi_into<W: std::io::Write + ?Sized>(
        &self,
        buf: &mut W,
    ) -> Result<usize, EncodeError> {
        match self {
            Self::None => Ok(0),

            Self::Raw(byte) => vtansi::write_byte_into(buf, *byte),

            Self::Char { alt_prefix, ch } => {
                let mut total = 0;
                if *alt_prefix {
                    total += vtansi::write_byte_into(buf, 0x1b)?;
                }
                let mut tmp = [0u8; 4];
                let s = ch.encode_utf8(&mut tmp);
                total += vtansi::write_bytes_into(buf, s.as_bytes())?;
                Ok(total)
            }

            Self::Ss3(final_byte) => {
                vtansi::write_bytes_into(buf, &[0x1b, b'O', *final_byte])
            }

            Self::CsiFinal(final_byte) => {
                vtansi::write_bytes_into(buf, &[0x1b, b'[', *final_byte])
            }

            Self::CsiModFinal { mods, final_byte } => {
                write_csi!(buf; "1;", *mods, *final_byte as char)
            }

            Self::CsiTilde(code) => {
                write_csi!(buf; *code, "~")
            }

            Self::CsiModTilde { code, mods } => {
                write_csi!(buf; *code, ";", *mods, "~")
            }
        }
    }
}

impl AnsiEncode for KeyEvent {
    #[inline]
    fn encode_ansi_into<W: std::io::Write + ?Sized>(
        &self,
        buf: &mut W,
    ) -> Result<usize, EncodeError> {
        KeyEncoding::from_key_event_with_modes(self, KeyboardModeFlags::empty())
            .encode_ansi_into(buf)
    }
}

/// Encode a key event as the bytes the child process should receive, given
/// the terminal's current keyboard mode flags.
///
/// # Example
///
/// ```ignore
/// use vtio::event::keyboard::{KeyCode, KeyEvent, KeyModifiers, KeyboardModeFlags, encode_key_event};
///
/// let event = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
/// let bytes = encode_key_event(&event, KeyboardModeFlags::CURSOR_KEYS).unwrap();
/// assert_eq!(bytes, b"\x1bOA");
/// ```
///
/// # Errors
///
/// Returns an error if encoding fails (only possible for buffer-constrained
/// sinks; `Vec<u8>` never fails).
pub fn encode_key_event(
    event: &KeyEvent,
    mode_flags: KeyboardModeFlags,
) -> Result<Vec<u8>, EncodeError> {
    KeyEncoding::from_key_event_with_modes(event, mode_flags).encode_ansi()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::keyboard::event::KeyEventBuilder;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEventBuilder::new(code).modifiers(modifiers).build()
    }

    #[test]
    fn plain_char_encodes_as_utf8() {
        let event = press(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(event.encode_ansi().unwrap(), b"a");
    }

    #[test]
    fn shift_lowercase_uppercases() {
        let event = press(KeyCode::Char('a'), KeyModifiers::SHIFT);
        assert_eq!(event.encode_ansi().unwrap(), b"A");
    }

    #[test]
    fn ctrl_char_encodes_control_code() {
        let event = press(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(event.encode_ansi().unwrap(), vec![0x03]);
    }

    #[test]
    fn alt_char_prefixes_esc_by_default() {
        let event = press(KeyCode::Char('x'), KeyModifiers::ALT);
        assert_eq!(event.encode_ansi().unwrap(), b"\x1bx");
    }

    #[test]
    fn alt_high_bit_mode_sets_bit_seven() {
        let event = press(KeyCode::Char('x'), KeyModifiers::ALT);
        let encoded =
            encode_key_event(&event, KeyboardModeFlags::ALT_KEY_HIGH_BIT_SET)
                .unwrap();
        assert_eq!(encoded, vec![b'x' | 0x80]);
    }

    #[test]
    fn enter_sends_cr() {
        let event = press(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(event.encode_ansi().unwrap(), b"\r");
    }

    #[test]
    fn backspace_sends_del_by_default() {
        let event = press(KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(event.encode_ansi().unwrap(), vec![0x7f]);
    }

    #[test]
    fn backspace_sends_bs_with_mode_set() {
        let event = press(KeyCode::Backspace, KeyModifiers::NONE);
        let encoded = encode_key_event(
            &event,
            KeyboardModeFlags::BACKSPACE_SENDS_DELETE,
        )
        .unwrap();
        assert_eq!(encoded, vec![0x08]);
    }

    #[test]
    fn up_arrow_sends_csi_by_default() {
        let event = press(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(event.encode_ansi().unwrap(), b"\x1b[A");
    }

    #[test]
    fn up_arrow_sends_ss3_in_cursor_keys_mode() {
        let event = press(KeyCode::Up, KeyModifiers::NONE);
        let encoded =
            encode_key_event(&event, KeyboardModeFlags::CURSOR_KEYS).unwrap();
        assert_eq!(encoded, b"\x1bOA");
    }

    #[test]
    fn shift_up_arrow_sends_modified_csi() {
        let event = press(KeyCode::Up, KeyModifiers::SHIFT);
        assert_eq!(event.encode_ansi().unwrap(), b"\x1b[1;2A");
    }

    #[test]
    fn f1_always_sends_ss3() {
        let event = press(KeyCode::F(1), KeyModifiers::NONE);
        assert_eq!(event.encode_ansi().unwrap(), b"\x1bOP");
    }

    #[test]
    fn delete_sends_csi_tilde_by_default() {
        let event = press(KeyCode::Delete, KeyModifiers::NONE);
        assert_eq!(event.encode_ansi().unwrap(), b"\x1b[3~");
    }

    #[test]
    fn delete_sends_del_with_mode_set() {
        let event = press(KeyCode::Delete, KeyModifiers::NONE);
        let encoded =
            encode_key_event(&event, KeyboardModeFlags::DELETE_KEY_SENDS_DEL)
                .unwrap();
        assert_eq!(encoded, vec![0x7f]);
    }

    #[test]
    fn f5_sends_csi_tilde_with_code_fifteen() {
        let event = press(KeyCode::F(5), KeyModifiers::NONE);
        assert_eq!(event.encode_ansi().unwrap(), b"\x1b[15~");
    }

    #[test]
    fn shift_tab_sends_backtab() {
        let event = press(KeyCode::Tab, KeyModifiers::SHIFT);
        assert_eq!(event.encode_ansi().unwrap(), b"\x1b[Z");
    }

    #[test]
    fn release_events_encode_to_nothing() {
        let event = KeyEventBuilder::new(KeyCode::Char('a'))
            .kind(KeyEventKind::Release)
            .build();
        assert_eq!(event.encode_ansi().unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn media_keys_have_no_encoding() {
        let event = press(
            KeyCode::Media(super::super::keycode::MediaKeyCode::Play),
            KeyModifiers::NONE,
        );
        assert_eq!(event.encode_ansi().unwrap(), Vec::<u8>::new());
    }
}

//! Keyboard mode flags and application-keypad control sequences.

use vtansi::bitflags;

bitflags! {
    /// Keyboard mode flags that affect how [`super::KeyEvent`]s are encoded.
    ///
    /// These mirror the DEC private modes that a child process can toggle
    /// via CSI sequences (`DECCKM`, `DECBKM`, the xterm `alt-sends-escape`
    /// and `delete-sends-del` modes); [`super::encoding::KeyEncoding`]
    /// consults them to pick the wire form for a given key.
    #[derive(Debug, PartialOrd, PartialEq, Eq, Clone, Copy, Hash, Default)]
    pub struct KeyboardModeFlags: u8 {
        /// `DECCKM` is set: cursor keys send `SS3` sequences instead of CSI.
        const CURSOR_KEYS = 0b0000_0001;
        /// `DECNKM`/`DECKPAM` is set: keypad keys send application sequences.
        const APPLICATION_KEYPAD = 0b0000_0010;
        /// `DECBKM` is set: Backspace sends BS (0x08) instead of DEL (0x7f).
        const BACKSPACE_SENDS_DELETE = 0b0000_0100;
        /// Alt held sets the high bit of the byte instead of prefixing ESC.
        const ALT_KEY_HIGH_BIT_SET = 0b0000_1000;
        /// Delete key sends DEL (0x7f) instead of a CSI-tilde sequence.
        const DELETE_KEY_SENDS_DEL = 0b0001_0000;
    }
}

/// Set Application Keypad Mode (`DECKPAM`).
///
/// Enable application keypad mode.
///
/// See <https://terminalguide.namepad.de/seq/esc_a_eq/> for
/// terminal support specifics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetApplicationKeypadMode;

impl vtansi::StaticAnsiEncode for SetApplicationKeypadMode {
    const BYTES: &'static [u8] = b"\x1b=";
}

/// Reset Application Keypad Mode (`DECKPNM`).
///
/// Disable application keypad mode.
///
/// See <https://terminalguide.namepad.de/seq/esc_a_gt/> for
/// terminal support specifics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResetApplicationKeypadMode;

impl vtansi::StaticAnsiEncode for ResetApplicationKeypadMode {
    const BYTES: &'static [u8] = b"\x1b>";
}

#[cfg(test)]
mod tests {
    use super::*;
    use vtansi::AnsiEncode;

    #[test]
    fn set_application_keypad_mode_encodes() {
        assert_eq!(SetApplicationKeypadMode.encode_ansi().unwrap(), b"\x1b=");
    }

    #[test]
    fn reset_application_keypad_mode_encodes() {
        assert_eq!(ResetApplicationKeypadMode.encode_ansi().unwrap(), b"\x1b>");
    }

    #[test]
    fn keyboard_mode_flags_combine() {
        let flags =
            KeyboardModeFlags::CURSOR_KEYS | KeyboardModeFlags::APPLICATION_KEYPAD;
        assert!(flags.contains(KeyboardModeFlags::CURSOR_KEYS));
        assert!(flags.contains(KeyboardModeFlags::APPLICATION_KEYPAD));
        assert!(!flags.contains(KeyboardModeFlags::BACKSPACE_SENDS_DELETE));
    }
}

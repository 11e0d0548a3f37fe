//! Definitions and helpers for terminal modes.

use vtansi::{AnsiEncode, EncodeError, ParseError, TryFromAnsi};

/// Represents state of terminal mode as reported in `DECRPM` responses.
///
/// See <https://vt100.net/docs/vt510-rm/DECRPM.html> for more information.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    num_enum::IntoPrimitive,
    num_enum::TryFromPrimitive,
)]
#[repr(u8)]
pub enum TerminalModeState {
    NotRecognized = 0,
    Set = 1,
    Reset = 2,
    PermanentlySet = 3,
    PermanentlyReset = 4,
}

impl AnsiEncode for TerminalModeState {
    const ENCODED_LEN: Option<usize> = Some(1);

    fn encode_ansi_into<W: std::io::Write + ?Sized>(
        &self,
        sink: &mut W,
    ) -> Result<usize, EncodeError> {
        u8::from(*self).encode_ansi_into(sink)
    }
}

impl<'a> TryFromAnsi<'a> for TerminalModeState {
    fn try_from_ansi(bytes: &'a [u8]) -> Result<Self, ParseError> {
        let raw = <u8 as TryFromAnsi>::try_from_ansi(bytes)?;
        Ok(Self::try_from(raw).unwrap_or(Self::NotRecognized))
    }
}

/// Generate terminal mode control sequences.
///
/// This macro generates four control sequence structs for a terminal mode:
/// - `Enable{Name}`: CSI sequence with 'h' final byte to enable the mode
/// - `Disable{Name}`: CSI sequence with 'l' final byte to disable the mode
/// - `Request{Name}`: CSI sequence with '$' intermediate and 'p' final byte
///   to request the mode state
/// - `{Name}`: the `DECRPM` response (`CSI ? Pd ; Ps $ y`), carrying a
///   `state` field — the mode number itself is only echoed on the wire and
///   discarded when parsed
///
/// # Syntax
///
/// ```ignore
/// terminal_mode!(ModeName, params = ["param_value"]);
/// terminal_mode!(ModeName, private = '?', params = ["param_value"]);
/// ```
#[macro_export]
macro_rules! terminal_mode {
    ($(#[$meta:meta])* $base_name:ident, private = $private:literal, params = [$($params:literal),* $(,)?]) => {
        $crate::__private::paste::paste! {
            $(#[$meta])*
            #[derive(Debug, PartialOrd, PartialEq, Eq, Clone, Copy, Hash)]
            pub struct [<$base_name>] {
                pub state: $crate::event::mode::TerminalModeState,
            }

            impl [<$base_name>] {
                #[must_use]
                pub const fn new(state: $crate::event::mode::TerminalModeState) -> Self {
                    Self { state }
                }
            }

            impl<'a> ::vtansi::TryFromAnsiIter<'a> for [<$base_name>] {
                fn try_from_ansi_iter<I>(
                    params: &mut I,
                ) -> ::std::result::Result<Self, ::vtansi::ParseError>
                where
                    I: Iterator<Item = &'a [u8]>,
                {
                    // First parameter is the mode number echoed back; skip it.
                    let _ = params.next();
                    let state_bytes = params.next().ok_or_else(|| {
                        ::vtansi::ParseError::InvalidValue(
                            "mode report: missing state parameter".to_string(),
                        )
                    })?;
                    let state = <$crate::event::mode::TerminalModeState as ::vtansi::TryFromAnsi>::try_from_ansi(state_bytes)?;
                    Ok(Self { state })
                }
            }

            impl<'a> ::vtansi::TryFromAnsi<'a> for [<$base_name>] {
                #[inline]
                fn try_from_ansi(bytes: &'a [u8]) -> ::std::result::Result<Self, ::vtansi::ParseError> {
                    <Self as ::vtansi::TryFromAnsiIter>::try_from_ansi_iter(&mut bytes.split(|&c| c == b';'))
                }
            }

            #[doc = concat!("Enable [`", stringify!($base_name), "`].")]
            #[derive(Debug, PartialOrd, PartialEq, Eq, Clone, Copy, Hash, Default)]
            pub struct [<Enable $base_name>];

            impl ::vtansi::StaticAnsiEncode for [<Enable $base_name>] {
                const BYTES: &'static [u8] =
                    $crate::format_csi!($private, $($params),*, "h").as_bytes();
            }

            #[doc = concat!("Disable [`", stringify!($base_name), "`].")]
            #[derive(Debug, PartialOrd, PartialEq, Eq, Clone, Copy, Hash, Default)]
            pub struct [<Disable $base_name>];

            impl ::vtansi::StaticAnsiEncode for [<Disable $base_name>] {
                const BYTES: &'static [u8] =
                    $crate::format_csi!($private, $($params),*, "l").as_bytes();
            }

            #[doc = concat!("Query state of [`", stringify!($base_name), "`].")]
            #[derive(Debug, PartialOrd, PartialEq, Eq, Clone, Copy, Hash, Default)]
            pub struct [<Request $base_name>];

            impl ::vtansi::StaticAnsiEncode for [<Request $base_name>] {
                const BYTES: &'static [u8] =
                    $crate::format_csi!($private, $($params),*, "$p").as_bytes();
            }
        }
    };

    ($(#[$meta:meta])* $base_name:ident, params = [$($params:literal),* $(,)?]) => {
        $crate::__private::paste::paste! {
            $(#[$meta])*
            #[derive(Debug, PartialOrd, PartialEq, Eq, Clone, Copy, Hash)]
            pub struct [<$base_name>] {
                pub state: $crate::event::mode::TerminalModeState,
            }

            impl [<$base_name>] {
                #[must_use]
                pub const fn new(state: $crate::event::mode::TerminalModeState) -> Self {
                    Self { state }
                }
            }

            impl<'a> ::vtansi::TryFromAnsiIter<'a> for [<$base_name>] {
                fn try_from_ansi_iter<I>(
                    params: &mut I,
                ) -> ::std::result::Result<Self, ::vtansi::ParseError>
                where
                    I: Iterator<Item = &'a [u8]>,
                {
                    let _ = params.next();
                    let state_bytes = params.next().ok_or_else(|| {
                        ::vtansi::ParseError::InvalidValue(
                            "mode report: missing state parameter".to_string(),
                        )
                    })?;
                    let state = <$crate::event::mode::TerminalModeState as ::vtansi::TryFromAnsi>::try_from_ansi(state_bytes)?;
                    Ok(Self { state })
                }
            }

            impl<'a> ::vtansi::TryFromAnsi<'a> for [<$base_name>] {
                #[inline]
                fn try_from_ansi(bytes: &'a [u8]) -> ::std::result::Result<Self, ::vtansi::ParseError> {
                    <Self as ::vtansi::TryFromAnsiIter>::try_from_ansi_iter(&mut bytes.split(|&c| c == b';'))
                }
            }

            #[doc = concat!("Enable [`", stringify!($base_name), "`].")]
            #[derive(Debug, PartialOrd, PartialEq, Eq, Clone, Copy, Hash, Default)]
            pub struct [<Enable $base_name>];

            impl ::vtansi::StaticAnsiEncode for [<Enable $base_name>] {
                const BYTES: &'static [u8] =
                    $crate::format_csi!($($params),*, "h").as_bytes();
            }

            #[doc = concat!("Disable [`", stringify!($base_name), "`].")]
            #[derive(Debug, PartialOrd, PartialEq, Eq, Clone, Copy, Hash, Default)]
            pub struct [<Disable $base_name>];

            impl ::vtansi::StaticAnsiEncode for [<Disable $base_name>] {
                const BYTES: &'static [u8] =
                    $crate::format_csi!($($params),*, "l").as_bytes();
            }

            #[doc = concat!("Query state of [`", stringify!($base_name), "`].")]
            #[derive(Debug, PartialOrd, PartialEq, Eq, Clone, Copy, Hash, Default)]
            pub struct [<Request $base_name>];

            impl ::vtansi::StaticAnsiEncode for [<Request $base_name>] {
                const BYTES: &'static [u8] =
                    $crate::format_csi!($($params),*, "$p").as_bytes();
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use vtansi::AnsiEncode;

    crate::terminal_mode!(TestBracketedPasteMode, private = '?', params = ["2004"]);
    crate::terminal_mode!(TestKeyboardInputDisabledMode, params = ["2"]);

    #[test]
    fn enable_private_mode_encodes() {
        assert_eq!(EnableTestBracketedPasteMode.encode_ansi().unwrap(), b"\x1b[?2004h");
    }

    #[test]
    fn disable_private_mode_encodes() {
        assert_eq!(DisableTestBracketedPasteMode.encode_ansi().unwrap(), b"\x1b[?2004l");
    }

    #[test]
    fn request_non_private_mode_encodes() {
        assert_eq!(RequestTestKeyboardInputDisabledMode.encode_ansi().unwrap(), b"\x1b[2$p");
    }

    #[test]
    fn mode_report_parses_state() {
        use vtansi::TryFromAnsi;
        let report =
            TestBracketedPasteMode::try_from_ansi(b"2004;1").unwrap();
        assert_eq!(report.state, super::TerminalModeState::Set);
    }
}

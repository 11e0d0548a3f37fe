#![warn(clippy::pedantic)]

pub mod macros;

pub mod debug;
pub mod encode;
pub mod parse;

#[cfg(feature = "bitflags")]
pub mod bitflags;

pub use encode::write_byte_into;
pub use encode::write_bytes_into;
pub use encode::write_int;
pub use encode::write_str_into;
pub use encode::{
    AnsiEncode, AnsiFinalByte, AnsiMuxEncode, EncodeError, RawByte,
    StaticAnsiEncode,
};
pub use encode::{
    encode_delimited_values, encode_delimited_values_with_optional,
    encode_keyvalue_pairs,
};

pub use parse::parse_keyvalue_pairs;
pub use parse::{ParseError, TryFromAnsi, TryFromAnsiIter};

pub use debug::{TerseDebug, TerseDisplay};

/// Which direction a control function travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiControlDirection {
    /// Terminal to host input (e.g key events)
    Input,
    /// Host to terminal output (i.e render sequences, reports etc.)
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AnsiControlFunctionKind {
    /// C0 Control Character (C0)
    C0,

    /// Raw byte (0x00-0x7F)
    Byte,

    /// Control Sequence Introducer (CSI)
    ///
    /// The Control Sequence Introducer (CSI) is used to introduce control
    /// sequences, which are commands or functions that modify the behavior of
    /// the terminal. CSI sequences typically start with an escape character
    /// (\x1B) followed by a left square bracket ([) and are used for tasks
    /// such as cursor movement, text formatting, color changes, and more.
    Csi,

    /// Operating System Command (OSC)
    ///
    /// The Operating System Command (OSC) is used to send commands directly to
    /// the terminal emulator or operating system. OSC sequences typically
    /// start with an escape character (\x1B) followed by a right square
    /// bracket (]), and they are often used for tasks like setting the
    /// terminal window title, changing the terminal's icon, or sending
    /// notifications to the user.
    Osc,

    /// Device Control String (DCS)
    ///
    /// The Device Control String (DCS) is similar to the OSC sequence but is
    /// used for more advanced device control. DCS sequences typically start
    /// with an escape character (\x1B) followed by the letter 'P', and they
    /// allow for more complex interactions with the terminal hardware or
    /// emulator.
    Dcs,

    /// Other escape sequence (unterminated)
    Esc,

    /// ESC ... ST - Escape sequence terminated with ST (`ESC \`)
    /// This serves as a catch-all with less-common and less-defined
    /// sequences such as APC, PM and SOS.
    EscSt,

    /// Single Shift 3 (SS3)
    ///
    /// The Single Shift 3 (SS3) sequence is used for input parsing,
    /// particularly for application cursor keys and function keys.
    /// SS3 sequences start with an escape character (\x1B) followed
    /// by the letter 'O'.
    Ss3,
}

#[doc(hidden)]
pub mod __private {
    pub use itoa;

    #[cfg(feature = "bitflags")]
    pub use bitflags;
}

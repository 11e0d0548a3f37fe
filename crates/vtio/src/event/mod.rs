//! Terminal event sequences.

pub mod keyboard;
pub mod mode;
pub mod mouse;
pub mod text;

// Re-export module-level input event enums
pub use mouse::MouseEvent;
pub use text::PlainText;

// Re-export commonly used types
pub use keyboard::{KeyCode, KeyEvent, KeyModifiers};

use vt_push_parser::event::VTEvent;

/// An output byte-stream event the screen model doesn't render directly.
///
/// Carries the raw parser event through for callers that want to inspect or
/// log sequences this engine doesn't interpret (unrecognized CSI/DCS/OSC
/// sequences, stray C0 bytes, and the like).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedInputEvent<'a>(pub &'a VTEvent<'a>);

impl vtansi::AnsiEncode for UnrecognizedInputEvent<'_> {
    #[inline]
    fn encode_ansi_into<W: std::io::Write + ?Sized>(
        &self,
        sink: &mut W,
    ) -> Result<usize, vtansi::EncodeError> {
        self.0.write_to(sink).map_err(vtansi::EncodeError::IOError)
    }
}

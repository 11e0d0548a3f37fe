//! Line storage: individual line buffers and the scrollback ring.
//!
//! Owns the leaf data structures of the terminal engine — the [`Cell`],
//! [`Line`], and [`Scrollback`] types that `vtscreen`'s grid is built from —
//! and the conversions between a line's live (random-access, mutable) form
//! and its compressed, archived form.

pub mod cell;
pub mod line;
pub mod scrollback;

pub use cell::{Cell, CellAttrs, ColorIndex, WIDE_CONTINUATION};
pub use line::{CompressedLine, Line, LineAttrs};
pub use scrollback::Scrollback;

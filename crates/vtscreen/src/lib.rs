//! Screen model, cursor, palette, line discipline, and configuration for a
//! terminal engine: everything the output parser mutates and the input
//! encoder reads back from, sitting above [`vtline`]'s per-line storage.

pub mod config;
pub mod cursor;
pub mod discipline;
pub mod error;
pub mod palette;
pub mod screen;
pub mod terminal;
pub mod traits;

pub use config::{Color, Config};
pub use cursor::{CharSet, Cursor};
pub use discipline::{DisciplineOutput, LineDiscipline};
pub use error::TerminalError;
pub use palette::Palette;
pub use screen::{EraseDisplayMode, EraseLineMode, Screen};
pub use terminal::{
    ActiveScreen, BellOverloadTracker, ModeFlags, MouseMode, Pos, PrintState, Selection,
    SelectionState, Terminal,
};
pub use traits::{BellKind, DirtyRegion, InputSource, PtyChannel, ScrollTarget, WindowSink};

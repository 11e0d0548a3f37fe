//! Trait boundaries to the external collaborators named in §6: the PTY, the
//! window/rendering surface, and the input source. The engine depends on
//! these by reference; no concrete implementation ships here — wiring a real
//! PTY or window is the host application's job.

use crate::error::TerminalError;

/// The PTY master channel connecting the core to the child process.
pub trait PtyChannel {
    /// Write bytes to the child, retrying on partial writes as needed.
    ///
    /// # Errors
    /// Returns [`TerminalError::PtyWriteBlocked`] if the write would block,
    /// or [`TerminalError::PtyClosed`] if the child has gone away.
    fn write(&mut self, buf: &[u8]) -> Result<usize, TerminalError>;

    /// Inform the kernel of a new window size.
    fn resize(&mut self, rows: u16, columns: u16, pixel_rows: u16, pixel_columns: u16);
}

/// The region of the screen touched by a mutation, in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRegion {
    pub top: u16,
    pub left: u16,
    pub bottom: u16,
    pub right: u16,
}

/// What kind of bell was rung.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BellKind {
    Sound,
    Flash,
    Taskbar,
}

/// Where the view should scroll to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    Top,
    Bottom,
    Absolute(usize),
    Relative(i32),
}

/// The outgoing half of the window collaborator: the core calls into this as
/// it processes output.
pub trait WindowSink {
    fn set_title(&mut self, title: &str);
    fn bell(&mut self, kind: BellKind);
    fn scroll_to(&mut self, target: ScrollTarget);
    fn repaint(&mut self, dirty: DirtyRegion);
    fn report_size_request(&mut self);
}

/// The incoming half of the window collaborator: events the core reacts to.
///
/// This is a source the main loop drains, not a trait the core implements;
/// it documents the shape of what feeds keyboard/mouse/focus/paste/resize
/// events into the input encoder and line discipline.
pub trait InputSource {
    type Event;

    /// Poll for the next input event, if any is ready without blocking.
    fn poll(&mut self) -> Option<Self::Event>;
}

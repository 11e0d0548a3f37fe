//! Errors that propagate out of the terminal engine to the main loop.
//!
//! Most parser/screen-local trouble (unknown sequences, truncated OSC
//! strings, invalid UTF-8) recovers silently and is only observed through
//! `tracing` events — see the module docs on [`crate::terminal`]. The kinds
//! here are the ones the design calls out as needing to reach the caller.

use thiserror::Error;

/// Errors the terminal engine surfaces to its driver.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// A line allocation failed. Treated as fatal by the design: the caller
    /// should abort with a user-visible message rather than try to continue
    /// with a corrupt screen.
    #[error("out of memory allocating a line")]
    LineStorageOom,

    /// The child process closed its end of the PTY.
    #[error("pty closed")]
    PtyClosed,

    /// A write to the PTY would block; the caller should retry on the next
    /// wakeup rather than treat this as failure.
    #[error("pty write would block")]
    PtyWriteBlocked,

    /// The configuration file contained an unparseable line.
    #[error("failed to parse config line {line}: {message}")]
    ConfigParseError { line: usize, message: String },
}

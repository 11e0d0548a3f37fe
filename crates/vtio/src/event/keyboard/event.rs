//! A single keyboard key event, as delivered by the window toolkit.

use std::fmt;

use crate::TerseDisplay;

use super::keycode::KeyCode;
use super::modifier::{KeyEventKind, KeyEventState, KeyModifiers};

/// A keyboard key event.
///
/// This is the input side of the keyboard encoder: the window-toolkit
/// collaborator decodes a physical keypress into a `KeyEvent`, and
/// [`super::encoding::KeyEncoding::from_key_event_with_modes`] turns it into
/// the bytes sent to the child process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
    pub kind: KeyEventKind,
    pub state: KeyEventState,
}

impl KeyEvent {
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[must_use]
    pub const fn new_with_kind(
        code: KeyCode,
        modifiers: KeyModifiers,
        kind: KeyEventKind,
    ) -> Self {
        Self {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[must_use]
    pub fn builder(code: KeyCode) -> KeyEventBuilder {
        KeyEventBuilder::new(code)
    }
}

impl TerseDisplay for KeyEvent {
    fn terse_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key(")?;
        self.kind.terse_fmt(f)?;
        write!(f, ":")?;
        self.code.terse_fmt(f)?;
        if !self.modifiers.is_empty() {
            write!(f, ":")?;
            self.modifiers.terse_fmt(f)?;
        }
        write!(f, ")")
    }
}

/// Fluent builder for [`KeyEvent`], useful for tests and for collaborators
/// that assemble an event field by field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEventBuilder {
    code: KeyCode,
    modifiers: KeyModifiers,
    kind: KeyEventKind,
    state: KeyEventState,
}

impl KeyEventBuilder {
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[must_use]
    pub const fn modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub const fn kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub const fn state(mut self, state: KeyEventState) -> Self {
        self.state = state;
        self
    }

    #[must_use]
    pub const fn build(self) -> KeyEvent {
        KeyEvent {
            code: self.code,
            modifiers: self.modifiers,
            kind: self.kind,
            state: self.state,
        }
    }
}

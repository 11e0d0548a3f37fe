//! Keyboard modifier types and utilities.

use std::fmt::{self, Display, Write};

use vtansi::bitflags;

use crate::TerseDisplay;

/// Represents a keyboard event kind.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialOrd, PartialEq, Eq, Clone, Copy, Hash)]
pub enum KeyEventKind {
    Press,
    Repeat,
    Release,
}

impl TerseDisplay for KeyEventKind {
    fn terse_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyEventKind::Press => f.write_str("press"),
            KeyEventKind::Repeat => f.write_str("repeat"),
            KeyEventKind::Release => f.write_str("release"),
        }
    }
}

bitflags! {
    /// Represents extra state about the key event.
    ///
    /// **Note:** This state can only be read if
    /// [`KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES`] has been enabled with
    /// [`PushKeyboardEnhancementFlags`].
    #[derive(Debug, PartialOrd, PartialEq, Eq, Clone, Copy, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
    pub struct KeyEventState: u8 {
        /// The key event origins from the keypad.
        const KEYPAD = 0b0000_0001;
        /// Caps Lock was enabled for this key event.
        ///
        /// **Note:** this is set for the initial press of Caps Lock itself.
        const CAPS_LOCK = 0b0000_0010;
        /// Num Lock was enabled for this key event.
        ///
        /// **Note:** this is set for the initial press of Num Lock itself.
        const NUM_LOCK = 0b0000_0100;
        const NONE = 0b0000_0000;
    }
}

// Platform-specific modifier key names
// See: https://support.apple.com/guide/applestyleguide/welcome/1.0/web (macOS)
// See: https://learn.microsoft.com/en-us/style-guide/a-z-word-list-term-collections/term-collections/keys-keyboard-shortcuts (Windows)

#[cfg(target_os = "macos")]
pub(super) const CONTROL_NAME: &str = "Control";
#[cfg(not(target_os = "macos"))]
pub(super) const CONTROL_NAME: &str = "Ctrl";

#[cfg(target_os = "macos")]
pub(super) const ALT_NAME: &str = "Option";
#[cfg(not(target_os = "macos"))]
pub(super) const ALT_NAME: &str = "Alt";

#[cfg(target_os = "macos")]
pub(super) const SUPER_NAME: &str = "Command";
#[cfg(target_os = "windows")]
pub(super) const SUPER_NAME: &str = "Windows";
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
pub(super) const SUPER_NAME: &str = "Super";

bitflags! {
    /// Represents key modifiers (shift, control, alt, etc.).
    ///
    /// **Note:** `SUPER`, `HYPER`, and `META` can only be read if
    /// [`KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES`] has been enabled with
    /// [`PushKeyboardEnhancementFlags`].
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
    #[derive(Debug, PartialOrd, PartialEq, Eq, Clone, Copy, Hash)]
    pub struct KeyModifiers: u8 {
        const SHIFT = 0b0000_0001;
        const CONTROL = 0b0000_0010;
        const ALT = 0b0000_0100;
        const SUPER = 0b0000_1000;
        const HYPER = 0b0001_0000;
        const META = 0b0010_0000;
        const NONE = 0b0000_0000;
    }
}

impl Default for KeyModifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// Mapping between `KeyModifiers` flags and xterm parameter bits.
///
/// The xterm encoding uses different bit positions than [`KeyModifiers`]:
///
/// | Modifier | `KeyModifiers` | xterm bits |
/// |----------|----------------|------------|
/// | Shift    | bit 0 (1)      | bit 0 (1)  |
/// | Control  | bit 1 (2)      | bit 2 (4)  |
/// | Alt      | bit 2 (4)      | bit 1 (2)  |
/// | Meta     | bit 5 (32)     | bit 3 (8)  |
const XTERM_MODIFIER_BITS: &[(KeyModifiers, u8)] = &[
    (KeyModifiers::SHIFT, 1),
    (KeyModifiers::ALT, 2),
    (KeyModifiers::CONTROL, 4),
    (KeyModifiers::META, 8),
];

impl KeyModifiers {
    /// Encode modifiers as an xterm-style parameter.
    ///
    /// The final parameter is `1 + bits`, so unmodified keys have param=1.
    /// This format is used in CSI sequences like `CSI 1;{param} A` for modified
    /// arrow keys.
    ///
    /// See `XTERM_MODIFIER_BITS` for the bit mapping.
    #[inline]
    #[must_use]
    pub fn to_xterm_param(self) -> u8 {
        let mut bits = 0u8;
        for (modifier, xterm_bit) in XTERM_MODIFIER_BITS {
            if self.contains(*modifier) {
                bits |= xterm_bit;
            }
        }
        1 + bits
    }

    /// Decode modifiers from an xterm-style parameter.
    ///
    /// See `XTERM_MODIFIER_BITS` for the bit mapping.
    #[inline]
    #[must_use]
    pub fn from_xterm_param(param: u8) -> Self {
        let bits = param.saturating_sub(1);
        let mut mods = Self::empty();
        for (modifier, xterm_bit) in XTERM_MODIFIER_BITS {
            if bits & xterm_bit != 0 {
                mods |= *modifier;
            }
        }
        mods
    }
}

impl TerseDisplay for KeyModifiers {
    fn terse_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Output modifiers in conventional order: ctrl-alt-shift-super-hyper-meta
        const MODIFIERS: &[(KeyModifiers, &str)] = &[
            (KeyModifiers::CONTROL, "ctrl"),
            (KeyModifiers::ALT, "alt"),
            (KeyModifiers::SHIFT, "shift"),
            (KeyModifiers::SUPER, "super"),
            (KeyModifiers::HYPER, "hyper"),
            (KeyModifiers::META, "meta"),
        ];

        let mut first = true;
        for (modifier, name) in MODIFIERS {
            if self.contains(*modifier) {
                if !first {
                    f.write_char('-')?;
                }
                first = false;
                f.write_str(name)?;
            }
        }
        Ok(())
    }
}

impl Display for KeyModifiers {
    /// Formats the key modifiers using the given formatter.
    ///
    /// The key modifiers are joined by a `+` character.
    ///
    /// # Platform-specific Notes
    ///
    /// On macOS, the control, alt, and super keys is displayed as "Control",
    /// "Option", and "Command" respectively. See
    /// <https://support.apple.com/guide/applestyleguide/welcome/1.0/web>.
    ///
    /// On Windows, the super key is displayed as "Windows" and the control key
    /// is displayed as "Ctrl". See
    /// <https://learn.microsoft.com/en-us/style-guide/a-z-word-list-term-collections/term-collections/keys-keyboard-shortcuts>.
    ///
    /// On other platforms, the super key is referred to as "Super" and the
    /// control key is displayed as "Ctrl".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for modifier in self.iter() {
            if !first {
                f.write_str("+")?;
            }

            first = false;
            match modifier {
                KeyModifiers::SHIFT => f.write_str("Shift")?,
                KeyModifiers::CONTROL => f.write_str(CONTROL_NAME)?,
                KeyModifiers::ALT => f.write_str(ALT_NAME)?,
                KeyModifiers::SUPER => f.write_str(SUPER_NAME)?,
                KeyModifiers::HYPER => f.write_str("Hyper")?,
                KeyModifiers::META => f.write_str("Meta")?,
                _ => unreachable!(),
            }
        }
        Ok(())
    }
}

/// Represents a modifier key (as part of [`KeyCode::Modifier`](super::KeyCode::Modifier)).
#[derive(Debug, PartialOrd, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierKeyCode {
    /// Left Shift key.
    LeftShift,
    /// Left Control key. (Control on macOS, Ctrl on other platforms)
    LeftControl,
    /// Left Alt key. (Option on macOS, Alt on other platforms)
    LeftAlt,
    /// Left Super key. (Command on macOS, Windows on Windows, Super on other platforms)
    LeftSuper,
    /// Left Hyper key.
    LeftHyper,
    /// Left Meta key.
    LeftMeta,
    /// Right Shift key.
    RightShift,
    /// Right Control key. (Control on macOS, Ctrl on other platforms)
    RightControl,
    /// Right Alt key. (Option on macOS, Alt on other platforms)
    RightAlt,
    /// Right Super key. (Command on macOS, Windows on Windows, Super on other platforms)
    RightSuper,
    /// Right Hyper key.
    RightHyper,
    /// Right Meta key.
    RightMeta,
    /// Iso Level3 Shift key.
    IsoLevel3Shift,
    /// Iso Level5 Shift key.
    IsoLevel5Shift,
}

impl From<ModifierKeyCode> for KeyModifiers {
    fn from(value: ModifierKeyCode) -> Self {
        match value {
            ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => {
                KeyModifiers::SHIFT
            }
            ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => {
                KeyModifiers::CONTROL
            }
            ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => {
                KeyModifiers::ALT
            }
            ModifierKeyCode::LeftSuper | ModifierKeyCode::RightSuper => {
                KeyModifiers::SUPER
            }
            ModifierKeyCode::LeftHyper | ModifierKeyCode::RightHyper => {
                KeyModifiers::HYPER
            }
            ModifierKeyCode::LeftMeta | ModifierKeyCode::RightMeta => {
                KeyModifiers::META
            }
            _ => KeyModifiers::NONE,
        }
    }
}

impl Display for ModifierKeyCode {
    /// Formats the modifier key using the given formatter.
    ///
    /// # Platform-specific Notes
    ///
    /// On macOS, the control, alt, and super keys are displayed as "Control",
    /// "Option", and "Command" respectively. See
    /// <https://support.apple.com/guide/applestyleguide/welcome/1.0/web>.
    ///
    /// On Windows, the super key is displayed as "Windows" and the control key
    /// is displayed as "Ctrl". See
    /// <https://learn.microsoft.com/en-us/style-guide/a-z-word-list-term-collections/term-collections/keys-keyboard-shortcuts>.
    ///
    /// On other platforms, the super key is referred to as "Super".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // For modifiers with platform-specific names, we need write! for interpolation.
        // For others, f.write_str is more efficient.
        match self {
            ModifierKeyCode::LeftShift => f.write_str("Left Shift"),
            ModifierKeyCode::LeftControl => write!(f, "Left {CONTROL_NAME}"),
            ModifierKeyCode::LeftAlt => write!(f, "Left {ALT_NAME}"),
            ModifierKeyCode::LeftSuper => write!(f, "Left {SUPER_NAME}"),
            ModifierKeyCode::LeftHyper => f.write_str("Left Hyper"),
            ModifierKeyCode::LeftMeta => f.write_str("Left Meta"),
            ModifierKeyCode::RightShift => f.write_str("Right Shift"),
            ModifierKeyCode::RightControl => write!(f, "Right {CONTROL_NAME}"),
            ModifierKeyCode::RightAlt => write!(f, "Right {ALT_NAME}"),
            ModifierKeyCode::RightSuper => write!(f, "Right {SUPER_NAME}"),
            ModifierKeyCode::RightHyper => f.write_str("Right Hyper"),
            ModifierKeyCode::RightMeta => f.write_str("Right Meta"),
            ModifierKeyCode::IsoLevel3Shift => f.write_str("Iso Level 3 Shift"),
            ModifierKeyCode::IsoLevel5Shift => f.write_str("Iso Level 5 Shift"),
        }
    }
}

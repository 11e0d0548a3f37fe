//! Persisted terminal configuration: the `Name=Value` option file format and
//! colour-value parsing.
//!
//! Grounded on `original_source/term.h`'s option fields (backspace_sends_bs,
//! app_cursor_keys, report_ambig_width, ...) and §6's "Persisted state"
//! description: plain-text `Name=Value` pairs, unknown keys warned and
//! ignored, colours in `r,g,b` / `#RRGGBB` / `rgb:RR/GG/BB` / `rgb:RRRR/GGGG/
//! BBBB` form.

use std::collections::BTreeMap;

use crate::error::TerminalError;

/// An 8-bit RGB colour, as accepted by colour-valued options and OSC colour
/// queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Parses one of the accepted colour syntaxes:
    ///
    /// - `r,g,b` — decimal, each 0-255
    /// - `#RRGGBB` — hex
    /// - `rgb:RR/GG/BB` or `rgb:RRRR/GGGG/BBBB` — X11 form, truncated to the
    ///   high 8 bits per channel when 16-bit
    pub fn parse(s: &str) -> Result<Self, TerminalError> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return Self::parse_hex(hex, s);
        }
        if let Some(rest) = s.strip_prefix("rgb:") {
            return Self::parse_x11(rest, s);
        }
        if s.contains(',') {
            return Self::parse_decimal_triple(s);
        }
        Err(TerminalError::ConfigParseError {
            line: 0,
            message: format!("unrecognized colour syntax: {s}"),
        })
    }

    fn parse_hex(hex: &str, original: &str) -> Result<Self, TerminalError> {
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad_color(original));
        }
        let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| bad_color(original))?;
        let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| bad_color(original))?;
        let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| bad_color(original))?;
        Ok(Self { r, g, b })
    }

    fn parse_x11(rest: &str, original: &str) -> Result<Self, TerminalError> {
        let parts: Vec<&str> = rest.split('/').collect();
        if parts.len() != 3 {
            return Err(bad_color(original));
        }
        let mut channels = [0u8; 3];
        for (i, part) in parts.iter().enumerate() {
            if part.len() != 2 && part.len() != 4 || !part.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(bad_color(original));
            }
            let value = u16::from_str_radix(part, 16).map_err(|_| bad_color(original))?;
            channels[i] = if part.len() == 4 {
                (value >> 8) as u8
            } else {
                value as u8
            };
        }
        Ok(Self {
            r: channels[0],
            g: channels[1],
            b: channels[2],
        })
    }

    fn parse_decimal_triple(s: &str) -> Result<Self, TerminalError> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 3 {
            return Err(bad_color(s));
        }
        let mut channels = [0u8; 3];
        for (i, part) in parts.iter().enumerate() {
            channels[i] = part.trim().parse::<u8>().map_err(|_| bad_color(s))?;
        }
        Ok(Self {
            r: channels[0],
            g: channels[1],
            b: channels[2],
        })
    }
}

fn bad_color(original: &str) -> TerminalError {
    TerminalError::ConfigParseError {
        line: 0,
        message: format!("invalid colour value: {original}"),
    }
}

/// A parsed `Name=Value` option file. Values are kept as strings; callers
/// that need a particular type call [`Config::get`] and parse it themselves,
/// since the option set is open-ended and most consumers only care about a
/// handful of keys.
#[derive(Debug, Clone, Default)]
pub struct Config {
    values: BTreeMap<String, String>,
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Parses a `Name=Value`-per-line option file. Blank lines and lines
    /// starting with `#` are ignored. Lines that aren't valid `Name=Value`
    /// pairs are warned about (via `tracing`) and skipped, matching the
    /// "unknown keys warned and ignored" behaviour of §6 — this parser never
    /// fails the whole file over one bad line.
    #[must_use]
    pub fn parse_str(text: &str) -> Self {
        let mut config = Self::new();
        for (lineno, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.split_once('=') {
                Some((key, value)) if !key.trim().is_empty() => {
                    config
                        .values
                        .insert(key.trim().to_string(), value.trim().to_string());
                }
                _ => {
                    tracing::warn!(line = lineno + 1, content = raw, "ignoring malformed config line");
                }
            }
        }
        config
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Fetches and parses a colour-valued option, logging and returning
    /// `None` rather than failing the whole config on a bad value.
    #[must_use]
    pub fn get_color(&self, key: &str) -> Option<Color> {
        let raw = self.get(key)?;
        match Color::parse(raw) {
            Ok(color) => Some(color),
            Err(err) => {
                tracing::warn!(key, value = raw, error = %err, "ignoring invalid colour option");
                None
            }
        }
    }

    /// Serializes back to `Name=Value` lines, sorted by key.
    #[must_use]
    pub fn to_string(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.values {
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_decimal_triple() {
        assert_eq!(
            Color::parse("255,128,0").unwrap(),
            Color { r: 255, g: 128, b: 0 }
        );
    }

    #[test]
    fn parses_hex() {
        assert_eq!(
            Color::parse("#ff8000").unwrap(),
            Color { r: 255, g: 128, b: 0 }
        );
    }

    #[test]
    fn parses_x11_8bit() {
        assert_eq!(
            Color::parse("rgb:ff/80/00").unwrap(),
            Color { r: 255, g: 128, b: 0 }
        );
    }

    #[test]
    fn parses_x11_16bit_truncates_to_high_byte() {
        assert_eq!(
            Color::parse("rgb:ffff/8000/0000").unwrap(),
            Color { r: 255, g: 128, b: 0 }
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(Color::parse("not-a-colour").is_err());
    }

    #[test]
    fn config_parses_and_ignores_unknown_lines() {
        let config = Config::parse_str(
            "Title=example\n# a comment\n\nFontHeight=12\nmalformed line with no equals\n",
        );
        assert_eq!(config.get("Title"), Some("example"));
        assert_eq!(config.get("FontHeight"), Some("12"));
        assert_eq!(config.get("malformed line with no equals"), None);
    }

    #[test]
    fn config_round_trips_through_to_string() {
        let mut config = Config::new();
        config.set("Title", "example");
        let text = config.to_string();
        let reparsed = Config::parse_str(&text);
        assert_eq!(reparsed.get("Title"), Some("example"));
    }

    #[test]
    fn config_get_color_parses_known_key() {
        let config = Config::parse_str("ForegroundColour=#ff8000\n");
        assert_eq!(
            config.get_color("ForegroundColour"),
            Some(Color { r: 255, g: 128, b: 0 })
        );
    }
}

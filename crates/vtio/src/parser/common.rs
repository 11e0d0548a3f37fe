//! Common parsing utilities shared by the output parser: UTF-8 buffering and
//! CSI parameter defaulting on top of `vt_push_parser::event::ParamBuf`.

use crate::event::PlainText;

/// Maximum number of CSI parameters a dispatcher will walk (SGR's `38`/`48`
/// extended-colour forms are the only finals that need more than a handful).
pub const MAX_CSI_PARAMS: usize = 32;

/// Substitutes `default` for a missing or zero parameter, which is how most
/// CSI finals (`CUU`, `ICH`, `DCH`, ...) treat an absent or `0` count.
#[must_use]
pub fn param_or(value: Option<u16>, default: u16) -> u16 {
    match value {
        Some(0) | None => default,
        Some(n) => n,
    }
}

/// Substitutes `default` only for a missing parameter, keeping an explicit
/// zero distinct (`CUP`/`VPA` row and column arguments, `DECSTBM` margins).
#[must_use]
pub fn param_or_unspecified(value: Option<u16>, default: u16) -> u16 {
    value.unwrap_or(default)
}

/// Splits an OSC payload's leading `N;` command number off from the rest of
/// the payload. Returns `(None, payload)` if the payload doesn't start with
/// digits followed by `;` (or isn't numeric at all).
#[must_use]
pub fn split_osc_number(payload: &[u8]) -> (Option<u32>, &[u8]) {
    let digits_end = payload.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits_end == 0 {
        return (None, payload);
    }
    let number = atoi_simd::parse::<u32>(&payload[..digits_end]).ok();
    let rest = if payload.get(digits_end) == Some(&b';') {
        &payload[digits_end + 1..]
    } else {
        &payload[digits_end..]
    };
    (number, rest)
}

/// Converts raw bytes to plaintext, handling UTF-8 sequences split across
/// `feed` calls. Invalid bytes are skipped. Returns the number of bytes of an
/// incomplete trailing sequence that were copied into `utf8_buffer` and
/// should be re-presented on the next call.
#[inline]
pub fn bytes_to_plaintext<F>(bytes: &[u8], utf8_buffer: &mut [u8], cb: &mut F) -> usize
where
    F: FnMut(&PlainText),
{
    match std::str::from_utf8(bytes) {
        Ok(s) => {
            if !s.is_empty() {
                cb(&PlainText(s));
            }
            0
        }
        Err(e) => {
            let valid_up_to = e.valid_up_to();
            if valid_up_to > 0 {
                // SAFETY: from_utf8 told us bytes[..valid_up_to] is valid UTF-8.
                let valid_str = unsafe { std::str::from_utf8_unchecked(&bytes[..valid_up_to]) };
                cb(&PlainText(valid_str));
            }

            if let Some(error_len) = e.error_len() {
                let skip = valid_up_to + error_len;
                if skip < bytes.len() {
                    return bytes_to_plaintext(&bytes[skip..], utf8_buffer, cb);
                }
                0
            } else {
                let remaining = &bytes[valid_up_to..];
                let len = remaining.len();
                utf8_buffer[..len].copy_from_slice(remaining);
                len
            }
        }
    }
}

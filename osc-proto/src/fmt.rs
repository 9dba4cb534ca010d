//! No-std OSC encoding primitives.
//!
//! OSC strings are NUL-terminated and padded with NUL bytes to a multiple of
//! four; numeric arguments are big-endian 32-bit words.

use crate::parser::ParseError;

/// Encoded size of an OSC string of `len` bytes, terminator and padding included.
#[inline]
#[must_use]
pub const fn osc_string_len(len: usize) -> usize {
    (len + 4) & !3
}

/// Write `s` as an OSC string.
///
/// Returns the number of bytes written.
///
/// # Panics
///
/// Panics if `buf.len() < osc_string_len(s.len())`.
#[inline]
pub fn write_osc_string(buf: &mut [u8], s: &[u8]) -> usize {
    let len = osc_string_len(s.len());
    debug_assert!(buf.len() >= len, "buffer too small for OSC string");
    buf[..s.len()].copy_from_slice(s);
    buf[s.len()..len].fill(0);
    len
}

/// Read an OSC string from the start of `buf`.
///
/// Returns the string and the number of bytes consumed (padding included).
pub fn read_osc_string(buf: &[u8]) -> Result<(&str, usize), ParseError> {
    let nul = buf
        .iter()
        .position(|&b| b == 0)
        .ok_or(ParseError::Truncated)?;
    let len = osc_string_len(nul);
    if len > buf.len() {
        return Err(ParseError::Truncated);
    }
    if buf[nul..len].iter().any(|&b| b != 0) {
        return Err(ParseError::Malformed);
    }
    let s = core::str::from_utf8(&buf[..nul]).map_err(|_| ParseError::Malformed)?;
    Ok((s, len))
}

/// Read `N` bytes at `pos`.
#[inline]
pub fn read_array<const N: usize>(buf: &[u8], pos: usize) -> Result<[u8; N], ParseError> {
    buf.get(pos..pos + N)
        .and_then(|b| b.try_into().ok())
        .ok_or(ParseError::Truncated)
}

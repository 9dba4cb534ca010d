//! Line protocol parser for orientation updates.
//!
//! Each line carries a single field update:
//!
//! ```text
//! U<field>:<value>*<checksum>\n
//! ```
//!
//! Field identifiers:
//! - `Y` - Yaw in degrees (decimal float)
//! - `P` - Pitch in degrees (decimal float)
//! - `R` - Roll in degrees (decimal float)
//! - `F` - Flavour selector index (signed decimal integer)
//!
//! The checksum is 2 hex digits, XOR of the bytes between `U` and `*`.
//! Float values accept `inf`, `-inf` and `NaN`.

use core::fmt::Write;

use tracker_core::{InputError, OrientationUpdate};

/// Maximum line length for the protocol (including newline).
pub const MAX_LINE_LENGTH: usize = 64;

/// Minimum valid update message length: UY:0*XX = 7 chars
const MIN_UPDATE_LEN: usize = 7;

/// Parse an update line.
///
/// # Example
///
/// ```text
/// UY:90*6A\n   -> OrientationUpdate::Yaw(90.0)
/// UF:7*4B\n    -> OrientationUpdate::SelectFlavour(7)
/// ```
pub fn parse_update(line: &[u8]) -> Result<OrientationUpdate, InputError> {
    let line = strip_line_ending(line);

    if line.first() != Some(&b'U') {
        return Err(InputError::Parse);
    }

    let payload = extract_verified_payload(line)?;

    let colon_pos = payload
        .iter()
        .position(|&b| b == b':')
        .ok_or(InputError::Parse)?;

    let field = &payload[..colon_pos];
    let value = &payload[colon_pos + 1..];

    Ok(match field {
        b"Y" => OrientationUpdate::Yaw(parse_f64(value)?),
        b"P" => OrientationUpdate::Pitch(parse_f64(value)?),
        b"R" => OrientationUpdate::Roll(parse_f64(value)?),
        b"F" => OrientationUpdate::SelectFlavour(parse_i32(value)?),
        _ => return Err(InputError::Parse),
    })
}

/// Write an update as a protocol line (checksum and newline included).
///
/// # Errors
///
/// Fails if the encoded line would exceed [`MAX_LINE_LENGTH`] or the writer fails.
pub fn write_update<W: Write>(update: &OrientationUpdate, writer: &mut W) -> core::fmt::Result {
    let mut payload: heapless::String<MAX_LINE_LENGTH> = heapless::String::new();
    match update {
        OrientationUpdate::Yaw(v) => write!(payload, "Y:{:?}", v)?,
        OrientationUpdate::Pitch(v) => write!(payload, "P:{:?}", v)?,
        OrientationUpdate::Roll(v) => write!(payload, "R:{:?}", v)?,
        OrientationUpdate::SelectFlavour(i) => write!(payload, "F:{}", i)?,
    }
    // U + payload + *XX + \n
    if payload.len() + 5 > MAX_LINE_LENGTH {
        return Err(core::fmt::Error);
    }
    let checksum = calculate_checksum(payload.as_bytes());
    writeln!(writer, "U{}*{:02X}", payload, checksum)
}

/// Calculate XOR checksum of the payload bytes.
#[inline]
pub fn calculate_checksum(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |acc, &b| acc ^ b)
}

/// Strip trailing CR and/or LF from a line.
#[inline]
fn strip_line_ending(line: &[u8]) -> &[u8] {
    let mut end = line.len();
    if end > 0 && line[end - 1] == b'\n' {
        end -= 1;
    }
    if end > 0 && line[end - 1] == b'\r' {
        end -= 1;
    }
    &line[..end]
}

/// Extract and verify checksum, returning the payload slice.
///
/// The input line should have line endings already stripped.
#[inline]
fn extract_verified_payload(line: &[u8]) -> Result<&[u8], InputError> {
    if line.len() < MIN_UPDATE_LEN {
        return Err(InputError::Parse);
    }

    let checksum_pos = line
        .iter()
        .rposition(|&b| b == b'*')
        .ok_or(InputError::Parse)?;

    if checksum_pos + 3 != line.len() {
        return Err(InputError::Parse);
    }

    let payload = &line[1..checksum_pos];
    let expected = calculate_checksum(payload);
    let received = parse_hex_u8(&line[checksum_pos + 1..])?;

    if expected != received {
        return Err(InputError::Checksum);
    }

    Ok(payload)
}

/// Parse a 2-character hex string as u8.
#[inline]
fn parse_hex_u8(s: &[u8]) -> Result<u8, InputError> {
    if s.len() != 2 {
        return Err(InputError::Parse);
    }
    Ok((hex_digit(s[0])? << 4) | hex_digit(s[1])?)
}

#[inline]
fn hex_digit(b: u8) -> Result<u8, InputError> {
    match b {
        b'0'..=b'9' => Ok(b - b'0'),
        b'A'..=b'F' => Ok(b - b'A' + 10),
        b'a'..=b'f' => Ok(b - b'a' + 10),
        _ => Err(InputError::Parse),
    }
}

#[inline]
fn as_trimmed_str(s: &[u8]) -> Result<&str, InputError> {
    let s = core::str::from_utf8(s).map_err(|_| InputError::Parse)?.trim();
    if s.is_empty() {
        return Err(InputError::Parse);
    }
    Ok(s)
}

#[inline]
fn parse_f64(s: &[u8]) -> Result<f64, InputError> {
    as_trimmed_str(s)?.parse().map_err(|_| InputError::Parse)
}

#[inline]
fn parse_i32(s: &[u8]) -> Result<i32, InputError> {
    as_trimmed_str(s)?.parse().map_err(|_| InputError::Parse)
}

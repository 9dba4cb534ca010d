//! OSC 1.0 binary message parser.
//!
//! Decodes a single (non-bundle) OSC packet into an [`OscMessage`] that borrows
//! its address from the packet. Numeric arguments only:
//!
//! - `i` - 32-bit big-endian integer
//! - `f` - 32-bit big-endian float
//! - `d` - 64-bit big-endian float

use crate::fmt::{read_array, read_osc_string};
use crate::types::{OscArg, OscArgs, OscMessage};

/// Error type for parsing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Structurally invalid packet (bad address, missing type tags, bad padding).
    Malformed,
    /// Packet ended before all declared data was read.
    Truncated,
    /// Argument type other than `i`, `f` or `d`.
    UnsupportedType,
    /// More arguments than [`MAX_ARGS`](crate::MAX_ARGS).
    TooManyArgs,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed packet"),
            Self::Truncated => write!(f, "truncated packet"),
            Self::UnsupportedType => write!(f, "unsupported argument type"),
            Self::TooManyArgs => write!(f, "too many arguments"),
        }
    }
}

/// Parse a complete OSC packet.
///
/// # Example
///
/// ```
/// use osc_proto::{parse, OscArg};
///
/// let packet = b"/yaw\0\0\0\0,i\0\0\0\0\0\x2a";
/// let msg = parse(packet).unwrap();
/// assert_eq!(msg.address, "/yaw");
/// assert_eq!(msg.args[0], OscArg::Int(42));
/// ```
pub fn parse(packet: &[u8]) -> Result<OscMessage<'_>, ParseError> {
    if packet.len() % 4 != 0 {
        return Err(ParseError::Malformed);
    }

    let (address, mut pos) = read_osc_string(packet)?;
    if !address.starts_with('/') {
        return Err(ParseError::Malformed);
    }

    let (tags, len) = read_osc_string(&packet[pos..])?;
    pos += len;
    let tags = tags.strip_prefix(',').ok_or(ParseError::Malformed)?;

    let mut args = OscArgs::new();
    for tag in tags.bytes() {
        let arg = match tag {
            b'i' => {
                let word = read_array::<4>(packet, pos)?;
                pos += 4;
                OscArg::Int(i32::from_be_bytes(word))
            }
            b'f' => {
                let word = read_array::<4>(packet, pos)?;
                pos += 4;
                OscArg::Float(f32::from_be_bytes(word) as f64)
            }
            b'd' => {
                let word = read_array::<8>(packet, pos)?;
                pos += 8;
                OscArg::Float(f64::from_be_bytes(word))
            }
            _ => return Err(ParseError::UnsupportedType),
        };
        args.push(arg).map_err(|_| ParseError::TooManyArgs)?;
    }

    // Trailing data after the declared arguments
    if pos != packet.len() {
        return Err(ParseError::Malformed);
    }

    Ok(OscMessage { address, args })
}

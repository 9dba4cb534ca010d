//! OSC 1.0 binary serialization.
//!
//! # Packet Layout
//!
//! ```text
//! <address>\0[pad] ,<tags>\0[pad] <arg0:be32> <arg1:be32> ...
//! ```
//!
//! Both strings are NUL-terminated and padded to a four byte boundary.
//! `Int` arguments encode as `i`, `Float` arguments narrow to 32 bits and
//! encode as `f`.
//!
//! # Example
//!
//! ```
//! use osc_proto::{OscArg, OscMessage, Serialize};
//!
//! let msg = OscMessage::new("/yaw", [OscArg::Float(-10.5)]);
//! let mut buf = [0u8; 64];
//! let len = msg.serialize(&mut buf).unwrap();
//! assert_eq!(&buf[..12], b"/yaw\0\0\0\0,f\0\0");
//! assert_eq!(len, 16);
//! ```

use crate::fmt::{osc_string_len, write_osc_string};
use crate::types::{OscArg, OscMessage, MAX_ADDRESS_LEN, MAX_ARGS};

/// Largest packet produced by a message within [`MAX_ADDRESS_LEN`] and [`MAX_ARGS`].
///
/// Breakdown: address(32 + NUL, padded to 36) + tags(`,` + 8 + NUL, padded to 12) + args(8 * 4) = 80
pub const MAX_PACKET_SIZE: usize =
    osc_string_len(MAX_ADDRESS_LEN) + osc_string_len(1 + MAX_ARGS) + 4 * MAX_ARGS;

/// Error type for serialization operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerializeError {
    /// The output buffer is too small to hold the serialized message.
    BufferTooSmall,
    /// Too many arguments, or an address longer than [`MAX_ADDRESS_LEN`].
    Capacity,
    /// A write operation failed (for I/O adapters).
    WriteError,
}

impl core::fmt::Display for SerializeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BufferTooSmall => write!(f, "buffer too small"),
            Self::Capacity => write!(f, "message exceeds capacity"),
            Self::WriteError => write!(f, "write error"),
        }
    }
}

/// Cursor over the output buffer.
struct SerializeBuf<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> SerializeBuf<'a> {
    #[inline]
    fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    #[inline]
    fn write_string(&mut self, s: &[u8]) {
        self.pos += write_osc_string(&mut self.buf[self.pos..], s);
    }

    #[inline]
    fn write_word(&mut self, word: [u8; 4]) {
        self.buf[self.pos..self.pos + 4].copy_from_slice(&word);
        self.pos += 4;
    }

    /// Write the type tag string without staging it in a separate buffer.
    #[inline]
    fn write_type_tags(&mut self, args: &[OscArg]) {
        let start = self.pos;
        self.buf[start] = b',';
        for (i, arg) in args.iter().enumerate() {
            self.buf[start + 1 + i] = arg.type_tag();
        }
        let tags_len = 1 + args.len();
        let end = start + osc_string_len(tags_len);
        self.buf[start + tags_len..end].fill(0);
        self.pos = end;
    }

    #[inline]
    fn finalize(self) -> usize {
        self.pos
    }
}

/// Extension trait for serializing OSC messages.
pub trait Serialize {
    /// Exact number of bytes [`serialize`](Serialize::serialize) will write.
    fn encoded_len(&self) -> usize;

    /// Serialize to the provided buffer.
    ///
    /// Returns the number of bytes written on success.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::BufferTooSmall`] if the buffer is not large enough.
    fn serialize(&self, buf: &mut [u8]) -> Result<usize, SerializeError>;

    /// Serialize to a `heapless::Vec`.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::BufferTooSmall`] if `N` is not large enough.
    fn serialize_to_vec<const N: usize>(&self) -> Result<heapless::Vec<u8, N>, SerializeError> {
        let mut vec = heapless::Vec::new();
        // Resize to full capacity to allow serialize() to write
        vec.resize(N, 0)
            .map_err(|_| SerializeError::BufferTooSmall)?;
        let len = self.serialize(&mut vec)?;
        vec.truncate(len);
        Ok(vec)
    }

    /// Serialize to an `embedded_io::Write` implementation.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::WriteError`] if the write fails.
    #[cfg(feature = "embedded-io")]
    fn serialize_io<W: embedded_io::Write>(&self, writer: &mut W) -> Result<(), SerializeError>;
}

impl Serialize for OscMessage<'_> {
    fn encoded_len(&self) -> usize {
        osc_string_len(self.address.len()) + osc_string_len(1 + self.args.len()) + 4 * self.args.len()
    }

    fn serialize(&self, buf: &mut [u8]) -> Result<usize, SerializeError> {
        if buf.len() < self.encoded_len() {
            return Err(SerializeError::BufferTooSmall);
        }

        let mut sb = SerializeBuf::new(buf);
        sb.write_string(self.address.as_bytes());
        sb.write_type_tags(&self.args);
        for arg in &self.args {
            match *arg {
                OscArg::Int(i) => sb.write_word(i.to_be_bytes()),
                OscArg::Float(f) => sb.write_word((f as f32).to_be_bytes()),
            }
        }

        Ok(sb.finalize())
    }

    #[cfg(feature = "embedded-io")]
    fn serialize_io<W: embedded_io::Write>(&self, writer: &mut W) -> Result<(), SerializeError> {
        let mut buf = [0u8; MAX_PACKET_SIZE];
        let len = self.serialize(&mut buf)?;
        writer
            .write_all(&buf[..len])
            .map_err(|_| SerializeError::WriteError)
    }
}

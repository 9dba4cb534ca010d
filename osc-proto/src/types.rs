//! Core OSC types: OscArg, OscMessage.

use core::fmt;

/// Maximum number of arguments a single message can carry.
///
/// The widest head-tracker message is `/head_pose` with seven arguments.
pub const MAX_ARGS: usize = 8;

/// Maximum address pattern length (excluding the NUL terminator).
pub const MAX_ADDRESS_LEN: usize = 32;

/// Fixed-capacity argument list.
pub type OscArgs = heapless::Vec<OscArg, MAX_ARGS>;

/// A single numeric OSC argument.
///
/// Floats are held at `f64` precision so that small offsets survive until the
/// message is encoded; the wire format narrows them to 32 bits.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OscArg {
    /// 32-bit signed integer (`i` type tag).
    Int(i32),
    /// Floating point value (`f` type tag on the wire).
    Float(f64),
}

impl OscArg {
    /// Build an argument the way a dynamically typed patching host does:
    /// a finite, whole value that fits in `i32` becomes [`OscArg::Int`],
    /// everything else stays [`OscArg::Float`].
    ///
    /// # Example
    ///
    /// ```
    /// use osc_proto::OscArg;
    ///
    /// assert_eq!(OscArg::number(10.0), OscArg::Int(10));
    /// assert!(matches!(OscArg::number(10.0 + 1e-14), OscArg::Float(_)));
    /// ```
    #[inline]
    #[must_use]
    pub fn number(value: f64) -> Self {
        // Saturating cast: NaN, infinities and out-of-range values never round-trip.
        let truncated = value as i32;
        if truncated as f64 == value {
            Self::Int(truncated)
        } else {
            Self::Float(value)
        }
    }

    /// The OSC type tag character for this argument.
    #[inline]
    #[must_use]
    pub const fn type_tag(self) -> u8 {
        match self {
            Self::Int(_) => b'i',
            Self::Float(_) => b'f',
        }
    }

    /// Numeric value regardless of encoding.
    #[inline]
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Float(f) => f,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_int(self) -> bool {
        matches!(self, Self::Int(_))
    }
}

impl fmt::Display for OscArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(v) => write!(f, "{}", v),
        }
    }
}

/// An addressed OSC message.
///
/// Outgoing messages borrow `'static` address literals, parsed messages borrow
/// from the packet they were decoded from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OscMessage<'a> {
    pub address: &'a str,
    pub args: OscArgs,
}

impl<'a> OscMessage<'a> {
    /// Create a message from a fixed-size argument array.
    ///
    /// The arity is checked at compile time against [`MAX_ARGS`].
    #[must_use]
    pub fn new<const N: usize>(address: &'a str, args: [OscArg; N]) -> Self {
        const { assert!(N <= MAX_ARGS, "too many OSC arguments") };
        Self {
            address,
            args: args.into_iter().collect(),
        }
    }

    /// Create a message from an argument slice.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::Capacity`](crate::SerializeError::Capacity) if
    /// the slice exceeds [`MAX_ARGS`] or the address exceeds [`MAX_ADDRESS_LEN`].
    pub fn from_slice(address: &'a str, args: &[OscArg]) -> Result<Self, crate::SerializeError> {
        if address.len() > MAX_ADDRESS_LEN {
            return Err(crate::SerializeError::Capacity);
        }
        let args = OscArgs::from_slice(args).map_err(|_| crate::SerializeError::Capacity)?;
        Ok(Self { address, args })
    }

    /// Numeric values of all arguments, in order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.args.iter().map(|a| a.as_f64())
    }
}

impl fmt::Display for OscMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.address)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

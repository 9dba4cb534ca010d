//! Input source trait and error types.

use core::future::Future;

use crate::types::OrientationUpdate;

/// Error type for input operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// Underlying transport I/O error.
    Io,
    /// Malformed update.
    Parse,
    /// Checksum mismatch.
    Checksum,
    /// Source closed.
    Disconnected,
    /// Input exceeded the source's buffer.
    BufferOverflow,
}

impl core::fmt::Display for InputError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Io => write!(f, "input I/O error"),
            Self::Parse => write!(f, "malformed update"),
            Self::Checksum => write!(f, "checksum mismatch"),
            Self::Disconnected => write!(f, "input disconnected"),
            Self::BufferOverflow => write!(f, "input too long"),
        }
    }
}

/// Async source of orientation updates.
///
/// Implementations deliver one field update at a time, in arrival order.
pub trait InputSource {
    /// Wait for and receive the next update.
    fn receive(&mut self) -> impl Future<Output = Result<OrientationUpdate, InputError>>;

    /// Check if the source can still deliver updates.
    fn is_connected(&self) -> bool;
}

//! Output sink trait and error types.

use core::future::Future;

use crate::types::OutputEvent;

/// Error type for output operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// Underlying transport I/O error.
    Io,
    /// Sink not ready (e.g. socket not bound yet).
    NotReady,
    /// Event dropped by the sink.
    Dropped,
    /// Sink busy.
    Busy,
}

impl core::fmt::Display for OutputError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Io => write!(f, "output I/O error"),
            Self::NotReady => write!(f, "output not ready"),
            Self::Dropped => write!(f, "event dropped"),
            Self::Busy => write!(f, "output busy"),
        }
    }
}

/// Async destination for output events.
///
/// A sink receives every event of an update in emission order. Routing
/// [`OutputEvent::Message`] to the port announced by the last
/// [`OutputEvent::Port`] is up to the implementation.
pub trait OutputSink {
    /// Deliver one event.
    fn send(&mut self, event: &OutputEvent) -> impl Future<Output = Result<(), OutputError>>;

    /// Check if the sink is ready to accept events.
    fn is_ready(&self) -> bool;
}

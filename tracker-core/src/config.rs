//! Tracker behaviour configuration.

/// Behaviour switches for [`process`](crate::process).
///
/// Both switches default to `false`: flavour selections only announce
/// themselves and non-finite angles flow through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TrackerConfig {
    /// Re-render the full output with the last-known angles after a valid
    /// flavour selection. When `false`, a selection only emits name and port.
    pub refresh_on_flavour_change: bool,
    /// Reject NaN and infinite angles with
    /// [`UpdateError::InvalidAngle`](crate::UpdateError::InvalidAngle) instead
    /// of letting them propagate.
    pub reject_non_finite: bool,
}

/// Default configuration.
pub const DEFAULT_CONFIG: TrackerConfig = TrackerConfig {
    refresh_on_flavour_change: false,
    reject_non_finite: false,
};

impl Default for TrackerConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}

//! Core tracker types: Angles, OrientationUpdate, OutputEvent.

use osc_proto::OscMessage;

use crate::flavour::Flavour;
use crate::rotation::Quaternion;

/// A complete yaw/pitch/roll sample in degrees.
///
/// Values pass through unmodified: no wraparound, clamping or finiteness check.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Angles {
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
}

impl Angles {
    #[must_use]
    pub const fn new(yaw: f64, pitch: f64, roll: f64) -> Self {
        Self { yaw, pitch, roll }
    }
}

/// A single inbound update: one axis value or one flavour selector.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use]
pub enum OrientationUpdate {
    /// Yaw in degrees
    Yaw(f64),
    /// Pitch in degrees
    Pitch(f64),
    /// Roll in degrees
    Roll(f64),
    /// Flavour selector index
    SelectFlavour(i32),
}

/// A single outbound event.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputEvent {
    /// A flavour was selected.
    FlavourName(Flavour),
    /// Receiver port of the selected flavour.
    Port(u16),
    YawRad(f64),
    PitchRad(f64),
    RollRad(f64),
    Quaternion(Quaternion),
    /// Flavour-specific message, to be sent to the selected flavour's port.
    Message(OscMessage<'static>),
}

//! Latest orientation sample and flavour selection.

use crate::flavour::Flavour;
use crate::types::Angles;

/// Orientation state fed by independent field updates.
///
/// Every field starts unset and, once set, is never unset again. Downstream
/// output is only produced once all three angles and a flavour are known.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OrientationState {
    yaw: Option<f64>,
    pitch: Option<f64>,
    roll: Option<f64>,
    flavour: Option<Flavour>,
}

impl OrientationState {
    /// Create an empty state (nothing set, not ready).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            yaw: None,
            pitch: None,
            roll: None,
            flavour: None,
        }
    }

    #[inline]
    pub fn set_yaw(&mut self, deg: f64) {
        self.yaw = Some(deg);
    }

    #[inline]
    pub fn set_pitch(&mut self, deg: f64) {
        self.pitch = Some(deg);
    }

    #[inline]
    pub fn set_roll(&mut self, deg: f64) {
        self.roll = Some(deg);
    }

    /// Select a flavour by index.
    ///
    /// Returns the selected flavour, or `None` (leaving the current selection
    /// untouched) if the index is out of range.
    pub fn set_flavour(&mut self, index: i32) -> Option<Flavour> {
        let flavour = Flavour::from_index(index)?;
        self.flavour = Some(flavour);
        Some(flavour)
    }

    #[inline]
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.snapshot().is_some()
    }

    /// The full sample and flavour, once every field is set.
    #[must_use]
    pub fn snapshot(&self) -> Option<(Angles, Flavour)> {
        Some((
            Angles::new(self.yaw?, self.pitch?, self.roll?),
            self.flavour?,
        ))
    }

    /// Last-known angles, if all three are set.
    #[must_use]
    pub fn angles(&self) -> Option<Angles> {
        Some(Angles::new(self.yaw?, self.pitch?, self.roll?))
    }

    #[inline]
    #[must_use]
    pub fn flavour(&self) -> Option<Flavour> {
        self.flavour
    }

    #[inline]
    #[must_use]
    pub fn yaw(&self) -> Option<f64> {
        self.yaw
    }

    #[inline]
    #[must_use]
    pub fn pitch(&self) -> Option<f64> {
        self.pitch
    }

    #[inline]
    #[must_use]
    pub fn roll(&self) -> Option<f64> {
        self.roll
    }
}

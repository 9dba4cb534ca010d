//! Euler angle to quaternion conversion.
//!
//! Angles arrive in degrees and are composed roll, then pitch, then yaw:
//!
//! ```text
//! w = cr·cp·cy + sr·sp·sy
//! x = sr·cp·cy − cr·sp·sy
//! y = cr·sp·cy + sr·cp·sy
//! z = cr·cp·sy − sr·sp·cy
//! ```
//!
//! where `cy = cos(yaw/2)`, `sp = sin(pitch/2)` and so on. No normalization
//! pass is applied.

use core::f64::consts::PI;

/// Rotation as a quaternion (`w` real part, `x`/`y`/`z` imaginary parts).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quaternion {
    pub const IDENTITY: Self = Self {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    #[must_use]
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// Euclidean norm; `1.0` for any quaternion built from finite angles.
    #[inline]
    #[must_use]
    pub fn norm(&self) -> f64 {
        libm::sqrt(self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Result of converting one yaw/pitch/roll triple.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Converted {
    pub yaw_rad: f64,
    pub pitch_rad: f64,
    pub roll_rad: f64,
    pub quaternion: Quaternion,
}

/// Convert degrees to radians.
#[inline]
#[must_use]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Convert yaw/pitch/roll in degrees to radians and a unit quaternion.
///
/// Stateless and deterministic. Non-finite input propagates into the output.
///
/// # Example
///
/// ```
/// use tracker_core::to_quaternion;
///
/// let c = to_quaternion(90.0, 0.0, 0.0);
/// assert!((c.yaw_rad - core::f64::consts::FRAC_PI_2).abs() < 1e-12);
/// assert!((c.quaternion.w - core::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
/// assert!((c.quaternion.z - core::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
/// ```
#[must_use]
pub fn to_quaternion(yaw_deg: f64, pitch_deg: f64, roll_deg: f64) -> Converted {
    let yaw = deg_to_rad(yaw_deg);
    let pitch = deg_to_rad(pitch_deg);
    let roll = deg_to_rad(roll_deg);

    let cy = libm::cos(yaw * 0.5);
    let sy = libm::sin(yaw * 0.5);
    let cp = libm::cos(pitch * 0.5);
    let sp = libm::sin(pitch * 0.5);
    let cr = libm::cos(roll * 0.5);
    let sr = libm::sin(roll * 0.5);

    Converted {
        yaw_rad: yaw,
        pitch_rad: pitch,
        roll_rad: roll,
        quaternion: Quaternion {
            w: cr * cp * cy + sr * sp * sy,
            x: sr * cp * cy - cr * sp * sy,
            y: cr * sp * cy + sr * cp * sy,
            z: cr * cp * sy - sr * sp * cy,
        },
    }
}

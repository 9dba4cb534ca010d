//! Receiver-side interpretation of flavour messages.
//!
//! [`OrientationReceiver`] is the listening end of the flavours in
//! [`crate::flavour`]: it maps an incoming OSC message back to either an Euler
//! triple (with the order the sender composes it in) or a quaternion, undoing
//! each flavour's axis sign conventions.
//!
//! Single-axis messages (`/yaw`, `/hedrot/roll`, ...) update one component of
//! the retained Euler triple and emit the whole triple.

use core::f64::consts::PI;

use log::{debug, trace};
use osc_proto::OscMessage;

use crate::rotation::Quaternion;

const DEGREES_PER_RADIAN: f64 = 180.0 / PI;

/// Order in which the sender composes its Euler rotations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EulerOrder {
    #[default]
    Ypr,
    Pyr,
    Rpy,
    Pry,
}

/// Euler angles in degrees, tagged with their composition order.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EulerInput {
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
    pub order: EulerOrder,
}

/// Orientation recovered from one message.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReceivedOrientation {
    Euler(EulerInput),
    Quaternion(Quaternion),
}

/// Representation of the last recognised message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputKind {
    Euler,
    Quaternion,
}

/// Sign flips applied to every emitted orientation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Inversions {
    pub yaw: bool,
    pub pitch: bool,
    pub roll: bool,
    pub quat_w: bool,
    pub quat_x: bool,
    pub quat_y: bool,
    pub quat_z: bool,
}

impl Inversions {
    pub const NONE: Self = Self {
        yaw: false,
        pitch: false,
        roll: false,
        quat_w: false,
        quat_x: false,
        quat_y: false,
        quat_z: false,
    };
}

#[inline]
fn flip(invert: bool, v: f64) -> f64 {
    if invert {
        -v
    } else {
        v
    }
}

/// Stateful decoder for flavour messages.
///
/// # Example
///
/// ```
/// use osc_proto::{OscArg, OscMessage};
/// use tracker_core::{EulerOrder, OrientationReceiver, ReceivedOrientation};
///
/// let mut rx = OrientationReceiver::new();
/// let msg = OscMessage::new("/ypr", [OscArg::Int(-90), OscArg::Int(0), OscArg::Int(5)]);
/// match rx.handle(&msg) {
///     Some(ReceivedOrientation::Euler(e)) => {
///         assert_eq!((e.yaw, e.pitch, e.roll), (90.0, 0.0, 5.0));
///         assert_eq!(e.order, EulerOrder::Ypr);
///     }
///     other => panic!("unexpected {:?}", other),
/// }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct OrientationReceiver {
    euler: EulerInput,
    quaternion: Quaternion,
    inversions: Inversions,
    last_kind: Option<InputKind>,
}

impl OrientationReceiver {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            euler: EulerInput {
                yaw: 0.0,
                pitch: 0.0,
                roll: 0.0,
                order: EulerOrder::Ypr,
            },
            quaternion: Quaternion::IDENTITY,
            inversions: Inversions::NONE,
            last_kind: None,
        }
    }

    /// Decode a raw OSC packet. Malformed packets are ignored.
    pub fn handle_packet(&mut self, packet: &[u8]) -> Option<ReceivedOrientation> {
        match osc_proto::parse(packet) {
            Ok(msg) => self.handle(&msg),
            Err(e) => {
                trace!("dropping packet: {}", e);
                None
            }
        }
    }

    /// Decode one message.
    ///
    /// Returns `None` for an unknown address or an unexpected argument count.
    pub fn handle(&mut self, msg: &OscMessage<'_>) -> Option<ReceivedOrientation> {
        let e = &mut self.euler;
        match (msg.address, msg.args.len()) {
            ("/yaw", 1) => {
                let [v] = values(msg);
                e.yaw = -v;
                e.order = EulerOrder::Ypr;
            }
            ("/pitch", 1) => {
                let [v] = values(msg);
                e.pitch = -v;
                e.order = EulerOrder::Ypr;
            }
            ("/roll", 1) => {
                let [v] = values(msg);
                e.roll = v;
                e.order = EulerOrder::Ypr;
            }
            ("/hedrot/yaw", 1) => {
                let [v] = values(msg);
                e.yaw = v;
                e.order = EulerOrder::Ypr;
            }
            ("/hedrot/pitch", 1) => {
                let [v] = values(msg);
                e.pitch = v;
                e.order = EulerOrder::Ypr;
            }
            ("/hedrot/roll", 1) => {
                let [v] = values(msg);
                e.roll = v;
                e.order = EulerOrder::Ypr;
            }
            ("/rotation", 3) => {
                let [p, y, r] = values(msg);
                *e = EulerInput { yaw: -y, pitch: -p, roll: -r, order: EulerOrder::Pyr };
            }
            ("/rendering/htrpy", 3) => {
                let [r, p, y] = values(msg);
                *e = EulerInput { yaw: y, pitch: p, roll: r, order: EulerOrder::Rpy };
            }
            ("/ypr", 3) => {
                let [y, p, r] = values(msg);
                *e = EulerInput { yaw: -y, pitch: -p, roll: r, order: EulerOrder::Ypr };
            }
            ("/orientation", 3) => {
                let [y, p, r] = values(msg);
                *e = EulerInput { yaw: y, pitch: p, roll: r, order: EulerOrder::Ypr };
            }
            ("/3DTI-OSC/receiver/pry", 3) => {
                let [p, r, y] = values(msg).map(|v| v * DEGREES_PER_RADIAN);
                *e = EulerInput { yaw: y, pitch: p, roll: r, order: EulerOrder::Pry };
            }
            ("/head_pose", 7) => {
                let [_, _, _, _, p, y, r] = values(msg);
                *e = EulerInput { yaw: -y, pitch: -p, roll: -r, order: EulerOrder::Pyr };
            }
            ("/quaternion" | "/SceneRotator/quaternions", 4) => {
                let [w, x, y, z] = values(msg);
                self.quaternion = Quaternion::new(w, -x, y, z);
                return Some(self.received(InputKind::Quaternion));
            }
            ("/quaternions", 4) => {
                let [w, y, z, x] = values(msg);
                self.quaternion = Quaternion::new(w, -x, -y, z);
                return Some(self.received(InputKind::Quaternion));
            }
            (address, arity) => {
                debug!("ignoring {} with {} args", address, arity);
                return None;
            }
        }
        Some(self.received(InputKind::Euler))
    }

    /// Replace the inversions and re-emit the last received orientation, if any.
    pub fn set_inversions(&mut self, inversions: Inversions) -> Option<ReceivedOrientation> {
        self.inversions = inversions;
        self.last_kind.map(|kind| self.current(kind))
    }

    #[inline]
    #[must_use]
    pub fn inversions(&self) -> Inversions {
        self.inversions
    }

    /// Representation of the last recognised message.
    #[inline]
    #[must_use]
    pub fn last_kind(&self) -> Option<InputKind> {
        self.last_kind
    }

    fn received(&mut self, kind: InputKind) -> ReceivedOrientation {
        if self.last_kind != Some(kind) {
            debug!("input kind now {:?}", kind);
        }
        self.last_kind = Some(kind);
        self.current(kind)
    }

    fn current(&self, kind: InputKind) -> ReceivedOrientation {
        let inv = &self.inversions;
        match kind {
            InputKind::Euler => ReceivedOrientation::Euler(EulerInput {
                yaw: flip(inv.yaw, self.euler.yaw),
                pitch: flip(inv.pitch, self.euler.pitch),
                roll: flip(inv.roll, self.euler.roll),
                order: self.euler.order,
            }),
            InputKind::Quaternion => {
                let q = &self.quaternion;
                ReceivedOrientation::Quaternion(Quaternion::new(
                    flip(inv.quat_w, q.w),
                    flip(inv.quat_x, q.x),
                    flip(inv.quat_y, q.y),
                    flip(inv.quat_z, q.z),
                ))
            }
        }
    }
}

impl Default for OrientationReceiver {
    fn default() -> Self {
        Self::new()
    }
}

/// Argument values of a message whose arity was already matched.
#[inline]
fn values<const N: usize>(msg: &OscMessage<'_>) -> [f64; N] {
    core::array::from_fn(|i| msg.args.get(i).map_or(0.0, |a| a.as_f64()))
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::flavour::{format_messages, Flavour};
    use crate::rotation::to_quaternion;
    use crate::types::Angles;
    use osc_proto::{OscArg, Serialize, MAX_PACKET_SIZE};

    const TOL: f64 = 1e-9;

    fn expected_order(flavour: Flavour) -> Option<EulerOrder> {
        match flavour {
            Flavour::AmbixRotationFloat
            | Flavour::AmbixRotationInt
            | Flavour::AmbixHeadPoseFloat
            | Flavour::AmbixHeadPoseInt => Some(EulerOrder::Pyr),
            Flavour::Mach1
            | Flavour::SpartaYpr
            | Flavour::SpartaEulerIndividual
            | Flavour::Hedrot => Some(EulerOrder::Ypr),
            Flavour::Audiolab => Some(EulerOrder::Rpy),
            Flavour::ThreeDTuneIn => Some(EulerOrder::Pry),
            Flavour::AmbixQuaternion
            | Flavour::SpartaQuaternion
            | Flavour::Iem
            | Flavour::Unity => None,
        }
    }

    #[test]
    fn test_every_flavour_recovers_orientation() {
        let samples = [(10.0, 20.0, 30.0), (-45.0, 5.0, 170.0), (0.0, 0.0, 0.0)];
        for flavour in Flavour::ALL {
            for (yaw, pitch, roll) in samples {
                let angles = Angles::new(yaw, pitch, roll);
                let q = to_quaternion(yaw, pitch, roll).quaternion;

                let mut rx = OrientationReceiver::new();
                let mut last = None;
                for msg in format_messages(flavour, &angles, &q) {
                    last = rx.handle(&msg);
                }

                match (last, expected_order(flavour)) {
                    (Some(ReceivedOrientation::Euler(e)), Some(order)) => {
                        assert_eq!(e.order, order, "{}", flavour);
                        assert!((e.yaw - yaw).abs() < TOL, "{} yaw {}", flavour, e.yaw);
                        assert!((e.pitch - pitch).abs() < TOL, "{} pitch {}", flavour, e.pitch);
                        assert!((e.roll - roll).abs() < TOL, "{} roll {}", flavour, e.roll);
                    }
                    (Some(ReceivedOrientation::Quaternion(r)), None) => {
                        assert!((r.w - q.w).abs() < TOL, "{}", flavour);
                        assert!((r.x - q.x).abs() < TOL, "{}", flavour);
                        assert!((r.y - q.y).abs() < TOL, "{}", flavour);
                        assert!((r.z - q.z).abs() < TOL, "{}", flavour);
                    }
                    other => panic!("{}: unexpected {:?}", flavour, other),
                }
            }
        }
    }

    #[test]
    fn test_handle_packet_over_the_wire() {
        let msg = OscMessage::new(
            "/orientation",
            [OscArg::Float(12.5), OscArg::Float(-3.25), OscArg::Int(1)],
        );
        let mut buf = [0u8; MAX_PACKET_SIZE];
        let len = msg.serialize(&mut buf).unwrap();

        let mut rx = OrientationReceiver::new();
        assert_eq!(
            rx.handle_packet(&buf[..len]),
            Some(ReceivedOrientation::Euler(EulerInput {
                yaw: 12.5,
                pitch: -3.25,
                roll: 1.0,
                order: EulerOrder::Ypr,
            }))
        );
    }

    #[test]
    fn test_garbage_packet_ignored() {
        let mut rx = OrientationReceiver::new();
        assert_eq!(rx.handle_packet(b"not osc"), None);
        assert_eq!(rx.last_kind(), None);
    }

    #[test]
    fn test_unknown_address_or_arity_ignored() {
        let mut rx = OrientationReceiver::new();
        assert_eq!(rx.handle(&OscMessage::new("/volume", [OscArg::Int(1)])), None);
        assert_eq!(
            rx.handle(&OscMessage::new("/yaw", [OscArg::Int(1), OscArg::Int(2)])),
            None
        );
        assert_eq!(rx.handle(&OscMessage::new("/quaternion", [OscArg::Int(1)])), None);
        assert_eq!(rx.last_kind(), None);
    }

    #[test]
    fn test_single_axis_keeps_other_axes() {
        let mut rx = OrientationReceiver::new();
        rx.handle(&OscMessage::new(
            "/orientation",
            [OscArg::Int(1), OscArg::Int(2), OscArg::Int(3)],
        ));
        let out = rx.handle(&OscMessage::new("/hedrot/pitch", [OscArg::Int(40)]));
        assert_eq!(
            out,
            Some(ReceivedOrientation::Euler(EulerInput {
                yaw: 1.0,
                pitch: 40.0,
                roll: 3.0,
                order: EulerOrder::Ypr,
            }))
        );
    }

    #[test]
    fn test_single_axis_resets_order() {
        let mut rx = OrientationReceiver::new();
        rx.handle(&OscMessage::new(
            "/rotation",
            [OscArg::Int(-2), OscArg::Int(-1), OscArg::Int(-3)],
        ));
        let Some(ReceivedOrientation::Euler(e)) =
            rx.handle(&OscMessage::new("/roll", [OscArg::Int(9)]))
        else {
            panic!("expected euler");
        };
        assert_eq!((e.yaw, e.pitch, e.roll), (1.0, 2.0, 9.0));
        assert_eq!(e.order, EulerOrder::Ypr);
    }

    #[test]
    fn test_inversions_applied_and_reemitted() {
        let mut rx = OrientationReceiver::new();
        assert_eq!(rx.set_inversions(Inversions::NONE), None);

        rx.handle(&OscMessage::new(
            "/quaternion",
            [
                OscArg::Float(0.5),
                OscArg::Float(-0.5),
                OscArg::Float(0.5),
                OscArg::Float(0.5),
            ],
        ));
        assert_eq!(rx.last_kind(), Some(InputKind::Quaternion));

        let out = rx.set_inversions(Inversions {
            quat_w: true,
            yaw: true,
            ..Inversions::NONE
        });
        assert_eq!(
            out,
            Some(ReceivedOrientation::Quaternion(Quaternion::new(-0.5, 0.5, 0.5, 0.5)))
        );

        let out = rx.handle(&OscMessage::new("/yaw", [OscArg::Int(30)]));
        assert_eq!(rx.last_kind(), Some(InputKind::Euler));
        assert!(matches!(out, Some(ReceivedOrientation::Euler(e)) if e.yaw == 30.0));
    }
}

//! Output flavour registry: port assignment and message formatting.
//!
//! Each [`Flavour`] is a third-party spatial-audio control convention with its
//! own address pattern, axis signs and numeric encoding.
//!
//! | Flavour | Port | Message(s) |
//! |---------|------|------------|
//! | `ambix_quaternion` | 7120 | `/quaternion` w, −x, y, z |
//! | `ambix_rotation_float` | 7120 | `/rotation` −pitch, −yaw, −roll (float) |
//! | `ambix_rotation_int` | 7120 | `/rotation` −pitch, −yaw, −roll (raw) |
//! | `ambix_head_pose_float` | 7120 | `/head_pose` 0, ε, ε, ε, −pitch, −yaw, −roll (float) |
//! | `ambix_head_pose_int` | 7120 | `/head_pose` 0, 0, 0, 0, −pitch, −yaw, −roll (raw) |
//! | `iem` | - | `/SceneRotator/quaternions` w, −x, y, z |
//! | `unity` | - | `/quaternions` w, −y, z, −x |
//! | `mach1` | 9898 | `/orientation` yaw, pitch, roll |
//! | `audiolab` | 9000 | `/rendering/htrpy` roll, pitch, yaw |
//! | `sparta_ypr` | 9000 | `/ypr` −yaw, −pitch, roll |
//! | `sparta_euler_individual` | 9000 | `/yaw` −yaw, `/pitch` −pitch, `/roll` roll |
//! | `sparta_quaternion` | 9000 | `/quaternion` w, −x, y, z |
//! | `3d_tune-in` | 12300 | `/3DTI-OSC/receiver/pry` pitch, roll, yaw (radians) |
//! | `hedrot` | 2001 | `/hedrot/yaw`, `/hedrot/pitch`, `/hedrot/roll` |

use osc_proto::{OscArg, OscMessage};

use crate::rotation::{deg_to_rad, Quaternion};
use crate::types::Angles;

/// Offset added to the angles of the float-typed flavours.
///
/// The offset only keeps fractional values for small angles; from `|x| >= 128`
/// on, `x + EPSILON == x`. Float slots are therefore typed explicitly as
/// [`OscArg::Float`] and never inferred.
pub const EPSILON: f64 = 0.000_000_000_000_01;

/// Most messages any flavour emits for a single update.
pub const MAX_MESSAGES_PER_UPDATE: usize = {
    let mut max = 0;
    let mut i = 0;
    while i < Flavour::COUNT {
        let count = Flavour::ALL[i].message_count();
        if count > max {
            max = count;
        }
        i += 1;
    }
    max
};

/// Messages rendered for one update.
pub type FlavourMessages = heapless::Vec<OscMessage<'static>, MAX_MESSAGES_PER_UPDATE>;

pub const AMBIX_PORT: u16 = 7120;
pub const MACH1_PORT: u16 = 9898;
pub const AUDIOLAB_PORT: u16 = 9000;
pub const SPARTA_PORT: u16 = 9000;
pub const HEDROT_PORT: u16 = 2001;
pub const TUNE_IN_PORT: u16 = 12300;

/// Known output flavours, in selector order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Flavour {
    AmbixQuaternion,
    AmbixRotationFloat,
    AmbixRotationInt,
    AmbixHeadPoseFloat,
    AmbixHeadPoseInt,
    Iem,
    Unity,
    Mach1,
    Audiolab,
    SpartaYpr,
    SpartaEulerIndividual,
    SpartaQuaternion,
    ThreeDTuneIn,
    Hedrot,
}

impl Flavour {
    /// Number of flavours.
    pub const COUNT: usize = 14;

    /// All flavours, indexed by selector value.
    pub const ALL: [Flavour; Self::COUNT] = [
        Self::AmbixQuaternion,
        Self::AmbixRotationFloat,
        Self::AmbixRotationInt,
        Self::AmbixHeadPoseFloat,
        Self::AmbixHeadPoseInt,
        Self::Iem,
        Self::Unity,
        Self::Mach1,
        Self::Audiolab,
        Self::SpartaYpr,
        Self::SpartaEulerIndividual,
        Self::SpartaQuaternion,
        Self::ThreeDTuneIn,
        Self::Hedrot,
    ];

    /// Look up a flavour by selector index. Out-of-range indices yield `None`.
    #[inline]
    #[must_use]
    pub fn from_index(index: i32) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Look up a flavour by its protocol name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// Selector index of this flavour.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Protocol name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AmbixQuaternion => "ambix_quaternion",
            Self::AmbixRotationFloat => "ambix_rotation_float",
            Self::AmbixRotationInt => "ambix_rotation_int",
            Self::AmbixHeadPoseFloat => "ambix_head_pose_float",
            Self::AmbixHeadPoseInt => "ambix_head_pose_int",
            Self::Iem => "iem",
            Self::Unity => "unity",
            Self::Mach1 => "mach1",
            Self::Audiolab => "audiolab",
            Self::SpartaYpr => "sparta_ypr",
            Self::SpartaEulerIndividual => "sparta_euler_individual",
            Self::SpartaQuaternion => "sparta_quaternion",
            Self::ThreeDTuneIn => "3d_tune-in",
            Self::Hedrot => "hedrot",
        }
    }

    /// Default receiver port, if the flavour's family has one.
    #[must_use]
    pub const fn port(self) -> Option<u16> {
        match self {
            Self::AmbixQuaternion
            | Self::AmbixRotationFloat
            | Self::AmbixRotationInt
            | Self::AmbixHeadPoseFloat
            | Self::AmbixHeadPoseInt => Some(AMBIX_PORT),
            Self::Mach1 => Some(MACH1_PORT),
            Self::Audiolab => Some(AUDIOLAB_PORT),
            Self::SpartaYpr | Self::SpartaEulerIndividual | Self::SpartaQuaternion => {
                Some(SPARTA_PORT)
            }
            Self::Hedrot => Some(HEDROT_PORT),
            Self::ThreeDTuneIn => Some(TUNE_IN_PORT),
            Self::Iem | Self::Unity => None,
        }
    }

    /// Number of messages [`format`](Self::format) renders per update.
    #[must_use]
    pub const fn message_count(self) -> usize {
        match self {
            Self::SpartaEulerIndividual | Self::Hedrot => 3,
            _ => 1,
        }
    }

    /// Render the messages for one orientation sample.
    ///
    /// `angles` are the raw degree values, `q` the quaternion converted from them.
    #[must_use]
    pub fn format(self, angles: &Angles, q: &Quaternion) -> FlavourMessages {
        format_messages(self, angles, q)
    }
}

impl core::fmt::Display for Flavour {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Render the messages `flavour` emits for one orientation sample.
///
/// Float-typed slots (angles offset by [`EPSILON`], the offsets themselves,
/// radians and quaternion components) are always [`OscArg::Float`]. Only the
/// raw angles of the `_int` flavours go through [`OscArg::number`], so
/// whole-degree values are sent as integers there.
#[must_use]
pub fn format_messages(flavour: Flavour, angles: &Angles, q: &Quaternion) -> FlavourMessages {
    let f = OscArg::Float;
    let n = OscArg::number;
    let (yaw, pitch, roll) = (angles.yaw, angles.pitch, angles.roll);
    let (yaw_f, pitch_f, roll_f) = (yaw + EPSILON, pitch + EPSILON, roll + EPSILON);

    match flavour {
        Flavour::AmbixQuaternion | Flavour::SpartaQuaternion => single(OscMessage::new(
            "/quaternion",
            [f(q.w), f(-q.x), f(q.y), f(q.z)],
        )),
        Flavour::AmbixRotationFloat => single(OscMessage::new(
            "/rotation",
            [f(-pitch_f), f(-yaw_f), f(-roll_f)],
        )),
        Flavour::AmbixRotationInt => single(OscMessage::new(
            "/rotation",
            [n(-pitch), n(-yaw), n(-roll)],
        )),
        Flavour::AmbixHeadPoseFloat => single(OscMessage::new(
            "/head_pose",
            [
                OscArg::Int(0),
                f(EPSILON),
                f(EPSILON),
                f(EPSILON),
                f(-pitch_f),
                f(-yaw_f),
                f(-roll_f),
            ],
        )),
        Flavour::AmbixHeadPoseInt => single(OscMessage::new(
            "/head_pose",
            [
                OscArg::Int(0),
                OscArg::Int(0),
                OscArg::Int(0),
                OscArg::Int(0),
                n(-pitch),
                n(-yaw),
                n(-roll),
            ],
        )),
        Flavour::Iem => single(OscMessage::new(
            "/SceneRotator/quaternions",
            [f(q.w), f(-q.x), f(q.y), f(q.z)],
        )),
        Flavour::Unity => single(OscMessage::new(
            "/quaternions",
            [f(q.w), f(-q.y), f(q.z), f(-q.x)],
        )),
        Flavour::Mach1 => single(OscMessage::new(
            "/orientation",
            [f(yaw_f), f(pitch_f), f(roll_f)],
        )),
        Flavour::Audiolab => single(OscMessage::new(
            "/rendering/htrpy",
            [f(roll_f), f(pitch_f), f(yaw_f)],
        )),
        Flavour::SpartaYpr => single(OscMessage::new(
            "/ypr",
            [f(-yaw_f), f(-pitch_f), f(roll_f)],
        )),
        Flavour::SpartaEulerIndividual => [
            OscMessage::new("/yaw", [f(-yaw_f)]),
            OscMessage::new("/pitch", [f(-pitch_f)]),
            OscMessage::new("/roll", [f(roll_f)]),
        ]
        .into_iter()
        .collect(),
        Flavour::ThreeDTuneIn => single(OscMessage::new(
            "/3DTI-OSC/receiver/pry",
            [
                f(deg_to_rad(pitch_f)),
                f(deg_to_rad(roll_f)),
                f(deg_to_rad(yaw_f)),
            ],
        )),
        Flavour::Hedrot => [
            OscMessage::new("/hedrot/yaw", [f(yaw_f)]),
            OscMessage::new("/hedrot/pitch", [f(pitch_f)]),
            OscMessage::new("/hedrot/roll", [f(roll_f)]),
        ]
        .into_iter()
        .collect(),
    }
}

#[inline]
fn single(msg: OscMessage<'static>) -> FlavourMessages {
    core::iter::once(msg).collect()
}

//! Update processing: applies one update to the state and renders the output.

use log::{debug, error, trace};

use crate::config::{TrackerConfig, DEFAULT_CONFIG};
use crate::flavour::{format_messages, Flavour, MAX_MESSAGES_PER_UPDATE};
use crate::rotation::to_quaternion;
use crate::state::OrientationState;
use crate::types::{OrientationUpdate, OutputEvent};

/// Events announcing a flavour selection: name and port.
const SELECTION_EVENTS: usize = 2;

/// Events rendered ahead of the flavour messages: three radian values and the quaternion.
const RENDER_EVENTS: usize = 3 + 1;

/// Most events a single update can produce.
pub const MAX_EVENTS_PER_UPDATE: usize = SELECTION_EVENTS + RENDER_EVENTS + MAX_MESSAGES_PER_UPDATE;

// A refreshing selection is the largest update any flavour can produce.
const _: () = {
    let mut i = 0;
    while i < Flavour::COUNT {
        assert!(
            SELECTION_EVENTS + RENDER_EVENTS + Flavour::ALL[i].message_count()
                <= MAX_EVENTS_PER_UPDATE,
            "flavour renders more events than MAX_EVENTS_PER_UPDATE"
        );
        i += 1;
    }
};

/// Events produced by one update, in emission order.
pub type Outputs = heapless::Vec<OutputEvent, MAX_EVENTS_PER_UPDATE>;

/// Error type for update processing.
///
/// Only produced when enabled in [`TrackerConfig`]; with the default
/// configuration every update succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateError {
    /// NaN or infinite angle with `reject_non_finite` set.
    InvalidAngle,
}

impl core::fmt::Display for UpdateError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidAngle => write!(f, "angle is not finite"),
        }
    }
}

/// Apply one update to `state` and return the events it produces.
///
/// - Angle updates store the value, then re-render the full output for the
///   currently selected flavour if the state is ready.
/// - A valid flavour selection emits the flavour name and its port (if any).
///   It only re-renders when `refresh_on_flavour_change` is set.
/// - An out-of-range selector, or an angle update while not ready, produces
///   no events.
///
/// # Example
///
/// ```
/// use tracker_core::{process, OrientationState, OrientationUpdate, OutputEvent, DEFAULT_CONFIG};
///
/// let mut state = OrientationState::new();
/// let out = process(&mut state, &DEFAULT_CONFIG, OrientationUpdate::SelectFlavour(7)).unwrap();
/// assert_eq!(out[1], OutputEvent::Port(9898));
///
/// process(&mut state, &DEFAULT_CONFIG, OrientationUpdate::Yaw(10.0)).unwrap();
/// process(&mut state, &DEFAULT_CONFIG, OrientationUpdate::Pitch(20.0)).unwrap();
/// let out = process(&mut state, &DEFAULT_CONFIG, OrientationUpdate::Roll(30.0)).unwrap();
/// assert_eq!(out.len(), 5);
/// ```
pub fn process(
    state: &mut OrientationState,
    config: &TrackerConfig,
    update: OrientationUpdate,
) -> Result<Outputs, UpdateError> {
    trace!("update: {:?}", update);
    let mut out = Outputs::new();

    match update {
        OrientationUpdate::Yaw(deg) => {
            check_angle(config, deg)?;
            state.set_yaw(deg);
            render(state, &mut out);
        }
        OrientationUpdate::Pitch(deg) => {
            check_angle(config, deg)?;
            state.set_pitch(deg);
            render(state, &mut out);
        }
        OrientationUpdate::Roll(deg) => {
            check_angle(config, deg)?;
            state.set_roll(deg);
            render(state, &mut out);
        }
        OrientationUpdate::SelectFlavour(index) => match state.set_flavour(index) {
            Some(flavour) => {
                debug!("flavour selected: {} (port {:?})", flavour, flavour.port());
                emit(&mut out, OutputEvent::FlavourName(flavour));
                if let Some(port) = flavour.port() {
                    emit(&mut out, OutputEvent::Port(port));
                }
                if config.refresh_on_flavour_change {
                    render(state, &mut out);
                }
            }
            None => debug!("ignoring flavour index {}", index),
        },
    }

    Ok(out)
}

#[inline]
fn check_angle(config: &TrackerConfig, deg: f64) -> Result<(), UpdateError> {
    if config.reject_non_finite && !deg.is_finite() {
        return Err(UpdateError::InvalidAngle);
    }
    Ok(())
}

/// Render radians, quaternion and flavour messages if the state is ready.
fn render(state: &OrientationState, out: &mut Outputs) {
    let Some((angles, flavour)) = state.snapshot() else {
        trace!("not ready");
        return;
    };

    let converted = to_quaternion(angles.yaw, angles.pitch, angles.roll);
    emit(out, OutputEvent::YawRad(converted.yaw_rad));
    emit(out, OutputEvent::PitchRad(converted.pitch_rad));
    emit(out, OutputEvent::RollRad(converted.roll_rad));
    emit(out, OutputEvent::Quaternion(converted.quaternion));

    for msg in format_messages(flavour, &angles, &converted.quaternion) {
        emit(out, OutputEvent::Message(msg));
    }
}

#[inline]
fn emit(out: &mut Outputs, event: OutputEvent) {
    if let Err(event) = out.push(event) {
        error!("MAX_EVENTS_PER_UPDATE exceeded, dropping {:?}", event);
        debug_assert!(false, "MAX_EVENTS_PER_UPDATE exceeded");
    }
}

/// Orientation state bundled with its configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tracker {
    state: OrientationState,
    config: TrackerConfig,
}

impl Tracker {
    #[must_use]
    pub const fn new(config: TrackerConfig) -> Self {
        Self {
            state: OrientationState::new(),
            config,
        }
    }

    /// Apply one update. See [`process`].
    pub fn apply(&mut self, update: OrientationUpdate) -> Result<Outputs, UpdateError> {
        process(&mut self.state, &self.config, update)
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &OrientationState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    #[inline]
    pub fn set_config(&mut self, config: TrackerConfig) {
        self.config = config;
    }

    #[inline]
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state.is_ready()
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::flavour::{Flavour, EPSILON};
    use crate::rotation::Quaternion;
    use core::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2};
    use osc_proto::OscArg;

    const TOL: f64 = 1e-12;

    fn feed(tracker: &mut Tracker, updates: &[OrientationUpdate]) -> Outputs {
        let mut last = Outputs::new();
        for &u in updates {
            last = tracker.apply(u).unwrap();
        }
        last
    }

    fn assert_quat_close(q: &Quaternion, w: f64, x: f64, y: f64, z: f64) {
        assert!((q.w - w).abs() < TOL, "w: {}", q.w);
        assert!((q.x - x).abs() < TOL, "x: {}", q.x);
        assert!((q.y - y).abs() < TOL, "y: {}", q.y);
        assert!((q.z - z).abs() < TOL, "z: {}", q.z);
    }

    #[test]
    fn test_select_emits_name_and_port() {
        let mut tracker = Tracker::default();
        let out = tracker.apply(OrientationUpdate::SelectFlavour(0)).unwrap();
        assert_eq!(
            out.as_slice(),
            &[
                OutputEvent::FlavourName(Flavour::AmbixQuaternion),
                OutputEvent::Port(7120),
            ]
        );
    }

    #[test]
    fn test_select_portless_flavour() {
        let mut tracker = Tracker::default();
        let out = tracker.apply(OrientationUpdate::SelectFlavour(5)).unwrap();
        assert_eq!(out.as_slice(), &[OutputEvent::FlavourName(Flavour::Iem)]);
    }

    #[test]
    fn test_reselect_is_idempotent() {
        let mut tracker = Tracker::default();
        let first = tracker.apply(OrientationUpdate::SelectFlavour(9)).unwrap();
        let second = tracker.apply(OrientationUpdate::SelectFlavour(9)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first[0], OutputEvent::FlavourName(Flavour::SpartaYpr));
        assert_eq!(first[1], OutputEvent::Port(9000));
    }

    #[test]
    fn test_out_of_range_is_silent() {
        let mut tracker = Tracker::default();
        tracker.apply(OrientationUpdate::SelectFlavour(7)).unwrap();
        let out = tracker.apply(OrientationUpdate::SelectFlavour(99)).unwrap();
        assert!(out.is_empty());
        assert_eq!(tracker.state().flavour(), Some(Flavour::Mach1));
    }

    #[test]
    fn test_not_ready_without_roll() {
        for index in 0..Flavour::COUNT as i32 {
            let mut tracker = Tracker::default();
            tracker.apply(OrientationUpdate::SelectFlavour(index)).unwrap();
            assert!(tracker.apply(OrientationUpdate::Yaw(10.0)).unwrap().is_empty());
            assert!(tracker.apply(OrientationUpdate::Pitch(20.0)).unwrap().is_empty());
        }
    }

    #[test]
    fn test_not_ready_without_flavour() {
        let mut tracker = Tracker::default();
        let out = feed(
            &mut tracker,
            &[
                OrientationUpdate::Yaw(1.0),
                OrientationUpdate::Pitch(2.0),
                OrientationUpdate::Roll(3.0),
            ],
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_ambix_quaternion_end_to_end() {
        let mut tracker = Tracker::default();
        let select = tracker.apply(OrientationUpdate::SelectFlavour(0)).unwrap();
        assert_eq!(select[1], OutputEvent::Port(7120));

        let out = feed(
            &mut tracker,
            &[
                OrientationUpdate::Yaw(90.0),
                OrientationUpdate::Pitch(0.0),
                OrientationUpdate::Roll(0.0),
            ],
        );
        assert_eq!(out.len(), 5);

        match out[0] {
            OutputEvent::YawRad(r) => assert!((r - FRAC_PI_2).abs() < TOL),
            ref other => panic!("unexpected {:?}", other),
        }
        assert_eq!(out[1], OutputEvent::PitchRad(0.0));
        assert_eq!(out[2], OutputEvent::RollRad(0.0));
        match &out[3] {
            OutputEvent::Quaternion(q) => {
                assert_quat_close(q, FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2)
            }
            other => panic!("unexpected {:?}", other),
        }
        match &out[4] {
            OutputEvent::Message(msg) => {
                assert_eq!(msg.address, "/quaternion");
                let v: std::vec::Vec<f64> = msg.values().collect();
                assert_eq!(v.len(), 4);
                assert!((v[0] - FRAC_1_SQRT_2).abs() < TOL);
                assert!(v[1].abs() < TOL);
                assert!(v[2].abs() < TOL);
                assert!((v[3] - FRAC_1_SQRT_2).abs() < TOL);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_mach1_end_to_end() {
        let mut tracker = Tracker::default();
        let select = tracker.apply(OrientationUpdate::SelectFlavour(7)).unwrap();
        assert_eq!(
            select.as_slice(),
            &[OutputEvent::FlavourName(Flavour::Mach1), OutputEvent::Port(9898)]
        );

        let out = feed(
            &mut tracker,
            &[
                OrientationUpdate::Yaw(10.0),
                OrientationUpdate::Pitch(20.0),
                OrientationUpdate::Roll(30.0),
            ],
        );
        let OutputEvent::Message(msg) = &out[4] else {
            panic!("expected message, got {:?}", out[4]);
        };
        assert_eq!(msg.address, "/orientation");
        assert_eq!(
            msg.args.as_slice(),
            &[
                OscArg::Float(10.0 + EPSILON),
                OscArg::Float(20.0 + EPSILON),
                OscArg::Float(30.0 + EPSILON),
            ]
        );
    }

    #[test]
    fn test_every_angle_update_rerenders() {
        let mut tracker = Tracker::default();
        feed(
            &mut tracker,
            &[
                OrientationUpdate::SelectFlavour(10),
                OrientationUpdate::Yaw(1.0),
                OrientationUpdate::Pitch(2.0),
                OrientationUpdate::Roll(3.0),
            ],
        );
        let out = tracker.apply(OrientationUpdate::Yaw(4.0)).unwrap();
        // 3 radians + quaternion + /yaw, /pitch, /roll
        assert_eq!(out.len(), MAX_EVENTS_PER_UPDATE - 2);
        assert_eq!(out[0], OutputEvent::YawRad(crate::deg_to_rad(4.0)));
    }

    #[test]
    fn test_flavour_change_uses_new_flavour_on_next_angle() {
        let mut tracker = Tracker::default();
        feed(
            &mut tracker,
            &[
                OrientationUpdate::SelectFlavour(7),
                OrientationUpdate::Yaw(1.0),
                OrientationUpdate::Pitch(2.0),
                OrientationUpdate::Roll(3.0),
            ],
        );

        let select = tracker.apply(OrientationUpdate::SelectFlavour(13)).unwrap();
        assert_eq!(
            select.as_slice(),
            &[OutputEvent::FlavourName(Flavour::Hedrot), OutputEvent::Port(2001)]
        );

        let out = tracker.apply(OrientationUpdate::Roll(3.0)).unwrap();
        let addresses: std::vec::Vec<&str> = out
            .iter()
            .filter_map(|e| match e {
                OutputEvent::Message(m) => Some(m.address),
                _ => None,
            })
            .collect();
        assert_eq!(addresses, ["/hedrot/yaw", "/hedrot/pitch", "/hedrot/roll"]);
    }

    #[test]
    fn test_refresh_on_flavour_change() {
        let mut tracker = Tracker::new(TrackerConfig {
            refresh_on_flavour_change: true,
            ..DEFAULT_CONFIG
        });
        feed(
            &mut tracker,
            &[
                OrientationUpdate::SelectFlavour(0),
                OrientationUpdate::Yaw(1.0),
                OrientationUpdate::Pitch(2.0),
                OrientationUpdate::Roll(3.0),
            ],
        );
        let out = tracker.apply(OrientationUpdate::SelectFlavour(10)).unwrap();
        assert_eq!(out.len(), MAX_EVENTS_PER_UPDATE);
        assert_eq!(out[0], OutputEvent::FlavourName(Flavour::SpartaEulerIndividual));
        assert_eq!(out[1], OutputEvent::Port(9000));
        assert!(matches!(out[2], OutputEvent::YawRad(_)));
    }

    #[test]
    fn test_every_flavour_fits_event_capacity() {
        for flavour in Flavour::ALL {
            let mut tracker = Tracker::new(TrackerConfig {
                refresh_on_flavour_change: true,
                ..DEFAULT_CONFIG
            });
            feed(
                &mut tracker,
                &[
                    OrientationUpdate::Yaw(180.0),
                    OrientationUpdate::Pitch(-90.0),
                    OrientationUpdate::Roll(45.0),
                ],
            );
            let out = tracker
                .apply(OrientationUpdate::SelectFlavour(flavour.index() as i32))
                .unwrap();
            let announced = if flavour.port().is_some() { 2 } else { 1 };
            assert_eq!(
                out.len(),
                announced + 4 + flavour.message_count(),
                "{}",
                flavour
            );
            assert!(out.len() <= MAX_EVENTS_PER_UPDATE);
            let messages = out
                .iter()
                .filter(|e| matches!(e, OutputEvent::Message(_)))
                .count();
            assert_eq!(messages, flavour.message_count(), "{}", flavour);
        }
    }

    #[test]
    fn test_refresh_on_flavour_change_not_ready() {
        let mut tracker = Tracker::new(TrackerConfig {
            refresh_on_flavour_change: true,
            ..DEFAULT_CONFIG
        });
        let out = tracker.apply(OrientationUpdate::SelectFlavour(6)).unwrap();
        assert_eq!(out.as_slice(), &[OutputEvent::FlavourName(Flavour::Unity)]);
    }

    #[test]
    fn test_non_finite_propagates_by_default() {
        let mut tracker = Tracker::default();
        let out = feed(
            &mut tracker,
            &[
                OrientationUpdate::SelectFlavour(7),
                OrientationUpdate::Yaw(f64::NAN),
                OrientationUpdate::Pitch(0.0),
                OrientationUpdate::Roll(0.0),
            ],
        );
        assert!(matches!(out[0], OutputEvent::YawRad(r) if r.is_nan()));
        assert!(matches!(&out[3], OutputEvent::Quaternion(q) if q.w.is_nan()));
    }

    #[test]
    fn test_reject_non_finite() {
        let mut tracker = Tracker::new(TrackerConfig {
            reject_non_finite: true,
            ..DEFAULT_CONFIG
        });
        tracker.apply(OrientationUpdate::Yaw(5.0)).unwrap();
        assert_eq!(
            tracker.apply(OrientationUpdate::Yaw(f64::INFINITY)),
            Err(UpdateError::InvalidAngle)
        );
        assert_eq!(
            tracker.apply(OrientationUpdate::Roll(f64::NAN)),
            Err(UpdateError::InvalidAngle)
        );
        assert_eq!(tracker.state().yaw(), Some(5.0));
        assert_eq!(tracker.state().roll(), None);
    }
}

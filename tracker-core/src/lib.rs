//! Platform-agnostic head orientation tracking and OSC flavour dispatch.
//!
//! This crate turns a stream of single-axis head orientation updates into the
//! control messages spoken by a range of spatial-audio renderers. It has no
//! platform-specific dependencies and runs both in `no_std` firmware and on
//! host for testing.
//!
//! # Overview
//!
//! - [`state`]: Latest yaw/pitch/roll sample and flavour selection ([`OrientationState`])
//! - [`rotation`]: Degrees to radians and quaternion ([`to_quaternion`])
//! - [`flavour`]: Flavour registry, ports and message formatting ([`Flavour`])
//! - [`dispatch`]: Applies an update and renders its output events ([`process`], [`Tracker`])
//! - [`receiver`]: Listening-end decoding of flavour messages ([`OrientationReceiver`])
//! - [`input`] / [`output`]: Async source and sink traits
//!
//! # Example
//!
//! ```rust
//! use tracker_core::{OrientationUpdate, OutputEvent, Tracker};
//!
//! let mut tracker = Tracker::default();
//! tracker.apply(OrientationUpdate::SelectFlavour(7)).unwrap();
//! tracker.apply(OrientationUpdate::Yaw(90.0)).unwrap();
//! tracker.apply(OrientationUpdate::Pitch(0.0)).unwrap();
//!
//! let events = tracker.apply(OrientationUpdate::Roll(0.0)).unwrap();
//! match events.last() {
//!     Some(OutputEvent::Message(msg)) => assert_eq!(msg.address, "/orientation"),
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod config;
pub mod dispatch;
pub mod flavour;
pub mod input;
pub mod output;
pub mod receiver;
pub mod rotation;
pub mod state;
pub mod types;

// Re-export main types at crate root
pub use config::{TrackerConfig, DEFAULT_CONFIG};
pub use dispatch::{process, Outputs, Tracker, UpdateError, MAX_EVENTS_PER_UPDATE};
pub use flavour::{format_messages, Flavour, FlavourMessages, EPSILON};
pub use input::{InputError, InputSource};
pub use output::{OutputError, OutputSink};
pub use receiver::{
    EulerInput, EulerOrder, InputKind, Inversions, OrientationReceiver, ReceivedOrientation,
};
pub use rotation::{deg_to_rad, to_quaternion, Converted, Quaternion};
pub use state::OrientationState;
pub use types::{Angles, OrientationUpdate, OutputEvent};

//! Head orientation to spatial-audio OSC bridge.
//!
//! Wires the platform-agnostic pieces of [`tracker_core`] to async I/O:
//!
//! - [`TrackerBridge`]: pulls updates from an [`InputSource`], runs them through
//!   a [`Tracker`](tracker_core::Tracker) and pushes events to an [`OutputSink`]
//! - [`LineInputSource`]: update lines over any `embedded_io_async::Read`,
//!   in the `U<field>:<value>*<checksum>` format of [`parse_update`]
//! - [`SharedTracker`]: a tracker several producers can feed concurrently

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod bridge;
pub mod input;
pub mod shared;

pub use bridge::{BridgeError, TrackerBridge};
pub use input::{
    calculate_checksum, parse_update, write_update, InputError, InputSource, LineInputSource,
    MAX_LINE_LENGTH,
};
pub use shared::SharedTracker;
pub use tracker_core::{OutputError, OutputSink};

pub use osc_proto;
pub use tracker_core;

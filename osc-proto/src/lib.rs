//! OSC message types, parsing, and serialization for head-tracker output.
//!
//! This crate provides the message layer shared by the orientation tracker and
//! anything that receives its output:
//!
//! - **Types**: Core data structures
//!   - [`OscArg`] - A numeric argument (`Int` or `Float`)
//!   - [`OscMessage`] - Address pattern plus ordered arguments
//!
//! - **Parsing**: Decode incoming packets
//!   - [`parse()`] - Parse a single OSC 1.0 message
//!
//! - **Serialization**: Encode outgoing packets
//!   - [`Serialize`] trait - Extension trait for serialization
//!
//! # Wire Format
//!
//! OSC 1.0 messages: a NUL-padded address, a NUL-padded type tag string
//! starting with `,`, then big-endian 32-bit arguments.
//!
//! ```text
//! /orientation\0\0\0\0 ,fff\0\0\0\0 <yaw:f32> <pitch:f32> <roll:f32>
//! ```
//!
//! # Examples
//!
//! ```
//! use osc_proto::{parse, OscArg, OscMessage, Serialize, MAX_PACKET_SIZE};
//!
//! let msg = OscMessage::new(
//!     "/orientation",
//!     [OscArg::Float(10.5), OscArg::Float(20.25), OscArg::Int(30)],
//! );
//!
//! let bytes = msg.serialize_to_vec::<MAX_PACKET_SIZE>().unwrap();
//! let decoded = parse(&bytes).unwrap();
//! assert_eq!(decoded, msg);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//! - **`embedded-io`**: Enable `serialize_io()` for I/O peripherals
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

mod fmt;
pub mod parser;
pub mod serialize;
pub mod types;

// Re-export types at crate root for convenience
pub use parser::{parse, ParseError};
pub use serialize::{Serialize, SerializeError, MAX_PACKET_SIZE};
pub use types::{OscArg, OscArgs, OscMessage, MAX_ADDRESS_LEN, MAX_ARGS};

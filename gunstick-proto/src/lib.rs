//! Record types and parsing for the gun joystick controller's serial protocol.
//!
//! The controller streams ASCII lines of semicolon-delimited fields. The first
//! field is a one-character tag:
//!
//! | Tag | Fields (in order) | Meaning |
//! |-----|-------------------|---------|
//! | `a` | y, x, z (floats)  | accelerometer sample |
//! | `j` | x, y (floats)     | joystick sample |
//! | `b` | state (`0`/`1`)   | fire button state |
//!
//! Note the accelerometer sends `y` before `x`.
//!
//! # Example
//!
//! ```
//! use gunstick_proto::{parse, ParseError, Record};
//!
//! match parse("b;1") {
//!     Ok(Record::Button(event)) => assert!(event.pressed),
//!     other => panic!("unexpected {other:?}"),
//! }
//!
//! // Malformed lines are reported, never panicked on
//! assert!(matches!(parse("j;1.0"), Err(ParseError::FieldCountMismatch { .. })));
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(any(feature = "std", test)), no_std)]

pub mod parser;
pub mod types;

pub use parser::{
    parse, parse_bytes, split, ParseError, RawRecord, MAX_FIELDS, MAX_LINE_LENGTH, SEPARATOR,
};
pub use types::{AccelerometerSample, ButtonEvent, JoystickSample, Record, RecordTag};

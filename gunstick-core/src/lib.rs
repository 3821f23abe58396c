//! Platform-agnostic decoding and signal conditioning for the gun joystick controller.
//!
//! This crate turns the controller's serial records into stable control values
//! without any platform-specific dependencies. It can be used both in embedded
//! `no_std` environments and on a host.
//!
//! # Overview
//!
//! - [`config`]: Conditioning settings ([`ConditioningConfig`], [`DeadZone`], [`AxisOption`])
//! - [`conditioner`]: Dead zone, normalization and inversion ([`condition`])
//! - [`state`]: Axis and button channels read by the host ([`AxisButtonState`])
//! - [`input`]: Line source trait ([`LineSource`])
//! - [`framer`]: Line assembly over an `embedded-io` reader ([`LineFramer`])
//! - [`session`]: Tick-driven poll loop ([`Session`])
//!
//! # Data flow
//!
//! ```text
//! LineSource -> parse -> accelerometer -> aim axes (unconditioned)
//!                     -> joystick      -> condition -> movement axes
//!                     -> button        -> fire button
//! ```
//!
//! # Known inconsistency
//!
//! Joystick samples get dead zone, normalization and inversion. Accelerometer
//! samples are written to the aim axes untouched, and their `z` component is
//! ignored.
//!
//! # Example
//!
//! ```
//! use gunstick_core::{
//!     ChannelNames, ConditioningConfig, DeadZone, LineResult, LineSource, Session, TickOutcome,
//!     TransportError,
//! };
//!
//! struct OneLine(Option<&'static [u8]>);
//!
//! impl LineSource for OneLine {
//!     fn read_line(&mut self) -> Result<LineResult<'_>, TransportError> {
//!         Ok(self.0.take().map_or(LineResult::Timeout, LineResult::Line))
//!     }
//!
//!     fn discard_input(&mut self) -> Result<(), TransportError> {
//!         Ok(())
//!     }
//! }
//!
//! let config = ConditioningConfig {
//!     dead_zone: DeadZone::uniform(0.1),
//!     normalize: true,
//!     ..Default::default()
//! };
//! let mut session = Session::new(OneLine(Some(b"j;1.0;0.05")), config, ChannelNames::default())?;
//!
//! assert_eq!(session.tick()?, TickOutcome::Updated);
//! assert_eq!(session.state().axis_by_name("Horizontal"), Some(1.0));
//! assert_eq!(session.state().axis_by_name("Vertical"), Some(0.0));
//! assert_eq!(session.tick()?, TickOutcome::NoData);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (`std::io::Error` readers)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//! - **`serde`**: Derive `Serialize`/`Deserialize` for configuration types
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(any(feature = "std", test)), no_std)]

pub mod conditioner;
pub mod config;
pub mod framer;
pub mod input;
pub mod session;
pub mod state;

// Re-export main types at crate root
pub use conditioner::{condition, condition_axis};
pub use config::{
    channel_name, AxisOption, ChannelName, ChannelNames, ConditioningConfig, ConfigError, DeadZone,
    MAX_CHANNEL_NAME,
};
pub use framer::LineFramer;
pub use input::{LineResult, LineSource, TransportError};
pub use session::{Session, TickOutcome};
pub use state::{AxisButtonState, ButtonEdge, Channel, ChannelSnapshot};

pub use gunstick_proto::{
    parse, parse_bytes, AccelerometerSample, ButtonEvent, JoystickSample, ParseError, Record,
    MAX_LINE_LENGTH,
};

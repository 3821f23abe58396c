//! Host binding for the gun joystick controller.
//!
//! Opens the controller's serial port, feeds it to a [`Session`] and exposes
//! the resulting channels. Decoding and conditioning live in [`gunstick_core`].
//!
//! ```no_run
//! use gunstick_serial::{port, Session, SessionConfig};
//!
//! let config = SessionConfig::load("gunstick.toml")?;
//! let source = port::open_line_source(&config.port)?;
//! let mut session = Session::new(source, config.conditioning, config.channels)?;
//! loop {
//!     session.tick()?;
//!     println!("{:?}", session.snapshot());
//! #   break;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod error;
pub mod port;

pub use config::{PortConfig, SessionConfig};
pub use error::{Error, Result};
pub use port::{open_line_source, SerialReader};

pub use gunstick_core::{
    AxisButtonState, AxisOption, Channel, ChannelNames, ChannelSnapshot, ConditioningConfig,
    DeadZone, LineFramer, Session, TickOutcome, TransportError,
};

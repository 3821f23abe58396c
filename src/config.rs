//! Session configuration loaded from TOML.
//!
//! ```toml
//! tick_interval_ms = 20
//!
//! [port]
//! name = "/dev/ttyUSB0"
//! baud_rate = 9600
//! read_timeout_ms = 1
//!
//! [conditioning]
//! normalize = true
//! invert_y = true
//! axes = "Both"
//! dead_zone = { x = 0.1, y = 0.1 }
//!
//! [channels]
//! fire = "Fire1"
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use gunstick_core::{ChannelNames, ConditioningConfig};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Serial port settings, handed to the transport as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortConfig {
    pub name: String,
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
    /// Short so that a tick never blocks for long
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
}

impl PortConfig {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            baud_rate: default_baud_rate(),
            read_timeout_ms: default_read_timeout_ms(),
        }
    }

    #[must_use]
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

/// Everything needed to run a session on the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub port: PortConfig,
    #[serde(default)]
    pub conditioning: ConditioningConfig,
    #[serde(default)]
    pub channels: ChannelNames,
    /// Fixed time step between ticks
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl SessionConfig {
    #[must_use]
    pub fn new(port: PortConfig) -> Self {
        Self {
            port,
            conditioning: ConditioningConfig::default(),
            channels: ChannelNames::default(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.conditioning.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

fn default_baud_rate() -> u32 {
    9600
}

fn default_read_timeout_ms() -> u64 {
    1
}

fn default_tick_interval_ms() -> u64 {
    20
}

//! Host-side error type.

use std::path::PathBuf;

use gunstick_core::{ConfigError, TransportError};

/// Errors raised while setting up or running a session on the host.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Config file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Config file is not valid TOML or has unexpected fields.
    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),
    /// Conditioning settings out of range.
    #[error("invalid conditioning settings: {0}")]
    Conditioning(#[from] ConfigError),
    /// Serial port could not be opened or configured.
    #[error("serial port {port}: {source}")]
    Serial {
        port: String,
        #[source]
        source: ::serial::Error,
    },
    /// Hard transport failure while ticking.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

pub type Result<T, E = Error> = core::result::Result<T, E>;

//! Serial port transport.
//!
//! [`open_line_source`] opens the configured port with the `serial` crate
//! (8 data bits, no parity, one stop bit, no flow control) and wraps it in a
//! [`LineFramer`]. The port's read timeout is what makes a tick return
//! `NoData` instead of blocking.

use std::io::{self, ErrorKind};
use std::time::Duration;

use gunstick_core::LineFramer;
use log::info;
use serial::prelude::*;

use crate::config::PortConfig;
use crate::error::{Error, Result};

/// Port whose read timeout can be changed between reads.
pub trait ReadTimeout {
    fn read_timeout(&self) -> Duration;
    fn set_read_timeout(&mut self, timeout: Duration) -> io::Result<()>;
}

impl ReadTimeout for serial::SystemPort {
    fn read_timeout(&self) -> Duration {
        serial::SerialPort::timeout(self)
    }

    fn set_read_timeout(&mut self, timeout: Duration) -> io::Result<()> {
        serial::SerialPort::set_timeout(self, timeout).map_err(io::Error::other)
    }
}

/// `embedded-io` reader over a `std::io::Read` port.
///
/// A serial port cannot report how many bytes it has buffered, so
/// `read_ready` reads one byte with a zero timeout and keeps it for the next
/// `read`. The configured timeout is restored afterwards.
pub struct SerialReader<P = serial::SystemPort> {
    port: P,
    peeked: Option<u8>,
}

impl<P> SerialReader<P> {
    pub fn new(port: P) -> Self {
        Self { port, peeked: None }
    }
}

impl<P> embedded_io::ErrorType for SerialReader<P> {
    type Error = io::Error;
}

impl<P: io::Read> embedded_io::Read for SerialReader<P> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, io::Error> {
        if buf.is_empty() {
            return Ok(0);
        }
        if let Some(byte) = self.peeked.take() {
            buf[0] = byte;
            return Ok(1);
        }
        match self.port.read(buf) {
            // No data before the timeout on a non-blocking port
            Err(e) if e.kind() == ErrorKind::WouldBlock => Err(ErrorKind::TimedOut.into()),
            other => other,
        }
    }
}

impl<P: io::Read + ReadTimeout> embedded_io::ReadReady for SerialReader<P> {
    fn read_ready(&mut self) -> Result<bool, io::Error> {
        if self.peeked.is_some() {
            return Ok(true);
        }

        let timeout = self.port.read_timeout();
        self.port.set_read_timeout(Duration::ZERO)?;
        let mut byte = [0u8; 1];
        let peek = self.port.read(&mut byte);
        self.port.set_read_timeout(timeout)?;

        match peek {
            Ok(0) => Ok(false),
            Ok(_) => {
                self.peeked = Some(byte[0]);
                Ok(true)
            }
            Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Open and configure the serial port named in `config`.
pub fn open_line_source(config: &PortConfig) -> Result<LineFramer<SerialReader>> {
    let serial_err = |source: serial::Error| Error::Serial {
        port: config.name.clone(),
        source,
    };

    let mut port = serial::open(&config.name).map_err(serial_err)?;
    port.reconfigure(&|settings| {
        settings.set_baud_rate(serial::BaudRate::from_speed(config.baud_rate as usize))?;
        settings.set_char_size(serial::Bits8);
        settings.set_parity(serial::ParityNone);
        settings.set_stop_bits(serial::Stop1);
        settings.set_flow_control(serial::FlowNone);
        Ok(())
    })
    .map_err(serial_err)?;
    port.set_timeout(config.read_timeout()).map_err(serial_err)?;

    info!(
        "opened {} at {} baud, read timeout {} ms",
        config.name, config.baud_rate, config.read_timeout_ms
    );
    Ok(LineFramer::new(SerialReader::new(port)))
}

//! Line framing over an `embedded-io` byte reader.
//!
//! [`LineFramer`] turns a byte stream with a read timeout (a serial port, a
//! UART peripheral, a test double) into a [`LineSource`]. Bytes are collected
//! one at a time until `\n`. A timeout in the middle of a line keeps what has
//! arrived so far, and the next call picks up where it left off.

use embedded_io::{Error as _, ErrorKind, Read, ReadReady};
use gunstick_proto::MAX_LINE_LENGTH;
use heapless::Vec;
use log::warn;

use crate::input::{LineResult, LineSource, TransportError};

/// Most bytes consumed by a single [`LineFramer::read_line`] call.
///
/// Bounds the call when the device streams without ever sending `\n`.
pub const READ_BUDGET: usize = 4 * MAX_LINE_LENGTH;

/// Most bytes drained by a single [`LineFramer::discard_input`] call.
pub const DISCARD_BUDGET: usize = 1024;

/// Assembles newline-terminated lines from a byte reader.
pub struct LineFramer<R> {
    reader: R,
    buffer: Vec<u8, MAX_LINE_LENGTH>,
    /// `buffer` holds a line already handed out
    complete: bool,
    /// Dropping the rest of an oversized line
    overflowed: bool,
    /// A `\r` arrived and is held back until we know it ends the line
    carriage_return: bool,
}

impl<R> LineFramer<R> {
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            complete: false,
            overflowed: false,
            carriage_return: false,
        }
    }

    /// Bytes of the line currently being assembled.
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        if self.complete {
            &[]
        } else {
            self.buffer.as_slice()
        }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    fn reset(&mut self) {
        self.buffer.clear();
        self.complete = false;
        self.overflowed = false;
        self.carriage_return = false;
    }

    /// Append a byte, switching to overflow mode when the line is too long.
    fn push(&mut self, byte: u8) {
        if self.buffer.push(byte).is_err() {
            warn!("dropping line longer than {} bytes", MAX_LINE_LENGTH);
            self.buffer.clear();
            self.overflowed = true;
        }
    }
}

impl<R: Read + ReadReady> LineFramer<R> {
    /// Read until a line is complete (`Ok(true)`) or the read times out (`Ok(false)`).
    fn fill(&mut self) -> Result<bool, TransportError> {
        if self.complete {
            self.buffer.clear();
            self.complete = false;
        }

        let mut byte = [0u8; 1];
        for _ in 0..READ_BUDGET {
            match self.reader.read(&mut byte) {
                Ok(0) => return Err(TransportError::Disconnected),
                Ok(_) => {}
                Err(e) => match e.kind() {
                    ErrorKind::TimedOut => return Ok(false),
                    ErrorKind::Interrupted => continue,
                    _ => return Err(TransportError::Io),
                },
            }

            if byte[0] == b'\n' {
                // `\r\n` terminator, the held `\r` is not part of the line
                self.carriage_return = false;
                if self.overflowed {
                    // End of the dropped line, start over
                    self.overflowed = false;
                    continue;
                }
                self.complete = true;
                return Ok(true);
            }

            if self.overflowed {
                continue;
            }

            if core::mem::take(&mut self.carriage_return) {
                self.push(b'\r');
                if self.overflowed {
                    continue;
                }
            }

            if byte[0] == b'\r' {
                self.carriage_return = true;
            } else {
                self.push(byte[0]);
            }
        }

        Ok(false)
    }
}

impl<R: Read + ReadReady> LineSource for LineFramer<R> {
    fn read_line(&mut self) -> Result<LineResult<'_>, TransportError> {
        if self.fill()? {
            Ok(LineResult::Line(self.buffer.as_slice()))
        } else {
            Ok(LineResult::Timeout)
        }
    }

    fn discard_input(&mut self) -> Result<(), TransportError> {
        self.reset();

        let mut scratch = [0u8; 32];
        let mut drained = 0;
        while drained < DISCARD_BUDGET {
            match self.reader.read_ready() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) if e.kind() == ErrorKind::TimedOut => break,
                Err(_) => return Err(TransportError::Io),
            }
            match self.reader.read(&mut scratch) {
                Ok(0) => return Err(TransportError::Disconnected),
                Ok(n) => drained += n,
                Err(e) if e.kind() == ErrorKind::TimedOut => break,
                Err(_) => return Err(TransportError::Io),
            }
        }
        Ok(())
    }
}

//! Line source trait and transport error types.

/// Outcome of one bounded read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum LineResult<'a> {
    /// A complete line, terminator removed.
    Line(&'a [u8]),
    /// The read window elapsed without a complete line. Routine, not an error.
    Timeout,
}

/// Hard transport failure.
///
/// Unlike [`LineResult::Timeout`] these are not expected during normal
/// operation. The host should stop ticking and decide whether to reconnect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Serial/communication I/O error.
    #[error("transport I/O error")]
    Io,
    /// The device went away (end of stream).
    #[error("device disconnected")]
    Disconnected,
}

/// Source of newline-terminated records from the controller.
///
/// Implementations apply their own read timeout so that [`read_line`] never
/// blocks for longer than the configured window.
///
/// [`read_line`]: LineSource::read_line
pub trait LineSource {
    /// Read one complete line, or report that none arrived in time.
    fn read_line(&mut self) -> Result<LineResult<'_>, TransportError>;

    /// Drop any buffered input so the next read starts on a fresh record.
    fn discard_input(&mut self) -> Result<(), TransportError>;
}

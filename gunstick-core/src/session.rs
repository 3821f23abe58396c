//! Session: owns the line source and channel state, driven one tick at a time.

use gunstick_proto::{parse_bytes, JoystickSample, Record};
use log::{debug, trace};

use crate::conditioner::condition;
use crate::config::{ChannelNames, ConditioningConfig, ConfigError};
use crate::input::{LineResult, LineSource, TransportError};
use crate::state::{AxisButtonState, Channel, ChannelSnapshot};

/// What a single [`Session::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use]
pub enum TickOutcome {
    /// A record was applied to the channel state.
    Updated,
    /// No complete line arrived within the read timeout.
    NoData,
    /// A line arrived but changed nothing (malformed, unknown tag, or dropped).
    Skipped,
}

/// Re-entrancy flag for joystick processing.
#[derive(Debug, Default)]
struct SingleFlight {
    busy: bool,
}

impl SingleFlight {
    /// Claim the flag. Returns `false` if it is already held.
    #[inline]
    fn try_enter(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        true
    }

    #[inline]
    fn exit(&mut self) {
        self.busy = false;
    }
}

/// A decoding session for one controller.
///
/// Call [`tick`](Session::tick) once per fixed time step. Between ticks the
/// host reads channel values through [`state`](Session::state).
pub struct Session<L> {
    source: L,
    config: ConditioningConfig,
    state: AxisButtonState,
    joystick_guard: SingleFlight,
}

impl<L: LineSource> Session<L> {
    /// Create a session. Fails if `config` is out of range.
    pub fn new(
        source: L,
        config: ConditioningConfig,
        names: ChannelNames,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            source,
            state: AxisButtonState::new(config.axes, names),
            config,
            joystick_guard: SingleFlight::default(),
        })
    }

    /// Read at most one line and apply it.
    ///
    /// Timeouts and bad lines are ordinary outcomes. `Err` means the transport
    /// itself failed, and the host should stop ticking.
    pub fn tick(&mut self) -> Result<TickOutcome, TransportError> {
        self.state.begin_tick();

        let record = match self.source.read_line()? {
            LineResult::Timeout => {
                trace!("no data");
                return Ok(TickOutcome::NoData);
            }
            LineResult::Line(line) => match parse_bytes(line) {
                Ok(record) => record,
                Err(e) => {
                    debug!("skipping line: {}", e);
                    return Ok(TickOutcome::Skipped);
                }
            },
        };

        let outcome = self.apply(record);
        // Start the next tick on a record boundary
        self.source.discard_input()?;
        Ok(outcome)
    }

    fn apply(&mut self, record: Record) -> TickOutcome {
        match record {
            Record::Accelerometer(sample) => {
                // Aim axes take the sample as-is, z is unused
                self.state.update_axis(Channel::AimHorizontal, sample.x);
                self.state.update_axis(Channel::AimVertical, sample.y);
                trace!("applied {}", record);
                TickOutcome::Updated
            }
            Record::Joystick(sample) => self.process_joystick(sample),
            Record::Button(event) => {
                if let Some(edge) = self.state.update_button(event.pressed) {
                    debug!("fire button {:?}", edge);
                }
                TickOutcome::Updated
            }
            Record::Unknown => {
                trace!("ignoring record with unknown tag");
                TickOutcome::Skipped
            }
        }
    }

    fn process_joystick(&mut self, sample: JoystickSample) -> TickOutcome {
        if !self.joystick_guard.try_enter() {
            debug!("joystick record dropped, previous one still in flight");
            return TickOutcome::Skipped;
        }

        let (x, y) = condition(sample, &self.config);
        self.state.update_axis(Channel::Horizontal, x);
        self.state.update_axis(Channel::Vertical, y);
        trace!("joystick ({}, {}) -> ({}, {})", sample.x, sample.y, x, y);

        self.joystick_guard.exit();
        TickOutcome::Updated
    }
}

impl<L> Session<L> {
    #[inline]
    #[must_use]
    pub fn state(&self) -> &AxisButtonState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> ChannelSnapshot {
        self.state.snapshot()
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &ConditioningConfig {
        &self.config
    }

    pub fn source(&self) -> &L {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut L {
        &mut self.source
    }

    /// Decompose the session into its line source and final channel state.
    pub fn into_parts(self) -> (L, AxisButtonState) {
        (self.source, self.state)
    }
}

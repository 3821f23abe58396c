//! Record types: RecordTag, samples, ButtonEvent and the decoded Record.

use core::fmt;

/// Tag character at the start of every record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordTag {
    /// `a` - accelerometer sample
    Accelerometer,
    /// `j` - joystick sample
    Joystick,
    /// `b` - fire button state
    Button,
    /// Anything else. Not an error, the record is ignored by the caller.
    Unknown,
}

impl RecordTag {
    /// Map the first field of a record to its tag.
    #[inline]
    #[must_use]
    pub fn from_field(field: &str) -> Self {
        match field {
            "a" => Self::Accelerometer,
            "j" => Self::Joystick,
            "b" => Self::Button,
            _ => Self::Unknown,
        }
    }

    /// Number of fields (tag included) a record with this tag must carry.
    ///
    /// `None` for [`RecordTag::Unknown`], whose fields are never inspected.
    #[inline]
    #[must_use]
    pub const fn field_count(self) -> Option<usize> {
        match self {
            Self::Accelerometer => Some(4),
            Self::Joystick => Some(3),
            Self::Button => Some(2),
            Self::Unknown => None,
        }
    }
}

/// Accelerometer reading.
///
/// The device sends `a;y;x;z`, so the first number on the wire lands in `y`
/// and the second in `x`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelerometerSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Raw joystick position, in whatever range the device reports.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickSample {
    pub x: f32,
    pub y: f32,
}

impl JoystickSample {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const CENTERED: Self = Self { x: 0.0, y: 0.0 };
}

/// Fire button state carried by a `b` record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvent {
    pub pressed: bool,
}

/// A fully decoded record.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use]
pub enum Record {
    Accelerometer(AccelerometerSample),
    Joystick(JoystickSample),
    Button(ButtonEvent),
    /// Record with an unrecognised tag
    Unknown,
}

/// Writes the record in wire order, without the line terminator.
///
/// [`Record::Unknown`] has no wire form and writes `?`.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accelerometer(s) => write!(f, "a;{};{};{}", s.y, s.x, s.z),
            Self::Joystick(s) => write!(f, "j;{};{}", s.x, s.y),
            Self::Button(b) => write!(f, "b;{}", u8::from(b.pressed)),
            Self::Unknown => f.write_str("?"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::string::ToString;

    use super::*;

    #[test]
    fn test_tag_from_field() {
        assert_eq!(RecordTag::from_field("a"), RecordTag::Accelerometer);
        assert_eq!(RecordTag::from_field("j"), RecordTag::Joystick);
        assert_eq!(RecordTag::from_field("b"), RecordTag::Button);
        assert_eq!(RecordTag::from_field("x"), RecordTag::Unknown);
        assert_eq!(RecordTag::from_field(""), RecordTag::Unknown);
        // Tags are case sensitive
        assert_eq!(RecordTag::from_field("J"), RecordTag::Unknown);
    }

    #[test]
    fn test_display_uses_wire_order() {
        let accel = Record::Accelerometer(AccelerometerSample {
            x: 2.0,
            y: 1.0,
            z: 3.0,
        });
        assert_eq!(accel.to_string(), "a;1;2;3");

        let stick = Record::Joystick(JoystickSample::new(0.5, -0.25));
        assert_eq!(stick.to_string(), "j;0.5;-0.25");

        assert_eq!(Record::Button(ButtonEvent { pressed: true }).to_string(), "b;1");
        assert_eq!(Record::Button(ButtonEvent { pressed: false }).to_string(), "b;0");
    }
}

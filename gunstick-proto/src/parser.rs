//! Record parser for the controller's serial protocol.
//!
//! Each line is a tag followed by numeric fields, separated by `;`:
//! - Accelerometer: `a;<y>;<x>;<z>`
//! - Joystick: `j;<x>;<y>`
//! - Button: `b;<state>`
//!
//! Parsing happens in two stages. [`split`] cuts the line into a [`RawRecord`]
//! of borrowed fields, [`RawRecord::decode`] checks the field count for the tag
//! and converts the numbers. [`parse`] runs both.

use heapless::Vec;

use crate::types::{AccelerometerSample, ButtonEvent, JoystickSample, Record, RecordTag};

/// Maximum line length accepted from the transport (`\n` or `\r\n` terminator excluded).
pub const MAX_LINE_LENGTH: usize = 64;

/// Maximum number of fields (tag included) kept by [`split`].
pub const MAX_FIELDS: usize = 8;

/// Field separator.
pub const SEPARATOR: char = ';';

/// Reasons a line is rejected.
///
/// None of these are fatal. The caller drops the line and reads the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Wrong number of fields for the record's tag.
    #[error("expected {expected} fields, found {found}")]
    FieldCountMismatch { expected: usize, found: usize },
    /// A numeric field did not parse, or is not a finite number.
    #[error("field {index} is not a valid number")]
    NumericFormat { index: usize },
    /// Line bytes are not valid UTF-8.
    #[error("line is not valid UTF-8")]
    Encoding,
}

/// A line cut into its tag and fields, before any numeric conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord<'a> {
    pub tag: RecordTag,
    /// All fields in wire order, tag field included.
    pub fields: Vec<&'a str, MAX_FIELDS>,
}

impl RawRecord<'_> {
    /// Check the field count for the tag and convert the numeric fields.
    pub fn decode(&self) -> Result<Record, ParseError> {
        let Some(expected) = self.tag.field_count() else {
            return Ok(Record::Unknown);
        };

        if self.fields.len() != expected {
            return Err(ParseError::FieldCountMismatch {
                expected,
                found: self.fields.len(),
            });
        }

        Ok(match self.tag {
            RecordTag::Accelerometer => {
                // Wire order is y, x, z
                let y = self.float(1)?;
                let x = self.float(2)?;
                let z = self.float(3)?;
                Record::Accelerometer(AccelerometerSample { x, y, z })
            }
            RecordTag::Joystick => Record::Joystick(JoystickSample {
                x: self.float(1)?,
                y: self.float(2)?,
            }),
            RecordTag::Button => Record::Button(ButtonEvent {
                pressed: parse_button(self.fields[1], 1)?,
            }),
            RecordTag::Unknown => Record::Unknown,
        })
    }

    #[inline]
    fn float(&self, index: usize) -> Result<f32, ParseError> {
        parse_f32(self.fields[index], index)
    }
}

/// Cut a line into a [`RawRecord`].
///
/// Fails only when the line has more than [`MAX_FIELDS`] fields.
pub fn split(line: &str) -> Result<RawRecord<'_>, ParseError> {
    let mut fields = Vec::new();
    let mut found = 0;

    for field in line.split(SEPARATOR) {
        found += 1;
        // Keep counting past the bound so the error reports the real count
        let _ = fields.push(field);
    }

    if found > MAX_FIELDS {
        return Err(ParseError::FieldCountMismatch {
            expected: MAX_FIELDS,
            found,
        });
    }

    let tag = RecordTag::from_field(fields.first().map_or("", |f| f.trim()));
    Ok(RawRecord { tag, fields })
}

/// Parse one line (terminator already removed) into a [`Record`].
///
/// # Example
///
/// ```
/// use gunstick_proto::{parse, JoystickSample, Record};
///
/// let record = parse("j;0.5;-1.0").unwrap();
/// assert_eq!(record, Record::Joystick(JoystickSample::new(0.5, -1.0)));
/// ```
#[inline]
pub fn parse(line: &str) -> Result<Record, ParseError> {
    split(line)?.decode()
}

/// Parse the raw bytes of one line as delivered by a transport.
///
/// A trailing `\n`, `\r\n` or `\r` is ignored.
pub fn parse_bytes(line: &[u8]) -> Result<Record, ParseError> {
    let line = strip_line_ending(line);
    let line = core::str::from_utf8(line).map_err(|_| ParseError::Encoding)?;
    parse(line)
}

/// Strip trailing CR and/or LF from a line.
#[inline]
fn strip_line_ending(line: &[u8]) -> &[u8] {
    let mut end = line.len();
    if end > 0 && line[end - 1] == b'\n' {
        end -= 1;
    }
    if end > 0 && line[end - 1] == b'\r' {
        end -= 1;
    }
    &line[..end]
}

/// Parse a finite float, ignoring surrounding whitespace.
#[inline]
fn parse_f32(field: &str, index: usize) -> Result<f32, ParseError> {
    match field.trim().parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ParseError::NumericFormat { index }),
    }
}

/// Parse the button state. `1` is pressed, any other integer is released.
#[inline]
fn parse_button(field: &str, index: usize) -> Result<bool, ParseError> {
    field
        .trim()
        .parse::<i32>()
        .map(|state| state == 1)
        .map_err(|_| ParseError::NumericFormat { index })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_parse_joystick() {
        assert_eq!(
            parse("j;0.25;-0.75"),
            Ok(Record::Joystick(JoystickSample::new(0.25, -0.75)))
        );
    }

    #[test]
    fn test_parse_accelerometer_wire_order() {
        // a;y;x;z
        let record = parse("a;1.0;2.0;3.0").unwrap();
        assert_eq!(
            record,
            Record::Accelerometer(AccelerometerSample {
                x: 2.0,
                y: 1.0,
                z: 3.0
            })
        );
    }

    #[test]
    fn test_parse_button_states() {
        assert_eq!(parse("b;1"), Ok(Record::Button(ButtonEvent { pressed: true })));
        assert_eq!(parse("b;0"), Ok(Record::Button(ButtonEvent { pressed: false })));
        // Only 1 counts as pressed
        assert_eq!(parse("b;2"), Ok(Record::Button(ButtonEvent { pressed: false })));
        assert_eq!(parse("b;-1"), Ok(Record::Button(ButtonEvent { pressed: false })));
    }

    #[test]
    fn test_unknown_tag_is_not_an_error() {
        assert_eq!(parse("x;garbage"), Ok(Record::Unknown));
        assert_eq!(parse(""), Ok(Record::Unknown));
        assert_eq!(parse("hello"), Ok(Record::Unknown));
    }

    #[rstest]
    #[case("j;1.0", 3, 2)]
    #[case("j;1.0;2.0;3.0", 3, 4)]
    #[case("j", 3, 1)]
    #[case("a;1.0;2.0", 4, 3)]
    #[case("a;1.0;2.0;3.0;4.0", 4, 5)]
    #[case("b", 2, 1)]
    #[case("b;1;1", 2, 3)]
    fn test_field_count_mismatch(
        #[case] line: &str,
        #[case] expected: usize,
        #[case] found: usize,
    ) {
        assert_eq!(
            parse(line),
            Err(ParseError::FieldCountMismatch { expected, found })
        );
    }

    #[rstest]
    #[case("j;abc;0.0", 1)]
    #[case("j;0.0;", 2)]
    #[case("j;0.0;1.0.0", 2)]
    #[case("a;1.0;x;3.0", 2)]
    #[case("a;1.0;2.0;NaN", 3)]
    #[case("j;inf;0.0", 1)]
    #[case("b;yes", 1)]
    #[case("b;1.0", 1)]
    #[case("b;", 1)]
    fn test_numeric_format(#[case] line: &str, #[case] index: usize) {
        assert_eq!(parse(line), Err(ParseError::NumericFormat { index }));
    }

    #[test]
    fn test_too_many_fields_for_split() {
        assert_eq!(
            split("j;1;2;3;4;5;6;7;8"),
            Err(ParseError::FieldCountMismatch {
                expected: MAX_FIELDS,
                found: 9
            })
        );
    }

    #[test]
    fn test_split_keeps_fields_in_order() {
        let raw = split("a;1;2;3").unwrap();
        assert_eq!(raw.tag, RecordTag::Accelerometer);
        assert_eq!(raw.fields.as_slice(), &["a", "1", "2", "3"]);
    }

    #[test]
    fn test_whitespace_around_fields() {
        assert_eq!(
            parse("j; 0.5 ;-0.5\r"),
            Ok(Record::Joystick(JoystickSample::new(0.5, -0.5)))
        );
        assert_eq!(parse("b; 1 "), Ok(Record::Button(ButtonEvent { pressed: true })));
    }

    #[test]
    fn test_parse_bytes_strips_line_ending() {
        let expected = Ok(Record::Joystick(JoystickSample::new(1.0, 0.0)));
        assert_eq!(parse_bytes(b"j;1;0\n"), expected);
        assert_eq!(parse_bytes(b"j;1;0\r\n"), expected);
        assert_eq!(parse_bytes(b"j;1;0\r"), expected);
        assert_eq!(parse_bytes(b"j;1;0"), expected);
    }

    #[test]
    fn test_parse_bytes_invalid_utf8() {
        assert_eq!(parse_bytes(b"j;\xff;0\n"), Err(ParseError::Encoding));
    }
}

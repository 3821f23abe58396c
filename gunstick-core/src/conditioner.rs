//! Joystick signal conditioning: dead zone, normalization, inversion.
//!
//! The steps always run in that order.
//!
//! Accelerometer samples never pass through here.

use gunstick_proto::JoystickSample;

use crate::config::ConditioningConfig;

/// Condition a joystick sample, returning `(x, y)`.
///
/// Each axis uses its own dead zone and invert flag.
#[must_use]
pub fn condition(raw: JoystickSample, config: &ConditioningConfig) -> (f32, f32) {
    let x = condition_axis(raw.x, config.dead_zone.x, config.normalize, config.invert_x);
    let y = condition_axis(raw.y, config.dead_zone.y, config.normalize, config.invert_y);
    (x, y)
}

/// Condition a single axis value.
///
/// - `|value| < dead_zone` gives exactly `0.0`.
/// - With `normalize`, the result is `sign(value) * (|value| - dead_zone) / (1 - dead_zone)`.
///   Without it the value passes through unscaled and unclamped.
/// - `invert` negates the result.
#[inline]
#[must_use]
pub fn condition_axis(value: f32, dead_zone: f32, normalize: bool, invert: bool) -> f32 {
    let magnitude = abs(value);

    let conditioned = if magnitude < dead_zone {
        0.0
    } else if normalize {
        sign(value) * (magnitude - dead_zone) / (1.0 - dead_zone)
    } else {
        value
    };

    if invert {
        -conditioned
    } else {
        conditioned
    }
}

#[inline]
fn abs(value: f32) -> f32 {
    if value < 0.0 {
        -value
    } else {
        value
    }
}

/// `+1` for zero and positive values (including `-0.0`), `-1` otherwise.
#[inline]
fn sign(value: f32) -> f32 {
    if value < 0.0 {
        -1.0
    } else {
        1.0
    }
}

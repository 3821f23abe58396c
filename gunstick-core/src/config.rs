//! Conditioning configuration and host-facing channel names.
//!
//! Both are fixed for the lifetime of a [`Session`](crate::Session).

use heapless::String;

/// Maximum length of a channel name.
pub const MAX_CHANNEL_NAME: usize = 32;

/// Channel name as registered with the host.
pub type ChannelName = String<MAX_CHANNEL_NAME>;

/// Which joystick axes the session drives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisOption {
    /// Drive both horizontal and vertical
    #[default]
    Both,
    /// Drive the horizontal axis only
    OnlyHorizontal,
    /// Drive the vertical axis only
    OnlyVertical,
}

impl AxisOption {
    #[inline]
    #[must_use]
    pub const fn uses_horizontal(self) -> bool {
        matches!(self, Self::Both | Self::OnlyHorizontal)
    }

    #[inline]
    #[must_use]
    pub const fn uses_vertical(self) -> bool {
        matches!(self, Self::Both | Self::OnlyVertical)
    }
}

/// Per-axis dead zone. Inputs with a smaller magnitude report as centered.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeadZone {
    pub x: f32,
    pub y: f32,
}

impl DeadZone {
    pub const NONE: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Same threshold on both axes.
    #[must_use]
    pub const fn uniform(threshold: f32) -> Self {
        Self {
            x: threshold,
            y: threshold,
        }
    }
}

/// Joystick conditioning settings.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConditioningConfig {
    pub dead_zone: DeadZone,
    /// Rescale so the dead-zone edge maps to 0 and full deflection to 1
    pub normalize: bool,
    pub invert_x: bool,
    pub invert_y: bool,
    pub axes: AxisOption,
}

impl ConditioningConfig {
    /// Check the dead zones are finite and in `[0, 1)`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !dead_zone_in_range(self.dead_zone.x) {
            return Err(ConfigError::HorizontalDeadZone);
        }
        if !dead_zone_in_range(self.dead_zone.y) {
            return Err(ConfigError::VerticalDeadZone);
        }
        Ok(())
    }
}

#[inline]
fn dead_zone_in_range(threshold: f32) -> bool {
    // NaN fails both comparisons
    threshold >= 0.0 && threshold < 1.0
}

/// Names the host uses to look channels up.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChannelNames {
    pub horizontal: ChannelName,
    pub vertical: ChannelName,
    pub aim_horizontal: ChannelName,
    pub aim_vertical: ChannelName,
    pub fire: ChannelName,
}

impl Default for ChannelNames {
    fn default() -> Self {
        Self {
            horizontal: channel_name("Horizontal"),
            vertical: channel_name("Vertical"),
            aim_horizontal: channel_name("HorizontalAim"),
            aim_vertical: channel_name("VerticalAim"),
            fire: channel_name("Fire1"),
        }
    }
}

/// Build a [`ChannelName`], truncating names longer than [`MAX_CHANNEL_NAME`].
#[must_use]
pub fn channel_name(name: &str) -> ChannelName {
    let mut out = ChannelName::new();
    for c in name.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Configuration rejected at session construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    #[error("horizontal dead zone must be in [0, 1)")]
    HorizontalDeadZone,
    #[error("vertical dead zone must be in [0, 1)")]
    VerticalDeadZone,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_option_selection() {
        assert!(AxisOption::Both.uses_horizontal());
        assert!(AxisOption::Both.uses_vertical());
        assert!(AxisOption::OnlyHorizontal.uses_horizontal());
        assert!(!AxisOption::OnlyHorizontal.uses_vertical());
        assert!(!AxisOption::OnlyVertical.uses_horizontal());
        assert!(AxisOption::OnlyVertical.uses_vertical());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = ConditioningConfig::default();
        assert_eq!(config.dead_zone, DeadZone::NONE);
        assert!(!config.normalize);
        assert_eq!(config.axes, AxisOption::Both);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_dead_zone_bounds() {
        let mut config = ConditioningConfig {
            dead_zone: DeadZone::new(0.999, 0.0),
            ..Default::default()
        };
        assert_eq!(config.validate(), Ok(()));

        config.dead_zone = DeadZone::new(1.0, 0.0);
        assert_eq!(config.validate(), Err(ConfigError::HorizontalDeadZone));

        config.dead_zone = DeadZone::new(-0.1, 0.0);
        assert_eq!(config.validate(), Err(ConfigError::HorizontalDeadZone));

        config.dead_zone = DeadZone::new(0.2, f32::NAN);
        assert_eq!(config.validate(), Err(ConfigError::VerticalDeadZone));
    }

    #[test]
    fn test_default_channel_names() {
        let names = ChannelNames::default();
        assert_eq!(names.horizontal.as_str(), "Horizontal");
        assert_eq!(names.vertical.as_str(), "Vertical");
        assert_eq!(names.aim_horizontal.as_str(), "HorizontalAim");
        assert_eq!(names.aim_vertical.as_str(), "VerticalAim");
        assert_eq!(names.fire.as_str(), "Fire1");
    }

    #[test]
    fn test_channel_name_truncates() {
        let long = "abcdefghijklmnopqrstuvwxyz0123456789";
        let name = channel_name(long);
        assert_eq!(name.len(), MAX_CHANNEL_NAME);
        assert!(long.starts_with(name.as_str()));
    }
}

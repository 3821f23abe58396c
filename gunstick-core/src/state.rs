//! Axis and button channels exposed to the host.

use crate::config::{AxisOption, ChannelNames};

/// Logical axis channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    Horizontal,
    Vertical,
    AimHorizontal,
    AimVertical,
}

impl Channel {
    pub const ALL: [Self; 4] = [
        Self::Horizontal,
        Self::Vertical,
        Self::AimHorizontal,
        Self::AimVertical,
    ];

    #[inline]
    const fn index(self) -> usize {
        match self {
            Self::Horizontal => 0,
            Self::Vertical => 1,
            Self::AimHorizontal => 2,
            Self::AimVertical => 3,
        }
    }
}

/// Button transition produced by a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEdge {
    Pressed,
    Released,
}

/// Copy of every channel value at one point in time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelSnapshot {
    pub horizontal: f32,
    pub vertical: f32,
    pub aim_horizontal: f32,
    pub aim_vertical: f32,
    pub fire: bool,
}

/// Latest conditioned axis values and the fire button state.
///
/// Values persist until overwritten. Joystick axes excluded by the
/// [`AxisOption`] are never written and stay at `0.0`.
#[derive(Clone, Debug)]
pub struct AxisButtonState {
    axes: [f32; 4],
    axis_option: AxisOption,
    fire: bool,
    edge: Option<ButtonEdge>,
    names: ChannelNames,
}

impl AxisButtonState {
    #[must_use]
    pub fn new(axis_option: AxisOption, names: ChannelNames) -> Self {
        Self {
            axes: [0.0; 4],
            axis_option,
            fire: false,
            edge: None,
            names,
        }
    }

    /// Whether `channel` is driven by this session.
    ///
    /// Aim axes are always enabled.
    #[inline]
    #[must_use]
    pub const fn is_enabled(&self, channel: Channel) -> bool {
        match channel {
            Channel::Horizontal => self.axis_option.uses_horizontal(),
            Channel::Vertical => self.axis_option.uses_vertical(),
            Channel::AimHorizontal | Channel::AimVertical => true,
        }
    }

    /// Write an axis value. No-op for a disabled channel.
    #[inline]
    pub fn update_axis(&mut self, channel: Channel, value: f32) {
        if self.is_enabled(channel) {
            self.axes[channel.index()] = value;
        }
    }

    /// Set the fire button. Each call is taken as ground truth, with no debouncing.
    ///
    /// Returns the edge when the state actually changed.
    pub fn update_button(&mut self, pressed: bool) -> Option<ButtonEdge> {
        if pressed == self.fire {
            return None;
        }
        self.fire = pressed;
        let edge = if pressed {
            ButtonEdge::Pressed
        } else {
            ButtonEdge::Released
        };
        self.edge = Some(edge);
        Some(edge)
    }

    #[inline]
    #[must_use]
    pub fn read(&self, channel: Channel) -> f32 {
        self.axes[channel.index()]
    }

    #[inline]
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.fire
    }

    /// The button went down during the last tick.
    #[inline]
    #[must_use]
    pub fn just_pressed(&self) -> bool {
        self.edge == Some(ButtonEdge::Pressed)
    }

    /// The button went up during the last tick.
    #[inline]
    #[must_use]
    pub fn just_released(&self) -> bool {
        self.edge == Some(ButtonEdge::Released)
    }

    /// Forget the previous tick's button edge.
    #[inline]
    pub(crate) fn begin_tick(&mut self) {
        self.edge = None;
    }

    /// Look an axis up by its host name.
    ///
    /// Disabled joystick axes are not registered and return `None`.
    #[must_use]
    pub fn axis_by_name(&self, name: &str) -> Option<f32> {
        Channel::ALL
            .into_iter()
            .find(|&channel| self.is_enabled(channel) && self.name_of(channel) == name)
            .map(|channel| self.read(channel))
    }

    /// Look the fire button up by its host name.
    #[must_use]
    pub fn button_by_name(&self, name: &str) -> Option<bool> {
        (self.names.fire.as_str() == name).then_some(self.fire)
    }

    /// Host name of an axis channel.
    #[must_use]
    pub fn name_of(&self, channel: Channel) -> &str {
        match channel {
            Channel::Horizontal => self.names.horizontal.as_str(),
            Channel::Vertical => self.names.vertical.as_str(),
            Channel::AimHorizontal => self.names.aim_horizontal.as_str(),
            Channel::AimVertical => self.names.aim_vertical.as_str(),
        }
    }

    #[must_use]
    pub fn names(&self) -> &ChannelNames {
        &self.names
    }

    #[must_use]
    pub fn snapshot(&self) -> ChannelSnapshot {
        ChannelSnapshot {
            horizontal: self.read(Channel::Horizontal),
            vertical: self.read(Channel::Vertical),
            aim_horizontal: self.read(Channel::AimHorizontal),
            aim_vertical: self.read(Channel::AimVertical),
            fire: self.fire,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::channel_name;

    fn state(axis_option: AxisOption) -> AxisButtonState {
        AxisButtonState::new(axis_option, ChannelNames::default())
    }

    #[test]
    fn test_new_state_is_neutral() {
        let state = state(AxisOption::Both);
        assert_eq!(state.snapshot(), ChannelSnapshot::default());
        assert!(!state.is_pressed());
        assert!(!state.just_pressed());
        assert!(!state.just_released());
    }

    #[test]
    fn test_update_axis_all_channels() {
        let mut state = state(AxisOption::Both);
        state.update_axis(Channel::Horizontal, 0.5);
        state.update_axis(Channel::Vertical, -0.5);
        state.update_axis(Channel::AimHorizontal, 200.0);
        state.update_axis(Channel::AimVertical, -100.0);

        assert_eq!(
            state.snapshot(),
            ChannelSnapshot {
                horizontal: 0.5,
                vertical: -0.5,
                aim_horizontal: 200.0,
                aim_vertical: -100.0,
                fire: false,
            }
        );
    }

    #[test]
    fn test_only_horizontal_ignores_vertical() {
        let mut state = state(AxisOption::OnlyHorizontal);
        state.update_axis(Channel::Horizontal, 1.0);
        state.update_axis(Channel::Vertical, 1.0);
        assert_eq!(state.read(Channel::Horizontal), 1.0);
        assert_eq!(state.read(Channel::Vertical), 0.0);
    }

    #[test]
    fn test_only_vertical_ignores_horizontal() {
        let mut state = state(AxisOption::OnlyVertical);
        state.update_axis(Channel::Horizontal, 1.0);
        state.update_axis(Channel::Vertical, -1.0);
        assert_eq!(state.read(Channel::Horizontal), 0.0);
        assert_eq!(state.read(Channel::Vertical), -1.0);
        // Aim axes are unaffected by the axis option
        state.update_axis(Channel::AimHorizontal, 3.0);
        assert_eq!(state.read(Channel::AimHorizontal), 3.0);
    }

    #[test]
    fn test_button_edges() {
        let mut state = state(AxisOption::Both);

        assert_eq!(state.update_button(true), Some(ButtonEdge::Pressed));
        assert!(state.is_pressed());
        assert!(state.just_pressed());

        state.begin_tick();
        // Same state again is not a new edge
        assert_eq!(state.update_button(true), None);
        assert!(state.is_pressed());
        assert!(!state.just_pressed());

        state.begin_tick();
        assert_eq!(state.update_button(false), Some(ButtonEdge::Released));
        assert!(!state.is_pressed());
        assert!(state.just_released());

        state.begin_tick();
        assert!(!state.just_released());
    }

    #[test]
    fn test_lookup_by_name() {
        let mut state = state(AxisOption::Both);
        state.update_axis(Channel::Vertical, 0.25);
        state.update_button(true);

        assert_eq!(state.axis_by_name("Vertical"), Some(0.25));
        assert_eq!(state.axis_by_name("HorizontalAim"), Some(0.0));
        assert_eq!(state.axis_by_name("Nope"), None);
        assert_eq!(state.button_by_name("Fire1"), Some(true));
        assert_eq!(state.button_by_name("Fire2"), None);
    }

    #[test]
    fn test_disabled_axis_is_not_registered() {
        let state = state(AxisOption::OnlyVertical);
        assert_eq!(state.axis_by_name("Horizontal"), None);
        assert_eq!(state.axis_by_name("Vertical"), Some(0.0));
    }

    #[test]
    fn test_custom_names() {
        let names = ChannelNames {
            horizontal: channel_name("MoveX"),
            fire: channel_name("Trigger"),
            ..ChannelNames::default()
        };
        let mut state = AxisButtonState::new(AxisOption::Both, names);
        state.update_axis(Channel::Horizontal, -1.0);

        assert_eq!(state.name_of(Channel::Horizontal), "MoveX");
        assert_eq!(state.axis_by_name("MoveX"), Some(-1.0));
        assert_eq!(state.axis_by_name("Horizontal"), None);
        assert_eq!(state.button_by_name("Trigger"), Some(false));
    }
}

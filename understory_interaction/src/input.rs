// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decoding raw device state into [`ActionEvent`]s.
//!
//! The interaction context never looks at keys, buttons or axes. Platform code
//! fills a [`DeviceState`] each frame, and an [`ActionMap`] turns it into
//! device-agnostic action events with press and release edges.
//!
//! ```
//! use understory_interaction::input::{ActionMap, AxisDirection, AxisId, DeviceState, InputSource, KeyCode};
//! use understory_interaction::types::ActionState;
//!
//! #[derive(Copy, Clone, Debug, PartialEq, Eq)]
//! enum Action { Next, Confirm }
//!
//! let mut map = ActionMap::with_dead_zone(0.25);
//! map.bind(Action::Next, InputSource::Key(KeyCode(9)));
//! map.bind(Action::Next, InputSource::Axis { axis: AxisId(0), direction: AxisDirection::Positive });
//! map.bind(Action::Confirm, InputSource::Key(KeyCode(13)));
//!
//! let mut device = DeviceState::default();
//! device.set_axis(AxisId(0), 0.8);
//! let events = map.decode(&device);
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].action, Action::Next);
//! assert!(events[0].state.contains(ActionState::PRESSED));
//!
//! // Still deflected: held, no new press.
//! let events = map.decode(&device);
//! assert_eq!(events[0].state, ActionState::HELD);
//! ```

use alloc::vec::Vec;

use crate::types::{ActionEvent, ActionState, InputMedium};

/// Platform key code.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(pub u32);

/// Platform button code (mouse or controller).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ButtonCode(pub u32);

/// Analog axis index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AxisId(pub u8);

/// Half of an analog axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AxisDirection {
    /// Values above zero.
    Positive,
    /// Values below zero.
    Negative,
}

/// A physical input that can drive an action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InputSource {
    /// A keyboard key.
    Key(KeyCode),
    /// One direction of an analog axis.
    Axis {
        /// Axis index.
        axis: AxisId,
        /// Which half of the axis engages the action.
        direction: AxisDirection,
    },
    /// A mouse or controller button.
    Button(ButtonCode),
}

impl InputSource {
    /// Read this source from `device`, returning its medium and magnitude.
    ///
    /// Axis magnitudes at or below `dead_zone` read as zero; the rest are clamped to
    /// `1.0`.
    pub fn read(self, device: &DeviceState, dead_zone: f64) -> (InputMedium, f64) {
        match self {
            Self::Key(key) => (InputMedium::Keyboard, digital(device.keys.contains(&key))),
            Self::Button(button) => (
                InputMedium::Button,
                digital(device.buttons.contains(&button)),
            ),
            Self::Axis { axis, direction } => {
                let raw = device.axis(axis);
                let along = match direction {
                    AxisDirection::Positive => raw,
                    AxisDirection::Negative => -raw,
                };
                let magnitude = if along > dead_zone { along.min(1.0) } else { 0.0 };
                (InputMedium::Analog, magnitude)
            }
        }
    }
}

fn digital(down: bool) -> f64 {
    if down { 1.0 } else { 0.0 }
}

/// Raw device state for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeviceState {
    keys: Vec<KeyCode>,
    buttons: Vec<ButtonCode>,
    axes: Vec<(AxisId, f64)>,
}

impl DeviceState {
    /// Mark a key down or up.
    pub fn set_key(&mut self, key: KeyCode, down: bool) {
        toggle(&mut self.keys, key, down);
    }

    /// Mark a button down or up.
    pub fn set_button(&mut self, button: ButtonCode, down: bool) {
        toggle(&mut self.buttons, button, down);
    }

    /// Set an axis value in `-1.0..=1.0`.
    pub fn set_axis(&mut self, axis: AxisId, value: f64) {
        match self.axes.iter_mut().find(|(a, _)| *a == axis) {
            Some(slot) => slot.1 = value,
            None => self.axes.push((axis, value)),
        }
    }

    /// Whether a key is down.
    pub fn key(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    /// Whether a button is down.
    pub fn button(&self, button: ButtonCode) -> bool {
        self.buttons.contains(&button)
    }

    /// Current value of an axis; zero if never set.
    pub fn axis(&self, axis: AxisId) -> f64 {
        self.axes
            .iter()
            .find(|(a, _)| *a == axis)
            .map_or(0.0, |(_, v)| *v)
    }

    /// Release every key and button and center every axis.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.buttons.clear();
        self.axes.clear();
    }
}

fn toggle<T: PartialEq>(set: &mut Vec<T>, value: T, down: bool) {
    let present = set.contains(&value);
    if down && !present {
        set.push(value);
    } else if !down && present {
        set.retain(|v| *v != value);
    }
}

/// Default axis dead zone.
pub const DEFAULT_DEAD_ZONE: f64 = 0.2;

/// Binds actions to input sources and tracks their engaged state across frames.
///
/// An action may have several sources; the strongest one this frame wins.
#[derive(Clone, Debug)]
pub struct ActionMap<A> {
    bindings: Vec<(A, InputSource)>,
    dead_zone: f64,
    held: Vec<A>,
}

impl<A: Copy + Eq> Default for ActionMap<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Copy + Eq> ActionMap<A> {
    /// An empty map with [`DEFAULT_DEAD_ZONE`].
    pub fn new() -> Self {
        Self::with_dead_zone(DEFAULT_DEAD_ZONE)
    }

    /// An empty map with the given axis dead zone, clamped to `0.0..1.0`.
    pub fn with_dead_zone(dead_zone: f64) -> Self {
        Self {
            bindings: Vec::new(),
            dead_zone: dead_zone.clamp(0.0, 0.99),
            held: Vec::new(),
        }
    }

    /// Axis dead zone.
    pub fn dead_zone(&self) -> f64 {
        self.dead_zone
    }

    /// Add a source for `action`. Duplicate bindings are ignored.
    pub fn bind(&mut self, action: A, source: InputSource) {
        if !self.bindings.contains(&(action, source)) {
            self.bindings.push((action, source));
        }
    }

    /// Remove every source of `action`.
    pub fn unbind(&mut self, action: A) {
        self.bindings.retain(|(a, _)| *a != action);
        self.held.retain(|a| *a != action);
    }

    /// Sources bound to `action`, in binding order.
    pub fn sources(&self, action: A) -> impl Iterator<Item = InputSource> + '_ {
        self.bindings
            .iter()
            .filter(move |(a, _)| *a == action)
            .map(|(_, s)| *s)
    }

    /// Decode one frame of device state.
    ///
    /// Emits one event per action that is engaged or was engaged last frame, in
    /// first-binding order. Idle actions produce nothing.
    pub fn decode(&mut self, device: &DeviceState) -> Vec<ActionEvent<A>> {
        let mut events: Vec<ActionEvent<A>> = Vec::new();
        let mut seen: Vec<A> = Vec::new();
        for &(action, _) in &self.bindings {
            if seen.contains(&action) {
                continue;
            }
            seen.push(action);

            let mut strongest = (InputMedium::Keyboard, 0.0_f64);
            for source in self.sources(action) {
                let reading = source.read(device, self.dead_zone);
                if reading.1 > strongest.1 {
                    strongest = reading;
                }
            }
            let (medium, magnitude) = strongest;
            let engaged = magnitude > 0.0;
            let was = self.held.contains(&action);
            let state = match (engaged, was) {
                (true, false) => ActionState::PRESSED | ActionState::HELD,
                (true, true) => ActionState::HELD,
                (false, true) => ActionState::RELEASED,
                (false, false) => continue,
            };
            events.push(ActionEvent {
                action,
                state,
                magnitude,
                medium,
            });
        }
        self.held = events
            .iter()
            .filter(|e| e.state.contains(ActionState::HELD))
            .map(|e| e.action)
            .collect();
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    enum Act {
        Left,
        Right,
        Jump,
    }

    fn stick_map() -> ActionMap<Act> {
        let mut map = ActionMap::with_dead_zone(0.3);
        map.bind(
            Act::Left,
            InputSource::Axis {
                axis: AxisId(0),
                direction: AxisDirection::Negative,
            },
        );
        map.bind(
            Act::Right,
            InputSource::Axis {
                axis: AxisId(0),
                direction: AxisDirection::Positive,
            },
        );
        map.bind(Act::Jump, InputSource::Key(KeyCode(32)));
        map.bind(Act::Jump, InputSource::Button(ButtonCode(0)));
        map
    }

    #[test]
    fn sources_read_by_medium() {
        let mut device = DeviceState::default();
        device.set_key(KeyCode(1), true);
        device.set_axis(AxisId(2), -0.5);
        assert_eq!(
            InputSource::Key(KeyCode(1)).read(&device, 0.1),
            (InputMedium::Keyboard, 1.0)
        );
        assert_eq!(
            InputSource::Button(ButtonCode(1)).read(&device, 0.1),
            (InputMedium::Button, 0.0)
        );
        let neg = InputSource::Axis {
            axis: AxisId(2),
            direction: AxisDirection::Negative,
        };
        assert_eq!(neg.read(&device, 0.1), (InputMedium::Analog, 0.5));
        assert_eq!(neg.read(&device, 0.6).1, 0.0, "inside the dead zone");
    }

    #[test]
    fn dead_zone_filters_small_deflection() {
        let mut map = stick_map();
        let mut device = DeviceState::default();
        device.set_axis(AxisId(0), 0.25);
        assert!(map.decode(&device).is_empty());
        device.set_axis(AxisId(0), 2.0);
        let events = map.decode(&device);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].action, Act::Right);
        assert_eq!(events[0].magnitude, 1.0, "clamped");
        assert_eq!(events[0].medium, InputMedium::Analog);
    }

    #[test]
    fn edges_across_frames() {
        let mut map = stick_map();
        let mut device = DeviceState::default();
        device.set_key(KeyCode(32), true);
        assert_eq!(
            map.decode(&device)[0].state,
            ActionState::PRESSED | ActionState::HELD
        );
        assert_eq!(map.decode(&device)[0].state, ActionState::HELD);
        device.set_key(KeyCode(32), false);
        let events = map.decode(&device);
        assert_eq!(events[0].state, ActionState::RELEASED);
        assert_eq!(events[0].magnitude, 0.0);
        assert!(map.decode(&device).is_empty());
    }

    #[test]
    fn switching_sources_keeps_action_held() {
        let mut map = stick_map();
        let mut device = DeviceState::default();
        device.set_key(KeyCode(32), true);
        map.decode(&device);
        device.set_key(KeyCode(32), false);
        device.set_button(ButtonCode(0), true);
        let events = map.decode(&device);
        assert_eq!(events[0].state, ActionState::HELD);
        assert_eq!(events[0].medium, InputMedium::Button);
    }

    #[test]
    fn unbind_forgets_held_state() {
        let mut map = stick_map();
        let mut device = DeviceState::default();
        device.set_key(KeyCode(32), true);
        map.decode(&device);
        map.unbind(Act::Jump);
        assert_eq!(map.sources(Act::Jump).count(), 0);
        assert!(map.decode(&device).is_empty());
    }

    #[test]
    fn device_state_toggles() {
        let mut device = DeviceState::default();
        device.set_key(KeyCode(5), true);
        device.set_key(KeyCode(5), true);
        device.set_button(ButtonCode(2), true);
        assert!(device.key(KeyCode(5)));
        device.set_key(KeyCode(5), false);
        assert!(!device.key(KeyCode(5)));
        assert!(device.button(ButtonCode(2)));
        device.clear();
        assert!(!device.button(ButtonCode(2)));
        assert_eq!(device.axis(AxisId(0)), 0.0);
    }
}

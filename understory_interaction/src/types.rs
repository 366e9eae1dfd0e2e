// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: interaction targets, action events, and the per-frame input snapshot.
//!
//! These are the values exchanged between an input decoder (see [`input`](crate::input)),
//! the [`InteractionContext`](crate::context::InteractionContext), and widget code.

use alloc::vec::Vec;
use bitflags::bitflags;
use kurbo::Point;

/// The holder of hot, active or focus state.
///
/// `Root` is the "nobody" sentinel. `Pending` only appears as the active target: it
/// marks a press that landed on no node, and suppresses activation until release.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Target<K> {
    /// No node.
    #[default]
    Root,
    /// A press in progress that belongs to no node.
    Pending,
    /// A node.
    Node(K),
}

impl<K: Copy> Target<K> {
    /// The node, if this target is one.
    pub fn node(self) -> Option<K> {
        match self {
            Self::Node(k) => Some(k),
            Self::Root | Self::Pending => None,
        }
    }

    /// Whether this target is a node.
    pub fn is_node(self) -> bool {
        matches!(self, Self::Node(_))
    }
}

impl<K: PartialEq> Target<K> {
    /// Whether this target is exactly `node`.
    pub fn is(&self, node: &K) -> bool {
        matches!(self, Self::Node(k) if k == node)
    }
}

bitflags! {
    /// Edge and level state of an action this frame.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ActionState: u8 {
        /// The action went from idle to engaged this frame.
        const PRESSED = 1 << 0;
        /// The action is engaged.
        const HELD = 1 << 1;
        /// The action went from engaged to idle this frame.
        const RELEASED = 1 << 2;
    }
}

/// Device class an action event came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InputMedium {
    /// A keyboard key.
    Keyboard,
    /// A controller or mouse button.
    Button,
    /// A direction on an analog axis.
    Analog,
}

/// A decoded, device-agnostic action event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ActionEvent<A> {
    /// Application-defined action identifier.
    pub action: A,
    /// Edge and level state.
    pub state: ActionState,
    /// Strength in `0.0..=1.0`. Digital sources report `1.0` while engaged.
    pub magnitude: f64,
    /// Source device class.
    pub medium: InputMedium,
}

impl<A> ActionEvent<A> {
    /// A digital press (`PRESSED | HELD`, magnitude `1.0`).
    pub fn pressed(action: A) -> Self {
        Self {
            action,
            state: ActionState::PRESSED | ActionState::HELD,
            magnitude: 1.0,
            medium: InputMedium::Keyboard,
        }
    }

    /// A digital hold with no edge this frame.
    pub fn held(action: A) -> Self {
        Self {
            action,
            state: ActionState::HELD,
            magnitude: 1.0,
            medium: InputMedium::Keyboard,
        }
    }

    /// A digital release.
    pub fn released(action: A) -> Self {
        Self {
            action,
            state: ActionState::RELEASED,
            magnitude: 0.0,
            medium: InputMedium::Keyboard,
        }
    }
}

/// Everything the interaction context reads from the outside world for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameInput<A> {
    /// Pointer position in the same space as the hit-test rectangles.
    pub pointer: Point,
    /// Whether the primary pointer button is down.
    pub button_down: bool,
    /// Action events decoded for this frame.
    pub actions: Vec<ActionEvent<A>>,
}

impl<A> Default for FrameInput<A> {
    fn default() -> Self {
        Self {
            pointer: Point::ZERO,
            button_down: false,
            actions: Vec::new(),
        }
    }
}

impl<A> FrameInput<A> {
    /// Pointer-only input.
    pub fn pointer(pointer: Point, button_down: bool) -> Self {
        Self {
            pointer,
            button_down,
            actions: Vec::new(),
        }
    }

    /// Add an action event.
    pub fn with_action(mut self, event: ActionEvent<A>) -> Self {
        self.actions.push(event);
        self
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame interaction state machine.
//!
//! ## Frame protocol
//!
//! Each frame runs these steps in order:
//!
//! 1. [`InteractionContext::begin_frame`] snapshots the input and resets the
//!    transient state (`hot` and the tab-order cursor).
//! 2. [`InteractionContext::active_if_pointer_inside`] for each interactive node in
//!    paint order. Later nodes win `hot`.
//! 3. [`InteractionContext::register_focusable`] for each focusable node in
//!    traversal order. This is where tab navigation happens.
//! 4. Widget queries: [`is_click`](InteractionContext::is_click),
//!    [`is_drag`](InteractionContext::is_drag), [`pressed`](InteractionContext::pressed)
//!    and friends.
//! 5. [`InteractionContext::end_frame`] settles `active` and drops focus from nodes
//!    that stopped registering.
//!
//! `active` and `focus` are the only state that survives a frame.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_interaction::context::{InteractionContext, NavigationActions};
//! use understory_interaction::types::FrameInput;
//!
//! let nav = NavigationActions { next: 0_u8, previous: 1, confirm: 2, modifier: 3 };
//! let mut cx: InteractionContext<u32, u8> = InteractionContext::new(nav);
//! let button = Rect::new(0.0, 0.0, 50.0, 20.0);
//!
//! // Press over the button.
//! cx.begin_frame(&FrameInput::pointer(Point::new(10.0, 10.0), true));
//! cx.active_if_pointer_inside(7, button);
//! assert!(!cx.is_click(&7));
//! cx.end_frame();
//!
//! // Release over the same button.
//! cx.begin_frame(&FrameInput::pointer(Point::new(12.0, 9.0), false));
//! cx.active_if_pointer_inside(7, button);
//! assert!(cx.is_click(&7));
//! cx.end_frame();
//! ```

use alloc::vec::Vec;
use core::fmt::Debug;
use kurbo::{Point, Rect, Vec2};

use crate::types::{ActionEvent, ActionState, FrameInput, Target};

/// Actions the context interprets itself.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationActions<A> {
    /// Move focus forward.
    pub next: A,
    /// Move focus to the previous focusable.
    pub previous: A,
    /// Click the focused node.
    pub confirm: A,
    /// Held with `next` to move backwards.
    pub modifier: A,
}

/// What happens to focusables registering while nothing is focused.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FocusPolicy {
    /// Focus only changes through navigation or [`InteractionContext::set_focus`].
    /// `next` on the focused node clears focus.
    #[default]
    Explicit,
    /// A focusable registering while nothing is focused takes focus. With this
    /// policy, `next` clearing focus hands it to the following focusable.
    ClaimWhenUnset,
}

/// Configuration of an [`InteractionContext`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct InteractionConfig<A> {
    /// Navigation action bindings.
    pub navigation: NavigationActions<A>,
    /// Focus acquisition policy.
    pub focus_policy: FocusPolicy,
}

/// Hot, active and focus tracking for one UI.
///
/// `K` identifies nodes; `A` identifies actions.
#[derive(Clone, Debug)]
pub struct InteractionContext<K, A> {
    config: InteractionConfig<A>,
    frame: u64,

    // Persistent.
    active: Target<K>,
    focus: Target<K>,

    // Transient, reset by `begin_frame`.
    hot: Target<K>,
    last_processed: Target<K>,
    promoted_this_frame: bool,
    backward_this_frame: bool,
    registered: Vec<K>,

    pointer: Point,
    previous_pointer: Point,
    button_down: bool,
    was_button_down: bool,
    actions: Vec<ActionEvent<A>>,
    consumed: Vec<bool>,
}

impl<K, A> InteractionContext<K, A>
where
    K: Copy + Eq + Debug,
    A: Copy + Eq + Debug,
{
    /// A context with the default focus policy.
    pub fn new(navigation: NavigationActions<A>) -> Self {
        Self::with_config(InteractionConfig {
            navigation,
            focus_policy: FocusPolicy::default(),
        })
    }

    /// A context with explicit configuration.
    pub fn with_config(config: InteractionConfig<A>) -> Self {
        Self {
            config,
            frame: 0,
            active: Target::Root,
            focus: Target::Root,
            hot: Target::Root,
            last_processed: Target::Root,
            promoted_this_frame: false,
            backward_this_frame: false,
            registered: Vec::new(),
            pointer: Point::ZERO,
            previous_pointer: Point::ZERO,
            button_down: false,
            was_button_down: false,
            actions: Vec::new(),
            consumed: Vec::new(),
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &InteractionConfig<A> {
        &self.config
    }

    /// Number of frames begun so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Start a frame.
    pub fn begin_frame(&mut self, input: &FrameInput<A>) {
        // First frame has no previous pointer; report zero motion.
        self.previous_pointer = if self.frame == 0 {
            input.pointer
        } else {
            self.pointer
        };
        self.pointer = input.pointer;
        self.was_button_down = self.button_down;
        self.button_down = input.button_down;
        self.actions.clone_from(&input.actions);
        self.consumed.clear();
        self.consumed.resize(self.actions.len(), false);

        self.hot = Target::Root;
        self.last_processed = Target::Root;
        self.promoted_this_frame = false;
        self.backward_this_frame = false;
        self.registered.clear();
        self.frame += 1;
    }

    /// Hit-test one interactive node. Returns whether the pointer is inside `rect`.
    ///
    /// Call in paint order: the last node containing the pointer is hot. While the
    /// button is down and nothing is active, the hot node becomes active; a later
    /// hit in the same frame takes activation over.
    pub fn active_if_pointer_inside(&mut self, id: K, rect: Rect) -> bool {
        if !rect.contains(self.pointer) {
            return false;
        }
        self.hot = Target::Node(id);
        let can_promote = self.active == Target::Root || self.promoted_this_frame;
        if self.button_down && can_promote {
            if !self.active.is(&id) {
                tracing::trace!(?id, "active");
            }
            self.active = Target::Node(id);
            self.promoted_this_frame = true;
        }
        true
    }

    /// Register a focusable node and apply tab navigation to it.
    ///
    /// Call in traversal order, after hit-testing.
    pub fn register_focusable(&mut self, id: K) {
        self.registered.push(id);
        let me = Target::Node(id);

        if self.focus == Target::Root
            && self.config.focus_policy == FocusPolicy::ClaimWhenUnset
            && !self.backward_this_frame
        {
            // A pending "next" is spent on the claim.
            let _ = self.pressed(self.config.navigation.next);
            self.move_focus(me);
            self.last_processed = me;
            return;
        }

        // Check focus before `pressed` so unfocused nodes never consume navigation.
        if self.focus == me {
            let nav = self.config.navigation;
            if self.pressed(nav.next) {
                if self.is_held(nav.modifier) {
                    self.backward_this_frame = true;
                    self.move_focus(self.last_processed);
                } else {
                    self.move_focus(Target::Root);
                }
            } else if self.pressed(nav.previous) {
                self.backward_this_frame = true;
                self.move_focus(self.last_processed);
            }
        }
        self.last_processed = me;
    }

    /// Whether `id` was clicked this frame.
    ///
    /// A pointer click is a release while `id` is both hot and active. A keyboard
    /// click is `confirm` while `id` has focus, and consumes `confirm`.
    pub fn is_click(&mut self, id: &K) -> bool {
        let released = self.was_button_down && !self.button_down;
        if released && self.hot.is(id) && self.active.is(id) {
            return true;
        }
        self.focus.is(id) && self.pressed(self.config.navigation.confirm)
    }

    /// Whether `id` is being dragged. True every frame `id` is active.
    pub fn is_drag(&self, id: &K) -> bool {
        self.active.is(id)
    }

    /// Pointer motion since the previous frame, if `id` is being dragged.
    pub fn drag_delta(&self, id: &K) -> Option<Vec2> {
        self.is_drag(id).then(|| self.pointer_delta())
    }

    /// Finish the frame.
    pub fn end_frame(&mut self) {
        if self.button_down {
            if self.active == Target::Root {
                self.active = Target::Pending;
            }
        } else if self.active != Target::Root {
            tracing::trace!(active = ?self.active, "released");
            self.active = Target::Root;
        }

        if let Target::Node(k) = self.focus
            && !self.registered.contains(&k)
        {
            tracing::trace!(focus = ?k, "focused node stopped registering");
            self.focus = Target::Root;
        }
        self.registered.clear();
    }

    /// Whether `id` is hot this frame.
    pub fn is_hot(&self, id: &K) -> bool {
        self.hot.is(id)
    }

    /// Whether `id` is active.
    pub fn is_active(&self, id: &K) -> bool {
        self.active.is(id)
    }

    /// Whether `id` has focus.
    pub fn has_focus(&self, id: &K) -> bool {
        self.focus.is(id)
    }

    /// Current hot target.
    pub fn hot(&self) -> Target<K> {
        self.hot
    }

    /// Current active target.
    pub fn active(&self) -> Target<K> {
        self.active
    }

    /// Current focus target.
    pub fn focus(&self) -> Target<K> {
        self.focus
    }

    /// Give focus to `id`.
    pub fn set_focus(&mut self, id: K) {
        self.move_focus(Target::Node(id));
    }

    /// Drop focus.
    pub fn clear_focus(&mut self) {
        self.move_focus(Target::Root);
    }

    /// Pointer position this frame.
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Pointer motion since the previous frame.
    pub fn pointer_delta(&self) -> Vec2 {
        self.pointer - self.previous_pointer
    }

    /// Whether the pointer button is down this frame.
    pub fn button_down(&self) -> bool {
        self.button_down
    }

    /// Whether `action` was pressed this frame and nobody has observed it yet.
    ///
    /// A `true` result consumes the press for the rest of the frame.
    pub fn pressed(&mut self, action: A) -> bool {
        let found = self.actions.iter().zip(self.consumed.iter()).position(|(e, used)| {
            !*used && e.action == action && e.state.contains(ActionState::PRESSED)
        });
        match found.and_then(|i| self.consumed.get_mut(i)) {
            Some(used) => {
                *used = true;
                true
            }
            None => false,
        }
    }

    /// Whether `action` is held this frame.
    pub fn is_held(&self, action: A) -> bool {
        self.any_state(action, ActionState::HELD)
    }

    /// Whether `action` was released this frame.
    pub fn released(&self, action: A) -> bool {
        self.any_state(action, ActionState::RELEASED)
    }

    /// Strongest magnitude reported for `action` this frame, or zero.
    pub fn magnitude(&self, action: A) -> f64 {
        self.actions
            .iter()
            .filter(|e| e.action == action)
            .fold(0.0, |m, e| m.max(e.magnitude))
    }

    fn any_state(&self, action: A, state: ActionState) -> bool {
        self.actions
            .iter()
            .any(|e| e.action == action && e.state.contains(state))
    }

    fn move_focus(&mut self, to: Target<K>) {
        if self.focus != to {
            tracing::trace!(from = ?self.focus, ?to, "focus");
            self.focus = to;
        }
    }
}

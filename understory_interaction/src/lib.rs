// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Interaction: immediate-mode hot, active and focus tracking.
//!
//! ## Overview
//!
//! This crate holds the per-frame interaction state of an immediate-mode UI. Widget
//! code declares itself every frame; the [`InteractionContext`](crate::context::InteractionContext)
//! answers "is this widget hovered, pressed, focused, clicked?".
//!
//! - **Hot**: the topmost node under the pointer this frame. Topmost means last in
//!   the caller's paint order.
//! - **Active**: the node holding a press. Sticky until the button is released.
//! - **Focus**: the node receiving keyboard and controller navigation. Sticky while
//!   the node keeps registering as focusable.
//!
//! It does not perform layout. Feed it rectangles from any layout system; with the
//! `flex_adapter` feature, [`adapters::flex`](crate::adapters) collects them from an
//! `understory_flex` tree.
//!
//! ## Input
//!
//! The context consumes a [`FrameInput`](crate::types::FrameInput): pointer position,
//! button state and decoded [`ActionEvent`](crate::types::ActionEvent)s. Raw devices
//! are decoded through [`ActionMap`](crate::input::ActionMap). A discrete press is
//! consumed by the first query that observes it, so two widgets never react to the
//! same key press.
//!
//! ## Workflow
//!
//! 1) Solve layout and collect [`Interactive`](crate::handlers::Interactive) items in
//!    paint order.
//! 2) Call [`run_frame`](crate::handlers::run_frame), or drive the steps yourself:
//!    `begin_frame`, hit-test, tab order, queries, `end_frame`.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_interaction::context::{InteractionContext, NavigationActions};
//! use understory_interaction::handlers::{FrameHandlers, Interactive, run_frame};
//! use understory_interaction::types::{FrameInput, Target};
//!
//! struct Clicks(Vec<u32>);
//! impl FrameHandlers<u32> for Clicks {
//!     fn click(&mut self, id: u32) {
//!         self.0.push(id);
//!     }
//! }
//!
//! let nav = NavigationActions { next: 't', previous: 'p', confirm: 'e', modifier: 's' };
//! let mut cx = InteractionContext::new(nav);
//! let items = [
//!     Interactive { id: 1_u32, rect: Rect::new(0.0, 0.0, 100.0, 100.0), focusable: false },
//!     Interactive { id: 2, rect: Rect::new(20.0, 20.0, 60.0, 40.0), focusable: true },
//! ];
//! let mut clicks = Clicks(Vec::new());
//!
//! let at = Point::new(30.0, 30.0);
//! let summary = run_frame(&mut cx, &FrameInput::pointer(at, true), &items, &mut clicks);
//! assert_eq!(summary.hot, Target::Node(2));
//! run_frame(&mut cx, &FrameInput::pointer(at, false), &items, &mut clicks);
//! assert_eq!(clicks.0, [2]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod context;
pub mod handlers;
pub mod input;
pub mod types;

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Flex: a retained flexbox layout solver over a generational box tree.
//!
//! Each frame, upstream code declares boxes with sizing expressions, padding,
//! margins and flex properties. [`LayoutTree::solve`] turns those declarations into
//! resolved sizes and positions, and [`LayoutTree::propagate_visibility`] marks
//! which nodes are visible.
//!
//! - Sizes are [`SizeExpression`]s: fixed pixels, a fraction of the parent content
//!   box, a fraction of the viewport, the children's extent, measured text, or
//!   unconstrained.
//! - Children flow along the main axis of [`FlexDirection`], optionally wrapping
//!   into lines, with [`JustifyContent`] and [`AlignItems`] controlling placement.
//! - Absolute children ([`Positioning::Absolute`]) are sized against their parent
//!   but take no part in flow or intrinsic sizing.
//!
//! ## Solving
//!
//! A solve runs two passes over the subtree of one root. The first computes
//! intrinsic sizes bottom-up; the second resolves each node's children against its
//! content box and places them. Collaborators come in a [`LayoutContext`]: a
//! [`ViewportProvider`] and, optionally, a [`TextMeasure`].
//!
//! Nothing in a solve is fatal. Malformed hierarchies (dangling child ids, cycles,
//! nodes listed by two parents), missing collaborators and clamped values are
//! logged through `tracing` and returned as [`LayoutIssue`]s in the
//! [`SolveReport`]. Authoritative geometry lives in each node's [`Layout`].
//!
//! ## Not a hit tester
//!
//! This crate does not route input. `understory_interaction` consumes the solved
//! rectangles and tracks hover, press and focus on top of them.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Size;
//! use understory_flex::{BoxStyle, JustifyContent, LayoutContext, LayoutTree, SizeExpression};
//!
//! let mut tree = LayoutTree::new();
//! let root = tree.insert(
//!     None,
//!     BoxStyle {
//!         width: SizeExpression::px(100.0),
//!         height: SizeExpression::children(),
//!         justify_content: JustifyContent::SpaceBetween,
//!         ..Default::default()
//!     },
//! );
//! let cell = BoxStyle {
//!     width: SizeExpression::px(10.0),
//!     height: SizeExpression::px(10.0),
//!     ..Default::default()
//! };
//! let kids: Vec<_> = (0..3).map(|_| tree.insert(Some(root), cell.clone())).collect();
//!
//! let viewport = Size::new(800.0, 600.0);
//! let report = tree.solve(root, &LayoutContext::new(&viewport));
//! assert!(report.is_clean());
//!
//! let xs: Vec<f64> = kids.iter().map(|&k| tree.layout(k).unwrap().position.x).collect();
//! assert_eq!(xs, [0.0, 45.0, 90.0]);
//! assert_eq!(tree.layout(root).unwrap().size, Size::new(100.0, 10.0));
//!
//! tree.propagate_visibility(root);
//! assert!(tree.is_visible(kids[1]));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod diagnostics;
mod measure;
mod node;
mod size;
mod solve;
mod style;
mod tree;
mod types;
mod visibility;

pub use diagnostics::{IssueClass, LayoutIssue, SolveReport};
pub use measure::{LayoutContext, MonospaceMeasure, TextMeasure, ViewportProvider};
pub use node::{BoxNode, Layout, UNRESOLVED};
pub use size::{SizeBounds, SizeExpression, SizeKind};
pub use style::{
    AlignItems, AlignSelf, BoxStyle, FlexDirection, FlexWrap, FontId, JustifyContent,
    Positioning, TextSpec,
};
pub use tree::{LayoutTree, TreeError};
pub use types::{Axis, NodeFlags, NodeId, Sides};

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the layout tree: node identifiers, flags, axes, and per-side values.

use bitflags::bitflags;
use kurbo::{Insets, Point, Size};

/// Identifier for a node in the layout tree.
///
/// This is a small, copyable handle that stays stable across frames but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// Retained elements keep their `NodeId` for as long as they are declared.
/// Use [`LayoutTree::is_alive`](crate::LayoutTree::is_alive) to check whether a `NodeId`
/// still refers to a live node. Stale `NodeId`s never alias a different live node because
/// the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Slot index of this identifier.
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Generation of this identifier.
    pub const fn generation(self) -> u32 {
        self.1
    }
}

bitflags! {
    /// Node flags.
    ///
    /// `INTERACTIVE` and `FOCUSABLE` are declared by the widget that owns the node.
    /// `VISIBLE` and `OVERFLOW` are computed: the solver owns `OVERFLOW` and the
    /// visibility pass owns `VISIBLE`; values written through
    /// [`LayoutTree::set_flags`](crate::LayoutTree::set_flags) for those bits are overwritten.
    #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node takes part in pointer hit testing.
        const INTERACTIVE = 1 << 0;
        /// Node takes part in tab order.
        const FOCUSABLE = 1 << 1;
        /// Node may be rendered and hit tested (computed).
        const VISIBLE = 1 << 2;
        /// Children spilled past the content box on some axis (computed).
        const OVERFLOW = 1 << 3;
    }
}

impl NodeFlags {
    /// Flags written by the solver and visibility passes.
    pub const COMPUTED: Self = Self::VISIBLE.union(Self::OVERFLOW);
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// A layout axis.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Axis {
    /// The x axis.
    Horizontal,
    /// The y axis.
    Vertical,
}

impl Axis {
    /// Both axes, horizontal first.
    pub const BOTH: [Self; 2] = [Self::Horizontal, Self::Vertical];

    /// The perpendicular axis.
    #[inline]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// The extent of `size` on this axis.
    #[inline]
    pub fn of_size(self, size: Size) -> f64 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// Overwrite the extent of `size` on this axis.
    #[inline]
    pub fn set_size(self, size: &mut Size, value: f64) {
        match self {
            Self::Horizontal => size.width = value,
            Self::Vertical => size.height = value,
        }
    }

    /// The coordinate of `point` on this axis.
    #[inline]
    pub fn of_point(self, point: Point) -> f64 {
        match self {
            Self::Horizontal => point.x,
            Self::Vertical => point.y,
        }
    }

    /// Overwrite the coordinate of `point` on this axis.
    #[inline]
    pub fn set_point(self, point: &mut Point, value: f64) {
        match self {
            Self::Horizontal => point.x = value,
            Self::Vertical => point.y = value,
        }
    }

    /// Leading inset on this axis (left or top).
    #[inline]
    pub fn start(self, insets: Insets) -> f64 {
        match self {
            Self::Horizontal => insets.x0,
            Self::Vertical => insets.y0,
        }
    }

    /// Trailing inset on this axis (right or bottom).
    #[inline]
    pub fn end(self, insets: Insets) -> f64 {
        match self {
            Self::Horizontal => insets.x1,
            Self::Vertical => insets.y1,
        }
    }

    /// Sum of both insets on this axis.
    #[inline]
    pub fn sum(self, insets: Insets) -> f64 {
        self.start(insets) + self.end(insets)
    }
}

/// A value per box side, in left/top/right/bottom order.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Sides<T> {
    /// Left side.
    pub left: T,
    /// Top side.
    pub top: T,
    /// Right side.
    pub right: T,
    /// Bottom side.
    pub bottom: T,
}

impl<T: Copy> Sides<T> {
    /// The same value on every side.
    pub const fn all(value: T) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }

    /// `horizontal` on left/right and `vertical` on top/bottom.
    pub const fn symmetric(horizontal: T, vertical: T) -> Self {
        Self {
            left: horizontal,
            top: vertical,
            right: horizontal,
            bottom: vertical,
        }
    }

    /// The leading and trailing values on `axis`.
    #[inline]
    pub fn on(&self, axis: Axis) -> (T, T) {
        match axis {
            Axis::Horizontal => (self.left, self.right),
            Axis::Vertical => (self.top, self.bottom),
        }
    }
}

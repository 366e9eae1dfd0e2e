// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-element layout records.

use alloc::vec::Vec;
use kurbo::{Insets, Point, Rect, Size};

use crate::style::{BoxStyle, TextSpec};
use crate::types::{NodeFlags, NodeId};

/// Size of a node no solve has reached yet.
///
/// Negative on both axes, so the visibility pass treats such nodes as invisible.
pub const UNRESOLVED: Size = Size::new(-1.0, -1.0);

/// Resolved geometry of a node, authoritative after a solve.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Layout {
    /// Border-box size.
    pub size: Size,
    /// Border-box origin relative to the parent's content-box origin.
    pub position: Point,
    /// Resolved padding, in pixels.
    pub padding: Insets,
    /// Resolved margin, in pixels.
    pub margin: Insets,
    /// Number of flex lines the children were placed on.
    pub lines: u32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            size: UNRESOLVED,
            position: Point::ZERO,
            padding: Insets::ZERO,
            margin: Insets::ZERO,
            lines: 0,
        }
    }
}

impl Layout {
    /// Whether a solve has written this layout.
    pub fn is_resolved(&self) -> bool {
        self.size.width >= 0.0 && self.size.height >= 0.0
    }

    /// Size minus padding, never negative.
    pub fn content_size(&self) -> Size {
        Size::new(
            (self.size.width - self.padding.x0 - self.padding.x1).max(0.0),
            (self.size.height - self.padding.y0 - self.padding.y1).max(0.0),
        )
    }

    /// Content-box rectangle in the same space as [`Layout::position`].
    pub fn content_rect(&self) -> Rect {
        let origin = Point::new(
            self.position.x + self.padding.x0,
            self.position.y + self.padding.y0,
        );
        Rect::from_origin_size(origin, self.content_size())
    }

    /// Border-box rectangle in the parent's content space.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }
}

/// A node of the layout tree.
///
/// Read through [`LayoutTree::get`](crate::LayoutTree::get); mutate through the
/// tree's setters so the hierarchy stays consistent.
#[derive(Clone, Debug)]
pub struct BoxNode {
    pub(crate) generation: u32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) style: BoxStyle,
    pub(crate) text: Option<TextSpec>,
    pub(crate) flags: NodeFlags,
    pub(crate) layout: Layout,
    // Solver scratch: Pass-A size, and the children accepted by the last traversal.
    pub(crate) intrinsic: Size,
    pub(crate) accepted: Vec<NodeId>,
    // Traversal stamp; equals the tree epoch while the node is on or done in a walk.
    pub(crate) visit: u64,
    pub(crate) on_path: bool,
}

impl BoxNode {
    pub(crate) fn new(generation: u32, style: BoxStyle) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            style,
            text: None,
            flags: NodeFlags::empty(),
            layout: Layout::default(),
            intrinsic: Size::ZERO,
            accepted: Vec::new(),
            visit: 0,
            on_path: false,
        }
    }

    /// Parent of this node, or `None` for a root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in flex placement order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Declared style.
    pub fn style(&self) -> &BoxStyle {
        &self.style
    }

    /// Text content, if any.
    pub fn text(&self) -> Option<&TextSpec> {
        self.text.as_ref()
    }

    /// Declared and computed flags.
    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    /// Resolved geometry.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Whether the last visibility pass marked this node visible.
    pub fn is_visible(&self) -> bool {
        self.flags.contains(NodeFlags::VISIBLE)
    }

    /// Whether the last solve found this node's children overflowing.
    pub fn is_overflowing(&self) -> bool {
        self.flags.contains(NodeFlags::OVERFLOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_is_unresolved() {
        let layout = Layout::default();
        assert!(!layout.is_resolved());
        assert_eq!(layout.size, UNRESOLVED);
    }

    #[test]
    fn content_box_subtracts_padding() {
        let layout = Layout {
            size: Size::new(100.0, 50.0),
            position: Point::new(10.0, 20.0),
            padding: Insets::new(5.0, 4.0, 15.0, 6.0),
            ..Default::default()
        };
        assert_eq!(layout.content_size(), Size::new(80.0, 40.0));
        assert_eq!(layout.content_rect(), Rect::new(15.0, 24.0, 95.0, 64.0));
    }

    #[test]
    fn content_box_never_negative() {
        let layout = Layout {
            size: Size::new(4.0, 4.0),
            padding: Insets::uniform(10.0),
            ..Default::default()
        };
        assert_eq!(layout.content_size(), Size::ZERO);
    }
}

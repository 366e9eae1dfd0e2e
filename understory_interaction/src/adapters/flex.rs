// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter helpers for Understory Flex.
//!
//! ## Feature
//!
//! Enable with `flex_adapter`.
//!
//! ## Notes
//!
//! These helpers turn a solved, visibility-propagated [`LayoutTree`] into
//! [`Interactive`] items in paint order: pre-order, children in declared order, so
//! later items paint over earlier ones. Invisible subtrees are skipped whole.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};
use understory_flex::{LayoutTree, NodeFlags, NodeId};

use crate::handlers::Interactive;

/// Collect interactive and focusable nodes under `root`, in paint order.
///
/// Rectangles are border boxes in root space.
pub fn interactive_items(tree: &LayoutTree, root: NodeId) -> Vec<Interactive<NodeId>> {
    let mut out = Vec::new();
    collect_into(tree, root, &mut out);
    out
}

/// [`interactive_items`] over every root, in slot order.
pub fn interactive_items_for_roots(tree: &LayoutTree) -> Vec<Interactive<NodeId>> {
    let mut out = Vec::new();
    for root in tree.roots() {
        collect_into(tree, root, &mut out);
    }
    out
}

fn collect_into(tree: &LayoutTree, root: NodeId, out: &mut Vec<Interactive<NodeId>>) {
    // (node, content origin of its parent in root space)
    let mut stack: Vec<(NodeId, Point)> = alloc::vec![(root, Point::ZERO)];
    // Bounded by the node count so cyclic declarations terminate.
    let mut remaining = tree.len();
    while let Some((id, origin)) = stack.pop() {
        let Some(node) = tree.get(id) else {
            continue;
        };
        if !node.is_visible() {
            continue;
        }
        let Some(left) = remaining.checked_sub(1) else {
            tracing::warn!(?root, "paint-order walk exceeded the node count; stopping");
            return;
        };
        remaining = left;

        let layout = node.layout();
        let top_left = origin + layout.position.to_vec2();
        let rect = Rect::from_origin_size(top_left, layout.size);
        let flags = node.flags();
        if flags.intersects(NodeFlags::INTERACTIVE | NodeFlags::FOCUSABLE) {
            out.push(Interactive {
                id,
                rect,
                focusable: flags.contains(NodeFlags::FOCUSABLE),
            });
        }
        let content = top_left + Vec2::new(layout.padding.x0, layout.padding.y0);
        stack.extend(node.children().iter().rev().map(|&c| (c, content)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;
    use understory_flex::{BoxStyle, LayoutContext, SizeExpression, Sides};

    fn px(w: f64, h: f64) -> BoxStyle {
        BoxStyle {
            width: SizeExpression::px(w),
            height: SizeExpression::px(h),
            ..Default::default()
        }
    }

    fn solved() -> (LayoutTree, NodeId, [NodeId; 3]) {
        let mut tree = LayoutTree::new();
        let root = tree.insert(
            None,
            BoxStyle {
                padding: Sides::all(SizeExpression::px(10.0)),
                ..px(200.0, 100.0)
            },
        );
        let panel = tree.insert(
            Some(root),
            BoxStyle {
                padding: Sides::all(SizeExpression::px(5.0)),
                ..px(100.0, 50.0)
            },
        );
        let button = tree.insert(Some(panel), px(30.0, 20.0));
        let field = tree.insert(Some(root), px(40.0, 20.0));
        tree.set_flags(panel, NodeFlags::INTERACTIVE);
        tree.set_flags(button, NodeFlags::INTERACTIVE | NodeFlags::FOCUSABLE);
        tree.set_flags(field, NodeFlags::FOCUSABLE);
        let vp = Size::new(800.0, 600.0);
        tree.solve(root, &LayoutContext::new(&vp));
        tree.propagate_visibility(root);
        (tree, root, [panel, button, field])
    }

    #[test]
    fn items_in_paint_order_with_world_rects() {
        let (tree, root, [panel, button, field]) = solved();
        let items = interactive_items(&tree, root);
        let ids: Vec<_> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, [panel, button, field], "root is not interactive");
        assert_eq!(items[0].rect, Rect::new(10.0, 10.0, 110.0, 60.0));
        assert_eq!(items[1].rect, Rect::new(15.0, 15.0, 45.0, 35.0));
        assert_eq!(items[2].rect, Rect::new(110.0, 10.0, 150.0, 30.0));
        assert!(!items[0].focusable);
        assert!(items[1].focusable && items[2].focusable);
        assert_eq!(tree.world_rect(button), Some(items[1].rect));
    }

    #[test]
    fn invisible_subtrees_are_skipped() {
        let (mut tree, root, [panel, _, field]) = solved();
        // A node inserted after the solve stays unresolved, hence invisible.
        let late = tree.insert(Some(panel), px(1.0, 1.0));
        tree.set_flags(late, NodeFlags::INTERACTIVE);
        tree.propagate_visibility(root);
        let ids: Vec<_> = interactive_items(&tree, root).iter().map(|i| i.id).collect();
        assert!(!ids.contains(&late));
        assert!(ids.contains(&field));
    }

    #[test]
    fn all_roots_are_walked() {
        let (mut tree, _, _) = solved();
        let overlay = tree.insert(None, px(10.0, 10.0));
        tree.set_flags(overlay, NodeFlags::INTERACTIVE);
        let vp = Size::new(800.0, 600.0);
        tree.solve(overlay, &LayoutContext::new(&vp));
        tree.propagate_visibility(overlay);
        let items = interactive_items_for_roots(&tree);
        assert_eq!(items.last().map(|i| i.id), Some(overlay));
        assert_eq!(items.len(), 4);
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visibility propagation.
//!
//! A node is visible iff its parent is visible and both of its resolved sizes are
//! non-negative. Roots have a visible virtual parent. Nodes no solve has reached keep
//! the [`UNRESOLVED`](crate::UNRESOLVED) size and are therefore invisible, together
//! with their descendants.

use alloc::vec::Vec;

use crate::tree::LayoutTree;
use crate::types::{NodeFlags, NodeId};

pub(crate) fn propagate(tree: &mut LayoutTree, root: NodeId) {
    if !tree.is_alive(root) {
        tracing::warn!(?root, "visibility root is not a live node");
        return;
    }
    let epoch = tree.next_epoch();
    let mut stack: Vec<(NodeId, bool)> = alloc::vec![(root, true)];
    let mut marked = 0_usize;

    while let Some((id, parent_visible)) = stack.pop() {
        let Some(node) = tree.node_opt_mut(id) else {
            continue;
        };
        // Each node is marked once per pass, even under cyclic declarations.
        if node.visit == epoch {
            continue;
        }
        node.visit = epoch;
        let size = node.layout.size;
        let visible = parent_visible && size.width >= 0.0 && size.height >= 0.0;
        node.flags.set(NodeFlags::VISIBLE, visible);
        marked += 1;
        // Reverse so the first child is marked first.
        stack.extend(node.children.iter().rev().map(|&c| (c, visible)));
    }
    tracing::trace!(?root, marked, "propagated visibility");
}

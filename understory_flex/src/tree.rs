// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The node registry: structure, declarations, and geometry queries.

use alloc::vec::Vec;
use kurbo::{Point, Rect, Vec2};
use thiserror::Error;

use crate::diagnostics::SolveReport;
use crate::measure::LayoutContext;
use crate::node::{BoxNode, Layout};
use crate::style::{BoxStyle, TextSpec};
use crate::types::{NodeFlags, NodeId};

impl Default for LayoutTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors returned by structural edits that would break the hierarchy.
#[derive(Copy, Clone, Debug, Error, Eq, PartialEq)]
pub enum TreeError {
    /// The identifier does not refer to a live node.
    #[error("{0:?} is not a live node")]
    Stale(NodeId),
    /// The edit would make a node its own ancestor.
    #[error("placing {node:?} under {parent:?} would create a cycle")]
    Cycle {
        /// Node being moved.
        node: NodeId,
        /// Requested parent.
        parent: NodeId,
    },
}

/// Arena of [`BoxNode`]s keyed by generational [`NodeId`]s.
///
/// Each node belongs to at most one parent; nodes without a parent are roots and are
/// solved independently.
pub struct LayoutTree {
    nodes: Vec<Option<BoxNode>>, // slots
    generations: Vec<u32>,       // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    pub(crate) epoch: u64,
}

impl core::fmt::Debug for LayoutTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("LayoutTree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

impl LayoutTree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            epoch: 0,
        }
    }

    /// Insert a new node as the last child of `parent` (or as a root if `None`).
    ///
    /// A stale `parent` inserts a root.
    pub fn insert(&mut self, parent: Option<NodeId>, style: BoxStyle) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(BoxNode::new(generation, style));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(BoxNode::new(generation, style)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        if let Some(p) = parent
            && self.is_alive(p)
        {
            self.link_parent(id, p);
        }
        id
    }

    /// Remove a node and its subtree.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).and_then(|n| n.parent) {
            self.unlink_parent(id, parent);
        }
        let mut stack = alloc::vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.take_node(current) else {
                continue;
            };
            for child in node.children {
                // Only descend into children that still name us as parent; a child
                // list may carry stale or foreign ids.
                if self.node(child).and_then(|c| c.parent) == Some(current) {
                    stack.push(child);
                }
            }
            self.free_list.push(current.idx());
        }
    }

    /// Move `id` under `new_parent` (appended last), or make it a root with `None`.
    pub fn reparent(&mut self, id: NodeId, new_parent: Option<NodeId>) -> Result<(), TreeError> {
        if !self.is_alive(id) {
            return Err(TreeError::Stale(id));
        }
        if let Some(p) = new_parent {
            if !self.is_alive(p) {
                return Err(TreeError::Stale(p));
            }
            if self.is_ancestor_or_self(id, p) {
                return Err(TreeError::Cycle {
                    node: id,
                    parent: p,
                });
            }
        }
        if let Some(parent) = self.node(id).and_then(|n| n.parent) {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
        Ok(())
    }

    /// Replace the declared child order of `id`.
    ///
    /// This is the per-frame declaration path: the list is stored as given. Live
    /// children are re-linked to `id`; children dropped from the list become roots.
    /// Stale ids and cycles are not rejected here; the solver reports and skips them.
    /// A listed child that is `id` or one of its ancestors keeps its own parent link,
    /// so the cycle stays reachable from a root.
    pub fn set_children(&mut self, id: NodeId, children: &[NodeId]) {
        let Some(node) = self.node_opt_mut(id) else {
            return;
        };
        let old = core::mem::take(&mut node.children);
        for child in old {
            if !children.contains(&child)
                && let Some(c) = self.node_opt_mut(child)
                && c.parent == Some(id)
            {
                c.parent = None;
            }
        }
        for &child in children {
            let Some(previous) = self.node(child).map(|c| c.parent) else {
                continue;
            };
            if self.is_ancestor_or_self(child, id) {
                tracing::warn!(node = ?id, ?child, "child list names an ancestor; left unlinked");
                continue;
            }
            if let Some(p) = previous
                && p != id
            {
                self.unlink_parent(child, p);
            }
            if let Some(c) = self.node_opt_mut(child) {
                c.parent = Some(id);
            }
        }
        if let Some(node) = self.node_opt_mut(id) {
            node.children = children.to_vec();
        }
    }

    /// Update the declared style.
    pub fn set_style(&mut self, id: NodeId, style: BoxStyle) {
        if let Some(n) = self.node_opt_mut(id) {
            n.style = style;
        }
    }

    /// Update the text content.
    pub fn set_text(&mut self, id: NodeId, text: Option<TextSpec>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.text = text;
        }
    }

    /// Update the declared flags. Computed bits are preserved.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.flags = (flags - NodeFlags::COMPUTED) | (n.flags & NodeFlags::COMPUTED);
        }
    }

    /// Look up a node.
    pub fn get(&self, id: NodeId) -> Option<&BoxNode> {
        self.node(id)
    }

    /// Resolved layout of a node.
    pub fn layout(&self, id: NodeId) -> Option<&Layout> {
        self.node(id).map(|n| &n.layout)
    }

    /// Parent of a node. `None` for roots and stale ids.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Declared children of a node; empty for stale ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(&[][..], |n| n.children.as_slice())
    }

    /// Whether the last visibility pass marked the node visible.
    pub fn is_visible(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(BoxNode::is_visible)
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// All live roots in slot order.
    pub fn roots(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| match n {
                Some(n) if n.parent.is_none() =>
                {
                    #[allow(
                        clippy::cast_possible_truncation,
                        reason = "NodeId uses 32-bit indices by design."
                    )]
                    Some(NodeId::new(i as u32, n.generation))
                }
                _ => None,
            })
            .collect()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Whether the tree has no live nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve geometry for every node reachable from `root`.
    pub fn solve(&mut self, root: NodeId, cx: &LayoutContext<'_>) -> SolveReport {
        crate::solve::solve(self, root, cx)
    }

    /// Solve every root, one after another.
    pub fn solve_roots(&mut self, cx: &LayoutContext<'_>) -> SolveReport {
        let mut report = SolveReport::default();
        for root in self.roots() {
            report.merge(self.solve(root, cx));
        }
        report
    }

    /// Mark visibility for every node reachable from `root`.
    pub fn propagate_visibility(&mut self, root: NodeId) {
        crate::visibility::propagate(self, root);
    }

    /// Border-box rectangle of `id` in root space.
    ///
    /// Walks the parent chain, so it costs O(depth). Paint-order traversals should
    /// accumulate origins instead.
    pub fn world_rect(&self, id: NodeId) -> Option<Rect> {
        let node = self.node(id)?;
        let mut origin = node.layout.position;
        let mut current = node.parent;
        // A parent chain is acyclic by construction; the bound keeps a corrupted
        // chain from looping.
        let mut remaining = self.nodes.len();
        while let Some(p) = current {
            let parent = self.node(p)?;
            let l = &parent.layout;
            origin += Vec2::new(l.position.x + l.padding.x0, l.position.y + l.padding.y0);
            current = parent.parent;
            remaining = remaining.checked_sub(1)?;
        }
        Some(Rect::from_origin_size(origin, node.layout.size))
    }

    /// Origin of the content box of `id` in root space.
    pub fn world_content_origin(&self, id: NodeId) -> Option<Point> {
        let rect = self.world_rect(id)?;
        let padding = self.node(id)?.layout.padding;
        Some(Point::new(rect.x0 + padding.x0, rect.y0 + padding.y0))
    }

    // --- internals ---

    pub(crate) fn node(&self, id: NodeId) -> Option<&BoxNode> {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .filter(|n| n.generation == id.1)
    }

    pub(crate) fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut BoxNode> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn take_node(&mut self, id: NodeId) -> Option<BoxNode> {
        let slot = self.nodes.get_mut(id.idx())?;
        if slot.as_ref()?.generation != id.1 {
            return None;
        }
        slot.take()
    }

    pub(crate) fn next_epoch(&mut self) -> u64 {
        self.epoch = self.epoch.wrapping_add(1);
        self.epoch
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, mut id: NodeId) -> bool {
        let mut remaining = self.nodes.len();
        loop {
            if id == ancestor {
                return true;
            }
            match self.parent(id) {
                Some(p) => id = p,
                None => return false,
            }
            remaining = match remaining.checked_sub(1) {
                Some(r) => r,
                None => return true,
            };
        }
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(p) = self.node_opt_mut(parent) {
            p.children.push(id);
        }
        if let Some(n) = self.node_opt_mut(id) {
            n.parent = Some(parent);
        }
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(p) = self.node_opt_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(n) = self.node_opt_mut(id) {
            n.parent = None;
        }
    }
}

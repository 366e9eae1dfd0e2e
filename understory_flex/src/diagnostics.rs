// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Issues found while solving, and the per-solve report.
//!
//! None of these abort a frame. Each is logged once per pass and collected in a
//! [`SolveReport`] for inspection tooling.

use alloc::vec::Vec;
use thiserror::Error;

use crate::types::{Axis, NodeId};

/// Broad class of a [`LayoutIssue`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum IssueClass {
    /// A collaborator or input is missing; a default was used.
    Configuration,
    /// The hierarchy is malformed; an edge or subtree was skipped.
    Structural,
    /// A value was clamped.
    Numeric,
}

/// A non-fatal condition encountered during a solve.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LayoutIssue {
    /// A text-sized node was solved without a text measurer.
    #[error("node {node:?} is sized from text but no text measurer is installed")]
    MissingTextMeasure {
        /// The text-sized node.
        node: NodeId,
    },
    /// A text-sized node has no text content.
    #[error("node {node:?} is sized from text but has no text content")]
    MissingText {
        /// The text-sized node.
        node: NodeId,
    },
    /// Text content without a font; the default font was used.
    #[error("node {node:?} has text without a font; using the default font")]
    UnsetFont {
        /// The node with text content.
        node: NodeId,
    },
    /// The solve or visibility root is not a live node.
    #[error("root {node:?} is not a live node")]
    DanglingRoot {
        /// The stale root.
        node: NodeId,
    },
    /// A child list names a node that does not exist.
    #[error("node {parent:?} lists child {child:?}, which is not a live node")]
    DanglingChild {
        /// Owner of the child list.
        parent: NodeId,
        /// The stale child.
        child: NodeId,
    },
    /// A child list names one of the node's own ancestors (or the node itself).
    #[error("node {parent:?} lists ancestor {child:?} as a child")]
    Cycle {
        /// Owner of the child list.
        parent: NodeId,
        /// The ancestor.
        child: NodeId,
    },
    /// A node is listed by more than one parent in the same tree.
    #[error("node {child:?} is listed by {parent:?} but already placed elsewhere")]
    SharedChild {
        /// The second owner.
        parent: NodeId,
        /// The shared node.
        child: NodeId,
    },
    /// A resolved size was negative and was clamped to zero.
    #[error("node {node:?} resolved to {value} on the {axis:?} axis; clamped to zero")]
    NegativeSize {
        /// The clamped node.
        node: NodeId,
        /// The clamped axis.
        axis: Axis,
        /// The value before clamping.
        value: f64,
    },
}

impl LayoutIssue {
    /// The class of this issue.
    pub fn class(&self) -> IssueClass {
        match self {
            Self::MissingTextMeasure { .. } | Self::MissingText { .. } | Self::UnsetFont { .. } => {
                IssueClass::Configuration
            }
            Self::DanglingRoot { .. }
            | Self::DanglingChild { .. }
            | Self::Cycle { .. }
            | Self::SharedChild { .. } => IssueClass::Structural,
            Self::NegativeSize { .. } => IssueClass::Numeric,
        }
    }
}

/// Outcome of one solve.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SolveReport {
    /// Nodes resolved by the solve.
    pub visited: usize,
    /// Issues in the order they were found.
    pub issues: Vec<LayoutIssue>,
    /// Nodes whose children overflow their content box, in placement order.
    pub overflowed: Vec<NodeId>,
}

impl SolveReport {
    /// Whether no issues were found. Overflow is not an issue.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues of one class.
    pub fn issues_of(&self, class: IssueClass) -> impl Iterator<Item = &LayoutIssue> + '_ {
        self.issues.iter().filter(move |i| i.class() == class)
    }

    /// Whether `node` overflowed.
    pub fn overflowed(&self, node: NodeId) -> bool {
        self.overflowed.contains(&node)
    }

    /// Fold another report into this one.
    pub fn merge(&mut self, other: Self) {
        self.visited += other.visited;
        self.issues.extend(other.issues);
        self.overflowed.extend(other.overflowed);
    }

    pub(crate) fn push(&mut self, issue: LayoutIssue) {
        match issue.class() {
            IssueClass::Numeric => tracing::debug!(%issue, "layout value clamped"),
            IssueClass::Configuration => tracing::warn!(%issue, "layout configuration"),
            IssueClass::Structural => tracing::warn!(%issue, "layout subtree skipped"),
        }
        self.issues.push(issue);
    }
}

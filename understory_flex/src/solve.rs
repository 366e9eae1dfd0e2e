// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The two-pass layout solver.
//!
//! ## Passes
//!
//! 1. Collect: a depth-first walk from the root records the accepted child edges of
//!    every reachable node and a post-order. Dangling ids, cycles and nodes listed by
//!    two parents are reported and their edges skipped.
//! 2. Pass A (post-order): intrinsic sizes. Children-sized axes sum (main axis) or
//!    max (cross axis) the margin-inclusive Pass-A extents of flow children, plus
//!    padding. Text-sized axes ask the text measurer.
//! 3. Pass B (reverse post-order, so parents come before their descendants): each
//!    node resolves the size of its children against its content box, breaks them
//!    into lines and places them.
//!
//! All walks use explicit stacks; cost is linear in nodes plus child edges.

use alloc::vec::Vec;
use kurbo::{Insets, Point, Size, Vec2};

use crate::diagnostics::{LayoutIssue, SolveReport};
use crate::measure::LayoutContext;
use crate::node::BoxNode;
use crate::size::{SizeExpression, SizeKind};
use crate::style::{AlignItems, BoxStyle, FlexWrap, FontId, JustifyContent, Positioning};
use crate::tree::LayoutTree;
use crate::types::{Axis, NodeFlags, NodeId, Sides};

/// Tolerance for overflow and line-break comparisons.
const EPSILON: f64 = 1.0e-6;

pub(crate) fn solve(tree: &mut LayoutTree, root: NodeId, cx: &LayoutContext<'_>) -> SolveReport {
    let mut report = SolveReport::default();
    if !tree.is_alive(root) {
        report.push(LayoutIssue::DanglingRoot { node: root });
        return report;
    }
    let viewport = cx.viewport.current_extent();

    let order = collect(tree, root, &mut report);
    for &id in &order {
        intrinsic_size(tree, id, viewport, cx, &mut report);
    }
    place_root(tree, root, viewport, &mut report);
    for &id in order.iter().rev() {
        place_children(tree, id, viewport, &mut report);
    }

    report.visited = order.len();
    tracing::trace!(
        ?root,
        visited = report.visited,
        issues = report.issues.len(),
        "solved layout root"
    );
    report
}

fn enter(tree: &mut LayoutTree, id: NodeId, epoch: u64) {
    if let Some(n) = tree.node_opt_mut(id) {
        n.visit = epoch;
        n.on_path = true;
        n.accepted.clear();
    }
}

/// Walk the subtree, filling `accepted` edges. Returns nodes in post-order.
fn collect(tree: &mut LayoutTree, root: NodeId, report: &mut SolveReport) -> Vec<NodeId> {
    let epoch = tree.next_epoch();
    let mut order = Vec::new();
    // (node, index of the next child to examine)
    let mut stack: Vec<(NodeId, usize)> = alloc::vec![(root, 0)];
    enter(tree, root, epoch);

    while let Some(&(id, cursor)) = stack.last() {
        let next = tree.node(id).and_then(|n| n.children.get(cursor).copied());
        let Some(child) = next else {
            stack.pop();
            if let Some(n) = tree.node_opt_mut(id) {
                n.on_path = false;
            }
            order.push(id);
            continue;
        };
        if let Some(top) = stack.last_mut() {
            top.1 += 1;
        }
        match tree.node(child).map(|c| (c.visit == epoch, c.on_path)) {
            None => report.push(LayoutIssue::DanglingChild { parent: id, child }),
            Some((true, true)) => report.push(LayoutIssue::Cycle { parent: id, child }),
            Some((true, false)) => report.push(LayoutIssue::SharedChild { parent: id, child }),
            Some((false, _)) => {
                if let Some(p) = tree.node_opt_mut(id) {
                    p.accepted.push(child);
                }
                enter(tree, child, epoch);
                stack.push((child, 0));
            }
        }
    }
    order
}

fn resolve_insets(sides: &Sides<SizeExpression>, reference: Option<Size>, viewport: Size) -> Insets {
    let h = reference.map(|r| r.width);
    let v = reference.map(|r| r.height);
    Insets::new(
        sides.left.resolve_inset(h, viewport.width).max(0.0),
        sides.top.resolve_inset(v, viewport.height).max(0.0),
        sides.right.resolve_inset(h, viewport.width).max(0.0),
        sides.bottom.resolve_inset(v, viewport.height).max(0.0),
    )
}

fn resolve_margins(sides: &Sides<SizeExpression>, reference: Option<Size>, viewport: Size) -> Insets {
    let h = reference.map(|r| r.width);
    let v = reference.map(|r| r.height);
    Insets::new(
        sides.left.resolve_inset(h, viewport.width),
        sides.top.resolve_inset(v, viewport.height),
        sides.right.resolve_inset(h, viewport.width),
        sides.bottom.resolve_inset(v, viewport.height),
    )
}

fn measure_text(
    node: &BoxNode,
    id: NodeId,
    cx: &LayoutContext<'_>,
    report: &mut SolveReport,
) -> Size {
    let Some(measurer) = cx.text else {
        report.push(LayoutIssue::MissingTextMeasure { node: id });
        return Size::ZERO;
    };
    let Some(text) = node.text.as_ref() else {
        report.push(LayoutIssue::MissingText { node: id });
        return Size::ZERO;
    };
    let font = text.font.unwrap_or_else(|| {
        report.push(LayoutIssue::UnsetFont { node: id });
        FontId::default()
    });
    measurer.measure(font, &text.text, text.size, text.spacing)
}

/// Pass A for one node. Children have already been visited.
fn intrinsic_size(
    tree: &mut LayoutTree,
    id: NodeId,
    viewport: Size,
    cx: &LayoutContext<'_>,
    report: &mut SolveReport,
) {
    let Some(node) = tree.node(id) else {
        return;
    };
    let style = &node.style;
    let main = style.main_axis();

    let mut main_sum = 0.0_f64;
    let mut cross_max = 0.0_f64;
    for &child in &node.accepted {
        let Some(c) = tree.node(child) else {
            continue;
        };
        if c.style.position.is_absolute() {
            continue;
        }
        let margin = resolve_margins(&c.style.margin, None, viewport);
        main_sum += main.of_size(c.intrinsic) + main.sum(margin);
        cross_max = cross_max.max(main.cross().of_size(c.intrinsic) + main.cross().sum(margin));
    }

    let wants_text = Axis::BOTH
        .iter()
        .any(|&a| style.size(a).kind == SizeKind::Text);
    let text = if wants_text {
        measure_text(node, id, cx, report)
    } else {
        Size::ZERO
    };

    let padding = resolve_insets(&style.padding, None, viewport);
    let mut intrinsic = Size::ZERO;
    for axis in Axis::BOTH {
        let expr = style.size(axis);
        let content = if axis == main { main_sum } else { cross_max };
        let derived = match expr.kind {
            SizeKind::Text => axis.of_size(text),
            _ => content + axis.sum(padding),
        };
        let value = expr.resolve(None, axis.of_size(viewport), derived);
        axis.set_size(&mut intrinsic, style.bounds(axis).clamp(value).max(0.0));
    }

    if let Some(n) = tree.node_opt_mut(id) {
        n.intrinsic = intrinsic;
    }
}

/// Resolved size, padding and margin of one node against its parent's content box.
struct ResolvedBox {
    size: Size,
    padding: Insets,
    margin: Insets,
}

fn resolve_box(
    id: NodeId,
    style: &BoxStyle,
    intrinsic: Size,
    parent_content: Size,
    viewport: Size,
    stretch: Option<(Axis, f64)>,
    report: &mut SolveReport,
) -> ResolvedBox {
    let margin = resolve_margins(&style.margin, Some(parent_content), viewport);
    let padding = resolve_insets(&style.padding, Some(parent_content), viewport);
    let mut size = Size::ZERO;
    for axis in Axis::BOTH {
        let expr = style.size(axis);
        let requested = match stretch {
            Some((stretch_axis, target)) if stretch_axis == axis && !expr.is_exact() => {
                target - axis.sum(margin)
            }
            _ => expr.resolve(
                Some(axis.of_size(parent_content)),
                axis.of_size(viewport),
                axis.of_size(intrinsic),
            ),
        };
        let mut value = style.bounds(axis).clamp(requested);
        if value < 0.0 {
            report.push(LayoutIssue::NegativeSize {
                node: id,
                axis,
                value,
            });
            value = 0.0;
        }
        axis.set_size(&mut size, value);
    }
    ResolvedBox {
        size,
        padding,
        margin,
    }
}

fn write_box(tree: &mut LayoutTree, id: NodeId, resolved: &ResolvedBox) {
    if let Some(n) = tree.node_opt_mut(id) {
        n.layout.size = resolved.size;
        n.layout.padding = resolved.padding;
        n.layout.margin = resolved.margin;
    }
}

fn absolute_position(offset: Vec2, margin: Insets) -> Point {
    Point::new(offset.x + margin.x0, offset.y + margin.y0)
}

/// The root's parent content box is the viewport rectangle at the origin.
fn place_root(tree: &mut LayoutTree, root: NodeId, viewport: Size, report: &mut SolveReport) {
    let Some(node) = tree.node(root) else {
        return;
    };
    let resolved = resolve_box(
        root,
        &node.style,
        node.intrinsic,
        viewport,
        viewport,
        None,
        report,
    );
    let position = match node.style.position {
        Positioning::Absolute(offset) => absolute_position(offset, resolved.margin),
        Positioning::Flow => Point::new(resolved.margin.x0, resolved.margin.y0),
    };
    write_box(tree, root, &resolved);
    if let Some(n) = tree.node_opt_mut(root) {
        n.layout.position = position;
    }
}

/// A flow child waiting for placement.
struct FlowItem {
    id: NodeId,
    /// Margin-inclusive extent on the parent's main axis.
    main_extent: f64,
    /// Margin-inclusive extent on the parent's cross axis.
    cross_extent: f64,
    main_margin: f64,
    cross_margin: f64,
    align: AlignItems,
}

/// A run of flow items sharing one cross-axis band.
struct Line {
    start: usize,
    end: usize,
    main: f64,
    cross: f64,
}

fn break_lines(items: &[FlowItem], wrap: FlexWrap, available: f64) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut current = Line {
        start: 0,
        end: 0,
        main: 0.0,
        cross: 0.0,
    };
    for (i, item) in items.iter().enumerate() {
        let breaks = wrap == FlexWrap::Wrap
            && current.end > current.start
            && current.main + item.main_extent > available + EPSILON;
        if breaks {
            let start = i;
            lines.push(core::mem::replace(
                &mut current,
                Line {
                    start,
                    end: start,
                    main: 0.0,
                    cross: 0.0,
                },
            ));
        }
        current.end = i + 1;
        current.main += item.main_extent;
        current.cross = current.cross.max(item.cross_extent);
    }
    if current.end > current.start {
        lines.push(current);
    }
    lines
}

/// Leading offset and inter-item gap for one line.
fn justify(justify: JustifyContent, free: f64, count: usize) -> (f64, f64) {
    match justify {
        JustifyContent::FlexStart => (0.0, 0.0),
        JustifyContent::FlexEnd => (free, 0.0),
        JustifyContent::Center => (free / 2.0, 0.0),
        JustifyContent::SpaceBetween if count > 1 => {
            let gaps = (count - 1) as f64;
            (0.0, free.max(0.0) / gaps)
        }
        JustifyContent::SpaceBetween => (0.0, 0.0),
    }
}

fn cross_offset(align: AlignItems, band: f64, extent: f64) -> f64 {
    match align {
        AlignItems::FlexStart | AlignItems::Stretch => 0.0,
        AlignItems::FlexEnd => band - extent,
        AlignItems::Center => (band - extent) / 2.0,
    }
}

/// Pass B for one node: size and place its accepted children.
fn place_children(tree: &mut LayoutTree, id: NodeId, viewport: Size, report: &mut SolveReport) {
    let Some(node) = tree.node_opt_mut(id) else {
        return;
    };
    let children = core::mem::take(&mut node.accepted);
    let style = node.style.clone();
    let content = node.layout.content_size();
    let main = style.main_axis();
    let cross = main.cross();

    let mut items = Vec::with_capacity(children.len());
    for &child in &children {
        let Some(c) = tree.node(child) else {
            continue;
        };
        let align = c.style.align_self.resolve(style.align_items);
        let placement = c.style.position;
        let stretch = (!placement.is_absolute() && align == AlignItems::Stretch)
            .then_some((cross, cross.of_size(content)));
        let resolved = resolve_box(
            child,
            &c.style,
            c.intrinsic,
            content,
            viewport,
            stretch,
            report,
        );
        write_box(tree, child, &resolved);
        match placement {
            Positioning::Absolute(offset) => {
                if let Some(n) = tree.node_opt_mut(child) {
                    n.layout.position = absolute_position(offset, resolved.margin);
                }
            }
            Positioning::Flow => items.push(FlowItem {
                id: child,
                main_extent: main.of_size(resolved.size) + main.sum(resolved.margin),
                cross_extent: cross.of_size(resolved.size) + cross.sum(resolved.margin),
                main_margin: main.start(resolved.margin),
                cross_margin: cross.start(resolved.margin),
                align,
            }),
        }
    }

    let available_main = main.of_size(content);
    let available_cross = cross.of_size(content);
    let lines = break_lines(&items, style.flex_wrap, available_main);
    let single = lines.len() == 1;

    let mut overflow = false;
    let mut band_start = 0.0;
    let mut used_cross = 0.0;
    for line in &lines {
        let band = if single { available_cross } else { line.cross };
        let line_items = &items[line.start..line.end];
        let (mut cursor, gap) = justify(
            style.justify_content,
            available_main - line.main,
            line_items.len(),
        );
        for item in line_items {
            let mut position = Point::ZERO;
            main.set_point(&mut position, cursor + item.main_margin);
            cross.set_point(
                &mut position,
                band_start + cross_offset(item.align, band, item.cross_extent) + item.cross_margin,
            );
            if let Some(n) = tree.node_opt_mut(item.id) {
                n.layout.position = position;
            }
            cursor += item.main_extent + gap;
        }
        overflow |= line.main > available_main + EPSILON;
        band_start += band;
        used_cross += line.cross;
    }
    overflow |= used_cross > available_cross + EPSILON;

    if overflow {
        tracing::debug!(
            node = ?id,
            lines = lines.len(),
            "children overflow the content box"
        );
        report.overflowed.push(id);
    }
    if let Some(n) = tree.node_opt_mut(id) {
        n.accepted = children;
        n.layout.lines = u32::try_from(lines.len()).unwrap_or(u32::MAX);
        n.flags.set(NodeFlags::OVERFLOW, overflow);
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flex basics.
//!
//! Builds a small toolbar-and-body layout, solves it against a viewport, and
//! prints every node's resolved rectangle in root space.
//!
//! Run:
//! - `cargo run -p understory_demos --example flex_basics`

use kurbo::Size;
use understory_flex::{
    AlignItems, BoxStyle, FlexDirection, FontId, JustifyContent, LayoutContext, LayoutTree,
    MonospaceMeasure, NodeId, Sides, SizeExpression, TextSpec,
};

fn print_tree(tree: &LayoutTree, id: NodeId, depth: usize) {
    if let Some(rect) = tree.world_rect(id) {
        println!(
            "{:indent$}{:?}  origin=({:.1}, {:.1})  size={:.1}x{:.1}",
            "",
            id,
            rect.x0,
            rect.y0,
            rect.width(),
            rect.height(),
            indent = depth * 2
        );
    }
    for &child in tree.children(id) {
        print_tree(tree, child, depth + 1);
    }
}

fn main() {
    understory_demos::init_logging();

    let mut tree = LayoutTree::new();
    let root = tree.insert(
        None,
        BoxStyle {
            width: SizeExpression::percent(1.0),
            height: SizeExpression::percent(1.0),
            flex_direction: FlexDirection::Column,
            ..Default::default()
        },
    );

    let toolbar = tree.insert(
        Some(root),
        BoxStyle {
            width: SizeExpression::percent(1.0),
            height: SizeExpression::children(),
            padding: Sides::all(SizeExpression::px(4.0)),
            justify_content: JustifyContent::SpaceBetween,
            align_items: AlignItems::Center,
            ..Default::default()
        },
    );
    for name in ["File", "Edit", "View", "Help"] {
        let button = tree.insert(
            Some(toolbar),
            BoxStyle {
                width: SizeExpression::text(),
                height: SizeExpression::text(),
                margin: Sides::symmetric(SizeExpression::px(6.0), SizeExpression::px(2.0)),
                ..Default::default()
            },
        );
        tree.set_text(button, Some(TextSpec::new(FontId(0), name, 16.0)));
    }

    let body = tree.insert(
        Some(root),
        BoxStyle {
            width: SizeExpression::percent(1.0),
            height: SizeExpression::px(400.0),
            align_items: AlignItems::Stretch,
            ..Default::default()
        },
    );
    tree.insert(
        Some(body),
        BoxStyle {
            width: SizeExpression::percent(0.25),
            ..Default::default()
        },
    );
    tree.insert(
        Some(body),
        BoxStyle {
            width: SizeExpression::percent(0.75),
            padding: Sides::all(SizeExpression::percent(0.05)),
            ..Default::default()
        },
    );

    let viewport = Size::new(640.0, 480.0);
    let measure = MonospaceMeasure::default();
    let cx = LayoutContext::new(&viewport).with_text(&measure);
    let report = tree.solve(root, &cx);
    tree.propagate_visibility(root);

    println!("== Resolved layout ({} nodes) ==", report.visited);
    print_tree(&tree, root, 0);
    println!("issues: {}", report.issues.len());
}

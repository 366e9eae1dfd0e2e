// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wrapping and overflow.
//!
//! The same five cards placed in a narrow row, once with wrapping and once
//! without. The non-wrapping row overflows and shows up in the solve report.
//! Also demonstrates structural issues: a child list naming a removed node.
//!
//! Run:
//! - `cargo run -p understory_demos --example flex_wrap_overflow`
//! - `RUST_LOG=understory_flex=trace cargo run -p understory_demos --example flex_wrap_overflow`

use kurbo::Size;
use understory_flex::{
    BoxStyle, FlexWrap, IssueClass, LayoutContext, LayoutTree, NodeId, SizeExpression,
};

fn card() -> BoxStyle {
    BoxStyle {
        width: SizeExpression::px(70.0),
        height: SizeExpression::px(40.0),
        ..Default::default()
    }
}

fn row(tree: &mut LayoutTree, wrap: FlexWrap) -> (NodeId, Vec<NodeId>) {
    let root = tree.insert(
        None,
        BoxStyle {
            width: SizeExpression::px(200.0),
            height: SizeExpression::children(),
            flex_wrap: wrap,
            ..Default::default()
        },
    );
    let cards = (0..5).map(|_| tree.insert(Some(root), card())).collect();
    (root, cards)
}

fn main() {
    understory_demos::init_logging();

    let viewport = Size::new(800.0, 600.0);
    let cx = LayoutContext::new(&viewport);
    let mut tree = LayoutTree::new();

    for wrap in [FlexWrap::Wrap, FlexWrap::NoWrap] {
        let (root, cards) = row(&mut tree, wrap);
        let report = tree.solve(root, &cx);
        let Some(layout) = tree.layout(root).copied() else {
            continue;
        };
        println!("== {wrap:?} ==");
        println!(
            "  lines={}  size={:.0}x{:.0}  overflowed={}",
            layout.lines,
            layout.size.width,
            layout.size.height,
            report.overflowed(root)
        );
        for card in cards {
            if let Some(l) = tree.layout(card) {
                println!("  {:?} at ({:.0}, {:.0})", card, l.position.x, l.position.y);
            }
        }
    }

    // A stale child id is skipped and reported; the rest of the row still resolves.
    let (root, cards) = row(&mut tree, FlexWrap::Wrap);
    let gone = cards[2];
    tree.remove(gone);
    let mut declared = tree.children(root).to_vec();
    declared.insert(1, gone);
    tree.set_children(root, &declared);
    let report = tree.solve(root, &cx);
    println!("== Structural issues ==");
    for issue in report.issues_of(IssueClass::Structural) {
        println!("  {issue}");
    }
}

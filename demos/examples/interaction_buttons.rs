// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction over a solved flex layout.
//!
//! Lays out a row of buttons, collects them with the flex adapter, and replays a
//! short script of pointer and keyboard frames through `run_frame`. Keys are
//! decoded through an `ActionMap`.
//!
//! Run:
//! - `cargo run -p understory_demos --example interaction_buttons`
//! - `RUST_LOG=understory_interaction=trace cargo run -p understory_demos --example interaction_buttons`

use kurbo::{Point, Size, Vec2};
use understory_flex::{
    BoxStyle, JustifyContent, LayoutContext, LayoutTree, NodeFlags, NodeId, Sides,
    SizeExpression,
};
use understory_interaction::adapters::flex::interactive_items;
use understory_interaction::context::{InteractionContext, NavigationActions};
use understory_interaction::handlers::{FrameHandlers, run_frame};
use understory_interaction::input::{ActionMap, DeviceState, InputSource, KeyCode};
use understory_interaction::types::FrameInput;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Action {
    Next,
    Previous,
    Confirm,
    Shift,
}

const TAB: KeyCode = KeyCode(9);
const ENTER: KeyCode = KeyCode(13);
const SHIFT: KeyCode = KeyCode(16);
const UP: KeyCode = KeyCode(38);

struct Printer;

impl FrameHandlers<NodeId> for Printer {
    fn click(&mut self, id: NodeId) {
        println!("    click {id:?}");
    }

    fn drag(&mut self, id: NodeId, delta: Vec2) {
        if delta != Vec2::ZERO {
            println!("    drag {id:?} by ({:.0}, {:.0})", delta.x, delta.y);
        }
    }
}

/// One scripted frame: pointer, button, keys down.
struct Step {
    label: &'static str,
    pointer: (f64, f64),
    button: bool,
    keys: &'static [KeyCode],
}

fn main() {
    understory_demos::init_logging();

    let mut tree = LayoutTree::new();
    let root = tree.insert(
        None,
        BoxStyle {
            width: SizeExpression::px(400.0),
            height: SizeExpression::px(60.0),
            padding: Sides::all(SizeExpression::px(10.0)),
            justify_content: JustifyContent::SpaceBetween,
            ..Default::default()
        },
    );
    let buttons: Vec<NodeId> = (0..3)
        .map(|_| {
            let b = tree.insert(
                Some(root),
                BoxStyle {
                    width: SizeExpression::px(100.0),
                    height: SizeExpression::percent(1.0),
                    ..Default::default()
                },
            );
            tree.set_flags(b, NodeFlags::INTERACTIVE | NodeFlags::FOCUSABLE);
            b
        })
        .collect();
    tree.solve(root, &LayoutContext::new(&Size::new(800.0, 600.0)));
    tree.propagate_visibility(root);
    let items = interactive_items(&tree, root);
    for item in &items {
        println!("{:?} at {:?}", item.id, item.rect);
    }

    let mut map = ActionMap::new();
    map.bind(Action::Next, InputSource::Key(TAB));
    map.bind(Action::Previous, InputSource::Key(UP));
    map.bind(Action::Confirm, InputSource::Key(ENTER));
    map.bind(Action::Shift, InputSource::Key(SHIFT));

    let mut cx = InteractionContext::new(NavigationActions {
        next: Action::Next,
        previous: Action::Previous,
        confirm: Action::Confirm,
        modifier: Action::Shift,
    });
    cx.set_focus(buttons[2]);

    let script = [
        Step { label: "hover button 1", pointer: (50.0, 30.0), button: false, keys: &[] },
        Step { label: "press", pointer: (50.0, 30.0), button: true, keys: &[] },
        Step { label: "drag within", pointer: (70.0, 35.0), button: true, keys: &[] },
        Step { label: "release", pointer: (70.0, 35.0), button: false, keys: &[] },
        Step { label: "press button 2", pointer: (200.0, 30.0), button: true, keys: &[] },
        Step { label: "slide off", pointer: (200.0, 200.0), button: true, keys: &[] },
        Step { label: "release off", pointer: (200.0, 200.0), button: false, keys: &[] },
        Step { label: "previous", pointer: (0.0, 0.0), button: false, keys: &[UP] },
        Step { label: "confirm", pointer: (0.0, 0.0), button: false, keys: &[ENTER] },
        Step { label: "shift+tab", pointer: (0.0, 0.0), button: false, keys: &[SHIFT, TAB] },
        Step { label: "tab", pointer: (0.0, 0.0), button: false, keys: &[TAB] },
    ];

    let mut device = DeviceState::default();
    for step in script {
        device.clear();
        for &key in step.keys {
            device.set_key(key, true);
        }
        let input = FrameInput {
            pointer: Point::new(step.pointer.0, step.pointer.1),
            button_down: step.button,
            actions: map.decode(&device),
        };
        println!("== {} ==", step.label);
        let summary = run_frame(&mut cx, &input, &items, &mut Printer);
        println!(
            "    hot={:?} active={:?} focus={:?}",
            summary.hot, summary.active, summary.focus
        );
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size};
use understory_flex::{
    BoxStyle, FlexWrap, LayoutContext, LayoutTree, NodeFlags, NodeId, SizeExpression,
};
use understory_interaction::adapters::flex::interactive_items;
use understory_interaction::context::{InteractionContext, NavigationActions};
use understory_interaction::handlers::{FrameHandlers, Interactive, run_frame};
use understory_interaction::types::{ActionEvent, FrameInput};

const NAV: NavigationActions<u8> = NavigationActions {
    next: 0,
    previous: 1,
    confirm: 2,
    modifier: 3,
};

struct Count(usize);

impl<K> FrameHandlers<K> for Count {
    fn click(&mut self, _id: K) {
        self.0 += 1;
    }
}

fn gen_grid_items(n: usize, cell: f64) -> Vec<Interactive<u32>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Interactive {
                id: (y * n + x) as u32,
                rect: Rect::new(x0, y0, x0 + cell, y0 + cell),
                focusable: (x + y) % 3 == 0,
            });
        }
    }
    out
}

fn gen_flex_buttons(n: usize) -> (LayoutTree, NodeId) {
    let mut tree = LayoutTree::new();
    let root = tree.insert(
        None,
        BoxStyle {
            width: SizeExpression::px(1000.0),
            height: SizeExpression::children(),
            flex_wrap: FlexWrap::Wrap,
            ..Default::default()
        },
    );
    for _ in 0..n {
        let b = tree.insert(
            Some(root),
            BoxStyle {
                width: SizeExpression::px(40.0),
                height: SizeExpression::px(20.0),
                ..Default::default()
            },
        );
        tree.set_flags(b, NodeFlags::INTERACTIVE | NodeFlags::FOCUSABLE);
    }
    tree.solve(root, &LayoutContext::new(&Size::new(1000.0, 1000.0)));
    tree.propagate_visibility(root);
    (tree, root)
}

fn bench_run_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_frame");
    for &n in &[16usize, 64, 128] {
        let items = gen_grid_items(n, 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("press_release_n{}", n), |b| {
            let mut cx = InteractionContext::new(NAV);
            let mut count = Count(0);
            let at = Point::new(55.0, 55.0);
            let press = FrameInput::pointer(at, true);
            let release = FrameInput::pointer(at, false);
            b.iter(|| {
                run_frame(&mut cx, &press, &items, &mut count);
                let s = run_frame(&mut cx, &release, &items, &mut count);
                black_box(s.clicked.len());
            })
        });
        group.bench_function(format!("tab_cycle_n{}", n), |b| {
            let mut cx = InteractionContext::new(NAV);
            cx.set_focus(0);
            let next = FrameInput::default()
                .with_action(ActionEvent::held(3))
                .with_action(ActionEvent::pressed(0));
            b.iter(|| {
                let s = run_frame(&mut cx, &next, &items, &mut Count(0));
                black_box(s.focus);
            })
        });
    }
    group.finish();
}

fn bench_flex_adapter(c: &mut Criterion) {
    let mut group = c.benchmark_group("flex_adapter");
    for &n in &[256usize, 2048] {
        let (tree, root) = gen_flex_buttons(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("collect_and_frame_n{}", n), |b| {
            let mut cx = InteractionContext::new(NAV);
            let input = FrameInput::pointer(Point::new(100.0, 30.0), false);
            b.iter(|| {
                let items = interactive_items(&tree, root);
                let s = run_frame(&mut cx, &input, &items, &mut Count(0));
                black_box(s.hot);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_run_frame, bench_flex_adapter);
criterion_main!(benches);

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Size;
use understory_flex::{
    AlignItems, BoxStyle, FlexDirection, FlexWrap, FontId, JustifyContent, LayoutContext,
    LayoutTree, MonospaceMeasure, NodeId, Sides, SizeExpression, TextSpec,
};

const VIEWPORT: Size = Size::new(1920.0, 1080.0);

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn fixed(w: f64, h: f64) -> BoxStyle {
    BoxStyle {
        width: SizeExpression::px(w),
        height: SizeExpression::px(h),
        margin: Sides::all(SizeExpression::px(2.0)),
        ..Default::default()
    }
}

/// A column of `rows` rows, each holding `cols` randomly sized cells.
fn gen_table(rows: usize, cols: usize) -> (LayoutTree, NodeId) {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    let mut tree = LayoutTree::new();
    let root = tree.insert(
        None,
        BoxStyle {
            width: SizeExpression::viewport(1.0),
            height: SizeExpression::children(),
            flex_direction: FlexDirection::Column,
            padding: Sides::all(SizeExpression::px(8.0)),
            ..Default::default()
        },
    );
    for _ in 0..rows {
        let row = tree.insert(
            Some(root),
            BoxStyle {
                width: SizeExpression::percent(1.0),
                height: SizeExpression::children(),
                justify_content: JustifyContent::SpaceBetween,
                align_items: AlignItems::Center,
                ..Default::default()
            },
        );
        for _ in 0..cols {
            let w = 10.0 + rng.next_f64() * 40.0;
            let h = 10.0 + rng.next_f64() * 20.0;
            tree.insert(Some(row), fixed(w, h));
        }
    }
    (tree, root)
}

/// One wrapping row of `n` cells.
fn gen_wrap(n: usize) -> (LayoutTree, NodeId) {
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    let mut tree = LayoutTree::new();
    let root = tree.insert(
        None,
        BoxStyle {
            width: SizeExpression::px(800.0),
            height: SizeExpression::children(),
            flex_wrap: FlexWrap::Wrap,
            align_items: AlignItems::Stretch,
            ..Default::default()
        },
    );
    for _ in 0..n {
        let w = 20.0 + rng.next_f64() * 80.0;
        tree.insert(
            Some(root),
            BoxStyle {
                width: SizeExpression::px(w),
                ..Default::default()
            },
        );
    }
    (tree, root)
}

fn gen_labels(n: usize) -> (LayoutTree, NodeId) {
    let mut tree = LayoutTree::new();
    let root = tree.insert(
        None,
        BoxStyle {
            width: SizeExpression::children(),
            height: SizeExpression::children(),
            flex_direction: FlexDirection::Column,
            ..Default::default()
        },
    );
    for i in 0..n {
        let label = tree.insert(
            Some(root),
            BoxStyle {
                width: SizeExpression::text(),
                height: SizeExpression::text(),
                ..Default::default()
            },
        );
        let text = format!("label number {i}");
        tree.set_text(label, Some(TextSpec::new(FontId(0), text, 14.0)));
    }
    (tree, root)
}

fn bench_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("table");
    for &(rows, cols) in &[(16usize, 16usize), (64, 32), (256, 32)] {
        let (mut tree, root) = gen_table(rows, cols);
        group.throughput(Throughput::Elements((rows * cols) as u64));
        group.bench_function(format!("solve_r{}_c{}", rows, cols), |b| {
            b.iter(|| {
                let report = tree.solve(root, &LayoutContext::new(&VIEWPORT));
                black_box(report.visited);
            })
        });
        group.bench_function(format!("solve_visibility_r{}_c{}", rows, cols), |b| {
            b.iter(|| {
                tree.solve(root, &LayoutContext::new(&VIEWPORT));
                tree.propagate_visibility(root);
                black_box(tree.is_visible(root));
            })
        });
    }
    group.finish();
}

fn bench_build_and_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &n in &[256usize, 4096] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("build_solve_wrap_n{}", n), |b| {
            b.iter_batched(
                || n,
                |n| {
                    let (mut tree, root) = gen_wrap(n);
                    let report = tree.solve(root, &LayoutContext::new(&VIEWPORT));
                    black_box(report.visited);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_wrap(c: &mut Criterion) {
    let mut group = c.benchmark_group("wrap");
    for &n in &[256usize, 4096] {
        let (mut tree, root) = gen_wrap(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("solve_n{}", n), |b| {
            b.iter(|| {
                let report = tree.solve(root, &LayoutContext::new(&VIEWPORT));
                black_box(report.overflowed.len());
            })
        });
    }
    group.finish();
}

fn bench_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("text");
    let measure = MonospaceMeasure::default();
    for &n in &[128usize, 1024] {
        let (mut tree, root) = gen_labels(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("solve_monospace_n{}", n), |b| {
            b.iter(|| {
                let cx = LayoutContext::new(&VIEWPORT).with_text(&measure);
                let report = tree.solve(root, &cx);
                black_box(report.visited);
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_table,
    bench_build_and_solve,
    bench_wrap,
    bench_text
);
criterion_main!(benches);

// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use trellis_tree::{Domain, Module, ModuleId, ModuleTree, Route, Toolkit};

/// Counts calls and draws nothing.
#[derive(Default)]
struct Null {
    calls: u64,
    placeholders: u32,
}

impl Toolkit for Null {
    type Surface = u32;
    fn show_root(&mut self, _: &u32, _: &u32) {
        self.calls += 1;
    }
    fn push(&mut self, _: &u32, _: &u32, _: bool) {
        self.calls += 1;
    }
    fn pop(&mut self, _: &u32, _: &u32, _: bool) {
        self.calls += 1;
    }
    fn present(&mut self, _: &u32, _: &u32, _: bool) {
        self.calls += 1;
    }
    fn dismiss(&mut self, _: &u32, _: bool) {
        self.calls += 1;
    }
    fn install_tabs(&mut self, _: &u32, _: &[u32]) {
        self.calls += 1;
    }
    fn select_tab(&mut self, _: &u32, _: usize) {
        self.calls += 1;
    }
    fn placeholder(&mut self) -> u32 {
        self.placeholders += 1;
        u32::MAX - self.placeholders
    }
}

struct Bench;

impl Domain for Bench {
    type Kind = u16;
    type Message = u32;
    type Toolkit = Null;
}

/// Every kind gets a surface and can push children of its own.
fn screen(kind: u16) -> Module<Bench> {
    Module::new((), Route::Push)
        .with_surface(u32::from(kind) + 1)
        .with_builder(screen)
}

/// Odd kinds are headless.
fn slot(kind: u16) -> Module<Bench> {
    if kind % 2 == 0 {
        Module::new((), ()).with_surface(u32::from(kind) + 1)
    } else {
        Module::new((), ()).with_builder(screen)
    }
}

fn launched(root: Module<Bench>) -> (ModuleTree<Bench>, ModuleId) {
    let mut tree = ModuleTree::new(Null::default());
    let id = tree.insert(root);
    let _ = tree.launch(id, 0);
    (tree, id)
}

fn navigation_root() -> (ModuleTree<Bench>, ModuleId) {
    launched(
        Module::new((), Route::Push)
            .with_surface(100_000)
            .with_stack(100_001)
            .with_builder(screen),
    )
}

fn bench_siblings(c: &mut Criterion) {
    let mut group = c.benchmark_group("siblings");
    for &n in &[16u16, 64, 256] {
        group.throughput(Throughput::Elements(u64::from(n)));
        group.bench_function(format!("present_complete_n{n}"), |b| {
            b.iter_batched(
                navigation_root,
                |(mut tree, root)| {
                    for kind in 0..n {
                        let _ = tree.present(root, kind, Some(u32::from(kind)), false);
                    }
                    for kind in 0..n {
                        if let Some(child) = tree.child(root, kind) {
                            let _ = tree.complete(child, None, false, false);
                        }
                    }
                    black_box(tree.len())
                },
                BatchSize::SmallInput,
            );
        });
        group.bench_function(format!("suspend_resume_n{n}"), |b| {
            b.iter_batched(
                navigation_root,
                |(mut tree, root)| {
                    for kind in 0..n {
                        let _ = tree.present(root, kind, None, false);
                    }
                    for _ in 0..2 {
                        for kind in 0..n {
                            if let Some(child) = tree.child(root, kind) {
                                let _ = tree.complete(child, None, false, true);
                            }
                        }
                        for kind in 0..n {
                            let _ = tree.present(root, kind, None, false);
                        }
                    }
                    black_box(tree.toolkit().calls)
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_stack_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("stack_depth");
    for &depth in &[8u16, 32, 128] {
        group.throughput(Throughput::Elements(u64::from(depth)));
        group.bench_function(format!("push_chain_then_cascade_d{depth}"), |b| {
            b.iter_batched(
                navigation_root,
                |(mut tree, root)| {
                    let mut parent = root;
                    for kind in 0..depth {
                        if tree.push(parent, kind, None, false).is_err() {
                            break;
                        }
                        match tree.child(parent, kind) {
                            Some(child) => parent = child,
                            None => break,
                        }
                    }
                    if let Some(first) = tree.child(root, 0) {
                        let _ = tree.complete(first, None, false, false);
                    }
                    black_box(tree.len())
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_tabs(c: &mut Criterion) {
    let mut group = c.benchmark_group("tabs");
    for &n in &[4u16, 16, 64] {
        group.throughput(Throughput::Elements(u64::from(n)));
        group.bench_function(format!("launch_slots_n{n}"), |b| {
            b.iter(|| {
                let (tree, root) = launched(
                    Module::new((), Route::Select)
                        .with_tabs(200_000, 0..n)
                        .with_builder(slot),
                );
                black_box(tree.children(root).len())
            });
        });
        group.bench_function(format!("select_round_n{n}"), |b| {
            let (mut tree, root) = launched(
                Module::new((), Route::Select)
                    .with_tabs(200_000, 0..n)
                    .with_builder(slot),
            );
            b.iter(|| {
                for kind in 0..n {
                    let _ = tree.route(root, kind, Some(7), false);
                }
                black_box(tree.selected_tab(root))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_siblings, bench_stack_depth, bench_tabs);
criterion_main!(benches);

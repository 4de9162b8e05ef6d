// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_dispatcher::{Dispatcher, Payload};
use understory_tree_dnd::node::{Node, RecordAccess};
use understory_tree_dnd::{
    DragAndDropStore, ElementAccess, Mutation, TreeDispatcher, deep_key_of, resolve, set_in,
};

fn container(id: String, items: Vec<Node>) -> Node {
    Node::record([("_id", Node::leaf(id)), ("elements", Node::list(items))])
}

/// `width` leaves per container, nested `depth` levels; the last leaf of the deepest level is
/// returned as the search needle.
fn gen_nested(width: usize, depth: usize) -> (Node, Node) {
    let needle = Node::leaf("needle");
    let mut items: Vec<Node> = (0..width).map(|i| Node::leaf(format!("l{depth}_{i}"))).collect();
    items.push(needle.clone());
    let mut node = container(format!("c{depth}"), items);
    for level in (0..depth).rev() {
        let mut items: Vec<Node> = (0..width).map(|i| Node::leaf(format!("l{level}_{i}"))).collect();
        items.push(node);
        node = container(format!("c{level}"), items);
    }
    (node, needle)
}

fn bench_key_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("key_path");
    for &(width, depth) in &[(16usize, 4usize), (64, 8), (256, 4)] {
        let (tree, needle) = gen_nested(width, depth);
        group.throughput(Throughput::Elements(((width + 1) * (depth + 1)) as u64));
        group.bench_function(format!("deep_key_of_w{width}_d{depth}"), |b| {
            b.iter(|| black_box(deep_key_of(&tree, &needle)));
        });
        let path = deep_key_of(&tree, &needle).unwrap();
        group.bench_function(format!("set_in_w{width}_d{depth}"), |b| {
            b.iter(|| black_box(set_in(&tree, &path, Node::leaf("replaced"))));
        });
    }
    group.finish();
}

fn bench_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag");
    for &n in &[16usize, 128, 1024] {
        let items: Vec<Node> = (0..n).map(|i| Node::leaf(format!("i{i}"))).collect();
        let source = container("source".into(), items.clone());
        let target = container("target".into(), (0..n).map(|i| Node::leaf(format!("t{i}"))).collect());
        let hover = RecordAccess::default().elements(&target).unwrap();
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("drag_over_sweep_n{n}"), |b| {
            b.iter_batched(
                || {
                    let dispatcher: TreeDispatcher<Node> = Dispatcher::new();
                    DragAndDropStore::detached(dispatcher.register_store(), RecordAccess::default())
                },
                |mut store| {
                    store.start_existing(items[n / 2].clone(), source.clone());
                    for under in &hover {
                        let _ = store.drag_over(target.clone(), Some(under.clone()));
                    }
                    black_box(store.end())
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    for &(width, depth) in &[(16usize, 4usize), (64, 8)] {
        let (outer, _) = gen_nested(width, depth);
        let inner = RecordAccess::default()
            .elements(&outer)
            .and_then(|items| items.last().cloned())
            .unwrap();
        group.bench_function(format!("nested_w{width}_d{depth}"), |b| {
            b.iter(|| {
                let outer = Mutation {
                    before: outer.clone(),
                    after: container("outer".into(), vec![inner.clone()]),
                };
                let inner = Mutation {
                    before: inner.clone(),
                    after: container("inner".into(), Vec::new()),
                };
                black_box(resolve(outer, inner))
            });
        });
    }
    group.finish();
}

#[derive(Clone, Copy)]
struct Tick;

impl Payload for Tick {
    type Kind = u8;
    fn kind(&self) -> Option<u8> {
        Some(0)
    }
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    for &n in &[4usize, 32, 256] {
        let dispatcher: Dispatcher<Tick> = Dispatcher::new();
        let stores: Vec<_> = (0..n).map(|_| dispatcher.register_store()).collect();
        // Each store waits on the next one, so every dispatch walks the whole chain.
        for (i, &store) in stores.iter().enumerate() {
            let next = stores.get(i + 1).copied();
            dispatcher.register(0, store, move |d| {
                if let Some(next) = next {
                    d.wait_for(&[next])?;
                }
                Ok(())
            });
        }
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("wait_for_chain_n{n}"), |b| {
            b.iter(|| black_box(dispatcher.dispatch(&mut Tick)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_key_path,
    bench_drag,
    bench_resolve,
    bench_dispatch,
);
criterion_main!(benches);

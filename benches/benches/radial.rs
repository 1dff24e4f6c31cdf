// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use understory_radial::{LayoutElement, RadialLayout, connector_crossings};

const PROJECT: u32 = u32::MAX;

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }
}

/// A tree where every task hangs off the project or an earlier task.
fn random_tree(n: u32, seed: u64) -> Vec<LayoutElement<u32>> {
    let mut rng = Lcg::new(seed);
    let mut out = vec![LayoutElement::project(PROJECT)];
    for id in 0..n {
        let pick = rng.next_u32() % (id + 1);
        let parent = if pick == id { PROJECT } else { pick };
        out.push(LayoutElement::task(id, Some(parent)));
    }
    out
}

/// A complete tree with `fanout` children per node.
fn balanced_tree(n: u32, fanout: u32) -> Vec<LayoutElement<u32>> {
    let mut out = vec![LayoutElement::project(PROJECT)];
    for id in 0..n {
        let parent = if id < fanout { PROJECT } else { id / fanout - 1 };
        out.push(LayoutElement::task(id, Some(parent)));
    }
    out
}

fn bench_distribute(c: &mut Criterion) {
    let mut group = c.benchmark_group("radial/distribute");
    let engine = RadialLayout::default();
    let canvas = Rect::new(0.0, 0.0, 1920.0, 1080.0);

    for n in [16_u32, 128, 1_024, 8_192] {
        group.throughput(Throughput::Elements(u64::from(n)));

        let random = random_tree(n, 0x5EED_0000_0000_0001);
        group.bench_with_input(BenchmarkId::new("random", n), &random, |b, input| {
            b.iter(|| black_box(engine.distribute(input, canvas)));
        });

        let balanced = balanced_tree(n, 4);
        group.bench_with_input(BenchmarkId::new("fanout4", n), &balanced, |b, input| {
            b.iter(|| black_box(engine.distribute(input, canvas)));
        });
    }

    group.finish();
}

fn bench_crossings(c: &mut Criterion) {
    let mut group = c.benchmark_group("radial/connector_crossings");
    let engine = RadialLayout::default();
    let canvas = Rect::new(0.0, 0.0, 1920.0, 1080.0);

    for n in [16_u32, 128, 512] {
        let Ok(placed) = engine.distribute(&random_tree(n, 0x5EED_0000_0000_0002), canvas) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::from_parameter(n), &placed, |b, placed| {
            b.iter(|| black_box(connector_crossings(placed)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_distribute, bench_crossings);
criterion_main!(benches);

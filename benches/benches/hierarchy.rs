// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_hierarchy::{HierarchyCalculator, HierarchyConfig, Task, TaskIndex};

const PROJECT: u32 = u32::MAX;

/// A complete tree with `fanout` children per node; the last id is a deepest leaf.
fn balanced(n: u32, fanout: u32) -> Vec<Task<u32>> {
    (0..n)
        .map(|id| {
            let parent = if id < fanout { None } else { Some(id / fanout - 1) };
            Task::new(id, parent)
        })
        .collect()
}

/// A single chain, the worst case for ancestor walks.
fn chain(n: u32) -> Vec<Task<u32>> {
    (0..n)
        .map(|id| Task::new(id, id.checked_sub(1).or(Some(PROJECT))))
        .collect()
}

fn bench_hierarchy(c: &mut Criterion) {
    let mut group = c.benchmark_group("hierarchy");
    let calc = HierarchyCalculator::new(HierarchyConfig::default());

    for n in [64_u32, 512, 4_096] {
        group.throughput(Throughput::Elements(u64::from(n)));
        let tree = balanced(n, 4);
        let leaf = n - 1;

        group.bench_with_input(BenchmarkId::new("task/fanout4", n), &tree, |b, tasks| {
            b.iter(|| black_box(calc.calculate_task_hierarchy(&leaf, tasks, &PROJECT)));
        });
        group.bench_with_input(BenchmarkId::new("project/fanout4", n), &tree, |b, tasks| {
            b.iter(|| black_box(calc.calculate_project_hierarchy(&PROJECT, tasks)));
        });
        group.bench_with_input(BenchmarkId::new("depth_levels/fanout4", n), &tree, |b, tasks| {
            b.iter(|| black_box(TaskIndex::new(tasks, &PROJECT).depth_levels()));
        });

        let chain = chain(n);
        group.bench_with_input(BenchmarkId::new("task/chain", n), &chain, |b, tasks| {
            b.iter(|| black_box(calc.calculate_task_hierarchy(&leaf, tasks, &PROJECT)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_hierarchy);
criterion_main!(benches);

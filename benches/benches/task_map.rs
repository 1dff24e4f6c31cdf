// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::Rect;
use understory_hierarchy::Task;
use understory_task_map::{RenderEvent, TaskMap, TaskMapConfig};
use understory_view2d::Viewport2D;

const PROJECT: u32 = u32::MAX;

fn balanced(n: u32, fanout: u32) -> Vec<Task<u32>> {
    (0..n)
        .map(|id| {
            let parent = if id < fanout { None } else { Some(id / fanout - 1) };
            Task::new(id, parent)
        })
        .collect()
}

fn loaded(n: u32) -> TaskMap<u32> {
    let viewport = Viewport2D::new(Rect::new(0.0, 0.0, 1280.0, 800.0));
    let mut map = TaskMap::new(PROJECT, viewport, TaskMapConfig::default());
    map.task_list_changed(balanced(n, 4), 0).unwrap();
    map.drain_events();
    map
}

/// Ticks through every pending deadline.
fn run_to_idle(map: &mut TaskMap<u32>) {
    while let Some(deadline) = map.next_deadline() {
        map.tick(deadline);
    }
}

fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("task_map/select_and_settle");

    for n in [64_u32, 512, 2_048] {
        group.throughput(Throughput::Elements(u64::from(n)));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter_batched(
                || loaded(n),
                |mut map| {
                    map.select_task(n / 2, 1_000);
                    let ids: Vec<u32> = map
                        .states()
                        .iter()
                        .filter(|(_, s)| !s.is_hidden())
                        .map(|(id, _)| *id)
                        .collect();
                    for id in ids {
                        if let Some(bounds) = map.world_rect(&id) {
                            map.handle_render(RenderEvent::RectangleRendered { id, bounds }, 1_010);
                        }
                    }
                    run_to_idle(&mut map);
                    black_box(map.drain_events())
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_relayout(c: &mut Criterion) {
    let mut group = c.benchmark_group("task_map/task_list_changed");

    for n in [64_u32, 512, 2_048] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter_batched(
                || (loaded(n), balanced(n + 1, 4)),
                |(mut map, grown)| black_box(map.task_list_changed(grown, 1_000)),
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_select, bench_relayout);
criterion_main!(benches);
